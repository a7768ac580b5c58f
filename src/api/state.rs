//! Application state for the holiday engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::service::HolidayService;
use crate::storage::InMemoryStore;

/// Shared application state.
///
/// Holds the holiday service every handler calls into.
#[derive(Clone)]
pub struct AppState {
    service: Arc<HolidayService<InMemoryStore>>,
}

impl AppState {
    /// Creates a new application state around a service.
    pub fn new(service: HolidayService<InMemoryStore>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Returns a reference to the holiday service.
    pub fn service(&self) -> &HolidayService<InMemoryStore> {
        &self.service
    }
}
