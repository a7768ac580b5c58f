//! Location-scoped holiday resolution and leave-day calculation.
//!
//! Holidays can apply to everyone, to a country or a state within it, or to
//! selected company offices. This crate decides which holidays apply to an
//! employee through their work location, and counts the working days a leave
//! request consumes once weekends and those holidays are excluded.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod migration;
pub mod models;
pub mod service;
pub mod storage;
