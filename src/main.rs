//! HTTP server for the holiday engine.
//!
//! Reads the configuration directory from `HOLIDAY_ENGINE_CONFIG`
//! (default `./config/default`), runs the pending updates and serves the API.

use std::env;
use std::error::Error;

use holiday_engine::api::{AppState, create_router};
use holiday_engine::config::ConfigLoader;
use holiday_engine::service::{EmployeeLifecycle, HolidayService};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "HOLIDAY_ENGINE_CONFIG";
const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config_dir = env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let loader = ConfigLoader::load(&config_dir)?;
    let settings = loader.settings().clone();

    let service = HolidayService::new(loader.build_store()?)
        .with_default_weekends(settings.default_weekends.clone())
        .with_table_prefix(settings.table_prefix.clone());

    service.run_updates()?;
    if let Some(warning) = service.work_location_warning()? {
        warn!("{warning}");
    }

    let router = create_router(AppState::new(service));
    let listener = TcpListener::bind(&settings.listen_addr).await?;
    info!(listen_addr = %settings.listen_addr, config_dir = %config_dir, "Holiday engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
