use std::sync::Arc;

use chrono::Local;
use logger::{Color, Logger};

pub mod config;
pub mod context;
pub mod errors;
pub mod fetcher;
pub mod format;
pub mod geocoder;
mod map;
mod plugins;
pub mod provider;
pub mod state;
pub mod store;
pub mod types;
mod widgets;
mod windows;

use config::AppConfig;
use context::AppContext;
use errors::AppError;
use geocoder::CsvGazetteer;
use map::ProtestMapApp;
use provider::CsvProvider;

/// Loads the data sets, opens the session log and runs the window until it is closed.
pub fn run(config: AppConfig) -> Result<(), AppError> {
    let session = format!("protest-map-{}", Local::now().format("%Y%m%d-%H%M%S"));
    let logger = Logger::new(&config.log_dir, &session, config.verbose)?;

    let provider = CsvProvider::open(&config.protests_path, config.query_radius_m)
        .map_err(|e| log_startup_error(&logger, AppError::from(e)))?;
    let geocoder = CsvGazetteer::open(&config.places_path)
        .map_err(|e| log_startup_error(&logger, AppError::from(e)))?;
    logger.info(
        &format!(
            "Loaded {} protests from {} and {} places from {}",
            provider.len(),
            config.protests_path.display(),
            geocoder.len(),
            config.places_path.display()
        ),
        Color::Green,
    )?;

    let context = AppContext::new(
        config,
        Arc::new(provider),
        Box::new(geocoder),
        logger.clone(),
    )?;

    eframe::run_native(
        "Protest Map",
        Default::default(),
        Box::new(|cc| Ok(Box::new(ProtestMapApp::new(cc.egui_ctx.clone(), context)))),
    )
    .map_err(|e| log_startup_error(&logger, AppError::from(e)))
}

fn log_startup_error(logger: &Logger, error: AppError) -> AppError {
    if let Err(e) = logger.error(&error.to_string()) {
        eprintln!("Error writing log: {}", e);
    }
    error
}
