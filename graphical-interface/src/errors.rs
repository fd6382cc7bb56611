use std::fmt::{self, Display};

use logger::LoggerError;
use viewport::ViewportError;

use crate::{config::ConfigError, geocoder::GeocodeError, provider::ProviderError};

/// Errors that stop the application from starting or running.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Logger(LoggerError),
    Provider(ProviderError),
    Geocoder(GeocodeError),
    Viewport(ViewportError),
    Ui(eframe::Error),
}

impl Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "[Config]: {}", e),
            AppError::Logger(e) => write!(f, "[Logger]: {}", e),
            AppError::Provider(e) => write!(f, "[Provider]: {}", e),
            AppError::Geocoder(e) => write!(f, "[Geocoder]: {}", e),
            AppError::Viewport(e) => write!(f, "[Viewport]: {}", e),
            AppError::Ui(e) => write!(f, "[Ui]: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<LoggerError> for AppError {
    fn from(err: LoggerError) -> Self {
        AppError::Logger(err)
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::Provider(err)
    }
}

impl From<GeocodeError> for AppError {
    fn from(err: GeocodeError) -> Self {
        AppError::Geocoder(err)
    }
}

impl From<ViewportError> for AppError {
    fn from(err: ViewportError) -> Self {
        AppError::Viewport(err)
    }
}

impl From<eframe::Error> for AppError {
    fn from(err: eframe::Error) -> Self {
        AppError::Ui(err)
    }
}
