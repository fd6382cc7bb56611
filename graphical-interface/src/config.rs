use std::{env, fmt, path::PathBuf};

use viewport::{Coordinate, DEFAULT_QUERY_RADIUS_M};

pub const DEFAULT_PROTESTS_PATH: &str = "data/protests.csv";
pub const DEFAULT_PLACES_PATH: &str = "data/places.csv";
pub const LOG_DIR_ENV: &str = "PROTEST_MAP_LOG_DIR";
pub const DEFAULT_FETCH_WORKERS: usize = 4;

pub const USAGE: &str = "Usage: protest-map [--protests <csv>] [--places <csv>] \
[--position <lat,lon>] [--log-dir <dir>] [--radius <meters>] [--verbose]";

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    HelpRequested,
    MissingValue(String),
    InvalidValue { flag: String, value: String },
    UnknownFlag(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::HelpRequested => write!(f, "{}", USAGE),
            ConfigError::MissingValue(flag) => write!(f, "Missing value for {}\n{}", flag, USAGE),
            ConfigError::InvalidValue { flag, value } => {
                write!(f, "Invalid value '{}' for {}", value, flag)
            }
            ConfigError::UnknownFlag(flag) => write!(f, "Unknown argument '{}'\n{}", flag, USAGE),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime settings of the protest map.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub protests_path: PathBuf,
    pub places_path: PathBuf,
    pub user_position: Option<Coordinate>,
    pub log_dir: PathBuf,
    pub query_radius_m: f64,
    pub fetch_workers: usize,
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            protests_path: PathBuf::from(DEFAULT_PROTESTS_PATH),
            places_path: PathBuf::from(DEFAULT_PLACES_PATH),
            user_position: None,
            log_dir: PathBuf::from("."),
            query_radius_m: DEFAULT_QUERY_RADIUS_M,
            fetch_workers: DEFAULT_FETCH_WORKERS,
            verbose: false,
        }
    }
}

impl AppConfig {
    /// Reads the process arguments and the `PROTEST_MAP_LOG_DIR` environment variable.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(dir) = env::var(LOG_DIR_ENV) {
            config.log_dir = PathBuf::from(dir);
        }
        config.apply_args(env::args().skip(1))
    }

    /// Builds a configuration from command-line arguments, program name excluded.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        Self::default().apply_args(args)
    }

    fn apply_args<I>(mut self, args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();

        while let Some(flag) = args.next() {
            match flag.as_str() {
                "-h" | "--help" => return Err(ConfigError::HelpRequested),
                "-v" | "--verbose" => self.verbose = true,
                "--protests" => self.protests_path = PathBuf::from(value_for(&flag, &mut args)?),
                "--places" => self.places_path = PathBuf::from(value_for(&flag, &mut args)?),
                "--log-dir" => self.log_dir = PathBuf::from(value_for(&flag, &mut args)?),
                "--position" => {
                    let value = value_for(&flag, &mut args)?;
                    let position = value.parse::<Coordinate>().map_err(|_| {
                        ConfigError::InvalidValue {
                            flag: flag.clone(),
                            value: value.clone(),
                        }
                    })?;
                    self.user_position = Some(position);
                }
                "--radius" => {
                    let value = value_for(&flag, &mut args)?;
                    self.query_radius_m = value
                        .parse::<f64>()
                        .ok()
                        .filter(|radius| radius.is_finite() && *radius > 0.0)
                        .ok_or_else(|| ConfigError::InvalidValue {
                            flag: flag.clone(),
                            value: value.clone(),
                        })?;
                }
                _ => return Err(ConfigError::UnknownFlag(flag.clone())),
            }
        }

        Ok(self)
    }
}

fn value_for<I>(flag: &str, args: &mut I) -> Result<String, ConfigError>
where
    I: Iterator<Item = String>,
{
    args.next()
        .filter(|value| !value.starts_with("--"))
        .ok_or_else(|| ConfigError::MissingValue(flag.to_string()))
}
