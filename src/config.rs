//! Settings resolution: command-line flag, then environment, then default.

use std::path::PathBuf;
use std::time::Duration;

use crate::display::view::TABLE_BREAKPOINT;
use crate::error::ConfigError;

pub const DATA_ENV: &str = "PLACEMENT_DATA";
pub const PORT_ENV: &str = "PORT";
pub const COUNTER_FILE_ENV: &str = "PLACEMENT_COUNTER_FILE";

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_COUNTER_FILE: &str = ".store/visits.json";
pub const DEFAULT_REFRESH_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory or base URL holding the `data/` tree.
    pub data: String,
    pub port: u16,
    pub counter_file: PathBuf,
    pub refresh: Duration,
    pub table_breakpoint: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data: ".".to_string(),
            port: DEFAULT_PORT,
            counter_file: PathBuf::from(DEFAULT_COUNTER_FILE),
            refresh: Duration::from_secs(DEFAULT_REFRESH_SECS),
            table_breakpoint: TABLE_BREAKPOINT,
        }
    }
}

pub fn resolve_data(explicit: Option<&str>) -> String {
    if let Some(data) = explicit {
        return data.to_string();
    }
    std::env::var(DATA_ENV).unwrap_or_else(|_| ".".to_string())
}

pub fn resolve_port(explicit: Option<u16>) -> Result<u16, ConfigError> {
    if let Some(port) = explicit {
        return Ok(port);
    }
    match std::env::var(PORT_ENV) {
        Ok(v) => v.trim().parse().map_err(|_| ConfigError::InvalidValue {
            name: PORT_ENV,
            value: v,
        }),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

pub fn resolve_counter_file(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os(COUNTER_FILE_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_COUNTER_FILE))
}
