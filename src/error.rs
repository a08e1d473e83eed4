//! Error types shared across the crate.

/// Failure to read or parse one JSON resource.
///
/// Every variant degrades the same way at the call sites (the resource is
/// treated as absent); they are kept apart so the logs say which one it was.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("{path} is not available yet")]
    NotYetAvailable { path: String },

    #[error("{path} is malformed: {reason}")]
    Malformed { path: String, reason: String },

    #[error("failed to read {path}: {reason}")]
    Transport { path: String, reason: String },
}

impl ResourceError {
    pub fn is_not_yet_available(&self) -> bool {
        matches!(self, ResourceError::NotYetAvailable { .. })
    }

    pub fn path(&self) -> &str {
        match self {
            ResourceError::NotYetAvailable { path }
            | ResourceError::Malformed { path, .. }
            | ResourceError::Transport { path, .. } => path,
        }
    }
}

/// Errors surfaced by a roll-number search.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Rejected before anything is fetched.
    #[error("{0}")]
    InputInvalid(String),

    #[error("day schedule could not be read: {0}")]
    ScheduleUnreadable(ResourceError),
}

impl SearchError {
    /// Message shown in place of the results.
    pub fn user_message(&self) -> String {
        match self {
            SearchError::InputInvalid(msg) => msg.clone(),
            SearchError::ScheduleUnreadable(_) => "Search failed. Please try again.".to_string(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CounterError {
    #[error("counter store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("counter store is corrupt: {0}")]
    Corrupt(String),
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid data URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("cannot build HTTP client: {0}")]
    HttpClient(String),
}
