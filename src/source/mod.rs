//! Where the published JSON resources come from.

pub mod dir;
pub mod http;
pub mod paths;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{ConfigError, ResourceError};

pub use dir::DirSource;
pub use http::HttpSource;

/// Read-only access to the data tree, addressed by relative paths such as
/// `data/day1-schedule.json`.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn read(&self, path: &str) -> Result<Vec<u8>, ResourceError>;

    /// Human-readable location for logs.
    fn describe(&self) -> String;

    /// Filesystem root, when the tree is local.
    fn local_root(&self) -> Option<&Path> {
        None
    }
}

/// `http://` and `https://` locations are fetched over the network,
/// anything else is a directory.
pub fn open_source(location: &str) -> Result<Arc<dyn DataSource>, ConfigError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Arc::new(HttpSource::new(location)?))
    } else {
        Ok(Arc::new(DirSource::new(location)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_source_by_scheme() {
        assert!(open_source("https://example.org/board").unwrap().local_root().is_none());
        assert!(open_source("./site").unwrap().local_root().is_some());
        assert!(open_source("http://[bad").is_err());
    }
}
