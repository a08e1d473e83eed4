use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

use super::DataSource;
use crate::error::{ConfigError, ResourceError};

const TIMEOUT: Duration = Duration::from_secs(15);

/// Data tree published behind a web server. One GET per read, no retries.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base: Url,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base: &str) -> Result<Self, ConfigError> {
        // a base without a trailing slash would drop its last segment on join
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{}/", base)
        };
        let base = Url::parse(&normalized).map_err(|e| ConfigError::InvalidUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })?;
        let client = reqwest::Client::builder()
            .timeout(TIMEOUT)
            .user_agent(concat!("placement-board/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(HttpSource { base, client })
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn read(&self, path: &str) -> Result<Vec<u8>, ResourceError> {
        let transport = |reason: String| ResourceError::Transport {
            path: path.to_string(),
            reason,
        };

        let url = self.base.join(path).map_err(|e| transport(e.to_string()))?;
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport(e.to_string()))?;

        match resp.status() {
            s if s.is_success() => {
                let body = resp.bytes().await.map_err(|e| transport(e.to_string()))?;
                Ok(body.to_vec())
            }
            s if s == StatusCode::NOT_FOUND => Err(ResourceError::NotYetAvailable {
                path: path.to_string(),
            }),
            s => Err(transport(format!("HTTP {}", s))),
        }
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}
