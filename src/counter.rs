//! Page-load counter kept in an external key-value store.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::CounterError;

pub const VISITS_KEY: &str = "total-visits";

/// Shown when the count cannot be read.
pub const VISITS_PLACEHOLDER: &str = "---";

#[async_trait]
pub trait CounterStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CounterError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), CounterError>;

    /// Adds one to the count under `key` as a single step and returns the
    /// new count. An absent key counts from zero.
    async fn increment(&self, key: &str) -> Result<u64, CounterError>;
}

fn parse_count(key: &str, value: Option<&str>) -> Result<u64, CounterError> {
    match value {
        None => Ok(0),
        Some(v) => v
            .trim()
            .parse::<u64>()
            .map_err(|_| CounterError::Corrupt(format!("{} is not a count: {:?}", key, v))),
    }
}

/// Keys and values in one JSON object on disk.
pub struct FileCounterStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileCounterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCounterStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<HashMap<String, String>, CounterError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| CounterError::Corrupt(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes a sibling temp file, then renames it over the store.
    async fn store(&self, values: &HashMap<String, String>) -> Result<(), CounterError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(values).map_err(|e| CounterError::Corrupt(e.to_string()))?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl CounterStore for FileCounterStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CounterError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CounterError> {
        let _guard = self.lock.lock().await;
        let mut values = self.load().await?;
        values.insert(key.to_string(), value.to_string());
        self.store(&values).await
    }

    async fn increment(&self, key: &str) -> Result<u64, CounterError> {
        let _guard = self.lock.lock().await;
        let mut values = self.load().await?;
        let next = parse_count(key, values.get(key).map(String::as_str))? + 1;
        values.insert(key.to_string(), next.to_string());
        self.store(&values).await?;
        Ok(next)
    }
}

#[derive(Default)]
pub struct MemoryCounterStore {
    values: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CounterError> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CounterError> {
        self.values.lock().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn increment(&self, key: &str) -> Result<u64, CounterError> {
        let mut values = self.values.lock().await;
        let next = parse_count(key, values.get(key).map(String::as_str))? + 1;
        values.insert(key.to_string(), next.to_string());
        Ok(next)
    }
}

/// Current total without counting a visit.
pub async fn current_visits(store: &dyn CounterStore) -> Result<u64, CounterError> {
    let value = store.get(VISITS_KEY).await?;
    parse_count(VISITS_KEY, value.as_deref())
}

/// Counts one visit. Returns the new total.
pub async fn record_visit(store: &dyn CounterStore) -> Result<u64, CounterError> {
    store.increment(VISITS_KEY).await
}

/// Count for display; failures become the placeholder.
pub fn visit_label(count: Result<u64, CounterError>) -> String {
    match count {
        Ok(n) => format_visits(n),
        Err(e) => {
            tracing::warn!("visit counter unavailable: {}", e);
            VISITS_PLACEHOLDER.to_string()
        }
    }
}

/// Indian digit grouping: 1234567 -> "12,34,567".
pub fn format_visits(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    groups.push(rest);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
