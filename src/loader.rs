use serde::de::DeserializeOwned;

use crate::error::ResourceError;
use crate::model::{CompanyDetail, DashboardSnapshot, Day, DayPlacements, DaySchedule};
use crate::source::{paths, DataSource};

/// Reads one resource and parses it as `T`. No retries, no caching.
pub async fn fetch_json<T: DeserializeOwned>(
    source: &dyn DataSource,
    path: &str,
) -> Result<T, ResourceError> {
    let bytes = source.read(path).await?;
    serde_json::from_slice(&bytes).map_err(|e| ResourceError::Malformed {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

/// Logs a failed load at the level its kind deserves.
pub fn log_unavailable(err: &ResourceError) {
    if err.is_not_yet_available() {
        tracing::debug!("{}", err);
    } else {
        tracing::warn!("{}", err);
    }
}

pub async fn load_dashboard(source: &dyn DataSource) -> Result<DashboardSnapshot, ResourceError> {
    fetch_json(source, paths::DASHBOARD).await
}

pub async fn load_day_schedule(
    source: &dyn DataSource,
    day: Day,
) -> Result<DaySchedule, ResourceError> {
    fetch_json(source, &paths::day_schedule(day)).await
}

pub async fn load_company(
    source: &dyn DataSource,
    day: Day,
    sheet_name: &str,
) -> Result<CompanyDetail, ResourceError> {
    let path = paths::company(day, sheet_name)?;
    fetch_json(source, &path).await
}

pub async fn load_day_placements(
    source: &dyn DataSource,
    day: Day,
) -> Result<DayPlacements, ResourceError> {
    fetch_json(source, &paths::day_placements(day)).await
}
