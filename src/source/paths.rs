//! Resource addressing convention of the published data tree.

use crate::error::ResourceError;
use crate::model::Day;

pub const DASHBOARD: &str = "data/dashboard.json";

pub fn day_schedule(day: Day) -> String {
    format!("data/day{}-schedule.json", day)
}

pub fn day_placements(day: Day) -> String {
    format!("data/day{}-placed.json", day)
}

/// Company detail path. The sheet name comes from published data, so it
/// must stay a single path segment.
pub fn company(day: Day, sheet_name: &str) -> Result<String, ResourceError> {
    let path = format!("data/companies/day{}-{}.json", day, sheet_name);
    if sheet_name.is_empty() || sheet_name.contains(['/', '\\']) || sheet_name.contains("..") {
        return Err(ResourceError::Malformed {
            path,
            reason: format!("invalid sheet name {:?}", sheet_name),
        });
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u8) -> Day {
        Day::new(n).unwrap()
    }

    #[test]
    fn builds_paths() {
        assert_eq!(day_schedule(day(2)), "data/day2-schedule.json");
        assert_eq!(day_placements(day(3)), "data/day3-placed.json");
        assert_eq!(company(day(1), "acme").unwrap(), "data/companies/day1-acme.json");
    }

    #[test]
    fn rejects_escaping_sheet_names() {
        assert!(company(day(1), "../secret").is_err());
        assert!(company(day(1), "a/b").is_err());
        assert!(company(day(1), "a\\b").is_err());
        assert!(company(day(1), "").is_err());
    }
}
