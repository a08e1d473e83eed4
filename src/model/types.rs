use serde::{Deserialize, Deserializer, Serialize};

use super::day::Day;
use super::section::CompanySections;

/// One company slot in a day's schedule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub sl_no: String,
    #[serde(deserialize_with = "lenient_string")]
    pub time: String,
    #[serde(deserialize_with = "lenient_string")]
    pub company_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub sheet_name: String, // key into data/companies/day{N}-{sheetName}.json
    #[serde(deserialize_with = "lenient_string")]
    pub arrival_status: String,
    #[serde(deserialize_with = "lenient_string")]
    pub arrival_status_color: String,
    #[serde(deserialize_with = "lenient_string")]
    pub current_status: String,
    #[serde(deserialize_with = "lenient_string")]
    pub current_status_color: String,
    #[serde(deserialize_with = "lenient_string")]
    pub programmes: String,
    #[serde(deserialize_with = "lenient_string")]
    pub venue: String,
    #[serde(deserialize_with = "lenient_string")]
    pub remarks: String,
}

/// Schedule for a single day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaySchedule {
    pub available: bool,
    pub schedule: Vec<ScheduleEntry>,
}

impl DaySchedule {
    /// Published and non-empty.
    pub fn has_entries(&self) -> bool {
        self.available && !self.schedule.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub sl_no: String,
    #[serde(deserialize_with = "lenient_string")]
    pub student_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub roll_no: String,
    #[serde(deserialize_with = "lenient_string")]
    pub discipline: String,
    #[serde(deserialize_with = "lenient_string")]
    pub campus: String,
}

/// Company detail resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyDetail {
    pub sections: CompanySections,
}

/// A confirmed offer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlacementRecord {
    // set by aggregation; whatever the day files carry is ignored
    #[serde(skip_deserializing)]
    pub day: Option<Day>,
    #[serde(deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub time: String,
    #[serde(deserialize_with = "lenient_string")]
    pub company_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub student_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub roll_no: String,
    #[serde(deserialize_with = "lenient_string")]
    pub department: String,
    #[serde(deserialize_with = "lenient_string")]
    pub campus: String,
    #[serde(deserialize_with = "lenient_string")]
    pub designation: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ctc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayPlacements {
    pub placements: Vec<PlacementRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Announcement {
    pub live_announcement: Option<String>,
    pub company_status: Option<String>,
    pub announcement_to_students: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSnapshot {
    pub announcements: Option<Vec<Announcement>>,
}

/// Numbers, strings and null all land as text.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_entry_accepts_numeric_serial() {
        let json = r#"{"slNo": 4, "companyName": "Acme", "sheetName": "acme"}"#;
        let entry: ScheduleEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.sl_no, "4");
        assert_eq!(entry.company_name, "Acme");
        assert_eq!(entry.venue, "");
    }

    #[test]
    fn unpublished_schedule_has_no_entries() {
        let sched: DaySchedule = serde_json::from_str(r#"{"schedule": [{}]}"#).unwrap();
        assert!(!sched.available);
        assert!(!sched.has_entries());
    }

    #[test]
    fn placement_day_is_optional() {
        let p: PlacementRecord = serde_json::from_str(r#"{"rollNo": 2021001, "ctc": 12.5}"#).unwrap();
        assert_eq!(p.day, None);
        assert_eq!(p.roll_no, "2021001");
        assert_eq!(p.ctc, "12.5");
    }

    #[test]
    fn null_cells_become_empty_text() {
        let json = r#"{"available": true, "schedule": [
            {"slNo": 1, "companyName": "Acme", "sheetName": "acme", "remarks": null, "venue": null},
            {"slNo": 2, "companyName": null, "sheetName": "globex", "arrivalStatus": null}
        ]}"#;
        let sched: DaySchedule = serde_json::from_str(json).unwrap();
        assert_eq!(sched.schedule.len(), 2);
        assert_eq!(sched.schedule[0].remarks, "");
        assert_eq!(sched.schedule[1].company_name, "");

        let detail: CompanyDetail =
            serde_json::from_str(r#"{"sections": {"round1": [{"rollNo": "R1", "studentName": null, "campus": null}]}}"#)
                .unwrap();
        let rows = detail.sections.get("round1").unwrap();
        assert_eq!(rows[0].roll_no, "R1");
        assert_eq!(rows[0].student_name, "");

        let p: PlacementRecord =
            serde_json::from_str(r#"{"rollNo": "R1", "date": null, "designation": null, "department": null}"#).unwrap();
        assert_eq!(p.designation, "");
    }

    #[test]
    fn placement_day_from_file_is_ignored() {
        for day in [r#""Day 3""#, r#""3""#, "0", "2"] {
            let json = format!(r#"{{"day": {}, "companyName": "Z", "rollNo": "R7"}}"#, day);
            let p: PlacementRecord = serde_json::from_str(&json).unwrap();
            assert_eq!(p.day, None);
            assert_eq!(p.company_name, "Z");
        }
    }
}
