//! Fixture data tree written to a temp directory.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};

use placement_board::source::DirSource;
use placement_board::DataSource;

pub fn write(root: &Path, rel: &str, value: &Value) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
}

pub fn write_raw(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, body).unwrap();
}

pub fn placement(company: &str, roll: &str) -> Value {
    json!({
        "date": "12 Dec",
        "time": "16:00",
        "companyName": company,
        "studentName": format!("Student {}", roll),
        "rollNo": roll,
        "department": "CSE",
        "campus": "Main",
        "designation": "Engineer",
        "ctc": 12.5
    })
}

pub fn candidate(sl: u32, roll: &str) -> Value {
    json!({
        "slNo": sl,
        "studentName": format!("Student {}", roll),
        "rollNo": roll,
        "discipline": "ECE",
        "campus": "Main"
    })
}

/// Day 1 has two companies and two placements, day 2 one placement,
/// day 3 nothing published yet.
pub fn seed(root: &Path) {
    write(
        root,
        "data/dashboard.json",
        &json!({
            "announcements": [
                { "liveAnnouncement": "Hall change for Acme", "companyStatus": "Acme arrived", "announcementToStudents": "" },
                { "liveAnnouncement": "", "announcementToStudents": "Carry ID cards" }
            ]
        }),
    );
    write(
        root,
        "data/day1-schedule.json",
        &json!({
            "available": true,
            "schedule": [
                {
                    "slNo": 1, "time": "09:00", "companyName": "Acme Corp", "sheetName": "acme",
                    "arrivalStatus": "Arrived", "arrivalStatusColor": "green",
                    "currentStatus": "", "currentStatusColor": "",
                    "programmes": "B.Tech", "venue": "Hall A", "remarks": ""
                },
                {
                    "slNo": "2", "time": "11:00", "companyName": "Globex", "sheetName": "globex",
                    "programmes": "M.Tech", "venue": "Hall B"
                }
            ]
        }),
    );
    write(root, "data/day2-schedule.json", &json!({ "available": false, "schedule": [] }));
    write(
        root,
        "data/companies/day1-acme.json",
        &json!({
            "sections": {
                "round2": [candidate(1, "R1")],
                "registered": [candidate(1, "R2"), candidate(2, "R1")],
                "selected": null
            }
        }),
    );
    write(
        root,
        "data/companies/day1-globex.json",
        &json!({ "sections": { "round1": [candidate(1, "R3")], "round2": [candidate(1, "R5")] } }),
    );
    write(
        root,
        "data/day1-placed.json",
        &json!({ "placements": [placement("A", "R1"), placement("B", "R2")] }),
    );
    write(root, "data/day2-placed.json", &json!({ "placements": [placement("C", "R1")] }));
}

pub fn seeded() -> (tempfile::TempDir, Arc<dyn DataSource>) {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());
    let source: Arc<dyn DataSource> = Arc::new(DirSource::new(dir.path()));
    (dir, source)
}
