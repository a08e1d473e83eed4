use serde::Serialize;

use crate::error::SearchError;
use crate::loader::{load_company, load_day_schedule, log_unavailable};
use crate::model::{CandidateRecord, CompanySections, Day, PlacementRecord, ScheduleEntry, Section};
use crate::source::DataSource;

use super::placements::collect_placements;

/// A validated search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub roll_no: String,
    pub day: Day,
}

impl SearchQuery {
    /// Validates raw form input. Nothing is fetched for a rejected query.
    pub fn parse(roll_no: &str, day: Option<&str>) -> Result<SearchQuery, SearchError> {
        let roll_no = roll_no.trim();
        if roll_no.is_empty() {
            return Err(SearchError::InputInvalid("Please enter a roll number".to_string()));
        }

        let day = day
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .and_then(|d| d.parse::<Day>().ok())
            .ok_or_else(|| SearchError::InputInvalid("Please select a day".to_string()))?;

        Ok(SearchQuery {
            roll_no: roll_no.to_string(),
            day,
        })
    }
}

/// Candidate found in one section of one company
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortlistHit {
    pub company: String,
    pub section: Section,
    pub candidate: CandidateRecord,
    pub time: String,
    pub venue: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub roll_no: String,
    pub day: Day,
    pub shortlists: Vec<ShortlistHit>,
    pub placements: Vec<PlacementRecord>,
}

/// Shortlists of `query.day` plus placements of every day for one roll number.
pub async fn search(source: &dyn DataSource, query: &SearchQuery) -> Result<SearchResult, SearchError> {
    let shortlists = search_shortlists(source, query).await?;
    let placements = collect_placements(source)
        .await
        .into_iter()
        .filter(|p| p.roll_no == query.roll_no)
        .collect();

    Ok(SearchResult {
        roll_no: query.roll_no.clone(),
        day: query.day,
        shortlists,
        placements,
    })
}

async fn search_shortlists(
    source: &dyn DataSource,
    query: &SearchQuery,
) -> Result<Vec<ShortlistHit>, SearchError> {
    let schedule = match load_day_schedule(source, query.day).await {
        Ok(s) => s,
        Err(e) if e.is_not_yet_available() => {
            log_unavailable(&e);
            return Ok(Vec::new());
        }
        Err(e) => return Err(SearchError::ScheduleUnreadable(e)),
    };
    if !schedule.has_entries() {
        return Ok(Vec::new());
    }

    let mut hits = Vec::new();
    for entry in schedule.schedule.iter().filter(|e| !e.sheet_name.is_empty()) {
        match load_company(source, query.day, &entry.sheet_name).await {
            Ok(detail) => hits.extend(scan_company(entry, &detail.sections, &query.roll_no)),
            Err(e) => log_unavailable(&e),
        }
    }
    Ok(hits)
}

/// First exact roll-number match in each known section, in section order.
pub fn scan_company(entry: &ScheduleEntry, sections: &CompanySections, roll_no: &str) -> Vec<ShortlistHit> {
    Section::ORDER
        .into_iter()
        .filter_map(|section| {
            let found = sections.get(section.key())?.iter().find(|c| c.roll_no == roll_no)?;
            Some(ShortlistHit {
                company: entry.company_name.clone(),
                section,
                candidate: found.clone(),
                time: entry.time.clone(),
                venue: entry.venue.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(roll: &str) -> CandidateRecord {
        CandidateRecord {
            roll_no: roll.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(
            SearchQuery::parse("   ", Some("1")),
            Err(SearchError::InputInvalid("Please enter a roll number".into()))
        );
        assert_eq!(
            SearchQuery::parse("R1", None),
            Err(SearchError::InputInvalid("Please select a day".into()))
        );
        assert_eq!(
            SearchQuery::parse("R1", Some("")),
            Err(SearchError::InputInvalid("Please select a day".into()))
        );
        let q = SearchQuery::parse(" R1 ", Some("2")).unwrap();
        assert_eq!(q.roll_no, "R1");
        assert_eq!(q.day.number(), 2);
    }

    #[test]
    fn scan_reports_every_section_match() {
        let entry = ScheduleEntry {
            company_name: "Acme".into(),
            time: "10:00".into(),
            venue: "Hall A".into(),
            ..Default::default()
        };
        let sections = CompanySections::new(vec![
            ("selected".into(), vec![candidate("R1")]),
            ("registered".into(), vec![candidate("R2"), candidate("R1"), candidate("R1")]),
            ("round1".into(), vec![candidate("r1")]),
        ]);
        let hits = scan_company(&entry, &sections, "R1");
        let found: Vec<_> = hits.iter().map(|h| h.section).collect();
        assert_eq!(found, vec![Section::Registered, Section::Selected]);
        assert_eq!(hits[0].venue, "Hall A");
    }
}
