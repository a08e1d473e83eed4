//! Display structures built from loaded data. Pure: no I/O, no markup.

use serde::Serialize;

use crate::aggregate::{filter_placements, SearchResult, ShortlistHit};
use crate::model::{
    section_label, CandidateRecord, CompanySections, DashboardSnapshot, Day, DayFilter, DaySchedule,
    PlacementRecord, ScheduleEntry, Section,
};

/// Viewport width at and above which schedules render as a table.
pub const TABLE_BREAKPOINT: u32 = 768;

/// Number of dashboard items the "latest updates" list draws from.
const LATEST_UPDATES: usize = 5;

pub const NO_ANNOUNCEMENTS: &str = "No announcements at this time.";
pub const NO_UPDATES: &str = "No updates available.";
pub const NO_CANDIDATES: &str = "No candidates in this section.";
pub const NO_PLACEMENTS: &str = "No placements yet.";
pub const NO_PLACEMENT_HITS: &str = "No placements found yet.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Layout {
    Table,
    Cards,
}

impl Layout {
    /// Unknown widths get the table.
    pub fn for_width(width: Option<u32>) -> Layout {
        Layout::with_breakpoint(width, TABLE_BREAKPOINT)
    }

    pub fn with_breakpoint(width: Option<u32>, breakpoint: u32) -> Layout {
        match width {
            Some(w) if w < breakpoint => Layout::Cards,
            _ => Layout::Table,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub text: String,
    pub color: String,
}

impl StatusBadge {
    /// No badge for an empty status.
    pub fn new(text: &str, color: &str) -> Option<StatusBadge> {
        (!text.is_empty()).then(|| StatusBadge {
            text: text.to_string(),
            color: color.to_string(),
        })
    }
}

/// Where a schedule row leads when selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyTarget {
    pub day: Day,
    pub sheet_name: String,
    pub company_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleRow {
    pub sl_no: String,
    pub time: String,
    pub company: String,
    pub arrival: Option<StatusBadge>,
    pub current: Option<StatusBadge>,
    pub programmes: String,
    pub venue: String,
    pub remarks: String,
    pub target: CompanyTarget,
}

impl ScheduleRow {
    fn from_entry(day: Day, e: &ScheduleEntry) -> ScheduleRow {
        ScheduleRow {
            sl_no: e.sl_no.clone(),
            time: e.time.clone(),
            company: e.company_name.clone(),
            arrival: StatusBadge::new(&e.arrival_status, &e.arrival_status_color),
            current: StatusBadge::new(&e.current_status, &e.current_status_color),
            programmes: e.programmes.clone(),
            venue: e.venue.clone(),
            remarks: e.remarks.clone(),
            target: CompanyTarget {
                day,
                sheet_name: e.sheet_name.clone(),
                company_name: e.company_name.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ScheduleBody {
    NotAvailable,
    Rows { layout: Layout, rows: Vec<ScheduleRow> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleView {
    pub day: Day,
    pub body: ScheduleBody,
}

impl ScheduleView {
    pub fn build(day: Day, schedule: &DaySchedule, layout: Layout) -> ScheduleView {
        let body = if schedule.has_entries() {
            ScheduleBody::Rows {
                layout,
                rows: schedule.schedule.iter().map(|e| ScheduleRow::from_entry(day, e)).collect(),
            }
        } else {
            ScheduleBody::NotAvailable
        };
        ScheduleView { day, body }
    }

    pub fn not_available_message(&self) -> String {
        format!("Day {} schedule will be available soon. Please check back later.", self.day)
    }

    /// Navigation targets in row order; the same for every layout.
    pub fn company_targets(&self) -> Vec<&CompanyTarget> {
        match &self.body {
            ScheduleBody::NotAvailable => Vec::new(),
            ScheduleBody::Rows { rows, .. } => rows.iter().map(|r| &r.target).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionTab {
    pub section: Section,
    pub label: &'static str,
    pub visible: bool,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SectionContent {
    Empty,
    Rows(Vec<CandidateRecord>),
}

impl SectionContent {
    pub fn for_section(sections: &CompanySections, key: &str) -> SectionContent {
        match sections.get(key) {
            Some(rows) if !rows.is_empty() => SectionContent::Rows(rows.to_vec()),
            _ => SectionContent::Empty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyView {
    pub target: CompanyTarget,
    pub tabs: Vec<SectionTab>,
    pub active: Option<String>,
    pub active_label: Option<String>,
    pub content: SectionContent,
}

impl CompanyView {
    /// `requested` wins when the data has it; otherwise the first section the
    /// resource lists is shown.
    pub fn build(target: CompanyTarget, sections: &CompanySections, requested: Option<&str>) -> CompanyView {
        let active = requested
            .filter(|key| sections.contains(key))
            .or_else(|| sections.first_key())
            .map(str::to_string);

        let tabs = Section::ORDER
            .into_iter()
            .map(|section| SectionTab {
                section,
                label: section.label(),
                visible: sections.contains(section.key()),
                active: active.as_deref() == Some(section.key()),
            })
            .collect();

        let content = match &active {
            Some(key) => SectionContent::for_section(sections, key),
            None => SectionContent::Empty,
        };

        CompanyView {
            target,
            tabs,
            active_label: active.as_deref().map(|k| section_label(k).to_string()),
            active,
            content,
        }
    }

    pub fn visible_tabs(&self) -> impl Iterator<Item = &SectionTab> {
        self.tabs.iter().filter(|t| t.visible)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementsView {
    pub filter: DayFilter,
    pub rows: Vec<PlacementRecord>,
}

impl PlacementsView {
    /// Filters the already aggregated set; nothing is re-read.
    pub fn build(all: &[PlacementRecord], filter: DayFilter) -> PlacementsView {
        PlacementsView {
            filter,
            rows: filter_placements(all, filter),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SearchView {
    Error(String),
    Results {
        roll_no: String,
        day: Day,
        shortlists: Vec<ShortlistHit>,
        placements: Vec<PlacementRecord>,
    },
}

impl SearchView {
    pub fn build(result: &SearchResult) -> SearchView {
        SearchView::Results {
            roll_no: result.roll_no.clone(),
            day: result.day,
            shortlists: result.shortlists.clone(),
            placements: result.placements.clone(),
        }
    }

    pub fn error(message: impl Into<String>) -> SearchView {
        SearchView::Error(message.into())
    }

    pub fn no_shortlists_message(day: Day) -> String {
        format!("No shortlists found in Day {} companies.", day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnnouncementKind {
    Live,
    CompanyStatus,
    Students,
}

impl AnnouncementKind {
    pub fn icon(self) -> &'static str {
        match self {
            AnnouncementKind::Live => "📢",
            AnnouncementKind::CompanyStatus => "🏢",
            AnnouncementKind::Students => "📣",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnouncementLine {
    pub kind: AnnouncementKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnouncementsView {
    /// `None` when there is no snapshot to show.
    pub marquee: Option<Vec<AnnouncementLine>>,
    pub latest: Vec<String>,
}

impl AnnouncementsView {
    pub fn build(snapshot: Option<&DashboardSnapshot>) -> AnnouncementsView {
        let Some(items) = snapshot.and_then(|s| s.announcements.as_ref()) else {
            return AnnouncementsView {
                marquee: None,
                latest: Vec::new(),
            };
        };

        let present = |field: &Option<String>| field.as_deref().filter(|s| !s.is_empty()).map(str::to_string);

        let mut lines = Vec::new();
        for item in items {
            let fields = [
                (AnnouncementKind::Live, &item.live_announcement),
                (AnnouncementKind::CompanyStatus, &item.company_status),
                (AnnouncementKind::Students, &item.announcement_to_students),
            ];
            for (kind, field) in fields {
                if let Some(text) = present(field) {
                    lines.push(AnnouncementLine { kind, text });
                }
            }
        }

        // shown twice back to back so the scroll wraps seamlessly
        let mut marquee = lines.clone();
        marquee.extend(lines);

        let latest = items
            .iter()
            .take(LATEST_UPDATES)
            .filter_map(|item| present(&item.live_announcement))
            .collect();

        AnnouncementsView {
            marquee: Some(marquee),
            latest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Announcement;

    fn entry(sheet: &str, arrival: &str) -> ScheduleEntry {
        ScheduleEntry {
            sl_no: "1".into(),
            company_name: format!("{} Ltd", sheet),
            sheet_name: sheet.into(),
            arrival_status: arrival.into(),
            arrival_status_color: "green".into(),
            ..Default::default()
        }
    }

    fn day1() -> Day {
        Day::new(1).unwrap()
    }

    #[test]
    fn breakpoint() {
        assert_eq!(Layout::for_width(Some(767)), Layout::Cards);
        assert_eq!(Layout::for_width(Some(768)), Layout::Table);
        assert_eq!(Layout::for_width(None), Layout::Table);
    }

    #[test]
    fn empty_status_has_no_badge() {
        let sched = DaySchedule {
            available: true,
            schedule: vec![entry("acme", ""), entry("globex", "Arrived")],
        };
        let view = ScheduleView::build(day1(), &sched, Layout::Table);
        let ScheduleBody::Rows { rows, .. } = &view.body else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].arrival, None);
        assert_eq!(rows[1].arrival.as_ref().unwrap().color, "green");
    }

    #[test]
    fn unpublished_schedule_is_not_available() {
        let sched = DaySchedule {
            available: false,
            schedule: vec![entry("acme", "")],
        };
        let view = ScheduleView::build(day1(), &sched, Layout::Cards);
        assert_eq!(view.body, ScheduleBody::NotAvailable);
        assert!(view.company_targets().is_empty());
    }

    #[test]
    fn company_tabs_follow_data() {
        let sections = CompanySections::new(vec![
            ("round1".into(), vec![CandidateRecord::default()]),
            ("registered".into(), vec![]),
        ]);
        let target = CompanyTarget {
            day: day1(),
            sheet_name: "acme".into(),
            company_name: "Acme".into(),
        };

        let view = CompanyView::build(target.clone(), &sections, None);
        assert_eq!(view.active.as_deref(), Some("round1"));
        let visible: Vec<_> = view.visible_tabs().map(|t| t.section).collect();
        assert_eq!(visible, vec![Section::Registered, Section::Round1]);

        let view = CompanyView::build(target.clone(), &sections, Some("registered"));
        assert_eq!(view.content, SectionContent::Empty);

        // absent section falls back to the first listed
        let view = CompanyView::build(target, &sections, Some("selected"));
        assert_eq!(view.active.as_deref(), Some("round1"));
    }

    #[test]
    fn announcements_are_doubled() {
        let snapshot = DashboardSnapshot {
            announcements: Some(vec![
                Announcement {
                    live_announcement: Some("Hall change".into()),
                    company_status: Some("Acme arrived".into()),
                    announcement_to_students: Some(String::new()),
                },
                Announcement::default(),
            ]),
        };
        let view = AnnouncementsView::build(Some(&snapshot));
        let marquee = view.marquee.unwrap();
        assert_eq!(marquee.len(), 4);
        assert_eq!(marquee[0], marquee[2]);
        assert_eq!(view.latest, vec!["Hall change".to_string()]);

        assert_eq!(AnnouncementsView::build(None).marquee, None);
    }
}
