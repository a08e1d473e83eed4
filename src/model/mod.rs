pub mod day;
pub mod section;
pub mod types;

pub use day::{Day, DayFilter};
pub use section::{section_label, CompanySections, Section};
pub use types::{
    Announcement, CandidateRecord, CompanyDetail, DashboardSnapshot, DayPlacements, DaySchedule,
    PlacementRecord, ScheduleEntry,
};
