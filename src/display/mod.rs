pub mod export;
pub mod html;
pub mod text;
pub mod view;

pub use export::{export_placements_to_csv, write_placements_csv};
pub use view::{
    AnnouncementsView, CompanyTarget, CompanyView, Layout, PlacementsView, ScheduleBody, ScheduleView,
    SearchView, SectionContent,
};
