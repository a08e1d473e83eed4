//! Combines several resource reads into one result set.

pub mod placements;
pub mod search;

pub use placements::{collect_placements, filter_placements};
pub use search::{scan_company, search, SearchQuery, SearchResult, ShortlistHit};
