//! Campus placement dashboard: schedules, shortlists and placements read
//! from static JSON resources, with search by roll number.

pub mod aggregate;
pub mod config;
pub mod counter;
pub mod display;
pub mod error;
pub mod loader;
pub mod model;
pub mod nav;
pub mod source;
pub mod web;

pub use error::{ResourceError, SearchError};
pub use source::{open_source, DataSource};
