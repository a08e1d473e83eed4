use crate::loader::{load_day_placements, log_unavailable};
use crate::model::{Day, DayFilter, PlacementRecord};
use crate::source::DataSource;

/// Placements of every day, tagged with their day.
///
/// Days are read one after another in ascending order and keep their file
/// order. A day whose file is missing or unreadable is skipped.
pub async fn collect_placements(source: &dyn DataSource) -> Vec<PlacementRecord> {
    let mut all = Vec::new();
    for day in Day::all() {
        match load_day_placements(source, day).await {
            Ok(file) => {
                tracing::debug!("day {} placements: {} records", day, file.placements.len());
                all.extend(file.placements.into_iter().map(|mut p| {
                    p.day = Some(day);
                    p
                }));
            }
            Err(e) => log_unavailable(&e),
        }
    }
    all
}

/// Records matching `filter`, relative order kept.
pub fn filter_placements(placements: &[PlacementRecord], filter: DayFilter) -> Vec<PlacementRecord> {
    placements
        .iter()
        .filter(|p| filter.matches(p.day))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: u8, roll: &str) -> PlacementRecord {
        PlacementRecord {
            day: Day::new(day),
            roll_no: roll.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn filter_keeps_order() {
        let all = vec![record(1, "a"), record(2, "b"), record(1, "c"), record(2, "d")];
        let day2 = filter_placements(&all, DayFilter::Only(Day::new(2).unwrap()));
        let rolls: Vec<_> = day2.iter().map(|p| p.roll_no.as_str()).collect();
        assert_eq!(rolls, vec!["b", "d"]);
        assert_eq!(filter_placements(&all, DayFilter::All), all);
    }
}
