use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the event days, 1 through 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(u8);

impl Day {
    pub const FIRST: u8 = 1;
    pub const LAST: u8 = 3;

    pub const ONE: Day = Day(1);
    pub const TWO: Day = Day(2);
    pub const THREE: Day = Day(3);

    /// Every event day, ascending.
    pub fn all() -> impl Iterator<Item = Day> {
        (Self::FIRST..=Self::LAST).map(Day)
    }

    pub fn new(n: u8) -> Option<Day> {
        (Self::FIRST..=Self::LAST).contains(&n).then_some(Day(n))
    }

    pub fn number(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Day {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Day::new(n).ok_or_else(|| format!("day must be between {} and {}, got {}", Day::FIRST, Day::LAST, n))
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> u8 {
        day.0
    }
}

impl FromStr for Day {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u8 = s.trim().parse().map_err(|_| format!("not a day number: {}", s))?;
        Day::try_from(n)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Day selector for the placements table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DayFilter {
    #[default]
    All,
    Only(Day),
}

impl DayFilter {
    pub fn matches(self, day: Option<Day>) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Only(d) => day == Some(d),
        }
    }
}

impl FromStr for DayFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(DayFilter::All);
        }
        s.parse().map(DayFilter::Only)
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("all"),
            DayFilter::Only(day) => write!(f, "{}", day),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_are_bounded() {
        assert_eq!(Day::new(0), None);
        assert_eq!(Day::new(4), None);
        assert_eq!(Day::all().map(Day::number).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn parses_filters() {
        assert_eq!("all".parse::<DayFilter>(), Ok(DayFilter::All));
        assert_eq!("ALL".parse::<DayFilter>(), Ok(DayFilter::All));
        assert_eq!("2".parse::<DayFilter>(), Ok(DayFilter::Only(Day(2))));
        assert!("7".parse::<DayFilter>().is_err());
        assert!("two".parse::<DayFilter>().is_err());
    }

    #[test]
    fn day_deserializes_from_number() {
        let day: Day = serde_json::from_str("3").unwrap();
        assert_eq!(day.number(), 3);
        assert!(serde_json::from_str::<Day>("9").is_err());
    }
}
