use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::types::CandidateRecord;

/// Selection-process stages a company publishes candidate lists for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Registered,
    Round1,
    Round2,
    Round3,
    Selected,
}

impl Section {
    /// Scan and tab order.
    pub const ORDER: [Section; 5] = [
        Section::Registered,
        Section::Round1,
        Section::Round2,
        Section::Round3,
        Section::Selected,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Section::Registered => "registered",
            Section::Round1 => "round1",
            Section::Round2 => "round2",
            Section::Round3 => "round3",
            Section::Selected => "selected",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Registered => "Registered Candidates",
            Section::Round1 => "First Round Shortlisted",
            Section::Round2 => "Second Round Shortlisted",
            Section::Round3 => "Third Round Shortlisted",
            Section::Selected => "Final Selected",
        }
    }

    pub fn from_key(key: &str) -> Option<Section> {
        Section::ORDER.into_iter().find(|s| s.key() == key)
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// Label for any section key; unknown keys display as themselves.
pub fn section_label(key: &str) -> &str {
    Section::from_key(key).map(Section::label).unwrap_or(key)
}

/// Candidate lists of one company, in the order the resource lists them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanySections {
    entries: Vec<(String, Vec<CandidateRecord>)>,
}

impl CompanySections {
    pub fn new(entries: Vec<(String, Vec<CandidateRecord>)>) -> Self {
        CompanySections { entries }
    }

    pub fn get(&self, key: &str) -> Option<&[CandidateRecord]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, rows)| rows.as_slice())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn first_key(&self) -> Option<&str> {
        self.entries.first().map(|(k, _)| k.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for CompanySections {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SectionsVisitor;

        impl<'de> Visitor<'de> for SectionsVisitor {
            type Value = CompanySections;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of section name to candidate list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some((key, rows)) = map.next_entry::<String, Option<Vec<CandidateRecord>>>()? {
                    // a null section counts as absent, like a missing key
                    if let Some(rows) = rows {
                        entries.push((key, rows));
                    }
                }
                Ok(CompanySections { entries })
            }
        }

        deserializer.deserialize_map(SectionsVisitor)
    }
}

impl Serialize for CompanySections {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, rows) in &self.entries {
            map.serialize_entry(key, rows)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_document_order() {
        let json = r#"{"round2": [], "registered": [{"rollNo": "R1"}], "selected": null}"#;
        let sections: CompanySections = serde_json::from_str(json).unwrap();
        assert_eq!(sections.keys().collect::<Vec<_>>(), vec!["round2", "registered"]);
        assert_eq!(sections.first_key(), Some("round2"));
        assert!(!sections.contains("selected"));
        assert_eq!(sections.get("registered").unwrap()[0].roll_no, "R1");
    }

    #[test]
    fn labels() {
        assert_eq!(section_label("round2"), "Second Round Shortlisted");
        assert_eq!(section_label("waitlist"), "waitlist");
    }
}
