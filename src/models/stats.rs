//! Lookup payloads and per-field statistics.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::conference::{ConferenceRecord, Tier};

/// Payload returned instead of an error when a lookup misses
///
/// Carries every valid alternative so the caller can correct itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFound {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_conferences: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_acronyms: Option<Vec<String>>,
}

impl NotFound {
    /// Miss on a conference id
    pub fn conference(id: &str, available: Vec<String>) -> Self {
        Self {
            error: format!("Conference '{}' not found", id),
            available_conferences: Some(available),
            available_acronyms: None,
        }
    }

    /// Miss on a conference acronym
    pub fn acronym(acronym: &str, available: Vec<String>) -> Self {
        Self {
            error: format!("Conference with acronym '{}' not found", acronym),
            available_conferences: None,
            available_acronyms: Some(available),
        }
    }
}

/// Result of a single-conference lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Lookup<'a> {
    Found(&'a ConferenceRecord),
    NotFound(NotFound),
}

impl<'a> Lookup<'a> {
    /// The record, if the lookup hit
    pub fn found(&self) -> Option<&'a ConferenceRecord> {
        match self {
            Lookup::Found(record) => Some(record),
            Lookup::NotFound(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

/// Conference entry listed under a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConferenceSummary {
    pub id: String,
    pub acronym: String,
    pub name: String,
    pub tier: Tier,
}

impl From<&ConferenceRecord> for ConferenceSummary {
    fn from(record: &ConferenceRecord) -> Self {
        Self {
            id: record.id.clone(),
            acronym: record.acronym.clone(),
            name: record.name.clone(),
            tier: record.tier,
        }
    }
}

/// Counts for one research field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldSummary {
    pub total: usize,
    pub top_tier: usize,
    pub second_tier: usize,
    pub conferences: Vec<ConferenceSummary>,
}

impl FieldSummary {
    /// Count one more conference in this field
    pub fn add(&mut self, record: &ConferenceRecord) {
        self.total += 1;
        match record.tier {
            Tier::TopTier => self.top_tier += 1,
            Tier::SecondTier => self.second_tier += 1,
        }
        self.conferences.push(ConferenceSummary::from(record));
    }
}

/// Statistics for every field, in first-seen catalog order
///
/// Serializes as a JSON object keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldStatistics {
    fields: Vec<(String, FieldSummary)>,
}

impl FieldStatistics {
    /// Build statistics by scanning records in order
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ConferenceRecord>,
    {
        let mut stats = Self::default();
        for record in records {
            stats.entry(&record.field).add(record);
        }
        stats
    }

    fn entry(&mut self, field: &str) -> &mut FieldSummary {
        let index = match self.fields.iter().position(|(name, _)| name == field) {
            Some(index) => index,
            None => {
                self.fields.push((field.to_string(), FieldSummary::default()));
                self.fields.len() - 1
            }
        };
        &mut self.fields[index].1
    }

    /// Summary for a field (exact name)
    pub fn get(&self, field: &str) -> Option<&FieldSummary> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, summary)| summary)
    }

    /// Field names in first-seen order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Iterate over `(field, summary)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSummary)> {
        self.fields.iter().map(|(name, summary)| (name.as_str(), summary))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for FieldStatistics {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, summary) in &self.fields {
            map.serialize_entry(name, summary)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, field: &str, tier: Tier) -> ConferenceRecord {
        ConferenceRecord::new(id, id.to_uppercase(), id, field, tier, "")
    }

    #[test]
    fn test_not_found_payloads() {
        let miss = NotFound::conference("nope", vec!["ccs".to_string()]);
        assert_eq!(
            serde_json::to_value(&miss).unwrap(),
            json!({
                "error": "Conference 'nope' not found",
                "available_conferences": ["ccs"]
            })
        );

        let miss = NotFound::acronym("XYZ", vec!["CCS".to_string()]);
        assert_eq!(
            serde_json::to_value(&miss).unwrap(),
            json!({
                "error": "Conference with acronym 'XYZ' not found",
                "available_acronyms": ["CCS"]
            })
        );
    }

    #[test]
    fn test_statistics_keep_first_seen_order() {
        let records = vec![
            record("sp", "CyberSecurity", Tier::TopTier),
            record("icml", "AI", Tier::TopTier),
            record("acsac", "CyberSecurity", Tier::SecondTier),
        ];

        let stats = FieldStatistics::from_records(&records);
        let names: Vec<&str> = stats.field_names().collect();
        assert_eq!(names, vec!["CyberSecurity", "AI"]);

        let security = stats.get("CyberSecurity").unwrap();
        assert_eq!(security.total, 2);
        assert_eq!(security.top_tier, 1);
        assert_eq!(security.second_tier, 1);
        assert_eq!(security.conferences[1].id, "acsac");
    }

    #[test]
    fn test_statistics_serialize_as_object() {
        let records = vec![record("icml", "AI", Tier::TopTier)];
        let value = serde_json::to_value(FieldStatistics::from_records(&records)).unwrap();

        assert_eq!(value["AI"]["total"], 1);
        assert_eq!(value["AI"]["top_tier"], 1);
        assert_eq!(value["AI"]["second_tier"], 0);
        assert_eq!(value["AI"]["conferences"][0]["tier"], "Top-tier");
    }
}
