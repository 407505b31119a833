//! Conference record model as stored in the catalog.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Coarse quality ranking attached to every conference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    TopTier,
    SecondTier,
}

impl Tier {
    /// All known tiers, best first
    pub const ALL: [Tier; 2] = [Tier::TopTier, Tier::SecondTier];

    /// Canonical label used in the catalog file and in every response
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::TopTier => "Top-tier",
            Tier::SecondTier => "Second-tier",
        }
    }

    /// Parse a tier label, ignoring case
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(label))
    }

    /// Whether a caller-supplied filter string selects this tier
    pub fn matches(&self, filter: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(filter)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Tier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Tier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Tier::parse(&label).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "unknown tier '{}', expected 'Top-tier' or 'Second-tier'",
                label
            ))
        })
    }
}

/// A single conference in the catalog
///
/// Only the fields the query engine matches on are typed. Any other metadata
/// present in the data file (publisher, website, description, ...) is kept in
/// `extra` and serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConferenceRecord {
    /// Stable lowercase slug, unique across the catalog
    pub id: String,

    /// Display short name (e.g. "CCS")
    pub acronym: String,

    /// Full display name
    pub name: String,

    /// Research area (e.g. "CyberSecurity", "AI")
    pub field: String,

    /// Rank label
    pub tier: Tier,

    /// DBLP venue page
    pub dblp_url: String,

    /// Pass-through metadata
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ConferenceRecord {
    /// Create a record with the required fields and no extra metadata
    pub fn new(
        id: impl Into<String>,
        acronym: impl Into<String>,
        name: impl Into<String>,
        field: impl Into<String>,
        tier: Tier,
        dblp_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            acronym: acronym.into(),
            name: name.into(),
            field: field.into(),
            tier,
            dblp_url: dblp_url.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Attach a pass-through metadata value
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Case-insensitive field comparison
    pub fn in_field(&self, field: &str) -> bool {
        self.field.to_lowercase() == field.to_lowercase()
    }

    /// Case-insensitive acronym comparison
    pub fn has_acronym(&self, acronym: &str) -> bool {
        self.acronym.to_lowercase() == acronym.to_lowercase()
    }

    /// Whether the record passes the optional field and tier filters
    pub fn matches(&self, field: Option<&str>, tier: Option<&str>) -> bool {
        field.map_or(true, |f| self.in_field(f)) && tier.map_or(true, |t| self.tier.matches(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tier_parse_is_case_insensitive() {
        assert_eq!(Tier::parse("Top-tier"), Some(Tier::TopTier));
        assert_eq!(Tier::parse("top-tier"), Some(Tier::TopTier));
        assert_eq!(Tier::parse(" SECOND-TIER "), Some(Tier::SecondTier));
        assert_eq!(Tier::parse("third-tier"), None);
    }

    #[test]
    fn test_tier_serializes_canonically() {
        let tier: Tier = serde_json::from_value(json!("top-TIER")).unwrap();
        assert_eq!(serde_json::to_value(tier).unwrap(), json!("Top-tier"));
    }

    #[test]
    fn test_unknown_tier_rejected() {
        let result: Result<Tier, _> = serde_json::from_value(json!("B-rank"));
        assert!(result.is_err());
    }

    #[test]
    fn test_record_round_trips_extra_metadata() {
        let raw = json!({
            "id": "ccs",
            "acronym": "CCS",
            "name": "ACM Conference on Computer and Communications Security",
            "field": "CyberSecurity",
            "tier": "Top-tier",
            "dblp_url": "https://dblp.org/db/conf/ccs/",
            "publisher": "ACM"
        });

        let record: ConferenceRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.extra.get("publisher"), Some(&json!("ACM")));
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }

    #[test]
    fn test_record_filters() {
        let record = ConferenceRecord::new(
            "ccs",
            "CCS",
            "ACM CCS",
            "CyberSecurity",
            Tier::TopTier,
            "https://dblp.org/db/conf/ccs/",
        );

        assert!(record.matches(None, None));
        assert!(record.matches(Some("cybersecurity"), None));
        assert!(record.matches(Some("CYBERSECURITY"), Some("top-tier")));
        assert!(!record.matches(Some("AI"), None));
        assert!(!record.matches(None, Some("Second-tier")));
        assert!(record.has_acronym("ccs"));
    }
}
