//! Immutable conference catalog loaded once at startup.
//!
//! The catalog file is a JSON document with a top-level `conferences` array:
//!
//! ```json
//! {
//!   "conferences": [
//!     {
//!       "id": "ccs",
//!       "acronym": "CCS",
//!       "name": "ACM Conference on Computer and Communications Security",
//!       "field": "CyberSecurity",
//!       "tier": "Top-tier",
//!       "dblp_url": "https://dblp.org/db/conf/ccs/"
//!     }
//!   ]
//! }
//! ```
//!
//! Loading fails if the file is missing, malformed, repeats an id, or uses a
//! tier label other than `Top-tier` / `Second-tier`. Once built, a
//! [`CatalogStore`] is never mutated and can be shared freely behind an `Arc`.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::models::ConferenceRecord;

/// Errors that can occur while loading the catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The data file could not be read
    #[error("Failed to read catalog '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The data file is not a valid catalog document
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two records share the same id
    #[error("Duplicate conference id '{0}' in catalog")]
    DuplicateId(String),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    conferences: Vec<ConferenceRecord>,
}

/// Read-only conference catalog with O(1) id lookup
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    records: Vec<ConferenceRecord>,
    index: HashMap<String, usize>,
}

impl CatalogStore {
    /// Load the catalog from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let store = Self::from_json(&content)?;
        tracing::info!(
            "Loaded {} conferences from {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }

    /// Build the catalog from a JSON document
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Self::from_records(file.conferences)
    }

    /// Build the catalog from records, keeping their order
    pub fn from_records(records: Vec<ConferenceRecord>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(records.len());
        let mut acronyms: HashMap<String, String> = HashMap::new();

        for (position, record) in records.iter().enumerate() {
            if index.insert(record.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(record.id.clone()));
            }

            // First in file order wins on acronym lookups
            if let Some(first) = acronyms.get(&record.acronym.to_lowercase()) {
                tracing::warn!(
                    "Acronym '{}' of '{}' is already used by '{}'",
                    record.acronym,
                    record.id,
                    first
                );
            } else {
                acronyms.insert(record.acronym.to_lowercase(), record.id.clone());
            }
        }

        Ok(Self { records, index })
    }

    /// Exact lookup by id
    pub fn get(&self, id: &str) -> Option<&ConferenceRecord> {
        self.index.get(id).map(|&position| &self.records[position])
    }

    /// Check if an id exists
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All records in insertion order
    pub fn all(&self) -> impl Iterator<Item = &ConferenceRecord> {
        self.records.iter()
    }

    /// All ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.id.as_str())
    }

    /// All acronyms in insertion order
    pub fn acronyms(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.acronym.as_str())
    }

    /// Number of conferences
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
