//! `conference://{id}` resources.

use std::sync::Arc;

use async_trait::async_trait;
use pmcp::types::{Content, ListResourcesResult, ReadResourceResult, ResourceInfo};
use pmcp::{RequestHandlerExtra, ResourceHandler};

use crate::catalog::CatalogStore;

/// URI scheme prefix of conference resources
pub const CONFERENCE_URI_PREFIX: &str = "conference://";

/// Build the resource URI for a conference id
pub fn conference_uri(id: &str) -> String {
    format!("{}{}", CONFERENCE_URI_PREFIX, id)
}

/// Render a conference resource as pretty-printed JSON
///
/// Accepts either a full `conference://{id}` URI or a bare id. An unknown id
/// yields `{"error": "Conference '<id>' not found"}` rather than a failure.
pub fn read_conference_resource(catalog: &CatalogStore, uri: &str) -> String {
    let id = uri.strip_prefix(CONFERENCE_URI_PREFIX).unwrap_or(uri);

    let value = match catalog.get(id) {
        Some(record) => serde_json::to_value(record),
        None => Ok(serde_json::json!({
            "error": format!("Conference '{}' not found", id)
        })),
    };

    value
        .and_then(|v| serde_json::to_string_pretty(&v))
        .unwrap_or_else(|e| {
            tracing::error!("Failed to render resource {}: {}", uri, e);
            serde_json::json!({ "error": e.to_string() }).to_string()
        })
}

/// Resource handler exposing every catalog entry
#[derive(Debug, Clone)]
pub struct ConferenceResources {
    catalog: Arc<CatalogStore>,
}

impl ConferenceResources {
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        Self { catalog }
    }

    /// One resource descriptor per catalog entry, in catalog order
    pub fn descriptors(&self) -> Vec<ResourceInfo> {
        self.catalog
            .all()
            .map(|record| ResourceInfo {
                uri: conference_uri(&record.id),
                name: format!("{} ({})", record.acronym, record.name),
                description: Some(format!("{} conference in {}", record.tier, record.field)),
                mime_type: Some("application/json".to_string()),
                meta: None,
            })
            .collect()
    }

    /// Answer a `resources/read` request
    pub fn read_result(&self, uri: &str) -> Result<ReadResourceResult, pmcp::Error> {
        if !uri.starts_with(CONFERENCE_URI_PREFIX) {
            return Err(pmcp::Error::invalid_params(format!(
                "Unsupported resource URI: {}",
                uri
            )));
        }

        Ok(ReadResourceResult::new(vec![Content::Resource {
            uri: uri.to_string(),
            text: Some(read_conference_resource(&self.catalog, uri)),
            mime_type: Some("application/json".to_string()),
            meta: None,
        }]))
    }

    /// Answer a `resources/list` request; the catalog fits in one page
    pub fn list_result(&self) -> ListResourcesResult {
        ListResourcesResult::new(self.descriptors())
    }
}

#[async_trait]
impl ResourceHandler for ConferenceResources {
    async fn read(
        &self,
        uri: &str,
        _extra: RequestHandlerExtra,
    ) -> Result<ReadResourceResult, pmcp::Error> {
        self.read_result(uri)
    }

    async fn list(
        &self,
        _cursor: Option<String>,
        _extra: RequestHandlerExtra,
    ) -> Result<ListResourcesResult, pmcp::Error> {
        Ok(self.list_result())
    }
}
