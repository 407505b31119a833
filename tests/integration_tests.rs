//! Integration tests for Conference Master
//!
//! These tests exercise the bundled catalog through the query engine, the
//! MCP tool registry and the resource renderer.

use conference_master::catalog::CatalogStore;
use conference_master::config::CatalogConfig;
use conference_master::mcp::server::McpServer;
use conference_master::mcp::{read_conference_resource, ToolRegistry};
use conference_master::models::{Lookup, PaperSearchRequest, Tier};
use conference_master::query::QueryEngine;
use conference_master::sources::mock::make_paper;
use conference_master::sources::MockSearch;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

fn bundled_catalog() -> Arc<CatalogStore> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/conferences.json");
    Arc::new(CatalogStore::load(path).expect("bundled catalog should load"))
}

fn engine() -> Arc<QueryEngine> {
    Arc::new(QueryEngine::new(bundled_catalog()))
}

#[test]
fn test_bundled_catalog_is_valid() {
    let catalog = bundled_catalog();
    assert!(catalog.len() >= 30);

    for record in catalog.all() {
        assert!(!record.id.is_empty());
        assert!(!record.acronym.is_empty());
        assert!(record.dblp_url.starts_with("https://dblp.org/"));
        assert_eq!(record.id, record.id.to_lowercase());
    }

    let ccs = catalog.get("ccs").unwrap();
    assert_eq!(ccs.acronym, "CCS");
    assert_eq!(ccs.tier, Tier::TopTier);
    assert_eq!(ccs.extra.get("publisher"), Some(&json!("ACM")));
}

#[test]
fn test_default_config_resolves_bundled_catalog() {
    let path = CatalogConfig::default().resolve_path();
    let catalog = CatalogStore::load(path).unwrap();
    assert_eq!(catalog.len(), bundled_catalog().len());
}

#[test]
fn test_get_conference_round_trips_records() {
    let engine = engine();
    for record in engine.catalog().all() {
        assert_eq!(engine.get_conference(&record.id), Lookup::Found(record));
    }
}

#[test]
fn test_field_statistics_cover_catalog() {
    let engine = engine();
    let stats = engine.field_statistics();

    let mut total = 0;
    for (field, summary) in stats.iter() {
        assert_eq!(summary.total, summary.top_tier + summary.second_tier);
        assert_eq!(
            summary.total,
            engine.list_conferences(Some(field), None).len()
        );
        total += summary.total;
    }
    assert_eq!(total, engine.catalog().len());

    for field in ["CyberSecurity", "AI", "Systems", "Networking"] {
        assert!(stats.get(field).is_some(), "missing field {}", field);
    }
}

#[tokio::test]
async fn test_fallback_bounds_on_bundled_catalog() {
    let engine = engine();

    for limit in [-10, 0, 1, 3, 5, 10, 50, 100] {
        let outcome = engine
            .search_papers(&PaperSearchRequest::new("privacy").limit(limit))
            .await;
        let bound = (limit.clamp(1, 50) as usize).min(5);

        assert!(outcome.is_fallback());
        assert!(!outcome.is_empty());
        assert!(outcome.len() <= bound, "limit {} gave {}", limit, outcome.len());
        assert!(outcome.papers().iter().all(|p| p.simulated));
    }
}

#[tokio::test]
async fn test_remote_branch_with_mock_searcher() {
    let mock = Arc::new(MockSearch::with_papers(vec![
        make_paper("Spectre Attacks Revisited", 2023),
        make_paper("Rowhammer at Scale", 2022),
    ]));
    let engine = QueryEngine::new(bundled_catalog()).with_searcher(mock.clone());

    let outcome = engine
        .search_papers(
            &PaperSearchRequest::new("side channels")
                .field("CyberSecurity")
                .tier("Top-tier")
                .limit(3),
        )
        .await;

    assert!(!outcome.is_fallback());
    assert_eq!(outcome.len(), 3);
    assert_eq!(outcome.papers()[0].conference_acronym, "CCS");
    assert_eq!(outcome.papers()[2].conference_acronym, "S&P");

    let venues: Vec<Option<String>> = mock.queries().into_iter().map(|q| q.venue_acronym).collect();
    assert_eq!(venues, vec![Some("CCS".to_string()), Some("S&P".to_string())]);
}

#[tokio::test]
async fn test_tools_end_to_end() {
    let registry = ToolRegistry::new(engine());

    let papers = registry
        .execute(
            "search_papers",
            json!({"query": "federated learning", "conference_id": "neurips", "year": "2021"}),
        )
        .await
        .unwrap();
    assert_eq!(papers.as_array().unwrap().len(), 1);
    assert_eq!(papers[0]["conference_acronym"], "NeurIPS");
    assert_eq!(papers[0]["year"], 2021);

    let info = registry
        .execute("get_conference_info", json!({"conference_id": "sigcomm"}))
        .await
        .unwrap();
    assert_eq!(info["field"], "Networking");

    let listed = registry
        .execute("list_conferences", json!({"field": "systems", "tier": "top-tier"}))
        .await
        .unwrap();
    let ids: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["osdi", "sosp", "eurosys", "asplos"]);

    let by_acronym = registry
        .execute("get_conference_by_acronym", json!({"acronym": "usenix security"}))
        .await
        .unwrap();
    assert_eq!(by_acronym["id"], "usenix-security");

    let stats = registry
        .execute("get_field_statistics", Value::Null)
        .await
        .unwrap();
    assert!(stats.as_object().unwrap().contains_key("Databases"));

    let missing = registry
        .execute("get_conference_info", json!({"conference_id": "nope"}))
        .await
        .unwrap();
    assert_eq!(missing["error"], "Conference 'nope' not found");
    assert!(missing["available_conferences"]
        .as_array()
        .unwrap()
        .contains(&json!("ccs")));
}

#[test]
fn test_conference_resource() {
    let catalog = bundled_catalog();

    let text = read_conference_resource(&catalog, "conference://vldb");
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["acronym"], "VLDB");
    assert_eq!(value["publisher"], "VLDB Endowment");

    let text = read_conference_resource(&catalog, "conference://missing");
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value, json!({"error": "Conference 'missing' not found"}));
}

#[test]
fn test_mcp_server_creation() {
    let server = McpServer::new(engine());
    assert!(server.is_ok());
}
