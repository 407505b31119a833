//! Terminal rendering for CLI output.
//!
//! Builds `comfy-table` tables for conferences, papers and field statistics.
//! JSON and plain output are produced by the binary directly.

use std::io::{self, IsTerminal};

use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};

use crate::models::{ConferenceRecord, FieldStatistics, PaperResult};

/// Widest title shown in paper tables before truncation
const TITLE_WIDTH: usize = 60;

/// Widest author list shown in paper tables before truncation
const AUTHORS_WIDTH: usize = 40;

/// Check if stdout is a terminal.
#[inline]
pub fn is_terminal() -> bool {
    io::stdout().is_terminal()
}

/// Truncate text to at most `max_width` characters, appending an ellipsis
/// if anything was cut.
///
/// # Examples
///
/// ```
/// use conference_master::utils::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("Hello World", 8), "Hello...");
/// assert_eq!(truncate_with_ellipsis("Hi", 8), "Hi");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    if text.chars().count() <= max_width {
        return text.to_string();
    }

    let keep = max_width.saturating_sub(3);
    if keep == 0 {
        return "...".to_string();
    }

    let truncated: String = text.chars().take(keep).collect();
    format!("{}...", truncated.trim_end())
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// One row per conference
pub fn conference_table<'a, I>(conferences: I) -> Table
where
    I: IntoIterator<Item = &'a ConferenceRecord>,
{
    let mut table = new_table();
    table.set_header(vec!["ID", "Acronym", "Name", "Field", "Tier"]);

    for conference in conferences {
        table.add_row(vec![
            Cell::new(&conference.id),
            Cell::new(&conference.acronym).add_attribute(Attribute::Bold),
            Cell::new(&conference.name),
            Cell::new(&conference.field),
            Cell::new(conference.tier.as_str()),
        ]);
    }

    table
}

/// Key/value view of a single conference, including extra catalog fields
pub fn conference_detail_table(conference: &ConferenceRecord) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);

    let rows = [
        ("ID", conference.id.clone()),
        ("Acronym", conference.acronym.clone()),
        ("Name", conference.name.clone()),
        ("Field", conference.field.clone()),
        ("Tier", conference.tier.to_string()),
        ("DBLP", conference.dblp_url.clone()),
    ];
    for (key, value) in rows {
        table.add_row(vec![Cell::new(key).add_attribute(Attribute::Bold), Cell::new(value)]);
    }

    for (key, value) in &conference.extra {
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        table.add_row(vec![Cell::new(key).add_attribute(Attribute::Bold), Cell::new(value)]);
    }

    table
}

/// One row per paper
pub fn paper_table(papers: &[PaperResult]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Title", "Authors", "Conference", "Year", "Source"]);

    for paper in papers {
        let year = paper.year.map(|y| y.to_string()).unwrap_or_default();

        table.add_row(vec![
            Cell::new(truncate_with_ellipsis(&paper.title, TITLE_WIDTH))
                .add_attribute(Attribute::Bold),
            Cell::new(truncate_with_ellipsis(&paper.author_line(), AUTHORS_WIDTH)),
            Cell::new(&paper.conference_acronym),
            Cell::new(year),
            Cell::new(paper.source.to_string()),
        ]);
    }

    table
}

/// One row per research field
pub fn statistics_table(stats: &FieldStatistics) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Field", "Total", "Top-tier", "Second-tier", "Conferences"]);

    for (field, summary) in stats.iter() {
        let acronyms = summary
            .conferences
            .iter()
            .map(|c| c.acronym.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        table.add_row(vec![
            Cell::new(field).add_attribute(Attribute::Bold),
            Cell::new(summary.total),
            Cell::new(summary.top_tier),
            Cell::new(summary.second_tier),
            Cell::new(acronyms),
        ]);
    }

    table
}
