//! Selection engine: maps table triggers to the visible row set.
//!
//! The table shows a *row source* (the whole dataset, or the rows pinned by
//! a chart click) narrowed by a filter query. Clearing resets both; clicking
//! a point replaces the source and clears the query.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use pulldown_common::{Record, Tissue};
use pulldown_data::Dataset;

use crate::error::Result;
use crate::grammar::parse_filter;

/// Rows the filter query is applied to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "accession", rename_all = "snake_case")]
pub enum RowSource {
    #[default]
    All,
    /// Records whose normalized identifier equals the accession.
    Pinned(String),
}

/// Client-held table state, echoed back on every request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableState {
    #[serde(default)]
    pub source: RowSource,
    #[serde(default)]
    pub filter: String,
}

/// The event that caused a table update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "trigger", rename_all = "snake_case")]
pub enum Trigger {
    ClearFilter,
    PointClicked { tissue: Tissue, payload: String },
    NoTrigger,
}

/// New table contents plus the state the client should keep.
#[derive(Debug, Clone, PartialEq)]
pub struct TableUpdate<'a> {
    pub state: TableState,
    pub rows: Vec<&'a Record>,
}

/// Resolve a trigger. `NoTrigger` produces no update.
pub fn dispatch<'a>(dataset: &'a Dataset, trigger: &Trigger) -> Option<TableUpdate<'a>> {
    match trigger {
        Trigger::ClearFilter => Some(on_clear(dataset)),
        Trigger::PointClicked { tissue, payload } => {
            Some(on_point_clicked(dataset, *tissue, payload))
        }
        Trigger::NoTrigger => None,
    }
}

fn on_clear(dataset: &Dataset) -> TableUpdate<'_> {
    debug!("Clearing table filters");
    TableUpdate {
        state: TableState::default(),
        rows: dataset.records().iter().collect(),
    }
}

fn on_point_clicked<'a>(dataset: &'a Dataset, tissue: Tissue, payload: &str) -> TableUpdate<'a> {
    let rows = dataset.by_identifier(payload);
    debug!("{} point {} matched {} rows", tissue, payload, rows.len());
    TableUpdate {
        state: TableState {
            source: RowSource::Pinned(payload.to_string()),
            filter: String::new(),
        },
        rows,
    }
}

/// Rows visible for a table state, in dataset order.
pub fn visible_rows<'a>(dataset: &'a Dataset, state: &TableState) -> Result<Vec<&'a Record>> {
    let filter = parse_filter(&state.filter)?;
    let rows = match &state.source {
        RowSource::All => filter.apply(dataset.records()),
        RowSource::Pinned(accession) => filter.apply(dataset.by_identifier(accession)),
    };
    Ok(rows)
}

/// Distinct, non-empty gene names in first-seen order.
pub fn visible_genes(rows: &[&Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    rows.iter()
        .map(|r| r.gene.as_str())
        .filter(|g| !g.is_empty() && seen.insert(*g))
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibleSummary {
    pub unique_genes: usize,
    pub unique_identifiers: usize,
}

impl VisibleSummary {
    pub fn message(&self) -> String {
        if self.unique_identifiers == 0 {
            "No genes selected".to_string()
        } else {
            format!(
                "Number of unique gene names: {}. Number of unique UNIPROT IDs: {}",
                self.unique_genes, self.unique_identifiers
            )
        }
    }
}

pub fn summarize(rows: &[&Record]) -> VisibleSummary {
    let identifiers: HashSet<&str> = rows.iter().map(|r| r.uniprot_raw.as_str()).collect();
    VisibleSummary {
        unique_genes: visible_genes(rows).len(),
        unique_identifiers: identifiers.len(),
    }
}

/// One page of a row set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub rows: &'a [&'a Record],
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub total: usize,
}

/// Slice out page `page` (zero-based). Out-of-range pages are empty.
pub fn page<'a>(rows: &'a [&'a Record], page: usize, page_size: usize) -> Page<'a> {
    let page_size = page_size.max(1);
    let total = rows.len();
    let start = page.saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);
    Page {
        rows: &rows[start..end],
        page,
        page_size,
        page_count: total.div_ceil(page_size),
        total,
    }
}
