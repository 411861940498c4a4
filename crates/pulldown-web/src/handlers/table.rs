//! Data table: filtered/sorted/paged rows and trigger dispatch.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use pulldown_common::entities::uniprot_url;
use pulldown_common::{ApiError, Record};
use pulldown_filter::{
    dispatch, page, parse_sort, sort_rows, summarize, visible_rows, RowSource, TableState,
    Trigger, VisibleSummary,
};

use crate::state::SharedState;

#[derive(Debug, Deserialize, Default)]
pub struct RowsQuery {
    /// Accession the table is pinned to by a point click.
    pub pinned: Option<String>,
    pub filter: Option<String>,
    /// `Column:asc|desc` list, e.g. `LFC:desc,Gene`.
    pub sort: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl RowsQuery {
    fn table_state(&self) -> TableState {
        let source = match self.pinned.as_deref() {
            Some(acc) => RowSource::Pinned(acc.trim().to_string()),
            None => RowSource::All,
        };
        TableState { source, filter: self.filter.clone().unwrap_or_default() }
    }
}

/// A record plus its table-formatted numbers.
#[derive(Debug, Serialize)]
pub struct RowView<'a> {
    #[serde(flatten)]
    pub record: &'a Record,
    /// `[accession](link)` text of the UniProt column.
    pub uniprot_markdown: String,
    /// Fixed, two decimals.
    pub lfc_display: String,
    /// Scientific, two decimals.
    pub pval_display: String,
}

impl<'a> From<&'a Record> for RowView<'a> {
    fn from(record: &'a Record) -> Self {
        Self {
            record,
            uniprot_markdown: record.link_markdown(),
            lfc_display: format!("{:.2}", record.lfc),
            pval_display: format!("{:.2e}", record.pval),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RowsResponse<'a> {
    pub state: TableState,
    pub rows: Vec<RowView<'a>>,
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub total: usize,
    pub summary: VisibleSummary,
    pub message: String,
    /// Set when the filter query could not be parsed; the view is then empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_error: Option<String>,
}

/// GET /api/rows
pub async fn api_rows(
    State(state): State<SharedState>,
    Query(query): Query<RowsQuery>,
) -> Result<Response, ApiError> {
    let table_state = query.table_state();
    let sort_keys = parse_sort(query.sort.as_deref().unwrap_or(""))?;
    let page_size = query.page_size.unwrap_or(state.config.table.page_size).max(1);

    let (mut rows, filter_error) = match visible_rows(&state.dataset, &table_state) {
        Ok(rows) => (rows, None),
        Err(e) => {
            debug!("Rejected filter {:?}: {}", table_state.filter, e);
            (Vec::new(), Some(e.to_string()))
        }
    };
    sort_rows(&mut rows, &sort_keys);

    let summary = summarize(&rows);
    let current = page(&rows, query.page.unwrap_or(0), page_size);

    let body = RowsResponse {
        rows: current.rows.iter().copied().map(RowView::from).collect(),
        page: current.page,
        page_size: current.page_size,
        page_count: current.page_count,
        total: current.total,
        message: summary.message(),
        summary,
        filter_error,
        state: table_state,
    };
    Ok(Json(body).into_response())
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub state: TableState,
    pub total: usize,
    pub summary: VisibleSummary,
    pub message: String,
    /// UniProt page of the clicked protein.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uniprot_link: Option<String>,
}

/// POST /api/table/event. Answers `204 No Content` when nothing should change.
pub async fn api_table_event(
    State(state): State<SharedState>,
    Json(trigger): Json<Trigger>,
) -> Result<Response, ApiError> {
    let Some(update) = dispatch(&state.dataset, &trigger) else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let uniprot_link = match &update.state.source {
        RowSource::Pinned(acc) => Some(uniprot_url(acc)),
        RowSource::All => None,
    };

    let summary = summarize(&update.rows);
    Ok(Json(EventResponse {
        total: update.rows.len(),
        message: summary.message(),
        summary,
        uniprot_link,
        state: update.state,
    })
    .into_response())
}
