//! STRING-db network link for the genes currently in the table.

use axum::{extract::State, Json};

use pulldown_common::ApiError;
use pulldown_filter::{visible_genes, visible_rows, TableState};
use pulldown_string::LookupOutcome;

use crate::state::SharedState;

/// POST /api/string. The body is the client's table state.
pub async fn api_string(
    State(state): State<SharedState>,
    Json(table): Json<TableState>,
) -> Result<Json<LookupOutcome>, ApiError> {
    let rows = visible_rows(&state.dataset, &table)?;
    let genes = visible_genes(&rows);
    Ok(Json(state.lookup.submit(&genes).await))
}
