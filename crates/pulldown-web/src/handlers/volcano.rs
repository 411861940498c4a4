//! Volcano plot per tissue panel.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};

use pulldown_common::{ApiError, Tissue};
use pulldown_plot::render_volcano;

use crate::state::SharedState;

/// Panel selection. `genes` may repeat, one symbol per parameter.
#[derive(Debug, Default)]
pub struct VolcanoQuery {
    /// Defaults to the first bait seen for the tissue.
    pub bait: Option<String>,
    pub genes: Vec<String>,
}

impl VolcanoQuery {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = VolcanoQuery::default();
        for (key, value) in pairs {
            match key.as_str() {
                "bait" => query.bait = Some(value),
                "genes" => {
                    let gene = value.trim();
                    if !gene.is_empty() {
                        query.genes.push(gene.to_string());
                    }
                }
                _ => {}
            }
        }
        query
    }
}

/// GET /api/volcano/{tissue}?bait=&genes=&genes=, as Plotly figure JSON.
pub async fn api_volcano(
    State(state): State<SharedState>,
    Path(tissue): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let query = VolcanoQuery::from_pairs(pairs);
    let tissue = Tissue::parse(&tissue)?;

    let bait = match query.bait.as_deref().map(str::trim) {
        Some(b) if !b.is_empty() => b.to_string(),
        _ => state
            .dataset
            .baits(tissue)
            .first()
            .map(|b| b.to_string())
            .unwrap_or_default(),
    };

    let rows = state.dataset.tissue_bait(tissue, &bait);
    let plot = render_volcano(&rows, &query.genes);

    Ok(Json(plot.figure()).into_response())
}
