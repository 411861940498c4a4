//! Tissue panel options: baits and genes per tissue.

use axum::{extract::State, Json};
use serde::Serialize;

use pulldown_common::Tissue;
use pulldown_data::Dataset;

use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct TissuePanel<'a> {
    pub tissue: Tissue,
    pub label: &'static str,
    pub rows: usize,
    /// Distinct baits in first-seen order.
    pub baits: Vec<&'a str>,
    pub default_bait: Option<&'a str>,
    pub genes: Vec<&'a str>,
}

/// One panel per tissue, in tab order. Tissues without rows still get a
/// panel with no options.
pub fn tissue_panels(dataset: &Dataset) -> Vec<TissuePanel<'_>> {
    Tissue::ALL
        .into_iter()
        .map(|tissue| {
            let baits = dataset.baits(tissue);
            TissuePanel {
                tissue,
                label: tissue.label(),
                rows: dataset.tissue_len(tissue),
                default_bait: baits.first().copied(),
                baits,
                genes: dataset.genes(tissue),
            }
        })
        .collect()
}

/// GET /api/tissues
pub async fn api_tissues(State(state): State<SharedState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "tissues": tissue_panels(&state.dataset) }))
}
