//! The single application page.

use axum::{extract::State, response::Html};
use minijinja::context;

use pulldown_common::{ApiError, Column};

use crate::handlers::tissues::tissue_panels;
use crate::state::{SharedState, INDEX_TEMPLATE};

pub const PAGE_TITLE: &str = "Multi-tissue proteomics of satellite DNA-binding proteins";
pub const PREPRINT_URL: &str = "https://www.biorxiv.org/content/10.1101/2023.07.11.548599v1";
pub const GITHUB_URL: &str = "https://github.com/ASintsova/d1_prod_interactors";

/// GET /
pub async fn index(State(state): State<SharedState>) -> Result<Html<String>, ApiError> {
    let template = state
        .templates
        .get_template(INDEX_TEMPLATE)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let columns: Vec<&str> = Column::DISPLAYED.iter().map(|c| c.name()).collect();

    let html = template
        .render(context! {
            title => PAGE_TITLE,
            preprint_url => PREPRINT_URL,
            github_url => GITHUB_URL,
            columns => columns,
            tissues => tissue_panels(&state.dataset),
            page_size => state.config.table.page_size,
            gene_limit => state.lookup.gene_limit(),
            records => state.dataset.len(),
        })
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Html(html))
}
