//! Shared application state for the web server.

use std::sync::Arc;

use anyhow::Context;
use minijinja::Environment;
use tracing::info;

use pulldown_data::{load_dataset, Dataset, LoadReport};
use pulldown_string::{InteractionNetwork, StringDbClient, StringLookup};

use crate::config::Config;

pub const INDEX_TEMPLATE: &str = "index.html";

/// Shared state injected into every Axum handler. The dataset is
/// read-only after startup, so no locking is needed.
pub struct AppState {
    pub dataset: Dataset,
    pub report: LoadReport,
    pub lookup: StringLookup,
    pub config: Config,
    pub templates: Environment<'static>,
}

impl AppState {
    pub fn new(
        dataset: Dataset,
        report: LoadReport,
        network: Arc<dyn InteractionNetwork>,
        config: Config,
    ) -> anyhow::Result<Self> {
        let lookup = StringLookup::new(network)
            .with_gene_limit(config.string_db.gene_limit)
            .with_pause(config.string_db.pause());

        let mut templates = Environment::new();
        templates.add_template(INDEX_TEMPLATE, include_str!("../templates/index.html"))?;

        Ok(Self { dataset, report, lookup, config, templates })
    }

    /// Load the dataset named in the config and connect the STRING-db client.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let (dataset, report) = load_dataset(&config.data.path)
            .with_context(|| format!("loading dataset from {}", config.data.path))?;
        info!(
            "Loaded {} records ({} rejected) from {}",
            report.loaded, report.rejected, config.data.path
        );

        let client = StringDbClient::new(config.string_db.settings())?;
        Self::new(dataset, report, Arc::new(client), config)
    }
}

pub type SharedState = Arc<AppState>;
