//! Capacity check, remote call and outcome rendering for one submission.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::client::InteractionNetwork;

/// Gene lists of this size or larger are never sent.
pub const GENE_LIMIT: usize = 550;

/// Pause after each remote call, to stay polite with the public API.
pub const COURTESY_PAUSE: Duration = Duration::from_millis(500);

const TOO_MANY_MESSAGE: &str = "Too many genes selected";

/// Result of a submission, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LookupOutcome {
    Link { url: String, gene_count: usize, label: String },
    TooMany { gene_count: usize, message: String },
    Failed { message: String },
}

pub struct StringLookup {
    network: Arc<dyn InteractionNetwork>,
    gene_limit: usize,
    pause: Duration,
}

impl StringLookup {
    pub fn new(network: Arc<dyn InteractionNetwork>) -> Self {
        Self { network, gene_limit: GENE_LIMIT, pause: COURTESY_PAUSE }
    }

    pub fn with_gene_limit(mut self, limit: usize) -> Self {
        self.gene_limit = limit;
        self
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn gene_limit(&self) -> usize {
        self.gene_limit
    }

    /// Submit distinct, non-empty gene names. Never retries; transport and
    /// HTTP errors come back as [`LookupOutcome::Failed`].
    pub async fn submit(&self, genes: &[String]) -> LookupOutcome {
        let gene_count = genes.len();

        if gene_count >= self.gene_limit {
            info!("Refusing STRING-db lookup for {} genes (limit {})", gene_count, self.gene_limit);
            return LookupOutcome::TooMany {
                gene_count,
                message: TOO_MANY_MESSAGE.to_string(),
            };
        }

        info!("Submitting {} genes to STRING-db", gene_count);
        let result = self.network.network_link(genes).await;

        if !self.pause.is_zero() {
            tokio::time::sleep(self.pause).await;
        }

        match result {
            Ok(url) => LookupOutcome::Link {
                url,
                gene_count,
                label: format!("View PPI network for {} genes", gene_count),
            },
            Err(e) => {
                warn!("STRING-db lookup failed: {}", e);
                LookupOutcome::Failed {
                    message: format!("Could not reach STRING-db: {}", e),
                }
            }
        }
    }
}
