//! pulldown-string: STRING-db protein interaction network links.
//!
//! Submits a gene list to STRING's `get_link` method and hands back the URL
//! of the rendered network. Gene lists at or above [`GENE_LIMIT`] are refused
//! without contacting the service.

pub mod error;
pub mod client;
pub mod lookup;

pub use error::LookupError;
pub use client::{InteractionNetwork, StringDbClient, StringDbSettings, STRING_API_URL};
pub use lookup::{LookupOutcome, StringLookup, COURTESY_PAUSE, GENE_LIMIT};
