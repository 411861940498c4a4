//! pulldown-web: Interactive explorer for the multi-tissue pulldown data.
//! Serves a single page with:
//!   - a filterable, sortable, paged table of all records
//!   - one volcano plot per tissue, with bait selection and gene highlighting
//!   - STRING-db network links for the genes currently in the table

pub mod config;
pub mod router;
pub mod handlers;
pub mod state;
