//! pulldown-common: Shared types and errors used across all pulldown crates.

pub mod error;
pub mod entities;
pub mod columns;

// Re-export commonly used types
pub use entities::{Record, Tissue, HIT_COLOR, NON_HIT_COLOR, LFC_THRESHOLD, PVAL_THRESHOLD};
pub use columns::{Column, ColumnKind, CellValue};
pub use error::{PulldownError, ApiError, Result};
