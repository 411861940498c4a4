//! pulldown-filter: Table filtering, sorting and the selection engine.
//!
//! Filter queries use the table's per-column syntax:
//!
//! ```text
//! {Bait} ne Prod && {LFC} > 1 && {Gene} contains "Su(var)"
//! ```

pub mod error;
pub mod grammar;
pub mod sort;
pub mod engine;

pub use error::FilterError;
pub use grammar::{parse_filter, Clause, FilterExpr, Operator, Operand};
pub use sort::{parse_sort, sort_rows, SortDirection, SortKey};
pub use engine::{
    dispatch, visible_rows, visible_genes, summarize, page, Page, RowSource, TableState,
    TableUpdate, Trigger, VisibleSummary,
};
