use pulldown_common::ApiError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("Could not parse filter near {near:?}")]
    Syntax { near: String },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Column {column} is numeric, {literal:?} is not a number")]
    NotNumeric { column: String, literal: String },

    #[error("Operator {op} is not supported on numeric column {column}")]
    UnsupportedOperator { op: String, column: String },

    #[error("Invalid sort direction {0:?}, expected asc or desc")]
    SortDirection(String),
}

pub type Result<T> = std::result::Result<T, FilterError>;

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
