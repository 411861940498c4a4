//! HTTP handlers for all web routes.

pub mod page;
pub mod table;
pub mod tissues;
pub mod volcano;
pub mod string;
pub mod system;
