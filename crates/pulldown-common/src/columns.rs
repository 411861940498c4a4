//! Table columns and per-record cell access.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::entities::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    /// Normalized accession; rendered as a UniProt link.
    UniProt,
    /// Raw identifier from the source file.
    UniprotId,
    Gene,
    Tissue,
    Bait,
    Lfc,
    Pval,
    NegLog10Pval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Numeric,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::UniProt,
        Column::UniprotId,
        Column::Gene,
        Column::Tissue,
        Column::Bait,
        Column::Lfc,
        Column::Pval,
        Column::NegLog10Pval,
    ];

    /// Columns shown in the table, in display order.
    pub const DISPLAYED: [Column; 6] = [
        Column::UniProt,
        Column::Gene,
        Column::Tissue,
        Column::Bait,
        Column::Lfc,
        Column::Pval,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::UniProt      => "UniProt",
            Column::UniprotId    => "Uniprot.ID",
            Column::Gene         => "Gene",
            Column::Tissue       => "Tissue",
            Column::Bait         => "Bait",
            Column::Lfc          => "LFC",
            Column::Pval         => "pval",
            Column::NegLog10Pval => "-log10 (padj)",
        }
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            Column::Lfc | Column::Pval | Column::NegLog10Pval => ColumnKind::Numeric,
            _ => ColumnKind::Text,
        }
    }

    /// Resolve a column by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Column> {
        let name = name.trim();
        Column::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single cell, borrowed from its record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl CellValue<'_> {
    /// Total order used for sorting. Numbers sort before text, which only
    /// matters if a caller mixes columns.
    pub fn total_cmp(&self, other: &CellValue<'_>) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Text(a), CellValue::Text(b))     => a.cmp(b),
            (CellValue::Number(_), CellValue::Text(_))   => Ordering::Less,
            (CellValue::Text(_), CellValue::Number(_))   => Ordering::Greater,
        }
    }
}

impl Record {
    pub fn cell(&self, column: Column) -> CellValue<'_> {
        match column {
            Column::UniProt      => CellValue::Text(&self.uniprot),
            Column::UniprotId    => CellValue::Text(&self.uniprot_raw),
            Column::Gene         => CellValue::Text(&self.gene),
            Column::Tissue       => CellValue::Text(&self.tissue),
            Column::Bait         => CellValue::Text(&self.bait),
            Column::Lfc          => CellValue::Number(self.lfc),
            Column::Pval         => CellValue::Number(self.pval),
            Column::NegLog10Pval => CellValue::Number(self.neg_log10_pval),
        }
    }
}
