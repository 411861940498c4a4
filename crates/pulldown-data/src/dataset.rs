//! Read-only record table, partitioned by tissue.

use std::collections::HashSet;

use pulldown_common::{Record, Tissue};

/// The full record table. Built once and shared by reference; never mutated.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    /// Record indices per tissue, in `Tissue::ALL` order.
    partitions: [Vec<usize>; 3],
}

fn slot(tissue: Tissue) -> usize {
    match tissue {
        Tissue::Embryo => 0,
        Tissue::Ovary  => 1,
        Tissue::Testis => 2,
    }
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        let mut partitions: [Vec<usize>; 3] = Default::default();
        for (i, record) in records.iter().enumerate() {
            if let Some(tissue) = record.tissue_kind() {
                partitions[slot(tissue)].push(i);
            }
        }
        Self { records, partitions }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records of one tissue, in file order.
    pub fn tissue(&self, tissue: Tissue) -> impl Iterator<Item = &Record> + '_ {
        self.partitions[slot(tissue)].iter().map(move |&i| &self.records[i])
    }

    pub fn tissue_len(&self, tissue: Tissue) -> usize {
        self.partitions[slot(tissue)].len()
    }

    /// Distinct baits of a tissue in first-seen order. The first one is the
    /// panel's default selection.
    pub fn baits(&self, tissue: Tissue) -> Vec<&str> {
        distinct(self.tissue(tissue).map(|r| r.bait.as_str()))
    }

    /// Distinct, non-empty gene names of a tissue in first-seen order.
    pub fn genes(&self, tissue: Tissue) -> Vec<&str> {
        distinct(
            self.tissue(tissue)
                .map(|r| r.gene.as_str())
                .filter(|g| !g.is_empty()),
        )
    }

    /// Rows plotted in one panel: a tissue restricted to one bait.
    pub fn tissue_bait(&self, tissue: Tissue, bait: &str) -> Vec<&Record> {
        self.tissue(tissue).filter(|r| r.bait == bait).collect()
    }

    /// Every record whose normalized identifier equals `accession`.
    pub fn by_identifier(&self, accession: &str) -> Vec<&Record> {
        self.records.iter().filter(|r| r.uniprot == accession).collect()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}
