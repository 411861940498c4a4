//! CSV ingestion with derived columns.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use serde::Serialize;
use tracing::{debug, info, warn};

use pulldown_common::{PulldownError, Record, Result, Tissue};

use crate::dataset::Dataset;

const ID_COLUMN: &str = "Uniprot.ID";
const GENE_COLUMNS: [&str; 2] = ["Gene name", "Gene"];
const TISSUE_COLUMN: &str = "Tissue";
const BAIT_COLUMN: &str = "Bait";
const LFC_COLUMN: &str = "LFC";
const PVAL_COLUMN: &str = "pval";

/// Summary of one load, exposed on the health endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    pub loaded: usize,
    /// Rows dropped for a missing, non-numeric or non-positive p-value, or a
    /// non-numeric LFC.
    pub rejected: usize,
    pub tissues: BTreeMap<String, usize>,
}

/// Header positions of the columns we need.
struct ColumnIndex {
    id: usize,
    gene: usize,
    tissue: usize,
    bait: usize,
    lfc: usize,
    pval: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| PulldownError::MissingColumn(name.to_string()))
        };
        let gene = GENE_COLUMNS
            .iter()
            .find_map(|name| headers.iter().position(|h| h == *name))
            .ok_or_else(|| PulldownError::MissingColumn(GENE_COLUMNS[0].to_string()))?;

        Ok(Self {
            id: find(ID_COLUMN)?,
            gene,
            tissue: find(TISSUE_COLUMN)?,
            bait: find(BAIT_COLUMN)?,
            lfc: find(LFC_COLUMN)?,
            pval: find(PVAL_COLUMN)?,
        })
    }
}

/// Load the dataset file. Files ending in `.gz` are decompressed.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<(Dataset, LoadReport)> {
    let path = path.as_ref();
    info!("Loading dataset from {:?}", path);

    let file = BufReader::new(File::open(path)?);
    let is_gzip = path.extension().is_some_and(|ext| ext == "gz");
    if is_gzip {
        read_dataset(MultiGzDecoder::new(file))
    } else {
        read_dataset(file)
    }
}

/// Parse CSV from any reader and build the dataset.
pub fn read_dataset<R: Read>(reader: R) -> Result<(Dataset, LoadReport)> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers = csv.headers()?.clone();
    let idx = ColumnIndex::resolve(&headers)?;

    let mut records = Vec::new();
    let mut report = LoadReport::default();

    for (line, result) in csv.records().enumerate() {
        let row = result?;
        let field = |i: usize| row.get(i).unwrap_or_default().trim();

        match parse_row(&idx, &field) {
            Ok(record) => records.push(record),
            Err(e) => {
                debug!("Skipping row {}: {}", line + 2, e);
                report.rejected += 1;
            }
        }
    }

    if report.rejected > 0 {
        warn!("Rejected {} rows with unusable identifier, LFC or p-value", report.rejected);
    }

    let dataset = Dataset::new(records);
    report.loaded = dataset.len();
    for tissue in Tissue::ALL {
        report.tissues.insert(tissue.label().to_string(), dataset.tissue_len(tissue));
    }

    info!(
        "Dataset ready: {} rows (Embryo {}, Ovary {}, Testis {})",
        report.loaded,
        dataset.tissue_len(Tissue::Embryo),
        dataset.tissue_len(Tissue::Ovary),
        dataset.tissue_len(Tissue::Testis),
    );

    Ok((dataset, report))
}

fn parse_row<'a>(idx: &ColumnIndex, field: &impl Fn(usize) -> &'a str) -> Result<Record> {
    let id = field(idx.id);

    let lfc = field(idx.lfc).parse::<f64>().map_err(|_| PulldownError::InvalidLfc {
        identifier: id.to_string(),
        value: field(idx.lfc).to_string(),
    })?;
    let pval = field(idx.pval).parse::<f64>().map_err(|_| PulldownError::InvalidPValue {
        identifier: id.to_string(),
        value: field(idx.pval).to_string(),
    })?;

    Record::new(id, field(idx.gene), field(idx.tissue), field(idx.bait), lfc, pval)
}
