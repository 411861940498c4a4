/// Core record types for the pulldown dataset.
/// A record is one protein observed in one bait pulldown in one tissue.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PulldownError, Result};

/// |LFC| must exceed this for a record to be a hit.
pub const LFC_THRESHOLD: f64 = 1.0;

/// p-value must be below this for a record to be a hit.
pub const PVAL_THRESHOLD: f64 = 0.05;

/// Marker color for hits.
pub const HIT_COLOR: &str = "#446e9b";

/// Marker color for everything else.
pub const NON_HIT_COLOR: &str = "#999";

/// UniProt KB entry URL prefix; the accession is appended.
pub const UNIPROT_URL: &str = "https://www.uniprot.org/uniprotkb/";

// ---------------------------------------------------------------------------
// Tissue
// ---------------------------------------------------------------------------

/// The three sample tissues. Each gets its own panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tissue {
    Embryo,
    Ovary,
    Testis,
}

impl Tissue {
    /// Panel order.
    pub const ALL: [Tissue; 3] = [Tissue::Embryo, Tissue::Ovary, Tissue::Testis];

    pub fn label(self) -> &'static str {
        match self {
            Tissue::Embryo => "Embryo",
            Tissue::Ovary  => "Ovary",
            Tissue::Testis => "Testis",
        }
    }

    /// Case-insensitive lookup by label, for URL paths.
    pub fn from_label(label: &str) -> Option<Tissue> {
        Tissue::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(label.trim()))
    }

    pub fn parse(label: &str) -> Result<Tissue> {
        Tissue::from_label(label).ok_or_else(|| PulldownError::UnknownTissue(label.to_string()))
    }
}

impl fmt::Display for Tissue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One protein-bait-tissue observation. Immutable once built; every derived
/// field is computed in [`Record::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Identifier as it appears in the source file, isoform suffix included.
    #[serde(rename = "Uniprot.ID")]
    pub uniprot_raw: String,
    /// Accession with the isoform suffix stripped.
    #[serde(rename = "UniProtAccession")]
    pub uniprot: String,
    #[serde(rename = "Gene")]
    pub gene: String,
    #[serde(rename = "Tissue")]
    pub tissue: String,
    #[serde(rename = "Bait")]
    pub bait: String,
    #[serde(rename = "LFC")]
    pub lfc: f64,
    #[serde(rename = "pval")]
    pub pval: f64,
    #[serde(rename = "-log10 (padj)")]
    pub neg_log10_pval: f64,
    pub is_hit: bool,
    pub color: &'static str,
    pub link: String,
}

impl Record {
    /// Build a record and compute its derived columns.
    ///
    /// Rejects identifiers that normalize to nothing, non-finite LFC values
    /// and p-values that are not strictly positive, so every record can be
    /// pinned by a click and `neg_log10_pval` is always finite.
    pub fn new(
        uniprot_raw: impl Into<String>,
        gene: impl Into<String>,
        tissue: impl Into<String>,
        bait: impl Into<String>,
        lfc: f64,
        pval: f64,
    ) -> Result<Record> {
        let uniprot_raw = uniprot_raw.into();

        let uniprot = normalize_identifier(&uniprot_raw);
        if uniprot.is_empty() {
            return Err(PulldownError::MissingIdentifier(uniprot_raw));
        }
        if !lfc.is_finite() {
            return Err(PulldownError::InvalidLfc {
                identifier: uniprot_raw,
                value: lfc.to_string(),
            });
        }
        if !pval.is_finite() || pval <= 0.0 {
            return Err(PulldownError::InvalidPValue {
                identifier: uniprot_raw,
                value: pval.to_string(),
            });
        }

        let link = uniprot_url(&uniprot);
        let is_hit = is_hit(lfc, pval);

        Ok(Record {
            uniprot_raw,
            link,
            uniprot,
            gene: gene.into(),
            tissue: tissue.into(),
            bait: bait.into(),
            lfc,
            pval,
            neg_log10_pval: -pval.log10(),
            is_hit,
            color: hit_color(is_hit),
        })
    }

    /// Tissue panel this record belongs to. The label must match exactly,
    /// the same way the `{Tissue}` filter compares it.
    pub fn tissue_kind(&self) -> Option<Tissue> {
        Tissue::ALL.into_iter().find(|t| t.label() == self.tissue)
    }

    /// Markdown link text shown in the UniProt table column.
    pub fn link_markdown(&self) -> String {
        format!("[{}]({})", self.uniprot, self.link)
    }
}

/// Strip the isoform suffix (`Q9VXY1-2` -> `Q9VXY1`) and trim.
pub fn normalize_identifier(raw: &str) -> String {
    raw.split('-').next().unwrap_or_default().trim().to_string()
}

pub fn uniprot_url(accession: &str) -> String {
    format!("{}{}", UNIPROT_URL, accession)
}

/// Hit calling: |LFC| > 1 and p < 0.05.
pub fn is_hit(lfc: f64, pval: f64) -> bool {
    lfc.abs() > LFC_THRESHOLD && pval < PVAL_THRESHOLD
}

pub fn hit_color(is_hit: bool) -> &'static str {
    if is_hit { HIT_COLOR } else { NON_HIT_COLOR }
}
