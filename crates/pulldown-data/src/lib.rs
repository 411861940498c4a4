//! In-memory pulldown dataset.
//!
//! The dataset is read once at startup from a (optionally gzipped) CSV file
//! with at least these columns:
//!
//! | Column      | Meaning                                   |
//! |-------------|-------------------------------------------|
//! | `Uniprot.ID`| UniProt accession, possibly with isoform  |
//! | `Gene name` | Gene symbol (may be empty)                |
//! | `Tissue`    | `Embryo`, `Ovary` or `Testis`             |
//! | `Bait`      | Bait protein used for the pulldown        |
//! | `LFC`       | log2 fold change                          |
//! | `pval`      | p-value in (0, 1]                         |
//!
//! # Example
//!
//! ```rust,no_run
//! use pulldown_common::Tissue;
//! use pulldown_data::load_dataset;
//!
//! fn main() -> pulldown_common::Result<()> {
//!     let (dataset, report) = load_dataset("data/proteomics_lfc.csv.gz")?;
//!     println!("{} rows, {} rejected", report.loaded, report.rejected);
//!     for bait in dataset.baits(Tissue::Testis) {
//!         println!("Testis bait: {}", bait);
//!     }
//!     Ok(())
//! }
//! ```

pub mod dataset;
pub mod loader;

pub use dataset::Dataset;
pub use loader::{load_dataset, read_dataset, LoadReport};
