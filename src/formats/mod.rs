//! File format adapters
//!
//! Caller output reading, per-caller field extraction and consensus output.

pub mod callers;
pub mod vcf;
pub mod writer;

pub use callers::{extract_records, StrelkaDialect};
pub use vcf::{split_tabs, VcfTable};
pub use writer::{format_record, write_consensus, write_consensus_file, CONSENSUS_COLUMN_HEADER};
