//! CallConsensus - multi-caller somatic variant consensus
//!
//! Merges the per-sample outputs of four somatic callers (MuSE, Mutect2,
//! Strelka, Varscan) into one call set holding only mutations confirmed by
//! at least two callers.
//!
//! # Features
//!
//! - Per-caller decoding of allele support into unified AD/DP/AF columns
//! - SBS to DBS merging of substitutions at consecutive positions
//! - Run-rank consensus voting over the sorted multi-caller union
//! - Plain, gzip and bzip2 inputs; parallel processing of samples with rayon
//!
//! # Example
//!
//! ```ignore
//! use call_consensus::{process_sample, PipelineConfig, SampleGroup};
//! use std::path::Path;
//!
//! let group = SampleGroup::new(
//!     "S1.muse.vcf", "S1.mut.vcf", "S1.strelka.vcf", "S1.varscan.vcf",
//! );
//! let stats = process_sample(&group, Path::new("out"), &PipelineConfig::default())?;
//! println!("{} consensus records", stats.written);
//! ```

pub mod core;
pub mod formats;
pub mod pipeline;

// Re-export commonly used types
pub use self::core::{
    collapse_duplicates, normalize, run_ranks, sbs_to_dbs, CallSupport, CallerKind,
    ChromosomeTable, ConfigError, ConsensusError, ConsensusRecord, ConsensusVoter, ExtractError,
    ExtractErrorKind, Locus, RawVariantRecord, VariantRecord, VcfReadError,
};
pub use formats::{callers, vcf, writer, VcfTable};
pub use pipeline::{
    prepare_caller, process_sample, process_samples, run_consensus, PipelineConfig, SampleGroup,
    SampleOutcome, SampleStats,
};
