//! Core record model and consensus algorithms
//!
//! This module contains the record types, the chromosome ordering table,
//! position normalization, SBS to DBS merging and consensus voting.

pub mod chrom;
pub mod consensus;
pub mod error;
pub mod io;
pub mod merge;
pub mod normalize;
pub mod record;

pub use chrom::ChromosomeTable;
pub use consensus::{collapse_duplicates, run_ranks, ConsensusVoter, DEFAULT_MIN_CALLERS};
pub use error::{
    ConfigError, ConsensusError, ExtractError, ExtractErrorKind, ExtractResult, ReadResult,
    Result, VcfReadError,
};
pub use io::{detect_compression, open_reader, CompressionFormat, LineIterator, DEFAULT_BUFFER_SIZE};
pub use merge::sbs_to_dbs;
pub use normalize::{is_normalized, normalize};
pub use record::{CallSupport, CallerKind, ConsensusRecord, Locus, RawVariantRecord, VariantRecord};
