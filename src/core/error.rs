//! Error types for CallConsensus
//!
//! Defines all error types used throughout the library.

use crate::core::record::CallerKind;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for CallConsensus operations
#[derive(Debug, Error)]
pub enum ConsensusError {
    /// Caller output could not be read
    #[error("VCF read error: {0}")]
    Read(#[from] VcfReadError),

    /// Per-record field extraction failed
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while reading a caller's output file
#[derive(Debug, Error)]
pub enum VcfReadError {
    /// No `#C` column-header line was found
    #[error("No column header line (starting with '#C') found in {}", path.display())]
    MissingColumnHeader { path: PathBuf },

    /// Data line field count differs from the column header
    #[error("Field count mismatch at line {line}: expected {expected}, found {found}")]
    FieldCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// I/O error during reading
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single record whose caller-specific encoding could not be decoded
#[derive(Debug, Error)]
#[error("{caller} record at line {line} ({chrom}:{pos}): {kind}")]
pub struct ExtractError {
    pub caller: CallerKind,
    pub line: usize,
    pub chrom: String,
    pub pos: String,
    pub kind: ExtractErrorKind,
}

/// What went wrong while decoding a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractErrorKind {
    /// Record has no column at this index
    #[error("missing column {index}")]
    MissingColumn { index: usize },

    /// Colon-delimited sample field is too short
    #[error("missing subfield {index} in '{field}'")]
    MissingSubfield { index: usize, field: String },

    /// Comma-delimited pair is too short
    #[error("missing element {index} in '{value}'")]
    MissingElement { index: usize, value: String },

    /// Value is not a non-negative integer
    #[error("invalid integer '{0}'")]
    InvalidInteger(String),

    /// Value is not a fraction in [0, 1]
    #[error("invalid fraction '{0}'")]
    InvalidFloat(String),

    /// POS column is not a plain decimal integer of at least 1
    #[error("invalid position '{0}'")]
    InvalidPosition(String),

    /// Strelka FORMAT carries neither FDP nor DP2
    #[error("unknown Strelka FORMAT '{0}' (expected FDP or DP2 subfield)")]
    UnknownStrelkaDialect(String),

    /// INFO entry is not `key=value`
    #[error("malformed INFO entry {index} in '{info}'")]
    MalformedInfo { index: usize, info: String },
}

/// Errors in pipeline configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No chromosomes configured
    #[error("Chromosome table is empty")]
    EmptyChromosomeTable,

    /// Consensus rank must be at least 1
    #[error("min_callers must be at least 1, got {0}")]
    InvalidMinCallers(usize),

    /// File list does not split into groups of four
    #[error("Expected files in groups of 4 (MuSE, Mutect2, Strelka, Varscan), got {0} files")]
    IncompleteSampleGroup(usize),

    /// Sample name cannot be derived from the file name
    #[error("Cannot derive sample name from {}", path.display())]
    InvalidSampleName { path: PathBuf },

    /// Chromosome list file could not be read
    #[error("Failed to read chromosome file {}: {source}", path.display())]
    ChromosomeFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for CallConsensus operations
pub type Result<T> = std::result::Result<T, ConsensusError>;

/// Result type alias for reading operations
pub type ReadResult<T> = std::result::Result<T, VcfReadError>;

/// Result type alias for extraction operations
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
