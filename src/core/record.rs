//! Variant record model
//!
//! Raw caller records as read from disk, the derived allele support triple,
//! and the reduced 10-column record that flows through consensus.

use std::fmt;

/// The four somatic callers, in the fixed concatenation order used by
/// the consensus union (MuSE, Mutect2, Strelka, Varscan).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CallerKind {
    Muse,
    Mutect2,
    Strelka,
    Varscan,
}

impl CallerKind {
    /// All callers in concatenation order
    pub const ALL: [CallerKind; 4] = [
        CallerKind::Muse,
        CallerKind::Mutect2,
        CallerKind::Strelka,
        CallerKind::Varscan,
    ];

    /// Display name as used by the callers themselves
    pub fn name(self) -> &'static str {
        match self {
            CallerKind::Muse => "MuSE",
            CallerKind::Mutect2 => "Mutect2",
            CallerKind::Strelka => "Strelka",
            CallerKind::Varscan => "Varscan",
        }
    }

    /// Position in the fixed caller order
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CallerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Column index of INFO
pub const INFO_COLUMN: usize = 7;
/// Column index of FORMAT
pub const FORMAT_COLUMN: usize = 8;
/// Column index of the first sample (normal for paired callers)
pub const FIRST_SAMPLE_COLUMN: usize = 9;

/// One data line of a caller output, split on tabs.
///
/// Column names are held once by the owning table; the record only keeps
/// its values and the 1-based line number it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawVariantRecord {
    pub line: usize,
    pub fields: Vec<String>,
}

impl RawVariantRecord {
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// Get field by column index
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Get CHROM field (field 0)
    pub fn chrom(&self) -> &str {
        self.field(0).unwrap_or("")
    }

    /// Get POS field (field 1) as written on disk
    pub fn pos_str(&self) -> &str {
        self.field(1).unwrap_or("")
    }

    /// Get REF field (field 3)
    pub fn ref_allele(&self) -> Option<&str> {
        self.field(3)
    }

    /// Get ALT field (field 4)
    pub fn alt(&self) -> Option<&str> {
        self.field(4)
    }

    /// Get INFO field
    pub fn info(&self) -> Option<&str> {
        self.field(INFO_COLUMN)
    }

    /// Get FORMAT field
    pub fn format(&self) -> Option<&str> {
        self.field(FORMAT_COLUMN)
    }

    /// Get the n-th sample column (0-based)
    pub fn sample(&self, n: usize) -> Option<&str> {
        self.field(FIRST_SAMPLE_COLUMN + n)
    }
}

/// Allele support derived from a caller's encoding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallSupport {
    /// Reads supporting the variant allele
    pub ad: u64,
    /// Total read depth at the site
    pub dp: u64,
    /// Allele fraction in [0, 1]
    pub af: f64,
}

impl CallSupport {
    pub fn new(ad: u64, dp: u64, af: f64) -> Self {
        Self { ad, dp, af }
    }
}

/// A record reduced to `CHROM POS ID REF ALT QUAL FILTER AD DP AF`.
///
/// Records that survive consensus voting are written out as-is; `caller`
/// tells whose numbers they carry.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    pub chrom: String,
    /// 1-based position
    pub pos: u64,
    pub id: String,
    pub ref_allele: String,
    pub alt: String,
    pub qual: String,
    pub filter: String,
    pub support: CallSupport,
    pub caller: CallerKind,
    /// Source line in the caller's file
    pub line: usize,
}

/// Consensus output rows share the reduced record shape
pub type ConsensusRecord = VariantRecord;

impl VariantRecord {
    /// Mutation identity used by consensus voting
    pub fn mutation_key(&self) -> (&str, u64, &str, &str) {
        (&self.chrom, self.pos, &self.ref_allele, &self.alt)
    }

    /// Whether this and `other` sit at the same (CHROM, POS)
    pub fn same_site(&self, other: &VariantRecord) -> bool {
        self.chrom == other.chrom && self.pos == other.pos
    }
}

/// Anything with a chromosome and 1-based position
pub trait Locus {
    fn chrom(&self) -> &str;
    fn pos(&self) -> u64;
}

impl Locus for VariantRecord {
    fn chrom(&self) -> &str {
        &self.chrom
    }

    fn pos(&self) -> u64 {
        self.pos
    }
}
