//! Caller field extraction
//!
//! Each caller encodes allele support differently. `CallerKind::support`
//! decodes one raw record into `(AD, DP, AF)` and `extract_records` reduces
//! a whole table to the 10-column `VariantRecord` shape.
//!
//! | Caller  | AD                               | DP                  | AF                        |
//! |---------|----------------------------------|---------------------|---------------------------|
//! | MuSE    | sample 1, subfield 2, element 1  | sample 1, subfield 1| round(AD / DP, 4)         |
//! | Mutect2 | sample 2, subfield 1, element 1  | sample 2, subfield 3| sample 2, subfield 2      |
//! | Strelka | ceil(DP * AF)                    | tumor subfield 0    | alt / (alt + ref) tier 1  |
//! | Varscan | floor(DP * AF)                   | INFO entry 1        | INFO entry 0              |

use crate::core::error::{ExtractError, ExtractErrorKind, ExtractResult};
use crate::core::record::{
    CallSupport, CallerKind, RawVariantRecord, VariantRecord, FIRST_SAMPLE_COLUMN, FORMAT_COLUMN,
    INFO_COLUMN,
};
use crate::formats::vcf::VcfTable;
use log::{debug, warn};

type KindResult<T> = std::result::Result<T, ExtractErrorKind>;

/// Strelka SNV FORMAT positions of the AU, CU, GU, TU tier counts
const STRELKA_BASE_SUBFIELDS: [usize; 4] = [4, 5, 6, 7];

/// Strelka record dialect, chosen by the FORMAT column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrelkaDialect {
    /// FORMAT carries `FDP`
    Snv,
    /// FORMAT carries `DP2`
    Indel,
}

impl StrelkaDialect {
    pub fn detect(format: &str) -> Option<Self> {
        if format.split(':').any(|tag| tag == "FDP") {
            Some(StrelkaDialect::Snv)
        } else if format.split(':').any(|tag| tag == "DP2") {
            Some(StrelkaDialect::Indel)
        } else {
            None
        }
    }
}

impl CallerKind {
    /// Decode allele support from this caller's encoding
    pub fn support(self, record: &RawVariantRecord) -> KindResult<CallSupport> {
        match self {
            CallerKind::Muse => muse_support(record),
            CallerKind::Mutect2 => mutect2_support(record),
            CallerKind::Strelka => strelka_support(record),
            CallerKind::Varscan => varscan_support(record),
        }
    }

    /// Reduce a raw record to the 10-column shape with decoded support
    pub fn extract(self, record: &RawVariantRecord) -> ExtractResult<VariantRecord> {
        reduce(self, record).map_err(|kind| ExtractError {
            caller: self,
            line: record.line,
            chrom: record.chrom().to_string(),
            pos: record.pos_str().to_string(),
            kind,
        })
    }
}

/// Extract every record of a caller's table, failing on the first bad one
pub fn extract_records(caller: CallerKind, table: &VcfTable) -> ExtractResult<Vec<VariantRecord>> {
    let records = table
        .records
        .iter()
        .map(|record| caller.extract(record))
        .collect::<ExtractResult<Vec<_>>>()?;
    debug!("{}: extracted {} records", caller, records.len());
    Ok(records)
}

fn reduce(caller: CallerKind, record: &RawVariantRecord) -> KindResult<VariantRecord> {
    let chrom = column(record, 0)?;
    let pos = parse_position(column(record, 1)?)?;
    let id = column(record, 2)?;
    let ref_allele = column(record, 3)?;
    let alt = column(record, 4)?;
    let qual = column(record, 5)?;
    let filter = column(record, 6)?;
    let support = caller.support(record)?;

    Ok(VariantRecord {
        chrom: chrom.to_string(),
        pos,
        id: id.to_string(),
        ref_allele: ref_allele.to_string(),
        alt: alt.to_string(),
        qual: qual.to_string(),
        filter: filter.to_string(),
        support,
        caller,
        line: record.line,
    })
}

fn muse_support(record: &RawVariantRecord) -> KindResult<CallSupport> {
    // MuSE writes the tumor first
    let tumor = sample(record, 0)?;
    let dp = parse_count(subfield(tumor, 1)?)?;
    let ad = parse_count(element(subfield(tumor, 2)?, 1)?)?;
    let af = if dp == 0 {
        0.0
    } else {
        round4(ad as f64 / dp as f64)
    };
    Ok(CallSupport::new(ad, dp, af))
}

fn mutect2_support(record: &RawVariantRecord) -> KindResult<CallSupport> {
    let tumor = sample(record, 1)?;
    let ad = parse_count(element(subfield(tumor, 1)?, 1)?)?;
    let af = parse_fraction(subfield(tumor, 2)?)?;
    let dp = parse_count(subfield(tumor, 3)?)?;
    Ok(CallSupport::new(ad, dp, af))
}

fn strelka_support(record: &RawVariantRecord) -> KindResult<CallSupport> {
    let format = record.format().ok_or(ExtractErrorKind::MissingColumn { index: FORMAT_COLUMN })?;
    let normal = sample(record, 0)?;
    let tumor = sample(record, 1)?;

    let (alt_count, ref_count) = match StrelkaDialect::detect(format) {
        Some(StrelkaDialect::Snv) => {
            let ref_count = match record.ref_allele().and_then(base_index) {
                Some(i) => parse_count(element(subfield(normal, STRELKA_BASE_SUBFIELDS[i])?, 0)?)?,
                None => 0,
            };
            let alt_count = match record.alt().and_then(base_index) {
                Some(i) => parse_count(element(subfield(tumor, STRELKA_BASE_SUBFIELDS[i])?, 1)?)?,
                None => 0,
            };
            (alt_count, ref_count)
        }
        Some(StrelkaDialect::Indel) => {
            let alt_count = parse_count(element(subfield(tumor, 3)?, 0)?)?;
            let ref_count = parse_count(element(subfield(normal, 2)?, 0)?)?;
            (alt_count, ref_count)
        }
        None => return Err(ExtractErrorKind::UnknownStrelkaDialect(format.to_string())),
    };

    let dp = parse_count(element(subfield(tumor, 0)?, 0)?)?;
    // counts come straight from the file; sum as float so huge values cannot overflow
    let total = alt_count as f64 + ref_count as f64;
    let af = if total == 0.0 {
        warn!(
            "Strelka record at line {} ({}:{}) has no tier-1 ref/alt reads; using AF=0",
            record.line,
            record.chrom(),
            record.pos_str()
        );
        0.0
    } else {
        alt_count as f64 / total
    };
    let ad = (dp as f64 * af).ceil() as u64;
    Ok(CallSupport::new(ad, dp, af))
}

fn varscan_support(record: &RawVariantRecord) -> KindResult<CallSupport> {
    let info = record.info().ok_or(ExtractErrorKind::MissingColumn { index: INFO_COLUMN })?;
    let af = parse_fraction(info_value(info, 0)?)?;
    let dp = parse_count(info_value(info, 1)?)?;
    let ad = (dp as f64 * af).floor() as u64;
    Ok(CallSupport::new(ad, dp, af))
}

/// A/C/G/T to tier-count slot; anything else (including multi-base) has none
fn base_index(allele: &str) -> Option<usize> {
    match allele {
        "A" => Some(0),
        "C" => Some(1),
        "G" => Some(2),
        "T" => Some(3),
        _ => None,
    }
}

fn column(record: &RawVariantRecord, index: usize) -> KindResult<&str> {
    record
        .field(index)
        .ok_or(ExtractErrorKind::MissingColumn { index })
}

/// Sample column `n` (0-based)
fn sample(record: &RawVariantRecord, n: usize) -> KindResult<&str> {
    record.sample(n).ok_or(ExtractErrorKind::MissingColumn {
        index: FIRST_SAMPLE_COLUMN + n,
    })
}

fn subfield(field: &str, index: usize) -> KindResult<&str> {
    field
        .split(':')
        .nth(index)
        .ok_or_else(|| ExtractErrorKind::MissingSubfield {
            index,
            field: field.to_string(),
        })
}

fn element(value: &str, index: usize) -> KindResult<&str> {
    value
        .split(',')
        .nth(index)
        .ok_or_else(|| ExtractErrorKind::MissingElement {
            index,
            value: value.to_string(),
        })
}

/// Value of the `index`-th `key=value` entry of an INFO column
fn info_value(info: &str, index: usize) -> KindResult<&str> {
    info.split(';')
        .nth(index)
        .and_then(|entry| entry.split_once('='))
        .map(|(_, value)| value)
        .ok_or_else(|| ExtractErrorKind::MalformedInfo {
            index,
            info: info.to_string(),
        })
}

fn parse_count(value: &str) -> KindResult<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| ExtractErrorKind::InvalidInteger(value.to_string()))
}

/// Allele fraction in `[0, 1]`
fn parse_fraction(value: &str) -> KindResult<f64> {
    match value.trim().parse::<f64>() {
        Ok(v) if (0.0..=1.0).contains(&v) => Ok(v),
        _ => Err(ExtractErrorKind::InvalidFloat(value.to_string())),
    }
}

/// 1-based position: plain decimal digits, not zero
fn parse_position(value: &str) -> KindResult<u64> {
    let invalid = || ExtractErrorKind::InvalidPosition(value.to_string());
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match value.parse::<u64>() {
        Ok(pos) if pos > 0 => Ok(pos),
        _ => Err(invalid()),
    }
}

#[inline]
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
