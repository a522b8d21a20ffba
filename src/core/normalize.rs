//! Position normalization
//!
//! Drops records on chromosomes outside the ordering table and sorts the
//! rest by (chromosome rank, position).

use crate::core::chrom::ChromosomeTable;
use crate::core::record::Locus;
use log::debug;

/// Filter to known chromosomes and sort by (rank, POS).
///
/// The sort is stable: records at the same site keep their input order,
/// which is what makes caller order the consensus tie-break.
pub fn normalize<T: Locus>(records: Vec<T>, table: &ChromosomeTable) -> Vec<T> {
    let before = records.len();
    let mut kept: Vec<T> = records
        .into_iter()
        .filter(|r| table.contains(r.chrom()))
        .collect();

    if kept.len() < before {
        debug!(
            "Dropped {} records on chromosomes outside the ordering table",
            before - kept.len()
        );
    }

    kept.sort_by_key(|r| sort_key(r, table));
    kept
}

/// Check that records are on known chromosomes and in (rank, POS) order
pub fn is_normalized<T: Locus>(records: &[T], table: &ChromosomeTable) -> bool {
    records.iter().all(|r| table.contains(r.chrom()))
        && records
            .windows(2)
            .all(|w| sort_key(&w[0], table) <= sort_key(&w[1], table))
}

#[inline]
fn sort_key<T: Locus>(record: &T, table: &ChromosomeTable) -> (usize, u64) {
    (table.rank(record.chrom()).unwrap_or(usize::MAX), record.pos())
}
