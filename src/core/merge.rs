//! SBS to DBS merging
//!
//! Fuses substitutions at consecutive positions into dinucleotide
//! substitutions in a single left-to-right pass.

use crate::core::record::VariantRecord;
use log::debug;

/// Merge adjacent records at consecutive positions on the same chromosome.
///
/// Input must be normalized. For each adjacent pair `(prev, cur)` with
/// `cur.pos == prev.pos + 1`, `prev` is dropped and `cur` is replaced by a
/// record at `prev.pos` with `REF = prev.REF + cur.REF` and
/// `ALT = prev.ALT + cur.ALT`; every other column (including allele
/// support) comes from `cur`.
///
/// Each record takes part in at most one merge per pass, so a run at
/// `p, p+1, p+2` yields the DBS at `p` plus the lone record at `p+2`.
pub fn sbs_to_dbs(records: Vec<VariantRecord>) -> Vec<VariantRecord> {
    let mut merged: Vec<VariantRecord> = Vec::with_capacity(records.len());
    // whether merged.last() is itself the product of a merge
    let mut last_was_merged = false;
    let mut merges = 0usize;

    for record in records {
        let adjacent = !last_was_merged
            && merged
                .last()
                .map_or(false, |prev| {
                    prev.chrom == record.chrom && prev.pos.checked_add(1) == Some(record.pos)
                });

        if adjacent {
            if let Some(prev) = merged.pop() {
                merged.push(fuse(prev, record));
                last_was_merged = true;
                merges += 1;
                continue;
            }
        }

        merged.push(record);
        last_was_merged = false;
    }

    if merges > 0 {
        debug!("Merged {} adjacent SBS pairs into DBS", merges);
    }
    merged
}

fn fuse(first: VariantRecord, second: VariantRecord) -> VariantRecord {
    let mut ref_allele = first.ref_allele;
    ref_allele.push_str(&second.ref_allele);
    let mut alt = first.alt;
    alt.push_str(&second.alt);

    VariantRecord {
        pos: first.pos,
        ref_allele,
        alt,
        ..second
    }
}
