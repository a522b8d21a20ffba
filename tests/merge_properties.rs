//! Property-based tests for SBS to DBS merging and duplicate collapsing

use call_consensus::{collapse_duplicates, sbs_to_dbs, CallSupport, CallerKind, VariantRecord};
use proptest::prelude::*;

fn snv(chrom: &str, pos: u64, ref_allele: &str, alt: &str) -> VariantRecord {
    VariantRecord {
        chrom: chrom.to_string(),
        pos,
        id: ".".to_string(),
        ref_allele: ref_allele.to_string(),
        alt: alt.to_string(),
        qual: ".".to_string(),
        filter: "PASS".to_string(),
        support: CallSupport::new(3, 30, 0.1),
        caller: CallerKind::Mutect2,
        line: 0,
    }
}

/// Sorted positions on one chromosome with no two consecutive
fn arb_spaced_positions() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(2u64..50, 0..40).prop_map(|gaps| {
        let mut pos = 0u64;
        gaps.into_iter()
            .map(|gap| {
                pos += gap;
                pos
            })
            .collect()
    })
}

/// Sorted positions that may include duplicates and consecutive runs
fn arb_dense_positions() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..3, 0..40).prop_map(|gaps| {
        let mut pos = 1u64;
        gaps.into_iter()
            .map(|gap| {
                pos += gap;
                pos
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Without consecutive positions the merger changes nothing
    #[test]
    fn prop_merge_noop_without_adjacency(positions in arb_spaced_positions()) {
        let records: Vec<VariantRecord> = positions.iter().map(|&p| snv("chr1", p, "A", "G")).collect();
        prop_assert_eq!(sbs_to_dbs(records.clone()), records);
    }

    /// Each merge removes exactly one record and conserves total allele length
    #[test]
    fn prop_merge_conserves_bases(positions in arb_dense_positions()) {
        let records: Vec<VariantRecord> = positions.iter().map(|&p| snv("chr1", p, "C", "T")).collect();
        let input_bases: usize = records.iter().map(|r| r.ref_allele.len()).sum();

        let merged = sbs_to_dbs(records.clone());
        let output_bases: usize = merged.iter().map(|r| r.ref_allele.len()).sum();
        let dbs = merged.iter().filter(|r| r.ref_allele.len() == 2).count();

        prop_assert_eq!(input_bases, output_bases);
        prop_assert_eq!(merged.len() + dbs, records.len());
        // single pass: nothing longer than a dinucleotide
        prop_assert!(merged.iter().all(|r| r.ref_allele.len() <= 2 && r.alt.len() == r.ref_allele.len()));
    }

    /// Collapsing leaves no two neighbours at the same site and keeps every site
    #[test]
    fn prop_collapse_unique_sites(positions in arb_dense_positions()) {
        let records: Vec<VariantRecord> = positions.iter().map(|&p| snv("chr2", p, "G", "A")).collect();
        let mut distinct = positions.clone();
        distinct.dedup();

        let collapsed = collapse_duplicates(records);
        let kept: Vec<u64> = collapsed.iter().map(|r| r.pos).collect();
        prop_assert_eq!(kept, distinct);
    }
}

#[test]
fn test_sbs_to_dbs_example() {
    let records = vec![
        snv("chr1", 100, "A", "G"),
        snv("chr1", 101, "C", "T"),
        snv("chr1", 102, "G", "C"),
    ];
    let merged = sbs_to_dbs(records);

    assert_eq!(merged.len(), 2);
    assert_eq!((merged[0].pos, merged[0].ref_allele.as_str(), merged[0].alt.as_str()), (100, "AC", "GT"));
    assert_eq!((merged[1].pos, merged[1].ref_allele.as_str(), merged[1].alt.as_str()), (102, "G", "C"));
}

#[test]
fn test_duplicate_collapse_example() {
    let records = vec![snv("chr1", 100, "A", "G"), snv("chr1", 100, "A", "C"), snv("chr1", 105, "T", "A")];
    let positions: Vec<u64> = collapse_duplicates(records).iter().map(|r| r.pos).collect();
    assert_eq!(positions, vec![100, 105]);
}
