//! Property-based tests for consensus voting
//!
//! A mutation survives iff at least two callers report it, and then exactly
//! one record of it survives.

use call_consensus::{
    normalize, run_consensus, run_ranks, CallSupport, CallerKind, ChromosomeTable, ConsensusVoter,
    VariantRecord,
};
use proptest::prelude::*;

fn call(chrom: &str, pos: u64, ref_allele: &str, alt: &str, caller: CallerKind) -> VariantRecord {
    VariantRecord {
        chrom: chrom.to_string(),
        pos,
        id: ".".to_string(),
        ref_allele: ref_allele.to_string(),
        alt: alt.to_string(),
        qual: ".".to_string(),
        filter: "PASS".to_string(),
        support: CallSupport::new(10 + caller.index() as u64, 100, 0.1),
        caller,
        line: 0,
    }
}

/// Which of the four callers report the mutation
fn arb_callers() -> impl Strategy<Value = [bool; 4]> {
    prop::array::uniform4(any::<bool>())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Kept iff called by k >= 2 callers; one row, carrying the second caller's values
    #[test]
    fn prop_majority_law(
        called in arb_callers(),
        pos in 1000u64..1_000_000,
        noise_offset in 10u64..1000,
    ) {
        let chroms = ChromosomeTable::mouse();
        let per_caller: Vec<Vec<VariantRecord>> = CallerKind::ALL
            .iter()
            .map(|&caller| {
                let mut records = Vec::new();
                if called[caller.index()] {
                    records.push(call("chr5", pos, "C", "A", caller));
                }
                // a private call elsewhere never reaches consensus
                records.push(call("chr5", pos + noise_offset + caller.index() as u64 * 2000, "G", "T", caller));
                records
            })
            .collect();

        let (records, _) = run_consensus(per_caller, &chroms, &ConsensusVoter::default());
        let k = called.iter().filter(|&&c| c).count();
        let survivors: Vec<&VariantRecord> = records.iter().filter(|r| r.pos == pos).collect();

        if k >= 2 {
            prop_assert_eq!(survivors.len(), 1);
            let second = CallerKind::ALL.iter().copied().filter(|c| called[c.index()]).nth(1);
            prop_assert_eq!(Some(survivors[0].caller), second);
        } else {
            prop_assert!(survivors.is_empty());
        }
        prop_assert_eq!(records.len(), usize::from(k >= 2));
    }

    /// Ranks restart at 1 on every key change and count up within a run
    #[test]
    fn prop_rank_runs(keys in prop::collection::vec(0u64..4, 0..50)) {
        let records: Vec<VariantRecord> = keys.iter().map(|&p| call("chr1", p, "A", "G", CallerKind::Muse)).collect();
        let ranks = run_ranks(&records);

        prop_assert_eq!(ranks.len(), keys.len());
        for i in 0..keys.len() {
            let expected = if i > 0 && keys[i] == keys[i - 1] { ranks[i - 1] + 1 } else { 1 };
            prop_assert_eq!(ranks[i], expected);
        }
    }
}

#[test]
fn test_rank_assignment_example() {
    let records = vec![
        call("chr1", 1, "A", "G", CallerKind::Muse),
        call("chr1", 1, "A", "G", CallerKind::Mutect2),
        call("chr1", 1, "A", "G", CallerKind::Strelka),
        call("chr1", 2, "T", "C", CallerKind::Varscan),
    ];
    assert_eq!(run_ranks(&records), vec![1, 2, 3, 1]);

    let kept = ConsensusVoter::default().vote(records);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].caller, CallerKind::Mutect2);
    assert_eq!(kept[0].pos, 1);
}

#[test]
fn test_union_sort_keeps_caller_order() {
    let chroms = ChromosomeTable::mouse();
    // union in caller order, deliberately out of position order
    let union = vec![
        call("chr2", 50, "A", "G", CallerKind::Muse),
        call("chr1", 10, "A", "G", CallerKind::Muse),
        call("chr2", 50, "A", "G", CallerKind::Strelka),
        call("chr1", 10, "A", "G", CallerKind::Varscan),
    ];
    let sorted = normalize(union, &chroms);
    let order: Vec<(u64, CallerKind)> = sorted.iter().map(|r| (r.pos, r.caller)).collect();
    assert_eq!(
        order,
        vec![
            (10, CallerKind::Muse),
            (10, CallerKind::Varscan),
            (50, CallerKind::Muse),
            (50, CallerKind::Strelka),
        ]
    );

    let kept = ConsensusVoter::default().vote(sorted);
    let callers: Vec<CallerKind> = kept.iter().map(|r| r.caller).collect();
    assert_eq!(callers, vec![CallerKind::Varscan, CallerKind::Strelka]);
}
