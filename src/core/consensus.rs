//! Multi-caller consensus voting
//!
//! The union of all callers' records, sorted by site, is scanned once.
//! Each record gets a run-rank within its run of identical
//! `(CHROM, POS, REF, ALT)` keys and only the record whose rank equals the
//! required caller count survives.

use crate::core::error::ConfigError;
use crate::core::record::VariantRecord;
use log::debug;

/// Default number of callers that must agree on a mutation
pub const DEFAULT_MIN_CALLERS: usize = 2;

/// Majority gate over a sorted multi-caller union
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsensusVoter {
    keep_rank: usize,
}

impl Default for ConsensusVoter {
    fn default() -> Self {
        Self {
            keep_rank: DEFAULT_MIN_CALLERS,
        }
    }
}

impl ConsensusVoter {
    /// Voter keeping mutations seen by at least `min_callers` callers
    pub fn new(min_callers: usize) -> Result<Self, ConfigError> {
        if min_callers == 0 {
            return Err(ConfigError::InvalidMinCallers(min_callers));
        }
        Ok(Self {
            keep_rank: min_callers,
        })
    }

    pub fn min_callers(&self) -> usize {
        self.keep_rank
    }

    /// Keep exactly one record per mutation called `min_callers` or more
    /// times: the one at run-rank `min_callers`.
    ///
    /// The surviving record carries the allele support of whichever caller
    /// lands at that rank in the union's order.
    pub fn vote(&self, records: Vec<VariantRecord>) -> Vec<VariantRecord> {
        let total = records.len();
        let ranks = run_ranks(&records);
        let kept: Vec<VariantRecord> = records
            .into_iter()
            .zip(ranks)
            .filter(|(_, rank)| *rank == self.keep_rank)
            .map(|(record, _)| record)
            .collect();

        debug!(
            "Consensus vote kept {} of {} records (rank == {})",
            kept.len(),
            total,
            self.keep_rank
        );
        kept
    }
}

/// Rank of each record within its run of equal mutation keys, starting at 1.
///
/// Runs are maximal stretches of consecutive records; the same key
/// reappearing after a different one starts a new run.
pub fn run_ranks(records: &[VariantRecord]) -> Vec<usize> {
    let mut ranks = Vec::with_capacity(records.len());
    let mut current: Option<(&str, u64, &str, &str)> = None;
    let mut rank = 0usize;

    for record in records {
        let key = record.mutation_key();
        if current == Some(key) {
            rank += 1;
        } else {
            current = Some(key);
            rank = 1;
        }
        ranks.push(rank);
    }
    ranks
}

/// Drop records at the same (CHROM, POS) as their immediate predecessor.
///
/// Only the first record of a same-site run survives.
pub fn collapse_duplicates(records: Vec<VariantRecord>) -> Vec<VariantRecord> {
    let total = records.len();
    let mut kept: Vec<VariantRecord> = Vec::with_capacity(total);
    for record in records {
        if kept.last().map_or(false, |prev| prev.same_site(&record)) {
            continue;
        }
        kept.push(record);
    }

    if kept.len() < total {
        debug!("Collapsed {} same-site duplicates", total - kept.len());
    }
    kept
}
