//! Per-sample consensus pipeline
//!
//! Reads the four caller outputs of one sample, reduces them to a single
//! consensus call set and writes it next to the other samples' results:
//!
//! ```text
//! read -> extract -> normalize -> [MuSE: SBS->DBS] -> union (caller order)
//!      -> normalize -> vote -> normalize -> SBS->DBS -> collapse -> write
//! ```
//!
//! Each sample is independent; a failing sample writes nothing and does not
//! affect the others.

use crate::core::chrom::ChromosomeTable;
use crate::core::consensus::{collapse_duplicates, ConsensusVoter, DEFAULT_MIN_CALLERS};
use crate::core::error::{ConfigError, ConsensusError, ExtractResult, Result};
use crate::core::merge::sbs_to_dbs;
use crate::core::normalize::normalize;
use crate::core::record::{CallerKind, VariantRecord};
use crate::formats::callers::extract_records;
use crate::formats::vcf::VcfTable;
use crate::formats::writer::write_consensus_file;
use log::{debug, info};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Default output file suffix
pub const DEFAULT_SUFFIX: &str = ".call2plus.vcf";

/// Settings shared by every sample of a run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Chromosomes to keep, in output order
    pub chromosomes: ChromosomeTable,
    /// Appended to the sample name to form the output file name
    pub suffix: String,
    /// Number of callers that must agree on a mutation
    pub min_callers: usize,
    /// Caller whose header lines are passed through to the output
    pub header_source: CallerKind,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chromosomes: ChromosomeTable::default(),
            suffix: DEFAULT_SUFFIX.to_string(),
            min_callers: DEFAULT_MIN_CALLERS,
            header_source: CallerKind::Mutect2,
        }
    }
}

impl PipelineConfig {
    pub fn voter(&self) -> std::result::Result<ConsensusVoter, ConfigError> {
        ConsensusVoter::new(self.min_callers)
    }
}

/// The four caller outputs of one sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleGroup {
    pub muse: PathBuf,
    pub mutect2: PathBuf,
    pub strelka: PathBuf,
    pub varscan: PathBuf,
}

impl SampleGroup {
    pub fn new<P: Into<PathBuf>>(muse: P, mutect2: P, strelka: P, varscan: P) -> Self {
        Self {
            muse: muse.into(),
            mutect2: mutect2.into(),
            strelka: strelka.into(),
            varscan: varscan.into(),
        }
    }

    /// Group a flat file list into samples of four, in the fixed order
    /// MuSE, Mutect2, Strelka, Varscan. Names are joined onto `input_dir`.
    pub fn from_file_list<S: AsRef<str>>(
        files: &[S],
        input_dir: &Path,
    ) -> std::result::Result<Vec<Self>, ConfigError> {
        if files.len() % 4 != 0 {
            return Err(ConfigError::IncompleteSampleGroup(files.len()));
        }
        Ok(files
            .chunks(4)
            .map(|chunk| {
                let path = |i: usize| input_dir.join(chunk[i].as_ref());
                Self::new(path(0), path(1), path(2), path(3))
            })
            .collect())
    }

    /// File holding `caller`'s calls
    pub fn path(&self, caller: CallerKind) -> &Path {
        match caller {
            CallerKind::Muse => &self.muse,
            CallerKind::Mutect2 => &self.mutect2,
            CallerKind::Strelka => &self.strelka,
            CallerKind::Varscan => &self.varscan,
        }
    }

    /// File name of the MuSE output up to its first `.`
    pub fn sample_name(&self) -> std::result::Result<String, ConfigError> {
        self.muse
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.split('.').next())
            .filter(|n| !n.is_empty())
            .map(String::from)
            .ok_or_else(|| ConfigError::InvalidSampleName {
                path: self.muse.clone(),
            })
    }

    /// `out_dir/<sample name><suffix>`
    pub fn output_path(&self, out_dir: &Path, suffix: &str) -> std::result::Result<PathBuf, ConfigError> {
        Ok(out_dir.join(format!("{}{}", self.sample_name()?, suffix)))
    }
}

/// Record counts through one sample's pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleStats {
    /// Records per caller after extraction, in caller order
    pub extracted: [usize; 4],
    /// Records per caller after normalization (and merging for MuSE)
    pub prepared: [usize; 4],
    /// Size of the multi-caller union
    pub union: usize,
    /// Records kept by the consensus vote
    pub voted: usize,
    /// Records written
    pub written: usize,
}

/// Outcome of one sample in a batch
#[derive(Debug)]
pub struct SampleOutcome {
    pub group: SampleGroup,
    pub output: Option<PathBuf>,
    pub result: Result<SampleStats>,
}

/// Extract, normalize and (for MuSE) merge one caller's records
pub fn prepare_caller(
    caller: CallerKind,
    table: &VcfTable,
    chromosomes: &ChromosomeTable,
) -> ExtractResult<Vec<VariantRecord>> {
    let records = normalize(extract_records(caller, table)?, chromosomes);
    if caller == CallerKind::Muse {
        Ok(sbs_to_dbs(records))
    } else {
        Ok(records)
    }
}

/// Consensus over prepared per-caller record sets given in caller order.
///
/// Pure in-memory part of the pipeline; returns the final records and the
/// counts from union onward.
pub fn run_consensus(
    per_caller: Vec<Vec<VariantRecord>>,
    chromosomes: &ChromosomeTable,
    voter: &ConsensusVoter,
) -> (Vec<VariantRecord>, SampleStats) {
    let mut stats = SampleStats::default();
    for (slot, records) in stats.prepared.iter_mut().zip(&per_caller) {
        *slot = records.len();
    }

    let union: Vec<VariantRecord> = per_caller.into_iter().flatten().collect();
    stats.union = union.len();

    let voted = voter.vote(normalize(union, chromosomes));
    stats.voted = voted.len();

    let merged = sbs_to_dbs(normalize(voted, chromosomes));
    let collapsed = collapse_duplicates(merged);
    stats.written = collapsed.len();

    (collapsed, stats)
}

/// Run the full pipeline for one sample and write its consensus file.
///
/// Returns the counts; the output file only appears if every step
/// succeeded.
pub fn process_sample(group: &SampleGroup, out_dir: &Path, config: &PipelineConfig) -> Result<SampleStats> {
    let voter = config.voter()?;
    let name = group.sample_name()?;
    let output = group.output_path(out_dir, &config.suffix)?;

    let mut tables = Vec::with_capacity(CallerKind::ALL.len());
    for caller in CallerKind::ALL {
        info!("Treat sample: {} {}", name, caller);
        tables.push(VcfTable::from_path(group.path(caller))?);
    }

    let mut extracted = [0usize; 4];
    let mut per_caller = Vec::with_capacity(tables.len());
    for (caller, table) in CallerKind::ALL.into_iter().zip(&tables) {
        extracted[caller.index()] = table.len();
        per_caller.push(prepare_caller(caller, table, &config.chromosomes)?);
    }

    info!("Treat sample: {} Integration", name);
    let (records, mut stats) = run_consensus(per_caller, &config.chromosomes, &voter);
    stats.extracted = extracted;

    let preamble = tables[config.header_source.index()].preamble();
    std::fs::create_dir_all(out_dir)?;
    write_consensus_file(&output, preamble, &records)?;
    debug!("{}: wrote {} records to {:?}", name, stats.written, output);

    Ok(stats)
}

/// Process many samples, optionally on a worker pool.
///
/// Every sample is attempted; failures are reported in its outcome and do
/// not stop the others. `threads <= 1` runs sequentially.
pub fn process_samples(
    groups: &[SampleGroup],
    out_dir: &Path,
    config: &PipelineConfig,
    threads: usize,
) -> Result<Vec<SampleOutcome>> {
    let run = |group: &SampleGroup| SampleOutcome {
        group: group.clone(),
        output: group.output_path(out_dir, &config.suffix).ok(),
        result: process_sample(group, out_dir, config),
    };

    if threads <= 1 {
        return Ok(groups.iter().map(&run).collect());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| {
            ConsensusError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to create thread pool: {}", e),
            ))
        })?;

    Ok(pool.install(|| groups.par_iter().map(&run).collect()))
}
