//! CallConsensus CLI entry point
//!
//! Builds 2+ caller consensus call sets from MuSE, Mutect2, Strelka and
//! Varscan outputs.

use anyhow::Context;
use call_consensus::{
    process_sample, process_samples, CallerKind, ChromosomeTable, PipelineConfig, SampleGroup,
    SampleStats,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Chromosome set preset (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum SpeciesArg {
    /// chr1..chr19, chrX, chrY
    #[default]
    #[value(name = "mouse")]
    Mouse,
    /// chr1..chr22, chrX, chrY
    #[value(name = "human")]
    Human,
}

/// Caller selection (CLI enum)
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CallerArg {
    #[value(name = "muse")]
    Muse,
    #[value(name = "mutect2")]
    Mutect2,
    #[value(name = "strelka")]
    Strelka,
    #[value(name = "varscan")]
    Varscan,
}

impl From<CallerArg> for CallerKind {
    fn from(arg: CallerArg) -> Self {
        match arg {
            CallerArg::Muse => CallerKind::Muse,
            CallerArg::Mutect2 => CallerKind::Mutect2,
            CallerArg::Strelka => CallerKind::Strelka,
            CallerArg::Varscan => CallerKind::Varscan,
        }
    }
}

#[derive(Parser)]
#[command(name = "call-consensus")]
#[command(about = "Consensus of MuSE, Mutect2, Strelka and Varscan somatic calls (2+ callers)")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    options: ConsensusOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConsensusOptions {
    /// Chromosome set to keep and sort by
    #[arg(long, global = true, default_value = "mouse")]
    species: SpeciesArg,
    /// Number of autosomes (chr1..chrN, chrX, chrY); overrides --species
    #[arg(long, global = true)]
    autosomes: Option<usize>,
    /// File with one chromosome name per line, in sort order; overrides --species and --autosomes
    #[arg(long = "chrom-file", global = true)]
    chrom_file: Option<PathBuf>,
    /// Output file suffix appended to the sample name
    #[arg(long, global = true, default_value = ".call2plus.vcf")]
    suffix: String,
    /// Number of callers that must agree on a mutation
    #[arg(long = "min-callers", global = true, default_value = "2")]
    min_callers: usize,
    /// Caller whose header lines are copied to the output
    #[arg(long = "header-from", global = true, default_value = "mutect2")]
    header_from: CallerArg,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the consensus for one sample
    Sample {
        /// MuSE output
        #[arg(long)]
        muse: PathBuf,
        /// Mutect2 output
        #[arg(long)]
        mutect2: PathBuf,
        /// Strelka output
        #[arg(long)]
        strelka: PathBuf,
        /// Varscan output
        #[arg(long)]
        varscan: PathBuf,
        /// Output directory
        #[arg(short = 'o', long = "output-dir")]
        output_dir: PathBuf,
    },
    /// Build consensus files for many samples
    Batch {
        /// Caller outputs in groups of four (MuSE, Mutect2, Strelka, Varscan)
        files: Vec<String>,
        /// File listing caller outputs, one per line, in groups of four
        #[arg(short = 'l', long)]
        list: Option<PathBuf>,
        /// Directory the file names are relative to
        #[arg(short = 'i', long = "input-dir", default_value = ".")]
        input_dir: PathBuf,
        /// Output directory
        #[arg(short = 'o', long = "output-dir")]
        output_dir: PathBuf,
        /// Number of samples processed in parallel
        #[arg(short = 't', long, default_value = "1")]
        threads: usize,
    },
}

impl ConsensusOptions {
    fn into_config(self) -> anyhow::Result<PipelineConfig> {
        let chromosomes = if let Some(path) = &self.chrom_file {
            ChromosomeTable::from_file(path)?
        } else if let Some(n) = self.autosomes {
            ChromosomeTable::with_autosomes(n)
        } else {
            match self.species {
                SpeciesArg::Mouse => ChromosomeTable::mouse(),
                SpeciesArg::Human => ChromosomeTable::human(),
            }
        };

        let config = PipelineConfig {
            chromosomes,
            suffix: self.suffix,
            min_callers: self.min_callers,
            header_source: self.header_from.into(),
        };
        // fail before touching any input
        config.voter()?;
        Ok(config)
    }
}

fn read_file_list(path: &Path) -> anyhow::Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file list {:?}", path))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(String::from)
        .collect())
}

fn print_stats(stats: &SampleStats) {
    for caller in CallerKind::ALL {
        eprintln!(
            "{:<16} {} read, {} kept",
            format!("{}:", caller),
            stats.extracted[caller.index()],
            stats.prepared[caller.index()]
        );
    }
    eprintln!("Union:           {}", stats.union);
    eprintln!("Voted:           {}", stats.voted);
    eprintln!("Written:         {}", stats.written);
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();
    let config = cli.options.into_config()?;

    match cli.command {
        Commands::Sample { muse, mutect2, strelka, varscan, output_dir } => {
            let group = SampleGroup::new(muse, mutect2, strelka, varscan);
            let output_path = group.output_path(&output_dir, &config.suffix)?;

            eprintln!("Building consensus: {:?} -> {:?}", group.sample_name()?, output_path);
            let stats = process_sample(&group, &output_dir, &config)
                .with_context(|| format!("Sample {:?} failed", group.muse))?;

            eprintln!("\n=== Consensus Statistics ===");
            print_stats(&stats);
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }

        Commands::Batch { files, list, input_dir, output_dir, threads } => {
            let mut names = files;
            if let Some(list) = &list {
                names.extend(read_file_list(list)?);
            }
            let groups = SampleGroup::from_file_list(&names, &input_dir)?;

            eprintln!("Processing {} samples with {} thread(s) -> {:?}", groups.len(), threads, output_dir);
            let outcomes = process_samples(&groups, &output_dir, &config, threads)?;

            let mut failed = 0usize;
            for outcome in &outcomes {
                match &outcome.result {
                    Ok(stats) => eprintln!(
                        "OK      {:?}: {} consensus records",
                        outcome.output.as_deref().unwrap_or(outcome.group.muse.as_path()),
                        stats.written
                    ),
                    Err(e) => {
                        failed += 1;
                        eprintln!("FAILED  {:?}: {}", outcome.group.muse, e);
                    }
                }
            }

            eprintln!("\n=== Batch Statistics ===");
            eprintln!("Samples:         {}", outcomes.len());
            eprintln!("Successful:      {}", outcomes.len() - failed);
            eprintln!("Failed:          {}", failed);
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());

            if failed > 0 {
                anyhow::bail!("{} of {} samples failed", failed, outcomes.len());
            }
        }
    }

    Ok(())
}
