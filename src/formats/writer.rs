//! Consensus VCF writer
//!
//! Output = the passed-through header lines of one caller, a fixed
//! 10-column header and one tab-separated line per consensus record.

use crate::core::io::write_atomically;
use crate::core::record::ConsensusRecord;
use std::io::{self, Write};
use std::path::Path;

/// Column header written in place of the caller's own
pub const CONSENSUS_COLUMN_HEADER: &str = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tAD\tDP\tAF";

/// Format one record as an output line (without newline)
pub fn format_record(record: &ConsensusRecord) -> String {
    let mut output = String::with_capacity(128);

    output.push_str(&record.chrom);
    output.push('\t');
    output.push_str(&record.pos.to_string());
    output.push('\t');
    output.push_str(&record.id);
    output.push('\t');
    output.push_str(&record.ref_allele);
    output.push('\t');
    output.push_str(&record.alt);
    output.push('\t');
    output.push_str(&record.qual);
    output.push('\t');
    output.push_str(&record.filter);
    output.push('\t');
    output.push_str(&record.support.ad.to_string());
    output.push('\t');
    output.push_str(&record.support.dp.to_string());
    output.push('\t');
    output.push_str(&format!("{:.4}", record.support.af));

    output
}

/// Write header and records to any sink
pub fn write_consensus<W: Write>(
    writer: &mut W,
    preamble: &[String],
    records: &[ConsensusRecord],
) -> io::Result<()> {
    for line in preamble {
        writeln!(writer, "{}", line)?;
    }
    writeln!(writer, "{}", CONSENSUS_COLUMN_HEADER)?;
    for record in records {
        writeln!(writer, "{}", format_record(record))?;
    }
    Ok(())
}

/// Write a consensus file; nothing appears at `path` unless the whole
/// file was written.
pub fn write_consensus_file<P: AsRef<Path>>(
    path: P,
    preamble: &[String],
    records: &[ConsensusRecord],
) -> io::Result<()> {
    write_atomically(path, |writer| write_consensus(writer, preamble, records))
}
