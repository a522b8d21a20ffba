//! VCF reader
//!
//! Reads a caller's flat variant file into its header block and a table of
//! raw records. Everything up to and including the `#C` column-header line
//! is kept verbatim; each later line is split on tabs and must have as many
//! fields as the column header.

use crate::core::error::{ReadResult, VcfReadError};
use crate::core::io::{open_reader, LineIterator};
use crate::core::record::RawVariantRecord;
use memchr::memchr_iter;
use std::io::BufRead;
use std::path::Path;

/// Marker that starts the column-header line
const COLUMN_HEADER_MARKER: &str = "#C";

/// Header block plus raw records of one caller output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcfTable {
    /// Header lines including the column-header line (last)
    pub header: Vec<String>,
    /// Column names from the column-header line, leading `#` stripped
    pub columns: Vec<String>,
    pub records: Vec<RawVariantRecord>,
}

impl VcfTable {
    /// Read a caller output file (plain, gzip or bzip2)
    pub fn from_path<P: AsRef<Path>>(path: P) -> ReadResult<Self> {
        let path = path.as_ref();
        let reader = open_reader(path)?;
        Self::from_reader(reader, path)
    }

    /// Read from any buffered source; `source` is only used in errors
    pub fn from_reader<R: BufRead>(reader: R, source: &Path) -> ReadResult<Self> {
        let mut lines = LineIterator::new(reader);
        let mut header = Vec::new();
        let mut line_no = 0usize;

        let columns = loop {
            let line = match lines.next_line() {
                Some(line) => line?,
                None => {
                    return Err(VcfReadError::MissingColumnHeader {
                        path: source.to_path_buf(),
                    })
                }
            };
            line_no += 1;
            header.push(line.to_string());

            if line.starts_with(COLUMN_HEADER_MARKER) {
                break split_tabs(&line[1..]).map(String::from).collect::<Vec<String>>();
            }
        };

        let mut records = Vec::new();
        while let Some(line) = lines.next_line() {
            let line = line?;
            line_no += 1;
            if line.is_empty() {
                continue;
            }

            let fields: Vec<String> = split_tabs(line).map(String::from).collect();
            if fields.len() != columns.len() {
                return Err(VcfReadError::FieldCountMismatch {
                    line: line_no,
                    expected: columns.len(),
                    found: fields.len(),
                });
            }
            records.push(RawVariantRecord::new(line_no, fields));
        }

        Ok(Self {
            header,
            columns,
            records,
        })
    }

    /// Header lines preceding the column-header line
    pub fn preamble(&self) -> &[String] {
        match self.header.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }


    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Split a line on tab characters
pub fn split_tabs(line: &str) -> impl Iterator<Item = &str> {
    let bytes = line.as_bytes();
    let mut start = 0;
    memchr_iter(b'\t', bytes)
        .chain(std::iter::once(bytes.len()))
        .map(move |end| {
            // tabs are ASCII, so both bounds are char boundaries
            let field = &line[start..end];
            start = end + 1;
            field
        })
}
