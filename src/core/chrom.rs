//! Chromosome ordering table
//!
//! The ordered set of chromosomes that survive normalization. A name's
//! position in the table is its sort rank; names not in the table are
//! dropped.

use crate::core::error::ConfigError;
use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Ordered list of valid chromosome names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromosomeTable {
    names: Vec<String>,
    ranks: HashMap<String, usize>,
}

impl ChromosomeTable {
    /// Build a table from an explicit ordered list.
    ///
    /// Repeated names keep their first rank.
    pub fn new<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered = Vec::new();
        let mut ranks = HashMap::new();
        for name in names {
            let name = name.into();
            if !ranks.contains_key(&name) {
                ranks.insert(name.clone(), ordered.len());
                ordered.push(name);
            }
        }
        if ordered.is_empty() {
            return Err(ConfigError::EmptyChromosomeTable);
        }
        Ok(Self { names: ordered, ranks })
    }

    /// `chr1..chrN` followed by `chrX`, `chrY`
    pub fn with_autosomes(autosomes: usize) -> Self {
        let names = (1..=autosomes)
            .map(|i| format!("chr{}", i))
            .chain(["chrX".to_string(), "chrY".to_string()]);
        // never empty: the sex chromosomes are always present
        let mut ordered = Vec::with_capacity(autosomes + 2);
        let mut ranks = HashMap::with_capacity(autosomes + 2);
        for name in names {
            ranks.insert(name.clone(), ordered.len());
            ordered.push(name);
        }
        Self { names: ordered, ranks }
    }

    /// Mouse assembly: chr1..chr19, chrX, chrY
    pub fn mouse() -> Self {
        Self::with_autosomes(19)
    }

    /// Human assembly: chr1..chr22, chrX, chrY
    pub fn human() -> Self {
        Self::with_autosomes(22)
    }

    /// Load a table from a file with one chromosome name per line.
    ///
    /// Blank lines and lines starting with `#` are ignored.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ConfigError::ChromosomeFile {
            path: path.to_path_buf(),
            source,
        })?;

        let mut names = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|source| ConfigError::ChromosomeFile {
                path: path.to_path_buf(),
                source,
            })?;
            let name = line.trim();
            if name.is_empty() || name.starts_with('#') {
                continue;
            }
            names.push(name.to_string());
        }
        Self::new(names)
    }

    /// Sort rank of a chromosome, if it is in the table
    #[inline]
    pub fn rank(&self, chrom: &str) -> Option<usize> {
        self.ranks.get(chrom).copied()
    }

    #[inline]
    pub fn contains(&self, chrom: &str) -> bool {
        self.ranks.contains_key(chrom)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in rank order
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for ChromosomeTable {
    fn default() -> Self {
        Self::mouse()
    }
}
