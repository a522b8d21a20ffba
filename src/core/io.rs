//! I/O helpers
//!
//! Opens caller output files (plain, gzip or bzip2) with a large buffer and
//! writes result files atomically through a temporary sibling.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Default buffer size for BufReader/BufWriter (128KB)
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Compression format of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    Plain,
    Gzip,
    Bzip2,
}

/// Detect compression format from file extension and/or magic bytes
pub fn detect_compression(path: &Path) -> io::Result<CompressionFormat> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if extension == "gz" {
        return Ok(CompressionFormat::Gzip);
    }
    if extension == "bz2" {
        return Ok(CompressionFormat::Bzip2);
    }

    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let bytes_read = file.read(&mut magic)?;

    if bytes_read >= 2 && magic[0] == 0x1f && magic[1] == 0x8b {
        return Ok(CompressionFormat::Gzip);
    }
    // BZ2 magic: "BZh"
    if bytes_read >= 3 && &magic == b"BZh" {
        return Ok(CompressionFormat::Bzip2);
    }
    Ok(CompressionFormat::Plain)
}

/// Open a text file for buffered reading, decompressing if needed
pub fn open_reader<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let format = detect_compression(path)?;
    let file = File::open(path)?;

    let reader: Box<dyn BufRead> = match format {
        CompressionFormat::Gzip => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            flate2::read::MultiGzDecoder::new(file),
        )),
        CompressionFormat::Bzip2 => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            bzip2::read::BzDecoder::new(file),
        )),
        CompressionFormat::Plain => Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file)),
    };
    Ok(reader)
}

/// Line iterator that reuses a buffer to avoid allocations
pub struct LineIterator<R: BufRead> {
    reader: R,
    buffer: String,
}

impl<R: BufRead> LineIterator<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::with_capacity(1024),
        }
    }

    /// Read the next line into the internal buffer
    /// Returns None at EOF, Some(Ok(&str)) on success, Some(Err) on error
    pub fn next_line(&mut self) -> Option<io::Result<&str>> {
        self.buffer.clear();
        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                if self.buffer.ends_with('\n') {
                    self.buffer.pop();
                    if self.buffer.ends_with('\r') {
                        self.buffer.pop();
                    }
                }
                Some(Ok(&self.buffer))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Write a file in one go: content goes to `<path>.tmp` and is renamed
/// over `path` only after `write` succeeded and the buffer was flushed.
pub fn write_atomically<P, F>(path: P, write: F) -> io::Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let path = path.as_ref();
    let tmp_path = temp_sibling(path);

    let result = (|| {
        let mut writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, File::create(&tmp_path)?);
        write(&mut writer)?;
        writer.flush()?;
        Ok(())
    })();

    match result {
        Ok(()) => std::fs::rename(&tmp_path, path),
        Err(e) => {
            let _ = std::fs::remove_file(&tmp_path);
            Err(e)
        }
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
