//! Reader for the leading comment lines of a VCF.
//!
//! Only the header is read: lines are yielded while they start with `#` and
//! reading stops at the first record line. Records are never parsed.
//!
//! Supported extensions:
//! - `.vcf` (uncompressed)
//! - `.vcf.gz`, `.vcf.bgz` (gzip or bgzip compressed)

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;

/// Marker that starts every header line
pub const COMMENT_MARKER: char = '#';

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported file format, not a vcf: {0}")]
    UnsupportedFormat(String),
}

/// Compression mode of an input VCF, inferred from its suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Vcf,
    VcfGz,
}

impl FileFormat {
    /// Classify a path by its suffix.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnsupportedFormat` when the name ends in neither
    /// `.vcf` nor `.vcf.gz`/`.vcf.bgz`.
    #[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        let name = path.to_string_lossy().to_lowercase();

        if name.ends_with(".vcf.gz") || name.ends_with(".vcf.bgz") {
            Ok(Self::VcfGz)
        } else if name.ends_with(".vcf") {
            Ok(Self::Vcf)
        } else {
            Err(ParseError::UnsupportedFormat(path.display().to_string()))
        }
    }

    #[must_use]
    pub fn is_compressed(self) -> bool {
        matches!(self, Self::VcfGz)
    }
}

/// Lazy iterator over the header lines of an open stream.
///
/// Owns the underlying reader, so the file is closed as soon as the iterator
/// is dropped, whether it ran to completion or not.
pub struct HeaderLines<R> {
    reader: R,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> HeaderLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for HeaderLines<R> {
    type Item = Result<String, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                let line = String::from_utf8_lossy(&self.buf);
                let line = line.trim_end_matches(['\n', '\r']);
                if line.starts_with(COMMENT_MARKER) {
                    Some(Ok(line.to_string()))
                } else {
                    // First record line ends the header and is discarded
                    self.done = true;
                    None
                }
            }
            Err(e) => {
                self.done = true;
                Some(Err(e.into()))
            }
        }
    }
}

/// Open a VCF and return a lazy iterator over its header lines
///
/// # Errors
///
/// Returns `ParseError::UnsupportedFormat` for unknown suffixes or
/// `ParseError::Io` if the file cannot be opened.
pub fn open_header(path: &Path) -> Result<HeaderLines<Box<dyn BufRead>>, ParseError> {
    let format = FileFormat::from_path(path)?;
    let file = File::open(path)?;

    let reader: Box<dyn Read> = if format.is_compressed() {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };

    Ok(HeaderLines::new(Box::new(BufReader::new(reader))))
}

/// Read all header lines of a VCF
///
/// # Errors
///
/// Returns `ParseError::UnsupportedFormat` for unknown suffixes or
/// `ParseError::Io` if the file cannot be read or decompressed.
pub fn read_header(path: &Path) -> Result<Vec<String>, ParseError> {
    open_header(path)?.collect()
}
