//! Centralized validation and naming helpers for input files.

use std::path::Path;

/// Security-related constants for input validation
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Suffix appended to the sample stem to name the output archive
pub const ARCHIVE_SUFFIX: &str = ".opencga_configs.zip";

/// Validation error types for input file names
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Filename too long: exceeds {MAX_FILENAME_LENGTH} characters")]
    FilenameTooLong,
    #[error("Invalid filename: contains path separators or control characters")]
    InvalidFilename,
    #[error("Empty filename provided")]
    EmptyFilename,
    #[error("Input path has no file name: {0}")]
    NoFileName(String),
}

/// Validate the file name of an input path and return it.
///
/// The file name becomes both the sample name and part of the archive name,
/// so it must be non-empty, of reasonable length, and free of control
/// characters.
///
/// # Errors
///
/// Returns `ValidationError::NoFileName` if the path has no final component,
/// `ValidationError::EmptyFilename` if it is blank,
/// `ValidationError::FilenameTooLong` if it exceeds the limit, or
/// `ValidationError::InvalidFilename` if it contains invalid characters.
pub fn input_file_name(path: &Path) -> Result<String, ValidationError> {
    let name = path
        .file_name()
        .ok_or_else(|| ValidationError::NoFileName(path.display().to_string()))?
        .to_string_lossy()
        .into_owned();

    validate_filename(&name)?;
    Ok(name)
}

/// Validate a bare file name
///
/// # Errors
///
/// See [`input_file_name`].
pub fn validate_filename(filename: &str) -> Result<(), ValidationError> {
    if filename.trim().is_empty() {
        return Err(ValidationError::EmptyFilename);
    }

    if filename.len() > MAX_FILENAME_LENGTH {
        return Err(ValidationError::FilenameTooLong);
    }

    if filename.contains('/') || filename.contains('\\') || filename.chars().any(char::is_control)
    {
        return Err(ValidationError::InvalidFilename);
    }

    Ok(())
}

/// Strip compression and `.vcf` suffixes from a file name.
///
/// Suffixes match case-insensitively, as in `FileFormat::from_path`.
///
/// # Examples
///
/// ```
/// use vcf_metadata::utils::validation::sample_stem;
///
/// assert_eq!(sample_stem("A-B-C-D-E-F.vcf"), "A-B-C-D-E-F");
/// assert_eq!(sample_stem("A-B-C-D-E-F.vcf.gz"), "A-B-C-D-E-F");
/// assert_eq!(sample_stem("A-B-C-D-E-F.VCF.GZ"), "A-B-C-D-E-F");
/// assert_eq!(sample_stem("A-B-C-D-E-F"), "A-B-C-D-E-F");
/// ```
#[must_use]
pub fn sample_stem(file_name: &str) -> &str {
    let stem = strip_suffix_ignore_case(file_name, ".gz")
        .or_else(|| strip_suffix_ignore_case(file_name, ".bgz"))
        .unwrap_or(file_name);
    strip_suffix_ignore_case(stem, ".vcf").unwrap_or(stem)
}

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    let tail = name.get(split..)?;
    tail.eq_ignore_ascii_case(suffix).then(|| &name[..split])
}

/// Archive name for a sample stem, e.g. `NAME.opencga_configs.zip`
#[must_use]
pub fn archive_name(stem: &str) -> String {
    format!("{stem}{ARCHIVE_SUFFIX}")
}
