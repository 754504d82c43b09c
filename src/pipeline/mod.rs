//! End-to-end generation of the metadata archive for one VCF.
//!
//! [`run`] is the single entry point. It takes every input explicitly through
//! [`RunConfig`] and performs, in order:
//!
//! 1. Resolve the input VCF (the first of those given)
//! 2. Read its header and infer the variant caller
//! 3. Load the assay config, which also carries the sample name format
//! 4. Parse the sample name from the file name
//! 5. Load the document templates, then populate and write all four
//! 6. Zip them into `<stem>.opencga_configs.zip`
//!
//! Any failure aborts the run. Documents are staged in a temporary directory
//! that is removed on every exit path, and the archive only appears once it
//! is complete.
//!
//! ## Example
//!
//! ```rust,no_run
//! use vcf_metadata::pipeline::{run, RunConfig};
//!
//! let config = RunConfig::new(
//!     vec!["INSTR1-IND2-CLAR3-EPIC4-F-PROBE5.vcf.gz".into()],
//!     "assay_config.json",
//! );
//! let output = run(&config).unwrap();
//! println!("{}", output.archive.display());
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::TempDir;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::caller::{infer_caller, VariantCaller};
use crate::parsing::header::{read_header, ParseError};
use crate::parsing::samplename::{NameError, SampleNameFields};
use crate::templates::{populate, AssayConfig, DocumentKind, TemplateError, TemplateSet};
use crate::utils::validation::{archive_name, input_file_name, sample_stem, ValidationError};

pub mod archive;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("No input VCF provided")]
    NoInput,

    #[error(transparent)]
    Header(#[from] ParseError),

    #[error(transparent)]
    Name(#[from] NameError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write archive: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Inputs for one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Input VCFs; only the first is used
    pub vcfs: Vec<PathBuf>,

    /// Assay config (JSON, or YAML by extension)
    pub assay_config: PathBuf,

    /// Validate sample name fields against the assay's name format
    pub validate_name: bool,

    /// Directory of replacement templates; bundled templates when `None`
    pub template_dir: Option<PathBuf>,

    /// Directory the archive is written to
    pub output_dir: PathBuf,

    /// Also copy the four documents into `output_dir` once the archive is written
    pub keep_documents: bool,
}

impl RunConfig {
    pub fn new(vcfs: Vec<PathBuf>, assay_config: impl Into<PathBuf>) -> Self {
        Self {
            vcfs,
            assay_config: assay_config.into(),
            validate_name: false,
            template_dir: None,
            output_dir: PathBuf::from("."),
            keep_documents: false,
        }
    }

    #[must_use]
    pub fn with_validate_name(mut self, validate: bool) -> Self {
        self.validate_name = validate;
        self
    }

    #[must_use]
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_keep_documents(mut self, keep: bool) -> Self {
        self.keep_documents = keep;
        self
    }
}

/// Result of a successful run
#[derive(Debug, Clone, Serialize)]
pub struct RunOutput {
    /// Path of the written archive
    pub archive: PathBuf,

    /// Sample name fields parsed from the VCF file name
    pub sample: SampleNameFields,

    /// Inferred variant caller. Informational only, not written to any document
    pub caller: VariantCaller,

    /// Number of header lines read from the VCF
    pub header_lines: usize,
}

/// Select the VCF to process, warning about any that are ignored
///
/// # Errors
///
/// Returns `PipelineError::NoInput` if `vcfs` is empty.
pub fn resolve_input(vcfs: &[PathBuf]) -> Result<&Path, PipelineError> {
    let (first, rest) = vcfs.split_first().ok_or(PipelineError::NoInput)?;

    if !rest.is_empty() {
        warn!(
            "{} VCFs given, using only the first: {}",
            vcfs.len(),
            first.display()
        );
    }

    Ok(first)
}

/// Generate the metadata archive for the first VCF in `config`
///
/// # Errors
///
/// Returns the first error encountered; see [`PipelineError`]. No archive is
/// written when an error is returned.
pub fn run(config: &RunConfig) -> Result<RunOutput, PipelineError> {
    let vcf = resolve_input(&config.vcfs)?;
    let file_name = input_file_name(vcf)?;
    let stem = sample_stem(&file_name);

    info!("Reading header from: {}", vcf.display());
    let header = read_header(vcf)?;
    info!("Size of header parsed from vcf: {}", header.len());

    let caller = infer_caller(&header);
    if caller.is_known() {
        info!("Variant caller identified from vcf: {caller}");
    } else {
        info!("Could not determine variant caller from header of vcf");
    }

    let assay = AssayConfig::load(&config.assay_config)?;
    debug!("Assay config: {assay:?}");
    let patterns = assay.name_patterns();
    if !config.validate_name {
        info!("Skipping sample name validation");
    } else if patterns.is_permissive() {
        warn!("No sample name format configured, validating field count only");
    }
    let sample = SampleNameFields::parse(stem, config.validate_name, &patterns)?;
    info!(
        "Sample {stem}: individual {}, instrument {}",
        sample.individual_id, sample.instrument_id
    );

    let templates = match &config.template_dir {
        Some(dir) => TemplateSet::load_from_dir(dir)?,
        None => TemplateSet::load_embedded()?,
    };

    std::fs::create_dir_all(&config.output_dir)?;

    // Staging is removed on drop, whether or not the run succeeds
    let staging = TempDir::new_in(&config.output_dir)?;

    let mut written = Vec::with_capacity(DocumentKind::ALL.len());
    for kind in DocumentKind::ALL {
        let document = populate(kind, &assay, templates.get(kind).clone(), &sample)?;
        written.push(document.write_to(staging.path())?);
    }

    let archive = config.output_dir.join(archive_name(stem));
    archive::write_archive(&archive, &written)?;
    info!("Wrote {}", archive.display());

    if config.keep_documents {
        keep_documents(&written, &config.output_dir)?;
    }

    Ok(RunOutput {
        archive,
        sample,
        caller,
        header_lines: header.len(),
    })
}

/// Copy staged documents next to the archive, replacing existing files
fn keep_documents(staged: &[PathBuf], output_dir: &Path) -> Result<(), PipelineError> {
    for path in staged {
        if let Some(name) = path.file_name() {
            std::fs::copy(path, output_dir.join(name))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_input() {
        let vcfs = vec![PathBuf::from("a.vcf"), PathBuf::from("b.vcf")];
        assert_eq!(resolve_input(&vcfs).unwrap(), Path::new("a.vcf"));

        assert!(matches!(resolve_input(&[]), Err(PipelineError::NoInput)));
    }

    #[test]
    fn test_run_config_builder() {
        let config = RunConfig::new(vec!["s.vcf".into()], "assay.json")
            .with_validate_name(true)
            .with_template_dir("templates")
            .with_output_dir("out")
            .with_keep_documents(true);

        assert!(config.validate_name);
        assert!(config.keep_documents);
        assert_eq!(config.template_dir, Some(PathBuf::from("templates")));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.assay_config, PathBuf::from("assay.json"));
    }

    #[test]
    fn test_run_without_input() {
        let config = RunConfig::new(Vec::new(), "assay.json");
        assert!(matches!(run(&config), Err(PipelineError::NoInput)));
    }
}
