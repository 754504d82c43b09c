//! # vcf-metadata
//!
//! A library for generating OpenCGA metadata configs for a single VCF.
//!
//! Loading a VCF into OpenCGA needs four documents describing the sample:
//! a manifest, the individual, the sample, and the clinical analysis. Most of
//! their content is fixed per assay; the identifiers come from the VCF's
//! structured file name.
//!
//! `vcf-metadata` fills those documents from bundled templates, assay-level
//! overrides, and the sample name, then bundles them into a zip archive.
//!
//! ## Features
//!
//! - **Sample name parsing**: Splits `INSTR-IND-CLARITY-EPIC-SEX-PROBESET` names,
//!   with optional per-field format validation
//! - **Caller detection**: Recognises the variant caller from header lines
//! - **Template population**: Shallow assay overrides, then required identifiers
//! - **Compressed input**: Reads headers from `.vcf`, `.vcf.gz`, and `.vcf.bgz`
//!
//! ## Example
//!
//! ```rust,no_run
//! use vcf_metadata::pipeline::{run, RunConfig};
//!
//! let config = RunConfig::new(
//!     vec!["INSTR1-IND2-CLAR3-EPIC4-F-PROBE5.vcf".into()],
//!     "assay_config.json",
//! )
//! .with_validate_name(true)
//! .with_output_dir("out");
//!
//! let output = run(&config).unwrap();
//! println!("{} ({})", output.archive.display(), output.caller);
//! ```
//!
//! ## Modules
//!
//! - [`parsing`]: VCF header reader and sample name parser
//! - [`core`]: Variant caller inference
//! - [`templates`]: Assay config, templates, and document population
//! - [`pipeline`]: End-to-end run and archive writing
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod parsing;
pub mod pipeline;
pub mod templates;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::caller::{infer_caller, VariantCaller};
pub use crate::parsing::samplename::{NamePatterns, SampleNameFields};
pub use crate::pipeline::{run, PipelineError, RunConfig, RunOutput};
pub use crate::templates::{AssayConfig, DocumentKind, TemplateSet};
