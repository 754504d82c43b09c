//! Metadata document templates and their population.
//!
//! Four documents are produced for every VCF:
//!
//! | Kind | Shape | Required fields |
//! |------|-------|-----------------|
//! | manifest | mapping | none |
//! | individuals | mapping | `id`, `name`, `sex.id` |
//! | samples | list of one mapping | `[0].id`, `[0].individualId` |
//! | clinical | mapping | `id`, `proband.id`, `proband.samples[0].id` |
//!
//! Skeletons for each kind are bundled from `templates/` at build time and
//! can be replaced by a directory of `<kind>.yaml` files. Population first
//! applies the matching [`AssayConfig`] section, then writes the required
//! fields, so assay overrides never replace sample identifiers.
//!
//! ## Example
//!
//! ```rust,no_run
//! use vcf_metadata::templates::{AssayConfig, DocumentKind, TemplateSet, populate};
//! use vcf_metadata::parsing::samplename::{NamePatterns, SampleNameFields};
//!
//! let templates = TemplateSet::load_embedded().unwrap();
//! let config = AssayConfig::from_json(r#"{"samples": {"somatic": true}}"#).unwrap();
//! let name = SampleNameFields::parse(
//!     "INSTR1-IND2-CLAR3-EPIC4-F-PROBE5",
//!     false,
//!     &NamePatterns::default(),
//! )
//! .unwrap();
//!
//! let samples = populate(
//!     DocumentKind::Samples,
//!     &config,
//!     templates.get(DocumentKind::Samples).clone(),
//!     &name,
//! )
//! .unwrap();
//! println!("{}", samples.to_yaml().unwrap());
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use thiserror::Error;

pub mod config;
pub mod merge;

pub use config::AssayConfig;
pub use merge::{
    populate, populate_clinical, populate_individuals, populate_manifest, populate_samples,
    Document,
};

/// File extension of every written document
pub const DOCUMENT_EXTENSION: &str = "yaml";

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Failed to read or write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template '{kind}' has unexpected shape at '{path}': expected {expected}")]
    Shape {
        kind: DocumentKind,
        path: String,
        expected: &'static str,
    },
}

/// The four metadata documents, in archive order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Manifest,
    Individuals,
    Samples,
    Clinical,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::Manifest,
        DocumentKind::Individuals,
        DocumentKind::Samples,
        DocumentKind::Clinical,
    ];

    /// Logical name, also the assay config section key
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Manifest => "manifest",
            Self::Individuals => "individuals",
            Self::Samples => "samples",
            Self::Clinical => "clinical",
        }
    }

    /// Name of the written document, e.g. `samples.yaml`
    #[must_use]
    pub fn file_name(self) -> String {
        format!("{}.{DOCUMENT_EXTENSION}", self.name())
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Skeleton documents for all four kinds
#[derive(Debug, Clone)]
pub struct TemplateSet {
    manifest: Value,
    individuals: Value,
    samples: Value,
    clinical: Value,
}

impl TemplateSet {
    /// Load the templates bundled with the binary
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Yaml` or `TemplateError::Shape` if a bundled
    /// template is invalid. `build.rs` rejects such templates at build time.
    pub fn load_embedded() -> Result<Self, TemplateError> {
        // Validated at compile time via build.rs
        const MANIFEST: &str = include_str!("../../templates/manifest.yaml");
        const INDIVIDUALS: &str = include_str!("../../templates/individuals.yaml");
        const SAMPLES: &str = include_str!("../../templates/samples.yaml");
        const CLINICAL: &str = include_str!("../../templates/clinical.yaml");

        Self::from_yaml(MANIFEST, INDIVIDUALS, SAMPLES, CLINICAL)
    }

    /// Load `<kind>.yaml` templates from a directory
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Io` if a template is missing or unreadable,
    /// `TemplateError::Yaml` if it is not valid YAML, or
    /// `TemplateError::Shape` if it does not have the expected shape.
    pub fn load_from_dir(dir: &Path) -> Result<Self, TemplateError> {
        let read = |kind: DocumentKind| -> Result<String, TemplateError> {
            let path = dir.join(kind.file_name());
            std::fs::read_to_string(&path).map_err(|source| TemplateError::Io { path, source })
        };

        Self::from_yaml(
            &read(DocumentKind::Manifest)?,
            &read(DocumentKind::Individuals)?,
            &read(DocumentKind::Samples)?,
            &read(DocumentKind::Clinical)?,
        )
    }

    /// Parse templates from YAML text
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Yaml` for invalid YAML or
    /// `TemplateError::Shape` for documents of the wrong shape.
    pub fn from_yaml(
        manifest: &str,
        individuals: &str,
        samples: &str,
        clinical: &str,
    ) -> Result<Self, TemplateError> {
        let set = Self {
            manifest: serde_yaml::from_str(manifest)?,
            individuals: serde_yaml::from_str(individuals)?,
            samples: serde_yaml::from_str(samples)?,
            clinical: serde_yaml::from_str(clinical)?,
        };

        for kind in DocumentKind::ALL {
            check_shape(kind, set.get(kind))?;
        }

        Ok(set)
    }

    /// Skeleton for one kind
    #[must_use]
    pub fn get(&self, kind: DocumentKind) -> &Value {
        match kind {
            DocumentKind::Manifest => &self.manifest,
            DocumentKind::Individuals => &self.individuals,
            DocumentKind::Samples => &self.samples,
            DocumentKind::Clinical => &self.clinical,
        }
    }
}

fn check_shape(kind: DocumentKind, value: &Value) -> Result<(), TemplateError> {
    let (ok, expected) = match kind {
        DocumentKind::Samples => (
            value
                .as_sequence()
                .is_some_and(|seq| seq.first().map_or(true, Value::is_mapping)),
            "a list of one mapping",
        ),
        _ => (value.is_mapping(), "a mapping"),
    };

    if ok {
        Ok(())
    } else {
        Err(TemplateError::Shape {
            kind,
            path: String::new(),
            expected,
        })
    }
}
