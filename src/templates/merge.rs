//! Population of document templates.
//!
//! Each `populate_*` function takes a skeleton by value and returns the
//! populated document. Population runs in two fixed steps:
//!
//! 1. The matching assay config section is merged into the document's top
//!    level (for `samples`, into its single element). The merge is shallow:
//!    a config key replaces the whole template value under that key.
//! 2. Required identifier fields are overwritten unconditionally.
//!
//! Missing intermediate mappings on a required path are created. A value of
//! the wrong type on a required path is a [`TemplateError::Shape`] error.

use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tracing::debug;

use super::{AssayConfig, DocumentKind, TemplateError};
use crate::parsing::samplename::SampleNameFields;

/// A populated document ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub kind: DocumentKind,
    pub value: Value,
}

impl Document {
    /// Serialize the document as YAML
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Yaml` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, TemplateError> {
        Ok(serde_yaml::to_string(&self.value)?)
    }

    /// Write the document to `<dir>/<kind>.yaml`, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Yaml` if serialization fails or
    /// `TemplateError::Io` if the file cannot be written.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, TemplateError> {
        let path = dir.join(self.kind.file_name());
        let yaml = self.to_yaml()?;
        std::fs::write(&path, yaml).map_err(|source| TemplateError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Populate the template for `kind` using the identifiers in `name`
///
/// # Errors
///
/// Returns `TemplateError::Shape` if the template or config leaves a
/// required path with a value of the wrong type.
pub fn populate(
    kind: DocumentKind,
    config: &AssayConfig,
    template: Value,
    name: &SampleNameFields,
) -> Result<Document, TemplateError> {
    match kind {
        DocumentKind::Manifest => populate_manifest(config, template),
        DocumentKind::Individuals => {
            populate_individuals(config, template, &name.individual_id, &name.sex)
        }
        DocumentKind::Samples => {
            populate_samples(config, template, &name.individual_id, &name.instrument_id)
        }
        DocumentKind::Clinical => {
            populate_clinical(config, template, &name.individual_id, &name.instrument_id)
        }
    }
}

/// Manifest has no required fields; only the config override applies
///
/// # Errors
///
/// Returns `TemplateError::Shape` if the template is not a mapping.
pub fn populate_manifest(config: &AssayConfig, template: Value) -> Result<Document, TemplateError> {
    let kind = DocumentKind::Manifest;
    let mut value = template;

    let root = as_mapping(&mut value, kind, "")?;
    apply_section(root, config, kind);

    finish(kind, value)
}

/// Set `id`, `name` and `sex.id` on the individuals document
///
/// # Errors
///
/// Returns `TemplateError::Shape` if the template is not a mapping or `sex`
/// is not a mapping after the override.
pub fn populate_individuals(
    config: &AssayConfig,
    template: Value,
    individual_id: &str,
    sex: &str,
) -> Result<Document, TemplateError> {
    let kind = DocumentKind::Individuals;
    let mut value = template;

    let root = as_mapping(&mut value, kind, "")?;
    apply_section(root, config, kind);

    set(root, "id", individual_id);
    set(root, "name", individual_id);
    let sex_map = child_mapping(root, "sex", kind, "sex")?;
    set(sex_map, "id", sex);

    finish(kind, value)
}

/// Set `[0].id` and `[0].individualId` on the samples document
///
/// # Errors
///
/// Returns `TemplateError::Shape` if the template is not a list whose first
/// element is a mapping.
pub fn populate_samples(
    config: &AssayConfig,
    template: Value,
    individual_id: &str,
    sample_id: &str,
) -> Result<Document, TemplateError> {
    let kind = DocumentKind::Samples;
    let mut value = template;

    let sample = first_mapping(&mut value, kind, "[0]")?;
    apply_section(sample, config, kind);

    set(sample, "id", sample_id);
    set(sample, "individualId", individual_id);

    finish(kind, value)
}

/// Set `id`, `proband.id` and `proband.samples[0].id` on the clinical document
///
/// # Errors
///
/// Returns `TemplateError::Shape` if any value along those paths has the
/// wrong type after the override.
pub fn populate_clinical(
    config: &AssayConfig,
    template: Value,
    individual_id: &str,
    sample_id: &str,
) -> Result<Document, TemplateError> {
    let kind = DocumentKind::Clinical;
    let mut value = template;

    let root = as_mapping(&mut value, kind, "")?;
    apply_section(root, config, kind);

    set(root, "id", individual_id);
    let proband = child_mapping(root, "proband", kind, "proband")?;
    set(proband, "id", individual_id);

    let samples = proband
        .entry(Value::from("samples"))
        .or_insert(Value::Null);
    let sample = first_mapping(samples, kind, "proband.samples[0]")?;
    set(sample, "id", sample_id);

    finish(kind, value)
}

/// Shallow merge of the config section for `kind`; last write wins
fn apply_section(target: &mut Mapping, config: &AssayConfig, kind: DocumentKind) {
    if let Some(section) = config.section(kind) {
        for (key, value) in section {
            target.insert(key.clone(), value.clone());
        }
    }
}

fn set(target: &mut Mapping, key: &str, value: &str) {
    target.insert(Value::from(key), Value::from(value));
}

fn finish(kind: DocumentKind, value: Value) -> Result<Document, TemplateError> {
    let document = Document { kind, value };
    debug!("Populated {}: {:?}", kind.file_name(), document.value);
    Ok(document)
}

/// View `value` as a mapping, turning null into an empty mapping
fn as_mapping<'a>(
    value: &'a mut Value,
    kind: DocumentKind,
    path: &str,
) -> Result<&'a mut Mapping, TemplateError> {
    if value.is_null() {
        *value = Value::Mapping(Mapping::new());
    }
    value.as_mapping_mut().ok_or_else(|| shape(kind, path, "a mapping"))
}

fn child_mapping<'a>(
    parent: &'a mut Mapping,
    key: &str,
    kind: DocumentKind,
    path: &str,
) -> Result<&'a mut Mapping, TemplateError> {
    let child = parent.entry(Value::from(key)).or_insert(Value::Null);
    as_mapping(child, kind, path)
}

/// First element of a list as a mapping, creating the list or element if absent
fn first_mapping<'a>(
    value: &'a mut Value,
    kind: DocumentKind,
    path: &str,
) -> Result<&'a mut Mapping, TemplateError> {
    if value.is_null() {
        *value = Value::Sequence(Vec::new());
    }
    let seq = value
        .as_sequence_mut()
        .ok_or_else(|| shape(kind, path, "a list"))?;
    if seq.is_empty() {
        seq.push(Value::Mapping(Mapping::new()));
    }
    as_mapping(&mut seq[0], kind, path)
}

fn shape(kind: DocumentKind, path: &str, expected: &'static str) -> TemplateError {
    TemplateError::Shape {
        kind,
        path: path.to_string(),
        expected,
    }
}
