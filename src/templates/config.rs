//! Assay configuration: per-document overrides plus the sample name format.
//!
//! ```json
//! {
//!   "manifest": {"study": {"id": "myeloid"}},
//!   "individuals": {"lifeStatus": "ALIVE"},
//!   "samples": {"somatic": true},
//!   "clinical": {"type": "CANCER"},
//!   "sample_name_format": {"2": "^\\d{9}$", "5": "^[MFU]$"}
//! }
//! ```
//!
//! Every key is optional. A section set to `null` is treated as absent.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

use super::{DocumentKind, TemplateError};
use crate::parsing::samplename::NamePatterns;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssayConfig {
    #[serde(default)]
    pub manifest: Option<Mapping>,

    #[serde(default)]
    pub individuals: Option<Mapping>,

    #[serde(default)]
    pub samples: Option<Mapping>,

    #[serde(default)]
    pub clinical: Option<Mapping>,

    /// Required format per sample name field, keyed by 1-based position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_name_format: Option<NamePatterns>,
}

impl AssayConfig {
    /// Load an assay config, as YAML for `.yaml`/`.yml` files and JSON otherwise
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Io` if the file cannot be read, or
    /// `TemplateError::Json`/`TemplateError::Yaml` if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let content = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match ext.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Parse an assay config from JSON
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Json` if the text is not a valid config.
    pub fn from_json(json: &str) -> Result<Self, TemplateError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse an assay config from YAML
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Yaml` if the text is not a valid config.
    pub fn from_yaml(yaml: &str) -> Result<Self, TemplateError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Override section for a document kind, if present
    #[must_use]
    pub fn section(&self, kind: DocumentKind) -> Option<&Mapping> {
        match kind {
            DocumentKind::Manifest => self.manifest.as_ref(),
            DocumentKind::Individuals => self.individuals.as_ref(),
            DocumentKind::Samples => self.samples.as_ref(),
            DocumentKind::Clinical => self.clinical.as_ref(),
        }
    }

    /// Sample name patterns, defaulting to unrestricted fields
    #[must_use]
    pub fn name_patterns(&self) -> NamePatterns {
        self.sample_name_format.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    #[test]
    fn test_from_json_all_sections() {
        let config = AssayConfig::from_json(
            r#"{
                "manifest": {"study": {"id": "myeloid"}},
                "individuals": {"lifeStatus": "ALIVE"},
                "samples": {"somatic": true},
                "clinical": {"type": "CANCER", "priority": {"id": "URGENT"}},
                "sample_name_format": {"2": "^IND\\d+$"}
            }"#,
        )
        .unwrap();

        let samples = config.section(DocumentKind::Samples).unwrap();
        assert_eq!(samples.get("somatic"), Some(&Value::Bool(true)));

        let clinical = config.section(DocumentKind::Clinical).unwrap();
        assert_eq!(clinical.get("type"), Some(&Value::from("CANCER")));
        assert!(clinical.get("priority").is_some_and(Value::is_mapping));

        let patterns = config.name_patterns();
        assert_eq!(patterns.pattern(2), Some(r"^IND\d+$"));
        assert!(!patterns.is_permissive());
    }

    #[test]
    fn test_missing_and_null_sections_are_absent() {
        let config = AssayConfig::from_json(r#"{"manifest": null, "other": 1}"#).unwrap();
        for kind in DocumentKind::ALL {
            assert!(config.section(kind).is_none(), "{kind} should be absent");
        }
        assert!(config.name_patterns().is_permissive());
    }

    #[test]
    fn test_from_yaml() {
        let config = AssayConfig::from_yaml(
            "individuals:\n  lifeStatus: ALIVE\nsample_name_format:\n  5: '^[MF]$'\n",
        )
        .unwrap();
        assert!(config.section(DocumentKind::Individuals).is_some());
        assert_eq!(config.name_patterns().pattern(5), Some("^[MF]$"));
    }

    #[test]
    fn test_invalid_configs() {
        assert!(matches!(
            AssayConfig::from_json("{not json"),
            Err(TemplateError::Json(_))
        ));
        // Sections must be mappings
        assert!(AssayConfig::from_json(r#"{"samples": [1, 2]}"#).is_err());
        assert!(AssayConfig::from_json(r#"{"sample_name_format": {"9": "x"}}"#).is_err());
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("assay.json");
        std::fs::write(&json, r#"{"samples": {"somatic": false}}"#).unwrap();
        assert!(AssayConfig::load(&json)
            .unwrap()
            .section(DocumentKind::Samples)
            .is_some());

        let yaml = dir.path().join("assay.yml");
        std::fs::write(&yaml, "clinical:\n  type: SINGLE\n").unwrap();
        assert!(AssayConfig::load(&yaml)
            .unwrap()
            .section(DocumentKind::Clinical)
            .is_some());

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            AssayConfig::load(&missing),
            Err(TemplateError::Io { .. })
        ));
    }
}
