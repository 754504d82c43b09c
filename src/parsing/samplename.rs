//! Parser for structured sample names.
//!
//! Sample names are six `-` separated fields, taken from the VCF file name:
//!
//! ```text
//! INSTR1-IND2-CLAR3-EPIC4-F-PROBE5
//! ^      ^    ^     ^     ^ ^
//! |      |    |     |     | probeset
//! |      |    |     |     sex
//! |      |    |     epic code
//! |      |    clarity ID
//! |      individual ID
//! instrument ID
//! ```
//!
//! Per-position formats are assay specific and come from configuration. The
//! default [`NamePatterns`] accepts any content, so enabling validation with
//! the defaults only checks the field count.

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Delimiter between sample name fields
pub const NAME_DELIMITER: char = '-';

/// Number of fields in a well-formed sample name
pub const NAME_FIELD_COUNT: usize = 6;

#[derive(Error, Debug)]
pub enum NameError {
    #[error("Sample name '{name}' has incorrect number of fields: expected 6, found {found}")]
    MalformedName { name: String, found: usize },

    #[error("Error(s) in sample name format: {}", .0.join(", "))]
    FieldFormat(Vec<String>),

    #[error("Invalid pattern for sample name field {position}: {source}")]
    InvalidPattern {
        position: usize,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid sample name field position '{0}': expected 1-6")]
    UnknownPosition(String),
}

/// Required format for each sample name field, keyed by 1-based position.
///
/// Deserializes from a mapping of position to regular expression. Positions
/// left out, or given an empty pattern, accept any content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct NamePatterns {
    patterns: Vec<Option<Regex>>,
}

impl Default for NamePatterns {
    fn default() -> Self {
        Self {
            patterns: vec![None; NAME_FIELD_COUNT],
        }
    }
}

impl NamePatterns {
    /// Build patterns from `(position, regex)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `NameError::UnknownPosition` for positions outside 1-6, or
    /// `NameError::InvalidPattern` if a pattern does not compile.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, NameError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut patterns = Self::default();
        for (key, value) in pairs {
            let key = key.as_ref();
            let position = key
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|p| (1..=NAME_FIELD_COUNT).contains(p))
                .ok_or_else(|| NameError::UnknownPosition(key.to_string()))?;

            let value = value.as_ref();
            patterns.patterns[position - 1] = if value.is_empty() {
                None
            } else {
                Some(
                    Regex::new(value)
                        .map_err(|source| NameError::InvalidPattern { position, source })?,
                )
            };
        }
        Ok(patterns)
    }

    /// Pattern text for a 1-based field position, empty when unrestricted
    #[cfg(test)]
    pub(crate) fn pattern(&self, position: usize) -> Option<&str> {
        let slot = self.patterns.get(position.checked_sub(1)?)?;
        Some(slot.as_ref().map_or("", Regex::as_str))
    }

    /// Whether `field` satisfies the pattern at a 1-based position.
    /// Matching is an unanchored search; anchor the pattern to match whole fields.
    #[must_use]
    pub fn matches(&self, position: usize, field: &str) -> bool {
        match position.checked_sub(1).and_then(|i| self.patterns.get(i)) {
            Some(Some(re)) => re.is_match(field),
            _ => true,
        }
    }

    /// True when no position is restricted, i.e. validation only checks arity
    #[must_use]
    pub fn is_permissive(&self) -> bool {
        self.patterns.iter().all(Option::is_none)
    }
}

impl TryFrom<BTreeMap<String, String>> for NamePatterns {
    type Error = NameError;

    fn try_from(map: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        Self::from_pairs(map)
    }
}

impl From<NamePatterns> for BTreeMap<String, String> {
    fn from(patterns: NamePatterns) -> Self {
        patterns
            .patterns
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let pattern = p.as_ref().map_or("", Regex::as_str);
                ((i + 1).to_string(), pattern.to_string())
            })
            .collect()
    }
}

/// Split a sample name into its fields, optionally validating them.
///
/// With `validate` disabled the raw split is returned whatever its length.
/// With it enabled the name must have exactly six fields, and every field
/// that fails its pattern is reported together in a single error.
///
/// # Errors
///
/// Returns `NameError::MalformedName` if validation is enabled and the field
/// count is wrong, or `NameError::FieldFormat` naming every offending field.
pub fn parse_samplename(
    name: &str,
    validate: bool,
    patterns: &NamePatterns,
) -> Result<Vec<String>, NameError> {
    let fields: Vec<String> = name.split(NAME_DELIMITER).map(str::to_string).collect();

    if !validate {
        return Ok(fields);
    }

    if fields.len() != NAME_FIELD_COUNT {
        return Err(NameError::MalformedName {
            name: name.to_string(),
            found: fields.len(),
        });
    }

    let errors: Vec<String> = fields
        .iter()
        .enumerate()
        .filter(|(i, field)| !patterns.matches(i + 1, field))
        .map(|(_, field)| field.clone())
        .collect();

    if !errors.is_empty() {
        return Err(NameError::FieldFormat(errors));
    }

    Ok(fields)
}

/// The six named fields of a sample name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleNameFields {
    pub instrument_id: String,
    pub individual_id: String,
    pub clarity_id: String,
    pub epic_code: String,
    pub sex: String,
    pub probeset: String,
}

impl SampleNameFields {
    /// Parse a sample name into its six named fields.
    ///
    /// Validation follows [`parse_samplename`]. Even when validation is
    /// disabled the split must still produce six fields to be named.
    ///
    /// # Errors
    ///
    /// Returns any error from [`parse_samplename`], or
    /// `NameError::MalformedName` if the split does not have six fields.
    pub fn parse(name: &str, validate: bool, patterns: &NamePatterns) -> Result<Self, NameError> {
        let fields = parse_samplename(name, validate, patterns)?;
        Self::from_fields(name, fields)
    }

    /// Name the fields of an already split sample name.
    ///
    /// # Errors
    ///
    /// Returns `NameError::MalformedName` unless there are exactly six fields.
    pub fn from_fields(name: &str, fields: Vec<String>) -> Result<Self, NameError> {
        let found = fields.len();
        let Ok([instrument_id, individual_id, clarity_id, epic_code, sex, probeset]) =
            <[String; NAME_FIELD_COUNT]>::try_from(fields)
        else {
            return Err(NameError::MalformedName {
                name: name.to_string(),
                found,
            });
        };

        Ok(Self {
            instrument_id,
            individual_id,
            clarity_id,
            epic_code,
            sex,
            probeset,
        })
    }

    /// Fields in sample name order
    #[must_use]
    pub fn as_array(&self) -> [&str; NAME_FIELD_COUNT] {
        [
            &self.instrument_id,
            &self.individual_id,
            &self.clarity_id,
            &self.epic_code,
            &self.sex,
            &self.probeset,
        ]
    }
}

impl fmt::Display for SampleNameFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_array().join("-"))
    }
}
