use std::collections::BTreeMap;
use std::path::Path;

use isoenum_codec::{Domain, ShortCode};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One catalog row as handed over by a source parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Primary short code (alpha-3 for every shipped catalog)
    pub primary: String,

    /// Secondary short code (alpha-2), blank when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,

    /// Small numeric code (ISO 4217 / ISO 3166 numeric)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric: Option<u32>,

    /// Display name
    pub name: String,

    /// Free-form attributes used only for documentation
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl CatalogRecord {
    pub fn new(primary: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: None,
            numeric: None,
            name: name.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Builder: set the secondary code
    #[must_use]
    pub fn secondary(mut self, code: impl Into<String>) -> Self {
        self.secondary = Some(code.into());
        self
    }

    /// Builder: set the numeric code
    #[must_use]
    pub const fn numeric(mut self, numeric: u32) -> Self {
        self.numeric = Some(numeric);
        self
    }

    /// Builder: add a metadata attribute
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn primary_code(&self) -> &str {
        self.primary.trim()
    }

    /// Secondary code, `None` when missing or blank
    #[must_use]
    pub fn secondary_code(&self) -> Option<&str> {
        self.secondary
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }

    /// Text the identifier is built from: the `inverted_name` attribute
    /// (e.g. "Greek, Ancient") when present, the display name otherwise.
    #[must_use]
    pub fn identifier_source(&self) -> &str {
        self.meta("inverted_name").unwrap_or(&self.name)
    }

    /// Metadata attribute, `None` when missing or blank
    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Codec input for this record; the numeric code is only packed where
    /// the domain layout has room for it.
    pub fn short_code(&self, domain: Domain) -> isoenum_codec::Result<ShortCode> {
        let numeric = if domain.layout().has_numeric() {
            self.numeric
        } else {
            None
        };
        ShortCode::from_parts(self.primary_code(), self.secondary_code(), numeric)
    }
}

/// Reads a catalog exported as a JSON array of records.
pub fn read_catalog(path: impl AsRef<Path>) -> Result<Vec<CatalogRecord>> {
    let bytes = std::fs::read(path.as_ref())?;
    Ok(serde_json::from_slice(&bytes)?)
}
