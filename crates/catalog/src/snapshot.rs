//! Versioned sidecar listing every identifier a generation published.
//!
//! ```json
//! {
//!   "schema_version": 1,
//!   "domain": "currency",
//!   "entries": [
//!     { "name": "Bulgarian_Lev", "value": 1770128335, "obsolete": "Replaced by Euro" }
//!   ]
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use isoenum_codec::Domain;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// One published identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub name: String,
    pub value: i32,
    /// Obsolescence notice at publication time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obsolete: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

impl SnapshotEntry {
    pub fn new(name: impl Into<String>, value: i32) -> Self {
        Self {
            name: name.into(),
            value,
            obsolete: None,
            documentation: None,
        }
    }
}

/// Identifiers committed by the previous generation of one domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedSnapshot {
    domain: Domain,
    entries: BTreeMap<String, SnapshotEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PersistedSnapshot {
    schema_version: u32,
    domain: Domain,
    entries: Vec<SnapshotEntry>,
}

impl PublishedSnapshot {
    /// Snapshot of a domain that was never generated
    #[must_use]
    pub const fn empty(domain: Domain) -> Self {
        Self {
            domain,
            entries: BTreeMap::new(),
        }
    }

    /// Builds a snapshot, rejecting repeated names or values.
    pub fn new(domain: Domain, entries: impl IntoIterator<Item = SnapshotEntry>) -> Result<Self> {
        let mut by_name = BTreeMap::new();
        let mut by_value: HashMap<i32, String> = HashMap::new();
        for entry in entries {
            if let Some(first) = by_value.insert(entry.value, entry.name.clone()) {
                return Err(CatalogError::snapshot(format!(
                    "{domain} snapshot lists {first} and {} with the value {}",
                    entry.name, entry.value
                )));
            }
            if by_name.contains_key(&entry.name) {
                return Err(CatalogError::snapshot(format!(
                    "{domain} snapshot lists {} twice",
                    entry.name
                )));
            }
            by_name.insert(entry.name.clone(), entry);
        }
        Ok(Self {
            domain,
            entries: by_name,
        })
    }

    /// Convenience constructor from `(name, value)` pairs
    pub fn from_pairs<N: Into<String>>(
        domain: Domain,
        pairs: impl IntoIterator<Item = (N, i32)>,
    ) -> Result<Self> {
        Self::new(
            domain,
            pairs
                .into_iter()
                .map(|(name, value)| SnapshotEntry::new(name, value)),
        )
    }

    /// Caller guarantees names and values are already unique.
    pub(crate) fn from_validated(
        domain: Domain,
        entries: impl IntoIterator<Item = SnapshotEntry>,
    ) -> Self {
        Self {
            domain,
            entries: entries
                .into_iter()
                .map(|entry| (entry.name.clone(), entry))
                .collect(),
        }
    }

    pub fn from_json_str(domain: Domain, json: &str) -> Result<Self> {
        let persisted: PersistedSnapshot = serde_json::from_str(json)?;
        if persisted.schema_version != SNAPSHOT_SCHEMA_VERSION {
            return Err(CatalogError::snapshot(format!(
                "Unsupported snapshot schema_version {} (expected {SNAPSHOT_SCHEMA_VERSION})",
                persisted.schema_version
            )));
        }
        if persisted.domain != domain {
            return Err(CatalogError::snapshot(format!(
                "snapshot belongs to {}, expected {domain}",
                persisted.domain
            )));
        }
        Self::new(domain, persisted.entries)
    }

    /// Loads the sidecar at `path`; a missing file means nothing was
    /// published yet.
    pub fn load(domain: Domain, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json_str(domain, &json),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "No {domain} snapshot at {}, treating as first generation",
                    path.display()
                );
                Ok(Self::empty(domain))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn to_json_string(&self) -> Result<String> {
        let persisted = PersistedSnapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            domain: self.domain,
            entries: self.entries.values().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&persisted)?)
    }

    /// Writes the sidecar through a temporary file and a rename.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = self.to_json_string()?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    #[must_use]
    pub const fn domain(&self) -> Domain {
        self.domain
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SnapshotEntry> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Entries in name order
    pub fn entries(&self) -> impl Iterator<Item = &SnapshotEntry> {
        self.entries.values()
    }
}

#[must_use]
pub fn snapshot_path(out_dir: &Path, domain: Domain) -> PathBuf {
    out_dir.join(format!("{domain}.snapshot.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn save_and_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let path = snapshot_path(tmp.path(), Domain::Currency);

        let mut lev = SnapshotEntry::new("Bulgarian_Lev", 1_770_128_335);
        lev.obsolete = Some("Replaced by Euro".to_string());
        let snapshot = PublishedSnapshot::new(
            Domain::Currency,
            vec![SnapshotEntry::new("Euro", -1_928_854_574), lev],
        )
        .unwrap();
        snapshot.save(&path).unwrap();

        let loaded = PublishedSnapshot::load(Domain::Currency, &path).unwrap();
        assert_eq!(loaded, snapshot);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn missing_file_is_empty_snapshot() {
        let tmp = TempDir::new().unwrap();
        let loaded =
            PublishedSnapshot::load(Domain::Language, tmp.path().join("nope.json")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn rejects_foreign_domain_and_schema() {
        let json = r#"{"schema_version": 1, "domain": "country", "entries": []}"#;
        assert!(matches!(
            PublishedSnapshot::from_json_str(Domain::Currency, json),
            Err(CatalogError::Snapshot(_))
        ));

        let json = r#"{"schema_version": 9, "domain": "currency", "entries": []}"#;
        assert!(matches!(
            PublishedSnapshot::from_json_str(Domain::Currency, json),
            Err(CatalogError::Snapshot(_))
        ));
    }

    #[test]
    fn rejects_repeated_names_and_values() {
        assert!(PublishedSnapshot::from_pairs(Domain::Language, [("A", 1), ("A", 3)]).is_err());
        assert!(PublishedSnapshot::from_pairs(Domain::Language, [("A", 1), ("B", 1)]).is_err());
    }
}
