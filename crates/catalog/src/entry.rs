use std::collections::{HashMap, HashSet};

use isoenum_codec::{Domain, Sentinel};
use serde::Serialize;

use crate::error::{CatalogError, Result};
use crate::snapshot::{PublishedSnapshot, SnapshotEntry};

/// Ordering key of sentinels; they emit ahead of every catalog entry.
pub const SENTINEL_ORDER: i32 = -1;

/// Ordering key of catalog entries, live or retired.
pub const ENTRY_ORDER: i32 = 0;

/// One identifier of a generated enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthesizedEntry {
    name: String,
    value: i32,
    documentation: String,
    obsolescence: Option<String>,
    ordering_key: i32,
}

impl SynthesizedEntry {
    /// Entry backed by a current catalog record
    pub fn live(name: impl Into<String>, value: i32, documentation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            documentation: documentation.into(),
            obsolescence: None,
            ordering_key: ENTRY_ORDER,
        }
    }

    /// Reserved `Uninitialized` / `NotA<Domain>` entry
    #[must_use]
    pub fn sentinel(sentinel: &Sentinel) -> Self {
        Self {
            name: sentinel.name.to_string(),
            value: sentinel.value,
            documentation: sentinel.summary.to_string(),
            obsolescence: None,
            ordering_key: SENTINEL_ORDER,
        }
    }

    /// Entry kept alive for a published identifier that left the catalog.
    ///
    /// The value is taken from the snapshot and nothing else, so a retired
    /// identifier always keeps the number it was published with.
    pub fn retired(published: &SnapshotEntry, reason: impl Into<String>) -> Self {
        Self {
            name: published.name.clone(),
            value: published.value,
            documentation: published.documentation.clone().unwrap_or_default(),
            obsolescence: Some(reason.into()),
            ordering_key: ENTRY_ORDER,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.value
    }

    #[must_use]
    pub fn documentation(&self) -> &str {
        &self.documentation
    }

    #[must_use]
    pub fn obsolescence(&self) -> Option<&str> {
        self.obsolescence.as_deref()
    }

    #[must_use]
    pub const fn ordering_key(&self) -> i32 {
        self.ordering_key
    }

    #[must_use]
    pub const fn is_obsolete(&self) -> bool {
        self.obsolescence.is_some()
    }

    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        self.ordering_key < ENTRY_ORDER
    }

    fn to_snapshot_entry(&self) -> SnapshotEntry {
        SnapshotEntry {
            name: self.name.clone(),
            value: self.value,
            obsolete: self.obsolescence.clone(),
            documentation: (!self.documentation.is_empty()).then(|| self.documentation.clone()),
        }
    }
}

/// Final, ordered entries of one domain
///
/// Construction enforces that names and values are pairwise distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySet {
    domain: Domain,
    entries: Vec<SynthesizedEntry>,
}

impl EntrySet {
    /// Validates uniqueness and sorts by `(ordering_key, name)`.
    pub fn new(domain: Domain, mut entries: Vec<SynthesizedEntry>) -> Result<Self> {
        let mut names: HashSet<&str> = HashSet::with_capacity(entries.len());
        let mut values: HashMap<i32, &str> = HashMap::with_capacity(entries.len());
        for entry in &entries {
            if !names.insert(entry.name()) {
                return Err(CatalogError::duplicate_name(domain, entry.name()));
            }
            if let Some(first) = values.insert(entry.value(), entry.name()) {
                return Err(CatalogError::duplicate_value(
                    domain,
                    entry.value(),
                    first,
                    entry.name(),
                ));
            }
        }

        entries.sort_by(|a, b| {
            a.ordering_key
                .cmp(&b.ordering_key)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(Self { domain, entries })
    }

    #[must_use]
    pub const fn domain(&self) -> Domain {
        self.domain
    }

    #[must_use]
    pub fn entries(&self) -> &[SynthesizedEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &SynthesizedEntry> {
        self.entries.iter()
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
    pub fn get(&self, name: &str) -> Option<&SynthesizedEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Catalog-backed entries, sentinels excluded
    pub fn live(&self) -> impl Iterator<Item = &SynthesizedEntry> {
        self.entries
            .iter()
            .filter(|entry| !entry.is_sentinel() && !entry.is_obsolete())
    }

    pub fn obsolete(&self) -> impl Iterator<Item = &SynthesizedEntry> {
        self.entries.iter().filter(|entry| entry.is_obsolete())
    }

    /// Snapshot to feed into the next generation
    #[must_use]
    pub fn to_snapshot(&self) -> PublishedSnapshot {
        PublishedSnapshot::from_validated(
            self.domain,
            self.entries.iter().map(SynthesizedEntry::to_snapshot_entry),
        )
    }
}

impl<'a> IntoIterator for &'a EntrySet {
    type Item = &'a SynthesizedEntry;
    type IntoIter = std::slice::Iter<'a, SynthesizedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
