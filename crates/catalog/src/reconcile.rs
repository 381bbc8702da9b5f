//! Merge of freshly synthesized entries with the previously published set.
//!
//! # Invariants
//! - Every name in the previous snapshot is present in the result, live or
//!   obsolete.
//! - A retired identifier keeps its published value.
//! - A live identifier keeps its published value, or generation fails.
//! - Names and values of the result are pairwise distinct.

use std::collections::BTreeMap;

use isoenum_codec::Domain;
use log::{debug, info};

use crate::entry::{EntrySet, SynthesizedEntry};
use crate::error::{CatalogError, Result};
use crate::registry::ObsolescenceRegistry;
use crate::snapshot::PublishedSnapshot;

/// Reconciles `generated` against `previous`.
///
/// # Errors
/// - `DuplicateEntry` when `generated` repeats a name, or the final set
///   repeats a name or value.
/// - `Renumbered` when a live identifier's value differs from the snapshot.
/// - `UndocumentedRemoval` for the first (by name) published identifier that
///   is missing from `generated` without a registry reason.
pub fn reconcile(
    domain: Domain,
    generated: Vec<SynthesizedEntry>,
    previous: &PublishedSnapshot,
    registry: &ObsolescenceRegistry,
) -> Result<EntrySet> {
    if previous.domain() != domain {
        return Err(CatalogError::snapshot(format!(
            "cannot reconcile {domain} entries against a {} snapshot",
            previous.domain()
        )));
    }

    let mut current: BTreeMap<String, SynthesizedEntry> = BTreeMap::new();
    for entry in generated {
        let name = entry.name().to_string();
        if current.insert(name.clone(), entry).is_some() {
            return Err(CatalogError::duplicate_name(domain, name));
        }
    }

    for published in previous.entries() {
        if let Some(entry) = current.get(&published.name) {
            if entry.value() != published.value {
                return Err(CatalogError::Renumbered {
                    domain,
                    name: published.name.clone(),
                    previous: published.value,
                    current: entry.value(),
                });
            }
        }
    }

    let missing: Vec<_> = previous
        .entries()
        .filter(|published| !current.contains_key(&published.name))
        .collect();

    let mut retired = Vec::with_capacity(missing.len());
    for published in missing {
        let reason =
            registry
                .reason(&published.name)
                .ok_or_else(|| CatalogError::UndocumentedRemoval {
                    domain,
                    name: published.name.clone(),
                })?;
        debug!("{domain} {} retired: {reason}", published.name);
        retired.push(SynthesizedEntry::retired(published, reason));
    }

    let live = current.values().filter(|e| !e.is_sentinel()).count();
    info!("{live} live and {} obsolete {domain} entries", retired.len());

    let mut entries: Vec<_> = current.into_values().collect();
    entries.extend(retired);
    EntrySet::new(domain, entries)
}
