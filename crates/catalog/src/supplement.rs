//! Merge of a secondary catalog (e.g. ISO 639-2 next to ISO 639-3) into the
//! primary one.
//!
//! A supplementary record is kept only when none of its names and none of
//! its codes is already known from the primary catalog or from a
//! supplementary record kept before it.

use std::collections::HashSet;

use isoenum_codec::Domain;
use log::{debug, info};

use crate::record::CatalogRecord;

/// Case-folded names and codes already covered
#[derive(Debug, Default)]
struct Known {
    names: HashSet<String>,
    codes: HashSet<String>,
}

impl Known {
    fn add(&mut self, record: &CatalogRecord) {
        self.names.extend(names_of(record).map(str::to_lowercase));
        self.codes.extend(codes_of(record).map(str::to_ascii_lowercase));
    }

    fn covers(&self, record: &CatalogRecord) -> bool {
        names_of(record).any(|name| self.names.contains(&name.to_lowercase()))
            || codes_of(record).any(|code| self.codes.contains(&code.to_ascii_lowercase()))
    }
}

fn split_list(list: &str, separator: char) -> impl Iterator<Item = &str> {
    list.split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

/// Display name alternatives (`;`-separated), aliases and the inverted name
fn names_of(record: &CatalogRecord) -> impl Iterator<Item = &str> {
    split_list(&record.name, ';')
        .chain(record.meta("also_known_as").into_iter().flat_map(|aka| split_list(aka, ',')))
        .chain(record.meta("inverted_name"))
}

fn codes_of(record: &CatalogRecord) -> impl Iterator<Item = &str> {
    std::iter::once(record.primary_code())
        .chain(record.secondary_code())
        .chain(record.meta("other_codes").into_iter().flat_map(|codes| split_list(codes, ',')))
        .filter(|code| !code.is_empty())
}

/// Appends the supplementary records not covered by `records`.
///
/// A kept record is named after the first of its `;`-separated names; the
/// remaining ones become its `also_known_as` attribute.
#[must_use]
pub fn merge_supplement(
    domain: Domain,
    mut records: Vec<CatalogRecord>,
    supplement: Vec<CatalogRecord>,
) -> Vec<CatalogRecord> {
    let mut known = Known::default();
    for record in &records {
        known.add(record);
    }

    let mut added = 0;
    for record in supplement {
        if known.covers(&record) {
            debug!(
                "Skipping supplementary {domain} entry {} ({})",
                record.primary_code(),
                record.name
            );
            continue;
        }
        let record = rename_to_first(record);
        known.add(&record);
        records.push(record);
        added += 1;
    }
    info!("{added} supplementary {domain} entries added");
    records
}

fn rename_to_first(mut record: CatalogRecord) -> CatalogRecord {
    let names: Vec<String> = split_list(&record.name, ';').map(str::to_string).collect();
    if let Some((first, rest)) = names.split_first() {
        if !rest.is_empty() && record.meta("also_known_as").is_none() {
            record
                .metadata
                .insert("also_known_as".to_string(), rest.join(", "));
        }
        record.name = first.clone();
    }
    record
}
