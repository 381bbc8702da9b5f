//! Display name → identifier synthesis.
//!
//! # Responsibility
//! - Reduce a display name to `[A-Za-z_]` identifier text.
//! - Disambiguate records that reduce to the same text with their primary
//!   code.
//!
//! # Invariants
//! - Output never starts or ends with `_` and never contains `__`.
//! - Within one call, output names are unique as long as primary codes are.

use std::collections::BTreeMap;

use isoenum_codec::Domain;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::{CatalogError, Result};
use crate::record::CatalogRecord;

static QUOTE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"['’‘ʼ`"]+"#).expect("quote pattern is valid"));

static NON_LETTER_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z]+").expect("separator pattern is valid"));

/// Codes that have no usable display name
const CURRENCY_OVERRIDES: &[(&str, &str)] = &[
    ("XTS", "TestCurrency"),
    ("XXX", "NoCurrencyInvolved"),
];

/// Literal name substitution for `code`, if any.
#[must_use]
pub fn name_override(domain: Domain, code: &str) -> Option<&'static str> {
    let table: &[(&str, &str)] = match domain {
        Domain::Currency => CURRENCY_OVERRIDES,
        Domain::Language | Domain::Country => &[],
    };
    table
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(code.trim()))
        .map(|(_, name)| *name)
}

/// Normalizes a display name; the result may be empty.
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    let stripped: String = raw.nfd().filter(|c| !is_combining_mark(*c)).collect();
    let unquoted = QUOTE_RUNS.replace_all(&stripped, "");
    let separated = NON_LETTER_RUNS.replace_all(&unquoted, "_");
    separated.trim_matches(|c| c == '_' || c == ' ').to_string()
}

/// Identifier text of one record before disambiguation.
pub fn base_name(domain: Domain, record: &CatalogRecord) -> Result<String> {
    let raw = name_override(domain, record.primary_code())
        .unwrap_or_else(|| record.identifier_source());
    let name = normalize_name(raw);
    if name.is_empty() {
        return Err(CatalogError::EmptyNormalizedName {
            code: record.primary_code().to_string(),
            raw: raw.to_string(),
        });
    }
    Ok(name)
}

/// Unique identifier per record, in record order.
///
/// Records sharing a base name all get `_<primary code>` appended.
pub fn synthesize_names(domain: Domain, records: &[CatalogRecord]) -> Result<Vec<String>> {
    let bases = records
        .iter()
        .map(|record| base_name(domain, record))
        .collect::<Result<Vec<_>>>()?;

    let mut group_sizes: BTreeMap<&str, usize> = BTreeMap::new();
    for base in &bases {
        *group_sizes.entry(base.as_str()).or_default() += 1;
    }

    Ok(records
        .iter()
        .zip(&bases)
        .map(|(record, base)| {
            if group_sizes.get(base.as_str()).copied().unwrap_or(0) > 1 {
                let name = format!("{base}_{}", record.primary_code());
                debug!("{domain} name {base} is shared, using {name}");
                name
            } else {
                base.clone()
            }
        })
        .collect())
}
