//! Plain-text documentation lines attached to each generated identifier.

use isoenum_codec::Domain;

use crate::lookup::{CrossReference, Resolution};
use crate::record::CatalogRecord;

const WIKIPEDIA: &str = "https://en.wikipedia.org/wiki";

/// Lookups available while documenting countries
#[derive(Debug, Clone, Default)]
pub struct DocContext {
    pub languages: CrossReference,
    pub currencies: CrossReference,
}

/// Documentation text for `record`, one line per paragraph.
#[must_use]
pub fn document(domain: Domain, record: &CatalogRecord, ctx: &DocContext) -> String {
    let lines = match domain {
        Domain::Currency => currency_lines(record),
        Domain::Language => language_lines(record),
        Domain::Country => country_lines(record, ctx),
    };
    lines.join("\n")
}

fn currency_lines(record: &CatalogRecord) -> Vec<String> {
    let mut id = format!("id={}", record.primary_code());
    if let Some(numeric) = record.numeric {
        id.push_str(&format!(", numeric={numeric:03}"));
    }
    vec![record.name.trim().to_string(), id]
}

fn language_lines(record: &CatalogRecord) -> Vec<String> {
    let scope = match record.meta("scope") {
        Some("I") => "Individual ",
        Some("M") => "Meta ",
        _ => "",
    };
    let kind = match record.meta("language_type") {
        Some("A") => "Ancient ",
        Some("E") => "Extinct ",
        Some("C") => "Constructed ",
        _ => "",
    };

    let mut id = format!("id={}", record.primary_code());
    if let Some(alpha2) = record.secondary_code() {
        id.push_str(&format!("; 2code={alpha2}"));
    }
    if let Some(other) = record.meta("other_codes") {
        let other: Vec<_> = other
            .split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty() && !code.eq_ignore_ascii_case(record.primary_code()))
            .collect();
        if !other.is_empty() {
            id.push_str(&format!("; other={}", other.join(", ")));
        }
    }

    let mut lines = vec![
        record.name.trim().to_string(),
        format!("{scope}{kind}Language"),
        id,
    ];
    if let Some(aka) = record.meta("also_known_as") {
        lines.push(format!("Also known as: {aka}"));
    }
    lines.push(format!("Reference: {WIKIPEDIA}/ISO_639:{}", record.primary_code()));
    lines
}

fn country_lines(record: &CatalogRecord, ctx: &DocContext) -> Vec<String> {
    let mut lines = vec![record.name.trim().to_string()];

    if let Some(region) = record.meta("region") {
        lines.push(format!("Located in: {region}"));
    }
    if let Some(capital) = record.meta("capital") {
        lines.push(format!("Capital: {capital}"));
    }
    if let Some(languages) = record.meta("languages") {
        let rendered: Vec<_> = languages
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(|tag| {
                // locale tags such as `en-US` resolve by their language subtag
                let code = tag.split(['-', '_']).next().unwrap_or(tag);
                match ctx.languages.resolve(code) {
                    Resolution::Live(name) => name.to_string(),
                    Resolution::Unknown => tag.to_string(),
                }
            })
            .collect();
        if !rendered.is_empty() {
            lines.push(format!("Languages: {}", rendered.join(", ")));
        }
    }
    if let Some(code) = record.meta("currency_code") {
        let label = match ctx.currencies.resolve(code) {
            Resolution::Live(name) => name.to_string(),
            Resolution::Unknown => record.meta("currency_name").unwrap_or(code).to_string(),
        };
        lines.push(format!("Currency: {label} ({code})"));
    }
    if let Some(tld) = record.meta("tld") {
        lines.push(format!("TopLevelDomain: {tld}"));
    }

    let mut id = format!("id={}", record.primary_code());
    if let Some(alpha2) = record.secondary_code() {
        id.push_str(&format!(", 2code={alpha2}"));
    }
    if let Some(numeric) = record.numeric {
        id.push_str(&format!(", numeric={numeric:03}"));
    }
    lines.push(id);
    if let Some(alpha2) = record.secondary_code() {
        lines.push(format!("Reference: {WIKIPEDIA}/ISO_3166-2:{alpha2}"));
    }
    lines
}
