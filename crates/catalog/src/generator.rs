use std::collections::HashSet;

use isoenum_codec::{encode, Domain};
use log::{debug, info, warn};

use crate::config::{DomainConfig, GeneratorConfig};
use crate::docs::{document, DocContext};
use crate::entry::{EntrySet, SynthesizedEntry};
use crate::error::Result;
use crate::naming::synthesize_names;
use crate::reconcile::reconcile;
use crate::record::CatalogRecord;
use crate::snapshot::PublishedSnapshot;
use crate::supplement::merge_supplement;

/// Runs one domain from catalog records to the final ordered entry set
pub struct Generator<'a> {
    domain: Domain,
    config: &'a DomainConfig,
}

impl<'a> Generator<'a> {
    #[must_use]
    pub fn new(domain: Domain, config: &'a GeneratorConfig) -> Self {
        Self {
            domain,
            config: config.domain(domain),
        }
    }

    #[must_use]
    pub const fn with_domain_config(domain: Domain, config: &'a DomainConfig) -> Self {
        Self { domain, config }
    }

    #[must_use]
    pub const fn domain(&self) -> Domain {
        self.domain
    }

    /// Drops excluded, extinct and repeated records, keeping catalog order.
    #[must_use]
    pub fn prepare(&self, records: Vec<CatalogRecord>) -> Vec<CatalogRecord> {
        let domain = self.domain;
        let total = records.len();
        let mut seen = HashSet::new();
        let prepared: Vec<_> = records
            .into_iter()
            .filter(|record| {
                if self.config.is_excluded(record.primary_code()) {
                    debug!("{domain} {} excluded by configuration", record.primary_code());
                    return false;
                }
                if domain == Domain::Language
                    && self.config.skip_extinct()
                    && record.meta("language_type") == Some("E")
                {
                    debug!("{domain} {} is extinct, skipped", record.primary_code());
                    return false;
                }
                if !seen.insert(record.primary_code().to_ascii_lowercase()) {
                    warn!(
                        "{domain} {} listed more than once, keeping the first row",
                        record.primary_code()
                    );
                    return false;
                }
                true
            })
            .collect();
        debug!("{domain}: {} of {total} records kept", prepared.len());
        prepared
    }

    /// Sentinels plus one live entry per prepared record.
    pub fn synthesize(
        &self,
        records: &[CatalogRecord],
        ctx: &DocContext,
    ) -> Result<Vec<SynthesizedEntry>> {
        let domain = self.domain;
        let names = synthesize_names(domain, records)?;

        let mut entries: Vec<_> = domain
            .sentinels()
            .iter()
            .map(SynthesizedEntry::sentinel)
            .collect();
        for (record, name) in records.iter().zip(names) {
            let value = encode(domain, &record.short_code(domain)?)?;
            entries.push(SynthesizedEntry::live(
                name,
                value,
                document(domain, record, ctx),
            ));
        }
        Ok(entries)
    }

    /// Full run: prepare → name → encode → reconcile → order.
    pub fn generate(
        &self,
        records: Vec<CatalogRecord>,
        previous: &PublishedSnapshot,
        ctx: &DocContext,
    ) -> Result<EntrySet> {
        self.generate_with_supplement(records, Vec::new(), previous, ctx)
    }

    /// Like [`Generator::generate`], with `supplement` records merged in
    /// after preparation wherever the primary catalog does not cover them.
    pub fn generate_with_supplement(
        &self,
        records: Vec<CatalogRecord>,
        supplement: Vec<CatalogRecord>,
        previous: &PublishedSnapshot,
        ctx: &DocContext,
    ) -> Result<EntrySet> {
        let mut records = self.prepare(records);
        if !supplement.is_empty() {
            records = self.prepare(merge_supplement(self.domain, records, supplement));
        }
        let generated = self.synthesize(&records, ctx)?;
        let set = reconcile(self.domain, generated, previous, self.config.registry())?;
        info!(
            "{} {} identifiers generated",
            set.len(),
            self.domain.enum_name()
        );
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use pretty_assertions::assert_eq;

    #[test]
    fn prepare_drops_excluded_extinct_and_repeated_rows() {
        let config = DomainConfig::default().exclude("zxx");
        let languages = Generator::with_domain_config(Domain::Language, &config);
        let records = vec![
            CatalogRecord::new("eng", "English"),
            CatalogRecord::new("ZXX", "No linguistic content"),
            CatalogRecord::new("ENG", "English again"),
            CatalogRecord::new("got", "Gothic").with_meta("language_type", "E"),
        ];
        let kept: Vec<_> = languages
            .prepare(records)
            .into_iter()
            .map(|r| r.name)
            .collect();
        // skip_extinct is off in the default domain config
        assert_eq!(kept, vec!["English", "Gothic"]);
    }

    #[test]
    fn invalid_code_aborts_the_domain() {
        let config = GeneratorConfig::default();
        let generator = Generator::new(Domain::Currency, &config);
        let records = vec![CatalogRecord::new("EU1", "Broken").numeric(1)];
        assert!(matches!(
            generator.generate(
                records,
                &PublishedSnapshot::empty(Domain::Currency),
                &DocContext::default()
            ),
            Err(CatalogError::InvalidCode(_))
        ));
    }

    #[test]
    fn supplement_fills_gaps_and_obeys_exclusions() {
        let config = DomainConfig::default().exclude("und");
        let languages = Generator::with_domain_config(Domain::Language, &config);
        let records = vec![CatalogRecord::new("deu", "German")
            .secondary("de")
            .with_meta("other_codes", "ger")];
        let supplement = vec![
            CatalogRecord::new("ger", "German"),
            CatalogRecord::new("bih", "Bihari languages; Bihari").secondary("bh"),
            CatalogRecord::new("und", "Undetermined"),
        ];
        let set = languages
            .generate_with_supplement(
                records,
                supplement,
                &PublishedSnapshot::empty(Domain::Language),
                &DocContext::default(),
            )
            .unwrap();

        let names: Vec<_> = set.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Uninitialized", "Bihari_languages", "German"]);
        assert_eq!(
            set.get("Bihari_languages").unwrap().documentation(),
            "Bihari languages\n\
             Language\n\
             id=bih; 2code=bh\n\
             Also known as: Bihari\n\
             Reference: https://en.wikipedia.org/wiki/ISO_639:bih"
        );
    }
}
