use std::collections::HashSet;

use isoenum_catalog::{
    read_catalog, snapshot_path, synthesize_names, CatalogError, CatalogRecord, CrossReference,
    DocContext, DomainConfig, Generator, GeneratorConfig, ObsolescenceRegistry,
    PublishedSnapshot, Resolution,
};
use isoenum_codec::{decode, Domain, ShortCode, NOT_A_VALUE, UNINITIALIZED};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn languages() -> Vec<CatalogRecord> {
    vec![
        CatalogRecord::new("eng", "English")
            .secondary("en")
            .with_meta("scope", "I")
            .with_meta("language_type", "L"),
        CatalogRecord::new("deu", "German")
            .secondary("de")
            .with_meta("scope", "I")
            .with_meta("language_type", "L"),
        CatalogRecord::new("fra", "French").secondary("fr"),
        CatalogRecord::new("got", "Gothic").with_meta("language_type", "E"),
        CatalogRecord::new("tlh", "Klingon").with_meta("language_type", "C"),
    ]
}

fn currencies() -> Vec<CatalogRecord> {
    vec![
        CatalogRecord::new("EUR", "Euro").numeric(978),
        CatalogRecord::new("BGN", "Bulgarian Lev").numeric(975),
        CatalogRecord::new("USD", "US Dollar").numeric(840),
        CatalogRecord::new("USN", "US Dollar (Next day)").numeric(997),
        CatalogRecord::new("XTS", "Codes specifically reserved for testing purposes").numeric(963),
    ]
}

fn empty(domain: Domain) -> PublishedSnapshot {
    PublishedSnapshot::empty(domain)
}

#[test]
fn english_packs_to_the_documented_value() {
    let config = GeneratorConfig::builtin().unwrap();
    let set = Generator::new(Domain::Language, &config)
        .generate(languages(), &empty(Domain::Language), &DocContext::default())
        .unwrap();

    let english = set.get("English").unwrap();
    let expected = 1
        | ((('e' as i32 - 'a' as i32) & 31) << 1)
        | ((('n' as i32 - 'a' as i32) & 31) << 6)
        | ((('g' as i32 - 'a' as i32) & 31) << 11)
        | (1 << 16)
        | ((('e' as i32 - 'a' as i32) & 31) << 17)
        | ((('n' as i32 - 'a' as i32) & 31) << 22);
    assert_eq!(english.value(), expected);
    assert_eq!(
        decode(Domain::Language, english.value()).unwrap(),
        ShortCode::from_parts("eng", Some("en"), None).unwrap()
    );
    assert_eq!(
        english.documentation(),
        "English\n\
         Individual Language\n\
         id=eng; 2code=en\n\
         Reference: https://en.wikipedia.org/wiki/ISO_639:eng"
    );
}

#[test]
fn sentinels_lead_and_extinct_languages_are_skipped() {
    let config = GeneratorConfig::builtin().unwrap();
    let set = Generator::new(Domain::Language, &config)
        .generate(languages(), &empty(Domain::Language), &DocContext::default())
        .unwrap();

    let names: Vec<_> = set.iter().map(|e| e.name()).collect();
    assert_eq!(
        names,
        vec!["Uninitialized", "English", "French", "German", "Klingon"]
    );
    assert_eq!(set.entries()[0].value(), UNINITIALIZED);
    assert_eq!(
        set.get("Klingon").unwrap().documentation(),
        "Klingon\nConstructed Language\nid=tlh\nReference: https://en.wikipedia.org/wiki/ISO_639:tlh"
    );
}

#[test]
fn currencies_apply_exclusions_and_overrides() {
    let config = GeneratorConfig::builtin().unwrap();
    let set = Generator::new(Domain::Currency, &config)
        .generate(currencies(), &empty(Domain::Currency), &DocContext::default())
        .unwrap();

    let names: Vec<_> = set.iter().map(|e| e.name()).collect();
    assert_eq!(
        names,
        vec![
            "NotACurrency",
            "Uninitialized",
            "Bulgarian_Lev",
            "Euro",
            "TestCurrency",
            "US_Dollar",
        ]
    );
    assert_eq!(set.get("NotACurrency").unwrap().value(), NOT_A_VALUE);
    assert_eq!(set.get("Bulgarian_Lev").unwrap().value(), 1_770_128_335);
    assert_eq!(set.get("Euro").unwrap().value(), -1_928_854_574);
    assert_eq!(
        set.get("Euro").unwrap().documentation(),
        "Euro\nid=EUR, numeric=978"
    );
}

#[test]
fn final_sets_have_unique_names_and_values() {
    let config = GeneratorConfig::builtin().unwrap();
    for (domain, records) in [
        (Domain::Language, languages()),
        (Domain::Currency, currencies()),
    ] {
        let set = Generator::new(domain, &config)
            .generate(records, &empty(domain), &DocContext::default())
            .unwrap();
        let names: HashSet<_> = set.iter().map(|e| e.name()).collect();
        let values: HashSet<_> = set.iter().map(|e| e.value()).collect();
        assert_eq!(names.len(), set.len());
        assert_eq!(values.len(), set.len());
    }
}

#[test]
fn generation_is_deterministic() {
    let config = GeneratorConfig::builtin().unwrap();
    let generator = Generator::new(Domain::Currency, &config);
    let first = generator
        .generate(currencies(), &empty(Domain::Currency), &DocContext::default())
        .unwrap();
    let previous = first.to_snapshot();

    let again = generator
        .generate(currencies(), &previous, &DocContext::default())
        .unwrap();
    let once_more = generator
        .generate(currencies(), &previous, &DocContext::default())
        .unwrap();
    assert_eq!(again, once_more);
    assert_eq!(first, again);
}

#[test]
fn dropped_identifier_requires_a_reason() {
    let generator_config = GeneratorConfig::default();
    let generator = Generator::new(Domain::Language, &generator_config);
    let previous = generator
        .generate(languages(), &empty(Domain::Language), &DocContext::default())
        .unwrap()
        .to_snapshot();

    let without_german: Vec<_> = languages()
        .into_iter()
        .filter(|r| r.primary != "deu")
        .collect();
    let err = generator
        .generate(without_german.clone(), &previous, &DocContext::default())
        .unwrap_err();
    assert!(
        matches!(&err, CatalogError::UndocumentedRemoval { name, .. } if name == "German"),
        "unexpected error: {err}"
    );

    let documented = DomainConfig::default()
        .with_registry(ObsolescenceRegistry::new([("German", "Withdrawn for testing")]));
    let generator_config = GeneratorConfig::default().with_domain(Domain::Language, documented);
    let set = Generator::new(Domain::Language, &generator_config)
        .generate(without_german, &previous, &DocContext::default())
        .unwrap();

    let german = set.get("German").unwrap();
    assert_eq!(german.value(), previous.get("German").unwrap().value);
    assert_eq!(german.obsolescence(), Some("Withdrawn for testing"));
    assert_eq!(
        german.documentation(),
        "German\n\
         Individual Language\n\
         id=deu; 2code=de\n\
         Reference: https://en.wikipedia.org/wiki/ISO_639:deu"
    );
    assert_eq!(set.obsolete().count(), 1);
}

#[test]
fn builtin_registry_retires_the_lev() {
    let config = GeneratorConfig::builtin().unwrap();
    let generator = Generator::new(Domain::Currency, &config);
    let previous = generator
        .generate(currencies(), &empty(Domain::Currency), &DocContext::default())
        .unwrap()
        .to_snapshot();

    let without_lev: Vec<_> = currencies()
        .into_iter()
        .filter(|r| r.primary != "BGN")
        .collect();
    let set = generator
        .generate(without_lev, &previous, &DocContext::default())
        .unwrap();
    let lev = set.get("Bulgarian_Lev").unwrap();
    assert_eq!(lev.value(), 1_770_128_335);
    assert_eq!(
        lev.obsolescence(),
        Some("Replaced by Euro starting 2026-01-01")
    );

    let xref = CrossReference::from_entries(&set);
    assert_eq!(xref.resolve("bgn"), Resolution::Unknown);
    assert_eq!(xref.resolve("EUR"), Resolution::Live("Euro"));
}

#[test]
fn records_sharing_a_name_are_suffixed_with_their_code() {
    let records = vec![
        CatalogRecord::new("ab", "Base"),
        CatalogRecord::new("xy", "Base"),
        CatalogRecord::new("zz", "Other"),
    ];
    assert_eq!(
        synthesize_names(Domain::Language, &records).unwrap(),
        vec!["Base_ab", "Base_xy", "Other"]
    );

    let config = GeneratorConfig::default();
    let set = Generator::new(Domain::Country, &config)
        .generate(
            vec![
                CatalogRecord::new("COG", "Congo").secondary("CG"),
                CatalogRecord::new("COD", "Congo").secondary("CD"),
            ],
            &empty(Domain::Country),
            &DocContext::default(),
        )
        .unwrap();
    assert!(set.get("Congo_COG").is_some());
    assert!(set.get("Congo_COD").is_some());
}

#[test]
fn countries_reference_this_runs_languages_and_currencies() {
    let config = GeneratorConfig::builtin().unwrap();
    let language_set = Generator::new(Domain::Language, &config)
        .generate(languages(), &empty(Domain::Language), &DocContext::default())
        .unwrap();
    let currency_set = Generator::new(Domain::Currency, &config)
        .generate(currencies(), &empty(Domain::Currency), &DocContext::default())
        .unwrap();
    let ctx = DocContext {
        languages: CrossReference::for_domain(Domain::Language, Some(&language_set)),
        currencies: CrossReference::for_domain(Domain::Currency, Some(&currency_set)),
    };

    let records = vec![CatalogRecord::new("DEU", "Germany")
        .secondary("DE")
        .numeric(276)
        .with_meta("region", "Europe")
        .with_meta("capital", "Berlin")
        .with_meta("languages", "de")
        .with_meta("currency_code", "EUR")
        .with_meta("tld", ".de")];
    let set = Generator::new(Domain::Country, &config)
        .generate(records, &empty(Domain::Country), &ctx)
        .unwrap();
    assert_eq!(
        set.get("Germany").unwrap().documentation(),
        "Germany\n\
         Located in: Europe\n\
         Capital: Berlin\n\
         Languages: German\n\
         Currency: Euro (EUR)\n\
         TopLevelDomain: .de\n\
         id=DEU, 2code=DE, numeric=276\n\
         Reference: https://en.wikipedia.org/wiki/ISO_3166-2:DE"
    );
}

#[test]
fn snapshot_sidecar_feeds_the_next_generation() {
    let temp = tempdir().unwrap();
    let path = snapshot_path(temp.path(), Domain::Currency);
    assert!(PublishedSnapshot::load(Domain::Currency, &path)
        .unwrap()
        .is_empty());

    let config = GeneratorConfig::builtin().unwrap();
    let generator = Generator::new(Domain::Currency, &config);
    let first = generator
        .generate(currencies(), &empty(Domain::Currency), &DocContext::default())
        .unwrap();
    first.to_snapshot().save(&path).unwrap();

    let loaded = PublishedSnapshot::load(Domain::Currency, &path).unwrap();
    assert_eq!(loaded, first.to_snapshot());
    let second = generator
        .generate(currencies(), &loaded, &DocContext::default())
        .unwrap();
    assert_eq!(second, first);
}

#[test]
fn reads_parser_output_from_disk() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("currency.json");
    std::fs::write(
        &path,
        r#"[{"primary": "EUR", "numeric": 978, "name": "Euro"},
            {"primary": "CHF", "numeric": 756, "name": "Swiss Franc"}]"#,
    )
    .unwrap();

    let records = read_catalog(&path).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].numeric, Some(756));
}
