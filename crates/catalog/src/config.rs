use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use isoenum_codec::Domain;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::{CatalogError, Result};
use crate::registry::ObsolescenceRegistry;

const BUILTIN_CONFIG: &str = include_str!("../config/default.json");

pub const CONFIG_SCHEMA_VERSION: u32 = 1;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z_]*$").expect("identifier pattern is valid"));

/// Generation settings of one domain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainConfig {
    /// Uppercased primary codes dropped before naming
    exclude: BTreeSet<String>,
    /// Drop languages whose `language_type` is `E`
    skip_extinct: bool,
    registry: ObsolescenceRegistry,
}

impl DomainConfig {
    #[must_use]
    pub fn is_excluded(&self, code: &str) -> bool {
        self.exclude.contains(&code.trim().to_ascii_uppercase())
    }

    #[must_use]
    pub const fn skip_extinct(&self) -> bool {
        self.skip_extinct
    }

    #[must_use]
    pub const fn registry(&self) -> &ObsolescenceRegistry {
        &self.registry
    }

    /// Builder: replace the obsolescence registry
    #[must_use]
    pub fn with_registry(mut self, registry: ObsolescenceRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Builder: exclude a primary code
    #[must_use]
    pub fn exclude(mut self, code: &str) -> Self {
        self.exclude.insert(code.trim().to_ascii_uppercase());
        self
    }
}

/// Settings for every domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    domains: BTreeMap<Domain, DomainConfig>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    schema_version: Option<u32>,
    language: Option<RawDomainConfig>,
    currency: Option<RawDomainConfig>,
    country: Option<RawDomainConfig>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDomainConfig {
    exclude: Option<Vec<String>>,
    skip_extinct: Option<bool>,
    #[serde(default)]
    obsolete: BTreeMap<String, String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            domains: Domain::ALL
                .into_iter()
                .map(|domain| (domain, DomainConfig::default()))
                .collect(),
        }
    }
}

impl GeneratorConfig {
    /// Configuration shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_CONFIG, &Self::default())
    }

    /// Parses `json` on top of `base`.
    ///
    /// Unset fields keep the base value; obsolescence reasons are appended
    /// to the base registry, never removed from it.
    pub fn from_json_str(json: &str, base: &GeneratorConfig) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(json)
            .map_err(|err| CatalogError::config(format!("invalid JSON: {err}")))?;
        Self::from_raw(raw, base)
    }

    /// Loads a user file layered over the built-in configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json, &Self::builtin()?)
    }

    fn from_raw(raw: RawConfig, base: &GeneratorConfig) -> Result<Self> {
        if let Some(schema_version) = raw.schema_version {
            if schema_version != CONFIG_SCHEMA_VERSION {
                return Err(CatalogError::config(format!(
                    "schema_version {schema_version} is not supported (expected {CONFIG_SCHEMA_VERSION})"
                )));
            }
        }

        let mut domains = BTreeMap::new();
        for (domain, section) in [
            (Domain::Language, raw.language),
            (Domain::Currency, raw.currency),
            (Domain::Country, raw.country),
        ] {
            let base = base.domain(domain).clone();
            let cfg = match section {
                Some(section) => merge_domain(domain, base, section)?,
                None => base,
            };
            domains.insert(domain, cfg);
        }
        Ok(Self { domains })
    }

    #[must_use]
    pub fn domain(&self, domain: Domain) -> &DomainConfig {
        static EMPTY: Lazy<DomainConfig> = Lazy::new(DomainConfig::default);
        self.domains.get(&domain).unwrap_or(&EMPTY)
    }

    /// Replaces the settings of one domain
    #[must_use]
    pub fn with_domain(mut self, domain: Domain, config: DomainConfig) -> Self {
        self.domains.insert(domain, config);
        self
    }
}

fn merge_domain(domain: Domain, mut cfg: DomainConfig, raw: RawDomainConfig) -> Result<DomainConfig> {
    if let Some(exclude) = raw.exclude {
        cfg.exclude = BTreeSet::new();
        for code in exclude {
            let code = code.trim();
            if !(2..=3).contains(&code.len()) || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(CatalogError::config(format!(
                    "{domain}.exclude: {code:?} is not a 2- or 3-letter code"
                )));
            }
            cfg.exclude.insert(code.to_ascii_uppercase());
        }
    }

    if let Some(skip_extinct) = raw.skip_extinct {
        if domain != Domain::Language {
            return Err(CatalogError::config(format!(
                "{domain}.skip_extinct is only supported for languages"
            )));
        }
        cfg.skip_extinct = skip_extinct;
    }

    for (name, reason) in &raw.obsolete {
        if !IDENTIFIER.is_match(name) {
            return Err(CatalogError::config(format!(
                "{domain}.obsolete: {name:?} is not an identifier"
            )));
        }
        if reason.trim().is_empty() {
            return Err(CatalogError::config(format!(
                "{domain}.obsolete.{name}: reason must not be empty"
            )));
        }
    }
    cfg.registry = cfg.registry.extended(&raw.obsolete);
    Ok(cfg)
}
