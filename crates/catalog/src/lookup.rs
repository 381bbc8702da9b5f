use std::collections::HashMap;

use isoenum_codec::{decode, Domain};
use log::debug;

use crate::entry::EntrySet;

/// Outcome of a cross-domain code lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Identifier of a live entry
    Live(&'a str),
    /// No live entry carries the code
    Unknown,
}

impl<'a> Resolution<'a> {
    #[must_use]
    pub const fn name(self) -> Option<&'a str> {
        match self {
            Self::Live(name) => Some(name),
            Self::Unknown => None,
        }
    }
}

/// Short code → live identifier index of one generated domain
///
/// The index is built by decoding packed values, so it only knows what the
/// codec can recover.
#[derive(Debug, Clone, Default)]
pub struct CrossReference {
    by_code: HashMap<String, String>,
}

impl CrossReference {
    /// Index that resolves nothing
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_entries(set: &EntrySet) -> Self {
        let domain = set.domain();
        let mut by_code = HashMap::new();
        for entry in set.live() {
            match decode(domain, entry.value()) {
                Ok(code) => {
                    by_code
                        .entry(code.alpha3().to_string())
                        .or_insert_with(|| entry.name().to_string());
                    if let Some(alpha2) = code.alpha2() {
                        by_code
                            .entry(alpha2.to_string())
                            .or_insert_with(|| entry.name().to_string());
                    }
                }
                Err(err) => debug!("{domain} {} not indexed: {err}", entry.name()),
            }
        }
        Self { by_code }
    }

    /// Builds the index for `domain` from `set`, if it is that domain's set.
    #[must_use]
    pub fn for_domain(domain: Domain, set: Option<&EntrySet>) -> Self {
        set.filter(|set| set.domain() == domain)
            .map(Self::from_entries)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn resolve(&self, code: &str) -> Resolution<'_> {
        self.by_code
            .get(&code.trim().to_ascii_lowercase())
            .map_or(Resolution::Unknown, |name| Resolution::Live(name.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}
