use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::layout::{PackLayout, COUNTRY_LAYOUT, CURRENCY_LAYOUT, LANGUAGE_LAYOUT};

/// Discriminant of the `Uninitialized` sentinel, present in every domain
pub const UNINITIALIZED: i32 = 0;

/// Discriminant of the `NotA<Domain>` sentinel (currency and country)
pub const NOT_A_VALUE: i32 = -1;

/// Returns true for values reserved by the sentinels of any domain.
#[must_use]
pub const fn is_sentinel(value: i32) -> bool {
    value == UNINITIALIZED || value == NOT_A_VALUE
}

/// One of the standards catalogs that get an identifier space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// ISO 639 languages
    Language,
    /// ISO 4217 currencies
    Currency,
    /// ISO 3166-1 countries
    Country,
}

/// Reserved identifier emitted ahead of every real entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentinel {
    pub name: &'static str,
    pub value: i32,
    pub summary: &'static str,
}

const LANGUAGE_SENTINELS: &[Sentinel] = &[Sentinel {
    name: "Uninitialized",
    value: UNINITIALIZED,
    summary: "Not a language, but instead an uninitialized variable.",
}];

const CURRENCY_SENTINELS: &[Sentinel] = &[
    Sentinel {
        name: "NotACurrency",
        value: NOT_A_VALUE,
        summary: "Not a currency.",
    },
    Sentinel {
        name: "Uninitialized",
        value: UNINITIALIZED,
        summary: "Not a currency, but instead an uninitialized variable.",
    },
];

const COUNTRY_SENTINELS: &[Sentinel] = &[
    Sentinel {
        name: "NotACountry",
        value: NOT_A_VALUE,
        summary: "Not a country.",
    },
    Sentinel {
        name: "Uninitialized",
        value: UNINITIALIZED,
        summary: "Not a country, but instead an uninitialized variable.",
    },
];

impl Domain {
    /// Generation order: countries reference languages and currencies.
    pub const ALL: [Domain; 3] = [Domain::Language, Domain::Currency, Domain::Country];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Language => "language",
            Self::Currency => "currency",
            Self::Country => "country",
        }
    }

    /// Name of the generated enumerated type
    #[must_use]
    pub const fn enum_name(self) -> &'static str {
        match self {
            Self::Language => "Language",
            Self::Currency => "Currency",
            Self::Country => "Country",
        }
    }

    #[must_use]
    pub const fn layout(self) -> &'static PackLayout {
        match self {
            Self::Language => &LANGUAGE_LAYOUT,
            Self::Currency => &CURRENCY_LAYOUT,
            Self::Country => &COUNTRY_LAYOUT,
        }
    }

    /// Reserved identifiers, in emission order
    #[must_use]
    pub const fn sentinels(self) -> &'static [Sentinel] {
        match self {
            Self::Language => LANGUAGE_SENTINELS,
            Self::Currency => CURRENCY_SENTINELS,
            Self::Country => COUNTRY_SENTINELS,
        }
    }

    #[must_use]
    pub fn is_sentinel_name(self, name: &str) -> bool {
        self.sentinels().iter().any(|sentinel| sentinel.name == name)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "language" | "iso639" => Ok(Self::Language),
            "currency" | "iso4217" => Ok(Self::Currency),
            "country" | "iso3166" => Ok(Self::Country),
            _ => Err(CodecError::UnknownDomain(s.to_string())),
        }
    }
}
