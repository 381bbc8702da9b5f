use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};

/// Short alphabetic code(s) of one catalog entry, lowercased and validated
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawShortCode")]
pub struct ShortCode {
    alpha3: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    alpha2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    numeric: Option<u32>,
}

/// Unvalidated wire form; every deserialized code goes through `from_parts`
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawShortCode {
    alpha3: String,
    #[serde(default)]
    alpha2: Option<String>,
    #[serde(default)]
    numeric: Option<u32>,
}

impl TryFrom<RawShortCode> for ShortCode {
    type Error = CodecError;

    fn try_from(raw: RawShortCode) -> Result<Self> {
        Self::from_parts(&raw.alpha3, raw.alpha2.as_deref(), raw.numeric)
    }
}

impl ShortCode {
    /// Create a code from its 3-letter form
    pub fn new(alpha3: &str) -> Result<Self> {
        Ok(Self {
            alpha3: fold_letters(alpha3, 3)?,
            alpha2: None,
            numeric: None,
        })
    }

    pub fn from_parts(alpha3: &str, alpha2: Option<&str>, numeric: Option<u32>) -> Result<Self> {
        let mut code = Self::new(alpha3)?;
        if let Some(alpha2) = alpha2 {
            code = code.with_alpha2(alpha2)?;
        }
        if let Some(numeric) = numeric {
            code = code.with_numeric(numeric);
        }
        Ok(code)
    }

    /// Builder: attach the 2-letter form
    pub fn with_alpha2(mut self, alpha2: &str) -> Result<Self> {
        self.alpha2 = Some(fold_letters(alpha2, 2)?);
        Ok(self)
    }

    /// Builder: attach the numeric code
    #[must_use]
    pub fn with_numeric(mut self, numeric: u32) -> Self {
        self.numeric = Some(numeric);
        self
    }

    #[must_use]
    pub fn alpha3(&self) -> &str {
        &self.alpha3
    }

    #[must_use]
    pub fn alpha2(&self) -> Option<&str> {
        self.alpha2.as_deref()
    }

    #[must_use]
    pub const fn numeric(&self) -> Option<u32> {
        self.numeric
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.alpha3)?;
        if let Some(alpha2) = &self.alpha2 {
            write!(f, "/{alpha2}")?;
        }
        if let Some(numeric) = self.numeric {
            write!(f, "#{numeric:03}")?;
        }
        Ok(())
    }
}

/// Validates `expected` ASCII letters and folds them to lowercase.
fn fold_letters(code: &str, expected: usize) -> Result<String> {
    if code.is_empty() {
        return Err(CodecError::invalid_code(code, "code is empty"));
    }
    if let Some(bad) = code.chars().find(|c| !c.is_ascii_alphabetic()) {
        return Err(CodecError::invalid_code(
            code,
            format!("{bad:?} is not a Latin letter"),
        ));
    }
    if code.len() != expected {
        return Err(CodecError::invalid_code(
            code,
            format!("expected {expected} letters, got {}", code.len()),
        ));
    }
    Ok(code.to_ascii_lowercase())
}
