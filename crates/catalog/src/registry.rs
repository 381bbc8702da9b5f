use std::collections::BTreeMap;

/// Maintainer-written reasons for identifiers that left a catalog
///
/// A missing reason is an error at reconciliation time, never a default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObsolescenceRegistry {
    reasons: BTreeMap<String, String>,
}

impl ObsolescenceRegistry {
    pub fn new<N, R>(reasons: impl IntoIterator<Item = (N, R)>) -> Self
    where
        N: Into<String>,
        R: Into<String>,
    {
        Self {
            reasons: reasons
                .into_iter()
                .map(|(name, reason)| (name.into(), reason.into()))
                .collect(),
        }
    }

    #[must_use]
    pub fn reason(&self, name: &str) -> Option<&str> {
        self.reasons.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.reasons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.reasons
            .iter()
            .map(|(name, reason)| (name.as_str(), reason.as_str()))
    }

    /// Registry with `other`'s reasons layered on top of this one.
    #[must_use]
    pub(crate) fn extended(&self, other: &BTreeMap<String, String>) -> Self {
        let mut reasons = self.reasons.clone();
        reasons.extend(other.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self { reasons }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_reasons_are_appended() {
        let base = ObsolescenceRegistry::new([("Bulgarian_Lev", "Replaced by Euro")]);
        let extra = BTreeMap::from([("Kuna".to_string(), "Replaced by Euro in 2023".to_string())]);
        let merged = base.extended(&extra);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.reason("Bulgarian_Lev"), Some("Replaced by Euro"));
        assert_eq!(merged.reason("Kuna"), Some("Replaced by Euro in 2023"));
        assert_eq!(merged.reason("Euro"), None);
    }
}
