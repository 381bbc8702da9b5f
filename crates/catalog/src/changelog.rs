use std::fmt::Write as _;

use isoenum_codec::{format_grouped, Domain};

use crate::entry::EntrySet;
use crate::snapshot::PublishedSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeKind {
    Added,
    Changed,
    Removed,
}

impl ChangeKind {
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Added => "Added",
            Self::Changed => "Changed",
            Self::Removed => "Removed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    pub kind: ChangeKind,
    pub name: String,
    pub description: String,
}

/// Differences between two generations of one domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changelog {
    domain: Domain,
    entries: Vec<ChangelogEntry>,
}

impl Changelog {
    #[must_use]
    pub fn between(previous: &PublishedSnapshot, current: &EntrySet) -> Self {
        let mut entries = Vec::new();
        for entry in current.iter().filter(|entry| !entry.is_sentinel()) {
            let name = entry.name().to_string();
            match (previous.get(entry.name()), entry.obsolescence()) {
                (None, _) => entries.push(ChangelogEntry {
                    kind: ChangeKind::Added,
                    name,
                    description: format!("value {}", format_grouped(entry.value())),
                }),
                (Some(published), Some(reason)) if published.obsolete.is_none() => {
                    entries.push(ChangelogEntry {
                        kind: ChangeKind::Removed,
                        name,
                        description: reason.to_string(),
                    });
                }
                (Some(published), None) if published.obsolete.is_some() => {
                    entries.push(ChangelogEntry {
                        kind: ChangeKind::Changed,
                        name,
                        description: "back in the catalog, no longer obsolete".to_string(),
                    });
                }
                (Some(published), Some(reason))
                    if published.obsolete.as_deref() != Some(reason) =>
                {
                    entries.push(ChangelogEntry {
                        kind: ChangeKind::Changed,
                        name,
                        description: format!("obsolescence reason is now: {reason}"),
                    });
                }
                _ => {}
            }
        }
        entries.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name)));
        Self {
            domain: current.domain(),
            entries,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[ChangelogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn count(&self, kind: ChangeKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = format!("## {}\n", self.domain.enum_name());
        if self.entries.is_empty() {
            out.push_str("\nNo changes.\n");
            return out;
        }
        let mut current = None;
        for entry in &self.entries {
            if current != Some(entry.kind) {
                let _ = write!(out, "\n### {}\n\n", entry.kind.heading());
                current = Some(entry.kind);
            }
            let _ = writeln!(out, "- `{}`: {}", entry.name, entry.description);
        }
        out
    }
}
