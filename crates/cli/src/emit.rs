//! Rust source rendering of a generated entry set.

use std::fmt::Write as _;

use isoenum_catalog::{EntrySet, SynthesizedEntry};
use isoenum_codec::format_grouped;

/// Renders `set` as a `#[repr(i32)]` enum named after its domain.
#[must_use]
pub fn render_enum(set: &EntrySet) -> String {
    let domain = set.domain();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "// @generated by isoenum from {domain}.json. Do not edit by hand."
    );
    out.push('\n');
    let _ = writeln!(
        out,
        "/// {} live and {} obsolete {domain} identifiers.",
        set.live().count(),
        set.obsolete().count()
    );
    out.push_str("#[repr(i32)]\n");
    out.push_str("#[allow(non_camel_case_types)]\n");
    out.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]\n");
    let _ = writeln!(out, "pub enum {} {{", domain.enum_name());
    for entry in set {
        render_variant(&mut out, entry);
    }
    out.push_str("}\n");
    out
}

fn render_variant(out: &mut String, entry: &SynthesizedEntry) {
    for line in entry.documentation().lines() {
        let line = line.trim_end();
        if line.is_empty() {
            out.push_str("    ///\n");
        } else {
            let _ = writeln!(out, "    /// {line}");
        }
    }
    if let Some(reason) = entry.obsolescence() {
        let _ = writeln!(out, "    #[deprecated(note = \"{}\")]", escape(reason));
    }
    let _ = writeln!(
        out,
        "    {} = {},",
        entry.name(),
        format_grouped(entry.value())
    );
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
