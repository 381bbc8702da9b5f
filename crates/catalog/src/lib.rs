//! # IsoEnum Catalog
//!
//! Turns ISO catalog rows into enumeration entries whose names and values
//! stay stable from one generation to the next.
//!
//! ## Architecture
//!
//! ```text
//! <domain>.json rows
//!     │
//!     ├──> Preparation (exclusions, extinct languages, repeated codes)
//!     │    └─> <domain>.supplement.json rows not already covered
//!     │
//!     ├──> Name synthesis (NFD, quote stripping, `_` runs, disambiguation)
//!     │
//!     ├──> Value packing (isoenum-codec) + documentation lines
//!     │
//!     └──> Reconciliation against <domain>.snapshot.json
//!          ├─> live entries must keep their published value
//!          ├─> missing entries need an obsolescence reason
//!          └─> EntrySet ordered by (ordering key, name)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use isoenum_catalog::{CatalogRecord, DocContext, Generator, GeneratorConfig, PublishedSnapshot};
//! use isoenum_codec::Domain;
//!
//! let config = GeneratorConfig::builtin().unwrap();
//! let records = vec![CatalogRecord::new("eng", "English").secondary("en")];
//! let set = Generator::new(Domain::Language, &config)
//!     .generate(records, &PublishedSnapshot::empty(Domain::Language), &DocContext::default())
//!     .unwrap();
//!
//! assert_eq!(set.get("English").unwrap().value(), 55_128_905);
//! ```

mod changelog;
mod config;
mod docs;
mod entry;
mod error;
mod generator;
mod lookup;
mod naming;
mod reconcile;
mod record;
mod registry;
mod snapshot;
mod supplement;

pub use changelog::{ChangeKind, Changelog, ChangelogEntry};
pub use config::{DomainConfig, GeneratorConfig, CONFIG_SCHEMA_VERSION};
pub use docs::{document, DocContext};
pub use entry::{EntrySet, SynthesizedEntry, ENTRY_ORDER, SENTINEL_ORDER};
pub use error::{CatalogError, Result};
pub use generator::Generator;
pub use lookup::{CrossReference, Resolution};
pub use naming::{base_name, name_override, normalize_name, synthesize_names};
pub use reconcile::reconcile;
pub use record::{read_catalog, CatalogRecord};
pub use registry::ObsolescenceRegistry;
pub use snapshot::{snapshot_path, PublishedSnapshot, SnapshotEntry, SNAPSHOT_SCHEMA_VERSION};
pub use supplement::merge_supplement;
