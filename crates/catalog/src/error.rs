use isoenum_codec::{CodecError, Domain};
use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that abort the generation of one domain
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A short code failed the codec preconditions
    #[error("{0}")]
    InvalidCode(#[from] CodecError),

    /// A published identifier vanished without an obsolescence reason
    #[error(
        "{domain} identifier {name} is missing from the catalog and has no obsolescence reason; \
         add one to the registry before removing it"
    )]
    UndocumentedRemoval { domain: Domain, name: String },

    /// Two entries share an identifier name or a packed value
    #[error("Duplicate {domain} entry: {detail}")]
    DuplicateEntry { domain: Domain, detail: String },

    /// A display name normalizes to nothing
    #[error("Display name {raw:?} of {code} normalizes to an empty identifier")]
    EmptyNormalizedName { code: String, raw: String },

    /// A live identifier changed its packed value
    #[error("{domain} identifier {name} changed value from {previous} to {current}")]
    Renumbered {
        domain: Domain,
        name: String,
        previous: i32,
        current: i32,
    },

    /// Malformed or mismatched snapshot sidecar
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    /// Create a duplicate-name error
    pub fn duplicate_name(domain: Domain, name: impl Into<String>) -> Self {
        Self::DuplicateEntry {
            domain,
            detail: format!("identifier {} appears more than once", name.into()),
        }
    }

    /// Create a duplicate-value error
    pub fn duplicate_value(domain: Domain, value: i32, first: &str, second: &str) -> Self {
        Self::DuplicateEntry {
            domain,
            detail: format!("{first} and {second} share the value {value}"),
        }
    }

    /// Create a snapshot error
    pub fn snapshot(msg: impl Into<String>) -> Self {
        Self::Snapshot(msg.into())
    }

    /// Create an invalid config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
