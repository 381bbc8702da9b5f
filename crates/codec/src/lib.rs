//! # IsoEnum Codec
//!
//! Packs the short alphabetic codes of ISO catalog entries into stable
//! `i32` discriminants, so a code can be read back from an enum value
//! without a lookup table.
//!
//! ## Guarantees
//!
//! - `decode(encode(code)) == code` for every code accepted by `encode`
//! - `encode` never yields `0` (`Uninitialized`) or `-1` (`NotA<Domain>`)
//! - codes outside `[A-Za-z]`, of the wrong length, or with a numeric
//!   code beyond the layout's budget are rejected, never truncated
//!
//! ## Example
//!
//! ```rust
//! use isoenum_codec::{decode, encode, Domain, ShortCode};
//!
//! let english = ShortCode::from_parts("eng", Some("en"), None).unwrap();
//! let value = encode(Domain::Language, &english).unwrap();
//! assert_eq!(value, 55_128_905);
//! assert_eq!(decode(Domain::Language, value).unwrap(), english);
//! ```

mod code;
mod codec;
mod domain;
mod error;
mod format;
pub mod layout;

pub use code::ShortCode;
pub use codec::{alpha2_of, alpha3_of, decode, encode, has_alpha2, numeric_of};
pub use domain::{is_sentinel, Domain, Sentinel, NOT_A_VALUE, UNINITIALIZED};
pub use error::{CodecError, Result};
pub use format::format_grouped;
pub use layout::PackLayout;
