//! Domain model for CVRF advisories.
//!
//! This module contains the in-memory document and the value types it is
//! built from. It knows nothing about XML.

use non_empty_string::NonEmptyString;

mod config;
pub use config::Config;

/// The advisory document and its setters.
pub mod document;
pub use document::Document;

mod entry;
pub use entry::{Note, NoteEntry, Revision, RevisionEntry};

mod error;
pub use error::InvalidArgument;

mod product;
pub use product::{Branch, Product};

mod publisher;
pub use publisher::Publisher;

/// Dotted numeric version tokens.
pub mod version;
pub use version::Version;

mod vulnerability;
pub use vulnerability::Vulnerability;

/// Validates that a scalar value is non-empty.
pub(crate) fn non_empty(
    field: &'static str,
    value: String,
) -> Result<NonEmptyString, InvalidArgument> {
    NonEmptyString::new(value).map_err(|_| InvalidArgument::Empty(field))
}

/// Encodings whose byte streams are not a superset of ASCII, compared with
/// separators removed.
const WIDE_ENCODINGS: [&str; 4] = ["UTF16", "UTF32", "UCS2", "UCS4"];

/// Validates an encoding name for the XML declaration.
///
/// Output is written as ASCII plus character references whenever the
/// encoding is not UTF-8, so any ASCII-compatible encoding can be declared.
pub(crate) fn check_encoding(value: String) -> Result<NonEmptyString, InvalidArgument> {
    let encoding = non_empty("encoding", value)?;
    let normalised: String = encoding
        .as_str()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_uppercase();
    if WIDE_ENCODINGS.iter().any(|wide| normalised.starts_with(*wide)) {
        return Err(InvalidArgument::Encoding(encoding.as_str().to_string()));
    }
    Ok(encoding)
}
