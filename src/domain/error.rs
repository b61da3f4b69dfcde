use crate::domain::version::InvalidVersionError;

/// Error returned when a value supplied to the document model violates its
/// local shape contract.
///
/// Raised synchronously by setters and adders. The field being set is left
/// untouched when this is returned.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidArgument {
    /// A scalar value was empty.
    #[error("invalid parameter: {0} must be a non-empty string")]
    Empty(&'static str),

    /// The publisher type is not one of the accepted tokens.
    #[error(
        "invalid document publisher '{0}': expected one of vendor, discoverer, coordinator, \
         user, other"
    )]
    Publisher(String),

    /// A collection entry is missing one of its required sub-fields.
    #[error("invalid {entry}: missing required field '{field}'")]
    MissingField {
        /// The kind of entry being added (e.g. "revision").
        entry: &'static str,
        /// The missing sub-field.
        field: &'static str,
    },

    /// The encoding cannot carry ASCII markup byte for byte.
    #[error("unsupported encoding '{0}': only ASCII-compatible encodings can be declared")]
    Encoding(String),

    /// A bulk setter was called with no entries.
    #[error("invalid parameter: {0} must contain at least one entry")]
    EmptyList(&'static str),

    /// A revision number is not a dotted numeric version.
    #[error(transparent)]
    Version(#[from] InvalidVersionError),
}
