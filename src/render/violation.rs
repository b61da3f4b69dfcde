use std::fmt;

/// A field that must be present for a document to be rendered completely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    /// The document title.
    DocumentTitle,
    /// The document type.
    DocumentType,
    /// The publisher type.
    DocumentPublisher,
    /// The tracking identification id.
    Identification,
    /// The document status.
    Status,
    /// At least one revision history entry.
    RevisionHistory,
    /// The initial release date.
    InitialReleaseDate,
    /// The current release date.
    CurrentReleaseDate,
    /// At least one product.
    ProductTree,
    /// The title of the vulnerability with the given 1-based ordinal.
    VulnerabilityTitle {
        /// Position of the vulnerability, starting at 1.
        ordinal: usize,
    },
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::DocumentTitle => f.write_str("document title"),
            Self::DocumentType => f.write_str("document type"),
            Self::DocumentPublisher => f.write_str("document publisher"),
            Self::Identification => f.write_str("identification"),
            Self::Status => f.write_str("status"),
            Self::RevisionHistory => f.write_str("revision history"),
            Self::InitialReleaseDate => f.write_str("initial release date"),
            Self::CurrentReleaseDate => f.write_str("current release date"),
            Self::ProductTree => f.write_str("product tree"),
            Self::VulnerabilityTitle { ordinal } => write!(f, "title of vulnerability {ordinal}"),
        }
    }
}

/// A required field was missing at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot render document: missing {field}")]
pub struct RenderViolation {
    field: RequiredField,
}

impl RenderViolation {
    pub(crate) const fn new(field: RequiredField) -> Self {
        Self { field }
    }

    /// The missing field.
    #[must_use]
    pub const fn field(&self) -> RequiredField {
        self.field
    }
}
