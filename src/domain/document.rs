use non_empty_string::NonEmptyString;

use crate::domain::{
    InvalidArgument, Note, NoteEntry, Product, Publisher, Revision, RevisionEntry, Vulnerability,
    check_encoding, non_empty,
};

/// The encoding reported when none has been set.
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// An in-memory CVRF advisory.
///
/// Setters reject structurally invalid values immediately and leave the
/// field unchanged. Fields that a complete document needs (title, type,
/// tracking data, ...) are optional here; they are only enforced by the
/// [`Renderer`](crate::Renderer).
///
/// Collections are append-only. The bulk `set_*` methods append each entry
/// through the matching `add_*` method and stop at the first invalid one,
/// leaving the entries before it in place.
///
/// ```
/// use cvrf_writer::{Document, RevisionEntry};
///
/// # fn main() -> Result<(), cvrf_writer::InvalidArgument> {
/// let mut document = Document::new();
/// document
///     .set_document_title("Acme Widget buffer overflow")?
///     .set_document_publisher("vendor")?
///     .add_revision_history(RevisionEntry::new("1.0", "2013-05-01", "Initial release"))?;
///
/// assert_eq!(document.document_title(), Some("Acme Widget buffer overflow"));
/// assert_eq!(document.encoding(), "UTF-8");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    encoding: Option<NonEmptyString>,
    language: Option<NonEmptyString>,
    title: Option<NonEmptyString>,
    document_type: Option<NonEmptyString>,
    publisher: Option<Publisher>,
    tracking: Tracking,
    notes: Vec<Note>,
    products: Vec<Product>,
    vulnerabilities: Vec<Vulnerability>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Tracking {
    identification: Option<NonEmptyString>,
    status: Option<NonEmptyString>,
    initial_release_date: Option<NonEmptyString>,
    current_release_date: Option<NonEmptyString>,
    revisions: Vec<Revision>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document encoding.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Empty`] if the value is empty, or
    /// [`InvalidArgument::Encoding`] for encodings that are not
    /// ASCII-compatible, such as UTF-16.
    pub fn set_encoding(&mut self, value: impl Into<String>) -> Result<&mut Self, InvalidArgument> {
        self.encoding = Some(check_encoding(value.into())?);
        Ok(self)
    }

    /// Sets the document language (e.g. `en`).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Empty`] if the value is empty.
    pub fn set_language(&mut self, value: impl Into<String>) -> Result<&mut Self, InvalidArgument> {
        self.language = Some(non_empty("language", value.into())?);
        Ok(self)
    }

    /// Sets the document title.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Empty`] if the value is empty.
    pub fn set_document_title(
        &mut self,
        value: impl Into<String>,
    ) -> Result<&mut Self, InvalidArgument> {
        self.title = Some(non_empty("document title", value.into())?);
        Ok(self)
    }

    /// Sets the document type (e.g. "Security Advisory").
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Empty`] if the value is empty.
    pub fn set_document_type(
        &mut self,
        value: impl Into<String>,
    ) -> Result<&mut Self, InvalidArgument> {
        self.document_type = Some(non_empty("document type", value.into())?);
        Ok(self)
    }

    /// Sets the publisher type.
    ///
    /// Accepts `vendor`, `discoverer`, `coordinator`, `user` or `other`,
    /// ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Publisher`] for any other value.
    pub fn set_document_publisher(&mut self, value: &str) -> Result<&mut Self, InvalidArgument> {
        self.publisher = Some(value.parse()?);
        Ok(self)
    }

    /// Sets the tracking identification id.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Empty`] if the value is empty.
    pub fn set_identification(
        &mut self,
        value: impl Into<String>,
    ) -> Result<&mut Self, InvalidArgument> {
        self.tracking.identification = Some(non_empty("identification", value.into())?);
        Ok(self)
    }

    /// Sets the document status (e.g. "final").
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Empty`] if the value is empty.
    pub fn set_status(&mut self, value: impl Into<String>) -> Result<&mut Self, InvalidArgument> {
        self.tracking.status = Some(non_empty("status", value.into())?);
        Ok(self)
    }

    /// Sets the initial release date.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Empty`] if the value is empty.
    pub fn set_initial_release_date(
        &mut self,
        value: impl Into<String>,
    ) -> Result<&mut Self, InvalidArgument> {
        self.tracking.initial_release_date =
            Some(non_empty("initial release date", value.into())?);
        Ok(self)
    }

    /// Sets the current release date.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Empty`] if the value is empty.
    pub fn set_current_release_date(
        &mut self,
        value: impl Into<String>,
    ) -> Result<&mut Self, InvalidArgument> {
        self.tracking.current_release_date =
            Some(non_empty("current release date", value.into())?);
        Ok(self)
    }

    /// Appends an entry to the revision history.
    ///
    /// # Errors
    ///
    /// Returns an error if the version, date or description is missing, or
    /// if the version is not a dotted numeric token.
    pub fn add_revision_history(
        &mut self,
        entry: RevisionEntry,
    ) -> Result<&mut Self, InvalidArgument> {
        self.tracking.revisions.push(Revision::try_from(entry)?);
        Ok(self)
    }

    /// Appends each revision in turn.
    ///
    /// This does not replace the existing history, and it is not atomic.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::EmptyList`] if no entries are given, or the
    /// error for the first invalid entry.
    pub fn set_revision_history(
        &mut self,
        entries: impl IntoIterator<Item = RevisionEntry>,
    ) -> Result<&mut Self, InvalidArgument> {
        let mut entries = entries.into_iter().peekable();
        if entries.peek().is_none() {
            return Err(InvalidArgument::EmptyList("revision history"));
        }
        for entry in entries {
            self.add_revision_history(entry)?;
        }
        Ok(self)
    }

    /// Appends a document note.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::MissingField`] if the title, audience,
    /// type or note text is missing.
    pub fn add_document_note(&mut self, entry: NoteEntry) -> Result<&mut Self, InvalidArgument> {
        self.notes.push(Note::try_from(entry)?);
        Ok(self)
    }

    /// Appends each document note in turn. Not atomic.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::EmptyList`] if no entries are given, or the
    /// error for the first invalid entry.
    pub fn set_document_notes(
        &mut self,
        entries: impl IntoIterator<Item = NoteEntry>,
    ) -> Result<&mut Self, InvalidArgument> {
        let mut entries = entries.into_iter().peekable();
        if entries.peek().is_none() {
            return Err(InvalidArgument::EmptyList("document notes"));
        }
        for entry in entries {
            self.add_document_note(entry)?;
        }
        Ok(self)
    }

    /// Appends a product to the product list.
    pub fn add_product(&mut self, product: Product) -> &mut Self {
        self.products.push(product);
        self
    }

    /// Appends each product in turn.
    pub fn set_products(&mut self, products: impl IntoIterator<Item = Product>) -> &mut Self {
        for product in products {
            self.add_product(product);
        }
        self
    }

    /// Appends a vulnerability.
    pub fn add_vulnerability(&mut self, vulnerability: Vulnerability) -> &mut Self {
        self.vulnerabilities.push(vulnerability);
        self
    }

    /// Appends each vulnerability in turn.
    pub fn set_vulnerabilities(
        &mut self,
        vulnerabilities: impl IntoIterator<Item = Vulnerability>,
    ) -> &mut Self {
        for vulnerability in vulnerabilities {
            self.add_vulnerability(vulnerability);
        }
        self
    }

    /// The document encoding, `"UTF-8"` unless set.
    #[must_use]
    pub fn encoding(&self) -> &str {
        self.encoding
            .as_ref()
            .map_or(DEFAULT_ENCODING, NonEmptyString::as_str)
    }

    /// The document language.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_ref().map(NonEmptyString::as_str)
    }

    /// The document title.
    #[must_use]
    pub fn document_title(&self) -> Option<&str> {
        self.title.as_ref().map(NonEmptyString::as_str)
    }

    /// The document type.
    #[must_use]
    pub fn document_type(&self) -> Option<&str> {
        self.document_type.as_ref().map(NonEmptyString::as_str)
    }

    /// The publisher type.
    #[must_use]
    pub const fn document_publisher(&self) -> Option<Publisher> {
        self.publisher
    }

    /// The tracking identification id.
    #[must_use]
    pub fn identification(&self) -> Option<&str> {
        self.tracking
            .identification
            .as_ref()
            .map(NonEmptyString::as_str)
    }

    /// The document status, as supplied.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.tracking.status.as_ref().map(NonEmptyString::as_str)
    }

    /// The initial release date.
    #[must_use]
    pub fn initial_release_date(&self) -> Option<&str> {
        self.tracking
            .initial_release_date
            .as_ref()
            .map(NonEmptyString::as_str)
    }

    /// The current release date.
    #[must_use]
    pub fn current_release_date(&self) -> Option<&str> {
        self.tracking
            .current_release_date
            .as_ref()
            .map(NonEmptyString::as_str)
    }

    /// The revision history, in insertion order.
    #[must_use]
    pub fn revision_history(&self) -> &[Revision] {
        &self.tracking.revisions
    }

    /// The document notes, in insertion order.
    #[must_use]
    pub fn document_notes(&self) -> &[Note] {
        &self.notes
    }

    /// The product list, in insertion order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The vulnerabilities, in insertion order.
    #[must_use]
    pub fn vulnerabilities(&self) -> &[Vulnerability] {
        &self.vulnerabilities
    }
}
