use non_empty_string::NonEmptyString;

use crate::domain::{InvalidArgument, Note, NoteEntry, non_empty};

/// A vulnerability described by the advisory.
///
/// The title is optional here and only becomes mandatory when the document
/// is rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vulnerability {
    title: Option<NonEmptyString>,
    notes: Vec<Note>,
}

impl Vulnerability {
    /// Creates a vulnerability with no title and no notes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the vulnerability title.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Empty`] if the title is empty.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<&mut Self, InvalidArgument> {
        self.title = Some(non_empty("vulnerability title", title.into())?);
        Ok(self)
    }

    /// Appends a note.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::MissingField`] if the entry is incomplete.
    pub fn add_note(&mut self, entry: NoteEntry) -> Result<&mut Self, InvalidArgument> {
        self.notes.push(Note::try_from(entry)?);
        Ok(self)
    }

    /// Appends each note in turn.
    ///
    /// This is not atomic: notes before the first invalid entry stay
    /// appended.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::EmptyList`] if no entries are given, or the
    /// error for the first invalid entry.
    pub fn set_notes(
        &mut self,
        entries: impl IntoIterator<Item = NoteEntry>,
    ) -> Result<&mut Self, InvalidArgument> {
        let mut entries = entries.into_iter().peekable();
        if entries.peek().is_none() {
            return Err(InvalidArgument::EmptyList("vulnerability notes"));
        }
        for entry in entries {
            self.add_note(entry)?;
        }
        Ok(self)
    }

    /// The vulnerability title, if set.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_ref().map(NonEmptyString::as_str)
    }

    /// The notes, in insertion order.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}
