// Caller-supplied collection entries and their validated forms.

use non_empty_string::NonEmptyString;
use serde::Deserialize;

use crate::domain::{InvalidArgument, Version};

/// Takes a required sub-field out of an entry, treating empty strings as
/// missing.
fn required(
    value: Option<String>,
    entry: &'static str,
    field: &'static str,
) -> Result<NonEmptyString, InvalidArgument> {
    value
        .and_then(|value| NonEmptyString::new(value).ok())
        .ok_or(InvalidArgument::MissingField { entry, field })
}

/// An unvalidated revision history entry.
///
/// All three fields must be present for the entry to be accepted by
/// [`Document::add_revision_history`](crate::Document::add_revision_history).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RevisionEntry {
    /// The revision number, a dotted numeric version.
    pub version: Option<String>,
    /// The date of the revision.
    pub date: Option<String>,
    /// What changed in this revision.
    pub description: Option<String>,
}

impl RevisionEntry {
    /// Construct an entry with every field supplied.
    #[must_use]
    pub fn new(
        version: impl Into<String>,
        date: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            version: Some(version.into()),
            date: Some(date.into()),
            description: Some(description.into()),
        }
    }
}

/// A validated entry in the revision history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    number: Version,
    date: NonEmptyString,
    description: NonEmptyString,
}

impl Revision {
    /// The revision number.
    #[must_use]
    pub const fn number(&self) -> &Version {
        &self.number
    }

    /// The revision date, verbatim.
    #[must_use]
    pub fn date(&self) -> &str {
        self.date.as_str()
    }

    /// The description of the revision.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

impl TryFrom<RevisionEntry> for Revision {
    type Error = InvalidArgument;

    fn try_from(entry: RevisionEntry) -> Result<Self, Self::Error> {
        let RevisionEntry {
            version,
            date,
            description,
        } = entry;

        let number = required(version, "revision", "version")?;
        let date = required(date, "revision", "date")?;
        let description = required(description, "revision", "description")?;
        let number = Version::new(number.as_str().to_string())?;

        Ok(Self {
            number,
            date,
            description,
        })
    }
}

/// An unvalidated note, used both for document notes and vulnerability notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NoteEntry {
    /// The note's title.
    pub title: Option<String>,
    /// The intended audience.
    pub audience: Option<String>,
    /// The note type (e.g. "General", "Summary").
    #[serde(rename = "type")]
    pub note_type: Option<String>,
    /// The body of the note.
    pub note: Option<String>,
}

impl NoteEntry {
    /// Construct an entry with every field supplied.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        audience: impl Into<String>,
        note_type: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            audience: Some(audience.into()),
            note_type: Some(note_type.into()),
            note: Some(note.into()),
        }
    }
}

/// A validated note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    title: NonEmptyString,
    audience: NonEmptyString,
    note_type: NonEmptyString,
    text: NonEmptyString,
}

impl Note {
    /// The note's title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// The intended audience.
    #[must_use]
    pub fn audience(&self) -> &str {
        self.audience.as_str()
    }

    /// The note type.
    #[must_use]
    pub fn note_type(&self) -> &str {
        self.note_type.as_str()
    }

    /// The body of the note.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }
}

impl TryFrom<NoteEntry> for Note {
    type Error = InvalidArgument;

    fn try_from(entry: NoteEntry) -> Result<Self, Self::Error> {
        let NoteEntry {
            title,
            audience,
            note_type,
            note,
        } = entry;

        Ok(Self {
            title: required(title, "note", "title")?,
            audience: required(audience, "note", "audience")?,
            note_type: required(note_type, "note", "type")?,
            text: required(note, "note", "note")?,
        })
    }
}
