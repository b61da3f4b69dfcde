use std::{io, path::Path};

use serde::Deserialize;

use crate::domain::{
    Document, InvalidArgument, NoteEntry, Product, RevisionEntry, Vulnerability,
};

/// An advisory as described in a YAML or TOML file.
///
/// This is a plain description; it is only checked when it is turned into a
/// [`Document`] through the document's own setters.
///
/// ```yaml
/// title: Acme Widget buffer overflow
/// type: Security Advisory
/// publisher: vendor
/// tracking:
///   id: ACME-2013-001
///   status: final
///   initial_release_date: 2013-05-01T00:00:00Z
///   current_release_date: 2013-05-01T00:00:00Z
///   revisions:
///     - version: "1.0"
///       date: 2013-05-01T00:00:00Z
///       description: Initial release
/// products:
///   - name: Acme Widget 1.0
///     branches:
///       - type: Vendor
///         name: Acme
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdvisorySource {
    encoding: Option<String>,
    language: Option<String>,
    title: Option<String>,
    #[serde(rename = "type")]
    document_type: Option<String>,
    publisher: Option<String>,
    #[serde(default)]
    tracking: TrackingSource,
    #[serde(default)]
    notes: Vec<NoteEntry>,
    #[serde(default)]
    products: Vec<ProductSource>,
    #[serde(default)]
    vulnerabilities: Vec<VulnerabilitySource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct TrackingSource {
    id: Option<String>,
    status: Option<String>,
    initial_release_date: Option<String>,
    current_release_date: Option<String>,
    #[serde(default)]
    revisions: Vec<RevisionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProductSource {
    name: String,
    id: Option<String>,
    #[serde(default)]
    branches: Vec<BranchSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct BranchSource {
    #[serde(rename = "type")]
    branch_type: String,
    name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct VulnerabilitySource {
    title: Option<String>,
    #[serde(default)]
    notes: Vec<NoteEntry>,
}

impl AdvisorySource {
    /// Reads an advisory description from a file.
    ///
    /// The format is chosen by extension: `.yaml`/`.yml` or `.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is not recognised, the file cannot be
    /// read, or its content cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let parse: fn(&str) -> Result<Self, LoadError> = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str,
            "toml" => Self::from_toml_str,
            _ => return Err(LoadError::UnsupportedFormat(path.display().to_string())),
        };

        let content = std::fs::read_to_string(path)?;
        tracing::debug!("Loaded advisory source from {}", path.display());
        parse(&content)
    }

    /// Parses an advisory description from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Yaml`] if the content is not a valid description.
    pub fn from_yaml_str(content: &str) -> Result<Self, LoadError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parses an advisory description from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Toml`] if the content is not a valid description.
    pub fn from_toml_str(content: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(content)?)
    }

    /// Builds a [`Document`] by passing every value through its setters.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidArgument`] raised by the document model.
    pub fn into_document(self) -> Result<Document, InvalidArgument> {
        let Self {
            encoding,
            language,
            title,
            document_type,
            publisher,
            tracking,
            notes,
            products,
            vulnerabilities,
        } = self;

        let mut document = Document::new();

        if let Some(encoding) = encoding {
            document.set_encoding(encoding)?;
        }
        if let Some(language) = language {
            document.set_language(language)?;
        }
        if let Some(title) = title {
            document.set_document_title(title)?;
        }
        if let Some(document_type) = document_type {
            document.set_document_type(document_type)?;
        }
        if let Some(publisher) = publisher {
            document.set_document_publisher(&publisher)?;
        }

        if let Some(id) = tracking.id {
            document.set_identification(id)?;
        }
        if let Some(status) = tracking.status {
            document.set_status(status)?;
        }
        if let Some(date) = tracking.initial_release_date {
            document.set_initial_release_date(date)?;
        }
        if let Some(date) = tracking.current_release_date {
            document.set_current_release_date(date)?;
        }
        for revision in tracking.revisions {
            document.add_revision_history(revision)?;
        }

        for note in notes {
            document.add_document_note(note)?;
        }

        for source in products {
            let mut product = Product::new(source.name)?;
            if let Some(id) = source.id {
                product = product.with_id(id)?;
            }
            for branch in source.branches {
                product = product.with_branch(branch.branch_type, branch.name)?;
            }
            document.add_product(product);
        }

        for source in vulnerabilities {
            let mut vulnerability = Vulnerability::new();
            if let Some(title) = source.title {
                vulnerability.set_title(title)?;
            }
            for note in source.notes {
                vulnerability.add_note(note)?;
            }
            document.add_vulnerability(vulnerability);
        }

        Ok(document)
    }
}

/// Loads an advisory description from a file and builds its [`Document`].
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or if any value is rejected
/// by the document model.
pub fn load_document(path: &Path) -> Result<Document, LoadError> {
    Ok(AdvisorySource::load(path)?.into_document()?)
}

/// Errors that can occur when loading an advisory description.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file extension is not a supported format.
    #[error("unsupported advisory format for '{0}': expected .yaml, .yml or .toml")]
    UnsupportedFormat(String),
    /// An I/O error occurred.
    #[error("failed to read advisory")]
    Io(#[from] io::Error),
    /// The YAML could not be parsed.
    #[error("failed to parse YAML advisory")]
    Yaml(#[from] serde_yaml::Error),
    /// The TOML could not be parsed.
    #[error("failed to parse TOML advisory")]
    Toml(#[from] toml::de::Error),
    /// A value was rejected by the document model.
    #[error("invalid advisory")]
    Invalid(#[from] InvalidArgument),
}
