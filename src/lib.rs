//! Build and render CVRF security advisories
//!
//! An advisory is assembled in a [`Document`], whose setters reject malformed
//! values, and turned into CVRF 1.1 XML by a [`Renderer`], which checks that
//! everything a complete advisory needs is present.

pub mod domain;
pub use domain::{
    Config, Document, InvalidArgument, NoteEntry, Product, Publisher, RevisionEntry, Version,
    Vulnerability,
};

pub mod render;
pub use render::{RenderViolation, Rendered, Renderer};

/// Loading advisory descriptions from YAML and TOML files.
pub mod storage;
pub use storage::{AdvisorySource, LoadError};

pub mod xml;
