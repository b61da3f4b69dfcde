//! Rendering of advisory documents as CVRF 1.1 XML.
//!
//! The [`Renderer`] walks a [`Document`](crate::Document) in a fixed order
//! (header, tracking, notes, product tree, vulnerabilities) and enforces the
//! fields a complete document needs.

mod namespace;
pub use namespace::Namespace;

mod renderer;
pub use renderer::{Rendered, Renderer};

mod violation;
pub use violation::{RenderViolation, RequiredField};
