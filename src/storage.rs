mod source;

pub use source::{AdvisorySource, LoadError, load_document};
