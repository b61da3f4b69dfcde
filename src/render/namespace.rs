use crate::xml::Element;

/// The XML namespaces of the CVRF 1.1 schema family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// The document root namespace.
    Cvrf,
    /// The product tree namespace.
    Prod,
    /// The vulnerability namespace.
    Vuln,
}

impl Namespace {
    /// The namespace URI.
    #[must_use]
    pub const fn uri(self) -> &'static str {
        match self {
            Self::Cvrf => "http://www.icasi.org/CVRF/schema/cvrf/1.1",
            Self::Prod => "http://www.icasi.org/CVRF/schema/prod/1.1",
            Self::Vuln => "http://www.icasi.org/CVRF/schema/vuln/1.1",
        }
    }

    /// Creates an element in this namespace.
    #[must_use]
    pub fn element(self, name: &str) -> Element {
        Element::with_namespace(name, self.uri())
    }
}
