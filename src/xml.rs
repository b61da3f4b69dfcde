//! A minimal owned XML tree and pretty-printing serializer.
//!
//! Elements are built bottom-up and appended to their parents. Namespaces
//! are attached to elements at creation time and written as default
//! namespace declarations (`xmlns="..."`) wherever the namespace in scope
//! changes. Unqualified children inherit the namespace of their parent.
//!
//! Characters that XML 1.0 does not allow (most C0 controls) are replaced
//! with U+FFFD on output so the result is always well-formed.

use std::fmt;

/// A node in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A child element.
    Element(Element),
    /// Character data.
    Text(String),
}

/// An XML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    namespace: Option<&'static str>,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an element with no namespace of its own.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element in the given namespace.
    #[must_use]
    pub fn with_namespace(name: impl Into<String>, namespace: &'static str) -> Self {
        Self {
            namespace: Some(namespace),
            ..Self::new(name)
        }
    }

    /// Creates an element containing only the given text.
    #[must_use]
    pub fn text_element(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        element.append_text(text);
        element
    }

    /// Sets an attribute, replacing any existing value.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        if let Some(existing) = self.attributes.iter_mut().find(|(n, _)| *n == name) {
            existing.1 = value;
        } else {
            self.attributes.push((name, value));
        }
        self
    }

    /// Appends a child element.
    pub fn append_child(&mut self, child: Self) -> &mut Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Appends a text node.
    pub fn append_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// The element name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The namespace this element was created in, if any.
    #[must_use]
    pub const fn namespace(&self) -> Option<&'static str> {
        self.namespace
    }

    /// Looks up an attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All child nodes, in order.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// The child elements, in order.
    pub fn elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// The first child element with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.elements().find(|element| element.name == name)
    }

    /// The concatenated text of the direct text children.
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    fn has_text(&self) -> bool {
        self.children
            .iter()
            .any(|node| matches!(node, Node::Text(_)))
    }

    fn write_to(
        &self,
        out: &mut String,
        format: Format,
        depth: usize,
        scope: Option<&'static str>,
    ) {
        out.push_str(&" ".repeat(format.indent * depth));
        self.write_inline(out, format, depth, scope);
    }

    fn write_inline(
        &self,
        out: &mut String,
        format: Format,
        depth: usize,
        scope: Option<&'static str>,
    ) {
        out.push('<');
        out.push_str(&self.name);
        if let Some(namespace) = self.namespace.filter(|ns| Some(*ns) != scope) {
            write_attribute(out, "xmlns", namespace, format);
        }
        for (name, value) in &self.attributes {
            write_attribute(out, name, value, format);
        }

        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');

        let scope = self.namespace.or(scope);
        if self.has_text() {
            // mixed content is written without formatting
            for child in &self.children {
                match child {
                    Node::Text(text) => out.push_str(&escape_text(text, format.ascii_only)),
                    Node::Element(element) => {
                        element.write_inline(out, Format { indent: 0, ..format }, 0, scope);
                    }
                }
            }
        } else {
            for element in self.elements() {
                out.push('\n');
                element.write_to(out, format, depth + 1, scope);
            }
            out.push('\n');
            out.push_str(&" ".repeat(format.indent * depth));
        }

        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

#[derive(Debug, Clone, Copy)]
struct Format {
    indent: usize,
    /// Write every non-ASCII character as a character reference.
    ascii_only: bool,
}

fn write_attribute(out: &mut String, name: &str, value: &str, format: Format) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attribute(value, format.ascii_only));
    out.push('"');
}

/// A complete XML document: declaration plus root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    encoding: String,
    root: Element,
}

impl XmlDocument {
    /// The default indentation width.
    pub const DEFAULT_INDENT: usize = 2;

    /// Creates a document with the given declared encoding.
    #[must_use]
    pub fn new(encoding: impl Into<String>, root: Element) -> Self {
        Self {
            encoding: encoding.into(),
            root,
        }
    }

    /// The encoding written to the XML declaration.
    #[must_use]
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// Replaces the declared encoding.
    pub fn set_encoding(&mut self, encoding: impl Into<String>) {
        self.encoding = encoding.into();
    }

    /// The document element.
    #[must_use]
    pub const fn root(&self) -> &Element {
        &self.root
    }

    /// Serializes the document, indenting nested elements by `indent` spaces
    /// per level.
    ///
    /// Unless the declared encoding is UTF-8, every non-ASCII character is
    /// written as a character reference (`&#xE9;`), so the text is pure
    /// ASCII and reads the same under any ASCII-compatible encoding.
    #[must_use]
    pub fn to_string_pretty(&self, indent: usize) -> String {
        let format = Format {
            indent,
            ascii_only: !is_utf8(&self.encoding),
        };

        let mut out = String::from("<?xml version=\"1.0\" encoding=\"");
        out.push_str(&escape_attribute(&self.encoding, true));
        out.push_str("\"?>\n");
        self.root.write_to(&mut out, format, 0, None);
        out.push('\n');
        out
    }
}

impl fmt::Display for XmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_string_pretty(Self::DEFAULT_INDENT))
    }
}

fn is_utf8(encoding: &str) -> bool {
    encoding.trim().eq_ignore_ascii_case("UTF-8") || encoding.trim().eq_ignore_ascii_case("UTF8")
}

/// Whether XML 1.0 allows the character to appear in a document at all.
const fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

fn escape_text(s: &str, ascii_only: bool) -> String {
    escape(s, ascii_only, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '\r' => Some("&#13;"),
        _ => None,
    })
}

fn escape_attribute(s: &str, ascii_only: bool) -> String {
    escape(s, ascii_only, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\n' => Some("&#10;"),
        '\r' => Some("&#13;"),
        '\t' => Some("&#9;"),
        _ => None,
    })
}

/// Characters XML cannot represent become U+FFFD.
fn escape(s: &str, ascii_only: bool, entity: impl Fn(char) -> Option<&'static str>) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if let Some(entity) = entity(c) {
            escaped.push_str(entity);
            continue;
        }
        let c = if is_xml_char(c) {
            c
        } else {
            char::REPLACEMENT_CHARACTER
        };
        if ascii_only && !c.is_ascii() {
            escaped.push_str(&format!("&#x{:X};", u32::from(c)));
        } else {
            escaped.push(c);
        }
    }
    escaped
}
