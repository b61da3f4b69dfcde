use non_empty_string::NonEmptyString;
use tracing::instrument;

use crate::{
    domain::{
        Document, InvalidArgument, Note, Product, Revision, Version, Vulnerability, check_encoding,
    },
    render::{Namespace, RenderViolation, RequiredField},
    xml::{Element, XmlDocument},
};

/// Renders a [`Document`] as CVRF 1.1 XML.
///
/// By default rendering is strict: the first missing required field aborts
/// the render. With [`Renderer::ignore_violations`] enabled, missing fields
/// are collected on the returned [`Rendered`] instead, the affected element
/// is left out, and rendering carries on.
///
/// ```
/// use cvrf_writer::{Document, Renderer, render::RequiredField};
///
/// let document = Document::new();
///
/// let error = Renderer::new(&document).render().unwrap_err();
/// assert_eq!(error.field(), RequiredField::DocumentTitle);
///
/// let rendered = Renderer::new(&document)
///     .ignore_violations(true)
///     .render()
///     .unwrap();
/// assert!(!rendered.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct Renderer<'a> {
    document: &'a Document,
    encoding: Option<NonEmptyString>,
    ignore_violations: bool,
}

impl<'a> Renderer<'a> {
    /// Creates a strict renderer for the given document.
    #[must_use]
    pub const fn new(document: &'a Document) -> Self {
        Self {
            document,
            encoding: None,
            ignore_violations: false,
        }
    }

    /// The document being rendered.
    #[must_use]
    pub const fn document(&self) -> &'a Document {
        self.document
    }

    /// Overrides the encoding written to the XML declaration.
    ///
    /// The document's own encoding is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::Empty`] if the value is empty, or
    /// [`InvalidArgument::Encoding`] for encodings that are not
    /// ASCII-compatible.
    pub fn set_encoding(
        &mut self,
        encoding: impl Into<String>,
    ) -> Result<&mut Self, InvalidArgument> {
        self.encoding = Some(check_encoding(encoding.into())?);
        Ok(self)
    }

    /// The encoding that will be declared: the override if one was set,
    /// otherwise the document's encoding.
    #[must_use]
    pub fn encoding(&self) -> &str {
        self.encoding
            .as_ref()
            .map_or_else(|| self.document.encoding(), NonEmptyString::as_str)
    }

    /// Chooses between strict (`false`, the default) and tolerant (`true`)
    /// handling of missing required fields.
    pub const fn ignore_violations(&mut self, ignore: bool) -> &mut Self {
        self.ignore_violations = ignore;
        self
    }

    /// Whether missing required fields are collected rather than raised.
    #[must_use]
    pub const fn violations_ignored(&self) -> bool {
        self.ignore_violations
    }

    /// Builds the XML tree from the current state of the document.
    ///
    /// Each call starts from scratch, so the same document always renders to
    /// the same output.
    ///
    /// # Errors
    ///
    /// In strict mode, returns the first missing required field, in document
    /// order. In tolerant mode this never fails.
    #[instrument(level = "debug", skip(self), fields(tolerant = self.ignore_violations))]
    pub fn render(&self) -> Result<Rendered, RenderViolation> {
        let mut pass = Pass::new(self.ignore_violations);
        let document = self.document;

        let mut root = Namespace::Cvrf.element("cvrfdoc");
        if let Some(language) = document.language() {
            root.set_attribute("xml:lang", language);
        }

        render_header(document, &mut root, &mut pass)?;
        root.append_child(render_tracking(document, &mut pass)?);

        if !document.document_notes().is_empty() {
            root.append_child(render_document_notes(document.document_notes()));
        }

        if let Some(product_tree) = render_product_tree(document.products(), &mut pass)? {
            root.append_child(product_tree);
        }

        for (index, vulnerability) in document.vulnerabilities().iter().enumerate() {
            root.append_child(render_vulnerability(index + 1, vulnerability, &mut pass)?);
        }

        let mut xml = XmlDocument::new(document.encoding(), root);
        if let Some(encoding) = &self.encoding {
            xml.set_encoding(encoding.as_str());
        }

        tracing::debug!(violations = pass.violations.len(), "rendered document");
        Ok(Rendered {
            xml,
            violations: pass.violations,
        })
    }
}

/// The output of a successful [`Renderer::render`] call.
///
/// After a tolerant render the tree may be missing required elements; check
/// [`Rendered::violations`] before treating it as a valid advisory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    xml: XmlDocument,
    violations: Vec<RenderViolation>,
}

impl Rendered {
    /// The rendered XML tree.
    #[must_use]
    pub const fn document(&self) -> &XmlDocument {
        &self.xml
    }

    /// Missing required fields collected during a tolerant render, in
    /// document order.
    #[must_use]
    pub fn violations(&self) -> &[RenderViolation] {
        &self.violations
    }

    /// Whether no required field was missing.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.violations.is_empty()
    }

    /// Serializes the document with the default indentation.
    #[must_use]
    pub fn to_xml(&self) -> String {
        self.xml.to_string_pretty(XmlDocument::DEFAULT_INDENT)
    }

    /// Serializes the document with `indent` spaces per level.
    #[must_use]
    pub fn to_xml_with_indent(&self, indent: usize) -> String {
        self.xml.to_string_pretty(indent)
    }

    /// Splits into the XML tree and the collected violations.
    #[must_use]
    pub fn into_parts(self) -> (XmlDocument, Vec<RenderViolation>) {
        (self.xml, self.violations)
    }
}

/// State for a single render call.
struct Pass {
    tolerant: bool,
    violations: Vec<RenderViolation>,
}

impl Pass {
    const fn new(tolerant: bool) -> Self {
        Self {
            tolerant,
            violations: Vec::new(),
        }
    }

    fn violation(&mut self, field: RequiredField) -> Result<(), RenderViolation> {
        let violation = RenderViolation::new(field);
        if !self.tolerant {
            return Err(violation);
        }
        tracing::warn!(%field, "missing required field");
        self.violations.push(violation);
        Ok(())
    }

    /// Passes a present value through, or records it as missing.
    fn require<T>(
        &mut self,
        field: RequiredField,
        value: Option<T>,
    ) -> Result<Option<T>, RenderViolation> {
        if value.is_none() {
            self.violation(field)?;
        }
        Ok(value)
    }
}

fn render_header(
    document: &Document,
    root: &mut Element,
    pass: &mut Pass,
) -> Result<(), RenderViolation> {
    if let Some(title) = pass.require(RequiredField::DocumentTitle, document.document_title())? {
        root.append_child(Element::text_element("DocumentTitle", title));
    }

    if let Some(document_type) =
        pass.require(RequiredField::DocumentType, document.document_type())?
    {
        root.append_child(Element::text_element("DocumentType", document_type));
    }

    if let Some(publisher) =
        pass.require(RequiredField::DocumentPublisher, document.document_publisher())?
    {
        let mut element = Element::new("DocumentPublisher");
        element.set_attribute("Type", publisher.as_str());
        root.append_child(element);
    }

    Ok(())
}

fn render_tracking(document: &Document, pass: &mut Pass) -> Result<Element, RenderViolation> {
    let mut tracking = Element::new("DocumentTracking");

    if let Some(id) = pass.require(RequiredField::Identification, document.identification())? {
        let mut identification = Element::new("Identification");
        identification.append_child(Element::text_element("ID", id));
        tracking.append_child(identification);
    }

    if let Some(status) = pass.require(RequiredField::Status, document.status())? {
        tracking.append_child(Element::text_element("Status", capitalize(status)));
    }

    let revisions = document.revision_history();
    if let Some(version) =
        pass.require(RequiredField::RevisionHistory, latest_version(revisions))?
    {
        tracking.append_child(Element::text_element("Version", version.as_str()));

        let mut history = Element::new("RevisionHistory");
        for revision in revisions {
            let mut element = Element::new("Revision");
            element
                .append_child(Element::text_element("Number", revision.number().as_str()))
                .append_child(Element::text_element("Date", revision.date()))
                .append_child(Element::text_element("Description", revision.description()));
            history.append_child(element);
        }
        tracking.append_child(history);
    }

    if let Some(date) =
        pass.require(RequiredField::InitialReleaseDate, document.initial_release_date())?
    {
        tracking.append_child(Element::text_element("InitialReleaseDate", date));
    }

    if let Some(date) =
        pass.require(RequiredField::CurrentReleaseDate, document.current_release_date())?
    {
        tracking.append_child(Element::text_element("CurrentReleaseDate", date));
    }

    Ok(tracking)
}

fn render_document_notes(notes: &[Note]) -> Element {
    let mut element = Element::new("DocumentNotes");
    for (index, note) in notes.iter().enumerate() {
        element.append_child(note_element(note, format!("{:03}", index + 1)));
    }
    element
}

fn render_product_tree(
    products: &[Product],
    pass: &mut Pass,
) -> Result<Option<Element>, RenderViolation> {
    if products.is_empty() {
        pass.violation(RequiredField::ProductTree)?;
        return Ok(None);
    }

    let mut ids = ProductIds::default();
    let mut tree = Namespace::Prod.element("ProductTree");
    for product in products {
        tree.append_child(product_element(product, ids.assign(product)));
    }
    Ok(Some(tree))
}

/// Builds the linear branch chain for one product, with the product name as
/// the leaf of the last branch.
fn product_element(product: &Product, id: String) -> Element {
    let mut leaf = Element::text_element("FullProductName", product.name());
    leaf.set_attribute("ProductID", id);

    product
        .branches()
        .iter()
        .rev()
        .fold(leaf, |child, branch| {
            let mut element = Element::new("Branch");
            element
                .set_attribute("Type", branch.branch_type())
                .set_attribute("Name", branch.name())
                .append_child(child);
            element
        })
}

fn render_vulnerability(
    ordinal: usize,
    vulnerability: &Vulnerability,
    pass: &mut Pass,
) -> Result<Element, RenderViolation> {
    let mut element = Namespace::Vuln.element("Vulnerability");
    element.set_attribute("Ordinal", ordinal.to_string());

    if let Some(title) = pass.require(
        RequiredField::VulnerabilityTitle { ordinal },
        vulnerability.title(),
    )? {
        element.append_child(Element::text_element("Title", title));
    }

    if !vulnerability.notes().is_empty() {
        let mut notes = Element::new("Notes");
        for (index, note) in vulnerability.notes().iter().enumerate() {
            notes.append_child(note_element(note, (index + 1).to_string()));
        }
        element.append_child(notes);
    }

    Ok(element)
}

fn note_element(note: &Note, ordinal: String) -> Element {
    let mut element = Element::text_element("Note", note.text());
    element
        .set_attribute("Title", note.title())
        .set_attribute("Audience", note.audience())
        .set_attribute("Type", note.note_type())
        .set_attribute("Ordinal", ordinal);
    element
}

/// Hands out generated ids (`CVRFPID-0001`, ...) to products without an
/// explicit one.
#[derive(Debug, Default)]
struct ProductIds {
    generated: usize,
}

impl ProductIds {
    fn assign(&mut self, product: &Product) -> String {
        if let Some(id) = product.id() {
            return id.to_string();
        }
        self.generated += 1;
        let id = format!("CVRFPID-{:04}", self.generated);
        tracing::debug!(product = product.name(), %id, "generated product id");
        id
    }
}

/// The greatest revision number. The first revision seeds the maximum and is
/// only replaced by a strictly greater one.
fn latest_version(revisions: &[Revision]) -> Option<&Version> {
    let mut numbers = revisions.iter().map(Revision::number);
    let first = numbers.next()?;
    Some(numbers.fold(first, |max, number| if number > max { number } else { max }))
}

/// Upper-cases the first character and lower-cases the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::domain::{NoteEntry, RevisionEntry};

    fn populated() -> Document {
        let mut document = Document::new();
        document
            .set_language("en")
            .unwrap()
            .set_document_title("Acme Widget buffer overflow")
            .unwrap()
            .set_document_type("Security Advisory")
            .unwrap()
            .set_document_publisher("VENDOR")
            .unwrap()
            .set_identification("ACME-2013-001")
            .unwrap()
            .set_status("FINAL")
            .unwrap()
            .set_initial_release_date("2013-05-01T00:00:00Z")
            .unwrap()
            .set_current_release_date("2013-06-01T00:00:00Z")
            .unwrap()
            .set_revision_history([
                RevisionEntry::new("1.0", "2013-05-01T00:00:00Z", "Initial release"),
                RevisionEntry::new("2.3", "2013-05-15T00:00:00Z", "Added workaround"),
                RevisionEntry::new("2.10", "2013-06-01T00:00:00Z", "Added fix"),
            ])
            .unwrap()
            .set_document_notes([
                NoteEntry::new("Summary", "All", "Summary", "A buffer overflow."),
                NoteEntry::new("Legal", "All", "Legal Disclaimer", "As is."),
            ])
            .unwrap();

        document.add_product(
            Product::new("Acme Widget 1.0")
                .unwrap()
                .with_branch("Vendor", "Acme")
                .unwrap()
                .with_branch("Product Family", "Widgets")
                .unwrap(),
        );

        let mut first = Vulnerability::new();
        first
            .set_title("Overflow in parser")
            .unwrap()
            .set_notes([
                NoteEntry::new("Details", "All", "Description", "Long input."),
                NoteEntry::new("Impact", "All", "Impact", "Code execution."),
            ])
            .unwrap();
        let mut second = Vulnerability::new();
        second
            .set_title("Denial of service")
            .unwrap()
            .add_note(NoteEntry::new("Details", "All", "Description", "Crash."))
            .unwrap();
        document.set_vulnerabilities([first, second]);

        document
    }

    fn render(document: &Document) -> Rendered {
        Renderer::new(document).render().unwrap()
    }

    fn root(rendered: &Rendered) -> &Element {
        rendered.document().root()
    }

    fn ordinals<'a>(elements: impl Iterator<Item = &'a Element>) -> Vec<&'a str> {
        elements.filter_map(|e| e.attribute("Ordinal")).collect()
    }

    #[test]
    fn version_is_greatest_revision_numerically() {
        let rendered = render(&populated());
        let tracking = root(&rendered).child("DocumentTracking").unwrap();
        assert_eq!(tracking.child("Version").unwrap().text(), "2.10");
    }

    #[test]
    fn first_of_equal_versions_is_kept() {
        let revisions = [
            Revision::try_from(RevisionEntry::new("1.01", "d", "first")).unwrap(),
            Revision::try_from(RevisionEntry::new("1.1", "d", "second")).unwrap(),
        ];
        assert_eq!(latest_version(&revisions).unwrap().as_str(), "1.01");
        assert!(latest_version(&[]).is_none());
    }

    #[test]
    fn revision_history_is_emitted_verbatim_in_order() {
        let rendered = render(&populated());
        let history = root(&rendered)
            .child("DocumentTracking")
            .unwrap()
            .child("RevisionHistory")
            .unwrap();

        let revisions: Vec<Vec<(String, String)>> = history
            .elements()
            .map(|revision| {
                revision
                    .elements()
                    .map(|e| (e.name().to_string(), e.text()))
                    .collect()
            })
            .collect();

        assert_eq!(revisions.len(), 3);
        assert_eq!(
            revisions[1],
            [
                ("Number".to_string(), "2.3".to_string()),
                ("Date".to_string(), "2013-05-15T00:00:00Z".to_string()),
                ("Description".to_string(), "Added workaround".to_string()),
            ]
        );
    }

    #[test]
    fn tracking_children_are_in_schema_order() {
        let rendered = render(&populated());
        let names: Vec<_> = root(&rendered)
            .child("DocumentTracking")
            .unwrap()
            .elements()
            .map(Element::name)
            .collect();
        assert_eq!(
            names,
            [
                "Identification",
                "Status",
                "Version",
                "RevisionHistory",
                "InitialReleaseDate",
                "CurrentReleaseDate"
            ]
        );
    }

    #[test]
    fn release_dates_come_from_their_own_fields() {
        let rendered = render(&populated());
        let tracking = root(&rendered).child("DocumentTracking").unwrap();
        assert_eq!(
            tracking.child("InitialReleaseDate").unwrap().text(),
            "2013-05-01T00:00:00Z"
        );
        assert_eq!(
            tracking.child("CurrentReleaseDate").unwrap().text(),
            "2013-06-01T00:00:00Z"
        );
    }

    #[test]
    fn publisher_and_status_are_capitalised() {
        let rendered = render(&populated());
        let root = root(&rendered);
        assert_eq!(
            root.child("DocumentPublisher").unwrap().attribute("Type"),
            Some("Vendor")
        );
        assert_eq!(
            root.child("DocumentTracking")
                .unwrap()
                .child("Status")
                .unwrap()
                .text(),
            "Final"
        );
    }

    #[test_case("final", "Final")]
    #[test_case("INTERIM", "Interim")]
    #[test_case("dRaFt", "Draft")]
    #[test_case("x", "X")]
    #[test_case("", ""; "empty")]
    fn capitalize_normalises_case(input: &str, expected: &str) {
        assert_eq!(capitalize(input), expected);
    }

    #[test]
    fn generated_product_ids_skip_explicit_ids() {
        let mut document = populated();
        document
            .add_product(Product::new("Second").unwrap())
            .add_product(Product::new("Third").unwrap().with_id("X-1").unwrap())
            .add_product(Product::new("Fourth").unwrap());

        let rendered = render(&document);
        let tree = root(&rendered).child("ProductTree").unwrap();

        fn deepest(element: &Element) -> &Element {
            element
                .child("Branch")
                .map_or_else(|| element, deepest)
        }
        let ids: Vec<_> = tree
            .elements()
            .map(|top| {
                let leaf = if top.name() == "FullProductName" {
                    top
                } else {
                    deepest(top).child("FullProductName").unwrap()
                };
                (leaf.text(), leaf.attribute("ProductID").unwrap().to_string())
            })
            .collect();

        assert_eq!(
            ids,
            [
                ("Acme Widget 1.0".to_string(), "CVRFPID-0001".to_string()),
                ("Second".to_string(), "CVRFPID-0002".to_string()),
                ("Third".to_string(), "X-1".to_string()),
                ("Fourth".to_string(), "CVRFPID-0003".to_string()),
            ]
        );
    }

    #[test]
    fn branches_form_a_linear_chain() {
        let rendered = render(&populated());
        let tree = root(&rendered).child("ProductTree").unwrap();

        assert_eq!(tree.elements().count(), 1);
        let vendor = tree.child("Branch").unwrap();
        assert_eq!(vendor.attribute("Type"), Some("Vendor"));
        assert_eq!(vendor.attribute("Name"), Some("Acme"));
        assert_eq!(vendor.elements().count(), 1);

        let family = vendor.child("Branch").unwrap();
        assert_eq!(family.attribute("Type"), Some("Product Family"));
        assert_eq!(family.attribute("Name"), Some("Widgets"));

        let leaf = family.child("FullProductName").unwrap();
        assert_eq!(leaf.text(), "Acme Widget 1.0");
    }

    #[test]
    fn products_do_not_share_branches() {
        let mut document = populated();
        document.add_product(
            Product::new("Acme Widget 2.0")
                .unwrap()
                .with_branch("Vendor", "Acme")
                .unwrap(),
        );
        let rendered = render(&document);
        let tree = root(&rendered).child("ProductTree").unwrap();
        assert_eq!(tree.elements().count(), 2);
    }

    #[test]
    fn document_note_ordinals_are_zero_padded() {
        let rendered = render(&populated());
        let notes = root(&rendered).child("DocumentNotes").unwrap();
        assert_eq!(ordinals(notes.elements()), ["001", "002"]);

        let first = notes.child("Note").unwrap();
        assert_eq!(first.attribute("Title"), Some("Summary"));
        assert_eq!(first.attribute("Audience"), Some("All"));
        assert_eq!(first.attribute("Type"), Some("Summary"));
        assert_eq!(first.text(), "A buffer overflow.");
    }

    #[test]
    fn vulnerability_ordinals_are_unpadded_and_note_ordinals_reset() {
        let rendered = render(&populated());
        let vulnerabilities: Vec<_> = root(&rendered)
            .elements()
            .filter(|e| e.name() == "Vulnerability")
            .collect();

        assert_eq!(ordinals(vulnerabilities.iter().copied()), ["1", "2"]);
        let note_ordinals: Vec<_> = vulnerabilities
            .iter()
            .map(|v| ordinals(v.child("Notes").unwrap().elements()))
            .collect();
        assert_eq!(note_ordinals, [vec!["1", "2"], vec!["1"]]);
        assert_eq!(
            vulnerabilities[1].child("Title").unwrap().text(),
            "Denial of service"
        );
    }

    #[test]
    fn optional_sections_are_omitted_when_empty() {
        let mut document = Document::new();
        document
            .set_document_title("T")
            .unwrap()
            .set_document_type("Security Advisory")
            .unwrap()
            .set_document_publisher("other")
            .unwrap()
            .set_identification("ID")
            .unwrap()
            .set_status("draft")
            .unwrap()
            .add_revision_history(RevisionEntry::new("1", "2013-01-01", "Initial"))
            .unwrap()
            .set_initial_release_date("2013-01-01")
            .unwrap()
            .set_current_release_date("2013-01-01")
            .unwrap()
            .add_product(Product::new("P").unwrap());

        let rendered = render(&document);
        let root = root(&rendered);
        assert_eq!(root.attribute("xml:lang"), None);
        assert!(root.child("DocumentNotes").is_none());
        assert!(root.child("Vulnerability").is_none());

        // a product without branches sits directly under the tree
        let tree = root.child("ProductTree").unwrap();
        assert_eq!(
            tree.child("FullProductName").unwrap().attribute("ProductID"),
            Some("CVRFPID-0001")
        );
    }

    #[test]
    fn namespaces_are_attached_to_root_products_and_vulnerabilities() {
        let rendered = render(&populated());
        let root = root(&rendered);
        assert_eq!(root.namespace(), Some(Namespace::Cvrf.uri()));
        assert_eq!(root.attribute("xml:lang"), Some("en"));
        assert_eq!(
            root.child("ProductTree").unwrap().namespace(),
            Some(Namespace::Prod.uri())
        );
        assert_eq!(
            root.child("Vulnerability").unwrap().namespace(),
            Some(Namespace::Vuln.uri())
        );
        assert_eq!(root.child("DocumentTitle").unwrap().namespace(), None);

        let xml = rendered.to_xml();
        assert!(xml.contains(
            "<cvrfdoc xmlns=\"http://www.icasi.org/CVRF/schema/cvrf/1.1\" xml:lang=\"en\">"
        ));
        assert!(xml.contains("<ProductTree xmlns=\"http://www.icasi.org/CVRF/schema/prod/1.1\">"));
        assert!(xml.contains(
            "<Vulnerability xmlns=\"http://www.icasi.org/CVRF/schema/vuln/1.1\" Ordinal=\"1\">"
        ));
    }

    #[test]
    fn strict_render_fails_on_first_missing_field() {
        let mut untitled = Document::new();
        untitled.set_document_type("Security Advisory").unwrap();

        let error = Renderer::new(&untitled).render().unwrap_err();
        assert_eq!(error.field(), RequiredField::DocumentTitle);

        let mut no_products = Document::new();
        no_products
            .set_document_title("T")
            .unwrap()
            .set_document_type("T")
            .unwrap()
            .set_document_publisher("user")
            .unwrap()
            .set_identification("I")
            .unwrap()
            .set_status("final")
            .unwrap()
            .add_revision_history(RevisionEntry::new("1", "d", "x"))
            .unwrap()
            .set_initial_release_date("d")
            .unwrap()
            .set_current_release_date("d")
            .unwrap();
        let error = Renderer::new(&no_products).render().unwrap_err();
        assert_eq!(error.field(), RequiredField::ProductTree);
    }

    #[test]
    fn tolerant_render_without_title_records_one_violation() {
        let complete = populated();
        let mut document = Document::new();
        document.set_language("en").unwrap();
        document
            .set_document_type(complete.document_type().unwrap())
            .unwrap()
            .set_document_publisher("vendor")
            .unwrap()
            .set_identification(complete.identification().unwrap())
            .unwrap()
            .set_status("final")
            .unwrap()
            .set_initial_release_date("2013-05-01")
            .unwrap()
            .set_current_release_date("2013-06-01")
            .unwrap()
            .add_revision_history(RevisionEntry::new("1.0", "2013-05-01", "Initial"))
            .unwrap()
            .set_products(complete.products().iter().cloned());

        let rendered = Renderer::new(&document)
            .ignore_violations(true)
            .render()
            .unwrap();

        assert_eq!(
            rendered.violations(),
            [RenderViolation::new(RequiredField::DocumentTitle)]
        );
        assert!(!rendered.is_complete());
        assert!(root(&rendered).child("DocumentTitle").is_none());
        assert!(root(&rendered).child("DocumentType").is_some());
        assert!(!rendered.to_xml().contains("DocumentTitle"));
    }

    #[test]
    fn tolerant_render_collects_violations_in_document_order() {
        let mut document = Document::new();
        document.add_vulnerability(Vulnerability::new());

        let rendered = Renderer::new(&document)
            .ignore_violations(true)
            .render()
            .unwrap();

        let fields: Vec<_> = rendered
            .violations()
            .iter()
            .map(RenderViolation::field)
            .collect();
        assert_eq!(
            fields,
            [
                RequiredField::DocumentTitle,
                RequiredField::DocumentType,
                RequiredField::DocumentPublisher,
                RequiredField::Identification,
                RequiredField::Status,
                RequiredField::RevisionHistory,
                RequiredField::InitialReleaseDate,
                RequiredField::CurrentReleaseDate,
                RequiredField::ProductTree,
                RequiredField::VulnerabilityTitle { ordinal: 1 },
            ]
        );

        let root = root(&rendered);
        let tracking = root.child("DocumentTracking").unwrap();
        assert_eq!(tracking.elements().count(), 0);
        assert!(root.child("ProductTree").is_none());
        let vulnerability = root.child("Vulnerability").unwrap();
        assert_eq!(vulnerability.attribute("Ordinal"), Some("1"));
        assert!(vulnerability.child("Title").is_none());
    }

    #[test]
    fn rendering_is_deterministic() {
        let document = populated();
        let renderer = Renderer::new(&document);
        let first = renderer.render().unwrap().to_xml();
        let second = renderer.render().unwrap().to_xml();
        assert_eq!(first, second);
    }

    #[test]
    fn render_reflects_later_changes_to_the_document() {
        let mut document = populated();
        let before = Renderer::new(&document).render().unwrap().to_xml();
        document
            .add_revision_history(RevisionEntry::new("3.0", "2013-07-01", "Final fix"))
            .unwrap();
        let after = Renderer::new(&document).render().unwrap();

        assert_ne!(before, after.to_xml());
        assert_eq!(
            root(&after)
                .child("DocumentTracking")
                .unwrap()
                .child("Version")
                .unwrap()
                .text(),
            "3.0"
        );
    }

    #[test]
    fn encoding_override_does_not_touch_the_document() {
        let mut document = populated();
        document.set_encoding("ISO-8859-1").unwrap();

        let mut renderer = Renderer::new(&document);
        assert_eq!(renderer.encoding(), "ISO-8859-1");
        let xml = renderer.render().unwrap().to_xml();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>"));

        renderer.set_encoding("US-ASCII").unwrap();
        assert_eq!(renderer.encoding(), "US-ASCII");
        let xml = renderer.render().unwrap().to_xml();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"US-ASCII\"?>"));
        assert_eq!(document.encoding(), "ISO-8859-1");
    }

    #[test]
    fn non_utf8_encoding_writes_character_references() {
        let mut document = populated();
        document.set_document_title("Café crème overflow").unwrap();

        let mut renderer = Renderer::new(&document);
        renderer.set_encoding("ISO-8859-1").unwrap();
        let xml = renderer.render().unwrap().to_xml();

        assert!(xml.is_ascii());
        assert!(xml.contains("<DocumentTitle>Caf&#xE9; cr&#xE8;me overflow</DocumentTitle>"));

        let xml = Renderer::new(&document).render().unwrap().to_xml();
        assert!(xml.contains("<DocumentTitle>Café crème overflow</DocumentTitle>"));
    }

    #[test_case("UTF-16"; "utf16")]
    #[test_case("utf-16le"; "utf16 little endian")]
    #[test_case("UTF-32BE"; "utf32")]
    #[test_case("UCS-2"; "ucs2")]
    fn wide_encodings_are_rejected(encoding: &str) {
        let document = populated();
        let mut renderer = Renderer::new(&document);

        let error = renderer.set_encoding(encoding).unwrap_err();

        assert_eq!(error, InvalidArgument::Encoding(encoding.to_string()));
        assert_eq!(renderer.encoding(), "UTF-8");
    }

    #[test]
    fn renders_complete_document() {
        let mut document = Document::new();
        document
            .set_document_title("Widget & Gadget flaw")
            .unwrap()
            .set_document_type("Security Advisory")
            .unwrap()
            .set_document_publisher("coordinator")
            .unwrap()
            .set_identification("CERT-1")
            .unwrap()
            .set_status("interim")
            .unwrap()
            .add_revision_history(RevisionEntry::new("1.0", "2013-01-01", "Initial"))
            .unwrap()
            .set_initial_release_date("2013-01-01")
            .unwrap()
            .set_current_release_date("2013-01-02")
            .unwrap()
            .add_document_note(NoteEntry::new("Summary", "All", "Summary", "Text"))
            .unwrap()
            .add_product(
                Product::new("Widget 1")
                    .unwrap()
                    .with_branch("Vendor", "Acme")
                    .unwrap(),
            );
        let mut vulnerability = Vulnerability::new();
        vulnerability
            .set_title("Flaw")
            .unwrap()
            .add_note(NoteEntry::new("Details", "All", "Description", "Bad"))
            .unwrap();
        document.add_vulnerability(vulnerability);

        let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<cvrfdoc xmlns="http://www.icasi.org/CVRF/schema/cvrf/1.1">
  <DocumentTitle>Widget &amp; Gadget flaw</DocumentTitle>
  <DocumentType>Security Advisory</DocumentType>
  <DocumentPublisher Type="Coordinator"/>
  <DocumentTracking>
    <Identification>
      <ID>CERT-1</ID>
    </Identification>
    <Status>Interim</Status>
    <Version>1.0</Version>
    <RevisionHistory>
      <Revision>
        <Number>1.0</Number>
        <Date>2013-01-01</Date>
        <Description>Initial</Description>
      </Revision>
    </RevisionHistory>
    <InitialReleaseDate>2013-01-01</InitialReleaseDate>
    <CurrentReleaseDate>2013-01-02</CurrentReleaseDate>
  </DocumentTracking>
  <DocumentNotes>
    <Note Title="Summary" Audience="All" Type="Summary" Ordinal="001">Text</Note>
  </DocumentNotes>
  <ProductTree xmlns="http://www.icasi.org/CVRF/schema/prod/1.1">
    <Branch Type="Vendor" Name="Acme">
      <FullProductName ProductID="CVRFPID-0001">Widget 1</FullProductName>
    </Branch>
  </ProductTree>
  <Vulnerability xmlns="http://www.icasi.org/CVRF/schema/vuln/1.1" Ordinal="1">
    <Title>Flaw</Title>
    <Notes>
      <Note Title="Details" Audience="All" Type="Description" Ordinal="1">Bad</Note>
    </Notes>
  </Vulnerability>
</cvrfdoc>
"#;

        assert_eq!(render(&document).to_xml(), expected);
    }
}
