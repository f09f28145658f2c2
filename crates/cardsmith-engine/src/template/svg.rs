use std::fmt;

use super::{TemplateBinder, TemplateError, materialize::TextRun, selector::Selector};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Handle to a node in an [`SvgDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeData {
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct Element {
    prefix: Option<String>,
    local: String,
    /// Namespace declarations made on this element, as `(prefix, uri)`.
    namespaces: Vec<(Option<String>, String)>,
    /// Attributes keyed by qualified name, in source order.
    attributes: Vec<(String, String)>,
}

impl Element {
    fn new(prefix: Option<String>, local: &str) -> Self {
        Self {
            prefix,
            local: local.to_string(),
            namespaces: vec![],
            attributes: vec![],
        }
    }

    fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(p) => format!("{p}:{}", self.local),
            None => self.local.clone(),
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self
                .attributes
                .push((name.to_string(), value.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
struct NodeEntry {
    data: NodeData,
    children: Vec<NodeId>,
}

/// A mutable, owned SVG document tree.
///
/// Nodes live in an arena and are addressed by [`NodeId`]. Detached nodes
/// (cleared children, unappended runs) stay in the arena but are never
/// serialized.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    nodes: Vec<NodeEntry>,
    root: NodeId,
    declaration: Option<XmlDeclaration>,
}

/// The parts of a source `<?xml ...?>` declaration worth carrying over.
///
/// Output is always UTF-8, so only `standalone` is kept from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
struct XmlDeclaration {
    standalone: Option<String>,
}

impl XmlDeclaration {
    fn from_source(source: &str) -> Option<Self> {
        let decl = source.trim_start().strip_prefix("<?xml")?;
        if !decl.starts_with(char::is_whitespace) {
            return None;
        }
        let decl = &decl[..decl.find("?>")?];
        Some(Self {
            standalone: pseudo_attribute(decl, "standalone").map(str::to_string),
        })
    }
}

impl fmt::Display for XmlDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<?xml version=\"1.0\" encoding=\"UTF-8\"")?;
        if let Some(standalone) = &self.standalone {
            write!(f, " standalone=\"{standalone}\"")?;
        }
        write!(f, "?>")
    }
}

fn pseudo_attribute<'a>(decl: &'a str, name: &str) -> Option<&'a str> {
    let rest = decl.split_once(name)?.1.trim_start();
    let rest = rest.strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    rest[1..].split(quote).next()
}

impl SvgDocument {
    /// Parses SVG source into an owned tree.
    ///
    /// DTDs are accepted but not preserved. Processing instructions are
    /// dropped; CDATA sections become plain text.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let doc = roxmltree::Document::parse_with_options(source, options)?;

        let mut out = Self {
            nodes: vec![],
            root: NodeId(0),
            declaration: XmlDeclaration::from_source(source),
        };
        out.root = out.import(doc.root_element());
        Ok(out)
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].data {
            NodeData::Text(t) => out.push_str(t),
            NodeData::Element(_) => {
                for &child in &self.nodes[node.0].children {
                    self.collect_text(child, out);
                }
            }
            NodeData::Comment(_) => {}
        }
    }

    fn element(&self, node: NodeId) -> Option<&Element> {
        match &self.nodes.get(node.0)?.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(node.0)?.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeEntry {
            data,
            children: vec![],
        });
        id
    }

    fn import(&mut self, node: roxmltree::Node<'_, '_>) -> NodeId {
        let tag = node.tag_name();
        let mut element = Element::new(element_prefix(node, tag.namespace()), tag.name());

        let parent = node.parent_element();
        for ns in node.namespaces() {
            if ns.name() == Some("xml") {
                continue;
            }
            let inherited = parent.is_some_and(|p| {
                p.namespaces()
                    .any(|pn| pn.name() == ns.name() && pn.uri() == ns.uri())
            });
            if !inherited {
                element
                    .namespaces
                    .push((ns.name().map(str::to_string), ns.uri().to_string()));
            }
        }

        for attr in node.attributes() {
            let name = match prefix_for(node, attr.namespace()) {
                Some(p) => format!("{p}:{}", attr.name()),
                None => attr.name().to_string(),
            };
            element.attributes.push((name, attr.value().to_string()));
        }

        let id = self.push(NodeData::Element(element));
        for child in node.children() {
            let child_id = if child.is_element() {
                self.import(child)
            } else if child.is_text() {
                self.push(NodeData::Text(child.text().unwrap_or_default().to_string()))
            } else if child.is_comment() {
                self.push(NodeData::Comment(
                    child.text().unwrap_or_default().to_string(),
                ))
            } else {
                continue;
            };
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>, node: NodeId) -> fmt::Result {
        let entry = &self.nodes[node.0];
        match &entry.data {
            NodeData::Text(t) => write!(f, "{}", html_escape::encode_text(t)),
            NodeData::Comment(c) => write!(f, "<!--{c}-->"),
            NodeData::Element(e) => {
                let name = e.qualified_name();
                write!(f, "<{name}")?;
                for (prefix, uri) in &e.namespaces {
                    let uri = html_escape::encode_double_quoted_attribute(uri);
                    match prefix {
                        Some(p) => write!(f, " xmlns:{p}=\"{uri}\"")?,
                        None => write!(f, " xmlns=\"{uri}\"")?,
                    }
                }
                for (attr, value) in &e.attributes {
                    write!(
                        f,
                        " {attr}=\"{}\"",
                        html_escape::encode_double_quoted_attribute(value)
                    )?;
                }
                if entry.children.is_empty() {
                    return write!(f, "/>");
                }
                write!(f, ">")?;
                for &child in &entry.children {
                    self.write_node(f, child)?;
                }
                write!(f, "</{name}>")
            }
        }
    }
}

impl TemplateBinder for SvgDocument {
    type Node = NodeId;

    fn find(&self, selector: &Selector) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            if let Some(e) = self.element(node) {
                if selector.matches(&e.local, e.attribute("id")) {
                    return Some(node);
                }
                stack.extend(self.nodes[node.0].children.iter().rev());
            }
        }
        None
    }

    fn clear_children(&mut self, node: NodeId) {
        self.nodes[node.0].children.clear();
    }

    fn new_text_run(&mut self, run: &TextRun<'_>) -> NodeId {
        // Runs share the root element's prefix so they land in the SVG namespace.
        let prefix = self.element(self.root).and_then(|e| e.prefix.clone());
        let mut element = Element::new(prefix, "tspan");
        if let Some(pos) = &run.position {
            element.set_attribute("x", &format_number(pos.x));
            element.set_attribute("y", &format_number(pos.y));
            element.set_attribute("text-anchor", pos.anchor.as_svg());
        }
        if run.bold {
            element.set_attribute("font-weight", "bold");
        }
        if let Some(fill) = run.fill {
            element.set_attribute("fill", fill);
        }

        let id = self.push(NodeData::Element(element));
        let text = self.push(NodeData::Text(run.text.to_string()));
        self.nodes[id.0].children.push(text);
        id
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attribute(name)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(e) = self.element_mut(node) {
            e.set_attribute(name, value);
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        let text = self.push(NodeData::Text(text.to_string()));
        self.nodes[node.0].children = vec![text];
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(declaration) = &self.declaration {
            writeln!(f, "{declaration}")?;
        }
        self.write_node(f, self.root)?;
        writeln!(f)
    }
}

/// Element names stay unprefixed when the default namespace already covers
/// them, even if the same URI is also bound to a prefix.
fn element_prefix(node: roxmltree::Node<'_, '_>, namespace: Option<&str>) -> Option<String> {
    let uri = namespace?;
    let default = node
        .namespaces()
        .any(|ns| ns.name().is_none() && ns.uri() == uri);
    if default {
        return None;
    }
    prefix_for(node, Some(uri))
}

fn prefix_for(node: roxmltree::Node<'_, '_>, namespace: Option<&str>) -> Option<String> {
    let uri = namespace?;
    if uri == XML_NAMESPACE {
        return Some("xml".to_string());
    }
    node.lookup_prefix(uri).map(str::to_string)
}

/// Formats a coordinate with at most two decimals and no trailing zeros.
pub fn format_number(value: f64) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}
