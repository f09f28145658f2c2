//! # Template Binding
//!
//! Owns the vector template and the node-level operations the card
//! generator needs from it.
//!
//! ## Modules
//!
//! - **`selector`**: `Selector` for addressing insertion points (`#id`, `tag`, `tag#id`)
//! - **`svg`**: `SvgDocument`, an owned arena tree parsed with `roxmltree`
//! - **`materialize`**: turns laid-out lines into text-run nodes
//!
//! Layout never touches the tree directly; it produces plain [`crate::layout::Line`]s
//! that [`materialize`] hands to a [`TemplateBinder`].

pub mod materialize;
pub mod selector;
pub mod svg;

pub use materialize::{RunPosition, TextRun, materialize};
pub use selector::Selector;
pub use svg::{NodeId, SvgDocument};

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template is not well-formed XML: {0}")]
    Parse(#[from] roxmltree::Error),
    #[error("Unsupported selector: {0:?}")]
    InvalidSelector(String),
}

/// Node operations a template tree must provide to receive a card.
pub trait TemplateBinder {
    type Node: Copy;

    /// First element matching `selector`, in document order.
    fn find(&self, selector: &Selector) -> Option<Self::Node>;

    fn clear_children(&mut self, node: Self::Node);

    /// Creates a detached text-run node.
    fn new_text_run(&mut self, run: &TextRun<'_>) -> Self::Node;

    fn append_child(&mut self, parent: Self::Node, child: Self::Node);

    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

    /// Replaces all children of `node` with a single text node.
    fn set_text(&mut self, node: Self::Node, text: &str);
}

/// A loaded template source.
///
/// The source is validated once on construction and re-parsed by
/// [`Template::instantiate`] for every card, so mutations made while binding
/// one record never reach another.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    extension: String,
}

impl Template {
    pub const DEFAULT_EXTENSION: &'static str = "svg";

    pub fn new(
        source: impl Into<String>,
        extension: impl Into<String>,
    ) -> Result<Self, TemplateError> {
        let source = source.into();
        SvgDocument::parse(&source)?;
        Ok(Self {
            source,
            extension: extension.into(),
        })
    }

    pub fn from_svg(source: impl Into<String>) -> Result<Self, TemplateError> {
        Self::new(source, Self::DEFAULT_EXTENSION)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// File extension for cards rendered from this template, without the dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// A fresh working copy of the template tree.
    pub fn instantiate(&self) -> Result<SvgDocument, TemplateError> {
        SvgDocument::parse(&self.source)
    }
}
