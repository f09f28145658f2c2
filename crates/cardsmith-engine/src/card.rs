use crate::layout::{Geometry, layout};
use crate::markup;
use crate::record::Record;
use crate::settings::{CardStyle, LayoutSettings, Selectors};
use crate::template::{
    Selector, SvgDocument, Template, TemplateBinder, TemplateError, materialize,
};

#[derive(Debug, thiserror::Error)]
pub enum CardError {
    #[error("No template loaded")]
    TemplateNotLoaded,
    #[error("Record has no title")]
    MissingTitle,
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Parsed insertion-point selectors.
#[derive(Debug, Clone)]
struct BoundSelectors {
    title: Selector,
    backtext: Selector,
    photo: Selector,
    background: Selector,
    level: Selector,
}

impl BoundSelectors {
    fn parse(selectors: &Selectors) -> Result<Self, TemplateError> {
        Ok(Self {
            title: selectors.title.parse()?,
            backtext: selectors.backtext.parse()?,
            photo: selectors.photo.parse()?,
            background: selectors.background.parse()?,
            level: selectors.level.parse()?,
        })
    }
}

/// A rendered card ready to be written.
#[derive(Debug, Clone)]
pub struct Card {
    pub file_name: String,
    pub document: SvgDocument,
}

/// Binds records into instances of a template.
///
/// Configuration is fixed at construction. Each [`CardGenerator::generate`]
/// call works on its own template instance, so one generator can serve any
/// number of records, from any number of threads.
#[derive(Debug, Clone)]
pub struct CardGenerator {
    selectors: BoundSelectors,
    style: CardStyle,
    layout: LayoutSettings,
    template: Option<Template>,
}

impl CardGenerator {
    pub fn new(
        selectors: &Selectors,
        style: CardStyle,
        layout: LayoutSettings,
    ) -> Result<Self, CardError> {
        Ok(Self {
            selectors: BoundSelectors::parse(selectors)?,
            style,
            layout,
            template: None,
        })
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self
    }

    pub fn load_template(&mut self, template: Template) {
        self.template = Some(template);
    }

    pub fn template(&self) -> Result<&Template, CardError> {
        self.template.as_ref().ok_or(CardError::TemplateNotLoaded)
    }

    /// Renders one record.
    ///
    /// Fails with [`CardError::MissingTitle`] before instantiating the
    /// template when the record has no title. Every other missing field or
    /// insertion point just skips its substitution.
    pub fn generate(&self, record: &Record) -> Result<Card, CardError> {
        let template = self.template()?;
        let title = record.title().ok_or(CardError::MissingTitle)?;

        let mut document = template.instantiate()?;
        self.bind(&mut document, record);

        Ok(Card {
            file_name: output_file_name(title, template.extension()),
            document,
        })
    }

    /// Applies every field of `record` to a template tree.
    pub fn bind<B: TemplateBinder>(&self, binder: &mut B, record: &Record) {
        self.bind_title(binder, record);
        self.bind_backtext(binder, record);
        self.bind_photo(binder, record);
        self.bind_background(binder, record);
        self.bind_level(binder, record);
    }

    fn bind_title<B: TemplateBinder>(&self, binder: &mut B, record: &Record) {
        let Some((node, title)) = lookup(binder, &self.selectors.title, record.title()) else {
            return;
        };
        binder.set_text(node, &title.to_uppercase());
        binder.set_attribute(node, "fill", &self.style.title_color);
    }

    fn bind_backtext<B: TemplateBinder>(&self, binder: &mut B, record: &Record) {
        let Some((node, text)) = lookup(binder, &self.selectors.backtext, record.backtext())
        else {
            return;
        };
        let geometry = self.geometry(binder, node);
        let blocks = markup::parse(text);
        let lines = layout(&blocks, &geometry);
        log::debug!(
            "Laid out {} blocks into {} lines at font size {}",
            blocks.len(),
            lines.len(),
            geometry.font_size
        );
        materialize(binder, node, &lines, &self.style);
    }

    fn bind_photo<B: TemplateBinder>(&self, binder: &mut B, record: &Record) {
        let Some((node, url)) = lookup(binder, &self.selectors.photo, record.photo_url()) else {
            return;
        };
        binder.set_attribute(node, "href", url);
        if binder.attribute(node, "xlink:href").is_some() {
            binder.set_attribute(node, "xlink:href", url);
        }
    }

    fn bind_background<B: TemplateBinder>(&self, binder: &mut B, record: &Record) {
        if let Some((node, color)) =
            lookup(binder, &self.selectors.background, record.bg_color())
        {
            binder.set_attribute(node, "fill", color);
        }
    }

    fn bind_level<B: TemplateBinder>(&self, binder: &mut B, record: &Record) {
        if let Some((node, level)) = lookup(binder, &self.selectors.level, record.level()) {
            binder.set_text(node, level);
        }
    }

    /// Layout geometry for a back text container.
    ///
    /// Reads `x`, `y` and `font-size` from the container, falling back to the
    /// origin and the configured default font size; `data-max-width` overrides
    /// the configured region width.
    pub fn geometry<B: TemplateBinder>(&self, binder: &B, node: B::Node) -> Geometry {
        let number = |name: &str| binder.attribute(node, name).and_then(parse_length);
        Geometry::new(
            number("x").unwrap_or(0.0),
            number("y").unwrap_or(0.0),
            number("font-size").unwrap_or(self.layout.default_font_size),
            number("data-max-width").unwrap_or(self.layout.max_width),
        )
    }
}

/// Resolves an insertion point for a field, skipping the substitution when
/// either the value or the node is missing.
fn lookup<'r, B: TemplateBinder>(
    binder: &B,
    selector: &Selector,
    value: Option<&'r str>,
) -> Option<(B::Node, &'r str)> {
    let value = value?;
    match binder.find(selector) {
        Some(node) => Some((node, value)),
        None => {
            log::debug!("Template has no element matching {selector}; skipping");
            None
        }
    }
}

/// Parses an SVG length such as `12`, `12.5` or `12px`.
fn parse_length(value: &str) -> Option<f64> {
    let v = value.trim();
    let v = v.strip_suffix("px").unwrap_or(v);
    v.trim().parse().ok()
}

/// Output file name for a card: `card_<slug>.<extension>`.
///
/// The slug is the lower-cased title with every character other than an
/// ASCII letter or digit replaced by `_`.
pub fn output_file_name(title: &str, extension: &str) -> String {
    let slug: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("card_{slug}.{extension}")
}
