use crate::markup::BlockKind;

use super::geometry::Geometry;

/// Literal prefix placed on the first line of every bullet block.
pub const BULLET_PREFIX: &str = "• ";

/// Horizontal alignment of a line around its anchor x.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
}

impl Anchor {
    /// The SVG `text-anchor` keyword.
    pub fn as_svg(&self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
        }
    }
}

/// A styled text fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
}

impl Run {
    pub fn new(text: impl Into<String>, bold: bool) -> Self {
        Self {
            text: text.into(),
            bold,
        }
    }
}

/// A physical output line at a fixed baseline.
///
/// `x` and `anchor` position the line's first run; later runs flow inline.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub x: f64,
    pub y: f64,
    pub anchor: Anchor,
    pub runs: Vec<Run>,
}

impl Line {
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// A line under construction together with its estimated width.
pub(crate) struct LineBuilder {
    line: Line,
    width: f64,
    words: usize,
}

impl LineBuilder {
    /// Opens a line for a block of `kind` at baseline `y`.
    ///
    /// `first` marks the first physical line of the block, which for bullets
    /// carries the bullet prefix.
    pub(crate) fn open(kind: BlockKind, geometry: &Geometry, y: f64, first: bool) -> Self {
        let (x, anchor) = match kind {
            BlockKind::Bullet => (geometry.bullet_x(), Anchor::Start),
            BlockKind::Header | BlockKind::Paragraph => (geometry.centre_x(), Anchor::Middle),
        };

        let mut builder = Self {
            line: Line {
                x,
                y,
                anchor,
                runs: vec![],
            },
            width: 0.0,
            words: 0,
        };
        if kind == BlockKind::Bullet && first {
            builder.line.runs.push(Run::new(BULLET_PREFIX, false));
            builder.width = geometry.estimate_width(BULLET_PREFIX);
        }
        builder
    }

    pub(crate) fn has_words(&self) -> bool {
        self.words > 0
    }

    pub(crate) fn width(&self) -> f64 {
        self.width
    }

    /// Appends a word, preceded by a space run unless it is the line's first.
    pub(crate) fn push_word(&mut self, word: &str, bold: bool, word_width: f64, space_width: f64) {
        if self.has_words() {
            self.line.runs.push(Run::new(" ", false));
            self.width += space_width;
        }
        self.line.runs.push(Run::new(word, bold));
        self.width += word_width;
        self.words += 1;
    }

    pub(crate) fn finish(self) -> Line {
        self.line
    }
}
