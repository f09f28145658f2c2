/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;
/// Estimated average glyph width as a multiple of the font size.
pub const CHAR_WIDTH_FACTOR: f64 = 0.5;
/// Gap before a bullet block, in line heights.
pub const BULLET_GAP_FACTOR: f64 = 0.3;
/// Gap before a header or paragraph block, in line heights.
pub const BLOCK_GAP_FACTOR: f64 = 0.6;
/// Horizontal offset of bullet lines from the region's left edge.
pub const BULLET_INDENT: f64 = 5.0;

/// Numeric parameters that drive layout of one text region.
///
/// Widths are estimated from character counts rather than font metrics, so
/// lines over- or under-fill when the real glyphs diverge from the estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Left edge of the text region.
    pub base_x: f64,
    /// Top edge of the text region.
    pub base_y: f64,
    pub font_size: f64,
    pub max_width: f64,
}

impl Geometry {
    pub fn new(base_x: f64, base_y: f64, font_size: f64, max_width: f64) -> Self {
        Self {
            base_x,
            base_y,
            font_size,
            max_width,
        }
    }

    pub fn line_height(&self) -> f64 {
        self.font_size * LINE_HEIGHT_FACTOR
    }

    pub fn avg_char_width(&self) -> f64 {
        self.font_size * CHAR_WIDTH_FACTOR
    }

    /// Estimated rendered width of `text`.
    pub fn estimate_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.avg_char_width()
    }

    /// Anchor x for centred lines.
    pub fn centre_x(&self) -> f64 {
        self.base_x + self.max_width / 2.0
    }

    /// Anchor x for left-aligned bullet lines.
    pub fn bullet_x(&self) -> f64 {
        self.base_x + BULLET_INDENT
    }

    /// Baseline of the first line.
    pub fn first_baseline(&self) -> f64 {
        self.base_y + self.font_size
    }
}
