use super::types::{Block, BlockKind};

/// Line prefixes that open a single-line block.
pub struct BlockMarker;

impl BlockMarker {
    pub const HEADER: &'static str = "## ";
    pub const BULLET: &'static str = "* ";
}

/// Classification of a single source line, without reference to its
/// neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    Blank,
    /// Header text after the marker.
    Header(&'a str),
    /// Bullet text after the marker.
    Bullet(&'a str),
    /// A trimmed paragraph line.
    Text(&'a str),
}

impl<'a> LineClass<'a> {
    pub fn classify(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            LineClass::Blank
        } else if let Some(rest) = trimmed.strip_prefix(BlockMarker::HEADER) {
            LineClass::Header(rest)
        } else if let Some(rest) = trimmed.strip_prefix(BlockMarker::BULLET) {
            LineClass::Bullet(rest)
        } else {
            LineClass::Text(trimmed)
        }
    }
}

/// Accumulates classified lines into [`Block`]s.
///
/// Paragraph lines are held until a blank line, a header, a bullet or the end
/// of input closes the paragraph.
pub struct BlockBuilder<'a> {
    paragraph: Vec<&'a str>,
    out: Vec<Block>,
}

impl<'a> BlockBuilder<'a> {
    pub fn new() -> Self {
        Self {
            paragraph: vec![],
            out: vec![],
        }
    }

    pub fn push(&mut self, class: LineClass<'a>) {
        match class {
            LineClass::Blank => self.flush_paragraph(),
            LineClass::Header(text) => {
                self.flush_paragraph();
                self.out.push(Block::new(BlockKind::Header, text));
            }
            LineClass::Bullet(text) => {
                self.flush_paragraph();
                self.out.push(Block::new(BlockKind::Bullet, text));
            }
            LineClass::Text(text) => self.paragraph.push(text),
        }
    }

    pub fn finish(mut self) -> Vec<Block> {
        // EOF flush
        self.flush_paragraph();
        self.out
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let raw = self.paragraph.join(" ");
        self.paragraph.clear();
        self.out.push(Block::new(BlockKind::Paragraph, &raw));
    }
}

impl Default for BlockBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}
