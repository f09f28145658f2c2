use super::emphasis::split_emphasis;

/// The structural kind of a block of card text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// A `## ` line.
    Header,
    /// One or more consecutive plain lines.
    Paragraph,
    /// A `* ` line.
    Bullet,
}

/// A contiguous run of text sharing one emphasis state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub bold: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// A parsed block with its inline segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub segments: Vec<Segment>,
}

impl Block {
    /// Builds a block from its de-markered raw text.
    ///
    /// Whitespace runs are collapsed to single spaces before the emphasis
    /// markers are split out.
    pub fn new(kind: BlockKind, raw: &str) -> Self {
        let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        Self {
            kind,
            segments: split_emphasis(&normalized),
        }
    }

    /// The block text with emphasis stripped.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn is_bullet(&self) -> bool {
        self.kind == BlockKind::Bullet
    }
}
