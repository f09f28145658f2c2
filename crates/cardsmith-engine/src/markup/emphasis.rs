use super::{cursor::Cursor, types::Segment};

/// Paired delimiters that mark a bold span. A span must close with the
/// same marker it opened with.
pub struct Strong;

impl Strong {
    pub const STARS: &'static str = "**";
    pub const UNDERSCORES: &'static str = "__";
    pub const MARKERS: [&'static str; 2] = [Self::STARS, Self::UNDERSCORES];
}

/// Byte offsets of one matched bold span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StrongSpan {
    open: usize,
    inner_start: usize,
    inner_end: usize,
}

/// Splits raw block text into alternating plain and bold [`Segment`]s.
///
/// Matching is left to right and non-greedy: an opening `**` (or `__`) closes
/// at the next occurrence of the same marker, and the enclosed text may be
/// empty. An opening marker with no partner is kept as literal text. Nested
/// and escaped markers are not recognised.
///
/// Empty input yields no segments. Empty plain text between spans is never
/// emitted.
pub fn split_emphasis(raw: &str) -> Vec<Segment> {
    let mut cur = Cursor::new(raw);
    let mut out = vec![];
    let mut text_start = cur.pos();

    fn flush_plain(out: &mut Vec<Segment>, text: &str) {
        if !text.is_empty() {
            out.push(Segment::plain(text));
        }
    }

    while !cur.eof() {
        if let Some(span) = try_parse_strong(&mut cur) {
            flush_plain(&mut out, &raw[text_start..span.open]);
            out.push(Segment::bold(&raw[span.inner_start..span.inner_end]));
            text_start = cur.pos();
            continue;
        }
        cur.bump_char();
    }

    flush_plain(&mut out, &raw[text_start..]);
    out
}

/// Attempts to match a bold span at the current position.
///
/// On success the cursor is left after the closing marker. On failure the
/// cursor is not moved.
fn try_parse_strong(cur: &mut Cursor<'_>) -> Option<StrongSpan> {
    let marker = Strong::MARKERS.into_iter().find(|m| cur.starts_with(m))?;

    let saved = cur.clone();
    let open = cur.pos();
    cur.bump_n(marker.len());
    let inner_start = cur.pos();

    let Some(offset) = cur.find(marker) else {
        *cur = saved;
        return None;
    };
    let inner_end = inner_start + offset;
    cur.bump_n(offset + marker.len());

    Some(StrongSpan {
        open,
        inner_start,
        inner_end,
    })
}
