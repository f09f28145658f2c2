/// A cursor for scanning card markup one character at a time.
///
/// Positions are byte offsets into `s`. Markers searched for are ASCII, so any
/// position reached through [`Cursor::bump_char`] or a marker match is always
/// a valid char boundary.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `s`.
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Returns the current byte position.
    pub fn pos(&self) -> usize {
        self.i
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// The unscanned remainder of the input.
    pub fn rest(&self) -> &'a str {
        self.s.get(self.i..).unwrap_or("")
    }

    /// Checks if the remaining input starts with the given marker.
    pub fn starts_with(&self, pat: &str) -> bool {
        self.rest().starts_with(pat)
    }

    /// Byte distance from the current position to the next occurrence of `pat`.
    pub fn find(&self, pat: &str) -> Option<usize> {
        self.rest().find(pat)
    }

    /// Advances past the current character, returning it.
    pub fn bump_char(&mut self) -> Option<char> {
        let c = self.rest().chars().next()?;
        self.i += c.len_utf8();
        Some(c)
    }

    /// Advances by `n` bytes. Callers only pass lengths of matched markers.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }
}
