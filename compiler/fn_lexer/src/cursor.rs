//! Character cursor over a source string.
//!
//! Tracks a byte position so token spans can be produced directly.

pub(crate) struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Cursor { source, pos: 0 }
    }

    /// Current byte offset.
    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// The next character, without consuming it.
    #[inline]
    pub(crate) fn current(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    /// The character after the current one.
    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        let mut chars = self.source[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Consume one character and return it.
    #[inline]
    pub(crate) fn bump(&mut self) -> Option<char> {
        let ch = self.current()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Consume characters while `pred` holds and return the consumed slice.
    pub(crate) fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(ch) = self.current() {
            if !pred(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        &self.source[start..self.pos]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_tracks_multibyte_characters() {
        let mut cursor = Cursor::new("é!");
        assert_eq!(cursor.bump(), Some('é'));
        assert_eq!(cursor.pos(), 2);
        assert_eq!(cursor.current(), Some('!'));
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.bump(), Some('!'));
        assert!(cursor.is_eof());
        assert_eq!(cursor.bump(), None);
    }

    #[test]
    fn eat_while_returns_slice() {
        let mut cursor = Cursor::new("123abc");
        assert_eq!(cursor.eat_while(|c| c.is_ascii_digit()), "123");
        assert_eq!(cursor.current(), Some('a'));
        assert_eq!(cursor.eat_while(|c| c.is_ascii_digit()), "");
    }
}
