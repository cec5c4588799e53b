/// Returns true for the characters C's `isspace` accepts in the "C" locale.
///
/// This is wider than `char::is_ascii_whitespace`, which leaves out the
/// vertical tab.
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// A read-only position in a command string.
///
/// `peek` never reads out of bounds: at the end of the input it returns
/// `None`, which the parser treats as end-of-input.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Cursor { input, pos: 0 }
    }

    /// Returns the character under the cursor without moving.
    pub fn peek(&self) -> Option<char> {
        self.input.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    /// Moves past the current character and returns the new lookahead.
    ///
    /// Advancing at the end of the input is a no-op.
    pub fn advance(&mut self) -> Option<char> {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
        self.peek()
    }

    /// Advances until the lookahead is not whitespace (or the input ends).
    pub fn skip_whitespace(&mut self) {
        let mut la = self.peek();
        while la.is_some_and(is_space) {
            la = self.advance();
        }
    }

    /// Byte offset of the cursor in the input.
    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_move() {
        let cursor = Cursor::new("ab");
        assert_eq!(cursor.peek(), Some('a'));
        assert_eq!(cursor.peek(), Some('a'));
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn advance_returns_new_lookahead() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.advance(), Some('b'));
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.advance(), None);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.offset(), 2);
    }

    #[test]
    fn advance_steps_over_multibyte_chars() {
        let mut cursor = Cursor::new("é$");
        assert_eq!(cursor.advance(), Some('$'));
        assert_eq!(cursor.offset(), 2);
    }

    #[test]
    fn skip_whitespace_covers_c_isspace() {
        let mut cursor = Cursor::new(" \t\n\r\x0b\x0cx ");
        cursor.skip_whitespace();
        assert_eq!(cursor.peek(), Some('x'));

        let mut cursor = Cursor::new("   ");
        cursor.skip_whitespace();
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn empty_input_is_at_end() {
        let mut cursor = Cursor::new("");
        assert!(cursor.is_at_end());
        assert_eq!(cursor.peek(), None);
        cursor.skip_whitespace();
        assert_eq!(cursor.offset(), 0);
    }
}
