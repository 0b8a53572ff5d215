//! A code-point cursor over the pattern text.

/// A cursor over a pattern that yields one code point at a time, with
/// one-step lookahead and single-step backup.
///
/// The cursor tracks a byte offset plus the UTF-8 width of the last decoded
/// code point, so multi-byte characters are always handled as single units.
#[derive(Debug)]
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    width: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Scanner<'a> {
        Scanner {
            input,
            pos: 0,
            width: 0,
        }
    }

    /// Decodes and returns the next code point, advancing past it.
    /// Returns `None` at end of input.
    pub fn advance(&mut self) -> Option<char> {
        match self.input[self.pos..].chars().next() {
            Some(ch) => {
                self.width = ch.len_utf8();
                self.pos += self.width;
                Some(ch)
            }
            None => {
                self.width = 0;
                None
            }
        }
    }

    /// Rewinds by the width of the last `advance`. The width resets to 0, so
    /// a second `backup` without an intervening `advance` is a no-op.
    pub fn backup(&mut self) {
        self.pos -= self.width;
        self.width = 0;
    }

    /// Non-destructive lookahead of exactly one code point.
    pub fn peek(&mut self) -> Option<char> {
        let ch = self.advance();
        self.backup();
        ch
    }

    /// The current byte offset, for error positions.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// True once the whole input has been consumed.
    pub fn at_end(&self) -> bool {
        self.pos == self.input.len()
    }
}
