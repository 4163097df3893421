//! Whitespace-separated token reader for parameter strings.
//!
//! Input is a byte buffer that ends at its first NUL byte or at the end of the
//! slice, whichever comes first. Reading never fails: running out of input and
//! failing to parse a number both yield `0`. Use [`Tokens::is_exhausted`] when
//! the difference matters.

/// Cursor over a parameter buffer.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
        Self {
            buf: &buf[..end],
            pos: 0,
        }
    }

    /// Skip whitespace and return the next character, consuming only that
    /// character. Returns `0` at the end of input, leaving the cursor on the
    /// terminator.
    pub fn next_char(&mut self) -> u8 {
        self.skip_space();
        let c = self.peek();
        if c != 0 {
            self.pos += 1;
        }
        c
    }

    /// Skip whitespace and parse the next token as an integer with `atoi`
    /// rules, then step past the rest of the token.
    ///
    /// Returns `0` both for exhausted input and for tokens that are not
    /// numbers.
    pub fn next_integer(&mut self) -> i32 {
        self.skip_space();
        if self.peek() == 0 {
            return 0;
        }

        let value = atoi(&self.buf[self.pos..]);

        while self.peek() != 0 && !is_space(self.peek()) {
            self.pos += 1;
        }
        value
    }

    /// True when nothing but whitespace is left.
    pub fn is_exhausted(&self) -> bool {
        self.remaining().iter().all(|&b| is_space(b))
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    #[inline]
    fn peek(&self) -> u8 {
        self.buf.get(self.pos).copied().unwrap_or(0)
    }

    fn skip_space(&mut self) {
        while is_space(self.peek()) {
            self.pos += 1;
        }
    }
}

impl<'a> From<&'a str> for Tokens<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

/// C `isspace` in the "C" locale. Unlike `u8::is_ascii_whitespace`, this
/// includes vertical tab.
#[inline]
pub fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// C `atoi`: leading whitespace, an optional sign, then digits up to the
/// first non-digit. Overflow wraps; no digits gives `0`.
pub fn atoi(bytes: &[u8]) -> i32 {
    let mut iter = bytes.iter().copied().skip_while(|&b| is_space(b)).peekable();

    let negative = match iter.peek() {
        Some(b'-') => {
            iter.next();
            true
        }
        Some(b'+') => {
            iter.next();
            false
        }
        _ => false,
    };

    let mut value: i32 = 0;
    for digit in iter.take_while(u8::is_ascii_digit) {
        value = value.wrapping_mul(10).wrapping_add(i32::from(digit - b'0'));
    }

    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}
