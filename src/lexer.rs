//! Streaming tokenizer over document text.

use crate::{
    Location, Span, Spanned,
    error::{Error, ErrorKind},
    token::{Token, TokenSource},
};
use std::borrow::Cow;

#[cfg(test)]
#[path = "./lexer_tests.rs"]
mod tests;

/// Splits a document into [`Token`]s on demand.
///
/// Whitespace and `#` comments are skipped. Line breaks are significant
/// and produce [`Token::Newline`]. Strings without escape sequences borrow
/// from the input.
///
/// # Examples
///
/// ```
/// use toml_tree::{Lexer, Token, TokenSource};
///
/// let mut lexer = Lexer::new("a.b = true # comment");
/// let mut tokens = Vec::new();
/// while let Some(tok) = lexer.next_token()? {
///     tokens.push(tok.take());
/// }
/// assert_eq!(
///     tokens,
///     [Token::Key("a"), Token::Period, Token::Key("b"), Token::Equals, Token::Boolean(true)]
/// );
/// # Ok::<(), toml_tree::Error>(())
/// ```
pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    cursor: usize,
    /// Current 1-based line number.
    line: u32,
    /// Byte offset of the first byte of the current line.
    line_start: usize,
    // Reusable scratch buffer for strings containing escapes.
    string_buf: String,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            bytes: input.as_bytes(),
            cursor: 0,
            line: 1,
            line_start: 0,
            string_buf: String::new(),
        }
    }

    // -- position helpers ---------------------------------------------------

    fn location_at(&self, offset: usize) -> Location {
        Location::new(self.line, (offset - self.line_start) as u32 + 1)
    }

    #[cold]
    fn error(&self, start: usize, end: usize, kind: ErrorKind) -> Error {
        Error {
            kind,
            span: Span::new(start as u32, end as u32),
            location: self.location_at(start),
        }
    }

    fn start_line(&mut self) {
        self.line += 1;
        self.line_start = self.cursor;
    }

    // -- cursor operations --------------------------------------------------

    #[inline]
    fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.cursor).copied()
    }

    #[inline]
    fn peek_byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.cursor + offset).copied()
    }

    #[inline]
    fn advance(&mut self) {
        self.cursor += 1;
    }

    /// The character starting at byte `i`, which must be a char boundary.
    fn char_at(&self, i: usize) -> Option<char> {
        self.input.get(i..).and_then(|rest| rest.chars().next())
    }

    fn eat_whitespace(&mut self) {
        while let Some(b' ' | b'\t') = self.peek_byte() {
            self.advance();
        }
    }

    /// Skips a comment up to, but not including, the line break.
    fn eat_comment(&mut self) {
        if self.peek_byte() != Some(b'#') {
            return;
        }
        self.advance();
        while let Some(0x09 | 0x20..=0x7E | 0x80..) = self.peek_byte() {
            self.advance();
        }
    }

    fn read_keylike(&mut self) -> &'a str {
        let input = self.input;
        let start = self.cursor;
        while let Some(b) = self.peek_byte() {
            if !is_keylike_byte(b) {
                break;
            }
            self.advance();
        }
        &input[start..self.cursor]
    }

    // -- words ----------------------------------------------------------------

    fn word(&mut self, start: usize, word: &'a str) -> Result<Token<'a>, Error> {
        match word {
            "true" => Ok(Token::Boolean(true)),
            "false" => Ok(Token::Boolean(false)),
            _ => match word.as_bytes()[0] {
                b'0'..=b'9' | b'-' => Ok(Token::Integer(self.integer(start, word)?)),
                _ => Ok(Token::Key(word)),
            },
        }
    }

    /// Parses `text`, the whole literal including any sign, as an `i64`.
    fn integer(&mut self, start: usize, text: &str) -> Result<i64, Error> {
        let (negative, unsigned) = match text.as_bytes().first() {
            Some(b'+') => (false, &text[1..]),
            Some(b'-') => (true, &text[1..]),
            _ => (false, text),
        };
        let signed = unsigned.len() != text.len();

        let (radix, digits) = if let Some(rest) = unsigned.strip_prefix("0x") {
            (16, rest)
        } else if let Some(rest) = unsigned.strip_prefix("0o") {
            (8, rest)
        } else if let Some(rest) = unsigned.strip_prefix("0b") {
            (2, rest)
        } else {
            (10, unsigned)
        };

        if radix != 10 && signed {
            return Err(self.invalid_number(start));
        }
        if digits.is_empty()
            || digits.starts_with('_')
            || digits.ends_with('_')
            || digits.contains("__")
        {
            return Err(self.invalid_number(start));
        }
        if radix == 10 && digits.len() > 1 && digits.starts_with('0') {
            return Err(self.invalid_number(start));
        }

        self.string_buf.clear();
        if negative {
            self.string_buf.push('-');
        }
        self.string_buf
            .extend(digits.chars().filter(|c| *c != '_'));
        // from_str_radix tolerates a leading sign, which must not appear twice
        if self.string_buf[usize::from(negative)..].starts_with(['+', '-']) {
            return Err(self.invalid_number(start));
        }
        match i64::from_str_radix(&self.string_buf, radix) {
            Ok(v) => Ok(v),
            Err(_) => Err(self.invalid_number(start)),
        }
    }

    fn invalid_number(&self, start: usize) -> Error {
        self.error(start, self.cursor, ErrorKind::InvalidNumber)
    }

    // -- string parsing -----------------------------------------------------

    /// Reads a basic string. `start` is the byte offset of the opening quote;
    /// the cursor is positioned right after it.
    fn read_string(&mut self, start: usize) -> Result<Cow<'a, str>, Error> {
        let input = self.input;
        let content_start = self.cursor;
        let mut owned = false;
        loop {
            let i = self.cursor;
            let Some(&b) = self.bytes.get(i) else {
                return Err(self.error(start, self.cursor, ErrorKind::UnterminatedString));
            };
            match b {
                b'"' => {
                    self.advance();
                    let val = if owned {
                        Cow::Owned(std::mem::take(&mut self.string_buf))
                    } else {
                        Cow::Borrowed(&input[content_start..i])
                    };
                    return Ok(val);
                }
                b'\\' => {
                    if !owned {
                        self.string_buf.clear();
                        self.string_buf.push_str(&input[content_start..i]);
                        owned = true;
                    }
                    self.advance();
                    self.read_escape(start)?;
                }
                0x09 | 0x20..=0x7E => {
                    if owned {
                        self.string_buf.push(b as char);
                    }
                    self.advance();
                }
                0x80.. => {
                    let Some(ch) = self.char_at(i) else {
                        return Err(self.error(start, i, ErrorKind::UnterminatedString));
                    };
                    if owned {
                        self.string_buf.push(ch);
                    }
                    self.cursor += ch.len_utf8();
                }
                _ => {
                    return Err(self.error(i, i + 1, ErrorKind::InvalidCharInString(b as char)));
                }
            }
        }
    }

    fn read_escape(&mut self, string_start: usize) -> Result<(), Error> {
        let i = self.cursor;
        let Some(&b) = self.bytes.get(i) else {
            return Err(self.error(string_start, i, ErrorKind::UnterminatedString));
        };
        let unescaped = match b {
            b'"' => '"',
            b'\\' => '\\',
            b'b' => '\u{8}',
            b'f' => '\u{c}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            _ => {
                let c = self.char_at(i).unwrap_or(b as char);
                return Err(self.error(i - 1, i + c.len_utf8(), ErrorKind::InvalidEscape(c)));
            }
        };
        self.advance();
        self.string_buf.push(unescaped);
        Ok(())
    }
}

impl<'a> TokenSource<'a> for Lexer<'a> {
    fn next_token(&mut self) -> Result<Option<Spanned<Token<'a>>>, Error> {
        self.eat_whitespace();
        self.eat_comment();

        let start = self.cursor;
        let Some(byte) = self.peek_byte() else {
            return Ok(None);
        };
        let location = self.location_at(start);

        let token = match byte {
            b'\n' => {
                self.advance();
                self.start_line();
                Token::Newline
            }
            b'\r' if self.peek_byte_at(1) == Some(b'\n') => {
                self.cursor += 2;
                self.start_line();
                Token::Newline
            }
            b'=' => {
                self.advance();
                Token::Equals
            }
            b'.' => {
                self.advance();
                Token::Period
            }
            b',' => {
                self.advance();
                Token::Comma
            }
            b'[' => {
                self.advance();
                Token::LeftBracket
            }
            b']' => {
                self.advance();
                Token::RightBracket
            }
            b'"' => {
                self.advance();
                Token::String(self.read_string(start)?)
            }
            b'+' if self.peek_byte_at(1).is_some_and(is_keylike_byte) => {
                self.advance();
                self.read_keylike();
                let input = self.input;
                let end = self.cursor;
                Token::Integer(self.integer(start, &input[start..end])?)
            }
            b if is_keylike_byte(b) => {
                let word = self.read_keylike();
                self.word(start, word)?
            }
            _ => {
                let ch = self.char_at(start).unwrap_or(byte as char);
                return Err(self.error(
                    start,
                    start + ch.len_utf8(),
                    ErrorKind::Unexpected(ch),
                ));
            }
        };

        let tok = Spanned::with_location(
            token,
            Span::new(start as u32, self.cursor as u32),
            location,
        );
        tracing::trace!(token = ?tok.value, span = ?tok.span, "token");
        Ok(Some(tok))
    }
}

#[inline]
fn is_keylike_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}
