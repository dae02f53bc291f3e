use crate::{
    Location, Span, Spanned, Table, Value,
    error::{Error, ErrorKind},
    lexer::Lexer,
    token::{Token, TokenList, TokenSource},
};
use std::borrow::Cow;

/// A key segment with its source position.
type Key<'a> = Spanned<Cow<'a, str>>;

// ---------------------------------------------------------------------------
// One-token lookahead over a token source
// ---------------------------------------------------------------------------

struct Lookahead<'a, S> {
    source: S,
    /// At most one pulled-ahead, unconsumed token.
    peeked: Option<Spanned<Token<'a>>>,
    /// Set once the source has reported end of input; it is not polled again.
    exhausted: bool,
    /// Byte offset and location just past the last pulled token, where an
    /// end-of-input error is reported.
    end: (u32, Location),
}

impl<'a, S: TokenSource<'a>> Lookahead<'a, S> {
    fn new(source: S) -> Self {
        Self {
            source,
            peeked: None,
            exhausted: false,
            end: (0, Location::default()),
        }
    }

    fn pull(&mut self) -> Result<Option<Spanned<Token<'a>>>, Error> {
        if self.exhausted {
            return Ok(None);
        }
        match self.source.next_token()? {
            Some(tok) => {
                self.end = end_of(&tok);
                Ok(Some(tok))
            }
            None => {
                self.exhausted = true;
                Ok(None)
            }
        }
    }

    /// Returns the next token without consuming it.
    fn peek(&mut self) -> Result<Option<&Spanned<Token<'a>>>, Error> {
        if self.peeked.is_none() {
            self.peeked = self.pull()?;
        }
        Ok(self.peeked.as_ref())
    }

    /// Consumes and returns the next token.
    fn next(&mut self) -> Result<Option<Spanned<Token<'a>>>, Error> {
        match self.peeked.take() {
            Some(tok) => Ok(Some(tok)),
            None => self.pull(),
        }
    }

    /// Consumes the next token, failing at end of input.
    fn expect_next(&mut self) -> Result<Spanned<Token<'a>>, Error> {
        match self.next()? {
            Some(tok) => Ok(tok),
            None => Err(self.eof_error()),
        }
    }

    /// Consumes the next token if `pred` accepts it.
    fn eat_if(&mut self, pred: impl FnOnce(&Token<'a>) -> bool) -> Result<bool, Error> {
        let hit = match self.peek()? {
            Some(tok) => pred(&tok.value),
            None => false,
        };
        if hit {
            self.peeked = None;
        }
        Ok(hit)
    }

    fn skip_newlines(&mut self) -> Result<(), Error> {
        while self.eat_if(|t| *t == Token::Newline)? {}
        Ok(())
    }

    /// Consumes a statement terminator: a newline or the end of input.
    fn expect_line_end(&mut self, expected: &'static str) -> Result<(), Error> {
        match self.next()? {
            None => Ok(()),
            Some(tok) if tok.value == Token::Newline => Ok(()),
            Some(tok) => Err(unexpected(&tok, expected)),
        }
    }

    #[cold]
    fn eof_error(&self) -> Error {
        let (offset, location) = self.end;
        Error {
            kind: ErrorKind::UnexpectedEof,
            span: Span::new(offset, offset),
            location,
        }
    }
}

/// Position immediately after `tok`.
fn end_of(tok: &Spanned<Token<'_>>) -> (u32, Location) {
    let location = match tok.value {
        Token::Newline => Location::new(tok.location.line.saturating_add(1), 1),
        _ => Location::new(
            tok.location.line,
            tok.location.column.saturating_add(tok.span.len()),
        ),
    };
    (tok.span.end, location)
}

#[cold]
fn unexpected(tok: &Spanned<Token<'_>>, expected: &'static str) -> Error {
    Error {
        kind: ErrorKind::UnexpectedToken {
            expected,
            found: tok.value.describe(),
        },
        span: tok.span,
        location: tok.location,
    }
}

/// Turns a bare key or quoted string token into a key segment.
fn key_from<'a>(tok: Spanned<Token<'a>>, expected: &'static str) -> Result<Key<'a>, Error> {
    let Spanned {
        value,
        span,
        location,
    } = tok;
    match value.into_key() {
        Ok(name) => Ok(Spanned::with_location(name, span, location)),
        Err(other) => Err(unexpected(
            &Spanned::with_location(other, span, location),
            expected,
        )),
    }
}

// ---------------------------------------------------------------------------
// Key resolution
// ---------------------------------------------------------------------------

/// Resolves the dotted key starting with `key` against `table`.
///
/// Returns the table owning the final segment together with that segment.
/// Every intermediate segment is descended into, creating missing tables
/// along the way, and its name is appended to `walked`. The next segment is
/// read before the table for the current one is created, so a malformed
/// path never leaves an empty table behind.
fn resolve_key<'a, 't, S: TokenSource<'a>>(
    tokens: &mut Lookahead<'a, S>,
    table: &'t mut Table,
    key: Key<'a>,
    walked: &mut Vec<String>,
) -> Result<(&'t mut Table, Key<'a>), Error> {
    let Some(next) = tokens.peek()? else {
        return Err(tokens.eof_error());
    };
    match next.value {
        Token::Equals | Token::RightBracket => return Ok((table, key)),
        Token::Period => {}
        _ => return Err(unexpected(next, "'.', ']' or '=' after key")),
    }
    tokens.peeked = None;

    let segment = key_from(tokens.expect_next()?, "key after '.'")?;
    let sub = table.subtable_or_insert(&key)?;
    walked.push(key.value.into_owned());
    resolve_key(tokens, sub, segment, walked)
}

/// Follows `path` from `root`. Every path stored as the current table was
/// produced by a successful header, and tables are never removed or
/// retyped while parsing.
fn table_at<'t>(root: &'t mut Table, path: &[String]) -> &'t mut Table {
    let mut table = root;
    for name in path {
        table = table
            .get_mut(name)
            .and_then(Value::as_table_mut)
            .expect("current table path must resolve to a table");
    }
    table
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

fn parse_value<'a, S: TokenSource<'a>>(tokens: &mut Lookahead<'a, S>) -> Result<Value, Error> {
    let tok = tokens.expect_next()?;
    match tok.value {
        Token::String(s) => Ok(Value::String(s.into_owned())),
        Token::Integer(i) => Ok(Value::Integer(i)),
        Token::Boolean(b) => Ok(Value::Boolean(b)),
        Token::LeftBracket => parse_array(tokens).map(Value::Array),
        _ => Err(unexpected(&tok, "value type")),
    }
}

/// Parses array elements after the opening `[`. Newlines may appear between
/// elements and a trailing comma is allowed.
fn parse_array<'a, S: TokenSource<'a>>(
    tokens: &mut Lookahead<'a, S>,
) -> Result<Vec<Value>, Error> {
    let mut items = Vec::new();
    loop {
        tokens.skip_newlines()?;
        if tokens.eat_if(|t| *t == Token::RightBracket)? {
            return Ok(items);
        }
        items.push(parse_value(tokens)?);
        tokens.skip_newlines()?;
        let tok = tokens.expect_next()?;
        match tok.value {
            Token::Comma => {}
            Token::RightBracket => return Ok(items),
            _ => return Err(unexpected(&tok, "',' or ']' after array element")),
        }
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Builds a [`Table`] from a stream of tokens.
///
/// The parser owns the tree while it is being built. Bare assignments go
/// into the *current table*, which starts as the root and is switched by
/// each `[table]` header. On success the finished root is handed to the
/// caller and the parser is left empty; on failure everything built so far
/// is dropped.
///
/// # Examples
///
/// ```
/// use toml_tree::{Lexer, Parser};
///
/// let mut parser = Parser::new(Lexer::new("[server]\nport = 8080\n"));
/// let root = parser.parse()?;
/// let server = root.get("server").and_then(|v| v.as_table()).unwrap();
/// assert_eq!(server.get("port").and_then(|v| v.as_integer()), Some(8080));
/// # Ok::<(), toml_tree::Error>(())
/// ```
pub struct Parser<'a, S> {
    tokens: Lookahead<'a, S>,
    root: Table,
    /// Path from the root to the current table; empty for the root itself.
    current: Vec<String>,
}

impl<'a, S: TokenSource<'a>> Parser<'a, S> {
    /// Creates a parser pulling tokens from `source`.
    pub fn new(source: S) -> Self {
        Parser {
            tokens: Lookahead::new(source),
            root: Table::new(),
            current: Vec::new(),
        }
    }

    /// Parses statements until the end of input and returns the root table.
    pub fn parse(&mut self) -> Result<Table, Error> {
        let result = self.parse_document();
        let root = std::mem::take(&mut self.root);
        self.current.clear();
        match result {
            Ok(()) => {
                tracing::debug!(entries = root.len(), "parsed document");
                Ok(root)
            }
            Err(err) => {
                tracing::debug!(
                    error = %err,
                    line = err.location.line,
                    column = err.location.column,
                    "parse failed"
                );
                Err(err)
            }
        }
    }

    fn parse_document(&mut self) -> Result<(), Error> {
        loop {
            let Some(tok) = self.tokens.next()? else {
                return Ok(());
            };
            match tok.value {
                Token::Key(_) | Token::String(_) => {
                    let key = key_from(tok, "key")?;
                    self.parse_assignment(key)?;
                }
                Token::LeftBracket => {
                    self.current.clear();
                    self.parse_table_header(tok.location)?;
                }
                Token::Newline => {}
                _ => return Err(unexpected(&tok, "key")),
            }
        }
    }

    /// `key = value`, where `key` may be dotted.
    fn parse_assignment(&mut self, first: Key<'a>) -> Result<(), Error> {
        tracing::trace!(key = %first.value, location = %first.location, "assignment");
        let statement_span = first.span;
        let statement_location = first.location;

        let table = table_at(&mut self.root, &self.current);
        let (table, leaf) = resolve_key(&mut self.tokens, table, first, &mut Vec::new())?;

        if let Some(first_span) = table.get_key_span(&leaf.value) {
            return Err(Error {
                kind: ErrorKind::DuplicateKey {
                    key: leaf.value.into_owned(),
                    first: first_span,
                },
                span: statement_span,
                location: statement_location,
            });
        }

        let eq = self.tokens.expect_next()?;
        if eq.value != Token::Equals {
            return Err(unexpected(&eq, "'=' after key"));
        }
        let value = parse_value(&mut self.tokens)?;
        table.insert_spanned(leaf.value.into_owned(), leaf.span, value);

        self.tokens.expect_line_end("newline after value")
    }

    /// `[key]`, where `key` may be dotted. The opening bracket is consumed
    /// and the current table already reset to the root.
    fn parse_table_header(&mut self, at: Location) -> Result<(), Error> {
        tracing::trace!(location = %at, "table header");
        let first = key_from(self.tokens.expect_next()?, "key inside of square brackets")?;

        let mut path = Vec::new();
        let (table, leaf) = resolve_key(&mut self.tokens, &mut self.root, first, &mut path)?;
        table.subtable_or_insert(&leaf)?;
        path.push(leaf.value.into_owned());
        self.current = path;

        let close = self.tokens.expect_next()?;
        if close.value != Token::RightBracket {
            return Err(unexpected(&close, "']' after table key"));
        }
        match self.tokens.next()? {
            Some(tok) if tok.value == Token::Newline => Ok(()),
            Some(tok) => Err(unexpected(&tok, "newline after table header")),
            None => Err(self.tokens.eof_error()),
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level parse entry points
// ---------------------------------------------------------------------------

/// Parses a document into its root [`Table`].
///
/// # Examples
///
/// ```
/// let root = toml_tree::parse("a.b = 1\na.c = 2\n")?;
/// let a = root.get("a").and_then(|v| v.as_table()).unwrap();
/// assert_eq!(a.len(), 2);
/// # Ok::<(), toml_tree::Error>(())
/// ```
pub fn parse(s: &str) -> Result<Table, Error> {
    // Spans are u32 byte offsets.
    if u32::try_from(s.len()).is_err() {
        return Err(Error {
            kind: ErrorKind::FileTooLarge,
            span: Span::new(0, 0),
            location: Location::default(),
        });
    }
    Parser::new(Lexer::new(s)).parse()
}

/// Parses a pre-built token list into its root [`Table`].
pub fn parse_tokens(tokens: Vec<Spanned<Token<'_>>>) -> Result<Table, Error> {
    Parser::new(TokenList::new(tokens)).parse()
}

#[cfg(test)]
#[path = "./parser_tests.rs"]
mod tests;
