//! Tokens and the pull-based token source the parser consumes.

use crate::{Error, Spanned};
use std::borrow::Cow;

#[cfg(test)]
#[path = "./token_tests.rs"]
mod tests;

/// A single lexical token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// A bare key such as `name` or `server-port`.
    Key(&'a str),
    /// A double-quoted string, escapes already processed.
    String(Cow<'a, str>),
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// `true` or `false`.
    Boolean(bool),
    /// `=`
    Equals,
    /// `.`
    Period,
    /// `,`
    Comma,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `\n` or `\r\n`
    Newline,
}

impl Token<'_> {
    /// Describes the token for error messages, e.g. `"an equals"`.
    pub fn describe(&self) -> &'static str {
        match self {
            Token::Key(_) => "an identifier",
            Token::String(_) => "a string",
            Token::Integer(_) => "an integer",
            Token::Boolean(_) => "a boolean",
            Token::Equals => "an equals",
            Token::Period => "a period",
            Token::Comma => "a comma",
            Token::LeftBracket => "a left bracket",
            Token::RightBracket => "a right bracket",
            Token::Newline => "a newline",
        }
    }
}

impl<'a> Token<'a> {
    /// Converts a token that may name a key, a bare key or a quoted string,
    /// into the key name. Any other token is handed back unchanged.
    pub fn into_key(self) -> Result<Cow<'a, str>, Token<'a>> {
        match self {
            Token::Key(name) => Ok(Cow::Borrowed(name)),
            Token::String(name) => Ok(name),
            other => Err(other),
        }
    }
}

/// A lazy, finite stream of tokens.
///
/// `Ok(None)` signals the end of input. The parser never calls
/// [`next_token`](Self::next_token) again after receiving it.
pub trait TokenSource<'a> {
    /// Pulls the next token.
    fn next_token(&mut self) -> Result<Option<Spanned<Token<'a>>>, Error>;
}

impl<'a, S> TokenSource<'a> for &mut S
where
    S: TokenSource<'a> + ?Sized,
{
    fn next_token(&mut self) -> Result<Option<Spanned<Token<'a>>>, Error> {
        (**self).next_token()
    }
}

/// A token source over a pre-built list of tokens.
///
/// Lets the parser run without the lexer.
///
/// # Examples
///
/// ```
/// use toml_tree::{Spanned, Token, TokenList};
///
/// let tokens = TokenList::from(vec![
///     Spanned::new(Token::Key("port")),
///     Spanned::new(Token::Equals),
///     Spanned::new(Token::Integer(8080)),
/// ]);
/// let table = toml_tree::Parser::new(tokens).parse()?;
/// assert_eq!(table.get("port").and_then(|v| v.as_integer()), Some(8080));
/// # Ok::<(), toml_tree::Error>(())
/// ```
#[derive(Debug)]
pub struct TokenList<'a> {
    tokens: std::vec::IntoIter<Spanned<Token<'a>>>,
}

impl<'a> TokenList<'a> {
    /// Creates a source yielding `tokens` in order.
    pub fn new(tokens: Vec<Spanned<Token<'a>>>) -> Self {
        Self {
            tokens: tokens.into_iter(),
        }
    }
}

impl<'a> From<Vec<Spanned<Token<'a>>>> for TokenList<'a> {
    fn from(tokens: Vec<Spanned<Token<'a>>>) -> Self {
        Self::new(tokens)
    }
}

impl<'a> TokenSource<'a> for TokenList<'a> {
    #[inline]
    fn next_token(&mut self) -> Result<Option<Spanned<Token<'a>>>, Error> {
        Ok(self.tokens.next())
    }
}
