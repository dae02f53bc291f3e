use crate::{Location, Span};
use std::fmt::{self, Debug, Display};

#[cfg(test)]
#[path = "./error_tests.rs"]
mod tests;

/// Error produced while lexing or parsing a document.
///
/// Every error is fatal: parsing stops at the first one and no partial
/// tree is returned.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    /// The error kind
    pub kind: ErrorKind,
    /// The span of the offending token.
    ///
    /// Note some [`ErrorKind`] contain additional span information
    pub span: Span,
    /// Line and column of the start of `span`.
    pub location: Location,
}

impl std::error::Error for Error {}

impl From<(ErrorKind, Span, Location)> for Error {
    fn from((kind, span, location): (ErrorKind, Span, Location)) -> Self {
        Self {
            kind,
            span,
            location,
        }
    }
}

/// The kinds of error that can occur while parsing.
#[derive(Clone, PartialEq)]
pub enum ErrorKind {
    /// A token was required but the input ended.
    UnexpectedEof,

    /// The input is larger than the maximum supported size of 4GiB.
    FileTooLarge,

    /// A token was present but not valid at this point of the grammar.
    UnexpectedToken {
        /// What the grammar expected, e.g. `"key after '.'"`.
        expected: &'static str,
        /// Description of the token that was found.
        found: &'static str,
    },

    /// A key was assigned a second time in the same table.
    DuplicateKey {
        /// The duplicate key
        key: String,
        /// The span where the key was first defined
        first: Span,
    },

    /// A dotted key or table header addressed a key holding a non-table
    /// value.
    NotATable {
        /// The key that was expected to name a table
        key: String,
        /// The span where the non-table value was defined
        first: Span,
    },

    /// An unexpected character was found by the lexer.
    Unexpected(char),

    /// The input ended before a string was closed.
    UnterminatedString,

    /// A character not allowed in a string was found.
    InvalidCharInString(char),

    /// An unsupported character followed a backslash.
    InvalidEscape(char),

    /// A word starting like a number failed to parse as a 64-bit integer.
    InvalidNumber,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::UnexpectedEof => "unexpected-eof",
            Self::FileTooLarge => "file-too-large",
            Self::UnexpectedToken { .. } => "unexpected-token",
            Self::DuplicateKey { .. } => "duplicate-key",
            Self::NotATable { .. } => "not-a-table",
            Self::Unexpected(..) => "unexpected",
            Self::UnterminatedString => "unterminated-string",
            Self::InvalidCharInString(..) => "invalid-char-in-string",
            Self::InvalidEscape(..) => "invalid-escape",
            Self::InvalidNumber => "invalid-number",
        };
        f.write_str(text)
    }
}

impl Debug for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

struct Escape(char);

impl fmt::Display for Escape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        if self.0.is_whitespace() || self.0.is_control() {
            for esc in self.0.escape_default() {
                f.write_char(esc)?;
            }
            Ok(())
        } else {
            f.write_char(self.0)
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::UnexpectedEof => f.write_str("unexpected end of input"),
            ErrorKind::FileTooLarge => f.write_str("file is too large (maximum 4GiB)"),
            ErrorKind::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            ErrorKind::DuplicateKey { key, .. } => write!(f, "duplicate key: `{key}`"),
            ErrorKind::NotATable { key, .. } => {
                write!(f, "key `{key}` does not refer to a table")
            }
            ErrorKind::Unexpected(c) => {
                write!(f, "unexpected character found: `{}`", Escape(*c))
            }
            ErrorKind::UnterminatedString => f.write_str("unterminated string"),
            ErrorKind::InvalidCharInString(c) => {
                write!(f, "invalid character in string: `{}`", Escape(*c))
            }
            ErrorKind::InvalidEscape(c) => {
                write!(f, "invalid escape character in string: `{}`", Escape(*c))
            }
            ErrorKind::InvalidNumber => f.write_str("invalid number"),
        }
    }
}

#[cfg(feature = "reporting")]
#[cfg_attr(docsrs, doc(cfg(feature = "reporting")))]
impl Error {
    /// Converts this [`Error`] into a [`codespan_reporting::diagnostic::Diagnostic`]
    pub fn to_diagnostic<FileId: Copy + PartialEq>(
        &self,
        fid: FileId,
    ) -> codespan_reporting::diagnostic::Diagnostic<FileId> {
        use codespan_reporting::diagnostic::{Diagnostic, Label};

        let diag = Diagnostic::error()
            .with_code(self.kind.to_string())
            .with_message(self.to_string());

        match &self.kind {
            ErrorKind::DuplicateKey { first, .. } => diag.with_labels(vec![
                Label::secondary(fid, *first).with_message("first key instance"),
                Label::primary(fid, self.span).with_message("duplicate key"),
            ]),
            ErrorKind::NotATable { first, .. } => diag.with_labels(vec![
                Label::secondary(fid, *first).with_message("non-table value defined here"),
                Label::primary(fid, self.span).with_message("attempted to extend table here"),
            ]),
            ErrorKind::UnexpectedToken { expected, .. } => diag.with_labels(vec![
                Label::primary(fid, self.span).with_message(format!("expected {expected}")),
            ]),
            ErrorKind::Unexpected(c) => diag.with_labels(vec![
                Label::primary(fid, self.span)
                    .with_message(format!("unexpected character '{}'", Escape(*c))),
            ]),
            ErrorKind::InvalidCharInString(c) => diag.with_labels(vec![
                Label::primary(fid, self.span)
                    .with_message(format!("invalid character '{}' in string", Escape(*c))),
            ]),
            ErrorKind::InvalidEscape(c) => diag.with_labels(vec![
                Label::primary(fid, self.span)
                    .with_message(format!("invalid escape character '{}'", Escape(*c))),
            ]),
            ErrorKind::UnterminatedString => diag.with_labels(vec![
                Label::primary(fid, self.span).with_message("eof reached before string terminator"),
            ]),
            ErrorKind::InvalidNumber => diag.with_labels(vec![
                Label::primary(fid, self.span).with_message("unable to parse number"),
            ]),
            ErrorKind::UnexpectedEof | ErrorKind::FileTooLarge => {
                diag.with_labels(vec![Label::primary(fid, self.span)])
            }
        }
    }
}
