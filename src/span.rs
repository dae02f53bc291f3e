//! Source location types: byte-offset spans and line/column positions.

#[cfg(test)]
#[path = "./span_tests.rs"]
mod tests;

/// A byte-offset range within a document.
///
/// Convertible to and from [`Range<u32>`](std::ops::Range) and
/// [`Range<usize>`](std::ops::Range).
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug, Hash)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: u32,
    /// End byte offset (exclusive).
    pub end: u32,
}

impl Span {
    /// Creates a new [`Span`] from start and end byte offsets.
    #[inline]
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Returns `true` if both start and end are zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == 0 && self.end == 0
    }

    /// Number of bytes covered by the span.
    #[inline]
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

impl From<Span> for (u32, u32) {
    fn from(s: Span) -> (u32, u32) {
        (s.start, s.end)
    }
}

impl From<Span> for (usize, usize) {
    fn from(s: Span) -> (usize, usize) {
        (s.start as usize, s.end as usize)
    }
}

impl From<std::ops::Range<u32>> for Span {
    fn from(s: std::ops::Range<u32>) -> Self {
        Self::new(s.start, s.end)
    }
}

impl From<Span> for std::ops::Range<u32> {
    fn from(s: Span) -> Self {
        s.start..s.end
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(s: Span) -> Self {
        s.start as usize..s.end as usize
    }
}

/// A 1-based line and column position, the column counted in bytes.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct Location {
    /// Line number, starting at 1.
    pub line: u32,
    /// Byte column within the line, starting at 1.
    pub column: u32,
}

impl Location {
    /// Creates a new [`Location`].
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Wraps a value `T` with the [`Span`] and [`Location`] it was read from.
///
/// Tokens travel through the parser as `Spanned<Token>`.
///
/// # Examples
///
/// ```
/// use toml_tree::{Location, Span, Spanned, Token};
///
/// let tok = Spanned::with_location(Token::Equals, Span::new(4, 5), Location::new(1, 5));
/// assert_eq!(tok, Token::Equals);
/// assert_eq!(tok.location.column, 5);
/// ```
pub struct Spanned<T> {
    /// The wrapped value.
    pub value: T,
    /// The byte-offset span in the source document.
    pub span: Span,
    /// Line and column of the first byte of `span`.
    pub location: Location,
}

impl<T> Spanned<T> {
    /// Creates a [`Spanned`] with the given value, a zero span and the
    /// first location of the document.
    #[inline]
    pub const fn new(value: T) -> Self {
        Self {
            value,
            span: Span { start: 0, end: 0 },
            location: Location::new(1, 1),
        }
    }

    /// Creates a [`Spanned`] from a value and a [`Span`]; the location is
    /// left at the start of the document.
    #[inline]
    pub const fn with_span(value: T, span: Span) -> Self {
        Self {
            value,
            span,
            location: Location::new(1, 1),
        }
    }

    /// Creates a [`Spanned`] from a value, a [`Span`] and a [`Location`].
    #[inline]
    pub const fn with_location(value: T, span: Span, location: Location) -> Self {
        Self {
            value,
            span,
            location,
        }
    }

    /// Consumes the wrapper, returning the inner value.
    #[inline]
    pub fn take(self) -> T {
        self.value
    }

    /// Maps the inner value via [`From`], preserving span and location.
    #[inline]
    pub fn map<V>(self) -> Spanned<V>
    where
        V: From<T>,
    {
        Spanned {
            value: self.value.into(),
            span: self.span,
            location: self.location,
        }
    }
}

impl<T> Default for Spanned<T>
where
    T: Default,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> AsRef<T> for Spanned<T> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

impl<T> std::fmt::Debug for Spanned<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.value.fmt(f)
    }
}

impl<T> Clone for Spanned<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            span: self.span,
            location: self.location,
        }
    }
}

impl<T> PartialEq for Spanned<T>
where
    T: PartialEq,
{
    fn eq(&self, o: &Spanned<T>) -> bool {
        self.value == o.value
    }
}

impl<T> Eq for Spanned<T> where T: Eq {}

impl<T> PartialEq<T> for Spanned<T>
where
    T: PartialEq,
{
    fn eq(&self, o: &T) -> bool {
        &self.value == o
    }
}
