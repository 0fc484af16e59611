//! Byte ranges into page source, and values tagged with them.

/// A range of text within a string.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct Span {
    /// The position of the first byte of the span.
    pub start: usize,

    /// The position after the last byte of the span.
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Converts the span into a range that can be used for string indexing.
    #[inline]
    pub fn into_range(self) -> core::ops::Range<usize> {
        self.start..self.end
    }

    /// Returns the text covered by this span in `source`, or an empty string
    /// if the span does not fall on character boundaries of `source`.
    #[inline]
    pub fn text(self, source: &str) -> &str {
        source.get(self.into_range()).unwrap_or_default()
    }
}

/// Associates a [`Span`] with a value of arbitrary type.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Spanned<T> {
    /// The value.
    pub node: T,
    /// The span.
    pub span: Span,
}

impl<T> Spanned<T> {
    /// Creates a new [`Spanned`].
    #[inline]
    pub fn new(node: T, start: usize, end: usize) -> Self {
        Self {
            node,
            span: Span { start, end },
        }
    }
}

impl<T> core::ops::Deref for Spanned<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.node
    }
}
