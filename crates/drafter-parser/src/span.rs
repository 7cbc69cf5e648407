//! Source spans for diagnostics.
//!
//! A [`Span`] is a byte range into the original source text. The parser is
//! line-oriented, so most spans cover a single line or a field within one.

use std::fmt;

/// A byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range.
    pub fn new(range: std::ops::Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }

    /// Get the start offset of the span.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Create a union of two spans (encompassing both).
    pub fn union(&self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::new(0..0)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A value paired with the source span it was parsed from.
///
/// `Spanned<T>` lets validation report errors at the exact location the
/// offending value was declared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spanned<T> {
    value: T,
    span: Span,
}

impl<T> Spanned<T> {
    /// Create a new spanned value.
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }

    /// Get a reference to the wrapped value.
    pub fn inner(&self) -> &T {
        &self.value
    }

    /// Consume the wrapper and return the value.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Get the span of the value.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Map the wrapped value, preserving the span.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Spanned<U> {
        Spanned {
            value: f(self.value),
            span: self.span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_union() {
        let a = Span::new(5..10);
        let b = Span::new(8..20);
        assert_eq!(a.union(b), Span::new(5..20));
    }

    #[test]
    fn test_span_len_and_empty() {
        assert_eq!(Span::new(3..7).len(), 4);
        assert!(Span::new(4..4).is_empty());
        assert!(!Span::new(4..5).is_empty());
    }

    #[test]
    fn test_spanned_map_preserves_span() {
        let spanned = Spanned::new("42", Span::new(1..3));
        let mapped = spanned.map(|s| s.len());
        assert_eq!(*mapped.inner(), 2);
        assert_eq!(mapped.span(), Span::new(1..3));
    }
}
