//! Source location tracking for the tokenizer
//!
//! Tokens carry byte-offset spans into the text they were produced from.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open byte range `[start, end)` of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "Span start must not be after end");
        Self { start, end }
    }

    /// Get the byte length of this span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if this span contains a byte offset
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Check if this span fully contains another span
    pub fn contains_span(&self, other: &Span) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Check whether two spans share at least one byte
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Move this span by a base offset (nested scans use relative offsets)
    pub fn shifted(self, base: usize) -> Self {
        Self {
            start: self.start + base,
            end: self.end + base,
        }
    }

    /// Merge two spans into one covering both
    pub fn merge(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Get the source text for this span from the input
    pub fn slice<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start..self.end]
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_basics() {
        let span = Span::new(2, 6);
        assert_eq!(span.len(), 4);
        assert!(span.contains(2));
        assert!(!span.contains(6));
        assert!(span.contains_span(&Span::new(3, 6)));
        assert!(!span.contains_span(&Span::new(1, 3)));
        assert_eq!(span.slice("abcdefgh"), "cdef");
    }

    #[test]
    fn test_span_overlap_and_shift() {
        let a = Span::new(0, 4);
        assert!(a.overlaps(&Span::new(3, 5)));
        assert!(!a.overlaps(&Span::new(4, 5)));
        assert_eq!(Span::new(1, 2).shifted(10), Span::new(11, 12));
        assert_eq!(a.merge(Span::new(6, 9)), Span::new(0, 9));
    }
}
