use metapath_ast::Span;

/// A span in the source text.
///
/// Designates where in the expression source a static error occurred.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SourceSpan(usize, usize);

impl SourceSpan {
    /// Get the range of the span.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.0..self.1
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        Self(span.start, span.end)
    }
}

impl From<std::ops::Range<usize>> for SourceSpan {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self(range.start, range.end)
    }
}
