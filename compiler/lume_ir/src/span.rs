//! Source locations.
//!
//! The lexer reports 1-based line and column numbers. The engine only ever
//! copies them into diagnostics and call frames, so a span is a single point.

use std::fmt;

/// Source position of a token or tree node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub line: u32,
    pub column: u32,
}

impl Span {
    /// Span for generated code and trees built without source text.
    pub const DUMMY: Span = Span { line: 0, column: 0 };

    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Span { line, column }
    }

    #[inline]
    pub const fn is_dummy(self) -> bool {
        self.line == 0
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Anything that carries a source location.
pub trait Spanned {
    fn span(&self) -> Span;
}
