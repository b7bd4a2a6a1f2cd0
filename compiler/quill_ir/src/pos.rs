//! Source positions.
//!
//! Every token, AST node and diagnostic carries a `SourcePos`. Positions are
//! ordered lexicographically (line first, then column), which is what the
//! unreachable-code check relies on when it looks for the first position of a
//! statement subtree.

use std::fmt;

/// A `(line, column)` pair, both 1-based.
///
/// The derived ordering compares `line` before `col`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct SourcePos {
    pub line: u32,
    pub col: u32,
}

impl SourcePos {
    /// Position used for synthesized code and empty input.
    pub const START: SourcePos = SourcePos { line: 1, col: 1 };

    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        SourcePos { line, col }
    }

    /// The earlier of two positions.
    #[inline]
    #[must_use]
    pub fn min(self, other: SourcePos) -> SourcePos {
        std::cmp::min(self, other)
    }
}

impl fmt::Debug for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[cfg(test)]
mod tests;
