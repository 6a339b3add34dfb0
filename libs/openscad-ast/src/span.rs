//! Source locations for AST nodes.
//!
//! Thin wrapper over `openscad_parser::span` so the AST does not re-derive
//! position tracking; the external parser remains the single source of truth
//! for byte/line/column coordinates.

use openscad_parser::span::Span as CstSpan;
use serde::{Deserialize, Serialize};

/// A 0-based position: byte offset plus line/column.
///
/// ## Example
///
/// ```rust
/// use openscad_ast::span::Position;
/// let pos = Position::new(4, 0, 4);
/// assert_eq!(pos.byte, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub byte: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(byte: usize, line: usize, column: usize) -> Self {
        Self { byte, line, column }
    }

    pub const fn zero() -> Self {
        Self { byte: 0, line: 0, column: 0 }
    }
}

impl From<openscad_parser::span::Position> for Position {
    fn from(p: openscad_parser::span::Position) -> Self {
        Self::new(p.byte, p.line, p.column)
    }
}

/// `{ start, end }` source location attached to every AST node.
///
/// ## Example
///
/// ```rust
/// use openscad_ast::span::{SourceLocation, Position};
/// let loc = SourceLocation::new(Position::zero(), Position::new(9, 0, 9));
/// assert!(loc.start.byte <= loc.end.byte);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
}

impl SourceLocation {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Sentinel zero-span used by `ErrorNode` fallbacks that have no
    /// meaningful CST location to anchor to.
    pub const fn sentinel() -> Self {
        Self { start: Position::zero(), end: Position::zero() }
    }

    /// Smallest location enclosing both `self` and `other`.
    pub fn merge(&self, other: &SourceLocation) -> SourceLocation {
        let start = if self.start.byte <= other.start.byte { self.start } else { other.start };
        let end = if self.end.byte >= other.end.byte { self.end } else { other.end };
        SourceLocation { start, end }
    }

    /// Whether `self` encloses `other` (used by span-monotonicity tests).
    pub fn encloses(&self, other: &SourceLocation) -> bool {
        self.start.byte <= other.start.byte && self.end.byte >= other.end.byte
    }
}

impl From<CstSpan> for SourceLocation {
    fn from(span: CstSpan) -> Self {
        Self::new(span.start.into(), span.end.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_takes_widest_bounds() {
        let a = SourceLocation::new(Position::new(2, 0, 2), Position::new(5, 0, 5));
        let b = SourceLocation::new(Position::new(0, 0, 0), Position::new(3, 0, 3));
        let merged = a.merge(&b);
        assert_eq!(merged.start.byte, 0);
        assert_eq!(merged.end.byte, 5);
    }

    #[test]
    fn from_cst_span_preserves_bytes() {
        let cst = CstSpan::from_bytes(1, 4);
        let loc: SourceLocation = cst.into();
        assert_eq!(loc.start.byte, 1);
        assert_eq!(loc.end.byte, 4);
    }
}
