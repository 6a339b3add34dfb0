//! # Source Position & Span
//!
//! Byte/line/column tracking shared by the lexer, parser, and CST.
//!
//! ## Example
//!
//! ```rust
//! use openscad_parser::span::Span;
//!
//! let span = Span::from_bytes(0, 4);
//! assert_eq!(span.start.byte, 0);
//! assert_eq!(span.end.byte, 4);
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// POSITION
// =============================================================================

/// A single point in the source text.
///
/// Lines and columns are 0-indexed internally; external presentation
/// (1-based lines/columns) is a boundary concern for consumers.
///
/// ## Example
///
/// ```rust
/// use openscad_parser::span::Position;
///
/// let pos = Position::new(5, 0, 5);
/// assert_eq!(pos.byte, 5);
/// assert_eq!(pos.column, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset from the start of the source.
    pub byte: usize,
    /// Line number (0-indexed).
    pub line: usize,
    /// Column number (0-indexed, in UTF-8 bytes).
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    pub const fn new(byte: usize, line: usize, column: usize) -> Self {
        Self { byte, line, column }
    }

    /// The position at the very start of a source buffer.
    pub const fn zero() -> Self {
        Self { byte: 0, line: 0, column: 0 }
    }
}

// =============================================================================
// SPAN
// =============================================================================

/// A range in the source code, from `start` (inclusive) to `end` (exclusive).
///
/// Every CST node, token, and AST node carries a `Span` so that tooling can
/// map back to the originating source text.
///
/// ## Example
///
/// ```rust
/// use openscad_parser::span::Span;
///
/// let span = Span::from_bytes(0, 9);
/// assert_eq!(span.start.byte, 0);
/// assert_eq!(span.end.byte, 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive).
    pub start: Position,
    /// End position (exclusive).
    pub end: Position,
}

impl Span {
    /// Creates a span from two positions.
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Creates a span from raw byte offsets, with line/column left at zero.
    ///
    /// Used by tests and call sites that only care about byte ranges.
    pub const fn from_bytes(start: usize, end: usize) -> Self {
        Self {
            start: Position { byte: start, line: 0, column: 0 },
            end: Position { byte: end, line: 0, column: 0 },
        }
    }

    /// A zero-length span at the start of the source. Used as a sentinel for
    /// synthetic nodes that have no real source location.
    pub const fn zero() -> Self {
        Self { start: Position::zero(), end: Position::zero() }
    }

    /// Creates a span that encloses both `self` and `other`.
    pub fn merge(&self, other: &Span) -> Span {
        let start = if self.start.byte <= other.start.byte { self.start } else { other.start };
        let end = if self.end.byte >= other.end.byte { self.end } else { other.end };
        Span { start, end }
    }
}

/// Implemented by anything that has a source span.
pub trait Spanned {
    /// Returns the source span of this value.
    fn span(&self) -> Span;
}
