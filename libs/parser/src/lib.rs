//! # OpenSCAD Parser (Pure Rust)
//!
//! A pure Rust parser for OpenSCAD source code.
//! No C dependencies - compiles directly to WASM.
//!
//! ## Architecture
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → CST
//! ```
//!
//! ## Example
//!
//! ```rust
//! use openscad_parser::parse;
//!
//! let result = parse("cube(10);");
//! assert!(result.errors.is_empty());
//! ```
//!
//! ## Pipeline Integration
//!
//! This crate is the first layer in the OpenSCAD pipeline:
//!
//! ```text
//! openscad-parser → openscad-ast → openscad-eval → openscad-mesh → wasm
//! ```

pub mod lexer;
pub mod parser;
pub mod cst;
pub mod error;
pub mod span;

// Re-export public API
pub use cst::{Cst, CstNode, NodeKind};
pub use error::{ParseError, ParseErrorKind};
pub use span::{Position, Span, Spanned};

// =============================================================================
// PUBLIC API
// =============================================================================

/// Parse OpenSCAD source code into a Concrete Syntax Tree.
///
/// This is the main entry point for the parser.
///
/// ## Parameters
///
/// - `source`: OpenSCAD source code string
///
/// ## Returns
///
/// `Cst` containing the root node and any parse errors
///
/// ## Example
///
/// ```rust
/// use openscad_parser::parse;
///
/// let cst = parse("cube(10);");
/// assert!(cst.is_ok());
/// assert_eq!(cst.root.kind, openscad_parser::NodeKind::SourceFile);
/// ```
///
/// ## Error Handling
///
/// The parser attempts to recover from errors and continue parsing.
/// Errors are collected in `cst.errors`. Check `cst.is_ok()` for success.
///
/// ```rust
/// use openscad_parser::parse;
/// let cst = parse("cube(;"); // Syntax error
/// assert!(!cst.is_ok());
/// println!("Errors: {:?}", cst.errors);
/// ```
pub fn parse(source: &str) -> Cst {
    let tokens = lexer::Lexer::new(source).tokenize();
    let mut parser = parser::Parser::new(source, tokens);
    parser.parse()
}

// =============================================================================
// TESTS
// =============================================================================
