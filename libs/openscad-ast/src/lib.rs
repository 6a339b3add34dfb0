//! # OpenSCAD AST
//!
//! Typed, location-tagged Abstract Syntax Tree for OpenSCAD, built from the
//! CST produced by `openscad_parser`.
//!
//! ## Architecture
//!
//! ```text
//! Source text → openscad_parser (CST) → this crate (AST) → diagnostics
//! ```
//!
//! ## Example
//!
//! ```rust
//! use openscad_ast::parse;
//!
//! let (statements, diagnostics) = parse("cube([1, 2, 3], center = true);");
//! assert_eq!(statements.len(), 1);
//! assert!(diagnostics.iter().all(|d| !d.is_error()));
//! ```

pub mod ast;
pub mod binder;
pub mod diagnostic;
pub mod error;
pub mod eval;
pub mod extract;
pub mod navigator;
pub mod span;
pub mod value;
pub mod visitor;

pub use ast::Statement;
pub use diagnostic::{Diagnostic, Severity};
pub use error::AstError;
pub use span::SourceLocation;
pub use value::Expression;

/// Parses OpenSCAD source into a statement list and a diagnostic sink.
///
/// The CST collaborator's own parse errors surface first, as
/// `Diagnostic::error` entries, ahead of any diagnostics produced while
/// building the AST itself. Per-statement failures degrade to an
/// `ErrorNode` in place; they never cause this function to return early.
pub fn parse(source: &str) -> (Vec<Statement>, Vec<Diagnostic>) {
    let cst = openscad_parser::parse(source);
    let mut diagnostics: Vec<Diagnostic> = cst
        .errors
        .iter()
        .map(|e| Diagnostic::error(e.to_string(), SourceLocation::sentinel()))
        .collect();

    let statements = visitor::visit_children(&cst.root, 0, &mut diagnostics);
    (statements, diagnostics)
}

/// Parses a single OpenSCAD expression (no statement context), for
/// consumers such as a language server evaluating a hover or completion.
///
/// The collaborator parser only exposes a statement-level entry point, so
/// this wraps `source` as the right-hand side of a throwaway assignment and
/// pulls the value back out of the resulting `Assignment` node.
pub fn parse_expression(source: &str) -> (Expression, Vec<Diagnostic>) {
    let wrapped = format!("__openscad_ast_expr__ = {source};");
    let cst = openscad_parser::parse(&wrapped);
    let mut diagnostics: Vec<Diagnostic> = cst
        .errors
        .iter()
        .map(|e| Diagnostic::error(e.to_string(), SourceLocation::sentinel()))
        .collect();

    let root_expr = cst
        .root
        .children
        .first()
        .and_then(|assignment| assignment.children.get(1))
        .unwrap_or(&cst.root);
    let value = eval::evaluate(root_expr, &mut diagnostics);
    let expr = match value {
        value::ParameterValue::Expression(expr) => *expr,
        other => Expression::literal(other, SourceLocation::from(root_expr.span)),
    };
    (expr, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_source_yields_no_statements() {
        let (statements, diagnostics) = parse("");
        assert!(statements.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn parse_surfaces_collaborator_errors_first() {
        let (_, diagnostics) = parse("cube(;");
        assert!(diagnostics.iter().any(|d| d.is_error()));
    }

    #[test]
    fn parse_preserves_statement_order() {
        let (statements, _) = parse("cube(1); sphere(2); cylinder(h=1, r=1);");
        assert_eq!(statements.len(), 3);
        assert!(matches!(statements[0], Statement::Cube { .. }));
        assert!(matches!(statements[1], Statement::Sphere { .. }));
        assert!(matches!(statements[2], Statement::Cylinder { .. }));
    }

    #[test]
    fn parse_expression_evaluates_constant_arithmetic() {
        let (expr, _) = parse_expression("1 + 2 * 3");
        assert!(matches!(expr, Expression::Literal { value: value::ParameterValue::Number(n), .. } if n == 7.0));
    }
}
