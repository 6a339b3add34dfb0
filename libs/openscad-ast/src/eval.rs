//! Expression evaluation with constant folding and symbolic fallback.
//!
//! An expression that fully reduces to a constant comes back as a
//! `ParameterValue` other than `Expression(..)`. An expression that
//! references something unresolvable at parse time (an unbound identifier,
//! a type mismatch) comes back wrapped in `ParameterValue::Expression`
//! instead of failing — callers must accept both shapes.

use openscad_parser::cst::{CstNode, NodeKind};

use crate::diagnostic::Diagnostic;
use crate::extract::extract_value;
use crate::span::SourceLocation;
use crate::value::{BinaryOp, Expression, ParameterValue, UnaryOp};

/// Evaluates a `BinaryExpression`/`UnaryExpression`/`TernaryExpression` CST
/// node, folding constants where possible.
pub fn evaluate(node: &CstNode, diagnostics: &mut Vec<Diagnostic>) -> ParameterValue {
    match node.kind {
        NodeKind::TernaryExpression if node.children.len() == 3 => {
            evaluate_ternary(node, diagnostics)
        }
        NodeKind::BinaryExpression if node.children.len() == 3 => {
            evaluate_binary(node, diagnostics)
        }
        NodeKind::UnaryExpression if node.children.len() == 2 => evaluate_unary(node, diagnostics),
        _ => extract_value(node),
    }
}

fn evaluate_ternary(node: &CstNode, diagnostics: &mut Vec<Diagnostic>) -> ParameterValue {
    let location = SourceLocation::from(node.span);
    let cond = evaluate(&node.children[0], diagnostics);
    match cond {
        ParameterValue::Expression(_) => {
            let then_expr = evaluate(&node.children[1], diagnostics).into_expression(location);
            let else_expr = evaluate(&node.children[2], diagnostics).into_expression(location);
            ParameterValue::Expression(Box::new(Expression::Conditional {
                cond: Box::new(cond.into_expression(location)),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
                location,
            }))
        }
        value => {
            if value.is_truthy() {
                evaluate(&node.children[1], diagnostics)
            } else {
                evaluate(&node.children[2], diagnostics)
            }
        }
    }
}

fn evaluate_binary(node: &CstNode, diagnostics: &mut Vec<Diagnostic>) -> ParameterValue {
    let op_text = node.children[1].text_or_empty();
    let Some(op) = BinaryOp::from_text(op_text) else {
        return symbolic(node);
    };

    let left = evaluate(&node.children[0], diagnostics);

    // Short-circuit before touching the right operand.
    if matches!(op, BinaryOp::And) && !left.is_truthy() && !matches!(left, ParameterValue::Expression(_)) {
        return ParameterValue::Boolean(false);
    }
    if matches!(op, BinaryOp::Or) && left.is_truthy() && !matches!(left, ParameterValue::Expression(_)) {
        return ParameterValue::Boolean(true);
    }

    let right = evaluate(&node.children[2], diagnostics);
    apply_binary(op, left, right, node, diagnostics)
}

fn apply_binary(
    op: BinaryOp,
    left: ParameterValue,
    right: ParameterValue,
    node: &CstNode,
    diagnostics: &mut Vec<Diagnostic>,
) -> ParameterValue {
    use ParameterValue::*;

    if let (String(a), String(b)) = (&left, &right) {
        if matches!(op, BinaryOp::Add) {
            return String(format!("{a}{b}"));
        }
    }
    if matches!(op, BinaryOp::Add) && (matches!(left, String(_)) ^ matches!(right, String(_))) {
        diagnostics.push(Diagnostic::error(
            "type mismatch: cannot add string and non-string",
            SourceLocation::from(node.span),
        ));
        return Undefined;
    }

    match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => match op {
            BinaryOp::Add => Number(a + b),
            BinaryOp::Sub => Number(a - b),
            BinaryOp::Mul => Number(a * b),
            BinaryOp::Div => Number(a / b),
            BinaryOp::Mod => Number(a % b),
            BinaryOp::Pow => Number(a.powf(b)),
            BinaryOp::Eq => Boolean(a == b),
            BinaryOp::Ne => Boolean(a != b),
            BinaryOp::Lt => Boolean(a < b),
            BinaryOp::Le => Boolean(a <= b),
            BinaryOp::Gt => Boolean(a > b),
            BinaryOp::Ge => Boolean(a >= b),
            BinaryOp::And => Boolean(a != 0.0 && b != 0.0),
            BinaryOp::Or => Boolean(a != 0.0 || b != 0.0),
        },
        _ => match (left, right, op) {
            (String(a), String(b), BinaryOp::Eq) => Boolean(a == b),
            (String(a), String(b), BinaryOp::Ne) => Boolean(a != b),
            (String(a), String(b), BinaryOp::Lt) => Boolean(a < b),
            (String(a), String(b), BinaryOp::Le) => Boolean(a <= b),
            (String(a), String(b), BinaryOp::Gt) => Boolean(a > b),
            (String(a), String(b), BinaryOp::Ge) => Boolean(a >= b),
            (left, right, op) => {
                let location = SourceLocation::from(node.span);
                Expression(Box::new(crate::value::Expression::Binary {
                    op,
                    left: Box::new(left.into_expression(location)),
                    right: Box::new(right.into_expression(location)),
                    location,
                }))
            }
        },
    }
}

fn evaluate_unary(node: &CstNode, diagnostics: &mut Vec<Diagnostic>) -> ParameterValue {
    let Some(op) = UnaryOp::from_text(node.children[0].text_or_empty()) else {
        return symbolic(node);
    };
    let operand = evaluate(&node.children[1], diagnostics);
    match (op, operand) {
        (UnaryOp::Neg, ParameterValue::Number(n)) => ParameterValue::Number(-n),
        (UnaryOp::Plus, ParameterValue::Number(n)) => ParameterValue::Number(n),
        (UnaryOp::Not, value) if !matches!(value, ParameterValue::Expression(_)) => {
            ParameterValue::Boolean(!value.is_truthy())
        }
        (op, operand) => {
            let location = SourceLocation::from(node.span);
            ParameterValue::Expression(Box::new(Expression::Unary {
                op,
                operand: Box::new(operand.into_expression(location)),
                location,
            }))
        }
    }
}

fn symbolic(node: &CstNode) -> ParameterValue {
    ParameterValue::Expression(Box::new(Expression::literal(
        ParameterValue::Undefined,
        SourceLocation::from(node.span),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use openscad_parser::parse;

    fn eval_expr(source: &str) -> ParameterValue {
        let cst = parse(&format!("x = {source};"));
        let mut diagnostics = Vec::new();
        evaluate(&cst.root.children[0].children[1], &mut diagnostics)
    }

    #[test]
    fn adds_numbers() {
        assert_eq!(eval_expr("1 + 2"), ParameterValue::Number(3.0));
    }

    #[test]
    fn short_circuits_and() {
        assert_eq!(eval_expr("false && (1/0 > 0)"), ParameterValue::Boolean(false));
    }

    #[test]
    fn short_circuits_or() {
        assert_eq!(eval_expr("true || (1/0 > 0)"), ParameterValue::Boolean(true));
    }

    #[test]
    fn ternary_picks_branch_without_evaluating_other() {
        assert_eq!(eval_expr("true ? 1 : 2"), ParameterValue::Number(1.0));
        assert_eq!(eval_expr("false ? 1 : 2"), ParameterValue::Number(2.0));
    }

    #[test]
    fn string_concatenation() {
        assert_eq!(
            eval_expr(r#""a" + "b""#),
            ParameterValue::String("ab".to_string())
        );
    }

    #[test]
    fn mixed_string_number_add_is_type_error() {
        let cst = parse(r#"x = "a" + 1;"#);
        let mut diagnostics = Vec::new();
        let result = evaluate(&cst.root.children[0].children[1], &mut diagnostics);
        assert_eq!(result, ParameterValue::Undefined);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn division_by_zero_yields_infinity_not_error() {
        assert_eq!(eval_expr("1 / 0"), ParameterValue::Number(f64::INFINITY));
    }

    #[test]
    fn comparisons_are_numeric() {
        assert_eq!(eval_expr("3 > 2"), ParameterValue::Boolean(true));
    }
}
