//! Transform visitor: `translate`, `rotate`, `scale`, `mirror`, `resize`,
//! `multmatrix`, `color`, `offset`.

use openscad_parser::cst::CstNode;

use crate::ast::Statement;
use crate::binder::{bind_arguments, ParameterSchema};
use crate::diagnostic::Diagnostic;
use crate::extract::ExtractedArgument;
use crate::span::SourceLocation;
use crate::value::ParameterValue;
use crate::visitor::visit_call_body;

pub fn try_build(
    name: &str,
    args: &[ExtractedArgument],
    node: &CstNode,
    depth: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<Statement> {
    let location = SourceLocation::from(node.span);
    match name {
        "translate" => Some(Statement::Translate {
            v: vector3_default_zero(first_value(args), 0.0),
            children: visit_call_body(node, depth, diagnostics),
            location,
        }),
        "rotate" => Some(build_rotate(args, node, depth, diagnostics)),
        "scale" => Some(Statement::Scale {
            v: vector3_broadcast_scalar(first_value(args), 1.0),
            children: visit_call_body(node, depth, diagnostics),
            location,
        }),
        "mirror" => Some(Statement::Mirror {
            v: vector3_default_zero(first_value(args), 0.0),
            children: visit_call_body(node, depth, diagnostics),
            location,
        }),
        "resize" => Some(build_resize(args, node, depth, diagnostics)),
        "multmatrix" => Some(build_multmatrix(args, node, depth, diagnostics)),
        "color" => Some(build_color(args, node, depth, diagnostics)),
        "offset" => Some(build_offset(args, node, depth, diagnostics)),
        _ => None,
    }
}

fn first_value(args: &[ExtractedArgument]) -> Option<&ParameterValue> {
    args.iter().find(|a| a.name.is_none()).map(|a| &a.value)
}

/// Scalar broadcasts to `[k,k,k]`; 2D vectors default Z to `default_z`.
fn vector3_default_zero(value: Option<&ParameterValue>, default_z: f64) -> [f64; 3] {
    match value {
        Some(ParameterValue::Vector3D(v)) => *v,
        Some(ParameterValue::Vector2D(v)) => [v[0], v[1], default_z],
        Some(ParameterValue::Number(n)) => [*n, *n, *n],
        _ => [0.0, 0.0, 0.0],
    }
}

fn vector3_broadcast_scalar(value: Option<&ParameterValue>, default_z: f64) -> [f64; 3] {
    match value {
        Some(ParameterValue::Number(n)) => [*n, *n, *n],
        Some(ParameterValue::Vector3D(v)) => *v,
        Some(ParameterValue::Vector2D(v)) => [v[0], v[1], default_z],
        _ => [1.0, 1.0, 1.0],
    }
}

fn build_rotate(args: &[ExtractedArgument], node: &CstNode, depth: usize, diagnostics: &mut Vec<Diagnostic>) -> Statement {
    let location = SourceLocation::from(node.span);
    let a = first_value(args).cloned().unwrap_or(ParameterValue::Number(0.0));
    let v = match first_value(args) {
        Some(ParameterValue::Vector3D(_)) => None,
        _ => Some([0.0, 0.0, 1.0]),
    };
    Statement::Rotate { a, v, children: visit_call_body(node, depth, diagnostics), location }
}

fn build_resize(args: &[ExtractedArgument], node: &CstNode, depth: usize, diagnostics: &mut Vec<Diagnostic>) -> Statement {
    let schema = ParameterSchema {
        slots: &[("newsize", ParameterValue::Vector3D([0.0, 0.0, 0.0])), ("auto", ParameterValue::Boolean(false))],
    };
    let location = SourceLocation::from(node.span);
    let bound = bind_arguments(args, &schema, location, diagnostics);
    Statement::Resize {
        newsize: vector3_default_zero(Some(bound.get("newsize")), 0.0),
        auto: matches!(bound.get("auto"), ParameterValue::Boolean(true)),
        children: visit_call_body(node, depth, diagnostics),
        location,
    }
}

fn build_multmatrix(args: &[ExtractedArgument], node: &CstNode, depth: usize, diagnostics: &mut Vec<Diagnostic>) -> Statement {
    let location = SourceLocation::from(node.span);
    let m = match first_value(args) {
        Some(ParameterValue::Expression(expr)) => matrix_rows(expr),
        _ => Vec::new(),
    };
    Statement::Multmatrix { m, children: visit_call_body(node, depth, diagnostics), location }
}

fn matrix_rows(expr: &crate::value::Expression) -> Vec<Vec<f64>> {
    match expr {
        crate::value::Expression::Array { items, .. } => items
            .iter()
            .map(|row| match row {
                crate::value::Expression::Array { items: cells, .. } => {
                    cells.iter().filter_map(literal_number).collect()
                }
                crate::value::Expression::Literal { value, .. } => match value {
                    ParameterValue::Vector3D(v) => v.to_vec(),
                    ParameterValue::Vector2D(v) => v.to_vec(),
                    ParameterValue::Number(n) => vec![*n],
                    _ => Vec::new(),
                },
                _ => Vec::new(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn literal_number(expr: &crate::value::Expression) -> Option<f64> {
    match expr {
        crate::value::Expression::Literal { value, .. } => value.as_number(),
        _ => None,
    }
}

fn build_color(args: &[ExtractedArgument], node: &CstNode, depth: usize, diagnostics: &mut Vec<Diagnostic>) -> Statement {
    let location = SourceLocation::from(node.span);
    let alpha = args.iter().find(|a| a.name.as_deref() == Some("alpha")).and_then(|a| a.value.as_number());
    let c = match first_value(args) {
        Some(ParameterValue::Vector3D(v)) => [v[0], v[1], v[2], alpha.unwrap_or(1.0)],
        Some(ParameterValue::Expression(expr)) => match matrix_rows_flat(expr).as_slice() {
            [r, g, b] => [*r, *g, *b, alpha.unwrap_or(1.0)],
            [r, g, b, a] => [*r, *g, *b, alpha.unwrap_or(*a)],
            _ => [0.8, 0.8, 0.8, alpha.unwrap_or(1.0)],
        },
        _ => [0.8, 0.8, 0.8, alpha.unwrap_or(1.0)],
    };
    Statement::Color { c, alpha, children: visit_call_body(node, depth, diagnostics), location }
}

fn matrix_rows_flat(expr: &crate::value::Expression) -> Vec<f64> {
    match expr {
        crate::value::Expression::Array { items, .. } => items.iter().filter_map(literal_number).collect(),
        _ => Vec::new(),
    }
}

fn build_offset(args: &[ExtractedArgument], node: &CstNode, depth: usize, diagnostics: &mut Vec<Diagnostic>) -> Statement {
    let location = SourceLocation::from(node.span);
    let r = args.iter().find(|a| a.name.as_deref() == Some("r")).and_then(|a| a.value.as_number());
    let delta = args.iter().find(|a| a.name.as_deref() == Some("delta")).and_then(|a| a.value.as_number());
    let chamfer = args.iter().any(|a| a.name.as_deref() == Some("chamfer") && matches!(a.value, ParameterValue::Boolean(true)));
    Statement::Offset { r, delta, chamfer, children: visit_call_body(node, depth, diagnostics), location }
}
