//! Value, vector, and argument extraction from CST nodes.
//!
//! These three extractors sit directly below the evaluator and binder: they
//! turn a raw `CstNode` subtree into the typed `ParameterValue`/`Expression`
//! shapes the rest of the crate works with.

use once_cell::sync::Lazy;
use openscad_parser::cst::{CstNode, NodeKind};
use regex::Regex;

use crate::eval::evaluate;
use crate::navigator::drill_to_meaningful_child;
use crate::span::SourceLocation;
use crate::value::{Expression, ParameterValue, UnaryOp};

static VECTOR3_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\s*(-?[\d.]+)\s*,\s*(-?[\d.]+)\s*,\s*(-?[\d.]+)\s*\]").unwrap()
});
static VECTOR2_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\s*(-?[\d.]+)\s*,\s*(-?[\d.]+)\s*\]").unwrap());
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+(\.\d+)?$").unwrap());
static STRING_RE: Lazy<Regex> = Lazy::new(|| Regex::new("^\"(.*)\"$").unwrap());

/// Converts a CST node representing a value-producing expression into a
/// `ParameterValue`, per the Value Extractor contract.
pub fn extract_value(node: &CstNode) -> ParameterValue {
    let node = drill_to_meaningful_child(node);
    match node.kind {
        NodeKind::Number => node
            .text_or_empty()
            .parse::<f64>()
            .map(ParameterValue::Number)
            .unwrap_or(ParameterValue::Undefined),
        NodeKind::String => ParameterValue::String(strip_quotes(node.text_or_empty())),
        NodeKind::Boolean => match node.text_or_empty() {
            "true" => ParameterValue::Boolean(true),
            "false" => ParameterValue::Boolean(false),
            _ => ParameterValue::Undefined,
        },
        NodeKind::List => extract_vector(node).unwrap_or_else(|| list_to_expression(node)),
        NodeKind::Range => extract_range(node),
        NodeKind::UnaryExpression if node.children.len() == 2 => {
            extract_unary(node).unwrap_or_else(|| textual_fallback(node))
        }
        NodeKind::BinaryExpression | NodeKind::TernaryExpression => {
            let mut diagnostics = Vec::new();
            match evaluate(node, &mut diagnostics) {
                ParameterValue::Undefined => textual_fallback(node),
                other => other,
            }
        }
        NodeKind::Identifier => match node.text_or_empty() {
            "true" => ParameterValue::Boolean(true),
            "false" => ParameterValue::Boolean(false),
            name => ParameterValue::Expression(Box::new(Expression::Variable {
                name: name.to_string(),
                location: SourceLocation::from(node.span),
            })),
        },
        NodeKind::SpecialVariable => ParameterValue::Expression(Box::new(Expression::Variable {
            name: node.text_or_empty().to_string(),
            location: SourceLocation::from(node.span),
        })),
        NodeKind::Argument | NodeKind::NamedArgument => node
            .children
            .last()
            .map(extract_value)
            .unwrap_or(ParameterValue::Undefined),
        NodeKind::Each if node.children.len() == 1 => {
            let location = SourceLocation::from(node.span);
            let inner = extract_value(&node.children[0]).into_expression(location);
            ParameterValue::Expression(Box::new(Expression::Each { expr: Box::new(inner), location }))
        }
        NodeKind::Undef => ParameterValue::Undefined,
        _ => ParameterValue::Undefined,
    }
}

fn extract_unary(node: &CstNode) -> Option<ParameterValue> {
    let op_text = node.children[0].text_or_empty();
    let op = UnaryOp::from_text(op_text)?;
    let operand = extract_value(&node.children[1]);
    match (op, operand.as_number()) {
        (UnaryOp::Neg, Some(n)) => Some(ParameterValue::Number(-n)),
        (UnaryOp::Plus, Some(n)) => Some(ParameterValue::Number(n)),
        _ => None,
    }
}

fn list_to_expression(node: &CstNode) -> ParameterValue {
    let items = node
        .children
        .iter()
        .map(value_to_expression)
        .collect();
    ParameterValue::Expression(Box::new(Expression::Array {
        items,
        location: SourceLocation::from(node.span),
    }))
}

fn value_to_expression(node: &CstNode) -> Expression {
    match extract_value(node) {
        ParameterValue::Expression(expr) => *expr,
        value => Expression::literal(value, SourceLocation::from(node.span)),
    }
}

fn extract_range(node: &CstNode) -> ParameterValue {
    let parts: Vec<Option<f64>> = node
        .children
        .iter()
        .map(|c| extract_value(c).as_number())
        .collect();
    match parts.as_slice() {
        [Some(start), Some(end)] => ParameterValue::Range { start: *start, end: *end, step: None },
        [Some(start), step, Some(end)] => {
            ParameterValue::Range { start: *start, end: *end, step: *step }
        }
        _ => ParameterValue::Undefined,
    }
}

fn textual_fallback(node: &CstNode) -> ParameterValue {
    let text = node.text_or_empty().trim();
    if let Some(captures) = STRING_RE.captures(text) {
        return ParameterValue::String(captures[1].to_string());
    }
    match text {
        "true" => return ParameterValue::Boolean(true),
        "false" => return ParameterValue::Boolean(false),
        _ => {}
    }
    if NUMBER_RE.is_match(text) {
        if let Ok(n) = text.parse::<f64>() {
            return ParameterValue::Number(n);
        }
    }
    ParameterValue::Undefined
}

fn strip_quotes(text: &str) -> String {
    text.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(text)
        .to_string()
}

/// Produces a `Vector2D`/`Vector3D` `ParameterValue` from a `List` node,
/// with scalar broadcast, or `None` if the element count is unsupported.
pub fn extract_vector(node: &CstNode) -> Option<ParameterValue> {
    if node.kind != NodeKind::List {
        return extract_vector_textual(node.text_or_empty());
    }
    let values: Vec<f64> = node
        .children
        .iter()
        .filter_map(|child| match child.kind {
            NodeKind::Identifier | NodeKind::SpecialVariable => Some(0.0),
            _ => extract_value(child).as_number(),
        })
        .filter(|v: &f64| !v.is_nan())
        .collect();
    match values.len() {
        1 => Some(ParameterValue::Vector3D([values[0], values[0], values[0]])),
        2 => Some(ParameterValue::Vector2D([values[0], values[1]])),
        3 => Some(ParameterValue::Vector3D([values[0], values[1], values[2]])),
        _ => None,
    }
}

fn extract_vector_textual(text: &str) -> Option<ParameterValue> {
    if let Some(c) = VECTOR3_RE.captures(text) {
        let v: Vec<f64> = (1..=3).map(|i| c[i].parse().unwrap_or(0.0)).collect();
        return Some(ParameterValue::Vector3D([v[0], v[1], v[2]]));
    }
    if let Some(c) = VECTOR2_RE.captures(text) {
        let v: Vec<f64> = (1..=2).map(|i| c[i].parse().unwrap_or(0.0)).collect();
        return Some(ParameterValue::Vector2D([v[0], v[1]]));
    }
    None
}

/// One extracted call argument, positional or named, pre-binding.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedArgument {
    pub name: Option<String>,
    pub value: ParameterValue,
}

/// Converts an `Arguments` CST container into an ordered argument list.
pub fn extract_arguments(arguments_node: &CstNode) -> Vec<ExtractedArgument> {
    arguments_node
        .children
        .iter()
        .map(|child| match child.kind {
            NodeKind::NamedArgument => {
                let name = child
                    .find_child(NodeKind::Identifier)
                    .or_else(|| child.find_child(NodeKind::SpecialVariable))
                    .map(|n| n.text_or_empty().to_string());
                let value = child.children.last().map(extract_value).unwrap_or(ParameterValue::Undefined);
                ExtractedArgument { name, value }
            }
            NodeKind::Argument => ExtractedArgument {
                name: None,
                value: child.children.first().map(extract_value).unwrap_or(ParameterValue::Undefined),
            },
            _ => ExtractedArgument { name: None, value: ParameterValue::Undefined },
        })
        .collect()
}
