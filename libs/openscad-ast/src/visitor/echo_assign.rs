//! Echo/assignment visitor.

use once_cell::sync::Lazy;
use openscad_parser::cst::CstNode;
use regex::Regex;

use crate::ast::Statement;
use crate::extract::{extract_value, ExtractedArgument};
use crate::navigator::child_by_field;
use crate::span::SourceLocation;
use crate::value::{Expression, ParameterValue};

static IDENTIFIER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\$?[a-zA-Z_][a-zA-Z0-9_]*$").unwrap());

pub fn try_build(name: &str, args: &[ExtractedArgument], location: SourceLocation) -> Option<Statement> {
    if name != "echo" {
        return None;
    }
    let arguments = args
        .iter()
        .map(|a| match &a.value {
            ParameterValue::Expression(expr) => (**expr).clone(),
            value => Expression::literal(value.clone(), location),
        })
        .collect();
    Some(Statement::EchoStatement { arguments, location })
}

pub fn visit_assignment(node: &CstNode) -> Statement {
    let location = SourceLocation::from(node.span);
    let name_node = child_by_field(node, "name");
    let name = name_node.map(|n| n.text_or_empty().to_string()).unwrap_or_default();
    let value = child_by_field(node, "value")
        .map(extract_value)
        .unwrap_or(ParameterValue::Undefined);
    let value_expr = match value {
        ParameterValue::Expression(expr) => *expr,
        other => Expression::literal(other, location),
    };

    if !IDENTIFIER_RE.is_match(&name) {
        return Statement::error(
            format!("invalid identifier: {name}"),
            "E_BAD_IDENTIFIER",
            "Assignment",
            crate::visitor::excerpt(node),
            location,
        );
    }

    if name.starts_with('$') {
        Statement::SpecialVariableAssignment { name, value: value_expr, location }
    } else {
        Statement::Assignment { name, value: value_expr, location }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_arguments;
    use openscad_parser::cst::NodeKind;
    use openscad_parser::parse;

    #[test]
    fn echo_wraps_literal_arguments_as_expressions() {
        let cst = parse(r#"echo("hello", 1);"#);
        let node = &cst.root.children[0];
        let args_node = node.find_child(NodeKind::Arguments).unwrap();
        let args = extract_arguments(args_node);
        let stmt = try_build("echo", &args, SourceLocation::sentinel()).unwrap();
        match stmt {
            Statement::EchoStatement { arguments, .. } => {
                assert_eq!(arguments.len(), 2);
                assert!(matches!(arguments[0], Expression::Literal { .. }));
            }
            other => panic!("expected EchoStatement, got {other:?}"),
        }
    }

    #[test]
    fn regular_assignment_binds_name_and_value() {
        let cst = parse("x = 10;");
        let stmt = visit_assignment(&cst.root.children[0]);
        match stmt {
            Statement::Assignment { name, value, .. } => {
                assert_eq!(name, "x");
                assert!(matches!(value, Expression::Literal { value: ParameterValue::Number(n), .. } if n == 10.0));
            }
            other => panic!("expected Assignment, got {other:?}"),
        }
    }

    #[test]
    fn special_variable_assignment_is_distinguished() {
        let cst = parse("$fn = 32;");
        let stmt = visit_assignment(&cst.root.children[0]);
        assert!(matches!(stmt, Statement::SpecialVariableAssignment { .. }));
    }
}
