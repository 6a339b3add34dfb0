//! Module/function declaration visitor, plus the generic fallback that
//! preserves unrecognized calls as `ModuleInstantiation`.

use openscad_parser::cst::{CstNode, NodeKind};

use crate::ast::{Parameter, Statement};
use crate::diagnostic::Diagnostic;
use crate::extract::{extract_value, ExtractedArgument};
use crate::navigator::child_by_field;
use crate::span::SourceLocation;
use crate::value::ParameterValue;
use crate::visitor::visit_block;

/// This crate has no cross-scope symbol table for user-defined modules, so
/// call-site resolution of a user module name is left to the generic
/// fallback (`build_generic_instantiation`) rather than this visitor.
/// `try_build` exists to keep the visitor's position in the fixed-priority
/// dispatch list explicit even though it never claims a call today.
pub fn try_build(
    _name: &str,
    _args: &[ExtractedArgument],
    _node: &CstNode,
    _depth: usize,
    _diagnostics: &mut Vec<Diagnostic>,
) -> Option<Statement> {
    None
}

pub fn visit_module_declaration(node: &CstNode, depth: usize, diagnostics: &mut Vec<Diagnostic>) -> Statement {
    let location = SourceLocation::from(node.span);
    let name = child_by_field(node, "name").map(|n| n.text_or_empty().to_string()).unwrap_or_default();
    let parameters = child_by_field(node, "parameters").map(extract_parameters).unwrap_or_default();
    let body = child_by_field(node, "body").map(|b| visit_block(b, depth, diagnostics)).unwrap_or_default();
    Statement::ModuleDefinition { name, parameters, body, location }
}

pub fn visit_function_declaration(node: &CstNode) -> Statement {
    let location = SourceLocation::from(node.span);
    let name = child_by_field(node, "name").map(|n| n.text_or_empty().to_string()).unwrap_or_default();
    let parameters = child_by_field(node, "parameters").map(extract_parameters).unwrap_or_default();
    let expression = child_by_field(node, "body")
        .map(extract_value)
        .map(|value| match value {
            ParameterValue::Expression(expr) => *expr,
            other => crate::value::Expression::literal(other, location),
        })
        .unwrap_or(crate::value::Expression::literal(ParameterValue::Undefined, location));
    Statement::FunctionDefinition { name, parameters, expression, location }
}

fn extract_parameters(parameters_node: &CstNode) -> Vec<Parameter> {
    parameters_node
        .children
        .iter()
        .filter(|c| c.kind == NodeKind::Parameter)
        .map(|param| {
            let name = param.find_child(NodeKind::Identifier).map(|n| n.text_or_empty().to_string()).unwrap_or_default();
            let default = param.children.get(1).map(extract_value);
            Parameter { name, default }
        })
        .collect()
}

/// Preserves an unresolved `ModuleCall` verbatim so user-defined modules
/// survive the transform even without call-site symbol resolution.
pub fn build_generic_instantiation(
    name: &str,
    args: Vec<ExtractedArgument>,
    node: &CstNode,
    depth: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> Statement {
    let location = SourceLocation::from(node.span);
    let arguments = args
        .into_iter()
        .map(|a| crate::ast::Argument { name: a.name, value: a.value })
        .collect();
    let children = crate::visitor::visit_call_body(node, depth, diagnostics);
    Statement::ModuleInstantiation { name: name.to_string(), arguments, children, location }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_arguments;
    use openscad_parser::parse;

    #[test]
    fn module_declaration_captures_name_parameters_and_body() {
        let cst = parse("module box(size=1, center=false) { cube(size, center); }");
        let mut diagnostics = Vec::new();
        let stmt = visit_module_declaration(&cst.root.children[0], 0, &mut diagnostics);
        match stmt {
            Statement::ModuleDefinition { name, parameters, body, .. } => {
                assert_eq!(name, "box");
                assert_eq!(parameters.len(), 2);
                assert_eq!(parameters[0].name, "size");
                assert_eq!(parameters[0].default, Some(ParameterValue::Number(1.0)));
                assert_eq!(body.len(), 1);
            }
            other => panic!("expected ModuleDefinition, got {other:?}"),
        }
    }

    #[test]
    fn function_declaration_captures_expression() {
        let cst = parse("function square_of(x) = x * x;");
        let stmt = visit_function_declaration(&cst.root.children[0]);
        match stmt {
            Statement::FunctionDefinition { name, parameters, .. } => {
                assert_eq!(name, "square_of");
                assert_eq!(parameters.len(), 1);
                assert_eq!(parameters[0].name, "x");
            }
            other => panic!("expected FunctionDefinition, got {other:?}"),
        }
    }

    #[test]
    fn unresolved_module_call_preserves_name_and_arguments() {
        let cst = parse("my_widget(1, label=\"x\");");
        let node = &cst.root.children[0];
        let args_node = node.find_child(NodeKind::Arguments).unwrap();
        let args = extract_arguments(args_node);
        let mut diagnostics = Vec::new();
        let stmt = build_generic_instantiation("my_widget", args, node, 0, &mut diagnostics);
        match stmt {
            Statement::ModuleInstantiation { name, arguments, .. } => {
                assert_eq!(name, "my_widget");
                assert_eq!(arguments.len(), 2);
            }
            other => panic!("expected ModuleInstantiation, got {other:?}"),
        }
    }
}
