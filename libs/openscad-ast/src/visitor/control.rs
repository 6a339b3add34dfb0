//! Control-structure visitor: `if`/`else`, `for`, `let`, and the
//! `children()`/`children(idx)` pseudo-call.

use openscad_parser::cst::{CstNode, NodeKind};

use crate::ast::{ForVariable, Statement};
use crate::diagnostic::Diagnostic;
use crate::extract::{extract_value, ExtractedArgument};
use crate::navigator::child_by_field;
use crate::span::SourceLocation;
use crate::value::ParameterValue;
use crate::visitor::{visit, visit_children};

pub fn visit_if(node: &CstNode, depth: usize, diagnostics: &mut Vec<Diagnostic>) -> Statement {
    let location = SourceLocation::from(node.span);
    let cond_node = child_by_field(node, "condition").expect("IfBlock always has a condition");
    let mut eval_diagnostics = Vec::new();
    let cond = crate::eval::evaluate(cond_node, &mut eval_diagnostics);
    diagnostics.extend(eval_diagnostics);
    let cond_expr = to_expression(cond, cond_node);

    let then_branch = child_by_field(node, "consequence")
        .and_then(|c| visit(c, depth + 1, diagnostics))
        .into_iter()
        .collect();
    let else_branch = child_by_field(node, "alternative")
        .and_then(|c| visit(c, depth + 1, diagnostics))
        .map(|stmt| vec![stmt]);

    Statement::If { cond: cond_expr, then_branch, else_branch, location }
}

fn to_expression(value: ParameterValue, node: &CstNode) -> crate::value::Expression {
    match value {
        ParameterValue::Expression(expr) => *expr,
        other => crate::value::Expression::literal(other, SourceLocation::from(node.span)),
    }
}

pub fn visit_for(node: &CstNode, depth: usize, diagnostics: &mut Vec<Diagnostic>) -> Statement {
    let location = SourceLocation::from(node.span);
    let assignments_node = child_by_field(node, "assignments");
    let variables = assignments_node
        .map(|assignments| {
            assignments
                .children
                .iter()
                .filter(|c| c.kind == NodeKind::ForAssignment)
                .map(extract_for_variable)
                .collect()
        })
        .unwrap_or_default();

    let body = child_by_field(node, "body")
        .map(|body_node| {
            if body_node.kind == NodeKind::Block {
                visit_children(body_node, depth, diagnostics)
            } else {
                visit(body_node, depth + 1, diagnostics).into_iter().collect()
            }
        })
        .unwrap_or_default();

    Statement::ForLoop { variables, body, location }
}

fn extract_for_variable(assignment: &CstNode) -> ForVariable {
    let name = assignment
        .find_child(NodeKind::Identifier)
        .map(|n| n.text_or_empty().to_string())
        .unwrap_or_default();
    let range_node = assignment.children.get(1);
    let range = range_node.map(extract_value).unwrap_or(ParameterValue::Undefined);
    let step = match &range {
        ParameterValue::Range { step, .. } => *step,
        _ => None,
    };
    ForVariable { name, range, step }
}

pub fn visit_let(node: &CstNode, depth: usize, diagnostics: &mut Vec<Diagnostic>) -> Statement {
    let location = SourceLocation::from(node.span);
    let bindings = child_by_field(node, "assignments")
        .map(|assignments| {
            assignments
                .children
                .iter()
                .filter(|c| c.kind == NodeKind::ForAssignment)
                .map(|assignment| {
                    let name = assignment
                        .find_child(NodeKind::Identifier)
                        .map(|n| n.text_or_empty().to_string())
                        .unwrap_or_default();
                    let value = assignment.children.get(1).map(extract_value).unwrap_or(ParameterValue::Undefined);
                    (name, value)
                })
                .collect()
        })
        .unwrap_or_default();

    let body = child_by_field(node, "body")
        .map(|body_node| {
            if body_node.kind == NodeKind::Block {
                visit_children(body_node, depth, diagnostics)
            } else {
                visit(body_node, depth + 1, diagnostics).into_iter().collect()
            }
        })
        .unwrap_or_default();

    Statement::Let { bindings, body, location }
}

/// `children()` / `children(idx)` is a pseudo-call valid only inside a
/// module body; `index = -1` denotes "all children" (the no-argument form).
pub fn try_build_children_ref(
    name: &str,
    args: &[ExtractedArgument],
    location: SourceLocation,
) -> Option<Statement> {
    if name != "children" {
        return None;
    }
    let index = args.first().and_then(|a| a.value.as_number()).map(|n| n as i64).unwrap_or(-1);
    Some(Statement::ChildrenRef { index: Some(index), location })
}

#[cfg(test)]
mod tests {
    use super::*;
    use openscad_parser::parse;

    #[test]
    fn if_without_else_has_no_alternative() {
        let cst = parse("if (1) cube(1);");
        let mut diagnostics = Vec::new();
        let stmt = visit_if(&cst.root.children[0], 0, &mut diagnostics);
        match stmt {
            Statement::If { then_branch, else_branch, .. } => {
                assert_eq!(then_branch.len(), 1);
                assert!(else_branch.is_none());
            }
            other => panic!("expected If, got {other:?}"),
        }
    }

    #[test]
    fn else_if_chain_nests_inside_else_branch() {
        let cst = parse("if (0) cube(1); else if (1) sphere(1); else cylinder(h=1,r=1);");
        let mut diagnostics = Vec::new();
        let stmt = visit_if(&cst.root.children[0], 0, &mut diagnostics);
        match stmt {
            Statement::If { else_branch: Some(branch), .. } => {
                assert_eq!(branch.len(), 1);
                assert!(matches!(branch[0], Statement::If { .. }));
            }
            other => panic!("expected nested If in else_branch, got {other:?}"),
        }
    }

    #[test]
    fn for_loop_preserves_variable_order() {
        let cst = parse("for (i = [0:10], j = [0:5]) cube(1);");
        let mut diagnostics = Vec::new();
        let stmt = visit_for(&cst.root.children[0], 0, &mut diagnostics);
        match stmt {
            Statement::ForLoop { variables, .. } => {
                assert_eq!(variables.len(), 2);
                assert_eq!(variables[0].name, "i");
                assert_eq!(variables[1].name, "j");
            }
            other => panic!("expected ForLoop, got {other:?}"),
        }
    }

    #[test]
    fn let_block_populates_bindings() {
        let cst = parse("let (x = 10, y = 20) cube(x);");
        let mut diagnostics = Vec::new();
        let stmt = visit_let(&cst.root.children[0], 0, &mut diagnostics);
        match stmt {
            Statement::Let { bindings, body, .. } => {
                assert_eq!(bindings.len(), 2);
                assert_eq!(bindings[0].0, "x");
                assert_eq!(bindings[0].1, ParameterValue::Number(10.0));
                assert_eq!(body.len(), 1);
            }
            other => panic!("expected Let, got {other:?}"),
        }
    }

    #[test]
    fn children_without_arguments_means_all() {
        let stmt = try_build_children_ref("children", &[], SourceLocation::sentinel()).unwrap();
        assert!(matches!(stmt, Statement::ChildrenRef { index: Some(-1), .. }));
    }

    #[test]
    fn children_with_index_targets_one_child() {
        let args = vec![ExtractedArgument { name: None, value: ParameterValue::Number(2.0) }];
        let stmt = try_build_children_ref("children", &args, SourceLocation::sentinel()).unwrap();
        assert!(matches!(stmt, Statement::ChildrenRef { index: Some(2), .. }));
    }
}
