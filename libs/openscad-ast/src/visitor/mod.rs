//! Visitor framework: CST → AST dispatch, and the composite orchestrator
//! that resolves `ModuleCall` names against the fixed-priority visitor list.

pub mod control;
pub mod csg;
pub mod echo_assign;
pub mod module_function;
pub mod primitives;
pub mod transforms;

use config::constants::MAX_RECURSION_DEPTH;
use openscad_parser::cst::{CstNode, NodeKind};

use crate::ast::Statement;
use crate::diagnostic::Diagnostic;
use crate::extract::extract_arguments;
use crate::navigator::child_by_field;
use crate::span::SourceLocation;

/// Dispatches on `node.kind`, producing one AST statement, `None` for nodes
/// with no statement-level meaning, or an `ErrorNode` on failure/overflow.
pub fn visit(node: &CstNode, depth: usize, diagnostics: &mut Vec<Diagnostic>) -> Option<Statement> {
    if depth > MAX_RECURSION_DEPTH {
        return Some(Statement::error(
            "recursion depth exceeded",
            "E_RECURSION",
            format!("{:?}", node.kind),
            excerpt(node),
            SourceLocation::from(node.span),
        ));
    }

    match node.kind {
        NodeKind::ModuleCall => Some(visit_module_call(node, depth, diagnostics)),
        NodeKind::Assignment => Some(echo_assign::visit_assignment(node)),
        NodeKind::ModuleDeclaration => Some(module_function::visit_module_declaration(node, depth, diagnostics)),
        NodeKind::FunctionDeclaration => Some(module_function::visit_function_declaration(node)),
        NodeKind::IfBlock => Some(control::visit_if(node, depth, diagnostics)),
        NodeKind::ForBlock => Some(control::visit_for(node, depth, diagnostics)),
        NodeKind::LetBlock => Some(control::visit_let(node, depth, diagnostics)),
        NodeKind::Modifier if node.children.len() == 2 => visit(&node.children[1], depth, diagnostics),
        NodeKind::Semicolon | NodeKind::Comment | NodeKind::IncludeStatement | NodeKind::UseStatement => None,
        NodeKind::Block => {
            let mut children = visit_children(node, depth, diagnostics);
            if children.len() == 1 {
                children.pop()
            } else {
                Some(Statement::error(
                    "a block with zero or multiple statements cannot stand alone as a single statement",
                    "E_BARE_BLOCK",
                    "Block",
                    excerpt(node),
                    SourceLocation::from(node.span),
                ))
            }
        }
        _ => None,
    }
}

/// Visits every child of `parent` in source order, dropping `None`s.
pub fn visit_children(parent: &CstNode, depth: usize, diagnostics: &mut Vec<Diagnostic>) -> Vec<Statement> {
    parent
        .children
        .iter()
        .filter_map(|child| visit(child, depth + 1, diagnostics))
        .collect()
}

/// Identical to `visit_children`, restricted to an actual `Block` node.
pub fn visit_block(block: &CstNode, depth: usize, diagnostics: &mut Vec<Diagnostic>) -> Vec<Statement> {
    debug_assert_eq!(block.kind, NodeKind::Block);
    visit_children(block, depth, diagnostics)
}

/// Visits a `ModuleCall`'s body: a `Block` child visits as children, a
/// single trailing statement visits as one, and a bodyless call (plain
/// `cube(10);`) yields no children at all.
pub fn visit_call_body(call_node: &CstNode, depth: usize, diagnostics: &mut Vec<Diagnostic>) -> Vec<Statement> {
    match child_by_field(call_node, "body") {
        Some(body) if body.kind == NodeKind::Block => visit_block(body, depth, diagnostics),
        Some(body) => visit(body, depth + 1, diagnostics).into_iter().collect(),
        None => Vec::new(),
    }
}

fn visit_module_call(node: &CstNode, depth: usize, diagnostics: &mut Vec<Diagnostic>) -> Statement {
    let name = child_by_field(node, "name").map(CstNode::text_or_empty).unwrap_or("");
    let args_node = child_by_field(node, "arguments");
    let args = args_node.map(extract_arguments).unwrap_or_default();
    let location = SourceLocation::from(node.span);

    primitives::try_build(name, &args, location, diagnostics)
        .or_else(|| transforms::try_build(name, &args, node, depth, diagnostics))
        .or_else(|| csg::try_build(name, node, depth, diagnostics))
        .or_else(|| control::try_build_children_ref(name, &args, location))
        .or_else(|| module_function::try_build(name, &args, node, depth, diagnostics))
        .or_else(|| echo_assign::try_build(name, &args, location))
        .unwrap_or_else(|| module_function::build_generic_instantiation(name, args, node, depth, diagnostics))
}

/// A short excerpt of the node's source text, capped per the failure-
/// semantics contract (at most 80 characters).
pub fn excerpt(node: &CstNode) -> String {
    let text = node.text_or_empty();
    if text.len() > 80 {
        let cut = text.char_indices().nth(80).map_or(text.len(), |(i, _)| i);
        format!("{}...", &text[..cut])
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openscad_parser::parse;

    #[test]
    fn unresolved_call_becomes_generic_instantiation() {
        let cst = parse("my_widget(1, 2);");
        let mut diagnostics = Vec::new();
        let stmt = visit(&cst.root.children[0], 0, &mut diagnostics).unwrap();
        assert!(matches!(stmt, Statement::ModuleInstantiation { ref name, .. } if name == "my_widget"));
    }

    #[test]
    fn modifier_drills_to_statement() {
        let cst = parse("# cube(5);");
        let mut diagnostics = Vec::new();
        let stmt = visit(&cst.root.children[0], 0, &mut diagnostics).unwrap();
        assert!(matches!(stmt, Statement::Cube { .. }));
    }

    #[test]
    fn recursion_limit_yields_error_node() {
        let cst = parse("cube(1);");
        let mut diagnostics = Vec::new();
        let stmt = visit(&cst.root.children[0], MAX_RECURSION_DEPTH + 1, &mut diagnostics).unwrap();
        assert!(matches!(stmt, Statement::ErrorNode { .. }));
    }

    #[test]
    fn excerpt_truncates_past_a_multibyte_character_without_panicking() {
        use crate::navigator::find_first_descendant;
        use openscad_parser::cst::NodeKind as Kind;

        let filler = "é".repeat(60);
        let cst = parse(&format!(r#"echo("{filler}");"#));
        let string_node = find_first_descendant(&cst.root.children[0], Kind::String).unwrap();
        let text = excerpt(string_node);
        assert!(text.ends_with("..."));
    }
}
