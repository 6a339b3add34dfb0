//! Typed CST traversal: the single place that knows how to drill through
//! wrapper nodes and recover named "fields" from a field-free CST.
//!
//! `openscad_parser::CstNode` exposes only a flat, kind-tagged child list —
//! there is no `child_for_field_name`. `child_by_field` below adapts the
//! spec's field-lookup contract onto that shape with a per-parent-kind
//! lookup table rather than a generic name index.

use openscad_parser::cst::{CstNode, NodeKind};

/// Depth-first, pre-order search for the first node of `kind`, inclusive of
/// `root` itself.
pub fn find_first_descendant(root: &CstNode, kind: NodeKind) -> Option<&CstNode> {
    if root.kind == kind {
        return Some(root);
    }
    for child in &root.children {
        if let Some(found) = find_first_descendant(child, kind) {
            return Some(found);
        }
    }
    None
}

/// Depth-first, pre-order collection of every node of `kind`, no dedup.
pub fn find_all_descendants(root: &CstNode, kind: NodeKind) -> Vec<&CstNode> {
    let mut out = Vec::new();
    find_all_descendants_into(root, kind, &mut out);
    out
}

fn find_all_descendants_into<'a>(root: &'a CstNode, kind: NodeKind, out: &mut Vec<&'a CstNode>) {
    if root.kind == kind {
        out.push(root);
    }
    for child in &root.children {
        find_all_descendants_into(child, kind, out);
    }
}

/// Named-field lookup over a field-free CST, keyed by the parent's own kind.
///
/// Unknown `(parent.kind, field)` pairs fall back to `None` rather than
/// guessing, consistent with the spec's "totally defined, no failure mode"
/// contract being owned by the span mapper, not this lookup.
pub fn child_by_field<'a>(node: &'a CstNode, field: &str) -> Option<&'a CstNode> {
    match (node.kind, field) {
        (NodeKind::ModuleCall, "name") => node.find_child(NodeKind::Identifier),
        (NodeKind::ModuleCall, "arguments") => node.find_child(NodeKind::Arguments),
        (NodeKind::ModuleCall, "body") => node
            .find_child(NodeKind::Block)
            .or_else(|| module_call_single_statement_child(node)),
        (NodeKind::ModuleDeclaration, "name") => node.find_child(NodeKind::Identifier),
        (NodeKind::ModuleDeclaration, "parameters") => node.find_child(NodeKind::Parameters),
        (NodeKind::ModuleDeclaration, "body") => node.find_child(NodeKind::Block),
        (NodeKind::FunctionDeclaration, "name") => node.find_child(NodeKind::Identifier),
        (NodeKind::FunctionDeclaration, "parameters") => node.find_child(NodeKind::Parameters),
        (NodeKind::FunctionDeclaration, "body") => node.children.last(),
        (NodeKind::Assignment, "name") => node
            .find_child(NodeKind::Identifier)
            .or_else(|| node.find_child(NodeKind::SpecialVariable)),
        (NodeKind::Assignment, "value") => node.children.get(1),
        (NodeKind::Parameter, "name") => node.find_child(NodeKind::Identifier),
        (NodeKind::Parameter, "default") => node.children.get(1),
        (NodeKind::Argument, "value") => node.children.first(),
        (NodeKind::NamedArgument, "name") => node
            .find_child(NodeKind::Identifier)
            .or_else(|| node.find_child(NodeKind::SpecialVariable)),
        (NodeKind::NamedArgument, "value") => node.children.get(1),
        (NodeKind::IfBlock, "condition") => node.children.first(),
        (NodeKind::IfBlock, "consequence") => node.children.get(1),
        (NodeKind::IfBlock, "alternative") => node.children.get(2),
        (NodeKind::ForAssignment, "name") => node.find_child(NodeKind::Identifier),
        (NodeKind::ForAssignment, "value") => node.children.get(1),
        (NodeKind::ForBlock, "assignments") => node.find_child(NodeKind::ForAssignments),
        (NodeKind::ForBlock, "body") => node.children.get(1),
        (NodeKind::LetBlock, "assignments") => node.find_child(NodeKind::ForAssignments),
        (NodeKind::LetBlock, "body") => node.children.get(1),
        _ => None,
    }
}

/// The trailing non-`Identifier`/non-`Arguments` child of a `ModuleCall`,
/// present when the call has a single-statement body instead of a block
/// (e.g. `translate([1,0,0]) cube(1);`).
fn module_call_single_statement_child(node: &CstNode) -> Option<&CstNode> {
    node.children
        .iter()
        .find(|c| !matches!(c.kind, NodeKind::Identifier | NodeKind::Arguments))
}

/// Reads the `name` field of a `ModuleCall` node.
pub fn function_name_of(module_instantiation_node: &CstNode) -> Option<&str> {
    child_by_field(module_instantiation_node, "name").map(CstNode::text_or_empty)
}

/// Descends through single-child wrapper nodes to the first semantically
/// meaningful descendant. Shared by the value extractor and visitors so the
/// drilling policy lives in exactly one place (spec §9).
pub fn drill_to_meaningful_child(node: &CstNode) -> &CstNode {
    let mut current = node;
    loop {
        match current.kind {
            NodeKind::BinaryExpression | NodeKind::UnaryExpression | NodeKind::TernaryExpression
                if current.children.len() == 1 =>
            {
                current = &current.children[0];
            }
            NodeKind::Argument if current.children.len() == 1 => {
                current = &current.children[0];
            }
            _ => return current,
        }
    }
}
