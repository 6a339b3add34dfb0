//! CSG visitor: `union`, `difference`, `intersection`, `hull`, `minkowski`.

use openscad_parser::cst::CstNode;

use crate::ast::Statement;
use crate::diagnostic::Diagnostic;
use crate::span::SourceLocation;
use crate::visitor::visit_call_body;

pub fn try_build(name: &str, node: &CstNode, depth: usize, diagnostics: &mut Vec<Diagnostic>) -> Option<Statement> {
    let location = SourceLocation::from(node.span);
    let children = visit_call_body(node, depth, diagnostics);
    match name {
        "union" => Some(Statement::Union { children, location }),
        "difference" => Some(Statement::Difference { children, location }),
        "intersection" => Some(Statement::Intersection { children, location }),
        "hull" => Some(Statement::Hull { children, location }),
        "minkowski" => Some(Statement::Minkowski { children, location }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openscad_parser::parse;

    #[test]
    fn difference_orders_minuend_before_subtrahends() {
        let cst = parse("difference() { cube(10); sphere(5); cylinder(h=1,r=1); }");
        let mut diagnostics = Vec::new();
        let stmt = try_build("difference", &cst.root.children[0], 0, &mut diagnostics).unwrap();
        match stmt {
            Statement::Difference { children, .. } => {
                assert_eq!(children.len(), 3);
                assert!(matches!(children[0], Statement::Cube { .. }));
                assert!(matches!(children[1], Statement::Sphere { .. }));
                assert!(matches!(children[2], Statement::Cylinder { .. }));
            }
            other => panic!("expected Difference, got {other:?}"),
        }
    }

    #[test]
    fn empty_union_is_legal() {
        let cst = parse("union() {}");
        let mut diagnostics = Vec::new();
        let stmt = try_build("union", &cst.root.children[0], 0, &mut diagnostics).unwrap();
        assert!(matches!(stmt, Statement::Union { children, .. } if children.is_empty()));
    }

    #[test]
    fn nested_csg_is_preserved() {
        let cst = parse("union() { difference() { cube(10); sphere(5); } }");
        let mut diagnostics = Vec::new();
        let stmt = try_build("union", &cst.root.children[0], 0, &mut diagnostics).unwrap();
        match stmt {
            Statement::Union { children, .. } => {
                assert_eq!(children.len(), 1);
                assert!(matches!(children[0], Statement::Difference { .. }));
            }
            other => panic!("expected Union, got {other:?}"),
        }
    }
}
