//! Primitive visitor: `cube`, `sphere`, `cylinder`, `polyhedron`, `square`,
//! `circle`, `polygon`, `text`.

use config::constants::DEFAULT_CONVEXITY;

use crate::ast::{Size, Statement};
use crate::binder::{bind_arguments, BoundArguments, ParameterSchema};
use crate::diagnostic::Diagnostic;
use crate::extract::ExtractedArgument;
use crate::span::SourceLocation;
use crate::value::ParameterValue;

pub fn try_build(
    name: &str,
    args: &[ExtractedArgument],
    location: SourceLocation,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<Statement> {
    match name {
        "cube" => Some(build_cube(args, location, diagnostics)),
        "sphere" => Some(build_sphere(args, location, diagnostics)),
        "cylinder" => Some(build_cylinder(args, location, diagnostics)),
        "polyhedron" => Some(build_polyhedron(args, location)),
        "square" => Some(build_square(args, location, diagnostics)),
        "circle" => Some(build_circle(args, location, diagnostics)),
        "polygon" => Some(build_polygon(args, location)),
        "text" => Some(build_text(args, location)),
        _ => None,
    }
}

fn size_from(value: &ParameterValue, location: SourceLocation, diagnostics: &mut Vec<Diagnostic>) -> Size {
    match value {
        ParameterValue::Number(n) => Size::Scalar(*n),
        ParameterValue::Vector2D(v) => Size::Vector2D(*v),
        ParameterValue::Vector3D(v) => Size::Vector3D(*v),
        _ => {
            diagnostics.push(Diagnostic::warning("size must be a number or vector; using default", location));
            Size::Scalar(1.0)
        }
    }
}

fn as_bool(value: &ParameterValue) -> bool {
    matches!(value, ParameterValue::Boolean(true))
}

fn build_cube(args: &[ExtractedArgument], location: SourceLocation, diagnostics: &mut Vec<Diagnostic>) -> Statement {
    let schema = ParameterSchema {
        slots: &[("size", ParameterValue::Number(1.0)), ("center", ParameterValue::Boolean(false))],
    };
    let bound = bind_arguments(args, &schema, location, diagnostics);
    Statement::Cube { size: size_from(bound.get("size"), location, diagnostics), center: as_bool(bound.get("center")), location }
}

fn build_square(args: &[ExtractedArgument], location: SourceLocation, diagnostics: &mut Vec<Diagnostic>) -> Statement {
    let schema = ParameterSchema {
        slots: &[("size", ParameterValue::Number(1.0)), ("center", ParameterValue::Boolean(false))],
    };
    let bound = bind_arguments(args, &schema, location, diagnostics);
    Statement::Square { size: size_from(bound.get("size"), location, diagnostics), center: as_bool(bound.get("center")), location }
}

fn build_sphere(args: &[ExtractedArgument], location: SourceLocation, diagnostics: &mut Vec<Diagnostic>) -> Statement {
    let schema = ParameterSchema { slots: &[("r", ParameterValue::Number(1.0))] };
    let bound = bind_arguments(args, &schema, location, diagnostics);
    Statement::Sphere {
        radius: bound.get("r").as_number().unwrap_or(1.0),
        diameter: bound.diameter("r"),
        fn_: fn_override(&bound),
        fa: fa_override(&bound),
        fs: fs_override(&bound),
        location,
    }
}

fn build_circle(args: &[ExtractedArgument], location: SourceLocation, diagnostics: &mut Vec<Diagnostic>) -> Statement {
    let schema = ParameterSchema { slots: &[("r", ParameterValue::Number(1.0))] };
    let bound = bind_arguments(args, &schema, location, diagnostics);
    Statement::Circle {
        radius: bound.get("r").as_number().unwrap_or(1.0),
        fn_: fn_override(&bound),
        fa: fa_override(&bound),
        fs: fs_override(&bound),
        location,
    }
}

fn build_cylinder(args: &[ExtractedArgument], location: SourceLocation, diagnostics: &mut Vec<Diagnostic>) -> Statement {
    let schema = ParameterSchema {
        slots: &[
            ("h", ParameterValue::Number(1.0)),
            ("r", ParameterValue::Undefined),
            ("r1", ParameterValue::Undefined),
            ("r2", ParameterValue::Undefined),
            ("center", ParameterValue::Boolean(false)),
        ],
    };
    let bound = bind_arguments(args, &schema, location, diagnostics);
    let r = bound.get("r").as_number();
    let r1 = bound.get("r1").as_number().or(r).unwrap_or(1.0);
    let r2 = bound.get("r2").as_number().or(r).unwrap_or(1.0);
    Statement::Cylinder {
        h: bound.get("h").as_number().unwrap_or(1.0),
        r1,
        r2,
        center: as_bool(bound.get("center")),
        fn_: fn_override(&bound),
        fa: fa_override(&bound),
        fs: fs_override(&bound),
        location,
    }
}

fn fn_override(bound: &BoundArguments) -> Option<f64> {
    (bound.fn_() != config::constants::DEFAULT_FN).then(|| bound.fn_())
}

fn fa_override(bound: &BoundArguments) -> Option<f64> {
    (bound.fa() != config::constants::DEFAULT_FA).then(|| bound.fa())
}

fn fs_override(bound: &BoundArguments) -> Option<f64> {
    (bound.fs() != config::constants::DEFAULT_FS).then(|| bound.fs())
}

fn build_polyhedron(args: &[ExtractedArgument], location: SourceLocation) -> Statement {
    let points = args
        .iter()
        .find(|a| a.name.as_deref() == Some("points") || a.name.is_none())
        .map(|a| extract_points3(&a.value))
        .unwrap_or_default();
    let faces = args
        .iter()
        .find(|a| a.name.as_deref() == Some("faces"))
        .map(|a| extract_index_lists(&a.value))
        .unwrap_or_default();
    let convexity = args
        .iter()
        .find(|a| a.name.as_deref() == Some("convexity"))
        .and_then(|a| a.value.as_number())
        .map(|n| n as u32)
        .unwrap_or(DEFAULT_CONVEXITY);
    Statement::Polyhedron { points, faces, convexity: Some(convexity), location }
}

fn build_polygon(args: &[ExtractedArgument], location: SourceLocation) -> Statement {
    let points = args
        .iter()
        .find(|a| a.name.as_deref() == Some("points") || a.name.is_none())
        .map(|a| extract_points2(&a.value))
        .unwrap_or_default();
    let paths = args.iter().find(|a| a.name.as_deref() == Some("paths")).map(|a| extract_index_lists(&a.value));
    let convexity = args
        .iter()
        .find(|a| a.name.as_deref() == Some("convexity"))
        .and_then(|a| a.value.as_number())
        .map(|n| n as u32)
        .unwrap_or(DEFAULT_CONVEXITY);
    Statement::Polygon { points, paths, convexity: Some(convexity), location }
}

fn extract_points3(value: &ParameterValue) -> Vec<[f64; 3]> {
    match value {
        ParameterValue::Expression(expr) => match expr.as_ref() {
            crate::value::Expression::Array { items, .. } => items
                .iter()
                .filter_map(|item| match item {
                    crate::value::Expression::Literal { value: ParameterValue::Vector3D(v), .. } => Some(*v),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn extract_points2(value: &ParameterValue) -> Vec<[f64; 2]> {
    match value {
        ParameterValue::Expression(expr) => match expr.as_ref() {
            crate::value::Expression::Array { items, .. } => items
                .iter()
                .filter_map(|item| match item {
                    crate::value::Expression::Literal { value: ParameterValue::Vector2D(v), .. } => Some(*v),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn extract_index_lists(value: &ParameterValue) -> Vec<Vec<usize>> {
    match value {
        ParameterValue::Expression(expr) => match expr.as_ref() {
            crate::value::Expression::Array { items, .. } => items
                .iter()
                .map(|item| match item {
                    crate::value::Expression::Array { items: indices, .. } => {
                        indices.iter().filter_map(literal_number).map(|n| n as usize).collect()
                    }
                    other => literal_number(other).map(|n| vec![n as usize]).unwrap_or_default(),
                })
                .collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn literal_number(expr: &crate::value::Expression) -> Option<f64> {
    match expr {
        crate::value::Expression::Literal { value, .. } => value.as_number(),
        _ => None,
    }
}

fn build_text(args: &[ExtractedArgument], location: SourceLocation) -> Statement {
    let text = args
        .iter()
        .find(|a| a.name.as_deref() == Some("text") || a.name.is_none())
        .and_then(|a| match &a.value {
            ParameterValue::String(s) => Some(s.clone()),
            _ => None,
        })
        .unwrap_or_default();
    let size = args
        .iter()
        .find(|a| a.name.as_deref() == Some("size"))
        .and_then(|a| a.value.as_number())
        .unwrap_or(10.0);
    Statement::Text { text, size, location }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_arguments;
    use openscad_parser::cst::NodeKind;
    use openscad_parser::parse;

    fn args_of(source: &str) -> Vec<ExtractedArgument> {
        let cst = parse(source);
        let call = &cst.root.children[0];
        let args = call.find_child(NodeKind::Arguments).unwrap();
        extract_arguments(args)
    }

    #[test]
    fn cube_with_no_arguments_defaults() {
        let args = args_of("cube();");
        let mut diagnostics = Vec::new();
        let stmt = build_cube(&args, SourceLocation::sentinel(), &mut diagnostics);
        assert_eq!(stmt, Statement::Cube { size: Size::Scalar(1.0), center: false, location: SourceLocation::sentinel() });
    }

    #[test]
    fn sphere_with_no_arguments_defaults_radius_one() {
        let args = args_of("sphere();");
        let mut diagnostics = Vec::new();
        let stmt = build_sphere(&args, SourceLocation::sentinel(), &mut diagnostics);
        assert!(matches!(stmt, Statement::Sphere { radius, .. } if radius == 1.0));
    }

    #[test]
    fn sphere_diameter_halves_to_radius() {
        let args = args_of("sphere(d=10);");
        let mut diagnostics = Vec::new();
        let stmt = build_sphere(&args, SourceLocation::sentinel(), &mut diagnostics);
        assert!(matches!(stmt, Statement::Sphere { radius, diameter: Some(10.0), .. } if radius == 5.0));
    }

    #[test]
    fn cylinder_r1_r2_fall_back_to_r() {
        let args = args_of("cylinder(h=10, r=3);");
        let mut diagnostics = Vec::new();
        let stmt = build_cylinder(&args, SourceLocation::sentinel(), &mut diagnostics);
        assert!(matches!(stmt, Statement::Cylinder { r1, r2, .. } if r1 == 3.0 && r2 == 3.0));
    }

    #[test]
    fn cube_vector_argument_produces_vector_size() {
        let args = args_of("cube([1,2,3]);");
        let mut diagnostics = Vec::new();
        let stmt = build_cube(&args, SourceLocation::sentinel(), &mut diagnostics);
        assert_eq!(
            stmt,
            Statement::Cube { size: Size::Vector3D([1.0, 2.0, 3.0]), center: false, location: SourceLocation::sentinel() }
        );
    }
}
