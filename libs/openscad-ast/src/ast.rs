//! The typed, location-tagged AST statement model produced by the visitors.

use crate::span::SourceLocation;
use crate::value::{Expression, ParameterValue};

/// A 2D or 3D size/offset, after vector-broadcast resolution (spec §3/§8).
#[derive(Debug, Clone, PartialEq)]
pub enum Size {
    Scalar(f64),
    Vector2D([f64; 2]),
    Vector3D([f64; 3]),
}

/// A declared parameter of a user module or function.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub default: Option<ParameterValue>,
}

/// One `name = range` binding inside a `for` header.
#[derive(Debug, Clone, PartialEq)]
pub struct ForVariable {
    pub name: String,
    pub range: ParameterValue,
    pub step: Option<f64>,
}

/// A single positional or named call argument, pre-binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: Option<String>,
    pub value: ParameterValue,
}

/// The typed AST statement union. Every variant (other than `ErrorNode`
/// sentinel fallbacks) carries a non-synthetic `location`.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    // Primitives
    Cube { size: Size, center: bool, location: SourceLocation },
    Sphere { radius: f64, diameter: Option<f64>, fn_: Option<f64>, fa: Option<f64>, fs: Option<f64>, location: SourceLocation },
    Cylinder { h: f64, r1: f64, r2: f64, center: bool, fn_: Option<f64>, fa: Option<f64>, fs: Option<f64>, location: SourceLocation },
    Polyhedron { points: Vec<[f64; 3]>, faces: Vec<Vec<usize>>, convexity: Option<u32>, location: SourceLocation },
    Square { size: Size, center: bool, location: SourceLocation },
    Circle { radius: f64, fn_: Option<f64>, fa: Option<f64>, fs: Option<f64>, location: SourceLocation },
    Polygon { points: Vec<[f64; 2]>, paths: Option<Vec<Vec<usize>>>, convexity: Option<u32>, location: SourceLocation },
    Text { text: String, size: f64, location: SourceLocation },

    // Transforms
    Translate { v: [f64; 3], children: Vec<Statement>, location: SourceLocation },
    Rotate { a: ParameterValue, v: Option<[f64; 3]>, children: Vec<Statement>, location: SourceLocation },
    Scale { v: [f64; 3], children: Vec<Statement>, location: SourceLocation },
    Mirror { v: [f64; 3], children: Vec<Statement>, location: SourceLocation },
    Resize { newsize: [f64; 3], auto: bool, children: Vec<Statement>, location: SourceLocation },
    Multmatrix { m: Vec<Vec<f64>>, children: Vec<Statement>, location: SourceLocation },
    Color { c: [f64; 4], alpha: Option<f64>, children: Vec<Statement>, location: SourceLocation },
    Offset { r: Option<f64>, delta: Option<f64>, chamfer: bool, children: Vec<Statement>, location: SourceLocation },

    // CSG
    Union { children: Vec<Statement>, location: SourceLocation },
    Difference { children: Vec<Statement>, location: SourceLocation },
    Intersection { children: Vec<Statement>, location: SourceLocation },
    Hull { children: Vec<Statement>, location: SourceLocation },
    Minkowski { children: Vec<Statement>, location: SourceLocation },

    // Control structures
    If { cond: Expression, then_branch: Vec<Statement>, else_branch: Option<Vec<Statement>>, location: SourceLocation },
    ForLoop { variables: Vec<ForVariable>, body: Vec<Statement>, location: SourceLocation },
    Let { bindings: Vec<(String, ParameterValue)>, body: Vec<Statement>, location: SourceLocation },

    // Declarations
    ModuleDefinition { name: String, parameters: Vec<Parameter>, body: Vec<Statement>, location: SourceLocation },
    FunctionDefinition { name: String, parameters: Vec<Parameter>, expression: Expression, location: SourceLocation },
    ModuleInstantiation { name: String, arguments: Vec<Argument>, children: Vec<Statement>, location: SourceLocation },
    ChildrenRef { index: Option<i64>, location: SourceLocation },

    // Side-effectful / bindings
    EchoStatement { arguments: Vec<Expression>, location: SourceLocation },
    Assignment { name: String, value: Expression, location: SourceLocation },
    SpecialVariableAssignment { name: String, value: Expression, location: SourceLocation },

    /// Recovery node. Uses a sentinel zero-span when no reliable location
    /// could be recovered from the offending subtree.
    ErrorNode { message: String, code: String, original_kind: String, cst_text_excerpt: String, cause: Option<String>, location: SourceLocation },
}

impl Statement {
    pub fn location(&self) -> SourceLocation {
        match self {
            Statement::Cube { location, .. }
            | Statement::Sphere { location, .. }
            | Statement::Cylinder { location, .. }
            | Statement::Polyhedron { location, .. }
            | Statement::Square { location, .. }
            | Statement::Circle { location, .. }
            | Statement::Polygon { location, .. }
            | Statement::Text { location, .. }
            | Statement::Translate { location, .. }
            | Statement::Rotate { location, .. }
            | Statement::Scale { location, .. }
            | Statement::Mirror { location, .. }
            | Statement::Resize { location, .. }
            | Statement::Multmatrix { location, .. }
            | Statement::Color { location, .. }
            | Statement::Offset { location, .. }
            | Statement::Union { location, .. }
            | Statement::Difference { location, .. }
            | Statement::Intersection { location, .. }
            | Statement::Hull { location, .. }
            | Statement::Minkowski { location, .. }
            | Statement::If { location, .. }
            | Statement::ForLoop { location, .. }
            | Statement::Let { location, .. }
            | Statement::ModuleDefinition { location, .. }
            | Statement::FunctionDefinition { location, .. }
            | Statement::ModuleInstantiation { location, .. }
            | Statement::ChildrenRef { location, .. }
            | Statement::EchoStatement { location, .. }
            | Statement::Assignment { location, .. }
            | Statement::SpecialVariableAssignment { location, .. }
            | Statement::ErrorNode { location, .. } => *location,
        }
    }

    pub fn error(message: impl Into<String>, code: impl Into<String>, original_kind: impl Into<String>, excerpt: impl Into<String>, location: SourceLocation) -> Self {
        Statement::ErrorNode {
            message: message.into(),
            code: code.into(),
            original_kind: original_kind.into(),
            cst_text_excerpt: excerpt.into(),
            cause: None,
            location,
        }
    }
}
