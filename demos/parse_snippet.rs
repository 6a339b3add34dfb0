//! Manual smoke test: feeds a literal snippet through the public API and
//! prints the resulting statements and diagnostics.

use openscad_ast::parse;

fn main() {
    let source = r#"
        $fn = 64;
        module rounded_box(size, r) {
            minkowski() {
                cube(size, center = true);
                sphere(r);
            }
        }
        difference() {
            rounded_box([20, 10, 5], 2);
            translate([0, 0, 2]) cube([22, 6, 4], center = true);
        }
        echo("done", 1 + 2);
    "#;

    let (statements, diagnostics) = parse(source);

    println!("parsed {} top-level statement(s):", statements.len());
    for statement in &statements {
        println!("  {statement:?}");
    }

    if diagnostics.is_empty() {
        println!("no diagnostics");
    } else {
        println!("{} diagnostic(s):", diagnostics.len());
        for diagnostic in &diagnostics {
            println!("  {diagnostic}");
        }
    }
}
