//! OpenSCAD source output.
//!
//! [`ScadWriter`] is a [`GeometryKernel`] whose output is OpenSCAD source
//! text. It lets a generated fitting be inspected, rendered or exported
//! with the stock OpenSCAD toolchain without linking a mesh kernel.
//!
//! # Mapping
//!
//! - Cylinders and frustums become `cylinder(h, d1, d2)`
//! - Tubes become the difference of two cylinders
//! - Arc sweeps become a `rotate_extrude` of a circle, re-oriented so the
//!   sweep leaves the origin along +Z
//! - Threads become a twisted `linear_extrude` of an offset circle, which
//!   traces a single-start helical ridge
//! - Transforms become `multmatrix`

use std::fmt::{self, Write};

use nalgebra::Isometry3;

use crate::kernel::GeometryKernel;
use crate::primitive::{Primitive, ThreadProfile};
use crate::solid::Solid;

/// Renders solids as OpenSCAD source.
///
/// # Example
///
/// ```
/// use pipe_geometry::{ScadWriter, Solid};
///
/// let source = ScadWriter::default()
///     .render(&Solid::cylinder(10.0, 4.0))
///     .unwrap();
/// assert!(source.contains("cylinder(h = 10, d1 = 4, d2 = 4);"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScadWriter {
    /// Circumferential facet count (`$fn`).
    pub segments: u32,
    /// How far tube bores extend past the end faces.
    pub overshoot: f64,
}

impl Default for ScadWriter {
    fn default() -> Self {
        Self {
            segments: 64,
            overshoot: 0.01,
        }
    }
}

impl ScadWriter {
    /// Create a writer with the given facet count.
    #[must_use]
    pub fn new(segments: u32) -> Self {
        Self {
            segments,
            ..Self::default()
        }
    }

    /// Render a whole document: a header followed by the solid.
    ///
    /// # Errors
    ///
    /// Returns [`fmt::Error`] if formatting fails.
    pub fn render(mut self, solid: &Solid) -> Result<String, fmt::Error> {
        let body = solid.evaluate(&mut self)?;
        let mut out = String::new();
        writeln!(out, "// pipe-geometry output")?;
        writeln!(out, "$fn = {};", self.segments)?;
        out.push_str(&body);
        Ok(out)
    }

    fn thread(&self, t: &ThreadProfile) -> Result<String, fmt::Error> {
        // An offset circle spun about the axis touches the inner radius on
        // one side and the outer radius on the other.
        let offset = t.depth / 2.0;
        let radius = t.inner_radius() + offset;
        let slices = (t.turns() * f64::from(self.segments)).ceil().max(1.0);

        let mut ridge = String::new();
        writeln!(
            ridge,
            "linear_extrude(height = {}, twist = {}, slices = {}) translate([{}, 0]) circle(r = {});",
            num(t.height),
            num(-360.0 * t.turns()),
            num(slices),
            num(offset),
            num(radius),
        )?;

        if !t.bevel {
            return Ok(ridge);
        }

        // Chamfer both ends at the flank angle.
        let run = (t.depth / (t.flank_angle / 2.0).tan()).min(t.height / 2.0);
        let (inner, outer) = (2.0 * t.inner_radius(), 2.0 * t.outer_radius());
        let mut bevel = String::new();
        writeln!(bevel, "cylinder(h = {}, d1 = {}, d2 = {});", num(run), num(inner), num(outer))?;
        writeln!(
            bevel,
            "translate([0, 0, {}]) cylinder(h = {}, d = {});",
            num(run),
            num(t.height - 2.0 * run),
            num(outer)
        )?;
        writeln!(
            bevel,
            "translate([0, 0, {}]) cylinder(h = {}, d1 = {}, d2 = {});",
            num(t.height - run),
            num(run),
            num(outer),
            num(inner)
        )?;

        let envelope = block("union()", &[bevel])?;
        block("intersection()", &[ridge, envelope])
    }
}

impl GeometryKernel for ScadWriter {
    type Output = String;
    type Error = fmt::Error;

    fn empty(&mut self) -> Result<String, fmt::Error> {
        Ok("union() {}\n".to_string())
    }

    fn primitive(&mut self, primitive: &Primitive) -> Result<String, fmt::Error> {
        let mut out = String::new();
        match primitive {
            Primitive::Cylinder {
                height,
                bottom_diameter,
                top_diameter,
            } => writeln!(
                out,
                "cylinder(h = {}, d1 = {}, d2 = {});",
                num(*height),
                num(*bottom_diameter),
                num(*top_diameter)
            )?,
            Primitive::Tube {
                height,
                outer_diameter,
                inner_diameter,
            } => {
                let outer = format!("cylinder(h = {}, d = {});\n", num(*height), num(*outer_diameter));
                let bore = format!(
                    "translate([0, 0, {}]) cylinder(h = {}, d = {});\n",
                    num(-self.overshoot),
                    num(height + 2.0 * self.overshoot),
                    num(*inner_diameter)
                );
                out = block("difference()", &[outer, bore])?;
            }
            Primitive::Sphere { diameter } => writeln!(out, "sphere(d = {});", num(*diameter))?,
            Primitive::ArcSweep {
                bend_radius,
                section_diameter,
                angle,
            } => writeln!(
                out,
                "multmatrix([[-1, 0, 0, {r}], [0, 0, 1, 0], [0, 1, 0, 0], [0, 0, 0, 1]]) \
                 rotate_extrude(angle = {}) translate([{r}, 0]) circle(d = {});",
                num(angle.to_degrees()),
                num(*section_diameter),
                r = num(*bend_radius),
            )?,
            Primitive::Thread(profile) => out = self.thread(profile)?,
        }
        Ok(out)
    }

    fn transform(&mut self, transform: &Isometry3<f64>, child: String) -> Result<String, fmt::Error> {
        let m = transform.to_homogeneous();
        let rows: Vec<String> = (0..4)
            .map(|r| {
                let cells: Vec<String> = (0..4).map(|c| num(m[(r, c)])).collect();
                format!("[{}]", cells.join(", "))
            })
            .collect();
        block(&format!("multmatrix([{}])", rows.join(", ")), &[child])
    }

    fn union(&mut self, children: Vec<String>) -> Result<String, fmt::Error> {
        block("union()", &children)
    }

    fn difference(&mut self, base: String, cut: String) -> Result<String, fmt::Error> {
        block("difference()", &[base, cut])
    }

    fn intersection(&mut self, children: Vec<String>) -> Result<String, fmt::Error> {
        block("intersection()", &children)
    }
}

/// `head { children }` with the children indented.
fn block(head: &str, children: &[String]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{head} {{")?;
    for child in children {
        for line in child.lines() {
            writeln!(out, "  {line}")?;
        }
    }
    writeln!(out, "}}")?;
    Ok(out)
}

/// Number formatting without float noise or negative zero.
fn num(value: f64) -> String {
    let rounded = (value * 1e9).round() / 1e9;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{rounded}")
    }
}
