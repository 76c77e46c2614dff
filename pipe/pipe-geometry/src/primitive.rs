//! Primitive solids supplied by the geometry kernel.
//!
//! Every primitive is defined in its own canonical frame: the axis is +Z and
//! the base sits on z = 0 (spheres are centred on the origin). Placement is
//! done with rigid transforms in the [`Solid`](crate::Solid) tree.

use std::f64::consts::FRAC_PI_2;

use nalgebra::Point3;

use crate::bounds::Aabb;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A primitive solid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primitive {
    /// Solid cylinder or frustum from z = 0 to z = `height`.
    Cylinder {
        /// Length along +Z.
        height: f64,
        /// Diameter at z = 0.
        bottom_diameter: f64,
        /// Diameter at z = `height`.
        top_diameter: f64,
    },

    /// Hollow cylinder from z = 0 to z = `height`.
    Tube {
        /// Length along +Z.
        height: f64,
        /// Outside diameter.
        outer_diameter: f64,
        /// Bore diameter.
        inner_diameter: f64,
    },

    /// Sphere centred on the origin.
    Sphere {
        /// Diameter.
        diameter: f64,
    },

    /// Circular section swept along an arc.
    ///
    /// The section starts centred on the origin facing +Z and bends toward
    /// +X around a centre of curvature at `(bend_radius, 0, 0)`.
    ArcSweep {
        /// Radius of the centre line.
        bend_radius: f64,
        /// Diameter of the swept circle.
        section_diameter: f64,
        /// Swept angle in radians.
        angle: f64,
    },

    /// Single-start helical thread ridge.
    Thread(ThreadProfile),
}

/// Shape of a helical thread ridge.
///
/// External ridges stand outward from the root cylinder; internal ridges
/// point inward from it and are used as cutting tools for female threads.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThreadProfile {
    /// Length along +Z.
    pub height: f64,
    /// Diameter the ridge grows from.
    pub root_diameter: f64,
    /// Radial ridge height.
    pub depth: f64,
    /// Axial advance per turn.
    pub pitch: f64,
    /// `true` for a ridge pointing outward, `false` for inward.
    pub external: bool,
    /// Included flank angle in radians.
    pub flank_angle: f64,
    /// Whether the first and last turn are chamfered.
    pub bevel: bool,
}

impl ThreadProfile {
    /// Number of turns over the thread height.
    #[must_use]
    pub fn turns(&self) -> f64 {
        self.height / self.pitch
    }

    /// Largest radius the thread occupies.
    #[must_use]
    pub fn outer_radius(&self) -> f64 {
        if self.external {
            self.root_diameter / 2.0 + self.depth
        } else {
            self.root_diameter / 2.0
        }
    }

    /// Smallest radius the thread occupies.
    #[must_use]
    pub fn inner_radius(&self) -> f64 {
        if self.external {
            self.root_diameter / 2.0
        } else {
            self.root_diameter / 2.0 - self.depth
        }
    }
}

impl Primitive {
    /// Short kind name used by writers and logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Cylinder { .. } => "cylinder",
            Self::Tube { .. } => "tube",
            Self::Sphere { .. } => "sphere",
            Self::ArcSweep { .. } => "arc_sweep",
            Self::Thread(_) => "thread",
        }
    }

    /// Bounding box in the primitive's own frame.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        match *self {
            Self::Cylinder {
                height,
                bottom_diameter,
                top_diameter,
            } => column(height, bottom_diameter.max(top_diameter) / 2.0),
            Self::Tube {
                height,
                outer_diameter,
                ..
            } => column(height, outer_diameter / 2.0),
            Self::Sphere { diameter } => {
                let r = diameter / 2.0;
                Aabb::new(Point3::new(-r, -r, -r), Point3::new(r, r, r))
            }
            Self::ArcSweep {
                bend_radius,
                section_diameter,
                angle,
            } => sweep_bounds(bend_radius, section_diameter / 2.0, angle),
            Self::Thread(profile) => column(profile.height, profile.outer_radius()),
        }
    }
}

fn column(height: f64, radius: f64) -> Aabb {
    Aabb::new(
        Point3::new(-radius, -radius, 0.0),
        Point3::new(radius, radius, height),
    )
}

/// Bounds of the centre line (ends plus the quarter-turn extremes it
/// passes), grown by the section radius.
fn sweep_bounds(bend_radius: f64, section_radius: f64, angle: f64) -> Aabb {
    let at = |theta: f64| {
        Point3::new(
            bend_radius - bend_radius * theta.cos(),
            0.0,
            bend_radius * theta.sin(),
        )
    };

    let mut points = vec![at(0.0), at(angle)];
    let mut quarter = FRAC_PI_2;
    while quarter < angle {
        points.push(at(quarter));
        quarter += FRAC_PI_2;
    }

    let mut aabb = Aabb::from_points(points.iter());
    aabb.expand_by(section_radius);
    aabb
}
