//! Constructive solid geometry trees.

use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};

use crate::bounds::{Aabb, BoundsKernel};
use crate::kernel::GeometryKernel;
use crate::primitive::{Primitive, ThreadProfile};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A solid described as a tree of primitives, rigid transforms and
/// boolean operations.
///
/// Trees are cheap value objects. The combinators keep them shallow:
/// nested unions are flattened, empty operands are dropped, and stacked
/// transforms are composed into one.
///
/// # Example
///
/// ```
/// use pipe_geometry::Solid;
/// use nalgebra::Vector3;
///
/// let sleeve = Solid::tube(20.0, 26.7, 20.96)
///     .union(Solid::cylinder(2.0, 30.0).translated(Vector3::new(0.0, 0.0, 9.0)));
///
/// let bounds = sleeve.bounds();
/// assert!((bounds.max.z - 20.0).abs() < 1e-9);
/// assert_eq!(sleeve.primitive_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Solid {
    /// Nothing.
    #[default]
    Empty,
    /// A primitive in its canonical frame.
    Primitive(Primitive),
    /// A child placed by a rigid transform.
    Transform {
        /// Child-to-parent transform.
        transform: Isometry3<f64>,
        /// The placed solid.
        child: Box<Solid>,
    },
    /// Union of the children.
    Union(Vec<Solid>),
    /// `base` with `cut` removed.
    Difference {
        /// Solid to cut from.
        base: Box<Solid>,
        /// Solid removed.
        cut: Box<Solid>,
    },
    /// Intersection of the children.
    Intersection(Vec<Solid>),
}

impl Solid {
    // =========================================================================
    // Primitives
    // =========================================================================

    /// Solid cylinder from z = 0 to z = `height`.
    #[must_use]
    pub fn cylinder(height: f64, diameter: f64) -> Self {
        Self::frustum(height, diameter, diameter)
    }

    /// Cone frustum from z = 0 (`bottom_diameter`) to z = `height`.
    #[must_use]
    pub fn frustum(height: f64, bottom_diameter: f64, top_diameter: f64) -> Self {
        Self::Primitive(Primitive::Cylinder {
            height,
            bottom_diameter,
            top_diameter,
        })
    }

    /// Hollow cylinder from z = 0 to z = `height`.
    #[must_use]
    pub fn tube(height: f64, outer_diameter: f64, inner_diameter: f64) -> Self {
        Self::Primitive(Primitive::Tube {
            height,
            outer_diameter,
            inner_diameter,
        })
    }

    /// Sphere centred on the origin.
    #[must_use]
    pub fn sphere(diameter: f64) -> Self {
        Self::Primitive(Primitive::Sphere { diameter })
    }

    /// Circular section swept from the origin along an arc bending toward +X.
    #[must_use]
    pub fn arc_sweep(bend_radius: f64, section_diameter: f64, angle: f64) -> Self {
        Self::Primitive(Primitive::ArcSweep {
            bend_radius,
            section_diameter,
            angle,
        })
    }

    /// Helical thread ridge.
    #[must_use]
    pub fn thread(profile: ThreadProfile) -> Self {
        Self::Primitive(Primitive::Thread(profile))
    }

    // =========================================================================
    // Booleans
    // =========================================================================

    /// Union with `other`.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        match (self, other) {
            (Self::Empty, other) => other,
            (this, Self::Empty) => this,
            (Self::Union(mut a), Self::Union(b)) => {
                a.extend(b);
                Self::Union(a)
            }
            (Self::Union(mut a), other) => {
                a.push(other);
                Self::Union(a)
            }
            (this, Self::Union(b)) => {
                let mut children = Vec::with_capacity(b.len() + 1);
                children.push(this);
                children.extend(b);
                Self::Union(children)
            }
            (this, other) => Self::Union(vec![this, other]),
        }
    }

    /// Union of every solid in `solids`.
    #[must_use]
    pub fn union_all(solids: impl IntoIterator<Item = Self>) -> Self {
        solids.into_iter().fold(Self::Empty, Self::union)
    }

    /// `self` with `cut` removed. Cutting nothing returns `self` unchanged.
    #[must_use]
    pub fn difference(self, cut: Self) -> Self {
        match (self, cut) {
            (Self::Empty, _) => Self::Empty,
            (this, Self::Empty) => this,
            (this, cut) => Self::Difference {
                base: Box::new(this),
                cut: Box::new(cut),
            },
        }
    }

    /// Intersection with `other`. Anything intersected with nothing is nothing.
    #[must_use]
    pub fn intersection(self, other: Self) -> Self {
        match (self, other) {
            (Self::Empty, _) | (_, Self::Empty) => Self::Empty,
            (Self::Intersection(mut a), other) => {
                a.push(other);
                Self::Intersection(a)
            }
            (this, other) => Self::Intersection(vec![this, other]),
        }
    }

    // =========================================================================
    // Placement
    // =========================================================================

    /// Apply a rigid transform, composing with an existing outer transform.
    #[must_use]
    pub fn transformed(self, transform: Isometry3<f64>) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Transform {
                transform: inner,
                child,
            } => Self::Transform {
                transform: transform * inner,
                child,
            },
            other => Self::Transform {
                transform,
                child: Box::new(other),
            },
        }
    }

    /// Move by `offset`.
    #[must_use]
    pub fn translated(self, offset: Vector3<f64>) -> Self {
        self.transformed(Isometry3::from_parts(
            Translation3::from(offset),
            UnitQuaternion::identity(),
        ))
    }

    /// Rotate about the origin.
    #[must_use]
    pub fn rotated(self, rotation: UnitQuaternion<f64>) -> Self {
        self.transformed(Isometry3::from_parts(Translation3::identity(), rotation))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Whether this is the empty solid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Number of primitive leaves.
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Primitive(_) => 1,
            Self::Transform { child, .. } => child.primitive_count(),
            Self::Union(children) | Self::Intersection(children) => {
                children.iter().map(Self::primitive_count).sum()
            }
            Self::Difference { base, cut } => base.primitive_count() + cut.primitive_count(),
        }
    }

    /// Evaluate the tree bottom-up with `kernel`.
    ///
    /// # Errors
    ///
    /// Returns the first error the kernel reports.
    pub fn evaluate<K: GeometryKernel + ?Sized>(
        &self,
        kernel: &mut K,
    ) -> Result<K::Output, K::Error> {
        match self {
            Self::Empty => kernel.empty(),
            Self::Primitive(primitive) => kernel.primitive(primitive),
            Self::Transform { transform, child } => {
                let child = child.evaluate(kernel)?;
                kernel.transform(transform, child)
            }
            Self::Union(children) => {
                let children = children
                    .iter()
                    .map(|c| c.evaluate(kernel))
                    .collect::<Result<Vec<_>, _>>()?;
                kernel.union(children)
            }
            Self::Difference { base, cut } => {
                let base = base.evaluate(kernel)?;
                let cut = cut.evaluate(kernel)?;
                kernel.difference(base, cut)
            }
            Self::Intersection(children) => {
                let children = children
                    .iter()
                    .map(|c| c.evaluate(kernel))
                    .collect::<Result<Vec<_>, _>>()?;
                kernel.intersection(children)
            }
        }
    }

    /// Conservative axis-aligned bounds.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        match self.evaluate(&mut BoundsKernel) {
            Ok(bounds) => bounds,
            Err(never) => match never {},
        }
    }
}

impl From<Primitive> for Solid {
    fn from(primitive: Primitive) -> Self {
        Self::Primitive(primitive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_union_flattens_and_skips_empty() {
        let a = Solid::cylinder(1.0, 1.0);
        let b = Solid::sphere(1.0);
        let c = Solid::tube(1.0, 2.0, 1.0);

        let u = a.clone().union(b.clone()).union(Solid::Empty).union(c.clone());
        assert_eq!(u, Solid::Union(vec![a.clone(), b.clone(), c.clone()]));

        assert_eq!(Solid::Empty.union(a.clone()), a);
        assert_eq!(Solid::union_all(Vec::new()), Solid::Empty);
        assert_eq!(Solid::union_all([a.clone()]), a);
    }

    #[test]
    fn test_difference_with_empty_cut() {
        let a = Solid::cylinder(1.0, 1.0);
        assert_eq!(a.clone().difference(Solid::Empty), a);
        assert!(Solid::Empty.difference(a).is_empty());
    }

    #[test]
    fn test_transforms_compose() {
        let s = Solid::sphere(2.0)
            .translated(Vector3::new(1.0, 0.0, 0.0))
            .translated(Vector3::new(0.0, 2.0, 0.0));
        match &s {
            Solid::Transform { transform, child } => {
                assert!(matches!(**child, Solid::Primitive(_)));
                assert_relative_eq!(transform.translation.vector.x, 1.0);
                assert_relative_eq!(transform.translation.vector.y, 2.0);
            }
            other => panic!("unexpected {other:?}"),
        }

        let c = s.bounds().center();
        assert_relative_eq!(c.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(c.y, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rotated_cylinder_lies_along_x() {
        let rot = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2);
        let b = Solid::cylinder(10.0, 2.0).rotated(rot).bounds();
        assert_relative_eq!(b.max.x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(b.max.z, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bounds_of_difference_and_intersection() {
        let base = Solid::cylinder(10.0, 10.0);
        let cut = Solid::cylinder(20.0, 4.0).translated(Vector3::new(0.0, 0.0, -5.0));
        let b = base.clone().difference(cut.clone()).bounds();
        assert_relative_eq!(b.min.z, 0.0);
        assert_relative_eq!(b.max.z, 10.0);

        let b = base.intersection(cut).bounds();
        assert_relative_eq!(b.max.x, 2.0, epsilon = 1e-9);
        assert_relative_eq!(b.max.z, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_primitive_count() {
        let s = Solid::cylinder(1.0, 1.0)
            .union(Solid::sphere(1.0))
            .difference(Solid::cylinder(2.0, 0.5).translated(Vector3::z()));
        assert_eq!(s.primitive_count(), 3);
        assert_eq!(Solid::Empty.primitive_count(), 0);
    }
}
