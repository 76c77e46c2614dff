//! Axis-aligned bounds and the bounds-only kernel.

use std::convert::Infallible;

use nalgebra::{Isometry3, Point3, Vector3};

use crate::kernel::GeometryKernel;
use crate::primitive::Primitive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box.
///
/// # Example
///
/// ```
/// use pipe_geometry::Aabb;
/// use nalgebra::Point3;
///
/// let mut aabb = Aabb::empty();
/// assert!(aabb.is_empty());
///
/// aabb.expand_to_include(&Point3::new(1.0, 2.0, 3.0));
/// aabb.expand_to_include(&Point3::new(-1.0, 0.0, 0.0));
/// assert_eq!(aabb.size().x, 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a box from two corners, ordering each axis.
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// An empty box (min > max) that grows to fit whatever is added.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box containing every point.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        let mut aabb = Self::empty();
        for p in points {
            aabb.expand_to_include(p);
        }
        aabb
    }

    /// Whether the box contains nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Extent along each axis; zero for an empty box.
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        if self.is_empty() {
            Vector3::zeros()
        } else {
            self.max - self.min
        }
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Grow to include `point`.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Grow by `margin` on every side. Empty boxes stay empty.
    pub fn expand_by(&mut self, margin: f64) {
        if self.is_empty() {
            return;
        }
        let m = Vector3::repeat(margin);
        self.min -= m;
        self.max += m;
    }

    /// Whether `point` lies inside or on the box.
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Overlap of both boxes (possibly empty).
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self {
            min: self.min.sup(&other.min),
            max: self.max.inf(&other.max),
        }
    }

    /// The eight corners.
    #[must_use]
    pub fn corners(&self) -> [Point3<f64>; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point3::new(a.x, a.y, a.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(a.x, b.y, a.z),
            Point3::new(b.x, b.y, a.z),
            Point3::new(a.x, a.y, b.z),
            Point3::new(b.x, a.y, b.z),
            Point3::new(a.x, b.y, b.z),
            Point3::new(b.x, b.y, b.z),
        ]
    }

    /// Box around the transformed corners.
    #[must_use]
    pub fn transformed(&self, transform: &Isometry3<f64>) -> Self {
        if self.is_empty() {
            return *self;
        }
        let corners = self.corners().map(|c| transform * c);
        Self::from_points(corners.iter())
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

/// Kernel that evaluates a solid to a conservative bounding box.
///
/// Unions merge boxes, differences keep the base box, and intersections
/// overlap them, so the result always contains the true solid.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundsKernel;

impl GeometryKernel for BoundsKernel {
    type Output = Aabb;
    type Error = Infallible;

    fn empty(&mut self) -> Result<Aabb, Infallible> {
        Ok(Aabb::empty())
    }

    fn primitive(&mut self, primitive: &Primitive) -> Result<Aabb, Infallible> {
        Ok(primitive.bounds())
    }

    fn transform(&mut self, transform: &Isometry3<f64>, child: Aabb) -> Result<Aabb, Infallible> {
        Ok(child.transformed(transform))
    }

    fn union(&mut self, children: Vec<Aabb>) -> Result<Aabb, Infallible> {
        Ok(children
            .iter()
            .fold(Aabb::empty(), |acc, child| acc.merged(child)))
    }

    fn difference(&mut self, base: Aabb, _cut: Aabb) -> Result<Aabb, Infallible> {
        Ok(base)
    }

    fn intersection(&mut self, children: Vec<Aabb>) -> Result<Aabb, Infallible> {
        let mut iter = children.into_iter();
        let first = iter.next().unwrap_or_else(Aabb::empty);
        Ok(iter.fold(first, |acc, child| acc.intersection(&child)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Translation3, UnitQuaternion};
    use std::f64::consts::FRAC_PI_2;

    fn unit() -> Aabb {
        Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_new_orders_corners() {
        let b = Aabb::new(Point3::new(1.0, 0.0, 5.0), Point3::new(0.0, 2.0, 3.0));
        assert_eq!(b.min, Point3::new(0.0, 0.0, 3.0));
        assert_eq!(b.max, Point3::new(1.0, 2.0, 5.0));
    }

    #[test]
    fn test_merge_with_empty() {
        let b = unit();
        assert_eq!(b.merged(&Aabb::empty()), b);
        assert_eq!(Aabb::empty().merged(&b), b);
    }

    #[test]
    fn test_intersection_disjoint_is_empty() {
        let a = unit();
        let mut b = unit();
        b.min.x += 5.0;
        b.max.x += 5.0;
        assert!(a.intersection(&b).is_empty());
        assert_eq!(a.intersection(&b).size(), Vector3::zeros());
    }

    #[test]
    fn test_transformed_rotation() {
        let iso = Isometry3::from_parts(
            Translation3::new(10.0, 0.0, 0.0),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2),
        );
        let b = unit().transformed(&iso);
        assert_relative_eq!(b.min.x, 9.0, epsilon = 1e-9);
        assert_relative_eq!(b.max.x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(b.max.y, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_contains_and_expand() {
        let mut b = unit();
        assert!(b.contains(&Point3::new(0.5, 0.5, 1.0)));
        assert!(!b.contains(&Point3::new(1.5, 0.5, 0.5)));
        b.expand_by(1.0);
        assert!(b.contains(&Point3::new(1.5, 0.5, 0.5)));

        let mut empty = Aabb::empty();
        empty.expand_by(1.0);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_kernel_difference_keeps_base() {
        let mut kernel = BoundsKernel;
        let base = unit();
        let mut cut = unit();
        cut.max.x = 50.0;
        assert_eq!(kernel.difference(base, cut), Ok(base));
    }
}
