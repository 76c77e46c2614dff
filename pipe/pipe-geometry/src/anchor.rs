//! Named attachment points.

use std::f64::consts::PI;

use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A labeled attachment point on a generated solid.
///
/// An anchor is a local frame: its origin is the attachment point, its +Z
/// axis points outward (away from the material), and its +X axis fixes the
/// spin about that direction.
///
/// # Example
///
/// ```
/// use pipe_geometry::Anchor;
/// use nalgebra::{Point3, Vector3};
///
/// let a = Anchor::new("A", Point3::new(0.0, 0.0, -10.0), -Vector3::z());
/// assert!((a.direction().z + 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Anchor {
    name: String,
    position: Point3<f64>,
    rotation: UnitQuaternion<f64>,
}

impl Anchor {
    /// Create an anchor at `position` facing `direction`.
    ///
    /// `direction` need not be normalised but must be non-zero.
    #[must_use]
    pub fn new(name: impl Into<String>, position: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self {
            name: name.into(),
            position,
            rotation: align_z(&direction),
        }
    }

    /// Rotate the anchor about its own direction (builder pattern).
    #[must_use]
    pub fn with_spin(mut self, angle: f64) -> Self {
        self.rotation *= UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle);
        self
    }

    /// Copy under a different name.
    #[must_use]
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// The anchor's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attachment point.
    #[must_use]
    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    /// Outward unit direction.
    #[must_use]
    pub fn direction(&self) -> Vector3<f64> {
        self.rotation * Vector3::z()
    }

    /// Orientation of the local frame.
    #[must_use]
    pub fn rotation(&self) -> UnitQuaternion<f64> {
        self.rotation
    }

    /// The local frame as a transform from anchor space to solid space.
    #[must_use]
    pub fn frame(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::from(self.position.coords), self.rotation)
    }

    /// The same anchor after moving its solid by `transform`.
    #[must_use]
    pub fn transformed(&self, transform: &Isometry3<f64>) -> Self {
        Self {
            name: self.name.clone(),
            position: transform * self.position,
            rotation: transform.rotation * self.rotation,
        }
    }

    /// Whether `other` sits on this anchor and faces it, within `tolerance`.
    #[must_use]
    pub fn faces(&self, other: &Self, tolerance: f64) -> bool {
        (self.position - other.position).norm() <= tolerance
            && (self.direction() + other.direction()).norm() <= tolerance
    }
}

/// The transform that moves a solid so its `child` anchor meets `target`.
///
/// After the move both anchors share a position, point in opposite
/// directions, and agree on spin.
///
/// # Example
///
/// ```
/// use pipe_geometry::{mate, Anchor};
/// use nalgebra::{Point3, Vector3};
///
/// let target = Anchor::new("B", Point3::new(0.0, 0.0, 50.0), Vector3::z());
/// let child = Anchor::new("A", Point3::new(0.0, 0.0, -10.0), -Vector3::z());
///
/// let moved = child.transformed(&mate(&child, &target));
/// assert!(moved.faces(&target, 1e-9));
/// ```
#[must_use]
pub fn mate(child: &Anchor, target: &Anchor) -> Isometry3<f64> {
    let flip = Isometry3::from_parts(
        Translation3::identity(),
        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI),
    );
    target.frame() * flip * child.frame().inverse()
}

/// Rotation taking +Z onto `direction`.
///
/// A direction opposite +Z gets a half turn about +X.
#[must_use]
pub fn align_z(direction: &Vector3<f64>) -> UnitQuaternion<f64> {
    UnitQuaternion::rotation_between(&Vector3::z(), direction)
        .unwrap_or_else(|| UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI))
}
