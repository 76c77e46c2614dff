//! Part components: an endpoint on a plain pipe segment.
//!
//! A component is the building block every fitting is assembled from. In
//! its own frame the segment runs from z = 0 to z = `segment_length` and
//! the endpoint sits on top of it, opening toward +Z.
//!
//! Six join anchors sit at the base of the segment, one per cardinal
//! direction:
//!
//! | Anchor | Direction |
//! |--------|-----------|
//! | `up` | +Z |
//! | `down` | -Z |
//! | `left` | -X |
//! | `right` | +X |
//! | `forward` | -Y |
//! | `back` | +Y |
//!
//! [`PartComponent::oriented`] turns the component so its axis points the
//! way a join anchor faces, which is how assemblers place their arms
//! around a hub without computing offsets. A seventh anchor, `tip`, marks
//! the connection face.

use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};
use pipe_geometry::{Anchor, Solid, align_z};
use pipe_spec::PipeSpec;
use tracing::debug;

use crate::config::FittingConfig;
use crate::endpoint::{EndpointGeometry, EndpointType, endpoint};
use crate::error::{FittingError, FittingResult, check_length};

/// Names of the six join anchors.
pub const JOIN_ANCHORS: [&str; 6] = ["up", "down", "left", "right", "forward", "back"];

/// Name of the anchor on the connection face.
pub const TIP: &str = "tip";

fn join_direction(name: &str) -> Option<Vector3<f64>> {
    match name {
        "up" => Some(Vector3::z()),
        "down" => Some(-Vector3::z()),
        "left" => Some(-Vector3::x()),
        "right" => Some(Vector3::x()),
        "forward" => Some(-Vector3::y()),
        "back" => Some(Vector3::y()),
        _ => None,
    }
}

/// An endpoint joined to a plain pipe segment.
///
/// The component keeps its pieces apart so a fitting can subtract every
/// bore in one pass before adding the connectors:
///
/// - [`body`](Self::body) - the segment's outside
/// - [`negative`](Self::negative) - segment bore plus endpoint bore
/// - [`positive`](Self::positive) - the endpoint's connector material
///
/// [`solid`](Self::solid) combines them for a stand-alone component.
#[derive(Debug, Clone, PartialEq)]
pub struct PartComponent {
    spec: PipeSpec,
    endpoint: EndpointGeometry,
    segment_length: f64,
    overshoot: f64,
    placement: Isometry3<f64>,
}

impl PartComponent {
    /// Build a component.
    ///
    /// `segment_length` defaults to the spec's thread length; zero gives an
    /// endpoint with no segment.
    ///
    /// # Errors
    ///
    /// Any error of [`endpoint`](crate::endpoint()) for the spec or config,
    /// then [`FittingError::NegativeLength`] for a negative segment or
    /// [`FittingError::InvalidParameter`] for a non-finite one.
    ///
    /// # Example
    ///
    /// ```
    /// use pipe_fittings::{EndpointType, FittingConfig, PartComponent};
    /// use pipe_spec::SpecQuery;
    ///
    /// let spec = SpecQuery::new(40).dn("DN20").find().unwrap();
    /// let arm = PartComponent::new(&spec, EndpointType::Spigot, Some(30.0), &FittingConfig::default())
    ///     .unwrap()
    ///     .oriented("right")
    ///     .unwrap();
    ///
    /// let tip = arm.tip();
    /// assert!((tip.position().x - arm.total_length()).abs() < 1e-9);
    /// ```
    pub fn new(
        spec: &PipeSpec,
        endpoint_type: EndpointType,
        segment_length: Option<f64>,
        config: &FittingConfig,
    ) -> FittingResult<Self> {
        let endpoint = endpoint(spec, endpoint_type, None, config)?;
        let segment_length =
            check_length("segment", segment_length.unwrap_or_else(|| spec.thread_length()))?;

        debug!(
            spec = %spec.label(),
            endpoint = %endpoint_type,
            segment_length,
            "built part component"
        );

        Ok(Self {
            spec: spec.clone(),
            endpoint,
            segment_length,
            overshoot: config.bore_overshoot,
            placement: Isometry3::identity(),
        })
    }

    /// The spec this component is sized for.
    #[must_use]
    pub fn spec(&self) -> &PipeSpec {
        &self.spec
    }

    /// The endpoint type on the tip.
    #[must_use]
    pub fn endpoint_type(&self) -> EndpointType {
        self.endpoint.endpoint_type
    }

    /// Length of the plain segment.
    #[must_use]
    pub fn segment_length(&self) -> f64 {
        self.segment_length
    }

    /// Segment plus endpoint length.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.segment_length + self.endpoint.length
    }

    /// Outside diameter of the segment.
    #[must_use]
    pub fn body_diameter(&self) -> f64 {
        self.endpoint_type().body_diameter(&self.spec)
    }

    /// Current placement relative to the fitting frame.
    #[must_use]
    pub fn placement(&self) -> &Isometry3<f64> {
        &self.placement
    }

    /// Turn the component so its axis points the way `anchor` faces.
    ///
    /// # Errors
    ///
    /// Returns [`FittingError::InvalidParameter`] if `anchor` is not one of
    /// the six join anchors.
    pub fn oriented(self, anchor: &str) -> FittingResult<Self> {
        let direction = join_direction(anchor).ok_or_else(|| {
            FittingError::invalid(
                "anchor",
                format!("'{anchor}' is not a join anchor ({})", JOIN_ANCHORS.join(", ")),
            )
        })?;
        Ok(self.pointed(&direction))
    }

    /// Turn the component so its axis points along `direction`.
    #[must_use]
    pub fn pointed(self, direction: &Vector3<f64>) -> Self {
        self.rotated(align_z(direction))
    }

    /// Rotate about the fitting origin.
    #[must_use]
    pub fn rotated(mut self, rotation: UnitQuaternion<f64>) -> Self {
        self.placement = Isometry3::from_parts(Translation3::identity(), rotation) * self.placement;
        self
    }

    /// Move in the fitting frame.
    #[must_use]
    pub fn translated(mut self, offset: Vector3<f64>) -> Self {
        self.placement = Isometry3::from_parts(Translation3::from(offset), UnitQuaternion::identity())
            * self.placement;
        self
    }

    fn place(&self, solid: Solid) -> Solid {
        solid.transformed(self.placement)
    }

    fn on_segment(&self, solid: Solid) -> Solid {
        solid.translated(Vector3::new(0.0, 0.0, self.segment_length))
    }

    /// Outside of the plain segment.
    #[must_use]
    pub fn body(&self) -> Solid {
        if self.segment_length > 0.0 {
            self.place(Solid::cylinder(self.segment_length, self.body_diameter()))
        } else {
            Solid::Empty
        }
    }

    /// Segment bore united with the endpoint bore.
    #[must_use]
    pub fn negative(&self) -> Solid {
        let bore = if self.segment_length > 0.0 {
            Solid::cylinder(
                self.segment_length + 2.0 * self.overshoot,
                self.spec.inner_diameter(),
            )
            .translated(Vector3::new(0.0, 0.0, -self.overshoot))
        } else {
            Solid::Empty
        };
        self.place(bore.union(self.on_segment(self.endpoint.negative.clone())))
    }

    /// Endpoint connector material.
    #[must_use]
    pub fn positive(&self) -> Solid {
        self.place(self.on_segment(self.endpoint.positive.clone()))
    }

    /// The stand-alone component: `(body - negative) + positive`.
    #[must_use]
    pub fn solid(&self) -> Solid {
        self.body().difference(self.negative()).union(self.positive())
    }

    /// The anchor on the connection face, facing outward.
    #[must_use]
    pub fn tip(&self) -> Anchor {
        Anchor::new(TIP, Point3::new(0.0, 0.0, self.total_length()), Vector3::z())
            .transformed(&self.placement)
    }

    /// The six join anchors followed by `tip`, in the fitting frame.
    #[must_use]
    pub fn anchors(&self) -> Vec<Anchor> {
        JOIN_ANCHORS
            .iter()
            .filter_map(|name| {
                join_direction(name)
                    .map(|dir| Anchor::new(*name, Point3::origin(), dir).transformed(&self.placement))
            })
            .chain(std::iter::once(self.tip()))
            .collect()
    }

    /// Look up an anchor by name.
    #[must_use]
    pub fn anchor(&self, name: &str) -> Option<Anchor> {
        if name == TIP {
            return Some(self.tip());
        }
        join_direction(name)
            .map(|dir| Anchor::new(name, Point3::origin(), dir).transformed(&self.placement))
    }
}
