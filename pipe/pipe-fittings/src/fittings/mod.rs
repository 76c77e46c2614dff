//! Fitting assemblers.
//!
//! Each assembler is a pure function of its specs, ends, parameters and
//! config. They all follow the same recipe:
//!
//! 1. Resolve the `ends` list against the part's anchors
//! 2. Build one [`PartComponent`] per anchor and turn it into place
//! 3. Unite every segment body with the hub
//! 4. Subtract every bore at once
//! 5. Add the endpoint connectors
//!
//! Subtracting in one pass leaves a continuous channel through the hub.
//! Adding connectors last keeps each endpoint exactly as the endpoint
//! builder made it.

mod branch;
mod closure;
mod elbow;
mod flange;
mod reducer;
mod straight;
mod unsupported;

pub use branch::{DEFAULT_BRANCH_ANGLE, corner, cross, side_outlet_tee, six_way, tee, wye};
pub use closure::{cap, plug};
pub use elbow::{DEFAULT_ELBOW_ANGLE, elbow};
pub use flange::flange;
pub use reducer::{adapter, bushing};
pub use straight::{DEFAULT_PIPE_LENGTH, coupling, nipple, pipe};
pub use unsupported::{saddle, side_outlet_elbow, union_fitting};

use pipe_geometry::{Anchor, Solid};
use pipe_spec::PipeSpec;
use tracing::info;

use crate::component::PartComponent;
use crate::endpoint::EndpointType;
use crate::error::{FittingError, FittingResult};
use crate::kind::FittingKind;
use crate::model::{FittingModel, Port};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Optional shape parameters. Each assembler reads the ones it uses and
/// ignores the rest.
///
/// # Example
///
/// ```
/// use pipe_fittings::FittingParams;
///
/// let params = FittingParams::default().with_angle(45.0).with_bend_radius(60.0);
/// assert_eq!(params.angle, Some(45.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FittingParams {
    /// Overall length (pipe, nipple), transition length (adapter) or plate
    /// thickness (flange), in mm.
    pub length: Option<f64>,
    /// Elbow bend angle in degrees; 90 by default.
    pub angle: Option<f64>,
    /// Elbow centre-line radius in mm; a sharp corner when unset.
    pub bend_radius: Option<f64>,
    /// Wye branch angle from the run in degrees; 45 by default.
    pub branch_angle: Option<f64>,
    /// Plain segment length behind each endpoint, in mm.
    pub arm_length: Option<f64>,
    /// Flange bolt hole count; the config default when unset.
    pub bolt_holes: Option<u32>,
}

impl FittingParams {
    /// Set the length.
    #[must_use]
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }

    /// Set the elbow angle in degrees.
    #[must_use]
    pub fn with_angle(mut self, degrees: f64) -> Self {
        self.angle = Some(degrees);
        self
    }

    /// Set the elbow bend radius.
    #[must_use]
    pub fn with_bend_radius(mut self, radius: f64) -> Self {
        self.bend_radius = Some(radius);
        self
    }

    /// Set the wye branch angle in degrees.
    #[must_use]
    pub fn with_branch_angle(mut self, degrees: f64) -> Self {
        self.branch_angle = Some(degrees);
        self
    }

    /// Set the arm length.
    #[must_use]
    pub fn with_arm_length(mut self, length: f64) -> Self {
        self.arm_length = Some(length);
        self
    }

    /// Set the bolt hole count.
    #[must_use]
    pub fn with_bolt_holes(mut self, holes: u32) -> Self {
        self.bolt_holes = Some(holes);
        self
    }
}

/// One anchor of a part and the ends it accepts.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Slot {
    pub anchor: &'static str,
    pub allowed: &'static [EndpointType],
    pub default: EndpointType,
}

impl Slot {
    /// Any end, socket by default.
    pub const fn any(anchor: &'static str) -> Self {
        Self {
            anchor,
            allowed: &EndpointType::ALL,
            default: EndpointType::Socket,
        }
    }

    /// A restricted set of ends.
    pub const fn only(
        anchor: &'static str,
        allowed: &'static [EndpointType],
        default: EndpointType,
    ) -> Self {
        Self {
            anchor,
            allowed,
            default,
        }
    }
}

/// Map `ends` onto `slots` positionally, filling gaps with defaults.
pub(crate) fn resolve_ends(
    kind: FittingKind,
    slots: &[Slot],
    ends: &[Option<EndpointType>],
) -> FittingResult<Vec<EndpointType>> {
    if ends.len() > slots.len() {
        return Err(FittingError::TooManyEnds {
            part: kind.to_string(),
            given: ends.len(),
            max: slots.len(),
        });
    }

    slots
        .iter()
        .enumerate()
        .map(|(i, slot)| match ends.get(i).copied().flatten() {
            None => Ok(slot.default),
            Some(end) if slot.allowed.contains(&end) => Ok(end),
            Some(end) => Err(FittingError::InvalidEndpointForPart {
                part: kind.to_string(),
                anchor: slot.anchor.to_string(),
                endpoint: end.to_string(),
                allowed: slot
                    .allowed
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        })
        .collect()
}

/// Widest segment body among `ends`.
pub(crate) fn hub_diameter(spec: &PipeSpec, ends: &[EndpointType]) -> f64 {
    ends.iter()
        .map(|end| end.body_diameter(spec))
        .fold(spec.od(), f64::max)
}

/// Collects the pieces of a fitting and combines them in order.
pub(crate) struct Composer {
    kind: FittingKind,
    bodies: Vec<Solid>,
    negatives: Vec<Solid>,
    positives: Vec<Solid>,
    anchors: Vec<Anchor>,
    ports: Vec<Port>,
}

impl Composer {
    pub fn new(kind: FittingKind) -> Self {
        Self {
            kind,
            bodies: Vec::new(),
            negatives: Vec::new(),
            positives: Vec::new(),
            anchors: Vec::new(),
            ports: Vec::new(),
        }
    }

    /// Add a component whose tip becomes anchor `name`.
    pub fn arm(&mut self, name: &str, component: &PartComponent) {
        self.bodies.push(component.body());
        self.negatives.push(component.negative());
        self.positives.push(component.positive());
        self.port(name, component.tip().renamed(name), component.endpoint_type(), component.spec());
    }

    pub fn body(&mut self, solid: Solid) {
        self.bodies.push(solid);
    }

    pub fn negative(&mut self, solid: Solid) {
        self.negatives.push(solid);
    }

    pub fn positive(&mut self, solid: Solid) {
        self.positives.push(solid);
    }

    /// An anchor that is not a connection.
    pub fn anchor(&mut self, anchor: Anchor) {
        self.anchors.push(anchor);
    }

    /// A connection anchor.
    pub fn port(&mut self, name: &str, anchor: Anchor, endpoint: EndpointType, spec: &PipeSpec) {
        self.anchors.push(anchor);
        self.ports.push(Port {
            anchor: name.to_string(),
            endpoint,
            spec: spec.clone(),
        });
    }

    pub fn finish(self, label: String) -> FittingModel {
        let solid = Solid::union_all(self.bodies)
            .difference(Solid::union_all(self.negatives))
            .union(Solid::union_all(self.positives));

        info!(
            kind = %self.kind,
            %label,
            anchors = self.anchors.len(),
            primitives = solid.primitive_count(),
            "assembled fitting"
        );

        FittingModel::new(self.kind, label, solid, self.anchors, self.ports)
    }
}
