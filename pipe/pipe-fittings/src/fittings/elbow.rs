//! Elbows.

use nalgebra::Vector3;
use pipe_geometry::Solid;
use pipe_spec::PipeSpec;
use tracing::warn;

use super::{Composer, FittingParams, Slot, hub_diameter, resolve_ends};
use crate::component::PartComponent;
use crate::config::FittingConfig;
use crate::endpoint::EndpointType;
use crate::error::{FittingError, FittingResult};
use crate::kind::FittingKind;
use crate::model::FittingModel;

/// Bend angle when the request gives none, in degrees.
pub const DEFAULT_ELBOW_ANGLE: f64 = 90.0;

/// Angles below this are legal but almost certainly a mistake.
const SHALLOW_ANGLE: f64 = 10.0;

const SLOTS: [Slot; 2] = [Slot::any("A"), Slot::any("B")];

/// A change of direction.
///
/// `A` faces -Z. `B` leaves the corner at `params.angle` degrees from
/// straight, turning toward +X in the XZ plane. Without a bend radius the
/// arms meet in a spherical hub; with `params.bend_radius` the centre line
/// follows an arc of that radius.
///
/// A full 180 degree return needs a bend radius: a sharp return would fold
/// `B` back onto `A`.
///
/// # Errors
///
/// - [`FittingError::InvalidParameter`] for an angle outside (0, 180], a
///   sharp 180 degree return, or a non-positive bend radius
/// - end errors from resolving `ends`
///
/// # Example
///
/// ```
/// use pipe_fittings::{elbow, FittingConfig, FittingParams};
/// use pipe_spec::SpecQuery;
///
/// let spec = SpecQuery::new(40).dn("DN20").find().unwrap();
/// let model = elbow(&spec, &[], &FittingParams::default(), &FittingConfig::default()).unwrap();
/// let b = model.anchor("B").unwrap().direction();
/// assert!((b.x - 1.0).abs() < 1e-9);
/// ```
pub fn elbow(
    spec: &PipeSpec,
    ends: &[Option<EndpointType>],
    params: &FittingParams,
    config: &FittingConfig,
) -> FittingResult<FittingModel> {
    let ends = resolve_ends(FittingKind::Elbow, &SLOTS, ends)?;

    let angle = params.angle.unwrap_or(DEFAULT_ELBOW_ANGLE);
    if !(angle > 0.0 && angle <= 180.0) {
        return Err(FittingError::invalid(
            "angle",
            format!("must be in (0, 180] degrees, got {angle}"),
        ));
    }
    if angle < SHALLOW_ANGLE {
        warn!(angle, "very shallow elbow");
    }

    if angle >= 180.0 && params.bend_radius.is_none() {
        return Err(FittingError::invalid(
            "angle",
            "a 180 degree return needs a bend_radius",
        ));
    }

    let hub = hub_diameter(spec, &ends);
    let arm_length = params.arm_length.unwrap_or(hub / 2.0);
    let theta = angle.to_radians();
    let direction = Vector3::new(theta.sin(), 0.0, theta.cos());

    let mut composer = Composer::new(FittingKind::Elbow);
    let a = PartComponent::new(spec, ends[0], Some(arm_length), config)?.oriented("down")?;
    let b = PartComponent::new(spec, ends[1], Some(arm_length), config)?.pointed(&direction);

    let b = if let Some(radius) = params.bend_radius {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(FittingError::invalid(
                "bend_radius",
                format!("must be positive, got {radius}"),
            ));
        }
        if radius < hub / 2.0 {
            warn!(radius, body_radius = hub / 2.0, "bend radius tighter than the body");
        }

        composer.body(Solid::arc_sweep(radius, hub, theta));
        composer.negative(Solid::arc_sweep(radius, spec.inner_diameter(), theta));
        let end = Vector3::new(radius - radius * theta.cos(), 0.0, radius * theta.sin());
        b.translated(end)
    } else {
        // Tip faces closer than one body width overlap each other.
        let reach = arm_length + spec.thread_length();
        let gap = 2.0 * reach * (theta / 2.0).cos();
        if gap < hub {
            warn!(angle, gap, body_diameter = hub, "elbow ends overlap");
        }
        composer.body(Solid::sphere(hub));
        composer.negative(Solid::sphere(spec.inner_diameter()));
        b
    };

    composer.arm("A", &a);
    composer.arm("B", &b);
    Ok(composer.finish(spec.label()))
}
