//! Flanges.

use std::f64::consts::PI;

use nalgebra::{Point3, Vector3};
use pipe_geometry::{Anchor, Solid};
use pipe_spec::PipeSpec;
use tracing::debug;

use super::{Composer, FittingParams, Slot, hub_diameter, resolve_ends};
use crate::component::PartComponent;
use crate::config::FittingConfig;
use crate::endpoint::EndpointType;
use crate::error::{FittingError, FittingResult};
use crate::kind::FittingKind;
use crate::model::FittingModel;

const SLOTS: [Slot; 1] = [Slot::any("A")];

/// Default plate thickness, in walls.
const PLATE_WALLS: f64 = 2.0;

/// A pipe end `A` (-Z) under a bolted plate.
///
/// The plate is twice the hub diameter across and, unless
/// `params.length` says otherwise, two walls thick. Bolt holes sit on a
/// circle midway between hub and rim, offset half a step from +X so no
/// hole lines up with a principal axis. The plate face carries anchor
/// `B` (+Z), which is not a pipe connection.
///
/// # Errors
///
/// - [`FittingError::InvalidParameter`] for a plate thickness that is not
///   positive
/// - end errors from resolving `ends`
pub fn flange(
    spec: &PipeSpec,
    ends: &[Option<EndpointType>],
    params: &FittingParams,
    config: &FittingConfig,
) -> FittingResult<FittingModel> {
    let ends = resolve_ends(FittingKind::Flange, &SLOTS, ends)?;

    let thickness = params.length.unwrap_or(PLATE_WALLS * spec.wall());
    if !(thickness.is_finite() && thickness > 0.0) {
        return Err(FittingError::invalid(
            "length",
            format!("plate thickness must be positive, got {thickness}"),
        ));
    }

    let hub = hub_diameter(spec, &ends);
    let disc = 2.0 * hub;
    let holes = params.bolt_holes.unwrap_or(config.flange_bolt_holes);
    let bolt_radius = (disc + hub) / 4.0;
    let hole_diameter = (disc - hub) / 4.0;
    debug!(holes, bolt_radius, hole_diameter, "flange bolt pattern");

    let overshoot = config.bore_overshoot;
    let through = thickness + 2.0 * overshoot;
    let arm = PartComponent::new(spec, ends[0], params.arm_length, config)?.oriented("down")?;

    let mut composer = Composer::new(FittingKind::Flange);
    composer.body(Solid::cylinder(thickness, disc));
    composer.negative(
        Solid::cylinder(through, spec.inner_diameter()).translated(Vector3::new(0.0, 0.0, -overshoot)),
    );
    for k in 0..holes {
        let angle = 2.0 * PI * f64::from(k) / f64::from(holes) + PI / f64::from(holes);
        composer.negative(Solid::cylinder(through, hole_diameter).translated(Vector3::new(
            bolt_radius * angle.cos(),
            bolt_radius * angle.sin(),
            -overshoot,
        )));
    }
    composer.arm("A", &arm);
    composer.anchor(Anchor::new(
        "B",
        Point3::new(0.0, 0.0, thickness),
        Vector3::z(),
    ));

    Ok(composer.finish(spec.label()))
}
