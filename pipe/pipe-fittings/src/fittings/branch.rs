//! Branching parts built around a spherical hub.

use nalgebra::Vector3;
use pipe_geometry::Solid;
use pipe_spec::PipeSpec;

use super::{Composer, FittingParams, Slot, hub_diameter, resolve_ends};
use crate::component::PartComponent;
use crate::config::FittingConfig;
use crate::endpoint::EndpointType;
use crate::error::{FittingError, FittingResult};
use crate::kind::FittingKind;
use crate::model::FittingModel;

/// Wye branch angle when the request gives none, in degrees.
pub const DEFAULT_BRANCH_ANGLE: f64 = 45.0;

/// One arm of a hub part.
struct Outlet {
    anchor: &'static str,
    direction: Vector3<f64>,
    /// Default arm length as a multiple of the hub radius.
    reach: f64,
}

impl Outlet {
    fn new(anchor: &'static str, direction: Vector3<f64>) -> Self {
        Self {
            anchor,
            direction,
            reach: 1.0,
        }
    }
}

fn assemble(
    kind: FittingKind,
    spec: &PipeSpec,
    outlets: &[Outlet],
    ends: &[Option<EndpointType>],
    params: &FittingParams,
    config: &FittingConfig,
) -> FittingResult<FittingModel> {
    let slots: Vec<Slot> = outlets.iter().map(|o| Slot::any(o.anchor)).collect();
    let ends = resolve_ends(kind, &slots, ends)?;

    let hub = hub_diameter(spec, &ends);
    let mut composer = Composer::new(kind);
    composer.body(Solid::sphere(hub));
    composer.negative(Solid::sphere(spec.inner_diameter()));

    for (outlet, end) in outlets.iter().zip(&ends) {
        let length = params.arm_length.unwrap_or(hub / 2.0 * outlet.reach);
        let arm = PartComponent::new(spec, *end, Some(length), config)?.pointed(&outlet.direction);
        composer.arm(outlet.anchor, &arm);
    }
    Ok(composer.finish(spec.label()))
}

/// Straight run `A` (-Z) to `B` (+Z) with branch `C` on +X.
///
/// # Errors
///
/// End errors from resolving `ends`.
///
/// # Example
///
/// ```
/// use pipe_fittings::{tee, EndpointType, FittingConfig, FittingParams};
/// use pipe_spec::SpecQuery;
///
/// let spec = SpecQuery::new(40).dn("DN20").find().unwrap();
/// let model = tee(
///     &spec,
///     &[None, None, Some(EndpointType::FemaleThread)],
///     &FittingParams::default(),
///     &FittingConfig::default(),
/// )
/// .unwrap();
/// assert_eq!(model.port("C").unwrap().endpoint, EndpointType::FemaleThread);
/// ```
pub fn tee(
    spec: &PipeSpec,
    ends: &[Option<EndpointType>],
    params: &FittingParams,
    config: &FittingConfig,
) -> FittingResult<FittingModel> {
    let outlets = [
        Outlet::new("A", -Vector3::z()),
        Outlet::new("B", Vector3::z()),
        Outlet::new("C", Vector3::x()),
    ];
    assemble(FittingKind::Tee, spec, &outlets, ends, params, config)
}

/// Straight run `A` to `B` with branch `C` leaning `params.branch_angle`
/// degrees from +Z toward +X.
///
/// The branch arm is lengthened so its end clears the run.
///
/// # Errors
///
/// - [`FittingError::InvalidParameter`] for a branch angle outside (0, 180)
/// - end errors from resolving `ends`
pub fn wye(
    spec: &PipeSpec,
    ends: &[Option<EndpointType>],
    params: &FittingParams,
    config: &FittingConfig,
) -> FittingResult<FittingModel> {
    let angle = params.branch_angle.unwrap_or(DEFAULT_BRANCH_ANGLE);
    if !(angle > 0.0 && angle < 180.0) {
        return Err(FittingError::invalid(
            "branch_angle",
            format!("must be in (0, 180) degrees, got {angle}"),
        ));
    }

    let beta = angle.to_radians();
    let outlets = [
        Outlet::new("A", -Vector3::z()),
        Outlet::new("B", Vector3::z()),
        Outlet {
            anchor: "C",
            direction: Vector3::new(beta.sin(), 0.0, beta.cos()),
            reach: 1.0 / beta.sin(),
        },
    ];
    assemble(FittingKind::Wye, spec, &outlets, ends, params, config)
}

/// Four-way junction: `A` -Z, `B` +Z, `C` +X, `D` -X.
///
/// # Errors
///
/// End errors from resolving `ends`.
pub fn cross(
    spec: &PipeSpec,
    ends: &[Option<EndpointType>],
    params: &FittingParams,
    config: &FittingConfig,
) -> FittingResult<FittingModel> {
    let outlets = [
        Outlet::new("A", -Vector3::z()),
        Outlet::new("B", Vector3::z()),
        Outlet::new("C", Vector3::x()),
        Outlet::new("D", -Vector3::x()),
    ];
    assemble(FittingKind::Cross, spec, &outlets, ends, params, config)
}

/// Three perpendicular outlets: `A` +X, `B` +Y, `C` +Z.
///
/// # Errors
///
/// End errors from resolving `ends`.
pub fn corner(
    spec: &PipeSpec,
    ends: &[Option<EndpointType>],
    params: &FittingParams,
    config: &FittingConfig,
) -> FittingResult<FittingModel> {
    let outlets = [
        Outlet::new("A", Vector3::x()),
        Outlet::new("B", Vector3::y()),
        Outlet::new("C", Vector3::z()),
    ];
    assemble(FittingKind::Corner, spec, &outlets, ends, params, config)
}

/// Tee with a side outlet: `A` -Z, `B` +Z, `C` +X, `D` +Y.
///
/// # Errors
///
/// End errors from resolving `ends`.
pub fn side_outlet_tee(
    spec: &PipeSpec,
    ends: &[Option<EndpointType>],
    params: &FittingParams,
    config: &FittingConfig,
) -> FittingResult<FittingModel> {
    let outlets = [
        Outlet::new("A", -Vector3::z()),
        Outlet::new("B", Vector3::z()),
        Outlet::new("C", Vector3::x()),
        Outlet::new("D", Vector3::y()),
    ];
    assemble(FittingKind::SideOutletTee, spec, &outlets, ends, params, config)
}

/// Outlets on every axis: `A` -Z, `B` +Z, `C` +X, `D` -X, `E` +Y, `F` -Y.
///
/// # Errors
///
/// End errors from resolving `ends`.
pub fn six_way(
    spec: &PipeSpec,
    ends: &[Option<EndpointType>],
    params: &FittingParams,
    config: &FittingConfig,
) -> FittingResult<FittingModel> {
    let outlets = [
        Outlet::new("A", -Vector3::z()),
        Outlet::new("B", Vector3::z()),
        Outlet::new("C", Vector3::x()),
        Outlet::new("D", -Vector3::x()),
        Outlet::new("E", Vector3::y()),
        Outlet::new("F", -Vector3::y()),
    ];
    assemble(FittingKind::SixWay, spec, &outlets, ends, params, config)
}
