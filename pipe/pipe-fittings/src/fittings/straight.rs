//! Straight-through parts: pipe, nipple, coupling.

use nalgebra::Vector3;
use pipe_geometry::Solid;
use pipe_spec::PipeSpec;

use super::{Composer, FittingParams, Slot, hub_diameter, resolve_ends};
use crate::component::PartComponent;
use crate::config::FittingConfig;
use crate::endpoint::EndpointType;
use crate::error::{FittingError, FittingResult, check_length};
use crate::kind::FittingKind;
use crate::model::FittingModel;

/// Pipe length when the request gives none, in mm.
pub const DEFAULT_PIPE_LENGTH: f64 = 100.0;

const RUN: [Slot; 2] = [Slot::any("A"), Slot::any("B")];

const NIPPLE: [Slot; 2] = [
    Slot::only(
        "A",
        &[EndpointType::MaleThread, EndpointType::Spigot],
        EndpointType::MaleThread,
    ),
    Slot::only(
        "B",
        &[EndpointType::MaleThread, EndpointType::Spigot],
        EndpointType::MaleThread,
    ),
];

/// A straight pipe, `A` at the bottom and `B` at the top.
///
/// `params.length` is the overall length, 100 mm by default, centred on
/// the origin.
///
/// # Errors
///
/// - [`FittingError::NegativeLength`] for a negative length
/// - [`FittingError::InvalidParameter`] if the length cannot hold both ends
/// - end errors from resolving `ends`
///
/// # Example
///
/// ```
/// use pipe_fittings::{pipe, EndpointType, FittingConfig, FittingParams};
/// use pipe_spec::SpecQuery;
///
/// let spec = SpecQuery::new(40).dn("DN20").find().unwrap();
/// let model = pipe(
///     &spec,
///     &[Some(EndpointType::Spigot), Some(EndpointType::Spigot)],
///     &FittingParams::default().with_length(250.0),
///     &FittingConfig::default(),
/// )
/// .unwrap();
/// let a = model.anchor("A").unwrap().position();
/// let b = model.anchor("B").unwrap().position();
/// assert!(((b - a).norm() - 250.0).abs() < 1e-9);
/// ```
pub fn pipe(
    spec: &PipeSpec,
    ends: &[Option<EndpointType>],
    params: &FittingParams,
    config: &FittingConfig,
) -> FittingResult<FittingModel> {
    let ends = resolve_ends(FittingKind::Pipe, &RUN, ends)?;
    let length = params.length.unwrap_or(DEFAULT_PIPE_LENGTH);
    run(FittingKind::Pipe, spec, &ends, length, config)
}

/// A short pipe threaded at both ends.
///
/// Ends may be male thread (the default) or spigot. The default overall
/// length is two thread lengths plus half the outer diameter.
///
/// # Errors
///
/// As [`pipe`], plus [`FittingError::InvalidEndpointForPart`] for receiving
/// ends.
pub fn nipple(
    spec: &PipeSpec,
    ends: &[Option<EndpointType>],
    params: &FittingParams,
    config: &FittingConfig,
) -> FittingResult<FittingModel> {
    let ends = resolve_ends(FittingKind::Nipple, &NIPPLE, ends)?;
    let length = params
        .length
        .unwrap_or_else(|| 2.0 * spec.thread_length() + spec.od() / 2.0);
    run(FittingKind::Nipple, spec, &ends, length, config)
}

fn run(
    kind: FittingKind,
    spec: &PipeSpec,
    ends: &[EndpointType],
    length: f64,
    config: &FittingConfig,
) -> FittingResult<FittingModel> {
    let length = check_length("overall", length)?;

    let end_length = spec.thread_length();
    let segment = length / 2.0 - end_length;
    if segment < 0.0 {
        return Err(FittingError::invalid(
            "length",
            format!("{length} mm cannot hold two {end_length} mm ends"),
        ));
    }

    let mut composer = Composer::new(kind);
    for ((name, direction), end) in [("A", "down"), ("B", "up")].into_iter().zip(ends) {
        let arm = PartComponent::new(spec, *end, Some(segment), config)?.oriented(direction)?;
        composer.arm(name, &arm);
    }
    Ok(composer.finish(spec.label()))
}

/// Joins two pipes of the same size end to end.
///
/// Both ends are endpoint-only, separated by a stop ring one wall thick
/// that the inserted pipes butt against.
///
/// # Errors
///
/// End errors from resolving `ends`.
pub fn coupling(
    spec: &PipeSpec,
    ends: &[Option<EndpointType>],
    _params: &FittingParams,
    config: &FittingConfig,
) -> FittingResult<FittingModel> {
    let ends = resolve_ends(FittingKind::Coupling, &RUN, ends)?;
    let ring = spec.wall();
    let half = ring / 2.0;

    let mut composer = Composer::new(FittingKind::Coupling);
    composer.body(
        Solid::tube(ring, hub_diameter(spec, &ends), spec.inner_diameter())
            .translated(Vector3::new(0.0, 0.0, -half)),
    );

    for ((name, direction, offset), end) in [("A", "down", -half), ("B", "up", half)]
        .into_iter()
        .zip(&ends)
    {
        let arm = PartComponent::new(spec, *end, Some(0.0), config)?
            .oriented(direction)?
            .translated(Vector3::new(0.0, 0.0, offset));
        composer.arm(name, &arm);
    }
    Ok(composer.finish(spec.label()))
}
