//! Two-size parts: adapters and bushings.

use nalgebra::{Point3, Vector3};
use pipe_geometry::{Anchor, Solid};
use pipe_spec::PipeSpec;
use tracing::debug;

use super::{Composer, FittingParams, Slot, resolve_ends};
use crate::component::PartComponent;
use crate::config::FittingConfig;
use crate::endpoint::{EndpointType, endpoint};
use crate::error::{FittingError, FittingResult, check_length};
use crate::kind::FittingKind;
use crate::model::FittingModel;

const ADAPTER: [Slot; 2] = [Slot::any("A"), Slot::any("B")];

const BUSHING: [Slot; 2] = [
    Slot::only(
        "A",
        &[EndpointType::Spigot, EndpointType::MaleThread],
        EndpointType::Spigot,
    ),
    Slot::only(
        "B",
        &[EndpointType::Socket, EndpointType::FemaleThread],
        EndpointType::Socket,
    ),
];

/// Bushing head height, in walls of the larger size.
const HEAD_WALLS: f64 = 2.0;

fn pair_label(a: &PipeSpec, b: &PipeSpec) -> String {
    format!("{} x {}", a.label(), b.label())
}

/// Joins `spec_a` at `A` (-Z) to `spec_b` at `B` (+Z) through a conical
/// transition.
///
/// `params.length` sets the transition length; by default it equals the
/// difference in outer diameters (at least one wall), which gives a 45°
/// taper. The sizes may be equal, for an adapter that only changes the
/// end type.
///
/// # Errors
///
/// - [`FittingError::Spec`] if either spec has invalid dimensions
/// - [`FittingError::NegativeLength`] for a negative transition
/// - end errors from resolving `ends`
///
/// # Example
///
/// ```
/// use pipe_fittings::{adapter, EndpointType, FittingConfig, FittingParams};
/// use pipe_spec::SpecQuery;
///
/// let one = SpecQuery::new(40).dn("DN25").find().unwrap();
/// let three_quarter = SpecQuery::new(40).dn("DN20").find().unwrap();
/// let model = adapter(
///     &one,
///     &three_quarter,
///     &[Some(EndpointType::FemaleThread), Some(EndpointType::Socket)],
///     &FittingParams::default(),
///     &FittingConfig::default(),
/// )
/// .unwrap();
/// assert_eq!(model.port("A").unwrap().spec, one);
/// assert_eq!(model.port("B").unwrap().spec, three_quarter);
/// ```
pub fn adapter(
    spec_a: &PipeSpec,
    spec_b: &PipeSpec,
    ends: &[Option<EndpointType>],
    params: &FittingParams,
    config: &FittingConfig,
) -> FittingResult<FittingModel> {
    spec_a.validate()?;
    spec_b.validate()?;
    let ends = resolve_ends(FittingKind::Adapter, &ADAPTER, ends)?;

    let transition = params.length.unwrap_or_else(|| {
        (spec_a.od() - spec_b.od())
            .abs()
            .max(spec_a.wall().max(spec_b.wall()))
    });
    let transition = check_length("transition", transition)?;

    let a = PartComponent::new(spec_a, ends[0], params.arm_length, config)?.oriented("down")?;
    let b = PartComponent::new(spec_b, ends[1], params.arm_length, config)?
        .oriented("up")?
        .translated(Vector3::new(0.0, 0.0, transition));

    let mut composer = Composer::new(FittingKind::Adapter);
    if transition > 0.0 {
        let overshoot = config.bore_overshoot;
        composer.body(Solid::frustum(transition, a.body_diameter(), b.body_diameter()));
        composer.negative(
            Solid::frustum(
                transition + 2.0 * overshoot,
                spec_a.inner_diameter(),
                spec_b.inner_diameter(),
            )
            .translated(Vector3::new(0.0, 0.0, -overshoot)),
        );
    }
    composer.arm("A", &a);
    composer.arm("B", &b);
    Ok(composer.finish(pair_label(spec_a, spec_b)))
}

/// Check two sizes can nest, returning `(larger, smaller)`.
///
/// Which size is larger is decided by outer diameter, whatever the
/// argument order.
fn nest<'a>(first: &'a PipeSpec, second: &'a PipeSpec) -> FittingResult<(&'a PipeSpec, &'a PipeSpec)> {
    let incompatible = |reason: String| FittingError::IncompatibleSizes {
        first: first.label(),
        second: second.label(),
        reason,
    };

    #[allow(clippy::float_cmp)] // equal table values are exactly equal
    {
        if first.od() == second.od() {
            return Err(incompatible(format!("outer diameters are both {}", first.od())));
        }
        if first.inner_diameter() == second.inner_diameter() {
            return Err(incompatible(format!(
                "inner diameters are both {}",
                first.inner_diameter()
            )));
        }
    }

    let (larger, smaller) = if first.od() > second.od() {
        (first, second)
    } else {
        (second, first)
    };
    if larger.inner_diameter() <= smaller.od() {
        return Err(incompatible(format!(
            "inner diameter {} of {} does not clear outer diameter {} of {}",
            larger.inner_diameter(),
            larger.label(),
            smaller.od(),
            smaller.label()
        )));
    }
    Ok((larger, smaller))
}

/// A reducer that fits inside a larger fitting.
///
/// The larger size forms the outer end `A` (-Z), spigot or male thread,
/// under a head as wide as its socket. The smaller size is received at
/// `B` (+Z) by a socket or female thread sunk into the body, flush with
/// the top of the head.
///
/// # Errors
///
/// - [`FittingError::Spec`] if either spec has invalid dimensions
/// - [`FittingError::IncompatibleSizes`] if the outer diameters are equal,
///   the inner diameters are equal, or the smaller size does not fit
///   inside the larger one's bore
/// - end errors from resolving `ends`
pub fn bushing(
    first: &PipeSpec,
    second: &PipeSpec,
    ends: &[Option<EndpointType>],
    _params: &FittingParams,
    config: &FittingConfig,
) -> FittingResult<FittingModel> {
    first.validate()?;
    second.validate()?;
    let (larger, smaller) = nest(first, second)?;
    let ends = resolve_ends(FittingKind::Bushing, &BUSHING, ends)?;
    debug!(larger = %larger.label(), smaller = %smaller.label(), "bushing orientation");

    let overshoot = config.bore_overshoot;
    let head = HEAD_WALLS * larger.wall();
    let outer = PartComponent::new(larger, ends[0], Some(0.0), config)?.oriented("down")?;
    let depth = outer.total_length();

    let inner_length = smaller.thread_length().min(depth + head - smaller.wall());
    let inner = endpoint(smaller, ends[1], Some(inner_length), config)?;
    let seat = Vector3::new(0.0, 0.0, head - inner_length);

    let mut composer = Composer::new(FittingKind::Bushing);
    composer.body(Solid::cylinder(head, larger.socket_outer_diameter()));
    // Solid core inside the outer connector, reaching its thread root.
    composer.body(
        Solid::cylinder(depth, larger.inner_diameter() + larger.wall())
            .translated(Vector3::new(0.0, 0.0, -depth)),
    );
    composer.negative(
        Solid::cylinder(depth + head + 2.0 * overshoot, smaller.inner_diameter())
            .translated(Vector3::new(0.0, 0.0, -depth - overshoot)),
    );
    composer.negative(inner.negative.clone().translated(seat));

    // The outer connector's own bore is not cut: the core fills it.
    composer.positive(outer.positive());
    composer.port("A", outer.tip().renamed("A"), ends[0], larger);

    composer.positive(inner.positive.clone().translated(seat));
    composer.port(
        "B",
        Anchor::new("B", Point3::new(0.0, 0.0, head), Vector3::z()),
        ends[1],
        smaller,
    );

    Ok(composer.finish(pair_label(larger, smaller)))
}
