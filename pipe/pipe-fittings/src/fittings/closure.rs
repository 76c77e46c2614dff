//! Parts that close an end: caps and plugs.

use nalgebra::Vector3;
use pipe_geometry::Solid;
use pipe_spec::PipeSpec;

use super::{Composer, FittingParams, Slot, resolve_ends};
use crate::component::PartComponent;
use crate::config::FittingConfig;
use crate::endpoint::EndpointType;
use crate::error::FittingResult;
use crate::kind::FittingKind;
use crate::model::FittingModel;

/// Closed end thickness, in walls.
const CLOSURE_WALLS: f64 = 2.0;

const CAP: [Slot; 1] = [Slot::only(
    "A",
    &[EndpointType::FemaleThread, EndpointType::Socket],
    EndpointType::Socket,
)];

const PLUG: [Slot; 1] = [Slot::only(
    "A",
    &[EndpointType::MaleThread, EndpointType::Spigot],
    EndpointType::Spigot,
)];

/// Closes a pipe end from outside.
///
/// The opening `A` faces -Z; a solid top closes the other side. Caps take
/// a socket (the default) or a female thread.
///
/// # Errors
///
/// [`FittingError::InvalidEndpointForPart`](crate::FittingError::InvalidEndpointForPart)
/// for any other end, and
/// [`FittingError::TooManyEnds`](crate::FittingError::TooManyEnds) for more
/// than one.
///
/// # Example
///
/// ```
/// use pipe_fittings::{cap, EndpointType, FittingConfig, FittingError, FittingParams};
/// use pipe_spec::SpecQuery;
///
/// let spec = SpecQuery::new(40).dn("DN20").find().unwrap();
/// let err = cap(
///     &spec,
///     &[Some(EndpointType::Spigot)],
///     &FittingParams::default(),
///     &FittingConfig::default(),
/// )
/// .unwrap_err();
/// assert!(matches!(err, FittingError::InvalidEndpointForPart { .. }));
/// ```
pub fn cap(
    spec: &PipeSpec,
    ends: &[Option<EndpointType>],
    _params: &FittingParams,
    config: &FittingConfig,
) -> FittingResult<FittingModel> {
    let ends = resolve_ends(FittingKind::Cap, &CAP, ends)?;
    let end = PartComponent::new(spec, ends[0], Some(0.0), config)?.oriented("down")?;

    let mut composer = Composer::new(FittingKind::Cap);
    composer.body(Solid::cylinder(CLOSURE_WALLS * spec.wall(), end.body_diameter()));
    composer.arm("A", &end);
    Ok(composer.finish(spec.label()))
}

/// Closes a fitting end from inside.
///
/// The inserted end `A` faces -Z under a head as wide as a socket. Plugs
/// take a spigot (the default) or a male thread.
///
/// # Errors
///
/// As [`cap`].
pub fn plug(
    spec: &PipeSpec,
    ends: &[Option<EndpointType>],
    _params: &FittingParams,
    config: &FittingConfig,
) -> FittingResult<FittingModel> {
    let ends = resolve_ends(FittingKind::Plug, &PLUG, ends)?;
    let end = PartComponent::new(spec, ends[0], Some(0.0), config)?.oriented("down")?;

    let mut composer = Composer::new(FittingKind::Plug);
    let head = CLOSURE_WALLS * spec.wall();
    composer.body(Solid::cylinder(head, spec.socket_outer_diameter()));
    // The connector tube is hollow. The fill goes in with the connectors so
    // the bore cut does not remove it.
    composer.positive(
        Solid::cylinder(end.total_length(), spec.inner_diameter())
            .translated(Vector3::new(0.0, 0.0, -end.total_length())),
    );
    composer.arm("A", &end);
    Ok(composer.finish(spec.label()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FittingError;
    use approx::assert_relative_eq;
    use pipe_spec::SpecQuery;

    fn dn20() -> PipeSpec {
        SpecQuery::new(40).dn("DN20").find().unwrap()
    }

    #[test]
    fn test_cap_defaults_to_socket() {
        let model = cap(&dn20(), &[], &FittingParams::default(), &FittingConfig::default()).unwrap();
        assert_eq!(model.ports().len(), 1);
        assert_eq!(model.port("A").unwrap().endpoint, EndpointType::Socket);
        let a = model.anchor("A").unwrap();
        assert_relative_eq!(a.direction(), -Vector3::z(), epsilon = 1e-9);
        assert_relative_eq!(a.position().z, -dn20().thread_length(), epsilon = 1e-9);
    }

    #[test]
    fn test_cap_top_is_closed() {
        let spec = dn20();
        let model = cap(&spec, &[], &FittingParams::default(), &FittingConfig::default()).unwrap();
        let b = model.bounds();
        assert_relative_eq!(b.max.z, 2.0 * spec.wall(), epsilon = 1e-9);
    }

    #[test]
    fn test_cap_end_restrictions() {
        let config = FittingConfig::default();
        let params = FittingParams::default();
        for bad in [EndpointType::Spigot, EndpointType::MaleThread, EndpointType::InnerSpigot] {
            let err = cap(&dn20(), &[Some(bad)], &params, &config).unwrap_err();
            assert!(matches!(err, FittingError::InvalidEndpointForPart { .. }), "{bad}");
        }
        assert!(cap(&dn20(), &[Some(EndpointType::FemaleThread)], &params, &config).is_ok());
        let err = cap(&dn20(), &[None, None], &params, &config).unwrap_err();
        assert!(matches!(err, FittingError::TooManyEnds { .. }));
    }

    #[test]
    fn test_plug_defaults_to_spigot() {
        let model = plug(&dn20(), &[], &FittingParams::default(), &FittingConfig::default()).unwrap();
        assert_eq!(model.port("A").unwrap().endpoint, EndpointType::Spigot);
    }

    #[test]
    fn test_plug_end_restrictions() {
        let config = FittingConfig::default();
        let params = FittingParams::default();
        for bad in [EndpointType::Socket, EndpointType::FemaleThread] {
            let err = plug(&dn20(), &[Some(bad)], &params, &config).unwrap_err();
            assert!(matches!(err, FittingError::InvalidEndpointForPart { .. }), "{bad}");
        }
        assert!(plug(&dn20(), &[Some(EndpointType::MaleThread)], &params, &config).is_ok());
    }

    #[test]
    fn test_plug_head_width() {
        let spec = dn20();
        let model = plug(&spec, &[], &FittingParams::default(), &FittingConfig::default()).unwrap();
        assert_relative_eq!(model.bounds().max.x, spec.socket_outer_diameter() / 2.0, epsilon = 1e-9);
    }
}
