//! Connection endpoints.
//!
//! An endpoint is the part of a fitting that joins another part: a plain
//! spigot, a socket that receives one, or a threaded end. Each endpoint
//! contributes two solids:
//!
//! - a **positive** solid, the connector material, added last
//! - a **negative** bore, removed from every body the endpoint sits in
//!
//! All endpoint geometry is built on the canonical axis: base on z = 0,
//! connection face on z = length, opening toward +Z.
//!
//! | Type | Positive | Negative |
//! |------|----------|----------|
//! | spigot | tube `od` / `wall` | cylinder `id` |
//! | inner spigot | tube outside `id`, `wall` | cylinder `id` |
//! | socket | tube inside `od`, `wall / 3` | cylinder `od` |
//! | male thread | thread on `id + wall`, depth `wall / 2`, bored `id` | cylinder `od - wall - clearance` |
//! | female thread | tube `od` / `wall`, grooved from `id` outward | cylinder `od` |

use std::fmt;
use std::str::FromStr;

use nalgebra::{Point3, Vector3};
use pipe_geometry::{Anchor, Solid, ThreadProfile};
use pipe_spec::PipeSpec;
use tracing::debug;

use crate::config::FittingConfig;
use crate::error::{FittingError, FittingResult, check_length};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of connection at one end of a fitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EndpointType {
    /// Plain pipe end that slides into a socket.
    Spigot,
    /// Spigot sized to slide inside a pipe bore.
    InnerSpigot,
    /// Sleeve that receives a spigot.
    Socket,
    /// External pipe thread (MIPT).
    MaleThread,
    /// Internal pipe thread (FIPT).
    FemaleThread,
}

impl EndpointType {
    /// Every endpoint type.
    pub const ALL: [Self; 5] = [
        Self::Spigot,
        Self::InnerSpigot,
        Self::Socket,
        Self::MaleThread,
        Self::FemaleThread,
    ];

    /// Canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spigot => "spigot",
            Self::InnerSpigot => "inner_spigot",
            Self::Socket => "socket",
            Self::MaleThread => "male_thread",
            Self::FemaleThread => "female_thread",
        }
    }

    /// Whether the end receives its mate (socket or female thread).
    #[must_use]
    pub const fn is_receiving(self) -> bool {
        matches!(self, Self::Socket | Self::FemaleThread)
    }

    /// Whether this end joins `other`.
    ///
    /// ```
    /// use pipe_fittings::EndpointType;
    ///
    /// assert!(EndpointType::Spigot.mates_with(EndpointType::Socket));
    /// assert!(!EndpointType::Socket.mates_with(EndpointType::Socket));
    /// ```
    #[must_use]
    pub const fn mates_with(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Spigot, Self::Socket)
                | (Self::Socket, Self::Spigot)
                | (Self::MaleThread, Self::FemaleThread)
                | (Self::FemaleThread, Self::MaleThread)
                | (Self::InnerSpigot, Self::Spigot)
                | (Self::Spigot, Self::InnerSpigot)
        )
    }

    /// Outside diameter of the segment behind an end of this type.
    ///
    /// Receiving ends sit on a segment as wide as the socket so the
    /// sleeve has material to stand on.
    #[must_use]
    pub fn body_diameter(self, spec: &PipeSpec) -> f64 {
        if self.is_receiving() {
            spec.socket_outer_diameter()
        } else {
            spec.od()
        }
    }
}

impl fmt::Display for EndpointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndpointType {
    type Err = FittingError;

    /// Parses canonical names and the trade abbreviations `mipt` / `fipt`,
    /// ignoring case and treating `-` like `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "spigot" => Ok(Self::Spigot),
            "inner_spigot" => Ok(Self::InnerSpigot),
            "socket" => Ok(Self::Socket),
            "mipt" | "male_thread" | "male" => Ok(Self::MaleThread),
            "fipt" | "female_thread" | "female" => Ok(Self::FemaleThread),
            _ => Err(FittingError::UnknownEndpointType {
                name: s.to_string(),
            }),
        }
    }
}

/// The geometry of one endpoint on the canonical axis.
///
/// Carries two anchors: `base` (z = 0, facing -Z) where the endpoint meets
/// its segment, and `face` (z = length, facing +Z) where the mate joins.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointGeometry {
    /// The endpoint type.
    pub endpoint_type: EndpointType,
    /// Axial length from base to face.
    pub length: f64,
    /// Connector material.
    pub positive: Solid,
    /// Bore removed from surrounding bodies.
    pub negative: Solid,
    /// `base` and `face` anchors.
    pub anchors: Vec<Anchor>,
}

impl EndpointGeometry {
    /// Look up an anchor by name.
    #[must_use]
    pub fn anchor(&self, name: &str) -> Option<&Anchor> {
        self.anchors.iter().find(|a| a.name() == name)
    }
}

/// Build the endpoint of `endpoint_type` for `spec`.
///
/// `length` defaults to the spec's thread length. A zero length yields
/// empty solids.
///
/// # Errors
///
/// - [`FittingError::Spec`] if `spec` has invalid dimensions
/// - [`FittingError::InvalidParameter`] for an invalid `config` or a
///   non-finite length
/// - [`FittingError::NegativeLength`] for a negative length
///
/// # Example
///
/// ```
/// use pipe_fittings::{endpoint, EndpointType, FittingConfig};
/// use pipe_spec::SpecQuery;
///
/// let spec = SpecQuery::new(40).dn("DN20").find().unwrap();
/// let end = endpoint(&spec, EndpointType::Socket, None, &FittingConfig::default()).unwrap();
/// assert!((end.length - spec.thread_length()).abs() < 1e-12);
/// assert!(end.anchor("face").is_some());
/// ```
pub fn endpoint(
    spec: &PipeSpec,
    endpoint_type: EndpointType,
    length: Option<f64>,
    config: &FittingConfig,
) -> FittingResult<EndpointGeometry> {
    config.validate()?;
    spec.validate()?;
    let length = check_length("endpoint", length.unwrap_or_else(|| spec.thread_length()))?;

    let (positive, negative) = if length > 0.0 {
        (
            positive(spec, endpoint_type, length, config),
            negative(spec, endpoint_type, length, config),
        )
    } else {
        (Solid::Empty, Solid::Empty)
    };

    debug!(
        spec = %spec.label(),
        endpoint = %endpoint_type,
        length,
        "built endpoint"
    );

    Ok(EndpointGeometry {
        endpoint_type,
        length,
        positive,
        negative,
        anchors: vec![
            Anchor::new("base", Point3::origin(), -Vector3::z()),
            Anchor::new("face", Point3::new(0.0, 0.0, length), Vector3::z()),
        ],
    })
}

fn positive(spec: &PipeSpec, endpoint_type: EndpointType, length: f64, config: &FittingConfig) -> Solid {
    let od = spec.od();
    let id = spec.inner_diameter();
    let wall = spec.wall();
    let overshoot = config.bore_overshoot;

    match endpoint_type {
        EndpointType::Spigot => Solid::tube(length, od, id),
        EndpointType::InnerSpigot => Solid::tube(length, id, id - 2.0 * wall),
        EndpointType::Socket => {
            // Reaches back over the segment so the sleeve is fused to it.
            let overlap = config.socket_overlap;
            Solid::tube(length + overlap, od + 2.0 * wall / 3.0, od)
                .translated(Vector3::new(0.0, 0.0, -overlap))
        }
        EndpointType::MaleThread => {
            let root = id + wall;
            let ridge = Solid::thread(thread_profile(spec, length, root, true, config));
            let core = Solid::cylinder(length, root);
            let bore = Solid::cylinder(length + 2.0 * overshoot, id)
                .translated(Vector3::new(0.0, 0.0, -overshoot));
            ridge.union(core).difference(bore)
        }
        EndpointType::FemaleThread => {
            let groove = Solid::thread(thread_profile(
                spec,
                length + 2.0 * overshoot,
                id + wall,
                false,
                config,
            ))
            .translated(Vector3::new(0.0, 0.0, -overshoot));
            Solid::tube(length, od, id).difference(groove)
        }
    }
}

fn negative(spec: &PipeSpec, endpoint_type: EndpointType, length: f64, config: &FittingConfig) -> Solid {
    let od = spec.od();
    let id = spec.inner_diameter();
    let diameter = match endpoint_type {
        EndpointType::Spigot | EndpointType::InnerSpigot => id,
        EndpointType::Socket | EndpointType::FemaleThread => spec.socket_inner_diameter(),
        EndpointType::MaleThread => od - (od - id) / 2.0 - config.male_thread_clearance,
    };
    // Open past the face; the base side is covered by the segment bore.
    Solid::cylinder(length + config.bore_overshoot, diameter)
}

fn thread_profile(
    spec: &PipeSpec,
    height: f64,
    root_diameter: f64,
    external: bool,
    config: &FittingConfig,
) -> ThreadProfile {
    ThreadProfile {
        height,
        root_diameter,
        depth: spec.wall() / 2.0,
        pitch: spec.thread_pitch(),
        external,
        flank_angle: config.flank_angle_radians(),
        bevel: config.thread_bevel,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pipe_geometry::Primitive;
    use pipe_spec::{SpecError, SpecQuery};

    fn dn20() -> PipeSpec {
        SpecQuery::new(40).dn("DN20").find().unwrap()
    }

    fn build(ty: EndpointType) -> EndpointGeometry {
        endpoint(&dn20(), ty, None, &FittingConfig::default()).unwrap()
    }

    #[test]
    fn test_parse() {
        assert_eq!("spigot".parse::<EndpointType>().unwrap(), EndpointType::Spigot);
        assert_eq!("Inner-Spigot".parse::<EndpointType>().unwrap(), EndpointType::InnerSpigot);
        assert_eq!("MIPT".parse::<EndpointType>().unwrap(), EndpointType::MaleThread);
        assert_eq!("fipt".parse::<EndpointType>().unwrap(), EndpointType::FemaleThread);
        assert_eq!("female_thread".parse::<EndpointType>().unwrap(), EndpointType::FemaleThread);

        let err = "flare".parse::<EndpointType>().unwrap_err();
        assert_eq!(
            err,
            FittingError::UnknownEndpointType {
                name: "flare".into()
            }
        );
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for ty in EndpointType::ALL {
            assert_eq!(ty.to_string().parse::<EndpointType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_mating_is_symmetric() {
        for a in EndpointType::ALL {
            for b in EndpointType::ALL {
                assert_eq!(a.mates_with(b), b.mates_with(a), "{a} / {b}");
            }
        }
        assert!(EndpointType::MaleThread.mates_with(EndpointType::FemaleThread));
        assert!(!EndpointType::MaleThread.mates_with(EndpointType::Socket));
    }

    #[test]
    fn test_spigot_is_plain_tube() {
        let end = build(EndpointType::Spigot);
        let spec = dn20();
        assert_eq!(
            end.positive,
            Solid::Primitive(Primitive::Tube {
                height: spec.thread_length(),
                outer_diameter: 26.7,
                inner_diameter: spec.inner_diameter(),
            })
        );
        let b = end.negative.bounds();
        assert_relative_eq!(b.max.x, spec.inner_diameter() / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_socket_reaches_below_base() {
        let end = build(EndpointType::Socket);
        let b = end.positive.bounds();
        assert_relative_eq!(b.min.z, -1.0, epsilon = 1e-9);
        // wall / 3 sleeve around the pipe's od
        assert_relative_eq!(b.max.x, 26.7 / 2.0 + 2.87 / 3.0, epsilon = 1e-9);
        let n = end.negative.bounds();
        assert_relative_eq!(n.max.x, 26.7 / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_male_thread_bore_and_clearance() {
        let end = build(EndpointType::MaleThread);
        let b = end.positive.bounds();
        // ridge tops out at the pipe od
        assert_relative_eq!(b.max.x, 26.7 / 2.0, epsilon = 1e-9);

        let n = end.negative.bounds();
        let expected = 26.7 - 2.87 - 1.0;
        assert_relative_eq!(n.max.x, expected / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_clearance_follows_config() {
        let config = FittingConfig::default().with_male_thread_clearance(2.0);
        let end = endpoint(&dn20(), EndpointType::MaleThread, None, &config).unwrap();
        let n = end.negative.bounds();
        assert_relative_eq!(n.max.x, (26.7 - 2.87 - 2.0) / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_female_thread_is_pipe_sized_tube() {
        let end = build(EndpointType::FemaleThread);
        let spec = dn20();
        let b = end.positive.bounds();
        assert_relative_eq!(b.max.x, spec.od() / 2.0, epsilon = 1e-9);
        assert_relative_eq!(b.max.z, spec.thread_length(), epsilon = 1e-9);

        // groove cuts half a wall into the tube from the bore
        let Solid::Difference { cut: groove, .. } = &end.positive else {
            panic!("female thread is a grooved tube");
        };
        let g = groove.bounds();
        assert_relative_eq!(g.max.x, (spec.inner_diameter() + spec.wall()) / 2.0, epsilon = 1e-9);

        let n = end.negative.bounds();
        assert_relative_eq!(n.max.x, spec.socket_inner_diameter() / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_anchors() {
        let end = endpoint(&dn20(), EndpointType::Spigot, Some(12.0), &FittingConfig::default()).unwrap();
        let face = end.anchor("face").unwrap();
        assert_relative_eq!(face.position().z, 12.0);
        assert_relative_eq!(face.direction(), Vector3::z(), epsilon = 1e-12);
        let base = end.anchor("base").unwrap();
        assert_relative_eq!(base.direction(), -Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn test_length_edges() {
        let config = FittingConfig::default();
        let zero = endpoint(&dn20(), EndpointType::Socket, Some(0.0), &config).unwrap();
        assert!(zero.positive.is_empty());
        assert!(zero.negative.is_empty());

        let err = endpoint(&dn20(), EndpointType::Socket, Some(-1.0), &config).unwrap_err();
        assert!(matches!(err, FittingError::NegativeLength { what: "endpoint", .. }));

        for bad in [f64::NAN, f64::INFINITY] {
            let err = endpoint(&dn20(), EndpointType::Socket, Some(bad), &config).unwrap_err();
            assert!(matches!(err, FittingError::InvalidParameter { name: "endpoint", .. }));
        }
    }

    #[test]
    fn test_invalid_spec_rejected() {
        let config = FittingConfig::default();
        for spec in [dn20().with_wall(13.35), dn20().with_wall(20.0), dn20().with_od(0.0)] {
            let err = endpoint(&spec, EndpointType::Spigot, None, &config).unwrap_err();
            assert!(
                matches!(err, FittingError::Spec(SpecError::InvalidDimensions { .. })),
                "{err}"
            );
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = FittingConfig::default().with_segments(2);
        let err = endpoint(&dn20(), EndpointType::Spigot, None, &config).unwrap_err();
        assert!(matches!(err, FittingError::InvalidParameter { name: "segments", .. }));
    }
}
