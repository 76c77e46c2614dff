//! Assembled fittings.

use std::fmt;

use nalgebra::Isometry3;
use pipe_geometry::{Aabb, Anchor, ScadWriter, Solid};
use pipe_spec::PipeSpec;

use crate::config::FittingConfig;
use crate::endpoint::EndpointType;
use crate::kind::FittingKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A connection on a fitting: which anchor, what end, what size.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Port {
    /// Name of the anchor on the connection face.
    pub anchor: String,
    /// End type at the anchor.
    pub endpoint: EndpointType,
    /// Size at the anchor.
    pub spec: PipeSpec,
}

impl Port {
    /// Whether this port can join `other`: mating end types on the same
    /// outer diameter.
    #[must_use]
    pub fn mates_with(&self, other: &Self) -> bool {
        self.endpoint.mates_with(other.endpoint)
            && (self.spec.od() - other.spec.od()).abs() < 1e-9
    }
}

/// The output of a fitting assembler.
///
/// A value object: the solid, its named anchors, and one [`Port`] per
/// connection. Anchors `A`, `B`, `C`, … sit on the connection faces in the
/// order the part's ends are given.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FittingModel {
    kind: FittingKind,
    label: String,
    solid: Solid,
    anchors: Vec<Anchor>,
    ports: Vec<Port>,
}

impl FittingModel {
    pub(crate) fn new(
        kind: FittingKind,
        label: String,
        solid: Solid,
        anchors: Vec<Anchor>,
        ports: Vec<Port>,
    ) -> Self {
        Self {
            kind,
            label,
            solid,
            anchors,
            ports,
        }
    }

    /// Which fitting this is.
    #[must_use]
    pub fn kind(&self) -> FittingKind {
        self.kind
    }

    /// Size label, e.g. `"SCH40 3/4 (DN20)"`.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The solid.
    #[must_use]
    pub fn solid(&self) -> &Solid {
        &self.solid
    }

    /// Every anchor.
    #[must_use]
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Every port.
    #[must_use]
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Look up an anchor by name.
    #[must_use]
    pub fn anchor(&self, name: &str) -> Option<&Anchor> {
        self.anchors.iter().find(|a| a.name() == name)
    }

    /// Look up the port on an anchor.
    #[must_use]
    pub fn port(&self, anchor: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.anchor == anchor)
    }

    /// The model moved by `transform`; ports are unchanged.
    #[must_use]
    pub fn transformed(&self, transform: &Isometry3<f64>) -> Self {
        Self {
            kind: self.kind,
            label: self.label.clone(),
            solid: self.solid.clone().transformed(*transform),
            anchors: self.anchors.iter().map(|a| a.transformed(transform)).collect(),
            ports: self.ports.clone(),
        }
    }

    /// Conservative bounds of the solid.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        self.solid.bounds()
    }

    /// OpenSCAD source for the solid, tessellated per `config`.
    ///
    /// # Errors
    ///
    /// Returns [`fmt::Error`] if formatting fails.
    pub fn to_scad(&self, config: &FittingConfig) -> Result<String, fmt::Error> {
        ScadWriter {
            segments: config.segments,
            overshoot: config.bore_overshoot,
        }
        .render(&self.solid)
    }
}

impl fmt::Display for FittingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.label)
    }
}
