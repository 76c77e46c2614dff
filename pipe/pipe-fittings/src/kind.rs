//! The closed set of fitting kinds.

use std::fmt;
use std::str::FromStr;

use crate::error::FittingError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Every fitting the catalog knows, including the ones without geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FittingKind {
    /// Straight pipe.
    Pipe,
    /// Short threaded pipe.
    Nipple,
    /// Joins two pipes end to end.
    Coupling,
    /// Changes direction.
    Elbow,
    /// Straight run with a perpendicular branch.
    Tee,
    /// Straight run with an angled branch.
    Wye,
    /// Four-way junction in one plane.
    Cross,
    /// Three mutually perpendicular outlets.
    Corner,
    /// Tee with a second, perpendicular branch.
    SideOutletTee,
    /// Six-way junction.
    SixWay,
    /// Closes a pipe end from outside.
    Cap,
    /// Closes a fitting end from inside.
    Plug,
    /// Joins two sizes or end types.
    Adapter,
    /// Reducer that fits inside a larger fitting.
    Bushing,
    /// Bolted face.
    Flange,
    /// Elbow with a side outlet.
    SideOutletElbow,
    /// Branch clamped onto a run.
    Saddle,
    /// Three-piece union.
    Union,
}

impl FittingKind {
    /// Every kind, in catalog order.
    pub const ALL: [Self; 18] = [
        Self::Pipe,
        Self::Nipple,
        Self::Coupling,
        Self::Elbow,
        Self::Tee,
        Self::Wye,
        Self::Cross,
        Self::Corner,
        Self::SideOutletTee,
        Self::SixWay,
        Self::Cap,
        Self::Plug,
        Self::Adapter,
        Self::Bushing,
        Self::Flange,
        Self::SideOutletElbow,
        Self::Saddle,
        Self::Union,
    ];

    /// Canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pipe => "pipe",
            Self::Nipple => "nipple",
            Self::Coupling => "coupling",
            Self::Elbow => "elbow",
            Self::Tee => "tee",
            Self::Wye => "wye",
            Self::Cross => "cross",
            Self::Corner => "corner",
            Self::SideOutletTee => "side_outlet_tee",
            Self::SixWay => "six_way",
            Self::Cap => "cap",
            Self::Plug => "plug",
            Self::Adapter => "adapter",
            Self::Bushing => "bushing",
            Self::Flange => "flange",
            Self::SideOutletElbow => "side_outlet_elbow",
            Self::Saddle => "saddle",
            Self::Union => "union",
        }
    }

    /// Whether the kind produces geometry.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        !matches!(self, Self::SideOutletElbow | Self::Saddle | Self::Union)
    }

    /// Number of specifications the kind is built from.
    #[must_use]
    pub const fn spec_count(self) -> usize {
        match self {
            Self::Adapter | Self::Bushing => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for FittingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FittingKind {
    type Err = FittingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        let key = match key.as_str() {
            "sixway" | "6_way" => "six_way",
            "90" | "ell" => "elbow",
            other => other,
        }
        .to_string();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == key)
            .ok_or_else(|| FittingError::UnknownFittingKind {
                name: s.to_string(),
            })
    }
}
