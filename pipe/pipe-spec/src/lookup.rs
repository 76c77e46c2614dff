//! Specification lookup.
//!
//! A lookup names a schedule and one or more selectors; it succeeds only if
//! exactly one table record in that schedule matches every selector.

use std::fmt;

use tracing::debug;

use crate::error::{SpecError, SpecResult};
use crate::schedule::{IntoSchedule, Schedule};
use crate::spec::{FieldValue, PipeSpec, SpecField};
use crate::table::specs_for;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One selector of a lookup. Matching is exact equality.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Selector {
    /// Nominal size name, e.g. `"3/4"`.
    Name(String),
    /// Diameter name, e.g. `"DN20"`.
    Dn(String),
    /// Outer diameter in mm.
    Od(f64),
    /// Wall thickness in mm.
    Wall(f64),
    /// Thread length in mm.
    ThreadLength(f64),
    /// Thread pitch in mm.
    ThreadPitch(f64),
}

impl Selector {
    /// The field this selector compares.
    #[must_use]
    pub fn field(&self) -> SpecField {
        match self {
            Self::Name(_) => SpecField::Name,
            Self::Dn(_) => SpecField::Dn,
            Self::Od(_) => SpecField::Od,
            Self::Wall(_) => SpecField::Wall,
            Self::ThreadLength(_) => SpecField::ThreadLength,
            Self::ThreadPitch(_) => SpecField::ThreadPitch,
        }
    }

    /// Whether `spec` satisfies this selector.
    #[must_use]
    #[allow(clippy::float_cmp)] // selectors are exact table values
    pub fn matches(&self, spec: &PipeSpec) -> bool {
        match (self, spec.get(self.field())) {
            (Self::Name(want) | Self::Dn(want), FieldValue::Text(have)) => want == have,
            (
                Self::Od(want)
                | Self::Wall(want)
                | Self::ThreadLength(want)
                | Self::ThreadPitch(want),
                FieldValue::Number(have),
            ) => *want == have,
            _ => false,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.field().as_str();
        match self {
            Self::Name(v) | Self::Dn(v) => write!(f, "{name}={v}"),
            Self::Od(v) | Self::Wall(v) | Self::ThreadLength(v) | Self::ThreadPitch(v) => {
                write!(f, "{name}={v}")
            }
        }
    }
}

/// Find the single record of `schedule` matching every selector.
///
/// # Errors
///
/// - [`SpecError::InvalidSchedule`] if `schedule` is not a known schedule
/// - [`SpecError::MissingSelector`] if `selectors` is empty
/// - [`SpecError::NoMatch`] if no record matches
/// - [`SpecError::AmbiguousMatch`] if more than one record matches
///
/// # Example
///
/// ```
/// use pipe_spec::{lookup, Selector};
///
/// let spec = lookup(40, &[Selector::Dn("DN20".into())]).unwrap();
/// assert_eq!(spec.name(), "3/4");
/// ```
pub fn lookup(schedule: impl IntoSchedule, selectors: &[Selector]) -> SpecResult<PipeSpec> {
    let schedule = schedule.into_schedule()?;

    if selectors.is_empty() {
        return Err(SpecError::MissingSelector {
            schedule: schedule.number().to_string(),
        });
    }

    let matches: Vec<&PipeSpec> = specs_for(schedule)
        .filter(|spec| selectors.iter().all(|s| s.matches(spec)))
        .collect();

    debug!(
        %schedule,
        selectors = selectors.len(),
        matches = matches.len(),
        "pipe spec lookup"
    );

    match matches.as_slice() {
        [spec] => Ok((*spec).clone()),
        [] => Err(SpecError::NoMatch {
            schedule: schedule.number().to_string(),
            selectors: describe(selectors),
        }),
        many => Err(SpecError::AmbiguousMatch {
            schedule: schedule.number().to_string(),
            selectors: describe(selectors),
            count: many.len(),
            candidates: many
                .iter()
                .map(|s| s.name())
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

fn describe(selectors: &[Selector]) -> String {
    selectors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builder for a lookup.
///
/// The schedule is validated when [`SpecQuery::find`] runs, so an invalid
/// schedule is reported regardless of which selectors were added.
///
/// # Example
///
/// ```
/// use pipe_spec::SpecQuery;
///
/// let spec = SpecQuery::new("sch80").name("1").find().unwrap();
/// assert!((spec.wall() - 4.55).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpecQuery {
    /// Schedule as supplied (number or text).
    pub schedule: String,
    /// Selectors to match.
    #[cfg_attr(feature = "serde", serde(default))]
    pub selectors: Vec<Selector>,
}

impl SpecQuery {
    /// Start a query for the given schedule.
    #[must_use]
    pub fn new(schedule: impl fmt::Display) -> Self {
        Self {
            schedule: schedule.to_string(),
            selectors: Vec::new(),
        }
    }

    /// Start a query for a typed schedule.
    #[must_use]
    pub fn for_schedule(schedule: Schedule) -> Self {
        Self::new(schedule.number())
    }

    /// Add a selector (builder pattern).
    #[must_use]
    pub fn with(mut self, selector: Selector) -> Self {
        self.selectors.push(selector);
        self
    }

    /// Select by nominal name.
    #[must_use]
    pub fn name(self, name: impl Into<String>) -> Self {
        self.with(Selector::Name(name.into()))
    }

    /// Select by diameter name.
    #[must_use]
    pub fn dn(self, dn: impl Into<String>) -> Self {
        self.with(Selector::Dn(dn.into()))
    }

    /// Select by outer diameter.
    #[must_use]
    pub fn od(self, od: f64) -> Self {
        self.with(Selector::Od(od))
    }

    /// Select by wall thickness.
    #[must_use]
    pub fn wall(self, wall: f64) -> Self {
        self.with(Selector::Wall(wall))
    }

    /// Select by thread length.
    #[must_use]
    pub fn thread_length(self, length: f64) -> Self {
        self.with(Selector::ThreadLength(length))
    }

    /// Select by thread pitch.
    #[must_use]
    pub fn thread_pitch(self, pitch: f64) -> Self {
        self.with(Selector::ThreadPitch(pitch))
    }

    /// Run the lookup.
    ///
    /// # Errors
    ///
    /// See [`lookup`].
    pub fn find(&self) -> SpecResult<PipeSpec> {
        lookup(self.schedule.as_str(), &self.selectors)
    }
}
