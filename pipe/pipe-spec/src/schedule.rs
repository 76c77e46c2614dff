//! Pipe wall schedules.

use std::fmt;
use std::str::FromStr;

use crate::error::{SpecError, SpecResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Wall-thickness schedule of a pipe.
///
/// A schedule is the industry classification that fixes the wall thickness
/// (and so the pressure rating) for each nominal size.
///
/// # Example
///
/// ```
/// use pipe_spec::Schedule;
///
/// let sch: Schedule = "sch40".parse().unwrap();
/// assert_eq!(sch, Schedule::Sch40);
/// assert_eq!(sch.number(), 40);
/// assert_eq!(sch.to_string(), "SCH40");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Schedule {
    /// Schedule 10 (thin wall).
    Sch10,
    /// Schedule 40 (standard weight).
    Sch40,
    /// Schedule 80 (extra strong).
    Sch80,
    /// Schedule 120.
    Sch120,
    /// Schedule 160.
    Sch160,
}

impl Schedule {
    /// Every known schedule, thinnest first.
    pub const ALL: [Self; 5] = [
        Self::Sch10,
        Self::Sch40,
        Self::Sch80,
        Self::Sch120,
        Self::Sch160,
    ];

    /// The schedule number.
    #[must_use]
    pub const fn number(self) -> u32 {
        match self {
            Self::Sch10 => 10,
            Self::Sch40 => 40,
            Self::Sch80 => 80,
            Self::Sch120 => 120,
            Self::Sch160 => 160,
        }
    }

    /// Convert a schedule number.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::InvalidSchedule`] for numbers that are not a
    /// known schedule.
    pub fn from_number(number: u32) -> SpecResult<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.number() == number)
            .ok_or_else(|| SpecError::InvalidSchedule {
                value: number.to_string(),
            })
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SCH{}", self.number())
    }
}

impl FromStr for Schedule {
    type Err = SpecError;

    /// Accepts `40`, `"40"`, `"sch40"`, `"SCH 40"` and `"schedule 40"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SpecError::InvalidSchedule {
            value: s.to_string(),
        };

        let lower = s.trim().to_ascii_lowercase();
        let digits = lower
            .strip_prefix("schedule")
            .or_else(|| lower.strip_prefix("sch"))
            .unwrap_or(&lower)
            .trim();

        digits
            .parse::<u32>()
            .map_err(|_| invalid())
            .and_then(|n| Self::from_number(n).map_err(|_| invalid()))
    }
}

/// Anything that can name a schedule.
///
/// Lookups take raw schedule values (numbers or text) as well as the typed
/// enum; conversion failures surface as [`SpecError::InvalidSchedule`].
pub trait IntoSchedule {
    /// Validate and convert into a [`Schedule`].
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::InvalidSchedule`] when the value is not a known
    /// schedule.
    fn into_schedule(self) -> SpecResult<Schedule>;
}

impl IntoSchedule for Schedule {
    fn into_schedule(self) -> SpecResult<Schedule> {
        Ok(self)
    }
}

impl IntoSchedule for u32 {
    fn into_schedule(self) -> SpecResult<Schedule> {
        Schedule::from_number(self)
    }
}

impl IntoSchedule for i32 {
    fn into_schedule(self) -> SpecResult<Schedule> {
        u32::try_from(self)
            .map_err(|_| SpecError::InvalidSchedule {
                value: self.to_string(),
            })
            .and_then(Schedule::from_number)
    }
}

impl IntoSchedule for &str {
    fn into_schedule(self) -> SpecResult<Schedule> {
        self.parse()
    }
}

impl IntoSchedule for String {
    fn into_schedule(self) -> SpecResult<Schedule> {
        self.parse()
    }
}
