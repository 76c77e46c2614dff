//! Error types for specification lookup.

use thiserror::Error;

/// Result type for specification operations.
pub type SpecResult<T> = Result<T, SpecError>;

/// Errors that can occur while selecting or validating a pipe specification.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpecError {
    /// The schedule is not one of the known schedules.
    #[error("invalid schedule '{value}': expected one of 10, 40, 80, 120, 160")]
    InvalidSchedule {
        /// The rejected schedule value, as supplied.
        value: String,
    },

    /// A lookup was attempted with only a schedule.
    #[error("no selector supplied for schedule {schedule}: give a name, dn, od, wall, thread length or pitch")]
    MissingSelector {
        /// The schedule that was searched.
        schedule: String,
    },

    /// No record matched the schedule and selectors.
    #[error("no pipe spec in schedule {schedule} matches {selectors}")]
    NoMatch {
        /// The schedule that was searched.
        schedule: String,
        /// Human-readable list of the selectors used.
        selectors: String,
    },

    /// More than one record matched; the caller must add selectors.
    #[error("{count} pipe specs in schedule {schedule} match {selectors}: {candidates}")]
    AmbiguousMatch {
        /// The schedule that was searched.
        schedule: String,
        /// Human-readable list of the selectors used.
        selectors: String,
        /// Number of matching records.
        count: usize,
        /// Nominal names of the matching records.
        candidates: String,
    },

    /// A record's dimensions are not physically valid.
    #[error("invalid dimensions for {label}: {reason}")]
    InvalidDimensions {
        /// Label of the offending record.
        label: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl SpecError {
    /// Check if this is a no-match error.
    #[must_use]
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch { .. })
    }

    /// Check if this is an ambiguous-match error.
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::AmbiguousMatch { .. })
    }
}
