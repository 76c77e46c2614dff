//! Error types for fitting generation.

use pipe_spec::SpecError;
use thiserror::Error;

/// Result type for fitting operations.
pub type FittingResult<T> = Result<T, FittingError>;

/// Errors that can occur while building endpoints, components or fittings.
///
/// Every failure is reported before any geometry is produced.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FittingError {
    /// A specification lookup failed.
    #[error("specification lookup failed: {0}")]
    Spec(#[from] SpecError),

    /// An endpoint type name could not be parsed.
    #[error("unknown endpoint type '{name}'")]
    UnknownEndpointType {
        /// The text that was supplied.
        name: String,
    },

    /// A length argument was negative.
    #[error("{what} length must not be negative, got {length}")]
    NegativeLength {
        /// Which length was rejected.
        what: &'static str,
        /// The rejected value.
        length: f64,
    },

    /// An endpoint type is not allowed at an anchor of this part.
    #[error("{part} anchor {anchor} does not accept {endpoint} (allowed: {allowed})")]
    InvalidEndpointForPart {
        /// The part being built.
        part: String,
        /// The anchor the end was supplied for.
        anchor: String,
        /// The rejected endpoint type.
        endpoint: String,
        /// The endpoint types the anchor accepts.
        allowed: String,
    },

    /// Two specifications cannot be combined in one part.
    #[error("incompatible sizes {first} and {second}: {reason}")]
    IncompatibleSizes {
        /// Label of the first specification.
        first: String,
        /// Label of the second specification.
        second: String,
        /// Which check failed.
        reason: String,
    },

    /// The part exists in the catalog but has no geometry.
    #[error("{part} fittings are not supported")]
    NotSupported {
        /// The part that was requested.
        part: String,
    },

    /// More ends were supplied than the part has anchors.
    #[error("{part} has {max} ends, got {given}")]
    TooManyEnds {
        /// The part being built.
        part: String,
        /// Number of ends supplied.
        given: usize,
        /// Number of anchors on the part.
        max: usize,
    },

    /// A fitting parameter is out of range.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// A fitting kind name could not be parsed.
    #[error("unknown fitting kind '{name}'")]
    UnknownFittingKind {
        /// The text that was supplied.
        name: String,
    },

    /// A two-size part was requested with one specification.
    #[error("{part} needs a second specification")]
    MissingSecondSpec {
        /// The part being built.
        part: String,
    },
}

impl FittingError {
    /// Returns true if the error came from the specification lookup.
    #[must_use]
    pub fn is_spec_error(&self) -> bool {
        matches!(self, Self::Spec(_))
    }

    /// Returns true if the error rejects the choice of ends.
    #[must_use]
    pub fn is_end_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownEndpointType { .. }
                | Self::InvalidEndpointForPart { .. }
                | Self::TooManyEnds { .. }
        )
    }

    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Accept `length` if it is finite and not negative.
pub(crate) fn check_length(what: &'static str, length: f64) -> FittingResult<f64> {
    if !length.is_finite() {
        return Err(FittingError::invalid(
            what,
            format!("length must be a finite number, got {length}"),
        ));
    }
    if length < 0.0 {
        return Err(FittingError::NegativeLength { what, length });
    }
    Ok(length)
}
