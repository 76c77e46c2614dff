//! Error types for assembly operations.

use pipe_fittings::FittingError;
use thiserror::Error;

/// Result type for assembly operations.
pub type AssemblyResult<T> = Result<T, AssemblyError>;

/// Errors that can occur while placing or joining fittings.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AssemblyError {
    /// A fitting with the given ID is already placed.
    #[error("fitting '{id}' already exists in assembly")]
    DuplicateFitting {
        /// The duplicate ID.
        id: String,
    },

    /// No fitting has the given ID.
    #[error("fitting '{id}' not found in assembly")]
    FittingNotFound {
        /// The missing ID.
        id: String,
    },

    /// A fitting has no anchor of the given name.
    #[error("fitting '{id}' has no anchor '{anchor}'")]
    AnchorNotFound {
        /// The fitting searched.
        id: String,
        /// The missing anchor name.
        anchor: String,
    },

    /// Two anchors cannot be joined.
    #[error("cannot join {from} to {to}: {reason}")]
    IncompatibleConnection {
        /// `id.anchor` of the fitting being attached.
        from: String,
        /// `id.anchor` it was attached to.
        to: String,
        /// Which check failed.
        reason: String,
    },

    /// Building a fitting failed.
    #[error("fitting error: {0}")]
    Fitting(#[from] FittingError),
}

impl AssemblyError {
    /// Returns true if an ID or anchor name did not resolve.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::FittingNotFound { .. } | Self::AnchorNotFound { .. }
        )
    }

    /// Returns true if the join itself was rejected.
    #[must_use]
    pub fn is_incompatible(&self) -> bool {
        matches!(self, Self::IncompatibleConnection { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_anchors() {
        let err = AssemblyError::IncompatibleConnection {
            from: "p1.A".into(),
            to: "tee.C".into(),
            reason: "spigot does not mate with spigot".into(),
        };
        assert_eq!(
            err.to_string(),
            "cannot join p1.A to tee.C: spigot does not mate with spigot"
        );
        assert!(err.is_incompatible());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_from_fitting_error() {
        let err: AssemblyError = FittingError::NotSupported {
            part: "saddle".into(),
        }
        .into();
        assert!(matches!(err, AssemblyError::Fitting(_)));
    }
}
