//! Configuration and presets for fitting generation.
//!
//! [`FittingConfig`] holds the manufacturing constants the geometry depends
//! on: clearances between mating parts, overlaps that keep booleans clean,
//! thread shape, and tessellation hints passed on to the kernel.
//!
//! # Presets
//!
//! - [`FittingConfig::default()`] - Balanced settings for general use
//! - [`FittingConfig::preview()`] - Coarse facets and plain thread ends for fast previews
//! - [`FittingConfig::print()`] - Fine facets and looser clearances for printed parts
//!
//! # Example
//!
//! ```
//! use pipe_fittings::FittingConfig;
//!
//! let config = FittingConfig::print().with_male_thread_clearance(1.5);
//! assert!(config.segments > FittingConfig::default().segments);
//! ```

use crate::error::{FittingError, FittingResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for fitting generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FittingConfig {
    /// Subtracted from the bore cut behind a male thread, in mm.
    pub male_thread_clearance: f64,

    /// How far a socket sleeve reaches back over its segment, in mm.
    pub socket_overlap: f64,

    /// How far bores run past the faces they open, in mm.
    /// Keeps the kernel from seeing coplanar skins.
    pub bore_overshoot: f64,

    /// Whether thread starts and ends are chamfered.
    pub thread_bevel: bool,

    /// Included thread flank angle, in degrees.
    pub thread_flank_angle: f64,

    /// Circumferential facets requested from the kernel.
    pub segments: u32,

    /// Bolt holes on a flange when the request does not say.
    pub flange_bolt_holes: u32,
}

impl Default for FittingConfig {
    fn default() -> Self {
        Self {
            male_thread_clearance: 1.0,
            socket_overlap: 1.0,
            bore_overshoot: 0.01,
            thread_bevel: true,
            thread_flank_angle: 60.0,
            segments: 64,
            flange_bolt_holes: 4,
        }
    }
}

impl FittingConfig {
    /// Coarse settings for interactive previews.
    ///
    /// # Example
    ///
    /// ```
    /// use pipe_fittings::FittingConfig;
    ///
    /// let config = FittingConfig::preview();
    /// assert!(!config.thread_bevel);
    /// assert!(config.segments < FittingConfig::default().segments);
    /// ```
    #[must_use]
    pub fn preview() -> Self {
        Self {
            thread_bevel: false,
            segments: 24,
            ..Self::default()
        }
    }

    /// Fine settings with extra play for printed parts.
    ///
    /// # Example
    ///
    /// ```
    /// use pipe_fittings::FittingConfig;
    ///
    /// let config = FittingConfig::print();
    /// assert!(config.male_thread_clearance > FittingConfig::default().male_thread_clearance);
    /// ```
    #[must_use]
    pub fn print() -> Self {
        Self {
            male_thread_clearance: 1.4,
            socket_overlap: 1.5,
            bore_overshoot: 0.05,
            segments: 128,
            ..Self::default()
        }
    }

    /// Set the male thread clearance.
    #[must_use]
    pub fn with_male_thread_clearance(mut self, clearance: f64) -> Self {
        self.male_thread_clearance = clearance;
        self
    }

    /// Set the socket overlap.
    #[must_use]
    pub fn with_socket_overlap(mut self, overlap: f64) -> Self {
        self.socket_overlap = overlap;
        self
    }

    /// Set the bore overshoot.
    #[must_use]
    pub fn with_bore_overshoot(mut self, overshoot: f64) -> Self {
        self.bore_overshoot = overshoot;
        self
    }

    /// Enable or disable thread bevels.
    #[must_use]
    pub fn with_thread_bevel(mut self, bevel: bool) -> Self {
        self.thread_bevel = bevel;
        self
    }

    /// Set the thread flank angle in degrees.
    #[must_use]
    pub fn with_thread_flank_angle(mut self, degrees: f64) -> Self {
        self.thread_flank_angle = degrees;
        self
    }

    /// Set the facet count.
    #[must_use]
    pub fn with_segments(mut self, segments: u32) -> Self {
        self.segments = segments;
        self
    }

    /// Set the default flange bolt hole count.
    #[must_use]
    pub fn with_flange_bolt_holes(mut self, holes: u32) -> Self {
        self.flange_bolt_holes = holes;
        self
    }

    /// Check every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`FittingError::InvalidParameter`] naming the first bad field.
    pub fn validate(&self) -> FittingResult<()> {
        let non_negative = [
            ("male_thread_clearance", self.male_thread_clearance),
            ("socket_overlap", self.socket_overlap),
            ("bore_overshoot", self.bore_overshoot),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(FittingError::invalid(
                    name,
                    format!("must be a non-negative number, got {value}"),
                ));
            }
        }

        if !(self.thread_flank_angle > 0.0 && self.thread_flank_angle < 180.0) {
            return Err(FittingError::invalid(
                "thread_flank_angle",
                format!("must be between 0 and 180 degrees, got {}", self.thread_flank_angle),
            ));
        }

        if self.segments < 3 {
            return Err(FittingError::invalid(
                "segments",
                format!("need at least 3, got {}", self.segments),
            ));
        }

        Ok(())
    }

    /// Thread flank angle in radians.
    #[must_use]
    pub fn flank_angle_radians(&self) -> f64 {
        self.thread_flank_angle.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_values() {
        let config = FittingConfig::default();
        assert_relative_eq!(config.male_thread_clearance, 1.0);
        assert_relative_eq!(config.socket_overlap, 1.0);
        assert_relative_eq!(config.bore_overshoot, 0.01);
        assert!(config.thread_bevel);
        assert_eq!(config.segments, 64);
        assert_eq!(config.flange_bolt_holes, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_validate() {
        assert!(FittingConfig::preview().validate().is_ok());
        assert!(FittingConfig::print().validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = FittingConfig::default()
            .with_socket_overlap(2.0)
            .with_thread_bevel(false)
            .with_segments(32)
            .with_flange_bolt_holes(8);
        assert_relative_eq!(config.socket_overlap, 2.0);
        assert!(!config.thread_bevel);
        assert_eq!(config.segments, 32);
        assert_eq!(config.flange_bolt_holes, 8);
    }

    #[test]
    fn test_validate_rejects() {
        let bad = FittingConfig::default().with_male_thread_clearance(-0.5);
        assert!(matches!(
            bad.validate(),
            Err(FittingError::InvalidParameter {
                name: "male_thread_clearance",
                ..
            })
        ));

        assert!(FittingConfig::default().with_segments(2).validate().is_err());
        assert!(FittingConfig::default().with_thread_flank_angle(0.0).validate().is_err());
        assert!(FittingConfig::default().with_bore_overshoot(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_flank_angle_radians() {
        assert_relative_eq!(
            FittingConfig::default().flank_angle_radians(),
            std::f64::consts::FRAC_PI_3
        );
    }
}
