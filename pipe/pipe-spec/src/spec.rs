//! The pipe specification record and its accessors.

use std::fmt;

use crate::error::{SpecError, SpecResult};
use crate::schedule::Schedule;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single pipe dimension record.
///
/// Records are immutable. The `with_*` methods return a new record with one
/// field overridden and leave the original untouched; derived measurements
/// are recomputed from the current fields on every call.
///
/// All lengths are in millimeters.
///
/// # Example
///
/// ```
/// use pipe_spec::{PipeSpec, Schedule};
///
/// let spec = PipeSpec::new(Schedule::Sch40, "3/4", "DN20", 26.7, 2.87);
/// assert!((spec.inner_diameter() - 20.96).abs() < 1e-9);
///
/// let thick = spec.with_wall(3.91);
/// assert!((thick.wall() - 3.91).abs() < f64::EPSILON);
/// assert!((spec.wall() - 2.87).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PipeSpec {
    schedule: Schedule,
    name: String,
    dn: String,
    od: f64,
    wall: f64,
    thread_length: Option<f64>,
    thread_pitch: Option<f64>,
}

impl PipeSpec {
    /// Thread length used when a record does not carry one.
    pub const DEFAULT_THREAD_LENGTH: f64 = 10.0;

    /// Thread pitch used when a record does not carry one (27 TPI).
    pub const DEFAULT_THREAD_PITCH: f64 = 0.940_816;

    /// Create a record without thread data.
    #[must_use]
    pub fn new(
        schedule: Schedule,
        name: impl Into<String>,
        dn: impl Into<String>,
        od: f64,
        wall: f64,
    ) -> Self {
        Self {
            schedule,
            name: name.into(),
            dn: dn.into(),
            od,
            wall,
            thread_length: None,
            thread_pitch: None,
        }
    }

    /// Set thread length and pitch (builder pattern).
    #[must_use]
    pub fn with_thread(mut self, length: f64, pitch: f64) -> Self {
        self.thread_length = Some(length);
        self.thread_pitch = Some(pitch);
        self
    }

    // =========================================================================
    // Field accessors
    // =========================================================================

    /// The wall schedule.
    #[must_use]
    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Nominal size name, e.g. `"3/4"`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Diameter name, e.g. `"DN20"`.
    #[must_use]
    pub fn dn(&self) -> &str {
        &self.dn
    }

    /// Outer diameter.
    #[must_use]
    pub fn od(&self) -> f64 {
        self.od
    }

    /// Wall thickness.
    #[must_use]
    pub fn wall(&self) -> f64 {
        self.wall
    }

    /// Thread engagement length, or [`Self::DEFAULT_THREAD_LENGTH`].
    #[must_use]
    pub fn thread_length(&self) -> f64 {
        self.thread_length_or(Self::DEFAULT_THREAD_LENGTH)
    }

    /// Thread engagement length, or `default` when the record has none.
    #[must_use]
    pub fn thread_length_or(&self, default: f64) -> f64 {
        self.thread_length.unwrap_or(default)
    }

    /// Thread pitch, or [`Self::DEFAULT_THREAD_PITCH`].
    #[must_use]
    pub fn thread_pitch(&self) -> f64 {
        self.thread_pitch_or(Self::DEFAULT_THREAD_PITCH)
    }

    /// Thread pitch, or `default` when the record has none.
    #[must_use]
    pub fn thread_pitch_or(&self, default: f64) -> f64 {
        self.thread_pitch.unwrap_or(default)
    }

    /// Whether the record carries its own thread data.
    #[must_use]
    pub fn has_thread_data(&self) -> bool {
        self.thread_length.is_some() && self.thread_pitch.is_some()
    }

    // =========================================================================
    // Derived measurements
    // =========================================================================

    /// Inner diameter: `od - 2 * wall`.
    #[must_use]
    pub fn inner_diameter(&self) -> f64 {
        self.od - 2.0 * self.wall
    }

    /// Inner diameter of a socket that accepts this pipe: the pipe's `od`.
    #[must_use]
    pub fn socket_inner_diameter(&self) -> f64 {
        self.od
    }

    /// Outer diameter of a socket that accepts this pipe.
    #[must_use]
    pub fn socket_outer_diameter(&self) -> f64 {
        self.socket_inner_diameter() + 2.0 * self.wall
    }

    // =========================================================================
    // Copy-on-write updates
    // =========================================================================

    /// Copy with a different schedule.
    #[must_use]
    pub fn with_schedule(&self, schedule: Schedule) -> Self {
        Self {
            schedule,
            ..self.clone()
        }
    }

    /// Copy with a different nominal name.
    #[must_use]
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Copy with a different diameter name.
    #[must_use]
    pub fn with_dn(&self, dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            ..self.clone()
        }
    }

    /// Copy with a different outer diameter.
    #[must_use]
    pub fn with_od(&self, od: f64) -> Self {
        Self { od, ..self.clone() }
    }

    /// Copy with a different wall thickness.
    #[must_use]
    pub fn with_wall(&self, wall: f64) -> Self {
        Self {
            wall,
            ..self.clone()
        }
    }

    /// Copy with a different thread length.
    #[must_use]
    pub fn with_thread_length(&self, length: f64) -> Self {
        Self {
            thread_length: Some(length),
            ..self.clone()
        }
    }

    /// Copy with a different thread pitch.
    #[must_use]
    pub fn with_thread_pitch(&self, pitch: f64) -> Self {
        Self {
            thread_pitch: Some(pitch),
            ..self.clone()
        }
    }

    // =========================================================================
    // Generic field access
    // =========================================================================

    /// Read a field by name.
    ///
    /// Optional fields resolve to their field defaults.
    #[must_use]
    pub fn get(&self, field: SpecField) -> FieldValue<'_> {
        match field {
            SpecField::Name => FieldValue::Text(&self.name),
            SpecField::Dn => FieldValue::Text(&self.dn),
            SpecField::Od => FieldValue::Number(self.od),
            SpecField::Wall => FieldValue::Number(self.wall),
            SpecField::ThreadLength => FieldValue::Number(self.thread_length()),
            SpecField::ThreadPitch => FieldValue::Number(self.thread_pitch()),
        }
    }

    /// Copy with one field overridden.
    ///
    /// Returns `None` when the value kind does not fit the field (text for
    /// a dimension, or a number for a name).
    #[must_use]
    pub fn with_field(&self, field: SpecField, value: FieldValue<'_>) -> Option<Self> {
        match (field, value) {
            (SpecField::Name, FieldValue::Text(t)) => Some(self.with_name(t)),
            (SpecField::Dn, FieldValue::Text(t)) => Some(self.with_dn(t)),
            (SpecField::Od, FieldValue::Number(v)) => Some(self.with_od(v)),
            (SpecField::Wall, FieldValue::Number(v)) => Some(self.with_wall(v)),
            (SpecField::ThreadLength, FieldValue::Number(v)) => Some(self.with_thread_length(v)),
            (SpecField::ThreadPitch, FieldValue::Number(v)) => Some(self.with_thread_pitch(v)),
            _ => None,
        }
    }

    /// Display label, e.g. `"SCH40 3/4 (DN20)"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {} ({})", self.schedule, self.name, self.dn)
    }

    /// Check that the dimensions describe a real hollow pipe.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::InvalidDimensions`] if any dimension is not a
    /// positive finite number, or if the wall leaves no bore.
    pub fn validate(&self) -> SpecResult<()> {
        let invalid = |reason: String| SpecError::InvalidDimensions {
            label: self.label(),
            reason,
        };

        let dims = [
            ("od", self.od),
            ("wall", self.wall),
            ("thread length", self.thread_length()),
            ("thread pitch", self.thread_pitch()),
        ];
        for (what, value) in dims {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!("{what} must be positive, got {value}")));
            }
        }

        if self.od <= 2.0 * self.wall {
            return Err(invalid(format!(
                "wall {} leaves no bore in od {}",
                self.wall, self.od
            )));
        }

        Ok(())
    }
}

impl fmt::Display for PipeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// A field of [`PipeSpec`] that can be read, selected on, or overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpecField {
    /// Nominal size name.
    Name,
    /// Diameter name.
    Dn,
    /// Outer diameter.
    Od,
    /// Wall thickness.
    Wall,
    /// Thread length.
    ThreadLength,
    /// Thread pitch.
    ThreadPitch,
}

impl SpecField {
    /// Short field name used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Dn => "dn",
            Self::Od => "od",
            Self::Wall => "wall",
            Self::ThreadLength => "tl",
            Self::ThreadPitch => "pitch",
        }
    }
}

/// A borrowed field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// A text field.
    Text(&'a str),
    /// A numeric field in millimeters.
    Number(f64),
}

impl FieldValue<'_> {
    /// The numeric value, if this is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn three_quarter() -> PipeSpec {
        PipeSpec::new(Schedule::Sch40, "3/4", "DN20", 26.7, 2.87).with_thread(13.86078, 1.814322)
    }

    #[test]
    fn test_derived_measurements() {
        let spec = three_quarter();
        assert_relative_eq!(spec.inner_diameter(), 20.96, epsilon = 1e-9);
        assert_relative_eq!(spec.socket_inner_diameter(), 26.7);
        assert_relative_eq!(spec.socket_outer_diameter(), 32.44, epsilon = 1e-9);
    }

    #[test]
    fn test_derived_follow_overrides() {
        let spec = three_quarter().with_wall(3.0);
        assert_relative_eq!(spec.inner_diameter(), 20.7, epsilon = 1e-9);
        assert_relative_eq!(spec.socket_outer_diameter(), 32.7, epsilon = 1e-9);
    }

    #[test]
    fn test_optional_defaults() {
        let bare = PipeSpec::new(Schedule::Sch10, "1", "DN25", 33.4, 2.77);
        assert!(!bare.has_thread_data());
        assert_relative_eq!(bare.thread_length(), PipeSpec::DEFAULT_THREAD_LENGTH);
        assert_relative_eq!(bare.thread_pitch(), PipeSpec::DEFAULT_THREAD_PITCH);
        assert_relative_eq!(bare.thread_length_or(12.5), 12.5);
        assert_relative_eq!(bare.thread_pitch_or(2.0), 2.0);

        let spec = three_quarter();
        assert_relative_eq!(spec.thread_length_or(12.5), 13.86078);
    }

    #[test]
    fn test_update_leaves_original() {
        let spec = three_quarter();
        let renamed = spec.with_name("custom").with_od(27.0);

        assert_eq!(renamed.name(), "custom");
        assert_relative_eq!(renamed.od(), 27.0);
        assert_eq!(spec.name(), "3/4");
        assert_relative_eq!(spec.od(), 26.7);
        assert_eq!(renamed.dn(), spec.dn());
        assert_relative_eq!(renamed.wall(), spec.wall());
    }

    #[test]
    fn test_generic_field_access() {
        let spec = three_quarter();
        assert_eq!(spec.get(SpecField::Dn), FieldValue::Text("DN20"));
        assert_eq!(spec.get(SpecField::Od).as_number(), Some(26.7));

        let updated = spec
            .with_field(SpecField::ThreadPitch, FieldValue::Number(2.0))
            .unwrap();
        assert_eq!(updated.get(SpecField::ThreadPitch).as_number(), Some(2.0));

        assert!(spec.with_field(SpecField::Od, FieldValue::Text("big")).is_none());
        assert!(spec.with_field(SpecField::Name, FieldValue::Number(1.0)).is_none());
    }

    #[test]
    fn test_validate() {
        assert!(three_quarter().validate().is_ok());

        let solid_rod = three_quarter().with_wall(13.35);
        assert!(matches!(
            solid_rod.validate(),
            Err(SpecError::InvalidDimensions { .. })
        ));

        let negative = three_quarter().with_thread_pitch(-1.0);
        assert!(negative.validate().is_err());

        let nan = three_quarter().with_od(f64::NAN);
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_label() {
        assert_eq!(three_quarter().label(), "SCH40 3/4 (DN20)");
        assert_eq!(three_quarter().to_string(), "SCH40 3/4 (DN20)");
    }
}
