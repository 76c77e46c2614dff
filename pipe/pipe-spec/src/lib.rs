//! Pipe schedule tables and specification lookup.
//!
//! This crate is the data layer of the pipe-fitting generator:
//!
//! - [`Schedule`] - The closed set of known wall schedules
//! - [`PipeSpec`] - An immutable dimension record with derived measurements
//! - [`lookup`] / [`SpecQuery`] - Select exactly one record from the table
//! - [`table`] / [`specs_for`] - Read-only access to the static table
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Python bindings
//!
//! # Units
//!
//! All dimensions are millimeters.
//!
//! # Example
//!
//! ```
//! use pipe_spec::{SpecQuery, SpecError};
//!
//! let spec = SpecQuery::new(40).dn("DN20").find().unwrap();
//! assert_eq!(spec.name(), "3/4");
//! assert!((spec.od() - 26.7).abs() < f64::EPSILON);
//!
//! // Schedule 120 starts at NPS 4
//! let err = SpecQuery::new(120).name("1/8").find().unwrap_err();
//! assert!(matches!(err, SpecError::NoMatch { .. }));
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for records and queries

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod error;
mod lookup;
mod schedule;
mod spec;
mod table;

pub use error::{SpecError, SpecResult};
pub use lookup::{Selector, SpecQuery, lookup};
pub use schedule::{IntoSchedule, Schedule};
pub use spec::{FieldValue, PipeSpec, SpecField};
pub use table::{specs_for, table};
