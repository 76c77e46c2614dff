//! Pipe runs assembled from generated fittings.
//!
//! Fittings are placed in a shared world frame by joining anchors: the
//! attached fitting is moved so its anchor sits on the target anchor and
//! faces it. Joins are checked against the ports on both sides, so a
//! spigot only goes into a socket of the same size.
//!
//! - [`Assembly`] - Placed fittings and the joins between them
//! - [`Connection`] / [`AnchorRef`] - One join
//! - [`BillOfMaterials`] - Fittings counted by kind and size
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Python bindings
//!
//! # Example
//!
//! ```
//! use pipe_assembly::Assembly;
//! use pipe_fittings::{elbow, nipple, FittingConfig, FittingParams, EndpointType};
//! use pipe_spec::SpecQuery;
//!
//! let spec = SpecQuery::new(40).dn("DN25").find().unwrap();
//! let params = FittingParams::default();
//! let config = FittingConfig::default();
//! let threaded = [Some(EndpointType::FemaleThread), Some(EndpointType::FemaleThread)];
//!
//! let mut assembly = Assembly::new("offset");
//! assembly.add("e1", elbow(&spec, &threaded, &params, &config).unwrap()).unwrap();
//! assembly.attach("n", nipple(&spec, &[], &params, &config).unwrap(), "A", "e1", "B").unwrap();
//! assembly.attach("e2", elbow(&spec, &threaded, &params, &config).unwrap(), "A", "n", "B").unwrap();
//!
//! let bom = assembly.bom();
//! assert_eq!(bom.total_parts(), 3);
//! assert_eq!(bom.items.len(), 2);
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization of joins and bills of
//!   materials

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod assembly;
mod bom;
mod connection;
mod error;

pub use assembly::{Assembly, OpenPort};
pub use bom::{BillOfMaterials, BomItem};
pub use connection::{AnchorRef, Connection};
pub use error::{AssemblyError, AssemblyResult};

/// Re-export of the transform type used by [`Assembly::add_at`].
pub use nalgebra::Isometry3;
