//! Solid descriptions for pipe fittings.
//!
//! Fittings are not meshed here. They are described as constructive solid
//! geometry trees and handed to a geometry kernel:
//!
//! - [`Solid`] - Tree of primitives, rigid transforms and booleans
//! - [`Primitive`] / [`ThreadProfile`] - Leaves of the tree
//! - [`Anchor`] / [`mate`] - Named attachment frames and how to join them
//! - [`GeometryKernel`] - The seam to a real modeling backend
//! - [`BoundsKernel`] / [`Aabb`] - Conservative bounds without a backend
//! - [`ScadWriter`] - OpenSCAD source output
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Python bindings
//!
//! # Coordinate System
//!
//! Right-handed, millimeters. Primitives stand on z = 0 and grow along +Z.
//!
//! # Example
//!
//! ```
//! use pipe_geometry::{Anchor, Solid, mate};
//! use nalgebra::{Point3, Vector3};
//!
//! let stub = Solid::tube(30.0, 26.7, 20.96);
//! let top = Anchor::new("top", Point3::new(0.0, 0.0, 30.0), Vector3::z());
//! let bottom = Anchor::new("bottom", Point3::origin(), -Vector3::z());
//!
//! // Stack a second stub on the first.
//! let second = stub.clone().transformed(mate(&bottom, &top));
//! let both = stub.union(second);
//! assert!((both.bounds().max.z - 60.0).abs() < 1e-9);
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization of solids and anchors

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod anchor;
mod bounds;
mod kernel;
mod primitive;
mod scad;
mod solid;

pub use anchor::{Anchor, align_z, mate};
pub use bounds::{Aabb, BoundsKernel};
pub use kernel::GeometryKernel;
pub use primitive::{Primitive, ThreadProfile};
pub use scad::ScadWriter;
pub use solid::Solid;

/// Re-export of the math types used throughout the public API.
pub use nalgebra::{Isometry3, Point3, UnitQuaternion, Vector3};
