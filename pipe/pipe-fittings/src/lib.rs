//! Parametric pipe fittings with standardized connection endpoints.
//!
//! Every fitting is assembled from the same pieces:
//!
//! - [`endpoint`] / [`EndpointType`] - Spigots, sockets and threads on a
//!   canonical axis
//! - [`PartComponent`] - An endpoint on a plain segment, with join anchors
//! - Assemblers ([`pipe`], [`elbow`], [`tee`], [`bushing`], …) - Arms
//!   around a hub, composed into one [`Solid`](pipe_geometry::Solid)
//! - [`FittingModel`] - The result: solid, named anchors and ports
//! - [`build_fitting`] / [`FittingRequest`] / [`build_all`] - Build by
//!   description, one or many at a time
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Python bindings
//!
//! # Anchors
//!
//! Connection anchors are named `A`, `B`, `C`, … in the order the part's
//! ends are given. Each sits on its connection face with +Z of its frame
//! pointing out of the part.
//!
//! # Example
//!
//! ```
//! use pipe_fittings::{elbow, EndpointType, FittingConfig, FittingParams};
//! use pipe_spec::SpecQuery;
//!
//! let spec = SpecQuery::new(40).dn("DN20").find().unwrap();
//! let model = elbow(
//!     &spec,
//!     &[Some(EndpointType::FemaleThread), Some(EndpointType::Socket)],
//!     &FittingParams::default().with_angle(45.0),
//!     &FittingConfig::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(model.ports().len(), 2);
//! let scad = model.to_scad(&FittingConfig::preview()).unwrap();
//! assert!(scad.contains("linear_extrude"));
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization of configs, requests
//!   and models

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod catalog;
mod component;
mod config;
mod endpoint;
mod error;
mod fittings;
mod kind;
mod model;

pub use catalog::{FittingRequest, build_all, build_fitting};
pub use component::{JOIN_ANCHORS, PartComponent, TIP};
pub use config::FittingConfig;
pub use endpoint::{EndpointGeometry, EndpointType, endpoint};
pub use error::{FittingError, FittingResult};
pub use fittings::{
    DEFAULT_BRANCH_ANGLE, DEFAULT_ELBOW_ANGLE, DEFAULT_PIPE_LENGTH, FittingParams, adapter,
    bushing, cap, corner, coupling, cross, elbow, flange, nipple, pipe, plug, saddle,
    side_outlet_elbow, side_outlet_tee, six_way, tee, union_fitting, wye,
};
pub use kind::FittingKind;
pub use model::{FittingModel, Port};
