//! Parametric pipe fittings for 3D printing and CAD.
//!
//! This umbrella crate re-exports all pipe-* crates, providing a unified API
//! from schedule tables to assembled pipe runs. All crates are Layer 0 (zero
//! Bevy dependencies) and can be used in CLI tools, WASM, servers, or Python
//! bindings.
//!
//! # Quick Start
//!
//! ```
//! use pipe::prelude::*;
//!
//! // Look up a size
//! let spec = SpecQuery::new(40).dn("DN20").find().unwrap();
//!
//! // Build a tee with a threaded branch
//! let config = FittingConfig::default();
//! let model = tee(
//!     &spec,
//!     &[None, None, Some(EndpointType::FemaleThread)],
//!     &FittingParams::default(),
//!     &config,
//! )
//! .unwrap();
//!
//! // Hand it to OpenSCAD
//! let scad = model.to_scad(&config).unwrap();
//! assert!(scad.starts_with("// pipe-geometry output"));
//! ```
//!
//! # Module Organization
//!
//! - [`spec`] - Schedule tables, lookup and dimension records
//! - [`geometry`] - Solid trees, anchors, geometry kernels
//! - [`fittings`] - Endpoints, components and every fitting assembler
//! - [`assembly`] - Fittings joined anchor to anchor, bill of materials
//!
//! # Feature Flags
//!
//! - `serde` - Enable serialization/deserialization across all crates

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Schedule tables, lookup and dimension records.
pub use pipe_spec as spec;

/// Solid trees, anchors, geometry kernels.
pub use pipe_geometry as geometry;

/// Endpoints, components and fitting assemblers.
pub use pipe_fittings as fittings;

/// Fittings joined anchor to anchor.
pub use pipe_assembly as assembly;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for pipe fitting generation.
///
/// # Usage
///
/// ```
/// use pipe::prelude::*;
/// ```
pub mod prelude {
    // Specification
    pub use pipe_spec::{PipeSpec, Schedule, SpecError, SpecQuery, lookup};

    // Geometry
    pub use pipe_geometry::{Aabb, Anchor, GeometryKernel, ScadWriter, Solid};

    // Fittings
    pub use pipe_fittings::{
        EndpointType, FittingConfig, FittingError, FittingKind, FittingModel, FittingParams,
        FittingRequest, adapter, build_all, build_fitting, bushing, cap, coupling, cross, elbow,
        flange, nipple, pipe, plug, tee, wye,
    };

    // Assembly
    pub use pipe_assembly::{Assembly, AssemblyError};
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_imports() {
        use prelude::*;

        let config = FittingConfig::default();
        assert!(config.validate().is_ok());
        let assembly = Assembly::new("empty");
        assert!(assembly.is_empty());
    }

    #[test]
    fn test_module_reexports() {
        let _ = spec::Schedule::Sch40;
        let _ = geometry::Solid::default();
        let _ = fittings::FittingParams::default();
        let _ = assembly::BillOfMaterials::default();
    }
}
