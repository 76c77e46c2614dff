//! Catalog parts with no geometry yet.
//!
//! They take the same arguments as the other single-size assemblers so the
//! catalog can dispatch to them, and always fail.

use pipe_spec::PipeSpec;

use super::FittingParams;
use crate::config::FittingConfig;
use crate::endpoint::EndpointType;
use crate::error::{FittingError, FittingResult};
use crate::kind::FittingKind;
use crate::model::FittingModel;

fn not_supported(kind: FittingKind) -> FittingResult<FittingModel> {
    Err(FittingError::NotSupported {
        part: kind.to_string(),
    })
}

/// Elbow with a side outlet.
///
/// # Errors
///
/// Always [`FittingError::NotSupported`].
pub fn side_outlet_elbow(
    _spec: &PipeSpec,
    _ends: &[Option<EndpointType>],
    _params: &FittingParams,
    _config: &FittingConfig,
) -> FittingResult<FittingModel> {
    not_supported(FittingKind::SideOutletElbow)
}

/// Clamp-on branch outlet.
///
/// # Errors
///
/// Always [`FittingError::NotSupported`].
pub fn saddle(
    _spec: &PipeSpec,
    _ends: &[Option<EndpointType>],
    _params: &FittingParams,
    _config: &FittingConfig,
) -> FittingResult<FittingModel> {
    not_supported(FittingKind::Saddle)
}

/// Three-piece union.
///
/// # Errors
///
/// Always [`FittingError::NotSupported`].
pub fn union_fitting(
    _spec: &PipeSpec,
    _ends: &[Option<EndpointType>],
    _params: &FittingParams,
    _config: &FittingConfig,
) -> FittingResult<FittingModel> {
    not_supported(FittingKind::Union)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pipe_spec::SpecQuery;

    #[test]
    fn test_stubs_always_fail() {
        let spec = SpecQuery::new(40).dn("DN20").find().unwrap();
        let params = FittingParams::default();
        let config = FittingConfig::default();

        let builders: [(fn(&PipeSpec, &[Option<EndpointType>], &FittingParams, &FittingConfig) -> FittingResult<FittingModel>, &str); 3] = [
            (side_outlet_elbow, "side_outlet_elbow"),
            (saddle, "saddle"),
            (union_fitting, "union"),
        ];
        for (build, name) in builders {
            let err = build(&spec, &[], &params, &config).unwrap_err();
            assert_eq!(err, FittingError::NotSupported { part: name.into() });
        }
    }
}
