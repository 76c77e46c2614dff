//! Build any fitting by description.
//!
//! [`build_fitting`] dispatches on a [`FittingKind`] to the matching
//! assembler. [`FittingRequest`] goes one step further back: it names the
//! sizes as [`SpecQuery`]s and the ends as text, so a whole request can be
//! read from a file. [`build_all`] builds many requests on the rayon pool.

use pipe_spec::{PipeSpec, SpecQuery};
use rayon::prelude::*;
use tracing::debug;

use crate::config::FittingConfig;
use crate::endpoint::EndpointType;
use crate::error::{FittingError, FittingResult};
use crate::fittings::{self, FittingParams};
use crate::kind::FittingKind;
use crate::model::FittingModel;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

type SingleBuilder = fn(
    &PipeSpec,
    &[Option<EndpointType>],
    &FittingParams,
    &FittingConfig,
) -> FittingResult<FittingModel>;

type PairBuilder = fn(
    &PipeSpec,
    &PipeSpec,
    &[Option<EndpointType>],
    &FittingParams,
    &FittingConfig,
) -> FittingResult<FittingModel>;

enum Builder {
    Single(SingleBuilder),
    Pair(PairBuilder),
}

fn builder(kind: FittingKind) -> Builder {
    match kind {
        FittingKind::Pipe => Builder::Single(fittings::pipe),
        FittingKind::Nipple => Builder::Single(fittings::nipple),
        FittingKind::Coupling => Builder::Single(fittings::coupling),
        FittingKind::Elbow => Builder::Single(fittings::elbow),
        FittingKind::Tee => Builder::Single(fittings::tee),
        FittingKind::Wye => Builder::Single(fittings::wye),
        FittingKind::Cross => Builder::Single(fittings::cross),
        FittingKind::Corner => Builder::Single(fittings::corner),
        FittingKind::SideOutletTee => Builder::Single(fittings::side_outlet_tee),
        FittingKind::SixWay => Builder::Single(fittings::six_way),
        FittingKind::Cap => Builder::Single(fittings::cap),
        FittingKind::Plug => Builder::Single(fittings::plug),
        FittingKind::Flange => Builder::Single(fittings::flange),
        FittingKind::SideOutletElbow => Builder::Single(fittings::side_outlet_elbow),
        FittingKind::Saddle => Builder::Single(fittings::saddle),
        FittingKind::Union => Builder::Single(fittings::union_fitting),
        FittingKind::Adapter => Builder::Pair(fittings::adapter),
        FittingKind::Bushing => Builder::Pair(fittings::bushing),
    }
}

/// Build a fitting of `kind`.
///
/// `second` is required by two-size kinds (adapter, bushing) and ignored
/// by the rest.
///
/// # Errors
///
/// - [`FittingError::InvalidParameter`] if `config` is invalid
/// - [`FittingError::MissingSecondSpec`] for a two-size kind without `second`
/// - any error of the assembler itself
///
/// # Example
///
/// ```
/// use pipe_fittings::{build_fitting, FittingConfig, FittingKind, FittingParams};
/// use pipe_spec::SpecQuery;
///
/// let spec = SpecQuery::new(40).dn("DN20").find().unwrap();
/// let model = build_fitting(
///     FittingKind::Tee,
///     &spec,
///     None,
///     &[],
///     &FittingParams::default(),
///     &FittingConfig::default(),
/// )
/// .unwrap();
/// assert_eq!(model.ports().len(), 3);
/// ```
pub fn build_fitting(
    kind: FittingKind,
    spec: &PipeSpec,
    second: Option<&PipeSpec>,
    ends: &[Option<EndpointType>],
    params: &FittingParams,
    config: &FittingConfig,
) -> FittingResult<FittingModel> {
    config.validate()?;
    debug!(%kind, spec = %spec.label(), ends = ends.len(), "building fitting");

    match builder(kind) {
        Builder::Single(build) => build(spec, ends, params, config),
        Builder::Pair(build) => {
            let second = second.ok_or_else(|| FittingError::MissingSecondSpec {
                part: kind.to_string(),
            })?;
            build(spec, second, ends, params, config)
        }
    }
}

/// A fitting described by name: kind, size queries, textual ends and
/// parameters.
///
/// # Example
///
/// ```
/// use pipe_fittings::{FittingConfig, FittingKind, FittingRequest};
/// use pipe_spec::SpecQuery;
///
/// let request = FittingRequest::new(FittingKind::Cap, SpecQuery::new(40).dn("DN20"))
///     .with_end(Some("fipt"));
/// let model = request.build(&FittingConfig::default()).unwrap();
/// assert_eq!(model.label(), "SCH40 3/4 (DN20)");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FittingRequest {
    /// What to build.
    pub kind: FittingKind,
    /// The size.
    pub spec: SpecQuery,
    /// The second size of an adapter or bushing.
    #[cfg_attr(feature = "serde", serde(default))]
    pub second: Option<SpecQuery>,
    /// End type names per anchor; `None` takes the part's default.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ends: Vec<Option<String>>,
    /// Shape parameters.
    #[cfg_attr(feature = "serde", serde(default))]
    pub params: FittingParams,
}

impl FittingRequest {
    /// A request with default ends and parameters.
    #[must_use]
    pub fn new(kind: FittingKind, spec: SpecQuery) -> Self {
        Self {
            kind,
            spec,
            second: None,
            ends: Vec::new(),
            params: FittingParams::default(),
        }
    }

    /// Set the second size.
    #[must_use]
    pub fn with_second(mut self, second: SpecQuery) -> Self {
        self.second = Some(second);
        self
    }

    /// Append the end for the next anchor.
    #[must_use]
    pub fn with_end(mut self, end: Option<&str>) -> Self {
        self.ends.push(end.map(str::to_string));
        self
    }

    /// Replace the parameters.
    #[must_use]
    pub fn with_params(mut self, params: FittingParams) -> Self {
        self.params = params;
        self
    }

    /// Parse the textual ends.
    ///
    /// # Errors
    ///
    /// [`FittingError::UnknownEndpointType`] for the first unknown name.
    pub fn parse_ends(&self) -> FittingResult<Vec<Option<EndpointType>>> {
        self.ends
            .iter()
            .map(|end| end.as_deref().map(str::parse).transpose())
            .collect()
    }

    /// Resolve the sizes and build.
    ///
    /// Checks run cheapest first: unsupported kinds, a missing second size,
    /// the size lookups, then the end names.
    ///
    /// # Errors
    ///
    /// [`FittingError::NotSupported`], [`FittingError::MissingSecondSpec`],
    /// [`FittingError::Spec`], [`FittingError::UnknownEndpointType`], or any
    /// error of [`build_fitting`].
    pub fn build(&self, config: &FittingConfig) -> FittingResult<FittingModel> {
        if !self.kind.is_supported() {
            return Err(FittingError::NotSupported {
                part: self.kind.to_string(),
            });
        }
        if self.kind.spec_count() == 2 && self.second.is_none() {
            return Err(FittingError::MissingSecondSpec {
                part: self.kind.to_string(),
            });
        }

        let spec = self.spec.find()?;
        let second = self.second.as_ref().map(SpecQuery::find).transpose()?;
        let ends = self.parse_ends()?;
        build_fitting(
            self.kind,
            &spec,
            second.as_ref(),
            &ends,
            &self.params,
            config,
        )
    }
}

/// Build every request in parallel.
///
/// Results come back in request order. One failing request does not affect
/// the others.
#[must_use]
pub fn build_all(requests: &[FittingRequest], config: &FittingConfig) -> Vec<FittingResult<FittingModel>> {
    debug!(count = requests.len(), "building fitting batch");
    requests.par_iter().map(|request| request.build(config)).collect()
}
