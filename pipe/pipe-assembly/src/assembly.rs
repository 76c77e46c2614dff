//! Fitting assemblies.
//!
//! The [`Assembly`] struct places fittings in a shared world frame. The
//! first fitting is placed directly; every later one is attached by one of
//! its anchors to an anchor already in the assembly, which fixes its
//! transform.

use hashbrown::HashMap;
use nalgebra::Isometry3;
use pipe_fittings::{FittingConfig, FittingKind, FittingModel, FittingRequest, Port};
use pipe_geometry::{Aabb, Anchor, ScadWriter, Solid, mate};
use tracing::{debug, info};

use crate::bom::{BillOfMaterials, BomItem};
use crate::connection::{AnchorRef, Connection};
use crate::error::{AssemblyError, AssemblyResult};

#[derive(Debug, Clone)]
struct Placed {
    model: FittingModel,
    transform: Isometry3<f64>,
}

/// A port with nothing attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenPort {
    /// Where the port is.
    pub at: AnchorRef,
    /// End type and size.
    pub port: Port,
    /// The port's anchor in world coordinates.
    pub anchor: Anchor,
}

/// Fittings joined anchor to anchor.
///
/// # Example
///
/// ```
/// use pipe_assembly::Assembly;
/// use pipe_fittings::{cap, tee, pipe, EndpointType, FittingConfig, FittingParams};
/// use pipe_spec::SpecQuery;
///
/// let spec = SpecQuery::new(40).dn("DN20").find().unwrap();
/// let params = FittingParams::default();
/// let config = FittingConfig::default();
/// let spigots = [Some(EndpointType::Spigot), Some(EndpointType::Spigot)];
///
/// let mut assembly = Assembly::new("branch");
/// assembly.add("tee", tee(&spec, &[], &params, &config).unwrap()).unwrap();
/// assembly
///     .attach("run", pipe(&spec, &spigots, &params, &config).unwrap(), "A", "tee", "C")
///     .unwrap();
/// assembly
///     .attach("end", cap(&spec, &[], &params, &config).unwrap(), "A", "run", "B")
///     .unwrap();
///
/// assert_eq!(assembly.len(), 3);
/// assert_eq!(assembly.open_ports().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Assembly {
    name: String,
    /// IDs in placement order.
    order: Vec<String>,
    fittings: HashMap<String, Placed>,
    connections: Vec<Connection>,
}

impl Assembly {
    /// Create an empty assembly.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            order: Vec::new(),
            fittings: HashMap::new(),
            connections: Vec::new(),
        }
    }

    /// The assembly name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of fittings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no fitting has been placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether a fitting with `id` is placed.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.fittings.contains_key(id)
    }

    /// Fitting IDs in placement order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// The fitting `id` in its own frame.
    #[must_use]
    pub fn model(&self, id: &str) -> Option<&FittingModel> {
        self.fittings.get(id).map(|p| &p.model)
    }

    /// World transform of fitting `id`.
    #[must_use]
    pub fn transform(&self, id: &str) -> Option<Isometry3<f64>> {
        self.fittings.get(id).map(|p| p.transform)
    }

    /// Every join, in the order they were made.
    #[must_use]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    // =========================================================================
    // Placement
    // =========================================================================

    /// Place a fitting at the world origin.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::DuplicateFitting`] if `id` is taken.
    pub fn add(&mut self, id: impl Into<String>, model: FittingModel) -> AssemblyResult<()> {
        self.add_at(id, model, Isometry3::identity())
    }

    /// Place a fitting with an explicit world transform.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::DuplicateFitting`] if `id` is taken.
    pub fn add_at(
        &mut self,
        id: impl Into<String>,
        model: FittingModel,
        transform: Isometry3<f64>,
    ) -> AssemblyResult<()> {
        let id = id.into();
        if self.fittings.contains_key(&id) {
            return Err(AssemblyError::DuplicateFitting { id });
        }
        debug!(%id, fitting = %model, "placed fitting");
        self.insert(id, model, transform);
        Ok(())
    }

    /// Attach a fitting so its `anchor` meets `to_anchor` on fitting
    /// `to_id`.
    ///
    /// The two anchors end up at the same point, facing each other, with
    /// matching spin. Both anchors must be ports whose end types mate
    /// (spigot into socket, male into female thread, inner spigot into
    /// spigot) on the same outer diameter, and the target port must be
    /// free.
    ///
    /// # Errors
    ///
    /// - [`AssemblyError::DuplicateFitting`] if `id` is taken
    /// - [`AssemblyError::FittingNotFound`] for an unknown `to_id`
    /// - [`AssemblyError::AnchorNotFound`] for an unknown anchor on either side
    /// - [`AssemblyError::IncompatibleConnection`] if the ports do not mate
    pub fn attach(
        &mut self,
        id: impl Into<String>,
        model: FittingModel,
        anchor: &str,
        to_id: &str,
        to_anchor: &str,
    ) -> AssemblyResult<()> {
        self.join(id.into(), model, anchor, to_id, to_anchor, true)
    }

    /// [`attach`](Self::attach) without the port checks.
    ///
    /// Any two anchors can be joined, including anchors that are not
    /// ports, such as a flange face.
    ///
    /// # Errors
    ///
    /// As [`attach`](Self::attach), except
    /// [`AssemblyError::IncompatibleConnection`].
    pub fn attach_unchecked(
        &mut self,
        id: impl Into<String>,
        model: FittingModel,
        anchor: &str,
        to_id: &str,
        to_anchor: &str,
    ) -> AssemblyResult<()> {
        self.join(id.into(), model, anchor, to_id, to_anchor, false)
    }

    /// Build `request` and place it at the world origin.
    ///
    /// # Errors
    ///
    /// [`AssemblyError::Fitting`] if the request does not build, otherwise
    /// as [`add`](Self::add).
    pub fn add_request(
        &mut self,
        id: impl Into<String>,
        request: &FittingRequest,
        config: &FittingConfig,
    ) -> AssemblyResult<()> {
        let model = request.build(config)?;
        self.add(id, model)
    }

    /// Build `request` and [`attach`](Self::attach) it.
    ///
    /// # Errors
    ///
    /// [`AssemblyError::Fitting`] if the request does not build, otherwise
    /// as [`attach`](Self::attach).
    pub fn attach_request(
        &mut self,
        id: impl Into<String>,
        request: &FittingRequest,
        anchor: &str,
        to: &AnchorRef,
        config: &FittingConfig,
    ) -> AssemblyResult<()> {
        let model = request.build(config)?;
        self.attach(id, model, anchor, &to.id, &to.anchor)
    }

    fn join(
        &mut self,
        id: String,
        model: FittingModel,
        anchor: &str,
        to_id: &str,
        to_anchor: &str,
        checked: bool,
    ) -> AssemblyResult<()> {
        if self.fittings.contains_key(&id) {
            return Err(AssemblyError::DuplicateFitting { id });
        }
        let target = self
            .fittings
            .get(to_id)
            .ok_or_else(|| AssemblyError::FittingNotFound {
                id: to_id.to_string(),
            })?;
        let target_anchor =
            target
                .model
                .anchor(to_anchor)
                .ok_or_else(|| AssemblyError::AnchorNotFound {
                    id: to_id.to_string(),
                    anchor: to_anchor.to_string(),
                })?;
        let child_anchor = model
            .anchor(anchor)
            .ok_or_else(|| AssemblyError::AnchorNotFound {
                id: id.clone(),
                anchor: anchor.to_string(),
            })?;

        let from = AnchorRef::new(id.clone(), anchor);
        let to = AnchorRef::new(to_id, to_anchor);
        if checked {
            self.check_join(&from, &model, &to, &target.model)?;
        }

        let world_target = target_anchor.transformed(&target.transform);
        let transform = mate(child_anchor, &world_target);

        info!(%from, %to, checked, "attached fitting");
        self.insert(id, model, transform);
        self.connections.push(Connection { from, to, checked });
        Ok(())
    }

    fn check_join(
        &self,
        from: &AnchorRef,
        model: &FittingModel,
        to: &AnchorRef,
        target: &FittingModel,
    ) -> AssemblyResult<()> {
        let incompatible = |reason: String| AssemblyError::IncompatibleConnection {
            from: from.to_string(),
            to: to.to_string(),
            reason,
        };

        if self.connections.iter().any(|c| c.involves(to)) {
            return Err(incompatible(format!("{to} is already connected")));
        }
        let child_port = model
            .port(&from.anchor)
            .ok_or_else(|| incompatible(format!("{from} is not a connection")))?;
        let target_port = target
            .port(&to.anchor)
            .ok_or_else(|| incompatible(format!("{to} is not a connection")))?;

        if !child_port.endpoint.mates_with(target_port.endpoint) {
            return Err(incompatible(format!(
                "{} does not mate with {}",
                child_port.endpoint, target_port.endpoint
            )));
        }
        if !child_port.mates_with(target_port) {
            return Err(incompatible(format!(
                "sizes differ: {} and {}",
                child_port.spec.label(),
                target_port.spec.label()
            )));
        }
        Ok(())
    }

    fn insert(&mut self, id: String, model: FittingModel, transform: Isometry3<f64>) {
        self.order.push(id.clone());
        self.fittings.insert(id, Placed { model, transform });
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Anchor `name` of fitting `id`, in world coordinates.
    ///
    /// # Errors
    ///
    /// [`AssemblyError::FittingNotFound`] or [`AssemblyError::AnchorNotFound`].
    pub fn world_anchor(&self, id: &str, name: &str) -> AssemblyResult<Anchor> {
        let placed = self
            .fittings
            .get(id)
            .ok_or_else(|| AssemblyError::FittingNotFound { id: id.to_string() })?;
        placed
            .model
            .anchor(name)
            .map(|a| a.transformed(&placed.transform))
            .ok_or_else(|| AssemblyError::AnchorNotFound {
                id: id.to_string(),
                anchor: name.to_string(),
            })
    }

    /// Every port with nothing attached, in placement order.
    #[must_use]
    pub fn open_ports(&self) -> Vec<OpenPort> {
        self.placed()
            .flat_map(|(id, placed)| {
                let joins: Vec<&Connection> = self
                    .connections
                    .iter()
                    .filter(|c| c.involves_fitting(id))
                    .collect();
                placed.model.ports().iter().filter_map(move |port| {
                    let at = AnchorRef::new(id, port.anchor.as_str());
                    if joins.iter().any(|c| c.involves(&at)) {
                        return None;
                    }
                    let anchor = placed.model.anchor(&port.anchor)?.transformed(&placed.transform);
                    Some(OpenPort {
                        at,
                        port: port.clone(),
                        anchor,
                    })
                })
            })
            .collect()
    }

    /// Union of every fitting's solid, in world coordinates.
    #[must_use]
    pub fn solid(&self) -> Solid {
        Solid::union_all(
            self.placed()
                .map(|(_, p)| p.model.solid().clone().transformed(p.transform)),
        )
    }

    /// Conservative world bounds of the whole assembly.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        self.placed()
            .map(|(_, p)| p.model.bounds().transformed(&p.transform))
            .fold(Aabb::empty(), |acc, b| acc.merged(&b))
    }

    /// Fittings counted by kind and size.
    #[must_use]
    pub fn bom(&self) -> BillOfMaterials {
        let mut groups: HashMap<(FittingKind, String), Vec<String>> = HashMap::new();
        for (id, placed) in self.placed() {
            groups
                .entry((placed.model.kind(), placed.model.label().to_string()))
                .or_default()
                .push(id.to_string());
        }

        let mut items: Vec<BomItem> = groups
            .into_iter()
            .map(|((kind, label), ids)| BomItem {
                kind,
                label,
                quantity: ids.len(),
                ids,
            })
            .collect();
        items.sort_by(|a, b| (a.kind, &a.label).cmp(&(b.kind, &b.label)));
        BillOfMaterials { items }
    }

    /// OpenSCAD source for the whole assembly.
    ///
    /// # Errors
    ///
    /// Returns [`std::fmt::Error`] if formatting fails.
    pub fn to_scad(&self, config: &FittingConfig) -> Result<String, std::fmt::Error> {
        ScadWriter {
            segments: config.segments,
            overshoot: config.bore_overshoot,
        }
        .render(&self.solid())
    }

    fn placed(&self) -> impl Iterator<Item = (&str, &Placed)> {
        self.order
            .iter()
            .filter_map(|id| self.fittings.get(id).map(|p| (id.as_str(), p)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use pipe_fittings::{EndpointType, FittingParams, cap, flange, pipe, tee};
    use pipe_spec::{PipeSpec, SpecQuery};

    const SPIGOTS: [Option<EndpointType>; 2] = [Some(EndpointType::Spigot), Some(EndpointType::Spigot)];

    fn spec(dn: &str) -> PipeSpec {
        SpecQuery::new(40).dn(dn).find().unwrap()
    }

    fn spigot_pipe(dn: &str) -> FittingModel {
        pipe(&spec(dn), &SPIGOTS, &FittingParams::default(), &FittingConfig::default()).unwrap()
    }

    fn tee_assembly() -> Assembly {
        let mut assembly = Assembly::new("test");
        let model = tee(&spec("DN20"), &[], &FittingParams::default(), &FittingConfig::default()).unwrap();
        assembly.add("tee", model).unwrap();
        assembly
    }

    #[test]
    fn test_attach_places_anchors_face_to_face() {
        let mut assembly = tee_assembly();
        assembly.attach("run", spigot_pipe("DN20"), "A", "tee", "C").unwrap();

        let c = assembly.world_anchor("tee", "C").unwrap();
        let a = assembly.world_anchor("run", "A").unwrap();
        assert!(a.faces(&c, 1e-9));

        // the far end is one pipe length further along +X
        let b = assembly.world_anchor("run", "B").unwrap();
        assert_relative_eq!(b.position(), c.position() + Vector3::x() * 100.0, epsilon = 1e-9);
        assert_relative_eq!(b.direction(), Vector3::x(), epsilon = 1e-9);
    }

    #[test]
    fn test_chain_and_open_ports() {
        let mut assembly = tee_assembly();
        assembly.attach("run", spigot_pipe("DN20"), "A", "tee", "C").unwrap();
        let end = cap(&spec("DN20"), &[], &FittingParams::default(), &FittingConfig::default()).unwrap();
        assembly.attach("end", end, "A", "run", "B").unwrap();

        let open: Vec<String> = assembly.open_ports().iter().map(|p| p.at.to_string()).collect();
        assert_eq!(open, ["tee.A", "tee.B"]);
        assert_eq!(assembly.connections().len(), 2);
        assert_eq!(assembly.ids().collect::<Vec<_>>(), ["tee", "run", "end"]);
    }

    #[test]
    fn test_end_types_must_mate() {
        let mut assembly = tee_assembly();
        let socket_pipe = pipe(&spec("DN20"), &[], &FittingParams::default(), &FittingConfig::default()).unwrap();
        let err = assembly.attach("run", socket_pipe, "A", "tee", "C").unwrap_err();
        assert!(matches!(err, AssemblyError::IncompatibleConnection { ref reason, .. } if reason.contains("socket does not mate with socket")));
        assert!(!assembly.contains("run"));
    }

    #[test]
    fn test_sizes_must_match() {
        let mut assembly = tee_assembly();
        let err = assembly.attach("run", spigot_pipe("DN25"), "A", "tee", "C").unwrap_err();
        assert!(matches!(err, AssemblyError::IncompatibleConnection { ref reason, .. } if reason.contains("sizes differ")));

        assembly
            .attach_unchecked("run", spigot_pipe("DN25"), "A", "tee", "C")
            .unwrap();
        assert!(!assembly.connections()[0].checked);
    }

    #[test]
    fn test_port_in_use() {
        let mut assembly = tee_assembly();
        assembly.attach("one", spigot_pipe("DN20"), "A", "tee", "C").unwrap();
        let err = assembly.attach("two", spigot_pipe("DN20"), "A", "tee", "C").unwrap_err();
        assert!(err.is_incompatible());
    }

    #[test]
    fn test_lookup_errors() {
        let mut assembly = tee_assembly();
        let err = assembly.add("tee", spigot_pipe("DN20")).unwrap_err();
        assert!(matches!(err, AssemblyError::DuplicateFitting { .. }));

        let err = assembly.attach("p", spigot_pipe("DN20"), "A", "nope", "C").unwrap_err();
        assert!(matches!(err, AssemblyError::FittingNotFound { .. }));

        let err = assembly.attach("p", spigot_pipe("DN20"), "A", "tee", "Z").unwrap_err();
        assert_eq!(
            err,
            AssemblyError::AnchorNotFound {
                id: "tee".into(),
                anchor: "Z".into()
            }
        );

        let err = assembly.attach("p", spigot_pipe("DN20"), "Q", "tee", "C").unwrap_err();
        assert!(err.is_not_found());
        assert!(assembly.world_anchor("tee", "Q").unwrap_err().is_not_found());
    }

    #[test]
    fn test_flange_face_needs_unchecked() {
        let spec = spec("DN50");
        let params = FittingParams::default();
        let config = FittingConfig::default();
        let mut assembly = Assembly::new("flanged");
        assembly.add("f1", flange(&spec, &[], &params, &config).unwrap()).unwrap();

        let err = assembly
            .attach("f2", flange(&spec, &[], &params, &config).unwrap(), "B", "f1", "B")
            .unwrap_err();
        assert!(err.is_incompatible());

        assembly
            .attach_unchecked("f2", flange(&spec, &[], &params, &config).unwrap(), "B", "f1", "B")
            .unwrap();
        let a = assembly.world_anchor("f2", "A").unwrap();
        assert_relative_eq!(a.direction(), Vector3::z(), epsilon = 1e-9);
    }

    #[test]
    fn test_bom_groups_by_kind_and_size() {
        let mut assembly = tee_assembly();
        assembly.attach("p1", spigot_pipe("DN20"), "A", "tee", "A").unwrap();
        assembly.attach("p2", spigot_pipe("DN20"), "A", "tee", "B").unwrap();

        let bom = assembly.bom();
        assert_eq!(bom.total_parts(), 3);
        assert_eq!(bom.items.len(), 2);
        assert_eq!(bom.items[0].kind, FittingKind::Pipe);
        assert_eq!(bom.items[0].ids, ["p1", "p2"]);
        assert_eq!(bom.items[1].kind, FittingKind::Tee);
    }

    #[test]
    fn test_bounds_cover_every_fitting() {
        let mut assembly = tee_assembly();
        assembly.attach("run", spigot_pipe("DN20"), "A", "tee", "C").unwrap();
        let bounds = assembly.bounds();
        let b = assembly.world_anchor("run", "B").unwrap();
        assert_relative_eq!(bounds.max.x, b.position().x, epsilon = 1e-9);
        assert!(bounds.contains(&assembly.world_anchor("tee", "A").unwrap().position()));

        let from_solid = assembly.solid().bounds();
        assert_relative_eq!(from_solid.max, bounds.max, epsilon = 1e-9);
        assert!(assembly.to_scad(&FittingConfig::preview()).unwrap().contains("multmatrix"));
    }

    #[test]
    fn test_requests_build_and_join() {
        let config = FittingConfig::preview();
        let mut assembly = Assembly::new("by name");
        assembly
            .add_request("tee", &FittingRequest::new(FittingKind::Tee, SpecQuery::new(40).dn("DN20")), &config)
            .unwrap();
        let pipe = FittingRequest::new(FittingKind::Pipe, SpecQuery::new(40).dn("DN20"))
            .with_end(Some("spigot"))
            .with_end(Some("spigot"));
        assembly
            .attach_request("run", &pipe, "A", &AnchorRef::new("tee", "C"), &config)
            .unwrap();

        assert_eq!(assembly.len(), 2);
        assert_eq!(assembly.open_ports().len(), 3);
        assert!(assembly.connections()[0].involves_fitting("run"));
    }

    #[test]
    fn test_request_failure_is_a_fitting_error() {
        let config = FittingConfig::default();
        let mut assembly = tee_assembly();
        let saddle = FittingRequest::new(FittingKind::Saddle, SpecQuery::new(40).dn("DN20"));
        let err = assembly
            .attach_request("s", &saddle, "A", &AnchorRef::new("tee", "C"), &config)
            .unwrap_err();
        assert!(matches!(err, AssemblyError::Fitting(_)));

        let missing = FittingRequest::new(FittingKind::Cap, SpecQuery::new(120).name("1/8"));
        let err = assembly.add_request("c", &missing, &config).unwrap_err();
        assert!(matches!(err, AssemblyError::Fitting(ref e) if e.is_spec_error()));
        assert_eq!(assembly.len(), 1);
    }
}
