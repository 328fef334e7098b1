//! User-facing operators
//!
//! An operator checks its preconditions with [`Operator::poll`] and changes
//! the scene in [`Operator::execute`], reporting one status message per
//! object it processes. Operators receive the scene and settings explicitly
//! through an [`OperatorContext`].

use crate::prune::delete_zero_weights;
use crate::targets::resolve_from_settings_excluding;
use crate::transfer::WeightTransfer;
use easyweights_core::{Error, Result, Scene, SelectionMode, VertexGroup, WeightSettings};
use itertools::Itertools;
use std::fmt;
use tracing::{info, warn};

/// Severity of a status report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    Info,
    Warning,
}

/// Status message produced by an operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub level: ReportLevel,
    pub message: String,
}

impl Report {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: ReportLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: ReportLevel::Warning,
            message: message.into(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            ReportLevel::Info => "INFO",
            ReportLevel::Warning => "WARNING",
        };
        write!(f, "[{}] {}", level, self.message)
    }
}

/// Result of invoking an operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorOutcome {
    Finished(Vec<Report>),
    /// `poll` failed; nothing was changed
    Cancelled,
}

impl OperatorOutcome {
    pub fn is_finished(&self) -> bool {
        matches!(self, OperatorOutcome::Finished(_))
    }

    pub fn reports(&self) -> &[Report] {
        match self {
            OperatorOutcome::Finished(reports) => reports,
            OperatorOutcome::Cancelled => &[],
        }
    }
}

/// Everything an operator may read or change
pub struct OperatorContext<'a> {
    pub scene: &'a mut Scene,
    pub settings: &'a WeightSettings,
}

impl<'a> OperatorContext<'a> {
    pub fn new(scene: &'a mut Scene, settings: &'a WeightSettings) -> Self {
        Self { scene, settings }
    }
}

pub trait Operator {
    const ID: &'static str;
    const LABEL: &'static str;

    /// Whether the operator can run with these settings
    fn poll(&self, settings: &WeightSettings) -> bool;

    fn execute(&self, ctx: &mut OperatorContext<'_>) -> Result<Vec<Report>>;
}

/// Run `operator` if its preconditions hold.
///
/// Errors from `execute` are returned as-is. Objects processed before the
/// error keep their changes.
pub fn invoke<O: Operator>(operator: &O, ctx: &mut OperatorContext<'_>) -> Result<OperatorOutcome> {
    if !operator.poll(ctx.settings) {
        return Ok(OperatorOutcome::Cancelled);
    }
    operator.execute(ctx).map(OperatorOutcome::Finished)
}

fn target_names(scene: &Scene, settings: &WeightSettings, exclude: Option<&str>) -> Result<Vec<String>> {
    Ok(resolve_from_settings_excluding(scene, settings, exclude)?
        .into_iter()
        .map(|object| object.name.clone())
        .collect())
}

fn clean_report(object: &str, removed: &[VertexGroup]) -> Report {
    if removed.is_empty() {
        Report::info(format!("No unused vertex groups on {}", object))
    } else {
        Report::info(format!(
            "Removed {} unused vertex groups from {}: {}",
            removed.len(),
            object,
            removed.iter().map(|g| g.name.as_str()).join(", ")
        ))
    }
}

/// Copies vertex-group weights from SOURCE to every resolved target
pub struct TransferWeights<T> {
    pub transfer: T,
}

impl<T: WeightTransfer> TransferWeights<T> {
    pub fn new(transfer: T) -> Self {
        Self { transfer }
    }

    fn transfer_pair(&self, scene: &mut Scene, source: &str, target: &str) -> Result<()> {
        scene.deselect_all();
        scene.select(source)?;
        scene.select(target)?;
        scene.set_active(Some(source))?;

        let result = self.transfer_meshes(scene, source, target);

        scene.deselect_all();
        scene.set_active(None)?;
        result
    }

    fn transfer_meshes(&self, scene: &mut Scene, source: &str, target: &str) -> Result<()> {
        let (src, dst) = scene.pair_mut(source, target)?;
        let src_mesh = src
            .as_mesh()
            .ok_or_else(|| Error::NotAMesh(source.to_string()))?;
        let dst_mesh = dst
            .as_mesh_mut()
            .ok_or_else(|| Error::NotAMesh(target.to_string()))?;
        self.transfer.transfer(src_mesh, dst_mesh)
    }
}

impl<T: WeightTransfer> Operator for TransferWeights<T> {
    const ID: &'static str = "object.transfer_weights";
    const LABEL: &'static str = "Transfer Weights";

    fn poll(&self, settings: &WeightSettings) -> bool {
        settings.has_source() && settings.has_targets()
    }

    fn execute(&self, ctx: &mut OperatorContext<'_>) -> Result<Vec<Report>> {
        let settings = ctx.settings;
        let source = settings
            .source
            .as_deref()
            .ok_or_else(|| Error::InvalidData("no source object set".to_string()))?;
        ctx.scene.mesh(source)?;

        if settings.mode == SelectionMode::SingleObject && settings.target.as_deref() == Some(source) {
            warn!("Skipping '{}': target is the source", source);
            return Ok(vec![Report::warning(format!(
                "Skipped {}: it is the source object",
                source
            ))]);
        }

        let targets = target_names(ctx.scene, settings, Some(source))?;
        if targets.is_empty() {
            warn!("No mesh targets for source '{}'", source);
            return Ok(vec![Report::warning("No mesh targets to transfer weights to")]);
        }

        let mut reports = Vec::new();
        for target in &targets {
            self.transfer_pair(ctx.scene, source, target)?;
            info!("Transferred weights from '{}' to '{}'", source, target);
            reports.push(Report::info(format!("Transferred weights from {} to {}", source, target)));

            if settings.clean {
                let removed = delete_zero_weights(ctx.scene.mesh_mut(target)?);
                reports.push(clean_report(target, &removed));
            }
        }

        Ok(reports)
    }
}

/// Removes unused vertex groups from every resolved target.
///
/// SOURCE plays no part here: a source mesh linked into the TARGETS
/// collection is cleaned like any other member.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanVertexGroups;

impl Operator for CleanVertexGroups {
    const ID: &'static str = "object.clean_vertex_groups";
    const LABEL: &'static str = "Clean Vertex Groups";

    fn poll(&self, settings: &WeightSettings) -> bool {
        settings.has_targets()
    }

    fn execute(&self, ctx: &mut OperatorContext<'_>) -> Result<Vec<Report>> {
        let targets = target_names(ctx.scene, ctx.settings, None)?;
        if targets.is_empty() {
            warn!("No mesh targets to clean");
            return Ok(vec![Report::warning("No mesh targets to clean")]);
        }

        let mut reports = Vec::with_capacity(targets.len());
        for target in &targets {
            let removed = delete_zero_weights(ctx.scene.mesh_mut(target)?);
            info!("Cleaned '{}': {} vertex groups removed", target, removed.len());
            reports.push(clean_report(target, &removed));
        }

        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::MappedTransfer;
    use easyweights_core::{ObjectKind, Point3f, SceneObject, WeightedMesh};
    use std::cell::RefCell;

    fn create_body() -> WeightedMesh {
        let mut mesh = WeightedMesh::from_positions(vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
        ]);
        let hips = mesh.add_group("Hips");
        let spine = mesh.add_group("Spine");
        mesh.assign(0, hips, 1.0).unwrap();
        mesh.assign(1, spine, 1.0).unwrap();
        mesh
    }

    fn create_clothing() -> WeightedMesh {
        let mut mesh = WeightedMesh::from_positions(vec![
            Point3f::new(0.0, 0.0, 0.1),
            Point3f::new(0.0, 1.0, 0.1),
        ]);
        mesh.add_group("Stale");
        mesh
    }

    fn create_scene() -> Scene {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::mesh("Body", create_body())).unwrap();
        scene.add_object(SceneObject::mesh("Shirt", create_clothing())).unwrap();
        scene.add_object(SceneObject::of_kind("Rig", ObjectKind::Armature)).unwrap();
        scene.add_object(SceneObject::mesh("Pants", create_clothing())).unwrap();
        scene.add_collection("Clothes");
        for name in ["Shirt", "Rig", "Pants"] {
            scene.link("Clothes", name).unwrap();
        }
        scene
    }

    /// Records the target vertex count of every call
    #[derive(Default)]
    struct RecordingTransfer {
        calls: RefCell<Vec<usize>>,
        fail: bool,
    }

    impl WeightTransfer for RecordingTransfer {
        fn transfer(&self, _source: &WeightedMesh, target: &mut WeightedMesh) -> Result<()> {
            self.calls.borrow_mut().push(target.vertex_count());
            if self.fail {
                return Err(Error::Transfer("service unavailable".to_string()));
            }
            Ok(())
        }
    }

    #[test]
    fn test_transfer_poll_requires_source_and_target() {
        let operator = TransferWeights::new(MappedTransfer::topology());
        assert!(!operator.poll(&WeightSettings::default()));
        assert!(operator.poll(&WeightSettings::single("Body", "Shirt")));

        let mut settings = WeightSettings::single("Body", "Shirt");
        settings.source = None;
        assert!(!operator.poll(&settings));

        let mut settings = WeightSettings::collection("Body", "Clothes");
        settings.targets = None;
        settings.target = Some("Shirt".to_string());
        assert!(!operator.poll(&settings));
    }

    #[test]
    fn test_invoke_cancelled_when_poll_fails() {
        let mut scene = create_scene();
        let before = scene.clone();
        let settings = WeightSettings::default();
        let mut ctx = OperatorContext::new(&mut scene, &settings);

        let outcome = invoke(&CleanVertexGroups, &mut ctx).unwrap();
        assert_eq!(outcome, OperatorOutcome::Cancelled);
        assert!(outcome.reports().is_empty());
        assert_eq!(scene, before);
    }

    #[test]
    fn test_transfer_single_target() {
        let mut scene = create_scene();
        let settings = WeightSettings::single("Body", "Shirt");
        let operator = TransferWeights::new(MappedTransfer::topology());

        let outcome = invoke(&operator, &mut OperatorContext::new(&mut scene, &settings)).unwrap();
        assert_eq!(
            outcome.reports(),
            &[Report::info("Transferred weights from Body to Shirt")]
        );

        let shirt = scene.mesh("Shirt").unwrap();
        assert_eq!(shirt.group_names(), vec!["Stale", "Hips", "Spine"]);
        assert!(scene.selected_objects().is_empty());
        assert!(scene.active_object().is_none());
    }

    #[test]
    fn test_transfer_collection_with_clean() {
        let mut scene = create_scene();
        let settings = WeightSettings::collection("Body", "Clothes").with_clean(true);
        let operator = TransferWeights::new(MappedTransfer::nearest());

        let outcome = invoke(&operator, &mut OperatorContext::new(&mut scene, &settings)).unwrap();
        let messages: Vec<_> = outcome.reports().iter().map(|r| r.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Transferred weights from Body to Shirt",
                "Removed 1 unused vertex groups from Shirt: Stale",
                "Transferred weights from Body to Pants",
                "Removed 1 unused vertex groups from Pants: Stale",
            ]
        );
        assert_eq!(scene.mesh("Pants").unwrap().group_names(), vec!["Hips", "Spine"]);
        assert_eq!(scene.mesh("Body").unwrap().group_names(), vec!["Hips", "Spine"]);
    }

    #[test]
    fn test_transfer_invokes_service_once_per_target() {
        let mut scene = create_scene();
        let settings = WeightSettings::collection("Body", "Clothes");
        let operator = TransferWeights::new(RecordingTransfer::default());

        invoke(&operator, &mut OperatorContext::new(&mut scene, &settings)).unwrap();
        assert_eq!(operator.transfer.calls.borrow().len(), 2);
    }

    #[test]
    fn test_transfer_skips_source_in_collection() {
        let mut scene = create_scene();
        scene.link("Clothes", "Body").unwrap();
        let settings = WeightSettings::collection("Body", "Clothes");
        let operator = TransferWeights::new(RecordingTransfer::default());

        let outcome = invoke(&operator, &mut OperatorContext::new(&mut scene, &settings)).unwrap();
        assert_eq!(operator.transfer.calls.borrow().len(), 2);
        assert_eq!(outcome.reports().len(), 2);
        assert!(outcome.reports().iter().all(|r| r.level == ReportLevel::Info));
    }

    #[test]
    fn test_transfer_single_target_is_source() {
        let mut scene = create_scene();
        let settings = WeightSettings::single("Body", "Body");
        let operator = TransferWeights::new(RecordingTransfer::default());

        let outcome = invoke(&operator, &mut OperatorContext::new(&mut scene, &settings)).unwrap();
        assert_eq!(
            outcome.reports(),
            &[Report::warning("Skipped Body: it is the source object")]
        );
        assert!(operator.transfer.calls.borrow().is_empty());
        assert_eq!(scene.mesh("Body").unwrap().group_names(), vec!["Hips", "Spine"]);
    }

    #[test]
    fn test_transfer_without_mesh_targets_warns() {
        let mut scene = create_scene();
        let settings = WeightSettings::single("Body", "Rig");
        let operator = TransferWeights::new(RecordingTransfer::default());

        let outcome = invoke(&operator, &mut OperatorContext::new(&mut scene, &settings)).unwrap();
        assert_eq!(outcome.reports()[0].level, ReportLevel::Warning);
        assert!(operator.transfer.calls.borrow().is_empty());
    }

    #[test]
    fn test_transfer_source_must_be_mesh() {
        let mut scene = create_scene();
        let settings = WeightSettings::single("Rig", "Shirt");
        let operator = TransferWeights::new(RecordingTransfer::default());

        let result = invoke(&operator, &mut OperatorContext::new(&mut scene, &settings));
        assert!(matches!(result, Err(Error::NotAMesh(_))));
    }

    #[test]
    fn test_transfer_error_propagates_and_resets_selection() {
        let mut scene = create_scene();
        scene.select("Rig").unwrap();
        let settings = WeightSettings::collection("Body", "Clothes");
        let operator = TransferWeights::new(RecordingTransfer {
            fail: true,
            ..RecordingTransfer::default()
        });

        let result = invoke(&operator, &mut OperatorContext::new(&mut scene, &settings));
        assert!(matches!(result, Err(Error::Transfer(_))));
        assert_eq!(operator.transfer.calls.borrow().len(), 1);
        assert!(scene.selected_objects().is_empty());
        assert!(scene.active_object().is_none());
    }

    #[test]
    fn test_clean_collection() {
        let mut scene = create_scene();
        let shirt = scene.mesh_mut("Shirt").unwrap();
        let keep = shirt.add_group("Keep");
        shirt.assign(0, keep, 0.5).unwrap();

        let settings = WeightSettings::collection("Body", "Clothes");
        let outcome = invoke(&CleanVertexGroups, &mut OperatorContext::new(&mut scene, &settings)).unwrap();

        let messages: Vec<_> = outcome.reports().iter().map(|r| r.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Removed 1 unused vertex groups from Shirt: Stale",
                "Removed 1 unused vertex groups from Pants: Stale",
            ]
        );
        assert_eq!(scene.mesh("Shirt").unwrap().group_names(), vec!["Keep"]);
        assert_eq!(scene.mesh("Pants").unwrap().group_count(), 0);
    }

    #[test]
    fn test_clean_includes_source_in_collection() {
        let mut scene = create_scene();
        scene.mesh_mut("Body").unwrap().add_group("Unused");
        scene.link("Clothes", "Body").unwrap();

        let settings = WeightSettings::collection("Body", "Clothes");
        let outcome = invoke(&CleanVertexGroups, &mut OperatorContext::new(&mut scene, &settings)).unwrap();

        assert_eq!(outcome.reports().len(), 3);
        assert_eq!(
            outcome.reports()[2],
            Report::info("Removed 1 unused vertex groups from Body: Unused")
        );
        assert_eq!(scene.mesh("Body").unwrap().group_names(), vec!["Hips", "Spine"]);
    }

    #[test]
    fn test_clean_single_target_without_source() {
        let mut scene = create_scene();
        let settings = WeightSettings {
            target: Some("Body".to_string()),
            ..WeightSettings::default()
        };
        let outcome = invoke(&CleanVertexGroups, &mut OperatorContext::new(&mut scene, &settings)).unwrap();
        assert_eq!(outcome.reports(), &[Report::info("No unused vertex groups on Body")]);
    }

    #[test]
    fn test_report_display() {
        assert_eq!(Report::info("done").to_string(), "[INFO] done");
        assert_eq!(Report::warning("careful").to_string(), "[WARNING] careful");
    }
}
