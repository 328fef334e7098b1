//! Integration tests for easyweights-ops
//!
//! These tests run the operators against a small character scene: a body
//! mesh with skin weights, clothing meshes in a collection, and non-mesh
//! objects mixed in.

use approx::assert_relative_eq;
use easyweights_core::{ObjectKind, Point3f, Scene, SceneObject, WeightSettings, WeightedMesh};
use easyweights_ops::*;

/// Mesh from the Head/Arm/Leg example: only Head carries positive weight
fn create_head_arm_leg() -> WeightedMesh {
    let mut mesh = WeightedMesh::from_positions(vec![
        Point3f::new(0.0, 2.0, 0.0),
        Point3f::new(1.0, 1.0, 0.0),
        Point3f::new(0.0, 0.0, 0.0),
    ]);
    let head = mesh.add_group("Head");
    let arm = mesh.add_group("Arm");
    let leg = mesh.add_group("Leg");
    mesh.assign(0, head, 0.8).unwrap();
    mesh.assign(1, arm, 0.0).unwrap();
    mesh.assign(2, leg, 0.0).unwrap();
    mesh.assign(2, head, 0.1).unwrap();
    mesh
}

/// A vertical strip of vertices weighted from Hips at the bottom to Head at the top
fn create_body() -> WeightedMesh {
    let mut mesh = WeightedMesh::from_positions(
        (0..5).map(|i| Point3f::new(0.0, i as f32 * 0.5, 0.0)).collect(),
    );
    let hips = mesh.add_group("Hips");
    let spine = mesh.add_group("Spine");
    let head = mesh.add_group("Head");
    let tail = mesh.add_group("Tail");
    for vertex in 0..5 {
        let t = vertex as f32 / 4.0;
        mesh.assign(vertex, hips, 1.0 - t).unwrap();
        mesh.assign(vertex, spine, 1.0 - (2.0 * t - 1.0).abs()).unwrap();
        mesh.assign(vertex, head, t).unwrap();
        mesh.assign(vertex, tail, 0.0).unwrap();
    }
    mesh
}

fn create_character_scene() -> Scene {
    let mut scene = Scene::new();
    scene.add_object(SceneObject::mesh("Body", create_body())).unwrap();
    scene.add_object(SceneObject::of_kind("Armature", ObjectKind::Armature)).unwrap();
    scene
        .add_object(SceneObject::mesh(
            "Jacket",
            WeightedMesh::from_positions(vec![
                Point3f::new(0.1, 0.6, 0.1),
                Point3f::new(0.1, 1.1, 0.1),
            ]),
        ))
        .unwrap();
    scene
        .add_object(SceneObject::mesh(
            "Hat",
            WeightedMesh::from_positions(vec![Point3f::new(0.0, 2.1, 0.0)]),
        ))
        .unwrap();
    scene.add_object(SceneObject::of_kind("Camera", ObjectKind::Camera)).unwrap();

    scene.add_collection("Outfit");
    for name in ["Jacket", "Armature", "Hat", "Camera"] {
        scene.link("Outfit", name).unwrap();
    }
    scene
}

#[test]
fn test_head_arm_leg_only_head_remains() {
    let mut mesh = create_head_arm_leg();
    let removed = delete_zero_weights(&mut mesh);

    let order: Vec<_> = removed.iter().map(|g| (g.name.as_str(), g.index)).collect();
    assert_eq!(order, vec![("Leg", 2), ("Arm", 1)]);
    assert_eq!(mesh.group_names(), vec!["Head"]);
    assert_relative_eq!(mesh.weight(0, 0).unwrap(), 0.8);
    assert_relative_eq!(mesh.weight(2, 0).unwrap(), 0.1);
}

#[test]
fn test_transfer_then_clean_outfit() {
    let mut scene = create_character_scene();
    let settings = WeightSettings::collection("Body", "Outfit").with_clean(true);
    let operator = TransferWeights::new(MappedTransfer::nearest());

    let outcome = invoke(&operator, &mut OperatorContext::new(&mut scene, &settings)).unwrap();
    assert!(outcome.is_finished());
    assert_eq!(outcome.reports().len(), 4);

    let jacket = scene.mesh("Jacket").unwrap();
    assert_eq!(jacket.group_names(), vec!["Hips", "Spine", "Head"]);
    let spine = jacket.group_by_name("Spine").unwrap().index;
    assert_relative_eq!(jacket.weight(0, spine).unwrap(), 0.5);
    assert_relative_eq!(jacket.weight(1, spine).unwrap(), 1.0);

    // The hat sits on the top vertex, where only Head has weight
    let hat = scene.mesh("Hat").unwrap();
    assert_eq!(hat.group_names(), vec!["Head"]);
    assert_relative_eq!(hat.weight(0, 0).unwrap(), 1.0);

    // The source keeps its unused group
    assert_eq!(scene.mesh("Body").unwrap().group_count(), 4);
}

#[test]
fn test_clean_is_idempotent_through_operator() {
    let mut scene = create_character_scene();
    let settings = WeightSettings::single("Jacket", "Body");

    let first = invoke(&CleanVertexGroups, &mut OperatorContext::new(&mut scene, &settings)).unwrap();
    assert_eq!(
        first.reports(),
        &[Report::info("Removed 1 unused vertex groups from Body: Tail")]
    );
    let after_first = scene.clone();

    let second = invoke(&CleanVertexGroups, &mut OperatorContext::new(&mut scene, &settings)).unwrap();
    assert_eq!(second.reports(), &[Report::info("No unused vertex groups on Body")]);
    assert_eq!(scene, after_first);
}

#[test]
fn test_selection_driven_transfer() {
    let mut scene = create_character_scene();
    scene.select("Hat").unwrap();
    scene.select("Camera").unwrap();
    scene.select("Body").unwrap();
    scene.set_active(Some("Body")).unwrap();

    let (source, targets) = resolve_selection(&scene).unwrap();
    let source = source.name.clone();
    let targets: Vec<String> = targets.iter().map(|o| o.name.clone()).collect();
    assert_eq!(targets, vec!["Hat"]);

    let operator = TransferWeights::new(MappedTransfer::nearest());
    for target in &targets {
        let settings = WeightSettings::single(source.as_str(), target.as_str());
        invoke(&operator, &mut OperatorContext::new(&mut scene, &settings)).unwrap();
    }

    assert_eq!(scene.mesh("Hat").unwrap().group_count(), 4);
    assert!(scene.selected_objects().is_empty());
}

#[test]
fn test_panel_reflects_outfit() {
    let mut scene = create_character_scene();
    let settings = WeightSettings::collection("Body", "Outfit");
    assert!(!PanelModel::describe(&scene, &settings).visible);

    scene.set_active(Some("Body")).unwrap();
    let panel = PanelModel::describe(&scene, &settings);

    assert!(panel.visible);
    assert_eq!(panel.targets, vec!["Jacket", "Hat"]);
    assert!(panel.transfer_enabled);
    assert!(panel.clean_enabled);
}
