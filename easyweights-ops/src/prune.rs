//! Removal of vertex groups that no vertex uses

use easyweights_core::{SceneObject, VertexGroup, WeightedMesh};
use tracing::debug;

/// A membership counts as used only when its weight is strictly above this
pub const ZERO_WEIGHT_THRESHOLD: f32 = 0.0;

/// Remove every vertex group that has no membership with a positive weight.
///
/// All vertices and memberships are scanned once, then the unused groups are
/// removed from the highest index down so that each removal still addresses
/// the group it was computed for.
///
/// Returns the removed groups in removal order, each carrying the index it
/// had when it was removed.
///
/// # Example
/// ```rust
/// use easyweights_core::{Point3f, WeightedMesh};
/// use easyweights_ops::delete_zero_weights;
///
/// let mut mesh = WeightedMesh::from_positions(vec![Point3f::origin()]);
/// let head = mesh.add_group("Head");
/// mesh.add_group("Unused");
/// mesh.assign(0, head, 1.0).unwrap();
///
/// let removed = delete_zero_weights(&mut mesh);
/// assert_eq!(removed[0].name, "Unused");
/// assert_eq!(mesh.group_names(), vec!["Head"]);
/// ```
pub fn delete_zero_weights(mesh: &mut WeightedMesh) -> Vec<VertexGroup> {
    if mesh.group_count() == 0 {
        return Vec::new();
    }

    let mut used = vec![false; mesh.group_count()];
    for vertex in &mesh.vertices {
        for membership in &vertex.memberships {
            if membership.weight > ZERO_WEIGHT_THRESHOLD {
                if let Some(flag) = used.get_mut(membership.group) {
                    *flag = true;
                }
            }
        }
    }

    let unused: Vec<usize> = used
        .iter()
        .enumerate()
        .filter(|&(_, &is_used)| !is_used)
        .map(|(index, _)| index)
        .collect();

    let mut removed = Vec::with_capacity(unused.len());
    for index in unused.into_iter().rev() {
        if let Ok(group) = mesh.remove_group(index) {
            debug!("Removed vertex group '{}' (index {})", group.name, group.index);
            removed.push(group);
        }
    }

    removed
}

/// Prune the mesh of a scene object. Objects without mesh data are left alone.
pub fn delete_zero_weights_in(object: &mut SceneObject) -> Vec<VertexGroup> {
    match object.as_mesh_mut() {
        Some(mesh) => delete_zero_weights(mesh),
        None => Vec::new(),
    }
}
