//! Weight transfer between meshes
//!
//! The transfer itself is a service behind [`WeightTransfer`]. Two
//! vertex mappings are provided: by vertex index for meshes that share
//! topology, and by nearest vertex position for everything else.

use easyweights_core::{Error, Point3f, Result, WeightedMesh};
use std::fmt;

/// Copies named vertex-group weight layers from a source mesh onto a target.
///
/// Groups are matched by name. Groups missing on the target are created;
/// groups that exist only on the target are left alone.
pub trait WeightTransfer {
    fn transfer(&self, source: &WeightedMesh, target: &mut WeightedMesh) -> Result<()>;
}

impl<T: WeightTransfer + ?Sized> WeightTransfer for &T {
    fn transfer(&self, source: &WeightedMesh, target: &mut WeightedMesh) -> Result<()> {
        (**self).transfer(source, target)
    }
}

impl<T: WeightTransfer + ?Sized> WeightTransfer for Box<T> {
    fn transfer(&self, source: &WeightedMesh, target: &mut WeightedMesh) -> Result<()> {
        (**self).transfer(source, target)
    }
}

/// Vertex mapping used by [`MappedTransfer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VertexMapping {
    /// Vertex `i` of the target takes the weights of vertex `i` of the source.
    /// Both meshes need the same vertex count.
    #[default]
    Topology,
    /// Each target vertex takes the weights of the closest source vertex
    Nearest,
}

impl fmt::Display for VertexMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VertexMapping::Topology => f.write_str("topology"),
            VertexMapping::Nearest => f.write_str("nearest"),
        }
    }
}

/// Weight transfer with a fixed vertex mapping.
///
/// For every source group, each target vertex gets the weight of its mapped
/// source vertex, or loses its membership when the mapped vertex is not in
/// that group.
#[derive(Debug, Clone, Copy, Default)]
pub struct MappedTransfer {
    pub mapping: VertexMapping,
}

impl MappedTransfer {
    pub fn new(mapping: VertexMapping) -> Self {
        Self { mapping }
    }

    pub fn topology() -> Self {
        Self::new(VertexMapping::Topology)
    }

    pub fn nearest() -> Self {
        Self::new(VertexMapping::Nearest)
    }

    /// For each target vertex, the index of the source vertex it reads from
    fn vertex_map(&self, source: &WeightedMesh, target: &WeightedMesh) -> Result<Vec<usize>> {
        match self.mapping {
            VertexMapping::Topology => {
                if source.vertex_count() != target.vertex_count() {
                    return Err(Error::Transfer(format!(
                        "topology mapping needs matching vertex counts (source {}, target {})",
                        source.vertex_count(),
                        target.vertex_count()
                    )));
                }
                Ok((0..target.vertex_count()).collect())
            }
            VertexMapping::Nearest => {
                if source.is_empty() && !target.is_empty() {
                    return Err(Error::Transfer(
                        "nearest mapping needs a source mesh with vertices".to_string(),
                    ));
                }
                Ok(target
                    .vertices
                    .iter()
                    .map(|vertex| nearest_vertex(source, &vertex.position))
                    .collect())
            }
        }
    }
}

impl WeightTransfer for MappedTransfer {
    fn transfer(&self, source: &WeightedMesh, target: &mut WeightedMesh) -> Result<()> {
        let map = self.vertex_map(source, target)?;

        for group in source.groups() {
            let dst = target.ensure_group(&group.name);
            for (vertex, &from) in target.vertices.iter_mut().zip(&map) {
                match source.vertices[from].weight(group.index) {
                    Some(weight) => vertex.set_weight(dst, weight),
                    None => {
                        vertex.unset_weight(dst);
                    }
                }
            }
        }

        Ok(())
    }
}

fn nearest_vertex(mesh: &WeightedMesh, query: &Point3f) -> usize {
    let mut best = 0;
    let mut best_distance = f32::INFINITY;
    for (i, vertex) in mesh.vertices.iter().enumerate() {
        let distance = (vertex.position - *query).norm_squared();
        if distance < best_distance {
            best = i;
            best_distance = distance;
        }
    }
    best
}
