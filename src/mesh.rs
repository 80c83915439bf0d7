use hashbrown::HashSet;

use crate::{Edge, MeshNum, Point2, Triangle};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An immutable set of points and triangles, ready to be handed to a renderer.
///
/// Created by [Triangulation::finalize](crate::Triangulation::finalize) and
/// [Triangulation::snapshot](crate::Triangulation::snapshot). Triangles reference points by
/// their index in [TriangleMesh::points]; every point becomes one vertex, every triangle one
/// face.
///
/// Points that are not referenced by any triangle (e.g. the super-triangle's points after
/// finalization) are kept so that indices stay valid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct TriangleMesh<S> {
    points: Vec<Point2<S>>,
    triangles: Vec<Triangle>,
}

impl<S: MeshNum> TriangleMesh<S> {
    pub(crate) fn new(points: Vec<Point2<S>>, triangles: Vec<Triangle>) -> Self {
        Self { points, triangles }
    }

    /// All points of the mesh in index order.
    pub fn points(&self) -> &[Point2<S>] {
        &self.points
    }

    /// All triangles, ordered counterclockwise.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// The number of points, including unreferenced ones.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// The number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Returns the raw point indices of every triangle.
    pub fn triangle_indices(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.triangles.iter().map(Triangle::indices)
    }

    /// Returns all triangle indices as one flat index buffer, three entries per face.
    pub fn flat_indices(&self) -> Vec<usize> {
        self.triangle_indices().flatten().collect()
    }

    /// Returns one `[x, y, 0]` vertex per point, for renderers working in three dimensions.
    pub fn vertices_3d(&self) -> Vec<[S; 3]> {
        self.points
            .iter()
            .map(|point| [point.x, point.y, S::zero()])
            .collect()
    }

    /// Returns every undirected edge once, e.g. for drawing a wireframe.
    pub fn edges(&self) -> Vec<Edge> {
        collect_edges(&self.triangles)
    }
}

/// Collects the undirected edges of all triangles in order of first appearance.
pub(crate) fn collect_edges(triangles: &[Triangle]) -> Vec<Edge> {
    let mut seen = HashSet::with_capacity(triangles.len() * 2);
    triangles
        .iter()
        .flat_map(Triangle::edges)
        .filter(|edge| seen.insert(*edge))
        .collect()
}
