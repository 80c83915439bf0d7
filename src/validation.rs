//! Consistency checks for triangle meshes.
//!
//! These functions work on plain point and triangle slices, so they can be applied to a
//! [Triangulation](crate::Triangulation) as well as to a finalized
//! [TriangleMesh](crate::TriangleMesh).

use hashbrown::HashSet;

use crate::math::{contained_in_circumcircle, is_strictly_ccw};
use crate::{Edge, FixedPointIndex, MeshNum, Point2, Triangle};

/// A triangle that violates the Delaunay property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelaunayViolation {
    /// The offending triangle.
    pub triangle: Triangle,
    /// What is wrong with it.
    pub kind: ViolationKind,
}

/// Describes a [DelaunayViolation].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// The given point lies strictly inside the triangle's circumcircle.
    PointInCircumcircle(FixedPointIndex),
    /// The triangle's corners are collinear or ordered clockwise.
    Degenerate,
}

/// The error type returned by [check_manifold].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifoldError {
    /// The triangle references a point that doesn't exist.
    InvalidIndex(Triangle),
    /// The triangle uses the same point twice.
    RepeatedVertex(Triangle),
    /// The same directed edge is used by two triangles. Either they overlap, disagree in
    /// orientation or more than two triangles share this edge.
    DuplicateDirectedEdge(Edge),
}

impl std::fmt::Display for ManifoldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Debug>::fmt(self, f)
    }
}

impl std::error::Error for ManifoldError {}

/// Finds every pair of triangle and point where the point lies strictly inside the
/// triangle's circumcircle.
///
/// Uses the same exact incircle test as the triangulation itself, see
/// [contained_in_circumcircle](crate::math::contained_in_circumcircle) for the meaning of
/// `tolerance`. Triangles that are not strictly counterclockwise are reported as
/// [ViolationKind::Degenerate].
///
/// This takes `O(triangles * points)` time.
///
/// # Panics
/// Panics if a triangle references an index outside of `points`. Use [check_manifold] to
/// rule this out first.
pub fn find_delaunay_violations<S: MeshNum>(
    points: &[Point2<S>],
    triangles: &[Triangle],
    tolerance: f64,
) -> Vec<DelaunayViolation> {
    let mut result = Vec::new();
    for triangle in triangles {
        let positions = triangle.vertices().map(|vertex| points[vertex.index()]);
        if !is_strictly_ccw(positions) {
            result.push(DelaunayViolation {
                triangle: *triangle,
                kind: ViolationKind::Degenerate,
            });
            continue;
        }

        for (index, point) in points.iter().enumerate() {
            let index = FixedPointIndex::new(index);
            if !triangle.contains_vertex(index)
                && contained_in_circumcircle(positions, *point, tolerance)
            {
                result.push(DelaunayViolation {
                    triangle: *triangle,
                    kind: ViolationKind::PointInCircumcircle(index),
                });
            }
        }
    }
    result
}

/// Checks that the triangles form a consistently oriented manifold.
///
/// Every triangle must reference three distinct, valid points. An edge may be shared by at
/// most two triangles which must traverse it in opposite directions.
pub fn check_manifold(triangles: &[Triangle], num_points: usize) -> Result<(), ManifoldError> {
    let mut directed = HashSet::with_capacity(triangles.len() * 3);

    for triangle in triangles {
        let [v0, v1, v2] = triangle.vertices();
        if [v0, v1, v2].iter().any(|v| v.index() >= num_points) {
            return Err(ManifoldError::InvalidIndex(*triangle));
        }
        if v0 == v1 || v1 == v2 || v2 == v0 {
            return Err(ManifoldError::RepeatedVertex(*triangle));
        }

        for edge in triangle.edges() {
            if !directed.insert((edge.from(), edge.to())) {
                return Err(ManifoldError::DuplicateDirectedEdge(edge));
            }
        }
    }
    Ok(())
}
