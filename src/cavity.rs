use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::math::contained_in_circumcircle;
use crate::{DegenerateInsertionError, Edge, FixedPointIndex, MeshNum, Point2, Triangle};

/// The region that needs to be retriangulated when a point is inserted.
///
/// Consists of all triangles whose circumcircle contains the new point ("bad" triangles)
/// and the directed edges bounding their union.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Cavity {
    /// Indices into the triangle list, ascending.
    pub bad_triangles: SmallVec<[usize; 16]>,
    /// Boundary edges, directed as in their (counterclockwise) bad triangle.
    pub boundary: SmallVec<[Edge; 16]>,
}

impl Cavity {
    /// Collects the cavity of `position`.
    ///
    /// A triangle is bad if [contained_in_circumcircle] holds for `position` with the given
    /// `tolerance`.
    ///
    /// Fails if no circumcircle contains the point or if the boundary edges are not a single
    /// closed loop.
    pub fn find<S: MeshNum>(
        points: &[Point2<S>],
        triangles: &[Triangle],
        position: Point2<S>,
        tolerance: f64,
    ) -> Result<Self, DegenerateInsertionError> {
        let bad_triangles: SmallVec<[usize; 16]> = triangles
            .iter()
            .enumerate()
            .filter(|(_, triangle)| {
                let positions = triangle.vertices().map(|v| points[v.index()]);
                contained_in_circumcircle(positions, position, tolerance)
            })
            .map(|(index, _)| index)
            .collect();

        if bad_triangles.is_empty() {
            return Err(DegenerateInsertionError::EmptyCavity);
        }

        let mut edge_count: HashMap<Edge, u32> = HashMap::with_capacity(bad_triangles.len() * 3);
        for &index in &bad_triangles {
            for edge in triangles[index].edges() {
                *edge_count.entry(edge).or_insert(0) += 1;
            }
        }

        // Edges shared by two bad triangles lie inside the cavity. Iterating the triangles
        // (and not the map) keeps the boundary order deterministic.
        let boundary: SmallVec<[Edge; 16]> = bad_triangles
            .iter()
            .flat_map(|&index| triangles[index].edges())
            .filter(|edge| edge_count.get(edge) == Some(&1))
            .collect();

        check_closed_loop(&boundary)?;

        Ok(Cavity {
            bad_triangles,
            boundary,
        })
    }

    /// The triangles filling this cavity after `new_vertex` has been inserted.
    pub fn fan(&self, new_vertex: FixedPointIndex) -> impl Iterator<Item = Triangle> + '_ {
        self.boundary
            .iter()
            .map(move |edge| Triangle::new(edge.from(), edge.to(), new_vertex))
    }
}

/// Checks that the directed edges form exactly one simple cycle.
fn check_closed_loop(boundary: &[Edge]) -> Result<(), DegenerateInsertionError> {
    if boundary.len() < 3 {
        return Err(DegenerateInsertionError::OpenBoundary);
    }

    let mut next: HashMap<FixedPointIndex, FixedPointIndex> =
        HashMap::with_capacity(boundary.len());
    for edge in boundary {
        if next.insert(edge.from(), edge.to()).is_some() {
            // Two boundary edges leave the same vertex: the cavity touches itself.
            return Err(DegenerateInsertionError::OpenBoundary);
        }
    }

    let start = boundary[0].from();
    let mut current = start;
    for step in 1..=boundary.len() {
        current = *next
            .get(&current)
            .ok_or(DegenerateInsertionError::OpenBoundary)?;
        if current == start {
            // A shorter cycle means the boundary consists of several loops.
            return if step == boundary.len() {
                Ok(())
            } else {
                Err(DegenerateInsertionError::OpenBoundary)
            };
        }
    }
    Err(DegenerateInsertionError::OpenBoundary)
}

#[cfg(test)]
mod test {
    use super::{check_closed_loop, Cavity};
    use crate::{DegenerateInsertionError, Edge, FixedPointIndex, Point2, Triangle};

    fn idx(index: usize) -> FixedPointIndex {
        FixedPointIndex::new(index)
    }

    fn edge(from: usize, to: usize) -> Edge {
        Edge::new(idx(from), idx(to))
    }

    fn square() -> (Vec<Point2<f64>>, Vec<Triangle>) {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let triangles = vec![
            Triangle::new(idx(0), idx(1), idx(2)),
            Triangle::new(idx(0), idx(2), idx(3)),
        ];
        (points, triangles)
    }

    #[test]
    fn test_square_cavity() {
        let (points, triangles) = square();
        // Both triangles share the circumcircle of the square
        let cavity = Cavity::find(&points, &triangles, Point2::new(0.9, 0.1), 0.0).unwrap();
        assert_eq!(cavity.bad_triangles.as_slice(), &[0, 1]);
        assert_eq!(
            cavity.boundary.as_slice(),
            &[edge(0, 1), edge(1, 2), edge(2, 3), edge(3, 0)]
        );
        // Boundary keeps the triangles' directions
        assert_eq!(cavity.boundary[3].from(), idx(3));

        let fan: Vec<_> = cavity.fan(idx(4)).collect();
        assert_eq!(fan.len(), 4);
        assert!(fan.iter().all(|t| t.contains_vertex(idx(4))));
    }

    #[test]
    fn test_empty_cavity() {
        let (points, triangles) = square();
        assert_eq!(
            Cavity::find(&points, &triangles, Point2::new(5.0, 5.0), 0.0),
            Err(DegenerateInsertionError::EmptyCavity)
        );
    }

    #[test]
    fn test_closed_loop() {
        assert!(check_closed_loop(&[edge(0, 1), edge(1, 2), edge(2, 0)]).is_ok());
        assert!(check_closed_loop(&[edge(2, 0), edge(0, 1), edge(3, 2), edge(1, 3)]).is_ok());
    }

    #[test]
    fn test_open_loops() {
        use DegenerateInsertionError::OpenBoundary;

        assert_eq!(check_closed_loop(&[]), Err(OpenBoundary));
        assert_eq!(check_closed_loop(&[edge(0, 1), edge(1, 0)]), Err(OpenBoundary));
        // Missing closing edge
        assert_eq!(
            check_closed_loop(&[edge(0, 1), edge(1, 2), edge(2, 3)]),
            Err(OpenBoundary)
        );
        // Two disjoint cycles
        assert_eq!(
            check_closed_loop(&[
                edge(0, 1),
                edge(1, 2),
                edge(2, 0),
                edge(3, 4),
                edge(4, 5),
                edge(5, 3)
            ]),
            Err(OpenBoundary)
        );
        // Figure eight through vertex 0
        assert_eq!(
            check_closed_loop(&[
                edge(0, 1),
                edge(1, 2),
                edge(2, 0),
                edge(0, 3),
                edge(3, 4),
                edge(4, 0)
            ]),
            Err(OpenBoundary)
        );
    }
}
