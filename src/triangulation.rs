use num_traits::NumCast;

use crate::cavity::Cavity;
use crate::math::{
    self, circumcircle, is_strictly_ccw, triangle_contains, triangle_strictly_contains,
    validate_point, Circumcircle,
};
use crate::mesh::{collect_edges, TriangleMesh};
use crate::validation::{check_manifold, find_delaunay_violations};
use crate::{
    ConfigError, DegenerateInsertionError, Edge, FixedPointIndex, InsertionError, MeshNum,
    Point2, Triangle, SUPER_TRIANGLE_VERTICES,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Controls how a [Triangulation] is created.
///
/// The following parameters will be used by `Self::default`:
/// * `super_triangle_radius`: 1000.0
/// * `cocircular_tolerance`: 0.0 (exact incircle test)
///
/// # Example
///
/// ```
/// use bowyer_watson::{Triangulation, TriangulationConfig};
///
/// let config = TriangulationConfig::new(50.0).with_cocircular_tolerance(1.0e-12);
/// let triangulation = Triangulation::<f64>::with_config(config)?;
/// assert_eq!(triangulation.num_points(), 3);
/// # Ok::<(), bowyer_watson::ConfigError>(())
/// ```
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct TriangulationConfig<S> {
    super_triangle_radius: S,
    cocircular_tolerance: f64,
}

impl<S: MeshNum> Default for TriangulationConfig<S> {
    fn default() -> Self {
        Self {
            super_triangle_radius: 1000.0.into(),
            cocircular_tolerance: 0.0,
        }
    }
}

impl<S: MeshNum> TriangulationConfig<S> {
    /// Creates a new configuration with the given super-triangle radius.
    pub fn new(super_triangle_radius: S) -> Self {
        Self::default().with_super_triangle_radius(super_triangle_radius)
    }

    /// Sets the circumradius of the super-triangle.
    ///
    /// All points inserted later must lie strictly inside the super-triangle. Its inscribed
    /// circle has half this radius, points within that distance of the origin can always
    /// be inserted.
    pub fn with_super_triangle_radius(mut self, radius: S) -> Self {
        self.super_triangle_radius = radius;
        self
    }

    /// Sets the tolerance of the incircle test that selects the triangles removed by an
    /// insertion, see [contained_in_circumcircle](crate::math::contained_in_circumcircle).
    ///
    /// The tolerance is compared against a dimensionless value and does not depend on the
    /// super-triangle's size. Zero selects exactly the triangles whose circumcircle strictly
    /// contains the new point. Larger values skip triangles whose circumcircle passes close to
    /// it, which may cause insertions to fail with [DegenerateInsertionError].
    ///
    /// Must be in the range `[0, 1)`.
    pub fn with_cocircular_tolerance(mut self, tolerance: f64) -> Self {
        self.cocircular_tolerance = tolerance;
        self
    }

    /// Returns the circumradius of the super-triangle.
    pub fn super_triangle_radius(&self) -> S {
        self.super_triangle_radius
    }

    /// Returns the tolerance of the incircle test.
    pub fn cocircular_tolerance(&self) -> f64 {
        self.cocircular_tolerance
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let radius = self.super_triangle_radius;
        if !(radius > S::zero()) || math::validate_coordinate(radius).is_err() {
            return Err(ConfigError::InvalidRadius);
        }
        if !(0.0..1.0).contains(&self.cocircular_tolerance) {
            return Err(ConfigError::InvalidTolerance);
        }
        Ok(())
    }
}

/// A two dimensional Delaunay triangulation that is built incrementally.
///
/// The triangulation starts out with a *super-triangle*: three points on a circle around the
/// origin (indices 0, 1 and 2) connected by a single triangle. Every point inserted later
/// must lie strictly inside of it. Each insertion runs the Bowyer–Watson algorithm: all
/// triangles whose circumcircle contains the new point are removed and the resulting hole is
/// filled by connecting its boundary to the new point.
///
/// After each successful insertion, no point lies strictly inside the circumcircle of any
/// triangle. Points exactly on a circumcircle count as outside. All triangles are ordered
/// counterclockwise.
///
/// # Example
/// ```
/// use bowyer_watson::{Point2, Triangulation};
///
/// let mut triangulation = Triangulation::new(10.0)?;
/// triangulation.insert(Point2::new(0.0, 0.0))?;
/// triangulation.insert([1.0, 0.5])?;
///
/// assert_eq!(triangulation.num_points(), 5);
/// assert_eq!(triangulation.num_triangles(), 5);
///
/// // Hand the result to a renderer, without the helper triangles around the inserted points
/// let mesh = triangulation.finalize(true);
/// for [i0, i1, i2] in mesh.triangle_indices() {
///     println!("{:?} {:?} {:?}", mesh.points()[i0], mesh.points()[i1], mesh.points()[i2]);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Degenerate input
/// An insertion fails with [InsertionError::Degenerate] if the point duplicates an existing
/// point, lies on or outside the super-triangle, or if the removed triangles do not bound a
/// region that can be filled with counterclockwise triangles. The triangulation is unchanged
/// after a failed insertion.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Triangulation<S> {
    points: Vec<Point2<S>>,
    triangles: Vec<Triangle>,
    config: TriangulationConfig<S>,
}

impl<S: MeshNum> Triangulation<S> {
    /// Creates a triangulation whose super-triangle has the given circumradius.
    pub fn new(super_triangle_radius: S) -> Result<Self, ConfigError> {
        Self::with_config(TriangulationConfig::new(super_triangle_radius))
    }

    /// Creates a triangulation from a configuration.
    ///
    /// The super-triangle's points are placed at 0°, 120° and 240°, resulting in the single
    /// counterclockwise triangle `(0, 1, 2)`.
    pub fn with_config(config: TriangulationConfig<S>) -> Result<Self, ConfigError> {
        config.validate()?;

        let radius = config.super_triangle_radius;
        let step: S =
            <S as NumCast>::from(std::f64::consts::TAU / 3.0).ok_or(ConfigError::InvalidRadius)?;

        let mut points = Vec::with_capacity(3);
        for i in [0.0f32, 1.0, 2.0] {
            let angle = step * i.into();
            points.push(Point2::new(radius * angle.cos(), radius * angle.sin()));
        }
        let [v0, v1, v2] = SUPER_TRIANGLE_VERTICES;

        Ok(Self {
            points,
            triangles: vec![Triangle::new(v0, v1, v2)],
            config,
        })
    }

    /// Returns the configuration this triangulation was created with.
    pub fn config(&self) -> &TriangulationConfig<S> {
        &self.config
    }

    /// Inserts a new point and restores the Delaunay property.
    ///
    /// Returns the new point's index. Indices are handed out in insertion order, the first
    /// inserted point receives index 3.
    ///
    /// The triangulation is left unchanged if an error is returned.
    pub fn insert(
        &mut self,
        position: impl Into<Point2<S>>,
    ) -> Result<FixedPointIndex, InsertionError> {
        let position = position.into();
        let result = self.insert_impl(position);
        if let Err(error) = &result {
            tracing::debug!(
                x = ?position.x,
                y = ?position.y,
                %error,
                "rejected point insertion"
            );
        }
        result
    }

    fn insert_impl(&mut self, position: Point2<S>) -> Result<FixedPointIndex, InsertionError> {
        validate_point(position)?;

        if let Some(existing) = self.find_point(position) {
            return Err(DegenerateInsertionError::DuplicatePoint(existing).into());
        }

        if !triangle_strictly_contains(self.super_triangle_positions(), position) {
            return Err(DegenerateInsertionError::OutsideSuperTriangle.into());
        }

        let cavity = Cavity::find(
            &self.points,
            &self.triangles,
            position,
            self.config.cocircular_tolerance,
        )?;

        for edge in &cavity.boundary {
            let positions = [self.position(edge.from()), self.position(edge.to()), position];
            if !is_strictly_ccw(positions) {
                return Err(DegenerateInsertionError::DegenerateTriangle(*edge).into());
            }
        }

        // Nothing below may fail, the triangulation is modified from here on.
        let new_index = FixedPointIndex::new(self.points.len());
        self.points.push(position);

        let mut bad_triangles = cavity.bad_triangles.iter().copied().peekable();
        let mut current = 0;
        self.triangles.retain(|_| {
            let is_bad = bad_triangles.next_if_eq(&current).is_some();
            current += 1;
            !is_bad
        });
        self.triangles.extend(cavity.fan(new_index));

        tracing::trace!(
            index = new_index.index(),
            removed = cavity.bad_triangles.len(),
            boundary = cavity.boundary.len(),
            "inserted point"
        );

        Ok(new_index)
    }

    /// Inserts all points in iteration order.
    ///
    /// Stops at the first point that cannot be inserted and returns its error. All points
    /// before it remain inserted.
    pub fn insert_all<P, I>(&mut self, positions: I) -> Result<(), InsertionError>
    where
        P: Into<Point2<S>>,
        I: IntoIterator<Item = P>,
    {
        for position in positions {
            self.insert(position)?;
        }
        Ok(())
    }

    /// Consumes the triangulation and returns its mesh.
    ///
    /// If `remove_super_triangle` is `true`, every triangle referencing one of the
    /// super-triangle's points is dropped. Points are never removed or renumbered, the
    /// super-triangle's points keep indices 0, 1 and 2.
    pub fn finalize(self, remove_super_triangle: bool) -> TriangleMesh<S> {
        let Triangulation {
            points,
            mut triangles,
            ..
        } = self;

        if remove_super_triangle {
            let before = triangles.len();
            triangles.retain(|triangle| !triangle.touches_super_triangle());
            tracing::debug!(
                removed = before - triangles.len(),
                remaining = triangles.len(),
                "removed super-triangle"
            );
        }

        TriangleMesh::new(points, triangles)
    }

    /// Returns an owned copy of the current points and triangles.
    pub fn snapshot(&self) -> TriangleMesh<S> {
        TriangleMesh::new(self.points.clone(), self.triangles.clone())
    }

    /// Returns all points in insertion order, including the super-triangle.
    pub fn points(&self) -> &[Point2<S>] {
        &self.points
    }

    /// Returns all triangles.
    ///
    /// The order of triangles is deterministic but changes with every insertion.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Returns the raw point indices of every triangle.
    pub fn triangle_indices(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.triangles.iter().map(Triangle::indices)
    }

    /// Returns all triangles that do not touch the super-triangle.
    pub fn inner_triangles(&self) -> impl Iterator<Item = &Triangle> + '_ {
        self.triangles
            .iter()
            .filter(|triangle| !triangle.touches_super_triangle())
    }

    /// Returns every undirected edge once, e.g. for drawing a wireframe.
    pub fn edges(&self) -> Vec<Edge> {
        collect_edges(&self.triangles)
    }

    /// The number of points, including the three super-triangle points.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// The number of triangles, including those touching the super-triangle.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// The number of triangles that do not touch the super-triangle.
    pub fn num_inner_triangles(&self) -> usize {
        self.inner_triangles().count()
    }

    /// Returns the position of a point or `None` if the index is out of range.
    pub fn point(&self, index: FixedPointIndex) -> Option<Point2<S>> {
        self.points.get(index.index()).copied()
    }

    /// Returns `true` if `index` refers to one of the super-triangle's points.
    pub fn is_super_vertex(&self, index: FixedPointIndex) -> bool {
        index.is_super_vertex()
    }

    /// Returns the positions of a triangle's corners.
    ///
    /// # Panics
    /// Panics if the triangle references points that don't belong to this triangulation.
    pub fn triangle_positions(&self, triangle: &Triangle) -> [Point2<S>; 3] {
        triangle.vertices().map(|vertex| self.position(vertex))
    }

    /// Returns the circumcircle of a triangle, `None` if its corners are (nearly) collinear.
    ///
    /// # Panics
    /// Panics if the triangle references points that don't belong to this triangulation.
    pub fn circumcircle_of(&self, triangle: &Triangle) -> Option<Circumcircle<S>> {
        let [v0, v1, v2] = self.triangle_positions(triangle);
        circumcircle(v0, v1, v2)
    }

    /// Returns a triangle containing `position`, either in its interior or on its border.
    ///
    /// Returns `None` for positions outside of the super-triangle.
    pub fn locate(&self, position: Point2<S>) -> Option<Triangle> {
        self.triangles
            .iter()
            .find(|triangle| triangle_contains(self.triangle_positions(triangle), position))
            .copied()
    }

    /// Checks the triangulation's invariants and panics if any of them is violated.
    ///
    /// Checked are: valid and distinct indices, counterclockwise orientation of every
    /// triangle, every edge being shared by at most two triangles, the triangle count of a
    /// triangulated triangle and the Delaunay property.
    pub fn sanity_check(&self) {
        if let Err(error) = check_manifold(&self.triangles, self.points.len()) {
            panic!("Triangulation is not manifold: {:?}", error);
        }

        for triangle in &self.triangles {
            assert!(
                is_strictly_ccw(self.triangle_positions(triangle)),
                "Triangle {:?} is not ordered counterclockwise",
                triangle
            );
        }

        // All points lie strictly inside the super-triangle, hence Euler's formula
        // determines the triangle count.
        assert_eq!(self.triangles.len(), 2 * self.points.len() - 5);

        let violations = find_delaunay_violations(
            &self.points,
            &self.triangles,
            self.config.cocircular_tolerance,
        );
        assert!(
            violations.is_empty(),
            "Found Delaunay violations: {:?}",
            violations
        );
    }

    fn find_point(&self, position: Point2<S>) -> Option<FixedPointIndex> {
        self.points
            .iter()
            .position(|point| *point == position)
            .map(FixedPointIndex::new)
    }

    fn position(&self, index: FixedPointIndex) -> Point2<S> {
        self.points[index.index()]
    }

    fn super_triangle_positions(&self) -> [Point2<S>; 3] {
        SUPER_TRIANGLE_VERTICES.map(|vertex| self.position(vertex))
    }
}
