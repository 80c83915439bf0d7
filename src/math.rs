//! Geometric predicates and coordinate validation.
//!
//! Orientation and incircle tests are exact, they are evaluated with adaptive precision
//! arithmetic on the `f64` representation of the coordinates. The closed-form
//! [circumcircle] and its tolerant [in_circumcircle] test are plain floating point.

use crate::{InsertionError, Matrix3, MeshNum, Point2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest non-zero coordinate magnitude accepted by [validate_coordinate], 2<sup>-142</sup>.
///
/// Smaller magnitudes may underflow inside the exact predicates. Use [mitigate_underflow]
/// to flush such coordinates to zero.
pub const MIN_ALLOWED_VALUE: f64 = 1.793662034335766e-43;

/// Largest coordinate magnitude accepted by [validate_coordinate], 2<sup>201</sup>.
///
/// Infinite coordinates exceed this limit as well.
pub const MAX_ALLOWED_VALUE: f64 = 3.2138760885179806e60;

/// Relative tolerance used by [in_circumcircle].
///
/// A point counts as inside a circumcircle only if its squared distance to the center is
/// smaller than `radius_2 * (1 - DEFAULT_COCIRCULAR_TOLERANCE)`. Points on the circle or
/// within this band are treated as *not* inside.
pub const DEFAULT_COCIRCULAR_TOLERANCE: f64 = 1.0e-10;

/// Relative threshold below which three points are considered collinear by [circumcircle].
///
/// Compared against the signed area determinant divided by the largest squared edge length
/// adjacent to the first point.
pub const COLLINEAR_EPSILON: f64 = 1.0e-12;

/// Checks that a coordinate can be passed to the exact predicates.
///
/// Returns [InsertionError::NAN] for NaN, [InsertionError::TooLarge] for magnitudes above
/// [MAX_ALLOWED_VALUE] (including infinities) and [InsertionError::TooSmall] for non-zero
/// magnitudes below [MIN_ALLOWED_VALUE].
pub fn validate_coordinate<S: MeshNum>(value: S) -> Result<(), InsertionError> {
    let value: f64 = value.into();
    let magnitude = value.abs();
    if value.is_nan() {
        Err(InsertionError::NAN)
    } else if magnitude > MAX_ALLOWED_VALUE {
        Err(InsertionError::TooLarge)
    } else if magnitude != 0.0 && magnitude < MIN_ALLOWED_VALUE {
        Err(InsertionError::TooSmall)
    } else {
        Ok(())
    }
}

/// Checks both coordinates of a point, see [validate_coordinate].
pub fn validate_point<S: MeshNum>(point: Point2<S>) -> Result<(), InsertionError> {
    validate_coordinate(point.x)?;
    validate_coordinate(point.y)
}

/// Flushes coordinates that are too small for insertion to zero.
///
/// # Example
/// ```
/// use bowyer_watson::{InsertionError, Point2, Triangulation};
///
/// let mut triangulation = Triangulation::new(100.0)?;
///
/// let tiny = Point2::new(1.0e-44, 42.0);
/// assert_eq!(triangulation.insert(tiny), Err(InsertionError::TooSmall));
///
/// let flushed = bowyer_watson::mitigate_underflow(tiny);
/// assert_eq!(flushed, Point2::new(0.0, 42.0));
/// assert!(triangulation.insert(flushed).is_ok());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn mitigate_underflow(position: Point2<f64>) -> Point2<f64> {
    let flush = |value: f64| {
        if value.abs() < MIN_ALLOWED_VALUE {
            0.0
        } else {
            value
        }
    };
    Point2::new(flush(position.x), flush(position.y))
}

/// The exact result of [side_query].
#[derive(Debug, Clone, Copy)]
pub struct LineSideInfo {
    signed_side: f64,
}

impl LineSideInfo {
    /// Returns `true` if the point lies strictly left of the line.
    pub fn is_on_left_side(&self) -> bool {
        self.signed_side > 0.0
    }

    /// Returns `true` if the point lies left of the line or on it.
    pub fn is_on_left_side_or_on_line(&self) -> bool {
        self.signed_side >= 0.0
    }
}

fn to_robust_coord<S: MeshNum>(point: Point2<S>) -> robust::Coord<f64> {
    let point = point.to_f64();
    robust::Coord {
        x: point.x,
        y: point.y,
    }
}

/// Determines on which side of the directed line `from -> to` the query point lies.
///
/// Uses an exact orientation predicate, the result is never affected by rounding errors.
pub fn side_query<S: MeshNum>(
    from: Point2<S>,
    to: Point2<S>,
    query_point: Point2<S>,
) -> LineSideInfo {
    LineSideInfo {
        signed_side: robust::orient2d(
            to_robust_coord(from),
            to_robust_coord(to),
            to_robust_coord(query_point),
        ),
    }
}

/// Returns `true` if `query_point` lies strictly inside the circumcircle of a
/// counterclockwise triangle.
///
/// The sign of the incircle determinant is evaluated exactly, so the result does not depend
/// on the triangle's size or its distance from the origin. Cocircular points are never
/// inside.
///
/// A positive `tolerance` additionally requires the determinant, divided by
/// `l0 * l1 * l2 * max(l0, l1, l2)` with `li` being the distances from `query_point` to the
/// corners, to exceed `tolerance`. This normalized value is dimensionless and never larger
/// than 3, it approaches zero as the point approaches the circle.
pub fn contained_in_circumcircle<S: MeshNum>(
    positions: [Point2<S>; 3],
    query_point: Point2<S>,
    tolerance: f64,
) -> bool {
    let [v0, v1, v2] = positions.map(to_robust_coord);
    let determinant = robust::incircle(v0, v1, v2, to_robust_coord(query_point));
    if determinant <= 0.0 {
        return false;
    }
    if tolerance <= 0.0 {
        return true;
    }

    let query_point = query_point.to_f64();
    let [l0, l1, l2] = positions.map(|p| p.to_f64().distance_2(query_point).sqrt());
    let scale = l0 * l1 * l2 * l0.max(l1).max(l2);
    determinant / scale > tolerance
}

/// Returns `true` if the three points are ordered counterclockwise or are collinear.
pub fn is_ordered_ccw<S: MeshNum>(p1: Point2<S>, p2: Point2<S>, query_point: Point2<S>) -> bool {
    side_query(p1, p2, query_point).is_on_left_side_or_on_line()
}

/// Returns `true` if the three points are ordered strictly counterclockwise.
pub fn is_strictly_ccw<S: MeshNum>(positions: [Point2<S>; 3]) -> bool {
    let [v0, v1, v2] = positions;
    side_query(v0, v1, v2).is_on_left_side()
}

/// Returns `true` if `query_point` lies inside or on the border of a counterclockwise triangle.
pub fn triangle_contains<S: MeshNum>(positions: [Point2<S>; 3], query_point: Point2<S>) -> bool {
    (0..3).all(|i| is_ordered_ccw(positions[i], positions[(i + 1) % 3], query_point))
}

/// Returns `true` if `query_point` lies strictly inside a counterclockwise triangle.
pub fn triangle_strictly_contains<S: MeshNum>(
    positions: [Point2<S>; 3],
    query_point: Point2<S>,
) -> bool {
    (0..3).all(|i| side_query(positions[i], positions[(i + 1) % 3], query_point).is_on_left_side())
}

/// Returns the (unsigned) area of a triangle.
pub fn triangle_area<S: MeshNum>(positions: [Point2<S>; 3]) -> S {
    let [v0, v1, v2] = positions;
    let b = v1.sub(v0);
    let c = v2.sub(v0);
    (b.x * c.y - b.y * c.x).abs() * 0.5.into()
}

/// The circle passing through the three corners of a triangle.
///
/// Circumcircles are derived on demand and never stored by the triangulation.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Circumcircle<S> {
    /// The circle's center.
    pub center: Point2<S>,
    /// The circle's squared radius.
    pub radius_2: S,
}

impl<S: MeshNum> Circumcircle<S> {
    /// Returns the circle's radius.
    pub fn radius(&self) -> S {
        self.radius_2.sqrt()
    }

    /// Returns `true` if `point` lies strictly inside this circle, see [in_circumcircle].
    pub fn contains(&self, point: Point2<S>) -> bool {
        in_circumcircle(point, self)
    }
}

/// Calculates the circle passing through three points.
///
/// The circle equation `a·(x² + y²) + b_x·x + b_y·y + c = 0` is solved with Cramer's rule,
/// each coefficient being a [Matrix3] determinant. The points are translated so that
/// `a` becomes the origin before any determinant is evaluated.
///
/// Returns `None` if the points are collinear or too close to being collinear for the
/// division by the signed area determinant to be meaningful.
///
/// # Example
/// ```
/// use bowyer_watson::{circumcircle, Point2};
///
/// let circle = circumcircle(
///     Point2::new(1.0, 0.0),
///     Point2::new(0.0, 1.0),
///     Point2::new(-1.0, 0.0),
/// ).unwrap();
///
/// assert_eq!(circle.center, Point2::new(0.0, 0.0));
/// assert_eq!(circle.radius_2, 1.0);
/// ```
pub fn circumcircle<S: MeshNum>(
    a: Point2<S>,
    b: Point2<S>,
    c: Point2<S>,
) -> Option<Circumcircle<S>> {
    let zero = S::zero();
    let one = S::one();
    let two = one + one;

    let p1 = Point2::new(zero, zero);
    let p2 = b.sub(a);
    let p3 = c.sub(a);

    let s1 = p1.squared_length();
    let s2 = p2.squared_length();
    let s3 = p3.squared_length();

    let det_a =
        Matrix3::from_rows([[p1.x, p1.y, one], [p2.x, p2.y, one], [p3.x, p3.y, one]]).determinant();

    let scale: f64 = s2.max(s3).into();
    let signed_area: f64 = det_a.into();
    if !signed_area.is_finite() || signed_area.abs() <= scale * COLLINEAR_EPSILON {
        return None;
    }

    let b_x = -Matrix3::from_rows([[s1, p1.y, one], [s2, p2.y, one], [s3, p3.y, one]]).determinant();
    let b_y = Matrix3::from_rows([[s1, p1.x, one], [s2, p2.x, one], [s3, p3.x, one]]).determinant();

    let relative_center = Point2::new(-b_x / (two * det_a), -b_y / (two * det_a));
    if !relative_center.x.is_finite() || !relative_center.y.is_finite() {
        return None;
    }

    Some(Circumcircle {
        center: relative_center.add(a),
        radius_2: relative_center.squared_length(),
    })
}

/// Returns `true` if `point` lies strictly inside `circle`.
///
/// Points that are cocircular, or nearly so (see [DEFAULT_COCIRCULAR_TOLERANCE]), are
/// *not* inside.
pub fn in_circumcircle<S: MeshNum>(point: Point2<S>, circle: &Circumcircle<S>) -> bool {
    in_circumcircle_with_tolerance(point, circle, DEFAULT_COCIRCULAR_TOLERANCE)
}

/// Like [in_circumcircle] with a custom relative tolerance.
///
/// A tolerance of zero turns this into a plain strict comparison of squared distances.
pub fn in_circumcircle_with_tolerance<S: MeshNum>(
    point: Point2<S>,
    circle: &Circumcircle<S>,
    tolerance: f64,
) -> bool {
    let distance_2: f64 = point.distance_2(circle.center).into();
    let radius_2: f64 = circle.radius_2.into();
    distance_2 < radius_2 - radius_2 * tolerance
}

#[cfg(test)]
mod test {
    use super::{
        circumcircle, contained_in_circumcircle, in_circumcircle, in_circumcircle_with_tolerance,
        mitigate_underflow, side_query, triangle_area, triangle_contains,
        triangle_strictly_contains, validate_coordinate, validate_point, MAX_ALLOWED_VALUE,
        MIN_ALLOWED_VALUE,
    };
    use crate::{InsertionError, Point2};
    use approx::assert_relative_eq;
    use float_next_after::NextAfter;

    #[test]
    fn test_coordinate_limits() {
        assert_eq!(MIN_ALLOWED_VALUE, 2.0f64.powi(-142));
        assert_eq!(MAX_ALLOWED_VALUE, 2.0f64.powi(201));

        assert_eq!(validate_coordinate(MIN_ALLOWED_VALUE), Ok(()));
        assert_eq!(validate_coordinate(-MAX_ALLOWED_VALUE), Ok(()));
        assert_eq!(validate_coordinate(-0.0), Ok(()));
        assert_eq!(validate_coordinate(f32::MIN_POSITIVE), Ok(()));
        assert_eq!(validate_coordinate(f32::MAX), Ok(()));

        assert_eq!(
            validate_coordinate(MIN_ALLOWED_VALUE.next_after(0.0)),
            Err(InsertionError::TooSmall)
        );
        assert_eq!(
            validate_coordinate(MAX_ALLOWED_VALUE.next_after(f64::INFINITY)),
            Err(InsertionError::TooLarge)
        );
        assert_eq!(
            validate_coordinate(f32::NEG_INFINITY),
            Err(InsertionError::TooLarge)
        );
        assert_eq!(validate_coordinate(f64::NAN), Err(InsertionError::NAN));
        assert_eq!(
            validate_point(Point2::new(1.0, f64::NAN)),
            Err(InsertionError::NAN)
        );
    }

    #[test]
    fn test_mitigate_underflow() {
        let tiny = Point2::new(
            MIN_ALLOWED_VALUE.next_after(0.0),
            (-MIN_ALLOWED_VALUE).next_after(0.0),
        );
        assert!(validate_point(tiny).is_err());
        let flushed = mitigate_underflow(tiny);
        assert_eq!(flushed, Point2::new(0.0, 0.0));
        assert_eq!(validate_point(flushed), Ok(()));

        let valid = Point2::new(MIN_ALLOWED_VALUE, -3.5);
        assert_eq!(mitigate_underflow(valid), valid);
        assert!(mitigate_underflow(Point2::new(f64::NAN, 0.0)).x.is_nan());
    }

    #[test]
    fn test_side_query() {
        let from = Point2::new(0.0, 0.0);
        let to = Point2::new(1.0, 1.0);

        let left = side_query(from, to, Point2::new(0.0, 1.0));
        assert!(left.is_on_left_side());
        assert!(left.is_on_left_side_or_on_line());

        let right = side_query(from, to, Point2::new(1.0, 0.0));
        assert!(!right.is_on_left_side_or_on_line());

        let on_line = side_query(from, to, Point2::new(0.5, 0.5));
        assert!(!on_line.is_on_left_side());
        assert!(on_line.is_on_left_side_or_on_line());
    }

    #[test]
    fn test_contained_in_circumcircle() {
        let triangle = [
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(-1.0, 0.0),
        ];
        assert!(contained_in_circumcircle(triangle, Point2::new(0.0, 0.0), 0.0));
        assert!(contained_in_circumcircle(triangle, Point2::new(0.3, -0.9), 0.0));
        assert!(!contained_in_circumcircle(triangle, Point2::new(1.0, 1.0), 0.0));
        // Cocircular points and corners are outside
        assert!(!contained_in_circumcircle(triangle, Point2::new(0.0, -1.0), 0.0));
        assert!(!contained_in_circumcircle(triangle, Point2::new(-1.0, 0.0), 0.0));

        // The normalized determinant is 2.0 at the center and 0.5333 at (0, -0.5)
        assert!(contained_in_circumcircle(triangle, Point2::new(0.0, 0.0), 1.5));
        assert!(!contained_in_circumcircle(triangle, Point2::new(0.0, 0.0), 2.5));
        assert!(contained_in_circumcircle(triangle, Point2::new(0.0, -0.5), 0.5));
        assert!(!contained_in_circumcircle(triangle, Point2::new(0.0, -0.5), 0.6));
    }

    #[test]
    fn test_contained_in_huge_circumcircle() {
        // A triangle as created next to a large super-triangle: two far corners and one
        // corner close to the query point.
        let radius = 1.0e9;
        let triangle = [
            Point2::new(radius, 0.0),
            Point2::new(-0.5 * radius, 0.75f64.sqrt() * radius),
            Point2::new(0.0, 0.0),
        ];
        for tolerance in [0.0, 1.0e-10] {
            assert!(contained_in_circumcircle(triangle, Point2::new(1.0, 0.0), tolerance));
            assert!(contained_in_circumcircle(triangle, Point2::new(0.0, 1.0), tolerance));
            assert!(!contained_in_circumcircle(triangle, Point2::new(0.0, -1.0), tolerance));
        }
    }

    #[test]
    fn test_unit_circle() {
        let circle = circumcircle(
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(-1.0, 0.0),
        )
        .unwrap();
        assert_eq!(circle.center, Point2::new(0.0, 0.0));
        assert_eq!(circle.radius_2, 1.0);
        assert_eq!(circle.radius(), 1.0);
    }

    #[test]
    fn test_circumcircle_is_equidistant() {
        let (a, b, c) = (
            Point2::new(0.3, -1.2),
            Point2::new(4.0, 0.7),
            Point2::new(-2.5, 3.1),
        );
        let circle = circumcircle(a, b, c).unwrap();
        for p in [a, b, c] {
            assert_relative_eq!(p.distance_2(circle.center), circle.radius_2, epsilon = 1.0e-10);
        }
        // Vertex order doesn't matter
        let reversed = circumcircle(c, b, a).unwrap();
        assert_relative_eq!(reversed.center.x, circle.center.x, epsilon = 1.0e-10);
        assert_relative_eq!(reversed.center.y, circle.center.y, epsilon = 1.0e-10);
    }

    #[test]
    fn test_circumcircle_f32() {
        let circle = circumcircle(
            Point2::new(2.0f32, 0.0),
            Point2::new(4.0, 2.0),
            Point2::new(2.0, 4.0),
        )
        .unwrap();
        assert_relative_eq!(circle.center.x, 2.0);
        assert_relative_eq!(circle.center.y, 2.0);
        assert_relative_eq!(circle.radius_2, 4.0);
    }

    #[test]
    fn test_collinear_circumcircle() {
        assert!(circumcircle(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0)
        )
        .is_none());
        assert!(circumcircle(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0e9, 1.0e-9)
        )
        .is_none());
        // Duplicate points are collinear as well
        assert!(circumcircle(
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 3.0)
        )
        .is_none());
    }

    #[test]
    fn test_in_circumcircle() {
        let circle = circumcircle(
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(-1.0, 0.0),
        )
        .unwrap();
        assert!(in_circumcircle(Point2::new(0.0, 0.0), &circle));
        assert!(in_circumcircle(Point2::new(0.5, -0.5), &circle));
        assert!(circle.contains(Point2::new(0.0, 0.99)));
        assert!(!in_circumcircle(Point2::new(1.0, 1.0), &circle));
        assert!(!in_circumcircle(Point2::new(0.0, 1.01), &circle));
    }

    #[test]
    fn test_cocircular_point_is_not_inside() {
        let circle = circumcircle(
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(-1.0, 0.0),
        )
        .unwrap();
        assert!(!in_circumcircle(Point2::new(0.0, -1.0), &circle));
        assert!(!in_circumcircle(Point2::new(1.0, 0.0), &circle));

        // Within the tolerance band
        let nearly_on_circle = Point2::new(0.0, -(1.0 - 1.0e-13));
        assert!(!in_circumcircle(nearly_on_circle, &circle));
        assert!(in_circumcircle_with_tolerance(nearly_on_circle, &circle, 0.0));
    }

    #[test]
    fn test_triangle_helpers() {
        let t = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 2.0),
        ];
        assert_relative_eq!(triangle_area(t), 2.0);
        assert!(triangle_contains(t, Point2::new(0.5, 0.5)));
        assert!(triangle_contains(t, Point2::new(1.0, 0.0)));
        assert!(!triangle_strictly_contains(t, Point2::new(1.0, 0.0)));
        assert!(triangle_strictly_contains(t, Point2::new(0.25, 0.5)));
        assert!(!triangle_contains(t, Point2::new(2.0, 2.0)));
    }
}
