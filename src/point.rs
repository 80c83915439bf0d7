use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A coordinate type that can be used with a triangulation.
///
/// The geometric predicates convert coordinates into `f64`, both for exact orientation tests
/// and for circumcircle calculations.
///
/// This type should usually be either `f32` or `f64`.
pub trait MeshNum: Float + Into<f64> + From<f32> + Copy + std::fmt::Debug {}

impl<T> MeshNum for T where T: Float + Into<f64> + From<f32> + Copy + std::fmt::Debug {}

/// A two dimensional point.
///
/// This is the basic type used for positions and, since the triangulation never needs to
/// tell them apart, also for 2D vectors (the difference of two points).
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Point2<S> {
    /// The point's x coordinate
    pub x: S,
    /// The point's y coordinate
    pub y: S,
}

impl<S> Point2<S> {
    /// Creates a new point.
    #[inline]
    pub const fn new(x: S, y: S) -> Self {
        Point2 { x, y }
    }
}

impl<S: MeshNum> Point2<S> {
    /// Returns the squared distance of this point and another point.
    #[inline]
    pub fn distance_2(&self, other: Self) -> S {
        self.sub(other).squared_length()
    }

    /// Returns the squared length of this vector.
    #[inline]
    pub fn squared_length(&self) -> S {
        self.x * self.x + self.y * self.y
    }

    /// Returns the component wise difference `self - other`.
    #[inline]
    pub fn sub(&self, other: Self) -> Self {
        Point2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Returns the component wise sum `self + other`.
    #[inline]
    pub fn add(&self, other: Self) -> Self {
        Point2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Scales both components by `factor`.
    #[inline]
    pub fn mul(&self, factor: S) -> Self {
        Point2 {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Returns the dot product of two vectors.
    #[inline]
    pub fn dot(&self, other: Self) -> S {
        self.x * other.x + self.y * other.y
    }

    pub(crate) fn to_f64(self) -> Point2<f64> {
        Point2::new(self.x.into(), self.y.into())
    }
}

impl<S: MeshNum> From<Point2<S>> for [S; 2] {
    #[inline]
    fn from(point: Point2<S>) -> Self {
        [point.x, point.y]
    }
}

impl<S: MeshNum> From<Point2<S>> for (S, S) {
    #[inline]
    fn from(point: Point2<S>) -> (S, S) {
        (point.x, point.y)
    }
}

impl<S: MeshNum> From<[S; 2]> for Point2<S> {
    #[inline]
    fn from(source: [S; 2]) -> Self {
        Self::new(source[0], source[1])
    }
}

impl<S: MeshNum> From<(S, S)> for Point2<S> {
    #[inline]
    fn from(source: (S, S)) -> Self {
        Self::new(source.0, source.1)
    }
}
