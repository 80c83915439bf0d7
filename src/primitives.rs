use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable index of a point in a triangulation.
///
/// Points are numbered in insertion order. Indices 0, 1 and 2 always refer to the
/// super-triangle. An index is never reused or renumbered, not even by
/// [finalize](crate::Triangulation::finalize).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct FixedPointIndex(usize);

impl FixedPointIndex {
    /// Wraps a raw point index.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index into the point sequence.
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }

    /// Returns `true` if this index refers to one of the three super-triangle points.
    #[inline]
    pub const fn is_super_vertex(&self) -> bool {
        self.0 < 3
    }
}

impl From<FixedPointIndex> for usize {
    #[inline]
    fn from(index: FixedPointIndex) -> Self {
        index.0
    }
}

/// The indices of the three super-triangle points.
pub const SUPER_TRIANGLE_VERTICES: [FixedPointIndex; 3] = [
    FixedPointIndex::new(0),
    FixedPointIndex::new(1),
    FixedPointIndex::new(2),
];

/// An undirected edge connecting two points.
///
/// Two edges are equal if they connect the same points, regardless of direction:
///
/// ```
/// use bowyer_watson::{Edge, FixedPointIndex};
///
/// let a = FixedPointIndex::new(3);
/// let b = FixedPointIndex::new(7);
/// assert_eq!(Edge::new(a, b), Edge::new(b, a));
/// ```
///
/// The direction the edge was created with is still available through [Edge::from] and
/// [Edge::to]; triangulation code uses it to keep track of winding order.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Edge {
    from: FixedPointIndex,
    to: FixedPointIndex,
}

impl Edge {
    /// Creates a new edge from `from` to `to`.
    #[inline]
    pub const fn new(from: FixedPointIndex, to: FixedPointIndex) -> Self {
        Self { from, to }
    }

    /// The point this edge was created from.
    #[inline]
    pub fn from(&self) -> FixedPointIndex {
        self.from
    }

    /// The point this edge was created towards.
    #[inline]
    pub fn to(&self) -> FixedPointIndex {
        self.to
    }

    /// Returns both end points as array `[from, to]`.
    #[inline]
    pub fn vertices(&self) -> [FixedPointIndex; 2] {
        [self.from, self.to]
    }

    /// Returns the same edge with swapped direction.
    #[inline]
    pub fn reversed(&self) -> Self {
        Self::new(self.to, self.from)
    }

    /// Returns `true` if `vertex` is one of the end points.
    #[inline]
    pub fn contains(&self, vertex: FixedPointIndex) -> bool {
        self.from == vertex || self.to == vertex
    }

    fn key(&self) -> (FixedPointIndex, FixedPointIndex) {
        if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Edge) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// A triangle given by three point indices in counterclockwise order.
///
/// The triangle's edges are `v0 -> v1`, `v1 -> v2` and `v2 -> v0`. Equality compares the
/// ordered triple; use [Triangle::has_same_vertices] to compare regardless of order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Triangle {
    vertices: [FixedPointIndex; 3],
}

impl Triangle {
    /// Creates a triangle from three point indices.
    #[inline]
    pub const fn new(v0: FixedPointIndex, v1: FixedPointIndex, v2: FixedPointIndex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Returns the triangle's vertices in winding order.
    #[inline]
    pub fn vertices(&self) -> [FixedPointIndex; 3] {
        self.vertices
    }

    /// Returns the raw point indices, e.g. for building a renderer's index buffer.
    #[inline]
    pub fn indices(&self) -> [usize; 3] {
        let [v0, v1, v2] = self.vertices;
        [v0.index(), v1.index(), v2.index()]
    }

    /// Returns the three directed edges in winding order.
    #[inline]
    pub fn edges(&self) -> [Edge; 3] {
        let [v0, v1, v2] = self.vertices;
        [Edge::new(v0, v1), Edge::new(v1, v2), Edge::new(v2, v0)]
    }

    /// Returns `true` if `vertex` is one of the triangle's corners.
    #[inline]
    pub fn contains_vertex(&self, vertex: FixedPointIndex) -> bool {
        self.vertices.contains(&vertex)
    }

    /// Returns `true` if any corner is a super-triangle point.
    #[inline]
    pub fn touches_super_triangle(&self) -> bool {
        self.vertices.iter().any(|v| v.is_super_vertex())
    }

    /// Returns `true` if both triangles use the same three points, in any order.
    pub fn has_same_vertices(&self, other: &Triangle) -> bool {
        let mut lhs = self.vertices;
        let mut rhs = other.vertices;
        lhs.sort_unstable();
        rhs.sort_unstable();
        lhs == rhs
    }
}
