// Copyright 2017 The Spade Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Bowyer-Watson
//! An incremental two dimensional Delaunay triangulation, built with the Bowyer–Watson
//! algorithm.
//!
//! # Features
//! * Points are inserted one at a time into a [Triangulation]. The triangulation satisfies
//!   the Delaunay property after each insertion.
//! * All points must lie inside a configurable *super-triangle* which surrounds the area of
//!   interest. It can be removed once all points are inserted, see [Triangulation::finalize].
//! * Degenerate insertions (duplicate points, points outside of the super-triangle, cavities
//!   that cannot be re-triangulated) are rejected without modifying the triangulation.
//! * Orientation and incircle tests use exact predicates, so the result does not depend on
//!   the super-triangle's size. Cocircular points never count as inside a circumcircle.
//! * Supports `f32` and `f64` coordinates.
//! * The resulting [TriangleMesh] offers plain index and vertex buffers for rendering.
//!
//! # Example
//! ```
//! use bowyer_watson::{Point2, Triangulation};
//!
//! let mut triangulation = Triangulation::new(100.0)?;
//! triangulation.insert_all([
//!     Point2::new(0.0, 0.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(10.0, 10.0),
//!     Point2::new(0.0, 10.0),
//! ])?;
//! triangulation.sanity_check();
//!
//! let mesh = triangulation.finalize(true);
//! // The square is split into two triangles
//! assert_eq!(mesh.num_triangles(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Cargo features
//! * `serde`: Derives `Serialize` and `Deserialize` for points, triangles, triangulations and
//!   meshes.

#![warn(missing_docs)]

mod cavity;
mod error;
mod matrix3;
mod mesh;
mod point;
mod primitives;
mod triangulation;
mod validation;

pub mod math;

#[cfg(test)]
mod test_utilities;

pub use crate::error::{ConfigError, DegenerateInsertionError, InsertionError};
pub use crate::math::{
    circumcircle, contained_in_circumcircle, in_circumcircle, in_circumcircle_with_tolerance,
    mitigate_underflow, side_query, validate_coordinate, validate_point, Circumcircle, LineSideInfo,
    COLLINEAR_EPSILON, DEFAULT_COCIRCULAR_TOLERANCE, MAX_ALLOWED_VALUE, MIN_ALLOWED_VALUE,
};
pub use crate::matrix3::Matrix3;
pub use crate::mesh::TriangleMesh;
pub use crate::point::{MeshNum, Point2};
pub use crate::primitives::{Edge, FixedPointIndex, Triangle, SUPER_TRIANGLE_VERTICES};
pub use crate::triangulation::{Triangulation, TriangulationConfig};
pub use crate::validation::{
    check_manifold, find_delaunay_violations, DelaunayViolation, ManifoldError, ViolationKind,
};
