use std::{error::Error, fmt::Display};

use crate::{Edge, FixedPointIndex};

/// The error type used for inserting points into a triangulation.
///
/// Coordinates are validated first (see [crate::validate_coordinate]). A valid point may still
/// be rejected if the geometry around it cannot be retriangulated, see
/// [DegenerateInsertionError].
///
/// The triangulation is left unchanged whenever an insertion fails.
#[derive(Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Debug, Hash)]
pub enum InsertionError {
    /// A coordinate value was too small.
    ///
    /// The absolute value of any inserted coordinate must either be zero or greater
    /// than or equal to [crate::MIN_ALLOWED_VALUE].
    TooSmall,

    /// A coordinate value was too large.
    ///
    /// The absolute value of any inserted coordinate must be less than or equal to
    /// [crate::MAX_ALLOWED_VALUE].
    TooLarge,

    /// A coordinate value was NaN.
    NAN,

    /// The point could not be inserted without breaking the triangulation.
    Degenerate(DegenerateInsertionError),
}

impl Display for InsertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Debug>::fmt(self, f)
    }
}

impl Error for InsertionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            InsertionError::Degenerate(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<DegenerateInsertionError> for InsertionError {
    fn from(error: DegenerateInsertionError) -> Self {
        InsertionError::Degenerate(error)
    }
}

/// Describes why the boundary polygon of an insertion could not be resolved.
///
/// *See [crate::Triangulation::insert]*
#[derive(Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Debug, Hash)]
pub enum DegenerateInsertionError {
    /// A point with exactly the same position has already been inserted. Its index is given.
    DuplicatePoint(FixedPointIndex),

    /// The point does not lie strictly inside the super-triangle.
    ///
    /// Consider creating the triangulation with a larger super-triangle radius.
    OutsideSuperTriangle,

    /// No triangle's circumcircle contains the point.
    EmptyCavity,

    /// The edges bounding the removed triangles do not form a single closed loop.
    OpenBoundary,

    /// Connecting the point to the given boundary edge would not result in a strictly
    /// counterclockwise triangle.
    DegenerateTriangle(Edge),
}

impl Display for DegenerateInsertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Debug>::fmt(self, f)
    }
}

impl Error for DegenerateInsertionError {}

/// The error type used when creating a triangulation from an invalid configuration.
///
/// *See [crate::TriangulationConfig]*
#[derive(Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Debug, Hash)]
pub enum ConfigError {
    /// The super-triangle radius was not a positive, finite number small enough to pass
    /// [crate::validate_coordinate].
    InvalidRadius,

    /// The cocircular tolerance was negative, NaN or not smaller than one.
    InvalidTolerance,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Debug>::fmt(self, f)
    }
}

impl Error for ConfigError {}
