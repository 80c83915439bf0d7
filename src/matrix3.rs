use crate::MeshNum;

/// A 3×3 matrix stored as 9 values in row-major order.
///
/// Only used to evaluate the determinants of the circumcircle construction, see
/// [circumcircle](crate::circumcircle).
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Matrix3<S> {
    values: [S; 9],
}

impl<S: MeshNum> Matrix3<S> {
    /// Creates a matrix from 9 values in row-major order.
    #[inline]
    pub const fn new(values: [S; 9]) -> Self {
        Self { values }
    }

    /// Creates a matrix from its three rows.
    #[inline]
    pub fn from_rows(rows: [[S; 3]; 3]) -> Self {
        let [[m0, m1, m2], [m3, m4, m5], [m6, m7, m8]] = rows;
        Self::new([m0, m1, m2, m3, m4, m5, m6, m7, m8])
    }

    /// Returns the matrix values in row-major order.
    pub fn values(&self) -> &[S; 9] {
        &self.values
    }

    /// Calculates the determinant by cofactor expansion.
    ///
    /// The result is not guarded in any way. Callers that divide by it need to check for
    /// values close to zero first.
    pub fn determinant(&self) -> S {
        let m = &self.values;
        m[0] * m[4] * m[8] + m[1] * m[5] * m[6] + m[2] * m[3] * m[7]
            - m[2] * m[4] * m[6]
            - m[1] * m[3] * m[8]
            - m[0] * m[5] * m[7]
    }
}
