use crate::math::{Point3, Vector3};

/// A plane `ax + by + cz + d = 0` fitted through a point cluster.
///
/// `(a, b, c)` comes straight out of a singular value decomposition and is
/// unit length in practice, but nothing here enforces it. The centroid the
/// fit pivoted on is kept alongside the coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedPlane {
    normal: Vector3,
    d: f64,
    centroid: Point3,
}

impl FittedPlane {
    /// Creates a plane through `centroid` with the given normal.
    #[must_use]
    pub fn through(centroid: Point3, normal: Vector3) -> Self {
        let d = -normal.dot(&centroid.coords);
        Self {
            normal,
            d,
            centroid,
        }
    }

    /// Returns the normal vector `(a, b, c)`.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Returns the constant term `d`.
    #[must_use]
    pub fn d(&self) -> f64 {
        self.d
    }

    /// Returns the centroid the plane passes through.
    #[must_use]
    pub fn centroid(&self) -> &Point3 {
        &self.centroid
    }

    /// Returns `[a, b, c, d]`.
    #[must_use]
    pub fn coefficients(&self) -> [f64; 4] {
        [self.normal.x, self.normal.y, self.normal.z, self.d]
    }

    /// Evaluates `ax + by + cz + d` at `point`.
    ///
    /// This is the signed orthogonal distance when the normal is unit length.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        self.normal.dot(&point.coords) + self.d
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn passes_through_centroid() {
        let centroid = Point3::new(1.0, 2.0, 3.0);
        let plane = FittedPlane::through(centroid, Vector3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(plane.d(), -3.0);
        assert_relative_eq!(plane.signed_distance(&centroid), 0.0);
    }

    #[test]
    fn signed_distance_follows_normal() {
        let plane = FittedPlane::through(Point3::origin(), Vector3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(plane.signed_distance(&Point3::new(2.5, 7.0, -1.0)), 2.5);
        assert_relative_eq!(plane.signed_distance(&Point3::new(-0.5, 0.0, 0.0)), -0.5);
    }

    #[test]
    fn coefficients_order() {
        let plane = FittedPlane::through(Point3::new(0.0, 4.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(plane.coefficients(), [0.0, 1.0, 0.0, -4.0]);
    }
}
