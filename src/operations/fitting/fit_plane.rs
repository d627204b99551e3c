use nalgebra::DMatrix;

use crate::error::{GeometryError, Result};
use crate::geometry::FittedPlane;
use crate::math::{Point3, Vector3};

/// Iteration cap for the decomposition; convergence on 3 columns takes a handful.
const MAX_SVD_ITERATIONS: usize = 1000;

/// Fits the least-squares plane through a point cluster.
///
/// Minimizes orthogonal distance, not vertical residuals: the points are
/// recentered on their centroid and the right-singular vector belonging to
/// the smallest singular value of the centered matrix is the normal.
///
/// One or two points still produce a plane, but any plane through them fits
/// equally well, so the orientation carries no information.
pub struct FitPlane<'a> {
    points: &'a [Point3],
}

impl<'a> FitPlane<'a> {
    /// Creates a new `FitPlane` operation.
    #[must_use]
    pub fn new(points: &'a [Point3]) -> Self {
        Self { points }
    }

    /// Executes the fit.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no points, if a coordinate is not
    /// finite, if centering overflows, or if the decomposition does not
    /// converge.
    pub fn execute(&self) -> Result<FittedPlane> {
        let points = self.points;
        if points.is_empty() {
            return Err(GeometryError::EmptyInput.into());
        }
        if let Some(index) = points.iter().position(|p| !p.coords.iter().all(|c| c.is_finite())) {
            return Err(GeometryError::NonFinite { index }.into());
        }

        let centroid = centroid(points);
        if !centroid.coords.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::Degenerate("centroid overflows".into()).into());
        }

        // Zero rows leave the right-singular vectors unchanged but guarantee
        // a full 3x3 basis for clusters of one or two points.
        let rows = points.len().max(3);
        let centered = DMatrix::<f64>::from_fn(rows, 3, |r, c| {
            points.get(r).map_or(0.0, |p| p[c] - centroid[c])
        });
        if !centered.iter().all(|c| c.is_finite()) {
            return Err(GeometryError::Degenerate("centered coordinates overflow".into()).into());
        }

        let svd = centered
            .try_svd(false, true, f64::EPSILON, MAX_SVD_ITERATIONS)
            .ok_or_else(|| GeometryError::Degenerate("decomposition did not converge".into()))?;
        let v_t = svd.v_t.ok_or_else(|| {
            GeometryError::Degenerate("decomposition produced no right-singular vectors".into())
        })?;
        let least = svd.singular_values.imin();
        let row = v_t.row(least);
        let normal = Vector3::new(row[0], row[1], row[2]);

        tracing::trace!(
            singular_values = ?svd.singular_values.as_slice(),
            ?normal,
            "fitted plane"
        );
        Ok(FittedPlane::through(centroid, normal))
    }
}

/// Fits the least-squares plane through `points`. See [`FitPlane`].
///
/// # Errors
///
/// Returns an error if the cluster is empty, contains non-finite coordinates,
/// or is too large to center without overflow.
pub fn find_minimizing_plane(points: &[Point3]) -> Result<FittedPlane> {
    FitPlane::new(points).execute()
}

/// Component-wise mean of a non-empty point set.
fn centroid(points: &[Point3]) -> Point3 {
    let sum = points.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords);
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    Point3::from(sum / n)
}
