use crate::config::WallDetectorConfig;
use crate::error::Result;
use crate::geometry::FittedPlane;
use crate::math::{angle_between_planes, Point3};
use crate::operations::fitting::FitPlane;
use crate::statistics::{KsNormalityTest, KsOutcome};

/// Why a cluster was not classified as a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The cluster has no points.
    Empty,
    /// The cluster has fewer points than `min_cluster_size`.
    TooFewPoints,
    /// The vertical coordinates are not consistent with Gaussian noise.
    NotNormal,
    /// No plane (or no angle) could be computed for the cluster.
    DegeneratePlane,
    /// The plane is not close enough to perpendicular to the ground.
    OutsideAngleWindow,
}

/// Outcome of classifying one cluster, with whatever was computed on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct WallClassification {
    /// Why the cluster was rejected, `None` for a wall.
    pub rejection: Option<Rejection>,
    /// The normality test outcome, if the test could run.
    pub normality: Option<KsOutcome>,
    /// The fitted plane, if fitting was reached.
    pub plane: Option<FittedPlane>,
    /// Angle in degrees between the plane and the ground, if computed.
    pub angle_deg: Option<f64>,
}

impl WallClassification {
    fn rejected(rejection: Rejection) -> Self {
        Self {
            rejection: Some(rejection),
            normality: None,
            plane: None,
            angle_deg: None,
        }
    }

    /// `true` if the cluster is a wall.
    #[must_use]
    pub fn is_wall(&self) -> bool {
        self.rejection.is_none()
    }
}

/// Decides whether a point cluster is a vertical wall.
///
/// Stages run cheapest first and stop at the first failure:
/// 1. cluster size
/// 2. KS normality of the vertical coordinate
/// 3. least-squares plane fit
/// 4. plane-to-ground angle inside the inclusive window
///
/// Failures never surface as errors; they become a [`Rejection`].
#[derive(Debug, Clone)]
pub struct WallDetector {
    config: WallDetectorConfig,
    normality: KsNormalityTest,
}

impl WallDetector {
    /// Creates a detector from a validated config.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid.
    pub fn new(config: WallDetectorConfig) -> Result<Self> {
        config.validate()?;
        let normality = KsNormalityTest::new(config.significance_level)?;
        Ok(Self { config, normality })
    }

    /// Returns the active config.
    #[must_use]
    pub fn config(&self) -> &WallDetectorConfig {
        &self.config
    }

    /// Classifies `points`, keeping the intermediate results.
    #[must_use]
    pub fn classify(&self, points: &[Point3]) -> WallClassification {
        if points.is_empty() {
            tracing::debug!("rejecting empty cluster");
            return WallClassification::rejected(Rejection::Empty);
        }
        if points.len() < self.config.min_cluster_size {
            tracing::debug!(
                points = points.len(),
                min = self.config.min_cluster_size,
                "rejecting small cluster"
            );
            return WallClassification::rejected(Rejection::TooFewPoints);
        }

        let axis = self.config.vertical_axis;
        let heights: Vec<f64> = points.iter().map(|p| axis.component(p)).collect();
        let Some(normality) = self.normality.evaluate(&heights) else {
            tracing::debug!(?axis, "rejecting cluster: vertical spread not testable");
            return WallClassification::rejected(Rejection::NotNormal);
        };
        let mut result = WallClassification {
            normality: Some(normality),
            ..WallClassification::rejected(Rejection::NotNormal)
        };
        if !normality.is_normal() {
            tracing::debug!(
                statistic = normality.statistic,
                critical = normality.critical_value,
                "rejecting cluster: vertical spread is not normal"
            );
            return result;
        }

        let plane = match FitPlane::new(points).execute() {
            Ok(plane) => plane,
            Err(e) => {
                tracing::debug!(error = %e, "rejecting cluster: plane fit failed");
                result.rejection = Some(Rejection::DegeneratePlane);
                return result;
            }
        };
        result.plane = Some(plane);

        let angle = match angle_between_planes(plane.normal()) {
            Ok(angle) => angle,
            Err(e) => {
                tracing::debug!(error = %e, "rejecting cluster: no plane angle");
                result.rejection = Some(Rejection::DegeneratePlane);
                return result;
            }
        };
        result.angle_deg = Some(angle);
        tracing::trace!(angle, "plane angle to ground");

        if self.config.angle_in_window(angle) {
            result.rejection = None;
        } else {
            tracing::debug!(angle, "rejecting cluster: plane is not vertical");
            result.rejection = Some(Rejection::OutsideAngleWindow);
        }
        result
    }

    /// `true` if `points` form a wall.
    #[must_use]
    pub fn is_wall(&self, points: &[Point3]) -> bool {
        self.classify(points).is_wall()
    }
}

impl Default for WallDetector {
    fn default() -> Self {
        Self {
            config: WallDetectorConfig::default(),
            normality: KsNormalityTest::default(),
        }
    }
}

/// Classifies `points` with the default thresholds.
#[must_use]
pub fn wall_detector(points: &[Point3]) -> bool {
    WallDetector::default().is_wall(points)
}
