use crate::math::Axis;
use crate::statistics::DEFAULT_SIGNIFICANCE_LEVEL;

pub fn significance_level() -> f64 {
    DEFAULT_SIGNIFICANCE_LEVEL
}

pub fn min_angle_deg() -> f64 {
    88.0
}

pub fn max_angle_deg() -> f64 {
    92.0
}

pub fn min_cluster_size() -> usize {
    3
}

pub fn vertical_axis() -> Axis {
    Axis::Z
}
