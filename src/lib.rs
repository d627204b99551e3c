pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod statistics;

pub use config::WallDetectorConfig;
pub use error::{Result, WallsenseError};
pub use geometry::FittedPlane;
pub use math::{angle_between_planes, Point3, Vector3, VERTICAL_REFERENCE};
pub use operations::{
    find_minimizing_plane, wall_detector, Rejection, WallClassification, WallDetector,
};
pub use statistics::{is_normally_distributed, DEFAULT_SIGNIFICANCE_LEVEL};
