mod wall_detector;

pub use wall_detector::{wall_detector, Rejection, WallClassification, WallDetector};
