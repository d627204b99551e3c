pub mod classify;
pub mod fitting;

pub use classify::{wall_detector, Rejection, WallClassification, WallDetector};
pub use fitting::{find_minimizing_plane, FitPlane};
