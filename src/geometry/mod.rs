pub mod plane;

pub use plane::FittedPlane;
