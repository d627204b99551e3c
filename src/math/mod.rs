pub mod angle;

pub use angle::{angle_between_planes, angle_to_reference};

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// The "up" direction: normal of the X-Z ground plane.
pub const VERTICAL_REFERENCE: Vector3 = Vector3::new(0.0, 1.0, 0.0);

/// Coordinate axis selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    #[default]
    Z,
}

impl Axis {
    /// Returns the component of `point` along this axis.
    #[must_use]
    pub fn component(self, point: &Point3) -> f64 {
        match self {
            Axis::X => point.x,
            Axis::Y => point.y,
            Axis::Z => point.z,
        }
    }
}
