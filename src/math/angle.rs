use crate::error::{GeometryError, Result};

use super::{Vector3, TOLERANCE, VERTICAL_REFERENCE};

/// Angle in degrees between a plane normal and the [`VERTICAL_REFERENCE`].
///
/// This is the angle between the plane and the X-Z ground plane, in `[0, 180]`.
/// A floor yields 0 (or 180 when its normal points down), a wall yields 90.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] if `normal` has zero length.
pub fn angle_between_planes(normal: &Vector3) -> Result<f64> {
    angle_to_reference(normal, &VERTICAL_REFERENCE)
}

/// Angle in degrees between two vectors, in `[0, 180]`.
///
/// `angle_to_reference(n, r) + angle_to_reference(-n, r) == 180`.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] if either vector has zero length.
pub fn angle_to_reference(normal: &Vector3, reference: &Vector3) -> Result<f64> {
    let denom = normal.norm() * reference.norm();
    if !denom.is_finite() || denom < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }

    // Rounding can push the cosine a hair past +-1.
    let cos_angle = (normal.dot(reference) / denom).clamp(-1.0, 1.0);
    Ok(cos_angle.acos().to_degrees())
}
