//! Shared vector/quaternion helpers for the simulation core
//!
//! All angular quantities in this crate follow one convention: a `Vector3`
//! whose direction is the rotation axis and whose magnitude is an angle in
//! degrees (or an angular rate in degrees/sec). [`axis_angle_deg`] turns
//! such a vector into a rotation. Normalizing the zero vector yields the
//! zero vector, never NaN

use nalgebra::{Unit, UnitQuaternion, Vector3};
pub type NVec3 = Vector3<f64>;
pub type NQuat = UnitQuaternion<f64>;

/// Normalize `v`; the zero vector maps to the zero vector
pub fn normalize_or_zero(v: NVec3) -> NVec3 {
    match Unit::try_new(v, 0.0) {
        Some(u) => u.into_inner(),
        None => NVec3::zeros(),
    }
}

/// Rotation about `normalize(v)` by `|v|` degrees
/// The zero vector maps to the identity rotation
pub fn axis_angle_deg(v: NVec3) -> NQuat {
    match Unit::try_new(v, 0.0) {
        Some(axis) => NQuat::from_axis_angle(&axis, v.norm().to_radians()),
        None => NQuat::identity(),
    }
}

/// Component of `v` lying in the plane orthogonal to `normal`
pub fn project_on_plane(v: NVec3, normal: NVec3) -> NVec3 {
    let n = normalize_or_zero(normal);
    v - n * v.dot(&n)
}

/// Angle in degrees between `from` and `to`, signed about `axis`
/// The sign follows the orientation of `cross(from, to)` against `axis`;
/// a degenerate cross product counts as positive
pub fn signed_angle_deg(from: NVec3, to: NVec3, axis: NVec3) -> f64 {
    let f = normalize_or_zero(from);
    let t = normalize_or_zero(to);

    let unsigned = f.dot(&t).clamp(-1.0, 1.0).acos().to_degrees();

    if axis.dot(&f.cross(&t)) < 0.0 {
        -unsigned
    } else {
        unsigned
    }
}
