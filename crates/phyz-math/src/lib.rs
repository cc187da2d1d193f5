//! Vector primitives for phyz particle transport.
//!
//! Provides the global-frame vector alias, Cartesian axis classification of
//! surface normals, and specular reflection of directions and polarizations.

pub mod axis;
pub mod reflect;

pub use axis::{Axis, axis_aligned};
pub use reflect::{reflect_direction, reflect_polarization};

use nalgebra as na;

/// 3D vector alias.
pub type Vec3 = na::Vector3<f64>;
/// 3x3 matrix alias.
pub type Mat3 = na::Matrix3<f64>;

/// Surface tolerance of the geometry (mm).
///
/// Points closer than this to a surface are considered on it.
pub const SURFACE_TOLERANCE: f64 = 1e-9;

/// Tolerance on `|n_i| == 1` when classifying a unit normal by axis.
pub const AXIS_TOLERANCE: f64 = 1e-12;

/// Normalize `v`, returning `None` for a (near) zero vector.
#[inline]
pub fn try_unit(v: &Vec3) -> Option<Vec3> {
    v.try_normalize(f64::EPSILON)
}

/// Diagonal matrix that negates the component along `axis`.
#[inline]
pub fn mirror(axis: Axis) -> Mat3 {
    let mut diag = Vec3::new(1.0, 1.0, 1.0);
    diag[axis.index()] = -1.0;
    Mat3::from_diagonal(&diag)
}
