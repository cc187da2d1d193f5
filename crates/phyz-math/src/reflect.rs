//! Specular reflection about a plane with unit normal `n`.
//!
//! Momentum direction and polarization transform differently: the direction
//! mirrors as `p - 2(p·n)n`, the polarization (an axial quantity at a
//! perfect mirror) as `-e + 2(e·n)n`. Both results are renormalized.

use crate::{Vec3, try_unit};

/// Mirror a momentum direction about the plane with unit normal `n`.
///
/// Returns `None` if the input direction is the zero vector.
pub fn reflect_direction(p: &Vec3, n: &Vec3) -> Option<Vec3> {
    let p_dot_n = p.dot(n);
    try_unit(&(p - 2.0 * p_dot_n * n))
}

/// Mirror a polarization vector about the plane with unit normal `n`.
///
/// Returns `None` if the input polarization is the zero vector
/// (unpolarized particles).
pub fn reflect_polarization(e: &Vec3, n: &Vec3) -> Option<Vec3> {
    let e_dot_n = e.dot(n);
    try_unit(&(-e + 2.0 * e_dot_n * n))
}
