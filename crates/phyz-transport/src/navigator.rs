//! Geometry navigation interface.

use phyz_math::Vec3;

/// Per-track geometry navigator.
pub trait Navigator {
    /// Outward unit normal, in global coordinates, of the surface the last
    /// computed step exited through at `point`. `None` if the navigator
    /// cannot provide a valid normal there.
    fn global_exit_normal(&self, point: &Vec3) -> Option<Vec3>;

    /// Re-synchronize the navigator's location state with `point`, after the
    /// track was moved by something other than the navigator itself.
    fn locate_global_point_within_volume(&mut self, point: &Vec3);
}
