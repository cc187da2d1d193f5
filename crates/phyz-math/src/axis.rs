//! Cartesian axis classification of unit normals.

use crate::{AXIS_TOLERANCE, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three global Cartesian axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes, in precedence order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index into a [`Vec3`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along the positive axis.
    pub fn unit(self) -> Vec3 {
        let mut v = Vec3::zeros();
        v[self.index()] = 1.0;
        v
    }

    /// True if `|n[axis]|` equals one within `tol`.
    #[inline]
    pub fn is_aligned(self, n: &Vec3, tol: f64) -> bool {
        (n[self.index()].abs() - 1.0).abs() <= tol
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// First axis (X, then Y, then Z) on which the unit normal `n` has a
/// component of magnitude one, or `None` if `n` is oblique.
///
/// A normal aligned on two axes at once cannot be a unit vector, but with a
/// loose tolerance the earlier axis wins.
pub fn axis_aligned(n: &Vec3) -> Option<Axis> {
    Axis::ALL
        .into_iter()
        .find(|axis| axis.is_aligned(n, AXIS_TOLERANCE))
}
