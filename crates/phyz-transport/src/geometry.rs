//! Nested axis-aligned box geometry and its navigator.
//!
//! Volume 0 is the world, centered on the origin. Every other volume is a
//! box fully contained in its mother. Siblings must not overlap; this is not
//! checked.

use crate::{Navigator, PhysicalVolume, Result, StepStatus, Touchable, TransportError};
use phyz_math::{SURFACE_TOLERANCE, Vec3};

/// Distance a point is pushed along the direction of motion when locating
/// it, so that points on a shared face resolve to the volume being entered.
const LOCATE_PUSH: f64 = 2.0 * SURFACE_TOLERANCE;

/// Axis-aligned bounding box.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered on the origin with the given half extents.
    pub fn centered(half: Vec3) -> Self {
        Self {
            min: -half,
            max: half,
        }
    }

    /// Check if a point is inside the bounding box (faces included).
    pub fn contains(&self, point: &Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Check if `other` lies entirely inside this box.
    pub fn encloses(&self, other: &BoundingBox) -> bool {
        self.contains(&other.min) && self.contains(&other.max)
    }

    /// True if every extent is strictly positive.
    pub fn is_valid(&self) -> bool {
        (0..3).all(|i| self.max[i] > self.min[i])
    }

    /// Distance along `dir` from an interior `point` to the box surface,
    /// and the index of the axis whose face is reached first.
    pub fn exit_distance(&self, point: &Vec3, dir: &Vec3) -> Option<(f64, usize)> {
        let mut best: Option<(f64, usize)> = None;
        for i in 0..3 {
            if dir[i] == 0.0 {
                continue;
            }
            let face = if dir[i] > 0.0 { self.max[i] } else { self.min[i] };
            let t = ((face - point[i]) / dir[i]).max(0.0);
            if best.is_none_or(|(tb, _)| t < tb) {
                best = Some((t, i));
            }
        }
        best
    }

    /// Distance along `dir` from an exterior `point` to where the ray enters
    /// the box, and the index of the axis whose face is crossed.
    pub fn entry_distance(&self, point: &Vec3, dir: &Vec3) -> Option<(f64, usize)> {
        let mut t_near = f64::NEG_INFINITY;
        let mut axis = None;
        let mut t_far = f64::INFINITY;
        for i in 0..3 {
            if dir[i] == 0.0 {
                if point[i] < self.min[i] || point[i] > self.max[i] {
                    return None;
                }
                continue;
            }
            let t1 = (self.min[i] - point[i]) / dir[i];
            let t2 = (self.max[i] - point[i]) / dir[i];
            let (lo, hi) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
            if lo > t_near {
                t_near = lo;
                axis = Some(i);
            }
            t_far = t_far.min(hi);
        }
        let axis = axis?;
        (t_near <= t_far && t_near > SURFACE_TOLERANCE).then_some((t_near, axis))
    }
}

/// A box placed in the world.
#[derive(Clone, Debug)]
pub struct BoxVolume {
    pub placement: PhysicalVolume,
    pub bounds: BoundingBox,
    /// Index of the mother volume; `None` for the world.
    pub mother: Option<usize>,
}

/// Hierarchy of nested axis-aligned boxes.
#[derive(Clone, Debug)]
pub struct BoxWorld {
    volumes: Vec<BoxVolume>,
}

impl BoxWorld {
    /// Create a world box centered on the origin.
    pub fn new(name: impl Into<String>, logical_volume: impl Into<String>, half: Vec3) -> Self {
        Self {
            volumes: vec![BoxVolume {
                placement: PhysicalVolume::new(name, logical_volume),
                bounds: BoundingBox::centered(half),
                mother: None,
            }],
        }
    }

    /// Place a daughter box inside `mother`. Returns the new volume index.
    pub fn add_volume(
        &mut self,
        name: impl Into<String>,
        logical_volume: impl Into<String>,
        bounds: BoundingBox,
        mother: usize,
    ) -> Result<usize> {
        let name = name.into();
        let mother_box = self.volumes.get(mother).ok_or_else(|| {
            TransportError::InvalidGeometry(format!("{name}: no mother volume {mother}"))
        })?;
        if !bounds.is_valid() {
            return Err(TransportError::InvalidGeometry(format!(
                "{name}: box has non-positive extent"
            )));
        }
        if !mother_box.bounds.encloses(&bounds) {
            return Err(TransportError::InvalidGeometry(format!(
                "{name}: box protrudes from mother {}",
                mother_box.placement.name
            )));
        }
        self.volumes.push(BoxVolume {
            placement: PhysicalVolume::new(name, logical_volume),
            bounds,
            mother: Some(mother),
        });
        Ok(self.volumes.len() - 1)
    }

    pub fn world(&self) -> &BoxVolume {
        &self.volumes[0]
    }

    fn daughters(&self, mother: usize) -> impl Iterator<Item = (usize, &BoxVolume)> {
        self.volumes
            .iter()
            .enumerate()
            .filter(move |(_, v)| v.mother == Some(mother))
    }

    /// Index of the innermost volume containing `point`.
    pub fn locate_index(&self, point: &Vec3) -> Option<usize> {
        if !self.world().bounds.contains(point) {
            return None;
        }
        let mut current = 0;
        while let Some((i, _)) = self
            .daughters(current)
            .find(|(_, v)| v.bounds.contains(point))
        {
            current = i;
        }
        Some(current)
    }

    /// Touchable history of volume `index`.
    pub fn touchable(&self, index: usize) -> Touchable {
        let mut history = Vec::new();
        let mut next = Some(index);
        while let Some(i) = next {
            let v = &self.volumes[i];
            history.push(v.placement.clone());
            next = v.mother;
        }
        Touchable::new(history)
    }

    /// Touchable history of the innermost volume containing `point`.
    pub fn locate(&self, point: &Vec3) -> Option<Touchable> {
        self.locate_index(point).map(|i| self.touchable(i))
    }
}

/// Result of [`BoxNavigator::compute_step`].
#[derive(Clone, Debug, PartialEq)]
pub struct NavigatorStep {
    /// Distance to the next boundary (mm).
    pub length: f64,
    /// Point on the boundary, snapped onto the face crossed.
    pub exit_point: Vec3,
    /// [`StepStatus::GeomBoundary`], or [`StepStatus::WorldBoundary`] when
    /// the step leaves the world.
    pub status: StepStatus,
}

/// Per-track navigator over a [`BoxWorld`].
#[derive(Clone, Debug)]
pub struct BoxNavigator<'w> {
    world: &'w BoxWorld,
    current: Option<usize>,
    direction: Vec3,
    last_exit: Option<(Vec3, Vec3)>,
}

impl<'w> BoxNavigator<'w> {
    pub fn new(world: &'w BoxWorld) -> Self {
        Self {
            world,
            current: None,
            direction: Vec3::zeros(),
            last_exit: None,
        }
    }

    /// Locate `point` for a track moving along `direction`. Points on a face
    /// resolve to the volume the track is moving into.
    pub fn locate(&mut self, point: &Vec3, direction: &Vec3) -> Option<Touchable> {
        self.direction = *direction;
        self.current = self.world.locate_index(&(point + direction * LOCATE_PUSH));
        self.touchable()
    }

    /// Touchable of the current volume, `None` outside the world.
    pub fn touchable(&self) -> Option<Touchable> {
        self.current.map(|i| self.world.touchable(i))
    }

    /// Index of the current volume.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Distance from `point` to the next boundary along `direction`: either
    /// the surface of the current volume or the surface of one of its
    /// daughters. Records the exit normal for [`Navigator::global_exit_normal`].
    pub fn compute_step(&mut self, point: &Vec3, direction: &Vec3) -> Result<NavigatorStep> {
        let current = self.current.ok_or(TransportError::OutsideWorld {
            x: point.x,
            y: point.y,
            z: point.z,
        })?;
        let world = self.world;
        let volume = &world.volumes[current];
        let (mut length, mut axis) = volume
            .bounds
            .exit_distance(point, direction)
            .ok_or(TransportError::NoBoundary)?;
        let mut face_box = &volume.bounds;
        let mut status = if current == 0 {
            StepStatus::WorldBoundary
        } else {
            StepStatus::GeomBoundary
        };

        for (_, daughter) in world.daughters(current) {
            if let Some((t, i)) = daughter.bounds.entry_distance(point, direction) {
                if t < length {
                    length = t;
                    axis = i;
                    face_box = &daughter.bounds;
                    status = StepStatus::GeomBoundary;
                }
            }
        }

        let mut exit_point = point + direction * length;
        // Snap onto the crossed face so that wrapped coordinates stay exact.
        let face = if exit_point[axis] >= face_box.max[axis] - SURFACE_TOLERANCE {
            face_box.max[axis]
        } else {
            face_box.min[axis]
        };
        exit_point[axis] = face;

        let mut normal = Vec3::zeros();
        normal[axis] = direction[axis].signum();
        self.last_exit = Some((exit_point, normal));
        tracing::trace!(
            volume = %volume.placement.name,
            length,
            axis,
            ?status,
            "navigator step computed"
        );

        Ok(NavigatorStep {
            length,
            exit_point,
            status,
        })
    }
}

impl Navigator for BoxNavigator<'_> {
    fn global_exit_normal(&self, point: &Vec3) -> Option<Vec3> {
        let (exit_point, normal) = self.last_exit?;
        ((point - exit_point).norm() <= SURFACE_TOLERANCE).then_some(normal)
    }

    fn locate_global_point_within_volume(&mut self, point: &Vec3) {
        let direction = self.direction;
        self.locate(point, &direction);
    }
}
