use crate::foundation::core::{DAffine3, DVec3};

const PARALLEL_EPS: f64 = 1e-12;

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Half-line in world space. `direction` is unit length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: DVec3,
    /// Unit direction.
    pub direction: DVec3,
}

impl Ray {
    /// Build a ray; `direction` is normalized.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned box in an object's local space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Aabb {
    /// Box centre in local space.
    pub center: DVec3,
    /// Half size along each local axis (all >= 0).
    pub half_extents: DVec3,
}

impl Aabb {
    /// Box centred on the local origin.
    pub fn centered(half_extents: DVec3) -> Self {
        Self {
            center: DVec3::ZERO,
            half_extents,
        }
    }

    /// Minimum corner.
    pub fn min(&self) -> DVec3 {
        self.center - self.half_extents
    }

    /// Maximum corner.
    pub fn max(&self) -> DVec3 {
        self.center + self.half_extents
    }

    /// Slab test in the box's own space. Returns the ray parameter of the first surface hit
    /// in front of the origin (the exit point when the origin is inside).
    pub fn intersect(&self, origin: DVec3, direction: DVec3) -> Option<f64> {
        let (min, max) = (self.min(), self.max());
        let mut t_near = f64::NEG_INFINITY;
        let mut t_far = f64::INFINITY;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            if d.abs() < PARALLEL_EPS {
                if o < min[axis] || o > max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t0 = (min[axis] - o) * inv;
            let mut t1 = (max[axis] - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }

        if t_far < 0.0 {
            return None;
        }
        Some(if t_near >= 0.0 { t_near } else { t_far })
    }

    /// Intersect a world-space ray with this box placed by `world` (local-to-world).
    ///
    /// The ray is carried into local space without renormalizing its direction, so the
    /// returned parameter is a world-space distance along `ray`.
    pub fn intersect_placed(&self, world: &DAffine3, ray: &Ray) -> Option<f64> {
        let inv = world.inverse();
        let origin = inv.transform_point3(ray.origin);
        let direction = inv.transform_vector3(ray.direction);
        if !origin.is_finite() || !direction.is_finite() {
            return None;
        }
        self.intersect(origin, direction)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
