use nalgebra::{Point2, Point3, Unit, Vector2, Vector3};

use crate::{error::GeometryError, scene::Intersection};

pub type FloatType = f64;

pub type ScreenPoint = Point2<u32>;
pub type ScreenSize = Vector2<u32>;

pub type WorldPoint = Point3<FloatType>;
pub type WorldVector = Vector3<FloatType>;
pub type WorldDirection = Unit<WorldVector>;

/// Values with smaller magnitude than this are treated as zero.
pub const EPSILON: FloatType = 1e-10;

/// Distance by which secondary rays are pushed off the surface they start on.
pub const DELTA: FloatType = 1e-4;

pub fn is_zero(value: FloatType) -> bool {
    value.abs() < EPSILON
}

/// Snaps values within `EPSILON` of zero to exactly zero.
pub fn align_zero(value: FloatType) -> FloatType {
    if is_zero(value) { 0.0 } else { value }
}

/// Normalizes a vector, failing if it is (nearly) zero.
pub fn direction(vector: WorldVector) -> Result<WorldDirection, GeometryError> {
    Unit::try_new(vector, EPSILON).ok_or(GeometryError::ZeroVector)
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: WorldPoint,
    /// Normalized direction of the ray
    pub direction: WorldDirection,
}

impl Ray {
    pub fn new(origin: WorldPoint, direction: WorldDirection) -> Ray {
        Ray { origin, direction }
    }

    pub fn try_new(origin: WorldPoint, direction: WorldVector) -> Result<Ray, GeometryError> {
        Ok(Ray::new(origin, self::direction(direction)?))
    }

    /// Creates a secondary ray leaving a surface at `point`.
    /// The origin is moved by `DELTA` along `normal`, towards the side `direction` points to.
    pub fn with_bias(point: WorldPoint, direction: WorldDirection, normal: &WorldVector) -> Ray {
        let offset = if direction.dot(normal) > 0.0 {
            DELTA
        } else {
            -DELTA
        };
        Ray::new(point + normal * offset, direction)
    }

    pub fn point_at(&self, distance: FloatType) -> WorldPoint {
        self.origin + self.direction.as_ref() * distance
    }

    /// Picks the intersection nearest to the ray origin.
    pub fn closest_intersection<'a>(
        &self,
        intersections: impl IntoIterator<Item = Intersection<'a>>,
    ) -> Option<Intersection<'a>> {
        intersections
            .into_iter()
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}
