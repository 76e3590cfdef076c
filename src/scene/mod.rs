pub mod description;
mod geometries;
pub mod light;
mod material;
pub mod primitives;

pub use geometries::Geometries;
pub use light::LightSource;
pub use material::Material;

use crate::{
    geometry::{FloatType, Ray, WorldPoint, WorldVector},
    util::{BLACK, Color},
};
use primitives::{Cylinder, Hits, Plane, Polygon, Sphere, Triangle, Tube};

/// Something rays can hit.
pub trait Intersectable {
    /// Appends every hit closer than `max_distance` to `out`.
    fn intersections_into<'a>(
        &'a self,
        ray: &Ray,
        max_distance: FloatType,
        out: &mut Vec<Intersection<'a>>,
    );

    fn intersect(&self, ray: &Ray, max_distance: FloatType) -> Vec<Intersection<'_>> {
        let mut out = Vec::new();
        self.intersections_into(ray, max_distance, &mut out);
        out
    }
}

/// Point where a ray meets a surface.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    pub surface: &'a Surface,
    pub point: WorldPoint,
    /// Distance from the ray origin
    pub distance: FloatType,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Polygon(Polygon),
    Triangle(Triangle),
    Tube(Tube),
    Cylinder(Cylinder),
}

impl Shape {
    /// Unit normal at a point on the shape. Orientation is fixed by the shape, not by any ray.
    pub fn normal_at(&self, point: &WorldPoint) -> WorldVector {
        match self {
            Shape::Sphere(s) => s.normal_at(point),
            Shape::Plane(s) => s.normal_at(point),
            Shape::Polygon(s) => s.normal_at(point),
            Shape::Triangle(s) => s.normal_at(point),
            Shape::Tube(s) => s.normal_at(point),
            Shape::Cylinder(s) => s.normal_at(point),
        }
    }

    pub fn intersect(&self, ray: &Ray, max_distance: FloatType) -> Hits {
        match self {
            Shape::Sphere(s) => s.intersect(ray, max_distance),
            Shape::Plane(s) => s.intersect(ray, max_distance),
            Shape::Polygon(s) => s.intersect(ray, max_distance),
            Shape::Triangle(s) => s.intersect(ray, max_distance),
            Shape::Tube(s) => s.intersect(ray, max_distance),
            Shape::Cylinder(s) => s.intersect(ray, max_distance),
        }
    }
}

macro_rules! shape_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Shape {
                fn from(shape: $variant) -> Self {
                    Shape::$variant(shape)
                }
            }
        )*
    };
}

shape_from!(Sphere, Plane, Polygon, Triangle, Tube, Cylinder);

/// Shape together with its appearance.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    pub shape: Shape,
    pub emission: Color,
    pub material: Material,
}

impl Surface {
    pub fn new(shape: impl Into<Shape>) -> Self {
        Surface {
            shape: shape.into(),
            emission: BLACK,
            material: Material::default(),
        }
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn normal_at(&self, point: &WorldPoint) -> WorldVector {
        self.shape.normal_at(point)
    }
}

impl Intersectable for Surface {
    fn intersections_into<'a>(
        &'a self,
        ray: &Ray,
        max_distance: FloatType,
        out: &mut Vec<Intersection<'a>>,
    ) {
        out.extend(
            self.shape
                .intersect(ray, max_distance)
                .into_iter()
                .map(|distance| Intersection {
                    surface: self,
                    point: ray.point_at(distance),
                    distance,
                }),
        );
    }
}

/// Everything a render reads: geometry, lights and the two constant colors.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub geometries: Geometries,
    pub lights: Vec<LightSource>,
    pub ambient: Color,
    /// Color of rays that escape the scene
    pub background: Color,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_ambient(mut self, ambient: Color) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn add_surface(&mut self, surface: Surface) -> &mut Self {
        self.geometries.add(surface);
        self
    }

    pub fn add_light(&mut self, light: impl Into<LightSource>) -> &mut Self {
        self.lights.push(light.into());
        self
    }
}
