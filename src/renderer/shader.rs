//! Recursive Whitted style shading: Phong local lighting with shadows,
//! mirror reflection and transparency.

use nalgebra::Unit;

use crate::{
    geometry::{FloatType, Ray, WorldDirection, WorldPoint, WorldVector, align_zero},
    scene::{Intersectable as _, Intersection, LightSource, Scene, Surface},
    util::{BLACK, Color, ColorExt as _, WHITE},
};

/// Maximum number of reflection/refraction bounces.
pub const MAX_CALC_COLOR_LEVEL: u32 = 10;
/// Branches whose weight is below this in every channel are not traced.
pub const MIN_CALC_COLOR_K: FloatType = 0.001;
pub const INITIAL_K: Color = WHITE;

/// Hit point prepared for shading, with the normal facing the incoming ray.
struct ShadingPoint<'a> {
    surface: &'a Surface,
    point: WorldPoint,
    normal: WorldVector,
    ray_direction: WorldDirection,
}

impl<'a> ShadingPoint<'a> {
    /// Returns `None` at grazing incidence, where no shading is defined.
    fn new(intersection: &Intersection<'a>, ray: &Ray) -> Option<Self> {
        let normal = intersection.surface.normal_at(&intersection.point);
        let nv = align_zero(normal.dot(&ray.direction));
        if nv == 0.0 {
            return None;
        }

        Some(ShadingPoint {
            surface: intersection.surface,
            point: intersection.point,
            normal: if nv > 0.0 { -normal } else { normal },
            ray_direction: ray.direction,
        })
    }
}

/// Computes colors of rays in a scene.
#[derive(Copy, Clone, Debug)]
pub struct RayTracer<'a> {
    scene: &'a Scene,
}

impl<'a> RayTracer<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        RayTracer { scene }
    }

    /// Color seen along a primary ray.
    pub fn trace(&self, ray: &Ray) -> Color {
        self.shade(ray, MAX_CALC_COLOR_LEVEL, INITIAL_K)
    }

    /// Color along `ray`, following up to `depth` more bounces.
    /// `k` is the weight of this ray in the final pixel.
    pub fn shade(&self, ray: &Ray, depth: u32, k: Color) -> Color {
        match self.closest_intersection(ray) {
            Some(intersection) => self.color_at(&intersection, ray, depth, k),
            None => self.scene.background,
        }
    }

    fn closest_intersection(&self, ray: &Ray) -> Option<Intersection<'a>> {
        ray.closest_intersection(self.scene.geometries.intersect(ray, FloatType::INFINITY))
    }

    fn color_at(&self, intersection: &Intersection<'a>, ray: &Ray, depth: u32, k: Color) -> Color {
        let Some(point) = ShadingPoint::new(intersection, ray) else {
            return BLACK;
        };
        self.local_color(&point) + self.global_color(&point, depth, k)
    }

    fn local_color(&self, p: &ShadingPoint) -> Color {
        let material = &p.surface.material;
        let mut color = p.surface.emission + self.scene.ambient.product(&material.kd);

        for light in &self.scene.lights {
            let Some(l) = light.direction_to(&p.point) else {
                continue;
            };

            // Only lights on the same side as the viewer
            let nl = align_zero(-p.normal.dot(&l));
            if nl <= 0.0 {
                continue;
            }

            let transparency = self.transparency(p, light, &l);
            if transparency.lower_than(MIN_CALC_COLOR_K) {
                continue;
            }

            let intensity = light.intensity_at(&p.point).product(&transparency);
            color = color
                + self.diffuse(material.kd, nl, intensity)
                + self.specular(p, &l, material.ks, material.shininess, intensity);
        }

        color
    }

    fn diffuse(&self, kd: Color, nl: FloatType, intensity: Color) -> Color {
        kd.product(&intensity).scaled(nl.abs())
    }

    fn specular(
        &self,
        p: &ShadingPoint,
        l: &WorldDirection,
        ks: Color,
        shininess: u32,
        intensity: Color,
    ) -> Color {
        let r = l.as_ref() - p.normal * (2.0 * l.dot(&p.normal));
        let vr = -r.dot(&p.ray_direction);
        if vr <= 0.0 {
            return BLACK;
        }
        let exponent = i32::try_from(shininess).unwrap_or(i32::MAX);
        ks.product(&intensity).scaled(vr.powi(exponent))
    }

    /// Fraction of the light passing through everything between the point and the light.
    fn transparency(&self, p: &ShadingPoint, light: &LightSource, l: &WorldDirection) -> Color {
        let shadow_ray = Ray::with_bias(p.point, Unit::new_unchecked(-l.into_inner()), &p.normal);
        // Blockers must lie strictly before the light, measured from the biased origin
        let light_distance = light.distance_to(&shadow_ray.origin);

        let mut ktr = WHITE;
        for blocker in self.scene.geometries.intersect(&shadow_ray, light_distance) {
            ktr = ktr.product(&blocker.surface.material.kt);
            if ktr.lower_than(MIN_CALC_COLOR_K) {
                return BLACK;
            }
        }
        ktr
    }

    fn global_color(&self, p: &ShadingPoint, depth: u32, k: Color) -> Color {
        if depth == 0 {
            return BLACK;
        }
        let material = &p.surface.material;
        let v = p.ray_direction.as_ref();

        let mut color = BLACK;

        let kkr = k.product(&material.kr);
        if !kkr.lower_than(MIN_CALC_COLOR_K) {
            let r = Unit::new_normalize(v - p.normal * (2.0 * v.dot(&p.normal)));
            let reflected = Ray::with_bias(p.point, r, &p.normal);
            color = color + self.global_branch(&reflected, depth - 1, kkr, material.kr);
        }

        let kkt = k.product(&material.kt);
        if !kkt.lower_than(MIN_CALC_COLOR_K) {
            let refracted = Ray::with_bias(p.point, p.ray_direction, &p.normal);
            color = color + self.global_branch(&refracted, depth - 1, kkt, material.kt);
        }

        color
    }

    fn global_branch(&self, ray: &Ray, depth: u32, kkx: Color, kx: Color) -> Color {
        self.shade(ray, depth, kkx).product(&kx)
    }
}
