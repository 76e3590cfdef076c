use crate::geometry::{FloatType, Ray};

use super::{Intersectable, Intersection, Surface};

/// Flat collection of surfaces, intersected by a linear scan.
#[derive(Clone, Debug, Default)]
pub struct Geometries {
    surfaces: Vec<Surface>,
}

impl Geometries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, surface: Surface) {
        self.surfaces.push(surface);
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Surface> {
        self.surfaces.iter()
    }
}

impl Intersectable for Geometries {
    fn intersections_into<'a>(
        &'a self,
        ray: &Ray,
        max_distance: FloatType,
        out: &mut Vec<Intersection<'a>>,
    ) {
        for surface in &self.surfaces {
            surface.intersections_into(ray, max_distance, out);
        }
    }
}

impl FromIterator<Surface> for Geometries {
    fn from_iter<T: IntoIterator<Item = Surface>>(iter: T) -> Self {
        Geometries {
            surfaces: iter.into_iter().collect(),
        }
    }
}

impl Extend<Surface> for Geometries {
    fn extend<T: IntoIterator<Item = Surface>>(&mut self, iter: T) {
        self.surfaces.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Geometries {
    type Item = &'a Surface;
    type IntoIter = std::slice::Iter<'a, Surface>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
