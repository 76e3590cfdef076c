use arrayvec::ArrayVec;
use itertools::Itertools as _;
use nalgebra::Unit;

use crate::{
    error::GeometryError,
    geometry::{
        EPSILON, FloatType, Ray, WorldDirection, WorldPoint, WorldVector, align_zero, is_zero,
    },
};

/// Distances along a ray at which a primitive was hit.
/// No primitive here produces more than two hits on a ray, except a cylinder whose
/// side and cap hits coincide at the rim.
pub type Hits = ArrayVec<FloatType, 4>;

fn accept(hits: &mut Hits, distance: FloatType, max_distance: FloatType) {
    let distance = align_zero(distance);
    if distance > 0.0 && distance < max_distance {
        hits.push(distance);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    center: WorldPoint,
    radius: FloatType,
}

impl Sphere {
    pub fn new(center: WorldPoint, radius: FloatType) -> Result<Self, GeometryError> {
        if !(radius > 0.0) {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Sphere { center, radius })
    }

    pub fn center(&self) -> WorldPoint {
        self.center
    }

    pub fn radius(&self) -> FloatType {
        self.radius
    }

    pub fn normal_at(&self, point: &WorldPoint) -> WorldVector {
        (point - self.center).normalize()
    }

    pub fn intersect(&self, ray: &Ray, max_distance: FloatType) -> Hits {
        let mut hits = Hits::new();
        let l = self.center - ray.origin;

        if is_zero(l.norm()) {
            // Starting in the center, the only forward hit is one radius away.
            accept(&mut hits, self.radius, max_distance);
            return hits;
        }

        let tca = l.dot(&ray.direction);
        let d_squared = l.norm_squared() - tca * tca;
        let r_squared = self.radius * self.radius;
        if d_squared > r_squared {
            return hits;
        }

        let thc = (r_squared - d_squared).sqrt();
        if is_zero(thc) {
            accept(&mut hits, tca, max_distance);
        } else {
            accept(&mut hits, tca - thc, max_distance);
            accept(&mut hits, tca + thc, max_distance);
        }
        hits
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Plane {
    point: WorldPoint,
    normal: WorldDirection,
}

impl Plane {
    pub fn new(point: WorldPoint, normal: WorldVector) -> Result<Self, GeometryError> {
        let normal = Unit::try_new(normal, EPSILON).ok_or(GeometryError::ZeroVector)?;
        Ok(Plane { point, normal })
    }

    /// Plane through three points, the normal follows the right hand rule.
    pub fn from_points(
        p1: &WorldPoint,
        p2: &WorldPoint,
        p3: &WorldPoint,
    ) -> Result<Self, GeometryError> {
        let normal = (p2 - p1).cross(&(p3 - p1));
        let normal = Unit::try_new(normal, EPSILON).ok_or(GeometryError::CollinearPoints)?;
        Ok(Plane { point: *p1, normal })
    }

    pub fn point(&self) -> WorldPoint {
        self.point
    }

    pub fn normal(&self) -> WorldDirection {
        self.normal
    }

    pub fn normal_at(&self, _point: &WorldPoint) -> WorldVector {
        self.normal.into_inner()
    }

    pub fn intersect(&self, ray: &Ray, max_distance: FloatType) -> Hits {
        let mut hits = Hits::new();
        let denominator = self.normal.dot(&ray.direction);
        if is_zero(denominator) {
            return hits;
        }
        let distance = self.normal.dot(&(self.point - ray.origin)) / denominator;
        accept(&mut hits, distance, max_distance);
        hits
    }
}

/// Convex planar polygon.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<WorldPoint>,
    plane: Plane,
}

impl Polygon {
    /// Vertices must be coplanar and ordered along the edge path of a convex polygon.
    pub fn new(vertices: Vec<WorldPoint>) -> Result<Self, GeometryError> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()));
        }

        let plane = Plane::from_points(&vertices[0], &vertices[1], &vertices[2])?;
        if vertices.len() == 3 {
            return Ok(Polygon { vertices, plane });
        }

        let n = plane.normal;
        if vertices
            .iter()
            .any(|v| !is_zero((v - vertices[0]).dot(&n)))
        {
            return Err(GeometryError::NonPlanarPolygon);
        }

        let mut positive = None;
        for (a, b, c) in vertices
            .iter()
            .circular_tuple_windows::<(&WorldPoint, &WorldPoint, &WorldPoint)>()
        {
            let turn = align_zero((b - a).cross(&(c - b)).dot(&n));
            if turn == 0.0 {
                return Err(GeometryError::NonConvexPolygon);
            }
            match positive {
                None => positive = Some(turn > 0.0),
                Some(p) if p != (turn > 0.0) => return Err(GeometryError::NonConvexPolygon),
                Some(_) => {}
            }
        }

        Ok(Polygon { vertices, plane })
    }

    pub fn vertices(&self) -> &[WorldPoint] {
        &self.vertices
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    pub fn normal_at(&self, point: &WorldPoint) -> WorldVector {
        self.plane.normal_at(point)
    }

    pub fn intersect(&self, ray: &Ray, max_distance: FloatType) -> Hits {
        let mut hits = self.plane.intersect(ray, max_distance);
        hits.retain(|distance| self.contains(&ray.point_at(*distance)));
        hits
    }

    /// Tests whether a point of the supporting plane lies strictly inside the polygon.
    /// Points on an edge (or its extension) count as outside.
    fn contains(&self, point: &WorldPoint) -> bool {
        let n = self.plane.normal;
        let mut positive = None;

        for (a, b) in self
            .vertices
            .iter()
            .circular_tuple_windows::<(&WorldPoint, &WorldPoint)>()
        {
            let sign = align_zero(n.dot(&(a - point).cross(&(b - point))));
            if sign == 0.0 {
                return false;
            }
            match positive {
                None => positive = Some(sign > 0.0),
                Some(p) if p != (sign > 0.0) => return false,
                Some(_) => {}
            }
        }
        true
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Triangle(Polygon);

impl Triangle {
    pub fn new(a: WorldPoint, b: WorldPoint, c: WorldPoint) -> Result<Self, GeometryError> {
        Ok(Triangle(Polygon::new(vec![a, b, c])?))
    }

    pub fn as_polygon(&self) -> &Polygon {
        &self.0
    }

    pub fn normal_at(&self, point: &WorldPoint) -> WorldVector {
        self.0.normal_at(point)
    }

    pub fn intersect(&self, ray: &Ray, max_distance: FloatType) -> Hits {
        self.0.intersect(ray, max_distance)
    }
}

/// Infinite circular tube around an axis ray.
#[derive(Clone, Debug, PartialEq)]
pub struct Tube {
    axis: Ray,
    radius: FloatType,
}

impl Tube {
    pub fn new(radius: FloatType, axis: Ray) -> Result<Self, GeometryError> {
        if !(radius > 0.0) {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Tube { axis, radius })
    }

    pub fn axis(&self) -> &Ray {
        &self.axis
    }

    pub fn radius(&self) -> FloatType {
        self.radius
    }

    /// Distance of the point's projection along the axis.
    fn axial_position(&self, point: &WorldPoint) -> FloatType {
        (point - self.axis.origin).dot(&self.axis.direction)
    }

    fn radial_vector(&self, point: &WorldPoint) -> WorldVector {
        let along = self.axial_position(point);
        point - self.axis.point_at(along)
    }

    pub fn normal_at(&self, point: &WorldPoint) -> WorldVector {
        let radial = self.radial_vector(point);
        Unit::try_new(radial, EPSILON)
            .map(Unit::into_inner)
            .unwrap_or_else(|| self.axis.direction.into_inner())
    }

    /// Ray distances where the ray meets the infinite radial surface, unfiltered.
    fn radial_roots(&self, ray: &Ray) -> ArrayVec<FloatType, 2> {
        let mut roots = ArrayVec::new();
        let axis = self.axis.direction.as_ref();

        let v = ray.direction.as_ref();
        let v_perp = v - axis * v.dot(axis);
        let a = v_perp.norm_squared();
        if is_zero(a) {
            // Parallel to the axis
            return roots;
        }

        let delta = ray.origin - self.axis.origin;
        let delta_perp = delta - axis * delta.dot(axis);
        let b = 2.0 * v_perp.dot(&delta_perp);
        let c = delta_perp.norm_squared() - self.radius * self.radius;

        let discriminant = align_zero(b * b - 4.0 * a * c);
        if discriminant < 0.0 {
            return roots;
        }
        if discriminant == 0.0 {
            roots.push(-b / (2.0 * a));
            return roots;
        }

        let sqrt_disc = discriminant.sqrt();
        roots.push((-b - sqrt_disc) / (2.0 * a));
        roots.push((-b + sqrt_disc) / (2.0 * a));
        roots
    }

    pub fn intersect(&self, ray: &Ray, max_distance: FloatType) -> Hits {
        let mut hits = Hits::new();
        for root in self.radial_roots(ray) {
            accept(&mut hits, root, max_distance);
        }
        hits
    }
}

/// Tube section between the axis origin and `height` along the axis, closed by two caps.
#[derive(Clone, Debug, PartialEq)]
pub struct Cylinder {
    tube: Tube,
    height: FloatType,
}

impl Cylinder {
    pub fn new(radius: FloatType, height: FloatType, axis: Ray) -> Result<Self, GeometryError> {
        let tube = Tube::new(radius, axis)?;
        if !(height > 0.0) {
            return Err(GeometryError::NonPositiveHeight(height));
        }
        Ok(Cylinder { tube, height })
    }

    pub fn axis(&self) -> &Ray {
        self.tube.axis()
    }

    pub fn radius(&self) -> FloatType {
        self.tube.radius
    }

    pub fn height(&self) -> FloatType {
        self.height
    }

    /// Points at or beyond either end of the axis get the cap normal, rims included.
    pub fn normal_at(&self, point: &WorldPoint) -> WorldVector {
        let along = align_zero(self.tube.axial_position(point));
        let axis = self.tube.axis.direction.into_inner();

        if along <= 0.0 {
            -axis
        } else if align_zero(along - self.height) >= 0.0 {
            axis
        } else {
            self.tube.normal_at(point)
        }
    }

    pub fn intersect(&self, ray: &Ray, max_distance: FloatType) -> Hits {
        let mut hits = Hits::new();

        for root in self.tube.radial_roots(ray) {
            let along = align_zero(self.tube.axial_position(&ray.point_at(root)));
            if along >= 0.0 && align_zero(along - self.height) <= 0.0 {
                accept(&mut hits, root, max_distance);
            }
        }

        let axis = &self.tube.axis;
        let denominator = axis.direction.dot(&ray.direction);
        if !is_zero(denominator) {
            for cap_center in [axis.origin, axis.point_at(self.height)] {
                let distance = axis.direction.dot(&(cap_center - ray.origin)) / denominator;
                let radial_distance = (ray.point_at(distance) - cap_center).norm();
                if radial_distance < self.tube.radius {
                    accept(&mut hits, distance, max_distance);
                }
            }
        }

        hits.sort_by(|a, b| a.total_cmp(b));
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::test::{
        PositiveDistanceWrapper, WorldDirectionWrapper, WorldPointWrapper, assert_close,
        assert_point_close,
    };
    use assert2::assert;
    use test_case::test_case;
    use test_strategy::proptest;

    fn ray(origin: (f64, f64, f64), direction: (f64, f64, f64)) -> Ray {
        Ray::try_new(
            WorldPoint::new(origin.0, origin.1, origin.2),
            WorldVector::new(direction.0, direction.1, direction.2),
        )
        .unwrap()
    }

    fn z_axis() -> Ray {
        ray((0.0, 0.0, 0.0), (0.0, 0.0, 1.0))
    }

    #[proptest]
    fn sphere_normal_is_radial_unit_vector(
        center: WorldPointWrapper,
        radius: PositiveDistanceWrapper,
        direction: WorldDirectionWrapper,
    ) {
        let sphere = Sphere::new(*center, *radius).unwrap();
        let point = *center + direction.as_ref() * *radius;
        let normal = sphere.normal_at(&point);

        proptest::prop_assert!((normal.norm() - 1.0).abs() < 1e-9);
        proptest::prop_assert!((normal - direction.into_inner()).norm() < 1e-6);
    }

    #[test]
    fn sphere_two_hits() {
        let sphere = Sphere::new(WorldPoint::origin(), 1.0).unwrap();
        let r = ray((-2.0, 0.0, 0.0), (1.0, 0.0, 0.0));
        let hits = sphere.intersect(&r, FloatType::INFINITY);

        assert!(hits.len() == 2);
        assert_point_close(&r.point_at(hits[0]), &WorldPoint::new(-1.0, 0.0, 0.0));
        assert_point_close(&r.point_at(hits[1]), &WorldPoint::new(1.0, 0.0, 0.0));
    }

    #[test_case((0.0, 0.0, 0.0), 1 ; "from center")]
    #[test_case((0.5, 0.0, 0.0), 1 ; "from inside")]
    #[test_case((2.0, 0.0, 0.0), 0 ; "sphere behind ray")]
    #[test_case((-2.0, 1.0, 0.0), 1 ; "tangent")]
    #[test_case((-2.0, 1.01, 0.0), 0 ; "narrow miss")]
    fn sphere_hit_count(origin: (f64, f64, f64), expected: usize) {
        let sphere = Sphere::new(WorldPoint::origin(), 1.0).unwrap();
        let hits = sphere.intersect(&ray(origin, (1.0, 0.0, 0.0)), FloatType::INFINITY);
        assert!(hits.len() == expected);
    }

    #[test]
    fn sphere_from_center_hits_at_radius() {
        let sphere = Sphere::new(WorldPoint::new(1.0, 2.0, 3.0), 2.0).unwrap();
        let hits = sphere.intersect(&ray((1.0, 2.0, 3.0), (0.0, 1.0, 0.0)), FloatType::INFINITY);
        assert!(hits.as_slice() == [2.0]);
    }

    #[test]
    fn sphere_respects_max_distance() {
        let sphere = Sphere::new(WorldPoint::origin(), 1.0).unwrap();
        let hits = sphere.intersect(&ray((-2.0, 0.0, 0.0), (1.0, 0.0, 0.0)), 2.0);
        assert!(hits.as_slice() == [1.0]);
    }

    #[test]
    fn hit_at_max_distance_is_excluded() {
        let sphere = Sphere::new(WorldPoint::origin(), 1.0).unwrap();
        let hits = sphere.intersect(&ray((-2.0, 0.0, 0.0), (1.0, 0.0, 0.0)), 1.0);
        assert!(hits.is_empty());
    }

    #[test_case(0.0 ; "zero")]
    #[test_case(-1.0 ; "negative")]
    fn sphere_rejects_radius(radius: FloatType) {
        assert!(
            Sphere::new(WorldPoint::origin(), radius)
                == Err(GeometryError::NonPositiveRadius(radius))
        );
    }

    fn xy_plane() -> Plane {
        Plane::from_points(
            &WorldPoint::new(0.0, 0.0, 0.0),
            &WorldPoint::new(1.0, 0.0, 0.0),
            &WorldPoint::new(0.0, 1.0, 0.0),
        )
        .unwrap()
    }

    #[test]
    fn plane_from_points_hit() {
        let plane = xy_plane();
        let r = ray((0.0, 0.0, -1.0), (0.0, 0.0, 1.0));
        let hits = plane.intersect(&r, FloatType::INFINITY);
        assert!(hits.len() == 1);
        assert_point_close(&r.point_at(hits[0]), &WorldPoint::origin());
        assert_close(&plane.normal_at(&WorldPoint::origin()), &WorldVector::z());
    }

    #[test]
    fn plane_parallel_ray_misses() {
        let r = ray((0.0, 0.0, 1.0), (0.0, 1.0, 0.0));
        let hits = xy_plane().intersect(&r, FloatType::INFINITY);
        assert!(hits.is_empty());
    }

    #[test]
    fn plane_behind_ray_misses() {
        let r = ray((0.0, 0.0, 1.0), (0.0, 0.0, 1.0));
        let hits = xy_plane().intersect(&r, FloatType::INFINITY);
        assert!(hits.is_empty());
    }

    #[test]
    fn plane_beyond_max_distance_misses() {
        let hits = xy_plane().intersect(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0)), 4.0);
        assert!(hits.is_empty());
    }

    #[test]
    fn plane_construction_errors() {
        let p = WorldPoint::origin();
        assert!(Plane::new(p, WorldVector::zeros()) == Err(GeometryError::ZeroVector));
        assert!(
            Plane::from_points(
                &p,
                &WorldPoint::new(1.0, 1.0, 1.0),
                &WorldPoint::new(2.0, 2.0, 2.0)
            ) == Err(GeometryError::CollinearPoints)
        );
    }

    fn triangle() -> Triangle {
        Triangle::new(
            WorldPoint::new(0.0, 0.0, 0.0),
            WorldPoint::new(5.0, 0.0, 0.0),
            WorldPoint::new(0.0, 5.0, 0.0),
        )
        .unwrap()
    }

    #[test]
    fn triangle_inside_hit() {
        let r = ray((1.0, 1.0, -1.0), (0.0, 0.0, 1.0));
        let hits = triangle().intersect(&r, FloatType::INFINITY);
        assert!(hits.len() == 1);
        assert_point_close(&r.point_at(hits[0]), &WorldPoint::new(1.0, 1.0, 0.0));
    }

    #[test_case((10.0, 10.0) ; "outside against edge")]
    #[test_case((-1.0, -1.0) ; "outside against vertex")]
    #[test_case((2.0, 0.0) ; "on edge")]
    #[test_case((0.0, 0.0) ; "on vertex")]
    #[test_case((0.0, 7.0) ; "on edge extension")]
    fn triangle_misses(at: (f64, f64)) {
        let r = ray((at.0, at.1, -1.0), (0.0, 0.0, 1.0));
        let hits = triangle().intersect(&r, FloatType::INFINITY);
        assert!(hits.is_empty());
    }

    #[test]
    fn polygon_square_hit() {
        let square = Polygon::new(vec![
            WorldPoint::new(0.0, 0.0, 1.0),
            WorldPoint::new(1.0, 0.0, 0.0),
            WorldPoint::new(0.0, 1.0, 0.0),
            WorldPoint::new(-1.0, 1.0, 1.0),
        ])
        .unwrap();
        let r = ray((0.0, 0.5, 2.0), (0.0, 0.0, -1.0));
        let hits = square.intersect(&r, FloatType::INFINITY);
        assert!(hits.len() == 1);

        let expected = WorldVector::new(1.0, 1.0, 1.0).normalize();
        let normal = square.normal_at(&r.point_at(hits[0]));
        assert!((normal.dot(&expected).abs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn polygon_construction_errors() {
        let p = |x, y, z| WorldPoint::new(x, y, z);

        assert!(
            Polygon::new(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)])
                == Err(GeometryError::TooFewVertices(2))
        );
        assert!(
            Polygon::new(vec![
                p(0.0, 0.0, 1.0),
                p(1.0, 0.0, 0.0),
                p(0.0, 1.0, 0.0),
                p(-2.0, 1.0, 3.0)
            ]) == Err(GeometryError::NonPlanarPolygon)
        );
        assert!(
            Polygon::new(vec![
                p(0.0, 0.0, 1.0),
                p(1.0, 0.0, 0.0),
                p(-1.0, 1.0, 1.0),
                p(0.0, 1.0, 0.0)
            ]) == Err(GeometryError::NonConvexPolygon)
        );
        assert!(
            Polygon::new(vec![
                p(0.0, 0.0, 1.0),
                p(1.0, 0.0, 0.0),
                p(0.0, 1.0, 0.0),
                p(0.0, 0.5, 0.5)
            ]) == Err(GeometryError::NonConvexPolygon)
        );
        assert!(
            Polygon::new(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)])
                == Err(GeometryError::CollinearPoints)
        );
    }

    #[test]
    fn tube_normals() {
        let tube = Tube::new(5.0, z_axis()).unwrap();
        assert_close(&tube.normal_at(&WorldPoint::new(5.0, 0.0, 7.0)), &WorldVector::x());
        assert_close(&tube.normal_at(&WorldPoint::new(0.0, -5.0, 10.0)), &-WorldVector::y());
    }

    #[test]
    fn tube_crossing_ray_hits_twice() {
        let tube = Tube::new(2.0, ray((0.0, 0.0, 0.0), (0.0, 1.0, 0.0))).unwrap();
        let r = ray((-5.0, 3.0, 0.0), (1.0, 0.0, 0.0));
        let hits = tube.intersect(&r, FloatType::INFINITY);
        assert!(hits.len() == 2);
        assert_point_close(&r.point_at(hits[0]), &WorldPoint::new(-2.0, 3.0, 0.0));
        assert_point_close(&r.point_at(hits[1]), &WorldPoint::new(2.0, 3.0, 0.0));
    }

    #[test]
    fn tube_from_inside_hits_once() {
        let tube = Tube::new(2.0, ray((0.0, 0.0, 0.0), (0.0, 1.0, 0.0))).unwrap();
        let r = ray((1.0, 0.0, 0.0), (1.0, 1.0, 0.0));
        let hits = tube.intersect(&r, FloatType::INFINITY);
        assert!(hits.len() == 1);
    }

    #[test]
    fn tube_parallel_ray_misses() {
        let tube = Tube::new(2.0, ray((0.0, 0.0, 0.0), (0.0, 1.0, 0.0))).unwrap();
        for origin in [(5.0, 0.0, 0.0), (1.0, 0.0, 0.0)] {
            let r = ray(origin, (0.0, 1.0, 0.0));
            assert!(tube.intersect(&r, FloatType::INFINITY).is_empty());
        }
    }

    #[test]
    fn tube_rejects_radius() {
        assert!(Tube::new(0.0, z_axis()) == Err(GeometryError::NonPositiveRadius(0.0)));
    }

    #[test_case((2.0, 0.0, 2.0), (1.0, 0.0, 0.0) ; "side")]
    #[test_case((1.0, 1.0, 0.0), (0.0, 0.0, -1.0) ; "bottom cap")]
    #[test_case((-1.0, -1.0, 5.0), (0.0, 0.0, 1.0) ; "top cap")]
    #[test_case((0.0, 0.0, 0.0), (0.0, 0.0, -1.0) ; "bottom center")]
    #[test_case((0.0, 0.0, 5.0), (0.0, 0.0, 1.0) ; "top center")]
    #[test_case((2.0, 0.0, 0.0), (0.0, 0.0, -1.0) ; "bottom rim")]
    #[test_case((2.0, 0.0, 5.0), (0.0, 0.0, 1.0) ; "top rim")]
    #[test_case((0.0, -2.0, 0.0), (0.0, 0.0, -1.0) ; "bottom rim opposite side")]
    fn cylinder_normals(point: (f64, f64, f64), expected: (f64, f64, f64)) {
        let cylinder = Cylinder::new(2.0, 5.0, z_axis()).unwrap();
        let normal = cylinder.normal_at(&WorldPoint::new(point.0, point.1, point.2));
        assert_close(&normal, &WorldVector::new(expected.0, expected.1, expected.2));
    }

    #[test]
    fn cylinder_side_hits_within_height() {
        let cylinder = Cylinder::new(2.0, 5.0, z_axis()).unwrap();
        let r = ray((-5.0, 0.0, 2.0), (1.0, 0.0, 0.0));
        let hits = cylinder.intersect(&r, FloatType::INFINITY);
        assert!(hits.len() == 2);
        assert_point_close(&r.point_at(hits[0]), &WorldPoint::new(-2.0, 0.0, 2.0));
        assert_point_close(&r.point_at(hits[1]), &WorldPoint::new(2.0, 0.0, 2.0));
    }

    #[test]
    fn cylinder_misses_above_and_below() {
        let cylinder = Cylinder::new(2.0, 5.0, z_axis()).unwrap();
        for origin in [(-5.0, 0.0, 6.0), (-5.0, 0.0, -1.0)] {
            let r = ray(origin, (1.0, 0.0, 0.0));
            assert!(cylinder.intersect(&r, FloatType::INFINITY).is_empty());
        }
    }

    #[test]
    fn cylinder_along_axis_hits_caps() {
        let cylinder = Cylinder::new(2.0, 5.0, z_axis()).unwrap();
        let r = ray((0.5, 0.5, -3.0), (0.0, 0.0, 1.0));
        let hits = cylinder.intersect(&r, FloatType::INFINITY);
        assert!(hits.as_slice() == [3.0, 8.0]);
        assert_close(&cylinder.normal_at(&r.point_at(hits[0])), &-WorldVector::z());
        assert_close(&cylinder.normal_at(&r.point_at(hits[1])), &WorldVector::z());
    }

    #[test]
    fn cylinder_diagonal_hits_side_and_cap() {
        let cylinder = Cylinder::new(1.0, 2.0, z_axis()).unwrap();
        let r = ray((-2.0, 0.0, 0.5), (1.0, 0.0, 1.0));
        let hits = cylinder.intersect(&r, FloatType::INFINITY);
        assert!(hits.len() == 2);

        let side = r.point_at(hits[0]);
        let cap = r.point_at(hits[1]);
        assert_point_close(&side, &WorldPoint::new(-1.0, 0.0, 1.5));
        assert_point_close(&cap, &WorldPoint::new(-0.5, 0.0, 2.0));
        assert_close(&cylinder.normal_at(&side), &-WorldVector::x());
        assert_close(&cylinder.normal_at(&cap), &WorldVector::z());
    }

    #[test]
    fn cylinder_rejects_height() {
        assert!(Cylinder::new(1.0, 0.0, z_axis()) == Err(GeometryError::NonPositiveHeight(0.0)));
        assert!(Cylinder::new(1.0, -3.0, z_axis()) == Err(GeometryError::NonPositiveHeight(-3.0)));
    }
}
