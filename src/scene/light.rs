//! Light sources.
//!
//! All directions returned here point from the light towards the lit point.

use bon::bon;

use crate::{
    error::GeometryError,
    geometry::{self, EPSILON, FloatType, WorldDirection, WorldPoint, WorldVector},
    util::{BLACK, Color, ColorExt as _},
};

#[derive(Clone, Debug, PartialEq)]
pub enum LightSource {
    Point(PointLight),
    Spot(SpotLight),
    Directional(DirectionalLight),
}

impl LightSource {
    /// Light intensity arriving at `point`, ignoring occlusion.
    pub fn intensity_at(&self, point: &WorldPoint) -> Color {
        match self {
            LightSource::Point(light) => light.intensity_at(point),
            LightSource::Spot(light) => light.intensity_at(point),
            LightSource::Directional(light) => light.intensity,
        }
    }

    /// Unit vector from the light to `point`.
    /// `None` if the point coincides with a positional light.
    pub fn direction_to(&self, point: &WorldPoint) -> Option<WorldDirection> {
        match self {
            LightSource::Point(light) => light.direction_to(point),
            LightSource::Spot(light) => light.point.direction_to(point),
            LightSource::Directional(light) => Some(light.direction),
        }
    }

    pub fn distance_to(&self, point: &WorldPoint) -> FloatType {
        match self {
            LightSource::Point(light) => light.distance_to(point),
            LightSource::Spot(light) => light.point.distance_to(point),
            LightSource::Directional(_) => FloatType::INFINITY,
        }
    }
}

impl From<PointLight> for LightSource {
    fn from(light: PointLight) -> Self {
        LightSource::Point(light)
    }
}

impl From<SpotLight> for LightSource {
    fn from(light: SpotLight) -> Self {
        LightSource::Spot(light)
    }
}

impl From<DirectionalLight> for LightSource {
    fn from(light: DirectionalLight) -> Self {
        LightSource::Directional(light)
    }
}

/// Omnidirectional light with distance attenuation `1 / (kc + kl*d + kq*d^2)`.
/// The factors are non-negative and at least one of them is positive.
#[derive(Clone, Debug, PartialEq)]
pub struct PointLight {
    intensity: Color,
    position: WorldPoint,
    kc: FloatType,
    kl: FloatType,
    kq: FloatType,
}

#[bon]
impl PointLight {
    #[builder]
    pub fn new(
        intensity: Color,
        position: WorldPoint,
        #[builder(default = 1.0)] kc: FloatType,
        #[builder(default)] kl: FloatType,
        #[builder(default)] kq: FloatType,
    ) -> Result<Self, GeometryError> {
        let factors = [kc, kl, kq];
        if !factors.iter().all(|k| *k >= 0.0) || !factors.iter().any(|k| *k > 0.0) {
            return Err(GeometryError::InvalidAttenuation(kc, kl, kq));
        }
        Ok(PointLight {
            intensity,
            position,
            kc,
            kl,
            kq,
        })
    }
}

impl PointLight {
    pub fn position(&self) -> WorldPoint {
        self.position
    }

    fn intensity_at(&self, point: &WorldPoint) -> Color {
        let d = self.distance_to(point);
        let attenuation = self.kc + self.kl * d + self.kq * d * d;
        self.intensity.scaled(1.0 / attenuation)
    }

    fn direction_to(&self, point: &WorldPoint) -> Option<WorldDirection> {
        geometry::direction(point - self.position).ok()
    }

    fn distance_to(&self, point: &WorldPoint) -> FloatType {
        (point - self.position).norm()
    }
}

/// Point light emitting a beam around `direction`.
/// The intensity falls off as `max(0, cos(angle))^narrow_beam`.
#[derive(Clone, Debug, PartialEq)]
pub struct SpotLight {
    point: PointLight,
    direction: WorldDirection,
    narrow_beam: FloatType,
}

#[bon]
impl SpotLight {
    #[builder]
    pub fn new(
        intensity: Color,
        position: WorldPoint,
        direction: WorldVector,
        #[builder(default = 1.0)] kc: FloatType,
        #[builder(default)] kl: FloatType,
        #[builder(default)] kq: FloatType,
        #[builder(default = 1.0)] narrow_beam: FloatType,
    ) -> Result<Self, GeometryError> {
        Ok(SpotLight {
            point: PointLight::builder()
                .intensity(intensity)
                .position(position)
                .kc(kc)
                .kl(kl)
                .kq(kq)
                .build()?,
            direction: geometry::direction(direction)?,
            narrow_beam,
        })
    }
}

impl SpotLight {
    pub fn position(&self) -> WorldPoint {
        self.point.position
    }

    fn intensity_at(&self, point: &WorldPoint) -> Color {
        let Some(l) = self.point.direction_to(point) else {
            return self.point.intensity;
        };
        let factor = self.direction.dot(&l);
        if factor <= EPSILON {
            return BLACK;
        }
        self.point
            .intensity_at(point)
            .scaled(factor.powf(self.narrow_beam))
    }
}

/// Light infinitely far away, shining in a single direction without falloff.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    intensity: Color,
    direction: WorldDirection,
}

impl DirectionalLight {
    pub fn new(intensity: Color, direction: WorldVector) -> Result<Self, GeometryError> {
        Ok(DirectionalLight {
            intensity,
            direction: geometry::direction(direction)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geometry::test::assert_close,
        util::{WHITE, gray},
    };
    use assert2::assert;
    use test_case::test_case;

    fn assert_color_close(a: Color, b: Color) {
        assert!(a.max_difference(&b) < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn point_light_attenuation() {
        let light: LightSource = PointLight::builder()
            .intensity(WHITE)
            .position(WorldPoint::origin())
            .kl(0.5)
            .kq(0.25)
            .build()
            .unwrap()
            .into();
        let point = WorldPoint::new(0.0, 2.0, 0.0);

        // 1 / (1 + 0.5 * 2 + 0.25 * 4)
        assert_color_close(light.intensity_at(&point), gray(1.0 / 3.0));
        assert!(light.distance_to(&point) == 2.0);
        assert_close(&light.direction_to(&point).unwrap(), &WorldVector::y());
    }

    #[test]
    fn point_light_at_point_has_no_direction() {
        let light = LightSource::from(
            PointLight::builder()
                .intensity(WHITE)
                .position(WorldPoint::origin())
                .build()
                .unwrap(),
        );
        assert!(light.direction_to(&WorldPoint::origin()).is_none());
    }

    #[test_case((0.0, 0.0, 5.0), 1.0 ; "on axis")]
    #[test_case((0.0, 5.0, 5.0), 0.5 ; "45 degrees")]
    #[test_case((0.0, 5.0, 0.0), 0.0 ; "perpendicular")]
    #[test_case((0.0, 0.0, -5.0), 0.0 ; "behind")]
    fn spot_light_beam(point: (f64, f64, f64), expected: f64) {
        let light: LightSource = SpotLight::builder()
            .intensity(WHITE)
            .position(WorldPoint::origin())
            .direction(WorldVector::new(0.0, 0.0, 2.0))
            .narrow_beam(2.0)
            .build()
            .unwrap()
            .into();
        let intensity = light.intensity_at(&WorldPoint::new(point.0, point.1, point.2));
        assert_color_close(intensity, gray(expected));
    }

    #[test]
    fn spot_light_rejects_zero_direction() {
        let result = SpotLight::builder()
            .intensity(WHITE)
            .position(WorldPoint::origin())
            .direction(WorldVector::zeros())
            .build();
        assert!(result == Err(GeometryError::ZeroVector));
    }

    #[test_case(0.0, 0.0, 0.0 ; "all zero")]
    #[test_case(1.0, -0.5, 0.0 ; "negative linear")]
    #[test_case(-1.0, 0.0, 1.0 ; "negative constant")]
    fn point_light_rejects_attenuation(kc: f64, kl: f64, kq: f64) {
        let result = PointLight::builder()
            .intensity(WHITE)
            .position(WorldPoint::origin())
            .kc(kc)
            .kl(kl)
            .kq(kq)
            .build();
        assert!(result == Err(GeometryError::InvalidAttenuation(kc, kl, kq)));
    }

    #[test]
    fn spot_light_rejects_attenuation() {
        let result = SpotLight::builder()
            .intensity(WHITE)
            .position(WorldPoint::origin())
            .direction(WorldVector::z())
            .kc(0.0)
            .build();
        assert!(result == Err(GeometryError::InvalidAttenuation(0.0, 0.0, 0.0)));
    }

    #[test]
    fn inverse_square_light_is_accepted() {
        let light: LightSource = PointLight::builder()
            .intensity(WHITE)
            .position(WorldPoint::origin())
            .kc(0.0)
            .kq(1.0)
            .build()
            .unwrap()
            .into();
        assert_color_close(light.intensity_at(&WorldPoint::new(2.0, 0.0, 0.0)), gray(0.25));
    }

    #[test]
    fn directional_light_is_constant() {
        let direction = WorldVector::new(0.0, -3.0, 0.0);
        let light: LightSource = DirectionalLight::new(gray(0.5), direction).unwrap().into();
        let far = WorldPoint::new(1e6, -1e6, 3.0);

        assert!(light.intensity_at(&far) == gray(0.5));
        assert!(light.distance_to(&far) == FloatType::INFINITY);
        assert_close(&light.direction_to(&far).unwrap(), &-WorldVector::y());
        let zero = DirectionalLight::new(WHITE, WorldVector::zeros());
        assert!(zero == Err(GeometryError::ZeroVector));
    }
}
