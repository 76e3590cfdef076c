//! JSON scene files.
//!
//! Colors are `[r, g, b]` triplets where `1.0` is full intensity,
//! points and vectors are `[x, y, z]`.

use std::path::Path;

use anyhow::{Context as _, bail};
use serde::{Deserialize, Serialize};

use super::{
    Material, Scene, Surface,
    light::{DirectionalLight, PointLight, SpotLight},
    primitives::{Cylinder, Plane, Polygon, Sphere, Triangle, Tube},
};
use crate::{
    camera::Camera,
    geometry::{FloatType, Ray, ScreenSize, WorldPoint, WorldVector},
    util::Color,
};

type Triplet = [FloatType; 3];

fn color(c: Triplet) -> Color {
    Color::new(c[0], c[1], c[2])
}

fn point(p: Triplet) -> WorldPoint {
    WorldPoint::new(p[0], p[1], p[2])
}

fn vector(v: Triplet) -> WorldVector {
    WorldVector::new(v[0], v[1], v[2])
}

fn one() -> FloatType {
    1.0
}

fn default_shininess() -> u32 {
    1
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub background: Triplet,
    #[serde(default)]
    pub ambient: Triplet,
    pub camera: CameraDescription,
    #[serde(default)]
    pub surfaces: Vec<SurfaceDescription>,
    #[serde(default)]
    pub lights: Vec<LightDescription>,
}

/// Orientation is given either as `forward` + `up`, or as a `target` point
/// with `up` defaulting to `[0, 1, 0]`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CameraDescription {
    pub position: Triplet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward: Option<Triplet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Triplet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up: Option<Triplet>,
    pub view_plane_width: FloatType,
    pub view_plane_height: FloatType,
    pub view_plane_distance: FloatType,
    /// `[width, height]` in pixels
    pub resolution: [u32; 2],
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SurfaceDescription {
    #[serde(flatten)]
    pub shape: ShapeDescription,
    #[serde(default)]
    pub emission: Triplet,
    #[serde(default)]
    pub material: MaterialDescription,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDescription {
    Sphere {
        center: Triplet,
        radius: FloatType,
    },
    Plane {
        point: Triplet,
        normal: Triplet,
    },
    Polygon {
        vertices: Vec<Triplet>,
    },
    Triangle {
        vertices: [Triplet; 3],
    },
    Tube {
        origin: Triplet,
        direction: Triplet,
        radius: FloatType,
    },
    Cylinder {
        origin: Triplet,
        direction: Triplet,
        radius: FloatType,
        height: FloatType,
    },
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MaterialDescription {
    #[serde(default)]
    pub kd: Triplet,
    #[serde(default)]
    pub ks: Triplet,
    #[serde(default)]
    pub kr: Triplet,
    #[serde(default)]
    pub kt: Triplet,
    #[serde(default = "default_shininess")]
    pub shininess: u32,
}

impl Default for MaterialDescription {
    fn default() -> Self {
        MaterialDescription {
            kd: [0.0; 3],
            ks: [0.0; 3],
            kr: [0.0; 3],
            kt: [0.0; 3],
            shininess: default_shininess(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LightDescription {
    Point {
        intensity: Triplet,
        position: Triplet,
        #[serde(default = "one")]
        kc: FloatType,
        #[serde(default)]
        kl: FloatType,
        #[serde(default)]
        kq: FloatType,
    },
    Spot {
        intensity: Triplet,
        position: Triplet,
        direction: Triplet,
        #[serde(default = "one")]
        kc: FloatType,
        #[serde(default)]
        kl: FloatType,
        #[serde(default)]
        kq: FloatType,
        #[serde(default = "one")]
        narrow_beam: FloatType,
    },
    Directional {
        intensity: Triplet,
        direction: Triplet,
    },
}

impl SceneDescription {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Reading scene file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Parsing scene file {}", path.display()))
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds the scene, validating every surface and light.
    pub fn scene(&self) -> anyhow::Result<Scene> {
        let mut scene = Scene::new()
            .with_background(color(self.background))
            .with_ambient(color(self.ambient));

        for (i, surface) in self.surfaces.iter().enumerate() {
            scene.add_surface(surface.build().with_context(|| format!("Surface #{i}"))?);
        }
        for (i, light) in self.lights.iter().enumerate() {
            scene.add_light(light.build().with_context(|| format!("Light #{i}"))?);
        }

        Ok(scene)
    }

    /// Builds the camera, optionally overriding the resolution stored in the file.
    pub fn camera(&self, resolution: Option<ScreenSize>) -> anyhow::Result<Camera> {
        self.camera.build(resolution).context("Camera")
    }
}

impl CameraDescription {
    fn build(&self, resolution: Option<ScreenSize>) -> anyhow::Result<Camera> {
        let resolution = resolution
            .unwrap_or_else(|| ScreenSize::new(self.resolution[0], self.resolution[1]));
        let up = self.up.map(vector);

        let camera = match (self.forward, self.target) {
            (Some(forward), None) => {
                let Some(up) = up else {
                    bail!("`up` is required together with `forward`");
                };
                Camera::builder()
                    .position(point(self.position))
                    .forward(vector(forward))
                    .up(up)
                    .view_plane_width(self.view_plane_width)
                    .view_plane_height(self.view_plane_height)
                    .view_plane_distance(self.view_plane_distance)
                    .resolution(resolution)
                    .build()?
            }
            (None, Some(target)) => Camera::look_at()
                .position(point(self.position))
                .target(point(target))
                .maybe_up(up)
                .view_plane_width(self.view_plane_width)
                .view_plane_height(self.view_plane_height)
                .view_plane_distance(self.view_plane_distance)
                .resolution(resolution)
                .build()?,
            (Some(_), Some(_)) => bail!("`forward` and `target` are mutually exclusive"),
            (None, None) => bail!("either `forward` or `target` is required"),
        };
        Ok(camera)
    }
}

impl SurfaceDescription {
    fn build(&self) -> anyhow::Result<Surface> {
        let m = &self.material;
        let material = Material::builder()
            .kd(color(m.kd))
            .ks(color(m.ks))
            .kr(color(m.kr))
            .kt(color(m.kt))
            .shininess(m.shininess)
            .build();

        Ok(Surface::new(self.shape.build()?)
            .with_emission(color(self.emission))
            .with_material(material))
    }
}

impl ShapeDescription {
    fn build(&self) -> anyhow::Result<super::Shape> {
        Ok(match self {
            ShapeDescription::Sphere { center, radius } => {
                Sphere::new(point(*center), *radius)?.into()
            }
            ShapeDescription::Plane { point: p, normal } => {
                Plane::new(point(*p), vector(*normal))?.into()
            }
            ShapeDescription::Polygon { vertices } => {
                Polygon::new(vertices.iter().copied().map(point).collect())?.into()
            }
            ShapeDescription::Triangle { vertices: [a, b, c] } => {
                Triangle::new(point(*a), point(*b), point(*c))?.into()
            }
            ShapeDescription::Tube {
                origin,
                direction,
                radius,
            } => Tube::new(*radius, Ray::try_new(point(*origin), vector(*direction))?)?.into(),
            ShapeDescription::Cylinder {
                origin,
                direction,
                radius,
                height,
            } => Cylinder::new(
                *radius,
                *height,
                Ray::try_new(point(*origin), vector(*direction))?,
            )?
            .into(),
        })
    }
}

impl LightDescription {
    fn build(&self) -> anyhow::Result<super::LightSource> {
        Ok(match self {
            LightDescription::Point {
                intensity,
                position,
                kc,
                kl,
                kq,
            } => PointLight::builder()
                .intensity(color(*intensity))
                .position(point(*position))
                .kc(*kc)
                .kl(*kl)
                .kq(*kq)
                .build()?
                .into(),
            LightDescription::Spot {
                intensity,
                position,
                direction,
                kc,
                kl,
                kq,
                narrow_beam,
            } => SpotLight::builder()
                .intensity(color(*intensity))
                .position(point(*position))
                .direction(vector(*direction))
                .kc(*kc)
                .kl(*kl)
                .kq(*kq)
                .narrow_beam(*narrow_beam)
                .build()?
                .into(),
            LightDescription::Directional {
                intensity,
                direction,
            } => DirectionalLight::new(color(*intensity), vector(*direction))?.into(),
        })
    }
}
