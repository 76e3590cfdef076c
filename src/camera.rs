use bon::bon;
use nalgebra::Unit;

use crate::{
    error::CameraError,
    geometry::{
        EPSILON, FloatType, Ray, ScreenSize, WorldDirection, WorldPoint, WorldVector, is_zero,
    },
};

/// Pinhole camera looking through a rectangular view plane.
#[derive(Copy, Clone, Debug)]
pub struct Camera {
    position: WorldPoint,

    forward: WorldDirection,
    up: WorldDirection,
    right: WorldDirection,

    view_plane_width: FloatType,
    view_plane_height: FloatType,
    view_plane_center: WorldPoint,

    resolution: ScreenSize,
}

#[bon]
impl Camera {
    /// `forward` and `up` must be orthogonal; `right` is derived as `forward × up`.
    #[builder]
    pub fn new(
        position: WorldPoint,
        forward: WorldVector,
        up: WorldVector,
        view_plane_width: FloatType,
        view_plane_height: FloatType,
        view_plane_distance: FloatType,
        resolution: ScreenSize,
    ) -> Result<Self, CameraError> {
        let forward = Unit::try_new(forward, EPSILON).ok_or(CameraError::ZeroVector("forward"))?;
        let up = Unit::try_new(up, EPSILON).ok_or(CameraError::ZeroVector("up"))?;
        let dot = forward.dot(&up);
        if !is_zero(dot) {
            return Err(CameraError::NotOrthogonal(dot));
        }
        let right = Unit::new_normalize(forward.cross(&up));

        for (name, value) in [
            ("width", view_plane_width),
            ("height", view_plane_height),
            ("distance", view_plane_distance),
        ] {
            if !(value > 0.0) {
                return Err(CameraError::NonPositiveViewPlane(name, value));
            }
        }
        if resolution.x == 0 || resolution.y == 0 {
            return Err(CameraError::EmptyResolution(resolution.x, resolution.y));
        }

        Ok(Camera {
            position,
            forward,
            up,
            right,
            view_plane_width,
            view_plane_height,
            view_plane_center: position + forward.as_ref() * view_plane_distance,
            resolution,
        })
    }

    /// Camera at `position` aimed at `target`.
    /// `up` only needs to point roughly upwards, it is straightened to be orthogonal
    /// to the viewing direction.
    #[builder(finish_fn = build)]
    pub fn look_at(
        position: WorldPoint,
        target: WorldPoint,
        #[builder(default = WorldVector::y())] up: WorldVector,
        view_plane_width: FloatType,
        view_plane_height: FloatType,
        view_plane_distance: FloatType,
        resolution: ScreenSize,
    ) -> Result<Self, CameraError> {
        let forward = Unit::try_new(target - position, EPSILON)
            .ok_or(CameraError::ZeroVector("forward"))?;
        let up = Unit::try_new(up, EPSILON).ok_or(CameraError::ZeroVector("up"))?;
        let right = Unit::try_new(forward.cross(&up), EPSILON).ok_or(CameraError::ParallelUp)?;
        let up = right.cross(&forward);

        Camera::builder()
            .position(position)
            .forward(forward.into_inner())
            .up(up)
            .view_plane_width(view_plane_width)
            .view_plane_height(view_plane_height)
            .view_plane_distance(view_plane_distance)
            .resolution(resolution)
            .build()
    }
}

impl Camera {
    pub fn position(&self) -> WorldPoint {
        self.position
    }

    pub fn forward(&self) -> WorldDirection {
        self.forward
    }

    pub fn up(&self) -> WorldDirection {
        self.up
    }

    pub fn right(&self) -> WorldDirection {
        self.right
    }

    pub fn resolution(&self) -> ScreenSize {
        self.resolution
    }

    /// Ray through the center of pixel (`col`, `row`) of a view plane split
    /// into `nx` × `ny` pixels. Rows grow downwards in the image.
    pub fn construct_ray(&self, nx: u32, ny: u32, col: u32, row: u32) -> Ray {
        let pixel_width = self.view_plane_width / nx as FloatType;
        let pixel_height = self.view_plane_height / ny as FloatType;

        let x = (col as FloatType - (nx as FloatType - 1.0) / 2.0) * pixel_width;
        let y = -(row as FloatType - (ny as FloatType - 1.0) / 2.0) * pixel_height;
        self.ray_to_view_plane(x, y)
    }

    /// Ray through a fractional position in the camera's own pixel grid.
    /// Pixel (col, row) spans `[col, col + 1) × [row, row + 1)`, so its center is at `+ 0.5`.
    pub fn ray_through(&self, x: FloatType, y: FloatType) -> Ray {
        let pixel_width = self.view_plane_width / self.resolution.x as FloatType;
        let pixel_height = self.view_plane_height / self.resolution.y as FloatType;

        let x = (x - self.resolution.x as FloatType / 2.0) * pixel_width;
        let y = -(y - self.resolution.y as FloatType / 2.0) * pixel_height;
        self.ray_to_view_plane(x, y)
    }

    fn ray_to_view_plane(&self, x: FloatType, y: FloatType) -> Ray {
        let mut target = self.view_plane_center;
        if !is_zero(x) {
            target += self.right.as_ref() * x;
        }
        if !is_zero(y) {
            target += self.up.as_ref() * y;
        }
        // The view plane lies a positive distance in front of the camera, so the
        // direction can never be zero.
        Ray::new(self.position, Unit::new_normalize(target - self.position))
    }
}
