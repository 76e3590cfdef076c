use thiserror::Error;

use crate::geometry::FloatType;

/// Rejected scene element. Raised when a surface or light is constructed, never while rendering.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(FloatType),
    #[error("height must be positive, got {0}")]
    NonPositiveHeight(FloatType),
    #[error("vector must be non-zero")]
    ZeroVector,
    #[error("points are collinear and do not define a plane")]
    CollinearPoints,
    #[error("a polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("all polygon vertices must lie in the same plane")]
    NonPlanarPolygon,
    #[error("polygon vertices must be ordered and form a convex polygon")]
    NonConvexPolygon,
    #[error("attenuation factors must be non-negative and not all zero, got {0}, {1}, {2}")]
    InvalidAttenuation(FloatType, FloatType, FloatType),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CameraError {
    #[error("`{0}` vector must be non-zero")]
    ZeroVector(&'static str),
    #[error("`forward` and `up` must be orthogonal (dot product {0})")]
    NotOrthogonal(FloatType),
    #[error("`up` must not be parallel to the viewing direction")]
    ParallelUp,
    #[error("view plane {0} must be positive, got {1}")]
    NonPositiveViewPlane(&'static str, FloatType),
    #[error("resolution must be non-zero, got {0}x{1}")]
    EmptyResolution(u32, u32),
}
