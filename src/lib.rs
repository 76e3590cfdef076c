pub mod camera;
pub mod error;
pub mod frame_buffer;
pub mod geometry;
pub mod renderer;
pub mod scene;
pub mod util;

pub use crate::renderer::{AntiAliasing, RenderOutput, RenderProgress, RenderSettings, render};
pub use camera::Camera;
pub use frame_buffer::{FrameBuffer, ImageSink};
pub use scene::{Scene, Surface, description::SceneDescription};
pub use util::Color;
