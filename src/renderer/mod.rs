mod machinery;
mod shader;
mod worker;

use std::num::{NonZeroU32, NonZeroUsize};

pub use crate::renderer::machinery::{RenderOutput, RenderProgress, render};
pub use crate::renderer::shader::{INITIAL_K, MAX_CALC_COLOR_LEVEL, MIN_CALC_COLOR_K, RayTracer};

use crate::geometry::FloatType;

/// How many primary rays are traced per pixel.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum AntiAliasing {
    /// Single ray through the pixel center
    #[default]
    None,
    /// Regular grid of `samples_per_axis`² rays, averaged
    Grid { samples_per_axis: NonZeroU32 },
    /// Corner sampling with recursive subdivision of cells whose corners differ
    /// by at least `threshold` in some channel
    Adaptive { max_depth: u32, threshold: FloatType },
}

#[derive(Copy, Clone, Debug, Default)]
pub struct RenderSettings {
    /// `None` runs one worker per CPU
    pub worker_count: Option<NonZeroUsize>,
    pub anti_aliasing: AntiAliasing,
}

impl RenderSettings {
    pub fn worker_count(&self) -> usize {
        self.worker_count.map_or_else(num_cpus::get, NonZeroUsize::get)
    }
}
