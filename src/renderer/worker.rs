use std::collections::HashMap;

use crate::{
    camera::Camera,
    geometry::FloatType,
    renderer::{AntiAliasing, RayTracer},
    util::{Color, ColorExt as _, SampleStats, average},
};

/// Adaptive subdivision never goes below cells of this many pixels.
const MIN_CELL_SIZE: FloatType = 1.0 / 64.0;

pub struct Worker<'a> {
    tracer: RayTracer<'a>,
    camera: &'a Camera,
    anti_aliasing: AntiAliasing,
    stats: SampleStats,
}

impl<'a> Worker<'a> {
    pub fn new(tracer: RayTracer<'a>, camera: &'a Camera, anti_aliasing: AntiAliasing) -> Self {
        Self {
            tracer,
            camera,
            anti_aliasing,
            stats: SampleStats::default(),
        }
    }

    pub fn render_row(&mut self, row: u32) -> Box<[Color]> {
        (0..self.camera.resolution().x)
            .map(|col| self.render_pixel(col, row))
            .collect()
    }

    pub fn into_stats(self) -> SampleStats {
        self.stats
    }

    fn render_pixel(&mut self, col: u32, row: u32) -> Color {
        let mut sampler = Sampler {
            tracer: &self.tracer,
            camera: self.camera,
            rays: 0,
        };

        let color = match self.anti_aliasing {
            AntiAliasing::None => {
                let resolution = self.camera.resolution();
                sampler.rays += 1;
                self.tracer
                    .trace(&self.camera.construct_ray(resolution.x, resolution.y, col, row))
            }
            AntiAliasing::Grid { samples_per_axis } => {
                let n = samples_per_axis.get();
                let step = 1.0 / n as FloatType;
                let samples = (0..n)
                    .flat_map(|i| (0..n).map(move |j| (i, j)))
                    .map(|(i, j)| {
                        sampler.sample(
                            col as FloatType + (j as FloatType + 0.5) * step,
                            row as FloatType + (i as FloatType + 0.5) * step,
                        )
                    })
                    .collect::<Vec<_>>();
                average(samples)
            }
            AntiAliasing::Adaptive {
                max_depth,
                threshold,
            } => {
                let mut adaptive = AdaptiveSampler {
                    sampler,
                    max_depth,
                    threshold,
                    cache: HashMap::new(),
                };
                let color = adaptive.cell(col as FloatType, row as FloatType, 1.0, 0);
                sampler = adaptive.sampler;
                color
            }
        };

        self.stats.add_pixel(sampler.rays);
        color
    }
}

/// Traces rays through fractional pixel positions, counting them.
struct Sampler<'s, 'a> {
    tracer: &'s RayTracer<'a>,
    camera: &'s Camera,
    rays: usize,
}

impl Sampler<'_, '_> {
    fn sample(&mut self, x: FloatType, y: FloatType) -> Color {
        self.rays += 1;
        self.tracer.trace(&self.camera.ray_through(x, y))
    }
}

struct AdaptiveSampler<'s, 'a> {
    sampler: Sampler<'s, 'a>,
    max_depth: u32,
    threshold: FloatType,
    /// Corner colors keyed by position in units of `MIN_CELL_SIZE`.
    /// Neighbouring cells share corners, each is traced only once.
    cache: HashMap<(i64, i64), Color>,
}

impl AdaptiveSampler<'_, '_> {
    fn corner(&mut self, x: FloatType, y: FloatType) -> Color {
        let key = (
            (x / MIN_CELL_SIZE).round() as i64,
            (y / MIN_CELL_SIZE).round() as i64,
        );
        if let Some(color) = self.cache.get(&key) {
            return *color;
        }
        let color = self.sampler.sample(x, y);
        self.cache.insert(key, color);
        color
    }

    /// Color of the square cell with top left corner at (`x`, `y`).
    fn cell(&mut self, x: FloatType, y: FloatType, size: FloatType, depth: u32) -> Color {
        let corners = [
            self.corner(x, y),
            self.corner(x + size, y),
            self.corner(x, y + size),
            self.corner(x + size, y + size),
        ];

        let half = size / 2.0;
        let similar = corners.iter().enumerate().all(|(i, a)| {
            corners[i + 1..]
                .iter()
                .all(|b| a.max_difference(b) < self.threshold)
        });

        if similar || depth >= self.max_depth || half < MIN_CELL_SIZE {
            return average(corners);
        }

        average([
            self.cell(x, y, half, depth + 1),
            self.cell(x + half, y, half, depth + 1),
            self.cell(x, y + half, half, depth + 1),
            self.cell(x + half, y + half, half, depth + 1),
        ])
    }
}
