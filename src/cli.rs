use std::{
    num::{NonZeroU32, NonZeroUsize},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use indicatif::ProgressBar;
use log::{LevelFilter, info};

use miniray::{
    AntiAliasing, RenderSettings, SceneDescription, geometry::ScreenSize, render, util::WHITE,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AntiAliasingMode {
    None,
    Grid,
    Adaptive,
}

/// Renders a JSON scene description into an image file
#[derive(Parser)]
#[command(name = "miniray")]
struct Args {
    /// Scene description file
    scene: PathBuf,

    /// Output image, format is taken from the extension
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,

    /// Override the image width stored in the scene file
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Override the image height stored in the scene file
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Number of worker threads, one per CPU by default
    #[arg(short = 'j', long)]
    workers: Option<NonZeroUsize>,

    #[arg(short, long, value_enum, default_value = "none")]
    anti_aliasing: AntiAliasingMode,

    /// Rays per axis per pixel for grid anti-aliasing
    #[arg(long, default_value = "4")]
    grid_samples: NonZeroU32,

    /// Maximum subdivision depth for adaptive anti-aliasing
    #[arg(long, default_value = "3")]
    max_depth: u32,

    /// Largest color difference between corners that adaptive anti-aliasing accepts
    #[arg(long, default_value = "0.05")]
    threshold: f64,

    /// Overlay white grid lines every this many pixels
    #[arg(long)]
    grid: Option<NonZeroU32>,

    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

impl Args {
    fn resolution(&self) -> Option<ScreenSize> {
        Some(ScreenSize::new(self.width?, self.height?))
    }

    fn settings(&self) -> RenderSettings {
        let anti_aliasing = match self.anti_aliasing {
            AntiAliasingMode::None => AntiAliasing::None,
            AntiAliasingMode::Grid => AntiAliasing::Grid {
                samples_per_axis: self.grid_samples,
            },
            AntiAliasingMode::Adaptive => AntiAliasing::Adaptive {
                max_depth: self.max_depth,
                threshold: self.threshold,
            },
        };
        RenderSettings {
            worker_count: self.workers,
            anti_aliasing,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let description = SceneDescription::load(&args.scene)?;
    let scene = description.scene()?;
    let camera = description.camera(args.resolution())?;
    let settings = args.settings();

    let bar = ProgressBar::new(camera.resolution().y.into());
    let render_progress = render(scene, camera, settings, {
        let bar = bar.clone();
        move |_row| bar.inc(1)
    })?;

    let mut output = render_progress.wait()?;
    bar.finish_and_clear();

    if let Some(interval) = args.grid {
        output.image.draw_grid(interval, WHITE);
    }

    output
        .image
        .to_image()
        .save(&args.output)
        .with_context(|| format!("Saving {}", args.output.display()))?;
    info!("Saved {}", args.output.display());

    Ok(())
}
