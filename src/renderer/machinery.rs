use std::{
    sync::{
        Arc, OnceLock,
        atomic::{AtomicUsize, Ordering},
    },
    thread::{self, JoinHandle},
    time::Instant,
};

use anyhow::Context as _;
use log::{debug, info, trace};

use crate::{
    camera::Camera,
    frame_buffer::FrameBuffer,
    renderer::{RayTracer, RenderSettings, worker::Worker},
    scene::Scene,
    util::{Color, SampleStats},
};

/// Starts rendering on a pool of worker threads and returns immediately.
///
/// Workers claim whole rows from a shared counter. `finished_row_callback` is called
/// from the worker thread with the index of every completed row.
pub fn render<F: Fn(u32) + Send + Sync + 'static>(
    scene: Scene,
    camera: Camera,
    settings: RenderSettings,
    finished_row_callback: F,
) -> anyhow::Result<RenderProgress> {
    let resolution = camera.resolution();
    let worker_count = settings.worker_count();
    debug!(
        "Rendering {}x{} pixels, {} surfaces, {} lights, {} workers, {:?}",
        resolution.x,
        resolution.y,
        scene.geometries.len(),
        scene.lights.len(),
        worker_count,
        settings.anti_aliasing
    );

    let state = Arc::new(RenderState {
        scene,
        camera,
        settings,

        rows: (0..resolution.y).map(|_| OnceLock::new()).collect(),
        next_row_index: AtomicUsize::new(0),
        finished_rows: AtomicUsize::new(0),
    });
    let finished_row_callback = Arc::new(finished_row_callback);

    let cores = core_affinity::get_core_ids().unwrap_or_default();
    if cores.len() < worker_count {
        debug!(
            "{} core ids available for {worker_count} workers, not pinning",
            cores.len()
        );
    }
    let pin_workers = cores.len() >= worker_count;

    let threads = (0..worker_count)
        .map(|worker_id| {
            let state = Arc::clone(&state);
            let finished_row_callback = Arc::clone(&finished_row_callback);
            let core = cores.get(worker_id).copied().filter(|_| pin_workers);

            thread::Builder::new()
                .name(format!("worker{worker_id}"))
                .spawn(move || {
                    if let Some(core) = core {
                        core_affinity::set_for_current(core);
                    }

                    let mut worker = Worker::new(
                        RayTracer::new(&state.scene),
                        &state.camera,
                        state.settings.anti_aliasing,
                    );

                    while let Some((row, slot)) = state.get_next_row() {
                        let pixels = worker.render_row(row);
                        if slot.set(pixels).is_err() {
                            unreachable!("Every row is claimed by exactly one worker");
                        }
                        state.finished_rows.fetch_add(1, Ordering::AcqRel);
                        trace!("worker{worker_id} finished row {row}");

                        (finished_row_callback)(row);
                    }

                    worker.into_stats()
                })
        })
        .collect::<Result<Vec<_>, _>>()
        .context("Spawning worker threads")?;

    Ok(RenderProgress {
        render_state: state,
        threads,
        started: Instant::now(),
    })
}

/// Handle to a running render.
pub struct RenderProgress {
    render_state: Arc<RenderState>,
    threads: Vec<JoinHandle<SampleStats>>,
    started: Instant,
}

/// Finished image together with sampling statistics of all workers.
#[derive(Clone, Debug)]
pub struct RenderOutput {
    pub image: FrameBuffer,
    pub stats: SampleStats,
}

impl RenderProgress {
    /// Return number of finished and total rows.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.render_state.rows.len();
        let finished = self.render_state.finished_rows.load(Ordering::Acquire);
        (finished, total)
    }

    pub fn progress_percent(&self) -> f32 {
        let (finished, total) = self.progress();
        100.0 * (finished as f32) / (total as f32)
    }

    pub fn is_finished(&self) -> bool {
        self.threads.iter().all(|handle| handle.is_finished())
    }

    /// Blocks until all workers are done and assembles the image.
    pub fn wait(self) -> anyhow::Result<RenderOutput> {
        let mut stats = SampleStats::default();
        for handle in self.threads {
            let worker_stats = handle
                .join()
                .map_err(|_| anyhow::anyhow!("A worker thread panicked"))?;
            stats = stats.merge(&worker_stats);
        }

        let state = Arc::into_inner(self.render_state)
            .context("Render state is still shared after all workers finished")?;
        let size = state.camera.resolution();
        let rows = state
            .rows
            .into_vec()
            .into_iter()
            .enumerate()
            .map(|(i, row)| row.into_inner().with_context(|| format!("Row {i} was not rendered")))
            .collect::<anyhow::Result<Vec<_>>>()?;

        info!("Rendered in {:.2?}; {stats}", self.started.elapsed());

        Ok(RenderOutput {
            image: FrameBuffer::from_rows(size, rows),
            stats,
        })
    }
}

struct RenderState {
    scene: Scene,
    camera: Camera,
    settings: RenderSettings,

    /// Written exactly once each, by the worker that claimed the row.
    rows: Box<[OnceLock<Box<[Color]>>]>,
    next_row_index: AtomicUsize,
    finished_rows: AtomicUsize,
}

impl RenderState {
    fn get_next_row(&self) -> Option<(u32, &OnceLock<Box<[Color]>>)> {
        let id = self.next_row_index.fetch_add(1, Ordering::AcqRel);
        let slot = self.rows.get(id)?;
        Some((u32::try_from(id).ok()?, slot))
    }
}
