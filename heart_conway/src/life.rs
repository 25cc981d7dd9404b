// life.rs - The heart automaton as one owned, per-frame driven unit

use crate::config::LifeConfig;
use crate::grid::Grid;
use crate::label::Label;
use crate::render::{self, Palette};
use crate::scheduler::{Phase, Scheduler};
use crate::shape::{self, CellMask, GlyphRasterizer, HeartShape};
use crate::sim;
use crate::surface::PixelSurface;
use crate::timer::{GraceTimer, RepaintFn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Result of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The loop was stopped; don't schedule another frame.
    Stopped,
    /// Keep going. `stepped` says whether a generation was applied.
    Continue { stepped: bool },
}

/// Owns everything the automaton scene needs: grid, masks, scheduler, grace
/// timer and rng.
///
/// Driven by the host's frame callback: call [`AnimationLoop::tick`] then
/// [`AnimationLoop::render`] once per frame. [`AnimationLoop::stop`] (or
/// dropping the loop) cancels the pending grace timer; every later tick
/// reports [`Tick::Stopped`].
pub struct AnimationLoop {
    config: LifeConfig,
    label: Label,
    shape: HeartShape,
    palette: Palette,

    grid: Grid,
    heart: CellMask,
    scheduler: Scheduler,
    grace: Option<GraceTimer>,
    rng: StdRng,

    runtime: Handle,
    repaint: RepaintFn,

    /// Last canvas size too small to hold a cell; not retried until it changes.
    unready: Option<(usize, usize)>,
    mounted: bool,
    stopped: bool,
}

impl AnimationLoop {
    pub fn new(config: LifeConfig, runtime: Handle) -> Self {
        let label = Label::parse_or_placeholder(&config.label);
        Self {
            scheduler: Scheduler::new(config.steps_every),
            config,
            label,
            shape: HeartShape::default(),
            palette: Palette::default(),
            grid: Grid::new(0, 0),
            heart: CellMask::empty(0, 0),
            grace: None,
            rng: StdRng::from_os_rng(),
            runtime,
            repaint: Arc::new(|| {}),
            unready: None,
            mounted: false,
            stopped: false,
        }
    }

    /// Use a fixed rng seed so reseeding is reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Callback run from the timer task when the grace period ends.
    pub fn with_repaint(mut self, repaint: RepaintFn) -> Self {
        self.repaint = repaint;
        self
    }

    /// Grid dimensions a `width × height` canvas maps to.
    pub fn cells_for(&self, width: usize, height: usize) -> (usize, usize) {
        let cell = self.cell_size();
        (width / cell, height / cell)
    }

    /// Whether a canvas of this size would give a different grid than the
    /// mounted one. A size that already failed to mount is not asked for again.
    pub fn needs_mount(&self, width: usize, height: usize) -> bool {
        if self.unready == Some((width, height)) {
            return false;
        }
        !self.mounted || self.cells_for(width, height) != (self.grid.cols(), self.grid.rows())
    }

    /// Size the grid to the canvas, rasterize heart and label, and reseed.
    ///
    /// A canvas smaller than one cell isn't ready yet: nothing changes and
    /// `false` is returned so the caller can retry once the size changes.
    pub fn mount(&mut self, width: usize, height: usize, rasterizer: &dyn GlyphRasterizer) -> bool {
        if self.stopped {
            return false;
        }
        let (cols, rows) = self.cells_for(width, height);
        if cols == 0 || rows == 0 {
            if self.unready != Some((width, height)) {
                log::warn!("canvas {width}x{height} too small for {}px cells", self.cell_size());
                self.unready = Some((width, height));
            }
            return false;
        }

        self.unready = None;
        self.grid.resize(cols, rows);
        self.heart = shape::heart_mask(cols, rows, &self.shape);
        let overlay = shape::label_mask(rasterizer, self.label.as_str(), width, height, self.cell_size());
        self.grid.set_protected(&overlay);
        self.mounted = true;

        log::info!(
            "mounted {cols}x{rows} grid on {width}x{height} canvas: heart {} cells, label {:?} {} cells",
            self.heart.count(),
            self.label.as_str(),
            overlay.count()
        );
        self.reseed();
        true
    }

    /// Scatter fresh cells through the heart and restart the grace period.
    pub fn reseed(&mut self) {
        if !self.mounted || self.stopped {
            return;
        }
        self.grid.seed(&self.heart, self.config.seed_density, &mut self.rng);
        self.scheduler.on_reseed();
        log::info!("reseeded: {} live cells", self.grid.alive_count());

        self.cancel_grace();
        if self.config.grace_ms == 0 {
            self.scheduler.on_grace_elapsed();
        } else {
            self.grace = Some(GraceTimer::start(
                &self.runtime,
                self.config.grace_period(),
                self.repaint.clone(),
            ));
        }
    }

    /// Flip running/paused.
    pub fn toggle(&mut self) -> Phase {
        if self.stopped {
            return self.scheduler.phase();
        }
        let phase = self.scheduler.toggle();
        if phase != Phase::Seeding {
            self.cancel_grace();
        }
        log::debug!("toggled to {}", phase.label());
        phase
    }

    /// Drop a small heart of live cells under the pointer, in canvas pixels.
    /// Applies in any phase. Returns how many cells are alive in the stamp.
    pub fn click(&mut self, x: f32, y: f32) -> usize {
        if !self.mounted || self.stopped || !(x >= 0.0 && y >= 0.0) {
            return 0;
        }
        let cell = self.cell_size() as f32;
        let col = (x / cell).floor() as i64;
        let row = (y / cell).floor() as i64;
        if col >= self.grid.cols() as i64 || row >= self.grid.rows() as i64 {
            return 0;
        }

        shape::heart_stamp()
            .into_iter()
            .filter(|&(dc, dr)| self.grid.set_alive(col + dc, row + dr))
            .count()
    }

    /// Advance one frame: notice an expired grace period, then step if the
    /// throttle says so.
    pub fn tick(&mut self) -> Tick {
        if self.stopped {
            return Tick::Stopped;
        }

        if let Some(timer) = self.grace.as_mut() {
            if timer.poll() {
                self.grace = None;
                if self.scheduler.on_grace_elapsed() {
                    log::debug!("grace period over, running");
                }
            }
        }

        let stepped = self.mounted && self.scheduler.tick();
        if stepped {
            sim::step(&mut self.grid);
        }
        Tick::Continue { stepped }
    }

    /// Draw the current generation. `false` if nothing is mounted or the
    /// surface isn't ready.
    pub fn render(&self, surface: &mut PixelSurface) -> bool {
        self.mounted && render::render(&self.grid, &self.palette, self.cell_size(), surface)
    }

    /// Cancel the grace timer and refuse further work.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.cancel_grace();
        log::debug!("animation loop stopped at generation {}", self.grid.generation());
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn grace_pending(&self) -> bool {
        self.grace.as_ref().is_some_and(GraceTimer::is_pending)
    }

    pub fn generation(&self) -> u64 {
        self.grid.generation()
    }

    pub fn phase(&self) -> Phase {
        self.scheduler.phase()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn cell_size(&self) -> usize {
        self.config.cell_size.max(1) as usize
    }

    fn cancel_grace(&mut self) {
        if let Some(timer) = self.grace.take() {
            timer.cancel();
        }
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::BitmapFont;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn instant_config() -> LifeConfig {
        LifeConfig {
            cell_size: 10,
            seed_density: 1.0,
            steps_every: 2,
            grace_ms: 0,
            label: "b+s".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mount_requires_surface() {
        let mut life = AnimationLoop::new(instant_config(), Handle::current());
        assert!(!life.mount(5, 400, &BitmapFont::default()));
        assert!(!life.is_mounted());
        assert_eq!(life.tick(), Tick::Continue { stepped: false });
        assert!(!life.render(&mut PixelSurface::new(5, 400)));
    }

    #[tokio::test]
    async fn test_mount_seeds_heart_around_label() {
        let mut life = AnimationLoop::new(instant_config(), Handle::current()).with_seed(7);
        assert!(life.mount(400, 400, &BitmapFont::default()));
        assert_eq!(life.label().as_str(), "B + S");

        let grid = life.grid();
        assert_eq!((grid.cols(), grid.rows()), (40, 40));
        assert_eq!(grid.generation(), 0);
        assert!(grid.alive_count() > 0);
        // density 1.0: every heart cell not under the label is alive
        for r in 0..40 {
            for c in 0..40 {
                if grid.is_protected(c, r) {
                    assert!(!grid.is_alive(c, r));
                }
            }
        }
        assert!((0..40).any(|c| (0..40).any(|r| grid.is_protected(c, r))));
        assert_eq!(life.phase(), Phase::Running);
    }

    #[tokio::test]
    async fn test_steps_on_throttled_frames() {
        let mut life = AnimationLoop::new(instant_config(), Handle::current());
        life.mount(200, 200, &BitmapFont::default());
        assert_eq!(life.tick(), Tick::Continue { stepped: false });
        assert_eq!(life.tick(), Tick::Continue { stepped: true });
        assert_eq!(life.generation(), 1);
        life.tick();
        life.tick();
        assert_eq!(life.generation(), 2);
    }

    #[tokio::test]
    async fn test_paused_loop_does_not_step_but_accepts_clicks() {
        let mut life = AnimationLoop::new(
            LifeConfig {
                seed_density: 0.0,
                ..instant_config()
            },
            Handle::current(),
        );
        life.mount(300, 300, &BitmapFont::default());
        assert_eq!(life.toggle(), Phase::Paused);
        assert_eq!(life.grid().alive_count(), 0);

        // cell (3, 4), away from the centered label
        let placed = life.click(35.0, 49.9);
        assert_eq!(placed, 27);
        assert!(life.grid().is_alive(3, 4));
        for _ in 0..10 {
            assert_eq!(life.tick(), Tick::Continue { stepped: false });
        }
        assert_eq!(life.generation(), 0);
        assert_eq!(life.grid().alive_count(), 27);
    }

    #[tokio::test]
    async fn test_click_outside_grid_ignored() {
        let mut life = AnimationLoop::new(instant_config(), Handle::current());
        life.mount(105, 105, &BitmapFont::default());
        let before = life.grid().alive_count();
        assert_eq!(life.click(-1.0, 5.0), 0);
        assert_eq!(life.click(102.0, 5.0), 0);
        assert_eq!(life.click(f32::NAN, 5.0), 0);
        assert_eq!(life.grid().alive_count(), before);
    }

    #[tokio::test]
    async fn test_reseed_resets_generation() {
        let mut life = AnimationLoop::new(instant_config(), Handle::current());
        life.mount(200, 200, &BitmapFont::default());
        for _ in 0..6 {
            life.tick();
        }
        assert_eq!(life.generation(), 3);
        life.reseed();
        assert_eq!(life.generation(), 0);
    }

    #[tokio::test]
    async fn test_grace_period_then_running() {
        let wakes = Arc::new(AtomicUsize::new(0));
        let w = wakes.clone();
        let mut life = AnimationLoop::new(
            LifeConfig {
                grace_ms: 20,
                ..instant_config()
            },
            Handle::current(),
        )
        .with_repaint(Arc::new(move || {
            w.fetch_add(1, Ordering::SeqCst);
        }));
        life.mount(200, 200, &BitmapFont::default());
        assert_eq!(life.phase(), Phase::Seeding);
        assert!(life.grace_pending());
        for _ in 0..4 {
            assert_eq!(life.tick(), Tick::Continue { stepped: false });
        }

        tokio::time::sleep(Duration::from_millis(120)).await;
        life.tick();
        assert_eq!(life.phase(), Phase::Running);
        assert!(!life.grace_pending());
        assert_eq!(wakes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stop_cancels_grace_timer() {
        let wakes = Arc::new(AtomicUsize::new(0));
        let w = wakes.clone();
        let mut life = AnimationLoop::new(
            LifeConfig {
                grace_ms: 20,
                ..instant_config()
            },
            Handle::current(),
        )
        .with_repaint(Arc::new(move || {
            w.fetch_add(1, Ordering::SeqCst);
        }));
        life.mount(200, 200, &BitmapFont::default());
        life.stop();
        assert!(!life.grace_pending());
        assert_eq!(life.tick(), Tick::Stopped);

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(wakes.load(Ordering::SeqCst), 0);
        assert_eq!(life.tick(), Tick::Stopped);
        assert_eq!(life.click(50.0, 50.0), 0);
    }

    #[tokio::test]
    async fn test_drop_cancels_grace_timer() {
        let wakes = Arc::new(AtomicUsize::new(0));
        let w = wakes.clone();
        {
            let mut life = AnimationLoop::new(
                LifeConfig {
                    grace_ms: 20,
                    ..instant_config()
                },
                Handle::current(),
            )
            .with_repaint(Arc::new(move || {
                w.fetch_add(1, Ordering::SeqCst);
            }));
            life.mount(200, 200, &BitmapFont::default());
        }
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(wakes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_toggle_during_grace_cancels_timer() {
        let mut life = AnimationLoop::new(
            LifeConfig {
                grace_ms: 20,
                ..instant_config()
            },
            Handle::current(),
        );
        life.mount(200, 200, &BitmapFont::default());
        assert_eq!(life.toggle(), Phase::Paused);
        tokio::time::sleep(Duration::from_millis(120)).await;
        life.tick();
        assert_eq!(life.phase(), Phase::Paused);
    }

    #[tokio::test]
    async fn test_needs_mount_tracks_cell_dimensions() {
        let mut life = AnimationLoop::new(instant_config(), Handle::current());
        assert!(life.needs_mount(200, 200));
        life.mount(200, 200, &BitmapFont::default());
        assert!(!life.needs_mount(205, 209));
        assert!(life.needs_mount(210, 200));
    }

    #[tokio::test]
    async fn test_too_small_canvas_not_retried_until_resized() {
        let mut life = AnimationLoop::new(instant_config(), Handle::current());
        assert!(life.needs_mount(5, 400));
        assert!(!life.mount(5, 400, &BitmapFont::default()));
        assert!(!life.needs_mount(5, 400));

        assert!(life.needs_mount(6, 400));
        assert!(life.needs_mount(200, 200));
        assert!(life.mount(200, 200, &BitmapFont::default()));
        assert!(!life.needs_mount(200, 200));
    }
}
