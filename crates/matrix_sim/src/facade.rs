use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use matrix_core::constants::worker_count;
use matrix_core::error::{CoreError, CoreResult};
use matrix_core::layout::{Layout, SimConfig};
use matrix_core::types::ParticleRenderRecord;
use matrix_physics::grid::Grid;

use crate::aggregator::DensityAggregator;
use crate::lifecycle::LifecycleStepper;
use crate::store::ParticleStore;

/// Top-level handle a host application drives: one `tick` per frame,
/// a `snapshot` to read back for rendering, and the handful of
/// controls a user-facing demo needs (layout switch, pause).
pub struct MatrixCore {
    store: ParticleStore,
    grid: Grid,
    stepper: LifecycleStepper,
    aggregator: DensityAggregator,
    rng: ChaCha8Rng,
    layout: Layout,
    stop_after_initial_load: bool,
}

impl MatrixCore {
    pub fn new(config: SimConfig) -> CoreResult<Self> {
        if config.capacity == 0 {
            return Err(CoreError::CapacityExhausted);
        }
        log::info!(
            "matrix core: capacity={} layout={:?} workers={}",
            config.capacity,
            config.layout,
            worker_count()
        );
        Ok(Self {
            store: ParticleStore::new(config.capacity as usize),
            grid: Grid::new(),
            stepper: LifecycleStepper::new(),
            aggregator: DensityAggregator::new(worker_count()),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            layout: config.layout,
            stop_after_initial_load: config.stop_after_initial_load,
        })
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn paused(&self) -> bool {
        self.stepper.paused()
    }

    pub fn toggle_paused(&mut self) {
        self.stepper.toggle_paused();
    }

    /// Advance one batch of lifecycle and, unless the active layout is
    /// the no-aggregation demo slice, recompute density for everyone
    /// that batch touched.
    pub fn tick(&mut self, dt_ms: f32) -> CoreResult<()> {
        let touched = self.stepper.tick(&mut self.store, &mut self.grid, self.layout, dt_ms, &mut self.rng)?;

        if !self.layout.is_dual_color_demo() && !touched.is_empty() {
            self.aggregator.run(&mut self.store, &self.grid, &touched);
        }

        if self.stop_after_initial_load && self.stepper.cycle_completed(self.store.capacity()) {
            self.stepper.set_paused(true);
        }

        Ok(())
    }

    /// Switch the active layout. A no-op if it's already active;
    /// otherwise clears every particle and the grid and restarts the
    /// batch cursor so the new layout starts from an empty field.
    pub fn set_layout(&mut self, layout: Layout) {
        if layout == self.layout {
            return;
        }
        log::info!("matrix core: switching layout {:?} -> {:?}", self.layout, layout);
        self.layout = layout;
        self.store.kill_all();
        self.grid = Grid::new();
        self.stepper.reset();
        self.stepper.set_paused(false);
    }

    /// Render-visible particle records plus the current normalization
    /// maximum — everything a shader needs for this frame.
    pub fn snapshot(&self) -> (&[ParticleRenderRecord], u32) {
        (self.store.render(), self.store.max_density())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(capacity: u32, layout: Layout) -> SimConfig {
        SimConfig { capacity, seed: 7, layout, stop_after_initial_load: false }
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = MatrixCore::new(config(0, Layout::default())).unwrap_err();
        assert_eq!(err, CoreError::CapacityExhausted);
    }

    #[test]
    fn ticking_populates_the_snapshot() {
        let mut core = MatrixCore::new(config(64, Layout::RandomCartesianCube)).unwrap();
        for _ in 0..5 {
            core.tick(16.0).unwrap();
        }
        let (records, max_density) = core.snapshot();
        assert!(records.iter().any(|r| r.is_alive()));
        assert!(max_density >= 1);
    }

    #[test]
    fn paused_core_never_spawns() {
        let mut core = MatrixCore::new(config(64, Layout::RandomCartesianCube)).unwrap();
        core.toggle_paused();
        for _ in 0..5 {
            core.tick(16.0).unwrap();
        }
        let (records, _) = core.snapshot();
        assert!(records.iter().all(|r| !r.is_alive()));
    }

    #[test]
    fn switching_layout_clears_existing_particles() {
        let mut core = MatrixCore::new(config(64, Layout::RandomCartesianCube)).unwrap();
        for _ in 0..10 {
            core.tick(16.0).unwrap();
        }
        assert!(core.snapshot().0.iter().any(|r| r.is_alive()));

        core.set_layout(Layout::RandomSphericalLatitude);
        assert!(core.snapshot().0.iter().all(|r| !r.is_alive()));
        assert!(!core.paused());
    }

    #[test]
    fn dual_color_demo_layout_never_raises_max_density_above_one() {
        let mut core = MatrixCore::new(config(64, Layout::DemoDualColorSlice)).unwrap();
        for _ in 0..20 {
            core.tick(16.0).unwrap();
        }
        assert_eq!(core.snapshot().1, 1);
    }

    #[test]
    fn stop_after_initial_load_pauses_once_every_slot_is_visited() {
        let mut config = config(10, Layout::RandomCartesianCube);
        config.stop_after_initial_load = true;
        let mut core = MatrixCore::new(config).unwrap();
        // Capacity 10 is one batch; the very first tick completes a cycle.
        core.tick(16.0).unwrap();
        assert!(core.paused());
    }

    #[test]
    fn toggling_paused_twice_restores_the_previous_state() {
        let mut core = MatrixCore::new(config(64, Layout::RandomCartesianCube)).unwrap();
        let initial = core.paused();
        core.toggle_paused();
        core.toggle_paused();
        assert_eq!(core.paused(), initial);
    }

    #[test]
    fn setting_the_same_layout_twice_is_a_noop_after_the_first() {
        let mut core = MatrixCore::new(config(64, Layout::RandomCartesianCube)).unwrap();
        for _ in 0..10 {
            core.tick(16.0).unwrap();
        }
        assert!(core.snapshot().0.iter().any(|r| r.is_alive()));

        // Same layout: must not clear the population that's already there.
        core.set_layout(Layout::RandomCartesianCube);
        assert!(core.snapshot().0.iter().any(|r| r.is_alive()));
    }

    #[test]
    fn a_never_ticked_core_has_an_all_zero_snapshot() {
        let core = MatrixCore::new(config(32, Layout::RandomCartesianCube)).unwrap();
        let (records, max_density) = core.snapshot();
        assert_eq!(max_density, 1);
        for r in records {
            assert!(!r.is_alive());
            assert_eq!(r.density, 0);
            assert_eq!(r.time_to_death, 0.0);
        }
    }
}
