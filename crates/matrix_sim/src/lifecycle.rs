use rand::Rng;

use matrix_core::constants::{BATCH_SIZE, NO_BUCKET, SPAWN_PROB, TOTAL_LIFE_MS};
use matrix_core::error::CoreResult;
use matrix_core::layout::Layout;
use matrix_physics::grid::Grid;
use matrix_physics::layout as sampler;

use crate::store::ParticleStore;

/// Per-tick batch advance over a cyclic slice of the particle store:
/// ages and kills a slice of live slots, rolls revival for a slice of
/// dead slots, and reports every slot whose liveness changed.
///
/// Stateful across ticks: a cyclic batch cursor so each call only
/// touches `O(N_max / num_batches)` slots, not the whole store —
/// the approximation that keeps a large population interactive.
pub struct LifecycleStepper {
    batch_cursor: usize,
    paused: bool,
}

impl LifecycleStepper {
    pub fn new() -> Self {
        Self { batch_cursor: 0, paused: false }
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_paused(&mut self) {
        self.paused = !self.paused;
    }

    pub fn reset(&mut self) {
        self.batch_cursor = 0;
    }

    fn num_batches(capacity: usize) -> usize {
        capacity.div_ceil(BATCH_SIZE).max(1)
    }

    /// Whether the cursor is about to wrap to 0 on the next call —
    /// i.e. every slot has now been visited at least once since the
    /// last `reset`.
    pub fn cycle_completed(&self, capacity: usize) -> bool {
        self.batch_cursor == 0 && capacity > 0
    }

    /// Advance one batch. Returns the slots whose liveness changed
    /// this tick (born or died) — the `touched` set consumed by the
    /// density aggregator.
    pub fn tick(
        &mut self,
        store: &mut ParticleStore,
        grid: &mut Grid,
        layout: Layout,
        dt_ms: f32,
        rng: &mut impl Rng,
    ) -> CoreResult<Vec<usize>> {
        let capacity = store.capacity();
        if self.paused || capacity == 0 {
            return Ok(Vec::new());
        }

        let num_batches = Self::num_batches(capacity);
        let begin = self.batch_cursor * BATCH_SIZE;
        let end = ((self.batch_cursor + 1) * BATCH_SIZE).min(capacity);
        // Amplify dt by how long it's been since this batch was last
        // visited (once per full cycle), compensating for the stride.
        let amplified_dt = dt_ms * (self.batch_cursor + 1) as f32;
        self.batch_cursor = (self.batch_cursor + 1) % num_batches;

        let mut touched = Vec::new();

        for i in begin..end {
            if store.is_alive(i) {
                let ttd = store.record(i).time_to_death - amplified_dt;
                if ttd <= 0.0 {
                    let bucket_id = store.private(i).bucket_id;
                    if bucket_id != NO_BUCKET {
                        grid.remove(bucket_id, i)?;
                    }
                    let r = store.record_mut(i);
                    r.density = 0;
                    r.time_to_death = 0.0;
                    // `affected_area` is left untouched here: the
                    // aggregator's expansion phase still needs it to
                    // find this particle's former neighbors, and is
                    // responsible for clearing it once it has.
                    store.private_mut(i).bucket_id = NO_BUCKET;
                    touched.push(i);
                } else {
                    store.record_mut(i).time_to_death = ttd;
                }
            } else {
                let u: f32 = rng.gen_range(0.0..1.0);
                if u < SPAWN_PROB {
                    let pos = sampler::sample(layout, rng);
                    let lifetime: f32 = rng.gen_range(0.0..1.0);
                    let r = store.record_mut(i);
                    r.pos = pos;
                    r.density = 0;
                    r.time_to_death = TOTAL_LIFE_MS * lifetime;
                    let bucket_id = grid.add(pos, i)?;
                    store.private_mut(i).bucket_id = bucket_id;
                    touched.push(i);
                }
            }
        }

        Ok(touched)
    }
}

impl Default for LifecycleStepper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn paused_tick_returns_empty_touched_set() {
        let mut store = ParticleStore::new(10);
        let mut grid = Grid::new();
        let mut stepper = LifecycleStepper::new();
        stepper.set_paused(true);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let touched = stepper
            .tick(&mut store, &mut grid, Layout::RandomCartesianCube, 16.0, &mut rng)
            .unwrap();
        assert!(touched.is_empty());
    }

    #[test]
    fn zero_capacity_tick_is_a_noop() {
        let mut store = ParticleStore::new(0);
        let mut grid = Grid::new();
        let mut stepper = LifecycleStepper::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let touched = stepper
            .tick(&mut store, &mut grid, Layout::RandomCartesianCube, 16.0, &mut rng)
            .unwrap();
        assert!(touched.is_empty());
        assert_eq!(store.max_density(), 1);
    }

    #[test]
    fn revived_slot_is_registered_in_the_grid() {
        let mut store = ParticleStore::new(4);
        let mut grid = Grid::new();
        let mut stepper = LifecycleStepper::new();
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let touched = stepper
            .tick(&mut store, &mut grid, Layout::RandomCartesianCube, 16.0, &mut rng)
            .unwrap();

        for &i in &touched {
            assert!(store.is_alive(i));
            let bucket_id = store.private(i).bucket_id;
            assert!(grid.bucket(bucket_id).unwrap().contains(&i));
        }
    }

    #[test]
    fn death_removes_from_grid_and_clears_private_state() {
        let mut store = ParticleStore::new(1);
        let mut grid = Grid::new();
        let bucket_id = grid.add([0.0, 0.0, 0.0], 0).unwrap();
        store.record_mut(0).pos = [0.0, 0.0, 0.0];
        store.record_mut(0).time_to_death = 1.0;
        store.private_mut(0).bucket_id = bucket_id;

        let mut stepper = LifecycleStepper::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let touched = stepper
            .tick(&mut store, &mut grid, Layout::RandomCartesianCube, 16.0, &mut rng)
            .unwrap();

        assert_eq!(touched, vec![0]);
        assert!(!store.is_alive(0));
        assert!(!store.private(0).has_bucket());
        assert!(grid.bucket(bucket_id).is_err());
    }
}
