use std::collections::HashSet;

use matrix_core::constants::THRESHOLD_SQ;
use matrix_physics::grid::Grid;

use crate::pool::WorkPool;
use crate::store::ParticleStore;

/// Recomputes density for every particle whose state or neighborhood
/// could have changed this tick, then refreshes the global
/// normalization maximum.
///
/// The expansion phase is sequential (it mutates each particle's
/// cached `affected_area`, which the parallel phase only reads); the
/// recount phase fans the resulting set out across a reusable worker
/// pool.
pub struct DensityAggregator {
    pool: WorkPool,
}

impl DensityAggregator {
    pub fn new(workers: usize) -> Self {
        Self { pool: WorkPool::new(workers) }
    }

    /// Run the expansion -> recount -> reduction pipeline for this
    /// tick's `touched` set. No-op (besides the reduction scan) if
    /// `touched` is empty.
    pub fn run(&self, store: &mut ParticleStore, grid: &Grid, touched: &[usize]) {
        let all_touched = self.expand(store, grid, touched);
        self.recount(store, grid, &all_touched);
        self.reduce(store);
    }

    /// Add, for each `i` in `touched`, every live particle that shares
    /// a neighborhood with `i`. Single-hop only — a particle newly
    /// pulled in this way didn't itself change this tick, so its own
    /// neighborhood isn't walked in turn. That's what keeps this
    /// `O(touched)` instead of `O(N_max)` for one death or birth in a
    /// densely packed cloud.
    fn expand(&self, store: &mut ParticleStore, grid: &Grid, touched: &[usize]) -> Vec<usize> {
        let mut seen: HashSet<usize> = touched.iter().copied().collect();
        let mut all_touched: Vec<usize> = touched.to_vec();

        for &i in touched {
            if store.is_alive(i) {
                let bucket_id = store.private(i).bucket_id;
                let neighborhood = grid.neighborhood(bucket_id);
                store.private_mut(i).set_affected_area(&neighborhood);
            }

            // Walk `i`'s affected area whether `i` is alive or not —
            // a dead particle's *former* neighborhood (cached before
            // death) is exactly what its former neighbors need to
            // recount against.
            let affected_area = store.private(i).affected_area().to_vec();
            for bid in affected_area {
                let Ok(members) = grid.bucket(bid) else { continue };
                let members = members.to_vec();
                for n in members {
                    if seen.contains(&n) || !store.is_alive(n) {
                        continue;
                    }
                    let n_bucket = store.private(n).bucket_id;
                    let n_neighborhood = grid.neighborhood(n_bucket);
                    store.private_mut(n).set_affected_area(&n_neighborhood);
                    seen.insert(n);
                    all_touched.push(n);
                }
            }

            if !store.is_alive(i) {
                store.private_mut(i).clear_affected_area();
            }
        }

        all_touched
    }

    /// Recompute density for every particle in `all_touched`,
    /// partitioned across the worker pool. Workers only read
    /// position/liveness/affected-area and write into a private
    /// per-item output slot, so the write-back into the store happens
    /// after the join, sequentially and disjointly by slot index.
    fn recount(&self, store: &mut ParticleStore, grid: &Grid, all_touched: &[usize]) {
        // Reborrow as shared: every worker only reads positions,
        // liveness and affected-area, never mutates. The write-back
        // below happens after the pool joins.
        let store_ref: &ParticleStore = store;
        let render = store_ref.render();

        let results = self.pool.dispatch(all_touched.len(), |range| {
            range
                .map(|pos| {
                    let i = all_touched[pos];
                    let pos_i = render[i].pos;
                    let mut density = 0u32;
                    for &bid in store_ref.private(i).affected_area() {
                        let Ok(members) = grid.bucket(bid) else { continue };
                        for &n in members {
                            if n == i || !render[n].is_alive() {
                                continue;
                            }
                            let pos_n = render[n].pos;
                            let dx = pos_i[0] - pos_n[0];
                            let dy = pos_i[1] - pos_n[1];
                            let dz = pos_i[2] - pos_n[2];
                            if dx * dx + dy * dy + dz * dz < THRESHOLD_SQ {
                                density += 1;
                            }
                        }
                    }
                    (i, density)
                })
                .collect()
        });

        for (i, density) in results {
            store.set_density(i, density);
        }
    }

    /// Scan every live particle (not just touched) for the new
    /// maximum; cheap, and avoids a stale normalization when a
    /// previously-maximal particle wasn't touched this tick.
    fn reduce(&self, store: &mut ParticleStore) {
        let max = store
            .render()
            .iter()
            .filter(|r| r.is_alive())
            .map(|r| r.density)
            .max()
            .unwrap_or(0);
        store.set_max_density(max);
    }
}
