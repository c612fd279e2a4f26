use matrix_core::types::{ParticlePrivate, ParticleRenderRecord};

/// Structure-of-arrays storage for `N_max` particle slots: one
/// render-visible record and one private record per slot, plus the
/// scalar normalization maximum.
///
/// Direct mutation is confined to the lifecycle stepper and the
/// density aggregator; every other caller only reads.
pub struct ParticleStore {
    render: Vec<ParticleRenderRecord>,
    private: Vec<ParticlePrivate>,
    max_density: u32,
}

impl ParticleStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            render: vec![ParticleRenderRecord::DEAD; capacity],
            private: vec![ParticlePrivate::DEAD; capacity],
            max_density: 1,
        }
    }

    pub fn capacity(&self) -> usize {
        self.render.len()
    }

    pub fn max_density(&self) -> u32 {
        self.max_density
    }

    pub fn set_max_density(&mut self, value: u32) {
        self.max_density = value.max(1);
    }

    pub fn render(&self) -> &[ParticleRenderRecord] {
        &self.render
    }

    pub fn record(&self, idx: usize) -> &ParticleRenderRecord {
        &self.render[idx]
    }

    pub fn record_mut(&mut self, idx: usize) -> &mut ParticleRenderRecord {
        &mut self.render[idx]
    }

    pub fn private(&self, idx: usize) -> &ParticlePrivate {
        &self.private[idx]
    }

    pub fn private_mut(&mut self, idx: usize) -> &mut ParticlePrivate {
        &mut self.private[idx]
    }

    pub fn is_alive(&self, idx: usize) -> bool {
        self.render[idx].is_alive()
    }

    pub fn set_density(&mut self, idx: usize, density: u32) {
        self.render[idx].density = density;
    }

    /// Kill every particle: clears times, densities, bucket ids, and
    /// affected areas. Does not touch the grid — callers empty it
    /// separately.
    pub fn kill_all(&mut self) {
        for r in self.render.iter_mut() {
            *r = ParticleRenderRecord::DEAD;
        }
        for p in self.private.iter_mut() {
            *p = ParticlePrivate::DEAD;
        }
        self.max_density = 1;
    }
}
