use serde::{Deserialize, Serialize};

/// A named sampling scheme used to generate a candidate spawn position.
///
/// The four `RANDOM_SPHERICAL*`/`RANDOM_CARTESIAN*` variants that
/// normalize to the unit sphere illustrate uniform-on-sphere sampling
/// versus naive-angle bias; `RandomCartesianCube` and
/// `DemoDualColorSlice` drive the two-color demo shader instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    /// Uniform cube sample, normalized to the unit sphere.
    RandomCartesianNaive,
    /// Rejection-sampled unit ball, normalized to the unit sphere.
    RandomCartesianDiscard,
    /// Naive spherical angles — visibly clusters at the poles.
    RandomSphericalNaive,
    /// Latitude-correct uniform sampling on the unit sphere.
    RandomSphericalLatitude,
    /// Uniform cube sample, left unnormalized.
    RandomCartesianCube,
    /// Flat 2D slice through the cube, left unnormalized. Bypasses the
    /// density aggregator; shaded by an inside/outside-unit-circle test.
    DemoDualColorSlice,
}

impl Layout {
    /// Whether this layout short-circuits the density aggregator.
    pub fn is_dual_color_demo(self) -> bool {
        matches!(self, Layout::DemoDualColorSlice)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::RandomSphericalLatitude
    }
}

/// Simulation configuration for the core façade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Fixed number of particle slots (`N_max`).
    pub capacity: u32,
    /// Random seed for deterministic simulation.
    pub seed: u64,
    /// Layout active at construction.
    pub layout: Layout,
    /// If set, the facade freezes automatically once the batch cursor
    /// completes its first full cycle over every slot.
    pub stop_after_initial_load: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            capacity: 50_000,
            seed: 42,
            layout: Layout::default(),
            stop_after_initial_load: false,
        }
    }
}
