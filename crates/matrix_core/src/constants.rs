// Simulation-scaled constants for the density-shaded particle cloud.
// Distances live in the cube [MIN_COORD, MAX_COORD]^3; everything else
// (lifetimes, batch sizes) is tuned for a 60 Hz interactive tick.

/// Lower bound of the cubic simulation region on every axis.
pub const MIN_COORD: f32 = -1.0;

/// Upper bound of the cubic simulation region on every axis.
pub const MAX_COORD: f32 = 1.0;

/// Full lifetime of a newborn particle, in milliseconds, before the
/// `time_to_death * U(0,1)` scaling is applied.
pub const TOTAL_LIFE_MS: f32 = 10_000.0;

/// Squared-distance neighbor threshold. Two live particles are
/// neighbors when their squared Euclidean distance is strictly below
/// this value.
pub const THRESHOLD_SQ: f32 = 0.004;

/// Number of buckets per axis of the grid index.
///
/// Chosen so a 3x3x3 neighborhood of bucket side `(MAX_COORD -
/// MIN_COORD) / INTERVALS_PER_AXIS` strictly contains every point
/// within `THRESHOLD_SQ.sqrt()` of a given point.
pub const INTERVALS_PER_AXIS: u32 = 31;

/// Number of particle slots advanced by the lifecycle stepper per
/// tick.
pub const BATCH_SIZE: usize = 1_000;

/// Probability that a dead slot visited in a batch step is reborn.
pub const SPAWN_PROB: f32 = 0.9;

/// Sentinel `bucket_id` meaning "not currently in the grid".
pub const NO_BUCKET: u32 = u32::MAX;

/// Number of persistent worker threads used by the density
/// aggregator's recount phase.
pub fn worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .saturating_sub(1)
        .max(1)
}
