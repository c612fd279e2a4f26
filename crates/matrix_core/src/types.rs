use bytemuck::{Pod, Zeroable};

use crate::constants::NO_BUCKET;

/// Render-visible particle state: fixed size, contiguous, GPU-facing.
///
/// Must stay `repr(C)` and `Pod` so a slice of these can be uploaded
/// to a GPU buffer without per-element conversion.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ParticleRenderRecord {
    /// World-space position.
    pub pos: [f32; 3],
    /// Count of live neighbors within `THRESHOLD_SQ`.
    pub density: u32,
    /// Milliseconds remaining before death; `<= 0` means dead.
    pub time_to_death: f32,
    /// Padding for 16-byte alignment of `[pos(12), density(4), ttd(4), _pad(4)]`.
    pub _pad: f32,
}

impl ParticleRenderRecord {
    pub const DEAD: Self = Self {
        pos: [0.0, 0.0, 0.0],
        density: 0,
        time_to_death: 0.0,
        _pad: 0.0,
    };

    pub fn is_alive(&self) -> bool {
        self.time_to_death > 0.0
    }
}

impl Default for ParticleRenderRecord {
    fn default() -> Self {
        Self::DEAD
    }
}

/// Maximum number of buckets in a 3x3x3 neighborhood.
pub const MAX_AFFECTED_AREA: usize = 27;

/// Per-particle state the renderer never sees: which grid bucket the
/// particle currently occupies, and the neighborhood cached at the
/// last lifecycle event.
#[derive(Debug, Clone, Copy)]
pub struct ParticlePrivate {
    /// Current bucket id, or `NO_BUCKET` when dead.
    pub bucket_id: u32,
    affected_area: [u32; MAX_AFFECTED_AREA],
    affected_area_len: u8,
}

impl ParticlePrivate {
    pub const DEAD: Self = Self {
        bucket_id: NO_BUCKET,
        affected_area: [0; MAX_AFFECTED_AREA],
        affected_area_len: 0,
    };

    pub fn has_bucket(&self) -> bool {
        self.bucket_id != NO_BUCKET
    }

    pub fn affected_area(&self) -> &[u32] {
        &self.affected_area[..self.affected_area_len as usize]
    }

    pub fn set_affected_area(&mut self, buckets: &[u32]) {
        debug_assert!(buckets.len() <= MAX_AFFECTED_AREA);
        let n = buckets.len().min(MAX_AFFECTED_AREA);
        self.affected_area[..n].copy_from_slice(&buckets[..n]);
        self.affected_area_len = n as u8;
    }

    pub fn clear_affected_area(&mut self) {
        self.affected_area_len = 0;
    }
}

impl Default for ParticlePrivate {
    fn default() -> Self {
        Self::DEAD
    }
}
