use std::collections::HashMap;

use matrix_core::constants::{INTERVALS_PER_AXIS, MAX_COORD, MIN_COORD};
use matrix_core::error::{CoreError, CoreResult};

/// Sparse uniform grid over `[MIN_COORD, MAX_COORD]^3`.
///
/// Buckets are addressed by a packed 24-bit id `(x << 16) | (y << 8) |
/// z` with `x, y, z` in `[0, N)`, `N = INTERVALS_PER_AXIS`. Only
/// populated buckets exist in the map — with `N = 31` a dense `N^3`
/// array would hold ~30K mostly-empty cells.
#[derive(Debug, Default)]
pub struct Grid {
    buckets: HashMap<u32, Vec<usize>>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Insert `idx` at the bucket containing `pos`, returning that
    /// bucket's id.
    pub fn add(&mut self, pos: [f32; 3], idx: usize) -> CoreResult<u32> {
        let bucket_id = bucket_of(pos)?;
        self.buckets.entry(bucket_id).or_default().push(idx);
        Ok(bucket_id)
    }

    /// Remove `idx` from the given bucket.
    ///
    /// Takes the bucket id the caller recorded at insertion time, not
    /// the particle's current position — using a possibly-stale
    /// position to relocate the bucket would be wrong if the particle
    /// moved (or was reborn elsewhere) since it was added.
    pub fn remove(&mut self, bucket_id: u32, idx: usize) -> CoreResult<()> {
        let bucket = self.buckets.get_mut(&bucket_id).ok_or(CoreError::GridNotFound)?;
        let pos = bucket.iter().position(|&i| i == idx).ok_or(CoreError::GridNotFound)?;
        bucket.swap_remove(pos);
        if bucket.is_empty() {
            self.buckets.remove(&bucket_id);
        }
        Ok(())
    }

    /// Read-only view of a bucket's external indices.
    pub fn bucket(&self, bucket_id: u32) -> CoreResult<&[usize]> {
        self.buckets
            .get(&bucket_id)
            .map(Vec::as_slice)
            .ok_or(CoreError::GridNotFound)
    }

    /// The up-to-27 existing bucket ids in the 3x3x3 neighborhood of
    /// `bucket_id`, in deterministic (lexicographic-by-offset) order.
    pub fn neighborhood(&self, bucket_id: u32) -> Vec<u32> {
        let (x, y, z) = unpack(bucket_id);
        let n = INTERVALS_PER_AXIS as i64;
        let mut out = Vec::with_capacity(27);
        for dx in -1..=1i64 {
            let nx = x as i64 + dx;
            if nx < 0 || nx >= n {
                continue;
            }
            for dy in -1..=1i64 {
                let ny = y as i64 + dy;
                if ny < 0 || ny >= n {
                    continue;
                }
                for dz in -1..=1i64 {
                    let nz = z as i64 + dz;
                    if nz < 0 || nz >= n {
                        continue;
                    }
                    let candidate = pack(nx as u32, ny as u32, nz as u32);
                    if self.buckets.contains_key(&candidate) {
                        out.push(candidate);
                    }
                }
            }
        }
        out
    }
}

fn pack(x: u32, y: u32, z: u32) -> u32 {
    (x << 16) | (y << 8) | z
}

fn unpack(bucket_id: u32) -> (u32, u32, u32) {
    ((bucket_id >> 16) & 0xFF, (bucket_id >> 8) & 0xFF, bucket_id & 0xFF)
}

/// Map a position in `[MIN_COORD, MAX_COORD]^3` to its bucket id.
///
/// `norm = (pos - MIN_COORD) / (MAX_COORD - MIN_COORD)`, `k = floor(N
/// * norm)`, clamped to `N - 1` when `norm == 1` exactly — truncation
/// alone would produce the out-of-range index `N` for a point exactly
/// at `MAX_COORD`.
pub fn bucket_of(pos: [f32; 3]) -> CoreResult<u32> {
    let range = MAX_COORD - MIN_COORD;
    let n = INTERVALS_PER_AXIS;
    let mut coords = [0u32; 3];
    for (axis, &p) in pos.iter().enumerate() {
        if !(MIN_COORD..=MAX_COORD).contains(&p) {
            return Err(CoreError::GridOutOfBounds);
        }
        let norm = (p - MIN_COORD) / range;
        let k = ((n as f32) * norm).floor() as u32;
        coords[axis] = k.min(n - 1);
    }
    Ok(pack(coords[0], coords[1], coords[2]))
}
