//! Headless driver: ticks the core for a fixed number of frames and
//! prints a density census, no window or GPU required.

use matrix_core::{Layout, SimConfig};
use matrix_sim::MatrixCore;

const FRAMES: u32 = 600;
const DT_MS: f32 = 16.0;
const REPORT_EVERY: u32 = 60;

fn main() {
    let config = SimConfig { capacity: 20_000, seed: 42, layout: Layout::default(), stop_after_initial_load: false };

    eprintln!(
        "headless: capacity={} seed={} layout={:?}",
        config.capacity, config.seed, config.layout
    );

    let mut core = MatrixCore::new(config).expect("capacity must be nonzero");

    for frame in 0..FRAMES {
        core.tick(DT_MS).expect("tick failed");

        if (frame + 1) % REPORT_EVERY == 0 {
            let (records, max_density) = core.snapshot();
            let mut live = 0u64;
            let mut density_sum = 0u64;
            for r in records {
                if r.is_alive() {
                    live += 1;
                    density_sum += r.density as u64;
                }
            }
            let avg_density = if live > 0 { density_sum as f64 / live as f64 } else { 0.0 };
            println!(
                "frame {:4}  live {:6}  max_density {:4}  avg_density {:6.2}",
                frame + 1,
                live,
                max_density,
                avg_density
            );
        }
    }
}
