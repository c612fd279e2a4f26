pub mod contract;

pub use contract::{inv_max_density, shade_dual_color, shade_standard};
