pub mod grid;
pub mod layout;

pub use grid::Grid;
