pub mod constants;
pub mod error;
pub mod layout;
pub mod types;

pub use constants::*;
pub use error::{CoreError, CoreResult};
pub use layout::{Layout, SimConfig};
pub use types::*;
