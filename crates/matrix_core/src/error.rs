use std::fmt;

/// Fatal, programmer-error conditions the core can produce.
///
/// All three are treated as bugs upstream: the core never retries and
/// never swallows one. `MatrixCore::tick` propagates the first one it
/// hits instead of panicking, so a host can log it and decide what
/// "fatal" means for its process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// A position handed to the grid falls outside `[MIN_COORD,
    /// MAX_COORD]^3`.
    GridOutOfBounds,
    /// A `remove`/`bucket` call referenced a bucket or index not
    /// present in the grid.
    GridNotFound,
    /// `MatrixCore::new` was asked for zero capacity.
    CapacityExhausted,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::GridOutOfBounds => write!(f, "position outside grid bounds"),
            CoreError::GridNotFound => write!(f, "bucket or index not found in grid"),
            CoreError::CapacityExhausted => write!(f, "capacity must be greater than zero"),
        }
    }
}

impl std::error::Error for CoreError {}

pub type CoreResult<T> = Result<T, CoreError>;
