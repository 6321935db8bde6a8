use crate::game::controller::GameStatus;
use thiserror::Error;

/// Rejected game construction. The game never starts when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("boundary [{min_x}, {max_x}] x [{min_y}, {max_y}] is not aligned to cell size {cell_size}")]
    MisalignedBoundary {
        min_x: isize,
        max_x: isize,
        min_y: isize,
        max_y: isize,
        cell_size: isize,
    },
    #[error("boundary has no cell left for food placement")]
    NoFoodCells,
    #[error("initial snake segment {x}, {y} does not fit strictly inside the boundary")]
    SnakeDoesNotFit { x: isize, y: isize },
}

/// Failure raised while advancing one tick. The controller never lets these escape: they are
/// downgraded into a transition to the stopped state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TickError {
    #[error("tick requested while the game is {0}")]
    NotRunning(GameStatus),
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),
}
