use crate::grid::position::Position;

pub const GAME_OVER_TEXT: &str = "GAME OVER";
pub const GAME_OVER_SUBTITLE: &str = "Back to Work now!!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalBanner {
    pub title: &'static str,
    pub subtitle: &'static str,
}

impl Default for TerminalBanner {
    fn default() -> Self {
        Self {
            title: GAME_OVER_TEXT,
            subtitle: GAME_OVER_SUBTITLE,
        }
    }
}

/// Read-only view of a game handed to renderers, audio and scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Polylines of the body, for tube rendering.
    pub paths: Vec<Vec<Position>>,
    /// Every segment, oldest first.
    pub body: Vec<Position>,
    pub food: Position,
    /// Closed outline of the boundary.
    pub boundary: [Position; 5],
    /// Closed outline of the wall drawn one cell inside the boundary.
    pub wall: [Position; 5],
    pub cell_size: isize,
    pub interval_millis: u64,
    /// Set once the game is over.
    pub terminal: Option<TerminalBanner>,
}

impl Snapshot {
    pub fn head(&self) -> Option<Position> {
        self.body.last().copied()
    }

    pub fn length(&self) -> usize {
        self.body.len()
    }

    pub fn min(&self) -> Position {
        self.boundary[2]
    }

    pub fn max(&self) -> Position {
        self.boundary[0]
    }
}
