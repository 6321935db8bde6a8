pub mod controller;
pub mod input;
pub mod snapshot;
pub mod state;

pub use controller::{Game, GameConfig, GameStatus, TickOutcome};
pub use input::InputHandle;
pub use snapshot::{Snapshot, TerminalBanner, GAME_OVER_SUBTITLE, GAME_OVER_TEXT};
