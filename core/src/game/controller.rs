use crate::{
    error::{ConfigurationError, TickError},
    food::DEFAULT_SEED,
    game::{
        input::{InputCell, InputHandle},
        snapshot::Snapshot,
        state::{Advance, GameState},
    },
    grid::boundary::Boundary,
    snake::Snake,
};
use log::{error, info, warn};
use std::{sync::Arc, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Seed of the food allocator, fixed for the whole game.
    pub seed: u64,
    pub boundary: Boundary,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            boundary: Boundary::reference(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum GameStatus {
    #[display(fmt = "not started")]
    NotStarted,
    #[display(fmt = "running")]
    Running,
    #[display(fmt = "over")]
    GameOver,
    #[display(fmt = "stopped")]
    Stopped,
}

/// Result of one tick, as seen by the collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Plain step.
    Continued(Snapshot),
    FoodEaten(Snapshot),
    /// The head ran into the body. Ticking again reports the same final snapshot.
    GameOver(Snapshot),
    /// The game was torn down, either by `stop`, a cancellation or a failed tick.
    Stopped,
}

impl TickOutcome {
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            TickOutcome::Continued(snapshot)
            | TickOutcome::FoodEaten(snapshot)
            | TickOutcome::GameOver(snapshot) => Some(snapshot),
            TickOutcome::Stopped => None,
        }
    }
}

/// Game controller. Owns the state from `start` until `stop`.
pub struct Game {
    config: GameConfig,
    status: GameStatus,
    input: Arc<InputCell>,
    state: Option<GameState>,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, ConfigurationError> {
        let boundary = config.boundary;
        if let Some(outside) = Snake::initial(boundary.cell_size())
            .iter()
            .find(|position| !boundary.contains(**position))
        {
            return Err(ConfigurationError::SnakeDoesNotFit {
                x: outside.x(),
                y: outside.y(),
            });
        }
        Ok(Self {
            config,
            status: GameStatus::NotStarted,
            input: Arc::new(InputCell::new()),
            state: None,
        })
    }

    /// Builds and starts a game.
    pub fn new_game(config: GameConfig) -> Result<Self, ConfigurationError> {
        let mut game = Self::new(config)?;
        game.start();
        Ok(game)
    }

    /// Returns false when the game was already started once.
    pub fn start(&mut self) -> bool {
        if self.status != GameStatus::NotStarted {
            warn!("cannot start a game that is {}", self.status);
            return false;
        }
        self.state = Some(GameState::new(self.config.boundary, self.config.seed));
        self.status = GameStatus::Running;
        info!("game started with seed {}", self.config.seed);
        true
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn input(&self) -> InputHandle {
        InputHandle::new(self.input.clone())
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        self.state.as_ref().map(GameState::snapshot)
    }

    /// Current tick interval, `None` once the state is released.
    pub fn interval(&self) -> Option<Duration> {
        self.state.as_ref().map(|state| state.speed().interval())
    }

    /// Advances the game by one step.
    ///
    /// A pending cancellation is honored before anything moves. Failures never escape: they are
    /// logged and the game is stopped. A game that was not started yet is left untouched.
    pub fn tick(&mut self) -> TickOutcome {
        match self.status {
            GameStatus::NotStarted => {
                warn!("tick ignored, the game is not started");
                return TickOutcome::Stopped;
            }
            GameStatus::Stopped => return TickOutcome::Stopped,
            GameStatus::GameOver => {
                return self
                    .snapshot()
                    .map_or(TickOutcome::Stopped, TickOutcome::GameOver)
            }
            GameStatus::Running => {}
        }
        if self.input.is_cancelled() {
            self.cancel();
            return TickOutcome::Stopped;
        }
        match self.advance() {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("tick failed, stopping the game: {}", e);
                self.stop();
                TickOutcome::Stopped
            }
        }
    }

    fn advance(&mut self) -> Result<TickOutcome, TickError> {
        if self.status != GameStatus::Running {
            return Err(TickError::NotRunning(self.status));
        }
        let requested = self.input.take_direction();
        let state = self
            .state
            .as_mut()
            .ok_or(TickError::InvariantViolation("running game without state"))?;
        let advance = state.advance(requested)?;
        let snapshot = state.snapshot();
        Ok(match advance {
            Advance::Moved => TickOutcome::Continued(snapshot),
            Advance::Ate => TickOutcome::FoodEaten(snapshot),
            Advance::Collided => {
                self.status = GameStatus::GameOver;
                info!("game over with length {}", snapshot.length());
                TickOutcome::GameOver(snapshot)
            }
        })
    }

    fn cancel(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.terminate();
        }
        self.status = GameStatus::GameOver;
        info!("game cancelled");
        self.stop();
    }

    /// Releases the state. Calling it again does nothing.
    pub fn stop(&mut self) {
        match self.status {
            GameStatus::Stopped => return,
            GameStatus::Running => {
                self.status = GameStatus::GameOver;
                info!("game interrupted while running");
            }
            GameStatus::NotStarted | GameStatus::GameOver => {}
        }
        self.state = None;
        self.status = GameStatus::Stopped;
        info!("game stopped");
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        self.state.as_mut().expect("game state")
    }
}

#[cfg(test)]
use crate::{
    food::FoodAllocator,
    game::snapshot::TerminalBanner,
    grid::{direction::Direction, position::Position, CELL_SIZE},
};

#[cfg(test)]
const FAR_AWAY: Position = Position::new(80, 80);

#[cfg(test)]
fn started_game() -> Game {
    let mut game = Game::new_game(GameConfig::default()).expect("valid configuration");
    game.state_mut().set_food(FAR_AWAY);
    game
}

#[cfg(test)]
fn feed_next_step(game: &mut Game) {
    let state = game.state_mut();
    let next = state.boundary().clamp_wrap(
        state
            .snake()
            .head()
            .expect("snake head")
            .neighbor(state.direction(), state.boundary().cell_size()),
    );
    state.set_food(next);
}

#[cfg(test)]
fn head(game: &Game) -> Position {
    game.state()
        .and_then(|state| state.snake().head())
        .expect("snake head")
}

#[test]
fn test_new_game_initial_state() {
    let game = Game::new_game(GameConfig::default()).expect("valid configuration");
    assert_eq!(game.status(), GameStatus::Running);
    let state = game.state().expect("game state");
    assert_eq!(state.snake(), &Snake::initial(10));
    assert_eq!(state.direction(), Direction::Right);
    assert_eq!(state.speed().interval_millis(), 300);
    assert_eq!(state.food_placements(), 1);
    assert_eq!(state.snapshot().terminal, None);
    assert_eq!(game.interval(), Some(Duration::from_millis(300)));
    let snapshot = game.snapshot().expect("snapshot");
    assert_eq!(snapshot.paths, vec![state.snake().positions()]);
    assert_eq!(snapshot.boundary, Boundary::reference().polygon());
    assert_eq!(snapshot.wall, Boundary::reference().inner_polygon());
    assert_eq!(snapshot.terminal, None);
}

#[test]
fn test_two_phase_start() {
    let mut game = Game::new(GameConfig::default()).expect("valid configuration");
    assert_eq!(game.status(), GameStatus::NotStarted);
    assert_eq!(game.snapshot(), None);
    assert!(game.start());
    assert_eq!(game.status(), GameStatus::Running);
    assert!(!game.start());
}

#[test]
fn test_configuration_error() {
    let boundary = Boundary::new(Position::new(-30, -100), Position::new(100, 100))
        .expect("valid boundary");
    assert_eq!(
        Game::new(GameConfig { seed: 1, boundary }).err(),
        Some(ConfigurationError::SnakeDoesNotFit { x: -30, y: 0 })
    );
}

#[test]
fn test_custom_boundary_stays_on_lattice() {
    let boundary = Boundary::new(Position::new(-200, -200), Position::new(200, 200))
        .expect("valid boundary");
    let mut game = Game::new_game(GameConfig { seed: 7, boundary }).expect("valid configuration");
    for _ in 0..50 {
        let snapshot = match game.tick() {
            TickOutcome::Continued(snapshot) | TickOutcome::FoodEaten(snapshot) => snapshot,
            outcome => panic!("unexpected outcome {:?}", outcome),
        };
        for position in snapshot.body.iter().chain(std::iter::once(&snapshot.food)) {
            assert_eq!(position.x() % CELL_SIZE, 0);
            assert_eq!(position.y() % CELL_SIZE, 0);
        }
    }
}

#[test]
fn test_tick_moves_forward() {
    let mut game = started_game();
    match game.tick() {
        TickOutcome::Continued(snapshot) => {
            assert_eq!(snapshot.head(), Some(Position::new(20, 0)));
            assert_eq!(snapshot.length(), 5);
        }
        outcome => panic!("unexpected outcome {:?}", outcome),
    }
}

#[test]
fn test_reversal_request_is_ignored() {
    let mut game = started_game();
    game.input().request_direction(Direction::Left);
    game.tick();
    assert_eq!(head(&game), Position::new(20, 0));
    assert_eq!(game.state().map(GameState::direction), Some(Direction::Right));
}

#[test]
fn test_last_request_before_tick_wins() {
    let mut game = started_game();
    let input = game.input();
    input.request_direction(Direction::Up);
    input.request_direction(Direction::Down);
    game.tick();
    assert_eq!(head(&game), Position::new(10, -10));
    // Consumed by the previous tick.
    game.tick();
    assert_eq!(head(&game), Position::new(10, -20));
}

#[test]
fn test_loop_into_body_ends_game() {
    let mut game = started_game();
    let input = game.input();
    for direction in [Direction::Up, Direction::Left].iter() {
        input.request_direction(*direction);
        assert!(matches!(game.tick(), TickOutcome::Continued(_)));
    }
    input.request_direction(Direction::Down);
    let last = match game.tick() {
        TickOutcome::GameOver(snapshot) => snapshot,
        outcome => panic!("unexpected outcome {:?}", outcome),
    };
    assert_eq!(game.status(), GameStatus::GameOver);
    assert_eq!(
        last.body,
        vec![
            Position::new(0, 0),
            Position::new(10, 0),
            Position::new(10, 10),
            Position::new(0, 10),
            Position::new(0, 0),
        ]
    );
    assert_eq!(last.terminal, Some(TerminalBanner::default()));
    assert!(game.state().map_or(false, |state| state.snake().is_collided()));

    // No further movement.
    input.request_direction(Direction::Right);
    assert_eq!(game.tick(), TickOutcome::GameOver(last.clone()));
    assert_eq!(game.snapshot(), Some(last));

    game.stop();
    assert_eq!(game.status(), GameStatus::Stopped);
    assert_eq!(game.snapshot(), None);
    assert_eq!(game.tick(), TickOutcome::Stopped);
    game.stop();
    assert_eq!(game.status(), GameStatus::Stopped);
}

#[test]
fn test_growth_and_speed_progression() {
    let mut game = started_game();
    let expected_intervals = [250, 250, 200, 200, 150];
    for (eaten, expected_interval) in expected_intervals.iter().enumerate() {
        feed_next_step(&mut game);
        match game.tick() {
            TickOutcome::FoodEaten(snapshot) => {
                assert_eq!(snapshot.length(), 5 + eaten + 1);
                assert_eq!(snapshot.interval_millis, *expected_interval);
            }
            outcome => panic!("unexpected outcome {:?}", outcome),
        }
        let state = game.state().expect("game state");
        assert_eq!(state.food_placements(), 1 + eaten + 1);
        assert_eq!(state.snapshot().terminal, None);
    }
    assert_eq!(
        game.state().map(|state| state.snake().positions()),
        Some(
            [20, 30, 40, 50, 60, 70, 80, 90, -90, -80]
                .iter()
                .map(|x| Position::new(*x, 0))
                .collect()
        )
    );
}

#[test]
fn test_growth_on_edge_locks_turns_for_one_tick() {
    let mut game = started_game();
    game.state_mut().set_food(Position::new(90, 0));
    for _ in 0..7 {
        assert!(matches!(game.tick(), TickOutcome::Continued(_)));
    }
    assert!(matches!(game.tick(), TickOutcome::FoodEaten(_)));
    assert_eq!(head(&game), Position::new(100, 0));
    game.state_mut().set_food(FAR_AWAY);

    game.input().request_direction(Direction::Up);
    let snapshot = match game.tick() {
        TickOutcome::Continued(snapshot) => snapshot,
        outcome => panic!("unexpected outcome {:?}", outcome),
    };
    assert_eq!(snapshot.head(), Some(Position::new(-90, 0)));
    assert_eq!(game.state().map(GameState::direction), Some(Direction::Right));
    assert_eq!(
        snapshot.paths,
        vec![
            [60, 70, 80, 90, 100]
                .iter()
                .map(|x| Position::new(*x, 0))
                .collect::<Vec<_>>(),
        ]
    );

    // Off the edge again, turning works.
    game.input().request_direction(Direction::Up);
    game.tick();
    assert_eq!(head(&game), Position::new(-90, 10));
}

#[test]
fn test_food_sequence_is_reproducible() {
    fn eat(count: usize) -> Vec<Position> {
        let mut game = started_game();
        (0..count)
            .map(|_| {
                feed_next_step(&mut game);
                game.tick();
                game.state().map(GameState::food).expect("game state")
            })
            .collect()
    }
    let first = eat(6);
    assert_eq!(first, eat(6));

    let boundary = Boundary::reference();
    let mut allocator = FoodAllocator::new(DEFAULT_SEED);
    allocator.place(&boundary);
    let expected: Vec<_> = (0..6).map(|_| allocator.place(&boundary)).collect();
    assert_eq!(first, expected);
}

#[test]
fn test_cancel_stops_at_next_tick() {
    let mut game = started_game();
    let input = game.input();
    input.request_cancel();
    assert_eq!(game.status(), GameStatus::Running);
    assert_eq!(game.tick(), TickOutcome::Stopped);
    assert_eq!(game.status(), GameStatus::Stopped);
    assert_eq!(game.interval(), None);
}

#[test]
fn test_stop_while_running() {
    let mut game = started_game();
    game.stop();
    assert_eq!(game.status(), GameStatus::Stopped);
    assert_eq!(game.tick(), TickOutcome::Stopped);
}

#[test]
fn test_tick_before_start_leaves_the_game_startable() {
    let mut game = Game::new(GameConfig::default()).expect("valid configuration");
    assert_eq!(game.tick(), TickOutcome::Stopped);
    assert_eq!(game.status(), GameStatus::NotStarted);
    assert!(game.start());
    assert!(matches!(
        game.tick(),
        TickOutcome::Continued(_) | TickOutcome::FoodEaten(_)
    ));
}

#[test]
fn test_empty_body_stops_the_game() {
    let mut game = started_game();
    game.state_mut().set_snake(Snake::empty());
    assert_eq!(game.tick(), TickOutcome::Stopped);
    assert_eq!(game.status(), GameStatus::Stopped);
    assert_eq!(game.snapshot(), None);
}
