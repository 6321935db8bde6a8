use crate::{
    config::ViewerConfig,
    dispose::Dispose,
    effects::{cues_for, AudioSink},
    error::ViewerError,
    input::{Command, InputSource},
    render::{present, render},
    timer::Ticker,
};
use gridsnake_core::game::{Game, GameConfig, GameStatus, InputHandle, Snapshot, TickOutcome};
use log::{info, warn};
use std::{
    io, thread,
    time::{Duration, Instant},
};

const IDLE_POLL: Duration = Duration::from_millis(100);

struct Session {
    game: Game,
    input: InputHandle,
    ticker: Ticker,
    ticks: u64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub games: usize,
    pub ticks: u64,
    pub food_eaten: usize,
    pub game_overs: usize,
    pub final_length: Option<usize>,
}

/// Host side of the game: arms the ticker, forwards input, draws frames, plays cues and tears
/// sessions down.
#[derive(new)]
pub struct Overlay<I, A> {
    config: ViewerConfig,
    game_config: GameConfig,
    input: I,
    audio: A,
    max_ticks: Option<u64>,
    #[new(default)]
    session: Option<Session>,
    #[new(default)]
    summary: RunSummary,
}

impl<I: InputSource, A: AudioSink> Overlay<I, A> {
    /// Starts a game and serves it until the input asks to quit, or, for replayed input, until
    /// no game is left running. Resources are released before returning.
    pub fn run(&mut self) -> Result<RunSummary, ViewerError> {
        let result = self.serve();
        self.shutdown();
        result.map(|()| self.summary.clone())
    }

    fn serve(&mut self) -> Result<(), ViewerError> {
        self.toggle()?;
        loop {
            if self.max_ticks.map_or(false, |max| self.summary.ticks >= max) {
                info!("tick limit reached");
                return Ok(());
            }
            let realtime = self.input.is_realtime();
            let wait = match &self.session {
                Some(session) if realtime => session
                    .ticker
                    .time_until_due(Instant::now())
                    .unwrap_or(IDLE_POLL),
                Some(_) => Duration::from_millis(0),
                None if self.input.is_closed() => return Ok(()),
                None => IDLE_POLL,
            };
            if let Some(command) = self.input.next_command(self.summary.ticks, wait) {
                if !self.handle(command)? {
                    return Ok(());
                }
                continue;
            }
            let due = match &self.session {
                Some(session) => !realtime || session.ticker.is_due(Instant::now()),
                None if realtime => false,
                None => return Ok(()),
            };
            if due {
                self.tick();
            }
        }
    }

    /// Returns false when the command asks to quit.
    fn handle(&mut self, command: Command) -> Result<bool, ViewerError> {
        if command == Command::Toggle {
            self.toggle()?;
            return Ok(true);
        }
        match (command, &self.session) {
            (Command::Cancel, Some(session)) => session.input.request_cancel(),
            (Command::Cancel, None) => return Ok(false),
            (_, Some(session)) => {
                if let Some(direction) = command.direction() {
                    session.input.request_direction(direction);
                }
            }
            (_, None) => {}
        }
        Ok(true)
    }

    /// Starts a game when none is running, stops the running one otherwise.
    pub fn toggle(&mut self) -> Result<(), ViewerError> {
        if self.session.is_some() {
            self.stop_session();
            return Ok(());
        }
        let game = Game::new_game(self.game_config)?;
        let mut ticker = Ticker::new(self.config.time_scale);
        if let Some(interval) = game.interval() {
            ticker.arm(interval, Instant::now());
        }
        if let Some(snapshot) = game.snapshot() {
            self.draw(&snapshot);
        }
        self.summary.games += 1;
        info!("game {} started", self.summary.games);
        self.session = Some(Session {
            input: game.input(),
            game,
            ticker,
            ticks: 0,
        });
        Ok(())
    }

    fn tick(&mut self) {
        let outcome = match self.session.as_mut() {
            Some(session) => {
                session.ticks += 1;
                session.game.tick()
            }
            None => return,
        };
        self.summary.ticks += 1;
        for cue in cues_for(&outcome) {
            self.audio.play(cue);
        }
        if let Some(snapshot) = outcome.snapshot() {
            self.summary.final_length = Some(snapshot.length());
            self.draw(snapshot);
        }
        match &outcome {
            TickOutcome::Continued(snapshot) | TickOutcome::FoodEaten(snapshot) => {
                if let TickOutcome::FoodEaten(_) = outcome {
                    self.summary.food_eaten += 1;
                }
                let interval = Duration::from_millis(snapshot.interval_millis);
                if let Some(session) = self.session.as_mut() {
                    session.ticker.arm(interval, Instant::now());
                }
            }
            TickOutcome::GameOver(_) => {
                self.summary.game_overs += 1;
                self.stop_session();
            }
            TickOutcome::Stopped => self.stop_session(),
        }
    }

    fn stop_session(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.ticker.disarm();
            if session.game.status() == GameStatus::GameOver && self.input.is_realtime() {
                thread::sleep(self.config.game_over_hold());
            }
            session.game.stop();
            if let Err(e) = session.ticker.dispose() {
                warn!("failed to release the ticker: {}", e);
            }
            info!("game stopped after {} ticks", session.ticks);
        }
    }

    fn shutdown(&mut self) {
        self.stop_session();
        if let Err(e) = self.input.dispose() {
            warn!("failed to release the input source: {}", e);
        }
    }

    fn draw(&self, snapshot: &Snapshot) {
        if !self.config.render {
            return;
        }
        let frame = render(snapshot);
        if self.input.is_realtime() {
            if let Err(e) = present(&mut io::stdout(), &frame) {
                warn!("failed to draw the frame: {}", e);
            }
        } else {
            println!("{}", frame);
        }
    }
}

#[cfg(test)]
use crate::{
    effects::Cue,
    input::{ScriptStep, ScriptedInput},
};
#[cfg(test)]
use gridsnake_core::grid::{boundary::Boundary, direction::Direction, position::Position};

#[cfg(test)]
#[derive(Default)]
struct RecordingAudio(Vec<Cue>);

#[cfg(test)]
impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: Cue) {
        self.0.push(cue);
    }
}

#[cfg(test)]
fn scripted(
    steps: &[(u64, Command)],
    max_ticks: Option<u64>,
) -> Overlay<ScriptedInput, RecordingAudio> {
    scripted_on(GameConfig::default(), steps, max_ticks)
}

#[cfg(test)]
fn scripted_on(
    game_config: GameConfig,
    steps: &[(u64, Command)],
    max_ticks: Option<u64>,
) -> Overlay<ScriptedInput, RecordingAudio> {
    let steps = steps
        .iter()
        .map(|(tick, command)| ScriptStep {
            tick: *tick,
            command: *command,
        })
        .collect();
    Overlay::new(
        ViewerConfig {
            render: false,
            ..ViewerConfig::default()
        },
        game_config,
        ScriptedInput::new(steps),
        RecordingAudio::default(),
        max_ticks,
    )
}

#[test]
fn test_overlay_runs_until_tick_limit() {
    let mut overlay = scripted(&[], Some(5));
    let summary = overlay.run().expect("run");
    assert_eq!(summary.games, 1);
    assert_eq!(summary.ticks, 5);
    assert_eq!(summary.game_overs, 0);
    assert_eq!(overlay.audio.0.len(), 5);
    assert!(overlay.session.is_none());
}

#[test]
fn test_overlay_cancel_stops_at_next_tick() {
    let mut overlay = scripted(&[(2, Command::Cancel)], Some(100));
    let summary = overlay.run().expect("run");
    assert_eq!(summary.games, 1);
    assert_eq!(summary.ticks, 3);
    assert_eq!(summary.game_overs, 0);
    assert_eq!(overlay.audio.0.last(), Some(&Cue::Silence));
}

#[test]
fn test_overlay_toggle_off_and_on() {
    let mut overlay = scripted(&[(0, Command::Toggle), (0, Command::Toggle)], Some(3));
    let summary = overlay.run().expect("run");
    assert_eq!(summary.games, 2);
    assert_eq!(summary.ticks, 3);
}

#[test]
fn test_overlay_toggle_off_ends_replay() {
    let mut overlay = scripted(&[(1, Command::Toggle)], Some(100));
    let summary = overlay.run().expect("run");
    assert_eq!(summary.games, 1);
    assert_eq!(summary.ticks, 1);
    assert!(overlay.session.is_none());
}

#[test]
fn test_overlay_forwards_turns() {
    let mut overlay = scripted(&[], Some(1));
    overlay.toggle().expect("start");
    assert!(overlay.handle(Command::Down).expect("handle"));
    overlay.tick();
    let direction = overlay
        .session
        .as_ref()
        .and_then(|session| session.game.state())
        .map(|state| state.direction());
    assert_eq!(direction, Some(Direction::Down));
}

#[test]
fn test_overlay_tears_down_after_collision() {
    // Food only ever lands on the starting row, so the loop above it cannot grow the body.
    let boundary = Boundary::new(Position::new(-100, -10), Position::new(100, 20))
        .expect("valid boundary");
    let mut overlay = scripted_on(
        GameConfig { seed: 25, boundary },
        &[(0, Command::Up), (1, Command::Left), (2, Command::Down)],
        Some(100),
    );
    let summary = overlay.run().expect("run");
    assert_eq!(summary.games, 1);
    assert_eq!(summary.ticks, 3);
    assert_eq!(summary.game_overs, 1);
    assert_eq!(&overlay.audio.0[..2], &[Cue::Step, Cue::Step]);
    assert_eq!(&overlay.audio.0[2..], &[Cue::Silence, Cue::Fall]);
    assert!(overlay.session.is_none());
}
