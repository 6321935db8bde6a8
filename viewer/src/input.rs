use crate::{
    config,
    dispose::Dispose,
    error::{TeardownError, ViewerError},
};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use gridsnake_core::grid::direction::Direction;
use log::warn;
use serde::Deserialize;
use std::{collections::VecDeque, io, path::Path, str::FromStr, thread, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    #[display(fmt = "up")]
    Up,
    #[display(fmt = "down")]
    Down,
    #[display(fmt = "left")]
    Left,
    #[display(fmt = "right")]
    Right,
    /// Escape: ends the running game, or quits when no game is running.
    #[display(fmt = "cancel")]
    Cancel,
    /// Starts a game when none is running, stops the running one otherwise.
    #[display(fmt = "toggle")]
    Toggle,
}

impl Command {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Command::Up => Some(Direction::Up),
            Command::Down => Some(Direction::Down),
            Command::Left => Some(Direction::Left),
            Command::Right => Some(Direction::Right),
            Command::Cancel | Command::Toggle => None,
        }
    }

    /// Command bound to a key press. Arrows steer, Escape and Ctrl-C cancel, letters go
    /// through the key map.
    pub fn from_key(key: KeyEvent) -> Option<Command> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Up => Some(Command::Up),
            KeyCode::Down => Some(Command::Down),
            KeyCode::Left => Some(Command::Left),
            KeyCode::Right => Some(Command::Right),
            KeyCode::Esc => Some(Command::Cancel),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::Cancel)
            }
            KeyCode::Char(key) => key.to_string().parse().ok(),
            _ => None,
        }
    }
}

impl FromStr for Command {
    type Err = ();

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        match key.to_ascii_lowercase().as_str() {
            "w" | "k" | "up" => Ok(Command::Up),
            "s" | "j" | "down" => Ok(Command::Down),
            "a" | "h" | "left" => Ok(Command::Left),
            "d" | "l" | "right" => Ok(Command::Right),
            "q" | "esc" | "escape" | "cancel" => Ok(Command::Cancel),
            "t" | "toggle" => Ok(Command::Toggle),
            _ => Err(()),
        }
    }
}

/// Producer of commands for the overlay.
pub trait InputSource: Dispose {
    /// Waits at most `timeout` for the next command. `tick` is the number of ticks played so far.
    fn next_command(&mut self, tick: u64, timeout: Duration) -> Option<Command>;

    /// False for sources replayed on a virtual clock.
    fn is_realtime(&self) -> bool;

    /// True once no command will ever be produced again.
    fn is_closed(&self) -> bool;
}

/// Reads key presses. The terminal stays in raw mode on the alternate screen until the source
/// is disposed.
pub struct TerminalInput {
    active: bool,
    closed: bool,
}

impl TerminalInput {
    pub fn enter() -> Result<Self, ViewerError> {
        terminal::enable_raw_mode().map_err(ViewerError::Terminal)?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, cursor::Hide) {
            if let Err(e) = terminal::disable_raw_mode() {
                warn!("failed to leave raw mode: {}", e);
            }
            return Err(ViewerError::Terminal(e));
        }
        Ok(Self {
            active: true,
            closed: false,
        })
    }

    fn read(timeout: Duration) -> io::Result<Option<Event>> {
        if event::poll(timeout)? {
            event::read().map(Some)
        } else {
            Ok(None)
        }
    }
}

impl InputSource for TerminalInput {
    fn next_command(&mut self, _tick: u64, timeout: Duration) -> Option<Command> {
        if self.closed {
            thread::sleep(timeout);
            return None;
        }
        match Self::read(timeout) {
            Ok(Some(Event::Key(key))) => Command::from_key(key),
            Ok(_) => None,
            Err(e) => {
                warn!("terminal input closed: {}", e);
                self.closed = true;
                None
            }
        }
    }

    fn is_realtime(&self) -> bool {
        true
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Dispose for TerminalInput {
    fn dispose(&mut self) -> Result<(), TeardownError> {
        self.closed = true;
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let screen = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
        terminal::disable_raw_mode()
            .and(screen)
            .map_err(TeardownError::Terminal)
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        if let Err(e) = self.dispose() {
            warn!("{}", e);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ScriptStep {
    /// Number of ticks played before the command is delivered.
    pub tick: u64,
    pub command: Command,
}

/// Replays commands at fixed ticks on a virtual clock.
#[derive(Debug, new)]
pub struct ScriptedInput {
    steps: VecDeque<ScriptStep>,
}

impl ScriptedInput {
    pub fn from_file(path: &Path) -> Result<Self, ViewerError> {
        let mut steps: Vec<ScriptStep> = config::from_file(path)?;
        steps.sort_by_key(|step| step.tick);
        Ok(Self::new(steps.into()))
    }
}

impl InputSource for ScriptedInput {
    fn next_command(&mut self, tick: u64, _timeout: Duration) -> Option<Command> {
        if self.steps.front().map_or(false, |step| step.tick <= tick) {
            self.steps.pop_front().map(|step| step.command)
        } else {
            None
        }
    }

    fn is_realtime(&self) -> bool {
        false
    }

    fn is_closed(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Dispose for ScriptedInput {
    fn dispose(&mut self) -> Result<(), TeardownError> {
        self.steps.clear();
        Ok(())
    }
}

#[test]
fn test_parse_command_keys() {
    assert_eq!("w".parse::<Command>(), Ok(Command::Up));
    assert_eq!("Left".parse::<Command>(), Ok(Command::Left));
    assert_eq!("ESC".parse::<Command>(), Ok(Command::Cancel));
    assert_eq!("t".parse::<Command>(), Ok(Command::Toggle));
    assert_eq!("x".parse::<Command>(), Err(()));
}

#[test]
fn test_command_from_key() {
    let press = |code| KeyEvent::new(code, KeyModifiers::NONE);
    assert_eq!(Command::from_key(press(KeyCode::Up)), Some(Command::Up));
    assert_eq!(Command::from_key(press(KeyCode::Down)), Some(Command::Down));
    assert_eq!(Command::from_key(press(KeyCode::Left)), Some(Command::Left));
    assert_eq!(Command::from_key(press(KeyCode::Right)), Some(Command::Right));
    assert_eq!(Command::from_key(press(KeyCode::Esc)), Some(Command::Cancel));
    assert_eq!(Command::from_key(press(KeyCode::Char('w'))), Some(Command::Up));
    assert_eq!(Command::from_key(press(KeyCode::Char('t'))), Some(Command::Toggle));
    assert_eq!(Command::from_key(press(KeyCode::Char('x'))), None);
    assert_eq!(Command::from_key(press(KeyCode::Enter)), None);
    assert_eq!(
        Command::from_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Some(Command::Cancel)
    );
}

#[test]
fn test_command_from_key_ignores_release() {
    let release = KeyEvent::new_with_kind(KeyCode::Up, KeyModifiers::NONE, KeyEventKind::Release);
    assert_eq!(Command::from_key(release), None);
}

#[test]
fn test_command_direction() {
    assert_eq!(Command::Down.direction(), Some(Direction::Down));
    assert_eq!(Command::Toggle.direction(), None);
}

#[test]
fn test_scripted_input_delivers_in_tick_order() {
    let mut steps: Vec<ScriptStep> =
        serde_yaml::from_str("- { tick: 2, command: left }\n- { tick: 0, command: up }\n")
            .expect("yaml");
    steps.sort_by_key(|step| step.tick);
    let mut input = ScriptedInput::new(steps.into());
    let timeout = Duration::from_millis(0);
    assert_eq!(input.next_command(0, timeout), Some(Command::Up));
    assert_eq!(input.next_command(0, timeout), None);
    assert_eq!(input.next_command(1, timeout), None);
    assert!(!input.is_closed());
    assert_eq!(input.next_command(3, timeout), Some(Command::Left));
    assert!(input.is_closed());
    assert!(!input.is_realtime());
}
