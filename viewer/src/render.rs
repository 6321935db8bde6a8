use crossterm::{
    cursor, queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use gridsnake_core::{game::Snapshot, grid::position::Position};
use itertools::Itertools;
use std::io::{self, Write};

const BORDER: char = '#';
const WALL: char = '.';
const EMPTY: char = ' ';
const FOOD: char = '*';
const BODY: char = 'o';
const HEAD: char = '@';

/// Text stand-in for the overlay: walls, food, body, head, and the banner once the game is over.
pub fn render(snapshot: &Snapshot) -> String {
    let mut canvas = Canvas::new(snapshot);
    canvas.outline(&snapshot.boundary, BORDER);
    canvas.outline(&snapshot.wall, WALL);
    canvas.put(snapshot.food, FOOD);
    for position in &snapshot.body {
        canvas.put(*position, BODY);
    }
    if let Some(head) = snapshot.head() {
        canvas.put(head, HEAD);
    }
    if let Some(banner) = snapshot.terminal {
        let middle = canvas.rows.len() / 2;
        canvas.text(middle.saturating_sub(1), banner.title);
        canvas.text(middle + 1, banner.subtitle);
    }
    let status = format!(
        "length {} | {}ms | {} path(s)",
        snapshot.length(),
        snapshot.interval_millis,
        snapshot.paths.len()
    );
    canvas
        .rows
        .iter()
        .map(|row| row.iter().collect::<String>())
        .chain(std::iter::once(status))
        .join("\n")
}

/// Draws a frame from the top left corner of a raw mode terminal.
pub fn present<W: Write>(out: &mut W, frame: &str) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    for line in frame.lines() {
        queue!(out, Print(line), cursor::MoveToNextLine(1))?;
    }
    out.flush()
}

struct Canvas {
    min: Position,
    max: Position,
    cell_size: isize,
    rows: Vec<Vec<char>>,
}

impl Canvas {
    fn new(snapshot: &Snapshot) -> Self {
        let (min, max, cell_size) = (snapshot.min(), snapshot.max(), snapshot.cell_size);
        let columns = ((max.x() - min.x()) / cell_size + 1) as usize;
        let rows = ((max.y() - min.y()) / cell_size + 1) as usize;
        Self {
            min,
            max,
            cell_size,
            rows: vec![vec![EMPTY; columns]; rows],
        }
    }

    /// Draws every cell along a closed polyline of axis-aligned edges.
    fn outline(&mut self, polygon: &[Position], c: char) {
        for (from, to) in polygon.iter().copied().tuple_windows() {
            let step = Position::new(
                (to.x() - from.x()).signum() * self.cell_size,
                (to.y() - from.y()).signum() * self.cell_size,
            );
            let mut position = from;
            self.put(position, c);
            while position != to {
                position += step;
                self.put(position, c);
            }
        }
    }

    fn put(&mut self, position: Position, c: char) {
        if position.x() < self.min.x()
            || position.x() > self.max.x()
            || position.y() < self.min.y()
            || position.y() > self.max.y()
        {
            return;
        }
        let column = ((position.x() - self.min.x()) / self.cell_size) as usize;
        let row = ((self.max.y() - position.y()) / self.cell_size) as usize;
        if let Some(slot) = self.rows.get_mut(row).and_then(|row| row.get_mut(column)) {
            *slot = c;
        }
    }

    fn text(&mut self, row: usize, text: &str) {
        if let Some(row) = self.rows.get_mut(row) {
            let width = row.len().saturating_sub(2);
            let start = 1 + width.saturating_sub(text.chars().count()) / 2;
            for (slot, c) in row.iter_mut().skip(start).take(width).zip(text.chars()) {
                *slot = c;
            }
        }
    }
}

#[cfg(test)]
use gridsnake_core::game::{Game, GameConfig, TerminalBanner};

#[test]
fn test_render_initial_game() {
    let game = Game::new_game(GameConfig::default()).expect("valid configuration");
    let snapshot = game.snapshot().expect("snapshot");
    let frame = render(&snapshot);
    let lines: Vec<&str> = frame.lines().collect();
    assert_eq!(lines.len(), 22);
    assert_eq!(lines[0], "#".repeat(21));
    assert_eq!(lines[20], "#".repeat(21));
    assert_eq!(lines[1], format!("#{}#", ".".repeat(19)));
    assert_eq!(lines[19], format!("#{}#", ".".repeat(19)));
    assert!(lines[10].starts_with("#."));
    assert!(lines[10].ends_with(".#"));
    assert_eq!(&lines[10][7..12], "oooo@");
    assert!(lines[10].starts_with('#'));
    assert!(lines[10].ends_with('#'));
    assert_eq!(lines[21], "length 5 | 300ms | 1 path(s)");
}

#[test]
fn test_render_terminal_banner() {
    let game = Game::new_game(GameConfig::default()).expect("valid configuration");
    let mut snapshot = game.snapshot().expect("snapshot");
    snapshot.terminal = Some(TerminalBanner::default());
    let frame = render(&snapshot);
    let lines: Vec<&str> = frame.lines().collect();
    assert!(lines[9].contains("GAME OVER"));
    assert!(lines[11].contains("Back to Work now!!"));
}

#[test]
fn test_render_head_on_edge() {
    let game = Game::new_game(GameConfig::default()).expect("valid configuration");
    let mut snapshot = game.snapshot().expect("snapshot");
    snapshot.body = vec![Position::new(90, 0), Position::new(100, 0)];
    let frame = render(&snapshot);
    let lines: Vec<&str> = frame.lines().collect();
    assert!(lines[10].ends_with("o@"));
}

#[test]
fn test_present_writes_every_line() {
    let game = Game::new_game(GameConfig::default()).expect("valid configuration");
    let frame = render(&game.snapshot().expect("snapshot"));
    let mut out = Vec::new();
    present(&mut out, &frame).expect("present");
    let written = String::from_utf8(out).expect("utf8");
    assert!(written.starts_with("\x1b["));
    assert!(written.contains("length 5 | 300ms | 1 path(s)"));
    assert!(!written.contains('\n'));
    assert_eq!(written.matches("oooo@").count(), 1);
}
