use crate::grid::{boundary::Boundary, direction::Direction, position::Position};
use itertools::Itertools;
use std::collections::{HashSet, VecDeque};

pub const INITIAL_LENGTH: usize = 5;

/// Tail end of the snake at game start.
pub const INITIAL_TAIL: Position = Position::new(-30, 0);

/// Ordered body of the snake, oldest segment first and head last.
///
/// Backed by a ring buffer: a step pushes the new head and evicts the oldest segment, which is
/// the same as shifting every segment one slot towards the head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Builds `length` segments starting at `tail` and heading in `direction`.
    pub fn new(tail: Position, length: usize, direction: Direction, cell_size: isize) -> Self {
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut position = tail;
        body.push_back(position);
        for _ in 1..length {
            position = position.neighbor(direction, cell_size);
            body.push_back(position);
        }
        Self { body }
    }

    pub fn initial(cell_size: isize) -> Self {
        Self::new(INITIAL_TAIL, INITIAL_LENGTH, Direction::Right, cell_size)
    }

    /// Returns `None` for an empty sequence.
    pub fn from_positions<I: IntoIterator<Item = Position>>(positions: I) -> Option<Self> {
        let body: VecDeque<Position> = positions.into_iter().collect();
        if body.is_empty() {
            None
        } else {
            Some(Self { body })
        }
    }

    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self {
            body: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// `None` only for an empty body, which no constructor builds.
    pub fn head(&self) -> Option<Position> {
        self.body.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    pub fn positions(&self) -> Vec<Position> {
        self.body.iter().copied().collect()
    }

    /// Moves one cell forward, wrapping at the boundary. Returns whether the new head lands on
    /// the food, `None` when there is no head to move. The length never changes here.
    pub fn step(
        &mut self,
        direction: Direction,
        boundary: &Boundary,
        food: Position,
    ) -> Option<bool> {
        let head = boundary.clamp_wrap(self.head()?.neighbor(direction, boundary.cell_size()));
        self.body.pop_front();
        self.body.push_back(head);
        Some(head == food)
    }

    /// Appends one segment after the head, one cell further in `direction`. The wrap rule is not
    /// applied, so the new leader may sit exactly on an edge.
    pub fn grow(&mut self, direction: Direction, cell_size: isize) {
        if let Some(head) = self.head() {
            self.body.push_back(head.neighbor(direction, cell_size));
        }
    }

    /// True when at least two segments share a position.
    pub fn is_collided(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.body.len());
        !self.body.iter().all(|position| seen.insert(*position))
    }

    /// Polylines through the body. Consecutive segments exactly one cell apart are joined, any
    /// other gap (such as the jump of a wrap) starts a new polyline.
    pub fn paths(&self, cell_size: isize) -> Vec<Vec<Position>> {
        let mut paths = Vec::new();
        let mut current: Vec<Position> = Vec::new();
        for (from, to) in self.body.iter().copied().tuple_windows() {
            if from.is_adjacent(to, cell_size) {
                if current.is_empty() {
                    current.push(from);
                }
                current.push(to);
            } else if !current.is_empty() {
                paths.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            paths.push(current);
        }
        paths
    }
}

#[cfg(test)]
use crate::grid::CELL_SIZE;

#[cfg(test)]
const FAR_AWAY: Position = Position::new(80, 80);

#[cfg(test)]
fn snake(coordinates: &[(isize, isize)]) -> Snake {
    Snake::from_positions(coordinates.iter().map(|(x, y)| Position::new(*x, *y))).expect("body")
}

#[test]
fn test_initial_snake() {
    let snake = Snake::initial(CELL_SIZE);
    assert_eq!(
        snake.positions(),
        vec![
            Position::new(-30, 0),
            Position::new(-20, 0),
            Position::new(-10, 0),
            Position::new(0, 0),
            Position::new(10, 0),
        ]
    );
    assert_eq!(snake.len(), INITIAL_LENGTH);
    assert_eq!(snake.head(), Some(Position::new(10, 0)));
    assert!(!snake.is_collided());
}

#[test]
fn test_from_positions_rejects_empty() {
    assert_eq!(Snake::from_positions(Vec::new()), None);
}

#[test]
fn test_empty_body_has_no_head() {
    let mut snake = Snake::empty();
    assert_eq!(snake.head(), None);
    assert_eq!(snake.step(Direction::Right, &Boundary::reference(), FAR_AWAY), None);
    snake.grow(Direction::Right, CELL_SIZE);
    assert_eq!(snake.len(), 0);
}

#[test]
fn test_step_follows_the_leader() {
    let mut snake = Snake::initial(CELL_SIZE);
    let ate = snake.step(Direction::Up, &Boundary::reference(), FAR_AWAY);
    assert_eq!(ate, Some(false));
    assert_eq!(
        snake,
        self::snake(&[(-20, 0), (-10, 0), (0, 0), (10, 0), (10, 10)])
    );
}

#[test]
fn test_step_detects_food() {
    let mut snake = Snake::initial(CELL_SIZE);
    assert_eq!(
        snake.step(Direction::Right, &Boundary::reference(), Position::new(20, 0)),
        Some(true)
    );
    assert_eq!(snake.len(), INITIAL_LENGTH);
}

#[test]
fn test_step_wraps_head() {
    let mut snake = self::snake(&[(70, 0), (80, 0), (90, 0)]);
    snake.step(Direction::Right, &Boundary::reference(), FAR_AWAY);
    assert_eq!(snake, self::snake(&[(80, 0), (90, 0), (-90, 0)]));
}

#[test]
fn test_grow_extends_past_head_without_wrap() {
    let mut snake = self::snake(&[(70, 0), (80, 0), (90, 0)]);
    snake.grow(Direction::Right, CELL_SIZE);
    assert_eq!(snake, self::snake(&[(70, 0), (80, 0), (90, 0), (100, 0)]));
    assert_eq!(snake.head(), Some(Position::new(100, 0)));
}

#[test]
fn test_straight_travel_never_collides() {
    let boundary = Boundary::reference();
    let initial = Snake::initial(CELL_SIZE);
    let mut snake = initial.clone();
    let mut revisited = false;
    for step in 1..=200 {
        snake.step(Direction::Right, &boundary, FAR_AWAY);
        assert!(!snake.is_collided(), "collision after {} steps", step);
        if step == 19 {
            revisited = snake == initial;
        }
    }
    assert!(revisited);
}

#[test]
fn test_collision() {
    assert!(!snake(&[(0, 0), (10, 0), (10, 10)]).is_collided());
    assert!(snake(&[(0, 0), (10, 0), (10, 10), (0, 10), (0, 0)]).is_collided());
    assert!(snake(&[(0, 0), (0, 0)]).is_collided());
}

#[test]
fn test_paths_of_straight_snake() {
    let snake = Snake::initial(CELL_SIZE);
    assert_eq!(snake.paths(CELL_SIZE), vec![snake.positions()]);
}

#[test]
fn test_paths_split_at_wrap() {
    let snake = snake(&[(70, 0), (80, 0), (90, 0), (-90, 0), (-80, 0)]);
    assert_eq!(
        snake.paths(CELL_SIZE),
        vec![
            vec![Position::new(70, 0), Position::new(80, 0), Position::new(90, 0)],
            vec![Position::new(-90, 0), Position::new(-80, 0)],
        ]
    );
}

#[test]
fn test_paths_drop_isolated_segments() {
    assert!(snake(&[(0, 0)]).paths(CELL_SIZE).is_empty());
    assert_eq!(
        snake(&[(100, 0), (-90, 0), (-80, 0)]).paths(CELL_SIZE),
        vec![vec![Position::new(-90, 0), Position::new(-80, 0)]]
    );
}

#[test]
fn test_paths_cover_corners() {
    let snake = snake(&[(0, 0), (10, 0), (10, 10), (0, 10)]);
    let segments: std::collections::HashSet<_> = snake
        .paths(CELL_SIZE)
        .iter()
        .flat_map(|path| path.iter().copied().tuple_windows::<(_, _)>())
        .collect();
    assert_eq!(
        segments,
        maplit::hashset![
            (Position::new(0, 0), Position::new(10, 0)),
            (Position::new(10, 0), Position::new(10, 10)),
            (Position::new(10, 10), Position::new(0, 10)),
        ]
    );
}
