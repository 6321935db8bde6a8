use crate::{
    grid::{boundary::Boundary, position::Position},
    vector::Vector2ISize,
};

pub const NUM_DIRECTIONS: usize = 4;

/// Axis-aligned heading. Variants are ordered counter-clockwise starting at +X so that the
/// difference of two indices counts quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Up,
    Left,
    Down,
}

const DIRECTIONS: [Direction; NUM_DIRECTIONS] = [
    Direction::Right,
    Direction::Up,
    Direction::Left,
    Direction::Down,
];

// Indexed like `DIRECTIONS`.
const VECTORS: [Vector2ISize; NUM_DIRECTIONS] = [
    Vector2ISize { x: 1, y: 0 },
    Vector2ISize { x: 0, y: 1 },
    Vector2ISize { x: -1, y: 0 },
    Vector2ISize { x: 0, y: -1 },
];

impl Direction {
    pub fn from_index(index: usize) -> Option<Self> {
        DIRECTIONS.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn vector(self) -> Vector2ISize {
        VECTORS[self.index()]
    }

    pub fn opposite(self) -> Self {
        DIRECTIONS[(self.index() + 2) % NUM_DIRECTIONS]
    }

    /// Counter-clockwise quarter turns needed to go from `self` to `other`.
    pub fn quarter_turns(self, other: Self) -> usize {
        (other.index() + NUM_DIRECTIONS - self.index()) % NUM_DIRECTIONS
    }

    /// Applies a requested heading change.
    ///
    /// The request is dropped while the head sits exactly on an outer edge of the boundary, and
    /// whenever it is not a quarter turn: keeping the same heading is a no-op and a reversal is
    /// refused.
    pub fn resolve(self, requested: Self, head: Position, boundary: &Boundary) -> Self {
        if boundary.is_on_edge(head) {
            return self;
        }
        match self.quarter_turns(requested) {
            0 | 2 => self,
            _ => requested,
        }
    }
}

#[test]
fn test_direction_index_round_trip() {
    for index in 0..NUM_DIRECTIONS {
        assert_eq!(Direction::from_index(index).map(Direction::index), Some(index));
    }
    assert_eq!(Direction::from_index(NUM_DIRECTIONS), None);
}

#[test]
fn test_direction_opposite() {
    assert_eq!(Direction::Right.opposite(), Direction::Left);
    assert_eq!(Direction::Up.opposite(), Direction::Down);
    for direction in DIRECTIONS.iter() {
        assert_eq!(direction.vector() + direction.opposite().vector(), Vector2ISize::default());
    }
}

#[cfg(test)]
fn centered_head() -> (Position, Boundary) {
    (Position::new(0, 0), Boundary::reference())
}

#[test]
fn test_resolve_refuses_reversal() {
    let (head, boundary) = centered_head();
    for direction in DIRECTIONS.iter() {
        assert_eq!(
            direction.resolve(direction.opposite(), head, &boundary),
            *direction
        );
    }
}

#[test]
fn test_resolve_same_direction_is_noop() {
    let (head, boundary) = centered_head();
    for direction in DIRECTIONS.iter() {
        assert_eq!(direction.resolve(*direction, head, &boundary), *direction);
    }
}

#[test]
fn test_resolve_accepts_quarter_turns() {
    let (head, boundary) = centered_head();
    assert_eq!(
        Direction::Right.resolve(Direction::Up, head, &boundary),
        Direction::Up
    );
    assert_eq!(
        Direction::Right.resolve(Direction::Down, head, &boundary),
        Direction::Down
    );
    assert_eq!(
        Direction::Up.resolve(Direction::Left, head, &boundary),
        Direction::Left
    );
    assert_eq!(
        Direction::Left.resolve(Direction::Down, head, &boundary),
        Direction::Down
    );
}

#[test]
fn test_resolve_locked_on_border() {
    let boundary = Boundary::reference();
    let heads = [
        Position::new(100, 0),
        Position::new(-100, 30),
        Position::new(20, 100),
        Position::new(-40, -100),
    ];
    for head in heads.iter() {
        for current in DIRECTIONS.iter() {
            for requested in DIRECTIONS.iter() {
                assert_eq!(current.resolve(*requested, *head, &boundary), *current);
            }
        }
    }
}

#[test]
fn test_resolve_not_locked_on_inset_edge() {
    let boundary = Boundary::reference();
    assert_eq!(
        Direction::Right.resolve(Direction::Up, Position::new(90, 0), &boundary),
        Direction::Up
    );
}
