use crate::{grid::direction::Direction, vector::Vector2ISize};
use std::fmt;

/// A point of the playing lattice. Every reachable position is a multiple of the cell size.
#[derive(
    Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Add, AddAssign, Sub, SubAssign, From,
)]
pub struct Position(Vector2ISize);

impl Position {
    pub const fn new(x: isize, y: isize) -> Self {
        Self(Vector2ISize { x, y })
    }

    pub fn x(&self) -> isize {
        self.0.x
    }

    pub fn y(&self) -> isize {
        self.0.y
    }

    pub fn distance_squared(self, other: Self) -> isize {
        (self - other).0.length_squared()
    }

    /// True when `other` is exactly one cell away along an axis.
    pub fn is_adjacent(self, other: Self, cell_size: isize) -> bool {
        self.distance_squared(other) == cell_size * cell_size
    }

    pub fn neighbor(self, direction: Direction, cell_size: isize) -> Self {
        Self(self.0 + direction.vector() * cell_size)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}

#[test]
fn test_position_coordinates() {
    let p = Position::new(-30, 20);
    assert_eq!(p.x(), -30);
    assert_eq!(p.y(), 20);
}

#[test]
fn test_position_neighbor() {
    let p = Position::new(10, 0);
    assert_eq!(p.neighbor(Direction::Right, 10), Position::new(20, 0));
    assert_eq!(p.neighbor(Direction::Left, 10), Position::new(0, 0));
    assert_eq!(p.neighbor(Direction::Up, 10), Position::new(10, 10));
    assert_eq!(p.neighbor(Direction::Down, 10), Position::new(10, -10));
}

#[test]
fn test_position_adjacency() {
    let p = Position::new(0, 0);
    assert!(p.is_adjacent(Position::new(0, -10), 10));
    assert!(p.is_adjacent(Position::new(10, 0), 10));
    assert!(!p.is_adjacent(Position::new(10, 10), 10));
    assert!(!p.is_adjacent(Position::new(0, 0), 10));
    assert!(!p.is_adjacent(Position::new(190, 0), 10));
}
