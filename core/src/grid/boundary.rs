use crate::{
    error::ConfigurationError,
    grid::{position::Position, BOUNDARY_EXTENT, CELL_SIZE},
};
use std::ops::Range;

/// Axis-aligned playing rectangle with wrap-around edges. Corners sit on the `CELL_SIZE`
/// lattice, like every snake segment and food position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    min: Position,
    max: Position,
}

impl Boundary {
    pub fn new(min: Position, max: Position) -> Result<Self, ConfigurationError> {
        let cell_size = CELL_SIZE;
        let aligned = [min.x(), min.y(), max.x(), max.y()]
            .iter()
            .all(|coordinate| coordinate % cell_size == 0);
        if !aligned || min.x() >= max.x() || min.y() >= max.y() {
            return Err(ConfigurationError::MisalignedBoundary {
                min_x: min.x(),
                max_x: max.x(),
                min_y: min.y(),
                max_y: max.y(),
                cell_size,
            });
        }
        let boundary = Self { min, max };
        let (xs, ys) = boundary.food_cells();
        if xs.start >= xs.end || ys.start >= ys.end {
            return Err(ConfigurationError::NoFoodCells);
        }
        Ok(boundary)
    }

    /// The `[-100, 100] x [-100, 100]` board with cells of 10.
    pub fn reference() -> Self {
        Self {
            min: Position::new(-BOUNDARY_EXTENT, -BOUNDARY_EXTENT),
            max: Position::new(BOUNDARY_EXTENT, BOUNDARY_EXTENT),
        }
    }

    pub fn min(&self) -> Position {
        self.min
    }

    pub fn max(&self) -> Position {
        self.max
    }

    pub fn cell_size(&self) -> isize {
        CELL_SIZE
    }

    /// Moves a coordinate that reached or crossed an edge to the opposite side, one cell inside.
    /// Both axes are handled independently.
    pub fn clamp_wrap(&self, position: Position) -> Position {
        let x = Self::wrap_axis(position.x(), self.min.x(), self.max.x());
        let y = Self::wrap_axis(position.y(), self.min.y(), self.max.y());
        Position::new(x, y)
    }

    fn wrap_axis(value: isize, min: isize, max: isize) -> isize {
        if value >= max {
            min + CELL_SIZE
        } else if value <= min {
            max - CELL_SIZE
        } else {
            value
        }
    }

    /// True when the position lies exactly on one of the four outer edges.
    pub fn is_on_edge(&self, position: Position) -> bool {
        position.x() == self.max.x()
            || position.x() == self.min.x()
            || position.y() == self.max.y()
            || position.y() == self.min.y()
    }

    /// True when the position is strictly between the edges on both axes.
    pub fn contains(&self, position: Position) -> bool {
        self.min.x() < position.x()
            && position.x() < self.max.x()
            && self.min.y() < position.y()
            && position.y() < self.max.y()
    }

    /// Half-open ranges of cell indices food may be dropped on, per axis.
    pub fn food_cells(&self) -> (Range<isize>, Range<isize>) {
        (
            self.min.x() / CELL_SIZE + 1..self.max.x() / CELL_SIZE - 1,
            self.min.y() / CELL_SIZE + 1..self.max.y() / CELL_SIZE - 1,
        )
    }

    /// Closed outline, clockwise from the top right corner.
    pub fn polygon(&self) -> [Position; 5] {
        Self::outline(self.min, self.max)
    }

    /// Outline of the wall inset by one cell.
    pub fn inner_polygon(&self) -> [Position; 5] {
        let inset = Position::new(CELL_SIZE, CELL_SIZE);
        Self::outline(self.min + inset, self.max - inset)
    }

    fn outline(min: Position, max: Position) -> [Position; 5] {
        let top_right = Position::new(max.x(), max.y());
        [
            top_right,
            Position::new(max.x(), min.y()),
            Position::new(min.x(), min.y()),
            Position::new(min.x(), max.y()),
            top_right,
        ]
    }
}

impl Default for Boundary {
    fn default() -> Self {
        Self::reference()
    }
}

#[test]
fn test_new_boundary() {
    assert_eq!(
        Boundary::new(Position::new(-100, -100), Position::new(100, 100)),
        Ok(Boundary::reference())
    );
}

#[test]
fn test_new_boundary_keeps_lattice() {
    let boundary =
        Boundary::new(Position::new(-200, -60), Position::new(40, 120)).expect("valid boundary");
    assert_eq!(boundary.cell_size(), CELL_SIZE);
    assert_eq!(
        boundary.clamp_wrap(Position::new(40, 0)),
        Position::new(-190, 0)
    );
    assert_eq!(
        boundary.clamp_wrap(Position::new(0, -60)),
        Position::new(0, 110)
    );
}

#[test]
fn test_new_boundary_rejects_misalignment() {
    assert!(matches!(
        Boundary::new(Position::new(-95, -100), Position::new(100, 100)),
        Err(ConfigurationError::MisalignedBoundary { .. })
    ));
    assert!(matches!(
        Boundary::new(Position::new(100, -100), Position::new(-100, 100)),
        Err(ConfigurationError::MisalignedBoundary { .. })
    ));
}

#[test]
fn test_new_boundary_rejects_tiny_board() {
    assert_eq!(
        Boundary::new(Position::new(-10, -10), Position::new(10, 10)),
        Err(ConfigurationError::NoFoodCells)
    );
}

#[test]
fn test_clamp_wrap_inside_is_identity() {
    let boundary = Boundary::reference();
    for p in [
        Position::new(0, 0),
        Position::new(90, -90),
        Position::new(-90, 90),
    ]
    .iter()
    {
        assert_eq!(boundary.clamp_wrap(*p), *p);
    }
}

#[test]
fn test_clamp_wrap_x() {
    let boundary = Boundary::reference();
    assert_eq!(
        boundary.clamp_wrap(Position::new(100, 30)),
        Position::new(-90, 30)
    );
    assert_eq!(
        boundary.clamp_wrap(Position::new(110, -20)),
        Position::new(-90, -20)
    );
    assert_eq!(
        boundary.clamp_wrap(Position::new(-100, 40)),
        Position::new(90, 40)
    );
}

#[test]
fn test_clamp_wrap_y() {
    let boundary = Boundary::reference();
    assert_eq!(
        boundary.clamp_wrap(Position::new(30, 100)),
        Position::new(30, -90)
    );
    assert_eq!(
        boundary.clamp_wrap(Position::new(30, -110)),
        Position::new(30, 90)
    );
}

#[test]
fn test_clamp_wrap_corner() {
    let boundary = Boundary::reference();
    assert_eq!(
        boundary.clamp_wrap(Position::new(100, -100)),
        Position::new(-90, 90)
    );
}

#[test]
fn test_is_on_edge() {
    let boundary = Boundary::reference();
    assert!(boundary.is_on_edge(Position::new(100, 0)));
    assert!(boundary.is_on_edge(Position::new(0, -100)));
    assert!(!boundary.is_on_edge(Position::new(90, 90)));
    assert!(!boundary.contains(Position::new(100, 0)));
    assert!(boundary.contains(Position::new(90, 90)));
}

#[test]
fn test_food_cells() {
    let (xs, ys) = Boundary::reference().food_cells();
    assert_eq!(xs, -9..9);
    assert_eq!(ys, -9..9);
}

#[test]
fn test_polygons() {
    let boundary = Boundary::reference();
    assert_eq!(
        boundary.polygon(),
        [
            Position::new(100, 100),
            Position::new(100, -100),
            Position::new(-100, -100),
            Position::new(-100, 100),
            Position::new(100, 100),
        ]
    );
    assert_eq!(
        boundary.inner_polygon(),
        [
            Position::new(90, 90),
            Position::new(90, -90),
            Position::new(-90, -90),
            Position::new(-90, 90),
            Position::new(90, 90),
        ]
    );
}
