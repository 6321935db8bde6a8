pub mod boundary;
pub mod direction;
pub mod position;

/// Lattice step between two neighboring positions.
pub const CELL_SIZE: isize = 10;

/// Half the side of the reference board.
pub const BOUNDARY_EXTENT: isize = 100;
