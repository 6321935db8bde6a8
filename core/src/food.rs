use crate::grid::{boundary::Boundary, position::Position};
use rand::{rngs::StdRng, Rng, SeedableRng};

pub const DEFAULT_SEED: u64 = 25;

/// Drops food on a uniformly drawn cell. The body of the snake is not avoided.
pub struct FoodAllocator {
    rng: StdRng,
    placements: usize,
}

impl FoodAllocator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            placements: 0,
        }
    }

    pub fn place(&mut self, boundary: &Boundary) -> Position {
        let (xs, ys) = boundary.food_cells();
        let x = self.rng.gen_range(xs.start, xs.end);
        let y = self.rng.gen_range(ys.start, ys.end);
        self.placements += 1;
        Position::new(x * boundary.cell_size(), y * boundary.cell_size())
    }

    /// Number of positions handed out so far.
    pub fn placements(&self) -> usize {
        self.placements
    }
}

impl Default for FoodAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

#[cfg(test)]
fn draw_sequence(seed: u64, count: usize) -> Vec<Position> {
    let boundary = Boundary::reference();
    let mut allocator = FoodAllocator::new(seed);
    (0..count).map(|_| allocator.place(&boundary)).collect()
}

#[test]
fn test_food_placement_is_reproducible() {
    assert_eq!(draw_sequence(DEFAULT_SEED, 64), draw_sequence(DEFAULT_SEED, 64));
}

#[test]
fn test_food_placement_depends_on_seed() {
    assert_ne!(draw_sequence(1, 64), draw_sequence(2, 64));
}

#[test]
fn test_food_placement_stays_on_inner_cells() {
    for food in draw_sequence(7, 500) {
        assert!((-90..=80).contains(&food.x()), "{:?}", food);
        assert!((-90..=80).contains(&food.y()), "{:?}", food);
        assert_eq!(food.x() % 10, 0);
        assert_eq!(food.y() % 10, 0);
    }
}

#[test]
fn test_food_placement_count() {
    let boundary = Boundary::reference();
    let mut allocator = FoodAllocator::default();
    assert_eq!(allocator.placements(), 0);
    allocator.place(&boundary);
    allocator.place(&boundary);
    assert_eq!(allocator.placements(), 2);
}
