use crate::{
    error::TickError,
    food::FoodAllocator,
    game::snapshot::{Snapshot, TerminalBanner},
    grid::{boundary::Boundary, direction::Direction, position::Position},
    snake::Snake,
    speed::Speed,
};
use log::debug;

const EMPTY_BODY: TickError = TickError::InvariantViolation("snake body is empty");

/// What a single advance did to the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved,
    Ate,
    Collided,
}

/// Everything a running game owns.
pub struct GameState {
    snake: Snake,
    direction: Direction,
    food: Position,
    boundary: Boundary,
    speed: Speed,
    allocator: FoodAllocator,
    terminal: bool,
}

impl GameState {
    pub(crate) fn new(boundary: Boundary, seed: u64) -> Self {
        let mut allocator = FoodAllocator::new(seed);
        let food = allocator.place(&boundary);
        Self {
            snake: Snake::initial(boundary.cell_size()),
            direction: Direction::Right,
            food,
            boundary,
            speed: Speed::new(),
            allocator,
            terminal: false,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Food positions drawn so far, the initial one included.
    pub fn food_placements(&self) -> usize {
        self.allocator.placements()
    }

    /// Turn, move, then feed and check for self intersection.
    pub(crate) fn advance(&mut self, requested: Option<Direction>) -> Result<Advance, TickError> {
        let head = self.snake.head().ok_or(EMPTY_BODY)?;
        if let Some(requested) = requested {
            let direction = self.direction.resolve(requested, head, &self.boundary);
            if direction != self.direction {
                debug!("direction changed from {:?} to {:?}", self.direction, direction);
            }
            self.direction = direction;
        }
        let ate = self
            .snake
            .step(self.direction, &self.boundary, self.food)
            .ok_or(EMPTY_BODY)?;
        if ate {
            self.feed();
        }
        Ok(if self.snake.is_collided() {
            self.terminal = true;
            Advance::Collided
        } else if ate {
            Advance::Ate
        } else {
            Advance::Moved
        })
    }

    fn feed(&mut self) {
        self.snake.grow(self.direction, self.boundary.cell_size());
        self.food = self.allocator.place(&self.boundary);
        debug!(
            "food eaten, length {}, next food at {:?}",
            self.snake.len(),
            self.food
        );
        if self.speed.on_growth(self.snake.len()) {
            debug!("tick interval now {}ms", self.speed.interval_millis());
        }
    }

    pub(crate) fn terminate(&mut self) {
        self.terminal = true;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            paths: self.snake.paths(self.boundary.cell_size()),
            body: self.snake.positions(),
            food: self.food,
            boundary: self.boundary.polygon(),
            wall: self.boundary.inner_polygon(),
            cell_size: self.boundary.cell_size(),
            interval_millis: self.speed.interval_millis(),
            terminal: if self.terminal {
                Some(TerminalBanner::default())
            } else {
                None
            },
        }
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Position) {
        self.food = food;
    }

    #[cfg(test)]
    pub(crate) fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }
}
