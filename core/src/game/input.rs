use crate::grid::direction::Direction;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc,
};

const NO_REQUEST: usize = usize::MAX;

/// Last direction requested since the previous tick, plus the cancellation flag.
///
/// Producers only ever overwrite the cell, the tick drains it. A request made between two ticks
/// replaces any earlier one.
#[derive(Debug)]
pub(crate) struct InputCell {
    pending: AtomicUsize,
    cancelled: AtomicBool,
}

impl InputCell {
    pub(crate) fn new() -> Self {
        Self {
            pending: AtomicUsize::new(NO_REQUEST),
            cancelled: AtomicBool::new(false),
        }
    }

    pub(crate) fn take_direction(&self) -> Option<Direction> {
        Direction::from_index(self.pending.swap(NO_REQUEST, Ordering::AcqRel))
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Producer side of a game's input, safe to hand to another thread.
#[derive(Debug, Clone)]
pub struct InputHandle(Arc<InputCell>);

impl InputHandle {
    pub(crate) fn new(cell: Arc<InputCell>) -> Self {
        Self(cell)
    }

    /// Queues a direction change for the next tick.
    pub fn request_direction(&self, direction: Direction) {
        self.0.pending.store(direction.index(), Ordering::Release);
    }

    /// Asks the game to terminate at its next tick.
    pub fn request_cancel(&self) {
        self.0.cancelled.store(true, Ordering::Release);
    }
}

#[test]
fn test_last_request_wins() {
    let cell = Arc::new(InputCell::new());
    let handle = InputHandle::new(cell.clone());
    assert_eq!(cell.take_direction(), None);
    handle.request_direction(Direction::Up);
    handle.request_direction(Direction::Left);
    assert_eq!(cell.take_direction(), Some(Direction::Left));
    assert_eq!(cell.take_direction(), None);
}

#[test]
fn test_cancel_request() {
    let cell = Arc::new(InputCell::new());
    let handle = InputHandle::new(cell.clone());
    assert!(!cell.is_cancelled());
    handle.clone().request_cancel();
    assert!(cell.is_cancelled());
    handle.request_direction(Direction::Up);
    assert!(cell.is_cancelled());
}

#[test]
fn test_request_from_another_thread() {
    let cell = Arc::new(InputCell::new());
    let handle = InputHandle::new(cell.clone());
    std::thread::spawn(move || handle.request_direction(Direction::Down))
        .join()
        .expect("producer thread");
    assert_eq!(cell.take_direction(), Some(Direction::Down));
}
