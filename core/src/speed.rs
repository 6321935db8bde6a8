use std::time::Duration;

pub const INITIAL_INTERVAL_MILLIS: u64 = 300;
pub const INTERVAL_STEP_MILLIS: u64 = 50;
pub const MIN_INTERVAL_MILLIS: u64 = 100;

/// Tick interval. It only shrinks, by one step each time growth leaves the snake with an even
/// length, and stops shrinking once it reaches the minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Speed {
    interval_millis: u64,
}

impl Speed {
    pub fn new() -> Self {
        Self {
            interval_millis: INITIAL_INTERVAL_MILLIS,
        }
    }

    pub fn interval_millis(&self) -> u64 {
        self.interval_millis
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_millis)
    }

    /// Called with the length reached after growing. Returns whether the interval changed.
    pub fn on_growth(&mut self, length: usize) -> bool {
        if length % 2 == 0 && self.interval_millis > MIN_INTERVAL_MILLIS {
            self.interval_millis -= INTERVAL_STEP_MILLIS;
            true
        } else {
            false
        }
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn test_speed_initial_interval() {
    let speed = Speed::new();
    assert_eq!(speed.interval_millis(), 300);
    assert_eq!(speed.interval(), Duration::from_millis(300));
}

#[test]
fn test_speed_only_changes_on_even_length() {
    let mut speed = Speed::new();
    assert!(!speed.on_growth(7));
    assert_eq!(speed.interval_millis(), 300);
    assert!(speed.on_growth(6));
    assert_eq!(speed.interval_millis(), 250);
}

#[test]
fn test_speed_floor() {
    let mut speed = Speed::new();
    let mut changes = Vec::new();
    for length in 6..60 {
        let before = speed.interval_millis();
        if speed.on_growth(length) {
            assert_eq!(length % 2, 0);
            assert!(before > MIN_INTERVAL_MILLIS);
            assert_eq!(speed.interval_millis(), before - INTERVAL_STEP_MILLIS);
            changes.push(length);
        }
        assert!(speed.interval_millis() >= MIN_INTERVAL_MILLIS);
    }
    assert_eq!(changes, vec![6, 8, 10, 12]);
    assert_eq!(speed.interval_millis(), MIN_INTERVAL_MILLIS);
}
