use crate::{dispose::Dispose, error::TeardownError};
use std::time::{Duration, Instant};

/// Deadline based tick source. Only one deadline is pending at a time, so a tick can never
/// overlap the previous one: the next deadline is set once the previous tick has been handled.
#[derive(Debug)]
pub struct Ticker {
    time_scale: f64,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(time_scale: f64) -> Self {
        Self {
            time_scale,
            next_due: None,
        }
    }

    fn scaled(&self, interval: Duration) -> Duration {
        Duration::from_secs_f64(interval.as_secs_f64() / self.time_scale)
    }

    /// Arms the ticker so the next tick is due `interval` after `now`.
    pub fn arm(&mut self, interval: Duration, now: Instant) {
        self.next_due = Some(now + self.scaled(interval));
    }

    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.next_due.map_or(false, |due| due <= now)
    }

    /// `None` when disarmed.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .map(|due| due.checked_duration_since(now).unwrap_or_default())
    }
}

impl Dispose for Ticker {
    fn dispose(&mut self) -> Result<(), TeardownError> {
        self.disarm();
        Ok(())
    }
}

#[test]
fn test_ticker_due() {
    let start = Instant::now();
    let mut ticker = Ticker::new(1.0);
    assert!(!ticker.is_due(start));
    assert_eq!(ticker.time_until_due(start), None);

    ticker.arm(Duration::from_millis(300), start);
    assert!(!ticker.is_due(start));
    assert_eq!(ticker.time_until_due(start), Some(Duration::from_millis(300)));
    let later = start + Duration::from_millis(300);
    assert!(ticker.is_due(later));
    assert_eq!(
        ticker.time_until_due(later + Duration::from_millis(5)),
        Some(Duration::from_millis(0))
    );
}

#[test]
fn test_ticker_time_scale() {
    let start = Instant::now();
    let mut ticker = Ticker::new(2.0);
    ticker.arm(Duration::from_millis(300), start);
    assert_eq!(ticker.time_until_due(start), Some(Duration::from_millis(150)));
}

#[test]
fn test_ticker_dispose_disarms() {
    let mut ticker = Ticker::new(1.0);
    ticker.arm(Duration::from_millis(100), Instant::now());
    assert!(ticker.dispose().is_ok());
    assert_eq!(ticker.time_until_due(Instant::now()), None);
}
