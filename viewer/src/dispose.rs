use crate::error::TeardownError;

/// Releases a host resource. Every part is released even when an earlier one fails, the first
/// failure is reported.
pub trait Dispose {
    fn dispose(&mut self) -> Result<(), TeardownError>;
}

impl Dispose for () {
    fn dispose(&mut self) -> Result<(), TeardownError> {
        Ok(())
    }
}

impl<T1: Dispose, T2: Dispose> Dispose for (T1, T2) {
    fn dispose(&mut self) -> Result<(), TeardownError> {
        let first = self.0.dispose();
        let second = self.1.dispose();
        first.and(second)
    }
}

#[cfg(test)]
use std::io;

#[cfg(test)]
struct Failing {
    disposed: bool,
}

#[cfg(test)]
impl Dispose for Failing {
    fn dispose(&mut self) -> Result<(), TeardownError> {
        self.disposed = true;
        Err(TeardownError::Terminal(io::Error::new(
            io::ErrorKind::Other,
            "restore",
        )))
    }
}

#[test]
fn test_dispose_pair_releases_both_parts() {
    let mut pair = (Failing { disposed: false }, Failing { disposed: false });
    assert!(pair.dispose().is_err());
    assert!(pair.0.disposed);
    assert!(pair.1.disposed);
}

#[test]
fn test_dispose_unit() {
    assert!(((), ()).dispose().is_ok());
}
