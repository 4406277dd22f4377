use std::fmt;
use std::time::{Duration, Instant};

/// The search ran past its deadline.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Timeout;

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "search timed out")
    }
}

impl std::error::Error for Timeout {}

/// Wall-clock limit checked cooperatively by the search.
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    started: Instant,
    expires: Instant,
}

impl Deadline {
    pub fn after(timeout: Duration) -> Self {
        let started = Instant::now();
        Self {
            started,
            expires: started + timeout,
        }
    }

    pub fn check(&self) -> Result<(), Timeout> {
        if Instant::now() >= self.expires {
            Err(Timeout)
        } else {
            Ok(())
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
