use std::time::Duration;

use tokio::time::{Instant, Sleep};

/// Deadline for a scanner's total time budget, started when the scanner is
/// built. Scanning does not consult it; callers use it to bound a batch.
#[derive(Clone, Copy, Debug)]
pub struct ScanTimer {
    started_at: Instant,
    deadline: Instant,
}

impl ScanTimer {
    pub fn start(budget: Duration) -> Self {
        let started_at = Instant::now();
        Self {
            started_at,
            deadline: started_at + budget,
        }
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Resolves once the deadline passes.
    pub fn expired(&self) -> Sleep {
        tokio::time::sleep_until(self.deadline)
    }
}
