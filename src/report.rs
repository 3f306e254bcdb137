//! Rate-limited console status reporting.
//!
//! Presentation only: the ingestion loop calls in here every iteration and
//! the reporter decides, from wall-clock comparisons against the configured
//! periods, whether anything is actually printed. Both checks are cheap and
//! never block ingestion.

use crate::types::{Counters, Sample};
use std::net::IpAddr;
use std::time::{Duration, Instant};

/// Emits the `[LIVE]` per-sample line and the periodic `[STATUS]` summary.
pub struct StatusReporter {
    live_period: Duration,
    status_period: Duration,
    /// None until the first accepted sample, so the first live line prints
    /// immediately
    last_live: Option<Instant>,
    /// Seeded at startup, so the first summary waits a full period
    last_status: Option<Instant>,
}

impl StatusReporter {
    /// Create a reporter with the given print periods.
    pub fn new(live_period: Duration, status_period: Duration) -> Self {
        Self {
            live_period,
            status_period,
            last_live: None,
            last_status: Some(Instant::now()),
        }
    }

    /// Print a live line for an accepted sample, if the live period has
    /// elapsed since the previous one.
    pub fn maybe_live(&mut self, sample: &Sample, src: IpAddr) {
        let now = Instant::now();
        if !due(&mut self.last_live, self.live_period, now) {
            return;
        }
        log::info!(
            "[LIVE] aTA={:.3} aGAS={:.3} valid={} from={}",
            sample.a_ta,
            sample.a_gas,
            u8::from(sample.valid),
            src
        );
    }

    /// Print the periodic accepted/rejected summary, if due.
    pub fn maybe_status(&mut self, counters: &Counters, last_sample: Option<&Sample>) {
        let now = Instant::now();
        if !due(&mut self.last_status, self.status_period, now) {
            return;
        }

        match last_sample {
            None => log::info!(
                "[STATUS] ok={} bad={} (waiting for data)",
                counters.accepted(),
                counters.rejected()
            ),
            Some(sample) => log::info!(
                "[STATUS] ok={} bad={} (last valid={})",
                counters.accepted(),
                counters.rejected(),
                u8::from(sample.valid)
            ),
        }
    }
}

/// Check whether `period` has elapsed since `*last`, updating `*last` to
/// `now` when it has. A `None` last means "never printed" and is always due.
fn due(last: &mut Option<Instant>, period: Duration, now: Instant) -> bool {
    match *last {
        Some(prev) if now.duration_since(prev) < period => false,
        _ => {
            *last = Some(now);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_first_call_fires() {
        let mut last = None;
        assert!(due(&mut last, Duration::from_secs(10), Instant::now()));
        assert!(last.is_some());
    }

    #[test]
    fn test_due_respects_period() {
        let now = Instant::now();
        let mut last = Some(now);
        assert!(!due(&mut last, Duration::from_secs(10), now));
        assert!(due(
            &mut last,
            Duration::from_secs(10),
            now + Duration::from_secs(11)
        ));
    }

    #[test]
    fn test_zero_period_always_due() {
        let now = Instant::now();
        let mut last = Some(now);
        assert!(due(&mut last, Duration::ZERO, now));
    }
}
