use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::metrics::{self, Metrics};
use crate::progress::{self, Evaluation};

/// Where a test currently is. The start time only exists while `Active`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Idle,
    Active { started_at: Instant },
    Completed { elapsed: Duration, metrics: Metrics },
}

/// Session state for one pass over a sample text.
///
/// Time is always handed in by the caller so the transitions stay
/// deterministic under test.
#[derive(Debug, Clone)]
pub struct Session {
    phase: Phase,
}

impl Default for Session {
    fn default() -> Self {
        Self { phase: Phase::Idle }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Active { .. })
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.phase, Phase::Completed { .. })
    }

    pub fn started_at(&self) -> Option<Instant> {
        match self.phase {
            Phase::Active { started_at } => Some(started_at),
            _ => None,
        }
    }

    pub fn metrics(&self) -> Option<Metrics> {
        match self.phase {
            Phase::Completed { metrics, .. } => Some(metrics),
            _ => None,
        }
    }

    /// Time elapsed as of `now`. Frozen once completed, zero while idle.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.phase {
            Phase::Idle => Duration::ZERO,
            Phase::Active { started_at } => now.saturating_duration_since(started_at),
            Phase::Completed { elapsed, .. } => elapsed,
        }
    }

    /// Feed the latest input. Starts the clock on the first non-empty input and
    /// completes the session on an exact match.
    pub fn on_input(&mut self, sample: &str, input: &str, now: Instant) -> Evaluation {
        let evaluation = progress::evaluate(sample, input);

        if self.is_idle() && !input.is_empty() {
            debug!("session started");
            self.phase = Phase::Active { started_at: now };
        }

        if let Phase::Active { started_at } = self.phase {
            if evaluation.completed {
                let elapsed = now.saturating_duration_since(started_at);
                let metrics = metrics::compute(sample, input, elapsed.as_secs_f64());
                info!(
                    wpm = metrics.wpm,
                    accuracy = metrics.accuracy_percent,
                    elapsed_secs = elapsed.as_secs_f64(),
                    "session completed"
                );
                self.phase = Phase::Completed { elapsed, metrics };
            }
        }

        evaluation
    }

    /// Timer tick. Yields the live elapsed time only while active, so callers
    /// stop refreshing as soon as the session completes or resets.
    pub fn on_tick(&self, now: Instant) -> Option<Duration> {
        match self.phase {
            Phase::Active { started_at } => Some(now.saturating_duration_since(started_at)),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }
}
