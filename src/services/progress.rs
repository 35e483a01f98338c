//! Progress Indicator
//!
//! Cosmetic stage labels shown while a generation is in flight. A background
//! task advances one stage per interval, holds the last stage, and stops as
//! soon as its handle is cancelled or dropped.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Stage labels, in display order
pub const PROGRESS_STAGES: [&str; 4] = [
    "Analyzing Intent...",
    "Applying Frameworks...",
    "Optimizing Tone...",
    "Finalizing Output...",
];

/// Default delay between stages
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(800);

/// Stage timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressIndicator {
    interval: Duration,
}

impl Default for ProgressIndicator {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRESS_INTERVAL)
    }
}

impl ProgressIndicator {
    pub fn new(interval: Duration) -> Self {
        // A zero interval would divide by zero in stage_at
        Self {
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Stage index reached after `elapsed`, saturating at the last stage.
    pub fn stage_at(&self, elapsed: Duration) -> usize {
        let step = elapsed.as_nanos() / self.interval.as_nanos();
        (step as usize).min(PROGRESS_STAGES.len() - 1)
    }

    /// Spawn the stage ticker.
    ///
    /// Outside a tokio runtime the handle stays on the first stage.
    pub fn start(&self) -> ProgressHandle {
        let (tx, rx) = watch::channel(0usize);
        let token = CancellationToken::new();

        if tokio::runtime::Handle::try_current().is_err() {
            tracing::debug!("no runtime, progress stays on first stage");
            return ProgressHandle { rx, token };
        }

        let indicator = *self;
        let task_token = token.clone();
        tokio::spawn(async move {
            let started = Instant::now();
            let last = PROGRESS_STAGES.len() - 1;
            let mut stage = 0usize;

            while stage < last {
                let deadline = started + indicator.interval * (stage as u32 + 1);
                tokio::select! {
                    _ = task_token.cancelled() => return,
                    _ = tokio::time::sleep_until(deadline) => {}
                }
                stage = indicator.stage_at(started.elapsed());
                if tx.send(stage).is_err() {
                    return;
                }
            }
        });

        ProgressHandle { rx, token }
    }
}

/// Live view of a running progress ticker
#[derive(Debug)]
pub struct ProgressHandle {
    rx: watch::Receiver<usize>,
    token: CancellationToken,
}

impl ProgressHandle {
    /// Current stage index
    pub fn stage(&self) -> usize {
        *self.rx.borrow()
    }

    /// Current stage label
    pub fn label(&self) -> &'static str {
        PROGRESS_STAGES[self.stage()]
    }

    /// Receiver for stage changes
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.rx.clone()
    }

    /// Stop the ticker; no further stage changes are published.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for ProgressHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
