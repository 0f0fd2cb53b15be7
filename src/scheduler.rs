// Take a look at the license at the top of the repository in the LICENSE file.

use crate::common::source::sample_after_window;
use crate::{CounterSource, Report};

use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};

/// Time between two reports.
pub const REPORT_INTERVAL: Duration = Duration::from_millis(2000);

/// Drives a [`CounterSource`]: one report right away, then one every [`REPORT_INTERVAL`].
///
/// ```no_run
/// use cpu_monitor::{Error, Scheduler, Unavailable};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     Scheduler::new(Unavailable::new(Error::Unsupported)).run().await;
/// }
/// ```
#[derive(Debug)]
pub struct Scheduler<S> {
    source: S,
}

impl<S: CounterSource> Scheduler<S> {
    /// Creates a scheduler owning `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns the sampled source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Samples the source once and logs the outcome.
    pub async fn tick(&mut self) -> Report {
        let report = Report::from_sample(sample_after_window(&mut self.source).await);
        report.emit();
        report
    }

    /// Reports forever. It never returns, the process is expected to be interrupted.
    ///
    /// It needs to be run inside a tokio runtime with the timer enabled.
    pub async fn run(mut self) {
        // The first tick of an interval completes immediately.
        let mut interval = time::interval(REPORT_INTERVAL);
        // If the process was suspended, don't report all the missed ticks at once.
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            self.tick().await;
        }
    }
}
