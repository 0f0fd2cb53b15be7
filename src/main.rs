// Take a look at the license at the top of the repository in the LICENSE file.

use cpu_monitor::{CounterSource, REPORT_INTERVAL, Scheduler, Unavailable};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    cpu_monitor::logging::init();

    tracing::info!(
        "CPU usage monitor (every {} sec). Press Ctrl+C to exit.",
        REPORT_INTERVAL.as_secs()
    );

    // Whether the counter can be used is only decided once: if it can't be opened now, every
    // report is a failure.
    let source: Box<dyn CounterSource> = match cpu_monitor::open_system_counter() {
        Ok(usage) => Box::new(usage),
        Err(error) => {
            tracing::warn!(%error, "cannot open the CPU counter");
            Box::new(Unavailable::new(error))
        }
    };

    Scheduler::new(source).run().await;
}
