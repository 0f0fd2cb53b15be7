// Take a look at the license at the top of the repository in the LICENSE file.

#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

cfg_if::cfg_if! {
    if #[cfg(feature = "unknown-ci")] {
        // This is used in CI to check that the unsupported-platform path works on any target.
        mod unknown;
        use crate::unknown as sys;
    } else if #[cfg(windows)] {
        mod windows;
        use crate::windows as sys;
    } else {
        mod unknown;
        use crate::unknown as sys;
    }
}

pub use crate::common::counter::{
    COUNTER_PATH, Counter, CounterValue, STATUS_NEW_DATA, STATUS_VALID_DATA, SystemCounter,
};
pub use crate::common::report::Report;
pub use crate::common::source::{
    CounterSource, CpuUsage, FAILURE_SENTINEL, SAMPLE_WINDOW, Unavailable, sample_after_window,
};
pub use crate::error::{Error, Result};
pub use crate::scheduler::{REPORT_INTERVAL, Scheduler};

pub(crate) use crate::sys::SystemCounterInner;

mod common;
mod error;
pub mod logging;
mod scheduler;

/// Returns `true` if the aggregate CPU counter exists on this platform.
///
/// If it is `false`, [`open_system_counter`] always fails with [`Error::Unsupported`].
pub const IS_SUPPORTED_SYSTEM: bool = sys::IS_SUPPORTED_SYSTEM;

/// Opens the system CPU counter and takes its baseline collection.
///
/// Any failure along the way is returned right away, nothing is retried later.
///
/// ```no_run
/// use cpu_monitor::CounterSource;
///
/// match cpu_monitor::open_system_counter() {
///     Ok(mut usage) => {
///         std::thread::sleep(usage.window());
///         println!("{:.1} %", usage.sample());
///     }
///     Err(e) => eprintln!("no CPU counter: {e}"),
/// }
/// ```
pub fn open_system_counter() -> Result<CpuUsage<SystemCounter>> {
    CpuUsage::new(SystemCounter::open()?)
}

#[cfg(test)]
mod test {
    use crate::*;

    #[test]
    fn check_constants() {
        assert_eq!(COUNTER_PATH, r"\Processor(_Total)\% Processor Time");
        assert_eq!(SAMPLE_WINDOW.as_millis(), 100);
        assert_eq!(REPORT_INTERVAL.as_millis(), 2000);
        assert!(SAMPLE_WINDOW < REPORT_INTERVAL);
        assert_eq!(FAILURE_SENTINEL, -1.0);
    }
}
