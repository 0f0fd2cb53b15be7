// Take a look at the license at the top of the repository in the LICENSE file.

use thiserror::Error;

/// Result type alias for counter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a CPU usage sample could not be produced.
///
/// Callers of [`CounterSource::sample`] only ever see [`FAILURE_SENTINEL`]; this type is what
/// [`CounterSource::try_sample`] returns for those who want to know why.
///
/// [`CounterSource::sample`]: crate::CounterSource::sample
/// [`CounterSource::try_sample`]: crate::CounterSource::try_sample
/// [`FAILURE_SENTINEL`]: crate::FAILURE_SENTINEL
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The aggregate CPU counter API does not exist on this platform.
    #[error("CPU counters are not supported on this platform")]
    Unsupported,

    /// The counter query session could not be opened.
    #[error("failed to open counter query: {code:#x}")]
    OpenQuery {
        /// PDH status code.
        code: u32,
    },

    /// The processor time counter could not be registered against the query.
    #[error("failed to add counter `{path}`: {code:#x}")]
    AddCounter {
        /// Counter path which was rejected.
        path: String,
        /// PDH status code.
        code: u32,
    },

    /// Collecting fresh counter data failed.
    #[error("failed to collect counter data: {code:#x}")]
    Collect {
        /// PDH status code.
        code: u32,
    },

    /// Retrieving the formatted counter value failed.
    #[error("failed to format counter value: {code:#x}")]
    FormatValue {
        /// PDH status code.
        code: u32,
    },

    /// The counter returned a status other than valid or new data.
    #[error("counter reported status {status:#x}")]
    InvalidStatus {
        /// Counter status of the reading.
        status: u32,
    },

    /// The counter returned something which isn't a percentage.
    #[error("counter value {value} is not a percentage")]
    OutOfRange {
        /// Value as reported.
        value: f64,
    },

    /// The source was never opened, `reason` is why.
    #[error("CPU counter unavailable: {reason}")]
    Unavailable {
        /// Error returned when opening the counter.
        reason: Box<Error>,
    },
}
