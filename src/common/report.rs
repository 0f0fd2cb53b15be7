// Take a look at the license at the top of the repository in the LICENSE file.

use crate::FAILURE_SENTINEL;

use std::fmt;

use tracing::Level;

/// Outcome of one sampling, as shown to the user.
///
/// ```
/// use cpu_monitor::Report;
///
/// assert_eq!(Report::from_sample(17.5).to_string(), "CPU usage: 17.5 %");
/// assert_eq!(Report::from_sample(-1.).to_string(), "Failed to get CPU usage.");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Report {
    /// The CPU usage, in percent.
    Usage(f64),
    /// The sample failed.
    Failed,
}

impl Report {
    /// Builds a report from a value returned by [`CounterSource::sample`].
    ///
    /// [`CounterSource::sample`]: crate::CounterSource::sample
    pub fn from_sample(sample: f64) -> Self {
        // Samples are either in [0, 100] or exactly the sentinel.
        if sample == FAILURE_SENTINEL || !(0.0..=100.0).contains(&sample) {
            Self::Failed
        } else {
            Self::Usage(sample)
        }
    }

    /// Returns the level the report is logged at.
    pub fn level(&self) -> Level {
        match self {
            Self::Usage(_) => Level::INFO,
            Self::Failed => Level::WARN,
        }
    }

    /// Logs the report through `tracing`.
    pub fn emit(&self) {
        match self {
            Self::Usage(_) => tracing::info!("{self}"),
            Self::Failed => tracing::warn!("{self}"),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Two decimals at most, trailing zeros are dropped.
            Self::Usage(usage) => write!(f, "CPU usage: {} %", (usage * 100.).round() / 100.),
            Self::Failed => f.write_str("Failed to get CPU usage."),
        }
    }
}
