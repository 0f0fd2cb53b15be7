// Take a look at the license at the top of the repository in the LICENSE file.

use crate::{Result, SystemCounterInner};

/// English path of the counter sampled by this crate: the percentage of time all the processors
/// were busy, aggregated over the whole system.
///
/// This is the counter the Windows Task Manager displays.
pub const COUNTER_PATH: &str = "\\Processor(_Total)\\% Processor Time";

/// Status of a [`CounterValue`]: the returned data is valid.
pub const STATUS_VALID_DATA: u32 = 0;
/// Status of a [`CounterValue`]: the returned data is valid and different from the last one.
pub const STATUS_NEW_DATA: u32 = 1;

/// One formatted reading of a rolling counter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterValue {
    /// Status reported by the counter alongside the value.
    pub status: u32,
    /// Formatted value, a percentage for [`COUNTER_PATH`].
    pub value: f64,
}

impl CounterValue {
    /// Creates a reading with [`STATUS_VALID_DATA`].
    pub fn valid(value: f64) -> Self {
        Self {
            status: STATUS_VALID_DATA,
            value,
        }
    }

    /// Returns `true` if the status is one of the two success statuses.
    pub fn is_valid(&self) -> bool {
        matches!(self.status, STATUS_VALID_DATA | STATUS_NEW_DATA)
    }
}

/// An open query on a rolling OS counter.
///
/// A rolling counter only produces a value from the difference between two collections, so
/// [`Counter::value`] is meaningful only once [`Counter::collect`] has been called twice.
/// [`CpuUsage::new`] takes care of the first one.
///
/// The real implementation is the platform query returned by
/// [`open_system_counter`]; tests provide their own.
///
/// [`CpuUsage::new`]: crate::CpuUsage::new
/// [`open_system_counter`]: crate::open_system_counter
pub trait Counter {
    /// Collects fresh raw data for the counter.
    fn collect(&mut self) -> Result<()>;

    /// Computes the formatted value from the last two collections.
    fn value(&mut self) -> Result<CounterValue>;
}

impl<C: Counter + ?Sized> Counter for Box<C> {
    fn collect(&mut self) -> Result<()> {
        (**self).collect()
    }

    fn value(&mut self) -> Result<CounterValue> {
        (**self).value()
    }
}

/// The system-wide processor time counter of the OS, see [`COUNTER_PATH`].
///
/// It can only be opened on platforms where [`IS_SUPPORTED_SYSTEM`] is `true`, elsewhere
/// [`SystemCounter::open`] returns [`Error::Unsupported`].
///
/// [`IS_SUPPORTED_SYSTEM`]: crate::IS_SUPPORTED_SYSTEM
/// [`Error::Unsupported`]: crate::Error::Unsupported
#[derive(Debug)]
pub struct SystemCounter {
    inner: SystemCounterInner,
}

impl SystemCounter {
    /// Opens a query session and registers the [`COUNTER_PATH`] counter on it.
    ///
    /// No data is collected yet, [`CpuUsage::new`] does it.
    ///
    /// [`CpuUsage::new`]: crate::CpuUsage::new
    pub fn open() -> Result<Self> {
        SystemCounterInner::open(COUNTER_PATH).map(|inner| Self { inner })
    }
}

impl Counter for SystemCounter {
    fn collect(&mut self) -> Result<()> {
        self.inner.collect()
    }

    fn value(&mut self) -> Result<CounterValue> {
        self.inner.value()
    }
}
