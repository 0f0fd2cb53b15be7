// Take a look at the license at the top of the repository in the LICENSE file.

use crate::{Counter, Error, Result};

use std::time::Duration;

/// Value returned by [`CounterSource::sample`] when no percentage could be computed.
///
/// It is outside of the `[0, 100]` range of valid samples so it can never be mistaken for one.
pub const FAILURE_SENTINEL: f64 = -1.0;

/// Time waited between two collections of the rolling counter.
///
/// The counter value is the CPU usage over this window, the shorter it is, the closer the value
/// is to an instantaneous one (and the noisier).
pub const SAMPLE_WINDOW: Duration = Duration::from_millis(100);

/// Something producing the current system-wide CPU usage.
///
/// ```no_run
/// use cpu_monitor::{CounterSource, FAILURE_SENTINEL};
///
/// let mut source = cpu_monitor::open_system_counter().expect("no CPU counter");
/// std::thread::sleep(source.window());
/// let usage = source.sample();
/// if usage == FAILURE_SENTINEL {
///     eprintln!("Failed to get CPU usage.");
/// } else {
///     println!("CPU usage: {usage} %");
/// }
/// ```
pub trait CounterSource {
    /// Collects a new value and returns it as a percentage in `[0, 100]`.
    ///
    /// The value covers the time elapsed since the previous collection, so callers are expected
    /// to wait [`CounterSource::window`] before calling it.
    fn try_sample(&mut self) -> Result<f64>;

    /// Same as [`CounterSource::try_sample`] but returns [`FAILURE_SENTINEL`] on error.
    ///
    /// The error itself is only traced at debug level.
    fn sample(&mut self) -> f64 {
        match self.try_sample() {
            Ok(usage) => usage,
            Err(error) => {
                tracing::debug!(%error, "CPU usage sample failed");
                FAILURE_SENTINEL
            }
        }
    }

    /// How long to wait before calling [`CounterSource::sample`] for the value to be meaningful.
    fn window(&self) -> Duration {
        SAMPLE_WINDOW
    }
}

impl<S: CounterSource + ?Sized> CounterSource for Box<S> {
    fn try_sample(&mut self) -> Result<f64> {
        (**self).try_sample()
    }

    fn sample(&mut self) -> f64 {
        (**self).sample()
    }

    fn window(&self) -> Duration {
        (**self).window()
    }
}

/// Waits for the sampling window of `source` on the runtime timer and then samples it.
///
/// The wait is an `.await`, so other tasks of a single-threaded runtime keep running during it.
pub async fn sample_after_window<S: CounterSource + ?Sized>(source: &mut S) -> f64 {
    tokio::time::sleep(source.window()).await;
    source.sample()
}

/// CPU usage computed from an open [`Counter`].
#[derive(Debug)]
pub struct CpuUsage<C> {
    counter: C,
}

impl<C: Counter> CpuUsage<C> {
    /// Takes ownership of an open counter and performs the first collection on it.
    ///
    /// A rolling counter needs this baseline before it can produce a value. If it fails, the
    /// counter is dropped (and its query closed) and the error is returned.
    pub fn new(mut counter: C) -> Result<Self> {
        counter.collect()?;
        Ok(Self { counter })
    }

    /// Returns the underlying counter.
    pub fn counter(&self) -> &C {
        &self.counter
    }
}

impl<C: Counter> CounterSource for CpuUsage<C> {
    fn try_sample(&mut self) -> Result<f64> {
        self.counter.collect()?;
        let reading = self.counter.value()?;
        if !reading.is_valid() {
            return Err(Error::InvalidStatus {
                status: reading.status,
            });
        }
        // `contains` is false for NaN as well.
        if !(0.0..=100.0).contains(&reading.value) {
            return Err(Error::OutOfRange {
                value: reading.value,
            });
        }
        Ok(reading.value)
    }
}

/// Source used when the system counter could not be opened: every sample fails.
///
/// ```
/// use cpu_monitor::{CounterSource, Error, FAILURE_SENTINEL, Unavailable};
///
/// let mut source = Unavailable::new(Error::Unsupported);
/// assert_eq!(source.sample(), FAILURE_SENTINEL);
/// ```
#[derive(Debug, Clone)]
pub struct Unavailable {
    reason: Error,
}

impl Unavailable {
    /// Creates a source which always fails because of `reason`.
    pub fn new(reason: Error) -> Self {
        Self { reason }
    }

    /// Returns why the counter is unavailable.
    pub fn reason(&self) -> &Error {
        &self.reason
    }
}

impl CounterSource for Unavailable {
    fn try_sample(&mut self) -> Result<f64> {
        Err(Error::Unavailable {
            reason: Box::new(self.reason.clone()),
        })
    }

    // Nothing is collected, no need to wait.
    fn window(&self) -> Duration {
        Duration::ZERO
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{CounterValue, STATUS_NEW_DATA};

    use std::collections::VecDeque;

    // Behaves like a real rolling counter: no value before the second collection.
    #[derive(Debug)]
    struct Fixed {
        value: f64,
        collections: usize,
    }

    impl Counter for Fixed {
        fn collect(&mut self) -> Result<()> {
            self.collections += 1;
            Ok(())
        }

        fn value(&mut self) -> Result<CounterValue> {
            if self.collections < 2 {
                return Ok(CounterValue {
                    status: 0xC0000BC6,
                    value: 0.,
                });
            }
            Ok(CounterValue {
                status: STATUS_NEW_DATA,
                value: self.value,
            })
        }
    }

    #[derive(Debug)]
    struct Scripted {
        collect_results: VecDeque<Result<()>>,
        values: VecDeque<Result<CounterValue>>,
    }

    impl Counter for Scripted {
        fn collect(&mut self) -> Result<()> {
            self.collect_results.pop_front().unwrap_or(Ok(()))
        }

        fn value(&mut self) -> Result<CounterValue> {
            self.values
                .pop_front()
                .unwrap_or(Err(Error::FormatValue { code: 1 }))
        }
    }

    fn scripted(values: Vec<Result<CounterValue>>) -> CpuUsage<Scripted> {
        CpuUsage::new(Scripted {
            collect_results: VecDeque::new(),
            values: values.into(),
        })
        .unwrap()
    }

    #[test]
    fn check_fixed_value_after_baseline() {
        let mut usage = CpuUsage::new(Fixed {
            value: 42.,
            collections: 0,
        })
        .unwrap();
        assert_eq!(usage.counter().collections, 1);
        for _ in 0..5 {
            assert_eq!(usage.sample(), 42.);
        }
        assert_eq!(usage.counter().collections, 6);
    }

    #[test]
    fn check_baseline_failure() {
        let counter = Scripted {
            collect_results: vec![Err(Error::Collect { code: 0x800007D5 })].into(),
            values: VecDeque::new(),
        };
        assert_eq!(
            CpuUsage::new(counter).unwrap_err(),
            Error::Collect { code: 0x800007D5 }
        );
    }

    #[test]
    fn check_collect_failure() {
        let mut usage = CpuUsage::new(Scripted {
            collect_results: vec![Ok(()), Err(Error::Collect { code: 5 }), Ok(())].into(),
            values: vec![Ok(CounterValue::valid(12.))].into(),
        })
        .unwrap();
        assert_eq!(usage.try_sample(), Err(Error::Collect { code: 5 }));
        assert_eq!(usage.sample(), 12.);
    }

    #[test]
    fn check_invalid_readings() {
        let mut usage = scripted(vec![
            Ok(CounterValue {
                status: 2,
                value: 50.,
            }),
            Err(Error::FormatValue { code: 0xC0000BBA }),
            Ok(CounterValue::valid(100.5)),
            Ok(CounterValue::valid(-0.5)),
            Ok(CounterValue::valid(f64::NAN)),
        ]);
        assert_eq!(usage.try_sample(), Err(Error::InvalidStatus { status: 2 }));
        assert_eq!(
            usage.try_sample(),
            Err(Error::FormatValue { code: 0xC0000BBA })
        );
        assert_eq!(
            usage.try_sample(),
            Err(Error::OutOfRange { value: 100.5 })
        );
        assert_eq!(usage.sample(), FAILURE_SENTINEL);
        assert_eq!(usage.sample(), FAILURE_SENTINEL);
    }

    #[test]
    fn check_samples_in_range() {
        let readings = [0., 0.001, 17.5, 99.99, 100.];
        let mut usage = scripted(
            readings
                .iter()
                .map(|v| Ok(CounterValue::valid(*v)))
                .collect(),
        );
        for expected in readings {
            let value = usage.sample();
            assert!((0.0..=100.0).contains(&value));
            assert_eq!(value, expected);
        }
    }

    #[test]
    fn check_unavailable() {
        let mut source = Unavailable::new(Error::Unsupported);
        assert_eq!(source.window(), Duration::ZERO);
        assert_eq!(source.reason(), &Error::Unsupported);
        for _ in 0..10 {
            assert_eq!(source.sample(), FAILURE_SENTINEL);
        }
        assert_eq!(
            source.try_sample(),
            Err(Error::Unavailable {
                reason: Box::new(Error::Unsupported)
            })
        );
    }

    #[test]
    fn check_boxed_source() {
        let mut source: Box<dyn CounterSource> = Box::new(scripted(vec![Ok(
            CounterValue::valid(3.25),
        )]));
        assert_eq!(source.window(), SAMPLE_WINDOW);
        assert_eq!(source.sample(), 3.25);
        assert_eq!(source.sample(), FAILURE_SENTINEL);
    }

    #[tokio::test(start_paused = true)]
    async fn check_sample_waits_window() {
        let mut source = scripted(vec![Ok(CounterValue::valid(8.))]);
        let start = tokio::time::Instant::now();
        assert_eq!(sample_after_window(&mut source).await, 8.);
        assert!(start.elapsed() >= SAMPLE_WINDOW);
    }
}
