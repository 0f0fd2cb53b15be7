// Take a look at the license at the top of the repository in the LICENSE file.

use crate::{Counter, CounterValue, Error, Result};

/// There is no system counter to open here, so this can never be built.
#[derive(Debug)]
pub(crate) enum SystemCounterInner {}

impl SystemCounterInner {
    pub(crate) fn open(path: &str) -> Result<Self> {
        tracing::debug!(path, "no CPU counter on this platform");
        Err(Error::Unsupported)
    }
}

impl Counter for SystemCounterInner {
    fn collect(&mut self) -> Result<()> {
        match *self {}
    }

    fn value(&mut self) -> Result<CounterValue> {
        match *self {}
    }
}
