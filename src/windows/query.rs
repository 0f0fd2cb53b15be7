// Take a look at the license at the top of the repository in the LICENSE file.

use crate::{Counter, CounterValue, Error, Result};

use std::mem::MaybeUninit;

use windows::Win32::Foundation::ERROR_SUCCESS;
use windows::Win32::System::Performance::{
    PDH_FMT_COUNTERVALUE, PDH_FMT_DOUBLE, PDH_HCOUNTER, PDH_HQUERY, PdhAddEnglishCounterW,
    PdhCloseQuery, PdhCollectQueryData, PdhGetFormattedCounterValue, PdhOpenQueryW,
};
use windows::core::PCWSTR;

/// A PDH query holding a single counter.
#[derive(Debug)]
pub(crate) struct SystemCounterInner {
    query: PDH_HQUERY,
    counter: PDH_HCOUNTER,
}

// The handles are only used through `&mut self` and PDH doesn't tie them to the thread which
// opened them.
unsafe impl Send for SystemCounterInner {}

impl SystemCounterInner {
    pub(crate) fn open(path: &str) -> Result<Self> {
        let mut query = PDH_HQUERY::default();
        let ret = unsafe { PdhOpenQueryW(PCWSTR::null(), 0, &mut query) };
        if ret != ERROR_SUCCESS.0 {
            tracing::debug!("SystemCounterInner::open: PdhOpenQueryW failed: {ret:#x}");
            return Err(Error::OpenQuery { code: ret });
        }

        // English names work whatever the system language is.
        let getter: Vec<u16> = path.encode_utf16().chain(Some(0)).collect();
        let mut counter = PDH_HCOUNTER::default();
        let ret = unsafe {
            PdhAddEnglishCounterW(query, PCWSTR::from_raw(getter.as_ptr()), 0, &mut counter)
        };
        if ret != ERROR_SUCCESS.0 {
            tracing::debug!("SystemCounterInner::open: failed to add counter '{path}': {ret:#x}");
            unsafe {
                PdhCloseQuery(query);
            }
            return Err(Error::AddCounter {
                path: path.to_owned(),
                code: ret,
            });
        }
        Ok(Self { query, counter })
    }
}

impl Counter for SystemCounterInner {
    fn collect(&mut self) -> Result<()> {
        let ret = unsafe { PdhCollectQueryData(self.query) };
        if ret != ERROR_SUCCESS.0 {
            tracing::debug!("failed to refresh CPU data: {ret:#x}");
            return Err(Error::Collect { code: ret });
        }
        Ok(())
    }

    fn value(&mut self) -> Result<CounterValue> {
        let mut display_value = MaybeUninit::<PDH_FMT_COUNTERVALUE>::uninit();
        let ret = unsafe {
            PdhGetFormattedCounterValue(
                self.counter,
                PDH_FMT_DOUBLE,
                None,
                display_value.as_mut_ptr(),
            )
        };
        if ret != ERROR_SUCCESS.0 {
            tracing::debug!("PdhGetFormattedCounterValue failed: {ret:#x}");
            return Err(Error::FormatValue { code: ret });
        }
        let display_value = unsafe { display_value.assume_init() };
        Ok(CounterValue {
            status: display_value.CStatus,
            value: unsafe { display_value.Anonymous.doubleValue },
        })
    }
}

impl Drop for SystemCounterInner {
    fn drop(&mut self) {
        // Closing the query also removes its counter.
        unsafe {
            PdhCloseQuery(self.query);
        }
    }
}
