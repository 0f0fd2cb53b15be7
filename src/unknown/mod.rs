// Take a look at the license at the top of the repository in the LICENSE file.

mod query;

pub(crate) use self::query::SystemCounterInner;

pub(crate) const IS_SUPPORTED_SYSTEM: bool = false;
