// Take a look at the license at the top of the repository in the LICENSE file.

pub(crate) mod counter;
pub(crate) mod report;
pub(crate) mod source;
