// Take a look at the license at the top of the repository in the LICENSE file.

//! Log output setup for the `cpu-monitor` binary.

use tracing::Level;

/// Installs the global `tracing` subscriber: human-readable lines on stderr, `INFO` and above.
///
/// Does nothing if a subscriber is already installed.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
