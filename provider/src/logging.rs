// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Log setup for processes embedding the provider

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Variable holding the log filter, e.g. `FORTIOS_LOG=info,convert=trace`
pub const LOG_ENV: &str = "FORTIOS_LOG";

/// Install a global subscriber logging to stderr, filtered by [`LOG_ENV`] or
/// `default_filter` when unset or invalid. Calling this again is a no-op.
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
    if installed.is_err() {
        debug!("a tracing subscriber is already installed");
    }
}
