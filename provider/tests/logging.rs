// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

// Runs in its own binary: it installs the global subscriber.

use fortios_provider::logging;
use tracing::info;

#[test]
fn test_init_twice() {
    logging::init("debug");
    logging::init("info");
    info!("still logging");
}
