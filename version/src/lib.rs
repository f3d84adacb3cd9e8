// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Appliance firmware versions and the constraint tables used to decide which
//! wire shape a field takes on a given device.

#![deny(clippy::all, clippy::pedantic)]

mod constraints;
mod device;
mod errors;

pub use constraints::{CmpOp, VersionConstraints, matches};
pub use device::DeviceVersion;
pub use errors::VersionError;
