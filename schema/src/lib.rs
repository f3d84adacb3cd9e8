// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Static descriptions of the configuration objects exposed by the appliance API.
//!
//! Every resource is described by a [`ResourceSchema`]: a table of [`FieldDescriptor`]s
//! that drives both validation of user configuration and the generic translation
//! routines that move values between state and the wire.

#![deny(clippy::all, clippy::pedantic)]

mod errors;
mod field;
mod resource;
mod toggle;

pub use errors::SchemaError;
pub use field::{Access, FieldDescriptor, FieldKind, VersionTable};
pub use resource::{ResourceSchema, record_key, validate_record};
pub use toggle::Toggle;
