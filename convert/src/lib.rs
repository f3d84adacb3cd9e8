// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Translation of field values between the shape kept in state and the shape
//! the appliance API expects on the wire.
//!
//! Most fields are copied verbatim; the exceptions are
//!  * sentinel timers, where the wire's "unbounded" marker becomes `-1` in state,
//!  * name lists whose wire shape depends on the firmware version,
//!  * IPv4 prefixes, reported by the appliance as `address netmask`.
//!
//! [`flatten`] (wire -> state) and [`expand`] (state -> wire) walk a resource schema
//! and apply the right adapter to each field.

#![deny(clippy::all, clippy::pedantic)]

pub mod cidr;
mod context;
mod errors;
mod expand;
mod flatten;
pub mod sentinel;
pub mod shape;

pub use context::TranslationContext;
pub use errors::ConvertError;
pub use expand::{ExpandMode, expand};
pub use flatten::flatten;
