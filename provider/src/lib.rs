// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Declarative resources for the configuration objects of a FortiOS appliance.
//!
//! Each resource is a static schema plus four thin handlers (create, read, update,
//! delete) that translate between state and the appliance API with [`convert`] and
//! delegate the requests to a [`client::Client`].

#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
mod errors;
pub mod logging;
mod provider;
mod resource;
pub mod resources;

pub use config::{ProviderConfig, ProviderConfigBuilder};
pub use errors::ProviderError;
pub use provider::Provider;
pub use resource::{DataSource, FORCE_DESTROY, Resource, State};
