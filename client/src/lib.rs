// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! The interface to the appliance REST API used by resource handlers.
//!
//! Transport, authentication and retries belong to implementations of [`Client`];
//! handlers only see objects as JSON maps addressed by API path and key.

#![deny(clippy::all, clippy::pedantic)]

#[cfg(any(test, feature = "testing"))]
pub mod memory;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// A JSON object as exchanged with the appliance
pub type Object = Map<String, Value>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Object not found: {0}")]
    NotFound(String),
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ClientError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}

/// Format the location of an object for messages: `path` or `path/mkey`
#[must_use]
pub fn location(path: &str, mkey: Option<&str>) -> String {
    match mkey {
        Some(mkey) => format!("{path}/{mkey}"),
        None => path.to_owned(),
    }
}

/// Access to the configuration objects of one appliance.
///
/// Objects are addressed by their API `path` (e.g. `router.bgp/neighbor`) and, for
/// table objects, by their key. Singletons (e.g. `router/bgp`) have no key.
#[async_trait]
pub trait Client: Send + Sync {
    /// The firmware version the appliance reports, e.g. `v7.0.4`
    async fn device_version(&self) -> Result<String, ClientError>;

    /// Add an entry to a table. Returns the response, which carries the key of the new
    /// entry as `mkey`.
    async fn create(&self, path: &str, body: &Object) -> Result<Object, ClientError>;

    async fn read(&self, path: &str, mkey: Option<&str>) -> Result<Object, ClientError>;

    async fn update(
        &self,
        path: &str,
        mkey: Option<&str>,
        body: &Object,
    ) -> Result<Object, ClientError>;

    async fn delete(&self, path: &str, mkey: &str) -> Result<(), ClientError>;
}
