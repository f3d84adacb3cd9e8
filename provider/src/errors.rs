// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

use client::ClientError;
use convert::ConvertError;
use schema::SchemaError;
use thiserror::Error;
use version::VersionError;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Invalid provider configuration: {0}")]
    Config(String),
    #[error("Could not load provider configuration: {0}")]
    ConfigFile(String),
    #[error("Invalid resource configuration: {0}")]
    Schema(#[from] SchemaError),
    #[error("Translation failed: {0}")]
    Convert(#[from] ConvertError),
    #[error("Bad device version: {0}")]
    Version(#[from] VersionError),
    #[error("Appliance request failed: {0}")]
    Client(#[from] ClientError),
    #[error("Unknown resource type '{0}'")]
    UnknownType(String),
    #[error("Missing key for {0}")]
    MissingKey(String),
    #[error("Object {0} is gone after being written")]
    Vanished(String),
}
