// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Provider configuration: how to reach the appliance.
//!
//! Settings come from a JSON / YAML file or a builder, and may be overridden from the
//! environment.

use std::fmt::{Debug, Display};
use std::fs;
use std::path::Path;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use tracing::debug;
use version::DeviceVersion;

use crate::errors::ProviderError;

pub const ENV_HOSTNAME: &str = "FORTIOS_ACCESS_HOSTNAME";
pub const ENV_TOKEN: &str = "FORTIOS_ACCESS_TOKEN";
pub const ENV_INSECURE: &str = "FORTIOS_INSECURE";
pub const ENV_CABUNDLE: &str = "FORTIOS_CA_CABUNDLE";
pub const ENV_VDOM: &str = "FORTIOS_VDOM";
pub const ENV_DEVICE_VERSION: &str = "FORTIOS_DEVICE_VERSION";

#[derive(Builder, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[builder(setter(into), default)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    /// address of the appliance, with an optional port
    pub hostname: String,
    /// REST API administrator token
    #[builder(setter(into, strip_option))]
    pub token: Option<String>,
    /// skip verification of the appliance certificate
    pub insecure: bool,
    /// CA bundle to verify the appliance certificate with
    #[builder(setter(into, strip_option))]
    pub cabundlefile: Option<String>,
    #[builder(setter(into, strip_option))]
    pub vdom: Option<String>,
    /// firmware version to assume instead of asking the appliance
    #[builder(setter(into, strip_option))]
    pub device_version: Option<String>,
}

impl Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("hostname", &self.hostname)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("insecure", &self.insecure)
            .field("cabundlefile", &self.cabundlefile)
            .field("vdom", &self.vdom)
            .field("device_version", &self.device_version)
            .finish()
    }
}

impl Display for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Provider config")?;
        writeln!(f, "  hostname : {}", self.hostname)?;
        writeln!(f, "  vdom     : {}", self.vdom.as_deref().unwrap_or("root"))?;
        writeln!(f, "  insecure : {}", self.insecure)?;
        writeln!(
            f,
            "  version  : {}",
            self.device_version.as_deref().unwrap_or("(detect)")
        )
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ProviderError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        other => Err(ProviderError::Config(format!(
            "{name} must be a boolean, not '{other}'"
        ))),
    }
}

impl ProviderConfig {
    /// Read a configuration from a JSON or YAML file, picked by extension
    ///
    /// # Errors
    /// Fails if the file cannot be read, has an unsupported extension or cannot be
    /// deserialized.
    pub fn from_file(path: &str) -> Result<Self, ProviderError> {
        let read = || {
            fs::read_to_string(path).map_err(|e| {
                ProviderError::ConfigFile(format!("Failed to read config file ({path}): {e}"))
            })
        };
        let parse_error =
            |e: &dyn Display| ProviderError::ConfigFile(format!("Failed to parse {path}: {e}"));

        match Path::new(path).extension() {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                serde_yaml_ng::from_str(&read()?).map_err(|e| parse_error(&e))
            }
            Some(ext) if ext.eq_ignore_ascii_case("json") => {
                serde_json::from_str(&read()?).map_err(|e| parse_error(&e))
            }
            Some(ext) => Err(ProviderError::ConfigFile(format!(
                "Unsupported file extension {}",
                ext.display()
            ))),
            None => Err(ProviderError::ConfigFile("Missing file extension".to_string())),
        }
    }

    /// Override settings with the `FORTIOS_*` variables found by `lookup`
    ///
    /// # Errors
    /// Fails if a boolean variable cannot be parsed.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ProviderError> {
        if let Some(hostname) = lookup(ENV_HOSTNAME) {
            self.hostname = hostname;
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            self.token = Some(token);
        }
        if let Some(insecure) = lookup(ENV_INSECURE) {
            self.insecure = parse_bool(ENV_INSECURE, &insecure)?;
        }
        if let Some(bundle) = lookup(ENV_CABUNDLE) {
            self.cabundlefile = Some(bundle);
        }
        if let Some(vdom) = lookup(ENV_VDOM) {
            self.vdom = Some(vdom);
        }
        if let Some(version) = lookup(ENV_DEVICE_VERSION) {
            self.device_version = Some(version);
        }
        debug!("{self}");
        Ok(self)
    }

    /// Override settings from the process environment
    ///
    /// # Errors
    /// Fails if a boolean variable cannot be parsed.
    pub fn with_env(self) -> Result<Self, ProviderError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Check the configuration is usable
    ///
    /// # Errors
    /// Fails if no hostname is set or the configured device version is malformed.
    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.hostname.trim().is_empty() {
            return Err(ProviderError::Config(format!(
                "no hostname set (use '{ENV_HOSTNAME}')"
            )));
        }
        if let Some(version) = &self.device_version {
            version.parse::<DeviceVersion>()?;
        }
        Ok(())
    }
}
