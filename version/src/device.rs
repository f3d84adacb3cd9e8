// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Firmware version as reported by the appliance

use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::VersionError;

/// A firmware version made of dotted numeric components, e.g. `v7.0.4`.
///
/// Versions compare component-wise. Missing trailing components count as zero,
/// so `7.0` and `7.0.0` are the same version.
#[derive(Clone, Debug)]
pub struct DeviceVersion(Vec<u32>);

impl DeviceVersion {
    #[must_use]
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self(vec![major, minor, patch])
    }

    #[must_use]
    pub fn components(&self) -> &[u32] {
        &self.0
    }

    #[must_use]
    pub fn major(&self) -> u32 {
        self.component(0)
    }

    fn component(&self, index: usize) -> u32 {
        self.0.get(index).copied().unwrap_or(0)
    }
}

impl FromStr for DeviceVersion {
    type Err = VersionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        // "v7.0.4,build0301" -> "7.0.4"
        let text = input.trim();
        let text = text.split_once(',').map_or(text, |(v, _build)| v).trim();
        let text = text.strip_prefix(['v', 'V']).unwrap_or(text);
        if text.is_empty() {
            return Err(VersionError::malformed(input, "empty version"));
        }

        let components = text
            .split('.')
            .map(|c| {
                if c.is_empty() {
                    return Err(VersionError::malformed(input, "empty component"));
                }
                if !c.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(VersionError::malformed(
                        input,
                        format!("component '{c}' is not numeric"),
                    ));
                }
                c.parse::<u32>().map_err(|e| {
                    VersionError::malformed(input, format!("component '{c}': {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(components))
    }
}

impl TryFrom<&str> for DeviceVersion {
    type Error = VersionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Ord for DeviceVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.0.len().max(other.0.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for DeviceVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for DeviceVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DeviceVersion {}

impl Display for DeviceVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl Serialize for DeviceVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DeviceVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
