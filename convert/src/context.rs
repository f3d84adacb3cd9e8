// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

use schema::VersionTable;
use tracing::debug;
use version::{DeviceVersion, VersionConstraints};

use crate::errors::ConvertError;

/// What a translation needs to know about the appliance it talks to.
/// Built once per provider and passed to every [`crate::flatten`] / [`crate::expand`].
#[derive(Clone, Debug)]
pub struct TranslationContext {
    version: DeviceVersion,
}

impl TranslationContext {
    #[must_use]
    pub fn new(version: DeviceVersion) -> Self {
        Self { version }
    }

    #[must_use]
    pub fn version(&self) -> &DeviceVersion {
        &self.version
    }

    /// Tell if the appliance version satisfies a static constraint table
    ///
    /// # Errors
    /// Fails if the table itself cannot be parsed.
    pub fn version_matches(&self, table: VersionTable) -> Result<bool, ConvertError> {
        let constraints = VersionConstraints::from_table(table)?;
        let verdict = constraints.matches(&self.version);
        debug!(
            "version {} {} constraints {constraints}",
            self.version,
            if verdict { "meets" } else { "does not meet" }
        );
        Ok(verdict)
    }
}
