// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("Malformed version '{text}': {reason}")]
    Malformed { text: String, reason: String },
    #[error("Unknown version comparison operator '{0}'")]
    UnknownOperator(String),
}

impl VersionError {
    pub(crate) fn malformed(text: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            text: text.to_owned(),
            reason: reason.into(),
        }
    }
}
