// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

use serde_json::Value;
use thiserror::Error;
use version::VersionError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    #[error("Version constraint evaluation failed: {0}")]
    Version(#[from] VersionError),
    #[error("Field '{path}': {source}")]
    Field {
        path: String,
        source: Box<ConvertError>,
    },
}

impl ConvertError {
    pub(crate) fn mismatch(expected: &'static str, found: &Value) -> Self {
        let found = match found {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "a list",
            Value::Object(_) => "an object",
        };
        Self::TypeMismatch {
            expected,
            found: found.to_owned(),
        }
    }

    /// Attach the path of the field being translated. Errors that already name a
    /// field are left as they are.
    #[must_use]
    pub(crate) fn in_field(self, path: &str) -> Self {
        match self {
            ConvertError::Field { .. } => self,
            other => ConvertError::Field {
                path: path.to_owned(),
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, without field context
    #[must_use]
    pub fn root(&self) -> &ConvertError {
        match self {
            ConvertError::Field { source, .. } => source.root(),
            other => other,
        }
    }
}

pub(crate) fn field_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}.{name}")
    }
}
