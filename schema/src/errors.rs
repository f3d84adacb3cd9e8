// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

use thiserror::Error;

/// Errors found when validating user configuration against a schema.
/// The `field` is the dotted path of the offending value, e.g. `neighbor.0.weight`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("{field}: expected {expected}")]
    InvalidType {
        field: String,
        expected: &'static str,
    },
    #[error("{field}: value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("{field}: length exceeds {max} characters")]
    TooLong { field: String, max: usize },
    #[error("{field}: '{value}' is not one of [{allowed}]")]
    InvalidChoice {
        field: String,
        value: String,
        allowed: String,
    },
    #[error("Unknown field '{0}'")]
    UnknownField(String),
    #[error("Missing required field '{0}'")]
    MissingRequired(String),
    #[error("Field '{0}' is computed and cannot be set")]
    ComputedOnly(String),
}
