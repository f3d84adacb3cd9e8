// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Field descriptors

use std::str::FromStr;

use serde_json::Value;

use crate::errors::SchemaError;
use crate::resource::validate_record;
use crate::toggle::Toggle;

/// A static version constraint table: operator -> versions, e.g. `&[(">=", &["7.0.4"])]`
pub type VersionTable = &'static [(&'static str, &'static [&'static str])];

/// Who may set a field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// must be set by the user
    Required,
    /// may be set by the user; absent means "appliance default"
    Optional,
    /// only ever set from what the appliance reports
    Computed,
    /// may be set by the user, otherwise reported by the appliance
    OptionalComputed,
}

/// The kind of value a field holds, and how it is translated
#[derive(Clone, Copy, Debug)]
pub enum FieldKind {
    Integer { min: Option<i64>, max: Option<i64> },
    String { max_len: Option<usize> },
    Enum(&'static [&'static str]),
    Toggle,
    /// An IP prefix. The appliance reports IPv4 prefixes as `address netmask`.
    Cidr { ipv6: bool },
    /// An integer timer where `-1` means "unbounded"/"disabled"
    SentinelTimer { min: i64, max: i64 },
    /// A `", "`-joined list of names, sent as a list of `{"name": ..}` records on
    /// firmware matching the constraint table and as a plain string otherwise.
    VersionedNames { constraints: VersionTable },
    /// A child table: a list of records with their own fields
    Table(&'static [FieldDescriptor]),
}

/// The static description of a single field of a resource
#[derive(Clone, Copy, Debug)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    pub access: Access,
}

impl FieldDescriptor {
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind, access: Access) -> Self {
        Self {
            name,
            kind,
            access,
        }
    }

    /// The field as a data source reports it: required fields stay the lookup keys,
    /// every other field becomes computed.
    #[must_use]
    pub const fn for_lookup(mut self) -> Self {
        if !matches!(self.access, Access::Required) {
            self.access = Access::Computed;
        }
        self
    }

    /// The key used on the wire: state names use `_`, the appliance uses `-`
    #[must_use]
    pub fn wire_name(&self) -> String {
        self.name.replace('_', "-")
    }

    #[must_use]
    pub fn is_settable(&self) -> bool {
        self.access != Access::Computed
    }

    #[must_use]
    pub fn is_computed(&self) -> bool {
        matches!(self.access, Access::Computed | Access::OptionalComputed)
    }

    #[must_use]
    pub fn is_table(&self) -> bool {
        matches!(self.kind, FieldKind::Table(_))
    }

    /// Validate a user supplied value for this field. `path` names the field in errors.
    /// A `null` value is always accepted here; presence is checked by [`validate_record`].
    ///
    /// # Errors
    /// Returns a [`SchemaError`] naming `path` if the value has the wrong type, is out of bounds,
    /// too long, or not one of the allowed choices.
    pub fn validate(&self, path: &str, value: &Value) -> Result<(), SchemaError> {
        if value.is_null() {
            return Ok(());
        }
        let invalid_type = |expected| SchemaError::InvalidType {
            field: path.to_owned(),
            expected,
        };

        match self.kind {
            FieldKind::Integer { min, max } => {
                let v = value.as_i64().ok_or_else(|| invalid_type("an integer"))?;
                check_range(path, v, min.unwrap_or(i64::MIN), max.unwrap_or(i64::MAX))
            }
            FieldKind::SentinelTimer { min, max } => {
                let v = value.as_i64().ok_or_else(|| invalid_type("an integer"))?;
                if v < 0 {
                    return Ok(());
                }
                check_range(path, v, min, max)
            }
            FieldKind::String { max_len } => {
                let s = value.as_str().ok_or_else(|| invalid_type("a string"))?;
                match max_len {
                    Some(max) if s.chars().count() > max => Err(SchemaError::TooLong {
                        field: path.to_owned(),
                        max,
                    }),
                    _ => Ok(()),
                }
            }
            FieldKind::Enum(choices) => {
                let s = value.as_str().ok_or_else(|| invalid_type("a string"))?;
                if choices.contains(&s) {
                    Ok(())
                } else {
                    Err(SchemaError::InvalidChoice {
                        field: path.to_owned(),
                        value: s.to_owned(),
                        allowed: choices.join(", "),
                    })
                }
            }
            FieldKind::Toggle => {
                let s = value.as_str().ok_or_else(|| invalid_type("a string"))?;
                Toggle::from_str(s)
                    .map(|_| ())
                    .map_err(|_| SchemaError::InvalidChoice {
                        field: path.to_owned(),
                        value: s.to_owned(),
                        allowed: "enable, disable".to_owned(),
                    })
            }
            FieldKind::Cidr { .. } | FieldKind::VersionedNames { .. } => value
                .as_str()
                .map(|_| ())
                .ok_or_else(|| invalid_type("a string")),
            FieldKind::Table(fields) => {
                let records = value.as_array().ok_or_else(|| invalid_type("a list"))?;
                for (n, record) in records.iter().enumerate() {
                    let record = record
                        .as_object()
                        .ok_or_else(|| invalid_type("a list of objects"))?;
                    validate_record(fields, record, &format!("{path}.{n}"))?;
                }
                Ok(())
            }
        }
    }
}

fn check_range(path: &str, value: i64, min: i64, max: i64) -> Result<(), SchemaError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SchemaError::OutOfRange {
            field: path.to_owned(),
            value,
            min,
            max,
        })
    }
}
