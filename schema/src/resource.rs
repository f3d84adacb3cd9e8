// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Resource schemas

use serde_json::{Map, Value};

use crate::errors::SchemaError;
use crate::field::{Access, FieldDescriptor};

/// The static description of one appliance configuration object
#[derive(Clone, Copy, Debug)]
pub struct ResourceSchema {
    /// name of the resource, e.g. `fortios_router_bgp`
    pub type_name: &'static str,
    /// API path of the object, e.g. `router/bgp`
    pub path: &'static str,
    /// the field identifying an entry of a table object. `None` for singletons.
    pub mkey: Option<&'static str>,
    pub fields: &'static [FieldDescriptor],
}

impl ResourceSchema {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Singletons exist exactly once on the appliance: they can be updated but not
    /// created or deleted.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.mkey.is_none()
    }

    pub fn table_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.is_table())
    }

    /// Validate a user configuration object against this schema.
    ///
    /// # Errors
    /// Returns the first [`SchemaError`] found.
    pub fn validate_config(&self, config: &Map<String, Value>) -> Result<(), SchemaError> {
        validate_record(self.fields, config, "")
    }
}

/// The field identifying the records of a child table: its first required field.
/// Tables without one are only identified by position.
#[must_use]
pub fn record_key(fields: &[FieldDescriptor]) -> Option<&FieldDescriptor> {
    fields.iter().find(|f| f.access == Access::Required)
}

/// Validate a record against a list of fields. Field paths in errors are prefixed with `prefix`.
///
/// # Errors
/// Fails on unknown fields, missing required fields, values assigned to computed-only fields,
/// and any value rejected by [`FieldDescriptor::validate`].
pub fn validate_record(
    fields: &[FieldDescriptor],
    record: &Map<String, Value>,
    prefix: &str,
) -> Result<(), SchemaError> {
    let path = |name: &str| {
        if prefix.is_empty() {
            name.to_owned()
        } else {
            format!("{prefix}.{name}")
        }
    };

    if let Some(unknown) = record
        .keys()
        .find(|k| !fields.iter().any(|f| f.name == k.as_str()))
    {
        return Err(SchemaError::UnknownField(path(unknown)));
    }

    for field in fields {
        let value = record.get(field.name).unwrap_or(&Value::Null);
        match field.access {
            Access::Required if value.is_null() => {
                return Err(SchemaError::MissingRequired(path(field.name)));
            }
            Access::Computed if !value.is_null() => {
                return Err(SchemaError::ComputedOnly(path(field.name)));
            }
            _ => {}
        }
        field.validate(&path(field.name), value)?;
    }
    Ok(())
}
