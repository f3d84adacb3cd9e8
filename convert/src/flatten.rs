// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Wire -> state

use std::str::FromStr;

use schema::{FieldDescriptor, FieldKind, ResourceSchema, Toggle, record_key};
use serde_json::{Map, Value};
use tracing::trace;

use crate::cidr::normalize_prefix;
use crate::context::TranslationContext;
use crate::errors::{ConvertError, field_path};
use crate::sentinel::{in_state_range, sentinel_in, wire_number};
use crate::shape::to_state;

/// Build the state of a resource from an object reported by the appliance.
///
/// Only fields known to the schema are kept; wire fields absent or `null` are left out of
/// the state. `prior` is the previous state (or the configuration), used to keep the
/// user's spelling of prefix fields.
///
/// # Errors
/// Fails on the first field that cannot be translated, naming it.
pub fn flatten(
    schema: &ResourceSchema,
    wire: &Map<String, Value>,
    prior: Option<&Map<String, Value>>,
    ctx: &TranslationContext,
) -> Result<Map<String, Value>, ConvertError> {
    flatten_record(schema.fields, wire, prior, ctx, "")
}

fn flatten_record(
    fields: &[FieldDescriptor],
    wire: &Map<String, Value>,
    prior: Option<&Map<String, Value>>,
    ctx: &TranslationContext,
    prefix: &str,
) -> Result<Map<String, Value>, ConvertError> {
    let mut state = Map::new();
    for field in fields {
        let Some(value) = wire.get(&field.wire_name()).filter(|v| !v.is_null()) else {
            continue;
        };
        let path = field_path(prefix, field.name);
        let prior = prior.and_then(|p| p.get(field.name));
        let flat = flatten_value(field, value, prior, ctx, &path).map_err(|e| e.in_field(&path))?;
        state.insert(field.name.to_owned(), flat);
    }
    trace!(
        "flattened {} of {} wire fields at '{prefix}' (device {})",
        state.len(),
        wire.len(),
        ctx.version()
    );
    Ok(state)
}

fn flatten_value(
    field: &FieldDescriptor,
    value: &Value,
    prior: Option<&Value>,
    ctx: &TranslationContext,
    path: &str,
) -> Result<Value, ConvertError> {
    match field.kind {
        FieldKind::Integer { .. } => wire_integer(value).map(Value::from),
        FieldKind::SentinelTimer { .. } => sentinel_in(value).map(Value::from),
        FieldKind::String { .. } | FieldKind::Enum(_) => wire_string(value).map(Value::String),
        FieldKind::Toggle => {
            let text = wire_str(value)?;
            let toggle = Toggle::from_str(text)
                .map_err(|_| ConvertError::InvalidValue(format!("'{text}' is not a toggle")))?;
            Ok(Value::String(toggle.to_string()))
        }
        FieldKind::Cidr { ipv6 } => {
            let text = wire_str(value)?;
            normalize_prefix(prior.and_then(Value::as_str), text, ipv6).map(Value::String)
        }
        FieldKind::VersionedNames { .. } => to_state(value).map(Value::String),
        FieldKind::Table(children) => {
            let records = value
                .as_array()
                .ok_or_else(|| ConvertError::mismatch("a list", value))?;
            let prior_records = prior.and_then(Value::as_array);
            let key = record_key(children);
            let mut flat = Vec::with_capacity(records.len());
            for (n, record) in records.iter().enumerate() {
                let record = record
                    .as_object()
                    .ok_or_else(|| ConvertError::mismatch("a list of objects", record))?;
                let prior_record =
                    prior_records.and_then(|p| matching_prior(p, key, record, n));
                let child_path = format!("{path}.{n}");
                flat.push(Value::Object(flatten_record(
                    children,
                    record,
                    prior_record,
                    ctx,
                    &child_path,
                )?));
            }
            Ok(Value::Array(flat))
        }
    }
}

// the appliance may list entries in another order than the configuration: match them
// by key, by position only when the table has no key or the entry lacks it
fn matching_prior<'a>(
    prior: &'a [Value],
    key: Option<&FieldDescriptor>,
    record: &Map<String, Value>,
    n: usize,
) -> Option<&'a Map<String, Value>> {
    let Some((key, wanted)) = key.and_then(|k| Some((k, key_text(record.get(&k.wire_name())?)?)))
    else {
        return prior.get(n).and_then(Value::as_object);
    };
    prior
        .iter()
        .filter_map(Value::as_object)
        .find(|p| p.get(key.name).and_then(key_text).as_deref() == Some(wanted.as_str()))
}

fn key_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn wire_str(value: &Value) -> Result<&str, ConvertError> {
    value
        .as_str()
        .ok_or_else(|| ConvertError::mismatch("a string", value))
}

// the appliance reports some string fields (e.g. descriptions made of digits) as numbers
fn wire_string(value: &Value) -> Result<String, ConvertError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(ConvertError::mismatch("a string", other)),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn wire_integer(value: &Value) -> Result<i64, ConvertError> {
    if let Some(v) = value.as_i64() {
        return Ok(v);
    }
    let number = wire_number(value).and_then(in_state_range)?;
    if number.fract() != 0.0 {
        return Err(ConvertError::InvalidValue(format!(
            "{number} is not an integer"
        )));
    }
    Ok(number as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{SCHEMA, ctx_new, ctx_old, obj};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_flatten_scalars() {
        let wire = obj(json!({
            "as": 65001,
            "router-id": "10.0.0.1",
            "keepalive-timer": 4_294_967_295_u32,
            "holdtime-timer": 180,
            "ebgp-multipath": "enable",
            "q_origin_key": "bgp",
            "unknown-field": 1
        }));
        let state = flatten(&SCHEMA, &wire, None, &ctx_new()).unwrap();
        assert_eq!(
            Value::Object(state),
            json!({
                "as": 65001,
                "router_id": "10.0.0.1",
                "keepalive_timer": -1,
                "holdtime_timer": 180,
                "ebgp_multipath": "enable"
            })
        );
    }

    #[test]
    fn test_flatten_numeric_strings() {
        let wire = obj(json!({"as": "65001", "keepalive-timer": "-1", "router-id": 42}));
        let state = flatten(&SCHEMA, &wire, None, &ctx_old()).unwrap();
        assert_eq!(
            Value::Object(state),
            json!({"as": 65001, "keepalive_timer": -1, "router_id": "42"})
        );
    }

    #[test]
    fn test_flatten_tables() {
        let wire = obj(json!({
            "network": [
                {"id": 1, "prefix": "10.0.0.0 255.255.255.0"},
                {"id": 2, "prefix": "10.1.0.0 255.255.0.0"}
            ],
            "neighbor": [
                {"ip": "10.0.0.2", "weight": 4_294_967_295_u32,
                 "condition-routemap": [{"name": "rm1"}, {"name": "rm2"}]},
                {"ip": "10.0.0.3", "weight": 10, "condition-routemap": "rm3"}
            ]
        }));
        let prior = obj(json!({
            "network": [{"id": 1, "prefix": "10.0.0.0/24"}]
        }));
        let state = flatten(&SCHEMA, &wire, Some(&prior), &ctx_new()).unwrap();
        assert_eq!(
            Value::Object(state),
            json!({
                "network": [
                    {"id": 1, "prefix": "10.0.0.0/24"},
                    {"id": 2, "prefix": "10.1.0.0/16"}
                ],
                "neighbor": [
                    {"ip": "10.0.0.2", "weight": -1, "condition_routemap": "rm1, rm2"},
                    {"ip": "10.0.0.3", "weight": 10, "condition_routemap": "rm3"}
                ]
            })
        );
    }

    #[test]
    fn test_flatten_names_error_path() {
        let wire = obj(json!({
            "neighbor": [{"ip": "10.0.0.2"}, {"ip": "10.0.0.3", "condition-routemap": 7}]
        }));
        let err = flatten(&SCHEMA, &wire, None, &ctx_new()).unwrap_err();
        let ConvertError::Field { path, source } = &err else {
            panic!("unexpected error {err}");
        };
        assert_eq!(path, "neighbor.1.condition_routemap");
        assert!(matches!(**source, ConvertError::TypeMismatch { .. }));
    }

    #[test]
    fn test_flatten_bad_toggle() {
        let wire = obj(json!({"ebgp-multipath": "maybe"}));
        let err = flatten(&SCHEMA, &wire, None, &ctx_new()).unwrap_err();
        assert!(matches!(err.root(), ConvertError::InvalidValue(_)));
        assert!(err.to_string().starts_with("Field 'ebgp_multipath'"));
    }

    #[test]
    fn test_flatten_reordered_entries_keep_spelling() {
        let prior = obj(json!({
            "network": [
                {"id": 2, "prefix": "10.1.0.0 255.255.0.0"},
                {"id": 1, "prefix": "10.0.0.0 255.255.255.0"}
            ]
        }));
        let wire = obj(json!({
            "network": [
                {"id": 1, "prefix": "10.0.0.0 255.255.255.0"},
                {"id": 2, "prefix": "10.1.0.0 255.255.0.0"},
                {"id": 3, "prefix": "10.2.0.0 255.255.0.0"}
            ]
        }));
        let state = flatten(&SCHEMA, &wire, Some(&prior), &ctx_new()).unwrap();
        assert_eq!(
            state["network"],
            json!([
                {"id": 1, "prefix": "10.0.0.0 255.255.255.0"},
                {"id": 2, "prefix": "10.1.0.0 255.255.0.0"},
                {"id": 3, "prefix": "10.2.0.0/16"}
            ])
        );
    }

    #[test]
    fn test_flatten_rejects_unrepresentable_numbers() {
        for wire in [
            json!({"keepalive-timer": "NaN"}),
            json!({"holdtime-timer": "inf"}),
            json!({"keepalive-timer": u64::MAX}),
            json!({"as": u64::MAX}),
            json!({"as": "1e300"}),
        ] {
            let err = flatten(&SCHEMA, &obj(wire.clone()), None, &ctx_new()).unwrap_err();
            assert!(
                matches!(err.root(), ConvertError::InvalidValue(_)),
                "{wire} gave {err}"
            );
        }
    }

    #[test]
    fn test_flatten_null_and_fractional() {
        let wire = obj(json!({"as": null, "router-id": null}));
        assert!(flatten(&SCHEMA, &wire, None, &ctx_new()).unwrap().is_empty());

        let wire = obj(json!({"as": 1.5}));
        assert!(flatten(&SCHEMA, &wire, None, &ctx_new()).is_err());
    }
}
