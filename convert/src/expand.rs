// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! State -> wire

use std::str::FromStr;

use schema::{FieldDescriptor, FieldKind, ResourceSchema, Toggle};
use serde_json::{Map, Value};
use tracing::debug;

use crate::cidr::parse_prefix;
use crate::context::TranslationContext;
use crate::errors::{ConvertError, field_path};
use crate::sentinel::normalize_out;
use crate::shape::to_wire;

/// What request body to build
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpandMode {
    /// Send the configured fields. Unset fields are left out so the appliance keeps them.
    Apply,
    /// Send every child table as an empty list, clearing them on the appliance.
    /// Used when a singleton is destroyed with `force_destroy`.
    Clear,
}

/// Build the request body for a resource from its configuration.
///
/// # Errors
/// Fails on the first field that cannot be translated, naming it.
pub fn expand(
    schema: &ResourceSchema,
    config: &Map<String, Value>,
    ctx: &TranslationContext,
    mode: ExpandMode,
) -> Result<Map<String, Value>, ConvertError> {
    if mode == ExpandMode::Clear {
        debug!("building clearing request for {}", schema.type_name);
        return Ok(schema
            .table_fields()
            .filter(|f| f.is_settable())
            .map(|f| (f.wire_name(), Value::Array(vec![])))
            .collect());
    }
    expand_record(schema.fields, config, ctx, "")
}

fn expand_record(
    fields: &[FieldDescriptor],
    config: &Map<String, Value>,
    ctx: &TranslationContext,
    prefix: &str,
) -> Result<Map<String, Value>, ConvertError> {
    let mut body = Map::new();
    for field in fields.iter().filter(|f| f.is_settable()) {
        let Some(value) = config.get(field.name).filter(|v| !v.is_null()) else {
            continue;
        };
        let path = field_path(prefix, field.name);
        match expand_value(field, value, ctx, &path).map_err(|e| e.in_field(&path))? {
            Some(wire) => {
                body.insert(field.wire_name(), wire);
            }
            None => debug!("leaving '{path}' out of the request"),
        }
    }
    Ok(body)
}

fn expand_value(
    field: &FieldDescriptor,
    value: &Value,
    ctx: &TranslationContext,
    path: &str,
) -> Result<Option<Value>, ConvertError> {
    let text = || {
        value
            .as_str()
            .ok_or_else(|| ConvertError::mismatch("a string", value))
    };
    let integer = || {
        value
            .as_i64()
            .ok_or_else(|| ConvertError::mismatch("an integer", value))
    };

    match field.kind {
        FieldKind::Integer { .. } => integer().map(|v| Some(Value::from(v))),
        FieldKind::SentinelTimer { .. } => Ok(normalize_out(integer()?).map(Value::from)),
        FieldKind::String { .. } => text().map(|s| Some(Value::String(s.to_owned()))),
        FieldKind::Enum(choices) => {
            let s = text()?;
            if !choices.contains(&s) {
                return Err(ConvertError::InvalidValue(format!(
                    "'{s}' is not one of [{}]",
                    choices.join(", ")
                )));
            }
            Ok(Some(Value::String(s.to_owned())))
        }
        FieldKind::Toggle => {
            let s = text()?;
            let toggle = Toggle::from_str(s)
                .map_err(|_| ConvertError::InvalidValue(format!("'{s}' is not a toggle")))?;
            Ok(Some(Value::String(toggle.to_string())))
        }
        FieldKind::Cidr { ipv6 } => {
            let s = text()?;
            parse_prefix(s, ipv6)?;
            Ok(Some(Value::String(s.to_owned())))
        }
        FieldKind::VersionedNames { constraints } => {
            let s = text()?;
            let new_shape = ctx.version_matches(constraints)?;
            Ok(Some(to_wire(s, new_shape).into()))
        }
        FieldKind::Table(children) => {
            let records = value
                .as_array()
                .ok_or_else(|| ConvertError::mismatch("a list", value))?;
            let mut wire = Vec::with_capacity(records.len());
            for (n, record) in records.iter().enumerate() {
                let record = record
                    .as_object()
                    .ok_or_else(|| ConvertError::mismatch("a list of objects", record))?;
                let child_path = format!("{path}.{n}");
                wire.push(Value::Object(expand_record(
                    children,
                    record,
                    ctx,
                    &child_path,
                )?));
            }
            Ok(Some(Value::Array(wire)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten;
    use crate::tests::{SCHEMA, ctx_new, ctx_old, obj};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tracing_test::traced_test;
    use version::VersionError;

    #[test]
    fn test_expand_scalars() {
        let config = obj(json!({
            "as": 65001,
            "router_id": "10.0.0.1",
            "keepalive_timer": 30,
            "holdtime_timer": -1,
            "ebgp_multipath": "disable"
        }));
        let body = expand(&SCHEMA, &config, &ctx_new(), ExpandMode::Apply).unwrap();
        assert_eq!(
            Value::Object(body),
            json!({
                "as": 65001,
                "router-id": "10.0.0.1",
                "keepalive-timer": 30,
                "ebgp-multipath": "disable"
            })
        );
    }

    #[test]
    #[traced_test]
    fn test_expand_omits_negative_weight() {
        let config = obj(json!({"neighbor": [{"ip": "10.0.0.2", "weight": -1}]}));
        let body = expand(&SCHEMA, &config, &ctx_new(), ExpandMode::Apply).unwrap();
        assert_eq!(Value::Object(body), json!({"neighbor": [{"ip": "10.0.0.2"}]}));
        assert!(logs_contain("leaving 'neighbor.0.weight' out of the request"));
    }

    #[test]
    fn test_expand_versioned_names() {
        let config = obj(json!({
            "neighbor": [{"ip": "10.0.0.2", "condition_routemap": "rm1, rm2"}]
        }));

        let body = expand(&SCHEMA, &config, &ctx_new(), ExpandMode::Apply).unwrap();
        assert_eq!(
            Value::Object(body),
            json!({"neighbor": [{
                "ip": "10.0.0.2",
                "condition-routemap": [{"name": "rm1"}, {"name": "rm2"}]
            }]})
        );

        let body = expand(&SCHEMA, &config, &ctx_old(), ExpandMode::Apply).unwrap();
        assert_eq!(
            Value::Object(body),
            json!({"neighbor": [{"ip": "10.0.0.2", "condition-routemap": "rm1, rm2"}]})
        );
    }

    #[test]
    fn test_expand_skips_computed_and_null() {
        let config = obj(json!({"as": 1, "status": "enable", "router_id": null}));
        let body = expand(&SCHEMA, &config, &ctx_new(), ExpandMode::Apply).unwrap();
        assert_eq!(Value::Object(body), json!({"as": 1}));
    }

    #[test]
    fn test_expand_prefixes() {
        let config = obj(json!({"network": [{"id": 1, "prefix": "10.0.0.0/24"}]}));
        let body = expand(&SCHEMA, &config, &ctx_new(), ExpandMode::Apply).unwrap();
        assert_eq!(
            Value::Object(body),
            json!({"network": [{"id": 1, "prefix": "10.0.0.0/24"}]})
        );

        let config = obj(json!({"network": [{"id": 1, "prefix": "10.0.0.0/40"}]}));
        let err = expand(&SCHEMA, &config, &ctx_new(), ExpandMode::Apply).unwrap_err();
        assert!(matches!(&err, ConvertError::Field { path, .. } if path == "network.0.prefix"));
        assert!(matches!(err.root(), ConvertError::InvalidValue(_)));
    }

    #[test]
    fn test_expand_invalid_values() {
        let config = obj(json!({"ebgp_multipath": "yes"}));
        let err = expand(&SCHEMA, &config, &ctx_new(), ExpandMode::Apply).unwrap_err();
        assert!(matches!(err.root(), ConvertError::InvalidValue(_)));

        let config = obj(json!({"as": "65001"}));
        let err = expand(&SCHEMA, &config, &ctx_new(), ExpandMode::Apply).unwrap_err();
        assert!(matches!(err.root(), ConvertError::TypeMismatch { .. }));

        let config = obj(json!({"neighbor": {"ip": "10.0.0.2"}}));
        assert!(expand(&SCHEMA, &config, &ctx_new(), ExpandMode::Apply).is_err());
    }

    #[test]
    fn test_expand_broken_constraints() {
        const BROKEN: &[FieldDescriptor] = &[FieldDescriptor::new(
            "condition_routemap",
            FieldKind::VersionedNames {
                constraints: &[(">=", &["seven"])],
            },
            schema::Access::Optional,
        )];
        const BROKEN_SCHEMA: ResourceSchema = ResourceSchema {
            type_name: "broken",
            path: "broken",
            mkey: None,
            fields: BROKEN,
        };
        let config = obj(json!({"condition_routemap": "rm1"}));
        let err = expand(&BROKEN_SCHEMA, &config, &ctx_new(), ExpandMode::Apply).unwrap_err();
        assert!(matches!(
            err.root(),
            ConvertError::Version(VersionError::Malformed { .. })
        ));
    }

    #[test]
    fn test_expand_clear() {
        let config = obj(json!({"as": 65001, "neighbor": [{"ip": "10.0.0.2"}]}));
        let body = expand(&SCHEMA, &config, &ctx_new(), ExpandMode::Clear).unwrap();
        assert_eq!(Value::Object(body), json!({"neighbor": [], "network": []}));
    }

    #[test]
    fn test_expand_flatten_round_trip() {
        let config = obj(json!({
            "as": 65001,
            "keepalive_timer": 60,
            "ebgp_multipath": "enable",
            "network": [{"id": 1, "prefix": "10.0.0.0/24"}],
            "neighbor": [{"ip": "10.0.0.2", "weight": 5, "condition_routemap": "rm1, rm2"}]
        }));
        for ctx in [ctx_new(), ctx_old()] {
            let body = expand(&SCHEMA, &config, &ctx, ExpandMode::Apply).unwrap();
            let state = flatten(&SCHEMA, &body, Some(&config), &ctx).unwrap();
            assert_eq!(state, config);
        }
    }
}
