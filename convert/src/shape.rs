// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Name lists whose wire shape depends on the firmware version.
//!
//! Older firmware takes a single string of `", "`-joined names. Newer firmware takes
//! a list of `{"name": ..}` records. State always keeps the joined string.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ConvertError;

/// Separator between names in the joined representation
pub const SEPARATOR: &str = ", ";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    pub name: String,
}

impl NameRecord {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
        }
    }
}

/// The wire representation of a name list
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Shape {
    Scalar(String),
    Records(Vec<NameRecord>),
}

impl From<Shape> for Value {
    fn from(shape: Shape) -> Self {
        match shape {
            Shape::Scalar(s) => Value::String(s),
            Shape::Records(records) => Value::Array(
                records
                    .into_iter()
                    .map(|r| {
                        let mut obj = serde_json::Map::new();
                        obj.insert("name".to_owned(), Value::String(r.name));
                        Value::Object(obj)
                    })
                    .collect(),
            ),
        }
    }
}

/// Build the wire shape of a joined name list. With `version_matches` unset the value
/// goes out unchanged; otherwise every non-empty name becomes a record.
#[must_use]
pub fn to_wire(value: &str, version_matches: bool) -> Shape {
    if !version_matches {
        return Shape::Scalar(value.to_owned());
    }
    Shape::Records(
        value
            .split(SEPARATOR)
            .filter(|token| !token.is_empty())
            .map(NameRecord::new)
            .collect(),
    )
}

/// Turn a wire name list, in either shape, into the joined string kept in state.
/// `null` is an empty list.
///
/// # Errors
/// Returns [`ConvertError::TypeMismatch`] if the value is neither a string nor a list of
/// records carrying a string `name`.
pub fn to_state(wire: &Value) -> Result<String, ConvertError> {
    match wire {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        Value::Array(records) => {
            let names = records
                .iter()
                .map(|record| {
                    record
                        .get("name")
                        .and_then(Value::as_str)
                        .ok_or_else(|| {
                            ConvertError::mismatch("a record with a string 'name'", record)
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(names.join(SEPARATOR))
        }
        other => Err(ConvertError::mismatch(
            "a string or a list of name records",
            other,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_to_wire_new_shape() {
        let shape = to_wire("rm1, rm2", true);
        assert_eq!(
            shape,
            Shape::Records(vec![NameRecord::new("rm1"), NameRecord::new("rm2")])
        );
        assert_eq!(
            Value::from(shape.clone()),
            json!([{"name": "rm1"}, {"name": "rm2"}])
        );
        assert_eq!(
            serde_json::to_value(&shape).unwrap(),
            json!([{"name": "rm1"}, {"name": "rm2"}])
        );
    }

    #[test]
    fn test_to_wire_old_shape() {
        assert_eq!(to_wire("rm1, rm2", false), Shape::Scalar("rm1, rm2".to_string()));
        assert_eq!(Value::from(to_wire("rm1, rm2", false)), json!("rm1, rm2"));
    }

    #[test]
    fn test_to_wire_empty() {
        assert_eq!(to_wire("", true), Shape::Records(vec![]));
        assert_eq!(Value::from(to_wire("", true)), json!([]));
        assert_eq!(to_wire("", false), Shape::Scalar(String::new()));
    }

    #[test]
    fn test_to_state() {
        assert_eq!(
            to_state(&json!([{"name": "rm1"}, {"name": "rm2"}])).unwrap(),
            "rm1, rm2"
        );
        assert_eq!(
            to_state(&json!([{"name": "rm1", "q_origin_key": "rm1"}])).unwrap(),
            "rm1"
        );
        assert_eq!(to_state(&json!("rm1, rm2")).unwrap(), "rm1, rm2");
        assert_eq!(to_state(&json!([])).unwrap(), "");
        assert_eq!(to_state(&Value::Null).unwrap(), "");
    }

    #[test]
    fn test_to_state_mismatch() {
        assert_eq!(
            to_state(&json!(42)),
            Err(ConvertError::TypeMismatch {
                expected: "a string or a list of name records",
                found: "a number".to_string()
            })
        );
        assert!(matches!(
            to_state(&json!([{"id": 1}])),
            Err(ConvertError::TypeMismatch { .. })
        ));
        assert!(matches!(
            to_state(&json!(["rm1"])),
            Err(ConvertError::TypeMismatch { .. })
        ));
        assert!(matches!(
            to_state(&json!({"name": "rm1"})),
            Err(ConvertError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_round_trip() {
        bolero::check!().with_type::<String>().for_each(|s| {
            // names must be non-empty for the joined form to be reproduced
            if s.split(SEPARATOR).any(str::is_empty) {
                return;
            }
            let wire = Value::from(to_wire(s, true));
            assert_eq!(&to_state(&wire).unwrap(), s);
        });
    }

    #[test]
    fn test_old_shape_identity() {
        bolero::check!().with_type::<String>().for_each(|s| {
            assert_eq!(to_wire(s, false), Shape::Scalar(s.clone()));
            assert_eq!(&to_state(&Value::from(to_wire(s, false))).unwrap(), s);
        });
    }
}
