// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Sentinel values of "unbounded" or "disabled" integer fields.
//!
//! The appliance reports such fields as `4294967295` (or as a negative number);
//! state keeps them as `-1`. A negative value set by the user is never sent, which
//! leaves the appliance default in place.

use serde_json::Value;

use crate::errors::ConvertError;

/// The wire marker of an unbounded value
pub const WIRE_UNBOUNDED: u32 = u32::MAX;

/// The state marker of an unbounded value
pub const STATE_UNBOUNDED: i64 = -1;

// 2^63, the first float above `i64::MAX`
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Map a wire value to its state value
#[must_use]
#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
pub fn normalize_in(wire: f64) -> i64 {
    if wire < 0.0 || wire == f64::from(WIRE_UNBOUNDED) {
        return STATE_UNBOUNDED;
    }
    wire as i64
}

/// Map a user value to the value to send. `None` means the field must be left out
/// of the request.
#[must_use]
pub fn normalize_out(user: i64) -> Option<i64> {
    (user >= 0).then_some(user)
}

/// Read a wire number for [`normalize_in`]. The appliance sends numbers, but some
/// firmware sends them quoted.
///
/// # Errors
/// Fails if the value is neither a number nor a numeric string, or is not finite.
pub fn wire_number(value: &Value) -> Result<f64, ConvertError> {
    let number = match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| {
            ConvertError::InvalidValue(format!("number {n} is not representable"))
        })?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| ConvertError::InvalidValue(format!("'{s}' is not a number: {e}")))?,
        other => return Err(ConvertError::mismatch("a number", other)),
    };
    if !number.is_finite() {
        return Err(ConvertError::InvalidValue(format!(
            "{value} is not a finite number"
        )));
    }
    Ok(number)
}

/// Check a finite wire number fits the integers kept in state
///
/// # Errors
/// Fails if `number` is not finite or lies outside the `i64` range.
pub fn in_state_range(number: f64) -> Result<f64, ConvertError> {
    if number.is_finite() && (-I64_BOUND..I64_BOUND).contains(&number) {
        Ok(number)
    } else {
        Err(ConvertError::InvalidValue(format!(
            "{number} is out of range"
        )))
    }
}

/// Read the state value of a sentinel field from the wire
///
/// # Errors
/// Fails if the wire value is not a finite number, or is too large to be kept in state.
pub fn sentinel_in(value: &Value) -> Result<i64, ConvertError> {
    let wire = wire_number(value)?;
    if wire >= 0.0 {
        in_state_range(wire)?;
    }
    Ok(normalize_in(wire))
}
