// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Version constraint tables

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display as StrumDisplay, EnumIter, EnumString};

use crate::device::DeviceVersion;
use crate::errors::VersionError;

/// A comparison operator in a [`VersionConstraints`] table
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumString, StrumDisplay, EnumIter,
)]
pub enum CmpOp {
    #[strum(serialize = ">=")]
    AtLeast,
    #[strum(serialize = "<=")]
    AtMost,
    #[strum(serialize = ">")]
    Above,
    #[strum(serialize = "<")]
    Below,
    #[strum(serialize = "==")]
    Equal,
    #[strum(serialize = "!=")]
    NotEqual,
}

impl CmpOp {
    /// Evaluate `lhs <op> rhs`
    #[must_use]
    pub fn eval(self, lhs: &DeviceVersion, rhs: &DeviceVersion) -> bool {
        match self {
            CmpOp::AtLeast => lhs >= rhs,
            CmpOp::AtMost => lhs <= rhs,
            CmpOp::Above => lhs > rhs,
            CmpOp::Below => lhs < rhs,
            CmpOp::Equal => lhs == rhs,
            CmpOp::NotEqual => lhs != rhs,
        }
    }

    /// Parse an operator string.
    ///
    /// # Errors
    /// Returns [`VersionError::UnknownOperator`] if `op` is not one of the supported operators.
    pub fn parse(op: &str) -> Result<Self, VersionError> {
        CmpOp::from_str(op.trim()).map_err(|_| VersionError::UnknownOperator(op.to_owned()))
    }
}

/// A table mapping comparison operators to the versions they compare against,
/// e.g. `{">=": ["7.0.4"]}`.
///
/// A table is satisfied by a version when, for at least one operator, the version
/// compares favorably against every listed version. An empty table is never satisfied.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Vec<String>>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct VersionConstraints(BTreeMap<CmpOp, Vec<DeviceVersion>>);

impl VersionConstraints {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constraint `<op> version` to the table
    pub fn insert(&mut self, op: CmpOp, version: DeviceVersion) {
        self.0.entry(op).or_default().push(version);
    }

    /// Build a table from static operator/version pairs, as used in field descriptors.
    ///
    /// # Errors
    /// Fails if an operator or a version cannot be parsed.
    pub fn from_table(table: &[(&str, &[&str])]) -> Result<Self, VersionError> {
        let mut constraints = Self::new();
        for (op, versions) in table {
            let op = CmpOp::parse(op)?;
            for version in *versions {
                constraints.insert(op, version.parse()?);
            }
        }
        Ok(constraints)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tell if `current` satisfies this table
    #[must_use]
    pub fn matches(&self, current: &DeviceVersion) -> bool {
        self.0
            .iter()
            .any(|(op, versions)| versions.iter().all(|v| op.eval(current, v)))
    }
}

/// Tell if the version string `current` satisfies `constraints`.
///
/// # Errors
/// A malformed `current` is reported as [`VersionError::Malformed`], never guessed.
pub fn matches(current: &str, constraints: &VersionConstraints) -> Result<bool, VersionError> {
    let current: DeviceVersion = current.parse()?;
    Ok(constraints.matches(&current))
}

impl TryFrom<BTreeMap<String, Vec<String>>> for VersionConstraints {
    type Error = VersionError;

    fn try_from(raw: BTreeMap<String, Vec<String>>) -> Result<Self, Self::Error> {
        let mut constraints = Self::new();
        for (op, versions) in &raw {
            let op = CmpOp::parse(op)?;
            for version in versions {
                constraints.insert(op, version.parse()?);
            }
        }
        Ok(constraints)
    }
}

impl From<VersionConstraints> for BTreeMap<String, Vec<String>> {
    fn from(constraints: VersionConstraints) -> Self {
        constraints
            .0
            .into_iter()
            .map(|(op, versions)| {
                (
                    op.to_string(),
                    versions.iter().map(ToString::to_string).collect(),
                )
            })
            .collect()
    }
}

impl Display for VersionConstraints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "(none)");
        }
        for (n, (op, versions)) in self.0.iter().enumerate() {
            if n > 0 {
                write!(f, " || ")?;
            }
            let clause = versions
                .iter()
                .map(|v| format!("{op} {v}"))
                .collect::<Vec<_>>()
                .join(" && ");
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    fn at_least_704() -> VersionConstraints {
        VersionConstraints::from_table(&[(">=", &["7.0.4"])]).unwrap()
    }

    #[test]
    fn test_operator_strings() {
        for op in CmpOp::iter() {
            assert_eq!(CmpOp::parse(&op.to_string()).unwrap(), op);
        }
        assert_eq!(
            CmpOp::parse("=>"),
            Err(VersionError::UnknownOperator("=>".to_string()))
        );
    }

    #[test]
    fn test_operator_eval() {
        let low = DeviceVersion::new(7, 0, 2);
        let high = DeviceVersion::new(7, 0, 4);
        assert!(CmpOp::AtLeast.eval(&high, &high));
        assert!(CmpOp::AtMost.eval(&low, &high));
        assert!(CmpOp::Above.eval(&high, &low));
        assert!(!CmpOp::Below.eval(&high, &low));
        assert!(CmpOp::Equal.eval(&low, &"v7.0.2".parse().unwrap()));
        assert!(CmpOp::NotEqual.eval(&low, &high));
    }

    #[test]
    fn test_matches_scenarios() {
        let constraints = at_least_704();
        assert!(matches("7.0.4", &constraints).unwrap());
        assert!(matches("v7.2.0", &constraints).unwrap());
        assert!(!matches("7.0.2", &constraints).unwrap());
        assert!(!matches("6.4.15", &constraints).unwrap());
    }

    #[test]
    fn test_matches_malformed_version() {
        let err = matches("7.0.four", &at_least_704()).unwrap_err();
        assert!(matches!(err, VersionError::Malformed { text, .. } if text == "7.0.four"));
    }

    #[test]
    fn test_empty_table_never_matches() {
        let empty = VersionConstraints::new();
        assert!(!empty.matches(&DeviceVersion::new(7, 4, 0)));
        assert_eq!(empty.to_string(), "(none)");
    }

    #[test]
    fn test_any_operator_all_versions() {
        // (>= 7.0.4 && >= 6.4.0) || (<= 6.0.0)
        let constraints =
            VersionConstraints::from_table(&[(">=", &["7.0.4", "6.4.0"]), ("<=", &["6.0.0"])])
                .unwrap();
        assert!(constraints.matches(&DeviceVersion::new(7, 0, 4)));
        assert!(constraints.matches(&DeviceVersion::new(5, 6, 0)));
        assert!(!constraints.matches(&DeviceVersion::new(6, 4, 2)));
        assert_eq!(
            constraints.to_string(),
            ">= v7.0.4 && >= v6.4.0 || <= v6.0.0"
        );
    }

    #[test]
    fn test_serde_table() {
        let constraints: VersionConstraints =
            serde_json::from_str(r#"{">=": ["7.0.4"]}"#).unwrap();
        assert_eq!(constraints, at_least_704());
        assert_eq!(
            serde_json::to_value(&constraints).unwrap(),
            serde_json::json!({">=": ["v7.0.4"]})
        );
        assert!(serde_json::from_str::<VersionConstraints>(r#"{"~>": ["7.0"]}"#).is_err());
        assert!(serde_json::from_str::<VersionConstraints>(r#"{">=": ["7.a"]}"#).is_err());
    }
}
