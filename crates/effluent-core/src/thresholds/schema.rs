use crate::model::ParameterKind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A threshold table as written in a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdFileDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub version: String,
    pub rules: Vec<RuleDef>,
}

/// A single parameter rule within a threshold file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleDef {
    pub parameter: ParameterKind,
    #[serde(flatten)]
    pub rule: Rule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Safety rule for one parameter. Both shapes use inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    Range { min: Decimal, max: Decimal },
    UpperBound { max: Decimal },
}

impl Rule {
    /// Whether `value` satisfies the rule.
    ///
    /// Upper-bound rules have no lower limit, so negative values pass.
    pub fn admits(&self, value: Decimal) -> bool {
        match *self {
            Rule::Range { min, max } => min <= value && value <= max,
            Rule::UpperBound { max } => value <= max,
        }
    }

    pub fn min(&self) -> Option<Decimal> {
        match *self {
            Rule::Range { min, .. } => Some(min),
            Rule::UpperBound { .. } => None,
        }
    }

    pub fn max(&self) -> Decimal {
        match *self {
            Rule::Range { max, .. } | Rule::UpperBound { max } => max,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Range { min, max } => write!(f, "{min} - {max}"),
            Rule::UpperBound { max } => write!(f, "≤ {max}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_range_is_inclusive() {
        let rule = Rule::Range {
            min: dec!(6.5),
            max: dec!(8.5),
        };
        assert!(rule.admits(dec!(6.5)));
        assert!(rule.admits(dec!(8.5)));
        assert!(!rule.admits(dec!(6.49)));
        assert!(!rule.admits(dec!(8.51)));
    }

    #[test]
    fn test_upper_bound_has_no_floor() {
        let rule = Rule::UpperBound { max: dec!(5.0) };
        assert!(rule.admits(dec!(5.0)));
        assert!(rule.admits(dec!(-3)));
        assert!(!rule.admits(dec!(5.0001)));
    }

    #[test]
    fn test_display() {
        let range = Rule::Range {
            min: dec!(6.5),
            max: dec!(8.5),
        };
        assert_eq!(range.to_string(), "6.5 - 8.5");
        assert_eq!(Rule::UpperBound { max: dec!(5.0) }.to_string(), "≤ 5.0");
    }

    #[test]
    fn test_rule_def_json_shape() {
        let json = r#"{ "parameter": "ph", "rule": "range", "min": "6.0", "max": "9.0" }"#;
        let def: RuleDef = serde_json::from_str(json).unwrap();
        assert_eq!(def.parameter, ParameterKind::Ph);
        assert_eq!(
            def.rule,
            Rule::Range {
                min: dec!(6.0),
                max: dec!(9.0)
            }
        );

        let json = r#"{ "parameter": "cod", "rule": "upper_bound", "max": "125" }"#;
        let def: RuleDef = serde_json::from_str(json).unwrap();
        assert_eq!(def.rule, Rule::UpperBound { max: dec!(125) });
    }
}
