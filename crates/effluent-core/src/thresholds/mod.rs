pub mod builtin;
pub mod schema;

use crate::error::EffluentError;
use crate::model::ParameterKind;
use schema::{Rule, RuleDef, ThresholdFileDef};
use std::collections::HashSet;
use std::path::Path;

pub use builtin::builtin;

/// An immutable mapping from parameter to safety rule.
///
/// Built once (the builtin static, or a file loaded at startup) and only
/// borrowed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdTable {
    name: String,
    version: String,
    description: Option<String>,
    rules: Vec<(ParameterKind, Rule)>,
}

impl ThresholdTable {
    pub(crate) fn from_parts(
        name: String,
        version: String,
        description: Option<String>,
        rules: Vec<(ParameterKind, Rule)>,
    ) -> Self {
        Self {
            name,
            version,
            description,
            rules,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The rule for `kind`, if the table covers it.
    pub fn rule(&self, kind: ParameterKind) -> Option<&Rule> {
        self.rules.iter().find(|(k, _)| *k == kind).map(|(_, r)| r)
    }

    /// Rules in table order.
    pub fn iter(&self) -> impl Iterator<Item = (ParameterKind, &Rule)> {
        self.rules.iter().map(|(k, r)| (*k, r))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The file representation of this table.
    pub fn to_def(&self) -> ThresholdFileDef {
        ThresholdFileDef {
            name: self.name.clone(),
            description: self.description.clone(),
            version: self.version.clone(),
            rules: self
                .rules
                .iter()
                .map(|(parameter, rule)| RuleDef {
                    parameter: *parameter,
                    rule: *rule,
                    note: None,
                })
                .collect(),
        }
    }
}

impl TryFrom<ThresholdFileDef> for ThresholdTable {
    type Error = EffluentError;

    fn try_from(def: ThresholdFileDef) -> Result<Self, Self::Error> {
        validate_table(&def)?;
        Ok(ThresholdTable::from_parts(
            def.name,
            def.version,
            def.description,
            def.rules.into_iter().map(|r| (r.parameter, r.rule)).collect(),
        ))
    }
}

/// Load a threshold table from a JSON file.
pub fn load_table(path: &Path) -> Result<ThresholdTable, EffluentError> {
    let content = std::fs::read_to_string(path).map_err(|e| EffluentError::ThresholdsLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let def: ThresholdFileDef =
        serde_json::from_str(&content).map_err(|e| EffluentError::ThresholdsLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    ThresholdTable::try_from(def)
}

/// Parse a threshold table from a JSON string (no file path context).
pub fn parse_table_str(json: &str) -> Result<ThresholdTable, EffluentError> {
    let def: ThresholdFileDef = serde_json::from_str(json)?;
    ThresholdTable::try_from(def)
}

/// Validate that a threshold file is well-formed.
pub fn validate_table(def: &ThresholdFileDef) -> Result<(), EffluentError> {
    if def.rules.is_empty() {
        return Err(EffluentError::ThresholdsInvalid("rules must not be empty".into()));
    }

    let mut seen = HashSet::new();
    for rule in &def.rules {
        if !seen.insert(rule.parameter) {
            return Err(EffluentError::ThresholdsInvalid(format!(
                "parameter '{}' has more than one rule",
                rule.parameter.key()
            )));
        }

        if let Rule::Range { min, max } = rule.rule {
            if min > max {
                return Err(EffluentError::ThresholdsInvalid(format!(
                    "parameter '{}' has min {} above max {}",
                    rule.parameter.key(),
                    min,
                    max
                )));
            }
        }
    }

    Ok(())
}
