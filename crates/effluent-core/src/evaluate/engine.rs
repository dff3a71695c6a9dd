use crate::evaluate::outcome::{ParameterVerdict, SampleVerdict};
use crate::model::{ParameterKind, Sample};
use crate::thresholds::schema::Rule;
use crate::thresholds::{self, ThresholdTable};
use rust_decimal::Decimal;

/// Applies a threshold table to samples.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdEvaluator<'a> {
    table: &'a ThresholdTable,
}

impl Default for ThresholdEvaluator<'static> {
    fn default() -> Self {
        Self::new(thresholds::builtin())
    }
}

impl<'a> ThresholdEvaluator<'a> {
    pub fn new(table: &'a ThresholdTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a ThresholdTable {
        self.table
    }

    /// Evaluate every recognized parameter of `sample` against the table.
    ///
    /// Keys that name no known parameter, or a parameter the table has no
    /// rule for, are skipped. Values are not range-checked beyond the rule
    /// itself.
    pub fn analyze(&self, sample: &Sample) -> SampleVerdict {
        let mut parameters = Vec::with_capacity(sample.len());
        let mut contaminants = Vec::new();

        for (key, value) in sample.readings() {
            let Some(kind) = key.kind() else {
                tracing::debug!(parameter = %key, "skipping unrecognized parameter");
                continue;
            };
            let Some(rule) = self.table.rule(kind) else {
                tracing::debug!(parameter = kind.key(), "no threshold rule, skipping");
                continue;
            };

            let verdict = evaluate_parameter(kind, value, rule);
            tracing::debug!(
                parameter = kind.key(),
                value = %value,
                is_safe = verdict.is_safe,
                "evaluated parameter"
            );

            if !verdict.is_safe {
                contaminants.push(kind);
            }
            parameters.push(verdict);
        }

        SampleVerdict {
            timestamp: sample.timestamp.clone(),
            parameters,
            is_safe: contaminants.is_empty(),
            contaminants,
        }
    }
}

/// Evaluate a single value against its rule.
fn evaluate_parameter(kind: ParameterKind, value: Decimal, rule: &Rule) -> ParameterVerdict {
    let is_safe = rule.admits(value);
    let unit = match kind.unit() {
        "" => String::new(),
        u => format!(" {u}"),
    };

    let reason = match (rule, is_safe) {
        (Rule::Range { .. }, true) => {
            format!("{}: {}{} within {}", kind.display_name(), value, unit, rule)
        }
        (Rule::Range { min, max }, false) => {
            let side = if value < *min { "below" } else { "above" };
            let bound = if value < *min { min } else { max };
            format!(
                "{}: {}{} {} safe range {} (limit {})",
                kind.display_name(),
                value,
                unit,
                side,
                rule,
                bound
            )
        }
        (Rule::UpperBound { max }, true) => {
            format!("{}: {}{} <= {}", kind.display_name(), value, unit, max)
        }
        (Rule::UpperBound { max }, false) => {
            format!("{}: {}{} > {} -> exceeds limit", kind.display_name(), value, unit, max)
        }
    };

    ParameterVerdict {
        parameter: kind,
        value,
        is_safe,
        reason,
    }
}
