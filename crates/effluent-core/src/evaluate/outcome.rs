use crate::model::ParameterKind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Evaluation result for a single parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterVerdict {
    pub parameter: ParameterKind,
    /// The measured value, unchanged.
    pub value: Decimal,
    pub is_safe: bool,
    /// Human-readable explanation of the result.
    pub reason: String,
}

/// Evaluation result for a whole sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleVerdict {
    /// Capture time carried over from the sample, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Per-parameter results, in the order the sample supplied them.
    pub parameters: Vec<ParameterVerdict>,
    /// True iff no evaluated parameter failed its rule.
    pub is_safe: bool,
    /// Parameters that failed, in evaluation order.
    pub contaminants: Vec<ParameterKind>,
}

impl SampleVerdict {
    pub fn get(&self, kind: ParameterKind) -> Option<&ParameterVerdict> {
        self.parameters.iter().find(|p| p.parameter == kind)
    }
}
