pub mod config;
pub mod error;
pub mod evaluate;
pub mod model;
pub mod parsing;
pub mod source;
pub mod thresholds;

use error::EffluentError;
use evaluate::{SampleVerdict, ThresholdEvaluator};
use model::Sample;
use serde::Serialize;
use source::{SampleSource, SourceMode};

/// One acquired sample together with its evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub source_mode: SourceMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub sample: Sample,
    pub verdict: SampleVerdict,
}

/// Main API entry point: read a sample from `source` and evaluate it.
pub fn inspect(
    source: &mut SampleSource,
    evaluator: &ThresholdEvaluator<'_>,
) -> Result<Inspection, EffluentError> {
    let sample = source.read_all()?;
    let verdict = evaluator.analyze(&sample);

    if !verdict.is_safe {
        tracing::info!(
            contaminants = ?verdict.contaminants,
            "sample outside safe limits"
        );
    }

    Ok(Inspection {
        source_mode: source.mode(),
        fallback_reason: source.fallback_reason().map(str::to_string),
        sample,
        verdict,
    })
}
