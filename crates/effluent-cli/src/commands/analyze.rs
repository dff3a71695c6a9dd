use effluent_core::error::EffluentError;
use effluent_core::evaluate::ThresholdEvaluator;
use effluent_core::model::Sample;
use effluent_core::parsing;
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: Option<PathBuf>,
    fields: Vec<String>,
    thresholds: Option<PathBuf>,
    output_format: &str,
    verbose: bool,
) -> Result<(), EffluentError> {
    let table = super::load_thresholds(thresholds.as_deref())?;

    let sample: Sample = match input_file {
        Some(path) => {
            if !fields.is_empty() {
                return Err(EffluentError::ParseError(
                    "give either a sample file or --field values, not both".into(),
                ));
            }
            let json_bytes = std::fs::read(&path)?;
            serde_json::from_slice(&json_bytes)?
        }
        None => {
            let pairs = fields
                .iter()
                .map(|f| {
                    parsing::split_field(f).ok_or_else(|| {
                        EffluentError::ParseError(format!("expected KEY=VALUE, got '{f}'"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            parsing::sample_from_fields(&pairs)
        }
    };

    let verdict = ThresholdEvaluator::new(&table).analyze(&sample);

    match output_format {
        "json" => output::json::print_verdict(&verdict)?,
        _ => output::table::print_verdict(&verdict, &table, verbose),
    }

    Ok(())
}
