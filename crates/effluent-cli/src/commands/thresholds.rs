use effluent_core::error::EffluentError;
use effluent_core::model::ParameterKind;
use effluent_core::thresholds;
use std::path::{Path, PathBuf};

pub fn list(path: Option<PathBuf>, output_format: &str) -> Result<(), EffluentError> {
    let table = super::load_thresholds(path.as_deref())?;

    if output_format == "json" {
        let json = serde_json::to_string_pretty(&table.to_def())?;
        println!("{json}");
        return Ok(());
    }

    println!("{} (version {})\n", table.name(), table.version());
    if let Some(desc) = table.description() {
        println!("{}\n", desc);
    }

    let name_width = table
        .iter()
        .map(|(k, _)| k.display_name().len())
        .max()
        .unwrap_or(20);

    println!(
        "  {:<14}  {:<name_width$}  {:<14}  Unit",
        "Key", "Parameter", "Safe range"
    );
    println!("  {}", "-".repeat(14 + 2 + name_width + 2 + 14 + 2 + 4));

    for (kind, rule) in table.iter() {
        println!(
            "  {:<14}  {:<name_width$}  {:<14}  {}",
            kind.key(),
            kind.display_name(),
            rule.to_string(),
            kind.unit()
        );
    }

    let uncovered: Vec<&str> = ParameterKind::ALL
        .iter()
        .filter(|k| table.rule(**k).is_none())
        .map(|k| k.key())
        .collect();
    if !uncovered.is_empty() {
        println!("\n  Not evaluated: {}", uncovered.join(", "));
    }
    println!();

    Ok(())
}

pub fn schema() -> Result<(), EffluentError> {
    print!(
        r#"JSON Threshold Schema
=====================

A threshold file replaces the builtin discharge limits. Every parameter
in a sample is checked against the rule for that parameter; parameters
without a rule are not evaluated.

Top-level fields:
  name          (string, required)  Human-readable name of the table
  description   (string, optional)  What this table is for
  version       (string, required)  Version identifier (e.g., "2025.1")
  rules         (array, required)   One rule per parameter (see below)

Each rule in the "rules" array:
  parameter     (string, required)  One of: ph, turbidity, tss, cod, bod,
                                    oil_grease, heavy_metals
  rule          (string, required)  "range" or "upper_bound"
  min           (string, range)     Lowest safe value (inclusive)
  max           (string, required)  Highest safe value (inclusive)
  note          (string, optional)  Regulatory reference or explanation.

Example:
{{
  "name": "Municipal discharge permit",
  "version": "1.0",
  "rules": [
    {{ "parameter": "ph", "rule": "range", "min": "6.0", "max": "9.0" }},
    {{ "parameter": "cod", "rule": "upper_bound", "max": "125",
       "note": "Permit section 4.2" }}
  ]
}}

Note: threshold values must be quoted strings, not bare numbers,
to preserve exact decimal precision (e.g., "0.1" not 0.1).
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), EffluentError> {
    let table = thresholds::load_table(file)?;

    println!("Threshold table '{}' (v{}) is valid.", table.name(), table.version());
    println!("  Rules: {} parameters", table.len());

    let missing: Vec<&str> = ParameterKind::ALL
        .iter()
        .filter(|k| table.rule(**k).is_none())
        .map(|k| k.key())
        .collect();

    if !missing.is_empty() {
        println!("\nWarnings:");
        for key in &missing {
            println!("  - parameter '{}' has no rule and will not be evaluated", key);
        }
    }

    Ok(())
}
