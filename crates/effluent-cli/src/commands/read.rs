use effluent_core::config::{load_config, SourceConfig};
use effluent_core::error::EffluentError;
use effluent_core::evaluate::ThresholdEvaluator;
use std::path::PathBuf;

use crate::output;

/// Acquisition flags; each overrides the matching config file value.
pub struct ReadOptions {
    pub mode: Option<String>,
    pub iio_device: Option<PathBuf>,
    pub seed: Option<u64>,
    pub count: usize,
    pub config: Option<PathBuf>,
    pub thresholds: Option<PathBuf>,
}

pub fn run(opts: ReadOptions, output_format: &str, verbose: bool) -> Result<(), EffluentError> {
    let mut config = match opts.config {
        Some(ref path) => load_config(path)?,
        None => SourceConfig::default(),
    };
    if let Some(ref mode) = opts.mode {
        config.mode = mode.parse()?;
    }
    if opts.iio_device.is_some() {
        config.iio_device = opts.iio_device;
    }
    if opts.seed.is_some() {
        config.seed = opts.seed;
    }

    let table = super::load_thresholds(opts.thresholds.as_deref())?;
    let evaluator = ThresholdEvaluator::new(&table);
    let mut source = config.build_source()?;
    tracing::debug!(
        mode = %source.mode(),
        backend = source.backend_name(),
        count = opts.count,
        "sample source ready"
    );

    let mut inspections = Vec::with_capacity(opts.count);
    for _ in 0..opts.count {
        inspections.push(effluent_core::inspect(&mut source, &evaluator)?);
    }

    match output_format {
        "json" => output::json::print_inspections(&inspections)?,
        _ => output::table::print_inspections(&inspections, &table, verbose),
    }

    Ok(())
}
