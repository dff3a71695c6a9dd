use effluent_core::evaluate::SampleVerdict;
use effluent_core::source::SourceMode;
use effluent_core::thresholds::ThresholdTable;
use effluent_core::Inspection;

pub fn print_verdict(verdict: &SampleVerdict, table: &ThresholdTable, verbose: bool) {
    if let Some(ref ts) = verdict.timestamp {
        println!("  Sampled: {ts}");
    }

    if verdict.is_safe {
        println!("  Overall: SAFE\n");
    } else {
        let names: Vec<&str> = verdict
            .contaminants
            .iter()
            .map(|k| k.display_name())
            .collect();
        println!("  Overall: UNSAFE (contaminants: {})\n", names.join(", "));
    }

    if verdict.parameters.is_empty() {
        println!("  No recognized parameters in sample.\n");
        return;
    }

    let name_width = verdict
        .parameters
        .iter()
        .map(|p| p.parameter.display_name().len())
        .max()
        .unwrap_or(10);

    println!(
        "  {:<name_width$}  {:>12}  {:<14}  Status",
        "Parameter", "Value", "Safe range"
    );
    println!("  {}", "-".repeat(name_width + 2 + 12 + 2 + 14 + 2 + 6));

    for p in &verdict.parameters {
        let value = match p.parameter.unit() {
            "" => p.value.to_string(),
            unit => format!("{} {}", p.value, unit),
        };
        let range = table
            .rule(p.parameter)
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".into());
        let status = if p.is_safe { "SAFE" } else { "UNSAFE" };
        println!(
            "  {:<name_width$}  {:>12}  {:<14}  {}",
            p.parameter.display_name(),
            value,
            range,
            status
        );
        if verbose {
            println!("    {}", p.reason);
        }
    }
    println!();
}

pub fn print_inspections(inspections: &[Inspection], table: &ThresholdTable, verbose: bool) {
    let multi = inspections.len() > 1;

    if let Some(first) = inspections.first() {
        match first.source_mode {
            SourceMode::HardwareFailedFallback => {
                println!(
                    "Source: {} ({})\n",
                    first.source_mode,
                    first.fallback_reason.as_deref().unwrap_or("unknown reason")
                );
            }
            mode => println!("Source: {mode}\n"),
        }
    }

    for (i, inspection) in inspections.iter().enumerate() {
        if multi {
            if i > 0 {
                println!();
            }
            println!("--- Sample {} ---\n", i + 1);
        }
        print_verdict(&inspection.verdict, table, verbose);
    }
}
