use effluent_core::error::EffluentError;
use effluent_core::evaluate::SampleVerdict;
use effluent_core::Inspection;

pub fn print_verdict(verdict: &SampleVerdict) -> Result<(), EffluentError> {
    let json = serde_json::to_string_pretty(verdict)?;
    println!("{json}");
    Ok(())
}

pub fn print_inspections(inspections: &[Inspection]) -> Result<(), EffluentError> {
    let json = serde_json::to_string_pretty(inspections)?;
    println!("{json}");
    Ok(())
}
