use super::schema::Rule;
use super::ThresholdTable;
use crate::model::ParameterKind;
use rust_decimal::Decimal;
use std::sync::LazyLock;

static BUILTIN: LazyLock<ThresholdTable> = LazyLock::new(|| {
    ThresholdTable::from_parts(
        "Wastewater discharge limits".into(),
        "1.0".into(),
        Some("General limits for treated effluent discharged to surface water".into()),
        vec![
            (
                ParameterKind::Ph,
                Rule::Range {
                    min: Decimal::new(65, 1),
                    max: Decimal::new(85, 1),
                },
            ),
            (ParameterKind::Turbidity, Rule::UpperBound { max: Decimal::new(50, 1) }),
            (
                ParameterKind::TotalSuspendedSolids,
                Rule::UpperBound { max: Decimal::new(300, 1) },
            ),
            (
                ParameterKind::ChemicalOxygenDemand,
                Rule::UpperBound { max: Decimal::new(2500, 1) },
            ),
            (
                ParameterKind::BiologicalOxygenDemand,
                Rule::UpperBound { max: Decimal::new(300, 1) },
            ),
            (ParameterKind::OilGrease, Rule::UpperBound { max: Decimal::new(100, 1) }),
            (ParameterKind::HeavyMetals, Rule::UpperBound { max: Decimal::new(1, 1) }),
        ],
    )
});

/// The process-wide default threshold table.
pub fn builtin() -> &'static ThresholdTable {
    &BUILTIN
}
