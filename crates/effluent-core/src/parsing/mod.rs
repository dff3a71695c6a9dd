pub mod values;

use crate::model::{ParameterKind, Sample};
use values::parse_field;

/// Build a sample from submitted form fields.
///
/// Every known parameter is present in canonical order; a missing or
/// unparseable field reads as zero. Fields that name no known parameter are
/// appended afterwards (when numeric) so the evaluator can ignore them.
pub fn sample_from_fields(fields: &[(&str, &str)]) -> Sample {
    let mut sample = Sample::new();

    for kind in ParameterKind::ALL {
        let raw = fields
            .iter()
            .rev()
            .find(|(k, _)| ParameterKind::from_key(k) == Some(kind))
            .map(|(_, v)| *v);
        sample.insert_kind(kind, parse_field(raw));
    }

    for (key, raw) in fields {
        if ParameterKind::from_key(key).is_some() {
            continue;
        }
        if let Ok(value) = values::parse_value(raw) {
            sample.insert(key, value);
        }
    }

    sample
}

/// Split a `key=value` argument.
pub fn split_field(arg: &str) -> Option<(&str, &str)> {
    let (key, value) = arg.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParameterKey;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_all_parameters_present_in_canonical_order() {
        let sample = sample_from_fields(&[("cod", "200"), ("ph", "7.2")]);
        let kinds: Vec<Option<ParameterKind>> = sample.readings().map(|(k, _)| k.kind()).collect();
        let expected: Vec<Option<ParameterKind>> =
            ParameterKind::ALL.iter().copied().map(Some).collect();
        assert_eq!(kinds, expected);
        assert_eq!(sample.get(ParameterKind::Ph), Some(dec!(7.2)));
        assert_eq!(sample.get(ParameterKind::ChemicalOxygenDemand), Some(dec!(200)));
        assert_eq!(sample.get(ParameterKind::Turbidity), Some(Decimal::ZERO));
    }

    #[test]
    fn test_unparseable_field_is_zero() {
        let sample = sample_from_fields(&[("turbidity", "cloudy")]);
        assert_eq!(sample.get(ParameterKind::Turbidity), Some(Decimal::ZERO));
    }

    #[test]
    fn test_thousands_separator_is_not_a_decimal_comma() {
        let sample = sample_from_fields(&[("cod", "1,000")]);
        assert_eq!(sample.get(ParameterKind::ChemicalOxygenDemand), Some(Decimal::ZERO));
    }

    #[test]
    fn test_last_field_wins() {
        let sample = sample_from_fields(&[("ph", "6"), ("ph", "7")]);
        assert_eq!(sample.get(ParameterKind::Ph), Some(dec!(7)));
    }

    #[test]
    fn test_extra_fields_kept_as_unrecognized() {
        let sample = sample_from_fields(&[("salinity", "35")]);
        assert_eq!(sample.len(), 8);
        let (key, _) = sample.readings().last().unwrap();
        assert_eq!(*key, ParameterKey::Unrecognized("salinity".into()));
    }

    #[test]
    fn test_split_field() {
        assert_eq!(split_field("ph=7.2"), Some(("ph", "7.2")));
        assert_eq!(split_field(" cod = 200 "), Some(("cod", "200")));
        assert_eq!(split_field("ph"), None);
        assert_eq!(split_field("=7"), None);
    }
}
