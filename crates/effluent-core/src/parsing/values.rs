use crate::error::EffluentError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a measurement string into a decimal.
///
/// Handles formats like:
/// - "68" -> 68
/// - "0.030" -> 0.030
/// - "0,030" -> 0.030 (decimal comma)
/// - "1e-3" -> 0.001
///
/// A comma that may be a thousands separator ("1,000", "1,000.5") is
/// rejected rather than guessed at.
pub fn parse_value(s: &str) -> Result<Decimal, EffluentError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(EffluentError::ParseError("empty value".into()));
    }

    if ambiguous_separator(s) {
        return Err(EffluentError::ParseError(format!(
            "ambiguous separator in '{}'",
            s
        )));
    }

    let normalized = s.replace(',', ".");
    let parsed = if normalized.contains(['e', 'E']) {
        Decimal::from_scientific(&normalized)
    } else {
        Decimal::from_str(&normalized)
    };
    parsed.map_err(|e| EffluentError::ParseError(format!("invalid number '{}': {}", s, e)))
}

/// True when a comma cannot be read unambiguously as a decimal comma:
/// more than one separator, or a non-zero integer part followed by exactly
/// three digits ("1,000"). "0,030" stays a decimal comma.
fn ambiguous_separator(s: &str) -> bool {
    let commas = s.matches(',').count();
    if commas == 0 {
        return false;
    }
    if commas + s.matches('.').count() > 1 {
        return true;
    }

    let Some((int_part, frac_part)) = s.split_once(',') else {
        return false;
    };
    let int_digits = int_part.trim_start_matches(['-', '+']);
    frac_part.len() == 3
        && frac_part.chars().all(|c| c.is_ascii_digit())
        && int_digits.trim_start_matches('0').chars().any(|c| c.is_ascii_digit())
}

/// Parse a submitted form field, treating absent or unparseable input as zero.
pub fn parse_field(s: Option<&str>) -> Decimal {
    s.and_then(|v| parse_value(v).ok()).unwrap_or(Decimal::ZERO)
}
