use crate::parsing::values::parse_value;
use rust_decimal::Decimal;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Key under which a sample carries its capture time.
pub const TIMESTAMP_KEY: &str = "timestamp";

/// The water-quality parameters the system knows how to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ParameterKind {
    #[serde(rename = "ph")]
    Ph,
    #[serde(rename = "turbidity")]
    Turbidity,
    #[serde(rename = "tss", alias = "total_suspended_solids")]
    TotalSuspendedSolids,
    #[serde(rename = "cod", alias = "chemical_oxygen_demand")]
    ChemicalOxygenDemand,
    #[serde(rename = "bod", alias = "biological_oxygen_demand")]
    BiologicalOxygenDemand,
    #[serde(rename = "oil_grease")]
    OilGrease,
    #[serde(rename = "heavy_metals")]
    HeavyMetals,
}

impl ParameterKind {
    /// Every kind, in canonical reporting order.
    pub const ALL: [ParameterKind; 7] = [
        ParameterKind::Ph,
        ParameterKind::Turbidity,
        ParameterKind::TotalSuspendedSolids,
        ParameterKind::ChemicalOxygenDemand,
        ParameterKind::BiologicalOxygenDemand,
        ParameterKind::OilGrease,
        ParameterKind::HeavyMetals,
    ];

    /// Short snake_case key used in sample files and form fields.
    pub fn key(&self) -> &'static str {
        match self {
            ParameterKind::Ph => "ph",
            ParameterKind::Turbidity => "turbidity",
            ParameterKind::TotalSuspendedSolids => "tss",
            ParameterKind::ChemicalOxygenDemand => "cod",
            ParameterKind::BiologicalOxygenDemand => "bod",
            ParameterKind::OilGrease => "oil_grease",
            ParameterKind::HeavyMetals => "heavy_metals",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ParameterKind::Ph => "pH",
            ParameterKind::Turbidity => "Turbidity",
            ParameterKind::TotalSuspendedSolids => "Total Suspended Solids",
            ParameterKind::ChemicalOxygenDemand => "Chemical Oxygen Demand",
            ParameterKind::BiologicalOxygenDemand => "Biological Oxygen Demand",
            ParameterKind::OilGrease => "Oil & Grease",
            ParameterKind::HeavyMetals => "Heavy Metals",
        }
    }

    /// Measurement unit for display. pH is dimensionless.
    pub fn unit(&self) -> &'static str {
        match self {
            ParameterKind::Ph => "",
            ParameterKind::Turbidity => "NTU",
            _ => "mg/L",
        }
    }

    /// Look up a kind by its short key or long snake_case name, ignoring case.
    pub fn from_key(s: &str) -> Option<ParameterKind> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "ph" => Some(ParameterKind::Ph),
            "turbidity" => Some(ParameterKind::Turbidity),
            "tss" | "total_suspended_solids" => Some(ParameterKind::TotalSuspendedSolids),
            "cod" | "chemical_oxygen_demand" => Some(ParameterKind::ChemicalOxygenDemand),
            "bod" | "biological_oxygen_demand" => Some(ParameterKind::BiologicalOxygenDemand),
            "oil_grease" => Some(ParameterKind::OilGrease),
            "heavy_metals" => Some(ParameterKind::HeavyMetals),
            _ => None,
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A sample key: either a recognized parameter or a name passed through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParameterKey {
    Known(ParameterKind),
    Unrecognized(String),
}

impl ParameterKey {
    pub fn parse(s: &str) -> ParameterKey {
        match ParameterKind::from_key(s) {
            Some(kind) => ParameterKey::Known(kind),
            None => ParameterKey::Unrecognized(s.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ParameterKey::Known(kind) => kind.key(),
            ParameterKey::Unrecognized(name) => name,
        }
    }

    pub fn kind(&self) -> Option<ParameterKind> {
        match self {
            ParameterKey::Known(kind) => Some(*kind),
            ParameterKey::Unrecognized(_) => None,
        }
    }
}

impl fmt::Display for ParameterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One set of measurements, in the order they were supplied.
///
/// Behaves like an insertion-ordered map: inserting a key that is already
/// present replaces the value but keeps the original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    pub timestamp: Option<String>,
    readings: Vec<(ParameterKey, Decimal)>,
}

impl Sample {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Insert a reading under a free-form key.
    ///
    /// The timestamp key is reserved for [`Sample::timestamp`]; a reading
    /// under that name is dropped.
    pub fn insert(&mut self, key: &str, value: Decimal) {
        if is_timestamp_key(key) {
            return;
        }
        self.insert_key(ParameterKey::parse(key), value);
    }

    pub fn insert_kind(&mut self, kind: ParameterKind, value: Decimal) {
        self.insert_key(ParameterKey::Known(kind), value);
    }

    fn insert_key(&mut self, key: ParameterKey, value: Decimal) {
        match self.readings.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.readings.push((key, value)),
        }
    }

    pub fn get(&self, kind: ParameterKind) -> Option<Decimal> {
        self.readings
            .iter()
            .find(|(k, _)| k.kind() == Some(kind))
            .map(|(_, v)| *v)
    }

    /// Readings in insertion order.
    pub fn readings(&self) -> impl Iterator<Item = (&ParameterKey, Decimal)> {
        self.readings.iter().map(|(k, v)| (k, *v))
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

fn is_timestamp_key(key: &str) -> bool {
    key.trim().eq_ignore_ascii_case(TIMESTAMP_KEY)
}

impl FromIterator<(ParameterKind, Decimal)> for Sample {
    fn from_iter<I: IntoIterator<Item = (ParameterKind, Decimal)>>(iter: I) -> Self {
        let mut sample = Sample::new();
        for (kind, value) in iter {
            sample.insert_kind(kind, value);
        }
        sample
    }
}

impl Serialize for Sample {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.readings.len() + usize::from(self.timestamp.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(ref ts) = self.timestamp {
            map.serialize_entry(TIMESTAMP_KEY, ts)?;
        }
        for (key, value) in &self.readings {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}

/// A reading as it may appear in a sample file: a JSON number or numeric text.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawReading {
    Number(serde_json::Number),
    Text(String),
}

impl<'de> Deserialize<'de> for Sample {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SampleVisitor)
    }
}

struct SampleVisitor;

impl<'de> Visitor<'de> for SampleVisitor {
    type Value = Sample;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of parameter names to numeric values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Sample, A::Error> {
        let mut sample = Sample::new();
        while let Some(key) = access.next_key::<String>()? {
            if key == TIMESTAMP_KEY {
                sample.timestamp = access.next_value()?;
                continue;
            }
            match ParameterKey::parse(&key) {
                ParameterKey::Known(kind) => {
                    let text = match access.next_value::<RawReading>()? {
                        RawReading::Number(n) => n.to_string(),
                        RawReading::Text(s) => s,
                    };
                    let value = parse_value(&text)
                        .map_err(|e| de::Error::custom(format!("parameter '{key}': {e}")))?;
                    sample.insert_kind(kind, value);
                }
                // Metadata such as site names or notes rides along in sample
                // files; only numeric extras are kept.
                ParameterKey::Unrecognized(_) => {
                    let extra = match access.next_value::<serde_json::Value>()? {
                        serde_json::Value::Number(n) => parse_value(&n.to_string()).ok(),
                        serde_json::Value::String(s) => parse_value(&s).ok(),
                        _ => None,
                    };
                    if let Some(value) = extra {
                        sample.insert(&key, value);
                    }
                }
            }
        }
        Ok(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_key_accepts_aliases_and_case() {
        assert_eq!(ParameterKind::from_key("PH"), Some(ParameterKind::Ph));
        assert_eq!(
            ParameterKind::from_key("total_suspended_solids"),
            Some(ParameterKind::TotalSuspendedSolids)
        );
        assert_eq!(ParameterKind::from_key(" cod "), Some(ParameterKind::ChemicalOxygenDemand));
        assert_eq!(ParameterKind::from_key("salinity"), None);
    }

    #[test]
    fn test_keys_round_trip_through_from_key() {
        for kind in ParameterKind::ALL {
            assert_eq!(ParameterKind::from_key(kind.key()), Some(kind));
        }
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut sample = Sample::new();
        sample.insert("cod", dec!(100));
        sample.insert("ph", dec!(7));
        sample.insert("COD", dec!(300));

        let keys: Vec<&str> = sample.readings().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["cod", "ph"]);
        assert_eq!(sample.get(ParameterKind::ChemicalOxygenDemand), Some(dec!(300)));
    }

    #[test]
    fn test_unrecognized_key_kept() {
        let mut sample = Sample::new();
        sample.insert("salinity", dec!(35));
        let (key, value) = sample.readings().next().unwrap();
        assert_eq!(*key, ParameterKey::Unrecognized("salinity".into()));
        assert_eq!(value, dec!(35));
    }

    #[test]
    fn test_deserialize_preserves_order() {
        let json = r#"{"cod": 999, "timestamp": "2024-05-01 10:00:00", "ph": 7.0, "bod": "999"}"#;
        let sample: Sample = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = sample.readings().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["cod", "ph", "bod"]);
        assert_eq!(sample.timestamp.as_deref(), Some("2024-05-01 10:00:00"));
        assert_eq!(sample.get(ParameterKind::Ph), Some(dec!(7.0)));
        assert_eq!(sample.get(ParameterKind::BiologicalOxygenDemand), Some(dec!(999)));
    }

    #[test]
    fn test_deserialize_rejects_non_numeric_text() {
        let json = r#"{"ph": "neutral"}"#;
        let err = serde_json::from_str::<Sample>(json).unwrap_err();
        assert!(err.to_string().contains("ph"));
    }

    #[test]
    fn test_deserialize_skips_non_numeric_extras() {
        let json = r#"{"site": "outfall 3", "ph": 7.0, "notes": null, "tags": ["a"], "salinity": "35"}"#;
        let sample: Sample = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = sample.readings().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["ph", "salinity"]);
        assert_eq!(sample.get(ParameterKind::Ph), Some(dec!(7.0)));
    }

    #[test]
    fn test_deserialize_known_key_stays_strict() {
        assert!(serde_json::from_str::<Sample>(r#"{"cod": null}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"cod": "high"}"#).is_err());
    }

    #[test]
    fn test_timestamp_key_is_reserved() {
        let mut sample = Sample::new().with_timestamp("2024-05-01 10:00:00");
        sample.insert("timestamp", dec!(1));
        sample.insert("ph", dec!(7));
        assert_eq!(sample.len(), 1);

        let json = serde_json::to_string(&sample).unwrap();
        assert_eq!(json.matches("timestamp").count(), 1);
    }

    #[test]
    fn test_serialize_flat_map() {
        let sample = Sample::from_iter([(ParameterKind::HeavyMetals, dec!(0.05))])
            .with_timestamp("2024-05-01 10:00:00");
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["timestamp"], "2024-05-01 10:00:00");
        assert_eq!(json["heavy_metals"], "0.05");
    }
}
