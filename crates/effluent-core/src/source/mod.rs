//! Sample acquisition.
//!
//! A [`SampleSource`] is fixed at construction to one of three modes:
//! simulated readings, real hardware, or simulated readings after a failed
//! hardware acquisition. Hardware is never re-attempted.

pub mod hardware;
pub mod iio;
pub mod simulate;

use crate::error::EffluentError;
use crate::model::Sample;
use hardware::{AnalogFrontend, FrontendConnector, SENSOR_CHANNELS};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fmt;

/// Local-time format for sample timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceMode {
    /// Simulation was requested explicitly.
    Simulated,
    /// Bus and channels acquired; readings come from hardware.
    HardwareReady,
    /// Hardware acquisition failed; readings are simulated from now on.
    HardwareFailedFallback,
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceMode::Simulated => write!(f, "simulated"),
            SourceMode::HardwareReady => write!(f, "hardware"),
            SourceMode::HardwareFailedFallback => write!(f, "simulated (hardware fallback)"),
        }
    }
}

enum Acquisition {
    Simulated,
    Hardware(Box<dyn AnalogFrontend>),
    Fallback { reason: String },
}

/// Produces one reading per parameter on each call to [`read_all`](Self::read_all).
///
/// Not internally synchronized: share one instance behind a lock, or give
/// each concurrent caller its own.
pub struct SampleSource {
    acquisition: Acquisition,
    rng: StdRng,
}

impl SampleSource {
    pub fn simulated() -> Self {
        Self {
            acquisition: Acquisition::Simulated,
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Try to acquire hardware through `connector`, falling back to
    /// simulation for the lifetime of this source if that fails.
    pub fn hardware(connector: &dyn FrontendConnector) -> Self {
        let acquisition = match connector.connect(&SENSOR_CHANNELS) {
            Ok(frontend) => {
                tracing::info!(backend = frontend.backend_name(), "sensor hardware initialized");
                Acquisition::Hardware(frontend)
            }
            Err(e) => {
                tracing::warn!(error = %e, "sensor hardware unavailable, falling back to simulation");
                Acquisition::Fallback {
                    reason: e.to_string(),
                }
            }
        };

        Self {
            acquisition,
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Make simulated readings reproducible. Has no effect on hardware reads.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn mode(&self) -> SourceMode {
        match self.acquisition {
            Acquisition::Simulated => SourceMode::Simulated,
            Acquisition::Hardware(_) => SourceMode::HardwareReady,
            Acquisition::Fallback { .. } => SourceMode::HardwareFailedFallback,
        }
    }

    /// Why hardware acquisition failed, if this source fell back.
    pub fn fallback_reason(&self) -> Option<&str> {
        match &self.acquisition {
            Acquisition::Fallback { reason } => Some(reason),
            _ => None,
        }
    }

    pub fn backend_name(&self) -> &str {
        match &self.acquisition {
            Acquisition::Hardware(frontend) => frontend.backend_name(),
            _ => "simulation",
        }
    }

    /// Take one reading of every parameter, stamped with the local time.
    ///
    /// Simulated reads never fail. A hardware read error fails the whole
    /// sample; no partial sample is returned.
    pub fn read_all(&mut self) -> Result<Sample, EffluentError> {
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();

        let readings = match &mut self.acquisition {
            Acquisition::Hardware(frontend) => hardware::read_readings(frontend.as_mut())?,
            Acquisition::Simulated | Acquisition::Fallback { .. } => {
                simulate::simulate_readings(&mut self.rng)
            }
        };

        Ok(Sample::from_iter(readings).with_timestamp(timestamp))
    }
}

impl fmt::Debug for SampleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SampleSource")
            .field("mode", &self.mode())
            .field("backend", &self.backend_name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::hardware::{AdcChannel, PH_CHANNEL, TURBIDITY_CHANNEL};
    use super::*;
    use crate::model::ParameterKind;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::cell::Cell;
    use std::collections::HashMap;

    struct MockFrontend {
        voltages: HashMap<AdcChannel, f64>,
    }

    impl AnalogFrontend for MockFrontend {
        fn read_voltage(&mut self, channel: AdcChannel) -> Result<f64, EffluentError> {
            self.voltages
                .get(&channel)
                .copied()
                .ok_or_else(|| EffluentError::HardwareRead {
                    channel: channel.0,
                    reason: "no signal".into(),
                })
        }

        fn backend_name(&self) -> &str {
            "mock"
        }
    }

    struct MockConnector {
        voltages: HashMap<AdcChannel, f64>,
    }

    impl FrontendConnector for MockConnector {
        fn connect(
            &self,
            _channels: &[AdcChannel],
        ) -> Result<Box<dyn AnalogFrontend>, EffluentError> {
            Ok(Box::new(MockFrontend {
                voltages: self.voltages.clone(),
            }))
        }
    }

    struct FailingConnector {
        attempts: Cell<usize>,
    }

    impl FrontendConnector for FailingConnector {
        fn connect(
            &self,
            _channels: &[AdcChannel],
        ) -> Result<Box<dyn AnalogFrontend>, EffluentError> {
            self.attempts.set(self.attempts.get() + 1);
            Err(EffluentError::HardwareUnavailable("no I2C bus".into()))
        }
    }

    #[test]
    fn test_simulated_mode() {
        let mut source = SampleSource::simulated().with_seed(1);
        assert_eq!(source.mode(), SourceMode::Simulated);
        assert!(source.fallback_reason().is_none());

        let sample = source.read_all().unwrap();
        assert_eq!(sample.len(), 7);
        assert!(sample.timestamp.is_some());
        for kind in ParameterKind::ALL {
            let value = sample.get(kind).unwrap();
            assert!(simulate::simulation_range(kind).contains(value));
        }
    }

    #[test]
    fn test_timestamp_format() {
        let sample = SampleSource::simulated().read_all().unwrap();
        let ts = sample.timestamp.unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_hardware_failure_falls_back_permanently() {
        let connector = FailingConnector {
            attempts: Cell::new(0),
        };
        let mut source = SampleSource::hardware(&connector).with_seed(3);
        assert_eq!(source.mode(), SourceMode::HardwareFailedFallback);
        assert!(source.fallback_reason().unwrap().contains("no I2C bus"));

        for _ in 0..5 {
            let sample = source.read_all().unwrap();
            assert_eq!(sample.len(), 7);
        }
        assert_eq!(connector.attempts.get(), 1);
        assert_eq!(source.mode(), SourceMode::HardwareFailedFallback);
        assert_eq!(source.backend_name(), "simulation");
    }

    #[test]
    fn test_fallback_reads_like_simulation() {
        let connector = FailingConnector {
            attempts: Cell::new(0),
        };
        let a = SampleSource::hardware(&connector).with_seed(9).read_all().unwrap();
        let b = SampleSource::simulated().with_seed(9).read_all().unwrap();
        let values_a: Vec<Decimal> = a.readings().map(|(_, v)| v).collect();
        let values_b: Vec<Decimal> = b.readings().map(|(_, v)| v).collect();
        assert_eq!(values_a, values_b);
    }

    #[test]
    fn test_hardware_conversions() {
        let connector = MockConnector {
            voltages: HashMap::from([(PH_CHANNEL, 1.32), (TURBIDITY_CHANNEL, 0.02)]),
        };
        let mut source = SampleSource::hardware(&connector);
        assert_eq!(source.mode(), SourceMode::HardwareReady);
        assert_eq!(source.backend_name(), "mock");

        let sample = source.read_all().unwrap();
        assert_eq!(sample.get(ParameterKind::Ph), Some(dec!(8.00)));
        assert_eq!(sample.get(ParameterKind::Turbidity), Some(dec!(5.00)));
        for kind in [
            ParameterKind::TotalSuspendedSolids,
            ParameterKind::ChemicalOxygenDemand,
            ParameterKind::BiologicalOxygenDemand,
            ParameterKind::OilGrease,
            ParameterKind::HeavyMetals,
        ] {
            assert_eq!(sample.get(kind), Some(Decimal::ZERO));
        }
    }

    #[test]
    fn test_hardware_clamping() {
        let connector = MockConnector {
            voltages: HashMap::from([(PH_CHANNEL, 4.0), (TURBIDITY_CHANNEL, -1.0)]),
        };
        let sample = SampleSource::hardware(&connector).read_all().unwrap();
        assert_eq!(sample.get(ParameterKind::Ph), Some(Decimal::ZERO));
        assert_eq!(sample.get(ParameterKind::Turbidity), Some(Decimal::ZERO));
    }

    #[test]
    fn test_hardware_read_error_fails_whole_sample() {
        let connector = MockConnector {
            voltages: HashMap::from([(PH_CHANNEL, 1.5)]),
        };
        let mut source = SampleSource::hardware(&connector);
        let err = source.read_all().unwrap_err();
        assert!(matches!(err, EffluentError::HardwareRead { channel: 1, .. }));
        assert_eq!(source.mode(), SourceMode::HardwareReady);
    }

    #[test]
    fn test_debug_shows_mode() {
        let source = SampleSource::simulated();
        assert!(format!("{source:?}").contains("Simulated"));
    }
}
