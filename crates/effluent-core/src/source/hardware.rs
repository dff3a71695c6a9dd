use crate::error::EffluentError;
use crate::model::ParameterKind;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::fmt;

/// Single-ended input on the analog-to-digital converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdcChannel(pub u8);

impl fmt::Display for AdcChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A{}", self.0)
    }
}

pub const PH_CHANNEL: AdcChannel = AdcChannel(0);
pub const TURBIDITY_CHANNEL: AdcChannel = AdcChannel(1);
/// Wired but uncalibrated; readings report zero.
pub const TSS_CHANNEL: AdcChannel = AdcChannel(2);

/// Channels a hardware source opens at construction.
pub const SENSOR_CHANNELS: [AdcChannel; 3] = [PH_CHANNEL, TURBIDITY_CHANNEL, TSS_CHANNEL];

/// An acquired analog bus with open input channels.
pub trait AnalogFrontend: Send {
    /// Read the current voltage on `channel`, in volts. Blocks on I/O.
    fn read_voltage(&mut self, channel: AdcChannel) -> Result<f64, EffluentError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Acquires a bus handle and opens the requested channels.
pub trait FrontendConnector {
    fn connect(&self, channels: &[AdcChannel]) -> Result<Box<dyn AnalogFrontend>, EffluentError>;
}

/// Example pH probe calibration: 1.5 V at pH 7, -0.18 V per pH unit.
pub fn ph_from_voltage(voltage: f64) -> f64 {
    (7.0 - (voltage - 1.5) / 0.18).clamp(0.0, 14.0)
}

/// Example turbidity probe calibration: 250 NTU per volt, never negative.
pub fn turbidity_from_voltage(voltage: f64) -> f64 {
    (voltage * 1000.0 / 4.0).max(0.0)
}

/// Read every parameter from the frontend, in canonical order.
///
/// Parameters without a calibrated channel report zero. Any channel error
/// fails the whole reading.
pub(crate) fn read_readings(
    frontend: &mut dyn AnalogFrontend,
) -> Result<Vec<(ParameterKind, Decimal)>, EffluentError> {
    let mut readings = Vec::with_capacity(ParameterKind::ALL.len());

    for kind in ParameterKind::ALL {
        let value = match kind {
            ParameterKind::Ph => {
                let v = frontend.read_voltage(PH_CHANNEL)?;
                to_decimal(ph_from_voltage(v), PH_CHANNEL)?
            }
            ParameterKind::Turbidity => {
                let v = frontend.read_voltage(TURBIDITY_CHANNEL)?;
                to_decimal(turbidity_from_voltage(v), TURBIDITY_CHANNEL)?
            }
            _ => Decimal::ZERO,
        };
        readings.push((kind, value));
    }

    Ok(readings)
}

fn to_decimal(value: f64, channel: AdcChannel) -> Result<Decimal, EffluentError> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(2))
        .ok_or_else(|| EffluentError::HardwareRead {
            channel: channel.0,
            reason: format!("converted value {value} is not finite"),
        })
}
