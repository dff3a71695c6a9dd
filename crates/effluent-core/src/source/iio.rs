//! Analog frontend backed by the Linux Industrial I/O sysfs interface.
//!
//! ADCs such as the ADS1115 (kernel driver `ti-ads1015`) expose each input as
//! `in_voltage{N}_raw` under `/sys/bus/iio/devices/iio:deviceX`, with the
//! millivolts-per-LSB factor in `in_voltage{N}_scale` or a shared
//! `in_voltage_scale`.

use super::hardware::{AdcChannel, AnalogFrontend, FrontendConnector};
use crate::error::EffluentError;
use std::path::{Path, PathBuf};

/// Opens channels on one IIO device directory.
#[derive(Debug, Clone)]
pub struct IioConnector {
    device_dir: PathBuf,
}

impl IioConnector {
    pub fn new(device_dir: impl Into<PathBuf>) -> Self {
        Self {
            device_dir: device_dir.into(),
        }
    }

    pub fn device_dir(&self) -> &Path {
        &self.device_dir
    }
}

impl FrontendConnector for IioConnector {
    fn connect(&self, channels: &[AdcChannel]) -> Result<Box<dyn AnalogFrontend>, EffluentError> {
        if !self.device_dir.is_dir() {
            return Err(EffluentError::HardwareUnavailable(format!(
                "IIO device {} not found",
                self.device_dir.display()
            )));
        }

        let mut opened = Vec::with_capacity(channels.len());
        for &channel in channels {
            let raw_path = self
                .device_dir
                .join(format!("in_voltage{}_raw", channel.0));
            if !raw_path.is_file() {
                return Err(EffluentError::HardwareUnavailable(format!(
                    "channel {} missing: {}",
                    channel,
                    raw_path.display()
                )));
            }

            let own_scale = self
                .device_dir
                .join(format!("in_voltage{}_scale", channel.0));
            let shared_scale = self.device_dir.join("in_voltage_scale");
            let scale_path = if own_scale.is_file() {
                own_scale
            } else if shared_scale.is_file() {
                shared_scale
            } else {
                return Err(EffluentError::HardwareUnavailable(format!(
                    "no scale attribute for channel {} in {}",
                    channel,
                    self.device_dir.display()
                )));
            };

            opened.push(IioChannel {
                channel,
                raw_path,
                scale_path,
            });
        }

        let name = std::fs::read_to_string(self.device_dir.join("name"))
            .map(|s| format!("iio:{}", s.trim()))
            .unwrap_or_else(|_| "iio".to_string());

        tracing::info!(
            device = %self.device_dir.display(),
            backend = %name,
            channels = opened.len(),
            "opened IIO channels"
        );

        Ok(Box::new(IioFrontend {
            name,
            channels: opened,
        }))
    }
}

#[derive(Debug)]
struct IioChannel {
    channel: AdcChannel,
    raw_path: PathBuf,
    scale_path: PathBuf,
}

#[derive(Debug)]
struct IioFrontend {
    name: String,
    channels: Vec<IioChannel>,
}

impl AnalogFrontend for IioFrontend {
    fn read_voltage(&mut self, channel: AdcChannel) -> Result<f64, EffluentError> {
        let ch = self
            .channels
            .iter()
            .find(|c| c.channel == channel)
            .ok_or_else(|| EffluentError::HardwareRead {
                channel: channel.0,
                reason: "channel was not opened".into(),
            })?;

        let raw = read_number(&ch.raw_path, channel)?;
        let scale_mv = read_number(&ch.scale_path, channel)?;
        Ok(raw * scale_mv / 1000.0)
    }

    fn backend_name(&self) -> &str {
        &self.name
    }
}

fn read_number(path: &Path, channel: AdcChannel) -> Result<f64, EffluentError> {
    let content = std::fs::read_to_string(path).map_err(|e| EffluentError::HardwareRead {
        channel: channel.0,
        reason: format!("{}: {}", path.display(), e),
    })?;
    content
        .trim()
        .parse::<f64>()
        .map_err(|e| EffluentError::HardwareRead {
            channel: channel.0,
            reason: format!("{}: invalid number '{}': {}", path.display(), content.trim(), e),
        })
}
