use crate::error::EffluentError;
use crate::source::iio::IioConnector;
use crate::source::SampleSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcquisitionMode {
    #[default]
    Simulated,
    Hardware,
}

impl fmt::Display for AcquisitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquisitionMode::Simulated => write!(f, "simulated"),
            AcquisitionMode::Hardware => write!(f, "hardware"),
        }
    }
}

impl FromStr for AcquisitionMode {
    type Err = EffluentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simulated" | "simulation" | "sim" => Ok(AcquisitionMode::Simulated),
            "hardware" | "hw" => Ok(AcquisitionMode::Hardware),
            other => Err(EffluentError::ConfigInvalid(format!(
                "unknown acquisition mode '{}' (expected 'simulated' or 'hardware')",
                other
            ))),
        }
    }
}

/// How samples are acquired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    #[serde(default)]
    pub mode: AcquisitionMode,
    /// IIO device directory, e.g. `/sys/bus/iio/devices/iio:device0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iio_device: Option<PathBuf>,
    /// Seed for simulated readings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SourceConfig {
    pub fn validate(&self) -> Result<(), EffluentError> {
        if self.mode == AcquisitionMode::Hardware && self.iio_device.is_none() {
            return Err(EffluentError::ConfigInvalid(
                "hardware mode requires 'iio_device'".into(),
            ));
        }
        Ok(())
    }

    /// Construct the sample source this config describes.
    ///
    /// Hardware that cannot be acquired yields a fallback source, not an error.
    pub fn build_source(&self) -> Result<SampleSource, EffluentError> {
        self.validate()?;

        let source = match (self.mode, &self.iio_device) {
            (AcquisitionMode::Hardware, Some(dir)) => {
                SampleSource::hardware(&IioConnector::new(dir.clone()))
            }
            _ => SampleSource::simulated(),
        };

        Ok(match self.seed {
            Some(seed) => source.with_seed(seed),
            None => source,
        })
    }
}

/// Load an acquisition config from a JSON file.
pub fn load_config(path: &Path) -> Result<SourceConfig, EffluentError> {
    let content = std::fs::read_to_string(path).map_err(|e| EffluentError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: SourceConfig =
        serde_json::from_str(&content).map_err(|e| EffluentError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    config.validate()?;
    Ok(config)
}
