//! Platform configuration for a set of fans on one controller.
//!
//! ```json
//! {
//!   "device_id": "neuron",
//!   "devices": [
//!     { "name": "Bathroom", "device": "ao", "port": "1_01", "mode": "pwm" }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{ConfigError, FanError};
use crate::fan::{ControlMode, DeviceTag, Port};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Key of the hub the fans are attached to.
    pub device_id: String,
    /// A single fan record is accepted in place of a list.
    #[serde(deserialize_with = "one_or_many")]
    pub devices: Vec<FanConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FanConfig {
    pub name: String,
    pub device: DeviceTag,
    pub port: Port,
    pub mode: ControlMode,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(items) => items,
        OneOrMany::One(item) => vec![item],
    })
}

impl PlatformConfig {
    pub fn load(path: &Path) -> Result<Self, FanError> {
        let content = fs::read_to_string(path)?;
        content.parse()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.device_id.is_empty() {
            return Err(ConfigError::EmptyDeviceId);
        }
        if self.devices.iter().any(|fan| fan.name.is_empty()) {
            return Err(ConfigError::EmptyName);
        }
        Ok(())
    }
}

impl FromStr for PlatformConfig {
    type Err = FanError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let config: PlatformConfig = serde_json::from_str(content).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }
}
