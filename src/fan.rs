use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::FanConfig;
use crate::errors::FanError;
use crate::hub::{Hub, HubError};

/// PWM frequency sent along with every analog output write.
pub const AO_FREQUENCY: u32 = 100;

const DEFAULT_PRESET_MODE: &str = "auto";

/// Class of physical output channel a fan is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceTag {
    /// Analog output (0–10 V).
    Ao,
}

impl DeviceTag {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceTag::Ao => "ao",
        }
    }
}

impl fmt::Display for DeviceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// How the output drives the fan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlMode {
    OnOff,
    Pwm,
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlMode::OnOff => f.pad("on_off"),
            ControlMode::Pwm => f.pad("pwm"),
        }
    }
}

/// Channel address on the controller.
///
/// Either an extension-group port of the form `G_NN` (group `1`–`3`,
/// channel `00`–`19`) or a single on-board output `1`–`8`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Port(String);

impl Port {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Port {
    type Err = FanError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let valid = match value.as_bytes() {
            [output] => (b'1'..=b'8').contains(output),
            [group, b'_', tens, units] => {
                (b'1'..=b'3').contains(group)
                    && (b'0'..=b'1').contains(tens)
                    && units.is_ascii_digit()
            }
            _ => false,
        };

        if valid {
            Ok(Port(value.to_string()))
        } else {
            Err(FanError::InvalidPort(value.to_string()))
        }
    }
}

impl TryFrom<String> for Port {
    type Error = FanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Port> for String {
    fn from(port: Port) -> Self {
        port.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Body of an analog output write.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AoPayload {
    pub frequency: u32,
    pub value: f64,
}

impl AoPayload {
    pub fn from_percentage(percentage: i32) -> Self {
        Self {
            frequency: AO_FREQUENCY,
            value: to_device_value(percentage),
        }
    }
}

/// Capabilities a fan entity can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanFeature {
    SetSpeed,
}

impl fmt::Display for FanFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FanFeature::SetSpeed => f.pad("set_speed"),
        }
    }
}

/// Map a speed percentage onto the analog output scale.
///
/// The output acts inversely: 0% is 10.0 and 100% is 0.0. Input outside
/// 0–100 is clamped first.
pub fn to_device_value(percentage: i32) -> f64 {
    let percentage = percentage.clamp(0, 100);
    10.0 - f64::from(percentage) / 10.0
}

#[derive(Debug, Clone, PartialEq)]
struct FanState {
    percentage: i32,
    preset_mode: String,
}

impl Default for FanState {
    fn default() -> Self {
        Self {
            percentage: 0,
            preset_mode: DEFAULT_PRESET_MODE.to_string(),
        }
    }
}

/// A fan wired to one analog output of a controller.
///
/// The stored percentage is whatever the caller last asked for; only the
/// value sent to the hub is clamped.
pub struct FanEntity {
    hub: Arc<dyn Hub>,
    config: FanConfig,
    state: FanState,
}

impl FanEntity {
    pub fn new(hub: Arc<dyn Hub>, config: FanConfig) -> Self {
        Self {
            hub,
            config,
            state: FanState::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn port(&self) -> &Port {
        &self.config.port
    }

    pub fn device(&self) -> DeviceTag {
        self.config.device
    }

    pub fn mode(&self) -> ControlMode {
        self.config.mode
    }

    pub fn is_on(&self) -> bool {
        self.state.percentage > 0
    }

    pub fn percentage(&self) -> i32 {
        self.state.percentage
    }

    pub fn preset_mode(&self) -> &str {
        &self.state.preset_mode
    }

    pub fn supported_features(&self) -> &'static [FanFeature] {
        &[FanFeature::SetSpeed]
    }

    pub async fn set_percentage(&mut self, percentage: i32) -> Result<(), HubError> {
        self.state.percentage = percentage;
        self.send_state().await
    }

    /// Turn the fan on, at full speed unless a percentage is given.
    pub async fn turn_on(&mut self, percentage: Option<i32>) -> Result<(), HubError> {
        self.state.percentage = percentage.unwrap_or(100);
        self.send_state().await
    }

    pub async fn turn_off(&mut self) -> Result<(), HubError> {
        self.state.percentage = 0;
        self.send_state().await
    }

    async fn send_state(&self) -> Result<(), HubError> {
        let payload = AoPayload::from_percentage(self.state.percentage);
        self.hub
            .dispatch(self.config.device, &self.config.port, payload)
            .await
    }
}

impl fmt::Display for FanEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_on() { "on" } else { "off" };
        write!(
            f,
            "{}: {}% [{}] ({}/{}, {})",
            self.name(),
            self.percentage(),
            status,
            self.device(),
            self.port(),
            self.mode()
        )
    }
}
