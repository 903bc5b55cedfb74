use thiserror::Error;

use crate::hub::HubError;

#[derive(Error, Debug)]
pub enum FanError {
    #[error("fan '{0}' not found")]
    FanNotFound(String),

    #[error("invalid port '{0}' (expected 1_00–3_19 or 1–8)")]
    InvalidPort(String),

    #[error("no hub registered for device id '{0}'")]
    UnknownDeviceId(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Hub(#[from] HubError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("fan name must not be empty")]
    EmptyName,

    #[error("device id must not be empty")]
    EmptyDeviceId,

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
