mod dry_run;
#[cfg(test)]
pub mod recording;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::errors::FanError;
use crate::fan::{AoPayload, DeviceTag, Port};

pub use dry_run::DryRunHub;

#[derive(Error, Debug)]
pub enum HubError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Client for the controller that owns the physical outputs.
///
/// One hub is shared by every fan on the same controller; implementations
/// take care of their own synchronization.
#[async_trait]
pub trait Hub: Send + Sync {
    /// Write `payload` to the output addressed by `device` and `port`.
    async fn dispatch(
        &self,
        device: DeviceTag,
        port: &Port,
        payload: AoPayload,
    ) -> Result<(), HubError>;
}

/// Hubs available at setup time, keyed by device id.
#[derive(Default, Clone)]
pub struct HubRegistry {
    hubs: HashMap<String, Arc<dyn Hub>>,
}

impl HubRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, device_id: impl Into<String>, hub: Arc<dyn Hub>) {
        self.hubs.insert(device_id.into(), hub);
    }

    pub fn get(&self, device_id: &str) -> Result<Arc<dyn Hub>, FanError> {
        self.hubs
            .get(device_id)
            .cloned()
            .ok_or_else(|| FanError::UnknownDeviceId(device_id.to_string()))
    }
}
