use async_trait::async_trait;
use log::info;
use serde::Serialize;

use super::{Hub, HubError};
use crate::fan::{AoPayload, DeviceTag, Port};

/// Hub that prints each write as a JSON line on stdout instead of
/// transmitting it.
pub struct DryRunHub {
    device_id: String,
}

#[derive(Serialize)]
struct WriteRecord<'a> {
    device: DeviceTag,
    port: &'a Port,
    #[serde(flatten)]
    payload: AoPayload,
}

impl DryRunHub {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
        }
    }

    fn render(device: DeviceTag, port: &Port, payload: AoPayload) -> Result<String, HubError> {
        let line = serde_json::to_string(&WriteRecord {
            device,
            port,
            payload,
        })?;
        Ok(line)
    }
}

#[async_trait]
impl Hub for DryRunHub {
    async fn dispatch(
        &self,
        device: DeviceTag,
        port: &Port,
        payload: AoPayload,
    ) -> Result<(), HubError> {
        let line = Self::render(device, port, payload)?;
        info!("{}: write {}/{} value={}", self.device_id, device, port, payload.value);
        println!("{}", line);
        Ok(())
    }
}
