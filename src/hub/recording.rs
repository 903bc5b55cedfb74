//! Hub double that records every write instead of sending it.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{Hub, HubError};
use crate::fan::{AoPayload, DeviceTag, Port};

#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub device: DeviceTag,
    pub port: String,
    pub payload: AoPayload,
}

pub struct RecordingHub {
    dispatches: Mutex<Vec<Dispatch>>,
    failure: Option<String>,
}

impl RecordingHub {
    pub fn new() -> Self {
        Self {
            dispatches: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    /// A hub that records each write and then fails it with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            dispatches: Mutex::new(Vec::new()),
            failure: Some(message.to_string()),
        }
    }

    pub fn dispatches(&self) -> Vec<Dispatch> {
        self.dispatches.lock().unwrap().clone()
    }
}

#[async_trait]
impl Hub for RecordingHub {
    async fn dispatch(
        &self,
        device: DeviceTag,
        port: &Port,
        payload: AoPayload,
    ) -> Result<(), HubError> {
        self.dispatches.lock().unwrap().push(Dispatch {
            device,
            port: port.to_string(),
            payload,
        });

        match &self.failure {
            Some(message) => Err(HubError::Transport(message.clone())),
            None => Ok(()),
        }
    }
}
