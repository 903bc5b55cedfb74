use log::info;

use crate::config::PlatformConfig;
use crate::errors::FanError;
use crate::fan::FanEntity;
use crate::hub::HubRegistry;

/// Build one fan entity per configured record, all attached to the hub
/// registered under the config's device id.
pub fn setup_platform(
    config: &PlatformConfig,
    registry: &HubRegistry,
) -> Result<Vec<FanEntity>, FanError> {
    info!(
        "setting up {} fan(s) on device '{}'",
        config.devices.len(),
        config.device_id
    );
    let hub = registry.get(&config.device_id)?;

    let fans = config
        .devices
        .iter()
        .cloned()
        .map(|fan| FanEntity::new(hub.clone(), fan))
        .collect();

    Ok(fans)
}

/// Find a fan by its display name.
pub fn find_fan<'a>(fans: &'a mut [FanEntity], name: &str) -> Result<&'a mut FanEntity, FanError> {
    fans.iter_mut()
        .find(|fan| fan.name() == name)
        .ok_or_else(|| FanError::FanNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::fan::DeviceTag;
    use crate::hub::recording::RecordingHub;

    const CONFIG: &str = r#"{
        "device_id": "neuron",
        "devices": [
            { "name": "Bathroom", "device": "ao", "port": "1_01", "mode": "pwm" },
            { "name": "Kitchen", "device": "ao", "port": "2_10", "mode": "on_off" },
            { "name": "Attic", "device": "ao", "port": "7", "mode": "pwm" }
        ]
    }"#;

    fn registry_with(hub: &Arc<RecordingHub>) -> HubRegistry {
        let mut registry = HubRegistry::new();
        registry.insert("neuron", hub.clone());
        registry
    }

    #[test]
    fn one_fan_per_record_in_order() {
        let hub = Arc::new(RecordingHub::new());
        let config: PlatformConfig = CONFIG.parse().unwrap();

        let fans = setup_platform(&config, &registry_with(&hub)).unwrap();

        let names: Vec<&str> = fans.iter().map(|fan| fan.name()).collect();
        assert_eq!(names, ["Bathroom", "Kitchen", "Attic"]);
        assert_eq!(fans[1].port().as_str(), "2_10");
        assert!(fans.iter().all(|fan| !fan.is_on() && fan.percentage() == 0));
    }

    #[test]
    fn empty_device_list_yields_no_fans() {
        let hub = Arc::new(RecordingHub::new());
        let config: PlatformConfig = r#"{ "device_id": "neuron", "devices": [] }"#.parse().unwrap();

        let fans = setup_platform(&config, &registry_with(&hub)).unwrap();
        assert!(fans.is_empty());
    }

    #[test]
    fn unknown_device_id_fails() {
        let config: PlatformConfig = CONFIG.parse().unwrap();
        let result = setup_platform(&config, &HubRegistry::new());
        assert!(matches!(result, Err(FanError::UnknownDeviceId(ref id)) if id == "neuron"));
    }

    #[tokio::test]
    async fn fans_share_one_hub() {
        let hub = Arc::new(RecordingHub::new());
        let config: PlatformConfig = CONFIG.parse().unwrap();
        let mut fans = setup_platform(&config, &registry_with(&hub)).unwrap();

        fans[0].turn_on(None).await.unwrap();
        fans[2].set_percentage(40).await.unwrap();

        let dispatches = hub.dispatches();
        assert_eq!(dispatches.len(), 2);
        assert_eq!(dispatches[0].port, "1_01");
        assert_eq!(dispatches[1].port, "7");
        assert!(dispatches.iter().all(|d| d.device == DeviceTag::Ao));
    }

    #[test]
    fn find_fan_by_name() {
        let hub = Arc::new(RecordingHub::new());
        let config: PlatformConfig = CONFIG.parse().unwrap();
        let mut fans = setup_platform(&config, &registry_with(&hub)).unwrap();

        let fan = find_fan(&mut fans, "Kitchen").unwrap();
        assert_eq!(fan.port().as_str(), "2_10");

        let result = find_fan(&mut fans, "Garage");
        assert!(matches!(result, Err(FanError::FanNotFound(ref name)) if name == "Garage"));
    }
}
