//! Attached panels and the current selection

use htt_transport::DeviceDiscovery;
use tracing::{debug, info, warn};

use crate::error::PanelError;
use crate::PanelSession;

/// Every panel found at startup, in enumeration order
///
/// Device indices are stable for the lifetime of the registry. The current
/// selection starts at index 0 and only changes through `select`.
pub struct DeviceRegistry {
    sessions: Vec<PanelSession>,
    current: usize,
}

impl DeviceRegistry {
    pub fn new(sessions: Vec<PanelSession>) -> Self {
        Self {
            sessions,
            current: 0,
        }
    }

    /// Enumerate and open every matching device
    ///
    /// A device that fails to open still takes its index, as a detached
    /// session that reports `NoDevice`.
    pub fn discover(discovery: &impl DeviceDiscovery) -> Result<Self, PanelError> {
        let devices = discovery.list_devices()?;
        let sessions = devices
            .iter()
            .map(|device| match discovery.open_device(device) {
                Ok(transport) => PanelSession::new(transport),
                Err(e) => {
                    warn!("Failed to open {}: {e}", device.info.device_path);
                    PanelSession::detached(device.info.clone())
                }
            })
            .collect::<Vec<_>>();
        info!("Found {} HTT panel(s)", sessions.len());
        Ok(Self::new(sessions))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PanelSession> {
        self.sessions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PanelSession> {
        self.sessions.iter()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The selected session, or `NoDevice` when nothing is attached
    pub fn current(&self) -> Result<&PanelSession, PanelError> {
        self.sessions.get(self.current).ok_or(PanelError::NoDevice)
    }

    /// Change the selection
    ///
    /// An out-of-range index leaves the selection unchanged.
    pub fn select(&mut self, index: usize) -> Result<(), PanelError> {
        if index >= self.sessions.len() {
            return Err(PanelError::InvalidDevice {
                index,
                count: self.sessions.len(),
            });
        }
        debug!("Selected device {index}");
        self.current = index;
        Ok(())
    }
}

impl Drop for DeviceRegistry {
    fn drop(&mut self) {
        if !self.sessions.is_empty() {
            debug!("Closing {} panel session(s)", self.sessions.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use htt_transport::{
        DiscoveredDevice, LoopbackDevice, Transport, TransportDeviceInfo, TransportError,
        PRODUCT_ID, VENDOR_ID,
    };

    struct FakeDiscovery {
        devices: Vec<LoopbackDevice>,
        unopenable: Option<usize>,
    }

    impl DeviceDiscovery for FakeDiscovery {
        fn list_devices(&self) -> Result<Vec<DiscoveredDevice>, TransportError> {
            Ok((0..self.devices.len())
                .map(|i| DiscoveredDevice {
                    info: TransportDeviceInfo::from_path(VENDOR_ID, PRODUCT_ID, i.to_string()),
                })
                .collect())
        }

        fn open_device(
            &self,
            device: &DiscoveredDevice,
        ) -> Result<Box<dyn Transport>, TransportError> {
            let index: usize = device
                .info
                .device_path
                .parse()
                .map_err(|_| TransportError::DeviceNotFound(device.info.device_path.clone()))?;
            if self.unopenable == Some(index) {
                return Err(TransportError::HidPermissionDenied(device.info.device_path.clone()));
            }
            Ok(self.devices[index].open())
        }
    }

    #[test]
    fn test_empty_registry() {
        let mut registry = DeviceRegistry::new(Vec::new());
        assert!(registry.is_empty());
        assert!(matches!(registry.current(), Err(PanelError::NoDevice)));
        assert!(matches!(
            registry.select(0),
            Err(PanelError::InvalidDevice { index: 0, count: 0 })
        ));
    }

    #[test]
    fn test_select_out_of_range_keeps_selection() {
        let devices = vec![LoopbackDevice::new("a"), LoopbackDevice::new("b")];
        let mut registry =
            DeviceRegistry::new(devices.iter().map(|d| PanelSession::new(d.open())).collect());
        registry.select(1).unwrap();
        assert!(matches!(
            registry.select(5),
            Err(PanelError::InvalidDevice { index: 5, count: 2 })
        ));
        assert_eq!(registry.current_index(), 1);
        assert_eq!(registry.current().unwrap().info().device_path, "b");
    }

    #[test]
    fn test_discover_keeps_unopenable_slot() {
        let discovery = FakeDiscovery {
            devices: vec![LoopbackDevice::default(), LoopbackDevice::default()],
            unopenable: Some(0),
        };
        let registry = DeviceRegistry::discover(&discovery).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(!registry.get(0).unwrap().is_open());
        assert!(registry.get(1).unwrap().is_open());
        assert!(matches!(
            registry.current().unwrap().get_driver_type(),
            Err(PanelError::NoDevice)
        ));
    }

    #[test]
    fn test_drop_releases_every_handle() {
        let devices = vec![LoopbackDevice::new("a"), LoopbackDevice::new("b")];
        let registry =
            DeviceRegistry::new(devices.iter().map(|d| PanelSession::new(d.open())).collect());
        assert_eq!(devices[0].open_handles() + devices[1].open_handles(), 2);
        drop(registry);
        assert_eq!(devices[0].open_handles() + devices[1].open_handles(), 0);
    }
}
