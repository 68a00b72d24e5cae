//! Input device discovery and the backend seam.
//!
//! The backend is a trait so the capture session and device list can be driven
//! by a scripted host in tests; `CpalBackend` is the real one.

use super::tap::SampleTap;
use crate::error::AudioError;

/// An input device as reported by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDevice {
    pub id: String,
    pub label: String,
}

/// A live capture. Dropping it stops the stream and releases the device.
pub trait CaptureStream {
    /// Name of the device actually opened
    fn device_name(&self) -> &str;
}

/// Host audio API.
///
/// `open_capture` may block; it is only ever called from an acquisition worker.
pub trait AudioBackend: Send + Sync + 'static {
    fn input_devices(&self) -> Result<Vec<InputDevice>, AudioError>;

    /// Open `device_id` (or the host default for `None`) and stream mono samples
    /// into `tap` until the returned handle is dropped.
    fn open_capture(
        &self,
        device_id: Option<&str>,
        tap: SampleTap,
    ) -> Result<Box<dyn CaptureStream>, AudioError>;
}

/// Label of the leading "use the default device" entry
pub const DEFAULT_DEVICE_LABEL: &str = "Select Microphone...";

/// One selectable entry. An empty `id` means the host default device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceOption {
    pub id: String,
    pub label: String,
}

impl DeviceOption {
    pub fn default_device() -> Self {
        Self {
            id: String::new(),
            label: DEFAULT_DEVICE_LABEL.to_string(),
        }
    }

    /// Device id to open, `None` for the host default
    pub fn device_id(&self) -> Option<&str> {
        (!self.id.is_empty()).then_some(self.id.as_str())
    }
}

impl From<InputDevice> for DeviceOption {
    fn from(device: InputDevice) -> Self {
        let label = if device.label.is_empty() {
            let prefix: String = device.id.chars().take(5).collect();
            format!("Microphone {}", prefix)
        } else {
            device.label
        };
        Self {
            id: device.id,
            label,
        }
    }
}

/// Selectable device list: default placeholder first, then host inputs in host
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceList {
    options: Vec<DeviceOption>,
    selected: usize,
}

impl Default for DeviceList {
    fn default() -> Self {
        Self {
            options: vec![DeviceOption::default_device()],
            selected: 0,
        }
    }
}

impl DeviceList {
    /// Query the host once. On failure the list keeps only the placeholder.
    pub fn query(backend: &dyn AudioBackend) -> Result<Self, AudioError> {
        let devices = backend.input_devices()?;
        log::info!(
            "Found microphones: {:?}",
            devices.iter().map(|d| d.label.as_str()).collect::<Vec<_>>()
        );

        let mut list = Self::default();
        list.options.extend(devices.into_iter().map(DeviceOption::from));
        Ok(list)
    }

    pub fn options(&self) -> &[DeviceOption] {
        &self.options
    }

    pub fn selected(&self) -> &DeviceOption {
        &self.options[self.selected]
    }

    /// Select by id or label. Returns false if nothing matches.
    pub fn select(&mut self, name: &str) -> bool {
        match self
            .options
            .iter()
            .position(|o| !o.id.is_empty() && (o.id == name || o.label == name))
        {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    /// Advance to the next entry, wrapping to the placeholder.
    pub fn cycle(&mut self) -> &DeviceOption {
        self.selected = (self.selected + 1) % self.options.len();
        self.selected()
    }
}
