//! Microphone capture and low-band level analysis.
//!
//! Capture runs on the device's callback thread and fills a `SampleTap`; the
//! render loop reads the newest window once per frame through the `Analyser`
//! and folds it into a smoothed level with the `LevelSampler`.

mod analyser;
mod cpal_backend;
mod device;
mod input;
mod level;
mod tap;

// Re-export public types
pub use analyser::{hann_window, Analyser};
pub use cpal_backend::CpalBackend;
pub use device::{
    AudioBackend, CaptureStream, DeviceList, DeviceOption, InputDevice, DEFAULT_DEVICE_LABEL,
};
pub use input::{AudioInput, CaptureStatus};
pub use level::{LevelReading, LevelSampler};
pub use tap::SampleTap;
