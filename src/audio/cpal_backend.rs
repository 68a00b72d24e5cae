//! cpal host backend: enumerates inputs and streams microphone samples into a tap.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};

use super::device::{AudioBackend, CaptureStream, InputDevice};
use super::tap::SampleTap;
use crate::error::AudioError;

/// Default cpal host. Device ids are device names (cpal has no stable ids).
#[derive(Debug, Default, Clone, Copy)]
pub struct CpalBackend;

struct CpalCapture {
    name: String,
    /// Input stream (kept alive; dropping it stops capture)
    _stream: cpal::Stream,
}

impl CaptureStream for CpalCapture {
    fn device_name(&self) -> &str {
        &self.name
    }
}

impl AudioBackend for CpalBackend {
    fn input_devices(&self) -> Result<Vec<InputDevice>, AudioError> {
        let host = cpal::default_host();
        let devices = host
            .input_devices()
            .map_err(|e| AudioError::Unsupported(e.to_string()))?;

        Ok(devices
            .filter_map(|device| device.name().ok())
            .map(|name| InputDevice {
                id: name.clone(),
                label: name,
            })
            .collect())
    }

    fn open_capture(
        &self,
        device_id: Option<&str>,
        tap: SampleTap,
    ) -> Result<Box<dyn CaptureStream>, AudioError> {
        let host = cpal::default_host();

        let device = match device_id {
            Some(id) => host
                .input_devices()
                .map_err(|e| AudioError::Unsupported(e.to_string()))?
                .find(|d| d.name().map(|n| n == id).unwrap_or(false))
                .ok_or_else(|| AudioError::DeviceNotFound(id.to_string()))?,
            None => host
                .default_input_device()
                .ok_or_else(|| AudioError::Unsupported("no audio input device found".into()))?,
        };

        let name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        let config = device
            .default_input_config()
            .map_err(|e| AudioError::Denied(format!("failed to get input config: {}", e)))?;

        log::info!(
            "Audio input: {} @ {}Hz, {} channel(s)",
            name,
            config.sample_rate().0,
            config.channels()
        );

        let channels = config.channels() as usize;
        let sample_format = config.sample_format();
        let stream_config: cpal::StreamConfig = config.into();

        let stream = match sample_format {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, channels, tap),
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, channels, tap),
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, channels, tap),
            other => Err(AudioError::Unsupported(format!(
                "unsupported sample format {:?}",
                other
            ))),
        }?;

        stream
            .play()
            .map_err(|e| AudioError::Backend(format!("failed to start input stream: {}", e)))?;

        Ok(Box::new(CpalCapture {
            name,
            _stream: stream,
        }))
    }
}

/// Build an input stream converting `T` samples to f32 before tapping them.
fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    tap: SampleTap,
) -> Result<cpal::Stream, AudioError>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let mut converted: Vec<f32> = Vec::new();

    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                converted.clear();
                converted.extend(data.iter().map(|&s| f32::from_sample(s)));
                tap.push_interleaved(&converted, channels);
            },
            |err| log::warn!("Audio input stream error: {}", err),
            None,
        )
        .map_err(|e| match e {
            cpal::BuildStreamError::DeviceNotAvailable => AudioError::Denied(e.to_string()),
            cpal::BuildStreamError::StreamConfigNotSupported => {
                AudioError::Unsupported(e.to_string())
            }
            other => AudioError::Backend(other.to_string()),
        })
}
