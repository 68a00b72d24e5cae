//! Microphone capture session with a single acquisition slot.
//!
//! Opening a device can block (and on some hosts prompt the user), so each
//! request runs on its own worker thread and the render loop only polls for the
//! outcome. A new request replaces the slot: the old capture is told to stop, and
//! the new worker joins the old one before opening anything, so two captures are
//! never live at the same time. Only the newest request's outcome is honored.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::device::AudioBackend;
use super::tap::SampleTap;
use crate::error::AudioError;

/// Capture state, mirrored in the status line
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureStatus {
    Idle,
    Requesting,
    Active { device: String },
    Unsupported { reason: String },
    Failed { reason: String },
}

impl CaptureStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Enable Audio",
            Self::Requesting => "Requesting...",
            Self::Active { .. } => "Audio Active",
            Self::Unsupported { .. } => "Not Supported",
            Self::Failed { .. } => "Error / Denied",
        }
    }

    /// Platform-style error reason, if capture failed
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Unsupported { reason } | Self::Failed { reason } => Some(reason),
            _ => None,
        }
    }
}

struct Outcome {
    generation: u64,
    result: Result<String, AudioError>,
}

/// The in-flight or live capture
struct Slot {
    /// Dropping this tells the worker to release its capture
    stop: Sender<()>,
    worker: JoinHandle<()>,
}

pub struct AudioInput {
    backend: Arc<dyn AudioBackend>,
    tap_capacity: usize,
    tap: SampleTap,
    status: CaptureStatus,
    generation: u64,
    slot: Option<Slot>,
    outcomes_tx: Sender<Outcome>,
    outcomes_rx: Receiver<Outcome>,
}

impl AudioInput {
    pub fn new(backend: Arc<dyn AudioBackend>, tap_capacity: usize) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::channel();
        Self {
            backend,
            tap_capacity,
            tap: SampleTap::new(tap_capacity),
            status: CaptureStatus::Idle,
            generation: 0,
            slot: None,
            outcomes_tx,
            outcomes_rx,
        }
    }

    pub fn status(&self) -> &CaptureStatus {
        &self.status
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, CaptureStatus::Active { .. })
    }

    /// Samples of the live capture, if any
    pub fn tap(&self) -> Option<&SampleTap> {
        self.is_active().then_some(&self.tap)
    }

    /// Start capturing from `device_id` (host default for `None`), releasing any
    /// current capture first. Never blocks.
    pub fn request(&mut self, device_id: Option<&str>) {
        self.generation += 1;
        let generation = self.generation;

        // Fresh tap: a stream still winding down must not feed the new one
        self.tap = SampleTap::new(self.tap_capacity);
        let previous = self.slot.take().map(|slot| {
            drop(slot.stop);
            slot.worker
        });

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let backend = Arc::clone(&self.backend);
        let tap = self.tap.clone();
        let outcomes = self.outcomes_tx.clone();
        let device_id = device_id.map(str::to_string);

        log::info!(
            "Requesting audio input: {}",
            device_id.as_deref().unwrap_or("default device")
        );

        let spawned = thread::Builder::new()
            .name("audio-capture".into())
            .spawn(move || {
                if let Some(previous) = previous {
                    let _ = previous.join();
                }

                match backend.open_capture(device_id.as_deref(), tap) {
                    Ok(capture) => {
                        let _ = outcomes.send(Outcome {
                            generation,
                            result: Ok(capture.device_name().to_string()),
                        });
                        // Blocks until the slot is replaced or the session ends
                        let _ = stop_rx.recv();
                        log::debug!("Releasing audio input: {}", capture.device_name());
                        drop(capture);
                    }
                    Err(e) => {
                        let _ = outcomes.send(Outcome {
                            generation,
                            result: Err(e),
                        });
                    }
                }
            });

        match spawned {
            Ok(worker) => {
                self.slot = Some(Slot {
                    stop: stop_tx,
                    worker,
                });
                self.status = CaptureStatus::Requesting;
            }
            Err(e) => {
                log::warn!("Audio init failed: could not spawn capture worker: {}", e);
                self.status = CaptureStatus::Failed {
                    reason: "AbortError".to_string(),
                };
            }
        }
    }

    /// Re-request with a new device, but only if capture is already wanted.
    /// Returns true if a request was issued.
    pub fn switch_device(&mut self, device_id: Option<&str>) -> bool {
        match self.status {
            CaptureStatus::Active { .. } | CaptureStatus::Requesting => {
                self.request(device_id);
                true
            }
            _ => false,
        }
    }

    /// Pick up finished acquisitions. Call once per frame. Returns true if the
    /// status changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;

        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            if outcome.generation != self.generation {
                continue;
            }

            self.status = match outcome.result {
                Ok(device) => {
                    log::info!("Microphone access granted: {}", device);
                    CaptureStatus::Active { device }
                }
                Err(e) => {
                    log::warn!("Audio init failed: {}", e);
                    let reason = e.reason().to_string();
                    match e {
                        AudioError::Unsupported(_) => CaptureStatus::Unsupported { reason },
                        _ => CaptureStatus::Failed { reason },
                    }
                }
            };
            changed = true;
        }

        changed
    }

    /// Release the capture and wait for the device to close.
    pub fn stop(&mut self) {
        self.generation += 1;
        if let Some(slot) = self.slot.take() {
            drop(slot.stop);
            let _ = slot.worker.join();
        }
        self.status = CaptureStatus::Idle;
    }
}

impl Drop for AudioInput {
    fn drop(&mut self) {
        self.stop();
    }
}
