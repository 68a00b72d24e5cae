//! Shared ring of the newest captured mono samples.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// Written by the device callback thread, read once per frame by the analyser.
#[derive(Clone)]
pub struct SampleTap {
    samples: Arc<Mutex<VecDeque<f32>>>,
    capacity: usize,
}

impl SampleTap {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Append interleaved frames, averaging channels down to mono.
    pub fn push_interleaved(&self, data: &[f32], channels: usize) {
        let channels = channels.max(1);
        let mut samples = self.samples.lock().unwrap_or_else(PoisonError::into_inner);

        for frame in data.chunks_exact(channels) {
            samples.push_back(frame.iter().sum::<f32>() / channels as f32);
        }

        let excess = samples.len().saturating_sub(self.capacity);
        samples.drain(..excess);
    }

    /// Copy the newest `out.len()` samples into `out`, oldest first. When fewer
    /// are available the front is zero-filled. Returns how many were real.
    pub fn latest(&self, out: &mut [f32]) -> usize {
        let samples = self.samples.lock().unwrap_or_else(PoisonError::into_inner);
        let available = samples.len().min(out.len());
        let pad = out.len() - available;

        out[..pad].fill(0.0);
        for (slot, &s) in out[pad..]
            .iter_mut()
            .zip(samples.iter().skip(samples.len() - available))
        {
            *slot = s;
        }

        available
    }

    pub fn len(&self) -> usize {
        self.samples
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
