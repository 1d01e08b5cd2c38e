//! Sample-rate and channel-layout conversion for the output device.
//!
//! Songs arrive at whatever rate they were encoded at (commonly 44.1kHz) while
//! the device usually runs at 48kHz. Without conversion playback would be
//! pitched and the reported position would drift.

use rubato::{FftFixedIn, Resampler as RubatoResampler};

use super::PlayerError;

/// Frames per resampling block. Larger is cheaper but adds latency.
const CHUNK_FRAMES: usize = 1024;

/// Audio resampler wrapper.
pub struct Resampler {
    resampler: Option<FftFixedIn<f32>>,
    input_rate: u32,
    output_rate: u32,
    channels: usize,
    /// Per-channel input waiting for a full block
    input_buffer: Vec<Vec<f32>>,
}

impl Resampler {
    /// Create a resampler. Matching rates give a passthrough.
    pub fn new(input_rate: u32, output_rate: u32, channels: u16) -> Result<Self, PlayerError> {
        let channels = usize::from(channels.max(1));

        let resampler = if input_rate == output_rate {
            None
        } else {
            let inner = FftFixedIn::<f32>::new(
                input_rate as usize,
                output_rate as usize,
                CHUNK_FRAMES,
                2,
                channels,
            )
            .map_err(|e| PlayerError::Decode(format!("Resampler setup failed: {}", e)))?;
            tracing::info!(
                "Resampler: {}Hz → {}Hz ({} channels)",
                input_rate,
                output_rate,
                channels
            );
            Some(inner)
        };

        Ok(Self {
            resampler,
            input_rate,
            output_rate,
            channels,
            input_buffer: vec![Vec::new(); channels],
        })
    }

    pub fn needs_resampling(&self) -> bool {
        self.resampler.is_some()
    }

    /// Output rate divided by input rate.
    pub fn ratio(&self) -> f64 {
        f64::from(self.output_rate) / f64::from(self.input_rate)
    }

    /// Process interleaved samples, returning resampled interleaved output.
    ///
    /// Output may be shorter than expected: partial blocks are held back
    /// until enough input arrives.
    pub fn process(&mut self, input: &[f32]) -> Vec<f32> {
        let Some(ref mut resampler) = self.resampler else {
            return input.to_vec();
        };

        for (i, sample) in input.iter().enumerate() {
            self.input_buffer[i % self.channels].push(*sample);
        }

        let mut output = Vec::new();
        while self.input_buffer[0].len() >= CHUNK_FRAMES {
            let block: Vec<Vec<f32>> = self
                .input_buffer
                .iter_mut()
                .map(|ch| ch.drain(..CHUNK_FRAMES).collect())
                .collect();

            match resampler.process(&block, None) {
                Ok(resampled) => interleave_into(&resampled, usize::MAX, &mut output),
                Err(e) => tracing::warn!("Resampling error: {}", e),
            }
        }
        output
    }

    /// Flush held-back samples at end of stream.
    pub fn flush(&mut self) -> Vec<f32> {
        let Some(ref mut resampler) = self.resampler else {
            return Vec::new();
        };

        let remaining = self.input_buffer[0].len();
        if remaining == 0 {
            return Vec::new();
        }

        let mut block = std::mem::replace(&mut self.input_buffer, vec![Vec::new(); self.channels]);
        for ch in &mut block {
            ch.resize(CHUNK_FRAMES, 0.0);
        }

        let mut output = Vec::new();
        let expected_frames = (remaining as f64 * self.output_rate as f64 / self.input_rate as f64)
            .ceil() as usize;
        match resampler.process(&block, None) {
            Ok(resampled) => interleave_into(&resampled, expected_frames, &mut output),
            Err(e) => tracing::warn!("Resampling flush error: {}", e),
        }
        output
    }

    /// Drop buffered input (after a seek).
    pub fn reset(&mut self) {
        for ch in &mut self.input_buffer {
            ch.clear();
        }
        if let Some(ref mut resampler) = self.resampler {
            resampler.reset();
        }
    }
}

fn interleave_into(planes: &[Vec<f32>], max_frames: usize, output: &mut Vec<f32>) {
    let Some(first) = planes.first() else {
        return;
    };
    let frames = first.len().min(max_frames);
    output.reserve(frames * planes.len());
    for frame in 0..frames {
        for plane in planes {
            output.push(plane[frame]);
        }
    }
}

/// Convert interleaved samples between channel counts.
///
/// Mono is duplicated to every output channel; extra input channels are
/// dropped; missing output channels repeat the last input channel.
pub fn remix(input: &[f32], in_channels: usize, out_channels: usize) -> Vec<f32> {
    if in_channels == out_channels || in_channels == 0 || out_channels == 0 {
        return input.to_vec();
    }

    let frames = input.len() / in_channels;
    let mut output = Vec::with_capacity(frames * out_channels);
    for frame in input.chunks_exact(in_channels) {
        for ch in 0..out_channels {
            output.push(frame[ch.min(in_channels - 1)]);
        }
    }
    output
}
