//! Audio decoder using symphonia for multi-format support.
//!
//! Decodes from an in-memory buffer, since songs are fetched whole before
//! playback starts. Supported formats:
//! - MP3
//! - FLAC
//! - OGG Vorbis
//! - WAV/PCM
//! - AAC (in MP4 container)

use std::io::Cursor;
use std::sync::Arc;

use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::{CODEC_TYPE_NULL, Decoder, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, SeekMode, SeekTo};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::{Time, TimeBase};

use super::PlayerError;
use super::state::AudioData;

/// Audio decoder wrapper for symphonia.
pub struct AudioDecoder {
    reader: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    track_id: u32,
    sample_rate: u32,
    channels: u16,
    /// Total duration in seconds (0 when the container doesn't say)
    duration: f64,
    time_base: Option<TimeBase>,
}

impl AudioDecoder {
    /// Open an encoded buffer for decoding.
    pub fn open(data: &AudioData) -> Result<Self, PlayerError> {
        let source = Cursor::new(Arc::clone(&data.bytes));
        let mss = MediaSourceStream::new(Box::new(source), Default::default());

        let mut hint = Hint::new();
        if let Some(ref ext) = data.extension {
            hint.with_extension(ext);
        }

        let format_opts = FormatOptions {
            enable_gapless: true,
            ..Default::default()
        };

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &format_opts, &MetadataOptions::default())
            .map_err(|e| PlayerError::UnsupportedFormat(e.to_string()))?;

        let reader = probed.format;

        let track = reader
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| PlayerError::UnsupportedFormat("No audio track found".to_string()))?;

        let track_id = track.id;
        let codec_params = track.codec_params.clone();

        let sample_rate = codec_params
            .sample_rate
            .ok_or_else(|| PlayerError::Decode("Unknown sample rate".to_string()))?;
        let channels = codec_params.channels.map(|c| c.count() as u16).unwrap_or(2);

        let time_base = codec_params.time_base;
        let duration = match (codec_params.n_frames, time_base) {
            (Some(n_frames), Some(tb)) => seconds(tb.calc_time(n_frames)),
            (Some(n_frames), None) => n_frames as f64 / f64::from(sample_rate),
            (None, _) => 0.0,
        };

        let decoder = symphonia::default::get_codecs()
            .make(&codec_params, &DecoderOptions::default())
            .map_err(|e| PlayerError::Decode(e.to_string()))?;

        Ok(Self {
            reader,
            decoder,
            track_id,
            sample_rate,
            channels,
            duration,
            time_base,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Total duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Seek to an absolute position in seconds.
    pub fn seek(&mut self, position: f64) -> Result<(), PlayerError> {
        let target = if self.duration > 0.0 {
            position.clamp(0.0, self.duration)
        } else {
            position.max(0.0)
        };

        let seek_to = SeekTo::Time {
            time: Time::from(target),
            track_id: Some(self.track_id),
        };

        self.reader
            .seek(SeekMode::Accurate, seek_to)
            .map_err(|e| PlayerError::Decode(format!("Seek failed: {}", e)))?;

        // Reset decoder state after seeking
        self.decoder.reset();
        Ok(())
    }

    /// Decode the next chunk of audio samples.
    ///
    /// Returns `Ok(None)` at end of stream.
    /// The callback receives interleaved f32 samples.
    pub fn decode_next<F>(&mut self, mut callback: F) -> Result<Option<DecodedFrame>, PlayerError>
    where
        F: FnMut(&[f32]),
    {
        loop {
            let packet = match self.reader.next_packet() {
                Ok(p) => p,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    return Ok(None);
                }
                Err(SymphoniaError::ResetRequired) => {
                    self.decoder.reset();
                    continue;
                }
                Err(e) => return Err(PlayerError::Decode(e.to_string())),
            };

            if packet.track_id() != self.track_id {
                continue;
            }

            let timestamp = self
                .time_base
                .map(|tb| seconds(tb.calc_time(packet.ts())))
                .unwrap_or(0.0);

            let decoded = match self.decoder.decode(&packet) {
                Ok(d) => d,
                Err(SymphoniaError::DecodeError(_)) => continue, // Skip bad frame
                Err(e) => return Err(PlayerError::Decode(e.to_string())),
            };

            let samples = convert_to_f32(&decoded);
            let frame = DecodedFrame {
                frames: samples.len() / usize::from(self.channels.max(1)),
                timestamp,
            };

            callback(&samples);
            return Ok(Some(frame));
        }
    }
}

fn seconds(time: Time) -> f64 {
    time.seconds as f64 + time.frac
}

/// Convert an audio buffer to interleaved f32 samples.
fn convert_to_f32(buffer: &AudioBufferRef) -> Vec<f32> {
    fn interleave<S: Copy>(planes: &[&[S]], frames: usize, f: impl Fn(S) -> f32) -> Vec<f32> {
        let mut output = Vec::with_capacity(frames * planes.len());
        for frame in 0..frames {
            for plane in planes {
                output.push(f(plane[frame]));
            }
        }
        output
    }

    match buffer {
        AudioBufferRef::F32(buf) => interleave(buf.planes().planes(), buf.frames(), |s| s),
        AudioBufferRef::S16(buf) => {
            interleave(buf.planes().planes(), buf.frames(), |s| f32::from(s) / 32768.0)
        }
        AudioBufferRef::S24(buf) => {
            interleave(buf.planes().planes(), buf.frames(), |s| s.0 as f32 / 8388608.0)
        }
        AudioBufferRef::S32(buf) => {
            interleave(buf.planes().planes(), buf.frames(), |s| s as f32 / 2147483648.0)
        }
        AudioBufferRef::U8(buf) => {
            interleave(buf.planes().planes(), buf.frames(), |s| (f32::from(s) - 128.0) / 128.0)
        }
        _ => Vec::new(),
    }
}

/// Information about a decoded frame.
#[derive(Debug, Clone, Copy)]
pub struct DecodedFrame {
    /// Number of frames (samples per channel) decoded
    pub frames: usize,
    /// Timestamp of this packet in seconds
    pub timestamp: f64,
}
