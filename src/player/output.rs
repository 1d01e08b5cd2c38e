//! Audio output using cpal, driven by a symphonia decoder thread.
//!
//! The engine is created cheaply; the device, stream and decoder thread are
//! only opened by the first `configure_session` call. After that:
//! - The decoder thread owns the [`AudioDecoder`] and [`Resampler`]
//! - Decoded chunks flow to the cpal callback through a bounded channel
//! - The callback applies volume and tracks the playback position
//! - Events flow back to the UI thread through an unbounded channel

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, Stream, StreamConfig};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError, bounded, unbounded};
use parking_lot::RwLock;

use super::PlayerError;
use super::decoder::AudioDecoder;
use super::engine::PlaybackEngine;
use super::resampler::{Resampler, remix};
use super::state::{AudioData, EngineCommand, EngineEvent, LoadToken};

/// How long the decoder thread waits for commands when it has nothing to decode.
const IDLE_WAIT: Duration = Duration::from_millis(10);

/// Commands buffered for the decoder thread.
const COMMAND_QUEUE: usize = 32;

/// Decoded chunks buffered ahead of the device.
const CHUNK_QUEUE: usize = 8;

/// State shared between the decoder thread and the output callback.
#[derive(Debug)]
struct OutputState {
    playing: bool,
    volume: f32,
    /// Bumped on every prepare and seek; older chunks are discarded
    generation: u64,
    token: LoadToken,
    /// Position of the most recently played sample, in seconds
    position: f64,
}

impl OutputState {
    fn new(volume: f32) -> Self {
        Self {
            playing: false,
            volume,
            generation: 0,
            token: LoadToken::default(),
            position: 0.0,
        }
    }
}

/// A chunk of device-ready interleaved samples.
struct AudioChunk {
    generation: u64,
    samples: Vec<f32>,
    /// Song position of the first frame, in seconds
    timestamp: f64,
}

/// cpal-backed [`PlaybackEngine`].
pub struct CpalEngine {
    time_update_interval: Duration,
    volume: f32,
    session: Option<Session>,
    event_tx: Sender<EngineEvent>,
    event_rx: Receiver<EngineEvent>,
}

/// An open output stream plus its decoder thread.
struct Session {
    command_tx: Sender<EngineCommand>,
    _stream: Stream,
    decoder_thread: Option<JoinHandle<()>>,
}

impl Drop for Session {
    fn drop(&mut self) {
        let _ = self.command_tx.send(EngineCommand::Shutdown);
        if let Some(handle) = self.decoder_thread.take()
            && handle.join().is_err()
        {
            tracing::warn!("Decoder thread panicked");
        }
    }
}

impl CpalEngine {
    /// Create an engine. No device is touched until `configure_session`.
    pub fn new(time_update_interval: Duration, volume: f32) -> Self {
        let (event_tx, event_rx) = unbounded();
        Self {
            time_update_interval,
            volume: volume.clamp(0.0, 1.0),
            session: None,
            event_tx,
            event_rx,
        }
    }

    fn send(&self, command: EngineCommand) -> Result<(), PlayerError> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| PlayerError::Session("audio session not configured".to_string()))?;
        session
            .command_tx
            .send(command)
            .map_err(|_| PlayerError::ChannelClosed)
    }

    fn open_session(&self) -> Result<Session, PlayerError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| PlayerError::Session("No output device found".to_string()))?;

        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        tracing::info!("Using audio device: {}", device_name);

        let supported_config = device
            .default_output_config()
            .map_err(|e| PlayerError::Session(e.to_string()))?;

        let sample_rate = supported_config.sample_rate().0;
        let channels = supported_config.channels();
        tracing::info!("Audio format: {}Hz, {} channels", sample_rate, channels);

        let config = StreamConfig {
            channels,
            sample_rate: supported_config.sample_rate(),
            buffer_size: cpal::BufferSize::Default,
        };

        let state = Arc::new(RwLock::new(OutputState::new(self.volume)));
        let (command_tx, command_rx) = bounded::<EngineCommand>(COMMAND_QUEUE);
        let (audio_tx, audio_rx) = bounded::<AudioChunk>(CHUNK_QUEUE);

        let ctx = DecoderContext {
            state: Arc::clone(&state),
            audio_tx,
            event_tx: self.event_tx.clone(),
            output_rate: sample_rate,
            output_channels: usize::from(channels),
            time_update_interval: self.time_update_interval,
            track: None,
            pending: None,
            draining: false,
            finished: false,
            last_update: Instant::now(),
        };

        let decoder_thread = thread::Builder::new()
            .name("audio-decoder".to_string())
            .spawn(move || decoder_thread_main(ctx, command_rx))
            .map_err(|e| PlayerError::Session(e.to_string()))?;

        let reader = ChunkReader::new(audio_rx, sample_rate, usize::from(channels));
        let stream = match supported_config.sample_format() {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, reader, state),
            SampleFormat::I16 => build_stream::<i16>(&device, &config, reader, state),
            SampleFormat::U16 => build_stream::<u16>(&device, &config, reader, state),
            format => {
                let _ = command_tx.send(EngineCommand::Shutdown);
                return Err(PlayerError::Session(format!(
                    "Unsupported sample format: {:?}",
                    format
                )));
            }
        }
        .map_err(|e| PlayerError::Session(e.to_string()))?;

        stream
            .play()
            .map_err(|e| PlayerError::Session(e.to_string()))?;

        Ok(Session {
            command_tx,
            _stream: stream,
            decoder_thread: Some(decoder_thread),
        })
    }
}

impl PlaybackEngine for CpalEngine {
    fn configure_session(&mut self) -> Result<(), PlayerError> {
        if self.session.is_none() {
            self.session = Some(self.open_session()?);
        }
        Ok(())
    }

    fn prepare(&mut self, token: LoadToken, data: AudioData) -> Result<(), PlayerError> {
        self.send(EngineCommand::Prepare(token, data))
    }

    fn play(&mut self) -> Result<(), PlayerError> {
        self.send(EngineCommand::Play)
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        self.send(EngineCommand::Pause)
    }

    fn seek(&mut self, seconds: f64) -> Result<(), PlayerError> {
        self.send(EngineCommand::Seek(seconds))
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        self.event_rx.try_iter().collect()
    }
}

/// Pulls chunks for the output callback, dropping stale generations.
struct ChunkReader {
    audio_rx: Receiver<AudioChunk>,
    current: Option<(AudioChunk, usize)>,
    sample_rate: u32,
    channels: usize,
}

impl ChunkReader {
    fn new(audio_rx: Receiver<AudioChunk>, sample_rate: u32, channels: usize) -> Self {
        Self {
            audio_rx,
            current: None,
            sample_rate,
            channels: channels.max(1),
        }
    }

    /// Fill `data` with samples, or silence when paused or starved.
    fn fill<T>(&mut self, data: &mut [T], state: &RwLock<OutputState>)
    where
        T: cpal::Sample + cpal::FromSample<f32>,
    {
        let (playing, volume, generation) = {
            let s = state.read();
            (s.playing, s.volume, s.generation)
        };

        if !playing {
            data.fill(T::EQUILIBRIUM);
            return;
        }

        let mut output_pos = 0;
        while output_pos < data.len() {
            if self.current.is_none() {
                match self.audio_rx.try_recv() {
                    Ok(chunk) if chunk.generation != generation => continue,
                    Ok(chunk) => self.current = Some((chunk, 0)),
                    Err(_) => {
                        // Underrun
                        data[output_pos..].fill(T::EQUILIBRIUM);
                        return;
                    }
                }
            }

            let Some((ref chunk, ref mut chunk_pos)) = self.current else {
                break;
            };
            if chunk.generation != generation {
                self.current = None;
                continue;
            }

            let to_copy = (chunk.samples.len() - *chunk_pos).min(data.len() - output_pos);
            for (out, sample) in data[output_pos..output_pos + to_copy]
                .iter_mut()
                .zip(&chunk.samples[*chunk_pos..*chunk_pos + to_copy])
            {
                *out = T::from_sample(sample * volume);
            }
            *chunk_pos += to_copy;
            output_pos += to_copy;

            let frames_played = (*chunk_pos / self.channels) as f64;
            let position = chunk.timestamp + frames_played / f64::from(self.sample_rate);
            {
                let mut s = state.write();
                if s.generation == generation {
                    s.position = position;
                }
            }

            if *chunk_pos >= chunk.samples.len() {
                self.current = None;
            }
        }
    }
}

fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    mut reader: ChunkReader,
    state: Arc<RwLock<OutputState>>,
) -> Result<Stream, cpal::BuildStreamError>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| reader.fill(data, &state),
        |err| {
            tracing::error!("Audio stream error: {}", err);
        },
        None,
    )
}

/// The song currently open on the decoder thread.
struct Track {
    decoder: AudioDecoder,
    resampler: Resampler,
    channels: usize,
    duration: f64,
}

/// Decoder thread context - encapsulates mutable state
struct DecoderContext {
    state: Arc<RwLock<OutputState>>,
    audio_tx: Sender<AudioChunk>,
    event_tx: Sender<EngineEvent>,
    output_rate: u32,
    output_channels: usize,
    time_update_interval: Duration,
    track: Option<Track>,
    /// A chunk the device queue had no room for
    pending: Option<AudioChunk>,
    /// Decoder hit end of stream; waiting for the device to drain
    draining: bool,
    finished: bool,
    last_update: Instant,
}

impl DecoderContext {
    fn token(&self) -> LoadToken {
        self.state.read().token
    }

    fn emit(&self, event: EngineEvent) {
        // Receiver gone means the engine was dropped; the thread exits on Shutdown
        let _ = self.event_tx.send(event);
    }

    /// Handle an engine command, returning whether to continue running.
    fn handle_command(&mut self, command: EngineCommand) -> bool {
        match command {
            EngineCommand::Prepare(token, data) => self.prepare(token, &data),
            EngineCommand::Play => self.play(),
            EngineCommand::Pause => self.state.write().playing = false,
            EngineCommand::Seek(seconds) => self.seek(seconds),
            EngineCommand::Shutdown => return false,
        }
        true
    }

    fn prepare(&mut self, token: LoadToken, data: &AudioData) {
        {
            let mut s = self.state.write();
            s.playing = false;
            s.generation += 1;
            s.token = token;
            s.position = 0.0;
        }
        self.track = None;
        self.pending = None;
        self.draining = false;
        self.finished = false;

        match self.open_track(data) {
            Ok(track) => {
                let duration = track.duration;
                tracing::info!(token = token.0, "Prepared {:.1}s of audio", duration);
                self.track = Some(track);
                self.emit(EngineEvent::Prepared { token, duration });
            }
            Err(e) => {
                tracing::error!(token = token.0, "Failed to open audio: {}", e);
                self.emit(EngineEvent::Failed {
                    token,
                    reason: e.to_string(),
                });
            }
        }
    }

    fn open_track(&self, data: &AudioData) -> Result<Track, PlayerError> {
        let decoder = AudioDecoder::open(data)?;
        let resampler = Resampler::new(decoder.sample_rate(), self.output_rate, decoder.channels())?;
        if resampler.needs_resampling() {
            tracing::debug!(target: "player::output", ratio = resampler.ratio(), "Resampling for output device");
        }
        Ok(Track {
            channels: usize::from(decoder.channels().max(1)),
            duration: decoder.duration(),
            decoder,
            resampler,
        })
    }

    fn play(&mut self) {
        if self.track.is_none() {
            return;
        }
        if self.finished {
            self.seek(0.0);
        }
        self.state.write().playing = true;
        self.last_update = Instant::now();
    }

    fn seek(&mut self, seconds: f64) {
        let Some(ref mut track) = self.track else {
            return;
        };
        if let Err(e) = track.decoder.seek(seconds) {
            tracing::warn!("Seek failed: {}", e);
            return;
        }
        track.resampler.reset();
        self.pending = None;
        self.draining = false;
        self.finished = false;

        let position = if track.duration > 0.0 {
            seconds.clamp(0.0, track.duration)
        } else {
            seconds.max(0.0)
        };
        let token = {
            let mut s = self.state.write();
            s.generation += 1;
            s.position = position;
            s.token
        };
        self.emit(EngineEvent::TimeUpdate {
            token,
            seconds: position,
        });
    }

    /// Whether there is decoding work the device queue has room for.
    fn wants_decode(&self) -> bool {
        self.track.is_some()
            && !self.draining
            && !self.finished
            && self.state.read().playing
            && !self.audio_tx.is_full()
    }

    /// Decode the next packet and queue it. Returns false if the callback side is gone.
    fn decode_and_send(&mut self) -> bool {
        if let Some(chunk) = self.pending.take() {
            return self.try_queue(chunk);
        }

        let generation = self.state.read().generation;
        let output_channels = self.output_channels;
        let Some(ref mut track) = self.track else {
            return true;
        };

        let mut samples = Vec::with_capacity(4096);
        match track.decoder.decode_next(|s| samples.extend_from_slice(s)) {
            Ok(Some(frame)) => {
                let resampled = track.resampler.process(&samples);
                if resampled.is_empty() {
                    return true;
                }
                let chunk = AudioChunk {
                    generation,
                    samples: remix(&resampled, track.channels, output_channels),
                    timestamp: frame.timestamp,
                };
                self.try_queue(chunk)
            }
            Ok(None) => {
                let tail = track.resampler.flush();
                let timestamp = self.state.read().position;
                let channels = track.channels;
                self.draining = true;
                if tail.is_empty() {
                    return true;
                }
                let chunk = AudioChunk {
                    generation,
                    samples: remix(&tail, channels, output_channels),
                    timestamp,
                };
                self.try_queue(chunk)
            }
            Err(e) => {
                tracing::error!("Decode error: {}", e);
                let token = self.token();
                self.state.write().playing = false;
                self.track = None;
                self.emit(EngineEvent::Failed {
                    token,
                    reason: e.to_string(),
                });
                true
            }
        }
    }

    fn try_queue(&mut self, chunk: AudioChunk) -> bool {
        match self.audio_tx.try_send(chunk) {
            Ok(()) => true,
            Err(TrySendError::Full(chunk)) => {
                self.pending = Some(chunk);
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Post throttled time updates and detect the end of playback.
    fn report_progress(&mut self) {
        let (playing, token, position) = {
            let s = self.state.read();
            (s.playing, s.token, s.position)
        };
        if !playing {
            return;
        }

        if self.draining && self.pending.is_none() && self.audio_tx.is_empty() {
            self.draining = false;
            self.finished = true;
            self.state.write().playing = false;
            tracing::info!(token = token.0, "Playback finished");
            self.emit(EngineEvent::Finished { token });
            return;
        }

        if self.last_update.elapsed() >= self.time_update_interval {
            self.last_update = Instant::now();
            self.emit(EngineEvent::TimeUpdate {
                token,
                seconds: position,
            });
        }
    }
}

/// Main loop for the decoder thread.
fn decoder_thread_main(mut ctx: DecoderContext, command_rx: Receiver<EngineCommand>) {
    loop {
        // Poll when there is decoding to do, otherwise wait briefly for commands
        let timeout = if ctx.wants_decode() {
            Duration::ZERO
        } else {
            IDLE_WAIT
        };

        match command_rx.recv_timeout(timeout) {
            Ok(command) => {
                if !ctx.handle_command(command) {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if ctx.wants_decode() && !ctx.decode_and_send() {
            break;
        }
        ctx.report_progress();
    }
    tracing::debug!("Decoder thread exiting");
}
