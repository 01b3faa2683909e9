use anyhow::{anyhow, Context as _, Result};
use crossbeam_channel::{Receiver, Sender, TryRecvError, TrySendError};
use ffmpeg_next::format::context::Input;
use ffmpeg_next::format::Pixel;
use ffmpeg_next::frame::{Audio as AudioFrame, Video as VideoFrame};
use ffmpeg_next::media::Type;
use ffmpeg_next::software::resampling::Context as Resampler;
use ffmpeg_next::software::scaling::{Context as Scaler, Flags};
use ffmpeg_next::util::channel_layout::ChannelLayout;
use ffmpeg_next::util::format::sample::{Sample, Type as SampleType};
use ffmpeg_next::codec::decoder;
use ffmpeg_next::{codec, Packet, Rational};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::clock::PlaybackClock;
use super::sample_buffer::SampleBuffer;
use super::video::{reaches_seek_target, DecodedFrame};
use crate::error::OpenError;

/// Interleaved channel count delivered to the audio output
pub const OUTPUT_CHANNELS: u16 = 2;
/// Output rate used when the media has no audio track
const FALLBACK_SAMPLE_RATE: u32 = 44_100;
const IDLE_SLEEP: Duration = Duration::from_millis(10);
const BACKPRESSURE_SLEEP: Duration = Duration::from_millis(1);

/// Requests from the player to the decoder thread
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecoderCommand {
    Seek(u64),
    Pause,
    Resume,
    Stop,
}

/// Stream properties read before playback starts
#[derive(Debug, Clone)]
pub struct MediaInfo {
    pub width: u32,
    pub height: u32,
    pub duration_ms: u64,
    pub sample_rate: u32,
    pub has_audio: bool,
}

/// Read stream properties of `path` without decoding anything.
pub fn probe(path: &Path) -> Result<MediaInfo, OpenError> {
    let input = ffmpeg_next::format::input(path).map_err(|source| OpenError::Input {
        path: path.to_path_buf(),
        source,
    })?;

    let video_stream = input
        .streams()
        .best(Type::Video)
        .ok_or(OpenError::NoVideoStream)?;
    let video = codec::Context::from_parameters(video_stream.parameters())?
        .decoder()
        .video()?;

    let sample_rate = match input.streams().best(Type::Audio) {
        Some(stream) => codec::Context::from_parameters(stream.parameters())?
            .decoder()
            .audio()?
            .rate(),
        None => FALLBACK_SAMPLE_RATE,
    };

    let duration_ms = if input.duration() > 0 {
        (input.duration() as f64 / ffmpeg_next::ffi::AV_TIME_BASE as f64 * 1000.0) as u64
    } else {
        0
    };

    Ok(MediaInfo {
        width: video.width(),
        height: video.height(),
        duration_ms,
        sample_rate,
        has_audio: input.streams().best(Type::Audio).is_some(),
    })
}

/// Where decoded output goes
pub struct DecoderOutputs {
    pub frames: Sender<DecodedFrame>,
    pub samples: Arc<SampleBuffer>,
    pub clock: PlaybackClock,
}

/// Spawn the decoder thread for `path`. It starts paused.
pub fn spawn(
    path: &Path,
    outputs: DecoderOutputs,
    commands: Receiver<DecoderCommand>,
    stop_flag: Arc<AtomicBool>,
) -> Result<JoinHandle<()>, OpenError> {
    let path = path.to_path_buf();
    let handle = thread::Builder::new()
        .name("decoder".into())
        .spawn(move || {
            let result = DecodeSession::open(&path, outputs, commands, stop_flag)
                .and_then(|mut session| session.run());
            match result {
                Ok(()) => debug!(path = %path.display(), "Decoder finished"),
                Err(e) => error!(path = %path.display(), "Decoder error: {:#}", e),
            }
        })?;
    Ok(handle)
}

enum Flow {
    Continue,
    Exit,
}

struct AudioPipeline {
    stream_index: usize,
    decoder: decoder::Audio,
    resampler: Resampler,
}

struct DecodeSession {
    path: PathBuf,
    input: Input,
    video_index: usize,
    video_time_base: Rational,
    video: decoder::Video,
    scaler: Scaler,
    audio: Option<AudioPipeline>,
    outputs: DecoderOutputs,
    commands: Receiver<DecoderCommand>,
    stop_flag: Arc<AtomicBool>,
    paused: bool,
    at_eof: bool,
    pending_seek: Option<u64>,
    /// Target of the last seek until a frame near it has been sent. Decoding
    /// goes on while paused so the new position gets a picture.
    seek_floor: Option<u64>,
    /// Latest frame skipped for being before `seek_floor`
    stale: Option<VideoFrame>,
}

impl DecodeSession {
    fn open(
        path: &Path,
        outputs: DecoderOutputs,
        commands: Receiver<DecoderCommand>,
        stop_flag: Arc<AtomicBool>,
    ) -> Result<Self> {
        let input = ffmpeg_next::format::input(path)
            .with_context(|| format!("reopening {}", path.display()))?;

        let video_stream = input
            .streams()
            .best(Type::Video)
            .ok_or_else(|| anyhow!("No video stream"))?;
        let video_index = video_stream.index();
        let video_time_base = video_stream.time_base();
        let video = codec::Context::from_parameters(video_stream.parameters())?
            .decoder()
            .video()?;

        let scaler = Scaler::get(
            video.format(),
            video.width(),
            video.height(),
            Pixel::RGBA,
            video.width(),
            video.height(),
            Flags::BILINEAR,
        )
        .context("creating RGBA scaler")?;

        let audio = match input.streams().best(Type::Audio) {
            Some(stream) => {
                let decoder = codec::Context::from_parameters(stream.parameters())?
                    .decoder()
                    .audio()?;
                let resampler = Resampler::get(
                    decoder.format(),
                    decoder.channel_layout(),
                    decoder.rate(),
                    Sample::F32(SampleType::Packed),
                    ChannelLayout::STEREO,
                    outputs.clock.sample_rate(),
                )
                .context("creating audio resampler")?;
                Some(AudioPipeline {
                    stream_index: stream.index(),
                    decoder,
                    resampler,
                })
            }
            None => None,
        };

        info!(
            path = %path.display(),
            width = video.width(),
            height = video.height(),
            audio = audio.is_some(),
            "Decoder ready"
        );

        Ok(Self {
            path: path.to_path_buf(),
            input,
            video_index,
            video_time_base,
            video,
            scaler,
            audio,
            outputs,
            commands,
            stop_flag,
            paused: true,
            at_eof: false,
            pending_seek: None,
            seek_floor: None,
            stale: None,
        })
    }

    fn run(&mut self) -> Result<()> {
        loop {
            if self.stop_flag.load(Ordering::Relaxed) {
                return Ok(());
            }
            if let Flow::Exit = self.drain_commands() {
                return Ok(());
            }
            self.apply_pending_seek();

            if (self.paused && self.seek_floor.is_none()) || self.at_eof {
                thread::sleep(IDLE_SLEEP);
                continue;
            }

            let mut packet = Packet::empty();
            match packet.read(&mut self.input) {
                Ok(()) => {
                    if let Flow::Exit = self.decode_packet(&packet)? {
                        return Ok(());
                    }
                }
                Err(ffmpeg_next::Error::Eof) => {
                    debug!(path = %self.path.display(), "End of input");
                    self.at_eof = true;
                    if let Flow::Exit = self.flush_video()? {
                        return Ok(());
                    }
                    if let Flow::Exit = self.settle_seek_past_end()? {
                        return Ok(());
                    }
                }
                Err(e) => warn!("Skipping unreadable packet: {}", e),
            }
        }
    }

    fn drain_commands(&mut self) -> Flow {
        loop {
            match self.commands.try_recv() {
                Ok(command) => {
                    if let Flow::Exit = self.apply(command) {
                        return Flow::Exit;
                    }
                }
                Err(TryRecvError::Empty) => return Flow::Continue,
                Err(TryRecvError::Disconnected) => return Flow::Exit,
            }
        }
    }

    fn apply(&mut self, command: DecoderCommand) -> Flow {
        match command {
            DecoderCommand::Stop => return Flow::Exit,
            DecoderCommand::Pause => {
                self.paused = true;
                self.outputs.clock.pause();
            }
            DecoderCommand::Resume => {
                self.paused = false;
                self.outputs.clock.resume();
            }
            DecoderCommand::Seek(target_ms) => self.pending_seek = Some(target_ms),
        }
        Flow::Continue
    }

    fn apply_pending_seek(&mut self) {
        let Some(target_ms) = self.pending_seek.take() else {
            return;
        };

        let target_ts = target_ms as i64 * (ffmpeg_next::ffi::AV_TIME_BASE as i64 / 1000);
        match self.input.seek(target_ts, ..target_ts) {
            Ok(()) => {
                self.video.flush();
                if let Some(audio) = self.audio.as_mut() {
                    audio.decoder.flush();
                }
                self.outputs.clock.set_position_ms(target_ms);
                self.at_eof = false;
                self.seek_floor = Some(target_ms);
                self.stale = None;
                debug!(target_ms, "Seeked");
            }
            Err(e) => warn!(target_ms, "Seek failed: {}", e),
        }
    }

    fn decode_packet(&mut self, packet: &Packet) -> Result<Flow> {
        let stream = packet.stream();
        if stream == self.video_index {
            self.video.send_packet(packet)?;
            return self.receive_video_frames();
        }

        if let Some(audio) = self.audio.as_mut() {
            if stream == audio.stream_index {
                audio.decoder.send_packet(packet)?;
                audio.drain_into(&self.outputs.samples);
            }
        }
        Ok(Flow::Continue)
    }

    fn flush_video(&mut self) -> Result<Flow> {
        self.video.send_eof()?;
        self.receive_video_frames()
    }

    fn receive_video_frames(&mut self) -> Result<Flow> {
        let mut decoded = VideoFrame::empty();

        while self.video.receive_frame(&mut decoded).is_ok() {
            let pts_ms = decoded
                .pts()
                .map(|pts| pts as f64 * f64::from(self.video_time_base) * 1000.0)
                .unwrap_or(0.0)
                .max(0.0) as u64;

            // Frames between the keyframe and the seek target are never shown
            if let Some(target) = self.seek_floor {
                if !reaches_seek_target(pts_ms, target) {
                    self.stale = Some(decoded.clone());
                    continue;
                }
            }

            let frame = self.convert(&decoded, pts_ms)?;
            if let Flow::Exit = self.send_frame(frame) {
                return Ok(Flow::Exit);
            }
            if self.pending_seek.is_some() {
                break;
            }
            self.seek_floor = None;
            self.stale = None;
        }
        Ok(Flow::Continue)
    }

    /// The input ended before reaching the seek target: show its last frame
    /// at the target instead.
    fn settle_seek_past_end(&mut self) -> Result<Flow> {
        let Some(target) = self.seek_floor.take() else {
            return Ok(Flow::Continue);
        };
        let Some(last) = self.stale.take() else {
            return Ok(Flow::Continue);
        };
        debug!(target_ms = target, "Seek target beyond the last frame");
        let frame = self.convert(&last, target)?;
        Ok(self.send_frame(frame))
    }

    fn convert(&mut self, decoded: &VideoFrame, pts_ms: u64) -> Result<DecodedFrame> {
        let mut rgba = VideoFrame::empty();
        self.scaler.run(decoded, &mut rgba)?;
        Ok(DecodedFrame {
            rgba: packed_rgba(&rgba),
            width: rgba.width(),
            height: rgba.height(),
            pts_ms,
        })
    }

    /// Send with backpressure, still answering commands while the UI is behind.
    /// A seek abandons the frame.
    fn send_frame(&mut self, mut frame: DecodedFrame) -> Flow {
        loop {
            if let Flow::Exit = self.drain_commands() {
                return Flow::Exit;
            }
            if self.pending_seek.is_some() {
                return Flow::Continue;
            }

            match self.outputs.frames.try_send(frame) {
                Ok(()) => return Flow::Continue,
                Err(TrySendError::Full(f)) => {
                    frame = f;
                    thread::sleep(BACKPRESSURE_SLEEP);
                }
                Err(TrySendError::Disconnected(_)) => return Flow::Exit,
            }
        }
    }
}

impl AudioPipeline {
    fn drain_into(&mut self, samples: &SampleBuffer) {
        let mut decoded = AudioFrame::empty();
        while self.decoder.receive_frame(&mut decoded).is_ok() {
            let mut resampled = AudioFrame::empty();
            if let Err(e) = self.resampler.run(&decoded, &mut resampled) {
                warn!("Resampling failed: {}", e);
                continue;
            }

            let len = resampled.samples() * OUTPUT_CHANNELS as usize * std::mem::size_of::<f32>();
            let data = resampled.data(0);
            let bytes = &data[..len.min(data.len())];
            match bytemuck::try_cast_slice::<u8, f32>(bytes) {
                Ok(interleaved) => samples.extend(interleaved),
                Err(e) => warn!("Dropping misaligned audio frame: {}", e),
            }
        }
    }
}

/// Copy plane 0 of an RGBA frame without its row padding.
fn packed_rgba(frame: &VideoFrame) -> Vec<u8> {
    let row = frame.width() as usize * 4;
    let stride = frame.stride(0);
    let data = frame.data(0);
    if stride == row {
        return data[..row * frame.height() as usize].to_vec();
    }
    data.chunks(stride)
        .take(frame.height() as usize)
        .flat_map(|line| &line[..row])
        .copied()
        .collect()
}
