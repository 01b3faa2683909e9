//! FFmpeg + rodio backed media engine.

mod audio;
mod clock;
mod decoder;
mod facade;
mod sample_buffer;
mod timeline;
mod video;

use crossbeam_channel::{bounded, Sender};
use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::info;

use crate::control::command::MAX_VOLUME;
use crate::error::OpenError;
use audio::ClockedSource;
use clock::PlaybackClock;
use decoder::{DecoderCommand, DecoderOutputs, OUTPUT_CHANNELS};
use sample_buffer::SampleBuffer;
use timeline::{PlayStart, Timeline};
use video::{DecodedFrame, FrameQueue};

pub use facade::PlaybackFacade;

/// Decoded frames buffered between the decoder and the UI
const FRAME_QUEUE_LEN: usize = 30;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Stopped,
    Playing,
    Paused,
}

/// Change notifications, collected with [`VideoPlayer::take_events`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    StateChanged(PlayerState),
    PositionChanged(u64),
    DurationChanged(u64),
}

/// Plays one media file
pub struct VideoPlayer {
    timeline: Timeline,
    volume: u8,
    muted: bool,

    width: u32,
    height: u32,

    decoder_handle: Option<JoinHandle<()>>,
    commands: Sender<DecoderCommand>,
    stop_flag: Arc<AtomicBool>,

    _output_stream: OutputStream,
    _stream_handle: OutputStreamHandle,
    sink: Sink,
    clock: PlaybackClock,

    frames: FrameQueue,
    texture: TextureHandle,
}

impl VideoPlayer {
    /// Open `path` and prepare it for playback. The player starts stopped
    /// with the first frame shown.
    pub fn open(path: &Path, ctx: Context) -> Result<Self, OpenError> {
        let info = decoder::probe(path)?;
        info!(
            path = %path.display(),
            width = info.width,
            height = info.height,
            duration_ms = info.duration_ms,
            "Opened media"
        );

        let clock = PlaybackClock::new(info.sample_rate, OUTPUT_CHANNELS);

        let (output_stream, stream_handle) = OutputStream::try_default()?;
        let sink = Sink::try_new(&stream_handle)?;

        // About one second of audio
        let samples = SampleBuffer::new(info.sample_rate as usize * OUTPUT_CHANNELS as usize);
        sink.append(ClockedSource::new(samples.clone(), clock.clone(), !info.has_audio));
        sink.pause();

        let (frame_sender, frame_receiver) = bounded(FRAME_QUEUE_LEN);
        let (commands, command_receiver) = bounded(16);

        let stop_flag = Arc::new(AtomicBool::new(false));
        let decoder_handle = decoder::spawn(
            path,
            DecoderOutputs {
                frames: frame_sender,
                samples,
                clock: clock.clone(),
            },
            command_receiver,
            stop_flag.clone(),
        )?;

        let texture = ctx.load_texture(
            "video_frame",
            ColorImage::new(
                [info.width as usize, info.height as usize],
                egui::Color32::BLACK,
            ),
            TextureOptions::LINEAR,
        );

        let mut player = Self {
            timeline: Timeline::new(info.duration_ms),
            volume: MAX_VOLUME,
            muted: false,
            width: info.width,
            height: info.height,
            decoder_handle: Some(decoder_handle),
            commands,
            stop_flag,
            _output_stream: output_stream,
            _stream_handle: stream_handle,
            sink,
            clock,
            frames: FrameQueue::new(frame_receiver, FRAME_QUEUE_LEN),
            texture,
        };

        player.seek(0);
        Ok(player)
    }

    fn send(&self, command: DecoderCommand) {
        // The decoder only goes away when it failed, which it already logged
        let _ = self.commands.send(command);
    }

    fn seek(&mut self, position: u64) {
        let target = self.timeline.begin_seek(position);
        self.restart_decoding_at(target);
    }

    fn restart_decoding_at(&mut self, target: u64) {
        // Stop the clock from running ahead until the first frame arrives
        self.sink.pause();
        self.frames.clear();
        self.clock.set_position_ms(target);
        self.send(DecoderCommand::Seek(target));
    }

    fn apply_volume(&self) {
        let level = if self.muted {
            0.0
        } else {
            self.volume as f32 / MAX_VOLUME as f32
        };
        self.sink.set_volume(level);
    }

    fn show(&mut self, frame: &DecodedFrame) {
        let image = ColorImage::from_rgba_unmultiplied(
            [frame.width as usize, frame.height as usize],
            &frame.rgba,
        );
        self.texture.set(image, TextureOptions::LINEAR);
    }

    /// Advance playback: upload due frames, detect end of media, queue
    /// position events. Call once per UI frame.
    pub fn update(&mut self, ctx: &Context) {
        if let Some(target) = self.timeline.seek_target() {
            if let Some(frame) = self.frames.first_after_seek(target) {
                self.show(&frame);
                self.clock.set_position_ms(frame.pts_ms);
                self.timeline.finish_seek();
                if self.timeline.state() == PlayerState::Playing {
                    self.sink.play();
                }
            }
            ctx.request_repaint();
            return;
        }

        if self.timeline.state() != PlayerState::Playing {
            return;
        }

        let now = self.clock.position_ms();
        if let Some(frame) = self.frames.next_due(now) {
            self.show(&frame);
        }

        if self.timeline.tick(now, self.frames.is_drained()) {
            info!("End of media");
            self.sink.pause();
            self.send(DecoderCommand::Pause);
        }

        ctx.request_repaint();
    }

    /// Drain change notifications queued since the last call.
    pub fn take_events(&mut self) -> Vec<PlayerEvent> {
        self.timeline.take_events()
    }

    pub fn state(&self) -> PlayerState {
        self.timeline.state()
    }

    pub fn is_seeking(&self) -> bool {
        self.timeline.is_seeking()
    }

    pub fn texture(&self) -> &TextureHandle {
        &self.texture
    }

    pub fn video_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl PlaybackFacade for VideoPlayer {
    fn play(&mut self) {
        match self.timeline.play() {
            PlayStart::AlreadyPlaying => return,
            // Replaying a finished file starts over
            PlayStart::Restart => self.seek(0),
            PlayStart::Resume => {}
        }
        if !self.timeline.is_seeking() {
            self.sink.play();
        }
        self.send(DecoderCommand::Resume);
    }

    fn pause(&mut self) {
        if self.timeline.pause() {
            self.sink.pause();
            self.send(DecoderCommand::Pause);
        }
    }

    fn stop(&mut self) {
        let target = self.timeline.stop();
        self.send(DecoderCommand::Pause);
        self.restart_decoding_at(target);
    }

    fn is_playing(&self) -> bool {
        self.timeline.state() == PlayerState::Playing
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.apply_volume();
    }

    fn position(&self) -> u64 {
        self.timeline.position(self.clock.position_ms())
    }

    fn set_position(&mut self, position_ms: u64) {
        self.seek(position_ms);
    }

    fn duration(&self) -> u64 {
        self.timeline.duration()
    }

    fn volume(&self) -> u8 {
        self.volume
    }

    fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(MAX_VOLUME);
        self.apply_volume();
    }
}

impl Drop for VideoPlayer {
    fn drop(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        self.send(DecoderCommand::Stop);

        if let Some(handle) = self.decoder_handle.take() {
            let _ = handle.join();
        }
    }
}
