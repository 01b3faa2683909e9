use std::path::PathBuf;

use thiserror::Error;

/// Reasons a media file could not be opened for playback
#[derive(Debug, Error)]
pub enum OpenError {
    #[error("failed to open {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: ffmpeg_next::Error,
    },
    #[error("no video stream found")]
    NoVideoStream,
    #[error("codec setup failed: {0}")]
    Codec(#[from] ffmpeg_next::Error),
    #[error("no audio output device: {0}")]
    AudioOutput(#[from] rodio::StreamError),
    #[error("failed to create audio sink: {0}")]
    AudioSink(#[from] rodio::PlayError),
    #[error("failed to start decoder thread: {0}")]
    DecoderThread(#[from] std::io::Error),
}
