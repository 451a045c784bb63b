use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while opening or reading a video source.
///
/// Running out of frames is not an error; see
/// [`crate::video::domain::frame_source::ReadOutcome`].
#[derive(Error, Debug)]
pub enum SourceError {
    /// The source path does not exist. The open attempt is abandoned and
    /// any previously loaded video stays loaded.
    #[error("video file not found: {0}")]
    NotFound(PathBuf),

    /// The decoder rejected the container or codec.
    #[error("decoder rejected {path}: {source}")]
    UnopenableStream {
        path: PathBuf,
        #[source]
        source: ffmpeg_next::Error,
    },

    /// A mid-stream read failed. Playback treats this like end-of-stream.
    #[error("frame decode failed: {0}")]
    DecodeFailure(#[source] ffmpeg_next::Error),
}

/// Histogram renderer failures. These never cross the render boundary:
/// the renderer substitutes an all-black chart and logs instead.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    #[error("expected a 3-channel frame, got {0} channels")]
    UnsupportedChannelCount(u8),

    #[error("frame has no pixels")]
    EmptyFrame,
}
