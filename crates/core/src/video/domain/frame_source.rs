use std::path::Path;

use crate::shared::error::SourceError;
use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

/// Result of advancing a source by one frame.
///
/// Running out of frames is an expected signal, not an error; the error
/// variants in [`SourceError`] are reserved for actual decode failures.
#[derive(Debug)]
pub enum ReadOutcome {
    Frame(Frame),
    EndOfStream,
}

/// Owns a decoded video stream and the position within it.
///
/// Implementations handle container and codec details; playback logic works
/// against this seam only. A source is a stepper, not an iterator: each call
/// advances or repositions the stream and the caller decides the cadence.
pub trait FrameSource: Send {
    /// Opens a video file, resets the position to 0 and eagerly decodes the
    /// first frame.
    ///
    /// On failure the source is left unopened; a previously open stream on
    /// the same instance is closed first only on success.
    fn open(&mut self, path: &Path) -> Result<(VideoMetadata, Frame), SourceError>;

    /// Advances the stream by one frame.
    fn read_next(&mut self) -> Result<ReadOutcome, SourceError>;

    /// Seeks by a signed offset in seconds, converted to frames via the
    /// stream frame rate and clamped to the valid position range, then
    /// decodes one frame at the new position.
    ///
    /// Returns `Ok(None)` when no stream is open.
    fn seek_by(&mut self, delta_seconds: f64) -> Result<Option<Frame>, SourceError>;

    /// Seeks back to the first frame and decodes it.
    ///
    /// Returns `Ok(None)` when no stream is open.
    fn rewind(&mut self) -> Result<Option<Frame>, SourceError>;

    /// Index of the most recently decoded frame (0 when nothing is open).
    fn position(&self) -> usize;

    /// Metadata of the open stream, if any.
    fn metadata(&self) -> Option<&VideoMetadata>;

    /// Releases the decoder. Idempotent.
    fn close(&mut self);
}
