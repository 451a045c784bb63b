use std::path::Path;
use std::sync::Arc;

use crate::histogram::domain::chart_renderer;
use crate::shared::error::SourceError;
use crate::shared::frame::Frame;
use crate::shared::frame_slot::FrameSlot;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::frame_source::{FrameSource, ReadOutcome};

/// Playback states. Loading a video never auto-plays, and reaching the end
/// of the stream returns to `Stopped` rather than looping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
}

/// Factory for frame sources, invoked once per open attempt.
pub type SourceFactory = Box<dyn Fn() -> Box<dyn FrameSource> + Send>;

/// Tick-driven playback driver.
///
/// Owns the open source and publishes every decoded frame to a shared
/// [`FrameSlot`]. All methods are meant to be called from one dispatch
/// thread; the slot is the only state other threads may observe.
pub struct Player {
    factory: SourceFactory,
    source: Option<Box<dyn FrameSource>>,
    slot: Arc<FrameSlot>,
    state: PlaybackState,
    metadata: Option<VideoMetadata>,
}

impl Player {
    pub fn new(factory: SourceFactory) -> Self {
        Self {
            factory,
            source: None,
            slot: Arc::new(FrameSlot::new()),
            state: PlaybackState::Stopped,
            metadata: None,
        }
    }

    /// Shared handle to the current-frame slot.
    pub fn slot(&self) -> Arc<FrameSlot> {
        self.slot.clone()
    }

    /// Opens `path`, replacing the loaded video only if the new one opens.
    ///
    /// The open is all-or-nothing: a fresh source is opened first, and on
    /// any failure the previously loaded video (including its playback
    /// state and current frame) is left untouched.
    pub fn open(&mut self, path: &Path) -> Result<VideoMetadata, SourceError> {
        let mut source = (self.factory)();
        let (metadata, first) = source.open(path)?;

        if let Some(mut old) = self.source.take() {
            old.close();
        }
        self.slot.store(first);
        self.metadata = Some(metadata.clone());
        self.source = Some(source);
        self.state = PlaybackState::Stopped;
        Ok(metadata)
    }

    /// Starts playback. Ignored when no video is loaded.
    pub fn play(&mut self) {
        if self.source.is_some() {
            self.state = PlaybackState::Playing;
        }
    }

    /// Halts playback at the current position.
    pub fn pause(&mut self) {
        self.state = PlaybackState::Stopped;
    }

    /// Halts playback and rewinds to the first frame.
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.rewind_to_start();
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn has_video(&self) -> bool {
        self.source.is_some()
    }

    pub fn metadata(&self) -> Option<&VideoMetadata> {
        self.metadata.as_ref()
    }

    /// Index of the most recently decoded frame.
    pub fn position(&self) -> usize {
        self.source.as_ref().map(|s| s.position()).unwrap_or(0)
    }

    /// The frame currently in the slot, if any.
    pub fn current_frame(&self) -> Option<Arc<Frame>> {
        self.slot.load()
    }

    /// One playback-timer tick: advances a playing video by one frame.
    ///
    /// End of stream and mid-stream decode failures get the same
    /// treatment: rewind to frame 0 and stop. Neither interrupts the
    /// caller's timer.
    pub fn playback_tick(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        let Some(source) = self.source.as_mut() else {
            return;
        };

        match source.read_next() {
            Ok(ReadOutcome::Frame(frame)) => self.slot.store(frame),
            Ok(ReadOutcome::EndOfStream) => self.finish_playback(),
            Err(e) => {
                log::warn!("decode failed mid-stream, stopping playback: {e}");
                self.finish_playback();
            }
        }
    }

    /// One chart-timer tick: renders a histogram chart from the current
    /// frame.
    ///
    /// Runs irrespective of play/pause state; a paused video keeps getting
    /// fresh charts. Returns `None` when no frame is loaded.
    pub fn chart_tick(&self) -> Option<Frame> {
        self.current_frame()
            .map(|frame| chart_renderer::render_chart(&frame))
    }

    /// Seeks by a signed second offset and publishes the frame at the new
    /// position. Seek errors degrade to "position unchanged".
    pub fn seek_by(&mut self, delta_seconds: f64) {
        let Some(source) = self.source.as_mut() else {
            return;
        };
        match source.seek_by(delta_seconds) {
            Ok(Some(frame)) => self.slot.store(frame),
            Ok(None) => {}
            Err(e) => log::warn!("seek failed: {e}"),
        }
    }

    /// Unloads the current video, releasing the decoder and clearing the
    /// slot. Idempotent.
    pub fn close(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.close();
        }
        self.slot.clear();
        self.metadata = None;
        self.state = PlaybackState::Stopped;
    }

    fn finish_playback(&mut self) {
        self.state = PlaybackState::Stopped;
        self.rewind_to_start();
    }

    fn rewind_to_start(&mut self) {
        let Some(source) = self.source.as_mut() else {
            return;
        };
        match source.rewind() {
            Ok(Some(frame)) => self.slot.store(frame),
            Ok(None) => {}
            Err(e) => log::warn!("rewind failed: {e}"),
        }
    }
}
