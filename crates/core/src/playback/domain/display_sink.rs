use std::sync::Arc;

use crate::shared::frame::Frame;

/// Presentation boundary for decoded frames and histogram charts.
///
/// The playback loop pushes whatever should currently be visible;
/// implementations decide what "visible" means (a file on disk, a GUI
/// surface, nothing at all in tests). Sinks must absorb their own failures:
/// presentation problems never stop playback.
pub trait DisplaySink: Send {
    /// The latest decoded frame.
    fn show_frame(&mut self, frame: Arc<Frame>);

    /// A freshly rendered histogram chart.
    fn show_chart(&mut self, chart: Frame);

    /// Control-enablement state: whether a video is loaded and whether it
    /// is currently playing.
    fn controls(&mut self, has_video: bool, is_playing: bool);
}

/// Sink that discards everything.
pub struct NullDisplaySink;

impl DisplaySink for NullDisplaySink {
    fn show_frame(&mut self, _frame: Arc<Frame>) {}
    fn show_chart(&mut self, _chart: Frame) {}
    fn controls(&mut self, _has_video: bool, _is_playing: bool) {}
}
