use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::playback::domain::display_sink::DisplaySink;
use crate::shared::frame::Frame;

/// Sink that overwrites PNG files on every update.
///
/// Headless stand-in for the application's display surface: an external
/// viewer pointed at the chart path sees it refresh on each chart tick.
/// Write failures are logged and swallowed; presentation problems must
/// never stop the playback loop.
pub struct PngDisplaySink {
    chart_path: PathBuf,
    frame_path: Option<PathBuf>,
}

impl PngDisplaySink {
    pub fn new(chart_path: PathBuf, frame_path: Option<PathBuf>) -> Self {
        Self {
            chart_path,
            frame_path,
        }
    }

    fn write(path: &Path, frame: &Frame) {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        match image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec()) {
            Some(img) => {
                if let Err(e) = img.save(path) {
                    log::warn!("failed to write {}: {e}", path.display());
                }
            }
            None => log::warn!("frame buffer does not match its dimensions"),
        }
    }
}

impl DisplaySink for PngDisplaySink {
    fn show_frame(&mut self, frame: Arc<Frame>) {
        if let Some(ref path) = self.frame_path {
            Self::write(path, &frame);
        }
    }

    fn show_chart(&mut self, chart: Frame) {
        Self::write(&self.chart_path, &chart);
    }

    fn controls(&mut self, _has_video: bool, _is_playing: bool) {}
}
