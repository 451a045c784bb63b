use std::time::Duration;

/// Container extensions the file-open surface advertises. Advisory only:
/// the decoder decides what it can actually open, so an unknown extension
/// gets a warning, not a rejection.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "wmv", "flv", "webm"];

/// Interval between playback ticks (~30 frames/second).
pub const PLAYBACK_TICK: Duration = Duration::from_millis(33);

/// Interval between histogram chart refreshes.
pub const CHART_TICK: Duration = Duration::from_secs(1);
