use std::path::PathBuf;

/// Facts about an open video stream, captured once at open time.
///
/// `total_frames` is 0 when the container does not report a frame count;
/// seek clamping treats that as "no known last frame".
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip_metadata() -> VideoMetadata {
        // One minute of NTSC-rate footage, the shape most of the playback
        // tests drive through the mpeg4 decoder
        VideoMetadata {
            width: 1280,
            height: 720,
            fps: 29.97,
            total_frames: 1798,
            codec: "mpeg4".to_string(),
            source_path: Some(PathBuf::from("/videos/clip.mp4")),
        }
    }

    #[test]
    fn test_field_access() {
        let meta = clip_metadata();
        assert_eq!(meta.width, 1280);
        assert_eq!(meta.height, 720);
        assert_eq!(meta.fps, 29.97);
        assert_eq!(meta.total_frames, 1798);
        assert_eq!(meta.codec, "mpeg4");
        assert_eq!(meta.source_path, Some(PathBuf::from("/videos/clip.mp4")));
    }

    #[test]
    fn test_equality_covers_every_field() {
        let meta = clip_metadata();
        assert_eq!(meta, meta.clone());

        let mut truncated = clip_metadata();
        truncated.total_frames = 0;
        assert_ne!(meta, truncated);

        let mut detached = clip_metadata();
        detached.source_path = None;
        assert_ne!(meta, detached);
    }

    #[test]
    fn test_unreported_frame_count_is_zero() {
        // Transport streams often carry no frame count; the last-frame
        // clamp is skipped for these
        let meta = VideoMetadata {
            width: 160,
            height: 120,
            fps: 5.0,
            total_frames: 0,
            codec: "mpegts".to_string(),
            source_path: None,
        };
        assert_eq!(meta.total_frames, 0);
        assert!(meta.source_path.is_none());
    }
}
