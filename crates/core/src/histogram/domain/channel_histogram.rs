use ndarray::Axis;

use crate::shared::error::RenderError;
use crate::shared::frame::Frame;

/// Number of intensity bins per channel.
pub const BINS: usize = 256;

/// Per-channel intensity counts for one frame.
///
/// Always derived from exactly one frame and recomputed from scratch;
/// counts are never merged across frames or updated incrementally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelHistograms {
    counts: [[u32; BINS]; 3],
}

impl ChannelHistograms {
    /// Counts intensity occurrences for each RGB channel of `frame`.
    pub fn from_frame(frame: &Frame) -> Result<Self, RenderError> {
        if frame.channels() != 3 {
            return Err(RenderError::UnsupportedChannelCount(frame.channels()));
        }
        if frame.width() == 0 || frame.height() == 0 {
            return Err(RenderError::EmptyFrame);
        }

        let mut counts = [[0u32; BINS]; 3];
        for pixel in frame.as_ndarray().lanes(Axis(2)) {
            counts[0][pixel[0] as usize] += 1;
            counts[1][pixel[1] as usize] += 1;
            counts[2][pixel[2] as usize] += 1;
        }
        Ok(Self { counts })
    }

    /// Raw counts for one channel (0 = red, 1 = green, 2 = blue).
    pub fn channel(&self, channel: usize) -> &[u32; BINS] {
        &self.counts[channel]
    }

    /// Rescales each channel so its tallest bin equals `height`, with the
    /// other bins scaled proportionally (integer floor).
    ///
    /// The scale is per channel and per frame: the same bin count can land
    /// at a different pixel height depending on that channel's peak.
    pub fn scaled(&self, height: u32) -> [[u32; BINS]; 3] {
        let mut scaled = [[0u32; BINS]; 3];
        for (channel, bins) in self.counts.iter().enumerate() {
            let peak = bins.iter().copied().max().unwrap_or(0);
            if peak == 0 {
                continue;
            }
            for (bin, &count) in bins.iter().enumerate() {
                scaled[channel][bin] =
                    (u64::from(count) * u64::from(height) / u64::from(peak)) as u32;
            }
        }
        scaled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn solid_frame(r: u8, g: u8, b: u8, width: u32, height: u32) -> Frame {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..(width * height) {
            data.extend_from_slice(&[r, g, b]);
        }
        Frame::new(data, width, height, 3, 0)
    }

    #[rstest]
    #[case::red(200, 10, 30)]
    #[case::gray(128, 128, 128)]
    #[case::mixed(0, 255, 17)]
    fn test_solid_color_has_single_spike_per_channel(#[case] r: u8, #[case] g: u8, #[case] b: u8) {
        let frame = solid_frame(r, g, b, 8, 4);
        let hist = ChannelHistograms::from_frame(&frame).unwrap();

        for (channel, value) in [(0usize, r), (1, g), (2, b)] {
            let bins = hist.channel(channel);
            assert_eq!(bins[value as usize], 32, "channel {channel}");
            let total: u32 = bins.iter().sum();
            assert_eq!(total, 32, "channel {channel} has exactly one spike");
        }
    }

    #[test]
    fn test_black_and_white_spike_at_opposite_ends() {
        let black = ChannelHistograms::from_frame(&solid_frame(0, 0, 0, 4, 4)).unwrap();
        let white = ChannelHistograms::from_frame(&solid_frame(255, 255, 255, 4, 4)).unwrap();

        for channel in 0..3 {
            assert_eq!(black.channel(channel)[0], 16);
            assert_eq!(black.channel(channel)[255], 0);
            assert_eq!(white.channel(channel)[255], 16);
            assert_eq!(white.channel(channel)[0], 0);
        }
    }

    #[test]
    fn test_counts_sum_to_pixel_count() {
        let mut data = Vec::new();
        for i in 0..60u32 {
            data.extend_from_slice(&[(i % 256) as u8, (i * 3 % 256) as u8, (i * 7 % 256) as u8]);
        }
        let frame = Frame::new(data, 10, 6, 3, 0);
        let hist = ChannelHistograms::from_frame(&frame).unwrap();

        for channel in 0..3 {
            let total: u32 = hist.channel(channel).iter().sum();
            assert_eq!(total, 60);
        }
    }

    #[test]
    fn test_zero_size_frame_is_rejected() {
        let frame = Frame::new(Vec::new(), 0, 0, 3, 0);
        assert_eq!(
            ChannelHistograms::from_frame(&frame),
            Err(RenderError::EmptyFrame)
        );
    }

    #[test]
    fn test_non_rgb_frame_is_rejected() {
        let frame = Frame::new(vec![0u8; 4], 2, 2, 1, 0);
        assert_eq!(
            ChannelHistograms::from_frame(&frame),
            Err(RenderError::UnsupportedChannelCount(1))
        );
    }

    #[test]
    fn test_scaled_peak_reaches_full_height() {
        let frame = solid_frame(10, 20, 30, 4, 4);
        let scaled = ChannelHistograms::from_frame(&frame).unwrap().scaled(400);

        assert_eq!(scaled[0][10], 400);
        assert_eq!(scaled[1][20], 400);
        assert_eq!(scaled[2][30], 400);
    }

    #[test]
    fn test_scaled_is_proportional_with_floor() {
        // Two pixels at intensity 0, one at intensity 5 → peak 2, half 1
        let mut data = Vec::new();
        data.extend_from_slice(&[0, 0, 0]);
        data.extend_from_slice(&[0, 0, 0]);
        data.extend_from_slice(&[5, 5, 5]);
        let frame = Frame::new(data, 3, 1, 3, 0);

        let scaled = ChannelHistograms::from_frame(&frame).unwrap().scaled(401);
        for channel in 0..3 {
            assert_eq!(scaled[channel][0], 401);
            assert_eq!(scaled[channel][5], 200); // floor(401 / 2)
        }
    }

    #[test]
    fn test_recompute_matches_itself() {
        let frame = solid_frame(1, 2, 3, 5, 5);
        let a = ChannelHistograms::from_frame(&frame).unwrap();
        let b = ChannelHistograms::from_frame(&frame).unwrap();
        assert_eq!(a, b);
    }
}
