use crate::histogram::domain::channel_histogram::{ChannelHistograms, BINS};
use crate::shared::error::RenderError;
use crate::shared::frame::Frame;

/// Chart dimensions, fixed regardless of the input frame size.
pub const CHART_WIDTH: u32 = 512;
pub const CHART_HEIGHT: u32 = 400;

/// Display colors for the red, green and blue polylines, drawn in that
/// order: where lines overlap, the later channel wins.
const CHANNEL_COLORS: [[u8; 3]; 3] = [[255, 0, 0], [0, 255, 0], [0, 0, 255]];

/// Renders the RGB histogram of `frame` as a 512x400 line chart.
///
/// Total by construction: any failure while counting or plotting degrades
/// to an all-black chart of the same dimensions, so a bad frame can never
/// take down the playback loop. A fresh image is allocated on every call
/// and the input frame is left untouched.
pub fn render_chart(frame: &Frame) -> Frame {
    match try_render(frame) {
        Ok(chart) => chart,
        Err(e) => {
            log::warn!("histogram render failed on frame {}: {e}", frame.index());
            blank_chart(frame.index())
        }
    }
}

fn try_render(frame: &Frame) -> Result<Frame, RenderError> {
    let histograms = ChannelHistograms::from_frame(frame)?;
    let scaled = histograms.scaled(CHART_HEIGHT);

    let mut canvas = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    let x_step = (CHART_WIDTH as usize / BINS) as i32;

    for (channel, bins) in scaled.iter().enumerate() {
        for bin in 0..BINS - 1 {
            let from = (bin as i32 * x_step, row_for(bins[bin]));
            let to = ((bin as i32 + 1) * x_step, row_for(bins[bin + 1]));
            draw_segment(&mut canvas, from, to, CHANNEL_COLORS[channel]);
        }
    }

    Ok(Frame::new(
        canvas,
        CHART_WIDTH,
        CHART_HEIGHT,
        3,
        frame.index(),
    ))
}

fn blank_chart(index: usize) -> Frame {
    let canvas = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    Frame::new(canvas, CHART_WIDTH, CHART_HEIGHT, 3, index)
}

/// Chart row for a scaled bin value; row 0 is the top of the image and a
/// full-height bin plots there.
fn row_for(scaled: u32) -> i32 {
    (CHART_HEIGHT - scaled.min(CHART_HEIGHT)).min(CHART_HEIGHT - 1) as i32
}

/// Bresenham line between two chart points, 1 px stroke.
fn draw_segment(canvas: &mut [u8], from: (i32, i32), to: (i32, i32), color: [u8; 3]) {
    let (mut x, mut y) = from;
    let (x1, y1) = to;

    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put_pixel(canvas, x, y, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn put_pixel(canvas: &mut [u8], x: i32, y: i32, color: [u8; 3]) {
    if x < 0 || y < 0 || x >= CHART_WIDTH as i32 || y >= CHART_HEIGHT as i32 {
        return;
    }
    let offset = (y as usize * CHART_WIDTH as usize + x as usize) * 3;
    canvas[offset..offset + 3].copy_from_slice(&color);
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
        Frame::new(data, width, height, 3, 7)
    }

    fn count_pixels(chart: &Frame, color: [u8; 3]) -> usize {
        chart
            .data()
            .chunks_exact(3)
            .filter(|px| *px == color)
            .count()
    }

    #[rstest]
    #[case::tiny(1, 1)]
    #[case::small(16, 16)]
    #[case::wide(640, 2)]
    #[case::tall(2, 480)]
    fn test_chart_dimensions_are_fixed(#[case] width: u32, #[case] height: u32) {
        let chart = render_chart(&solid_frame(10, 20, 30, width, height));
        assert_eq!(chart.width(), CHART_WIDTH);
        assert_eq!(chart.height(), CHART_HEIGHT);
        assert_eq!(chart.channels(), 3);
        assert_eq!(
            chart.data().len(),
            (CHART_WIDTH * CHART_HEIGHT * 3) as usize
        );
    }

    #[test]
    fn test_zero_size_frame_renders_all_black() {
        let chart = render_chart(&Frame::new(Vec::new(), 0, 0, 3, 0));
        assert_eq!(chart.width(), CHART_WIDTH);
        assert_eq!(chart.height(), CHART_HEIGHT);
        assert!(chart.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_single_channel_frame_renders_all_black() {
        let chart = render_chart(&Frame::new(vec![9u8; 4], 2, 2, 1, 3));
        assert!(chart.data().iter().all(|&b| b == 0));
        assert_eq!(chart.index(), 3);
    }

    #[test]
    fn test_chart_contains_all_three_polyline_colors() {
        // Distinct per-channel spikes keep the polylines apart
        let chart = render_chart(&solid_frame(30, 128, 220, 8, 8));
        for color in CHANNEL_COLORS {
            assert!(count_pixels(&chart, color) > 0, "missing {color:?}");
        }
    }

    #[test]
    fn test_identical_channels_are_overdrawn_by_blue() {
        // All three channels produce the same polyline; blue is drawn last
        // and wins every shared pixel.
        let chart = render_chart(&solid_frame(128, 128, 128, 8, 8));
        assert!(count_pixels(&chart, [0, 0, 255]) > 0);
        assert_eq!(count_pixels(&chart, [255, 0, 0]), 0);
        assert_eq!(count_pixels(&chart, [0, 255, 0]), 0);
    }

    #[test]
    fn test_background_is_black() {
        let chart = render_chart(&solid_frame(200, 200, 200, 8, 8));
        let black = count_pixels(&chart, [0, 0, 0]);
        let total = (CHART_WIDTH * CHART_HEIGHT) as usize;
        // Polylines cover a thin fraction of the canvas
        assert!(black > total / 2);
    }

    #[test]
    fn test_chart_keeps_source_frame_index() {
        let chart = render_chart(&solid_frame(1, 2, 3, 4, 4));
        assert_eq!(chart.index(), 7);
    }

    #[test]
    fn test_peak_bin_plots_at_top_row() {
        // Solid color: the spike column is full height, so its channel
        // color appears on row 0.
        let chart = render_chart(&solid_frame(128, 128, 128, 8, 8));
        let x = 128 * (CHART_WIDTH as usize / BINS);
        let offset = x * 3;
        assert_eq!(&chart.data()[offset..offset + 3], &[0, 0, 255]);
    }

    #[test]
    fn test_row_for_clamps_to_canvas() {
        assert_eq!(row_for(0), (CHART_HEIGHT - 1) as i32);
        assert_eq!(row_for(CHART_HEIGHT), 0);
        assert_eq!(row_for(CHART_HEIGHT + 50), 0);
        assert_eq!(row_for(1), (CHART_HEIGHT - 1) as i32);
    }

    #[test]
    fn test_draw_segment_endpoints_inclusive() {
        let mut canvas = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
        draw_segment(&mut canvas, (0, 0), (10, 5), [255, 0, 0]);
        assert_eq!(&canvas[0..3], &[255, 0, 0]);
        let end = (5 * CHART_WIDTH as usize + 10) * 3;
        assert_eq!(&canvas[end..end + 3], &[255, 0, 0]);
    }

    #[test]
    fn test_draw_segment_out_of_bounds_is_ignored() {
        let mut canvas = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
        draw_segment(&mut canvas, (-10, -10), (-1, -1), [255, 0, 0]);
        assert!(canvas.iter().all(|&b| b == 0));
    }
}
