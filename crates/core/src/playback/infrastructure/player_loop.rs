use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{select, tick};

use crate::playback::domain::display_sink::DisplaySink;
use crate::playback::domain::player::Player;
use crate::shared::constants::{CHART_TICK, PLAYBACK_TICK};

/// Timer cadence for the cooperative playback loop.
#[derive(Clone, Copy, Debug)]
pub struct LoopIntervals {
    pub playback: Duration,
    pub chart: Duration,
}

impl Default for LoopIntervals {
    fn default() -> Self {
        Self {
            playback: PLAYBACK_TICK,
            chart: CHART_TICK,
        }
    }
}

/// Drives the two playback timers on the calling thread.
///
/// Two independent tickers share one dispatch loop: the fast one refreshes
/// the displayed frame and, while playing, advances playback by one frame;
/// the slow one re-renders the histogram chart from whatever frame is
/// current at that instant, whether or not playback is running. The tickers
/// are not ordered relative to each other; the frame slot is the only state
/// they share.
///
/// The caller decides the starting state (typically `player.play()` first).
/// Returns once `cancelled` is set, or once a playing video reaches its end
/// and stops.
pub fn run(
    player: &mut Player,
    sink: &mut dyn DisplaySink,
    intervals: LoopIntervals,
    cancelled: &Arc<AtomicBool>,
) {
    let playback_ticks = tick(intervals.playback);
    let chart_ticks = tick(intervals.chart);

    sink.controls(player.has_video(), player.is_playing());

    while !cancelled.load(Ordering::Relaxed) {
        select! {
            recv(playback_ticks) -> _ => {
                let was_playing = player.is_playing();
                player.playback_tick();
                if let Some(frame) = player.current_frame() {
                    sink.show_frame(frame);
                }
                if was_playing && !player.is_playing() {
                    break; // reached end of stream
                }
            }
            recv(chart_ticks) -> _ => {
                if let Some(chart) = player.chart_tick() {
                    sink.show_chart(chart);
                }
            }
        }
    }

    sink.controls(player.has_video(), player.is_playing());
}
