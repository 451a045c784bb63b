use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::Parser;

use histoscope_core::playback::domain::display_sink::DisplaySink;
use histoscope_core::playback::domain::player::Player;
use histoscope_core::video::domain::frame_source::FrameSource;
use histoscope_core::playback::infrastructure::player_loop::{self, LoopIntervals};
use histoscope_core::playback::infrastructure::png_sink::PngDisplaySink;
use histoscope_core::shared::constants::VIDEO_EXTENSIONS;
use histoscope_core::video::infrastructure::ffmpeg_source::FfmpegFrameSource;

/// RGB histogram charts from video frames.
#[derive(Parser)]
#[command(name = "histoscope")]
struct Cli {
    /// Input video file.
    input: PathBuf,

    /// Chart output path (PNG), overwritten on every update.
    #[arg(long, default_value = "histogram.png")]
    out: PathBuf,

    /// Seek this many seconds into the video before rendering.
    #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
    at: f64,

    /// Also write the current frame to this path.
    #[arg(long)]
    frame_out: Option<PathBuf>,

    /// Play the video to the end, refreshing the chart once per second.
    #[arg(long)]
    play: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    warn_unusual_extension(&cli.input);

    let mut player = Player::new(Box::new(|| {
        Box::new(FfmpegFrameSource::new()) as Box<dyn FrameSource>
    }));
    let metadata = player.open(&cli.input)?;
    log::info!(
        "Opened {} ({}x{} @ {:.2} fps, {} frames, codec {})",
        cli.input.display(),
        metadata.width,
        metadata.height,
        metadata.fps,
        metadata.total_frames,
        metadata.codec
    );

    if cli.at != 0.0 {
        player.seek_by(cli.at);
    }

    let mut sink = PngDisplaySink::new(cli.out.clone(), cli.frame_out.clone());

    if cli.play {
        let cancelled = Arc::new(AtomicBool::new(false));
        player.play();
        player_loop::run(&mut player, &mut sink, LoopIntervals::default(), &cancelled);
    } else if let Some(chart) = player.chart_tick() {
        sink.show_chart(chart);
        if let Some(frame) = player.current_frame() {
            sink.show_frame(frame);
        }
    }

    player.close();
    log::info!("Chart written to {}", cli.out.display());
    Ok(())
}

fn warn_unusual_extension(path: &Path) {
    let known = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false);
    if !known {
        log::warn!(
            "{} does not have a typical video extension; trying anyway",
            path.display()
        );
    }
}
