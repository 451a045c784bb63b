pub mod channel_histogram;
pub mod chart_renderer;
