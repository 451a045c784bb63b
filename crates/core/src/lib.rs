//! Playback and histogram rendering core for the histoscope viewer.
//!
//! Frame decoding lives behind the [`video::domain::frame_source::FrameSource`]
//! seam; everything above it works with the plain [`shared::frame::Frame`]
//! value type.

pub mod histogram;
pub mod playback;
pub mod shared;
pub mod video;
