pub mod constants;
pub mod error;
pub mod frame;
pub mod frame_slot;
pub mod video_metadata;
