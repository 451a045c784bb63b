use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::shared::frame::Frame;

/// Shared slot holding the most recently decoded frame.
///
/// Single writer (the playback tick), any number of readers (the chart tick,
/// the display sink). A store replaces the whole value; a load hands back an
/// `Arc` to whichever frame was current at that instant. Readers therefore
/// never see a partially written frame, only an older or newer complete one.
pub struct FrameSlot {
    current: RwLock<Option<Arc<Frame>>>,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// Publishes `frame` as the current frame, dropping the previous one
    /// once its last reader is done with it.
    pub fn store(&self, frame: Frame) {
        *self.write() = Some(Arc::new(frame));
    }

    /// The current frame, if any.
    pub fn load(&self) -> Option<Arc<Frame>> {
        self.read().clone()
    }

    pub fn clear(&self) {
        *self.write() = None;
    }

    pub fn has_frame(&self) -> bool {
        self.read().is_some()
    }

    // Stores are whole-value swaps, so a writer that panicked mid-store
    // cannot have left a torn value behind; recovering from poisoning is
    // safe here.
    fn read(&self) -> RwLockReadGuard<'_, Option<Arc<Frame>>> {
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Arc<Frame>>> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for FrameSlot {
    fn default() -> Self {
        Self::new()
    }
}
