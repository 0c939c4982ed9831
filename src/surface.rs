// The one shared framebuffer and the single lock that guards it.
// Ripple threads write through it; the refresh thread presents through it.
// Nobody touches the pixels without holding the lock.

use crate::error::{Error, Result};
use crate::types::{FrameBuffer, PixelSink};
use std::sync::{Arc, Mutex, MutexGuard};

/// Where the refresh thread hands a locked framebuffer.
pub trait Present {
    fn present(&mut self, frame: &FrameBuffer) -> Result<()>;
}

/// How wide a ripple's critical section is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockScope {
    /// Every pixel write takes and releases the lock on its own.
    Pixel,
    /// A ripple holds the lock across its whole erase+draw step.
    Frame,
}

#[derive(Clone)]
pub struct SharedSurface {
    inner: Arc<Mutex<FrameBuffer>>,
    width: usize,
    height: usize,
}

impl SharedSurface {
    pub fn new(framebuffer: FrameBuffer) -> Self {
        let (width, height) = (framebuffer.width, framebuffer.height);
        Self { inner: Arc::new(Mutex::new(framebuffer)), width, height }
    }

    fn lock(&self) -> Result<MutexGuard<'_, FrameBuffer>> {
        self.inner.lock().map_err(|_| Error::LockPoisoned("framebuffer"))
    }

    /// Lock, bounds-checked write (no-op outside the surface), unlock.
    pub fn locked_write(&self, x: usize, y: usize, color: u32) -> Result<()> {
        self.lock()?.put_pixel(x, y, color);
        Ok(())
    }

    /// Lock, hand the pixels to `presenter`, unlock.
    pub fn present_under_lock<P: Present + ?Sized>(&self, presenter: &mut P) -> Result<()> {
        let frame = self.lock()?;
        presenter.present(&frame)
    }

    /// Run `f` with exclusive access to the framebuffer for its whole duration.
    pub fn with_locked<T>(&self, f: impl FnOnce(&mut FrameBuffer) -> T) -> Result<T> {
        let mut frame = self.lock()?;
        Ok(f(&mut frame))
    }

    /// Copy of the current pixels (taken under the lock).
    #[cfg(test)]
    pub fn snapshot(&self) -> Result<FrameBuffer> {
        self.with_locked(|fb| fb.clone())
    }
}

// Per-pixel locking: each write is its own critical section.
impl PixelSink for SharedSurface {
    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn put_pixel(&mut self, x: usize, y: usize, color: u32) -> Result<()> {
        self.locked_write(x, y, color)
    }
}
