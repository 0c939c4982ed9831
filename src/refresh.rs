// Background refresh loop + the hand-off buffer between it and the window.
//
// minifb windows can't leave the main thread, so "presenting" here means copying
// the locked framebuffer into a FrontBuffer. The main thread pushes that to the
// window the next time it pumps events.

use crate::error::{Error, Result};
use crate::surface::{Present, SharedSurface};
use crate::types::{FrameBuffer, RunFlag};
use log::{debug, error};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

struct SharedFrame {
    pixels: Vec<u32>,
    dirty: bool,
}

/// Latest presented frame, waiting for the window to pick it up.
#[derive(Clone)]
pub struct FrontBuffer {
    inner: Arc<Mutex<SharedFrame>>,
    width: usize,
    height: usize,
}

impl FrontBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let frame = SharedFrame { pixels: vec![0u32; width * height], dirty: false };
        Self { inner: Arc::new(Mutex::new(frame)), width, height }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// If a new frame arrived since last time, hand its pixels to `f` and mark it seen.
    /// Returns `Ok(None)` when nothing changed.
    pub fn take_dirty<T>(&self, f: impl FnOnce(&[u32], usize, usize) -> T) -> Result<Option<T>> {
        let mut frame = self.inner.lock().map_err(|_| Error::LockPoisoned("front buffer"))?;
        if !frame.dirty {
            return Ok(None);
        }
        frame.dirty = false;
        Ok(Some(f(&frame.pixels, self.width, self.height)))
    }
}

impl Present for FrontBuffer {
    fn present(&mut self, source: &FrameBuffer) -> Result<()> {
        let mut frame = self.inner.lock().map_err(|_| Error::LockPoisoned("front buffer"))?;
        frame.pixels.copy_from_slice(&source.pixels);
        frame.dirty = true;
        Ok(())
    }
}

/// Presents the shared surface once per frame interval until the app stops.
pub struct RefreshTask<P: Present> {
    surface: SharedSurface,
    presenter: P,
    running: RunFlag,
    frame_interval: Duration,
}

impl<P: Present + Send + 'static> RefreshTask<P> {
    pub fn new(surface: SharedSurface, presenter: P, running: RunFlag, frame_interval: Duration) -> Self {
        Self { surface, presenter, running, frame_interval }
    }

    /// Loop: lock, present, unlock, sleep. Returns the presenter when the flag clears.
    pub fn run(mut self) -> Result<P> {
        let mut presented: u64 = 0;
        while self.running.is_running() {
            self.surface.present_under_lock(&mut self.presenter)?;
            presented += 1;
            thread::sleep(self.frame_interval);
        }
        debug!("refresh loop stopped after {presented} frames");
        Ok(self.presenter)
    }

    /// Run on a dedicated thread. A failure stops the whole app.
    pub fn spawn(self) -> Result<JoinHandle<Result<P>>> {
        let running = self.running.clone();
        thread::Builder::new()
            .name("refresh".into())
            .spawn(move || {
                let result = self.run();
                if let Err(e) = &result {
                    error!("refresh task failed: {e}");
                    running.stop();
                }
                result
            })
            .map_err(|e| Error::TaskSpawn(format!("refresh thread: {e}")))
    }
}
