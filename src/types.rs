// Core types shared by the window, the ripple threads and the refresh thread.

use crate::error::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Pure black. Visual: what the window shows before any ripple and after one has faded.
pub const BACKGROUND: u32 = 0x00_00_00_00;

/// Pack three 8-bit channels as 0x00RRGGBB (the layout minifb expects).
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the surface is (pixels)
    pub height: usize,     // how tall the surface is (pixels)
    pub pixels: Vec<u32>,  // row-major, each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A surface filled with the background color.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![BACKGROUND; width * height] }
    }

    /// Put a pixel if (x,y) is inside bounds; anything outside is clipped silently.
    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[y * self.width + x] = color;
    }

    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }
}

/// Anything the ring rasterizer can write pixels into.
///
/// The rasterizer clips against `dimensions()` before calling `put_pixel`, so
/// implementations only ever see in-bounds coordinates.
pub trait PixelSink {
    fn dimensions(&self) -> (usize, usize);
    fn put_pixel(&mut self, x: usize, y: usize, color: u32) -> Result<()>;
}

impl PixelSink for FrameBuffer {
    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn put_pixel(&mut self, x: usize, y: usize, color: u32) -> Result<()> {
        FrameBuffer::put_pixel(self, x, y, color);
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Left,
    Right,
    Middle,
}

/// One input event as seen by the ripple spawner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Quit,
    ButtonDown(Button, usize, usize),
    PointerMove(usize, usize),
    None,
}

/// Process-wide "keep going" flag. Cleared once on quit (or on a fatal lock error);
/// every task checks it before it sleeps.
#[derive(Clone, Debug)]
pub struct RunFlag(Arc<AtomicBool>);

impl RunFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn stop(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_rgb_layout() {
        assert_eq!(pack_rgb(0xFF, 0, 0), 0x00_FF_00_00);
        assert_eq!(pack_rgb(0, 0xFF, 0), 0x00_00_FF_00);
        assert_eq!(pack_rgb(0, 0, 0xFF), 0x00_00_00_FF);
        assert_eq!(pack_rgb(0, 0, 0), BACKGROUND);
    }

    #[test]
    fn test_put_pixel_clips_out_of_bounds() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.put_pixel(4, 0, 0xFFFFFF);
        fb.put_pixel(0, 3, 0xFFFFFF);
        fb.put_pixel(usize::MAX, usize::MAX, 0xFFFFFF);
        assert!(fb.pixels.iter().all(|&p| p == BACKGROUND));

        fb.put_pixel(3, 2, 0x123456);
        assert_eq!(fb.pixel(3, 2), Some(0x123456));
        assert_eq!(fb.pixels[2 * 4 + 3], 0x123456);
        assert_eq!(fb.pixel(4, 2), None);
    }

    #[test]
    fn test_run_flag_is_shared_between_clones() {
        let flag = RunFlag::new();
        let other = flag.clone();
        assert!(other.is_running());
        flag.stop();
        assert!(!other.is_running());
    }
}
