// One ripple = one expanding ring that lives for MAX_FRAMES frames.
// Visual: a bright dot at the click that grows into a dimming circle and vanishes.

use crate::error::Result;
use crate::ring::{RingMode, draw_ring};
use crate::surface::{LockScope, SharedSurface};
use crate::types::{PixelSink, RunFlag};
use log::trace;
use std::thread;
use std::time::Duration;

/// Frames per ripple; also the radius it never reaches.
pub const MAX_FRAMES: u32 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RippleState {
    /// Showing the ring of radius `i`.
    Active(u32),
    Terminated,
}

#[derive(Debug)]
pub struct Ripple {
    origin_x: i32,
    origin_y: i32,
    state: RippleState,
}

impl Ripple {
    pub fn new(origin_x: i32, origin_y: i32) -> Self {
        Self { origin_x, origin_y, state: RippleState::Active(0) }
    }

    pub fn state(&self) -> RippleState {
        self.state
    }

    /// Erase last frame's ring, then draw this frame's ring.
    /// Frame 0 has no previous ring, so it only draws.
    pub fn render<S: PixelSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        if let RippleState::Active(i) = self.state {
            if i > 0 {
                draw_ring(sink, self.origin_x, self.origin_y, i - 1, RingMode::Erase)?;
            }
            draw_ring(sink, self.origin_x, self.origin_y, i, RingMode::Draw)?;
        }
        Ok(())
    }

    /// Step to the next frame. There is no way back from `Terminated`.
    pub fn advance(&mut self) -> RippleState {
        self.state = match self.state {
            RippleState::Active(i) if i + 1 < MAX_FRAMES => RippleState::Active(i + 1),
            _ => RippleState::Terminated,
        };
        self.state
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RippleOutcome {
    /// All frames were rendered.
    Completed { frames: u32 },
    /// The running flag was cleared first.
    Cancelled { frames: u32 },
}

/// Everything a ripple thread needs, handed over when it is spawned.
#[derive(Clone)]
pub struct RippleContext {
    pub surface: SharedSurface,
    pub running: RunFlag,
    pub frame_interval: Duration,
    pub lock_scope: LockScope,
}

/// Animate one ripple at (x,y) to completion (or until the app stops running).
/// Blocks the calling thread for roughly MAX_FRAMES frame intervals.
pub fn run_ripple(ctx: &RippleContext, x: i32, y: i32) -> Result<RippleOutcome> {
    let mut ripple = Ripple::new(x, y);
    let mut surface = ctx.surface.clone();
    let mut frames = 0;

    while let RippleState::Active(i) = ripple.state() {
        if !ctx.running.is_running() {
            return Ok(RippleOutcome::Cancelled { frames });
        }

        match ctx.lock_scope {
            LockScope::Pixel => ripple.render(&mut surface)?,
            LockScope::Frame => ctx.surface.with_locked(|fb| ripple.render(fb))??,
        }
        frames += 1;
        trace!("ripple ({x},{y}) frame {i}");

        if !ctx.running.is_running() {
            return Ok(RippleOutcome::Cancelled { frames });
        }
        thread::sleep(ctx.frame_interval);
        ripple.advance();
    }

    Ok(RippleOutcome::Completed { frames })
}
