// Turns input events into ripple threads.
// Visual: every left click (and, with drag on, every mouse move) starts a new ring.
// There is no cap: a fast drag can have hundreds of ripples in flight.

use crate::error::{Error, Result};
use crate::ripple::{RippleContext, RippleOutcome, run_ripple};
use crate::types::{Button, Event};
use log::{debug, error};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};

pub struct Spawner {
    ctx: RippleContext,
    drag_enabled: bool,
    active: Arc<AtomicUsize>,
    spawned: AtomicUsize,
}

/// Decrements the live ripple count however the thread ends.
struct ActiveGuard(Arc<AtomicUsize>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl Spawner {
    pub fn new(ctx: RippleContext, drag_enabled: bool) -> Self {
        Self { ctx, drag_enabled, active: Arc::new(AtomicUsize::new(0)), spawned: AtomicUsize::new(0) }
    }

    /// Ripples currently animating.
    pub fn active(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    /// Ripples started since launch.
    pub fn spawned(&self) -> usize {
        self.spawned.load(Ordering::Acquire)
    }

    /// Start one ripple if `event` asks for it. Returns right away; the handle is
    /// only useful to tests, the app drops it.
    pub fn handle(&self, event: &Event) -> Result<Option<JoinHandle<()>>> {
        match *event {
            Event::ButtonDown(Button::Left, x, y) => self.spawn_ripple(x, y).map(Some),
            Event::PointerMove(x, y) if self.drag_enabled => self.spawn_ripple(x, y).map(Some),
            _ => Ok(None),
        }
    }

    fn spawn_ripple(&self, x: usize, y: usize) -> Result<JoinHandle<()>> {
        let (x, y) = (to_coord(x), to_coord(y));
        let ctx = self.ctx.clone();

        let live = self.active.fetch_add(1, Ordering::AcqRel) + 1;
        let guard = ActiveGuard(Arc::clone(&self.active));
        self.spawned.fetch_add(1, Ordering::AcqRel);
        debug!("ripple spawned at ({x},{y}), {live} active");

        thread::Builder::new()
            .name(format!("ripple-{x}-{y}"))
            .spawn(move || {
                let _guard = guard;
                match run_ripple(&ctx, x, y) {
                    Ok(RippleOutcome::Completed { frames }) => {
                        debug!("ripple ({x},{y}) finished after {frames} frames")
                    }
                    Ok(RippleOutcome::Cancelled { frames }) => {
                        debug!("ripple ({x},{y}) cancelled after {frames} frames")
                    }
                    Err(e) => {
                        // no unsynchronized drawing after a poisoned lock: shut everything down
                        error!("ripple ({x},{y}) failed: {e}");
                        ctx.running.stop();
                    }
                }
            })
            .map_err(|e| Error::TaskSpawn(format!("ripple thread: {e}")))
    }
}

#[inline]
fn to_coord(v: usize) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}
