// Window side of the app (minifb).
// Visual: a black window; whatever the refresh thread last presented shows up
// here the next time the main thread pumps the window.

use crate::error::{Error, Result};
use crate::input::{EventSource, PointerSnapshot, PointerTracker};
use crate::refresh::FrontBuffer;
use crate::types::Event;
use log::{info, warn};
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};
use std::collections::VecDeque;

pub struct Drawer {
    window: Window, // the on-screen window you see
    front: FrontBuffer,
    scratch: Vec<u32>,
    tracker: PointerTracker,
    pending: VecDeque<Event>,
}

impl Drawer {
    /// Create a window the size of the front buffer.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, front: FrontBuffer) -> Result<Self> {
        let (width, height) = front.dimensions();
        let options = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        info!("window \"{title}\" opened at {width}x{height}");

        Ok(Self {
            window,
            front,
            scratch: vec![0u32; width * height],
            tracker: PointerTracker::new(),
            pending: VecDeque::new(),
        })
    }

    /// Push the newest presented frame (if any) and let minifb collect input.
    /// A failed update is a dropped frame, not a reason to stop.
    fn pump(&mut self) -> Result<()> {
        let scratch = &mut self.scratch;
        let fresh = self.front.take_dirty(|pixels, _, _| scratch.copy_from_slice(pixels))?;

        if fresh.is_some() {
            let (width, height) = self.front.dimensions();
            if let Err(e) = self.window.update_with_buffer(&self.scratch, width, height) {
                warn!("{}", Error::WindowUpdate(e.to_string()));
            }
        } else {
            self.window.update();
        }
        Ok(())
    }

    fn pointer(&self) -> PointerSnapshot {
        let pos = self
            .window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| (x.max(0.0) as usize, y.max(0.0) as usize));
        PointerSnapshot {
            pos,
            left: self.window.get_mouse_down(MouseButton::Left),
            right: self.window.get_mouse_down(MouseButton::Right),
            middle: self.window.get_mouse_down(MouseButton::Middle),
        }
    }

    /// Returns true when the user closed the window or pressed ESC.
    fn quit_requested(&self) -> bool {
        !self.window.is_open() || self.window.is_key_down(Key::Escape)
    }
}

impl EventSource for Drawer {
    fn poll_event(&mut self) -> Result<Event> {
        if let Some(event) = self.pending.pop_front() {
            return Ok(event);
        }

        self.pump()?;
        if self.quit_requested() {
            return Ok(Event::Quit);
        }
        let snap = self.pointer();
        self.tracker.update(&snap, &mut self.pending);
        Ok(self.pending.pop_front().unwrap_or(Event::None))
    }
}
