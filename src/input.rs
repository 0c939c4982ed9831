// Input side of the app: turning polled mouse state into events, and the
// main-thread loop that feeds those events to the spawner.

use crate::error::{Error, Result};
use crate::spawner::Spawner;
use crate::types::{Button, Event, RunFlag};
use log::{info, warn};
use std::collections::VecDeque;

/// Where the main loop gets its events from (the window, or a script in tests).
pub trait EventSource {
    /// Next pending event, or `Event::None` if nothing happened.
    fn poll_event(&mut self) -> Result<Event>;
}

/// Mouse state as read from the window in one update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerSnapshot {
    /// `None` while the pointer is outside the window.
    pub pos: Option<(usize, usize)>,
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

/// Remembers the previous snapshot so presses and moves come out as edges.
#[derive(Debug, Default)]
pub struct PointerTracker {
    last_pos: Option<(usize, usize)>,
    down: [bool; 3],
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `snap` with the last one and queue the resulting events:
    /// a move if the position changed, then a press per newly held button.
    pub fn update(&mut self, snap: &PointerSnapshot, out: &mut VecDeque<Event>) {
        if let Some((x, y)) = snap.pos {
            if self.last_pos != snap.pos {
                out.push_back(Event::PointerMove(x, y));
            }
        }

        let now = [snap.left, snap.right, snap.middle];
        let buttons = [Button::Left, Button::Right, Button::Middle];
        for ((&held, &was_held), button) in now.iter().zip(&self.down).zip(buttons) {
            if let (true, false, Some((x, y))) = (held, was_held, snap.pos) {
                out.push_back(Event::ButtonDown(button, x, y));
            }
        }

        self.down = now;
        if snap.pos.is_some() {
            self.last_pos = snap.pos;
        }
    }
}

/// The event-polling driver: hand every event to the spawner until quit.
pub fn drive<E: EventSource + ?Sized>(events: &mut E, spawner: &Spawner, running: &RunFlag) -> Result<()> {
    while running.is_running() {
        match events.poll_event()? {
            Event::Quit => {
                info!("quit requested");
                running.stop();
            }
            Event::None => {}
            // the ripple thread is detached; its handle is dropped here
            event => match spawner.handle(&event) {
                Ok(_) => {}
                Err(e @ Error::TaskSpawn(_)) => warn!("ripple dropped: {e}"),
                Err(e) => return Err(e),
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ripple::RippleContext;
    use crate::surface::{LockScope, SharedSurface};
    use crate::types::FrameBuffer;
    use std::thread;
    use std::time::{Duration, Instant};

    struct Script(VecDeque<Event>);

    impl EventSource for Script {
        fn poll_event(&mut self) -> Result<Event> {
            Ok(self.0.pop_front().unwrap_or(Event::Quit))
        }
    }

    fn snap(pos: Option<(usize, usize)>, left: bool) -> PointerSnapshot {
        PointerSnapshot { pos, left, ..Default::default() }
    }

    #[test]
    fn test_press_is_reported_once() {
        let mut tracker = PointerTracker::new();
        let mut out = VecDeque::new();

        tracker.update(&snap(Some((5, 6)), false), &mut out);
        tracker.update(&snap(Some((5, 6)), true), &mut out);
        tracker.update(&snap(Some((5, 6)), true), &mut out);
        tracker.update(&snap(Some((5, 6)), false), &mut out);

        let events: Vec<_> = out.into_iter().collect();
        assert_eq!(events, vec![Event::PointerMove(5, 6), Event::ButtonDown(Button::Left, 5, 6)]);
    }

    #[test]
    fn test_moves_and_other_buttons() {
        let mut tracker = PointerTracker::new();
        let mut out = VecDeque::new();

        tracker.update(&snap(Some((1, 1)), false), &mut out);
        tracker.update(&snap(Some((2, 3)), true), &mut out);
        let right = PointerSnapshot { pos: Some((2, 3)), left: true, right: true, middle: false };
        tracker.update(&right, &mut out);

        let events: Vec<_> = out.into_iter().collect();
        assert_eq!(
            events,
            vec![
                Event::PointerMove(1, 1),
                Event::PointerMove(2, 3),
                Event::ButtonDown(Button::Left, 2, 3),
                Event::ButtonDown(Button::Right, 2, 3),
            ]
        );
    }

    #[test]
    fn test_pointer_outside_window_is_silent() {
        let mut tracker = PointerTracker::new();
        let mut out = VecDeque::new();
        tracker.update(&snap(None, true), &mut out);
        assert!(out.is_empty());

        // coming back in reports the position but not the old press
        tracker.update(&snap(Some((4, 4)), true), &mut out);
        assert_eq!(out.into_iter().collect::<Vec<_>>(), vec![Event::PointerMove(4, 4)]);
    }

    #[test]
    fn test_drive_spawns_until_quit() {
        let ctx = RippleContext {
            surface: SharedSurface::new(FrameBuffer::new(64, 64)),
            running: RunFlag::new(),
            frame_interval: Duration::from_millis(1),
            lock_scope: LockScope::Pixel,
        };
        let running = ctx.running.clone();
        let spawner = Spawner::new(ctx, false);
        let mut script = Script(VecDeque::from(vec![
            Event::None,
            Event::PointerMove(3, 3),
            Event::ButtonDown(Button::Left, 10, 10),
            Event::ButtonDown(Button::Right, 10, 10),
            Event::Quit,
            Event::ButtonDown(Button::Left, 20, 20),
        ]));

        drive(&mut script, &spawner, &running).unwrap();

        assert!(!running.is_running());
        assert_eq!(spawner.spawned(), 1);
        // nothing after the quit was consumed
        assert_eq!(script.0.len(), 1);

        // the cancelled ripple winds down on its own
        let deadline = Instant::now() + Duration::from_secs(5);
        while spawner.active() > 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(spawner.active(), 0);
    }
}
