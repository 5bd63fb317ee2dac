use glam::Vec2;

/// Key code that ends the session.
pub const KEY_ESCAPE: u32 = 27;

/// Input events the host forwards to the session, in table coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at (x, y).
    PointerDown { x: f32, y: f32 },
    /// The cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// A touch/click ended at (x, y).
    PointerUp { x: f32, y: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// The host window is closing.
    Quit,
}

/// One frame's worth of input, folded from the queued events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Latest known pointer location.
    pub drag_position: Vec2,
    /// Where the pointer went down this frame, if it did.
    pub select: Option<Vec2>,
    pub release: bool,
    pub quit: bool,
}

impl FrameInput {
    /// A frame with no new events; the pointer stays where it was.
    pub fn idle(drag_position: Vec2) -> Self {
        Self {
            drag_position,
            select: None,
            release: false,
            quit: false,
        }
    }
}

/// A queue of input events.
/// The host pushes events as they arrive; the session folds them once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Drain the queue into a single [`FrameInput`].
    ///
    /// Every pointer event moves the drag position. The first pointer-down
    /// is the select, any pointer-up is the release, and a quit or Escape
    /// key-down sets `quit`.
    pub fn frame_input(&mut self, last_pointer: Vec2) -> FrameInput {
        let mut frame = FrameInput::idle(last_pointer);
        for event in self.events.drain(..) {
            match event {
                InputEvent::PointerDown { x, y } => {
                    let at = Vec2::new(x, y);
                    frame.drag_position = at;
                    if frame.select.is_none() {
                        frame.select = Some(at);
                    }
                }
                InputEvent::PointerMove { x, y } => {
                    frame.drag_position = Vec2::new(x, y);
                }
                InputEvent::PointerUp { x, y } => {
                    frame.drag_position = Vec2::new(x, y);
                    frame.release = true;
                }
                InputEvent::KeyDown { key_code } => {
                    if key_code == KEY_ESCAPE {
                        frame.quit = true;
                    }
                }
                InputEvent::Quit => frame.quit = true,
            }
        }
        frame
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_then_clear() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::KeyDown { key_code: 32 });
        assert_eq!(q.events.len(), 2);
        q.clear();
        assert!(q.events.is_empty());
        assert_eq!(q.frame_input(Vec2::ZERO), FrameInput::idle(Vec2::ZERO));
    }

    #[test]
    fn empty_queue_keeps_the_last_pointer() {
        let mut q = InputQueue::new();
        let frame = q.frame_input(Vec2::new(3.0, 4.0));
        assert_eq!(frame, FrameInput::idle(Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn folds_a_full_gesture() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::PointerMove { x: 15.0, y: 25.0 });
        q.push(InputEvent::PointerDown { x: 99.0, y: 99.0 });
        q.push(InputEvent::PointerUp { x: 30.0, y: 40.0 });

        let frame = q.frame_input(Vec2::ZERO);
        assert_eq!(frame.select, Some(Vec2::new(10.0, 20.0)));
        assert_eq!(frame.drag_position, Vec2::new(30.0, 40.0));
        assert!(frame.release);
        assert!(!frame.quit);
        assert!(q.events.is_empty());
    }

    #[test]
    fn escape_and_window_close_both_quit() {
        let mut q = InputQueue::new();
        q.push(InputEvent::KeyDown { key_code: 32 });
        assert!(!q.frame_input(Vec2::ZERO).quit);

        q.push(InputEvent::KeyDown { key_code: KEY_ESCAPE });
        assert!(q.frame_input(Vec2::ZERO).quit);

        q.push(InputEvent::Quit);
        assert!(q.frame_input(Vec2::ZERO).quit);
    }
}
