//! Direct control of the cue ball by pointer drag.
//!
//! ```text
//!  Idle ──select──▶ Selected ──move──▶ Dragging ──release──▶ ReleasedPendingSettle
//!   ▲                  │                                            │
//!   └────release───────┘◀──────────── shot evaluated ───────────────┘
//! ```
//!
//! While the player holds the cue ball its heading and speed are set every
//! frame from the vector toward the pointer. Nothing here is a physical
//! impulse: on release the ball simply keeps the last velocity it was given.

use glam::Vec2;

use crate::core::ball::Ball;
use crate::input::queue::FrameInput;

/// Where the cue ball is in the select/drag/throw cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    /// Picked up, no drag frame yet.
    Selected,
    Dragging,
    /// Thrown; waiting for the table to come to rest.
    ReleasedPendingSettle,
}

impl DragState {
    pub fn is_thrown(self) -> bool {
        self == DragState::ReleasedPendingSettle
    }

    /// The player currently steers the cue ball.
    pub fn holds_cue(self) -> bool {
        matches!(self, DragState::Selected | DragState::Dragging)
    }

    /// The cue ball pins to the rails instead of bouncing until it is thrown.
    pub fn cue_clamps(self) -> bool {
        !self.is_thrown()
    }
}

/// What one frame of input did to the drag state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueTransition {
    None,
    Selected,
    /// The shot started.
    Thrown,
    /// The selection was dropped without a shot.
    Cancelled,
}

/// Tunables for [`apply_input`].
#[derive(Debug, Clone, Copy)]
pub struct CueControl {
    /// Maximum pointer distance from the cue center that selects it.
    pub grab_radius: f32,
    /// Speed per unit of pointer distance.
    pub sensitivity: f32,
}

impl CueControl {
    /// Apply one frame of input: select, then release, then steer.
    ///
    /// `can_select` is false while a shot is still being played out or the
    /// match is over. Selects that miss the cue ball are ignored.
    pub fn apply_input(
        &self,
        state: &mut DragState,
        cue: &mut Ball,
        input: &FrameInput,
        can_select: bool,
    ) -> CueTransition {
        let mut transition = CueTransition::None;

        if let Some(at) = input.select {
            if *state == DragState::Idle && can_select && at.distance(cue.pos) <= self.grab_radius {
                *state = DragState::Selected;
                transition = CueTransition::Selected;
                log::debug!("Cue ball selected at ({:.1}, {:.1})", at.x, at.y);
            }
        }

        if input.release {
            match *state {
                DragState::Selected => {
                    *state = DragState::Idle;
                    cue.stop();
                    return CueTransition::Cancelled;
                }
                DragState::Dragging => {
                    *state = DragState::ReleasedPendingSettle;
                    log::debug!("Cue ball thrown: heading {:.3}, speed {:.2}", cue.heading, cue.speed);
                    return CueTransition::Thrown;
                }
                _ => {}
            }
        }

        if state.holds_cue() {
            self.steer(cue, input.drag_position);
            if cue.is_moving() {
                *state = DragState::Dragging;
            }
        }
        transition
    }

    /// Point the cue ball at `target` with speed proportional to the distance.
    fn steer(&self, cue: &mut Ball, target: Vec2) {
        let pull = target - cue.pos;
        cue.set_velocity(pull * self.sensitivity);
    }
}

/// The cue ball dropped into a pocket. A ball mid-drag counts as thrown so
/// the scratch is judged; a ball merely selected just drops the selection.
pub fn on_cue_captured(state: &mut DragState) -> CueTransition {
    match *state {
        DragState::Dragging => {
            *state = DragState::ReleasedPendingSettle;
            CueTransition::Thrown
        }
        DragState::Selected => {
            *state = DragState::Idle;
            CueTransition::Cancelled
        }
        _ => CueTransition::None,
    }
}
