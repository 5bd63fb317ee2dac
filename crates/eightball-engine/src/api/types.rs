use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::core::ball::{BallCategory, Group};
use crate::rules::engine::{FoulKind, FoulNotice};
use crate::rules::state::{GroupAssignment, Player};

/// A game event communicated from Rust to the host via the event buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// `a` = ball code, `b` = pocket index.
    pub const POCKET: f32 = 1.0;
    /// `a` = code of the first ball the cue ball touched.
    pub const FIRST_CONTACT: f32 = 2.0;
    /// `a` = foul code, `b` = ball code or -1, `c` = offending player.
    pub const FOUL: f32 = 3.0;
    /// `a` = player now at the table, `b` = shots owed.
    pub const TURN_CHANGE: f32 = 4.0;
    /// `a`, `b` = group codes of players one and two.
    pub const GROUPS_ASSIGNED: f32 = 5.0;
    /// `a` = winner.
    pub const GAME_OVER: f32 = 6.0;

    pub fn pocket(category: BallCategory, pocket: usize) -> Self {
        Self {
            kind: Self::POCKET,
            a: category.number() as f32,
            b: pocket as f32,
            c: 0.0,
        }
    }

    pub fn first_contact(category: BallCategory) -> Self {
        Self {
            kind: Self::FIRST_CONTACT,
            a: category.number() as f32,
            ..Self::default()
        }
    }

    pub fn foul(notice: &FoulNotice) -> Self {
        Self {
            kind: Self::FOUL,
            a: foul_code(Some(notice.kind)),
            b: notice.ball.map_or(-1.0, |b| b.number() as f32),
            c: notice.player.number() as f32,
        }
    }

    pub fn turn_change(player: Player, shots: u8) -> Self {
        Self {
            kind: Self::TURN_CHANGE,
            a: player.number() as f32,
            b: shots as f32,
            c: 0.0,
        }
    }

    pub fn groups_assigned(groups: GroupAssignment) -> Self {
        Self {
            kind: Self::GROUPS_ASSIGNED,
            a: group_code(groups.for_player(Player::One)),
            b: group_code(groups.for_player(Player::Two)),
            c: 0.0,
        }
    }

    pub fn game_over(winner: Player) -> Self {
        Self {
            kind: Self::GAME_OVER,
            a: winner.number() as f32,
            ..Self::default()
        }
    }
}

/// 0 = unassigned, 1 = solids, 2 = stripes.
pub fn group_code(group: Option<Group>) -> f32 {
    match group {
        None => 0.0,
        Some(Group::Solids) => 1.0,
        Some(Group::Stripes) => 2.0,
    }
}

/// 0 = none, 1 = no ball hit, 2 = illegal first contact, 3 = illegal pocket.
pub fn foul_code(kind: Option<FoulKind>) -> f32 {
    match kind {
        None => 0.0,
        Some(FoulKind::NoBallHit) => 1.0,
        Some(FoulKind::IllegalFirstContact) => 2.0,
        Some(FoulKind::IllegalPocket) => 3.0,
    }
}

/// A ball as the renderer needs it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallView {
    pub category: BallCategory,
    pub position: Vec2,
    pub heading: f32,
}

/// HUD status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnStatus {
    pub current_player: Player,
    pub shots_remaining: u8,
    pub groups: GroupAssignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub winner: Player,
}

/// Everything a host presents for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub balls: Vec<BallView>,
    pub turn: TurnStatus,
    pub foul: Option<FoulNotice>,
    pub result: Option<GameResult>,
    pub running: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_event_is_four_floats() {
        assert_eq!(std::mem::size_of::<GameEvent>(), GameEvent::FLOATS * 4);
        let event = GameEvent::pocket(BallCategory::Striped(3), 4);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&event));
        assert_eq!(floats, &[GameEvent::POCKET, 11.0, 4.0, 0.0]);
    }

    #[test]
    fn foul_event_without_a_ball_uses_minus_one() {
        let event = GameEvent::foul(&FoulNotice {
            kind: FoulKind::NoBallHit,
            ball: None,
            player: Player::Two,
        });
        assert_eq!(event.a, 1.0);
        assert_eq!(event.b, -1.0);
        assert_eq!(event.c, 2.0);
    }
}
