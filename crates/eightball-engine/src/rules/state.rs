use serde::{Deserialize, Serialize};

use crate::core::ball::Group;
use crate::input::cue::DragState;

/// One of the two players at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// 1 or 2, as shown on the HUD.
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

/// Which group each player shoots at. Starts open and is fixed once set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupAssignment {
    player_one: Option<Group>,
    player_two: Option<Group>,
}

impl GroupAssignment {
    pub fn for_player(&self, player: Player) -> Option<Group> {
        match player {
            Player::One => self.player_one,
            Player::Two => self.player_two,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.player_one.is_some()
    }

    /// Give `shooter` the group `group` and the opponent the other one.
    /// Returns false (and changes nothing) if groups were already assigned.
    pub(crate) fn assign(&mut self, shooter: Player, group: Group) -> bool {
        if self.is_assigned() {
            return false;
        }
        let (one, two) = match shooter {
            Player::One => (group, group.other()),
            Player::Two => (group.other(), group),
        };
        self.player_one = Some(one);
        self.player_two = Some(two);
        true
    }
}

/// Phases of the rules state machine. `GameOver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulePhase {
    /// Waiting for the current player to throw the cue ball.
    AwaitingShot,
    /// The cue ball was released; balls are still rolling.
    ShotInProgress,
    /// The table settled and the shot is being judged.
    Evaluating,
    GameOver,
}

/// Match-level state that persists across shots.
#[derive(Debug, Clone)]
pub struct MatchState {
    pub(crate) current_player: Player,
    pub(crate) groups: GroupAssignment,
    pub(crate) shots_remaining: u8,
    pub(crate) winner: Option<Player>,
    pub(crate) phase: RulePhase,
    pub(crate) drag: DragState,
}

impl MatchState {
    pub fn new(opening: Player) -> Self {
        Self {
            current_player: opening,
            groups: GroupAssignment::default(),
            shots_remaining: 1,
            winner: None,
            phase: RulePhase::AwaitingShot,
            drag: DragState::Idle,
        }
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn groups(&self) -> GroupAssignment {
        self.groups
    }

    /// Shots the current player is owed before the turn passes (1 or 2).
    pub fn shots_remaining(&self) -> u8 {
        self.shots_remaining
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn phase(&self) -> RulePhase {
        self.phase
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    /// Hand the table to the opponent.
    pub(crate) fn pass_turn(&mut self, shots: u8) {
        self.current_player = self.current_player.other();
        self.shots_remaining = shots;
    }
}
