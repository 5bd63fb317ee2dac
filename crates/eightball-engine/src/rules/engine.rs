//! 8-ball rules: judges each completed shot and advances turn, foul and
//! end-of-match state.
//!
//! Rules are checked in order and the first match decides the shot:
//!
//! 1. eight ball pocketed: win or loss, match over
//! 2. cue ball pocketed, or an opponent's ball pocketed while the shooter
//!    still has balls of their own: foul
//! 3. cue ball touched nothing: foul
//! 4. first contact was the eight ball too early, or an opponent's ball: foul
//! 5. legal, nothing pocketed: spend a shot, or pass the turn on the last one
//! 6. legal with pocketed balls: assign groups if still open, shooter continues
//!
//! A foul hands the opponent two shots.

use crate::core::ball::{BallCategory, Group};
use crate::input::cue::DragState;
use crate::rules::shot::ShotRecord;
use crate::rules::state::{GroupAssignment, MatchState, Player, RulePhase};

/// Kinds of foul reported to the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoulKind {
    NoBallHit,
    IllegalFirstContact,
    IllegalPocket,
}

/// A foul as shown to the players: what happened, which ball, and who did it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoulNotice {
    pub kind: FoulKind,
    pub ball: Option<BallCategory>,
    pub player: Player,
}

/// Result of judging one shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// The eight ball went down. `foul` is set when the shooter lost.
    GameOver {
        winner: Player,
        foul: Option<FoulNotice>,
    },
    /// Foul: the opponent now has the table with two shots.
    Foul(FoulNotice),
    /// Legal miss on the last owed shot: the opponent has the table.
    TurnPassed,
    /// Legal miss with a shot still owed: the same player goes again.
    ShotSpent,
    /// The shooter pocketed their own (or, before assignment, any) ball and
    /// keeps the table. `assigned` is set when this shot decided the groups.
    Continue { assigned: Option<GroupAssignment> },
}

/// Owns the match state and the facts of the shot in progress.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    state: MatchState,
    shot: ShotRecord,
}

impl RuleEngine {
    pub fn new(opening: Player) -> Self {
        Self {
            state: MatchState::new(opening),
            shot: ShotRecord::new(),
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn shot(&self) -> &ShotRecord {
        &self.shot
    }

    /// Shot facts are written by the simulation step.
    pub fn shot_mut(&mut self) -> &mut ShotRecord {
        &mut self.shot
    }

    pub fn drag_mut(&mut self) -> &mut DragState {
        &mut self.state.drag
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase == RulePhase::GameOver
    }

    /// The cue ball may only be picked up between shots.
    pub fn can_select_cue(&self) -> bool {
        self.state.phase == RulePhase::AwaitingShot
    }

    /// The cue ball was thrown: wait for the table to settle.
    pub fn begin_shot(&mut self) {
        if self.state.phase == RulePhase::AwaitingShot {
            self.state.phase = RulePhase::ShotInProgress;
            log::debug!("Player {} shoots", self.state.current_player.number());
        }
    }

    /// Call once per frame after physics. Judges the shot the first frame the
    /// table is at rest after a throw; otherwise does nothing.
    pub fn on_settled(&mut self, all_at_rest: bool, on_table: &[BallCategory]) -> Option<ShotOutcome> {
        if self.is_game_over() || !all_at_rest || !self.state.drag.is_thrown() {
            return None;
        }
        self.evaluate(on_table)
    }

    /// Judge the recorded shot against the balls left on the table, then
    /// reset the shot record. A finished match ignores further calls.
    pub fn evaluate(&mut self, on_table: &[BallCategory]) -> Option<ShotOutcome> {
        if self.is_game_over() {
            return None;
        }
        self.state.phase = RulePhase::Evaluating;

        let outcome = self.judge(on_table);

        self.shot.clear();
        self.state.drag = DragState::Idle;
        if !self.is_game_over() {
            self.state.phase = RulePhase::AwaitingShot;
        }
        Some(outcome)
    }

    fn judge(&mut self, on_table: &[BallCategory]) -> ShotOutcome {
        let shooter = self.state.current_player;
        let own = self.state.groups.for_player(shooter);
        let own_remaining = own.map_or(false, |g| on_table.iter().any(|c| c.group() == Some(g)));

        if self.shot.was_pocketed(BallCategory::Eight) {
            return self.finish_on_eight(shooter, own, own_remaining);
        }

        if let Some(ball) = self.illegally_pocketed(own, own_remaining) {
            return self.foul(FoulKind::IllegalPocket, Some(ball));
        }

        let Some(first) = self.shot.first_object_hit() else {
            return self.foul(FoulKind::NoBallHit, None);
        };

        if is_illegal_first_contact(first, own, own_remaining) {
            return self.foul(FoulKind::IllegalFirstContact, Some(first));
        }

        if self.shot.pocketed().is_empty() {
            if self.state.shots_remaining <= 1 {
                self.state.pass_turn(1);
                log::info!("No ball pocketed, player {} to shoot", self.state.current_player.number());
                return ShotOutcome::TurnPassed;
            }
            self.state.shots_remaining -= 1;
            log::info!("No ball pocketed, player {} has one shot left", shooter.number());
            return ShotOutcome::ShotSpent;
        }

        let mut assigned = None;
        if !self.state.groups.is_assigned() {
            let first_group = self.shot.pocketed().iter().find_map(|c| c.group());
            if let Some(group) = first_group {
                if self.state.groups.assign(shooter, group) {
                    log::info!("Player {} takes {:?}", shooter.number(), group);
                    assigned = Some(self.state.groups);
                }
            }
        }
        ShotOutcome::Continue { assigned }
    }

    fn finish_on_eight(&mut self, shooter: Player, own: Option<Group>, own_remaining: bool) -> ShotOutcome {
        let bad_first_contact = self
            .shot
            .first_object_hit()
            .map_or(true, |first| is_illegal_first_contact(first, own, own_remaining));
        let lost = self.shot.pocketed().len() > 1 || own_remaining || own.is_none() || bad_first_contact;

        let winner = if lost { shooter.other() } else { shooter };
        self.state.winner = Some(winner);
        self.state.phase = RulePhase::GameOver;

        let foul = lost.then_some(FoulNotice {
            kind: FoulKind::IllegalPocket,
            ball: Some(BallCategory::Eight),
            player: shooter,
        });
        if lost {
            log::info!("Player {} pocketed the eight ball early, player {} wins", shooter.number(), winner.number());
        } else {
            log::info!("Player {} wins", winner.number());
        }
        ShotOutcome::GameOver { winner, foul }
    }

    /// The first ball whose capture is a foul, if any.
    fn illegally_pocketed(&self, own: Option<Group>, own_remaining: bool) -> Option<BallCategory> {
        if self.shot.was_pocketed(BallCategory::Cue) {
            return Some(BallCategory::Cue);
        }
        let own = own?;
        if !own_remaining {
            return None;
        }
        self.shot
            .pocketed()
            .iter()
            .copied()
            .find(|c| c.group() == Some(own.other()))
    }

    fn foul(&mut self, kind: FoulKind, ball: Option<BallCategory>) -> ShotOutcome {
        let notice = FoulNotice {
            kind,
            ball,
            player: self.state.current_player,
        };
        self.state.pass_turn(2);
        log::info!(
            "Foul {:?} by player {} ({:?}), player {} gets two shots",
            kind,
            notice.player.number(),
            ball,
            self.state.current_player.number()
        );
        ShotOutcome::Foul(notice)
    }
}

/// The eight ball may only be played first once the shooter's group is
/// cleared; an opponent's ball may never be played first.
fn is_illegal_first_contact(first: BallCategory, own: Option<Group>, own_remaining: bool) -> bool {
    match first {
        BallCategory::Eight => own.is_none() || own_remaining,
        other => match own {
            Some(group) => other.group() == Some(group.other()),
            None => false,
        },
    }
}
