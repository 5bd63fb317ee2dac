use glam::Vec2;

use crate::api::config::{ConfigResult, SessionConfig};
use crate::api::types::{BallView, FrameSnapshot, GameEvent, GameResult, TurnStatus};
use crate::core::ball_set::BallSet;
use crate::core::rng::Xorshift64;
use crate::core::table::Table;
use crate::input::cue::{on_cue_captured, CueControl, CueTransition};
use crate::input::queue::{InputEvent, InputQueue};
use crate::rules::engine::{FoulNotice, RuleEngine, ShotOutcome};
use crate::rules::state::{MatchState, Player};
use crate::systems::step::step_frame;

/// One match at one table. Owns every piece of mutable state and advances
/// it one frame per [`Session::tick`].
pub struct Session {
    config: SessionConfig,
    table: Table,
    balls: BallSet,
    rules: RuleEngine,
    cue_control: CueControl,
    input: InputQueue,
    /// Last pointer location seen, carried across frames without pointer events.
    pointer: Vec2,
    foul_notice: Option<FoulNotice>,
    foul_frames_left: u32,
    events: Vec<GameEvent>,
    frame: u64,
    running: bool,
}

impl Session {
    /// Validate `config`, rack the balls and pick the opening player.
    pub fn new(config: SessionConfig) -> ConfigResult<Self> {
        config.validate()?;

        let table = Table::from_config(&config);
        let balls = BallSet::from_rack(table.rack());
        let opening = config.opening_player.unwrap_or_else(|| {
            Xorshift64::new(config.seed)
                .choose(&[Player::One, Player::Two])
                .unwrap_or(Player::One)
        });
        let cue_control = CueControl {
            grab_radius: config.ball_radius,
            sensitivity: config.drag_sensitivity,
        };
        log::info!("New match: player {} breaks", opening.number());

        Ok(Self {
            pointer: table.head_spot(),
            table,
            balls,
            rules: RuleEngine::new(opening),
            cue_control,
            input: InputQueue::new(),
            foul_notice: None,
            foul_frames_left: 0,
            events: Vec::with_capacity(config.max_events),
            frame: 0,
            running: true,
            config,
        })
    }

    /// Queue an input event for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: input, cue control, physics, rules.
    /// Once the session has stopped only a finished match's foul banner
    /// keeps counting down.
    pub fn tick(&mut self) {
        self.events.clear();
        if !self.running {
            self.input.clear();
            if self.rules.is_game_over() {
                self.count_down_foul();
            }
            return;
        }

        let input = self.input.frame_input(self.pointer);
        self.pointer = input.drag_position;
        if input.quit {
            self.running = false;
            log::info!("Session quit at frame {}", self.frame);
            return;
        }
        self.frame += 1;

        let can_select = self.rules.can_select_cue();
        if let Some(cue) = self.balls.cue_mut() {
            let transition = self
                .cue_control
                .apply_input(self.rules.drag_mut(), cue, &input, can_select);
            if transition == CueTransition::Thrown {
                self.rules.begin_shot();
            }
        }

        let drag = self.rules.state().drag();
        let report = step_frame(
            &mut self.balls,
            &self.table,
            &self.config,
            self.rules.shot_mut(),
            drag,
        );

        if report.cue_captured() && on_cue_captured(self.rules.drag_mut()) == CueTransition::Thrown {
            self.rules.begin_shot();
        }
        if let Some(first) = report.first_contact {
            self.emit(GameEvent::first_contact(first));
        }
        for &(category, pocket) in &report.captured {
            self.emit(GameEvent::pocket(category, pocket));
        }

        self.count_down_foul();

        let on_table = self.balls.categories();
        if let Some(outcome) = self.rules.on_settled(self.balls.all_at_rest(), &on_table) {
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: ShotOutcome) {
        match outcome {
            ShotOutcome::GameOver { winner, foul } => {
                if let Some(notice) = foul {
                    self.show_foul(notice);
                }
                self.emit(GameEvent::game_over(winner));
                self.running = false;
            }
            ShotOutcome::Foul(notice) => {
                self.show_foul(notice);
                self.emit_turn_change();
            }
            ShotOutcome::TurnPassed => self.emit_turn_change(),
            ShotOutcome::ShotSpent => {}
            ShotOutcome::Continue { assigned } => {
                if let Some(groups) = assigned {
                    self.emit(GameEvent::groups_assigned(groups));
                }
            }
        }
    }

    fn count_down_foul(&mut self) {
        if self.foul_frames_left > 0 {
            self.foul_frames_left -= 1;
            if self.foul_frames_left == 0 {
                self.foul_notice = None;
            }
        }
    }

    fn show_foul(&mut self, notice: FoulNotice) {
        self.emit(GameEvent::foul(&notice));
        self.foul_notice = Some(notice);
        self.foul_frames_left = self.config.foul_notice_frames;
    }

    fn emit_turn_change(&mut self) {
        let state = self.rules.state();
        let event = GameEvent::turn_change(state.current_player(), state.shots_remaining());
        self.emit(event);
    }

    fn emit(&mut self, event: GameEvent) {
        if self.events.len() < self.config.max_events {
            self.events.push(event);
        } else {
            log::warn!("Event buffer full, dropping event kind {}", event.kind);
        }
    }

    // -- Accessors --

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn balls(&self) -> &BallSet {
        &self.balls
    }

    pub fn match_state(&self) -> &MatchState {
        self.rules.state()
    }

    /// Events emitted by the last tick.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// False after a quit or once the match is decided.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Balls on the table in active-set order.
    pub fn active_balls(&self) -> impl Iterator<Item = BallView> + '_ {
        self.balls.iter().map(|b| BallView {
            category: b.category(),
            position: b.pos,
            heading: b.heading,
        })
    }

    pub fn turn_status(&self) -> TurnStatus {
        let state = self.rules.state();
        TurnStatus {
            current_player: state.current_player(),
            shots_remaining: state.shots_remaining(),
            groups: state.groups(),
        }
    }

    /// The foul banner, while it is still on screen.
    pub fn foul_notice(&self) -> Option<FoulNotice> {
        self.foul_notice
    }

    pub fn game_result(&self) -> Option<GameResult> {
        self.rules.state().winner().map(|winner| GameResult { winner })
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            frame: self.frame,
            balls: self.active_balls().collect(),
            turn: self.turn_status(),
            foul: self.foul_notice,
            result: self.game_result(),
            running: self.running,
        }
    }
}
