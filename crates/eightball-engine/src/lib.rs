pub mod api;
pub mod core;
pub mod systems;
pub mod bridge;
pub mod input;
pub mod rules;

// Re-export key types at crate root for convenience
pub use crate::api::config::{ConfigError, ConfigResult, SessionConfig};
pub use crate::api::session::Session;
pub use crate::api::types::{BallView, FrameSnapshot, GameEvent, GameResult, TurnStatus};
pub use crate::core::ball::{Ball, BallCategory, Group};
pub use crate::core::ball_set::BallSet;
pub use crate::core::table::{Pocket, Table};
pub use crate::core::time::FixedTimestep;
pub use crate::input::cue::{CueControl, CueTransition, DragState};
pub use crate::input::queue::{FrameInput, InputEvent, InputQueue};
pub use crate::bridge::instance::BallInstance;
pub use crate::bridge::protocol::{FrameBuffer, ProtocolLayout};
pub use crate::rules::engine::{FoulKind, FoulNotice, RuleEngine, ShotOutcome};
pub use crate::rules::shot::ShotRecord;
pub use crate::rules::state::{GroupAssignment, MatchState, Player, RulePhase};
pub use crate::systems::step::{step_frame, StepReport};
