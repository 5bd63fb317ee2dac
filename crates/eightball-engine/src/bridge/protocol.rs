/// Shared buffer layout.
/// Must stay in sync with the host's protocol reader.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Balls: max_balls × 4 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame.
/// The host reads them from the header to compute offsets.

use crate::api::config::SessionConfig;
use crate::api::session::Session;
use crate::api::types::{foul_code, group_code, GameEvent};
use crate::bridge::instance::BallInstance;
use crate::rules::state::Player;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_BALL_COUNT: usize = 2;
pub const HEADER_TABLE_WIDTH: usize = 3;
pub const HEADER_TABLE_HEIGHT: usize = 4;
pub const HEADER_CURRENT_PLAYER: usize = 5;
pub const HEADER_SHOTS_REMAINING: usize = 6;
pub const HEADER_GROUP_PLAYER_ONE: usize = 7;
pub const HEADER_GROUP_PLAYER_TWO: usize = 8;
pub const HEADER_FOUL_KIND: usize = 9;
pub const HEADER_FOUL_BALL: usize = 10;
pub const HEADER_WINNER: usize = 11;
pub const HEADER_RUNNING: usize = 12;
pub const HEADER_EVENT_COUNT: usize = 13;
pub const HEADER_MAX_BALLS: usize = 14;
pub const HEADER_MAX_EVENTS: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// One full rack.
pub const MAX_BALLS: usize = 16;

/// Floats per ball instance: x, y, heading, category (wire format, never changes).
pub const BALL_FLOATS: usize = BallInstance::FLOATS;

/// Floats per game event: kind, a, b, c (wire format, never changes).
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_balls: usize,
    /// Maximum game events per frame.
    pub max_events: usize,

    pub ball_data_floats: usize,
    pub event_data_floats: usize,

    /// Offset (in floats) where ball data begins.
    pub ball_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_balls: usize, max_events: usize) -> Self {
        let ball_data_floats = max_balls * BALL_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let ball_data_offset = HEADER_FLOATS;
        let event_data_offset = ball_data_offset + ball_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_balls,
            max_events,
            ball_data_floats,
            event_data_floats,
            ball_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(MAX_BALLS, config.max_events)
    }
}

/// 0 = nobody, otherwise the player number.
fn player_code(player: Option<Player>) -> f32 {
    player.map_or(0.0, |p| p.number() as f32)
}

/// The flat frame buffer the host reads after every tick.
pub struct FrameBuffer {
    layout: ProtocolLayout,
    data: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(layout: ProtocolLayout) -> Self {
        let data = vec![0.0; layout.buffer_total_floats];
        Self { layout, data }
    }

    /// Pack the session's current state plus `events` (truncated to capacity).
    pub fn write(&mut self, session: &Session, events: &[GameEvent]) {
        let layout = &self.layout;
        let balls: Vec<BallInstance> = session
            .active_balls()
            .take(layout.max_balls)
            .map(BallInstance::from)
            .collect();
        let events = &events[..events.len().min(layout.max_events)];

        let turn = session.turn_status();
        let foul = session.foul_notice();
        let header = &mut self.data[..HEADER_FLOATS];
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_FRAME_COUNTER] = session.frame() as f32;
        header[HEADER_BALL_COUNT] = balls.len() as f32;
        header[HEADER_TABLE_WIDTH] = session.table().width();
        header[HEADER_TABLE_HEIGHT] = session.table().height();
        header[HEADER_CURRENT_PLAYER] = turn.current_player.number() as f32;
        header[HEADER_SHOTS_REMAINING] = turn.shots_remaining as f32;
        header[HEADER_GROUP_PLAYER_ONE] = group_code(turn.groups.for_player(Player::One));
        header[HEADER_GROUP_PLAYER_TWO] = group_code(turn.groups.for_player(Player::Two));
        header[HEADER_FOUL_KIND] = foul_code(foul.map(|n| n.kind));
        header[HEADER_FOUL_BALL] = foul.and_then(|n| n.ball).map_or(-1.0, |b| b.number() as f32);
        header[HEADER_WINNER] = player_code(session.game_result().map(|r| r.winner));
        header[HEADER_RUNNING] = if session.is_running() { 1.0 } else { 0.0 };
        header[HEADER_EVENT_COUNT] = events.len() as f32;
        header[HEADER_MAX_BALLS] = layout.max_balls as f32;
        header[HEADER_MAX_EVENTS] = layout.max_events as f32;

        let ball_floats: &[f32] = bytemuck::cast_slice(&balls);
        let start = layout.ball_data_offset;
        self.data[start..start + ball_floats.len()].copy_from_slice(ball_floats);

        let event_floats: &[f32] = bytemuck::cast_slice(events);
        let start = layout.event_data_offset;
        self.data[start..start + event_floats.len()].copy_from_slice(event_floats);
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_ptr(&self) -> *const f32 {
        self.data.as_ptr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ball::BallCategory;

    #[test]
    fn default_layout_sizes() {
        let layout = ProtocolLayout::from_config(&SessionConfig::default());
        assert_eq!(layout.max_balls, 16);
        assert_eq!(layout.max_events, 16);
        assert_eq!(layout.ball_data_offset, HEADER_FLOATS);
        assert_eq!(layout.event_data_offset, HEADER_FLOATS + 16 * 4);
        assert_eq!(layout.buffer_total_floats, HEADER_FLOATS + 16 * 4 + 16 * 4);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(10, 3);
        assert_eq!(layout.event_data_offset, layout.ball_data_offset + layout.ball_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + layout.event_data_floats);
    }

    #[test]
    fn packs_header_balls_and_events() {
        let config = SessionConfig {
            opening_player: Some(Player::Two),
            max_events: 2,
            ..SessionConfig::default()
        };
        let layout = ProtocolLayout::from_config(&config);
        let session = Session::new(config).unwrap();
        let mut buffer = FrameBuffer::new(layout.clone());

        let events = [
            GameEvent::pocket(BallCategory::Solid(2), 1),
            GameEvent::turn_change(Player::One, 1),
            GameEvent::game_over(Player::One),
        ];
        buffer.write(&session, &events);
        let data = buffer.as_slice();

        assert_eq!(data[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(data[HEADER_BALL_COUNT], 16.0);
        assert_eq!(data[HEADER_TABLE_WIDTH], 1050.0);
        assert_eq!(data[HEADER_CURRENT_PLAYER], 2.0);
        assert_eq!(data[HEADER_SHOTS_REMAINING], 1.0);
        assert_eq!(data[HEADER_GROUP_PLAYER_ONE], 0.0);
        assert_eq!(data[HEADER_FOUL_KIND], 0.0);
        assert_eq!(data[HEADER_FOUL_BALL], -1.0);
        assert_eq!(data[HEADER_WINNER], 0.0);
        assert_eq!(data[HEADER_RUNNING], 1.0);
        assert_eq!(data[HEADER_EVENT_COUNT], 2.0);

        // Cue ball first, at the head spot.
        let spot = session.table().head_spot();
        let first = &data[layout.ball_data_offset..layout.ball_data_offset + BALL_FLOATS];
        assert_eq!(first, &[spot.x, spot.y, 0.0, 0.0]);

        let ev = &data[layout.event_data_offset..];
        assert_eq!(&ev[..4], &[GameEvent::POCKET, 2.0, 1.0, 0.0]);
        assert_eq!(ev[4], GameEvent::TURN_CHANGE);
        assert_eq!(ev.len(), 8);
    }
}
