//! Table geometry: rails, pockets, rack layout and the cue ball's head spot.
//!
//! ```text
//!  +--O-----------O-----------O--+   O = pocket (visual center sits on the
//!  |  .                       .  |       rail inset, 2R from the outer edge)
//!  |  .   head      rack      .  |
//!  |  .    x         >        .  |   rails = playable rectangle inset by 2R;
//!  |  .                       .  |   ball centers stay one ball radius inside
//!  +--O-----------O-----------O--+
//! ```

use std::f32::consts::PI;

use glam::Vec2;

use crate::api::config::SessionConfig;
use crate::core::ball::{Ball, BallCategory};

/// One of the six capture zones.
///
/// Zones are axis-aligned and open toward the outer edge of the table, so a
/// ball that slipped past a rail is still captured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pocket {
    zone_min: Vec2,
    zone_max: Vec2,
}

impl Pocket {
    /// Whether a ball centered at `pos` drops into this pocket.
    pub fn captures(&self, pos: Vec2) -> bool {
        pos.x > self.zone_min.x
            && pos.x < self.zone_max.x
            && pos.y > self.zone_min.y
            && pos.y < self.zone_max.y
    }
}

/// Which rails a ball touched during a bounce check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RailContact {
    /// Left or right rail.
    pub side: bool,
    /// Top or bottom rail.
    pub end: bool,
}

/// Static table description built once per session.
#[derive(Debug, Clone)]
pub struct Table {
    width: f32,
    height: f32,
    ball_radius: f32,
    /// Lowest legal ball-center coordinate.
    min: Vec2,
    /// Highest legal ball-center coordinate.
    max: Vec2,
    pockets: [Pocket; 6],
}

impl Table {
    pub fn from_config(config: &SessionConfig) -> Self {
        let w = config.table_width;
        let h = config.table_height;
        let r = config.pocket_radius;
        let inset = 2.0 * r + config.ball_radius;
        let reach = 3.0 * r;
        let far = f32::INFINITY;

        let zone = |zone_min: Vec2, zone_max: Vec2| Pocket { zone_min, zone_max };

        let pockets = [
            // Top row: left corner, middle, right corner.
            zone(Vec2::splat(-far), Vec2::splat(reach)),
            zone(Vec2::new(w / 2.0 - r, -far), Vec2::new(w / 2.0 + r, reach)),
            zone(Vec2::new(w - reach, -far), Vec2::new(far, reach)),
            // Bottom row.
            zone(Vec2::new(-far, h - reach), Vec2::new(reach, far)),
            zone(Vec2::new(w / 2.0 - r, h - reach), Vec2::new(w / 2.0 + r, far)),
            zone(Vec2::new(w - reach, h - reach), Vec2::splat(far)),
        ];

        Self {
            width: w,
            height: h,
            ball_radius: config.ball_radius,
            min: Vec2::splat(inset),
            max: Vec2::new(w - inset, h - inset),
            pockets,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Index of the pocket capturing `pos`, if any.
    pub fn pocket_at(&self, pos: Vec2) -> Option<usize> {
        self.pockets.iter().position(|p| p.captures(pos))
    }

    /// Where the cue ball is placed at the start and after a scratch.
    pub fn head_spot(&self) -> Vec2 {
        Vec2::new(self.width / 4.0, self.height / 2.0)
    }

    /// Keep a ball inside the rails.
    ///
    /// A ball on or past a rail is mirrored back across it, its heading reflected
    /// and its speed scaled by `restitution`. With `clamp` set (the cue ball
    /// while the player still controls it) it is only pinned to the rail.
    pub fn bounce(&self, ball: &mut Ball, restitution: f32, clamp: bool) -> RailContact {
        let mut contact = RailContact::default();

        if ball.pos.x >= self.max.x {
            contact.side = true;
            ball.pos.x = if clamp { self.max.x } else { 2.0 * self.max.x - ball.pos.x };
        } else if ball.pos.x <= self.min.x {
            contact.side = true;
            ball.pos.x = if clamp { self.min.x } else { 2.0 * self.min.x - ball.pos.x };
        }
        if contact.side && !clamp {
            ball.heading = PI - ball.heading;
            ball.speed *= restitution;
        }

        if ball.pos.y >= self.max.y {
            contact.end = true;
            ball.pos.y = if clamp { self.max.y } else { 2.0 * self.max.y - ball.pos.y };
        } else if ball.pos.y <= self.min.y {
            contact.end = true;
            ball.pos.y = if clamp { self.min.y } else { 2.0 * self.min.y - ball.pos.y };
        }
        if contact.end && !clamp {
            ball.heading = -ball.heading;
            ball.speed *= restitution;
        }

        contact
    }

    /// Starting position for every ball, in creation order.
    ///
    /// The rack is a five-row triangle pointing at the head spot with the
    /// eight ball in the middle of the third row. Rows run away from the
    /// head spot, listed top rail first:
    /// ```text
    /// row 0:            S1
    /// row 1:          T3  T2
    /// row 2:        S5  8   S6
    /// row 3:      T7  T4  T6  S2
    /// row 4:    T1  S4  S7  T5  S3
    /// ```
    pub fn rack(&self) -> [Ball; 16] {
        let r = self.ball_radius;
        let apex = Vec2::new(self.width * 3.0 / 4.0, self.height / 2.0);
        // (row offset, lateral offset) in ball radii from the apex.
        let spot = |category: BallCategory| -> (f32, f32) {
            match category {
                BallCategory::Cue => (0.0, 0.0),
                BallCategory::Eight => (4.0, 0.0),
                BallCategory::Solid(1) => (0.0, 0.0),
                BallCategory::Solid(2) => (6.0, 3.0),
                BallCategory::Solid(3) => (8.0, 4.0),
                BallCategory::Solid(4) => (8.0, -2.0),
                BallCategory::Solid(5) => (4.0, -2.0),
                BallCategory::Solid(6) => (4.0, 2.0),
                BallCategory::Solid(_) => (8.0, 0.0),
                BallCategory::Striped(1) => (8.0, -4.0),
                BallCategory::Striped(2) => (2.0, 1.0),
                BallCategory::Striped(3) => (2.0, -1.0),
                BallCategory::Striped(4) => (6.0, -1.0),
                BallCategory::Striped(5) => (8.0, 2.0),
                BallCategory::Striped(6) => (6.0, 1.0),
                BallCategory::Striped(_) => (6.0, -3.0),
            }
        };

        BallCategory::ALL.map(|category| {
            let pos = if category.is_cue() {
                self.head_spot()
            } else {
                let (along, across) = spot(category);
                apex + Vec2::new(along * r, across * r)
            };
            Ball::new(category, pos)
        })
    }
}
