use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The two object-ball groups a player can be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    Solids,
    Stripes,
}

impl Group {
    /// The group the opponent ends up with.
    pub fn other(self) -> Group {
        match self {
            Group::Solids => Group::Stripes,
            Group::Stripes => Group::Solids,
        }
    }
}

/// Identity of a ball, fixed at creation. Group and legality checks match
/// on this.
///
/// `Solid(n)` and `Striped(n)` both take `n` in `1..=7`. The striped ball
/// printed "9" is `Striped(1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BallCategory {
    Cue,
    Eight,
    Solid(u8),
    Striped(u8),
}

impl BallCategory {
    /// All sixteen balls in creation order: cue, eight, solids, stripes.
    pub const ALL: [BallCategory; 16] = [
        BallCategory::Cue,
        BallCategory::Eight,
        BallCategory::Solid(1),
        BallCategory::Solid(2),
        BallCategory::Solid(3),
        BallCategory::Solid(4),
        BallCategory::Solid(5),
        BallCategory::Solid(6),
        BallCategory::Solid(7),
        BallCategory::Striped(1),
        BallCategory::Striped(2),
        BallCategory::Striped(3),
        BallCategory::Striped(4),
        BallCategory::Striped(5),
        BallCategory::Striped(6),
        BallCategory::Striped(7),
    ];

    /// Number printed on the ball (cue is 0, stripes are 9..=15).
    pub fn number(self) -> u8 {
        match self {
            BallCategory::Cue => 0,
            BallCategory::Solid(n) => n,
            BallCategory::Eight => 8,
            BallCategory::Striped(n) => n + 8,
        }
    }

    /// Inverse of [`BallCategory::number`].
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            0 => Some(BallCategory::Cue),
            1..=7 => Some(BallCategory::Solid(number)),
            8 => Some(BallCategory::Eight),
            9..=15 => Some(BallCategory::Striped(number - 8)),
            _ => None,
        }
    }

    /// Group this ball counts toward. Cue and eight belong to neither.
    pub fn group(self) -> Option<Group> {
        match self {
            BallCategory::Solid(_) => Some(Group::Solids),
            BallCategory::Striped(_) => Some(Group::Stripes),
            BallCategory::Cue | BallCategory::Eight => None,
        }
    }

    pub fn is_cue(self) -> bool {
        self == BallCategory::Cue
    }

    pub fn is_eight(self) -> bool {
        self == BallCategory::Eight
    }
}

/// A kinematic ball on the table.
///
/// Motion is stored as heading (radians) plus a non-negative speed in table
/// units per frame. A speed of exactly `0.0` means the ball is at rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    category: BallCategory,
    /// Center position in table space.
    pub pos: Vec2,
    /// Direction of travel in radians.
    pub heading: f32,
    /// Distance covered per frame.
    pub speed: f32,
}

impl Ball {
    /// Create a stationary ball at `pos`.
    pub fn new(category: BallCategory, pos: Vec2) -> Self {
        Self {
            category,
            pos,
            heading: 0.0,
            speed: 0.0,
        }
    }

    // -- Builder pattern --

    pub fn with_heading(mut self, heading: f32) -> Self {
        self.heading = heading;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed.max(0.0);
        self
    }

    pub fn category(&self) -> BallCategory {
        self.category
    }

    pub fn is_moving(&self) -> bool {
        self.speed > 0.0
    }

    /// Velocity vector per frame.
    pub fn velocity(&self) -> Vec2 {
        Vec2::from_angle(self.heading) * self.speed
    }

    /// Set heading and speed from a velocity vector.
    /// A zero vector stops the ball and keeps the previous heading.
    pub fn set_velocity(&mut self, vel: Vec2) {
        self.speed = vel.length();
        if self.speed > 0.0 {
            self.heading = vel.y.atan2(vel.x);
        }
    }

    pub fn stop(&mut self) {
        self.speed = 0.0;
    }

    /// One frame of rolling: snap creeping speeds to rest, otherwise move
    /// along the heading and bleed off speed by the drag factor.
    pub fn advance(&mut self, drag: f32, speed_threshold: f32) {
        if self.speed < speed_threshold {
            self.speed = 0.0;
            return;
        }
        self.pos += Vec2::from_angle(self.heading) * self.speed;
        self.speed *= drag;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn numbers_round_trip_for_the_full_rack() {
        for (i, category) in BallCategory::ALL.iter().enumerate() {
            assert_eq!(BallCategory::from_number(category.number()), Some(*category));
            // Creation order is not number order: only the cue is index 0.
            if i == 0 {
                assert_eq!(category.number(), 0);
            }
        }
        assert_eq!(BallCategory::from_number(16), None);
        assert_eq!(BallCategory::Striped(1).number(), 9);
    }

    #[test]
    fn groups_exclude_cue_and_eight() {
        assert_eq!(BallCategory::Solid(3).group(), Some(Group::Solids));
        assert_eq!(BallCategory::Striped(3).group(), Some(Group::Stripes));
        assert_eq!(BallCategory::Cue.group(), None);
        assert_eq!(BallCategory::Eight.group(), None);
        assert_eq!(Group::Solids.other(), Group::Stripes);
    }

    #[test]
    fn advance_moves_along_heading_and_applies_drag() {
        let mut ball = Ball::new(BallCategory::Solid(1), Vec2::new(100.0, 100.0))
            .with_heading(FRAC_PI_2)
            .with_speed(10.0);
        ball.advance(0.5, 0.01);
        assert!((ball.pos.x - 100.0).abs() < 1e-4);
        assert!((ball.pos.y - 110.0).abs() < 1e-4);
        assert_eq!(ball.speed, 5.0);
    }

    #[test]
    fn creeping_speed_snaps_to_exact_rest_and_stays_there() {
        let start = Vec2::new(50.0, 60.0);
        let mut ball = Ball::new(BallCategory::Eight, start).with_speed(0.005);
        ball.advance(0.995, 0.01);
        assert_eq!(ball.speed, 0.0);
        assert_eq!(ball.pos, start);
        for _ in 0..10 {
            ball.advance(0.995, 0.01);
        }
        assert_eq!(ball.speed, 0.0);
        assert!(!ball.is_moving());
    }

    #[test]
    fn rolling_ball_eventually_rests() {
        let mut ball = Ball::new(BallCategory::Cue, Vec2::ZERO).with_speed(20.0);
        let mut frames = 0;
        while ball.is_moving() {
            ball.advance(0.995, 0.01);
            frames += 1;
            assert!(frames < 10_000, "ball never came to rest");
        }
        assert_eq!(ball.speed, 0.0);
    }

    #[test]
    fn set_velocity_keeps_heading_when_stopped() {
        let mut ball = Ball::new(BallCategory::Cue, Vec2::ZERO).with_heading(1.0);
        ball.set_velocity(Vec2::ZERO);
        assert_eq!(ball.heading, 1.0);
        assert_eq!(ball.speed, 0.0);

        ball.set_velocity(Vec2::new(0.0, -3.0));
        assert!((ball.heading + FRAC_PI_2).abs() < 1e-5);
        assert!((ball.speed - 3.0).abs() < 1e-5);
    }
}
