use crate::api::config::SessionConfig;
use crate::core::ball::{Ball, BallCategory};
use crate::core::ball_set::BallSet;
use crate::core::collision;
use crate::core::table::Table;
use crate::input::cue::DragState;
use crate::rules::shot::ShotRecord;

/// What happened on the table during one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Captured balls with the index of the pocket that took them, in capture order.
    pub captured: Vec<(BallCategory, usize)>,
    /// Set on the frame the shot's first contact was latched.
    pub first_contact: Option<BallCategory>,
}

impl StepReport {
    pub fn cue_captured(&self) -> bool {
        self.captured.iter().any(|(c, _)| c.is_cue())
    }
}

/// Advance the table by one frame: integrate, bounce off rails, resolve
/// pairwise contacts, then capture pocketed balls.
///
/// Contacts and captures count in every drag state, including while the
/// player is still steering the cue ball. A captured cue ball is put
/// straight back on the head spot.
pub fn step_frame(
    balls: &mut BallSet,
    table: &Table,
    config: &SessionConfig,
    shot: &mut ShotRecord,
    drag: DragState,
) -> StepReport {
    let mut report = StepReport::default();
    let clamp_cue = drag.cue_clamps();

    for ball in balls.iter_mut() {
        ball.advance(config.drag, config.speed_threshold);
        let clamp = clamp_cue && ball.category().is_cue();
        table.bounce(ball, config.restitution, clamp);
    }

    let n = balls.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = balls.pair_mut(i, j);
            let hit = collision::collide(
                a,
                b,
                config.ball_radius,
                config.restitution,
                config.separation_epsilon,
            );
            if hit.is_none() {
                continue;
            }
            if let Some(first) = shot.record_contact(a.category(), b.category()) {
                log::debug!("First contact: {:?}", first);
                report.first_contact = Some(first);
            }
        }
    }

    // Decide every capture first, then remove.
    let captured: Vec<(BallCategory, usize)> = balls
        .iter()
        .filter_map(|b| table.pocket_at(b.pos).map(|pocket| (b.category(), pocket)))
        .collect();

    for &(category, pocket) in &captured {
        shot.record_pocketed(category);
        balls.remove(category);
        if category.is_cue() {
            balls.restore_cue(Ball::new(BallCategory::Cue, table.head_spot()));
        }
        log::debug!("{:?} captured by pocket {}", category, pocket);
    }
    report.captured = captured;

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn setup() -> (SessionConfig, Table) {
        let config = SessionConfig::default();
        let table = Table::from_config(&config);
        (config, table)
    }

    #[test]
    fn pocketed_ball_is_removed_exactly_once() {
        let (config, table) = setup();
        let mut balls = BallSet::from_rack([
            Ball::new(BallCategory::Cue, table.head_spot()),
            Ball::new(BallCategory::Solid(4), Vec2::new(62.0, 62.0)),
        ]);
        let mut shot = ShotRecord::new();

        let report = step_frame(&mut balls, &table, &config, &mut shot, DragState::ReleasedPendingSettle);
        assert_eq!(report.captured, vec![(BallCategory::Solid(4), 0)]);
        assert!(!balls.contains(BallCategory::Solid(4)));

        let report = step_frame(&mut balls, &table, &config, &mut shot, DragState::ReleasedPendingSettle);
        assert!(report.captured.is_empty());
        assert_eq!(shot.pocketed(), &[BallCategory::Solid(4)]);
    }

    #[test]
    fn scratched_cue_returns_to_the_head_spot() {
        let (config, table) = setup();
        let mut balls = BallSet::from_rack([
            Ball::new(BallCategory::Eight, Vec2::new(600.0, 300.0)),
            // Inside the rails but already in the bottom-right mouth.
            Ball::new(BallCategory::Cue, Vec2::new(985.0, 485.0))
                .with_heading(std::f32::consts::FRAC_PI_4)
                .with_speed(2.0),
        ]);
        let mut shot = ShotRecord::new();

        let report = step_frame(&mut balls, &table, &config, &mut shot, DragState::ReleasedPendingSettle);
        assert!(report.cue_captured());
        assert!(shot.was_pocketed(BallCategory::Cue));
        let cue = balls.cue().unwrap();
        assert_eq!(cue.pos, table.head_spot());
        assert_eq!(cue.speed, 0.0);
        assert_eq!(balls.categories()[0], BallCategory::Cue);
        assert_eq!(balls.len(), 2);
    }

    #[test]
    fn contact_made_while_steering_is_the_first_hit() {
        let (config, table) = setup();
        let mut balls = BallSet::from_rack([
            Ball::new(BallCategory::Cue, Vec2::new(300.0, 275.0)).with_speed(4.0),
            Ball::new(BallCategory::Striped(2), Vec2::new(325.0, 275.0)),
            Ball::new(BallCategory::Solid(2), Vec2::new(700.0, 275.0)),
        ]);
        let mut shot = ShotRecord::new();

        let report = step_frame(&mut balls, &table, &config, &mut shot, DragState::Dragging);
        assert_eq!(report.first_contact, Some(BallCategory::Striped(2)));
        assert_eq!(shot.first_object_hit(), Some(BallCategory::Striped(2)));
        let object = balls.get(BallCategory::Striped(2)).unwrap();
        assert!(object.is_moving());

        // Later contacts in the same shot do not replace the latch.
        let report = step_frame(&mut balls, &table, &config, &mut shot, DragState::ReleasedPendingSettle);
        assert_eq!(report.first_contact, None);
        assert_eq!(shot.first_object_hit(), Some(BallCategory::Striped(2)));
    }

    #[test]
    fn pocket_during_a_drag_is_recorded() {
        let (config, table) = setup();
        let mut balls = BallSet::from_rack([
            Ball::new(BallCategory::Cue, Vec2::new(300.0, 275.0)),
            Ball::new(BallCategory::Solid(3), Vec2::new(985.0, 62.0)),
        ]);
        let mut shot = ShotRecord::new();

        let report = step_frame(&mut balls, &table, &config, &mut shot, DragState::Dragging);
        assert_eq!(report.captured, vec![(BallCategory::Solid(3), 2)]);
        assert!(shot.was_pocketed(BallCategory::Solid(3)));
    }

    #[test]
    fn table_comes_to_rest_after_a_break() {
        let (config, table) = setup();
        let mut balls = BallSet::from_rack(table.rack());
        balls.cue_mut().unwrap().speed = 15.0;
        let mut shot = ShotRecord::new();

        let mut frames = 0;
        loop {
            let report = step_frame(&mut balls, &table, &config, &mut shot, DragState::ReleasedPendingSettle);
            for (category, _) in report.captured {
                assert!(category.is_cue() || !balls.contains(category));
            }
            assert!(balls.contains(BallCategory::Cue));
            if balls.all_at_rest() {
                break;
            }
            frames += 1;
            assert!(frames < 20_000, "table never settled");
        }
        assert_eq!(shot.first_object_hit(), Some(BallCategory::Solid(1)));
    }

    #[test]
    fn held_cue_stays_inside_without_bouncing() {
        let (config, table) = setup();
        let mut balls = BallSet::from_rack([Ball::new(BallCategory::Cue, Vec2::new(60.0, 275.0))
            .with_heading(std::f32::consts::PI)
            .with_speed(8.0)]);
        let mut shot = ShotRecord::new();
        step_frame(&mut balls, &table, &config, &mut shot, DragState::Dragging);
        let cue = balls.cue().unwrap();
        assert_eq!(cue.pos.x, 57.0);
        assert_eq!(cue.heading, std::f32::consts::PI);
    }
}
