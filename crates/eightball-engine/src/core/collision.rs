//! Ball-to-ball contact: detection, equal-mass elastic response and overlap
//! correction. Pure functions over [`Ball`] state.
//!
//! ## Response model
//!
//! Balls have equal mass, so an elastic impact swaps the velocity components
//! along the contact normal and leaves the tangential components alone:
//!
//! ```text
//!   moving ──●→  ●  stationary        ●↗  kept tangent
//!              ╲                        ╲
//!               contact normal n         ●→ struck ball takes v·n
//! ```
//!
//! When the two exit speeds add up to more than the two entry speeds (any
//! angled hit), both exit velocities shrink by the same factor. Then both are
//! scaled by the restitution factor, the same one the rails use, so the
//! summed speed of the pair never rises.

use glam::Vec2;

use crate::core::ball::Ball;

/// A detected overlap between two balls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector pointing from the second ball toward the first.
    pub normal: Vec2,
    /// Center distance at detection time.
    pub distance: f32,
}

/// Returns a contact when the centers are within two radii.
pub fn detect(a: &Ball, b: &Ball, radius: f32) -> Option<Contact> {
    let delta = a.pos - b.pos;
    let distance = delta.length();
    if distance > 2.0 * radius {
        return None;
    }
    // Coincident centers have no defined normal; pick one.
    let normal = if distance > f32::EPSILON {
        delta / distance
    } else {
        Vec2::X
    };
    Some(Contact { normal, distance })
}

/// Split a velocity into (tangential, normal) parts relative to `normal`.
fn split_along(vel: Vec2, normal: Vec2) -> (Vec2, Vec2) {
    let along = normal * vel.dot(normal);
    (vel - along, along)
}

/// Re-derive headings and speeds after an impact.
///
/// Velocities are only exchanged while the pair is closing along the
/// normal; a touching pair that is already separating keeps its motion.
/// Returns whether an exchange happened.
pub fn resolve_velocities(a: &mut Ball, b: &mut Ball, normal: Vec2, restitution: f32) -> bool {
    let va = a.velocity();
    let vb = b.velocity();
    if (va - vb).dot(normal) >= 0.0 {
        return false;
    }

    let (va_out, vb_out) = match (a.is_moving(), b.is_moving()) {
        (true, false) => {
            let (kept, passed) = split_along(va, normal);
            (kept, passed)
        }
        (false, true) => {
            let (kept, passed) = split_along(vb, normal);
            (passed, kept)
        }
        _ => {
            let exchange = normal * (va - vb).dot(normal);
            (va - exchange, vb + exchange)
        }
    };

    let speed_in = va.length() + vb.length();
    let speed_out = va_out.length() + vb_out.length();
    let cap = if speed_out > speed_in { speed_in / speed_out } else { 1.0 };

    a.set_velocity(va_out * cap * restitution);
    b.set_velocity(vb_out * cap * restitution);
    true
}

/// Push both balls apart along the normal by half the penetration each,
/// plus `epsilon`, so the pair is no longer touching next frame.
pub fn separate(a: &mut Ball, b: &mut Ball, contact: &Contact, radius: f32, epsilon: f32) {
    let overlap = 2.0 * radius - contact.distance + epsilon;
    let push = contact.normal * (0.5 * overlap);
    a.pos += push;
    b.pos -= push;
}

/// Full per-pair treatment: detect, respond, separate.
/// Returns the contact if the balls were touching.
pub fn collide(
    a: &mut Ball,
    b: &mut Ball,
    radius: f32,
    restitution: f32,
    epsilon: f32,
) -> Option<Contact> {
    let contact = detect(a, b, radius)?;
    resolve_velocities(a, b, contact.normal, restitution);
    separate(a, b, &contact, radius, epsilon);
    Some(contact)
}
