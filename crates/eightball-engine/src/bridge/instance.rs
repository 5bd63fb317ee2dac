use bytemuck::{Pod, Zeroable};

use crate::api::types::BallView;

/// Per-ball data written to the shared buffer for the host renderer.
/// Must match the host protocol: 4 floats = 16 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BallInstance {
    /// X position in table space.
    pub x: f32,
    /// Y position in table space.
    pub y: f32,
    /// Heading in radians.
    pub heading: f32,
    /// Printed ball number: cue 0, solids 1..7, eight 8, stripes 9..15.
    pub category: f32,
}

impl BallInstance {
    pub const FLOATS: usize = 4;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

impl From<BallView> for BallInstance {
    fn from(view: BallView) -> Self {
        Self {
            x: view.position.x,
            y: view.position.y,
            heading: view.heading,
            category: view.category.number() as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ball::BallCategory;
    use glam::Vec2;

    #[test]
    fn instance_size_matches_stride() {
        assert_eq!(std::mem::size_of::<BallInstance>(), BallInstance::STRIDE_BYTES);
    }

    #[test]
    fn stripes_carry_their_printed_number() {
        let instance = BallInstance::from(BallView {
            category: BallCategory::Striped(7),
            position: Vec2::new(10.0, 20.0),
            heading: 0.5,
        });
        assert_eq!(instance.category, 15.0);
        assert_eq!((instance.x, instance.y, instance.heading), (10.0, 20.0, 0.5));
    }
}
