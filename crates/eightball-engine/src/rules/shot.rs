use crate::core::ball::BallCategory;

/// Facts gathered while one shot plays out. Cleared after every evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShotRecord {
    first_object_hit: Option<BallCategory>,
    pocketed: Vec<BallCategory>,
}

impl ShotRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note a contact between two balls. Only the first contact involving the
    /// cue ball is kept; returns the latched ball when this call set it.
    pub fn record_contact(&mut self, a: BallCategory, b: BallCategory) -> Option<BallCategory> {
        if self.first_object_hit.is_some() {
            return None;
        }
        let other = match (a.is_cue(), b.is_cue()) {
            (true, false) => b,
            (false, true) => a,
            _ => return None,
        };
        self.first_object_hit = Some(other);
        Some(other)
    }

    pub fn record_pocketed(&mut self, category: BallCategory) {
        self.pocketed.push(category);
    }

    pub fn first_object_hit(&self) -> Option<BallCategory> {
        self.first_object_hit
    }

    /// Balls captured this shot, in capture order.
    pub fn pocketed(&self) -> &[BallCategory] {
        &self.pocketed
    }

    pub fn was_pocketed(&self, category: BallCategory) -> bool {
        self.pocketed.contains(&category)
    }

    pub fn clear(&mut self) {
        self.first_object_hit = None;
        self.pocketed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_contact_latches_once() {
        let mut shot = ShotRecord::new();
        assert_eq!(
            shot.record_contact(BallCategory::Cue, BallCategory::Solid(4)),
            Some(BallCategory::Solid(4))
        );
        assert_eq!(shot.record_contact(BallCategory::Striped(2), BallCategory::Cue), None);
        assert_eq!(shot.first_object_hit(), Some(BallCategory::Solid(4)));
    }

    #[test]
    fn object_ball_contacts_are_ignored() {
        let mut shot = ShotRecord::new();
        shot.record_contact(BallCategory::Solid(1), BallCategory::Eight);
        assert_eq!(shot.first_object_hit(), None);
        shot.record_contact(BallCategory::Eight, BallCategory::Cue);
        assert_eq!(shot.first_object_hit(), Some(BallCategory::Eight));
    }

    #[test]
    fn clear_resets_everything() {
        let mut shot = ShotRecord::new();
        shot.record_contact(BallCategory::Cue, BallCategory::Solid(1));
        shot.record_pocketed(BallCategory::Solid(1));
        assert!(shot.was_pocketed(BallCategory::Solid(1)));
        shot.clear();
        assert_eq!(shot, ShotRecord::default());
    }
}
