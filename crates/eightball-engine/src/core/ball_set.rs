use crate::core::ball::{Ball, BallCategory};

/// The balls currently on the table, in a stable order.
/// Designed for a single rack (sixteen balls), so lookups are linear scans.
pub struct BallSet {
    balls: Vec<Ball>,
}

impl BallSet {
    pub fn new() -> Self {
        Self {
            balls: Vec::with_capacity(16),
        }
    }

    /// Build a set from an initial layout, keeping its order.
    pub fn from_rack(rack: impl IntoIterator<Item = Ball>) -> Self {
        let mut set = Self::new();
        for ball in rack {
            set.insert(ball);
        }
        set
    }

    /// Add a ball at the end of the set.
    /// A ball whose category is already present replaces the old one in place.
    pub fn insert(&mut self, ball: Ball) {
        match self.balls.iter_mut().find(|b| b.category() == ball.category()) {
            Some(existing) => *existing = ball,
            None => self.balls.push(ball),
        }
    }

    /// Put the cue ball back on the table at the front of the set.
    pub fn restore_cue(&mut self, cue: Ball) {
        self.remove(BallCategory::Cue);
        self.balls.insert(0, cue);
    }

    /// Remove a ball by category, preserving the order of the rest.
    pub fn remove(&mut self, category: BallCategory) -> Option<Ball> {
        let idx = self.balls.iter().position(|b| b.category() == category)?;
        Some(self.balls.remove(idx))
    }

    pub fn get(&self, category: BallCategory) -> Option<&Ball> {
        self.balls.iter().find(|b| b.category() == category)
    }

    pub fn get_mut(&mut self, category: BallCategory) -> Option<&mut Ball> {
        self.balls.iter_mut().find(|b| b.category() == category)
    }

    pub fn cue(&self) -> Option<&Ball> {
        self.get(BallCategory::Cue)
    }

    pub fn cue_mut(&mut self) -> Option<&mut Ball> {
        self.get_mut(BallCategory::Cue)
    }

    pub fn contains(&self, category: BallCategory) -> bool {
        self.get(category).is_some()
    }

    /// Mutable access to two distinct balls by index, `i < j`.
    pub fn pair_mut(&mut self, i: usize, j: usize) -> (&mut Ball, &mut Ball) {
        debug_assert!(i < j, "pair_mut expects i < j");
        let (head, tail) = self.balls.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Ball> {
        self.balls.iter_mut()
    }

    /// Categories on the table, in set order.
    pub fn categories(&self) -> Vec<BallCategory> {
        self.balls.iter().map(|b| b.category()).collect()
    }

    /// True when every ball has a speed of exactly zero.
    pub fn all_at_rest(&self) -> bool {
        self.balls.iter().all(|b| b.speed == 0.0)
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }
}

impl Default for BallSet {
    fn default() -> Self {
        Self::new()
    }
}
