//! Cumulative-weight roulette selection

use rand::Rng;

/// A fixed table of items with relative weights
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    entries: Vec<(T, f32)>,
    total: f32,
}

impl<T: Copy> WeightedTable<T> {
    /// Build a table; non-positive or non-finite weights are dropped.
    ///
    /// Returns `None` if nothing with a usable weight remains.
    pub fn new(entries: impl IntoIterator<Item = (T, f32)>) -> Option<Self> {
        let entries: Vec<(T, f32)> = entries
            .into_iter()
            .filter(|(_, w)| w.is_finite() && *w > 0.0)
            .collect();
        if entries.is_empty() {
            return None;
        }
        let total = entries.iter().map(|(_, w)| w).sum();
        Some(Self { entries, total })
    }

    /// Sum of all weights
    pub fn total_weight(&self) -> f32 {
        self.total
    }

    /// Select the entry a roll in `[0, total)` lands on.
    ///
    /// Weights are subtracted in order until the remainder is non-positive.
    pub fn pick(&self, roll: f32) -> T {
        let mut remainder = roll;
        for &(item, weight) in &self.entries {
            remainder -= weight;
            if remainder <= 0.0 {
                return item;
            }
        }
        // Float rounding at the very top of the range
        self.entries[self.entries.len() - 1].0
    }

    /// Draw one item
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        let roll = rng.random::<f32>() * self.total;
        self.pick(roll)
    }
}
