// src/decor/ledger.rs
use bevy::prelude::*;

/// Map-space positions accepted so far for one definition during one pass.
/// The driver makes a fresh one per definition and drops it when that definition is done.
#[derive(Clone, Debug, Default)]
pub struct PlacementLedger {
    positions: Vec<Vec2>,
}

impl PlacementLedger {
    pub fn new() -> Self { Self::default() }

    /// Append an accepted placement. Entries are never removed.
    #[inline]
    pub fn record(&mut self, pos: Vec2) {
        self.positions.push(pos);
    }

    #[inline]
    pub fn positions(&self) -> &[Vec2] { &self.positions }

    #[inline]
    pub fn len(&self) -> usize { self.positions.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.positions.is_empty() }

    /// First recorded position strictly closer than `min_distance` to `pos`.
    pub fn closer_than(&self, pos: Vec2, min_distance: f32) -> Option<Vec2> {
        self.positions.iter().copied().find(|p| p.distance(pos) < min_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut ledger = PlacementLedger::new();
        assert!(ledger.is_empty());
        ledger.record(Vec2::new(1.0, 1.0));
        ledger.record(Vec2::new(3.0, 1.0));
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.positions(), &[Vec2::new(1.0, 1.0), Vec2::new(3.0, 1.0)]);
    }

    #[test]
    fn distance_threshold_is_strict() {
        let mut ledger = PlacementLedger::new();
        ledger.record(Vec2::new(0.0, 0.0));
        assert_eq!(ledger.closer_than(Vec2::new(1.0, 0.0), 1.2), Some(Vec2::ZERO));
        assert_eq!(ledger.closer_than(Vec2::new(1.2, 0.0), 1.2), None);
        assert_eq!(ledger.closer_than(Vec2::new(0.0, 0.0), 0.0), None);
    }
}
