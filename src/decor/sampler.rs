// src/decor/sampler.rs
//! Per-cell attempt slots: how many, and where.

use bevy::prelude::*;

use super::core::Direction;

/// Attempt slots per cell along x and y.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttemptCounts {
    pub x: u32,
    pub y: u32,
}

/// Floor/ceiling decorations get 4 slots across the cell, wall ones 4 slots up it,
/// free-standing ones a single slot.
pub const fn attempt_counts(direction: Direction) -> AttemptCounts {
    match direction {
        Direction::Top | Direction::Bottom => AttemptCounts { x: 4, y: 1 },
        Direction::Side => AttemptCounts { x: 1, y: 4 },
        Direction::Other => AttemptCounts { x: 1, y: 1 },
    }
}

/// Map-space position of slot `(i, j)` inside cell `(x, y)`.
#[inline]
pub fn slot_position(cell: UVec2, slot: UVec2, counts: AttemptCounts) -> Vec2 {
    Vec2::new(
        cell.x as f32 + slot.x as f32 / counts.x as f32,
        cell.y as f32 + slot.y as f32 / counts.y as f32,
    )
}

/// All slot positions of one cell, in evaluation order (i outer, j inner).
pub fn cell_slots(cell: UVec2, counts: AttemptCounts) -> impl Iterator<Item = Vec2> {
    (0..counts.x).flat_map(move |i| {
        (0..counts.y).map(move |j| slot_position(cell, UVec2::new(i, j), counts))
    })
}
