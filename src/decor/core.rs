// src/decor/core.rs
//! Core types/traits for rule-driven decoration placement on tile maps.
//! Keep this file dependency-light; the driver, predicate and host glue all build on it.

use bevy::prelude::*; // Vec2
use serde::{Deserialize, Serialize};

use crate::tilemap::TileMaterial;

// ---------- Definitions ----------

/// Which surface a decoration hangs off. Drives how densely a cell is sampled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Sits on a floor.
    Top,
    /// Hangs from a ceiling.
    Bottom,
    /// Clings to a wall.
    Side,
    /// Free-standing.
    Other,
}

/// Numeric placement rules for one decoration. Lengths are in grid units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementRules {
    pub direction: Direction,
    /// Chance (0..=1) that a geometrically valid slot is kept.
    #[serde(default = "default_frequency")]
    pub frequency: f32,
    /// Half-width of the support footprint around the slot's x.
    #[serde(default)]
    pub foundation_radius: f32,
    /// Clearance needed above the slot's y.
    #[serde(default)]
    pub height: f32,
    /// Same-definition placements keep at least twice this apart.
    #[serde(default)]
    pub neighbour_radius: f32,
}

fn default_frequency() -> f32 {
    1.0
}

impl Default for PlacementRules {
    fn default() -> Self {
        Self {
            direction: Direction::Other,
            frequency: default_frequency(),
            foundation_radius: 0.0,
            height: 0.0,
            neighbour_radius: 0.0,
        }
    }
}

/// Something the scene can instantiate for an accepted placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum VariantRef {
    /// Image asset drawn at `size` world units.
    Sprite { path: String, size: (f32, f32) },
    /// Flat coloured rectangle (sRGB), no asset needed.
    Quad { color: (f32, f32, f32), size: (f32, f32) },
}

/// A decoration kind: what it looks like, what it must stand on, how it is spaced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecorationDef {
    /// Unique human-readable name (logging, reports, duplicate detection).
    pub name: String,
    /// Tile material the foundation row must consist of.
    pub material: TileMaterial,
    /// One of these is picked uniformly per accepted placement. Must be non-empty.
    pub variants: Vec<VariantRef>,
    pub rules: PlacementRules,
}

/// Ordered source of definitions for one generation pass.
pub trait DecorationSource {
    fn definitions(&self) -> &[DecorationDef];
}

impl DecorationSource for [DecorationDef] {
    fn definitions(&self) -> &[DecorationDef] { self }
}

impl DecorationSource for Vec<DecorationDef> {
    fn definitions(&self) -> &[DecorationDef] { self }
}

// ---------- Randomness ----------

/// Uniform draws consumed by the frequency gate and variant selection.
pub trait RandomSource {
    /// Value in [0, 1).
    fn uniform01(&mut self) -> f32;
    /// Index in [0, n). `n` is never 0.
    fn uniform_index(&mut self, n: usize) -> usize;
}

// ---------- Output ----------

/// One accepted placement, ready to be turned into a scene object.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementEvent {
    /// Index of the definition in the source it came from.
    pub definition: usize,
    pub variant: VariantRef,
    pub world_position: Vec2,
    /// Radians; the generator always emits 0.
    pub rotation: f32,
}

/// Receives accepted placements. Fire-and-forget: nothing flows back into the decision.
pub trait SceneInstantiator {
    fn instantiate(&mut self, event: PlacementEvent);
}

impl SceneInstantiator for Vec<PlacementEvent> {
    fn instantiate(&mut self, event: PlacementEvent) {
        self.push(event);
    }
}
