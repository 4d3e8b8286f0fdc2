// src/decor/testing.rs
//! Fixtures shared by the decor unit tests.

use bevy::prelude::*;

use super::core::{DecorationDef, Direction, PlacementRules, RandomSource, VariantRef};
use crate::tilemap::{Tile, TileIndexMap, TileMaterial};

/// Replays a fixed list of draws; the last value repeats once the list runs out.
pub struct ScriptedRandom {
    draws: Vec<f32>,
    next: usize,
    pub uniform_calls: usize,
    pub index_calls: usize,
}

impl ScriptedRandom {
    pub fn new(draws: Vec<f32>) -> Self {
        assert!(!draws.is_empty(), "scripted random needs at least one draw");
        Self { draws, next: 0, uniform_calls: 0, index_calls: 0 }
    }

    pub fn constant(v: f32) -> Self { Self::new(vec![v]) }
}

impl RandomSource for ScriptedRandom {
    fn uniform01(&mut self) -> f32 {
        self.uniform_calls += 1;
        let v = self.draws[self.next.min(self.draws.len() - 1)];
        self.next += 1;
        v
    }

    /// Cycles through indices so variant choice is predictable.
    fn uniform_index(&mut self, n: usize) -> usize {
        let i = self.index_calls % n;
        self.index_calls += 1;
        i
    }
}

/// `.` empty, `l` destructible leaves, `g` grass, `d` dirt, `s` stone.
pub fn legend(c: char) -> Option<Tile> {
    match c {
        '.' => Some(Tile::Empty),
        'l' => Some(Tile::destructible(TileMaterial::Wood)),
        'g' => Some(Tile::solid(TileMaterial::Grass)),
        'd' => Some(Tile::solid(TileMaterial::Dirt)),
        's' => Some(Tile::solid(TileMaterial::Stone)),
        _ => None,
    }
}

/// Rows top first, cell (0,0) at world origin.
pub fn map(rows: &[&str]) -> TileIndexMap {
    TileIndexMap::from_ascii(rows, Vec2::ZERO, legend).expect("fixture map")
}

pub fn quad(r: f32) -> VariantRef {
    VariantRef::Quad { color: (r, 1.0, 0.0), size: (1.0, 1.0) }
}

pub fn grass_def(name: &str, direction: Direction) -> DecorationDef {
    DecorationDef {
        name: name.to_string(),
        material: TileMaterial::Grass,
        variants: vec![quad(0.0)],
        rules: PlacementRules { direction, ..Default::default() },
    }
}
