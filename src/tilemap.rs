// src/tilemap.rs
//! In-memory tile grid the decoration pass reads from.
//! Rows grow upwards: row `y - 1` is the ground under row `y`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Material a solid tile is made of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileMaterial {
    Dirt,
    Grass,
    Stone,
    Sand,
    Snow,
    Mud,
    Wood,
    Ice,
}

/// One grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Block {
        material: TileMaterial,
        /// Destructible blocks (leaves, cobweb, ...) don't obstruct airspace.
        destructible: bool,
    },
}

impl Tile {
    pub const fn solid(material: TileMaterial) -> Self {
        Self::Block { material, destructible: false }
    }

    pub const fn destructible(material: TileMaterial) -> Self {
        Self::Block { material, destructible: true }
    }

    #[inline]
    pub fn material(&self) -> Option<TileMaterial> {
        match self {
            Tile::Empty => None,
            Tile::Block { material, .. } => Some(*material),
        }
    }

    #[inline]
    pub fn is_empty_or_destructible(&self) -> bool {
        match self {
            Tile::Empty => true,
            Tile::Block { destructible, .. } => *destructible,
        }
    }
}

/// Read-only queries the placement core needs from a tile grid.
///
/// Implementations must be total: coordinates outside `[0,width) x [0,height)`
/// answer "no material" and "not empty", so the map edge behaves like solid
/// rock that nothing can root on.
pub trait TileGrid {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// World-space position of cell (0, 0).
    fn origin(&self) -> Vec2;

    /// Material of the tile containing `pos` (floor-rounded).
    fn material_at(&self, pos: Vec2) -> Option<TileMaterial>;

    /// Whether the tile containing `pos` is free or can be broken through.
    fn is_empty_or_destructible(&self, pos: Vec2) -> bool;

    #[inline]
    fn matches_material(&self, pos: Vec2, material: TileMaterial) -> bool {
        self.material_at(pos) == Some(material)
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TileMapError {
    #[error("Tile map must be at least 1x1")]
    Empty,
    #[error("Expected {expected} tiles for a {width}x{height} map, got {actual}")]
    SizeMismatch { width: u32, height: u32, expected: usize, actual: usize },
    #[error("Row {row} has {len} columns, expected {expected}")]
    RaggedRows { row: usize, len: usize, expected: usize },
    #[error("Unknown tile glyph '{glyph}' at column {column}, row {row}")]
    UnknownGlyph { glyph: char, column: usize, row: usize },
}

/// Tile grid placed in the world at `position`.
#[derive(Resource, Clone, Debug)]
pub struct TileIndexMap {
    width: u32,
    height: u32,
    /// World-space position of cell (0, 0).
    pub position: Vec2,
    /// Row-major, row 0 at the bottom.
    tiles: Vec<Tile>,
}

impl TileIndexMap {
    pub fn new_empty(width: u32, height: u32, position: Vec2) -> Result<Self, TileMapError> {
        let len = (width as usize) * (height as usize);
        Self::from_tiles(width, height, position, vec![Tile::Empty; len])
    }

    pub fn from_tiles(
        width: u32,
        height: u32,
        position: Vec2,
        tiles: Vec<Tile>,
    ) -> Result<Self, TileMapError> {
        if width == 0 || height == 0 {
            return Err(TileMapError::Empty);
        }
        let expected = (width as usize) * (height as usize);
        if tiles.len() != expected {
            return Err(TileMapError::SizeMismatch { width, height, expected, actual: tiles.len() });
        }
        Ok(Self { width, height, position, tiles })
    }

    /// Build from text rows written top row first, the way the map reads on screen.
    /// `legend` maps each glyph to a tile; unknown glyphs are an error.
    pub fn from_ascii(
        rows: &[&str],
        position: Vec2,
        legend: impl Fn(char) -> Option<Tile>,
    ) -> Result<Self, TileMapError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(TileMapError::Empty);
        }

        let mut tiles = vec![Tile::Empty; width * height];
        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != width {
                return Err(TileMapError::RaggedRows { row, len, expected: width });
            }
            // Text is top-down, storage is bottom-up.
            let y = height - 1 - row;
            for (column, glyph) in line.chars().enumerate() {
                let tile = legend(glyph).ok_or(TileMapError::UnknownGlyph { glyph, column, row })?;
                tiles[y * width + column] = tile;
            }
        }

        Self::from_tiles(width as u32, height as u32, position, tiles)
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Tile at integer cell coordinates; `None` outside the map.
    pub fn get(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index(x, y).map(|i| &self.tiles[i])
    }

    pub fn set(&mut self, x: i32, y: i32, tile: Tile) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.tiles[i] = tile;
                true
            }
            None => false,
        }
    }

    /// Tile containing a fractional map-space coordinate.
    #[inline]
    pub fn tile_at(&self, pos: Vec2) -> Option<&Tile> {
        self.get(pos.x.floor() as i32, pos.y.floor() as i32)
    }

    /// Iterate `(cell, tile)` over the whole map, row 0 first.
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, &Tile)> + '_ {
        let w = self.width as usize;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, t)| (IVec2::new((i % w) as i32, (i / w) as i32), t))
    }
}

impl TileGrid for TileIndexMap {
    fn width(&self) -> u32 { self.width }
    fn height(&self) -> u32 { self.height }
    fn origin(&self) -> Vec2 { self.position }

    fn material_at(&self, pos: Vec2) -> Option<TileMaterial> {
        self.tile_at(pos).and_then(Tile::material)
    }

    fn is_empty_or_destructible(&self, pos: Vec2) -> bool {
        self.tile_at(pos).is_some_and(Tile::is_empty_or_destructible)
    }
}
