use bevy::prelude::*;
use decorgen::decor::GenerateDecorations;
use decorgen::tilemap::{Tile, TileIndexMap, TileMaterial};

pub const MAP_WIDTH: u32 = 64;
pub const MAP_HEIGHT: u32 = 32;
/// World units per tile on screen.
pub const PIXELS_PER_TILE: f32 = 20.0;

#[derive(Component)]
pub struct MainCamera;

/// Marker on the tile sprites.
#[derive(Component)]
pub struct TileSprite;

pub fn setup(mut commands: Commands, mut requests: EventWriter<GenerateDecorations>) {
    // Map sits centred on the world origin; 1 world unit == 1 tile.
    let origin = Vec2::new(-(MAP_WIDTH as f32) / 2.0, -(MAP_HEIGHT as f32) / 2.0);
    let map = match build_demo_map(origin) {
        Ok(m) => m,
        Err(e) => {
            error!("Demo map could not be built: {e}");
            return;
        }
    };

    // 1) Camera, zoomed so a tile is PIXELS_PER_TILE pixels wide
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: 1.0 / PIXELS_PER_TILE,
            ..OrthographicProjection::default_2d()
        }),
        MainCamera,
    ));

    // 2) Tiles
    for (cell, tile) in map.iter() {
        let Some(material) = tile.material() else { continue };
        let centre = map.position + cell.as_vec2() + Vec2::splat(0.5);
        let mut color = material_color(material);
        if tile.is_empty_or_destructible() {
            color = color.with_alpha(0.6);
        }
        commands.spawn((
            Sprite {
                color,
                custom_size: Some(Vec2::ONE),
                ..default()
            },
            Transform::from_translation(centre.extend(0.0)),
            TileSprite,
        ));
    }

    // 3) Map resource + one decoration pass once the catalog is in
    commands.insert_resource(map);
    requests.write(GenerateDecorations);
}

/// Rolling grassy hills over dirt and stone, a cave pocket, and a floating wooden ledge.
pub fn build_demo_map(origin: Vec2) -> Result<TileIndexMap, decorgen::tilemap::TileMapError> {
    let mut map = TileIndexMap::new_empty(MAP_WIDTH, MAP_HEIGHT, origin)?;

    for x in 0..MAP_WIDTH as i32 {
        let t = x as f32;
        let surface = (12.0 + 3.0 * (t * 0.21).sin() + 1.5 * (t * 0.57).cos()).round() as i32;
        for y in 0..=surface {
            let tile = if y == surface {
                Tile::solid(TileMaterial::Grass)
            } else if y > surface - 4 {
                Tile::solid(TileMaterial::Dirt)
            } else {
                Tile::solid(TileMaterial::Stone)
            };
            map.set(x, y, tile);
        }
    }

    // Cave: hollow out stone, leaving a ceiling for hanging decorations.
    for x in 20..34 {
        for y in 3..6 {
            map.set(x, y, Tile::Empty);
        }
    }

    // Ledge with a canopy of leaves above one end.
    for x in 44..54 {
        map.set(x, 22, Tile::solid(TileMaterial::Wood));
    }
    for x in 50..56 {
        map.set(x, 25, Tile::destructible(TileMaterial::Wood));
    }

    Ok(map)
}

fn material_color(material: TileMaterial) -> Color {
    match material {
        TileMaterial::Dirt => Color::srgb(0.45, 0.30, 0.18),
        TileMaterial::Grass => Color::srgb(0.25, 0.60, 0.20),
        TileMaterial::Stone => Color::srgb(0.42, 0.42, 0.45),
        TileMaterial::Sand => Color::srgb(0.85, 0.78, 0.50),
        TileMaterial::Snow => Color::srgb(0.92, 0.94, 0.97),
        TileMaterial::Mud => Color::srgb(0.30, 0.22, 0.18),
        TileMaterial::Wood => Color::srgb(0.55, 0.38, 0.20),
        TileMaterial::Ice => Color::srgb(0.65, 0.85, 0.95),
    }
}
