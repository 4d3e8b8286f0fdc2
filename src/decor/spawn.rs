// src/decor/spawn.rs
//! Turn queued placements into sprite entities under the decoration root.
//! Bundle-free: we add components explicitly (Transform, Visibility, Sprite, ...).

use bevy::prelude::*;
use bevy::sprite::Anchor;

use super::core::{PlacementEvent, VariantRef};
use super::plugin::DecorationSettings;
use super::queue::{PlacementQueue, PlacementQueueConfig};

/// Parent of every spawned decoration.
#[derive(Component)]
pub struct DecorationRoot;

/// Tag on each spawned decoration.
#[derive(Component, Debug, Clone, Copy)]
pub struct DecorationInstance {
    /// Index of the definition in the catalog.
    pub definition: usize,
}

/// Startup: the single root all decorations hang under.
pub fn spawn_decoration_root(mut commands: Commands) {
    commands.spawn((
        DecorationRoot,
        Name::new("Decorations"),
        Transform::default(),
        Visibility::default(),
    ));
}

/// Sprite for a variant, standing on its anchor point.
pub fn variant_sprite(variant: &VariantRef, assets: &AssetServer) -> Sprite {
    match variant {
        VariantRef::Sprite { path, size } => Sprite {
            image: assets.load(path.as_str()),
            custom_size: Some(Vec2::new(size.0, size.1)),
            anchor: Anchor::BottomCenter,
            ..default()
        },
        VariantRef::Quad { color, size } => Sprite {
            color: Color::srgb(color.0, color.1, color.2),
            custom_size: Some(Vec2::new(size.0, size.1)),
            anchor: Anchor::BottomCenter,
            ..default()
        },
    }
}

/// Spawn one accepted placement at its world position.
pub fn spawn_placement(
    commands: &mut Commands,
    assets: &AssetServer,
    parent: Option<Entity>,
    event: &PlacementEvent,
    z: f32,
) -> Entity {
    let transform = Transform::from_translation(event.world_position.extend(z))
        .with_rotation(Quat::from_rotation_z(event.rotation));

    let mut e = commands.spawn((
        transform,
        Visibility::default(),
        variant_sprite(&event.variant, assets),
        DecorationInstance { definition: event.definition },
    ));
    if let Some(p) = parent { e.insert(ChildOf(p)); }
    e.id()
}

/// Update: spawn up to `max_per_frame` queued placements, oldest first.
pub fn drain_placement_queue(
    mut commands: Commands,
    assets: Res<AssetServer>,
    mut queue: ResMut<PlacementQueue>,
    cfg: Res<PlacementQueueConfig>,
    settings: Res<DecorationSettings>,
    root: Query<Entity, With<DecorationRoot>>,
) {
    let take = cfg.max_per_frame.min(queue.items.len());
    if take == 0 { return; }

    let parent = root.single().ok();
    for event in queue.items.drain(..take) {
        spawn_placement(&mut commands, &assets, parent, &event, settings.z_layer);
    }

    if queue.items.is_empty() {
        debug!("decor: placement queue drained");
    }
}
