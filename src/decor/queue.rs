// src/decor/queue.rs
use bevy::prelude::*;

use super::core::{PlacementEvent, SceneInstantiator};

/// Accepted placements waiting to be spawned (filled by the generation system).
#[derive(Resource, Default)]
pub struct PlacementQueue {
    pub items: Vec<PlacementEvent>,
}

impl SceneInstantiator for PlacementQueue {
    fn instantiate(&mut self, event: PlacementEvent) {
        self.items.push(event);
    }
}

/// Throttle for the drain system: placements spawned per frame.
#[derive(Resource)]
pub struct PlacementQueueConfig {
    pub max_per_frame: usize,
}
impl Default for PlacementQueueConfig {
    fn default() -> Self { Self { max_per_frame: 500 } }
}
