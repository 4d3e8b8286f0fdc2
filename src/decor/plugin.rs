//! Decoration plugin wiring (glue).
//! - Catalog asset/loader
//! - WorldSeed + settings
//! - Generation requests (latched until the catalog and tile map exist)
//! - Placement queue + drain-to-sprites

use bevy::prelude::*;

use super::driver::{generate_decorations, GenerationReport};
use super::queue::{PlacementQueue, PlacementQueueConfig};
use super::registry::{DecorationCatalog, DecorationCatalogAssetPlugin};
use super::rng::{SeededRandom, WorldSeed};
use super::spawn::{drain_placement_queue, spawn_decoration_root, DecorationInstance};
use crate::tilemap::{TileGrid, TileIndexMap};

/// Configure where the catalog lives, the world seed, and draw depth.
#[derive(Resource, Clone)]
pub struct DecorationSettings {
    pub catalog_path: String,
    pub world_seed: u64,
    /// Sprite z for decorations; tiles are expected below it.
    pub z_layer: f32,
}
impl Default for DecorationSettings {
    fn default() -> Self {
        Self {
            catalog_path: "decorations/catalog.decor.ron".to_string(),
            world_seed: 1337,
            z_layer: 1.0,
        }
    }
}

/// Handle to the loaded DecorationCatalog asset.
#[derive(Resource, Default)]
pub struct DecorationCatalogHandle(pub Handle<DecorationCatalog>);

/// Ask for one decoration pass over the current `TileIndexMap`.
#[derive(Event, Clone, Copy, Debug, Default)]
pub struct GenerateDecorations;

/// Fired after a pass has queued its placements.
#[derive(Event, Clone, Debug)]
pub struct DecorationsGenerated {
    pub pass: u32,
    pub report: GenerationReport,
}

/// Pending request latch + pass counter.
#[derive(Resource, Default)]
pub struct GenerationState {
    pub pending: bool,
    /// Passes completed so far; also salts the random stream of the next one.
    pub passes: u32,
}

pub struct DecorationPlugin;
impl Plugin for DecorationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(DecorationCatalogAssetPlugin)
            .init_resource::<DecorationSettings>()
            .init_resource::<DecorationCatalogHandle>()
            .init_resource::<GenerationState>()
            .init_resource::<PlacementQueue>()
            .init_resource::<PlacementQueueConfig>()
            .add_event::<GenerateDecorations>()
            .add_event::<DecorationsGenerated>()
            .add_systems(
                Startup,
                (init_world_seed_from_settings, load_catalog, spawn_decoration_root),
            )
            .add_systems(Update, (monitor_catalog_ready, latch_generation_requests))
            .add_systems(
                Update,
                run_pending_generation
                    .after(latch_generation_requests)
                    .run_if(catalog_ready),
            )
            .add_systems(Update, drain_placement_queue.after(run_pending_generation));
    }
}

/// Startup: insert WorldSeed based on DecorationSettings.
fn init_world_seed_from_settings(mut commands: Commands, settings: Res<DecorationSettings>) {
    commands.insert_resource(WorldSeed(settings.world_seed));
}

/// Startup: request loading the catalog, store handle.
fn load_catalog(
    mut handle_res: ResMut<DecorationCatalogHandle>,
    settings: Res<DecorationSettings>,
    assets: Res<AssetServer>,
) {
    if handle_res.0.is_strong() { return; }
    handle_res.0 = assets.load(settings.catalog_path.as_str());
    info!(
        "Decor: loading catalog from '{}', world_seed={}",
        settings.catalog_path, settings.world_seed
    );
}

fn catalog_ready(
    handle: Res<DecorationCatalogHandle>,
    catalogs: Res<Assets<DecorationCatalog>>,
) -> bool {
    catalogs.get(&handle.0).is_some()
}

/// Update: log once when the catalog becomes available.
fn monitor_catalog_ready(
    handle: Res<DecorationCatalogHandle>,
    catalogs: Res<Assets<DecorationCatalog>>,
    mut logged: Local<bool>,
) {
    if *logged { return; }
    if let Some(catalog) = catalogs.get(&handle.0) {
        *logged = true;
        info!("Decor: catalog ready ({} definitions)", catalog.definitions.len());
    }
}

/// Events only live two frames; keep the request until it can actually run.
fn latch_generation_requests(
    mut evr: EventReader<GenerateDecorations>,
    mut state: ResMut<GenerationState>,
) {
    if evr.read().count() > 0 {
        state.pending = true;
    }
}

/// A new pass replaces the previous one: its spawned entities and anything
/// still queued from it are dropped before the new placements are queued.
fn run_pending_generation(
    mut commands: Commands,
    mut state: ResMut<GenerationState>,
    handle: Res<DecorationCatalogHandle>,
    catalogs: Res<Assets<DecorationCatalog>>,
    seed: Res<WorldSeed>,
    map: Option<Res<TileIndexMap>>,
    mut queue: ResMut<PlacementQueue>,
    mut evw: EventWriter<DecorationsGenerated>,
    placed: Query<Entity, With<DecorationInstance>>,
) {
    if !state.pending { return; }
    let Some(catalog) = catalogs.get(&handle.0) else { return };
    let Some(map) = map else {
        warn!("Decor: generation requested but no TileIndexMap resource yet");
        return;
    };

    let mut cleared = 0usize;
    for e in &placed {
        commands.entity(e).despawn();
        cleared += 1;
    }
    let stale = queue.items.len();
    queue.items.clear();
    if cleared + stale > 0 {
        debug!("Decor: cleared {} spawned and {} queued decorations from the previous pass", cleared, stale);
    }

    let pass = state.passes;
    let grid: &TileIndexMap = &map;
    let report = run_generation(grid, catalog, *seed, pass, &mut queue);

    info!(
        "Decor: pass {} queued {} decorations from {} attempts on a {}x{} map",
        pass,
        report.total_accepted(),
        report.total_attempts(),
        grid.width(),
        grid.height()
    );

    state.pending = false;
    state.passes += 1;
    evw.write(DecorationsGenerated { pass, report });
}

/// One seeded pass of `catalog` over `grid` into `queue`.
pub fn run_generation(
    grid: &dyn TileGrid,
    catalog: &DecorationCatalog,
    seed: WorldSeed,
    pass: u32,
    queue: &mut PlacementQueue,
) -> GenerationReport {
    let mut rng = SeededRandom::for_pass(seed, pass);
    generate_decorations(grid, catalog, &mut rng, queue)
}
