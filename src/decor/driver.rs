// src/decor/driver.rs
//! One full decoration pass over a tile grid.

use bevy::prelude::*;

use super::core::{DecorationDef, DecorationSource, PlacementEvent, RandomSource, SceneInstantiator};
use super::ledger::PlacementLedger;
use super::predicate::{evaluate, Rejection};
use super::sampler::{attempt_counts, cell_slots};
use crate::tilemap::TileGrid;

/// Outcome counters for one definition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DefinitionReport {
    pub name: String,
    pub attempts: u32,
    pub accepted: u32,
    pub rejected_frequency: u32,
    pub rejected_foundation: u32,
    pub rejected_airspace: u32,
    pub rejected_spacing: u32,
    /// Set when the definition had no variants and was not processed.
    pub skipped: bool,
}

impl DefinitionReport {
    fn reject(&mut self, why: Rejection) {
        match why {
            Rejection::Frequency => self.rejected_frequency += 1,
            Rejection::Foundation => self.rejected_foundation += 1,
            Rejection::Airspace => self.rejected_airspace += 1,
            Rejection::Spacing => self.rejected_spacing += 1,
        }
    }
}

/// Per-definition reports, in catalog order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub definitions: Vec<DefinitionReport>,
}

impl GenerationReport {
    pub fn total_accepted(&self) -> u32 {
        self.definitions.iter().map(|d| d.accepted).sum()
    }

    pub fn total_attempts(&self) -> u32 {
        self.definitions.iter().map(|d| d.attempts).sum()
    }
}

/// Place every definition of `catalog` onto `grid`, in catalog order.
/// Accepted placements go to `sink`; the random stream is shared across definitions.
pub fn generate_decorations(
    grid: &dyn TileGrid,
    catalog: &dyn DecorationSource,
    rng: &mut dyn RandomSource,
    sink: &mut dyn SceneInstantiator,
) -> GenerationReport {
    let definitions = catalog.definitions();
    let mut report = GenerationReport { definitions: Vec::with_capacity(definitions.len()) };

    for (index, def) in definitions.iter().enumerate() {
        let def_report = generate_definition(grid, index, def, rng, sink);
        info!(
            "decor: '{}' placed {} of {} attempts (freq {} / foundation {} / air {} / spacing {} rejected)",
            def.name,
            def_report.accepted,
            def_report.attempts,
            def_report.rejected_frequency,
            def_report.rejected_foundation,
            def_report.rejected_airspace,
            def_report.rejected_spacing,
        );
        report.definitions.push(def_report);
    }

    report
}

/// Single forward pass for one definition with its own fresh ledger.
/// Order is x, then y, then slot i, then slot j; the ledger makes the result order-sensitive.
pub fn generate_definition(
    grid: &dyn TileGrid,
    index: usize,
    def: &DecorationDef,
    rng: &mut dyn RandomSource,
    sink: &mut dyn SceneInstantiator,
) -> DefinitionReport {
    let mut report = DefinitionReport { name: def.name.clone(), ..Default::default() };

    if def.variants.is_empty() {
        warn!("decor: '{}' has no variants; skipping", def.name);
        report.skipped = true;
        return report;
    }

    let counts = attempt_counts(def.rules.direction);
    let origin = grid.origin();
    let mut ledger = PlacementLedger::new();

    for x in 0..grid.width() {
        for y in 0..grid.height() {
            for pos in cell_slots(UVec2::new(x, y), counts) {
                report.attempts += 1;

                if let Err(why) = evaluate(def, &ledger, pos, grid, rng) {
                    report.reject(why);
                    continue;
                }

                let variant = &def.variants[rng.uniform_index(def.variants.len())];
                let world_position = origin + pos;
                debug!("decor: '{}' at map {:?} / world {:?}", def.name, pos, world_position);

                sink.instantiate(PlacementEvent {
                    definition: index,
                    variant: variant.clone(),
                    world_position,
                    rotation: 0.0,
                });
                ledger.record(pos);
                report.accepted += 1;
            }
        }
    }

    report
}
