// src/decor/predicate.rs
//! Accept/reject a single attempt slot.
//!
//! Gates run cheapest first and stop at the first failure:
//! frequency draw, foundation row, airspace, spacing to earlier placements.
//! The frequency draw is taken for every slot, so the random stream advances
//! once per attempt no matter how the geometry turns out.

use bevy::prelude::*;

use super::core::{DecorationDef, RandomSource};
use super::ledger::PlacementLedger;
use crate::tilemap::{TileGrid, TileMaterial};

/// Inward slack on one end of a column range. Foundation applies it to the low end,
/// airspace to the high end; keep them that way.
pub const EDGE_SLACK: f32 = 0.125;

/// Which gate turned a slot down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rejection {
    Frequency,
    Foundation,
    Airspace,
    Spacing,
}

/// Run every gate in order. `Ok(())` means the slot may be used.
pub fn evaluate(
    def: &DecorationDef,
    ledger: &PlacementLedger,
    pos: Vec2,
    grid: &dyn TileGrid,
    rng: &mut dyn RandomSource,
) -> Result<(), Rejection> {
    let rules = &def.rules;

    if rng.uniform01() > rules.frequency {
        return Err(Rejection::Frequency);
    }
    if !has_foundation(grid, pos, rules.foundation_radius, def.material) {
        return Err(Rejection::Foundation);
    }
    if !has_airspace(grid, pos, rules.foundation_radius, rules.height) {
        return Err(Rejection::Airspace);
    }
    if !has_neighbour_space(ledger, pos, rules.neighbour_radius) {
        return Err(Rejection::Spacing);
    }
    Ok(())
}

#[inline]
pub fn can_place(
    def: &DecorationDef,
    ledger: &PlacementLedger,
    pos: Vec2,
    grid: &dyn TileGrid,
    rng: &mut dyn RandomSource,
) -> bool {
    evaluate(def, ledger, pos, grid, rng).is_ok()
}

/// Every column under `[x - radius, x + radius]` on row `y - 1` is `material`.
pub fn has_foundation(grid: &dyn TileGrid, pos: Vec2, radius: f32, material: TileMaterial) -> bool {
    let first = (pos.x - radius - EDGE_SLACK).floor() as i32;
    let last = (pos.x + radius).floor() as i32;
    let below = pos.y - 1.0;

    (first..=last).all(|f| grid.matches_material(Vec2::new(f as f32, below), material))
}

/// Every cell over the footprint, from row `floor(y)` to `floor(y + height)`, is free.
pub fn has_airspace(grid: &dyn TileGrid, pos: Vec2, radius: f32, height: f32) -> bool {
    let first = (pos.x - radius).floor() as i32;
    let last = (pos.x + radius - EDGE_SLACK).floor() as i32;
    let bottom = pos.y.floor() as i32;
    let top = (pos.y + height).floor() as i32;

    (first..=last).all(|f| {
        (bottom..=top).all(|a| grid.is_empty_or_destructible(Vec2::new(f as f32, a as f32)))
    })
}

/// No earlier placement sits closer than one diameter.
#[inline]
pub fn has_neighbour_space(ledger: &PlacementLedger, pos: Vec2, radius: f32) -> bool {
    ledger.closer_than(pos, radius * 2.0).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decor::core::Direction;
    use crate::decor::testing::{grass_def, map, ScriptedRandom};

    fn shelf() -> crate::tilemap::TileIndexMap {
        // y=2 ....
        // y=1 ....
        // y=0 gggg
        map(&["....", "....", "gggg"])
    }

    #[test]
    fn frequency_gate_draws_first_and_uses_strict_bound() {
        let grid = shelf();
        let mut def = grass_def("tuft", Direction::Other);
        def.rules.frequency = 0.5;
        let ledger = PlacementLedger::new();

        // Underground slot: geometry would fail, but the draw still happens first.
        let mut rng = ScriptedRandom::constant(0.9);
        assert_eq!(evaluate(&def, &ledger, Vec2::new(1.0, 0.0), &grid, &mut rng), Err(Rejection::Frequency));
        assert_eq!(rng.uniform_calls, 1);

        let mut rng = ScriptedRandom::constant(0.1);
        assert_eq!(evaluate(&def, &ledger, Vec2::new(1.0, 0.0), &grid, &mut rng), Err(Rejection::Foundation));
        assert_eq!(rng.uniform_calls, 1);
    }

    #[test]
    fn draw_equal_to_frequency_passes_the_gate() {
        let grid = map(&["...", "...", "ggg"]);
        let mut def = grass_def("tuft", Direction::Other);
        def.rules.frequency = 0.5;
        let mut rng = ScriptedRandom::constant(0.5);
        assert_eq!(evaluate(&def, &PlacementLedger::new(), Vec2::new(1.5, 1.0), &grid, &mut rng), Ok(()));

        let mut rng = ScriptedRandom::constant(0.500_001);
        assert_eq!(
            evaluate(&def, &PlacementLedger::new(), Vec2::new(1.5, 1.0), &grid, &mut rng),
            Err(Rejection::Frequency)
        );
    }

    #[test]
    fn foundation_lower_bound_reaches_one_column_further_left() {
        let grid = map(&[".g.", "..."]); // grass only at (1, 1)
        // radius 0 at x=2.0: columns floor(1.875)=1 ..= floor(2.0)=2
        assert!(!has_foundation(&grid, Vec2::new(2.0, 2.0), 0.0, TileMaterial::Grass));
        // at x=1.5: columns 1 ..= 1
        assert!(has_foundation(&grid, Vec2::new(1.5, 2.0), 0.0, TileMaterial::Grass));
        // at x=1.0: columns 0 ..= 1, column 0 is air
        assert!(!has_foundation(&grid, Vec2::new(1.0, 2.0), 0.0, TileMaterial::Grass));
    }

    #[test]
    fn foundation_requires_the_exact_material() {
        let grid = map(&["...", "gdg"]);
        assert!(has_foundation(&grid, Vec2::new(0.5, 1.0), 0.25, TileMaterial::Grass));
        assert!(!has_foundation(&grid, Vec2::new(1.5, 1.0), 0.25, TileMaterial::Grass));
        assert!(has_foundation(&grid, Vec2::new(1.5, 1.0), 0.25, TileMaterial::Dirt));
    }

    #[test]
    fn foundation_off_the_map_never_holds() {
        let grid = shelf();
        // Row -1 does not exist.
        assert!(!has_foundation(&grid, Vec2::new(1.5, 0.0), 0.0, TileMaterial::Grass));
        // Left edge: lower slack pulls in column -1.
        assert!(!has_foundation(&grid, Vec2::new(0.0, 1.0), 0.0, TileMaterial::Grass));
    }

    #[test]
    fn airspace_upper_bound_stops_short_of_the_next_column() {
        let grid = map(&["..s", "...", "ggg"]); // stone at (2, 2)
        // radius 0.5 at x=1.5: columns floor(1.0)=1 ..= floor(1.875)=1, rows 1..=2
        assert!(has_airspace(&grid, Vec2::new(1.5, 1.0), 0.5, 1.0));
        // at x=1.75: columns 1 ..= floor(2.125)=2, hits the stone
        assert!(!has_airspace(&grid, Vec2::new(1.75, 1.0), 0.5, 1.0));
    }

    #[test]
    fn airspace_rows_include_the_top_cell() {
        let grid = map(&["s..", "...", "...", "ggg"]); // stone at (0, 3)
        assert!(has_airspace(&grid, Vec2::new(0.25, 1.0), 0.25, 1.5));
        assert!(!has_airspace(&grid, Vec2::new(0.25, 1.0), 0.25, 2.0));
    }

    #[test]
    fn airspace_lets_destructible_tiles_through_but_not_the_map_edge() {
        let grid = map(&["l..", "...", "ggg"]);
        assert!(has_airspace(&grid, Vec2::new(0.25, 1.0), 0.25, 1.0));
        assert!(!has_airspace(&grid, Vec2::new(0.25, 1.0), 0.25, 2.0));
    }

    #[test]
    fn zero_radius_on_a_cell_edge_checks_no_air_columns() {
        let grid = map(&["sss", "sss"]);
        // columns floor(1.0)=1 ..= floor(0.875)=0: empty range
        assert!(has_airspace(&grid, Vec2::new(1.0, 0.0), 0.0, 5.0));
        assert!(!has_airspace(&grid, Vec2::new(1.25, 0.0), 0.0, 0.0));
    }

    #[test]
    fn spacing_is_a_full_diameter() {
        let mut ledger = PlacementLedger::new();
        ledger.record(Vec2::new(1.0, 1.0));
        assert!(!has_neighbour_space(&ledger, Vec2::new(2.0, 1.0), 0.6));
        assert!(has_neighbour_space(&ledger, Vec2::new(2.0, 1.0), 0.5));
        assert!(has_neighbour_space(&ledger, Vec2::new(1.0, 1.0), 0.0));
        assert!(has_neighbour_space(&PlacementLedger::new(), Vec2::ZERO, 100.0));
    }

    #[test]
    fn gates_report_in_order() {
        let grid = shelf();
        let mut def = grass_def("bush", Direction::Other);
        def.rules.foundation_radius = 0.5;
        def.rules.height = 1.0;
        def.rules.neighbour_radius = 0.6;
        let mut rng = ScriptedRandom::constant(0.0);

        let mut ledger = PlacementLedger::new();
        assert_eq!(evaluate(&def, &ledger, Vec2::new(1.0, 1.0), &grid, &mut rng), Ok(()));
        ledger.record(Vec2::new(1.0, 1.0));
        assert_eq!(evaluate(&def, &ledger, Vec2::new(2.0, 1.0), &grid, &mut rng), Err(Rejection::Spacing));
        assert_eq!(evaluate(&def, &ledger, Vec2::new(2.0, 2.0), &grid, &mut rng), Err(Rejection::Foundation));

        def.rules.height = 2.0; // rows 1..=3, row 3 is off the map
        assert_eq!(evaluate(&def, &ledger, Vec2::new(3.0, 1.0), &grid, &mut rng), Err(Rejection::Airspace));
    }
}
