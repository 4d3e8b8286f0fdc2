//! Rule-driven decoration placement for 2D tile maps.
//!
//! [`decor::driver::generate_decorations`] walks every cell of a [`tilemap::TileGrid`]
//! for each catalog entry and emits placements that pass the frequency,
//! foundation, airspace and spacing gates. [`decor::DecorationPlugin`] hosts it in Bevy.

pub mod decor;
pub mod tilemap;
