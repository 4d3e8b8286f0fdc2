pub mod core;
pub mod sampler;
pub mod predicate;
pub mod ledger;
pub mod driver;
pub mod rng;
pub mod registry;
pub mod queue;
pub mod spawn;
pub mod plugin;

#[cfg(test)]
mod testing;

pub use plugin::{DecorationPlugin, DecorationSettings, GenerateDecorations};
