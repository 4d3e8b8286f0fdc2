// src/decor/registry.rs
//! Data-driven decoration catalog + loader.

use bevy::asset::{io::Reader, AssetLoader, LoadContext};
use bevy::prelude::*;
use std::collections::HashMap;

use super::core::{DecorationDef, DecorationSource};

// ---------- Public plugin to register asset+loader ----------

pub struct DecorationCatalogAssetPlugin;

impl Plugin for DecorationCatalogAssetPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<DecorationCatalog>()
            .register_asset_loader(DecorationCatalogLoader);
    }
}

// ---------- Runtime catalog asset ----------

#[derive(Asset, TypePath, Clone, Debug)]
pub struct DecorationCatalog {
    /// Processing order; index in this vector is `PlacementEvent::definition`.
    pub definitions: Vec<DecorationDef>,
    /// Name → index for quick lookups.
    pub name_to_index: HashMap<String, usize>,
}

impl DecorationCatalog {
    /// Validate and index a list of definitions.
    pub fn from_definitions(definitions: Vec<DecorationDef>) -> Result<Self, CatalogLoadError> {
        let mut name_to_index = HashMap::with_capacity(definitions.len());
        for (i, def) in definitions.iter().enumerate() {
            validate(def)?;
            if let Some(prev) = name_to_index.insert(def.name.clone(), i) {
                return Err(CatalogLoadError::DuplicateName {
                    name: def.name.clone(),
                    first: prev,
                    second: i,
                });
            }
        }
        Ok(Self { definitions, name_to_index })
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&DecorationDef> {
        self.index_of(name).map(|i| &self.definitions[i])
    }
}

impl DecorationSource for DecorationCatalog {
    fn definitions(&self) -> &[DecorationDef] { &self.definitions }
}

fn validate(def: &DecorationDef) -> Result<(), CatalogLoadError> {
    if def.variants.is_empty() {
        return Err(CatalogLoadError::NoVariants { name: def.name.clone() });
    }
    let r = &def.rules;
    if !(0.0..=1.0).contains(&r.frequency) {
        return Err(CatalogLoadError::FrequencyOutOfRange { name: def.name.clone(), value: r.frequency });
    }
    for (field, value) in [
        ("foundation_radius", r.foundation_radius),
        ("height", r.height),
        ("neighbour_radius", r.neighbour_radius),
    ] {
        if value.is_nan() || value < 0.0 {
            return Err(CatalogLoadError::NegativeExtent { name: def.name.clone(), field, value });
        }
    }
    Ok(())
}

/// Parse a `.decor.ron` document: a list of definitions.
pub fn parse_catalog(bytes: &[u8]) -> Result<DecorationCatalog, CatalogLoadError> {
    let defs: Vec<DecorationDef> =
        ron::de::from_bytes(bytes).map_err(|e| CatalogLoadError::Ron(e.to_string()))?;
    DecorationCatalog::from_definitions(defs)
}

// ---------- Asset loader for `.decor.ron` ----------

#[derive(Default)]
pub struct DecorationCatalogLoader;

impl AssetLoader for DecorationCatalogLoader {
    type Asset = DecorationCatalog;
    type Settings = ();
    type Error = CatalogLoadError;

    fn extensions(&self) -> &[&str] {
        &["decor.ron"]
    }

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        parse_catalog(&bytes)
    }
}

// ---------- Loader errors ----------

#[derive(thiserror::Error, Debug)]
pub enum CatalogLoadError {
    #[error("I/O while reading decoration catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(String),
    #[error("Duplicate decoration name '{name}' (first idx {first}, second idx {second})")]
    DuplicateName { name: String, first: usize, second: usize },
    #[error("Decoration '{name}' has no variants")]
    NoVariants { name: String },
    #[error("Decoration '{name}' frequency {value} is outside 0..=1")]
    FrequencyOutOfRange { name: String, value: f32 },
    #[error("Decoration '{name}' {field} must be >= 0 (got {value})")]
    NegativeExtent { name: String, field: &'static str, value: f32 },
}
