// src/presets/mod.rs

//! Catalog of canned example programs.
//!
//! The catalog starts from the built-in examples and can be extended (or
//! have entries overridden) by `[preset.<key>]` sections in the config file.

mod builtin;

/// Key of the preset loaded when nothing else is selected.
pub const DEFAULT_PRESET: &str = "basic";

/// A named example program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    pub key: String,
    pub name: String,
    pub description: String,
    pub code: String,
}

/// Ordered collection of presets, unique by key.
#[derive(Debug, Clone, Default)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in examples, in display order.
    pub fn builtin() -> Self {
        let presets = builtin::BUILTIN
            .iter()
            .map(|p| Preset {
                key: p.key.to_string(),
                name: p.name.to_string(),
                description: p.description.to_string(),
                code: p.code.to_string(),
            })
            .collect();
        Self { presets }
    }

    pub fn get(&self, key: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Add a preset, replacing an existing one with the same key in place.
    pub fn insert(&mut self, preset: Preset) {
        match self.presets.iter_mut().find(|p| p.key == preset.key) {
            Some(existing) => *existing = preset,
            None => self.presets.push(preset),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|p| p.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
