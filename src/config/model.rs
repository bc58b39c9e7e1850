// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::engine::Pace;
use crate::presets::{DEFAULT_PRESET, Preset, PresetCatalog};
use crate::types::SpeedMs;

/// Configuration exactly as read from a TOML file, before validation.
///
/// ```toml
/// [config]
/// speed_ms = 800
/// example = "mine"
///
/// [preset.mine]
/// name = "My example"
/// description = "Two timers and a tick"
/// code = """
/// console.log('go');
/// setTimeout(() => console.log('t1'), 0);
/// process.nextTick(() => console.log('tick'));
/// """
/// ```
///
/// All sections are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    /// Extra or overriding presets, keyed by preset key.
    #[serde(default)]
    pub preset: BTreeMap<String, PresetConfig>,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Pacing in milliseconds, 300..=2000.
    #[serde(default = "default_speed_ms")]
    pub speed_ms: u64,

    /// Preset loaded at startup when `--example` is not given.
    #[serde(default)]
    pub example: Option<String>,
}

fn default_speed_ms() -> u64 {
    SpeedMs::DEFAULT
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            speed_ms: default_speed_ms(),
            example: None,
        }
    }
}

/// `[preset.<key>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PresetConfig {
    /// Display name; defaults to the key.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Program text fed to the classifier.
    pub code: String,
}

/// Validated configuration.
///
/// Only constructible through `TryFrom<RawConfigFile>` (see `validate.rs`)
/// or [`Default`], so holders can rely on its invariants.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    config: ConfigSection,
    preset: BTreeMap<String, PresetConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        preset: BTreeMap<String, PresetConfig>,
    ) -> Self {
        Self { config, preset }
    }

    pub fn config(&self) -> &ConfigSection {
        &self.config
    }

    pub fn presets(&self) -> &BTreeMap<String, PresetConfig> {
        &self.preset
    }

    pub fn speed(&self) -> SpeedMs {
        SpeedMs(self.config.speed_ms)
    }

    pub fn pace(&self) -> Pace {
        Pace::from(self.speed())
    }

    /// Preset to load when none is requested explicitly.
    pub fn default_example(&self) -> &str {
        self.config.example.as_deref().unwrap_or(DEFAULT_PRESET)
    }

    /// Built-in presets with the configured ones merged on top.
    pub fn catalog(&self) -> PresetCatalog {
        let mut catalog = PresetCatalog::builtin();
        for (key, p) in self.preset.iter() {
            catalog.insert(Preset {
                key: key.clone(),
                name: p.name.clone().unwrap_or_else(|| key.clone()),
                description: p.description.clone().unwrap_or_default(),
                code: p.code.clone(),
            });
        }
        catalog
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(ConfigSection::default(), BTreeMap::new())
    }
}
