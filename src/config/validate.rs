// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, SimError};
use crate::presets::PresetCatalog;
use crate::types::SpeedMs;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::SimError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.preset))
    }
}

pub fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_global_config(cfg)?;
    validate_presets(cfg)?;
    validate_default_example(cfg)?;
    Ok(())
}

fn validate_global_config(cfg: &RawConfigFile) -> Result<()> {
    let speed = SpeedMs(cfg.config.speed_ms);
    if !speed.is_in_range() {
        return Err(SimError::ConfigError(format!(
            "[config].speed_ms must be between {} and {} (got {})",
            SpeedMs::MIN,
            SpeedMs::MAX,
            speed.0
        )));
    }
    Ok(())
}

fn validate_presets(cfg: &RawConfigFile) -> Result<()> {
    for (key, preset) in cfg.preset.iter() {
        if key.trim().is_empty() {
            return Err(SimError::ConfigError(
                "preset keys must not be empty".to_string(),
            ));
        }
        if preset.code.trim().is_empty() {
            return Err(SimError::ConfigError(format!(
                "preset '{key}' has empty `code`"
            )));
        }
    }
    Ok(())
}

fn validate_default_example(cfg: &RawConfigFile) -> Result<()> {
    let Some(ref key) = cfg.config.example else {
        return Ok(());
    };

    if cfg.preset.contains_key(key) || PresetCatalog::builtin().contains(key) {
        Ok(())
    } else {
        Err(SimError::ConfigError(format!(
            "[config].example refers to unknown preset '{key}'"
        )))
    }
}
