// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! The simulation core itself never fails: a line the classifier cannot use
//! is dropped, and an empty group only yields a skipped phase. Everything
//! here belongs to the surrounding layers (config, presets, session control).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unknown example: {0}")]
    UnknownPreset(String),

    #[error("A simulation is already running; reset it first")]
    AlreadyRunning,

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SimError>;
