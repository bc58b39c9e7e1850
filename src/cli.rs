// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::types::SpeedMs;

/// Command-line arguments for `loopviz`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "loopviz",
    version,
    about = "Step through the order in which an event loop runs sync code, microtasks and phases.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a config file (TOML).
    ///
    /// Default: `Loopviz.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Example program to run (see `--list-examples`).
    #[arg(long, value_name = "KEY")]
    pub example: Option<String>,

    /// Read the program text from a file instead of an example.
    #[arg(long, value_name = "PATH", conflicts_with = "example")]
    pub source: Option<PathBuf>,

    /// Pacing between transitions in milliseconds (300-2000).
    #[arg(long, value_name = "MS")]
    pub speed: Option<SpeedMs>,

    /// Run without any pacing.
    #[arg(long, conflicts_with = "speed")]
    pub instant: bool,

    /// Print the queue contents after every event.
    #[arg(long)]
    pub show_queues: bool,

    /// Print the available examples and exit.
    #[arg(long)]
    pub list_examples: bool,

    /// Classify the program and print the task groups, but don't run it.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `LOOPVIZ_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
