//! Command line and environment configuration.

use std::{path::PathBuf, time::Duration};

use clap::{value_parser, Parser};

use crate::{error::GenerationError, generator::Generator};

/// Title shown on the main menu.
pub(crate) const TITLE: &str = "Labyrinth";

/// Default number of columns and rows requested for each level.
const DEFAULT_SIZE: u16 = 20;

/// Default duration of a simulation tick in milliseconds.
const DEFAULT_TICK_MS: u64 = 33;

/// Default log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_LEVEL: &str = "info";

/// Runtime configuration of the game.
///
/// Every option can also be given through the environment variable named next to it.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "app", version, about)]
pub struct Config {
    /// Number of labyrinth columns; even values are rounded up to the next odd one.
    #[arg(
        long,
        env = "LABYRINTH_WIDTH",
        default_value_t = DEFAULT_SIZE,
        value_parser = value_parser!(u16).range(3..=201)
    )]
    pub width: u16,

    /// Number of labyrinth rows; even values are rounded up to the next odd one.
    #[arg(
        long,
        env = "LABYRINTH_HEIGHT",
        default_value_t = DEFAULT_SIZE,
        value_parser = value_parser!(u16).range(3..=201)
    )]
    pub height: u16,

    /// Seed for the labyrinth generator; a random seed is used when absent.
    #[arg(long, env = "LABYRINTH_SEED")]
    pub seed: Option<u64>,

    /// Duration of a simulation tick in milliseconds.
    #[arg(
        long,
        env = "LABYRINTH_TICK_MS",
        default_value_t = DEFAULT_TICK_MS,
        value_parser = value_parser!(u64).range(5..=1000)
    )]
    pub tick_ms: u64,

    /// Start playing right away instead of showing the main menu.
    #[arg(long, env = "LABYRINTH_SKIP_MENU")]
    pub skip_menu: bool,

    /// File receiving the log output; nothing is logged when absent.
    #[arg(long, env = "LABYRINTH_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log filter directive, overridden by `RUST_LOG`.
    #[arg(long, env = "LABYRINTH_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            seed: None,
            tick_ms: DEFAULT_TICK_MS,
            skip_menu: false,
            log_file: None,
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

impl Config {
    /// Duration of a simulation tick.
    pub(crate) const fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Labyrinth generator for the configured dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::TooSmall`] when the dimensions leave no room for both a start and
    /// an exit.
    pub(crate) fn generator(&self) -> Result<Generator, GenerationError> {
        Generator::new(usize::from(self.width), usize::from(self.height))
    }
}
