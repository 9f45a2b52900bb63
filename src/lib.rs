//! A terminal labyrinth game.
//!
//! Every level is a freshly generated perfect labyrinth. The player walks through it seen from
//! above, jumping and crouching at will, until reaching the exit cell, which is placed as far as
//! possible from the start and loads the next, new labyrinth.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
mod config;
mod error;
mod events;
mod game;
mod generator;
mod logging;
mod player;
mod types;
mod ui;
mod world;

pub use crate::{app::App, config::Config, logging::init as init_logging};
