//! Game session state: the current level, its labyrinth and the player walking through it.

use std::time::Duration;

use color_eyre::eyre::Result;
use rand::{rngs::StdRng, SeedableRng as _};
use tracing::info;

use crate::{
    config::Config,
    generator::{Generator, Grid},
    player::{Outcome, Player},
    world::World,
};

/// How long a notification stays on screen.
pub(crate) const NOTIFICATION_DURATION: Duration = Duration::from_secs(3);

/// Short message shown on top of the labyrinth for a limited time.
///
/// The age is counted in game time, so a paused game keeps its notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Notification {
    /// Text of the notification.
    pub(crate) message: String,
    /// Game time elapsed since the notification was pushed.
    pub(crate) age: Duration,
}

impl Notification {
    /// Creates a fresh notification.
    const fn new(message: String) -> Self {
        Self {
            message,
            age: Duration::ZERO,
        }
    }

    /// Returns whether the notification should still be displayed.
    pub(crate) fn is_visible(&self) -> bool {
        self.age < NOTIFICATION_DURATION
    }
}

/// A running game.
///
/// Levels are numbered from one. Each level gets a freshly generated labyrinth of the configured
/// size, and reaching its exit immediately loads the next one.
pub(crate) struct Game {
    /// Number of the current level.
    level: u32,
    /// Generator producing the labyrinth of every level.
    generator: Generator,
    /// Random source shared by labyrinth generation and world building.
    rng: StdRng,
    /// Game time covered by one call to [`Game::tick`].
    tick: Duration,
    /// Layout of the current level.
    grid: Grid,
    /// Geometry of the current level.
    world: World,
    /// Player walking through the current level.
    pub(crate) player: Player,
    /// Message currently displayed over the labyrinth.
    notification: Option<Notification>,
}

impl Game {
    /// Starts a new game on the first level.
    ///
    /// # Errors
    ///
    /// Fails when the configured dimensions cannot hold a labyrinth.
    pub(crate) fn new(config: &Config) -> Result<Self> {
        let generator = config.generator()?;
        let mut rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let (grid, world, player) = build_level(&generator, &mut rng);

        let mut game = Self {
            level: 1,
            generator,
            rng,
            tick: config.tick(),
            grid,
            world,
            player,
            notification: None,
        };
        game.announce_level();

        Ok(game)
    }

    /// Number of the current level.
    pub(crate) const fn level(&self) -> u32 {
        self.level
    }

    /// Layout of the current level.
    pub(crate) const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Geometry of the current level.
    pub(crate) const fn world(&self) -> &World {
        &self.world
    }

    /// Text of the level indicator.
    pub(crate) fn hud_text(&self) -> String {
        format!("Level: {}", self.level)
    }

    /// Message to display, if one is still visible.
    pub(crate) fn notification(&self) -> Option<&str> {
        self.notification
            .as_ref()
            .filter(|notification| notification.is_visible())
            .map(|notification| notification.message.as_str())
    }

    /// Replaces the current level with a new labyrinth numbered `level`.
    ///
    /// The player is placed back on the start cell, at rest and standing.
    pub(crate) fn load_level(&mut self, level: u32) {
        self.level = level;
        (self.grid, self.world, self.player) = build_level(&self.generator, &mut self.rng);
        self.announce_level();
    }

    /// Advances to the next level.
    pub(crate) fn next_level(&mut self) {
        self.load_level(self.level.saturating_add(1));
    }

    /// Advances the game by one tick.
    ///
    /// Returns [`Outcome::ReachedExit`] when the player completed a level during this tick, in
    /// which case the next level has already been loaded.
    pub(crate) fn tick(&mut self) -> Outcome {
        if let Some(notification) = self.notification.as_mut() {
            notification.age = notification.age.saturating_add(self.tick);
            if !notification.is_visible() {
                self.notification = None;
            }
        }

        let outcome = self.player.update(&self.world);
        if outcome == Outcome::ReachedExit {
            info!(level = self.level, "level completed");
            self.next_level();
        }

        outcome
    }

    /// Logs the freshly loaded level and pushes its start notification.
    fn announce_level(&mut self) {
        info!(
            level = self.level,
            width = self.grid.width(),
            height = self.grid.height(),
            start = ?self.grid.start(),
            exit = ?self.grid.exit(),
            "level loaded"
        );
        self.notification = Some(Notification::new(format!(
            "Level {} - Find the exit!",
            self.level
        )));
    }
}

/// Generates a labyrinth, builds its geometry and spawns a player on its start cell.
fn build_level(generator: &Generator, rng: &mut StdRng) -> (Grid, World, Player) {
    let grid = generator.generate(rng);
    let world = World::build(&grid, rng);
    let player = Player::spawn(grid.start_world(), world.floor_height());

    (grid, world, player)
}
