//! Command-line configuration.

use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;

use crate::constants::{
    DEFAULT_WORLD_HEIGHT, DEFAULT_WORLD_WIDTH, FLEET_HEIGHT, FLEET_START_Y, FLEET_WIDTH,
    SHIP_HEIGHT, SHIP_PADDING, STEP_DISTANCE,
};
use crate::entities::Difficulty;

#[derive(Parser, Debug, Clone)]
#[command(name = "space_invaders")]
#[command(about = "Terminal Space Invaders: hold off the marching fleet")]
pub struct Config {
    /// Fleet speed and enemy fire rate
    #[arg(long, value_enum, default_value_t = Difficulty::Normal)]
    pub difficulty: Difficulty,

    /// Seed for a reproducible game (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Width of the simulated playfield in world units
    #[arg(long, default_value_t = DEFAULT_WORLD_WIDTH)]
    pub world_width: i32,

    /// Height of the simulated playfield in world units
    #[arg(long, default_value_t = DEFAULT_WORLD_HEIGHT)]
    pub world_height: i32,

    /// Write tracing output to this file (filter with RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            difficulty: Difficulty::Normal,
            seed: None,
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            log_file: None,
        }
    }
}

/// Narrowest world that lets the full fleet take a step in either direction.
pub const MIN_WORLD_WIDTH: i32 = FLEET_WIDTH + 2 * STEP_DISTANCE;
/// Shortest world that fits the fleet above the ship.
pub const MIN_WORLD_HEIGHT: i32 = FLEET_START_Y + FLEET_HEIGHT + SHIP_HEIGHT + SHIP_PADDING;
/// Upper bound on either world dimension; keeps positions well clear of `i32` overflow.
pub const MAX_WORLD_SIZE: i32 = 100_000;

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.world_width < MIN_WORLD_WIDTH {
            bail!(
                "world width {} is too small, need at least {}",
                self.world_width,
                MIN_WORLD_WIDTH
            );
        }
        if self.world_height <= MIN_WORLD_HEIGHT {
            bail!(
                "world height {} is too small, need more than {}",
                self.world_height,
                MIN_WORLD_HEIGHT
            );
        }
        if self.world_width > MAX_WORLD_SIZE {
            bail!(
                "world width {} is too large, at most {}",
                self.world_width,
                MAX_WORLD_SIZE
            );
        }
        if self.world_height > MAX_WORLD_SIZE {
            bail!(
                "world height {} is too large, at most {}",
                self.world_height,
                MAX_WORLD_SIZE
            );
        }
        Ok(())
    }
}
