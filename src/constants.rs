//! Tuning constants.  Distances are world units, times are milliseconds of
//! game clock, speeds are world units per frame.

// ── Ship ──────────────────────────────────────────────────────────────────────

pub const SHIP_WIDTH: i32 = 50;
pub const SHIP_HEIGHT: i32 = 30;
/// Gap between the ship and the bottom edge of the world.
pub const SHIP_PADDING: i32 = 10;
pub const SHIP_SPEED: i32 = 5;
pub const MAX_HEALTH: u32 = 100;
pub const STARTING_LIVES: u32 = 3;
pub const SHOOT_DELAY: u64 = 500;
pub const MAX_PLAYER_BULLETS: usize = 3;
pub const INVULNERABLE_DURATION: u64 = 2000;
/// Blink cycle while invulnerable: hidden for the first half of each period.
pub const BLINK_PERIOD: u64 = 300;
pub const BLINK_HIDDEN: u64 = 150;

// ── Bullets ───────────────────────────────────────────────────────────────────

pub const BULLET_WIDTH: i32 = 4;
pub const BULLET_HEIGHT: i32 = 10;
pub const BULLET_SPEED: i32 = 7;
pub const ENEMY_BULLET_WIDTH: i32 = 4;
pub const ENEMY_BULLET_HEIGHT: i32 = 12;
pub const ENEMY_BULLET_SPEED: i32 = 5;
/// An enemy hit is always lethal.
pub const ENEMY_BULLET_DAMAGE: u32 = 100;

// ── Fleet ─────────────────────────────────────────────────────────────────────

pub const ENEMY_COLS: usize = 11;
pub const ENEMY_ROWS: usize = 5;
pub const ENEMY_WIDTH: i32 = 64;
pub const ENEMY_HEIGHT: i32 = 48;
pub const ENEMY_H_SPACING: i32 = 20;
pub const ENEMY_V_SPACING: i32 = 18;
pub const FLEET_START_Y: i32 = 100;
pub const STEP_DISTANCE: i32 = 16;
pub const DROP_AMOUNT: i32 = 32;
pub const MIN_STEP_INTERVAL: u64 = 100;
/// Per-level reduction of the fleet's starting step interval.
pub const STEP_INTERVAL_PER_LEVEL: u64 = 50;

/// Total width of a full fleet row.
pub const FLEET_WIDTH: i32 =
    ENEMY_COLS as i32 * ENEMY_WIDTH + (ENEMY_COLS as i32 - 1) * ENEMY_H_SPACING;
/// Total height of a full fleet column.
pub const FLEET_HEIGHT: i32 =
    ENEMY_ROWS as i32 * ENEMY_HEIGHT + (ENEMY_ROWS as i32 - 1) * ENEMY_V_SPACING;

// ── Game flow ─────────────────────────────────────────────────────────────────

pub const POINTS_PER_LEVEL: u32 = 10;
pub const LEVEL_TRANSITION: u64 = 2000;
pub const STAR_COUNT: usize = 100;

// ── World ─────────────────────────────────────────────────────────────────────

pub const DEFAULT_WORLD_WIDTH: i32 = 1280;
pub const DEFAULT_WORLD_HEIGHT: i32 = 720;
