//! Pure game-logic functions.
//!
//! Every public function takes immutable inputs and returns brand-new values.
//! Time comes in as `now`, milliseconds on the game clock, and randomness
//! through an injected RNG, so callers control determinism.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::constants::*;
use crate::entities::{
    Bullet, Difficulty, Enemy, Fleet, FleetLayout, GameState, GameStatus, Rect, Spaceship, Star,
};

// ── Difficulty tables ────────────────────────────────────────────────────────

/// Fleet step interval at level 1.
pub fn base_step_interval(difficulty: Difficulty) -> u64 {
    match difficulty {
        Difficulty::Easy => 800,
        Difficulty::Normal => 600,
        Difficulty::Hard => 450,
    }
}

/// Time between two enemy shots.
pub fn enemy_shot_interval(difficulty: Difficulty) -> u64 {
    match difficulty {
        Difficulty::Easy => 2000,
        Difficulty::Normal => 1500,
        Difficulty::Hard => 1000,
    }
}

/// Starting step interval of the fleet for `level` (1-based).
pub fn level_step_interval(difficulty: Difficulty, level: u32) -> u64 {
    let reduction = u64::from(level.saturating_sub(1)) * STEP_INTERVAL_PER_LEVEL;
    base_step_interval(difficulty)
        .saturating_sub(reduction)
        .max(MIN_STEP_INTERVAL)
}

/// Score awarded per enemy destroyed.
pub fn points_for_kill(level: u32) -> u32 {
    POINTS_PER_LEVEL * level
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Bottom-centre spawn point of the ship.
pub fn spawn_position(width: i32, height: i32) -> (i32, i32) {
    (width / 2 - SHIP_WIDTH / 2, height - SHIP_HEIGHT - SHIP_PADDING)
}

pub fn new_spaceship(name: &str, x: i32, y: i32) -> Spaceship {
    Spaceship {
        name: name.to_string(),
        x,
        y,
        width: SHIP_WIDTH,
        height: SHIP_HEIGHT,
        health: MAX_HEALTH,
        lives: STARTING_LIVES,
        dead: false,
        invulnerable_since: None,
        bullets: Vec::new(),
        last_shot_time: 0,
        spawn_x: x,
        spawn_y: y,
    }
}

/// The standard 11×5 grid, centred horizontally.
pub fn standard_layout(screen_width: i32) -> FleetLayout {
    FleetLayout {
        cols: ENEMY_COLS,
        rows: ENEMY_ROWS,
        enemy_w: ENEMY_WIDTH,
        enemy_h: ENEMY_HEIGHT,
        h_spacing: ENEMY_H_SPACING,
        v_spacing: ENEMY_V_SPACING,
        start_x: (screen_width - FLEET_WIDTH) / 2,
        start_y: FLEET_START_Y,
    }
}

pub fn build_fleet(layout: &FleetLayout, screen_width: i32, step_interval: u64, now: u64) -> Fleet {
    let enemies = (0..layout.rows)
        .map(|row| {
            (0..layout.cols)
                .map(|col| Enemy {
                    rect: Rect::new(
                        layout.start_x + col as i32 * (layout.enemy_w + layout.h_spacing),
                        layout.start_y + row as i32 * (layout.enemy_h + layout.v_spacing),
                        layout.enemy_w,
                        layout.enemy_h,
                    ),
                    row,
                    col,
                    alive: true,
                    frame: 0,
                })
                .collect()
        })
        .collect();

    Fleet {
        cols: layout.cols,
        rows: layout.rows,
        enemies,
        direction: 1,
        step_distance: STEP_DISTANCE,
        drop_amount: DROP_AMOUNT,
        step_interval,
        last_step: now,
        screen_width,
    }
}

pub fn spawn_fleet(screen_width: i32, step_interval: u64, now: u64) -> Fleet {
    build_fleet(&standard_layout(screen_width), screen_width, step_interval, now)
}

pub fn init_stars(count: usize, width: i32, height: i32, rng: &mut impl Rng) -> Vec<Star> {
    (0..count)
        .map(|_| Star {
            x: rng.gen_range(0..=width),
            y: rng.gen_range(0..=height),
            speed: rng.gen_range(1..=3),
        })
        .collect()
}

/// Build the title-screen state for a world of `width` × `height` units.
pub fn init_state(
    difficulty: Difficulty,
    width: i32,
    height: i32,
    rng: &mut impl Rng,
) -> GameState {
    let (x, y) = spawn_position(width, height);
    GameState {
        ship: new_spaceship("Falcon", x, y),
        fleet: spawn_fleet(width, level_step_interval(difficulty, 1), 0),
        enemy_bullets: Vec::new(),
        last_enemy_shot: 0,
        enemy_shot_interval: enemy_shot_interval(difficulty),
        stars: init_stars(STAR_COUNT, width, height, rng),
        score: 0,
        high_score: 0,
        level: 1,
        level_transition_start: None,
        difficulty,
        status: GameStatus::Menu,
        width,
        height,
    }
}

/// Begin a fresh run from the menu or the game-over screen.
pub fn start_game(state: &GameState, now: u64) -> GameState {
    let ship = Spaceship {
        x: state.ship.spawn_x,
        y: state.ship.spawn_y,
        health: MAX_HEALTH,
        lives: STARTING_LIVES,
        dead: false,
        invulnerable_since: Some(now),
        bullets: Vec::new(),
        ..state.ship.clone()
    };
    info!(difficulty = ?state.difficulty, "game started");
    GameState {
        ship,
        fleet: spawn_fleet(state.width, level_step_interval(state.difficulty, 1), now),
        enemy_bullets: Vec::new(),
        last_enemy_shot: now,
        score: 0,
        level: 1,
        level_transition_start: None,
        status: GameStatus::Playing,
        ..state.clone()
    }
}

// ── Spaceship ────────────────────────────────────────────────────────────────

pub fn move_ship_left(state: &GameState) -> GameState {
    move_ship(state, -SHIP_SPEED)
}

pub fn move_ship_right(state: &GameState) -> GameState {
    move_ship(state, SHIP_SPEED)
}

fn move_ship(state: &GameState, dx: i32) -> GameState {
    if state.ship.dead {
        return state.clone();
    }
    let max_x = (state.width - state.ship.width).max(0);
    GameState {
        ship: Spaceship {
            x: (state.ship.x + dx).clamp(0, max_x),
            ..state.ship.clone()
        },
        ..state.clone()
    }
}

/// Fire a bullet from the ship's nose, rate-limited by `SHOOT_DELAY` and
/// capped at `MAX_PLAYER_BULLETS` in flight.
pub fn ship_shoot(state: &GameState, now: u64) -> GameState {
    let ship = &state.ship;
    let cooled_down = now.saturating_sub(ship.last_shot_time) > SHOOT_DELAY;
    if ship.dead || !cooled_down || ship.bullets.len() >= MAX_PLAYER_BULLETS {
        return state.clone();
    }
    let bullet = Bullet {
        rect: Rect::new(
            ship.x + ship.width / 2 - BULLET_WIDTH / 2,
            ship.y,
            BULLET_WIDTH,
            BULLET_HEIGHT,
        ),
        vy: -BULLET_SPEED,
    };
    let mut bullets = ship.bullets.clone();
    bullets.push(bullet);
    GameState {
        ship: Spaceship {
            bullets,
            last_shot_time: now,
            ..ship.clone()
        },
        ..state.clone()
    }
}

/// Apply damage.  Hitting zero health costs a life and respawns the ship
/// with a fresh invulnerability window, or kills it for good on the last life.
pub fn take_damage(ship: &Spaceship, amount: u32, now: u64) -> Spaceship {
    if ship.is_invulnerable() || ship.dead {
        return ship.clone();
    }
    let health = ship.health.saturating_sub(amount);
    if health > 0 {
        return Spaceship {
            health,
            ..ship.clone()
        };
    }

    let lives = ship.lives.saturating_sub(1);
    if lives > 0 {
        info!(lives, "ship destroyed, respawning");
        Spaceship {
            health: MAX_HEALTH,
            lives,
            x: ship.spawn_x,
            y: ship.spawn_y,
            bullets: Vec::new(),
            invulnerable_since: Some(now),
            ..ship.clone()
        }
    } else {
        info!("ship destroyed, no lives left");
        Spaceship {
            health: 0,
            lives: 0,
            dead: true,
            ..ship.clone()
        }
    }
}

/// Immediate loss of every remaining life; ignores invulnerability.
pub fn destroy_ship(ship: &Spaceship) -> Spaceship {
    Spaceship {
        health: 0,
        lives: 0,
        dead: true,
        ..ship.clone()
    }
}

pub fn update_invulnerability(ship: &Spaceship, now: u64) -> Spaceship {
    match ship.invulnerable_since {
        Some(start) if now.saturating_sub(start) >= INVULNERABLE_DURATION => Spaceship {
            invulnerable_since: None,
            ..ship.clone()
        },
        _ => ship.clone(),
    }
}

/// Whether the ship is drawn this frame.  Blinks while invulnerable.
pub fn ship_visible(ship: &Spaceship, now: u64) -> bool {
    if ship.dead {
        return false;
    }
    match ship.invulnerable_since {
        Some(start) => {
            let elapsed = now.saturating_sub(start);
            elapsed >= INVULNERABLE_DURATION || elapsed % BLINK_PERIOD >= BLINK_HIDDEN
        }
        None => true,
    }
}

// ── Bullets ──────────────────────────────────────────────────────────────────

fn advance(bullet: &Bullet) -> Bullet {
    Bullet {
        rect: Rect {
            y: bullet.rect.y + bullet.vy,
            ..bullet.rect
        },
        vy: bullet.vy,
    }
}

/// Move player bullets up, dropping those that left the top edge.
pub fn advance_player_bullets(bullets: &[Bullet]) -> Vec<Bullet> {
    bullets
        .iter()
        .map(advance)
        .filter(|b| b.rect.y >= 0)
        .collect()
}

/// Move enemy bullets down, dropping those that fell below `height`.
pub fn advance_enemy_bullets(bullets: &[Bullet], height: i32) -> Vec<Bullet> {
    bullets
        .iter()
        .map(advance)
        .filter(|b| b.rect.y <= height)
        .collect()
}

/// A bullet leaving the bottom centre of `shooter`.
pub fn enemy_fire(shooter: &Enemy) -> Bullet {
    Bullet {
        rect: Rect::new(
            shooter.rect.center_x() - ENEMY_BULLET_WIDTH / 2,
            shooter.rect.bottom(),
            ENEMY_BULLET_WIDTH,
            ENEMY_BULLET_HEIGHT,
        ),
        vy: ENEMY_BULLET_SPEED,
    }
}

// ── Fleet ────────────────────────────────────────────────────────────────────

/// Advance the fleet one step if its interval has elapsed.
///
/// The whole living fleet moves sideways in lockstep.  When the next step
/// would push its bounding box past either screen edge it drops instead,
/// reverses and marches slightly faster.
pub fn step_fleet(fleet: &Fleet, now: u64) -> Fleet {
    if now.saturating_sub(fleet.last_step) < fleet.step_interval {
        return fleet.clone();
    }
    let mut next = Fleet {
        last_step: now,
        ..fleet.clone()
    };
    let Some(bounds) = fleet.bounding_rect() else {
        return next;
    };

    let dx = fleet.direction * fleet.step_distance;
    let would_hit_left = bounds.left() + dx < 0;
    let would_hit_right = bounds.right() + dx > fleet.screen_width;

    let (shift_x, shift_y) = if would_hit_left || would_hit_right {
        next.direction = -fleet.direction;
        next.step_interval = (fleet.step_interval * 95 / 100).max(MIN_STEP_INTERVAL);
        debug!(
            direction = next.direction,
            step_interval = next.step_interval,
            "fleet reversed"
        );
        (0, fleet.drop_amount)
    } else {
        (dx, 0)
    };

    for enemy in next.enemies.iter_mut().flatten().filter(|e| e.alive) {
        enemy.rect.x += shift_x;
        enemy.rect.y += shift_y;
        enemy.frame ^= 1;
    }
    next
}

/// Pick a random column's bottom-most living enemy to fire next.
pub fn pick_shooter<'a>(fleet: &'a Fleet, rng: &mut impl Rng) -> Option<&'a Enemy> {
    let candidates: Vec<&Enemy> = (0..fleet.cols)
        .filter_map(|col| {
            fleet
                .enemies
                .iter()
                .rev()
                .filter_map(|row| row.get(col))
                .find(|e| e.alive)
        })
        .collect();
    candidates.choose(rng).copied()
}

/// Grid position of the first living enemy overlapping `rect`, in row-major order.
pub fn hit_enemy(fleet: &Fleet, rect: &Rect) -> Option<(usize, usize)> {
    fleet
        .alive()
        .find(|e| e.rect.intersects(rect))
        .map(|e| (e.row, e.col))
}

// ── Background ───────────────────────────────────────────────────────────────

/// Stars fall at their own speed and wrap to the top at a random column.
pub fn advance_stars(stars: &[Star], width: i32, height: i32, rng: &mut impl Rng) -> Vec<Star> {
    stars
        .iter()
        .map(|s| {
            let y = s.y + s.speed;
            if y > height {
                Star {
                    x: rng.gen_range(0..=width),
                    y: 0,
                    speed: s.speed,
                }
            } else {
                Star { y, ..s.clone() }
            }
        })
        .collect()
}

// ── Per-frame tick (nearly pure — clock and RNG are injected) ───────────────

/// Advance the simulation by one frame at game-clock time `now`.
pub fn tick(state: &GameState, now: u64, rng: &mut impl Rng) -> GameState {
    let stars = advance_stars(&state.stars, state.width, state.height, rng);

    if state.status != GameStatus::Playing {
        return GameState {
            stars,
            ..state.clone()
        };
    }

    // ── 1. Ship timers & player bullets ──────────────────────────────────────
    let mut ship = update_invulnerability(&state.ship, now);
    ship.bullets = advance_player_bullets(&ship.bullets);

    let mut fleet = state.fleet.clone();
    let mut enemy_bullets = state.enemy_bullets.clone();
    let mut last_enemy_shot = state.last_enemy_shot;
    let mut score = state.score;
    let mut level = state.level;
    let mut level_transition_start = state.level_transition_start;

    match state.level_transition_start {
        // ── 2a. Between levels: wait, then bring in the next fleet ──────────
        Some(start) => {
            if now.saturating_sub(start) > LEVEL_TRANSITION {
                fleet = spawn_fleet(
                    state.width,
                    level_step_interval(state.difficulty, level),
                    now,
                );
                level_transition_start = None;
                info!(level, step_interval = fleet.step_interval, "fleet spawned");
            }
        }
        None => {
            // ── 2b. Fleet march ──────────────────────────────────────────────
            fleet = step_fleet(&fleet, now);

            if let Some(bounds) = fleet.bounding_rect() {
                if bounds.bottom() >= ship.y && !ship.dead {
                    info!("fleet reached the ship");
                    ship = destroy_ship(&ship);
                }
            }

            // ── 3. Enemy fire ────────────────────────────────────────────────
            if now.saturating_sub(last_enemy_shot) > state.enemy_shot_interval {
                if let Some(shooter) = pick_shooter(&fleet, rng) {
                    enemy_bullets.push(enemy_fire(shooter));
                }
                last_enemy_shot = now;
            }

            // ── 4. Enemy bullets ↔ ship ──────────────────────────────────────
            let ship_rect = ship.rect();
            let mut remaining = Vec::with_capacity(enemy_bullets.len());
            for bullet in advance_enemy_bullets(&enemy_bullets, state.height) {
                if bullet.rect.intersects(&ship_rect) {
                    ship = take_damage(&ship, ENEMY_BULLET_DAMAGE, now);
                } else {
                    remaining.push(bullet);
                }
            }
            enemy_bullets = remaining;

            // ── 5. Player bullets ↔ enemies ──────────────────────────────────
            let mut surviving = Vec::with_capacity(ship.bullets.len());
            for bullet in &ship.bullets {
                match hit_enemy(&fleet, &bullet.rect) {
                    Some((row, col)) => {
                        fleet.enemies[row][col].alive = false;
                        score += points_for_kill(level);
                    }
                    None => surviving.push(bullet.clone()),
                }
            }
            ship.bullets = surviving;

            // ── 6. Level cleared ─────────────────────────────────────────────
            if fleet.is_cleared() {
                info!(level, score, "level cleared");
                level += 1;
                ship.bullets.clear();
                enemy_bullets.clear();
                level_transition_start = Some(now);
            }
        }
    }

    // ── 7. Status ────────────────────────────────────────────────────────────
    let status = if ship.dead {
        info!(score, level, "game over");
        GameStatus::GameOver
    } else {
        GameStatus::Playing
    };

    GameState {
        ship,
        fleet,
        enemy_bullets,
        last_enemy_shot,
        stars,
        score,
        high_score: state.high_score.max(score),
        level,
        level_transition_start,
        status,
        ..state.clone()
    }
}
