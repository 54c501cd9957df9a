//! All game entity types — plain data plus geometry queries, no game rules.

use clap::ValueEnum;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Menu,
    Playing,
    GameOver,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in world units.  `x`/`y` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.left().min(other.left());
        let y = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect { x, y, w: right - x, h: bottom - y }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    /// Rows moved per frame; negative is upward.
    pub vy: i32,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Spaceship {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Always within 0..=MAX_HEALTH.
    pub health: u32,
    pub lives: u32,
    pub dead: bool,
    /// Game-clock time the current invulnerability window started, if any.
    pub invulnerable_since: Option<u64>,
    pub bullets: Vec<Bullet>,
    pub last_shot_time: u64,
    pub spawn_x: i32,
    pub spawn_y: i32,
}

impl Spaceship {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_since.is_some()
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub rect: Rect,
    pub row: usize,
    pub col: usize,
    pub alive: bool,
    /// Two-frame animation toggle (0 or 1).
    pub frame: u8,
}

/// Grid geometry used to lay out a fresh fleet.
#[derive(Clone, Debug, PartialEq)]
pub struct FleetLayout {
    pub cols: usize,
    pub rows: usize,
    pub enemy_w: i32,
    pub enemy_h: i32,
    pub h_spacing: i32,
    pub v_spacing: i32,
    pub start_x: i32,
    pub start_y: i32,
}

#[derive(Clone, Debug)]
pub struct Fleet {
    pub cols: usize,
    pub rows: usize,
    /// Indexed `[row][col]`.
    pub enemies: Vec<Vec<Enemy>>,
    /// +1 marches right, -1 marches left.
    pub direction: i32,
    pub step_distance: i32,
    pub drop_amount: i32,
    pub step_interval: u64,
    pub last_step: u64,
    pub screen_width: i32,
}

impl Fleet {
    pub fn all(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().flatten()
    }

    pub fn alive(&self) -> impl Iterator<Item = &Enemy> {
        self.all().filter(|e| e.alive)
    }

    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    pub fn is_cleared(&self) -> bool {
        self.alive().next().is_none()
    }

    /// Rectangle enclosing every living enemy; `None` once the fleet is wiped out.
    pub fn bounding_rect(&self) -> Option<Rect> {
        self.alive()
            .map(|e| e.rect)
            .reduce(|acc, r| acc.union(&r))
    }
}

// ── Background ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: i32,
    pub y: i32,
    /// 1..=3; faster stars are drawn brighter.
    pub speed: i32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub ship: Spaceship,
    pub fleet: Fleet,
    pub enemy_bullets: Vec<Bullet>,
    pub last_enemy_shot: u64,
    pub enemy_shot_interval: u64,
    pub stars: Vec<Star>,
    pub score: u32,
    /// Best score of this session.
    pub high_score: u32,
    pub level: u32,
    /// Set while the "LEVEL N" banner is shown between fleets.
    pub level_transition_start: Option<u64>,
    pub difficulty: Difficulty,
    pub status: GameStatus,
    pub width: i32,
    pub height: i32,
}
