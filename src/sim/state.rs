//! Console state and core simulation types
//!
//! Owns everything the state machine and both engines mutate: mode,
//! per-game phase, menu cursor, and the two game contexts. Constructed
//! once at power-on, fields reset by each game's reset operation, never
//! torn down.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Top-level application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Power-on splash, waiting for confirm
    Welcome,
    /// Game selection menu
    MainMenu,
    /// Game A: lane dodger
    Race,
    /// Game B: paddle-and-blocks
    Breaker,
}

/// Per-game sub-state; meaningful only while a game mode is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Game's start menu, waiting for confirm
    AwaitingStart,
    /// Active gameplay
    Playing,
    /// Round lost
    GameOver,
    /// Round won (breaker only; the race is endless)
    Victory,
}

/// What a single engine update did to the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Continue,
    Lost,
    Won,
}

/// Visual variant of an obstacle vehicle.
///
/// Each variant resolves to its own bitmap via pattern match in
/// `render::sprites`; the collision box is a constant 8x8 for all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleKind {
    Sedan,
    Coupe,
    Truck,
    Van,
    Motorcycle,
    Suv,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 6] = [
        VehicleKind::Sedan,
        VehicleKind::Coupe,
        VehicleKind::Truck,
        VehicleKind::Van,
        VehicleKind::Motorcycle,
        VehicleKind::Suv,
    ];
}

/// One slot of the obstacle pool
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub pos: IVec2,
    /// Lane index, 0-based from the road's left edge
    pub lane: u8,
    pub kind: VehicleKind,
    pub active: bool,
}

impl Obstacle {
    /// An inactive slot placeholder.
    pub const fn idle() -> Self {
        Self {
            pos: IVec2::new(0, 0),
            lane: 0,
            kind: VehicleKind::Sedan,
            active: false,
        }
    }

    /// Collision box, independent of the sprite variant.
    pub fn hit_rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, HIT_W, HIT_H)
    }
}

/// Fixed-capacity obstacle arena.
///
/// Slots are reused in place; `insert` claims the first inactive slot and
/// is refused when all slots are live. Iteration order is slot order,
/// which keeps collision resolution deterministic.
#[derive(Debug, Clone)]
pub struct ObstaclePool {
    slots: [Obstacle; MAX_OBSTACLES],
}

impl ObstaclePool {
    pub fn new() -> Self {
        Self {
            slots: [Obstacle::idle(); MAX_OBSTACLES],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|o| o.active).count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|o| o.active)
    }

    /// Claim the first free slot for `obstacle`. Returns false (and drops
    /// the obstacle) when the pool is full.
    pub fn insert(&mut self, obstacle: Obstacle) -> bool {
        match self.slots.iter_mut().find(|o| !o.active) {
            Some(slot) => {
                *slot = Obstacle {
                    active: true,
                    ..obstacle
                };
                true
            }
            None => false,
        }
    }

    /// Bounds-checked slot access, active or not.
    pub fn slot_mut(&mut self, index: usize) -> Option<&mut Obstacle> {
        self.slots.get_mut(index)
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &Obstacle> {
        self.slots.iter().filter(|o| o.active)
    }

    /// Deactivate every slot.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
        }
    }
}

impl Default for ObstaclePool {
    fn default() -> Self {
        Self::new()
    }
}

/// The breaker ball: integer position and velocity
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub pos: IVec2,
    pub vel: IVec2,
}

impl Ball {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BALL_SIZE, BALL_SIZE)
    }
}

/// Fixed 10x2 destructible brick grid with a live-cell count.
///
/// Invariant: `live()` always equals the number of present cells. Cells
/// are addressed row-major; a cleared cell stays cleared until `refill`.
#[derive(Debug, Clone)]
pub struct BrickGrid {
    cells: [bool; TOTAL_BRICKS],
    live: usize,
}

impl BrickGrid {
    /// A fully populated grid.
    pub fn new() -> Self {
        Self {
            cells: [true; TOTAL_BRICKS],
            live: TOTAL_BRICKS,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn live(&self) -> usize {
        self.live
    }

    /// Whether the cell at `index` is present. Out of bounds reads absent.
    pub fn is_present(&self, index: usize) -> bool {
        self.cells.get(index).copied().unwrap_or(false)
    }

    /// Clear one cell. Returns true if it was present.
    pub fn clear_at(&mut self, index: usize) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) if *cell => {
                *cell = false;
                self.live -= 1;
                true
            }
            _ => false,
        }
    }

    /// Restore every cell.
    pub fn refill(&mut self) {
        self.cells = [true; TOTAL_BRICKS];
        self.live = TOTAL_BRICKS;
    }

    /// Screen rectangle of the cell at `index`.
    pub fn rect_of(index: usize) -> Rect {
        let row = (index / BRICK_COLS) as i32;
        let col = (index % BRICK_COLS) as i32;
        Rect::new(
            BRICK_START_X + col * (BRICK_W + BRICK_GAP),
            BRICK_TOP_Y + row * (BRICK_H + BRICK_GAP),
            BRICK_W,
            BRICK_H,
        )
    }
}

impl Default for BrickGrid {
    fn default() -> Self {
        Self::new()
    }
}

/// Game A context: lane dodger
#[derive(Debug, Clone)]
pub struct RaceState {
    /// Player vehicle x, derived from the stick each frame
    pub player_x: i32,
    pub obstacles: ObstaclePool,
    pub score: u32,
    /// Current scroll speed; applied as a truncated integer per tick
    pub speed: f32,
    /// Cosmetic road-marking scroll offset, wraps at twice the mark length
    pub lane_offset: i32,
    pub last_spawn_ms: u32,
    pub god_mode: bool,
    /// Per-run RNG for lanes, variants and jitter
    pub rng: Pcg32,
}

impl RaceState {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let mut race = Self {
            player_x: 0,
            obstacles: ObstaclePool::new(),
            score: 0,
            speed: tuning.base_speed,
            lane_offset: 0,
            last_spawn_ms: 0,
            god_mode: false,
            rng: Pcg32::seed_from_u64(seed),
        };
        race.reset(0, tuning);
        race
    }

    /// Full round reset: fresh score and speed, empty pool, spawn timer
    /// rebased to `now_ms`, player centered on the middle lane, god mode
    /// off. The RNG stream continues across resets.
    pub fn reset(&mut self, now_ms: u32, tuning: &Tuning) {
        self.score = 0;
        self.player_x = ROAD_LEFT + LANE_WIDTH + LANE_WIDTH / 2 - PLAYER_W / 2;
        self.obstacles.clear();
        self.last_spawn_ms = now_ms;
        self.speed = tuning.base_speed;
        self.god_mode = false;
    }
}

/// Game B context: paddle-and-blocks
#[derive(Debug, Clone)]
pub struct BreakerState {
    /// Paddle left edge, derived from the stick each frame
    pub paddle_x: i32,
    pub ball: Ball,
    pub bricks: BrickGrid,
    pub score: u32,
}

impl BreakerState {
    pub fn new(tuning: &Tuning) -> Self {
        let mut breaker = Self {
            paddle_x: 0,
            ball: Ball {
                pos: IVec2::new(0, 0),
                vel: IVec2::new(0, 0),
            },
            bricks: BrickGrid::new(),
            score: 0,
        };
        breaker.reset(tuning);
        breaker
    }

    /// Full round reset: paddle centered, ball parked just above it with
    /// the initial velocity, grid refilled, score zeroed.
    pub fn reset(&mut self, tuning: &Tuning) {
        self.score = 0;
        self.paddle_x = (DISPLAY_WIDTH - PADDLE_W) / 2;
        self.ball.pos = IVec2::new(
            DISPLAY_WIDTH / 2,
            DISPLAY_HEIGHT - PADDLE_H - BALL_SIZE - 1,
        );
        self.ball.vel = IVec2::new(tuning.ball_speed, -tuning.ball_speed);
        self.bricks.refill();
    }
}

/// Complete console state, threaded through the state machine and engines
#[derive(Debug, Clone)]
pub struct ConsoleState {
    pub mode: Mode,
    pub phase: GamePhase,
    /// Main menu cursor, 0-based
    pub menu_selection: usize,
    /// Ticks until the menu cursor may move again
    pub menu_cooldown: u8,
    pub tuning: Tuning,
    pub race: RaceState,
    pub breaker: BreakerState,
}

impl ConsoleState {
    /// Power-on state with default balance values.
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            mode: Mode::Welcome,
            phase: GamePhase::AwaitingStart,
            menu_selection: 0,
            menu_cooldown: 0,
            race: RaceState::new(seed, &tuning),
            breaker: BreakerState::new(&tuning),
            tuning,
        }
    }

    /// Score of whichever game is active (for end screens).
    pub fn active_score(&self) -> u32 {
        match self.mode {
            Mode::Breaker => self.breaker.score,
            _ => self.race.score,
        }
    }
}
