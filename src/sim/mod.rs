//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick rate only (time arrives as a millisecond counter argument)
//! - Seeded RNG only
//! - Stable iteration order (pool slot order, grid scan order)
//! - No rendering or hardware side effects; the input module touches the
//!   `InputSource` trait only to sample it into plain tick commands

pub mod breaker;
pub mod collision;
pub mod input;
pub mod race;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use input::{ButtonPad, DebouncedButton, TickInput};
pub use state::{
    Ball, BreakerState, BrickGrid, ConsoleState, GamePhase, Mode, Obstacle, ObstaclePool,
    RaceState, RoundOutcome, VehicleKind,
};
pub use tick::tick;
