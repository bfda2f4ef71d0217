//! GhostFrame - a 15-level corruption puzzle engine
//!
//! Core modules:
//! - `catalog`: Static level descriptors
//! - `sim`: Deterministic session simulation (state machine, puzzles, economy, enemies)
//! - `hints`: Tiered hint tables and live-state hints
//! - `tuning`: Data-driven game balance
//! - `error`: Engine error types
//!
//! Rendering, audio and input capture live outside this crate. They read
//! [`sim::Snapshot`]s and feed commands into [`sim::Engine`].

pub mod catalog;
pub mod error;
pub mod hints;
pub mod sim;
pub mod tuning;

pub use catalog::{Difficulty, LevelDescriptor, PuzzleKind, get_level, levels};
pub use error::{Assist, GameError, TuningError};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Number of levels in the campaign
    pub const LEVEL_COUNT: usize = 15;
    /// Clearing this level escapes the simulation
    pub const FINAL_LEVEL: u8 = 15;

    /// Health at the start of every level
    pub const MAX_HEALTH: u32 = 100;
    /// Stealth energy ceiling
    pub const MAX_STEALTH_ENERGY: u32 = 100;
    /// Highest hint tier (0 = general, 1 = specific, 2 = near-answer)
    pub const MAX_HINT_LEVEL: u8 = 2;

    /// Glitch intensity before any level has been entered
    pub const SESSION_GLITCH: f32 = 0.3;

    /// Enemies spawn inside this band of the normalized plane
    pub const ENEMY_SPAWN_MIN: f32 = 10.0;
    pub const ENEMY_SPAWN_MAX: f32 = 90.0;
    /// Enemies are clamped to this band while moving
    pub const ENEMY_BOUND_MIN: f32 = 5.0;
    pub const ENEMY_BOUND_MAX: f32 = 95.0;
}
