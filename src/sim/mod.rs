//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual clock only (the host decides how much time passes)
//! - Seeded RNG only
//! - Stable iteration order (enemies by id, tasks by due time then priority)
//! - No rendering or platform dependencies

pub mod ambient;
pub mod autoplay;
pub mod economy;
pub mod engine;
pub mod puzzle;
pub mod schedule;
pub mod state;
pub mod tick;

pub use autoplay::next_action;
pub use engine::Engine;
pub use puzzle::{PuzzleAction, PuzzleState, RejectReason, Verdict};
pub use schedule::{Scheduler, TaskKind};
pub use state::{EnemyEntity, EnemyKind, GameEvent, Screen, SessionState, Snapshot};
