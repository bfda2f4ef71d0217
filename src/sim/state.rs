//! Session state and core simulation types
//!
//! Everything a presentation layer needs to draw a frame lives here and is
//! serializable into a [`Snapshot`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::puzzle::{PuzzleState, RejectReason};
use crate::catalog::{LevelDescriptor, get_level};
use crate::consts::*;
use crate::tuning::Tuning;

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    /// Title screen
    Intro,
    LevelSelect,
    /// A level is being played (or finishing its completion grace)
    Game,
    /// Health or time ran out
    GameOver,
    /// Final level cleared
    Escape,
}

/// Enemy archetypes, unlocked progressively by level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Scanner,
    Hunter,
    Corruptor,
    Virus,
    Phantom,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 5] = [
        EnemyKind::Scanner,
        EnemyKind::Hunter,
        EnemyKind::Corruptor,
        EnemyKind::Virus,
        EnemyKind::Phantom,
    ];
}

/// A wandering enemy on the 0..100 plane (cosmetic)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyEntity {
    pub id: u32,
    pub kind: EnemyKind,
    pub position: Vec2,
}

/// The session aggregate. Mutated only through [`super::Engine`] commands
/// and scheduled tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub screen: Screen,
    /// Id of the level being (or last) played
    pub current_level: u8,
    pub health: u32,
    /// Completion flag per level, indexed by `id - 1`
    pub level_progress: [bool; LEVEL_COUNT],
    /// Seconds left on the level timer
    pub time_remaining: u32,
    pub is_level_complete: bool,
    /// Rejected actions this level
    pub failure_count: u32,
    pub hints_used: u32,
    pub timer_extensions: u32,
    /// Tier the next hint is drawn from
    pub hint_level: u8,
    pub show_hint: bool,
    pub current_hint: String,
    pub stealth_energy: u32,
    pub player_hidden: bool,
    pub enemies: Vec<EnemyEntity>,
    /// Levels completed this session
    pub solved_puzzles: u32,
    /// Cosmetic distortion strength, 0..=1
    pub glitch_intensity: f32,
}

impl SessionState {
    /// Fresh session on the intro screen
    pub fn new(tuning: &Tuning) -> Self {
        let first = Self::descriptor(1);
        Self {
            screen: Screen::Intro,
            current_level: first.id,
            health: tuning.level_health(),
            level_progress: [false; LEVEL_COUNT],
            time_remaining: first.time_limit,
            is_level_complete: false,
            failure_count: 0,
            hints_used: 0,
            timer_extensions: 0,
            hint_level: 0,
            show_hint: false,
            current_hint: String::new(),
            stealth_energy: tuning.max_stealth(),
            player_hidden: false,
            enemies: Vec::new(),
            solved_puzzles: 0,
            glitch_intensity: SESSION_GLITCH,
        }
    }

    fn descriptor(id: u8) -> &'static LevelDescriptor {
        get_level(id).expect("catalog holds every level id used by the session")
    }

    /// Descriptor of the current level
    pub fn level(&self) -> &'static LevelDescriptor {
        Self::descriptor(self.current_level)
    }

    /// Level 1 is always open; every other level needs its predecessor cleared
    pub fn is_unlocked(&self, id: u8) -> bool {
        match id {
            1 => true,
            2..=FINAL_LEVEL => self.is_completed(id - 1),
            _ => false,
        }
    }

    pub fn is_completed(&self, id: u8) -> bool {
        id >= 1 && self.level_progress.get(usize::from(id) - 1).copied().unwrap_or(false)
    }

    /// Puzzle input is accepted only while a level is being played
    pub fn accepts_input(&self) -> bool {
        self.screen == Screen::Game && !self.is_level_complete
    }
}

/// Discrete notifications for presentation layers (sounds, flashes, toasts)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScreenChanged { from: Screen, to: Screen },
    LevelStarted { level: u8 },
    /// An action was accepted and the puzzle is not yet finished
    PuzzleProgress { action: String },
    ActionRejected { penalty: u32, reason: RejectReason },
    Damaged { amount: u32, health: u32 },
    LevelComplete { level: u8 },
    HintShown { tier: u8, text: String },
    TimerExtended { seconds: u32, time_remaining: u32 },
    TimeExpired,
    EnemiesMoved,
    GlitchPulse { intensity: f32 },
    StealthChanged { hidden: bool, energy: u32 },
    Escaped,
}

/// Read-only copy of everything observable, stamped with a revision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Bumped on every mutation
    pub revision: u64,
    /// Virtual clock in milliseconds
    pub clock_ms: u64,
    pub session: SessionState,
    pub puzzle: Option<PuzzleState>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
