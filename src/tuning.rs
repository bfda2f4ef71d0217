//! Game balance tuning
//!
//! Every field has a serde default, so a tuning file only needs the values
//! it overrides. Defaults reproduce the shipped balance.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_HEALTH, MAX_STEALTH_ENERGY};
use crate::error::TuningError;

/// Economy and scheduler parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Health ===
    /// Health at level start (clamped to 100)
    pub starting_health: u32,
    /// Glitch intensity added per damage event
    pub damage_glitch_bump: f32,

    // === Assistance ===
    /// Failures before the hint button appears
    pub hint_failure_threshold: u32,
    /// Failures before the timer extension appears
    pub extension_failure_threshold: u32,
    /// Extension only offered below this many seconds
    pub extension_time_threshold: u32,
    pub max_timer_extensions: u32,
    pub first_extension_secs: u32,
    pub later_extension_secs: u32,

    // === Stealth ===
    pub stealth_tick_ms: u64,
    /// Energy lost per tick while hidden
    pub stealth_drain: u32,
    /// Energy regained per tick while visible
    pub stealth_regen: u32,

    // === Scheduler ===
    pub countdown_interval_ms: u64,
    pub glitch_interval_ms: u64,
    /// Delay between solving a puzzle and leaving the game screen
    pub completion_grace_ms: u64,
    /// Enemy movement interval floor and per-level speedup
    pub enemy_interval_floor_ms: u64,
    pub enemy_interval_base_ms: u64,
    pub enemy_interval_step_ms: u64,
    /// Full width of an enemy step (visible / hidden)
    pub enemy_step_span: f32,
    pub enemy_step_span_hidden: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_health: MAX_HEALTH,
            damage_glitch_bump: 0.2,

            hint_failure_threshold: 3,
            extension_failure_threshold: 2,
            extension_time_threshold: 30,
            max_timer_extensions: 3,
            first_extension_secs: 60,
            later_extension_secs: 30,

            stealth_tick_ms: 100,
            stealth_drain: 2,
            stealth_regen: 1,

            countdown_interval_ms: 1000,
            glitch_interval_ms: 1000,
            completion_grace_ms: 2000,
            enemy_interval_floor_ms: 400,
            enemy_interval_base_ms: 2000,
            enemy_interval_step_ms: 100,
            enemy_step_span: 25.0,
            enemy_step_span_hidden: 20.0,
        }
    }
}

impl Tuning {
    /// Environment variable the binary reads a tuning file path from
    pub const ENV_VAR: &'static str = "GHOSTFRAME_TUNING";

    /// Parse tuning from JSON, filling unspecified fields with defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read tuning from a JSON file
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load from the file named by [`Self::ENV_VAR`], falling back to defaults
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(Self::ENV_VAR) else {
            return Self::default();
        };
        match Self::load(Path::new(&path)) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
        }
    }

    /// Reject values the scheduler or economy cannot work with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.countdown_interval_ms == 0
            || self.glitch_interval_ms == 0
            || self.stealth_tick_ms == 0
            || self.enemy_interval_floor_ms == 0
        {
            return Err(TuningError::Invalid("timer intervals must be non-zero"));
        }
        if self.starting_health == 0 {
            return Err(TuningError::Invalid("starting_health must be positive"));
        }
        if !(0.0..=1.0).contains(&self.damage_glitch_bump) {
            return Err(TuningError::Invalid("damage_glitch_bump must be within 0..=1"));
        }
        Ok(())
    }

    /// Starting health, never above the health ceiling
    pub fn level_health(&self) -> u32 {
        self.starting_health.min(MAX_HEALTH)
    }

    /// Stealth energy ceiling
    pub fn max_stealth(&self) -> u32 {
        MAX_STEALTH_ENERGY
    }

    /// Enemy movement cadence for a level: faster on later levels, with a floor
    pub fn enemy_interval_ms(&self, level_id: u8) -> u64 {
        self.enemy_interval_base_ms
            .saturating_sub(u64::from(level_id) * self.enemy_interval_step_ms)
            .max(self.enemy_interval_floor_ms)
    }
}
