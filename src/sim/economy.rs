//! Health, failures, hints, timer extensions and stealth energy
//!
//! Pure bookkeeping on [`SessionState`]. The engine decides when to call
//! these and turns the results into events and screen changes.

use super::ambient::glitch_baseline;
use super::state::SessionState;
use crate::catalog::LevelDescriptor;
use crate::consts::{MAX_HEALTH, MAX_HINT_LEVEL};
use crate::tuning::Tuning;

impl SessionState {
    /// Per-level reset performed on every level start
    pub fn reset_for_level(&mut self, level: &LevelDescriptor, tuning: &Tuning) {
        self.current_level = level.id;
        self.health = tuning.level_health();
        self.time_remaining = level.time_limit;
        self.is_level_complete = false;
        self.failure_count = 0;
        self.hints_used = 0;
        self.timer_extensions = 0;
        self.hint_level = 0;
        self.show_hint = false;
        self.current_hint.clear();
        self.stealth_energy = tuning.max_stealth();
        self.player_hidden = false;
        self.enemies.clear();
        self.glitch_intensity = glitch_baseline(level.id);
    }

    /// Subtract health, saturating at zero. Returns true once health is gone.
    pub fn take_damage(&mut self, amount: u32, tuning: &Tuning) -> bool {
        self.health = self.health.saturating_sub(amount).min(MAX_HEALTH);
        self.glitch_intensity = (self.glitch_intensity + tuning.damage_glitch_bump).min(1.0);
        self.health == 0
    }

    pub fn record_failure(&mut self) {
        self.failure_count += 1;
    }

    pub fn hint_available(&self, tuning: &Tuning) -> bool {
        self.failure_count >= tuning.hint_failure_threshold
    }

    pub fn extension_available(&self, tuning: &Tuning) -> bool {
        self.failure_count >= tuning.extension_failure_threshold
            && self.time_remaining < tuning.extension_time_threshold
            && self.timer_extensions < tuning.max_timer_extensions
    }

    /// Seconds the next extension would add
    pub fn next_extension_secs(&self, tuning: &Tuning) -> u32 {
        if self.timer_extensions == 0 {
            tuning.first_extension_secs
        } else {
            tuning.later_extension_secs
        }
    }

    /// Record a shown hint and escalate. Returns the tier it was drawn from.
    pub fn record_hint(&mut self, text: String) -> u8 {
        let tier = self.hint_level.min(MAX_HINT_LEVEL);
        self.current_hint = text;
        self.show_hint = true;
        self.hints_used += 1;
        self.hint_level = (self.hint_level + 1).min(MAX_HINT_LEVEL);
        tier
    }

    /// Add time to the clock. Returns the seconds added.
    pub fn extend_timer(&mut self, tuning: &Tuning) -> u32 {
        let seconds = self.next_extension_secs(tuning);
        self.time_remaining += seconds;
        self.timer_extensions += 1;
        seconds
    }

    /// Hiding needs energy; coming out of hiding is always allowed
    pub fn can_hide(&self) -> bool {
        self.stealth_energy > 0
    }

    /// One stealth tick: drain while hidden, regenerate while visible.
    /// Returns true when the drain forced the player out of hiding.
    pub fn stealth_tick(&mut self, tuning: &Tuning) -> bool {
        if self.player_hidden {
            self.stealth_energy = self.stealth_energy.saturating_sub(tuning.stealth_drain);
            if self.stealth_energy == 0 {
                self.player_hidden = false;
                return true;
            }
        } else {
            self.stealth_energy = (self.stealth_energy + tuning.stealth_regen).min(tuning.max_stealth());
        }
        false
    }
}
