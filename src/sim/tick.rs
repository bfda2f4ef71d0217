//! Virtual clock advance
//!
//! Fires every scheduled task that falls due inside the advanced window, in
//! time order. Game-ending tasks win: once the session leaves the game
//! screen nothing else fires in the same call.

use super::ambient::{move_enemies, ramp_glitch};
use super::engine::Engine;
use super::schedule::TaskKind;
use super::state::{GameEvent, Screen};
use crate::consts::FINAL_LEVEL;

impl Engine {
    /// Move the virtual clock forward by `elapsed_ms`, running due tasks
    pub fn advance(&mut self, elapsed_ms: u64) {
        let until = self.scheduler.now_ms() + elapsed_ms;
        let mut fired = false;

        while let Some(task) = self.scheduler.pop_due(until) {
            fired = true;
            self.run_task(task);
            if self.session.screen != Screen::Game {
                break;
            }
        }
        self.scheduler.settle(until);

        if fired {
            self.touch();
        }
    }

    fn run_task(&mut self, task: TaskKind) {
        log::trace!("{task:?} at {}ms", self.scheduler.now_ms());
        match task {
            TaskKind::Countdown => self.countdown(),
            TaskKind::CompletionGrace => self.leave_completed_level(),
            TaskKind::StealthTick => {
                if self.session.stealth_tick(&self.tuning) {
                    log::debug!("Stealth energy exhausted");
                    self.events.push(GameEvent::StealthChanged {
                        hidden: false,
                        energy: self.session.stealth_energy,
                    });
                }
            }
            TaskKind::EnemyMove => {
                move_enemies(
                    &mut self.session.enemies,
                    self.session.player_hidden,
                    &self.tuning,
                    &mut self.rng,
                );
                self.events.push(GameEvent::EnemiesMoved);
            }
            TaskKind::GlitchRamp => {
                let rate = self.session.level().corruption_rate;
                self.session.glitch_intensity = ramp_glitch(self.session.glitch_intensity, rate);
                self.events.push(GameEvent::GlitchPulse {
                    intensity: self.session.glitch_intensity,
                });
            }
        }
    }

    fn countdown(&mut self) {
        if self.session.time_remaining <= 1 {
            self.session.time_remaining = 0;
            self.events.push(GameEvent::TimeExpired);
            self.game_over("time expired");
        } else {
            self.session.time_remaining -= 1;
        }
    }

    fn leave_completed_level(&mut self) {
        if self.session.current_level == FINAL_LEVEL {
            log::info!("Final level cleared, escaping");
            self.set_screen(Screen::Escape);
            self.events.push(GameEvent::Escaped);
        } else {
            self.set_screen(Screen::LevelSelect);
        }
    }
}
