//! Session state machine
//!
//! [`Engine`] owns the session, the live puzzle, the seeded RNG and the
//! scheduler. Every player command goes through one of its methods; timed
//! behavior is driven by [`Engine::advance`] (see `tick.rs`).
//!
//! Commands that fail return a [`GameError`] and leave the state untouched.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde_json::Value;

use super::ambient::spawn_enemies;
use super::puzzle::{PuzzleAction, PuzzleState, Verdict};
use super::schedule::{Scheduler, TaskKind};
use super::state::{GameEvent, Screen, SessionState, Snapshot};
use crate::catalog::get_level;
use crate::error::{Assist, GameError};
use crate::hints::hint_for;
use crate::tuning::Tuning;

pub struct Engine {
    pub(super) session: SessionState,
    pub(super) puzzle: Option<PuzzleState>,
    pub(super) tuning: Tuning,
    pub(super) rng: Pcg32,
    pub(super) scheduler: Scheduler,
    pub(super) events: Vec<GameEvent>,
    seed: u64,
    revision: u64,
    next_enemy_id: u32,
}

impl Engine {
    /// Create an engine on the intro screen with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            session: SessionState::new(&tuning),
            puzzle: None,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            scheduler: Scheduler::new(),
            events: Vec::new(),
            seed,
            revision: 0,
            next_enemy_id: 1,
        }
    }

    // === Read-only views ===

    pub fn state(&self) -> &SessionState {
        &self.session
    }

    /// Live puzzle, present while a level is on screen
    pub fn puzzle(&self) -> Option<&PuzzleState> {
        self.puzzle.as_ref()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            revision: self.revision,
            clock_ms: self.scheduler.now_ms(),
            session: self.session.clone(),
            puzzle: self.puzzle.clone(),
        }
    }

    /// Whether the hint button should be shown
    pub fn hint_available(&self) -> bool {
        self.session.hint_available(&self.tuning)
    }

    /// Whether the timer extension button should be shown
    pub fn extension_available(&self) -> bool {
        self.session.extension_available(&self.tuning)
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Screen flow ===

    pub fn start_session(&mut self) -> Result<(), GameError> {
        self.expect_screen("start_session", &[Screen::Intro])?;
        log::info!("Session started (seed {})", self.seed);
        self.set_screen(Screen::LevelSelect);
        self.touch();
        Ok(())
    }

    pub fn return_to_intro(&mut self) -> Result<(), GameError> {
        self.expect_screen("return_to_intro", &[Screen::LevelSelect])?;
        self.set_screen(Screen::Intro);
        self.touch();
        Ok(())
    }

    /// Enter a level from the level select screen. Locked and out-of-range
    /// ids are refused.
    pub fn select_level(&mut self, id: u8) -> Result<(), GameError> {
        self.expect_screen("select_level", &[Screen::LevelSelect])?;
        if !self.session.is_unlocked(id) {
            return Err(GameError::InvalidLevelSelection(id));
        }
        self.start_level(id)
    }

    /// Replay the level that was just lost
    pub fn retry_level(&mut self) -> Result<(), GameError> {
        self.expect_screen("retry_level", &[Screen::GameOver])?;
        self.start_level(self.session.current_level)
    }

    /// Wipe all progress after escaping and return to the intro
    pub fn restart_session(&mut self) -> Result<(), GameError> {
        self.expect_screen("restart_session", &[Screen::Escape])?;
        log::info!("Session restarted");
        self.scheduler.clear();
        self.puzzle = None;
        self.session = SessionState::new(&self.tuning);
        self.events.push(GameEvent::ScreenChanged {
            from: Screen::Escape,
            to: Screen::Intro,
        });
        self.touch();
        Ok(())
    }

    pub fn abort_to_level_select(&mut self) -> Result<(), GameError> {
        self.expect_screen("abort_to_level_select", &[Screen::Game, Screen::GameOver])?;
        log::info!("Left level {}", self.session.current_level);
        self.set_screen(Screen::LevelSelect);
        self.touch();
        Ok(())
    }

    // === Assists ===

    pub fn toggle_hidden(&mut self) -> Result<bool, GameError> {
        self.expect_screen("toggle_hidden", &[Screen::Game])?;
        let hidden = !self.session.player_hidden;
        if hidden && !self.session.can_hide() {
            return Err(GameError::Unavailable(Assist::Stealth));
        }
        self.session.player_hidden = hidden;
        self.events.push(GameEvent::StealthChanged {
            hidden,
            energy: self.session.stealth_energy,
        });
        self.touch();
        Ok(hidden)
    }

    /// Show the next hint tier. Returns the hint text.
    pub fn request_hint(&mut self) -> Result<String, GameError> {
        let puzzle = self.active_puzzle("request_hint")?;
        if !self.hint_available() {
            return Err(GameError::Unavailable(Assist::Hint));
        }
        let text = hint_for(puzzle, self.session.hint_level);
        let tier = self.session.record_hint(text.clone());
        log::debug!("Hint tier {tier}: {text}");
        self.events.push(GameEvent::HintShown {
            tier,
            text: text.clone(),
        });
        self.touch();
        Ok(text)
    }

    pub fn dismiss_hint(&mut self) -> Result<(), GameError> {
        self.expect_screen("dismiss_hint", &[Screen::Game])?;
        self.session.show_hint = false;
        self.touch();
        Ok(())
    }

    /// Add time to the level clock. Returns the seconds added.
    pub fn request_timer_extension(&mut self) -> Result<u32, GameError> {
        self.active_puzzle("request_timer_extension")?;
        if !self.extension_available() {
            return Err(GameError::Unavailable(Assist::TimerExtension));
        }
        let seconds = self.session.extend_timer(&self.tuning);
        log::debug!("Timer extended by {seconds}s");
        self.events.push(GameEvent::TimerExtended {
            seconds,
            time_remaining: self.session.time_remaining,
        });
        self.touch();
        Ok(seconds)
    }

    // === Puzzle input ===

    /// Route a typed action into the live puzzle and apply the economy
    pub fn submit_puzzle_action(&mut self, action: &PuzzleAction) -> Result<Verdict, GameError> {
        self.active_puzzle("submit_puzzle_action")?;
        let Some(puzzle) = self.puzzle.as_mut() else {
            return Err(GameError::PuzzleInactive);
        };
        let verdict = puzzle.apply(action)?;
        log::debug!("{} -> {verdict:?}", action.name());

        match verdict {
            Verdict::Pending => self.events.push(GameEvent::PuzzleProgress {
                action: action.name().to_string(),
            }),
            Verdict::Solved => self.complete_level(),
            Verdict::Rejected { penalty, reason } => {
                self.session.record_failure();
                self.events.push(GameEvent::ActionRejected { penalty, reason });
                self.damage(penalty);
            }
        }
        self.touch();
        Ok(verdict)
    }

    /// Generic `(name, payload)` entry point for presentation layers
    pub fn submit_named_action(
        &mut self,
        name: &str,
        payload: Option<&Value>,
    ) -> Result<Verdict, GameError> {
        let kind = self.active_puzzle("submit_named_action")?.kind();
        let action = PuzzleAction::from_named(name, payload)
            .ok_or_else(|| GameError::invalid_action(name, kind))?;
        self.submit_puzzle_action(&action)
    }

    // === Internals ===

    fn expect_screen(&self, command: &'static str, allowed: &[Screen]) -> Result<(), GameError> {
        if allowed.contains(&self.session.screen) {
            Ok(())
        } else {
            Err(GameError::WrongScreen {
                command,
                screen: self.session.screen,
            })
        }
    }

    /// The puzzle, if one is currently accepting input
    fn active_puzzle(&self, command: &'static str) -> Result<&PuzzleState, GameError> {
        self.expect_screen(command, &[Screen::Game])?;
        match &self.puzzle {
            Some(puzzle) if self.session.accepts_input() => Ok(puzzle),
            _ => Err(GameError::PuzzleInactive),
        }
    }

    pub(super) fn touch(&mut self) {
        self.revision += 1;
    }

    /// Change screens. Leaving the game screen stops every level task and
    /// clears the level's transient entities.
    pub(super) fn set_screen(&mut self, to: Screen) {
        let from = self.session.screen;
        if from == to {
            return;
        }
        if from == Screen::Game {
            self.scheduler.clear();
            self.session.enemies.clear();
            self.session.player_hidden = false;
            self.session.show_hint = false;
            if to != Screen::GameOver {
                self.puzzle = None;
            }
        }
        // A lost level keeps its puzzle only until the player retries or leaves
        if from == Screen::GameOver && to != Screen::Game {
            self.puzzle = None;
        }
        self.session.screen = to;
        self.events.push(GameEvent::ScreenChanged { from, to });
    }

    fn start_level(&mut self, id: u8) -> Result<(), GameError> {
        let level = get_level(id)?;
        self.session.reset_for_level(level, &self.tuning);
        self.puzzle = Some(PuzzleState::new(level, &mut self.rng));
        self.session.enemies = spawn_enemies(level, self.next_enemy_id, &mut self.rng);
        self.next_enemy_id += u32::from(level.enemy_count);
        self.set_screen(Screen::Game);

        self.scheduler.clear();
        self.scheduler
            .every(TaskKind::Countdown, self.tuning.countdown_interval_ms);
        self.scheduler
            .every(TaskKind::StealthTick, self.tuning.stealth_tick_ms);
        self.scheduler
            .every(TaskKind::EnemyMove, self.tuning.enemy_interval_ms(id));
        self.scheduler
            .every(TaskKind::GlitchRamp, self.tuning.glitch_interval_ms);

        log::info!(
            "Level {} ({}) started: {} puzzle, {}s",
            level.id,
            level.name,
            level.puzzle,
            level.time_limit
        );
        self.events.push(GameEvent::LevelStarted { level: id });
        self.touch();
        Ok(())
    }

    fn complete_level(&mut self) {
        let level = self.session.level();
        let id = level.id;
        self.session.is_level_complete = true;
        self.session.level_progress[level.index()] = true;
        self.session.solved_puzzles += 1;
        self.scheduler.cancel_periodic();
        self.scheduler
            .once(TaskKind::CompletionGrace, self.tuning.completion_grace_ms);
        log::info!("Level {id} complete");
        self.events.push(GameEvent::LevelComplete { level: id });
    }

    /// Apply damage; reaching zero health ends the level immediately
    pub(super) fn damage(&mut self, amount: u32) {
        let dead = self.session.take_damage(amount, &self.tuning);
        self.events.push(GameEvent::Damaged {
            amount,
            health: self.session.health,
        });
        if dead {
            self.game_over("health depleted");
        }
    }

    pub(super) fn game_over(&mut self, cause: &str) {
        log::info!("Game over on level {}: {cause}", self.session.current_level);
        self.set_screen(Screen::GameOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::puzzle::RejectReason;
    use serde_json::json;

    fn in_level(id: u8) -> Engine {
        let mut engine = Engine::new(42);
        engine.start_session().unwrap();
        for done in 0..usize::from(id) - 1 {
            engine.session.level_progress[done] = true;
        }
        engine.select_level(id).unwrap();
        engine
    }

    fn answer(id: u32, output: bool) -> PuzzleAction {
        PuzzleAction::AnswerGate { id, output }
    }

    #[test]
    fn test_screen_flow() {
        let mut engine = Engine::new(1);
        assert_eq!(engine.state().screen, Screen::Intro);
        engine.start_session().unwrap();
        assert_eq!(engine.state().screen, Screen::LevelSelect);
        engine.return_to_intro().unwrap();
        assert_eq!(engine.state().screen, Screen::Intro);
        assert_eq!(
            engine.select_level(1),
            Err(GameError::WrongScreen {
                command: "select_level",
                screen: Screen::Intro
            })
        );
    }

    #[test]
    fn test_locked_level_refused() {
        let mut engine = Engine::new(1);
        engine.start_session().unwrap();
        let before = engine.snapshot();
        assert_eq!(engine.select_level(2), Err(GameError::InvalidLevelSelection(2)));
        assert_eq!(engine.select_level(0), Err(GameError::InvalidLevelSelection(0)));
        assert_eq!(engine.select_level(16), Err(GameError::InvalidLevelSelection(16)));
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_level_start_sets_up_everything() {
        let engine = in_level(4);
        let state = engine.state();
        assert_eq!(state.screen, Screen::Game);
        assert_eq!(state.current_level, 4);
        assert_eq!(state.time_remaining, 90);
        assert_eq!(state.enemies.len(), 4);
        assert_eq!(
            engine.puzzle().map(PuzzleState::kind),
            Some(crate::catalog::PuzzleKind::AlgorithmReconstruction)
        );
        for kind in [
            TaskKind::Countdown,
            TaskKind::StealthTick,
            TaskKind::EnemyMove,
            TaskKind::GlitchRamp,
        ] {
            assert!(engine.scheduler.is_scheduled(kind));
        }
    }

    #[test]
    fn test_rejection_costs_health_and_failure() {
        let mut engine = in_level(2);
        engine.drain_events();
        let verdict = engine.submit_puzzle_action(&answer(1, true)).unwrap();
        assert_eq!(verdict, Verdict::reject(15, RejectReason::WrongOutput));
        assert_eq!(engine.state().health, 85);
        assert_eq!(engine.state().failure_count, 1);
        assert_eq!(
            engine.drain_events(),
            [
                GameEvent::ActionRejected {
                    penalty: 15,
                    reason: RejectReason::WrongOutput
                },
                GameEvent::Damaged {
                    amount: 15,
                    health: 85
                },
            ]
        );
    }

    #[test]
    fn test_invalid_action_changes_nothing() {
        let mut engine = in_level(2);
        let before = engine.snapshot();
        assert!(matches!(
            engine.submit_puzzle_action(&answer(9, true)),
            Err(GameError::InvalidPuzzleAction { .. })
        ));
        assert!(matches!(
            engine.submit_named_action("teleport", None),
            Err(GameError::InvalidPuzzleAction { .. })
        ));
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_health_zero_ends_level() {
        let mut engine = in_level(5);
        for _ in 0..3 {
            engine
                .submit_puzzle_action(&PuzzleAction::Command("reboot".into()))
                .unwrap();
        }
        assert_eq!(engine.state().health, 25);
        engine
            .submit_puzzle_action(&PuzzleAction::Command("reboot".into()))
            .unwrap();
        assert_eq!(engine.state().health, 0);
        assert_eq!(engine.state().screen, Screen::GameOver);
        assert!(engine.scheduler.is_idle());
        assert!(engine.state().enemies.is_empty());

        engine.retry_level().unwrap();
        assert_eq!(engine.state().screen, Screen::Game);
        assert_eq!(engine.state().health, 100);
        assert_eq!(engine.state().failure_count, 0);
    }

    #[test]
    fn test_solve_marks_progress() {
        let mut engine = in_level(2);
        for (id, output) in [(1, false), (2, true), (3, false)] {
            assert_eq!(
                engine.submit_puzzle_action(&answer(id, output)),
                Ok(Verdict::Pending)
            );
        }
        assert_eq!(engine.submit_puzzle_action(&answer(4, false)), Ok(Verdict::Solved));
        let state = engine.state();
        assert!(state.is_level_complete);
        assert!(state.level_progress[1]);
        assert!(state.is_completed(2));
        assert!(state.is_unlocked(3));
        assert_eq!(state.solved_puzzles, 1);
        assert!(engine.scheduler.is_scheduled(TaskKind::CompletionGrace));
        assert!(!engine.scheduler.is_scheduled(TaskKind::Countdown));
        assert_eq!(
            engine.submit_puzzle_action(&answer(1, false)),
            Err(GameError::PuzzleInactive)
        );
    }

    #[test]
    fn test_named_actions_route() {
        let mut engine = in_level(7);
        assert_eq!(
            engine.submit_named_action("move", Some(&json!("C"))),
            Ok(Verdict::Pending)
        );
        assert_eq!(
            engine.submit_named_action("move", Some(&json!("F"))),
            Ok(Verdict::Solved)
        );
    }

    #[test]
    fn test_hint_gating_and_escalation() {
        let mut engine = in_level(2);
        assert_eq!(engine.request_hint(), Err(GameError::Unavailable(Assist::Hint)));
        for _ in 0..3 {
            engine.submit_puzzle_action(&answer(3, true)).unwrap();
        }
        assert!(engine.hint_available());
        let first = engine.request_hint().unwrap();
        assert!(first.starts_with("💡 Remember basic logic"));
        let second = engine.request_hint().unwrap();
        assert!(second.starts_with("🔍 Gate 1 is still unsolved (0 of 4 answered)"));
        assert_eq!(engine.state().hints_used, 2);
        assert!(engine.state().show_hint);
        engine.dismiss_hint().unwrap();
        assert!(!engine.state().show_hint);
        assert_eq!(engine.state().current_hint, second);
    }

    #[test]
    fn test_extension_gating() {
        let mut engine = in_level(1);
        assert_eq!(
            engine.request_timer_extension(),
            Err(GameError::Unavailable(Assist::TimerExtension))
        );
        engine.submit_puzzle_action(&PuzzleAction::Check).unwrap();
        engine.submit_puzzle_action(&PuzzleAction::Check).unwrap();
        engine.session.time_remaining = 20;
        assert_eq!(engine.request_timer_extension(), Ok(60));
        assert_eq!(engine.state().time_remaining, 80);
    }

    #[test]
    fn test_stealth_toggle() {
        let mut engine = in_level(1);
        assert_eq!(engine.toggle_hidden(), Ok(true));
        assert_eq!(engine.toggle_hidden(), Ok(false));
        engine.session.stealth_energy = 0;
        assert_eq!(engine.toggle_hidden(), Err(GameError::Unavailable(Assist::Stealth)));
    }

    #[test]
    fn test_abort_clears_level() {
        let mut engine = in_level(3);
        engine.abort_to_level_select().unwrap();
        assert_eq!(engine.state().screen, Screen::LevelSelect);
        assert!(engine.puzzle().is_none());
        assert!(engine.scheduler.is_idle());
        assert!(engine.state().enemies.is_empty());
    }

    #[test]
    fn test_leaving_game_over_drops_puzzle() {
        let mut engine = in_level(5);
        for _ in 0..4 {
            engine
                .submit_puzzle_action(&PuzzleAction::Command("reboot".into()))
                .unwrap();
        }
        assert_eq!(engine.state().screen, Screen::GameOver);
        assert!(engine.puzzle().is_some());

        engine.abort_to_level_select().unwrap();
        assert_eq!(engine.state().screen, Screen::LevelSelect);
        assert!(engine.puzzle().is_none());
        assert!(engine.snapshot().puzzle.is_none());
    }

    #[test]
    fn test_revision_tracks_mutations() {
        let mut engine = Engine::new(1);
        assert_eq!(engine.revision(), 0);
        engine.start_session().unwrap();
        assert_eq!(engine.revision(), 1);
        let _ = engine.return_to_intro();
        let _ = engine.return_to_intro();
        assert_eq!(engine.revision(), 2);
    }
}
