//! GhostFrame demo entry point
//!
//! Plays the whole campaign headlessly with the autoplay driver, logging every
//! event, then prints the final snapshot as JSON.
//!
//! Usage: `ghostframe [seed]` (set `RUST_LOG=debug` for per-move output and
//! `GHOSTFRAME_TUNING=path.json` to override balance).

use std::process::ExitCode;

use ghostframe::consts::FINAL_LEVEL;
use ghostframe::sim::{Engine, GameEvent, Screen, next_action};
use ghostframe::{GameError, Tuning};

/// Seed used when none is given on the command line
const DEFAULT_SEED: u64 = 0x6057_F4A3;
/// Virtual time between autoplay moves
const THINK_TIME_MS: u64 = 400;

fn main() -> ExitCode {
    env_logger::init();

    let seed = match std::env::args().nth(1).map(|arg| arg.parse::<u64>()) {
        None => DEFAULT_SEED,
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("Invalid seed: {e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("GhostFrame starting (seed {seed})");

    let mut engine = Engine::with_tuning(seed, Tuning::from_env());
    match play_campaign(&mut engine) {
        Ok(()) => {}
        Err(e) => {
            log::error!("Campaign aborted: {e}");
            return ExitCode::FAILURE;
        }
    }

    match engine.snapshot().to_json() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize snapshot: {e}");
            ExitCode::FAILURE
        }
    }
}

fn play_campaign(engine: &mut Engine) -> Result<(), GameError> {
    engine.start_session()?;
    report(engine);

    for id in 1..=FINAL_LEVEL {
        engine.select_level(id)?;
        report(engine);
        play_level(engine)?;

        while engine.state().screen == Screen::GameOver {
            log::warn!("Level {id} lost, retrying");
            engine.retry_level()?;
            play_level(engine)?;
        }
        if !engine.state().is_completed(id) {
            log::warn!("Level {id} left unfinished, stopping");
            break;
        }
    }
    Ok(())
}

/// Autoplay the current level, then let the completion grace play out
fn play_level(engine: &mut Engine) -> Result<(), GameError> {
    while engine.state().accepts_input() {
        let Some(action) = engine.puzzle().and_then(next_action) else {
            break;
        };
        if engine.submit_puzzle_action(&action)?.is_rejected() {
            log::warn!("Autoplay move {} was rejected", action.name());
        }
        engine.advance(THINK_TIME_MS);
        report(engine);
    }

    let grace = engine.tuning().completion_grace_ms;
    engine.advance(grace);
    report(engine);
    Ok(())
}

fn report(engine: &mut Engine) {
    for event in engine.drain_events() {
        match event {
            GameEvent::EnemiesMoved | GameEvent::GlitchPulse { .. } => {
                log::trace!("{event:?}")
            }
            GameEvent::LevelStarted { level } => log::info!("Entering level {level}"),
            GameEvent::LevelComplete { level } => log::info!("Level {level} cleared"),
            GameEvent::Escaped => log::info!("Escaped the simulation"),
            other => log::debug!("{other:?}"),
        }
    }
}
