//! Headless combat simulator.
//!
//! Loads an encounter from the content directory, lets a greedy policy play
//! the player against the default enemy behaviour and prints every turn
//! report as one JSON line on stdout. Logs go to stderr.
//!
//! ```bash
//! COMBAT_SEED=42 cargo run -p combat-sim -- training_grounds
//! ```
mod logging;
mod policy;
mod presenter;
mod session;

use anyhow::Result;
use combat_core::TurnOutcome;
use combat_runtime::{Event, EventBus, RuntimeConfig, Topic, TurnEvent};
use tokio::sync::broadcast::error::RecvError;

use crate::policy::GreedyPolicy;
use crate::session::Session;

const DEFAULT_ENCOUNTER: &str = "training_grounds";
const MAX_TURNS: u64 = 200;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    logging::setup_logging()?;

    let config = RuntimeConfig::from_env();
    let encounter = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ENCOUNTER.to_owned());

    let events = EventBus::with_capacity(config.event_buffer);
    watch_rejections(&events).await;

    let session = Session::load(&config, &encounter, events)?;
    let runner = &session.runner;
    let policy = GreedyPolicy::new(&session.skills);

    tracing::info!(encounter = %encounter, "simulation started");

    while !runner.is_finished().await && runner.turn_number() < MAX_TURNS {
        let state = runner.snapshot().await;
        let Some(player) = policy.choose(&state, &runner.oracles().terrain) else {
            break;
        };
        let enemies = runner.enemy_requests().await;

        match runner.execute_turn(&player, &enemies).await {
            TurnOutcome::Completed(report) => println!("{}", serde_json::to_string(&report)?),
            // Reported by the rejection watcher.
            TurnOutcome::Rejected(_) => {}
        }
    }

    let chain = runner.summarize_chain().await;
    let state = runner.snapshot().await;
    let result = if state.player_defeated() {
        "defeat"
    } else if state.roster.living_enemies().is_empty() {
        "victory"
    } else {
        "stalemate"
    };

    tracing::info!(
        result,
        turns = runner.turn_number(),
        bonus = chain.total_bonus_score,
        "simulation finished"
    );
    println!(
        "{}",
        serde_json::json!({
            "encounter": encounter,
            "result": result,
            "turns": runner.turn_number(),
            "chain": chain,
        })
    );

    Ok(())
}

/// Logs turn rejections published on the bus.
async fn watch_rejections(events: &EventBus) {
    let Some(mut turns) = events.subscribe(Topic::Turn).await else {
        return;
    };
    tokio::spawn(async move {
        loop {
            match turns.recv().await {
                Ok(Event::Turn(TurnEvent::Rejected { error })) => {
                    tracing::warn!(%error, "turn request ignored while processing");
                }
                Ok(_) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            }
        }
    });
}
