//! Presentation seam awaited between logical steps.
//!
//! The runner mutates the battle state first and presents afterwards, so a
//! presenter can take as long as it likes without affecting any outcome.
use std::time::Duration;

use async_trait::async_trait;
use combat_core::{ActorTurn, EndOfTurn};

/// One applied step, handed to the presenter after the state changed.
#[derive(Clone, Copy, Debug)]
pub enum PresentationStep<'a> {
    /// The player's or an enemy's action (or its skip).
    Actor { turn: u64, actor_turn: &'a ActorTurn },
    /// Upkeep, expiries and removals of the finished turn.
    EndOfTurn(&'a EndOfTurn),
}

/// Trait for turning applied steps into animations, log lines or pauses.
///
/// Implementations might:
/// - Drive sprite tweens and damage popups
/// - Print a battle log
/// - Wait for the user before continuing
#[async_trait]
pub trait Presenter: Send + Sync {
    async fn present(&self, step: PresentationStep<'_>);
}

/// Presents nothing and returns immediately.
/// Useful for headless simulation and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

#[async_trait]
impl Presenter for NullPresenter {
    async fn present(&self, _step: PresentationStep<'_>) {}
}

/// Stands in for animation time with a fixed pause per step.
#[derive(Clone, Copy, Debug)]
pub struct DelayPresenter {
    delay: Duration,
}

impl DelayPresenter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Presenter for DelayPresenter {
    async fn present(&self, step: PresentationStep<'_>) {
        // Skips have nothing to animate.
        if let PresentationStep::Actor {
            actor_turn: ActorTurn::Skipped { .. },
            ..
        } = step
        {
            return;
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
