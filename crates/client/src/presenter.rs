//! Battle log presenter.
use std::time::Duration;

use async_trait::async_trait;
use combat_core::{ActorTurn, HitResult};
use combat_runtime::{DelayPresenter, PresentationStep, Presenter};

/// Writes one log line per applied step, then pauses like an animation would.
pub struct LogPresenter {
    pause: DelayPresenter,
}

impl LogPresenter {
    pub fn new(delay: Duration) -> Self {
        Self {
            pause: DelayPresenter::new(delay),
        }
    }
}

#[async_trait]
impl Presenter for LogPresenter {
    async fn present(&self, step: PresentationStep<'_>) {
        match step {
            PresentationStep::Actor {
                turn,
                actor_turn: ActorTurn::Skipped { actor, reason },
            } => {
                tracing::info!(turn, %actor, ?reason, "skipped");
            }
            PresentationStep::Actor {
                turn,
                actor_turn: ActorTurn::Acted(outcome),
            } => {
                tracing::info!(
                    turn,
                    actor = %outcome.actor,
                    action = %outcome.action,
                    resolution = ?outcome.resolution,
                    "acted"
                );
                for target in &outcome.targets {
                    match target.result {
                        HitResult::Hit => tracing::info!(
                            target = %target.target,
                            damage = target.damage,
                            tier = ?target.tier,
                            critical = target.critical,
                            effect = ?target.effect_applied,
                            defeated = target.defeated,
                            "target hit"
                        ),
                        other => tracing::info!(
                            target = %target.target,
                            result = %other,
                            "target missed"
                        ),
                    }
                }
            }
            PresentationStep::EndOfTurn(end) => {
                for tick in &end.upkeep {
                    tracing::info!(
                        entity = %tick.entity,
                        status = %tick.status,
                        damage = tick.damage,
                        "upkeep"
                    );
                }
                for expired in &end.expired {
                    tracing::info!(entity = %expired.entity, status = %expired.status, "expired");
                }
            }
        }

        self.pause.present(step).await;
    }
}
