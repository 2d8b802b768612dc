//! Topic-based event bus for turn progress.
//!
//! Events are published after the state changed and are best-effort: a
//! slow or absent subscriber never holds up the turn.
use std::collections::HashMap;
use std::sync::Arc;

use combat_core::{ActorTurn, EndOfTurn, TurnError};
use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, broadcast};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Turn lifecycle (start, end, rejection)
    Turn,
    /// Individual actor steps
    Action,
}

/// Turn lifecycle events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TurnEvent {
    Started { turn: u64 },
    Ended { turn: u64, end: EndOfTurn },
    /// A turn was requested while another one was processing.
    Rejected { error: TurnError },
}

/// One actor's step within a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEvent {
    pub turn: u64,
    pub actor_turn: ActorTurn,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Turn(TurnEvent),
    Action(ActionEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Turn(_) => Topic::Turn,
            Event::Action(_) => Topic::Action,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about.
pub struct EventBus {
    channels: Arc<RwLock<HashMap<Topic, broadcast::Sender<Event>>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let channels = [Topic::Turn, Topic::Action]
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity).0))
            .collect();

        Self {
            channels: Arc::new(RwLock::new(channels)),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();

        // Events are best-effort: skip on contention instead of blocking.
        match self.channels.try_read() {
            Ok(channels) => {
                if let Some(tx) = channels.get(&topic)
                    && tx.send(event).is_err()
                {
                    tracing::trace!("No subscribers for topic {:?}", topic);
                }
            }
            Err(_) => {
                tracing::debug!("Failed to acquire event bus lock for topic {:?}", topic);
            }
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns `None` if the topic has no channel.
    pub async fn subscribe(&self, topic: Topic) -> Option<broadcast::Receiver<Event>> {
        let channels = self.channels.read().await;
        channels.get(&topic).map(broadcast::Sender::subscribe)
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
