/// Observable phase of the turn sequencer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPhase {
    Idle,
    Processing,
}

/// Turn bookkeeping for one floor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Completed turns. Only ever incremented, by exactly one per turn.
    pub turn_number: u64,

    /// True only while a turn is in flight.
    pub processing: bool,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TurnPhase {
        if self.processing {
            TurnPhase::Processing
        } else {
            TurnPhase::Idle
        }
    }
}
