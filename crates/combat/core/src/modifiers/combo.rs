//! Short-lived combo states granted to the player by external systems.
//!
//! The damage and crit flags are single-use: they are consumed after the
//! player's next resolved action, however many targets it hit. Shadow Dance
//! instead lasts a number of turns and makes the player untouchable.

use bitflags::bitflags;

bitflags! {
    /// Single-use combo flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ComboFlags: u8 {
        /// Damage ×2.
        const DOUBLE_DAMAGE   = 1 << 0;
        const GUARANTEED_CRIT = 1 << 1;
        /// Damage ×3. Takes priority over DOUBLE_DAMAGE.
        const DRAGONS_RAGE    = 1 << 2;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComboState {
    pub flags: ComboFlags,
    /// Remaining turns of guaranteed dodge for the player.
    pub shadow_dance_turns: u8,
}

impl ComboState {
    pub const DOUBLE_DAMAGE_MULTIPLIER: f64 = 2.0;
    pub const DRAGONS_RAGE_MULTIPLIER: f64 = 3.0;

    pub fn grant(&mut self, flags: ComboFlags) {
        self.flags.insert(flags);
    }

    pub fn grant_shadow_dance(&mut self, turns: u8) {
        self.shadow_dance_turns = self.shadow_dance_turns.max(turns);
    }

    pub fn shadow_dance_active(&self) -> bool {
        self.shadow_dance_turns > 0
    }

    pub fn guaranteed_crit(&self) -> bool {
        self.flags.contains(ComboFlags::GUARANTEED_CRIT)
    }

    /// Damage multiplier from the strongest active damage flag.
    pub fn damage_multiplier(&self) -> f64 {
        if self.flags.contains(ComboFlags::DRAGONS_RAGE) {
            Self::DRAGONS_RAGE_MULTIPLIER
        } else if self.flags.contains(ComboFlags::DOUBLE_DAMAGE) {
            Self::DOUBLE_DAMAGE_MULTIPLIER
        } else {
            1.0
        }
    }

    /// Clears every single-use flag and returns what was cleared.
    pub fn consume(&mut self) -> ComboFlags {
        std::mem::take(&mut self.flags)
    }

    /// Counts Shadow Dance down by one turn.
    pub fn end_turn(&mut self) {
        self.shadow_dance_turns = self.shadow_dance_turns.saturating_sub(1);
    }
}
