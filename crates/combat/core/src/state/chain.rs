//! Run-wide score chain.
//!
//! The chain multiplier grows with player achievements and drops back to 1.0
//! the moment the player takes damage. Only the peak matters for scoring:
//! [`ScoreChain::summarize`] turns `max_chain_reached` into a bonus once, at the
//! end of the run.

use crate::config::{ChainConfig, ChainTier};

/// Player achievement that extends the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChainAction {
    /// Hit with effectiveness of at least 2.0.
    EffectiveHit,
    CriticalHit,
    Defeat,
}

impl ChainAction {
    pub fn increment(self, config: &ChainConfig) -> f64 {
        match self {
            ChainAction::EffectiveHit => config.effective_hit_increment,
            ChainAction::CriticalHit => config.critical_hit_increment,
            ChainAction::Defeat => config.defeat_increment,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreChain {
    /// Never below 1.0.
    pub current_multiplier: f64,
    pub total_bonus_score: u64,
    pub max_chain_reached: f64,
}

impl ScoreChain {
    pub const BASE_MULTIPLIER: f64 = 1.0;

    pub fn new() -> Self {
        Self {
            current_multiplier: Self::BASE_MULTIPLIER,
            total_bonus_score: 0,
            max_chain_reached: Self::BASE_MULTIPLIER,
        }
    }

    /// Extends the chain by the increment for `action` plus `talent_bonus`,
    /// never past the configured cap. Returns the new multiplier.
    pub fn add_chain_action(
        &mut self,
        action: ChainAction,
        config: &ChainConfig,
        talent_bonus: f64,
    ) -> f64 {
        let increment = (action.increment(config) + talent_bonus).max(0.0);
        let cap = config.cap.max(Self::BASE_MULTIPLIER);

        self.current_multiplier = (self.current_multiplier + increment).min(cap);
        if self.current_multiplier > self.max_chain_reached {
            self.max_chain_reached = self.current_multiplier;
        }

        tracing::debug!(
            action = %action,
            multiplier = self.current_multiplier,
            peak = self.max_chain_reached,
            "chain extended"
        );
        self.current_multiplier
    }

    /// Drops the multiplier back to 1.0. Peak and banked score are untouched.
    pub fn reset_chain(&mut self) {
        if self.current_multiplier > Self::BASE_MULTIPLIER {
            tracing::debug!(from = self.current_multiplier, "chain reset");
        }
        self.current_multiplier = Self::BASE_MULTIPLIER;
    }

    /// Highest tier whose threshold the peak multiplier reached.
    pub fn tier<'c>(&self, config: &'c ChainConfig) -> Option<&'c ChainTier> {
        config
            .tiers
            .iter()
            .filter(|tier| self.max_chain_reached >= tier.threshold)
            .max_by(|a, b| a.threshold.total_cmp(&b.threshold))
    }

    /// Computes the end-of-run bonus from the peak tier and stores it in
    /// `total_bonus_score`. Calling it again yields the same value.
    pub fn summarize(&mut self, config: &ChainConfig) -> u64 {
        self.total_bonus_score = self.tier(config).map_or(0, |tier| tier.bonus);
        self.total_bonus_score
    }
}

impl Default for ScoreChain {
    fn default() -> Self {
        Self::new()
    }
}
