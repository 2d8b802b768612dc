use crate::element::InvertedImmunity;
use crate::state::StatusKind;

/// Tunable combat constants.
///
/// Every field has a default, so a TOML file only needs to list the values it
/// overrides.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Damage multiplier for critical hits.
    pub crit_multiplier: f64,
    /// Percentage of received damage reflected by the Thorns enchantment.
    pub thorns_percent: u32,
    /// Upper bound for the cumulative dodge chance (percent).
    pub max_dodge_chance: u32,
    /// Player-only bonus when the attack element matches the weather.
    pub weather_synergy_multiplier: f64,
    /// Chance (percent) that Paralyze makes its holder lose the action.
    pub paralysis_skip_chance: u32,
    /// Damage multiplier applied to every hit during a Frenzy floor event.
    pub frenzy_multiplier: f64,
    /// How immunities behave while effectiveness is inverted.
    pub inverted_immunity: InvertedImmunity,
    pub chain: ChainConfig,
    pub durations: StatusDurations,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// One slot per status kind.
    pub const MAX_STATUS_EFFECTS: usize = 9;
    pub const MAX_ABILITY_LEVEL: u8 = 5;
    /// Upper bound for range lengths, area radii and knockback distances.
    pub const MAX_SKILL_REACH: u32 = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CRIT_MULTIPLIER: f64 = 1.5;
    pub const DEFAULT_THORNS_PERCENT: u32 = 10;
    pub const DEFAULT_MAX_DODGE_CHANCE: u32 = 75;
    pub const DEFAULT_WEATHER_SYNERGY: f64 = 1.1;
    pub const DEFAULT_PARALYSIS_SKIP_CHANCE: u32 = 25;
    pub const DEFAULT_FRENZY_MULTIPLIER: f64 = 1.25;

    pub fn new() -> Self {
        Self {
            crit_multiplier: Self::DEFAULT_CRIT_MULTIPLIER,
            thorns_percent: Self::DEFAULT_THORNS_PERCENT,
            max_dodge_chance: Self::DEFAULT_MAX_DODGE_CHANCE,
            weather_synergy_multiplier: Self::DEFAULT_WEATHER_SYNERGY,
            paralysis_skip_chance: Self::DEFAULT_PARALYSIS_SKIP_CHANCE,
            frenzy_multiplier: Self::DEFAULT_FRENZY_MULTIPLIER,
            inverted_immunity: InvertedImmunity::default(),
            chain: ChainConfig::default(),
            durations: StatusDurations::default(),
        }
    }

    pub fn with_inverted_immunity(mut self, policy: InvertedImmunity) -> Self {
        self.inverted_immunity = policy;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Score chain increments, cap and end-of-run tier table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChainConfig {
    pub effective_hit_increment: f64,
    pub critical_hit_increment: f64,
    pub defeat_increment: f64,
    pub cap: f64,
    /// Sorted ascending by threshold.
    pub tiers: Vec<ChainTier>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            effective_hit_increment: 0.25,
            critical_hit_increment: 0.10,
            defeat_increment: 0.15,
            cap: 5.0,
            tiers: vec![
                ChainTier::new(1.5, 100),
                ChainTier::new(2.0, 250),
                ChainTier::new(3.0, 600),
                ChainTier::new(4.0, 1200),
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChainTier {
    pub threshold: f64,
    pub bonus: u64,
}

impl ChainTier {
    pub const fn new(threshold: f64, bonus: u64) -> Self {
        Self { threshold, bonus }
    }
}

/// Default duration (in turns) for each status kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatusDurations {
    pub paralyze: u8,
    pub burn: u8,
    pub frozen: u8,
    pub badly_poisoned: u8,
    pub flinch: u8,
    pub drowsy: u8,
    pub cursed: u8,
    pub atk_up: u8,
    pub def_up: u8,
}

impl StatusDurations {
    /// Duration for `kind`, never below one turn.
    pub fn for_kind(&self, kind: StatusKind) -> u8 {
        let turns = match kind {
            StatusKind::Paralyze => self.paralyze,
            StatusKind::Burn => self.burn,
            StatusKind::Frozen => self.frozen,
            StatusKind::BadlyPoisoned => self.badly_poisoned,
            StatusKind::Flinch => self.flinch,
            StatusKind::Drowsy => self.drowsy,
            StatusKind::Cursed => self.cursed,
            StatusKind::AtkUp => self.atk_up,
            StatusKind::DefUp => self.def_up,
        };
        turns.max(1)
    }
}

impl Default for StatusDurations {
    fn default() -> Self {
        Self {
            paralyze: 3,
            burn: 4,
            frozen: 2,
            badly_poisoned: 5,
            flinch: 1,
            drowsy: 3,
            cursed: 5,
            atk_up: 5,
            def_up: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_is_raised_to_one_turn() {
        let durations = StatusDurations {
            flinch: 0,
            ..StatusDurations::default()
        };
        assert_eq!(durations.for_kind(StatusKind::Flinch), 1);
        assert_eq!(durations.for_kind(StatusKind::Burn), 4);
    }

    #[test]
    fn default_tiers_are_sorted() {
        let chain = ChainConfig::default();
        assert!(
            chain
                .tiers
                .windows(2)
                .all(|pair| pair[0].threshold < pair[1].threshold)
        );
    }
}
