//! Read-only meta-progression snapshot handed to every resolution.
//!
//! The host builds a [`Loadout`] from its save data; combat never writes back.
//! Every field defaults to "no contribution".

use std::collections::BTreeMap;

use crate::element::Element;

/// Weapon enchantment carried by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Enchantment {
    /// Reflects part of the damage the player takes.
    Thorns,
    /// Life-steal on damage dealt.
    Vampiric,
    /// Extra critical chance.
    Keen,
}

impl Enchantment {
    pub const VAMPIRIC_LIFE_STEAL: u32 = 15;
    pub const KEEN_CRIT_CHANCE: u32 = 5;
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Relic {
    pub name: String,
    pub atk_percent: u32,
    pub def_percent: u32,
    pub crit_chance: u32,
    pub life_steal_percent: u32,
    /// Applied only when effectiveness is at least 2.0.
    pub type_advantage_multiplier: f64,
}

impl Default for Relic {
    fn default() -> Self {
        Self {
            name: String::new(),
            atk_percent: 0,
            def_percent: 0,
            crit_chance: 0,
            life_steal_percent: 0,
            type_advantage_multiplier: 1.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Blessing {
    pub name: String,
    pub atk_percent: u32,
    pub def_percent: u32,
    pub dodge_chance: u32,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TalentKind {
    /// +1 flat ATK per rank.
    Brawn,
    /// +1 flat DEF per rank.
    Bulwark,
    /// +0.05 chain increment per rank.
    ChainMaster,
    /// +2% crit chance per rank.
    KeenEye,
}

/// Unlocked talent ranks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Talents {
    ranks: BTreeMap<TalentKind, u8>,
}

impl Talents {
    pub const CHAIN_MASTER_STEP: f64 = 0.05;
    pub const KEEN_EYE_STEP: u32 = 2;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rank(mut self, kind: TalentKind, rank: u8) -> Self {
        self.ranks.insert(kind, rank);
        self
    }

    /// Rank of `kind`; unknown talents count as rank 0.
    pub fn rank(&self, kind: TalentKind) -> u8 {
        self.ranks.get(&kind).copied().unwrap_or(0)
    }

    pub fn flat_attack(&self) -> u32 {
        u32::from(self.rank(TalentKind::Brawn))
    }

    pub fn flat_defense(&self) -> u32 {
        u32::from(self.rank(TalentKind::Bulwark))
    }

    pub fn chain_bonus(&self) -> f64 {
        Self::CHAIN_MASTER_STEP * f64::from(self.rank(TalentKind::ChainMaster))
    }

    pub fn crit_chance(&self) -> u32 {
        Self::KEEN_EYE_STEP * u32::from(self.rank(TalentKind::KeenEye))
    }
}

/// Damage scaling for hits that land on the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Difficulty {
    pub enemy_damage_percent: u32,
    /// New Game+ level; each level adds 10% enemy damage.
    pub ng_plus: u32,
}

impl Difficulty {
    pub const NG_PLUS_STEP_PERCENT: u32 = 10;

    pub fn multiplier(&self) -> f64 {
        let base = f64::from(self.enemy_damage_percent) / 100.0;
        let ng = 1.0 + f64::from(Self::NG_PLUS_STEP_PERCENT * self.ng_plus) / 100.0;
        base * ng
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            enemy_damage_percent: 100,
            ng_plus: 0,
        }
    }
}

/// Same-element damage gem.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeGem {
    pub element: Element,
    pub multiplier: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementBoost {
    pub element: Element,
    pub multiplier: f64,
}

/// Item carried by a single combatant (either side).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeldItem {
    pub name: String,
    pub atk_bonus: u32,
    pub def_bonus: u32,
    pub crit_chance: u32,
    pub dodge_chance: u32,
    pub element_boost: Option<ElementBoost>,
}

/// Player-side modifier sources for one run.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Loadout {
    pub enchantment: Option<Enchantment>,
    pub relics: Vec<Relic>,
    pub blessings: Vec<Blessing>,
    pub talents: Talents,
    pub difficulty: Difficulty,
    pub type_gem: Option<TypeGem>,
}

impl Loadout {
    pub fn has_enchantment(&self, enchantment: Enchantment) -> bool {
        self.enchantment == Some(enchantment)
    }

    pub fn relic_atk_percent(&self) -> u32 {
        self.relics.iter().map(|r| r.atk_percent).sum()
    }

    pub fn relic_def_percent(&self) -> u32 {
        self.relics.iter().map(|r| r.def_percent).sum()
    }

    pub fn blessing_atk_percent(&self) -> u32 {
        self.blessings.iter().map(|b| b.atk_percent).sum()
    }

    pub fn blessing_def_percent(&self) -> u32 {
        self.blessings.iter().map(|b| b.def_percent).sum()
    }

    pub fn blessing_dodge(&self) -> u32 {
        self.blessings.iter().map(|b| b.dodge_chance).sum()
    }

    pub fn relic_crit_chance(&self) -> u32 {
        self.relics.iter().map(|r| r.crit_chance).sum()
    }

    /// Relic life-steal plus the Vampiric enchantment, in percent.
    pub fn life_steal_percent(&self) -> u32 {
        let relics: u32 = self.relics.iter().map(|r| r.life_steal_percent).sum();
        if self.has_enchantment(Enchantment::Vampiric) {
            relics + Enchantment::VAMPIRIC_LIFE_STEAL
        } else {
            relics
        }
    }

    /// Product of all type-advantage relics.
    pub fn type_advantage_multiplier(&self) -> f64 {
        self.relics
            .iter()
            .map(|r| r.type_advantage_multiplier)
            .filter(|m| *m > 0.0)
            .product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_stacks_ng_plus() {
        let difficulty = Difficulty {
            enemy_damage_percent: 150,
            ng_plus: 2,
        };
        assert!((difficulty.multiplier() - 1.8).abs() < 1e-9);
        assert_eq!(Difficulty::default().multiplier(), 1.0);
    }

    #[test]
    fn vampiric_adds_to_relic_life_steal() {
        let loadout = Loadout {
            enchantment: Some(Enchantment::Vampiric),
            relics: vec![Relic {
                life_steal_percent: 5,
                ..Relic::default()
            }],
            ..Loadout::default()
        };
        assert_eq!(loadout.life_steal_percent(), 20);
    }

    #[test]
    fn missing_talents_are_rank_zero() {
        let talents = Talents::new().with_rank(TalentKind::KeenEye, 3);
        assert_eq!(talents.crit_chance(), 6);
        assert_eq!(talents.flat_attack(), 0);
        assert_eq!(talents.chain_bonus(), 0.0);
    }

    #[test]
    fn empty_loadout_is_neutral() {
        let loadout = Loadout::default();
        assert_eq!(loadout.type_advantage_multiplier(), 1.0);
        assert_eq!(loadout.life_steal_percent(), 0);
    }
}
