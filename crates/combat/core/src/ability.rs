//! Passive species abilities and their level scaling.
//!
//! Every numeric effect grows linearly with the ability level. Levels are
//! clamped to `1..=MAX_ABILITY_LEVEL`, so out-of-range data still resolves.

use crate::config::CombatConfig;
use crate::element::Element;
use crate::state::StatusKind;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityId {
    // ===== low-HP element boosts =====
    Torrent,
    Blaze,
    Overgrow,
    Swarm,

    Guts,

    // ===== reactive (owner is the defender) =====
    Static,
    FlameBody,

    // ===== evasion =====
    RunAway,
    Levitate,

    ShieldDust,
    NoGuard,
    Sturdy,
    SereneGrace,
}

impl AbilityId {
    /// HP fraction below which the element boosts activate.
    pub const LOW_HP_THRESHOLD: f64 = 0.33;

    /// Element boosted by Torrent and friends.
    pub const fn boosted_element(self) -> Option<Element> {
        match self {
            AbilityId::Torrent => Some(Element::Water),
            AbilityId::Blaze => Some(Element::Fire),
            AbilityId::Overgrow => Some(Element::Grass),
            AbilityId::Swarm => Some(Element::Bug),
            _ => None,
        }
    }

    /// Status a reactive ability inflicts on whoever hit its owner.
    pub const fn contact_status(self) -> Option<StatusKind> {
        match self {
            AbilityId::Static => Some(StatusKind::Paralyze),
            AbilityId::FlameBody => Some(StatusKind::Burn),
            _ => None,
        }
    }
}

/// Statuses that trigger Guts.
pub const GUTS_TRIGGERS: [StatusKind; 4] = [
    StatusKind::Burn,
    StatusKind::Paralyze,
    StatusKind::BadlyPoisoned,
    StatusKind::Cursed,
];

/// An ability together with its upgrade level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilitySlot {
    pub id: AbilityId,
    level: u8,
}

impl AbilitySlot {
    pub fn new(id: AbilityId, level: u8) -> Self {
        Self {
            id,
            level: clamp_level(level),
        }
    }

    /// Level in `1..=5`, even if the raw value came from unchecked data.
    pub fn level(&self) -> u8 {
        clamp_level(self.level)
    }
}

fn clamp_level(level: u8) -> u8 {
    level.clamp(1, CombatConfig::MAX_ABILITY_LEVEL)
}

fn steps(level: u8) -> u32 {
    u32::from(clamp_level(level) - 1)
}

/// ATK multiplier for the element boosts and Guts: 1.5 at level 1, +0.1 per level.
pub fn attack_boost(level: u8) -> f64 {
    1.5 + 0.1 * f64::from(steps(level))
}

/// Static / Flame Body trigger chance in percent: 30 at level 1, +5 per level.
pub fn contact_chance(level: u8) -> u32 {
    30 + 5 * steps(level)
}

/// Run Away dodge bonus in percent.
pub fn run_away_dodge(level: u8) -> u32 {
    10 + 2 * steps(level)
}

/// Levitate dodge bonus in percent.
pub fn levitate_dodge(level: u8) -> u32 {
    5 + 2 * steps(level)
}

/// Serene Grace effect-chance multiplier.
pub fn serene_grace_multiplier(level: u8) -> f64 {
    1.5 + 0.1 * f64::from(steps(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_clamped() {
        assert_eq!(AbilitySlot::new(AbilityId::Torrent, 0).level(), 1);
        assert_eq!(AbilitySlot::new(AbilityId::Torrent, 9).level(), 5);
        assert_eq!(contact_chance(0), 30);
        assert_eq!(contact_chance(200), 50);
    }

    #[test]
    fn scaling_tables() {
        assert!((attack_boost(1) - 1.5).abs() < 1e-9);
        assert!((attack_boost(5) - 1.9).abs() < 1e-9);
        assert_eq!(run_away_dodge(3), 14);
        assert_eq!(levitate_dodge(5), 13);
    }

    #[test]
    fn element_boosts_map_to_their_element() {
        assert_eq!(AbilityId::Torrent.boosted_element(), Some(Element::Water));
        assert_eq!(AbilityId::Swarm.boosted_element(), Some(Element::Bug));
        assert_eq!(AbilityId::Guts.boosted_element(), None);
    }
}
