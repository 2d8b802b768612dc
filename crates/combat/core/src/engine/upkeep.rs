//! Per-turn status consequences: action gating before an actor acts and
//! damage-over-time at the end of the turn.

use crate::combat::fraction_of_max;
use crate::config::CombatConfig;
use crate::env::RollStream;
use crate::state::{Combatant, EntityId, StatusEffect, StatusKind};

/// Damage one status dealt during upkeep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpkeepTick {
    pub entity: EntityId,
    pub status: StatusKind,
    pub damage: u32,
}

/// Status that makes `combatant` lose its action this turn, if any.
///
/// Frozen, Flinch and Drowsy always skip. Paralyze skips with
/// `config.paralysis_skip_chance`; that roll is the only one drawn here.
pub fn action_gate(
    combatant: &Combatant,
    config: &CombatConfig,
    rolls: &mut RollStream<'_>,
) -> Option<StatusKind> {
    if let Some(kind) = combatant.statuses.kinds().find(|kind| kind.prevents_action()) {
        return Some(kind);
    }

    (combatant.statuses.has(StatusKind::Paralyze)
        && rolls.chance(config.paralysis_skip_chance))
    .then_some(StatusKind::Paralyze)
}

/// Applies damage-over-time for every active status, in application order.
///
/// Badly Poisoned and Cursed escalate one stage after each tick. Stops as
/// soon as the combatant is defeated.
pub fn apply_upkeep(combatant: &mut Combatant) -> Vec<UpkeepTick> {
    let max_hp = combatant.stats.max_hp;
    let mut ticks = Vec::new();

    let active: Vec<StatusEffect> = combatant.statuses.iter().map(|s| s.effect).collect();
    for effect in active {
        if !combatant.is_alive() {
            break;
        }

        let damage = match effect {
            StatusEffect::Burn => fraction_of_max(max_hp, 1, 16),
            StatusEffect::BadlyPoisoned { stage } => fraction_of_max(max_hp, stage, 16),
            StatusEffect::Cursed { stage } => fraction_of_max(max_hp, stage.saturating_add(1), 16),
            _ => continue,
        };

        let dealt = combatant.take_damage(damage);
        ticks.push(UpkeepTick {
            entity: combatant.id,
            status: effect.kind(),
            damage: dealt,
        });

        if let Some(next) = effect.escalated() {
            if let Some(active) = combatant.statuses.get_mut(effect.kind()) {
                active.effect = next;
            }
        }
    }

    if !ticks.is_empty() {
        tracing::debug!(
            entity = %combatant.id,
            total = ticks.iter().map(|t| t.damage).sum::<u32>(),
            hp = combatant.stats.hp,
            "status upkeep"
        );
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, Typing};
    use crate::env::FixedRng;
    use crate::state::{CombatStats, Team};

    fn sufferer(max_hp: u32) -> Combatant {
        Combatant::new(
            EntityId(3),
            "sufferer",
            Team::Enemy,
            Typing::single(Element::Normal),
            CombatStats::new(max_hp, 10, 10, 1),
        )
    }

    #[test]
    fn burn_takes_a_sixteenth() {
        let mut unit = sufferer(160);
        unit.statuses.apply(StatusEffect::Burn, 4);

        let ticks = apply_upkeep(&mut unit);
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].damage, 10);
        assert_eq!(unit.stats.hp, 150);
    }

    #[test]
    fn poison_escalates_each_turn() {
        let mut unit = sufferer(160);
        unit.statuses.apply(StatusKind::BadlyPoisoned.fresh(), 5);

        assert_eq!(apply_upkeep(&mut unit)[0].damage, 10);
        assert_eq!(apply_upkeep(&mut unit)[0].damage, 20);
        assert_eq!(apply_upkeep(&mut unit)[0].damage, 30);
        assert_eq!(
            unit.statuses.get(StatusKind::BadlyPoisoned).map(|s| s.effect),
            Some(StatusEffect::BadlyPoisoned { stage: 4 })
        );
    }

    #[test]
    fn curse_starts_at_an_eighth_and_escalates() {
        let mut unit = sufferer(160);
        unit.statuses.apply(StatusKind::Cursed.fresh(), 5);
        assert_eq!(apply_upkeep(&mut unit)[0].damage, 20);
        assert_eq!(apply_upkeep(&mut unit)[0].damage, 30);
        assert_eq!(apply_upkeep(&mut unit)[0].damage, 40);
        assert_eq!(
            unit.statuses.get(StatusKind::Cursed).map(|s| s.effect),
            Some(StatusEffect::Cursed { stage: 4 })
        );

        let mut tiny = sufferer(4);
        tiny.statuses.apply(StatusKind::Cursed.fresh(), 5);
        assert_eq!(apply_upkeep(&mut tiny)[0].damage, 1);
    }

    #[test]
    fn upkeep_stops_once_defeated() {
        let mut unit = sufferer(16).with_hp(1);
        unit.statuses.apply(StatusEffect::Burn, 4);
        unit.statuses.apply(StatusKind::Cursed.fresh(), 4);

        let ticks = apply_upkeep(&mut unit);
        assert_eq!(ticks.len(), 1);
        assert_eq!(unit.stats.hp, 0);
    }

    #[test]
    fn frozen_always_skips() {
        let mut unit = sufferer(50);
        unit.statuses.apply(StatusEffect::Frozen, 2);

        let rng = FixedRng(99);
        let mut rolls = RollStream::new(&rng, 0, 0, unit.id);
        let config = CombatConfig::default();
        assert_eq!(action_gate(&unit, &config, &mut rolls), Some(StatusKind::Frozen));
        assert_eq!(rolls.draws(), 0);
    }

    #[test]
    fn paralysis_skips_on_a_low_roll() {
        let mut unit = sufferer(50);
        unit.statuses.apply(StatusEffect::Paralyze, 3);
        let config = CombatConfig::default();

        let low = FixedRng(10);
        let mut rolls = RollStream::new(&low, 0, 0, unit.id);
        assert_eq!(action_gate(&unit, &config, &mut rolls), Some(StatusKind::Paralyze));

        let high = FixedRng(60);
        let mut rolls = RollStream::new(&high, 0, 0, unit.id);
        assert_eq!(action_gate(&unit, &config, &mut rolls), None);
    }

    #[test]
    fn buffs_do_not_gate() {
        let mut unit = sufferer(50);
        unit.statuses.apply(StatusEffect::AtkUp, 3);
        let rng = FixedRng(0);
        let mut rolls = RollStream::new(&rng, 0, 0, unit.id);
        assert_eq!(action_gate(&unit, &CombatConfig::default(), &mut rolls), None);
    }
}
