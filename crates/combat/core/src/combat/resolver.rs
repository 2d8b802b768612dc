//! Attacker → defender(s) resolution.
//!
//! For each target, in tile order: dodge gate, accuracy, damage, thaw,
//! reactive abilities, reflection, life-steal, chain update, status effect,
//! knockback. A miss on one target never affects the others. Single-use
//! combos are consumed once the player's action is done.

use crate::ability::{self, AbilityId};
use crate::action::{ActionDescriptor, ActionRequest, SkillSpec};
use crate::element::{Element, TypeChart};
use crate::env::{CombatEnv, RollStream, TerrainOracle};
use crate::error::CombatError;
use crate::modifiers::ModifierAggregator;
use crate::state::{BattleState, ChainAction, Combatant, Direction, EntityId, StatusKind};

use super::damage::{basic_base_damage, final_damage, percent_of, skill_base_damage};
use super::outcome::{ActionOutcome, HitResult, ReactiveTrigger, Resolution, TargetOutcome};
use super::targeting::{knockback, resolve_facing, select_targets};
use super::ResolveError;

/// Per-action data shared by every target of one resolution.
struct Strike<'s> {
    actor: EntityId,
    skill: Option<&'s SkillSpec>,
    facing: Direction,
    aggregator: ModifierAggregator<'s>,
    terrain: &'s dyn TerrainOracle,
}

impl Strike<'_> {
    fn element(&self, attacker: &Combatant) -> Element {
        self.skill.map_or(attacker.attack_element, |skill| skill.element)
    }

    fn deals_damage(&self) -> bool {
        self.skill.is_none_or(|skill| !skill.is_status_only())
    }
}

/// Resolves actions against a [`BattleState`].
///
/// HP, statuses, positions, the score chain and combo state are mutated in
/// place. There is no rollback: targets already resolved stay resolved.
#[derive(Clone, Copy, Debug)]
pub struct CombatResolver<'a> {
    env: CombatEnv<'a>,
}

impl<'a> CombatResolver<'a> {
    pub fn new(env: CombatEnv<'a>) -> Self {
        Self { env }
    }

    /// Resolves `request`. Invalid requests become a no-op outcome.
    pub fn resolve(&self, state: &mut BattleState, request: &ActionRequest) -> ActionOutcome {
        match self.try_resolve(state, request) {
            Ok(outcome) => outcome,
            Err(error) => {
                tracing::warn!(
                    actor = %request.actor,
                    action = request.action.name(),
                    code = error.error_code(),
                    %error,
                    "action degraded to no-op"
                );
                ActionOutcome::no_op(request.actor, request.action.name(), error)
            }
        }
    }

    fn try_resolve(
        &self,
        state: &mut BattleState,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, ResolveError> {
        let rng = self.env.rng()?;
        let terrain = self.env.terrain()?;

        let attacker = state
            .roster
            .get(request.actor)
            .ok_or(ResolveError::ActorNotFound(request.actor))?;
        if !attacker.is_alive() {
            return Err(ResolveError::ActorDefeated(request.actor));
        }

        let range = request.action.range();
        let facing = resolve_facing(&state.roster, attacker, request.facing);
        let is_player = attacker.is_player();
        let targets = select_targets(&state.roster, attacker, range, facing, terrain);

        if let Some(attacker) = state.roster.get_mut(request.actor) {
            attacker.facing = facing;
        }

        let nonce = state.action_nonce;
        state.action_nonce += 1;
        let mut rolls = RollStream::new(rng, state.game_seed, nonce, request.actor);

        let strike = Strike {
            actor: request.actor,
            skill: match &request.action {
                ActionDescriptor::BasicAttack => None,
                ActionDescriptor::Skill(skill) => Some(skill),
            },
            facing,
            aggregator: ModifierAggregator::new(
                self.env.config,
                self.env.loadout,
                state.field,
                state.combo,
            ),
            terrain,
        };

        let name = request.action.name();
        let mut outcome = if range.is_self_only() {
            let effect = self.apply_self_effect(state, &strike, &mut rolls);
            ActionOutcome::new(request.actor, name, facing, Resolution::SelfApplied { effect })
        } else if targets.is_empty() {
            tracing::debug!(actor = %request.actor, action = name, "no target in range");
            ActionOutcome::new(request.actor, name, facing, Resolution::MissedEntirely)
        } else {
            let mut outcome =
                ActionOutcome::new(request.actor, name, facing, Resolution::Resolved);
            for target in targets {
                if !state
                    .roster
                    .get(request.actor)
                    .is_some_and(Combatant::is_alive)
                {
                    break;
                }
                if let Some(result) = self.resolve_target(state, &strike, target, &mut rolls) {
                    outcome.targets.push(result);
                }
            }
            outcome
        };

        outcome.attacker_defeated = !state
            .roster
            .get(request.actor)
            .is_some_and(Combatant::is_alive);

        if is_player {
            outcome.consumed_combos = state.combo.consume();
            if !outcome.consumed_combos.is_empty() {
                tracing::debug!(flags = ?outcome.consumed_combos, "combo consumed");
            }
        }

        Ok(outcome)
    }

    fn apply_self_effect(
        &self,
        state: &mut BattleState,
        strike: &Strike<'_>,
        rolls: &mut RollStream<'_>,
    ) -> Option<StatusKind> {
        let skill = strike.skill?;
        let kind = skill.effect?;
        let user = state.roster.get_mut(strike.actor)?;

        let chance = strike.aggregator.effect_chance(user, skill.effect_chance);
        if !rolls.chance(chance) || kind.is_blocked_by(&user.typing) {
            return None;
        }

        let turns = self.env.config.durations.for_kind(kind);
        user.statuses
            .apply(kind.fresh(), turns)
            .then_some(kind)
    }

    fn resolve_target(
        &self,
        state: &mut BattleState,
        strike: &Strike<'_>,
        target: EntityId,
        rolls: &mut RollStream<'_>,
    ) -> Option<TargetOutcome> {
        let config = self.env.config;
        let aggregator = &strike.aggregator;

        let BattleState {
            roster,
            chain,
            combo,
            ..
        } = state;
        let shadow_dance = combo.shadow_dance_active();

        let (attacker, defender) = roster.pair_mut(strike.actor, target)?;
        if !defender.is_alive() {
            return None;
        }

        let element = strike.element(attacker);
        let set = aggregator.resolve(attacker, defender, element);

        // Dodge gate.
        if (shadow_dance && defender.is_player()) || rolls.chance(set.dodge_chance) {
            tracing::debug!(attacker = %strike.actor, %target, "dodged");
            return Some(TargetOutcome::new(target, HitResult::Dodged, set.effectiveness));
        }

        // Accuracy (skills only).
        if let Some(skill) = strike.skill {
            let always_hits = attacker.has_ability(AbilityId::NoGuard)
                || defender.has_ability(AbilityId::NoGuard);
            if !always_hits && !rolls.chance(skill.accuracy) {
                tracing::debug!(attacker = %strike.actor, %target, "missed");
                return Some(TargetOutcome::new(target, HitResult::Missed, set.effectiveness));
            }
        }

        let mut outcome = TargetOutcome::new(target, HitResult::Hit, set.effectiveness);

        // Immunity also stops the effect of status-only skills.
        if set.effectiveness <= TypeChart::IMMUNE {
            tracing::debug!(attacker = %strike.actor, %target, %element, "immune");
            outcome.result = HitResult::Immune;
            return Some(outcome);
        }

        if strike.deals_damage() {
            let critical = set.guaranteed_crit || rolls.chance(set.crit_chance);
            let base = match strike.skill {
                None => basic_base_damage(set.attack, set.defense),
                Some(skill) => skill_base_damage(skill.power, set.attack, set.defense),
            };
            let stack =
                aggregator.damage_stack(attacker, defender, element, set.effectiveness, critical);
            let mut damage = final_damage(base, &stack);

            if defender.has_ability(AbilityId::Sturdy)
                && defender.is_full_hp()
                && defender.stats.hp > 1
                && damage >= defender.stats.hp
            {
                damage = defender.stats.hp - 1;
                outcome.endured = true;
            }

            defender.take_damage(damage);
            outcome.damage = damage;
            outcome.critical = critical;
            outcome.modifiers = stack.applied().to_vec();

            if defender.is_player() {
                chain.reset_chain();
            }

            if element == Element::Fire && defender.statuses.remove(StatusKind::Frozen) {
                outcome.thawed = true;
            }

            outcome.reactive = self.reactive_ability(attacker, defender, rolls);

            if aggregator.thorns_active(defender) {
                let reflected = percent_of(damage, config.thorns_percent);
                attacker.take_damage(reflected);
                outcome.reflected = reflected;
            }

            let life_steal = aggregator.life_steal_percent(attacker);
            if life_steal > 0 && attacker.is_alive() {
                outcome.life_stolen = attacker.heal(percent_of(damage, life_steal));
            }

            if attacker.is_player() {
                let bonus = aggregator.chain_talent_bonus();
                if set.effectiveness >= TypeChart::SUPER_EFFECTIVE {
                    chain.add_chain_action(ChainAction::EffectiveHit, &config.chain, bonus);
                }
                if critical {
                    chain.add_chain_action(ChainAction::CriticalHit, &config.chain, bonus);
                }
                if !defender.is_alive() {
                    chain.add_chain_action(ChainAction::Defeat, &config.chain, bonus);
                }
            }
        }

        outcome.defeated = !defender.is_alive();

        if let Some(skill) = strike.skill {
            if defender.is_alive() {
                outcome.effect_applied =
                    self.apply_effect(skill, attacker, defender, aggregator, rolls);
            }
        }

        tracing::debug!(
            attacker = %strike.actor,
            %target,
            damage = outcome.damage,
            effectiveness = outcome.effectiveness,
            critical = outcome.critical,
            hp = defender.stats.hp,
            "hit"
        );

        let push = strike.skill.map_or(0, |skill| skill.knockback);
        if push > 0 && !outcome.defeated {
            outcome.knocked_back = knockback(roster, target, strike.facing, push, strike.terrain);
        }

        Some(outcome)
    }

    /// Static / Flame Body on the defender.
    fn reactive_ability(
        &self,
        attacker: &mut Combatant,
        defender: &Combatant,
        rolls: &mut RollStream<'_>,
    ) -> Option<ReactiveTrigger> {
        let slot = defender.ability?;
        let status = slot.id.contact_status()?;

        if attacker.statuses.has(status) || status.is_blocked_by(&attacker.typing) {
            return None;
        }
        if !rolls.chance(ability::contact_chance(slot.level())) {
            return None;
        }

        let turns = self.env.config.durations.for_kind(status);
        attacker
            .statuses
            .apply(status.fresh(), turns)
            .then_some(ReactiveTrigger {
                ability: slot.id,
                status,
            })
    }

    fn apply_effect(
        &self,
        skill: &SkillSpec,
        attacker: &Combatant,
        defender: &mut Combatant,
        aggregator: &ModifierAggregator<'_>,
        rolls: &mut RollStream<'_>,
    ) -> Option<StatusKind> {
        let kind = skill.effect?;

        let chance = aggregator.effect_chance(attacker, skill.effect_chance);
        if !rolls.chance(chance) {
            return None;
        }

        let shielded = kind.is_harmful()
            && defender.has_ability(AbilityId::ShieldDust)
            && attacker.team.is_hostile_to(defender.team);
        if shielded || kind.is_blocked_by(&defender.typing) {
            return None;
        }

        let turns = self.env.config.durations.for_kind(kind);
        defender.statuses.apply(kind.fresh(), turns).then_some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::AbilitySlot;
    use crate::action::SkillRange;
    use crate::config::CombatConfig;
    use crate::element::{EffectivenessTier, Typing};
    use crate::env::{FixedRng, OpenTerrain, PcgRng};
    use crate::modifiers::{
        ComboFlags, Enchantment, HeldItem, Loadout, ModifierSource, TalentKind, Talents,
    };
    use crate::state::{CombatStats, Position, Roster, StatusEffect, Team};
    use proptest::prelude::*;

    /// Roll that fails every chance below 100.
    const NEVER: FixedRng = FixedRng(99);
    /// Roll that passes every chance above 0.
    const ALWAYS: FixedRng = FixedRng(0);

    fn hero(atk: u32) -> Combatant {
        Combatant::new(
            EntityId::PLAYER,
            "hero",
            Team::Player,
            Typing::single(Element::Normal),
            CombatStats::new(100, atk, 10, 5),
        )
        .at(Position::new(0, 0), Direction::East)
    }

    fn foe(id: u32, typing: Typing, def: u32) -> Combatant {
        Combatant::new(
            EntityId(id),
            format!("foe-{id}"),
            Team::Enemy,
            typing,
            CombatStats::new(100, 20, def, 3),
        )
        .at(Position::new(id as i32, 0), Direction::West)
    }

    fn battle(units: impl IntoIterator<Item = Combatant>) -> BattleState {
        BattleState::new(7, units.into_iter().collect::<Roster>())
    }

    fn resolve_with(
        rng: &dyn crate::env::RngOracle,
        loadout: &Loadout,
        state: &mut BattleState,
        request: ActionRequest,
    ) -> ActionOutcome {
        let config = CombatConfig::default();
        let env = CombatEnv::with_all(&config, loadout, &OpenTerrain, rng);
        CombatResolver::new(env).resolve(state, &request)
    }

    fn hp(state: &BattleState, id: u32) -> u32 {
        state.roster.get(EntityId(id)).map_or(0, |c| c.stats.hp)
    }

    #[test]
    fn neutral_basic_hit() {
        let mut state = battle([hero(20), foe(1, Typing::single(Element::Normal), 10)]);
        let outcome = resolve_with(
            &NEVER,
            &Loadout::default(),
            &mut state,
            ActionRequest::basic(EntityId::PLAYER),
        );

        let hit = outcome.target(EntityId(1)).unwrap();
        assert_eq!(hit.result, HitResult::Hit);
        assert_eq!(hit.damage, 15);
        assert_eq!(hit.tier, EffectivenessTier::Neutral);
        assert_eq!(hp(&state, 1), 85);
        assert_eq!(state.action_nonce, 1);
    }

    #[test]
    fn immune_target_takes_nothing() {
        let mut state = battle([hero(20), foe(1, Typing::single(Element::Flying), 10)]);
        let quake = SkillSpec::new("Quake", SkillRange::Front, 40, Element::Ground);
        let outcome = resolve_with(
            &NEVER,
            &Loadout::default(),
            &mut state,
            ActionRequest::skill(EntityId::PLAYER, quake),
        );

        let hit = outcome.target(EntityId(1)).unwrap();
        assert_eq!(hit.result, HitResult::Immune);
        assert_eq!(hit.damage, 0);
        assert_eq!(hp(&state, 1), 100);
    }

    #[test]
    fn super_effective_crit() {
        let mut attacker = hero(20).with_attack_element(Element::Fighting);
        attacker.held_item = Some(HeldItem {
            crit_chance: 10,
            ..HeldItem::default()
        });
        let mut state = battle([attacker, foe(1, Typing::single(Element::Normal), 10)]);
        let outcome = resolve_with(
            &ALWAYS,
            &Loadout::default(),
            &mut state,
            ActionRequest::basic(EntityId::PLAYER),
        );

        let hit = outcome.target(EntityId(1)).unwrap();
        assert!(hit.critical);
        assert_eq!(hit.damage, 45);
        assert_eq!(
            hit.modifiers.iter().map(|m| m.source).collect::<Vec<_>>(),
            vec![ModifierSource::Effectiveness, ModifierSource::Critical]
        );
        // effective hit + critical hit
        assert!((state.chain.current_multiplier - 1.35).abs() < 1e-9);
    }

    #[test]
    fn torrent_below_threshold_only() {
        let torrent = AbilitySlot::new(AbilityId::Torrent, 1);
        let surf = SkillSpec::new("Surf", SkillRange::Front, 10, Element::Water);

        let low = hero(20).with_ability(torrent).with_hp(30);
        let mut state = battle([low, foe(1, Typing::single(Element::Normal), 10)]);
        let outcome = resolve_with(
            &NEVER,
            &Loadout::default(),
            &mut state,
            ActionRequest::skill(EntityId::PLAYER, surf.clone()),
        );
        // floor(10 * 30 / 10) - 5
        assert_eq!(outcome.total_damage(), 25);

        let healthy = hero(20).with_ability(torrent).with_hp(40);
        let mut state = battle([healthy, foe(1, Typing::single(Element::Normal), 10)]);
        let outcome = resolve_with(
            &NEVER,
            &Loadout::default(),
            &mut state,
            ActionRequest::skill(EntityId::PLAYER, surf),
        );
        assert_eq!(outcome.total_damage(), 15);
    }

    #[test]
    fn thorns_reflects_and_resets_chain() {
        let attacker = Combatant::new(
            EntityId(1),
            "brute",
            Team::Enemy,
            Typing::single(Element::Normal),
            CombatStats::new(50, 30, 5, 3),
        )
        .at(Position::new(1, 0), Direction::West);
        let mut state = battle([hero(10), attacker]);
        state.chain.current_multiplier = 2.5;

        let loadout = Loadout {
            enchantment: Some(Enchantment::Thorns),
            ..Loadout::default()
        };
        let outcome = resolve_with(&NEVER, &loadout, &mut state, ActionRequest::basic(EntityId(1)));

        let hit = outcome.target(EntityId::PLAYER).unwrap();
        // 30 - 10 / 2
        assert_eq!(hit.damage, 25);
        assert_eq!(hit.reflected, 2);
        assert_eq!(hp(&state, 1), 48);
        assert_eq!(state.chain.current_multiplier, 1.0);
    }

    #[test]
    fn dodge_blocks_damage_and_effect() {
        let mut defender = foe(1, Typing::single(Element::Normal), 10);
        defender.held_item = Some(HeldItem {
            dodge_chance: 30,
            ..HeldItem::default()
        });
        let mut state = battle([hero(20), defender]);
        let spark = SkillSpec::new("Spark", SkillRange::Front, 30, Element::Electric)
            .with_effect(StatusKind::Paralyze, 100);

        let outcome = resolve_with(
            &ALWAYS,
            &Loadout::default(),
            &mut state,
            ActionRequest::skill(EntityId::PLAYER, spark),
        );
        let hit = outcome.target(EntityId(1)).unwrap();
        assert_eq!(hit.result, HitResult::Dodged);
        assert_eq!(hit.damage, 0);
        assert_eq!(hit.effect_applied, None);
        assert!(state.roster.get(EntityId(1)).unwrap().statuses.is_empty());
    }

    #[test]
    fn shadow_dance_makes_player_untouchable() {
        let mut state = battle([hero(10), foe(1, Typing::single(Element::Normal), 5)]);
        state.combo.grant_shadow_dance(1);

        let outcome = resolve_with(
            &NEVER,
            &Loadout::default(),
            &mut state,
            ActionRequest::basic(EntityId(1)),
        );
        assert_eq!(
            outcome.target(EntityId::PLAYER).map(|t| t.result),
            Some(HitResult::Dodged)
        );
        assert_eq!(hp(&state, 0), 100);
    }

    #[test]
    fn accuracy_miss_on_one_target_does_not_stop_others() {
        let mut state = battle([
            hero(20),
            foe(1, Typing::single(Element::Normal), 10)
                .with_ability(AbilitySlot::new(AbilityId::NoGuard, 1)),
            foe(2, Typing::single(Element::Normal), 10),
        ]);
        let beam = SkillSpec::new("Beam", SkillRange::Line { length: 3 }, 10, Element::Normal)
            .with_accuracy(50);

        let outcome = resolve_with(
            &NEVER,
            &Loadout::default(),
            &mut state,
            ActionRequest::skill(EntityId::PLAYER, beam),
        );
        assert_eq!(outcome.targets.len(), 2);
        assert_eq!(outcome.targets[0].result, HitResult::Hit);
        assert_eq!(outcome.targets[1].result, HitResult::Missed);
        assert!(hp(&state, 1) < 100);
        assert_eq!(hp(&state, 2), 100);
    }

    #[test]
    fn empty_range_is_missed_entirely() {
        let mut state = battle([hero(20), foe(5, Typing::single(Element::Normal), 10)]);
        state.combo.grant(ComboFlags::DOUBLE_DAMAGE);

        let outcome = resolve_with(
            &NEVER,
            &Loadout::default(),
            &mut state,
            ActionRequest::basic(EntityId::PLAYER),
        );
        assert_eq!(outcome.resolution, Resolution::MissedEntirely);
        assert!(outcome.targets.is_empty());
        assert_eq!(outcome.consumed_combos, ComboFlags::DOUBLE_DAMAGE);
    }

    #[test]
    fn combos_apply_once_across_targets() {
        let mut state = battle([
            hero(20),
            foe(1, Typing::single(Element::Normal), 10),
            foe(2, Typing::single(Element::Normal), 10),
        ]);
        state.combo.grant(ComboFlags::DRAGONS_RAGE | ComboFlags::DOUBLE_DAMAGE);
        let sweep = SkillSpec::new("Sweep", SkillRange::Line { length: 2 }, 10, Element::Normal);

        let outcome = resolve_with(
            &NEVER,
            &Loadout::default(),
            &mut state,
            ActionRequest::skill(EntityId::PLAYER, sweep),
        );
        assert!(outcome.targets.iter().all(|t| t.damage == 45));
        assert!(state.combo.flags.is_empty());
    }

    #[test]
    fn status_only_skill_skips_damage() {
        let mut state = battle([hero(20), foe(1, Typing::single(Element::Water), 10)]);
        let hex = SkillSpec::new("Hex", SkillRange::Front, 0, Element::Ghost)
            .with_effect(StatusKind::Cursed, 100);

        let outcome = resolve_with(
            &NEVER,
            &Loadout::default(),
            &mut state,
            ActionRequest::skill(EntityId::PLAYER, hex),
        );
        let hit = outcome.target(EntityId(1)).unwrap();
        assert_eq!(hit.damage, 0);
        assert_eq!(hit.effect_applied, Some(StatusKind::Cursed));
        assert_eq!(hp(&state, 1), 100);
    }

    #[test]
    fn status_only_skill_respects_immunity() {
        let mut state = battle([hero(20), foe(1, Typing::single(Element::Ground), 10)]);
        let wave = SkillSpec::new("Thunder Wave", SkillRange::Front, 0, Element::Electric)
            .with_effect(StatusKind::Paralyze, 100);

        let outcome = resolve_with(
            &NEVER,
            &Loadout::default(),
            &mut state,
            ActionRequest::skill(EntityId::PLAYER, wave),
        );
        let hit = outcome.target(EntityId(1)).unwrap();
        assert_eq!(hit.result, HitResult::Immune);
        assert_eq!(hit.effect_applied, None);
        assert!(state.roster.get(EntityId(1)).unwrap().statuses.is_empty());
    }

    #[test]
    fn guaranteed_crit_is_forced_and_consumed() {
        let mut state = battle([hero(20), foe(1, Typing::single(Element::Normal), 10)]);
        state.combo.grant(ComboFlags::GUARANTEED_CRIT);

        let outcome = resolve_with(
            &NEVER,
            &Loadout::default(),
            &mut state,
            ActionRequest::basic(EntityId::PLAYER),
        );
        let hit = outcome.target(EntityId(1)).unwrap();
        assert!(hit.critical);
        // floor(15 * 1.5)
        assert_eq!(hit.damage, 22);
        assert_eq!(outcome.consumed_combos, ComboFlags::GUARANTEED_CRIT);
        assert!(state.combo.flags.is_empty());

        let next = resolve_with(
            &NEVER,
            &Loadout::default(),
            &mut state,
            ActionRequest::basic(EntityId::PLAYER),
        );
        assert!(!next.targets[0].critical);
        assert_eq!(next.targets[0].damage, 15);
    }

    #[test]
    fn shield_dust_blocks_hostile_effects_only() {
        let dusty = foe(1, Typing::single(Element::Bug), 10)
            .with_ability(AbilitySlot::new(AbilityId::ShieldDust, 1));
        let mut state = battle([hero(20), dusty]);
        let ember = SkillSpec::new("Ember", SkillRange::Front, 10, Element::Fire)
            .with_effect(StatusKind::Burn, 100);

        let outcome = resolve_with(
            &NEVER,
            &Loadout::default(),
            &mut state,
            ActionRequest::skill(EntityId::PLAYER, ember),
        );
        assert_eq!(outcome.targets[0].effect_applied, None);
        assert!(outcome.targets[0].damage > 0);
    }

    #[test]
    fn elemental_immunity_blocks_status() {
        let mut state = battle([hero(20), foe(1, Typing::single(Element::Fire), 10)]);
        let ember = SkillSpec::new("Ember", SkillRange::Front, 10, Element::Fire)
            .with_effect(StatusKind::Burn, 100);

        let outcome = resolve_with(
            &NEVER,
            &Loadout::default(),
            &mut state,
            ActionRequest::skill(EntityId::PLAYER, ember),
        );
        assert_eq!(outcome.targets[0].effect_applied, None);
    }

    #[test]
    fn fire_hit_thaws_frozen_target() {
        let mut target = foe(1, Typing::single(Element::Normal), 10);
        target.statuses.apply(StatusEffect::Frozen, 2);
        let mut state = battle([hero(20).with_attack_element(Element::Fire), target]);

        let outcome = resolve_with(
            &NEVER,
            &Loadout::default(),
            &mut state,
            ActionRequest::basic(EntityId::PLAYER),
        );
        assert!(outcome.targets[0].thawed);
        assert!(!state.roster.get(EntityId(1)).unwrap().statuses.has(StatusKind::Frozen));
    }

    #[test]
    fn static_paralyzes_the_attacker() {
        let charged = foe(1, Typing::single(Element::Normal), 10)
            .with_ability(AbilitySlot::new(AbilityId::Static, 1));
        let mut state = battle([hero(20), charged]);

        let outcome = resolve_with(
            &ALWAYS,
            &Loadout::default(),
            &mut state,
            ActionRequest::basic(EntityId::PLAYER),
        );
        assert_eq!(
            outcome.targets[0].reactive,
            Some(ReactiveTrigger {
                ability: AbilityId::Static,
                status: StatusKind::Paralyze,
            })
        );
        let player = state.roster.get(EntityId::PLAYER).unwrap();
        assert_eq!(
            player.statuses.get(StatusKind::Paralyze).map(|s| s.turns_left),
            Some(3)
        );
    }

    #[test]
    fn flame_body_burns_the_attacker() {
        let hot = foe(1, Typing::single(Element::Normal), 10)
            .with_ability(AbilitySlot::new(AbilityId::FlameBody, 1));
        let mut state = battle([hero(20), hot]);

        let outcome = resolve_with(
            &ALWAYS,
            &Loadout::default(),
            &mut state,
            ActionRequest::basic(EntityId::PLAYER),
        );
        assert_eq!(
            outcome.targets[0].reactive,
            Some(ReactiveTrigger {
                ability: AbilityId::FlameBody,
                status: StatusKind::Burn,
            })
        );
        let player = state.roster.get(EntityId::PLAYER).unwrap();
        assert!(player.statuses.has(StatusKind::Burn));
    }

    #[test]
    fn reactive_ability_skips_an_attacker_already_afflicted() {
        let charged = foe(1, Typing::single(Element::Normal), 10)
            .with_ability(AbilitySlot::new(AbilityId::Static, 1));
        let mut attacker = hero(20);
        attacker.statuses.apply(StatusEffect::Paralyze, 1);
        let mut state = battle([attacker, charged]);

        let outcome = resolve_with(
            &ALWAYS,
            &Loadout::default(),
            &mut state,
            ActionRequest::basic(EntityId::PLAYER),
        );
        assert!(outcome.targets[0].damage > 0);
        assert_eq!(outcome.targets[0].reactive, None);
        let player = state.roster.get(EntityId::PLAYER).unwrap();
        assert_eq!(
            player.statuses.get(StatusKind::Paralyze).map(|s| s.turns_left),
            Some(1)
        );
    }

    #[test]
    fn sturdy_survives_at_one_hp() {
        let tough = Combatant::new(
            EntityId(1),
            "rock",
            Team::Enemy,
            Typing::single(Element::Rock),
            CombatStats::new(10, 5, 0, 1),
        )
        .with_ability(AbilitySlot::new(AbilityId::Sturdy, 1))
        .at(Position::new(1, 0), Direction::West);
        let mut state = battle([hero(80), tough]);

        let outcome = resolve_with(
            &NEVER,
            &Loadout::default(),
            &mut state,
            ActionRequest::basic(EntityId::PLAYER),
        );
        assert!(outcome.targets[0].endured);
        assert_eq!(hp(&state, 1), 1);

        resolve_with(
            &NEVER,
            &Loadout::default(),
            &mut state,
            ActionRequest::basic(EntityId::PLAYER),
        );
        assert_eq!(hp(&state, 1), 0);
    }

    #[test]
    fn life_steal_heals_up_to_max() {
        let mut state = battle([hero(40).with_hp(90), foe(1, Typing::single(Element::Normal), 0)]);
        let loadout = Loadout {
            enchantment: Some(Enchantment::Vampiric),
            ..Loadout::default()
        };

        let request = ActionRequest::basic(EntityId::PLAYER);
        let outcome = resolve_with(&NEVER, &loadout, &mut state, request);
        // 15% of 40
        assert_eq!(outcome.targets[0].life_stolen, 6);
        assert_eq!(hp(&state, 0), 96);
    }

    #[test]
    fn self_skill_applies_to_user() {
        let mut state = battle([hero(20), foe(1, Typing::single(Element::Normal), 10)]);
        let focus = SkillSpec::new("Focus", SkillRange::SelfOnly, 0, Element::Normal)
            .with_effect(StatusKind::AtkUp, 100);

        let outcome = resolve_with(
            &NEVER,
            &Loadout::default(),
            &mut state,
            ActionRequest::skill(EntityId::PLAYER, focus),
        );
        assert_eq!(
            outcome.resolution,
            Resolution::SelfApplied {
                effect: Some(StatusKind::AtkUp)
            }
        );
        assert_eq!(hp(&state, 1), 100);
    }

    #[test]
    fn knockback_pushes_survivors() {
        let mut state = battle([hero(20), foe(1, Typing::single(Element::Normal), 10)]);
        let gust = SkillSpec::new("Gust", SkillRange::Front, 5, Element::Flying).with_knockback(2);

        let outcome = resolve_with(
            &NEVER,
            &Loadout::default(),
            &mut state,
            ActionRequest::skill(EntityId::PLAYER, gust),
        );
        assert_eq!(outcome.targets[0].knocked_back, 2);
        assert_eq!(
            state.roster.get(EntityId(1)).map(|c| c.position),
            Some(Position::new(3, 0))
        );
    }

    #[test]
    fn unknown_actor_is_a_no_op() {
        let mut state = battle([hero(20)]);
        let outcome = resolve_with(
            &NEVER,
            &Loadout::default(),
            &mut state,
            ActionRequest::basic(EntityId(42)),
        );
        assert_eq!(
            outcome.resolution,
            Resolution::NoOp(ResolveError::ActorNotFound(EntityId(42)))
        );
        assert_eq!(state.action_nonce, 0);
    }

    #[test]
    fn missing_rng_is_a_no_op() {
        let config = CombatConfig::default();
        let loadout = Loadout::default();
        let env = CombatEnv::new(&config, &loadout).with_terrain(&OpenTerrain);
        let mut state = battle([hero(20), foe(1, Typing::single(Element::Normal), 10)]);

        let outcome =
            CombatResolver::new(env).resolve(&mut state, &ActionRequest::basic(EntityId::PLAYER));
        assert!(outcome.is_no_op());
        assert_eq!(hp(&state, 1), 100);
    }

    #[test]
    fn chain_master_adds_to_increment() {
        let mut state = battle([
            hero(20).with_attack_element(Element::Fighting),
            foe(1, Typing::single(Element::Normal), 10),
        ]);
        let loadout = Loadout {
            talents: Talents::new().with_rank(TalentKind::ChainMaster, 2),
            ..Loadout::default()
        };

        resolve_with(&NEVER, &loadout, &mut state, ActionRequest::basic(EntityId::PLAYER));
        assert!((state.chain.current_multiplier - 1.35).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn hp_stays_in_bounds(
            seed in any::<u64>(),
            atk in 0u32..500,
            def in 0u32..500,
            power in 0u32..200,
            hp in 1u32..300,
        ) {
            let attacker = hero(atk);
            let defender = Combatant::new(
                EntityId(1),
                "target",
                Team::Enemy,
                Typing::single(Element::Grass),
                CombatStats::new(300, 10, def, 1),
            )
            .with_hp(hp)
            .at(Position::new(1, 0), Direction::West);

            let mut state = BattleState::new(seed, [attacker, defender].into_iter().collect());
            let skill = SkillSpec::new("Test", SkillRange::Front, power, Element::Fire)
                .with_accuracy(70)
                .with_effect(StatusKind::Burn, 50);
            let outcome = resolve_with(
                &PcgRng,
                &Loadout::default(),
                &mut state,
                ActionRequest::skill(EntityId::PLAYER, skill),
            );

            for unit in state.roster.iter() {
                prop_assert!(unit.stats.hp <= unit.stats.max_hp);
            }
            let target = &outcome.targets[0];
            if target.result == HitResult::Hit && power > 0 {
                prop_assert!(target.damage >= 1);
            } else {
                prop_assert_eq!(target.damage, 0);
                prop_assert_eq!(self::hp(&state, 1), hp);
            }
            if target.result == HitResult::Dodged {
                prop_assert_eq!(target.effect_applied, None);
            }
        }

        #[test]
        fn same_seed_replays_identically(seed in any::<u64>()) {
            let build = || {
                let mut dodgy = foe(1, Typing::single(Element::Normal), 10);
                dodgy.held_item = Some(HeldItem { dodge_chance: 40, ..HeldItem::default() });
                BattleState::new(seed, [hero(30), dodgy].into_iter().collect())
            };
            let mut a = build();
            let mut b = build();
            let request = ActionRequest::basic(EntityId::PLAYER);
            let first = resolve_with(&PcgRng, &Loadout::default(), &mut a, request.clone());
            let second = resolve_with(&PcgRng, &Loadout::default(), &mut b, request);
            prop_assert_eq!(first, second);
            prop_assert_eq!(a, b);
        }
    }
}
