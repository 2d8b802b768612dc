use crate::ability::{self, AbilityId, GUTS_TRIGGERS};
use crate::config::CombatConfig;
use crate::element::{Element, TypeChart};
use crate::state::{Combatant, StatusKind, Team};

use super::stack::{DamageStack, ModifierSource, StatBonus, StatStack};
use super::{ComboState, Enchantment, FieldConditions, FloorEvent, Loadout};

/// Multiplier for AtkUp / DefUp.
pub const STAT_STATUS_MULTIPLIER: f64 = 1.5;

/// Everything the resolver needs about one attacker→defender pair.
///
/// Computed once per target, before any roll.
#[derive(Clone, Debug, PartialEq)]
pub struct ModifierSet {
    pub attack: u32,
    pub defense: u32,
    pub effectiveness: f64,
    /// Percent, 0 for non-player attackers.
    pub crit_chance: u32,
    /// Percent, already capped.
    pub dodge_chance: u32,
    pub guaranteed_crit: bool,
}

/// Combines every modifier source that applies to a resolution.
///
/// Loadout contributions (relics, blessings, talents, enchantment, type gem)
/// only ever apply to the player. Sources that are missing contribute
/// nothing.
#[derive(Clone, Copy, Debug)]
pub struct ModifierAggregator<'a> {
    config: &'a CombatConfig,
    loadout: &'a Loadout,
    field: FieldConditions,
    combo: ComboState,
}

impl<'a> ModifierAggregator<'a> {
    pub fn new(
        config: &'a CombatConfig,
        loadout: &'a Loadout,
        field: FieldConditions,
        combo: ComboState,
    ) -> Self {
        Self {
            config,
            loadout,
            field,
            combo,
        }
    }

    pub fn resolve(
        &self,
        attacker: &Combatant,
        defender: &Combatant,
        element: Element,
    ) -> ModifierSet {
        let is_player = attacker.team == Team::Player;
        ModifierSet {
            attack: self.effective_attack(attacker, element),
            defense: self.effective_defense(defender),
            effectiveness: self.effectiveness(element, defender),
            crit_chance: self.crit_chance(attacker),
            dodge_chance: self.dodge_chance(defender),
            guaranteed_crit: is_player && self.combo.guaranteed_crit(),
        }
    }

    pub fn attack_stack(&self, attacker: &Combatant, element: Element) -> StatStack {
        let mut stack = StatStack::new();

        if let Some(item) = &attacker.held_item {
            stack.add(ModifierSource::HeldItem, StatBonus::Flat(item.atk_bonus));
        }
        if attacker.team == Team::Player {
            stack.add(
                ModifierSource::Talent,
                StatBonus::Flat(self.loadout.talents.flat_attack()),
            );
        }

        stack.add(
            ModifierSource::Ability,
            StatBonus::Multiplier(ability_attack_multiplier(attacker, element)),
        );
        if attacker.statuses.has(StatusKind::AtkUp) {
            stack.add(
                ModifierSource::Status,
                StatBonus::Multiplier(STAT_STATUS_MULTIPLIER),
            );
        }

        if attacker.team == Team::Player {
            stack.add(
                ModifierSource::Relic,
                StatBonus::Percent(self.loadout.relic_atk_percent()),
            );
            stack.add(
                ModifierSource::Blessing,
                StatBonus::Percent(self.loadout.blessing_atk_percent()),
            );
        }
        stack
    }

    pub fn effective_attack(&self, attacker: &Combatant, element: Element) -> u32 {
        self.attack_stack(attacker, element).apply(attacker.stats.atk)
    }

    pub fn defense_stack(&self, defender: &Combatant) -> StatStack {
        let mut stack = StatStack::new();

        if let Some(item) = &defender.held_item {
            stack.add(ModifierSource::HeldItem, StatBonus::Flat(item.def_bonus));
        }
        if defender.team == Team::Player {
            stack.add(
                ModifierSource::Talent,
                StatBonus::Flat(self.loadout.talents.flat_defense()),
            );
        }

        if defender.statuses.has(StatusKind::DefUp) {
            stack.add(
                ModifierSource::Status,
                StatBonus::Multiplier(STAT_STATUS_MULTIPLIER),
            );
        }

        if defender.team == Team::Player {
            stack.add(
                ModifierSource::Relic,
                StatBonus::Percent(self.loadout.relic_def_percent()),
            );
            stack.add(
                ModifierSource::Blessing,
                StatBonus::Percent(self.loadout.blessing_def_percent()),
            );
        }
        stack
    }

    pub fn effective_defense(&self, defender: &Combatant) -> u32 {
        self.defense_stack(defender).apply(defender.stats.def)
    }

    /// Type effectiveness of `element` against `defender`, honouring Levitate
    /// and the inverted-effectiveness floor event.
    pub fn effectiveness(&self, element: Element, defender: &Combatant) -> f64 {
        if element == Element::Ground && defender.has_ability(AbilityId::Levitate) {
            return TypeChart::IMMUNE;
        }

        match self.field.floor_event {
            FloorEvent::InvertedEffectiveness => TypeChart::inverted_effectiveness(
                element,
                &defender.typing,
                self.config.inverted_immunity,
            ),
            _ => TypeChart::effectiveness(element, &defender.typing),
        }
    }

    /// Critical chance in percent. Only the player side can crit.
    pub fn crit_chance(&self, attacker: &Combatant) -> u32 {
        if !attacker.team.is_player_side() {
            return 0;
        }

        let item = attacker.held_item.as_ref().map_or(0, |item| item.crit_chance);
        if attacker.team != Team::Player {
            return item.min(100);
        }

        let keen = if self.loadout.has_enchantment(Enchantment::Keen) {
            Enchantment::KEEN_CRIT_CHANCE
        } else {
            0
        };

        (item + self.loadout.relic_crit_chance() + self.loadout.talents.crit_chance() + keen)
            .min(100)
    }

    /// Cumulative dodge chance for `defender`, capped by config.
    pub fn dodge_chance(&self, defender: &Combatant) -> u32 {
        let item = defender
            .held_item
            .as_ref()
            .map_or(0, |item| item.dodge_chance);

        let ability = match defender.ability {
            Some(slot) if slot.id == AbilityId::RunAway => ability::run_away_dodge(slot.level()),
            Some(slot) if slot.id == AbilityId::Levitate => ability::levitate_dodge(slot.level()),
            _ => 0,
        };

        let blessings = if defender.team == Team::Player {
            self.loadout.blessing_dodge()
        } else {
            0
        };

        (item + ability + blessings).min(self.config.max_dodge_chance.min(100))
    }

    /// Ordered damage multipliers for a connecting hit.
    pub fn damage_stack(
        &self,
        attacker: &Combatant,
        defender: &Combatant,
        element: Element,
        effectiveness: f64,
        critical: bool,
    ) -> DamageStack {
        let attacker_is_player = attacker.team == Team::Player;
        let mut stack = DamageStack::new();

        stack.push(ModifierSource::Effectiveness, effectiveness);
        stack.push(
            ModifierSource::Weather,
            self.field.weather_multiplier(element),
        );
        if attacker.team.is_player_side() && self.field.weather.has_synergy(element) {
            stack.push(
                ModifierSource::WeatherSynergy,
                self.config.weather_synergy_multiplier,
            );
        }
        if critical {
            stack.push(ModifierSource::Critical, self.config.crit_multiplier);
        }
        if attacker_is_player {
            stack.push(ModifierSource::Combo, self.combo.damage_multiplier());
            if effectiveness >= TypeChart::SUPER_EFFECTIVE {
                stack.push(
                    ModifierSource::Relic,
                    self.loadout.type_advantage_multiplier(),
                );
            }
        }
        if defender.team == Team::Player && attacker.team.is_hostile_to(Team::Player) {
            stack.push(
                ModifierSource::Difficulty,
                self.loadout.difficulty.multiplier(),
            );
        }
        if attacker_is_player {
            if let Some(gem) = self.loadout.type_gem.filter(|gem| gem.element == element) {
                stack.push(ModifierSource::TypeGem, gem.multiplier);
            }
        }
        if let Some(boost) = attacker
            .held_item
            .as_ref()
            .and_then(|item| item.element_boost)
            .filter(|boost| boost.element == element)
        {
            stack.push(ModifierSource::HeldItem, boost.multiplier);
        }
        if self.field.floor_event == FloorEvent::Frenzy {
            stack.push(ModifierSource::FloorEvent, self.config.frenzy_multiplier);
        }

        stack
    }

    /// Life-steal percent for `attacker`; only the player steals life.
    pub fn life_steal_percent(&self, attacker: &Combatant) -> u32 {
        if attacker.team == Team::Player {
            self.loadout.life_steal_percent()
        } else {
            0
        }
    }

    /// Effect chance after Serene Grace, capped at 100.
    pub fn effect_chance(&self, attacker: &Combatant, base: u32) -> u32 {
        let chance = match attacker.ability_level(AbilityId::SereneGrace) {
            Some(level) => {
                (f64::from(base) * ability::serene_grace_multiplier(level)).floor() as u32
            }
            None => base,
        };
        chance.min(100)
    }

    /// Per-rank chain bonus from talents (player only).
    pub fn chain_talent_bonus(&self) -> f64 {
        self.loadout.talents.chain_bonus()
    }

    pub fn thorns_active(&self, defender: &Combatant) -> bool {
        defender.team == Team::Player && self.loadout.has_enchantment(Enchantment::Thorns)
    }
}

/// Conditional ATK multiplier from the attacker's ability (1.0 if none holds).
fn ability_attack_multiplier(attacker: &Combatant, element: Element) -> f64 {
    let Some(slot) = attacker.ability else {
        return 1.0;
    };

    let active = match slot.id {
        AbilityId::Guts => GUTS_TRIGGERS
            .iter()
            .any(|kind| attacker.statuses.has(*kind)),
        id => {
            id.boosted_element() == Some(element)
                && attacker.stats.hp_ratio() < AbilityId::LOW_HP_THRESHOLD
        }
    };

    if active {
        ability::attack_boost(slot.level())
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::AbilitySlot;
    use crate::element::Typing;
    use crate::modifiers::{
        Blessing, ComboFlags, Difficulty, Enchantment, HeldItem, Relic, TypeGem, Weather,
        WeatherIntensity,
    };
    use crate::state::{CombatStats, EntityId, StatusEffect};

    fn player(atk: u32) -> Combatant {
        Combatant::new(
            EntityId::PLAYER,
            "hero",
            Team::Player,
            Typing::single(Element::Water),
            CombatStats::new(100, atk, 10, 5),
        )
    }

    fn enemy(typing: Typing) -> Combatant {
        Combatant::new(
            EntityId(7),
            "slime",
            Team::Enemy,
            typing,
            CombatStats::new(50, 12, 10, 3),
        )
    }

    fn aggregator<'a>(
        config: &'a CombatConfig,
        loadout: &'a Loadout,
        field: FieldConditions,
        combo: ComboState,
    ) -> ModifierAggregator<'a> {
        ModifierAggregator::new(config, loadout, field, combo)
    }

    #[test]
    fn torrent_only_below_threshold() {
        let config = CombatConfig::default();
        let loadout = Loadout::default();
        let agg = aggregator(&config, &loadout, Default::default(), Default::default());

        let hero = player(20)
            .with_ability(AbilitySlot::new(AbilityId::Torrent, 1))
            .with_hp(30);
        assert_eq!(agg.effective_attack(&hero, Element::Water), 30);
        assert_eq!(agg.effective_attack(&hero, Element::Fire), 20);

        let healthy = hero.with_hp(40);
        assert_eq!(agg.effective_attack(&healthy, Element::Water), 20);
    }

    #[test]
    fn guts_needs_a_harmful_status() {
        let config = CombatConfig::default();
        let loadout = Loadout::default();
        let agg = aggregator(&config, &loadout, Default::default(), Default::default());

        let mut brawler = player(20).with_ability(AbilitySlot::new(AbilityId::Guts, 1));
        assert_eq!(agg.effective_attack(&brawler, Element::Normal), 20);

        brawler.statuses.apply(StatusEffect::AtkUp, 3);
        assert_eq!(agg.effective_attack(&brawler, Element::Normal), 30);

        brawler.statuses.apply(StatusEffect::Burn, 3);
        assert_eq!(agg.effective_attack(&brawler, Element::Normal), 45);
    }

    #[test]
    fn loadout_only_boosts_the_player() {
        let config = CombatConfig::default();
        let loadout = Loadout {
            relics: vec![Relic {
                atk_percent: 50,
                crit_chance: 10,
                ..Relic::default()
            }],
            enchantment: Some(Enchantment::Keen),
            ..Loadout::default()
        };
        let agg = aggregator(&config, &loadout, Default::default(), Default::default());

        assert_eq!(agg.effective_attack(&player(20), Element::Water), 30);
        assert_eq!(agg.crit_chance(&player(20)), 15);

        let foe = enemy(Typing::single(Element::Normal));
        assert_eq!(agg.effective_attack(&foe, Element::Normal), 12);
        assert_eq!(agg.crit_chance(&foe), 0);
    }

    #[test]
    fn levitate_blocks_ground() {
        let config = CombatConfig::default();
        let loadout = Loadout::default();
        let agg = aggregator(&config, &loadout, Default::default(), Default::default());

        let floater = enemy(Typing::single(Element::Fire))
            .with_ability(AbilitySlot::new(AbilityId::Levitate, 1));
        assert_eq!(agg.effectiveness(Element::Ground, &floater), 0.0);
        assert_eq!(agg.effectiveness(Element::Water, &floater), 2.0);
    }

    #[test]
    fn inverted_event_flips_lookups() {
        let config = CombatConfig::default();
        let loadout = Loadout::default();
        let field = FieldConditions {
            floor_event: FloorEvent::InvertedEffectiveness,
            ..Default::default()
        };
        let agg = aggregator(&config, &loadout, field, Default::default());

        let target = enemy(Typing::single(Element::Fire));
        assert_eq!(agg.effectiveness(Element::Water, &target), 0.5);
        assert_eq!(agg.effectiveness(Element::Grass, &target), 2.0);
    }

    #[test]
    fn dodge_is_capped() {
        let config = CombatConfig::default();
        let loadout = Loadout {
            blessings: vec![Blessing {
                dodge_chance: 60,
                ..Default::default()
            }],
            ..Loadout::default()
        };
        let agg = aggregator(&config, &loadout, Default::default(), Default::default());

        let hero = player(10)
            .with_ability(AbilitySlot::new(AbilityId::RunAway, 5))
            .with_held_item(HeldItem {
                dodge_chance: 10,
                ..HeldItem::default()
            });
        assert_eq!(agg.dodge_chance(&hero), config.max_dodge_chance);
    }

    #[test]
    fn damage_stack_order() {
        let config = CombatConfig::default();
        let loadout = Loadout {
            type_gem: Some(TypeGem {
                element: Element::Water,
                multiplier: 1.2,
            }),
            relics: vec![Relic {
                type_advantage_multiplier: 1.3,
                ..Relic::default()
            }],
            ..Loadout::default()
        };
        let field =
            FieldConditions::new(Weather::Rain, WeatherIntensity::Normal, FloorEvent::Frenzy);
        let mut combo = ComboState::default();
        combo.grant(ComboFlags::DOUBLE_DAMAGE);
        let agg = aggregator(&config, &loadout, field, combo);

        let stack = agg.damage_stack(
            &player(10),
            &enemy(Typing::single(Element::Fire)),
            Element::Water,
            2.0,
            true,
        );
        let sources: Vec<_> = stack.applied().iter().map(|m| m.source).collect();
        assert_eq!(
            sources,
            vec![
                ModifierSource::Effectiveness,
                ModifierSource::Weather,
                ModifierSource::WeatherSynergy,
                ModifierSource::Critical,
                ModifierSource::Combo,
                ModifierSource::Relic,
                ModifierSource::TypeGem,
                ModifierSource::FloorEvent,
            ]
        );
    }

    #[test]
    fn difficulty_only_when_player_is_hit() {
        let config = CombatConfig::default();
        let loadout = Loadout {
            difficulty: Difficulty {
                enemy_damage_percent: 150,
                ng_plus: 0,
            },
            ..Loadout::default()
        };
        let agg = aggregator(&config, &loadout, Default::default(), Default::default());
        let foe = enemy(Typing::single(Element::Normal));

        let on_player = agg.damage_stack(&foe, &player(10), Element::Normal, 1.0, false);
        assert_eq!(on_player.product(), 1.5);

        let on_enemy = agg.damage_stack(&player(10), &foe, Element::Water, 1.0, false);
        assert_eq!(on_enemy.product(), 1.0);
    }

    #[test]
    fn weather_synergy_skips_enemy_attacks() {
        let config = CombatConfig::default();
        let loadout = Loadout::default();
        let field = FieldConditions::new(Weather::Rain, WeatherIntensity::Normal, FloorEvent::None);
        let agg = aggregator(&config, &loadout, field, ComboState::default());
        let synergy = |stack: &DamageStack| {
            stack
                .applied()
                .iter()
                .any(|m| m.source == ModifierSource::WeatherSynergy)
        };

        let foe = enemy(Typing::single(Element::Water));
        let enemy_hit = agg.damage_stack(&foe, &player(10), Element::Water, 1.0, false);
        assert!(!synergy(&enemy_hit));
        // Rain still boosts the enemy's Water attack.
        assert_eq!(enemy_hit.product(), 1.5);

        let player_hit = agg.damage_stack(&player(10), &foe, Element::Water, 1.0, false);
        assert!(synergy(&player_hit));
    }

    #[test]
    fn serene_grace_is_capped() {
        let config = CombatConfig::default();
        let loadout = Loadout::default();
        let agg = aggregator(&config, &loadout, Default::default(), Default::default());

        let lucky = player(10).with_ability(AbilitySlot::new(AbilityId::SereneGrace, 1));
        assert_eq!(agg.effect_chance(&lucky, 30), 45);
        assert_eq!(agg.effect_chance(&lucky, 80), 100);
        assert_eq!(agg.effect_chance(&player(10), 30), 30);
    }
}
