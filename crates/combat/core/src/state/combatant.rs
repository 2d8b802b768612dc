use crate::ability::{AbilityId, AbilitySlot};
use crate::element::{Element, Typing};
use crate::modifiers::HeldItem;

use super::{Direction, EntityId, Position, StatusEffectSet};

/// Side a combatant fights for.
///
/// Player and allies share one side; enemies form the other. Two combatants on
/// the same side are never valid targets for each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Team {
    Player,
    Ally,
    Enemy,
}

impl Team {
    pub const fn is_player_side(self) -> bool {
        matches!(self, Team::Player | Team::Ally)
    }

    pub const fn is_hostile_to(self, other: Team) -> bool {
        self.is_player_side() != other.is_player_side()
    }
}

/// Raw numeric stats before any modifier is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub hp: u32,
    pub max_hp: u32,
    pub atk: u32,
    pub def: u32,
    pub level: u32,
}

impl CombatStats {
    /// Stats at full health. `hp` starts equal to `max_hp`.
    pub const fn new(max_hp: u32, atk: u32, def: u32, level: u32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            atk,
            def,
            level,
        }
    }

    /// Current HP as a fraction of maximum (0.0 when `max_hp` is zero).
    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp == 0 {
            0.0
        } else {
            f64::from(self.hp) / f64::from(self.max_hp)
        }
    }
}

/// A participant in a resolution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: EntityId,
    pub name: String,
    pub team: Team,
    pub typing: Typing,
    /// Element used by basic attacks.
    pub attack_element: Element,
    pub ability: Option<AbilitySlot>,
    pub held_item: Option<HeldItem>,
    pub stats: CombatStats,
    pub position: Position,
    pub facing: Direction,
    pub statuses: StatusEffectSet,
}

impl Combatant {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        team: Team,
        typing: Typing,
        stats: CombatStats,
    ) -> Self {
        let mut stats = stats;
        stats.hp = stats.hp.min(stats.max_hp);

        Self {
            id,
            name: name.into(),
            team,
            typing,
            attack_element: typing.primary,
            ability: None,
            held_item: None,
            stats,
            position: Position::ORIGIN,
            facing: Direction::default(),
            statuses: StatusEffectSet::new(),
        }
    }

    pub fn with_ability(mut self, ability: AbilitySlot) -> Self {
        self.ability = Some(ability);
        self
    }

    pub fn with_held_item(mut self, item: HeldItem) -> Self {
        self.held_item = Some(item);
        self
    }

    pub fn with_attack_element(mut self, element: Element) -> Self {
        self.attack_element = element;
        self
    }

    pub fn at(mut self, position: Position, facing: Direction) -> Self {
        self.position = position;
        self.facing = facing;
        self
    }

    pub fn with_hp(mut self, hp: u32) -> Self {
        self.stats.hp = hp.min(self.stats.max_hp);
        self
    }

    pub fn is_player(&self) -> bool {
        self.team == Team::Player
    }

    pub fn is_alive(&self) -> bool {
        self.stats.hp > 0
    }

    pub fn is_full_hp(&self) -> bool {
        self.stats.hp == self.stats.max_hp
    }

    /// Level of `id` if this combatant carries that ability.
    pub fn ability_level(&self, id: AbilityId) -> Option<u8> {
        self.ability
            .filter(|slot| slot.id == id)
            .map(|slot| slot.level())
    }

    pub fn has_ability(&self, id: AbilityId) -> bool {
        self.ability_level(id).is_some()
    }

    /// Removes up to `amount` HP and returns how much was actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.stats.hp);
        self.stats.hp -= lost;
        lost
    }

    /// Restores up to `amount` HP without exceeding `max_hp`. Returns the
    /// amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let missing = self.stats.max_hp - self.stats.hp;
        let restored = amount.min(missing);
        self.stats.hp += restored;
        restored
    }
}
