//! What a combatant attempts on its turn.
//!
//! [`ActionDescriptor`] describes the attempt; [`ActionRequest`] binds it to an
//! actor and an optional facing. Neither carries any outcome.

use crate::element::Element;
use crate::state::{Direction, EntityId, StatusKind};

// ============================================================================
// Range
// ============================================================================

/// Which tiles a skill reaches, relative to the user's facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillRange {
    /// The user only. No accuracy or damage roll.
    SelfOnly,

    /// The adjacent tile in the facing direction.
    Front,

    /// The front tile and its two flanking diagonals.
    Wide,

    /// Every tile along the facing until terrain blocks.
    Line { length: u32 },

    /// The first hostile occupant along the facing.
    Bolt { length: u32 },

    /// Every tile within Chebyshev `radius` that the user can see.
    Area { radius: u32 },
}

impl SkillRange {
    pub fn is_self_only(&self) -> bool {
        matches!(self, SkillRange::SelfOnly)
    }

    /// Ranges that may hit more than one combatant.
    pub fn is_multi_target(&self) -> bool {
        matches!(
            self,
            SkillRange::Wide | SkillRange::Line { .. } | SkillRange::Area { .. }
        )
    }

    /// Farthest tile the range can touch, in steps from the user.
    pub fn reach(&self) -> u32 {
        match *self {
            SkillRange::SelfOnly => 0,
            SkillRange::Front | SkillRange::Wide => 1,
            SkillRange::Line { length } | SkillRange::Bolt { length } => length,
            SkillRange::Area { radius } => radius,
        }
    }
}

// ============================================================================
// Skills
// ============================================================================

/// Static description of a skill.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillSpec {
    pub name: String,
    pub range: SkillRange,
    /// 0 means status-only: no damage roll.
    pub power: u32,
    pub element: Element,
    /// Percent, 0–100.
    pub accuracy: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect: Option<StatusKind>,
    /// Percent, 0–100.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect_chance: u32,
    /// Tiles a surviving target is pushed along the user's facing.
    #[cfg_attr(feature = "serde", serde(default))]
    pub knockback: u32,
}

impl SkillSpec {
    pub fn new(name: impl Into<String>, range: SkillRange, power: u32, element: Element) -> Self {
        Self {
            name: name.into(),
            range,
            power,
            element,
            accuracy: 100,
            effect: None,
            effect_chance: 0,
            knockback: 0,
        }
    }

    pub fn with_accuracy(mut self, accuracy: u32) -> Self {
        self.accuracy = accuracy.min(100);
        self
    }

    pub fn with_effect(mut self, effect: StatusKind, chance: u32) -> Self {
        self.effect = Some(effect);
        self.effect_chance = chance.min(100);
        self
    }

    pub fn with_knockback(mut self, tiles: u32) -> Self {
        self.knockback = tiles;
        self
    }

    pub fn is_status_only(&self) -> bool {
        self.power == 0
    }
}

// ============================================================================
// Descriptors
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionDescriptor {
    /// Front-tile attack with the user's attack element. Never rolls accuracy.
    BasicAttack,
    Skill(SkillSpec),
}

impl ActionDescriptor {
    pub fn range(&self) -> SkillRange {
        match self {
            ActionDescriptor::BasicAttack => SkillRange::Front,
            ActionDescriptor::Skill(skill) => skill.range,
        }
    }

    /// Display name for logs.
    pub fn name(&self) -> &str {
        match self {
            ActionDescriptor::BasicAttack => "basic attack",
            ActionDescriptor::Skill(skill) => &skill.name,
        }
    }
}

/// An action bound to its actor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRequest {
    pub actor: EntityId,
    pub action: ActionDescriptor,
    /// Explicit facing. Enemies that leave this empty turn toward the player.
    #[cfg_attr(feature = "serde", serde(default))]
    pub facing: Option<Direction>,
}

impl ActionRequest {
    pub fn new(actor: EntityId, action: ActionDescriptor) -> Self {
        Self {
            actor,
            action,
            facing: None,
        }
    }

    pub fn basic(actor: EntityId) -> Self {
        Self::new(actor, ActionDescriptor::BasicAttack)
    }

    pub fn skill(actor: EntityId, skill: SkillSpec) -> Self {
        Self::new(actor, ActionDescriptor::Skill(skill))
    }

    pub fn facing(mut self, direction: Direction) -> Self {
        self.facing = Some(direction);
        self
    }
}
