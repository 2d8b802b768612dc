//! Status effect system for combatants.
//!
//! Each kind may be active at most once per combatant. Durations count whole
//! turns; an effect is removed in the same [`StatusEffectSet::tick`] call that
//! brings its counter to zero, so a stored effect always has `turns_left >= 1`.

use arrayvec::ArrayVec;
use strum::{Display, EnumIter, IntoStaticStr};

use crate::config::CombatConfig;
use crate::element::{Element, Typing};

/// Discriminant of a [`StatusEffect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    // ========================================================================
    // Harmful
    // ========================================================================
    Paralyze,
    Burn,
    Frozen,
    BadlyPoisoned,
    Flinch,
    Drowsy,
    Cursed,

    // ========================================================================
    // Beneficial
    // ========================================================================
    AtkUp,
    DefUp,
}

impl StatusKind {
    pub const fn is_harmful(self) -> bool {
        !matches!(self, StatusKind::AtkUp | StatusKind::DefUp)
    }

    /// Whether the status makes its holder lose the action outright.
    pub const fn prevents_action(self) -> bool {
        matches!(
            self,
            StatusKind::Frozen | StatusKind::Flinch | StatusKind::Drowsy
        )
    }

    /// Element that can never carry this status.
    fn immune_element(self) -> &'static [Element] {
        match self {
            StatusKind::Burn => &[Element::Fire],
            StatusKind::Frozen => &[Element::Ice],
            StatusKind::Paralyze => &[Element::Electric],
            StatusKind::BadlyPoisoned => &[Element::Poison, Element::Steel],
            _ => &[],
        }
    }

    /// True when any element of `typing` is immune to this status.
    pub fn is_blocked_by(self, typing: &Typing) -> bool {
        self.immune_element()
            .iter()
            .any(|element| typing.contains(*element))
    }

    /// Fresh effect value with its counters at their starting stage.
    pub const fn fresh(self) -> StatusEffect {
        match self {
            StatusKind::Paralyze => StatusEffect::Paralyze,
            StatusKind::Burn => StatusEffect::Burn,
            StatusKind::Frozen => StatusEffect::Frozen,
            StatusKind::BadlyPoisoned => StatusEffect::BadlyPoisoned { stage: 1 },
            StatusKind::Flinch => StatusEffect::Flinch,
            StatusKind::Drowsy => StatusEffect::Drowsy,
            StatusKind::Cursed => StatusEffect::Cursed { stage: 1 },
            StatusKind::AtkUp => StatusEffect::AtkUp,
            StatusKind::DefUp => StatusEffect::DefUp,
        }
    }
}

/// Active condition with its per-kind payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffect {
    Paralyze,
    Burn,
    Frozen,
    /// Damage grows with `stage` every upkeep.
    BadlyPoisoned {
        stage: u32,
    },
    Flinch,
    Drowsy,
    /// Like BadlyPoisoned, starting one stage ahead.
    Cursed {
        stage: u32,
    },
    AtkUp,
    DefUp,
}

impl StatusEffect {
    pub const fn kind(&self) -> StatusKind {
        match self {
            StatusEffect::Paralyze => StatusKind::Paralyze,
            StatusEffect::Burn => StatusKind::Burn,
            StatusEffect::Frozen => StatusKind::Frozen,
            StatusEffect::BadlyPoisoned { .. } => StatusKind::BadlyPoisoned,
            StatusEffect::Flinch => StatusKind::Flinch,
            StatusEffect::Drowsy => StatusKind::Drowsy,
            StatusEffect::Cursed { .. } => StatusKind::Cursed,
            StatusEffect::AtkUp => StatusKind::AtkUp,
            StatusEffect::DefUp => StatusKind::DefUp,
        }
    }

    /// The next stage of an escalating effect, `None` for the rest.
    pub const fn escalated(self) -> Option<StatusEffect> {
        match self {
            StatusEffect::BadlyPoisoned { stage } => Some(StatusEffect::BadlyPoisoned {
                stage: stage.saturating_add(1),
            }),
            StatusEffect::Cursed { stage } => Some(StatusEffect::Cursed {
                stage: stage.saturating_add(1),
            }),
            _ => None,
        }
    }
}

/// A status effect with its remaining duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveStatus {
    pub effect: StatusEffect,
    /// Always at least 1 while stored.
    pub turns_left: u8,
}

/// Kinds removed by a single [`StatusEffectSet::tick`].
pub type ExpiredStatuses = ArrayVec<StatusKind, { CombatConfig::MAX_STATUS_EFFECTS }>;

/// Active status effects on a combatant, in application order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffectSet {
    effects: ArrayVec<ActiveStatus, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffectSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.effect.kind() == kind)
    }

    pub fn get(&self, kind: StatusKind) -> Option<&ActiveStatus> {
        self.effects.iter().find(|e| e.effect.kind() == kind)
    }

    pub fn get_mut(&mut self, kind: StatusKind) -> Option<&mut ActiveStatus> {
        self.effects.iter_mut().find(|e| e.effect.kind() == kind)
    }

    /// Adds `effect` for `turns` turns.
    ///
    /// Re-applying an active kind is a no-op: the existing duration and
    /// counters are kept. Returns true only when a new entry was inserted.
    pub fn apply(&mut self, effect: StatusEffect, turns: u8) -> bool {
        if turns == 0 || self.has(effect.kind()) {
            return false;
        }

        self.effects
            .try_push(ActiveStatus {
                effect,
                turns_left: turns,
            })
            .is_ok()
    }

    /// Removes a status immediately. Returns true if it was active.
    pub fn remove(&mut self, kind: StatusKind) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.effect.kind() != kind);
        self.effects.len() != before
    }

    /// Removes every harmful status and returns how many were cured.
    pub fn cure_harmful(&mut self) -> usize {
        let before = self.effects.len();
        self.effects.retain(|e| !e.effect.kind().is_harmful());
        before - self.effects.len()
    }

    /// Decrements every duration and drops the ones that reach zero.
    pub fn tick(&mut self) -> ExpiredStatuses {
        let mut expired = ExpiredStatuses::new();

        for status in &mut self.effects {
            status.turns_left = status.turns_left.saturating_sub(1);
            if status.turns_left == 0 {
                expired.push(status.effect.kind());
            }
        }

        self.effects.retain(|e| e.turns_left > 0);
        expired
    }

    pub fn has_harmful(&self) -> bool {
        self.effects.iter().any(|e| e.effect.kind().is_harmful())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveStatus> {
        self.effects.iter()
    }

    pub fn kinds(&self) -> impl Iterator<Item = StatusKind> + '_ {
        self.effects.iter().map(|e| e.effect.kind())
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
