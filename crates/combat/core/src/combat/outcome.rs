//! Outcome records handed to the presentation layer.
//!
//! Outcomes describe what already happened: HP and statuses are mutated
//! before an outcome is returned, so nothing here needs to be applied again.

use crate::ability::AbilityId;
use crate::element::EffectivenessTier;
use crate::modifiers::{AppliedModifier, ComboFlags};
use crate::state::{Direction, EntityId, StatusKind};

use super::ResolveError;

/// How the action met one target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitResult {
    Hit,
    /// Failed the accuracy roll.
    Missed,
    /// Won the dodge roll (or Shadow Dance was active).
    Dodged,
    /// Effectiveness was 0.
    Immune,
}

/// Status a reactive ability put on the attacker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReactiveTrigger {
    pub ability: AbilityId,
    pub status: StatusKind,
}

/// Per-target result.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetOutcome {
    pub target: EntityId,
    pub result: HitResult,
    /// 0 unless `result` is `Hit` and the action has power.
    pub damage: u32,
    pub effectiveness: f64,
    pub tier: EffectivenessTier,
    pub critical: bool,
    /// Damage multipliers in application order.
    pub modifiers: Vec<AppliedModifier>,
    pub effect_applied: Option<StatusKind>,
    /// Fire hit removed Frozen.
    pub thawed: bool,
    /// Sturdy left the target at 1 HP.
    pub endured: bool,
    pub reactive: Option<ReactiveTrigger>,
    /// Thorns damage dealt back to the attacker.
    pub reflected: u32,
    /// HP the attacker regained.
    pub life_stolen: u32,
    pub knocked_back: u32,
    pub defeated: bool,
}

impl TargetOutcome {
    pub(crate) fn new(target: EntityId, result: HitResult, effectiveness: f64) -> Self {
        Self {
            target,
            result,
            damage: 0,
            effectiveness,
            tier: EffectivenessTier::of(effectiveness),
            critical: false,
            modifiers: Vec::new(),
            effect_applied: None,
            thawed: false,
            endured: false,
            reactive: None,
            reflected: 0,
            life_stolen: 0,
            knocked_back: 0,
            defeated: false,
        }
    }

    pub fn connected(&self) -> bool {
        self.result == HitResult::Hit
    }
}

/// Overall shape of an action's resolution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resolution {
    /// At least one target was resolved (individual targets may still miss).
    Resolved,
    /// No living hostile was in range. The action is consumed.
    MissedEntirely,
    /// Self-only skill.
    SelfApplied { effect: Option<StatusKind> },
    /// Nothing happened.
    NoOp(ResolveError),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    pub actor: EntityId,
    pub action: String,
    pub facing: Option<Direction>,
    pub resolution: Resolution,
    pub targets: Vec<TargetOutcome>,
    /// Single-use combo flags cleared by this action.
    pub consumed_combos: ComboFlags,
    /// Reflection brought the attacker to 0 HP.
    pub attacker_defeated: bool,
}

impl ActionOutcome {
    pub(crate) fn new(
        actor: EntityId,
        action: impl Into<String>,
        facing: Direction,
        resolution: Resolution,
    ) -> Self {
        Self {
            actor,
            action: action.into(),
            facing: Some(facing),
            resolution,
            targets: Vec::new(),
            consumed_combos: ComboFlags::empty(),
            attacker_defeated: false,
        }
    }

    pub fn no_op(actor: EntityId, action: impl Into<String>, reason: ResolveError) -> Self {
        Self {
            actor,
            action: action.into(),
            facing: None,
            resolution: Resolution::NoOp(reason),
            targets: Vec::new(),
            consumed_combos: ComboFlags::empty(),
            attacker_defeated: false,
        }
    }

    pub fn is_no_op(&self) -> bool {
        matches!(self.resolution, Resolution::NoOp(_))
    }

    pub fn total_damage(&self) -> u32 {
        self.targets.iter().map(|t| t.damage).sum()
    }

    pub fn target(&self, id: EntityId) -> Option<&TargetOutcome> {
        self.targets.iter().find(|t| t.target == id)
    }

    /// Targets reduced to 0 HP by this action.
    pub fn defeated(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.targets.iter().filter(|t| t.defeated).map(|t| t.target)
    }
}
