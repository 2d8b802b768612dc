//! Greedy player policy.
//!
//! Tries every facing with the basic attack and every catalog skill and keeps
//! the highest expected damage. Status skills count for a flat amount per
//! target that can still receive the effect.
use combat_content::SkillCatalog;
use combat_core::combat::{basic_base_damage, select_targets, skill_base_damage};
use combat_core::{
    ActionDescriptor, ActionRequest, BattleState, Combatant, Direction, EntityId, SkillSpec,
    TerrainOracle, TypeChart,
};
use strum::IntoEnumIterator;

const STATUS_VALUE: f64 = 8.0;

pub struct GreedyPolicy<'a> {
    skills: &'a SkillCatalog,
}

impl<'a> GreedyPolicy<'a> {
    pub fn new(skills: &'a SkillCatalog) -> Self {
        Self { skills }
    }

    /// The player's action for this turn, or `None` once the player is gone.
    pub fn choose(
        &self,
        state: &BattleState,
        terrain: &dyn TerrainOracle,
    ) -> Option<ActionRequest> {
        let player = state.roster.player().filter(|player| player.is_alive())?;

        let mut best: Option<(f64, ActionRequest)> = None;
        for facing in Direction::iter() {
            let basic = ActionDescriptor::BasicAttack;
            let candidates = std::iter::once(basic).chain(
                self.skills
                    .skills
                    .iter()
                    .filter(|skill| !skill.range.is_self_only())
                    .cloned()
                    .map(ActionDescriptor::Skill),
            );

            for action in candidates {
                let score = score(state, player, &action, facing, terrain);
                if score > best.as_ref().map_or(0.0, |(top, _)| *top) {
                    let request = ActionRequest::new(EntityId::PLAYER, action).facing(facing);
                    best = Some((score, request));
                }
            }
        }

        best.map(|(_, request)| request)
            .or_else(|| self.self_buff(player))
            .or_else(|| Some(approach(state, player)))
    }

    /// First self-targeted skill whose effect is not already active.
    fn self_buff(&self, player: &Combatant) -> Option<ActionRequest> {
        self.skills
            .skills
            .iter()
            .filter(|skill| skill.range.is_self_only())
            .find(|skill| skill.effect.is_some_and(|kind| !player.statuses.has(kind)))
            .map(|skill| ActionRequest::skill(EntityId::PLAYER, skill.clone()))
    }
}

fn score(
    state: &BattleState,
    player: &Combatant,
    action: &ActionDescriptor,
    facing: Direction,
    terrain: &dyn TerrainOracle,
) -> f64 {
    select_targets(&state.roster, player, action.range(), facing, terrain)
        .into_iter()
        .filter_map(|id| state.roster.get(id))
        .map(|target| match action {
            ActionDescriptor::BasicAttack => {
                let base = basic_base_damage(player.stats.atk, target.stats.def);
                f64::from(base) * TypeChart::effectiveness(player.attack_element, &target.typing)
            }
            ActionDescriptor::Skill(skill) => skill_score(player, target, skill),
        })
        .sum()
}

fn skill_score(player: &Combatant, target: &Combatant, skill: &SkillSpec) -> f64 {
    let effectiveness = TypeChart::effectiveness(skill.element, &target.typing);
    if effectiveness <= TypeChart::IMMUNE {
        return 0.0;
    }

    let hit = f64::from(skill.accuracy) / 100.0;
    let effect = skill
        .effect
        .filter(|kind| !target.statuses.has(*kind) && !kind.is_blocked_by(&target.typing))
        .map_or(0.0, |_| STATUS_VALUE * f64::from(skill.effect_chance) / 100.0);

    if skill.is_status_only() {
        return effect * hit;
    }

    let base = skill_base_damage(skill.power, player.stats.atk, target.stats.def);
    let damage = f64::from(base) * effectiveness;
    (damage + effect) * hit
}

/// Nothing in reach: face the nearest enemy so the next turn can connect.
fn approach(state: &BattleState, player: &Combatant) -> ActionRequest {
    let facing = state
        .roster
        .iter()
        .filter(|c| c.team != player.team && c.is_alive())
        .min_by_key(|c| (player.position.chebyshev(c.position), c.id))
        .and_then(|enemy| Direction::toward(player.position, enemy.position))
        .unwrap_or(player.facing);
    ActionRequest::basic(EntityId::PLAYER).facing(facing)
}
