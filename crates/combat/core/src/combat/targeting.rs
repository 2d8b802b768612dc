//! Tile and target selection for actions.
//!
//! Targets are always living members of the opposing side; friendly fire is
//! impossible because same-side occupants are filtered out here. Lengths,
//! radii and knockback are capped at [`CombatConfig::MAX_SKILL_REACH`].

use crate::action::SkillRange;
use crate::config::CombatConfig;
use crate::env::TerrainOracle;
use crate::state::{Combatant, Direction, EntityId, Position, Roster};

/// Tiles covered by `range` from `origin` facing `facing`, in resolution order.
pub fn target_tiles(
    range: SkillRange,
    origin: Position,
    facing: Direction,
    terrain: &dyn TerrainOracle,
) -> Vec<Position> {
    match range {
        SkillRange::SelfOnly => vec![origin],
        SkillRange::Front => vec![origin.step(facing)],
        SkillRange::Wide => vec![
            origin.step(facing),
            origin.step(facing.counter_clockwise()),
            origin.step(facing.clockwise()),
        ],
        SkillRange::Line { length } | SkillRange::Bolt { length } => {
            ray(origin, facing, length, terrain)
        }
        SkillRange::Area { radius } => area(origin, radius, terrain),
    }
}

fn ray(
    origin: Position,
    facing: Direction,
    length: u32,
    terrain: &dyn TerrainOracle,
) -> Vec<Position> {
    let mut tiles = Vec::new();
    let mut cursor = origin;
    for _ in 0..length.min(CombatConfig::MAX_SKILL_REACH) {
        cursor = cursor.step(facing);
        if !terrain.is_passable(cursor) {
            break;
        }
        tiles.push(cursor);
    }
    tiles
}

fn area(origin: Position, radius: u32, terrain: &dyn TerrainOracle) -> Vec<Position> {
    let r = radius.min(CombatConfig::MAX_SKILL_REACH) as i32;
    let mut tiles = Vec::new();
    for y in origin.y.saturating_sub(r)..=origin.y.saturating_add(r) {
        for x in origin.x.saturating_sub(r)..=origin.x.saturating_add(r) {
            let tile = Position::new(x, y);
            if tile != origin && terrain.line_of_sight(origin, tile) {
                tiles.push(tile);
            }
        }
    }
    tiles
}

/// Living hostile combatants hit by `range`, in tile order without duplicates.
pub fn select_targets(
    roster: &Roster,
    attacker: &Combatant,
    range: SkillRange,
    facing: Direction,
    terrain: &dyn TerrainOracle,
) -> Vec<EntityId> {
    if range.is_self_only() {
        return vec![attacker.id];
    }

    let mut targets = Vec::new();
    for tile in target_tiles(range, attacker.position, facing, terrain) {
        let Some(occupant) = roster.occupant_at(tile) else {
            continue;
        };
        if !occupant.team.is_hostile_to(attacker.team) || targets.contains(&occupant.id) {
            continue;
        }
        targets.push(occupant.id);
        if matches!(range, SkillRange::Bolt { .. }) {
            break;
        }
    }
    targets
}

/// Facing an actor uses when none was given explicitly: toward the player for
/// enemies, the current facing otherwise.
pub fn resolve_facing(
    roster: &Roster,
    actor: &Combatant,
    explicit: Option<Direction>,
) -> Direction {
    if let Some(direction) = explicit {
        return direction;
    }
    if actor.team.is_player_side() {
        return actor.facing;
    }
    roster
        .player()
        .and_then(|player| Direction::toward(actor.position, player.position))
        .unwrap_or(actor.facing)
}

/// Pushes `target` up to `tiles` steps along `direction`. Stops at the first
/// impassable or occupied tile. Returns the number of tiles moved.
pub fn knockback(
    roster: &mut Roster,
    target: EntityId,
    direction: Direction,
    tiles: u32,
    terrain: &dyn TerrainOracle,
) -> u32 {
    let Some(start) = roster.get(target).map(|c| c.position) else {
        return 0;
    };

    let mut position = start;
    let mut moved = 0;
    while moved < tiles.min(CombatConfig::MAX_SKILL_REACH) {
        let next = position.step(direction);
        if !terrain.is_passable(next) || roster.is_occupied(next) {
            break;
        }
        position = next;
        moved += 1;
    }

    if let Some(combatant) = roster.get_mut(target) {
        combatant.position = position;
    }
    moved
}
