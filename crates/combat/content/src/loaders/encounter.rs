//! Encounter loader.
//!
//! An encounter file describes the arena (bounds and walls), the field
//! conditions and every combatant with its starting position. Loading it
//! yields a ready-to-run [`BattleState`] plus the [`GridTerrain`] oracle.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use combat_core::{
    AbilitySlot, BattleState, CombatStats, Combatant, Direction, Element, EntityId,
    FieldConditions, GridTerrain, HeldItem, Position, Roster, Team, TerrainOracle, Typing,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One combatant as written in an encounter file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantSpec {
    pub id: u32,
    pub name: String,
    pub team: Team,
    pub typing: Typing,
    /// Defaults to the primary element.
    #[serde(default)]
    pub attack_element: Option<Element>,
    pub max_hp: u32,
    /// Defaults to `max_hp`.
    #[serde(default)]
    pub hp: Option<u32>,
    pub atk: u32,
    pub def: u32,
    #[serde(default = "CombatantSpec::default_level")]
    pub level: u32,
    #[serde(default)]
    pub ability: Option<AbilitySlot>,
    #[serde(default)]
    pub held_item: Option<HeldItem>,
    pub position: (i32, i32),
    #[serde(default)]
    pub facing: Direction,
}

impl CombatantSpec {
    fn default_level() -> u32 {
        1
    }

    pub fn build(&self) -> Combatant {
        let stats = CombatStats::new(self.max_hp, self.atk, self.def, self.level);
        let mut combatant = Combatant::new(
            EntityId(self.id),
            self.name.clone(),
            self.team,
            self.typing,
            stats,
        )
        .at(Position::new(self.position.0, self.position.1), self.facing);

        if let Some(element) = self.attack_element {
            combatant = combatant.with_attack_element(element);
        }
        if let Some(hp) = self.hp {
            combatant = combatant.with_hp(hp);
        }
        if let Some(slot) = self.ability {
            // Re-clamp the level; deserialization bypasses the constructor.
            combatant = combatant.with_ability(AbilitySlot::new(slot.id, slot.level()));
        }
        if let Some(item) = &self.held_item {
            combatant = combatant.with_held_item(item.clone());
        }
        combatant
    }
}

/// Arena description for RON files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterSpec {
    pub name: String,
    pub seed: u64,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub walls: Vec<(i32, i32)>,
    #[serde(default)]
    pub field: FieldConditions,
    pub combatants: Vec<CombatantSpec>,
}

/// A loaded, validated encounter.
#[derive(Debug, Clone, PartialEq)]
pub struct Encounter {
    pub name: String,
    pub state: BattleState,
    pub terrain: GridTerrain,
}

impl EncounterSpec {
    /// Validates the layout and builds the battle state.
    pub fn build(&self) -> LoadResult<Encounter> {
        let terrain = self
            .walls
            .iter()
            .fold(GridTerrain::new(self.width, self.height), |grid, &(x, y)| {
                grid.with_wall(Position::new(x, y))
            });

        let players = self
            .combatants
            .iter()
            .filter(|spec| spec.team == Team::Player)
            .count();
        anyhow::ensure!(players == 1, "expected exactly one player, found {players}");

        let mut ids = HashSet::new();
        let mut tiles = HashSet::new();
        let mut roster = Roster::new();
        for spec in &self.combatants {
            anyhow::ensure!(ids.insert(spec.id), "duplicate combatant id {}", spec.id);
            anyhow::ensure!(
                (spec.team == Team::Player) == EntityId(spec.id).is_player(),
                "combatant '{}': the player must use id {} and nobody else may",
                spec.name,
                EntityId::PLAYER.0
            );
            anyhow::ensure!(spec.max_hp > 0, "combatant '{}' has no max_hp", spec.name);

            let combatant = spec.build();
            anyhow::ensure!(
                terrain.is_passable(combatant.position),
                "combatant '{}' stands outside the arena or inside a wall at {:?}",
                spec.name,
                spec.position
            );
            anyhow::ensure!(
                tiles.insert(combatant.position),
                "combatant '{}' shares tile {:?}",
                spec.name,
                spec.position
            );
            roster.insert(combatant);
        }

        let state = BattleState::new(self.seed, roster).with_field(self.field);
        Ok(Encounter {
            name: self.name.clone(),
            state,
            terrain,
        })
    }
}

/// Loader for encounter layouts from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    pub fn load(path: &Path) -> LoadResult<Encounter> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid encounter {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Encounter> {
        let spec: EncounterSpec =
            ron::from_str(content).context("Failed to parse encounter RON")?;
        spec.build()
    }
}
