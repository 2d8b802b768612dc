//! Deterministic combat rules for a turn-based roguelite.
//!
//! `combat-core` owns the canonical rules (type chart, status effects,
//! modifier aggregation, score chain, action resolution and turn sequencing)
//! and performs no I/O. Every state change flows through
//! [`combat::CombatResolver`] and [`engine::CombatEngine`]; read-only inputs
//! arrive through [`env::CombatEnv`].
pub mod ability;
pub mod action;
pub mod combat;
pub mod config;
pub mod element;
pub mod engine;
pub mod env;
pub mod error;
pub mod modifiers;
pub mod state;

pub use ability::{AbilityId, AbilitySlot};
pub use action::{ActionDescriptor, ActionRequest, SkillRange, SkillSpec};
pub use combat::{
    ActionOutcome, CombatResolver, HitResult, ReactiveTrigger, Resolution, ResolveError,
    TargetOutcome,
};
pub use config::{ChainConfig, ChainTier, CombatConfig, StatusDurations};
pub use element::{EffectivenessTier, Element, InvertedImmunity, TypeChart, Typing};
pub use engine::{
    ActorTurn, CombatEngine, EndOfTurn, ExpiredStatus, SkipReason, TurnError, TurnOutcome,
    TurnReport, UpkeepTick,
};
pub use env::{
    CombatEnv, FixedRng, GridTerrain, OpenTerrain, OracleError, PcgRng, RngOracle, RollStream,
    TerrainOracle,
};
pub use error::{CombatError, ErrorSeverity};
pub use modifiers::{
    Blessing, ComboFlags, ComboState, Difficulty, ElementBoost, Enchantment, FieldConditions,
    FloorEvent, HeldItem, Loadout, ModifierAggregator, ModifierSet, ModifierSource, Relic,
    TalentKind, Talents, TypeGem, Weather, WeatherIntensity,
};
pub use state::{
    ActiveStatus, BattleState, ChainAction, CombatStats, Combatant, Direction, EntityId,
    Position, Roster, ScoreChain, StatusEffect, StatusEffectSet, StatusKind, Team, TurnPhase,
    TurnState,
};
