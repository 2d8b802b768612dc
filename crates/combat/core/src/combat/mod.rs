//! Action resolution: targeting, damage formulas and the resolver itself.
mod damage;
mod error;
mod outcome;
mod resolver;
mod targeting;

pub use damage::{basic_base_damage, final_damage, fraction_of_max, percent_of, skill_base_damage};
pub use error::ResolveError;
pub use outcome::{ActionOutcome, HitResult, ReactiveTrigger, Resolution, TargetOutcome};
pub use resolver::CombatResolver;
pub use targeting::{knockback, resolve_facing, select_targets, target_tiles};
