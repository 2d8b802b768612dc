//! Modifier sources and their aggregation.
//!
//! Sources are plain read-only data ([`Loadout`], [`HeldItem`],
//! [`FieldConditions`], [`ComboState`]). [`ModifierAggregator`] folds them into
//! per-resolution numbers in a fixed order.
mod aggregate;
mod combo;
mod field;
mod loadout;
mod stack;

pub use aggregate::{ModifierAggregator, ModifierSet, STAT_STATUS_MULTIPLIER};
pub use combo::{ComboFlags, ComboState};
pub use field::{FieldConditions, FloorEvent, Weather, WeatherIntensity};
pub use loadout::{
    Blessing, Difficulty, ElementBoost, Enchantment, HeldItem, Loadout, Relic, TalentKind, Talents,
    TypeGem,
};
pub use stack::{AppliedModifier, DamageStack, ModifierSource, StatBonus, StatStack};
