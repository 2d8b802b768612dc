//! Ordered modifier stacks.
//!
//! Stat stacks follow Flat → multipliers: every flat bonus is added to the
//! base first, then each multiplier is applied in insertion order. Damage
//! stacks are pure multiplier chains. Both keep their entries tagged with a
//! [`ModifierSource`] so outcomes can report a breakdown.

/// Where a modifier came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierSource {
    Effectiveness,
    Ability,
    HeldItem,
    Enchantment,
    Relic,
    Blessing,
    Talent,
    Status,
    Difficulty,
    Weather,
    WeatherSynergy,
    Critical,
    Combo,
    TypeGem,
    FloorEvent,
}

/// A single bonus applied to a stat.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatBonus {
    /// Added to the base before any multiplier.
    Flat(u32),
    /// `20` means ×1.2.
    Percent(u32),
    Multiplier(f64),
}

impl StatBonus {
    fn factor(self) -> Option<f64> {
        match self {
            StatBonus::Flat(_) => None,
            StatBonus::Percent(percent) => Some(1.0 + f64::from(percent) / 100.0),
            StatBonus::Multiplier(factor) => Some(factor),
        }
    }
}

/// A multiplier that was actually applied, for reporting.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedModifier {
    pub source: ModifierSource,
    pub factor: f64,
}

/// Bonuses for one stat, applied as `(base + Σflat) × m₁ × m₂ × …`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatStack {
    entries: Vec<(ModifierSource, StatBonus)>,
}

impl StatStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a bonus. Neutral bonuses (flat 0, 0%, ×1.0) are skipped.
    pub fn add(&mut self, source: ModifierSource, bonus: StatBonus) {
        let neutral = match bonus {
            StatBonus::Flat(value) | StatBonus::Percent(value) => value == 0,
            StatBonus::Multiplier(factor) => factor == 1.0,
        };
        if !neutral {
            self.entries.push((source, bonus));
        }
    }

    pub fn flat_total(&self) -> u32 {
        self.entries
            .iter()
            .filter_map(|(_, bonus)| match bonus {
                StatBonus::Flat(value) => Some(*value),
                _ => None,
            })
            .fold(0u32, u32::saturating_add)
    }

    /// Applies the stack to `base`, flooring the result.
    pub fn apply(&self, base: u32) -> u32 {
        let start = f64::from(base.saturating_add(self.flat_total()));
        let value = self
            .entries
            .iter()
            .filter_map(|(_, bonus)| bonus.factor())
            .fold(start, |acc, factor| acc * factor.max(0.0));

        // `as` saturates for out-of-range floats.
        value.floor() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Ordered chain of damage multipliers.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageStack {
    applied: Vec<AppliedModifier>,
}

impl DamageStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a multiplier. ×1.0 entries are not recorded.
    pub fn push(&mut self, source: ModifierSource, factor: f64) {
        if factor != 1.0 {
            self.applied.push(AppliedModifier { source, factor });
        }
    }

    pub fn product(&self) -> f64 {
        self.applied.iter().fold(1.0, |acc, m| acc * m.factor)
    }

    /// `max(1, floor(base × Π))`.
    pub fn apply(&self, base: u32) -> u32 {
        let value = self
            .applied
            .iter()
            .fold(f64::from(base), |acc, m| acc * m.factor);
        (value.floor() as u32).max(1)
    }

    pub fn applied(&self) -> &[AppliedModifier] {
        &self.applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_bonuses_come_before_multipliers() {
        let mut stack = StatStack::new();
        stack.add(ModifierSource::Relic, StatBonus::Percent(50));
        stack.add(ModifierSource::HeldItem, StatBonus::Flat(4));
        stack.add(ModifierSource::Ability, StatBonus::Multiplier(1.5));

        // (10 + 4) × 1.5 × 1.5
        assert_eq!(stack.apply(10), 31);
    }

    #[test]
    fn neutral_entries_are_dropped() {
        let mut stack = StatStack::new();
        stack.add(ModifierSource::Talent, StatBonus::Flat(0));
        stack.add(ModifierSource::Blessing, StatBonus::Percent(0));
        assert!(stack.is_empty());

        let mut damage = DamageStack::new();
        damage.push(ModifierSource::Weather, 1.0);
        assert!(damage.applied().is_empty());
    }

    #[test]
    fn damage_never_drops_below_one() {
        let mut damage = DamageStack::new();
        damage.push(ModifierSource::Effectiveness, 0.25);
        damage.push(ModifierSource::Weather, 0.5);
        assert_eq!(damage.apply(3), 1);
    }

    #[test]
    fn super_effective_crit() {
        let mut damage = DamageStack::new();
        damage.push(ModifierSource::Effectiveness, 2.0);
        damage.push(ModifierSource::Critical, 1.5);
        assert_eq!(damage.apply(15), 45);
        assert_eq!(damage.product(), 3.0);
    }
}
