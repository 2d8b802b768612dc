//! Damage formulas.
//!
//! Every function here saturates: damage from a connecting hit is never below
//! 1 and HP never drops below 0.

use crate::modifiers::DamageStack;

// ============================================================================
// Base Damage
// ============================================================================

/// Basic attack base damage.
///
/// ```text
/// max(1, atk - floor(def / 2))
/// ```
pub fn basic_base_damage(attack: u32, defense: u32) -> u32 {
    attack.saturating_sub(defense / 2).max(1)
}

/// Skill base damage.
///
/// ```text
/// max(1, floor(power * atk / 10) - floor(def / 2))
/// ```
pub fn skill_base_damage(power: u32, attack: u32, defense: u32) -> u32 {
    let raw = u64::from(power) * u64::from(attack) / 10;
    let raw = u32::try_from(raw).unwrap_or(u32::MAX);
    raw.saturating_sub(defense / 2).max(1)
}

/// Final damage after every multiplier: `max(1, floor(base × Π))`.
pub fn final_damage(base: u32, multipliers: &DamageStack) -> u32 {
    multipliers.apply(base)
}

// ============================================================================
// Derived Amounts
// ============================================================================

/// `max(1, floor(amount × percent / 100))`, or 0 when `amount` is 0.
///
/// Used for Thorns reflection and life-steal, which only trigger on real
/// damage.
pub fn percent_of(amount: u32, percent: u32) -> u32 {
    if amount == 0 || percent == 0 {
        return 0;
    }
    let scaled = u64::from(amount) * u64::from(percent) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
}

/// `max(1, floor(max_hp × numerator / denominator))`.
pub fn fraction_of_max(max_hp: u32, numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        return 1;
    }
    let scaled = u64::from(max_hp) * u64::from(numerator) / u64::from(denominator);
    u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::ModifierSource;
    use proptest::prelude::*;

    #[test]
    fn neutral_basic_hit() {
        assert_eq!(basic_base_damage(20, 10), 15);
    }

    #[test]
    fn overwhelming_defense_still_deals_one() {
        assert_eq!(basic_base_damage(3, 100), 1);
        assert_eq!(skill_base_damage(10, 3, 100), 1);
    }

    #[test]
    fn skill_formula_floors_each_term() {
        // floor(45 * 13 / 10) - floor(9 / 2) = 58 - 4
        assert_eq!(skill_base_damage(45, 13, 9), 54);
    }

    #[test]
    fn thorns_reflects_ten_percent() {
        assert_eq!(percent_of(20, 10), 2);
        assert_eq!(percent_of(5, 10), 1);
        assert_eq!(percent_of(0, 10), 0);
    }

    #[test]
    fn upkeep_fractions() {
        assert_eq!(fraction_of_max(100, 1, 16), 6);
        assert_eq!(fraction_of_max(10, 1, 16), 1);
        assert_eq!(fraction_of_max(64, 3, 16), 12);
    }

    proptest! {
        #[test]
        fn final_damage_is_positive(
            atk in 0u32..10_000,
            def in 0u32..10_000,
            power in 1u32..300,
            factor in 0.0f64..8.0,
        ) {
            let mut stack = DamageStack::new();
            stack.push(ModifierSource::Effectiveness, factor);

            let basic = basic_base_damage(atk, def);
            let skill = skill_base_damage(power, atk, def);
            prop_assert!(final_damage(basic, &stack) >= 1);
            prop_assert!(final_damage(skill, &stack) >= 1);
        }
    }
}
