//! Elements and the type-effectiveness table.
//!
//! The table is a pure lookup. Dual-typed defenders multiply the two single
//! lookups; the product is not capped here; damage computation caps nothing
//! either, it only floors the final integer.

use strum::{Display, EnumCount, EnumIter, IntoStaticStr};

/// Elemental type of a combatant or an attack.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumCount,
    IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Element {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

/// One or two elements carried by a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Typing {
    pub primary: Element,
    pub secondary: Option<Element>,
}

impl Typing {
    pub const fn single(primary: Element) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    pub const fn dual(primary: Element, secondary: Element) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }

    pub fn contains(&self, element: Element) -> bool {
        self.primary == element || self.secondary == Some(element)
    }

    pub fn iter(&self) -> impl Iterator<Item = Element> + '_ {
        core::iter::once(self.primary).chain(self.secondary)
    }
}

/// How an immune (0×) matchup behaves while effectiveness is inverted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvertedImmunity {
    /// 0× stays 0×.
    #[default]
    StaysImmune,
    /// 0× becomes 1×.
    Neutral,
    /// 0× becomes 2×, mirroring how resistances flip.
    SuperEffective,
}

/// Coarse classification of an effectiveness multiplier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectivenessTier {
    Immune,
    Resisted,
    Neutral,
    Effective,
    SuperEffective,
}

impl EffectivenessTier {
    pub fn of(multiplier: f64) -> Self {
        if multiplier <= 0.0 {
            Self::Immune
        } else if multiplier < 1.0 {
            Self::Resisted
        } else if multiplier == 1.0 {
            Self::Neutral
        } else if multiplier < TypeChart::SUPER_EFFECTIVE {
            Self::Effective
        } else {
            Self::SuperEffective
        }
    }
}

/// Static type×type matrix.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeChart;

impl TypeChart {
    pub const IMMUNE: f64 = 0.0;
    pub const RESISTED: f64 = 0.5;
    pub const NEUTRAL: f64 = 1.0;
    pub const SUPER_EFFECTIVE: f64 = 2.0;

    /// Single attack-vs-defend lookup.
    pub const fn lookup(attack: Element, defend: Element) -> f64 {
        use Element::*;

        const X: f64 = TypeChart::IMMUNE;
        const H: f64 = TypeChart::RESISTED;
        const D: f64 = TypeChart::SUPER_EFFECTIVE;

        match (attack, defend) {
            (Normal, Rock | Steel) => H,
            (Normal, Ghost) => X,

            (Fire, Grass | Ice | Bug | Steel) => D,
            (Fire, Fire | Water | Rock | Dragon) => H,

            (Water, Fire | Ground | Rock) => D,
            (Water, Water | Grass | Dragon) => H,

            (Electric, Water | Flying) => D,
            (Electric, Electric | Grass | Dragon) => H,
            (Electric, Ground) => X,

            (Grass, Water | Ground | Rock) => D,
            (Grass, Fire | Grass | Poison | Flying | Bug | Dragon | Steel) => H,

            (Ice, Grass | Ground | Flying | Dragon) => D,
            (Ice, Fire | Water | Ice | Steel) => H,

            (Fighting, Normal | Ice | Rock | Dark | Steel) => D,
            (Fighting, Poison | Flying | Psychic | Bug | Fairy) => H,
            (Fighting, Ghost) => X,

            (Poison, Grass | Fairy) => D,
            (Poison, Poison | Ground | Rock | Ghost) => H,
            (Poison, Steel) => X,

            (Ground, Fire | Electric | Poison | Rock | Steel) => D,
            (Ground, Grass | Bug) => H,
            (Ground, Flying) => X,

            (Flying, Grass | Fighting | Bug) => D,
            (Flying, Electric | Rock | Steel) => H,

            (Psychic, Fighting | Poison) => D,
            (Psychic, Psychic | Steel) => H,
            (Psychic, Dark) => X,

            (Bug, Grass | Psychic | Dark) => D,
            (Bug, Fire | Fighting | Poison | Flying | Ghost | Steel | Fairy) => H,

            (Rock, Fire | Ice | Flying | Bug) => D,
            (Rock, Fighting | Ground | Steel) => H,

            (Ghost, Psychic | Ghost) => D,
            (Ghost, Dark) => H,
            (Ghost, Normal) => X,

            (Dragon, Dragon) => D,
            (Dragon, Steel) => H,
            (Dragon, Fairy) => X,

            (Dark, Psychic | Ghost) => D,
            (Dark, Fighting | Dark | Fairy) => H,

            (Steel, Ice | Rock | Fairy) => D,
            (Steel, Fire | Water | Electric | Steel) => H,

            (Fairy, Fighting | Dragon | Dark) => D,
            (Fairy, Fire | Poison | Steel) => H,

            _ => TypeChart::NEUTRAL,
        }
    }

    /// Flips a single lookup around 1.0.
    pub fn invert(multiplier: f64, immunity: InvertedImmunity) -> f64 {
        if multiplier <= Self::IMMUNE {
            match immunity {
                InvertedImmunity::StaysImmune => Self::IMMUNE,
                InvertedImmunity::Neutral => Self::NEUTRAL,
                InvertedImmunity::SuperEffective => Self::SUPER_EFFECTIVE,
            }
        } else {
            1.0 / multiplier
        }
    }

    /// Effectiveness of `attack` against every element in `defender`.
    pub fn effectiveness(attack: Element, defender: &Typing) -> f64 {
        defender
            .iter()
            .map(|defend| Self::lookup(attack, defend))
            .product()
    }

    /// Effectiveness with each single lookup inverted before multiplying.
    pub fn inverted_effectiveness(
        attack: Element,
        defender: &Typing,
        immunity: InvertedImmunity,
    ) -> f64 {
        defender
            .iter()
            .map(|defend| Self::invert(Self::lookup(attack, defend), immunity))
            .product()
    }
}
