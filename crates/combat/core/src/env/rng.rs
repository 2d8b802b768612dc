//! Deterministic randomness for combat rolls.
//!
//! The oracle is stateless: every roll hashes `(game_seed, nonce, actor,
//! context)` into a fresh seed, so replaying a battle with the same seed and
//! inputs reproduces every dodge, crit and effect roll.

use crate::state::EntityId;

/// Stateless random source.
pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform percent roll in `0..100`.
    fn roll_percent(&self, seed: u64) -> u32 {
        self.next_u32(seed) % 100
    }
}

/// PCG-XSH-RR output over a single LCG step.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Always returns the same value. Handy for forcing outcomes in tests and
/// replays of scripted fights.
#[derive(Clone, Copy, Debug)]
pub struct FixedRng(pub u32);

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

/// Mixes the roll inputs into a single seed (SplitMix-style avalanche).
pub fn compute_seed(game_seed: u64, nonce: u64, actor: u32, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(actor).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

/// Successive percent rolls for one resolved action.
///
/// Each draw advances the context, so two rolls in the same action never
/// share a seed. Certain outcomes (0% and 100%) do not consume a draw.
pub struct RollStream<'a> {
    rng: &'a dyn RngOracle,
    game_seed: u64,
    nonce: u64,
    actor: u32,
    context: u32,
}

impl<'a> RollStream<'a> {
    pub fn new(rng: &'a dyn RngOracle, game_seed: u64, nonce: u64, actor: EntityId) -> Self {
        Self {
            rng,
            game_seed,
            nonce,
            actor: actor.0,
            context: 0,
        }
    }

    /// Next roll in `0..100`.
    pub fn percent(&mut self) -> u32 {
        let seed = compute_seed(self.game_seed, self.nonce, self.actor, self.context);
        self.context = self.context.wrapping_add(1);
        self.rng.roll_percent(seed)
    }

    /// True with probability `chance` percent.
    pub fn chance(&mut self, chance: u32) -> bool {
        match chance {
            0 => false,
            c if c >= 100 => true,
            c => self.percent() < c,
        }
    }

    /// Number of rolls drawn so far.
    pub fn draws(&self) -> u32 {
        self.context
    }
}
