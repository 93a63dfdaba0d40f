//! Creature stats and their inheritance
//!
//! Every breeding instance carries growth, gain and strength in `[1, 10]`.
//! When two instances reproduce, the offspring's stats depend on how the
//! resolved child breed relates to the parents' breeds:
//! - Same breed on both sides, bred true: strength-weighted average plus a
//!   small random mutation
//! - Child matches exactly one parent: that parent's stats are copied
//! - Child matches neither: baseline stats

use serde::{Deserialize, Serialize};

use crate::breed::BreedId;
use crate::rng::BreedRng;

pub const MIN_STAT: u8 = 1;
pub const MAX_STAT: u8 = 10;

/// Genetic stats of a breeding instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredStats", into = "StoredStats")]
pub struct CreatureStats {
    growth: u8,
    gain: u8,
    strength: u8,
    analysed: bool,
}

/// Persisted form of [`CreatureStats`]; out-of-range values clamp on load
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct StoredStats {
    growth: i32,
    gain: i32,
    strength: i32,
    #[serde(default)]
    analysed: bool,
}

impl From<StoredStats> for CreatureStats {
    fn from(stored: StoredStats) -> Self {
        let mut stats = Self::new(stored.growth, stored.gain, stored.strength);
        stats.analysed = stored.analysed;
        stats
    }
}

impl From<CreatureStats> for StoredStats {
    fn from(stats: CreatureStats) -> Self {
        Self {
            growth: stats.growth.into(),
            gain: stats.gain.into(),
            strength: stats.strength.into(),
            analysed: stats.analysed,
        }
    }
}

fn clamp_stat(value: i32) -> u8 {
    value.clamp(MIN_STAT.into(), MAX_STAT.into()) as u8
}

impl CreatureStats {
    /// Create stats, clamping each value into `[1, 10]`
    pub fn new(growth: i32, gain: i32, strength: i32) -> Self {
        Self {
            growth: clamp_stat(growth),
            gain: clamp_stat(gain),
            strength: clamp_stat(strength),
            analysed: false,
        }
    }

    /// Baseline stats for a freshly discovered breed
    pub fn baseline() -> Self {
        Self::new(1, 1, 1)
    }

    pub fn growth(&self) -> u8 {
        self.growth
    }

    pub fn gain(&self) -> u8 {
        self.gain
    }

    pub fn strength(&self) -> u8 {
        self.strength
    }

    /// Whether the stats have been revealed to the player
    pub fn analysed(&self) -> bool {
        self.analysed
    }

    pub fn set_analysed(&mut self, analysed: bool) {
        self.analysed = analysed;
    }

    /// The same stats with the analysed flag cleared
    fn unanalysed(self) -> Self {
        Self {
            analysed: false,
            ..self
        }
    }
}

impl Default for CreatureStats {
    fn default() -> Self {
        Self::baseline()
    }
}

/// How an offspring's stats derive from its parents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inheritance {
    /// Both parents and the child share one breed
    Mutating,
    /// Child is the first parent's breed only
    FromFirst,
    /// Child is the second parent's breed only
    FromSecond,
    /// Child is a new breed
    None,
}

impl Inheritance {
    /// Classify the (first parent, second parent, child) breed triple
    pub fn classify(first: BreedId, second: BreedId, child: BreedId) -> Self {
        match (child == first, child == second) {
            (true, true) => Self::Mutating,
            (true, false) => Self::FromFirst,
            (false, true) => Self::FromSecond,
            (false, false) => Self::None,
        }
    }

    /// Compute offspring stats. Only [`Inheritance::Mutating`] draws randomness.
    pub fn offspring_stats<R: BreedRng + ?Sized>(
        self,
        first: &CreatureStats,
        second: &CreatureStats,
        rng: &mut R,
    ) -> CreatureStats {
        match self {
            Self::Mutating => {
                let (s1, s2) = (first.strength, second.strength);
                let growth = mutate_stat(s1, s2, first.growth, second.growth, rng);
                let gain = mutate_stat(s1, s2, first.gain, second.gain, rng);
                let strength = mutate_stat(s1, s2, s1, s2, rng);
                CreatureStats {
                    growth,
                    gain,
                    strength,
                    analysed: false,
                }
            }
            Self::FromFirst => first.unanalysed(),
            Self::FromSecond => second.unanalysed(),
            Self::None => CreatureStats::baseline(),
        }
    }
}

/// Strength-weighted average of two stats, rounded half up
fn weighted_average(strength1: u8, strength2: u8, stat1: u8, stat2: u8) -> i32 {
    let (strength1, strength2) = (i32::from(strength1), i32::from(strength2));
    let numerator = i32::from(stat1) * strength1 + i32::from(stat2) * strength2;
    let denominator = (strength1 + strength2).max(1);
    (numerator + denominator / 2) / denominator
}

fn mutate_stat<R: BreedRng + ?Sized>(
    strength1: u8,
    strength2: u8,
    stat1: u8,
    stat2: u8,
    rng: &mut R,
) -> u8 {
    let mutation = i32::from(rng.mutation());
    clamp_stat(weighted_average(strength1, strength2, stat1, stat2) + mutation)
}
