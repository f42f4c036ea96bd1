//! Dice: a reproducible pair of six-sided dice with session-long frequency
//! stats and pluggable per-number streak observers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use crate::game::entities::Roll;
use crate::stats::{ConsecutiveNumberStatsKeeper, StreakSnapshot};

const NUM_DICE: usize = 2;
const NUM_FACES: u8 = 6;

/// Source of raw die faces. The production source is [`SeededRoller`];
/// [`ScriptedRoller`] replays a fixed script for scenario tests and demos.
pub trait DiceRoller {
    /// Shake both dice and return their faces.
    fn shake(&mut self) -> (u8, u8);
}

/// One six-sided die with its own random stream.
#[derive(Debug)]
struct Die {
    rng: StdRng,
}

impl Die {
    fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn roll(&mut self) -> u8 {
        self.rng.random_range(1..=NUM_FACES)
    }
}

/// Two dice seeded from a single root seed. The root stream hands one
/// sub-seed to each die so the dice are decorrelated while the whole
/// session replays bit-for-bit from the root seed alone.
#[derive(Debug)]
pub struct SeededRoller {
    dice: [Die; NUM_DICE],
}

impl SeededRoller {
    #[must_use]
    pub fn from_seed(root_seed: u64) -> Self {
        let mut root = StdRng::seed_from_u64(root_seed);
        Self {
            dice: [Die::new(root.random()), Die::new(root.random())],
        }
    }
}

impl DiceRoller for SeededRoller {
    fn shake(&mut self) -> (u8, u8) {
        (self.dice[0].roll(), self.dice[1].roll())
    }
}

/// Replays a fixed face script. Once the script runs out it keeps rolling
/// sevens, which terminates any turn in progress.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRoller {
    script: VecDeque<(u8, u8)>,
}

impl ScriptedRoller {
    #[must_use]
    pub fn from_faces(faces: &[(u8, u8)]) -> Self {
        Self {
            script: faces.iter().copied().collect(),
        }
    }
}

impl DiceRoller for ScriptedRoller {
    fn shake(&mut self) -> (u8, u8) {
        self.script.pop_front().unwrap_or((4, 3))
    }
}

/// Session-long dice statistics, ready for serialization.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DiceSnapshot {
    pub total_rolls: u64,
    pub frequency: BTreeMap<u8, u64>,
    pub streaks: BTreeMap<String, StreakSnapshot>,
}

/// The pair of dice on the table. Owns the sum-frequency histogram, the
/// total roll counter, and any attached streak observers.
pub struct Dice {
    roller: Box<dyn DiceRoller>,
    faces: (u8, u8),
    total_rolls: u64,
    freqs: [u64; 13],
    streaks: Vec<ConsecutiveNumberStatsKeeper>,
}

impl Dice {
    /// Dice seeded from a root seed; replays are bit-identical.
    #[must_use]
    pub fn from_seed(root_seed: u64) -> Self {
        Self::with_roller(Box::new(SeededRoller::from_seed(root_seed)))
    }

    #[must_use]
    pub fn with_roller(roller: Box<dyn DiceRoller>) -> Self {
        Self {
            roller,
            // resting position until the first shake
            faces: (4, 3),
            total_rolls: 0,
            freqs: [0; 13],
            streaks: Vec::new(),
        }
    }

    /// Attach a session-scoped streak observer, notified on every roll.
    pub fn attach_streak_keeper(&mut self, keeper: ConsecutiveNumberStatsKeeper) {
        self.streaks.push(keeper);
    }

    #[must_use]
    pub fn streak_keepers(&self) -> &[ConsecutiveNumberStatsKeeper] {
        &self.streaks
    }

    /// Shake, tally the histogram and total, and notify streak observers.
    pub fn roll(&mut self) -> Roll {
        self.faces = self.roller.shake();
        let (a, b) = self.faces;
        debug_assert!((1..=NUM_FACES).contains(&a) && (1..=NUM_FACES).contains(&b));
        let sum = a + b;
        let hard = a == b && matches!(sum, 4 | 6 | 8 | 10);
        self.total_rolls += 1;
        self.freqs[sum as usize] += 1;
        for keeper in &mut self.streaks {
            keeper.observe(sum);
        }
        Roll::new(sum, hard)
    }

    /// Face currently showing on one die.
    ///
    /// # Panics
    ///
    /// Panics on a die index other than 0 or 1.
    #[must_use]
    pub fn die(&self, index: usize) -> u8 {
        assert!(index < NUM_DICE, "invalid die number {index}");
        if index == 0 { self.faces.0 } else { self.faces.1 }
    }

    #[must_use]
    pub fn sum(&self) -> u8 {
        self.faces.0 + self.faces.1
    }

    #[must_use]
    pub const fn total_rolls(&self) -> u64 {
        self.total_rolls
    }

    #[must_use]
    pub fn frequency(&self, sum: u8) -> u64 {
        self.freqs.get(sum as usize).copied().unwrap_or(0)
    }

    /// Clear the histogram, the roll counter, and every streak observer.
    pub fn reset(&mut self) {
        self.freqs.fill(0);
        self.total_rolls = 0;
        for keeper in &mut self.streaks {
            keeper.reset();
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> DiceSnapshot {
        DiceSnapshot {
            total_rolls: self.total_rolls,
            frequency: (2..=12).map(|sum| (sum, self.frequency(sum))).collect(),
            streaks: self
                .streaks
                .iter()
                .map(|keeper| (format!("consecutive_{}", keeper.target()), keeper.snapshot()))
                .collect(),
        }
    }
}

impl fmt::Debug for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dice")
            .field("faces", &self.faces)
            .field("total_rolls", &self.total_rolls)
            .finish_non_exhaustive()
    }
}
