//! Quadratic probe sequence

use super::slot::RollNumber;
use super::CAPACITY;

/// Base index for a roll number
///
/// Uses the Euclidean remainder so negative rolls land in range too:
/// `-1` maps to `CAPACITY - 1`, `-CAPACITY` maps to `0`.
#[inline]
pub fn home_index(roll: RollNumber) -> usize {
    roll.rem_euclid(CAPACITY as RollNumber) as usize
}

/// Index visited on a given attempt: `(base + attempt²) mod CAPACITY`
#[inline]
pub fn probe_index(base: usize, attempt: usize) -> usize {
    (base + attempt * attempt) % CAPACITY
}

/// Iterator over `(attempt, index)` pairs for one operation
///
/// Yields exactly `CAPACITY` steps. Indices may repeat, and some slots are
/// never reached from a given base.
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    base: usize,
    attempt: usize,
}

impl ProbeSequence {
    /// Start the sequence for a roll number
    pub fn new(roll: RollNumber) -> Self {
        Self::from_base(home_index(roll))
    }

    /// Start the sequence from a base index
    pub fn from_base(base: usize) -> Self {
        Self {
            base: base % CAPACITY,
            attempt: 0,
        }
    }

    /// Base index this sequence started from
    pub fn base(&self) -> usize {
        self.base
    }
}

impl Iterator for ProbeSequence {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.attempt >= CAPACITY {
            return None;
        }
        let attempt = self.attempt;
        self.attempt += 1;
        Some((attempt, probe_index(self.base, attempt)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = CAPACITY - self.attempt;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProbeSequence {}
