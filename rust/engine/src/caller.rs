use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::called::CalledNumbers;
use crate::card::Column;
use crate::errors::ExhaustedError;

/// A single drawn number together with the column it is announced under.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Call {
    pub column: Column,
    pub number: u8,
}

impl Call {
    /// Builds a call for `number`; `None` outside 1..=75.
    pub fn new(number: u8) -> Option<Self> {
        Column::for_number(number).map(|column| Self { column, number })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.column, self.number)
    }
}

/// Draws numbers 1..=75 without replacement.
///
/// Every draw samples uniformly from the numbers not yet called, so a repeat is
/// impossible by construction. Seeded callers reproduce the same sequence.
///
/// # Examples
///
/// ```
/// use shopbingo_engine::caller::NumberCaller;
///
/// let mut a = NumberCaller::new_with_seed(7);
/// let mut b = NumberCaller::new_with_seed(7);
/// assert_eq!(a.draw_next(), b.draw_next());
/// assert_eq!(a.called().len(), 1);
/// ```
#[derive(Debug)]
pub struct NumberCaller {
    called: CalledNumbers,
    rng: ChaCha20Rng,
}

impl NumberCaller {
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            called: CalledNumbers::new(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn new(seed: Option<u64>) -> Self {
        Self::new_with_seed(seed.unwrap_or_else(rand::random))
    }

    pub fn draw_next(&mut self) -> Result<Call, ExhaustedError> {
        let remaining = self.called.set().remaining();
        if remaining.is_empty() {
            return Err(ExhaustedError);
        }
        let number = remaining[self.rng.random_range(0..remaining.len())];
        self.called.record(number);
        Call::new(number).ok_or(ExhaustedError)
    }

    pub fn called(&self) -> &CalledNumbers {
        &self.called
    }

    pub fn remaining(&self) -> usize {
        75 - self.called.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Forgets every call. The RNG stream continues, so a new round draws a new order.
    pub fn reset(&mut self) {
        self.called.clear();
    }
}
