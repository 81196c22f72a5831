//! Weighted random selection
//!
//! Cumulative-weight sampling: draw `r` uniformly from `[0, total)` and walk
//! the entries in order until the running sum passes `r`. Entry `i` is chosen
//! with probability `weight_i / total`, independent of earlier draws.

use rand::Rng;

use crate::error::{Error, Result};

/// Anything with a relative selection weight
pub trait Weighted {
    fn weight(&self) -> u32;
}

impl<T> Weighted for (T, u32) {
    fn weight(&self) -> u32 {
        self.1
    }
}

/// Sum of all weights
pub fn total_weight<T: Weighted>(entries: &[T]) -> u64 {
    entries.iter().map(|e| u64::from(e.weight())).sum()
}

/// Pick the entry whose cumulative weight range contains `roll`.
///
/// `roll` must be below the total weight; zero-weight entries are never picked.
pub fn select_by_roll<T: Weighted>(entries: &[T], roll: u64) -> Option<&T> {
    let mut cumulative = 0u64;
    entries.iter().find(|entry| {
        cumulative += u64::from(entry.weight());
        cumulative > roll
    })
}

/// Draw one entry at random.
///
/// Fails without touching anything when `entries` is empty or every weight is zero.
pub fn draw<'a, T: Weighted, R: Rng>(entries: &'a [T], rng: &mut R) -> Result<&'a T> {
    if entries.is_empty() {
        return Err(Error::EmptyPrizePool);
    }
    let total = total_weight(entries);
    if total == 0 {
        return Err(Error::ZeroTotalWeight);
    }

    let roll = rng.gen_range(0..total);
    select_by_roll(entries, roll).ok_or(Error::ZeroTotalWeight)
}

/// Probability of each entry, in order
pub fn probabilities<T: Weighted>(entries: &[T]) -> Vec<f64> {
    let total = total_weight(entries);
    entries
        .iter()
        .map(|e| {
            if total == 0 {
                0.0
            } else {
                f64::from(e.weight()) / total as f64
            }
        })
        .collect()
}
