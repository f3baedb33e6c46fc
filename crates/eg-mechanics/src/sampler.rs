//! Weighted selection without replacement.
//!
//! Spells, weapons, linked spirits and cults all carry an integer
//! probability. A draw sums the weights of the remaining candidates, rolls
//! in `1..=total` and scans the candidates in their given order until the
//! running sum reaches the roll.

use std::collections::HashSet;

use eg_core::{SpellOption, WeaponOption};
use rand::Rng;
use rand::rngs::StdRng;

/// A candidate for weighted selection.
pub trait Weighted {
    /// Relative weight; 0 is never picked while positive weight remains.
    fn weight(&self) -> u32;

    /// Name used to order a multi-draw result.
    fn name(&self) -> &str;
}

impl<T: Weighted + ?Sized> Weighted for &T {
    fn weight(&self) -> u32 {
        (**self).weight()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl Weighted for SpellOption {
    fn weight(&self) -> u32 {
        self.probability
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Weighted for WeaponOption {
    fn weight(&self) -> u32 {
        self.probability
    }

    fn name(&self) -> &str {
        &self.weapon.name
    }
}

/// Pick one candidate index, skipping `excluded` positions.
///
/// # Panics
///
/// Panics if the remaining candidates have a total weight of 0. Callers
/// filter out zero-probability options and clamp draw counts first.
pub fn select_one<T: Weighted>(
    candidates: &[T],
    excluded: &HashSet<usize>,
    rng: &mut StdRng,
) -> usize {
    let remaining = || {
        candidates
            .iter()
            .enumerate()
            .filter(|(i, _)| !excluded.contains(i))
    };
    let total: u64 = remaining().map(|(_, c)| u64::from(c.weight())).sum();
    assert!(total > 0, "weighted selection over zero total weight");

    let roll = rng.random_range(1..=total);
    let mut cumulative = 0u64;
    for (index, candidate) in remaining() {
        cumulative += u64::from(candidate.weight());
        if cumulative >= roll {
            return index;
        }
    }
    unreachable!("roll {roll} exceeds total weight {total}")
}

/// Draw `count` distinct candidates, sorted by name.
///
/// Equal names keep their draw order.
///
/// # Panics
///
/// Panics if `count` exceeds the number of candidates, or if the draw runs
/// out of positive weight.
pub fn select_many<'a, T: Weighted>(
    candidates: &'a [T],
    count: usize,
    rng: &mut StdRng,
) -> Vec<&'a T> {
    assert!(
        count <= candidates.len(),
        "cannot draw {count} items from {} candidates",
        candidates.len()
    );
    let mut excluded = HashSet::with_capacity(count);
    let mut picked = Vec::with_capacity(count);
    for _ in 0..count {
        let index = select_one(candidates, &excluded, rng);
        excluded.insert(index);
        picked.push(&candidates[index]);
    }
    picked.sort_by(|a, b| a.name().cmp(b.name()));
    picked
}

/// Pick an index uniformly from `0..len`, or `None` for an empty list.
pub fn select_uniform(len: usize, rng: &mut StdRng) -> Option<usize> {
    (len > 0).then(|| rng.random_range(0..len))
}
