use std::collections::HashMap;

use itertools::Itertools;
use num_bigint::BigInt;

use crate::error::{RecoveryError, Result};

/// The winning candidate and how many subsets produced it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Vote {
    pub value: BigInt,
    pub count: usize,
}

/// Occurrence count per candidate secret.
#[derive(Clone, Debug, Default)]
pub struct Tally {
    counts: HashMap<BigInt, usize>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, candidate: BigInt) {
        *self.counts.entry(candidate).or_insert(0) += 1;
    }

    /// Folds another tally into this one.
    pub fn merge(mut self, other: Tally) -> Tally {
        for (candidate, count) in other.counts {
            *self.counts.entry(candidate).or_insert(0) += count;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct candidates.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Total number of recorded candidates.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn count(&self, candidate: &BigInt) -> usize {
        self.counts.get(candidate).copied().unwrap_or(0)
    }

    /// The most frequent candidate. Ties go to the numerically smallest value
    /// so the outcome never depends on recording order.
    pub fn winner(&self) -> Result<Vote> {
        self.counts
            .iter()
            .max_by(|(a, a_count), (b, b_count)| a_count.cmp(b_count).then_with(|| b.cmp(a)))
            .map(|(value, count)| Vote {
                value: value.clone(),
                count: *count,
            })
            .ok_or(RecoveryError::NoCandidates)
    }

    /// Candidates ordered by descending count, then ascending value.
    pub fn ranked(&self) -> Vec<Vote> {
        self.counts
            .iter()
            .sorted_by(|(a, a_count), (b, b_count)| b_count.cmp(a_count).then_with(|| a.cmp(b)))
            .map(|(value, count)| Vote {
                value: value.clone(),
                count: *count,
            })
            .collect()
    }
}

impl FromIterator<BigInt> for Tally {
    fn from_iter<I: IntoIterator<Item = BigInt>>(iter: I) -> Self {
        Tally {
            counts: iter.into_iter().counts(),
        }
    }
}

/// The most frequent value in `candidates`.
pub fn most_frequent(candidates: impl IntoIterator<Item = BigInt>) -> Result<BigInt> {
    candidates
        .into_iter()
        .collect::<Tally>()
        .winner()
        .map(|vote| vote.value)
}
