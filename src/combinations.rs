use num_bigint::BigUint;

use crate::share::ShareId;

/// Lazy iterator over every `k`-subset of a set of share ids.
///
/// Subsets are strictly increasing and come out in lexicographic order, the
/// same order a recursive "take the smallest remaining id, recurse, backtrack"
/// enumeration produces.
#[derive(Clone, Debug)]
pub struct Combinations {
    pool: Vec<ShareId>,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub fn new(ids: impl IntoIterator<Item = ShareId>, k: usize) -> Self {
        let mut pool: Vec<ShareId> = ids.into_iter().collect();
        pool.sort_unstable();
        pool.dedup();

        let done = k > pool.len();
        Combinations {
            pool,
            indices: (0..k).collect(),
            started: false,
            done,
        }
    }

    fn current(&self) -> Vec<ShareId> {
        self.indices.iter().map(|&i| self.pool[i]).collect()
    }

    // Moves `indices` to the next subset, false once the last one was emitted.
    fn advance(&mut self) -> bool {
        let n = self.pool.len();
        let k = self.indices.len();
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] != i + n - k) else {
            return false;
        };
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        true
    }
}

impl Iterator for Combinations {
    type Item = Vec<ShareId>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
        } else if !self.advance() {
            self.done = true;
            return None;
        }
        Some(self.current())
    }
}

/// Starts a fresh enumeration of the `k`-subsets of `ids`.
pub fn combinations(ids: impl IntoIterator<Item = ShareId>, k: usize) -> Combinations {
    Combinations::new(ids, k)
}

/// `C(n, k)`, zero when `k > n`.
pub fn count(n: usize, k: usize) -> BigUint {
    if k > n {
        return BigUint::from(0u32);
    }
    num_integer::binomial(BigUint::from(n), BigUint::from(k))
}
