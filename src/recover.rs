use num_bigint::BigInt;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::combinations::{self, combinations};
use crate::config::Strategy;
use crate::error::{RecoveryError, Result};
use crate::input::Document;
use crate::interpolate::interpolate_at_zero;
use crate::share::{ShareId, ShareSet};
use crate::tally::Tally;

/// Outcome of a reconstruction.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Recovery {
    pub secret: BigInt,
    /// Subsets that interpolated to `secret`.
    pub votes: usize,
    /// Subsets interpolated in total.
    pub subsets: usize,
    pub distinct_candidates: usize,
}

impl Recovery {
    /// True when every subset agreed.
    pub fn is_unanimous(&self) -> bool {
        self.votes == self.subsets
    }
}

fn candidate(shares: &ShareSet, subset: &[ShareId]) -> Result<BigInt> {
    interpolate_at_zero(&shares.points(subset))
}

/// Interpolates every `threshold`-subset of `shares` and tallies the candidates.
pub fn tally_candidates(shares: &ShareSet, threshold: usize, strategy: Strategy) -> Result<Tally> {
    let subsets = combinations(shares.ids(), threshold);

    match strategy {
        Strategy::Sequential => {
            let mut tally = Tally::new();
            for subset in subsets {
                tally.record(candidate(shares, &subset)?);
            }
            Ok(tally)
        }
        Strategy::Parallel => subsets
            .par_bridge()
            .try_fold(Tally::new, |mut tally, subset| {
                tally.record(candidate(shares, &subset)?);
                Ok::<_, RecoveryError>(tally)
            })
            .try_reduce(Tally::new, |left, right| Ok(left.merge(right))),
    }
}

/// Recovers the secret as the most frequent candidate over all
/// `threshold`-subsets of `shares`.
pub fn recover_secret(shares: &ShareSet, threshold: usize, strategy: Strategy) -> Result<Recovery> {
    if threshold == 0 {
        return Err(RecoveryError::InvalidThreshold { threshold });
    }
    if shares.len() < threshold {
        return Err(RecoveryError::InsufficientShares {
            available: shares.len(),
            required: threshold,
        });
    }

    debug!(
        available = shares.len(),
        threshold,
        subsets = %combinations::count(shares.len(), threshold),
        ?strategy,
        "interpolating subsets"
    );

    let tally = tally_candidates(shares, threshold, strategy)?;
    let winner = tally.winner()?;

    let recovery = Recovery {
        secret: winner.value,
        votes: winner.count,
        subsets: tally.total(),
        distinct_candidates: tally.len(),
    };
    info!(
        votes = recovery.votes,
        subsets = recovery.subsets,
        distinct = recovery.distinct_candidates,
        "secret recovered"
    );
    Ok(recovery)
}

/// Full pipeline over a loaded document: decode shares, then vote.
pub fn reconstruct(document: &Document, strategy: Strategy) -> Result<Recovery> {
    let shares = ShareSet::from_shares(document.shares.clone())?;
    recover_secret(&shares, document.parameters.threshold, strategy)
}
