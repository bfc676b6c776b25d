use clap::ValueEnum;
use serde::Deserialize;

use crate::error::{RecoveryError, Result};

/// Threshold parameters of a (k, n) sharing, read from the `keys` object.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize)]
pub struct Parameters {
    #[serde(rename = "k")]
    pub threshold: usize,
    #[serde(rename = "n")]
    pub total_shares: usize,
}

impl Parameters {
    pub fn new(threshold: usize, total_shares: usize) -> Result<Self> {
        let parameters = Parameters {
            threshold,
            total_shares,
        };
        parameters.validate()?;
        Ok(parameters)
    }

    /// `k` must be at least 1. `k > n` is left for reconstruction to report,
    /// since the available share count is what matters.
    pub fn validate(&self) -> Result<()> {
        if self.threshold == 0 {
            return Err(RecoveryError::InvalidThreshold {
                threshold: self.threshold,
            });
        }
        Ok(())
    }

    pub fn with_threshold(self, threshold: usize) -> Result<Self> {
        Parameters::new(threshold, self.total_shares)
    }
}

/// How subsets are folded into the tally.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum Strategy {
    /// One thread, subsets in canonical order
    #[default]
    Sequential,
    /// Rayon workers with per-worker tallies merged at the end
    Parallel,
}
