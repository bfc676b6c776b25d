use std::collections::BTreeMap;

use num_bigint::BigInt;
use tracing::debug;

use crate::error::{RecoveryError, Result};
use crate::expression;

pub type ShareId = u32;

/// A share as read from the input: its public index, the numeral base of
/// its value and the undecoded value text.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Share {
    pub id: ShareId,
    pub base: u32,
    pub raw_value: String,
}

/// A share reduced to a point `(x, y)` on the sharing polynomial.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EvaluatedShare {
    pub x: ShareId,
    pub y: BigInt,
}

impl Share {
    pub fn new(id: ShareId, base: u32, raw_value: impl Into<String>) -> Self {
        Share {
            id,
            base,
            raw_value: raw_value.into(),
        }
    }

    /// Decodes the value as a base-`base` numeral when every character is a
    /// digit of that base, otherwise evaluates it as an expression with `x`
    /// bound to the share id.
    pub fn decode(&self) -> Result<EvaluatedShare> {
        if !(2..=36).contains(&self.base) {
            return Err(RecoveryError::InvalidBase(self.base));
        }

        let y = match decode_numeral(&self.raw_value, self.base) {
            Some(y) => y,
            None => expression::evaluate(&self.raw_value, &BigInt::from(self.id))?,
        };
        Ok(EvaluatedShare { x: self.id, y })
    }
}

fn decode_numeral(text: &str, base: u32) -> Option<BigInt> {
    let text = text.trim();
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(base)) {
        return None;
    }
    BigInt::parse_bytes(text.as_bytes(), base)
}

/// The decoded shares of one run, keyed by unique id.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ShareSet {
    points: BTreeMap<ShareId, BigInt>,
}

impl ShareSet {
    /// Rejects duplicate ids before anything is decoded, then decodes every share.
    pub fn from_shares(shares: Vec<Share>) -> Result<Self> {
        let mut seen = std::collections::HashSet::new();
        for share in &shares {
            if !seen.insert(share.id) {
                return Err(RecoveryError::DuplicateShareId(share.id));
            }
        }

        let points = shares
            .iter()
            .map(|share| {
                let EvaluatedShare { x, y } = share.decode()?;
                debug!(share = x, base = share.base, "decoded share");
                Ok((x, y))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(ShareSet { points })
    }

    pub fn from_points(points: impl IntoIterator<Item = EvaluatedShare>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for EvaluatedShare { x, y } in points {
            if map.insert(x, y).is_some() {
                return Err(RecoveryError::DuplicateShareId(x));
            }
        }
        Ok(ShareSet { points: map })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Ids in ascending order.
    pub fn ids(&self) -> Vec<ShareId> {
        self.points.keys().copied().collect()
    }

    pub fn get(&self, id: ShareId) -> Option<&BigInt> {
        self.points.get(&id)
    }

    /// The `(x, y)` points for a subset of ids. Unknown ids are skipped.
    pub fn points(&self, ids: &[ShareId]) -> Vec<(ShareId, BigInt)> {
        ids.iter()
            .filter_map(|id| self.points.get(id).map(|y| (*id, y.clone())))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = EvaluatedShare> + '_ {
        self.points.iter().map(|(x, y)| EvaluatedShare {
            x: *x,
            y: y.clone(),
        })
    }
}
