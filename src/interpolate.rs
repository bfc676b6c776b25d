use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::error::{RecoveryError, Result};
use crate::share::ShareId;

/// Numerator and denominator of the Lagrange basis polynomial `L_i(0)`:
/// `Π_{j≠i} (-x_j)` over `Π_{j≠i} (x_i - x_j)`, unreduced.
pub fn lagrange_coefficient_at_zero(xs: &[ShareId], i: usize) -> (BigInt, BigInt) {
    let xi = BigInt::from(xs[i]);
    xs.iter()
        .enumerate()
        .filter(|&(j, _)| j != i)
        .fold((BigInt::one(), BigInt::one()), |(num, den), (_, &xj)| {
            let xj = BigInt::from(xj);
            (num * -&xj, den * (&xi - xj))
        })
}

/// Performs a Lagrange interpolation over the rationals at the origin
/// for a polynomial defined by `points`.
/// The terms `y_i * L_i(0)` are summed as one exact fraction and divided
/// once at the end, truncating toward zero. Points that lie on a common
/// polynomial of degree `points.len() - 1` give its exact constant term;
/// any other set still yields an integer.
pub fn interpolate_at_zero(points: &[(ShareId, BigInt)]) -> Result<BigInt> {
    let xs: Vec<ShareId> = points.iter().map(|(x, _)| *x).collect();

    let mut acc_num = BigInt::zero();
    let mut acc_den = BigInt::one();

    for (i, (xi, yi)) in points.iter().enumerate() {
        let (num, den) = lagrange_coefficient_at_zero(&xs, i);
        if den.is_zero() {
            return Err(RecoveryError::DuplicateShareId(*xi));
        }

        // acc + yi * num / den, kept with a positive denominator.
        let (num, den) = if den.is_negative() {
            (-num, -den)
        } else {
            (num, den)
        };
        acc_num = acc_num * &den + yi * num * &acc_den;
        acc_den *= den;

        let g = acc_num.gcd(&acc_den);
        if !g.is_one() && !g.is_zero() {
            acc_num /= &g;
            acc_den /= &g;
        }
    }

    // BigInt division truncates toward zero.
    Ok(acc_num / acc_den)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn points(raw: &[(ShareId, i64)]) -> Vec<(ShareId, BigInt)> {
        raw.iter().map(|&(x, y)| (x, BigInt::from(y))).collect()
    }

    #[test]
    fn test_line() {
        // y = 2x + 1
        let secret = interpolate_at_zero(&points(&[(1, 3), (2, 5)])).unwrap();
        assert_eq!(secret, BigInt::from(1));
        let secret = interpolate_at_zero(&points(&[(2, 5), (3, 7)])).unwrap();
        assert_eq!(secret, BigInt::from(1));
    }

    #[test]
    fn test_quadratic_with_fractional_coefficients() {
        // y = x^2 + 3; L_i(0) is not an integer for {1, 2, 6}.
        for subset in [
            [(1, 4), (2, 7), (3, 12)],
            [(1, 4), (2, 7), (6, 39)],
            [(1, 4), (3, 12), (6, 39)],
            [(2, 7), (3, 12), (6, 39)],
        ] {
            assert_eq!(
                interpolate_at_zero(&points(&subset)).unwrap(),
                BigInt::from(3)
            );
        }
    }

    #[test]
    fn test_truncates_toward_zero() {
        // Line through (1, 3) and (4, 100) crosses zero at -88/3.
        let secret = interpolate_at_zero(&points(&[(1, 3), (4, 100)])).unwrap();
        assert_eq!(secret, BigInt::from(-29));
        // (1, 1) and (3, 4): -1/2 at zero, floor would give -1.
        let secret = interpolate_at_zero(&points(&[(1, 1), (3, 4)])).unwrap();
        assert_eq!(secret, BigInt::zero());
    }

    #[test]
    fn test_coefficient_pairs() {
        let (num, den) = lagrange_coefficient_at_zero(&[1, 2, 6], 0);
        assert_eq!((num, den), (BigInt::from(12), BigInt::from(5)));
        let (num, den) = lagrange_coefficient_at_zero(&[1, 2, 6], 1);
        assert_eq!((num, den), (BigInt::from(6), BigInt::from(-4)));
    }

    #[test]
    fn test_single_and_empty() {
        assert_eq!(
            interpolate_at_zero(&points(&[(5, 42)])).unwrap(),
            BigInt::from(42)
        );
        assert_eq!(interpolate_at_zero(&[]).unwrap(), BigInt::zero());
    }

    #[test]
    fn test_duplicate_x_is_an_error() {
        assert!(matches!(
            interpolate_at_zero(&points(&[(2, 5), (2, 7)])),
            Err(RecoveryError::DuplicateShareId(2))
        ));
    }

    fn eval_poly(coefficients: &[i64], x: u32) -> BigInt {
        let x = BigInt::from(x);
        coefficients
            .iter()
            .rev()
            .fold(BigInt::zero(), |acc, c| acc * &x + BigInt::from(*c))
    }

    proptest! {
        #[test]
        fn prop_recovers_constant_term(
            coefficients in proptest::collection::vec(-1_000_000i64..1_000_000, 1..6),
            ids in proptest::collection::btree_set(1u32..40, 6),
        ) {
            let k = coefficients.len();
            let pts: Vec<_> = ids
                .iter()
                .take(k)
                .map(|&x| (x, eval_poly(&coefficients, x)))
                .collect();
            prop_assert_eq!(interpolate_at_zero(&pts).unwrap(), BigInt::from(coefficients[0]));
        }
    }
}
