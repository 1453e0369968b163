//! Bounded rational approximation by truncating the continued fraction

use crate::cont_frac::ContinuedFraction;
use crate::traits::{Approximation, SignedBase, UnsignedBase, WithSigned, WithUnsigned};
use num_rational::Ratio;
use num_traits::{CheckedMul, Signed, Zero};

/// `2^bits - 1`, or None if it's not representable by T (then every value fits)
fn bit_limit<T: SignedBase>(bits: u32) -> Option<T> {
    let two = T::one() + T::one();
    let mut power = T::one();
    for _ in 0..bits {
        power = power.checked_mul(&two)?;
    }
    Some(power - T::one())
}

impl<T, U> ContinuedFraction<U>
where
    T: SignedBase + WithUnsigned<Unsigned = U>,
    U: UnsignedBase + WithSigned<Signed = T>,
{
    /// Approximate the number with the longest convergent whose numerator (in absolute value)
    /// and denominator both fit in `precision_bits` bits. The result is zero if even the
    /// first convergent doesn't fit, or if the magnitude of the number doesn't fit in T.
    ///
    /// The result is [Approximation::Exact] if all coefficients were kept.
    pub fn round(&self, precision_bits: u32) -> Approximation<Ratio<T>> {
        let limit = bit_limit::<T>(precision_bits);

        let mut best = Ratio::zero();
        let mut kept = 0;
        for conv in self.convergents() {
            if let Some(limit) = &limit {
                if &conv.numer().abs() > limit || conv.denom() > limit {
                    break;
                }
            }
            best = conv;
            kept += 1;
        }

        if kept == self.coeffs().len() {
            Approximation::Exact(best)
        } else {
            Approximation::Approximated(best)
        }
    }
}

/// Round a rational number to the closest convergent with numerator and denominator
/// bounded by `2^precision_bits - 1`
///
/// # Examples
/// ```
/// use num_rational::Ratio;
/// use num_cfrac::round;
///
/// assert_eq!(round(&Ratio::new(355i64, 113), 5), Ratio::new(22, 7));
/// ```
pub fn round<T, U>(q: &Ratio<T>, precision_bits: u32) -> Ratio<T>
where
    T: SignedBase + WithUnsigned<Unsigned = U>,
    U: UnsignedBase + WithSigned<Signed = T>,
{
    let cf: ContinuedFraction<U> = ContinuedFraction::from_rational(q.clone());
    cf.round(precision_bits).value()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_limit_test() {
        assert_eq!(bit_limit::<i64>(0), Some(0));
        assert_eq!(bit_limit::<i64>(5), Some(31));
        assert_eq!(bit_limit::<i8>(6), Some(63));
        assert_eq!(bit_limit::<i8>(7), None);
        assert_eq!(bit_limit::<i64>(64), None);
    }

    #[test]
    fn round_test() {
        let pi = ContinuedFraction::<u64>::from(Ratio::new(355i64, 113));
        assert_eq!(pi.round(9), Approximation::Exact(Ratio::new(355, 113)));
        assert_eq!(pi.round(64), Approximation::Exact(Ratio::new(355, 113)));
        assert_eq!(pi.round(5), Approximation::Approximated(Ratio::new(22, 7)));
        assert_eq!(pi.round(4), Approximation::Approximated(Ratio::from(3)));
        assert_eq!(pi.round(1), Approximation::Approximated(Ratio::zero()));

        let n_pi = -pi;
        assert_eq!(n_pi.round(5), Approximation::Approximated(Ratio::new(-22, 7)));

        let zero = ContinuedFraction::<u64>::zero();
        assert_eq!(zero.round(3), Approximation::Exact(Ratio::zero()));
    }

    #[test]
    fn round_fn_test() {
        assert_eq!(round(&Ratio::new(355i64, 113), 5), Ratio::new(22, 7));
        assert_eq!(round(&Ratio::new(-355i64, 113), 5), Ratio::new(-22, 7));
        assert_eq!(round(&Ratio::new(1i64, 2), 2), Ratio::new(1, 2));
        assert_eq!(round(&Ratio::new(100i8, 3), 7), Ratio::new(100, 3));
        assert_eq!(round(&Ratio::new(1000i64, 1), 8), Ratio::zero());

        // the magnitude of the minimum has no convergent in i64
        assert_eq!(round(&Ratio::from(i64::MIN), 70), Ratio::zero());
        assert_eq!(round(&Ratio::new(i64::MIN, 3), 62), Ratio::new(-3074457345618258603, 1));
        assert_eq!(round(&Ratio::new(i64::MAX, 2), 63), Ratio::new(i64::MAX, 2));
    }
}
