use core::convert::TryFrom;
use core::fmt::Debug;
use num_integer::Integer;
use num_traits::{CheckedAdd, CheckedMul, CheckedSub, Signed, Unsigned};

#[cfg(feature = "num-bigint")]
use num_bigint::{BigInt, BigUint};

/// Result of an operation that may have to give up exactness
#[derive(PartialEq, Debug, Clone)]
pub enum Approximation<T> {
    Approximated(T),
    Exact(T),
}

impl<T> Approximation<T> {
    /// Get the value regardless of whether it's exact
    #[inline]
    pub fn value(self) -> T {
        match self {
            Approximation::Approximated(v) => v,
            Approximation::Exact(v) => v,
        }
    }

    #[inline]
    pub fn is_exact(&self) -> bool {
        matches!(self, Approximation::Exact(_))
    }
}

pub trait WithSigned: Unsigned {
    type Signed;
    /// Returns None if the value doesn't fit in the signed type
    fn to_signed(self) -> Option<Self::Signed>;
}

pub trait WithUnsigned: Signed {
    type Unsigned;
    /// Only non-negative values are expected to be converted
    fn to_unsigned(self) -> Self::Unsigned;
    /// The magnitude, which is representable even for the minimum value
    fn abs_unsigned(self) -> Self::Unsigned;
}

macro_rules! impl_primitive_sign {
    ($TSigned:ty, $TUnsigned:ty) => {
        impl WithSigned for $TUnsigned {
            type Signed = $TSigned;
            fn to_signed(self) -> Option<Self::Signed> {
                <$TSigned>::try_from(self).ok()
            }
        }
        impl WithUnsigned for $TSigned {
            type Unsigned = $TUnsigned;
            fn to_unsigned(self) -> Self::Unsigned {
                self as $TUnsigned
            }
            fn abs_unsigned(self) -> Self::Unsigned {
                if self < 0 {
                    (self as $TUnsigned).wrapping_neg()
                } else {
                    self as $TUnsigned
                }
            }
        }
    };
}
impl_primitive_sign!(i8, u8);
impl_primitive_sign!(i16, u16);
impl_primitive_sign!(i32, u32);
impl_primitive_sign!(i64, u64);
impl_primitive_sign!(i128, u128);
impl_primitive_sign!(isize, usize);

#[cfg(feature = "num-bigint")]
impl WithSigned for BigUint {
    type Signed = BigInt;
    fn to_signed(self) -> Option<Self::Signed> {
        Some(BigInt::from(self))
    }
}

#[cfg(feature = "num-bigint")]
impl WithUnsigned for BigInt {
    type Unsigned = BigUint;
    fn to_unsigned(self) -> Self::Unsigned {
        self.into_parts().1
    }
    fn abs_unsigned(self) -> Self::Unsigned {
        self.into_parts().1
    }
}

/// Signed integers the transforms compute with
pub trait SignedBase:
    Integer + Signed + Clone + Debug + CheckedAdd + CheckedSub + CheckedMul + WithUnsigned
{
}
impl<T: Integer + Signed + Clone + Debug + CheckedAdd + CheckedSub + CheckedMul + WithUnsigned> SignedBase
    for T
{
}

/// Unsigned integers stored as continued fraction coefficients
pub trait UnsignedBase: Integer + Unsigned + Clone + Debug + WithSigned {}
impl<T: Integer + Unsigned + Clone + Debug + WithSigned> UnsignedBase for T {}
