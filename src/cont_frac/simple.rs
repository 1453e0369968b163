//! Implementation of simple continued fractions

use super::block::Block;
use super::lazy::{apply, GosperConfig, HomographicResult, Operator};
use crate::error::{ArithmeticError, ParseContFracError};
use crate::traits::{SignedBase, UnsignedBase, WithSigned, WithUnsigned};
use core::cmp::Ordering;
use core::iter::{once, FromIterator};
use core::str::FromStr;
use num_integer::Integer;
use num_rational::Ratio;
use num_traits::{CheckedAdd, CheckedMul, One, Signed, Zero};
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

#[cfg(feature = "num-bigint")]
use num_bigint::{BigInt, BigUint};

/// This struct represents a simple continued fraction `a0 + 1/(a1 + 1/ (a2 + ...))`
/// Where a0 is a non-negative integer, a1, a2, .. are positive integers, and the
/// sign is stored separately. It represents a rational number exactly.
///
/// Values are always kept canonical: zero is the empty sequence, and the last
/// coefficient is never 1 unless it's the only one. Therefore two fractions
/// are equal exactly when their numbers are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContinuedFraction<T> {
    /// Coefficients of the magnitude
    coeffs: Vec<T>,

    /// Sign of the fraction
    negative: bool,
}

impl<T> ContinuedFraction<T> {
    #[inline]
    pub fn coeffs(&self) -> &[T] {
        &self.coeffs[..]
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        self.coeffs.len() <= 1
    }
}

impl<T: WithSigned + Clone> ContinuedFraction<T> {
    /// Returns an iterator of the coefficients as signed integers, which
    /// can be consumed by the transforms in [LazyContinuedFraction][crate::LazyContinuedFraction].
    /// Note that for a negative number, the coefficients of it's absolute value is returned
    ///
    /// Fails with [ArithmeticError::Overflow] if a coefficient doesn't fit in the signed type.
    pub fn terms(&self) -> Result<Terms<T>, ArithmeticError> {
        if self.coeffs.iter().any(|v| v.clone().to_signed().is_none()) {
            return Err(ArithmeticError::Overflow);
        }
        Ok(Terms {
            coeffs: self.coeffs.iter(),
            zero: self.coeffs.is_empty(),
        })
    }
}

impl<U: Integer + Clone> ContinuedFraction<U> {
    /// Create a continued fraction from its coefficients and sign
    ///
    /// This function will make sure that if two numbers are equal,
    /// their internal representation in continued fraction will be the same
    pub fn new(coeffs: Vec<U>, negative: bool) -> Self {
        let mut dedup: Vec<U> = Vec::with_capacity(coeffs.len());
        for a in coeffs {
            // [.., p, 0, a, ..] = [.., p + a, ..]
            if dedup.len() >= 2 && dedup[dedup.len() - 1].is_zero() {
                dedup.pop();
                if let Some(p) = dedup.last_mut() {
                    *p = p.clone() + a;
                }
            } else {
                dedup.push(a);
            }
        }

        while dedup.len() >= 2 {
            let last = &dedup[dedup.len() - 1];
            if last.is_zero() {
                if dedup.len() > 2 {
                    // [.., q, p, 0] = [.., q]
                    dedup.truncate(dedup.len() - 2);
                } else {
                    dedup.pop();
                }
            } else if last.is_one() {
                // [.., a, 1] = [.., a + 1]
                dedup.pop();
                if let Some(p) = dedup.last_mut() {
                    *p = p.clone() + U::one();
                }
            } else {
                break;
            }
        }

        if dedup.len() == 1 && dedup[0].is_zero() {
            dedup.clear();
        }
        let negative = negative && !dedup.is_empty();
        ContinuedFraction { coeffs: dedup, negative }
    }
}

/// One of the three values a continued fraction can be compared with directly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixpoint {
    Zero,
    One,
    NegativeOne,
}

impl<T: Zero + One + PartialEq> ContinuedFraction<T> {
    /// Compare the number with 0, 1 or -1, using only the sign, the length
    /// and the leading coefficient
    pub fn cmp_fixpoint(&self, point: Fixpoint) -> Ordering {
        let a0 = match self.coeffs.first() {
            Some(a0) if !(a0.is_zero() && self.coeffs.len() == 1) => a0,
            _ => {
                return match point {
                    Fixpoint::Zero => Ordering::Equal,
                    Fixpoint::One => Ordering::Less,
                    Fixpoint::NegativeOne => Ordering::Greater,
                }
            }
        };
        let unit = a0.is_one() && self.coeffs.len() == 1;

        match (point, self.negative) {
            (Fixpoint::Zero, false) => Ordering::Greater,
            (Fixpoint::Zero, true) => Ordering::Less,
            (Fixpoint::One, true) => Ordering::Less,
            (Fixpoint::One, false) => {
                if a0.is_zero() {
                    Ordering::Less // [0; a1, ..] lies in (0, 1)
                } else if unit {
                    Ordering::Equal
                } else {
                    Ordering::Greater
                }
            }
            (Fixpoint::NegativeOne, false) => Ordering::Greater,
            (Fixpoint::NegativeOne, true) => {
                if a0.is_zero() {
                    Ordering::Greater
                } else if unit {
                    Ordering::Equal
                } else {
                    Ordering::Less
                }
            }
        }
    }

    #[inline]
    pub fn is_negative_one(&self) -> bool {
        self.cmp_fixpoint(Fixpoint::NegativeOne) == Ordering::Equal
    }
}

/// Iterator of the coefficients of a [ContinuedFraction] as signed magnitudes.
/// A zero value yields a single zero term.
#[derive(Debug, Clone)]
pub struct Terms<'a, T> {
    coeffs: std::slice::Iter<'a, T>,
    zero: bool,
}

impl<'a, T: WithSigned + Clone> Iterator for Terms<'a, T>
where
    T::Signed: Zero,
{
    type Item = T::Signed;

    fn next(&mut self) -> Option<Self::Item> {
        if self.zero {
            self.zero = false;
            return Some(<T::Signed as Zero>::zero());
        }
        self.coeffs.next().and_then(|v| v.clone().to_signed())
    }
}

/// Iterator of convergents of a [ContinuedFraction]
#[derive(Debug, Clone)]
pub struct Convergents<'a, T, U> {
    coeffs: std::slice::Iter<'a, U>,
    block: Block<T>,
    neg: bool, // store the sign
    overflowed: bool,
}

impl<'a, T, U> Iterator for Convergents<'a, T, U>
where
    T: Integer + Signed + Clone + CheckedAdd + CheckedMul,
    U: WithSigned<Signed = T> + Clone,
{
    type Item = Ratio<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.overflowed {
            return None;
        }

        let block = self
            .coeffs
            .next()?
            .clone()
            .to_signed()
            .and_then(|a| self.block.insert(&a));
        self.block = match block {
            Some(block) => block,
            None => {
                self.overflowed = true;
                return None;
            }
        };

        let (p, q) = self.block.convergent();
        let r = Ratio::new(p.clone(), q.clone());
        if self.neg {
            Some(-r)
        } else {
            Some(r)
        }
    }
}

impl<T, U> ContinuedFraction<U>
where
    T: SignedBase + WithUnsigned<Unsigned = U>,
    U: UnsignedBase + WithSigned<Signed = T>,
{
    pub fn from_integer(t: T) -> Self {
        let negative = t.is_negative();
        Self::new(vec![t.abs_unsigned()], negative)
    }

    /// Expand a rational number with the Euclidean algorithm
    pub fn from_rational(r: Ratio<T>) -> Self {
        if r.is_zero() {
            return Self::new(Vec::new(), false);
        }

        // work on the magnitudes so that T::min_value() has a counterpart
        let (n, d) = r.into_raw();
        let negative = n.is_negative() != d.is_negative();
        let (mut n, mut d) = (n.abs_unsigned(), d.abs_unsigned());

        let mut coeffs = Vec::new();
        if n < d {
            std::mem::swap(&mut n, &mut d);
            coeffs.push(U::zero());
        }

        while !d.is_zero() {
            let (quo, rem) = n.div_rem(&d);
            coeffs.push(quo);
            n = d;
            d = rem;
        }

        Self::new(coeffs, negative)
    }

    /// Convert to a rational number, returns None if the numerator or the
    /// denominator doesn't fit in T.
    pub fn checked_to_rational(&self) -> Option<Ratio<T>> {
        let mut result = Ratio::zero();
        let mut count = 0;
        for conv in self.convergents() {
            result = conv;
            count += 1;
        }

        if count == self.coeffs.len() {
            Some(result)
        } else {
            None
        }
    }

    /// Convert to a rational number (the last convergent)
    ///
    /// # Panics
    /// Panics if the numerator or the denominator doesn't fit in T, see
    /// [checked_to_rational][ContinuedFraction::checked_to_rational].
    pub fn to_rational(&self) -> Ratio<T> {
        match self.checked_to_rational() {
            Some(r) => r,
            None => panic!("{}", ArithmeticError::Overflow),
        }
    }

    /// Returns an iterator of the convergents. The iterator will stop
    /// if all coefficients are consumed, or numeric overflow happened.
    pub fn convergents(&self) -> Convergents<T, U> {
        Convergents {
            coeffs: self.coeffs.iter(),
            block: Block::identity(),
            neg: self.negative,
            overflowed: false,
        }
    }

    /// This method returns the homographic function `(ax + b)/(cx + d)` of the fraction
    pub fn homo(&self, a: T, b: T, c: T, d: T) -> Result<Self, ArithmeticError> {
        let mut block = Block::new(a, b, c, d);
        if self.negative {
            block = block.negate().ok_or(ArithmeticError::Overflow)?;
        }
        HomographicResult::new(block, self.terms()?, GosperConfig::default()).collect()
    }

    fn scalar_op(&self, op: Operator, rhs: T) -> Result<Self, ArithmeticError> {
        let (z, o) = (T::zero, T::one);
        match op {
            Operator::Add => self.homo(o(), rhs, z(), o()),
            Operator::Sub => {
                let rhs = z().checked_sub(&rhs).ok_or(ArithmeticError::Overflow)?;
                self.homo(o(), rhs, z(), o())
            }
            Operator::Mul => self.homo(rhs, z(), z(), o()),
            Operator::Div => {
                if rhs.is_zero() {
                    return Err(ArithmeticError::DivisionByZero);
                }
                self.homo(o(), z(), z(), rhs)
            }
        }
    }
}

/// Collect the terms of a simple continued fraction, whose first term may be negative
/// and whose remaining terms are positive. Zero terms after the first are merged like
/// in [ContinuedFraction::new].
impl<T, U> FromIterator<T> for ContinuedFraction<U>
where
    T: SignedBase + WithUnsigned<Unsigned = U>,
    U: UnsignedBase + WithSigned<Signed = T>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut terms = iter.into_iter();
        let first = match terms.next() {
            Some(v) => v,
            None => return Self::new(Vec::new(), false),
        };
        let rest = terms.map(|v| {
            debug_assert!(!v.is_negative(), "only the first term may be negative");
            v.abs_unsigned()
        });

        if !first.is_negative() {
            return Self::new(once(first.abs_unsigned()).chain(rest).collect(), false);
        }

        // the value is t - a0 with t = [t0; t1, ..] canonical
        let a0 = first.abs_unsigned();
        let mut tail = Self::new(once(U::zero()).chain(rest).collect(), false)
            .coeffs
            .into_iter();
        let t0 = tail.next().unwrap_or_else(U::zero);
        if t0 >= a0 {
            return Self::new(once(t0 - a0).chain(tail).collect(), false);
        }

        // -(m - [0; t1, t2, ..]) = -[m-1; 1, t1-1, t2, ..]
        let m = a0 - t0;
        let coeffs = match tail.next() {
            None => vec![m],
            Some(t1) => vec![m - U::one(), U::one(), t1 - U::one()]
                .into_iter()
                .chain(tail)
                .collect(),
        };
        Self::new(coeffs, true)
    }
}

impl<T, U> From<Ratio<T>> for ContinuedFraction<U>
where
    T: SignedBase + WithUnsigned<Unsigned = U>,
    U: UnsignedBase + WithSigned<Signed = T>,
{
    fn from(r: Ratio<T>) -> Self {
        Self::from_rational(r)
    }
}

macro_rules! impl_from_primitive {
    ($TSigned:ty, $TUnsigned:ty) => {
        impl From<$TSigned> for ContinuedFraction<$TUnsigned> {
            fn from(t: $TSigned) -> Self {
                Self::from_integer(t)
            }
        }
    };
}
impl_from_primitive!(i8, u8);
impl_from_primitive!(i16, u16);
impl_from_primitive!(i32, u32);
impl_from_primitive!(i64, u64);
impl_from_primitive!(i128, u128);
impl_from_primitive!(isize, usize);

#[cfg(feature = "num-bigint")]
impl From<BigInt> for ContinuedFraction<BigUint> {
    fn from(t: BigInt) -> Self {
        Self::from_integer(t)
    }
}

impl<T: fmt::Display> fmt::Display for ContinuedFraction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "- ")?;
        }

        let (first, rest) = match self.coeffs.split_first() {
            Some(v) => v,
            None => return write!(f, "[ 0 ]"),
        };
        write!(f, "[ {}", first)?;

        let mut iter = rest.iter();
        if let Some(v) = iter.next() {
            write!(f, "; {}", v)?;
            for v in iter {
                write!(f, ", {}", v)?;
            }
        }
        write!(f, " ]")
    }
}

impl<U: Integer + Clone + WithSigned> FromStr for ContinuedFraction<U> {
    type Err = ParseContFracError;

    /// Parse from the format produced by `Display` (like 355/113 = "[ 3; 7, 16 ]", -1/2 = "- [ 0; 2 ]").
    /// Coefficients must also fit in the signed type used by the arithmetic.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, s),
        };
        let inner = s
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .ok_or(ParseContFracError::MissingBrackets)?
            .trim();
        if inner.is_empty() {
            return Ok(Self::new(Vec::new(), false));
        }

        let parse = |token: &str| {
            let token = token.trim();
            let v = U::from_str_radix(token, 10)
                .map_err(|_| ParseContFracError::InvalidCoefficient(token.to_string()))?;
            match v.clone().to_signed() {
                Some(_) => Ok(v),
                None => Err(ParseContFracError::CoefficientOutOfRange(token.to_string())),
            }
        };

        let mut coeffs = Vec::new();
        match inner.find(';') {
            Some(pos) => {
                coeffs.push(parse(&inner[..pos])?);
                for token in inner[pos + 1..].split(',') {
                    coeffs.push(parse(token)?);
                }
            }
            None => coeffs.push(parse(inner)?),
        }
        Ok(Self::new(coeffs, negative))
    }
}

impl<T, U> Zero for ContinuedFraction<U>
where
    T: SignedBase + WithUnsigned<Unsigned = U>,
    U: UnsignedBase + WithSigned<Signed = T>,
{
    #[inline]
    fn zero() -> Self {
        ContinuedFraction { coeffs: Vec::new(), negative: false }
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.cmp_fixpoint(Fixpoint::Zero) == Ordering::Equal
    }
}

impl<T, U> One for ContinuedFraction<U>
where
    T: SignedBase + WithUnsigned<Unsigned = U>,
    U: UnsignedBase + WithSigned<Signed = T>,
{
    fn one() -> Self {
        ContinuedFraction { coeffs: vec![U::one()], negative: false }
    }

    fn is_one(&self) -> bool {
        self.cmp_fixpoint(Fixpoint::One) == Ordering::Equal
    }
}

impl<T: Zero + One + PartialEq> Neg for ContinuedFraction<T> {
    type Output = ContinuedFraction<T>;

    fn neg(self) -> Self::Output {
        let mut result = self;
        if result.cmp_fixpoint(Fixpoint::Zero) != Ordering::Equal {
            // don't negate when the number is zero
            result.negative = !result.negative;
        }
        result
    }
}

// The operators panic on a zero divisor like `Ratio` does, use
// `apply` or `homo` to handle the error instead.
fn unwrap_arith<U>(result: Result<ContinuedFraction<U>, ArithmeticError>) -> ContinuedFraction<U> {
    match result {
        Ok(v) => v,
        Err(e) => panic!("{}", e),
    }
}

macro_rules! impl_binop {
    (impl $imp:ident, $method:ident, $imp_assign:ident, $method_assign:ident, $op:expr) => {
        impl<T, U> $imp<ContinuedFraction<U>> for ContinuedFraction<U>
        where
            T: SignedBase + WithUnsigned<Unsigned = U>,
            U: UnsignedBase + WithSigned<Signed = T>,
        {
            type Output = Self;

            fn $method(self, rhs: ContinuedFraction<U>) -> Self {
                unwrap_arith(apply($op, &self, &rhs))
            }
        }

        impl<'a, T, U> $imp<&'a ContinuedFraction<U>> for &'a ContinuedFraction<U>
        where
            T: SignedBase + WithUnsigned<Unsigned = U>,
            U: UnsignedBase + WithSigned<Signed = T>,
        {
            type Output = ContinuedFraction<U>;

            fn $method(self, rhs: &'a ContinuedFraction<U>) -> ContinuedFraction<U> {
                unwrap_arith(apply($op, self, rhs))
            }
        }

        impl<T, U> $imp<T> for ContinuedFraction<U>
        where
            T: SignedBase + WithUnsigned<Unsigned = U>,
            U: UnsignedBase + WithSigned<Signed = T>,
        {
            type Output = Self;

            fn $method(self, rhs: T) -> Self {
                unwrap_arith(self.scalar_op($op, rhs))
            }
        }

        impl<T, U> $imp_assign<ContinuedFraction<U>> for ContinuedFraction<U>
        where
            T: SignedBase + WithUnsigned<Unsigned = U>,
            U: UnsignedBase + WithSigned<Signed = T>,
        {
            fn $method_assign(&mut self, rhs: ContinuedFraction<U>) {
                *self = unwrap_arith(apply($op, self, &rhs));
            }
        }
    };
}

impl_binop!(impl Add, add, AddAssign, add_assign, Operator::Add);
impl_binop!(impl Sub, sub, SubAssign, sub_assign, Operator::Sub);
impl_binop!(impl Mul, mul, MulAssign, mul_assign, Operator::Mul);
impl_binop!(impl Div, div, DivAssign, div_assign, Operator::Div);
