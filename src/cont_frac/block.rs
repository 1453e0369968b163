use num_integer::Integer;
use num_traits::{CheckedAdd, CheckedMul, CheckedSub, One, Signed, Zero};
use std::cmp::Ordering;

/// True if all values are strictly positive, or all strictly negative
fn same_sign<T: Signed>(values: &[&T]) -> bool {
    values.iter().all(|v| v.is_positive()) || values.iter().all(|v| v.is_negative())
}

/// `base + coeff * t`
#[inline]
fn mul_add<T: CheckedAdd + CheckedMul>(base: &T, coeff: &T, t: &T) -> Option<T> {
    coeff.checked_mul(t)?.checked_add(base)
}

/// `base - r * coeff`
#[inline]
fn mul_sub<T: CheckedSub + CheckedMul>(base: &T, coeff: &T, r: &T) -> Option<T> {
    base.checked_sub(&r.checked_mul(coeff)?)
}

#[inline]
fn checked_neg<T: Zero + CheckedSub>(v: &T) -> Option<T> {
    T::zero().checked_sub(v)
}

#[inline]
fn checked_abs<T: Signed + CheckedSub>(v: T) -> Option<T> {
    if v.is_negative() {
        checked_neg(&v)
    } else {
        Some(v)
    }
}

/// A block on the magic table for homographic operation computation of continued fractions
/// The method is described in <https://crypto.stanford.edu/pbc/notes/contfrac/compute.html>
///
/// The block represents `(pm1 * x + pm2) / (qm1 * x + qm2)`, where x is the
/// tail of the input that has not been consumed yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block<T> {
    pm1: T, // p_(k-1)
    pm2: T, // p_(k-2)
    qm1: T, // q_(k-1)
    qm2: T, // q_(k-2)
}

impl<T> Block<T> {
    /// create a block that represents (ax + b) / (cx + d)
    pub fn new(a: T, b: T, c: T, d: T) -> Self {
        Block { pm1: a, pm2: b, qm1: c, qm2: d }
    }

    /// The latest convergent `(p, q)`
    #[inline]
    pub fn convergent(&self) -> (&T, &T) {
        (&self.pm1, &self.qm1)
    }
}

impl<T: Zero + One> Block<T> {
    /// create a block that represents a identity operation
    pub fn identity() -> Self {
        Block { pm1: T::one(), pm2: T::zero(), qm1: T::zero(), qm2: T::one() }
    }
}

impl<T: Integer + Clone + CheckedAdd + CheckedMul> Block<T> {
    /// substitute `x = a + 1/x'` with a coefficient from a regular continued fraction,
    /// returns None on overflow
    pub fn insert(&self, a: &T) -> Option<Self> {
        Some(Block {
            pm1: mul_add(&self.pm2, &self.pm1, a)?,
            pm2: self.pm1.clone(),
            qm1: mul_add(&self.qm2, &self.qm1, a)?,
            qm2: self.qm1.clone(),
        })
    }
}

impl<T: Integer + Signed + Clone + CheckedSub + CheckedMul> Block<T> {
    /// substitute `x = ∞` once the input is exhausted, the block becomes a constant
    pub fn insert_inf(&self) -> Self {
        Block {
            pm1: self.pm1.clone(),
            pm2: self.pm1.clone(),
            qm1: self.qm1.clone(),
            qm2: self.qm1.clone(),
        }
    }

    /// substitute `x = -x'`
    pub fn negate(&self) -> Option<Self> {
        Some(Block {
            pm1: checked_neg(&self.pm1)?,
            pm2: self.pm2.clone(),
            qm1: checked_neg(&self.qm1)?,
            qm2: self.qm2.clone(),
        })
    }

    /// Check whether the integer part is determined for every x in `[0, ∞]`
    #[inline]
    pub fn check_integer(&self) -> Option<T> {
        if !same_sign(&[&self.qm1, &self.qm2]) {
            return None;
        }

        let i1 = self.pm1.div_floor(&self.qm1);
        let i2 = self.pm2.div_floor(&self.qm2);
        if i1 == i2 {
            Some(i1)
        } else {
            None
        }
    }

    /// emit the integer `i` and take the reciprocal of the remainder
    pub fn output(&self, i: &T) -> Option<Self> {
        Some(Block {
            pm1: self.qm1.clone(),
            pm2: self.qm2.clone(),
            qm1: mul_sub(&self.pm1, &self.qm1, i)?,
            qm2: mul_sub(&self.pm2, &self.qm2, i)?,
        })
    }

    /// The denominators vanished, nothing is left to emit
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.qm1.is_zero() && self.qm2.is_zero()
    }
}

/// The input a [DualBlock] should consume next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    X,
    Y,
}

/// A block on the magic table for bihomographic operation computation of continued fractions
/// The method is described in <https://crypto.stanford.edu/pbc/notes/contfrac/bihom.html>
///
/// The block represents `(a + bx + cy + dxy) / (e + fx + gy + hxy)`. The ratios
/// `a/e`, `b/f`, `c/g` and `d/h` are the values at the corners `(0, 0)`, `(∞, 0)`,
/// `(0, ∞)` and `(∞, ∞)`. Every transition returns a new block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DualBlock<T> {
    a: T, // constant
    b: T, // x
    c: T, // y
    d: T, // xy
    e: T,
    f: T,
    g: T,
    h: T,
}

impl<T> DualBlock<T> {
    /// create a block that represents (a + bx + cy + dxy)/(e + fx + gy + hxy)
    #[allow(clippy::too_many_arguments)]
    pub fn new(a: T, b: T, c: T, d: T, e: T, f: T, g: T, h: T) -> Self {
        DualBlock { a, b, c, d, e, f, g, h }
    }

    pub fn numerators(&self) -> [&T; 4] {
        [&self.a, &self.b, &self.c, &self.d]
    }

    pub fn denominators(&self) -> [&T; 4] {
        [&self.e, &self.f, &self.g, &self.h]
    }
}

/// `|n1 d0 - n0 d1| * |d2 d0|`. Comparing two of these compares the spreads
/// `|n1/d1 - n0/d0|` of two corners without any division.
fn weighted_spread<T>(n1: &T, d1: &T, n0: &T, d0: &T, d2: &T) -> Option<T>
where
    T: Signed + CheckedSub + CheckedMul,
{
    let spread = n1.checked_mul(d0)?.checked_sub(&n0.checked_mul(d1)?)?;
    let weight = d2.checked_mul(d0)?;
    checked_abs(spread)?.checked_mul(&checked_abs(weight)?)
}

impl<T: Integer + Signed + Clone + CheckedAdd + CheckedSub + CheckedMul> DualBlock<T> {
    /// substitute `x = t + 1/x'`, returns None on overflow
    pub fn insert_x(&self, t: &T) -> Option<Self> {
        Some(DualBlock {
            a: self.b.clone(),
            b: mul_add(&self.a, &self.b, t)?,
            c: self.d.clone(),
            d: mul_add(&self.c, &self.d, t)?,
            e: self.f.clone(),
            f: mul_add(&self.e, &self.f, t)?,
            g: self.h.clone(),
            h: mul_add(&self.g, &self.h, t)?,
        })
    }

    /// substitute `y = t + 1/y'`, returns None on overflow
    pub fn insert_y(&self, t: &T) -> Option<Self> {
        Some(DualBlock {
            a: self.c.clone(),
            b: self.d.clone(),
            c: mul_add(&self.a, &self.c, t)?,
            d: mul_add(&self.b, &self.d, t)?,
            e: self.g.clone(),
            f: self.h.clone(),
            g: mul_add(&self.e, &self.g, t)?,
            h: mul_add(&self.f, &self.h, t)?,
        })
    }

    /// substitute `x = ∞`, after which x no longer affects the value
    pub fn insert_x_inf(&self) -> Self {
        DualBlock {
            a: self.b.clone(),
            b: self.b.clone(),
            c: self.d.clone(),
            d: self.d.clone(),
            e: self.f.clone(),
            f: self.f.clone(),
            g: self.h.clone(),
            h: self.h.clone(),
        }
    }

    /// substitute `y = ∞`, after which y no longer affects the value
    pub fn insert_y_inf(&self) -> Self {
        DualBlock {
            a: self.c.clone(),
            b: self.d.clone(),
            c: self.c.clone(),
            d: self.d.clone(),
            e: self.g.clone(),
            f: self.h.clone(),
            g: self.g.clone(),
            h: self.h.clone(),
        }
    }

    /// substitute `x = -x'`
    pub fn negate_x(&self) -> Option<Self> {
        Some(DualBlock {
            a: self.a.clone(),
            b: checked_neg(&self.b)?,
            c: self.c.clone(),
            d: checked_neg(&self.d)?,
            e: self.e.clone(),
            f: checked_neg(&self.f)?,
            g: self.g.clone(),
            h: checked_neg(&self.h)?,
        })
    }

    /// substitute `y = -y'`
    pub fn negate_y(&self) -> Option<Self> {
        Some(DualBlock {
            a: self.a.clone(),
            b: self.b.clone(),
            c: checked_neg(&self.c)?,
            d: checked_neg(&self.d)?,
            e: self.e.clone(),
            f: self.f.clone(),
            g: checked_neg(&self.g)?,
            h: checked_neg(&self.h)?,
        })
    }

    /// emit the integer `r` and take the reciprocal of the remainder
    pub fn output(&self, r: &T) -> Option<Self> {
        Some(DualBlock {
            a: self.e.clone(),
            b: self.f.clone(),
            c: self.g.clone(),
            d: self.h.clone(),
            e: mul_sub(&self.a, &self.e, r)?,
            f: mul_sub(&self.b, &self.f, r)?,
            g: mul_sub(&self.c, &self.g, r)?,
            h: mul_sub(&self.d, &self.h, r)?,
        })
    }

    /// Check whether the integer part is determined for every x, y in `[0, ∞]`.
    /// The denominators must share a sign, otherwise a pole lies inside the range.
    #[inline]
    pub fn check_integer(&self) -> Option<T> {
        if !same_sign(&self.denominators()) {
            return None;
        }

        let i = self.a.div_floor(&self.e);
        if i == self.b.div_floor(&self.f)
            && i == self.c.div_floor(&self.g)
            && i == self.d.div_floor(&self.h)
        {
            Some(i)
        } else {
            None
        }
    }

    /// Choose the input whose corner spread `|b/f - a/e|` or `|c/g - a/e|` is larger.
    /// `fallback` is used on ties, when neither spread is defined, and when
    /// the cross products overflow.
    pub fn preferred_side(&self, fallback: Side) -> Side {
        let x_defined = !self.f.is_zero() && !self.e.is_zero();
        let y_defined = !self.g.is_zero() && !self.e.is_zero();

        match (x_defined, y_defined) {
            (true, false) => Side::X,
            (false, true) => Side::Y,
            (false, false) => fallback,
            (true, true) => {
                let dx = weighted_spread(&self.b, &self.f, &self.a, &self.e, &self.g);
                let dy = weighted_spread(&self.c, &self.g, &self.a, &self.e, &self.f);
                match (dx, dy) {
                    (Some(dx), Some(dy)) => match dx.cmp(&dy) {
                        Ordering::Greater => Side::X,
                        Ordering::Less => Side::Y,
                        Ordering::Equal => fallback,
                    },
                    _ => fallback,
                }
            }
        }
    }

    /// The denominators vanished, nothing is left to emit
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.denominators().iter().all(|v| v.is_zero())
    }
}
