//! Lazy homographic and bihomographic transforms over streams of terms

use super::block::{Block, DualBlock, Side};
use super::simple::ContinuedFraction;
use crate::error::ArithmeticError;
use crate::traits::{SignedBase, UnsignedBase, WithSigned, WithUnsigned};
use core::fmt;
use num_traits::{One, Zero};
use tracing::{debug, trace};

/// Default upper bound on the number of input substitutions of one transform
pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

/// Limits applied to the transforms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GosperConfig {
    /// Maximum number of input terms (including the final `∞` substitutions)
    /// consumed before the transform gives up with [ArithmeticError::NonTerminating]
    pub max_iterations: usize,
}

impl Default for GosperConfig {
    fn default() -> Self {
        GosperConfig { max_iterations: DEFAULT_MAX_ITERATIONS }
    }
}

impl GosperConfig {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Binary arithmetic operators supported by the bihomographic transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// The initial block `(a + bx + cy + dxy)/(e + fx + gy + hxy)` computing this operator
    pub fn block<T: Zero + One + core::ops::Neg<Output = T>>(self) -> DualBlock<T> {
        let (o, z) = (T::one, T::zero);
        match self {
            Operator::Add => DualBlock::new(z(), o(), o(), z(), o(), z(), z(), z()),
            Operator::Sub => DualBlock::new(z(), o(), -o(), z(), o(), z(), z(), z()),
            Operator::Mul => DualBlock::new(z(), z(), z(), o(), o(), z(), z(), z()),
            Operator::Div => DualBlock::new(z(), o(), z(), z(), z(), z(), o(), z()),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Lazy continued fraction arithmetic on any iterator of terms.
///
/// The iterator must yield the non-negative terms of a simple continued fraction
/// (the sign of an operand belongs in the transform coefficients, see
/// [Block::negate] and [DualBlock::negate_x]). The results are iterators of the
/// terms of a simple continued fraction, whose first term may be negative.
pub trait LazyContinuedFraction: Iterator {
    /// This method returns a homographic function result on the fraction
    /// A homographic function is `(ax + b)/(cx + d)`
    fn homo(
        self,
        a: Self::Item,
        b: Self::Item,
        c: Self::Item,
        d: Self::Item,
    ) -> HomographicResult<Self, Self::Item>
    where
        Self: Sized,
        Self::Item: SignedBase,
    {
        HomographicResult::new(Block::new(a, b, c, d), self, GosperConfig::default())
    }

    /// This method returns a bihomographic function result on the two fractions
    /// A bihomographic function is `(a + bx + cy + dxy)/(e + fx + gy + hxy)`
    fn bihomo<U: IntoIterator<Item = Self::Item>>(
        self,
        rhs: U,
        block: DualBlock<Self::Item>,
        config: GosperConfig,
    ) -> BihomographicResult<Self, U::IntoIter, Self::Item>
    where
        Self: Sized,
        Self::Item: SignedBase,
    {
        BihomographicResult::new(block, self, rhs.into_iter(), config)
    }
}

impl<T: ?Sized> LazyContinuedFraction for T where T: Iterator {}

/// Iterator of [LazyContinuedFraction::homo()] result
#[derive(Debug, Clone)]
pub struct HomographicResult<I: Iterator<Item = T>, T> {
    block: Block<T>,
    coeffs: I,
    exhausted: bool, // the input has been substituted by ∞
    emitted: bool,
    finished: bool,
    iterations: usize,
    max_iterations: usize,
}

impl<I: Iterator<Item = T>, T> HomographicResult<I, T> {
    pub fn new(block: Block<T>, coeffs: I, config: GosperConfig) -> Self {
        HomographicResult {
            block,
            coeffs,
            exhausted: false,
            emitted: false,
            finished: false,
            iterations: 0,
            max_iterations: config.max_iterations,
        }
    }

    fn fail(&mut self, err: ArithmeticError) -> Option<Result<T, ArithmeticError>> {
        self.finished = true;
        debug!(error = %err, iterations = self.iterations, "homographic transform failed");
        Some(Err(err))
    }
}

impl<I: Iterator<Item = T>, T: SignedBase> Iterator for HomographicResult<I, T> {
    type Item = Result<T, ArithmeticError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            if self.block.is_exhausted() {
                if self.emitted {
                    self.finished = true;
                    return None;
                }
                return self.fail(ArithmeticError::DivisionByZero);
            }

            if let Some(i) = self.block.check_integer() {
                trace!(term = ?i, "emit");
                self.block = match self.block.output(&i) {
                    Some(block) => block,
                    None => return self.fail(ArithmeticError::Overflow),
                };
                self.emitted = true;
                return Some(Ok(i));
            }

            if self.exhausted {
                // a constant block always emits unless its denominator is zero
                return self.fail(ArithmeticError::DivisionByZero);
            }
            if self.iterations >= self.max_iterations {
                let iterations = self.iterations;
                return self.fail(ArithmeticError::NonTerminating { iterations });
            }
            self.iterations += 1;

            let block = match self.coeffs.next() {
                Some(v) => {
                    trace!(term = ?v, "consume");
                    self.block.insert(&v)
                }
                None => {
                    self.exhausted = true;
                    Some(self.block.insert_inf())
                }
            };
            self.block = match block {
                Some(block) => block,
                None => return self.fail(ArithmeticError::Overflow),
            };
        }
    }
}

/// Iterator of [LazyContinuedFraction::bihomo()] result
#[derive(Debug, Clone)]
pub struct BihomographicResult<X: Iterator<Item = T>, Y: Iterator<Item = T>, T> {
    block: DualBlock<T>,
    x_coeffs: X,
    y_coeffs: Y,
    x_taken: usize,
    y_taken: usize,
    x_exhausted: bool,
    y_exhausted: bool,
    emitted: bool,
    finished: bool,
    max_iterations: usize,
}

impl<X: Iterator<Item = T>, Y: Iterator<Item = T>, T> BihomographicResult<X, Y, T> {
    pub fn new(block: DualBlock<T>, x_coeffs: X, y_coeffs: Y, config: GosperConfig) -> Self {
        BihomographicResult {
            block,
            x_coeffs,
            y_coeffs,
            x_taken: 0,
            y_taken: 0,
            x_exhausted: false,
            y_exhausted: false,
            emitted: false,
            finished: false,
            max_iterations: config.max_iterations,
        }
    }

    /// Number of input substitutions performed so far
    #[inline]
    pub fn iterations(&self) -> usize {
        self.x_taken + self.y_taken
    }

    fn fail(&mut self, err: ArithmeticError) -> Option<Result<T, ArithmeticError>> {
        self.finished = true;
        debug!(error = %err, iterations = self.iterations(), "bihomographic transform failed");
        Some(Err(err))
    }
}

impl<X: Iterator<Item = T>, Y: Iterator<Item = T>, T: SignedBase> BihomographicResult<X, Y, T> {
    /// Consume a term of x, returns None on overflow
    fn advance_x(&mut self) -> Option<()> {
        self.x_taken += 1;
        self.block = match self.x_coeffs.next() {
            Some(v) => {
                trace!(term = ?v, "consume x");
                self.block.insert_x(&v)?
            }
            None => {
                trace!("x exhausted");
                self.x_exhausted = true;
                self.block.insert_x_inf()
            }
        };
        Some(())
    }

    /// Consume a term of y, returns None on overflow
    fn advance_y(&mut self) -> Option<()> {
        self.y_taken += 1;
        self.block = match self.y_coeffs.next() {
            Some(v) => {
                trace!(term = ?v, "consume y");
                self.block.insert_y(&v)?
            }
            None => {
                trace!("y exhausted");
                self.y_exhausted = true;
                self.block.insert_y_inf()
            }
        };
        Some(())
    }
}

impl<X: Iterator<Item = T>, Y: Iterator<Item = T>, T: SignedBase> Iterator
    for BihomographicResult<X, Y, T>
{
    type Item = Result<T, ArithmeticError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            if self.block.is_exhausted() {
                if self.emitted {
                    self.finished = true;
                    return None;
                }
                return self.fail(ArithmeticError::DivisionByZero);
            }

            if let Some(i) = self.block.check_integer() {
                trace!(term = ?i, "emit");
                self.block = match self.block.output(&i) {
                    Some(block) => block,
                    None => return self.fail(ArithmeticError::Overflow),
                };
                self.emitted = true;
                return Some(Ok(i));
            }

            let side = match (self.x_exhausted, self.y_exhausted) {
                (true, true) => {
                    // a constant block always emits unless its denominator is zero
                    return self.fail(ArithmeticError::DivisionByZero);
                }
                (true, false) => Side::Y,
                (false, true) => Side::X,
                (false, false) => {
                    let fallback = if self.x_taken <= self.y_taken { Side::X } else { Side::Y };
                    self.block.preferred_side(fallback)
                }
            };

            if self.iterations() >= self.max_iterations {
                let iterations = self.iterations();
                return self.fail(ArithmeticError::NonTerminating { iterations });
            }

            let advanced = match side {
                Side::X => self.advance_x(),
                Side::Y => self.advance_y(),
            };
            if advanced.is_none() {
                return self.fail(ArithmeticError::Overflow);
            }
        }
    }
}

/// Compute `x op y` with the default [GosperConfig]
pub fn apply<T, U>(
    op: Operator,
    x: &ContinuedFraction<U>,
    y: &ContinuedFraction<U>,
) -> Result<ContinuedFraction<U>, ArithmeticError>
where
    T: SignedBase + WithUnsigned<Unsigned = U>,
    U: UnsignedBase + WithSigned<Signed = T>,
{
    apply_with(&GosperConfig::default(), op, x, y)
}

/// Compute `x op y` with Gosper's algorithm, without evaluating either operand
pub fn apply_with<T, U>(
    config: &GosperConfig,
    op: Operator,
    x: &ContinuedFraction<U>,
    y: &ContinuedFraction<U>,
) -> Result<ContinuedFraction<U>, ArithmeticError>
where
    T: SignedBase + WithUnsigned<Unsigned = U>,
    U: UnsignedBase + WithSigned<Signed = T>,
{
    if op == Operator::Div && y.is_zero() {
        debug!(%op, "divisor is zero");
        return Err(ArithmeticError::DivisionByZero);
    }

    let mut block = op.block::<T>();
    if x.is_negative() {
        block = block.negate_x().ok_or(ArithmeticError::Overflow)?;
    }
    if y.is_negative() {
        block = block.negate_y().ok_or(ArithmeticError::Overflow)?;
    }

    let mut result = x.terms()?.bihomo(y.terms()?, block, *config);
    let terms = result.by_ref().collect::<Result<Vec<T>, _>>()?;
    debug!(%op, terms = terms.len(), iterations = result.iterations(), "bihomographic transform finished");
    Ok(terms.into_iter().collect())
}
