mod cont_frac;
pub mod error;
mod round;
pub mod traits;

pub use cont_frac::{
    apply, apply_with, Block, BihomographicResult, ContinuedFraction, Convergents, DualBlock,
    Fixpoint, GosperConfig, HomographicResult, LazyContinuedFraction, Operator, Side, Terms,
    DEFAULT_MAX_ITERATIONS,
};
pub use error::{ArithmeticError, ParseContFracError};
pub use round::round;
pub use traits::Approximation;
