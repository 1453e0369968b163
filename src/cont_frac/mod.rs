//! Data structures and algorithms implementations related to
//! simple continued fractions of rational numbers
//!
//! There are two abstractions of the continued fraction
//! 1. [ContinuedFraction][ContinuedFraction] represents a finite simple continued fraction with its sign
//! 2. [LazyContinuedFraction][LazyContinuedFraction] is a trait that provides the Gosper transforms on
//!    any iterator of terms, the result is produced term by term.
//!
//! # References:
//! - <https://pi.math.cornell.edu/~gautam/ContinuedFractions.pdf>
//! - <https://crypto.stanford.edu/pbc/notes/contfrac/>
//! - <https://perl.plover.com/classes/cftalk/INFO/gosper.txt>
//! - <https://github.com/blynn/frac>
//!

mod block;
mod lazy;
mod simple;

pub use block::{Block, DualBlock, Side};
pub use lazy::*;
pub use simple::*;
