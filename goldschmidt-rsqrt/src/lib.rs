//! # goldschmidt-rsqrt
//!
//! Reciprocal square root of a positive Q-format fixed-point value by
//! Goldschmidt iteration, using only integer multiply, add, shift and
//! truncating divide.
//!
//! The pipeline runs three stages in order:
//! - [`extract_exponent`]: binary exponent from a leading-bit scan
//! - [`exponent_seed`]: `B / sqrt(2^m)` from the exponent alone
//! - [`Refiner`]: fixed number of Goldschmidt rounds (two by default)
//!
//! [`Goldschmidt`] ties them together for one [`QFormat`];
//! [`reciprocal_sqrt_fixed_point`] is the Q16.16 shorthand.

pub mod exponent;
pub mod goldschmidt;
pub mod refiner;
pub mod seed;

pub use exponent::extract_exponent;
pub use goldschmidt::{reciprocal_sqrt_fixed_point, Goldschmidt, RsqrtOutput, DEFAULT_ROUNDS};
pub use goldschmidt_math::{FixedPointError, QFormat};
pub use refiner::{IterationState, Phase, Refiner};
pub use seed::exponent_seed;
