//! # mini-goldschmidt
//!
//! Umbrella crate for the Goldschmidt fixed-point reciprocal square root.
//!
//! - [`math`]: Q-format layout, error type and the widened arithmetic primitives
//! - [`rsqrt`]: exponent extraction, exponent-only seed, refinement rounds
//!
//! Most callers only need [`reciprocal_sqrt_fixed_point`] (Q16.16, two rounds)
//! or a [`Goldschmidt`] built for their own format.

pub use goldschmidt_math as math;
pub use goldschmidt_rsqrt as rsqrt;

pub use goldschmidt_math::{FixedPointError, QFormat};
pub use goldschmidt_rsqrt::{reciprocal_sqrt_fixed_point, Goldschmidt, RsqrtOutput};
