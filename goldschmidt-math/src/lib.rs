//! # goldschmidt-math
//!
//! Deterministic Q-format fixed-point primitives for the Goldschmidt
//! reciprocal-square-root kernel.
//!
//! [`QFormat`] fixes the word layout (`IW` integer bits, `QW` fractional bits,
//! at most 32 bits total). The [`ops`] module provides the scaled multiply,
//! multiply-by-square and correction-factor primitives. Every product is
//! formed in `i64` and narrowed back with an explicit overflow check; division
//! truncates toward zero.

pub mod fixed_point;
pub mod ops;

pub use fixed_point::{FixedPointError, FormatSpec, QFormat, MAX_WORD_LEN};
