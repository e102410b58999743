use goldschmidt_math::{FixedPointError, QFormat};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::exponent::extract_exponent;
use crate::refiner::Refiner;
use crate::seed::exponent_seed;

/// Refinement rounds the exponent-only seed is sized for.
pub const DEFAULT_ROUNDS: u32 = 2;

fn default_rounds() -> u32 {
    DEFAULT_ROUNDS
}

/// Result of one evaluation, including the square-root side product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsqrtOutput {
    /// `B / sqrt(v)`, the final `y` register.
    pub rsqrt: i32,
    /// `sqrt(v) * B`, the final `x` register.
    pub sqrt: i32,
    /// Binary exponent of the input; `None` when the caller supplied the seed.
    pub exponent: Option<i32>,
    /// Starting estimate the rounds refined.
    pub seed: i32,
    /// Goldschmidt rounds applied.
    pub rounds: u32,
}

/// Goldschmidt reciprocal square root for one Q format.
///
/// Construction-time configuration only: the format and round count are
/// fixed for the lifetime of the value, and several configurations can be
/// used side by side.
///
/// # Accuracy
///
/// With [`DEFAULT_ROUNDS`] in Q16.16 every positive input satisfies
/// `0.77 <= rsqrt^2 * input / B^2 <= 1.001`. The low end is reached just below
/// each power of two, where the exponent-only seed is furthest from the true
/// value. Powers of four are exact.
///
/// Any other round count changes that contract. More rounds tighten the
/// bound until truncation dominates; fewer loosen it sharply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goldschmidt {
    #[serde(default)]
    format: QFormat,
    #[serde(default = "default_rounds")]
    rounds: u32,
}

impl Default for Goldschmidt {
    fn default() -> Self {
        Self::new(QFormat::Q16_16)
    }
}

impl Goldschmidt {
    pub const fn new(format: QFormat) -> Self {
        Self {
            format,
            rounds: DEFAULT_ROUNDS,
        }
    }

    /// Override the round count. The documented error bound only holds for
    /// [`DEFAULT_ROUNDS`].
    pub const fn with_rounds(self, rounds: u32) -> Self {
        Self { rounds, ..self }
    }

    pub const fn format(&self) -> QFormat {
        self.format
    }

    pub const fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Reciprocal square root of `input`, raw in and raw out.
    pub fn rsqrt(&self, input: i32) -> Result<i32, FixedPointError> {
        self.evaluate(input).map(|out| out.rsqrt)
    }

    /// Full pipeline: exponent, seed, refinement.
    pub fn evaluate(&self, input: i32) -> Result<RsqrtOutput, FixedPointError> {
        let exponent = extract_exponent(self.format, input)?;
        self.check_in_word("input", input)?;
        let seed = exponent_seed(self.format, exponent)?;
        debug!("rsqrt input={} exponent={} seed={}", input, exponent, seed);

        let state = Refiner::seeded(self.format, input, seed, self.rounds)?.finish()?;
        Ok(RsqrtOutput {
            rsqrt: state.y,
            sqrt: state.x,
            exponent: Some(exponent),
            seed,
            rounds: self.rounds,
        })
    }

    /// Refine from a caller-supplied estimate instead of the exponent seed.
    ///
    /// The seed must not exceed the true `B / sqrt(input)` by a factor of
    /// `sqrt(3)` or more; such seeds fail with [`FixedPointError::Divergent`].
    pub fn refine_from(&self, input: i32, seed: i32) -> Result<RsqrtOutput, FixedPointError> {
        if input <= 0 {
            return Err(FixedPointError::Domain { raw: input });
        }
        if seed <= 0 {
            return Err(FixedPointError::Domain { raw: seed });
        }
        self.check_in_word("input", input)?;
        self.check_in_word("seed", seed)?;

        let state = Refiner::seeded(self.format, input, seed, self.rounds)?.finish()?;
        Ok(RsqrtOutput {
            rsqrt: state.y,
            sqrt: state.x,
            exponent: None,
            seed,
            rounds: self.rounds,
        })
    }

    /// Evaluate every element; the first failure aborts the whole batch.
    pub fn rsqrt_slice(&self, inputs: &[i32]) -> Result<Vec<i32>, FixedPointError> {
        inputs.iter().map(|&raw| self.rsqrt(raw)).collect()
    }

    fn check_in_word(&self, op: &'static str, raw: i32) -> Result<(), FixedPointError> {
        if self.format.contains(raw as i64) {
            Ok(())
        } else {
            Err(FixedPointError::Overflow {
                op,
                value: raw as i64,
            })
        }
    }
}

/// Q16.16 reciprocal square root with the default two rounds.
pub fn reciprocal_sqrt_fixed_point(input: i32) -> Result<i32, FixedPointError> {
    Goldschmidt::default().rsqrt(input)
}
