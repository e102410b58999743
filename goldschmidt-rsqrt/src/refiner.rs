use goldschmidt_math::ops::{mul_fp, mul_square, newton_factor};
use goldschmidt_math::{FixedPointError, QFormat};
use log::trace;

/// Registers threaded through the Goldschmidt rounds, all in the same Q format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationState {
    /// Starts at the input, converges to `B` (real 1.0).
    pub b: i32,
    /// Correction factor `Y` applied in the next round.
    pub factor: i32,
    /// Running `sqrt(v) * B`.
    pub x: i32,
    /// Running `B / sqrt(v)`.
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Seeded,
    Refining { completed: u32 },
    Done,
}

/// Stepping Goldschmidt refiner.
///
/// Each round:
///
/// ```text
/// b <- b * Y^2 / B^2
/// Y <- (3B - b) / 2
/// x <- x * Y / B
/// y <- y * Y / B
/// ```
///
/// `b` must stay below `3B - 1` so that `Y` remains positive; a seed that
/// overshoots the true value by `sqrt(3)` or more fails with `Divergent`.
/// A failed step leaves the state as it was before the step.
#[derive(Debug, Clone)]
pub struct Refiner {
    format: QFormat,
    rounds: u32,
    completed: u32,
    state: IterationState,
}

impl Refiner {
    /// Enter `Seeded` with `b = input`, `Y = y = seed`, `x = input * seed / B`.
    pub fn seeded(
        format: QFormat,
        input: i32,
        seed: i32,
        rounds: u32,
    ) -> Result<Self, FixedPointError> {
        let x = mul_fp(format, input, seed)?;
        Ok(Self {
            format,
            rounds,
            completed: 0,
            state: IterationState {
                b: input,
                factor: seed,
                x,
                y: seed,
            },
        })
    }

    pub fn phase(&self) -> Phase {
        if self.completed >= self.rounds {
            Phase::Done
        } else if self.completed == 0 {
            Phase::Seeded
        } else {
            Phase::Refining {
                completed: self.completed,
            }
        }
    }

    pub fn state(&self) -> IterationState {
        self.state
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Run one round and return the resulting phase. No-op once `Done`.
    pub fn step(&mut self) -> Result<Phase, FixedPointError> {
        if self.phase() == Phase::Done {
            return Ok(Phase::Done);
        }

        let format = self.format;
        let prev = self.state;
        let b = mul_square(format, prev.b, prev.factor)?;
        let factor = newton_factor(format, b)?;
        if factor <= 0 {
            return Err(FixedPointError::Divergent { b });
        }
        let x = mul_fp(format, prev.x, factor)?;
        let y = mul_fp(format, prev.y, factor)?;

        self.state = IterationState { b, factor, x, y };
        self.completed += 1;
        trace!(
            "goldschmidt round {}/{}: b={} Y={} x={} y={}",
            self.completed,
            self.rounds,
            b,
            factor,
            x,
            y
        );
        Ok(self.phase())
    }

    /// Run the remaining rounds and return the final registers.
    pub fn finish(mut self) -> Result<IterationState, FixedPointError> {
        while self.phase() != Phase::Done {
            self.step()?;
        }
        Ok(self.state)
    }
}
