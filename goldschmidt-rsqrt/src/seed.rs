use goldschmidt_math::ops::narrow;
use goldschmidt_math::{FixedPointError, QFormat};

/// `floor(sqrt(2) * 2^62)`.
const SQRT_2_Q62: u128 = 0x5A82_7999_FCEF_3242;
const ONE_Q62: u128 = 1 << 62;
const Q62: u32 = 62;

/// Exponent-only seed: `trunc(B / sqrt(2^m))`.
///
/// The mantissa of the input is ignored, so the seed is exact for powers of
/// two and up to `1 - 1/sqrt(2)` too large just below the next one. The
/// refinement round count is sized against that error.
///
/// Raw seed is `2^(t/2)` with `t = 2*QW - m`. Even `t` is a plain shift; odd
/// `t` scales a Q62 `sqrt(2)` instead, which holds far more bits than any
/// supported word, so the truncated result matches the real-valued formula.
pub fn exponent_seed(format: QFormat, exponent: i32) -> Result<i32, FixedPointError> {
    let t = 2 * format.frac_bits() as i64 - exponent as i64;
    let half = t.div_euclid(2);
    let mantissa = if t.rem_euclid(2) == 1 {
        SQRT_2_Q62
    } else {
        ONE_Q62
    };

    let wide = if half < 0 {
        // below one ulp
        0
    } else if half > 64 {
        i64::MAX
    } else {
        i64::try_from((mantissa << half) >> Q62).unwrap_or(i64::MAX)
    };
    narrow(format, "seed", wide)
}
