use super::{FixedPointError, QFormat};

// All products are formed in i64. With WL <= 32 both operands fit in i32,
// so |a * b| <= 2^62 and the widened step cannot wrap; only narrowing can fail.

/// Checked narrowing of a widened intermediate back into the word.
pub fn narrow(format: QFormat, op: &'static str, wide: i64) -> Result<i32, FixedPointError> {
    if format.contains(wide) {
        Ok(wide as i32)
    } else {
        Err(FixedPointError::Overflow { op, value: wide })
    }
}

#[inline]
fn scaled_product(format: QFormat, a: i64, b: i64) -> i64 {
    // `/` truncates toward zero; a shift would floor negatives.
    (a * b) / format.scale()
}

/// Scaled multiply: `(a * b) / B`, truncating.
pub fn mul_fp(format: QFormat, a: i32, b: i32) -> Result<i32, FixedPointError> {
    narrow(format, "mul_fp", scaled_product(format, a as i64, b as i64))
}

/// Scaled multiply-by-square: `b * y^2 / B^2`, evaluated as `((b * y) / B) * y / B`.
///
/// Squaring `y` first would leave `y^2 / B` outside the word for small inputs
/// (large seeds) and truncate hard for large ones, so the product with `b` is
/// taken first. The intermediate is narrowed like any other fixed-point value.
pub fn mul_square(format: QFormat, b: i32, y: i32) -> Result<i32, FixedPointError> {
    let by = narrow(format, "mul_square", scaled_product(format, b as i64, y as i64))?;
    narrow(format, "mul_square", scaled_product(format, by as i64, y as i64))
}

/// Goldschmidt correction factor for rsqrt: `(3B - b) / 2`, truncating.
pub fn newton_factor(format: QFormat, b: i32) -> Result<i32, FixedPointError> {
    narrow(format, "newton_factor", (3 * format.scale() - b as i64) / 2)
}
