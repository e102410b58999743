use goldschmidt_math::{FixedPointError, QFormat};

/// Binary exponent `m` of the real value behind `raw`, i.e.
/// `2^m <= raw / 2^QW < 2^(m+1)`.
///
/// The raw integer is `v * 2^QW`, so its most significant set bit sits at
/// `log2(v) + QW`; a leading-zero count gives it exactly.
pub fn extract_exponent(format: QFormat, raw: i32) -> Result<i32, FixedPointError> {
    if raw <= 0 {
        return Err(FixedPointError::Domain { raw });
    }
    let msb = (i32::BITS - 1 - raw.leading_zeros()) as i32;
    Ok(msb - format.frac_bits() as i32)
}
