use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Widest supported word: raw values are carried as `i32`, so every scaled
/// product fits an `i64` intermediate without wrapping.
pub const MAX_WORD_LEN: u32 = 32;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedPointError {
    #[error("Domain error: {raw} is not strictly positive")]
    Domain { raw: i32 },
    #[error("Arithmetic overflow in {op}: {value} does not fit the fixed-point word")]
    Overflow { op: &'static str, value: i64 },
    #[error("Divergent iteration: b = {b} leaves no positive correction factor")]
    Divergent { b: i32 },
    #[error("Invalid Q format: Q{int_bits}.{frac_bits}")]
    InvalidFormat { int_bits: u32, frac_bits: u32 },
}

/// Signed Q-format: `int_bits` integer bits (sign included), `frac_bits`
/// fractional bits. A raw integer `r` represents `r / 2^frac_bits`.
///
/// Word length `WL = int_bits + frac_bits` is capped at [`MAX_WORD_LEN`].
/// Values are fixed at construction; several formats can be live at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FormatSpec", into = "FormatSpec")]
pub struct QFormat {
    int_bits: u32,
    frac_bits: u32,
}

/// Unvalidated wire form of [`QFormat`], used for config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatSpec {
    pub int_bits: u32,
    pub frac_bits: u32,
}

impl QFormat {
    /// Q16.16: 32-bit word, scale factor 65536.
    pub const Q16_16: QFormat = QFormat {
        int_bits: 16,
        frac_bits: 16,
    };

    pub const fn new(int_bits: u32, frac_bits: u32) -> Result<Self, FixedPointError> {
        if int_bits == 0 || frac_bits == 0 || int_bits + frac_bits > MAX_WORD_LEN {
            return Err(FixedPointError::InvalidFormat {
                int_bits,
                frac_bits,
            });
        }
        Ok(Self {
            int_bits,
            frac_bits,
        })
    }

    pub const fn int_bits(&self) -> u32 {
        self.int_bits
    }

    pub const fn frac_bits(&self) -> u32 {
        self.frac_bits
    }

    pub const fn word_len(&self) -> u32 {
        self.int_bits + self.frac_bits
    }

    /// Scale factor `B = 2^frac_bits`, widened.
    pub const fn scale(&self) -> i64 {
        1i64 << self.frac_bits
    }

    pub const fn max_raw(&self) -> i64 {
        (1i64 << (self.word_len() - 1)) - 1
    }

    pub const fn min_raw(&self) -> i64 {
        -(1i64 << (self.word_len() - 1))
    }

    /// True if `wide` is representable in this word.
    pub const fn contains(&self, wide: i64) -> bool {
        wide >= self.min_raw() && wide <= self.max_raw()
    }

    /// Real value → raw, round to nearest (ties away from zero), saturating.
    pub fn from_f64(&self, value: f64) -> i32 {
        let scaled = (value * self.scale() as f64).round();
        // NaN lands on zero
        if scaled.is_nan() {
            0
        } else if scaled >= self.max_raw() as f64 {
            self.max_raw() as i32
        } else if scaled <= self.min_raw() as f64 {
            self.min_raw() as i32
        } else {
            scaled as i32
        }
    }

    pub fn to_f64(&self, raw: i32) -> f64 {
        raw as f64 / self.scale() as f64
    }
}

impl Default for QFormat {
    fn default() -> Self {
        Self::Q16_16
    }
}

impl TryFrom<FormatSpec> for QFormat {
    type Error = FixedPointError;

    fn try_from(repr: FormatSpec) -> Result<Self, Self::Error> {
        QFormat::new(repr.int_bits, repr.frac_bits)
    }
}

impl From<QFormat> for FormatSpec {
    fn from(format: QFormat) -> Self {
        Self {
            int_bits: format.int_bits,
            frac_bits: format.frac_bits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_q16_16_layout() {
        let q = QFormat::Q16_16;
        assert_eq!(q.word_len(), 32);
        assert_eq!(q.scale(), 65536);
        assert_eq!(q.max_raw(), i32::MAX as i64);
        assert_eq!(q.min_raw(), i32::MIN as i64);
    }

    #[test]
    fn test_rejects_bad_widths() {
        assert!(QFormat::new(0, 16).is_err());
        assert!(QFormat::new(16, 0).is_err());
        assert_eq!(
            QFormat::new(17, 16),
            Err(FixedPointError::InvalidFormat {
                int_bits: 17,
                frac_bits: 16
            })
        );
        assert!(QFormat::new(8, 24).is_ok());
    }

    #[test]
    fn test_conversion_roundtrip() {
        let q = QFormat::Q16_16;
        let input = [0.0, 1.0, -1.0, 0.5, -0.5, 4.0, 0.25, 32767.0, -32768.0];
        for &val in &input {
            let back = q.to_f64(q.from_f64(val));
            assert!((val - back).abs() < 1e-9, "{} vs {}", val, back);
        }
    }

    #[test]
    fn test_saturation() {
        let q = QFormat::Q16_16;
        assert_eq!(q.from_f64(1.0e9), i32::MAX);
        assert_eq!(q.from_f64(-1.0e9), i32::MIN);

        let narrow = QFormat::new(8, 8).unwrap();
        assert_eq!(narrow.from_f64(200.0), 32767);
        assert_eq!(narrow.from_f64(-200.0), -32768);
    }

    #[test]
    fn test_nan_maps_to_zero() {
        assert_eq!(QFormat::Q16_16.from_f64(f64::NAN), 0);
    }
}
