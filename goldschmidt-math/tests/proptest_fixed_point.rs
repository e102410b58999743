use goldschmidt_math::ops::{mul_fp, mul_square, newton_factor};
use goldschmidt_math::{FixedPointError, QFormat};
use proptest::prelude::*;

const Q: QFormat = QFormat::Q16_16;
const B: i128 = 1 << 16;

// Property 1: Scaled multiply either returns the exact truncated quotient or
// reports overflow; it never wraps.
proptest! {
    #[test]
    fn prop_mul_fp_exact_or_overflow(a in any::<i32>(), b in any::<i32>()) {
        let exact = (a as i128 * b as i128) / B;
        match mul_fp(Q, a, b) {
            Ok(r) => prop_assert_eq!(r as i128, exact),
            Err(FixedPointError::Overflow { value, .. }) => {
                prop_assert_eq!(value as i128, exact);
                prop_assert!(exact > i32::MAX as i128 || exact < i32::MIN as i128);
            }
            Err(e) => prop_assert!(false, "unexpected error {:?}", e),
        }
    }
}

// Property 2: Scaled multiply is commutative (bit-exact)
proptest! {
    #[test]
    fn prop_mul_fp_commutative(a in 0i32..i32::MAX, b in 0i32..(1 << 17)) {
        prop_assert_eq!(mul_fp(Q, a, b), mul_fp(Q, b, a));
    }
}

// Property 3: Multiply-by-square never exceeds the real product and loses at
// most one truncation step per multiply.
proptest! {
    #[test]
    fn prop_mul_square_truncation_bound(b in 1i32..(1 << 24), y in 1i32..(1 << 18)) {
        let exact_num = b as i128 * y as i128 * y as i128;
        let floor_exact = exact_num / (B * B);
        if let Ok(r) = mul_square(Q, b, y) {
            let r = r as i128;
            prop_assert!(r <= floor_exact, "{} > {}", r, floor_exact);
            // first truncation costs < 1 ulp, scaled by y / B in the second multiply
            let slack = (y as i128) / B + 1;
            prop_assert!(r + slack >= floor_exact, "{} + {} < {}", r, slack, floor_exact);
        }
    }
}

// Property 4: Correction factor is (3B - b) / 2 truncated
proptest! {
    #[test]
    fn prop_newton_factor_halves(b in 0i32..(3 << 16)) {
        let r = newton_factor(Q, b).unwrap() as i64;
        let twice = 3 * Q.scale() - b as i64;
        prop_assert!(2 * r <= twice && twice < 2 * r + 2);
    }
}

// Property 5: f64 bridge is within half an ulp inside the representable range
proptest! {
    #[test]
    fn prop_f64_bridge_half_ulp(value in -32767.0f64..32767.0f64) {
        let back = Q.to_f64(Q.from_f64(value));
        prop_assert!((back - value).abs() <= 0.5 / Q.scale() as f64 + 1e-12);
    }
}

// Property 6: Every valid format survives a config round-trip; invalid ones
// never deserialize.
proptest! {
    #[test]
    fn prop_format_config_roundtrip(int_bits in 0u32..40, frac_bits in 0u32..40) {
        let json = format!(r#"{{"int_bits":{},"frac_bits":{}}}"#, int_bits, frac_bits);
        let parsed: Result<QFormat, _> = serde_json::from_str(&json);
        match QFormat::new(int_bits, frac_bits) {
            Ok(expected) => {
                let parsed = parsed.unwrap();
                prop_assert_eq!(parsed, expected);
                let encoded = serde_json::to_string(&parsed).unwrap();
                prop_assert_eq!(encoded, json);
            }
            Err(_) => prop_assert!(parsed.is_err()),
        }
    }
}
