//! Small numeric helpers shared by the kernels and the tests.

/// Integer exponentiation by repeated multiplication.
pub fn ipow(base: usize, exp: u32) -> usize {
    let mut ret = 1;
    for _ in 0..exp {
        ret *= base;
    }
    ret
}

/// Rounds a float to the nearest integer of the requested width.
pub fn round_to<T: From<i32>>(val: f32) -> T
where
    T: TryFrom<i64>,
    <T as TryFrom<i64>>::Error: std::fmt::Debug,
{
    T::try_from(val.round() as i64).unwrap_or_else(|_| T::from(0))
}

/// Tests for equality, accounting for floating point rounding differences.
///
/// The epsilon is scaled by the larger magnitude of the two operands so the
/// comparison stays meaningful away from 1.0.
pub fn approx_eq(a: f32, b: f32) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() < f32::EPSILON * scale * 8.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipow_small_cases() {
        assert_eq!(ipow(2, 10), 1024);
        assert_eq!(ipow(3, 0), 1);
        assert_eq!(ipow(0, 3), 0);
    }

    #[test]
    fn approx_eq_tolerates_rounding() {
        assert!(approx_eq(0.1 + 0.2, 0.3));
        assert!(approx_eq(1e6, 1e6 + 0.01));
        assert!(!approx_eq(1.0, 1.001));
    }

    #[test]
    fn round_to_widths() {
        assert_eq!(round_to::<i32>(2.6), 3);
        assert_eq!(round_to::<i64>(-2.5), -3);
    }
}
