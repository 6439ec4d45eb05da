//! Basic arithmetic helpers

use std::ops::{Add, Sub};

/// Add two numbers
#[inline]
pub fn add<T: Add<Output = T>>(x: T, y: T) -> T {
    x + y
}

/// Subtract `y` from `x`
#[inline]
pub fn subtract<T: Sub<Output = T>>(x: T, y: T) -> T {
    x - y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_add() {
        assert_eq!(add(5, 6), 11);
    }

    #[test]
    fn test_subtract() {
        assert_eq!(subtract(10, 5), 5);
    }

    #[test]
    fn test_works_for_floats() {
        assert!((add::<f64>(0.5, 0.25) - 0.75).abs() < f64::EPSILON);
        assert!((subtract::<f64>(0.5, 0.25) - 0.25).abs() < f64::EPSILON);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_add_matches_operator(a in any::<i32>(), b in any::<i32>()) {
            let (a, b) = (a as i64, b as i64);
            prop_assert_eq!(add(a, b), a + b);
        }

        #[test]
        fn prop_subtract_matches_operator(a in any::<i32>(), b in any::<i32>()) {
            let (a, b) = (a as i64, b as i64);
            prop_assert_eq!(subtract(a, b), a - b);
        }

        #[test]
        fn prop_add_is_commutative(a in any::<i32>(), b in any::<i32>()) {
            let (a, b) = (a as i64, b as i64);
            prop_assert_eq!(add(a, b), add(b, a));
        }

        /// Subtracting what was added gives back the original value
        #[test]
        fn prop_subtract_inverts_add(a in any::<i32>(), b in any::<i32>()) {
            let (a, b) = (a as i64, b as i64);
            prop_assert_eq!(subtract(add(a, b), b), a);
        }
    }
}
