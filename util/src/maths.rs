//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Map a value from one range into another.
pub fn lin_map<T>(source_range: (T, T), target_range: (T, T), value: T) -> T
where
    T: Float,
{
    target_range.0
        + ((value - source_range.0) * (target_range.1 - target_range.0)
            / (source_range.1 - source_range.0))
}

/// Clamp a value between `min` and `max`.
pub fn clamp<T>(value: T, min: T, max: T) -> T
where
    T: PartialOrd,
{
    if value > max {
        max
    } else if value < min {
        min
    } else {
        value
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lin_map() {
        assert_eq!(lin_map((0f64, 4096f64), (0f64, 3f64), 2048f64), 1.5);
        assert_eq!(lin_map((0f64, 10f64), (10f64, 0f64), 2f64), 8.0);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(120, 0, 100), 100);
        assert_eq!(clamp(-5, 0, 100), 0);
        assert_eq!(clamp(42, 0, 100), 42);
    }
}
