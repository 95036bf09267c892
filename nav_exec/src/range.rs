//! Range sensor code conversion
//!
//! Only used for diagnostic output, the controller works on raw codes.

use periph_if::eqpt::{ADC_FULL_SCALE_V, ADC_NUM_CODES};
use util::maths::lin_map;

/// Range sensor characteristic, `distance = RANGE_K / volts - 1`.
///
/// Units: centimetre volts
const RANGE_K: f64 = 13.0;

/// Voltage of a raw ADC code.
pub fn code_to_volts(code: u32) -> f64 {
    lin_map(
        (0.0, ADC_NUM_CODES as f64),
        (0.0, ADC_FULL_SCALE_V),
        code as f64,
    )
}

/// Distance in centimetres for a raw range code.
///
/// A zero code has no defined distance and gives `None`.
pub fn code_to_cm(code: u32) -> Option<f64> {
    if code == 0 {
        return None;
    }

    Some(RANGE_K / code_to_volts(code) - 1.0)
}

/// Format a distance for the diagnostic log.
pub fn fmt_cm(cm: Option<f64>) -> String {
    match cm {
        Some(d) => format!("{:.0} cm", d),
        None => String::from("out of range"),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_volts() {
        assert_eq!(code_to_volts(0), 0.0);
        assert_eq!(code_to_volts(1), 0.000732421875);
        assert_eq!(code_to_volts(2048), 1.5);
    }

    #[test]
    fn test_cm() {
        assert_eq!(code_to_cm(0), None);

        let cm = code_to_cm(2048).unwrap();
        assert!((cm - (13.0 / 1.5 - 1.0)).abs() < 1e-12);

        // Monotonic, a closer wall gives a higher code
        assert!(code_to_cm(3000).unwrap() < code_to_cm(1000).unwrap());
        assert!(code_to_cm(1).unwrap().is_finite());
    }

    #[test]
    fn test_fmt() {
        assert_eq!(fmt_cm(Some(7.666)), "8 cm");
        assert_eq!(fmt_cm(None), "out of range");
    }
}
