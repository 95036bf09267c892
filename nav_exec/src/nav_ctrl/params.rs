//! Parameters structure for NavCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for navigation control.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// Error assumed for the tick before the first one, seeds the first
    /// derivative term.
    pub initial_last_error: f64,

    /// If true every tick is written to `nav_ctrl/ticks.csv` in the session
    /// archive.
    pub archive_ticks: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            initial_last_error: 250.0,
            archive_ticks: false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_shipped_params() {
        let p: Params =
            util::params::parse(include_str!("../../../params/nav_ctrl.toml")).unwrap();
        assert_eq!(p.initial_last_error, 250.0);
        assert!(!p.archive_ticks);
    }
}
