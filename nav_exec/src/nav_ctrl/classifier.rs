//! Maneuver classification
//!
//! The classifier is an ordered list of threshold bands over the PID signal
//! and the front range code. Bands overlap, the first matching band wins, so
//! the order of each table is part of its meaning.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Bands used by the timer driven control path.
pub const CONTROL_BANDS: [Band; 6] = [
    Band::new(Maneuver::UTurn, Span::below(25.0), Span::above(2000.0)),
    Band::new(Maneuver::SlightLeft, Span::above(27.0), Span::below(1000.0)),
    Band::new(
        Maneuver::SlightRight,
        Span::between(-80.0, -20.0),
        Span::below(1000.0),
    ),
    Band::new(Maneuver::SharpRight, Span::below(-100.0), Span::below(1400.0)),
    Band::new(
        Maneuver::Straight,
        Span::between(-20.0, 20.0),
        Span::below(1800.0),
    ),
    Band::new(
        Maneuver::StraightAlt,
        Span::between(-50.0, 0.0),
        Span::between(1000.0, 1500.0),
    ),
];

/// Bands used by the diagnostic loop.
///
/// Differs from [`CONTROL_BANDS`] in the SharpRight front bound and the
/// StraightAlt signal and front bounds.
pub const DIAG_BANDS: [Band; 6] = [
    Band::new(Maneuver::UTurn, Span::below(25.0), Span::above(2000.0)),
    Band::new(Maneuver::SlightLeft, Span::above(27.0), Span::below(1000.0)),
    Band::new(
        Maneuver::SlightRight,
        Span::between(-80.0, -20.0),
        Span::below(1000.0),
    ),
    Band::new(Maneuver::SharpRight, Span::below(-100.0), Span::below(1200.0)),
    Band::new(
        Maneuver::Straight,
        Span::between(-20.0, 20.0),
        Span::below(1800.0),
    ),
    Band::new(
        Maneuver::StraightAlt,
        Span::between(-40.0, 0.0),
        Span::between(1000.0, 1400.0),
    ),
];

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An open interval, either side may be unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub above: Option<f64>,
    pub below: Option<f64>,
}

/// One classification rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub mnvr: Maneuver,
    pub signal: Span,
    pub front: Span,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A discrete steering decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Maneuver {
    UTurn,
    SlightLeft,
    SlightRight,
    SharpRight,
    Straight,
    StraightAlt,

    /// Leave the actuators as they are.
    NoChange,
}

/// Which band table a tick is classified against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BandSet {
    Control,
    Diagnostic,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Span {
    pub const fn above(lower: f64) -> Self {
        Self {
            above: Some(lower),
            below: None,
        }
    }

    pub const fn below(upper: f64) -> Self {
        Self {
            above: None,
            below: Some(upper),
        }
    }

    pub const fn between(lower: f64, upper: f64) -> Self {
        Self {
            above: Some(lower),
            below: Some(upper),
        }
    }

    /// Strict containment on both bounds.
    pub fn contains(&self, value: f64) -> bool {
        self.above.map_or(true, |a| value > a) && self.below.map_or(true, |b| value < b)
    }
}

impl Band {
    pub const fn new(mnvr: Maneuver, signal: Span, front: Span) -> Self {
        Self {
            mnvr,
            signal,
            front,
        }
    }

    pub fn matches(&self, signal: f64, front_range: u32) -> bool {
        self.signal.contains(signal) && self.front.contains(front_range as f64)
    }
}

impl BandSet {
    pub fn bands(&self) -> &'static [Band] {
        match self {
            BandSet::Control => &CONTROL_BANDS,
            BandSet::Diagnostic => &DIAG_BANDS,
        }
    }
}

impl Maneuver {
    /// Line printed for this maneuver by the diagnostic loop.
    pub fn diag_label(&self) -> &'static str {
        match self {
            Maneuver::SharpRight => "************************RIGHT************************",
            Maneuver::StraightAlt => "=================Straight================",
            Maneuver::UTurn => "U-Turn",
            Maneuver::SlightLeft => "Slight Left",
            Maneuver::SlightRight => "Slight Right",
            Maneuver::Straight => "Straight",
            Maneuver::NoChange => "No change",
        }
    }
}

impl fmt::Display for Maneuver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Maneuver::UTurn => "U-Turn",
            Maneuver::SlightLeft => "Slight Left",
            Maneuver::SlightRight => "Slight Right",
            Maneuver::SharpRight => "Sharp Right",
            Maneuver::Straight => "Straight",
            Maneuver::StraightAlt => "Straight (alt)",
            Maneuver::NoChange => "No change",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Pick the maneuver of the first band matching the inputs.
pub fn classify(signal: f64, front_range: u32, bands: &[Band]) -> Maneuver {
    bands
        .iter()
        .find(|b| b.matches(signal, front_range))
        .map(|b| b.mnvr)
        .unwrap_or(Maneuver::NoChange)
}
