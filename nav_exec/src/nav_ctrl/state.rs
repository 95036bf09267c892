//! Implementations for the NavCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{trace, warn};
use serde::Serialize;

// Internal
use super::{
    classify, BandSet, DriveCommand, Maneuver, NavCtrlError, Params, PidCtrl, PidTerms,
    SensorSample,
};
use util::{
    archive::{ArchiveError, Archived, Archiver},
    module::State,
    params,
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Archive file for tick records, relative to the session archive root.
const TICK_ARCH_PATH: &str = "nav_ctrl/ticks.csv";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Navigation control module state
#[derive(Default)]
pub struct NavCtrl {
    pub(crate) params: Params,

    pid: PidCtrl,

    num_ticks: u64,

    last_record: Option<TickRecord>,
    arch_ticks: Archiver,
}

/// Input data to navigation control.
#[derive(Debug, Clone, Copy)]
pub struct InputData {
    pub sample: SensorSample,

    /// Band table to classify against.
    pub band_set: BandSet,

    /// PWM period of the motor driver.
    ///
    /// Units: generator ticks
    pub period_ticks: u32,
}

/// Output of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutputData {
    pub signal: f64,
    pub mnvr: Maneuver,

    /// Motor demands, `None` if the motors shall not be touched.
    pub drive: Option<DriveCommand>,
}

/// Status report for NavCtrl processing.
pub type StatusReport = PidTerms;

/// One row of the tick archive.
#[derive(Debug, Clone, Copy, Serialize)]
struct TickRecord {
    tick: u64,
    right_range: u32,
    front_range: u32,
    error: f64,
    proportional: f64,
    derivative: f64,
    signal: f64,
    mnvr: Maneuver,
    left_pct: Option<u32>,
    right_pct: Option<u32>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl NavCtrl {
    /// Create a controller from already loaded parameters, without archiving.
    pub fn with_params(params: Params) -> Self {
        Self {
            pid: PidCtrl::new(params.initial_last_error),
            params,
            ..Default::default()
        }
    }

    /// Run one tick: PID update, classification and motor mapping.
    pub fn tick(&mut self, input: &InputData) -> (OutputData, StatusReport) {
        let terms = self.pid.update_terms(input.sample.right_range);

        let mnvr = classify(
            terms.signal,
            input.sample.front_range,
            input.band_set.bands(),
        );

        let drive = DriveCommand::for_mnvr(mnvr, input.period_ticks);

        trace!(
            "NavCtrl tick {}: right {}, front {}, signal {:.4} -> {:?}",
            self.num_ticks,
            input.sample.right_range,
            input.sample.front_range,
            terms.signal,
            mnvr
        );

        self.last_record = Some(TickRecord {
            tick: self.num_ticks,
            right_range: input.sample.right_range,
            front_range: input.sample.front_range,
            error: terms.error,
            proportional: terms.proportional,
            derivative: terms.derivative,
            signal: terms.signal,
            mnvr,
            left_pct: drive.map(|d| d.left.duty_pct),
            right_pct: drive.map(|d| d.right.duty_pct),
        });

        if self.arch_ticks.is_init() {
            if let Err(e) = self.write() {
                warn!("Could not archive NavCtrl tick {}: {}", self.num_ticks, e);
            }
        }

        self.num_ticks += 1;

        (
            OutputData {
                signal: terms.signal,
                mnvr,
                drive,
            },
            terms,
        )
    }

    /// Read access to the controller history.
    pub fn pid(&self) -> &PidCtrl {
        &self.pid
    }

    /// Number of ticks processed since initialisation.
    pub fn num_ticks(&self) -> u64 {
        self.num_ticks
    }
}

impl State for NavCtrl {
    type InitData = &'static str;
    type InitError = NavCtrlError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = NavCtrlError;

    /// Initialise the NavCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, session: &Session) -> Result<(), Self::InitError> {
        let params: Params = params::load(init_data).map_err(NavCtrlError::ParamLoadError)?;

        *self = Self::with_params(params);

        if self.params.archive_ticks {
            let mut arch_path = session.arch_root.clone();
            arch_path.push("nav_ctrl");
            std::fs::create_dir_all(arch_path).map_err(NavCtrlError::ArchDirError)?;

            self.arch_ticks =
                Archiver::from_path(session, TICK_ARCH_PATH).map_err(NavCtrlError::ArchiveError)?;
        }

        Ok(())
    }

    /// Perform cyclic processing of navigation control.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        Ok(self.tick(input_data))
    }
}

impl Archived for NavCtrl {
    fn write(&mut self) -> Result<(), ArchiveError> {
        match self.last_record {
            Some(r) => self.arch_ticks.serialise(r),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use periph_if::eqpt::Direction;

    fn input(right_range: u32, front_range: u32) -> InputData {
        InputData {
            sample: SensorSample {
                right_range,
                front_range,
            },
            band_set: BandSet::Control,
            period_ticks: 61,
        }
    }

    #[test]
    fn test_scenario_slight_left() {
        let mut nav = NavCtrl::with_params(Params::default());

        let (out, report) = nav.tick(&input(2600, 500));

        assert!((out.signal - 329.6552).abs() < 1e-9);
        assert_eq!(report.derivative, 302.0);
        assert_eq!(out.mnvr, Maneuver::SlightLeft);

        let drive = out.drive.unwrap();
        assert_eq!(drive.left.dir, Direction::Forward);
        assert_eq!(drive.right.dir, Direction::Forward);
        assert_eq!(drive.left.duty_pct, 70);
        assert_eq!(drive.right.duty_pct, 80);
    }

    #[test]
    fn test_scenario_straight() {
        let mut nav = NavCtrl::with_params(Params {
            initial_last_error: 0.0,
            archive_ticks: false,
        });

        let (out, _) = nav.proc(&input(2048, 1700)).unwrap();

        assert_eq!(out.signal, 0.0);
        assert_eq!(out.mnvr, Maneuver::Straight);
        let drive = out.drive.unwrap();
        assert_eq!((drive.left.duty_pct, drive.right.duty_pct), (80, 80));
        assert_eq!(nav.num_ticks(), 1);
    }

    #[test]
    fn test_no_change_has_no_drive() {
        let mut nav = NavCtrl::with_params(Params {
            initial_last_error: 0.0,
            archive_ticks: false,
        });

        // Signal 0 with the front at 1900 matches no band
        let (out, _) = nav.tick(&input(2048, 1900));
        assert_eq!(out.mnvr, Maneuver::NoChange);
        assert_eq!(out.drive, None);
    }

    #[test]
    fn test_history_carries_between_ticks() {
        let mut nav = NavCtrl::with_params(Params::default());
        nav.tick(&input(2600, 500));
        assert_eq!(nav.pid().last_error(), 552.0);

        // Same reading again, derivative now zero
        let (_, report) = nav.tick(&input(2600, 500));
        assert_eq!(report.derivative, 0.0);
    }

    #[test]
    fn test_archive_ticks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ticks.csv");

        let mut nav = NavCtrl::with_params(Params::default());
        nav.arch_ticks = Archiver::from_file_path(&path).unwrap();

        nav.tick(&input(2600, 500));
        nav.tick(&input(2048, 1900));

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("tick,right_range,front_range"));
        assert!(lines[1].starts_with("0,2600,500,"));
        assert!(lines[1].ends_with("SlightLeft,70,80"));
        assert!(lines[2].ends_with("NoChange,,"));
    }
}
