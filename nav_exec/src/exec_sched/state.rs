//! Implementations for the execution scheduler

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, error, info, trace};
use std::convert::Infallible;
use std::thread;
use std::time::Duration;

// Internal
use super::{ExecMode, ManualDrive, Params, SchedError};
use crate::{
    nav_ctrl::{BandSet, InputData, Maneuver, NavCtrl, OutputData, SensorSample},
    range,
    refl_sampler::{ReflReading, ReflSampler, Surface},
};
use periph_if::{
    cmd::{ManualCmd, MenuCmd},
    eqpt::{Console, PeriodicTimer, Periphs},
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Prompt shown when waiting for the operator.
const PROMPT: &str = "> ";

const CMD_LIST_HEADER: &str = "The following is a list of commands:";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Everything a control path needs to run a tick.
///
/// Exactly one owner at a time, either the scheduler or the timer handler.
pub struct ControlCore {
    nav: NavCtrl,
    periphs: Periphs,
    refl: ReflSampler,
    sharp_right_hold_us: u32,
}

/// Result of one timer driven control tick.
#[derive(Debug, Clone, Copy)]
pub struct CtrlTickReport {
    pub sample: SensorSample,
    pub output: OutputData,
    pub refl: ReflReading,
    pub surface: Surface,
}

/// The execution scheduler.
pub struct ExecSched<C, T> {
    mode: ExecMode,
    params: Params,

    console: C,
    timer: T,

    /// `None` once the core has been moved into the timer handler.
    core: Option<ControlCore>,

    manual: ManualDrive,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ControlCore {
    pub fn new(nav: NavCtrl, periphs: Periphs, refl: ReflSampler, sharp_right_hold_us: u32) -> Self {
        Self {
            nav,
            periphs,
            refl,
            sharp_right_hold_us,
        }
    }

    fn input(&mut self, band_set: BandSet) -> InputData {
        InputData {
            sample: SensorSample::read(&mut *self.periphs.adc),
            band_set,
            period_ticks: self.periphs.motors.period_ticks(),
        }
    }

    /// The production tick: sense, control, actuate, then sample the floor.
    pub fn control_tick(&mut self) -> CtrlTickReport {
        let input = self.input(BandSet::Control);
        let (output, _) = self.nav.tick(&input);

        if let Some(drive) = output.drive {
            drive.apply(&mut *self.periphs.motors);
        }

        if output.mnvr == Maneuver::SharpRight {
            self.periphs.delay.delay_us(self.sharp_right_hold_us);
        }

        let refl = self
            .refl
            .sample(&mut *self.periphs.gpio, &mut *self.periphs.delay);
        let surface = self.refl.classify(refl);

        let report = CtrlTickReport {
            sample: input.sample,
            output,
            refl,
            surface,
        };
        info!("{}", report.refl_line());

        report
    }

    /// A tick classified against the diagnostic bands. Never touches the
    /// motors.
    pub fn diag_tick(&mut self) -> (SensorSample, OutputData) {
        let input = self.input(BandSet::Diagnostic);
        let (output, _) = self.nav.tick(&input);
        (input.sample, output)
    }

    /// Take one reflectance measurement.
    pub fn refl_sample(&mut self) -> (ReflReading, Surface) {
        let reading = self
            .refl
            .sample(&mut *self.periphs.gpio, &mut *self.periphs.delay);
        (reading, self.refl.classify(reading))
    }

    pub fn nav(&self) -> &NavCtrl {
        &self.nav
    }

    pub fn periphs_mut(&mut self) -> &mut Periphs {
        &mut self.periphs
    }
}

impl CtrlTickReport {
    /// Floor telemetry line, the count followed by the surface.
    pub fn refl_line(&self) -> String {
        format!("{} {}", self.refl, self.surface)
    }
}

impl<C, T> ExecSched<C, T>
where
    C: Console,
    T: PeriodicTimer,
{
    pub fn new(params: Params, nav: NavCtrl, periphs: Periphs, console: C, timer: T) -> Self {
        let core = ControlCore::new(
            nav,
            periphs,
            ReflSampler::new(params.refl.clone()),
            params.sharp_right_hold_us,
        );
        let manual = ManualDrive::new(params.manual.clone());

        Self {
            mode: ExecMode::MenuIdle,
            params,
            console,
            timer,
            core: Some(core),
            manual,
        }
    }

    pub fn mode(&self) -> ExecMode {
        self.mode
    }

    /// The control core, `None` once control has been handed to the timer.
    pub fn core(&self) -> Option<&ControlCore> {
        self.core.as_ref()
    }

    pub fn manual(&self) -> &ManualDrive {
        &self.manual
    }

    /// Run the scheduler.
    ///
    /// Only returns if a collaborator fails.
    pub fn run(mut self) -> Result<Infallible, SchedError> {
        loop {
            match self.mode {
                ExecMode::MenuIdle => {
                    self.menu_step()?;
                }
                ExecMode::DiagnosticLoop => return self.run_diag(),
                ExecMode::ReflectanceLoop => return self.run_refl(),
                ExecMode::ManualOverride => return self.run_manual(),
                ExecMode::InterruptControl => return self.run_interrupt(),
                ExecMode::Halted => return Err(SchedError::CoreReleased),
            }
        }
    }

    // ---- MENU ----

    /// Show the menu, read one command and dispatch it.
    ///
    /// Returns the mode the scheduler is in afterwards. Unrecognised commands
    /// leave the scheduler in the menu.
    pub fn menu_step(&mut self) -> Result<ExecMode, SchedError> {
        self.check_mode(ExecMode::MenuIdle)?;

        self.console.write_line("");
        self.console
            .write_line(&format!("Version {}", env!("CARGO_PKG_VERSION")));
        self.console.write_line(CMD_LIST_HEADER);
        for cmd in MenuCmd::ALL.iter() {
            self.console.write_line(&cmd.to_string());
        }

        let line = self.console.read_line(PROMPT)?;
        self.console.write_line("");

        match line.parse::<MenuCmd>() {
            Ok(cmd) => self.dispatch(cmd)?,
            Err(e) => debug!("Ignoring menu input: {}", e),
        }

        Ok(self.mode)
    }

    fn dispatch(&mut self, cmd: MenuCmd) -> Result<(), SchedError> {
        // Every mode needs the core
        self.core_mut()?;

        let next = match cmd {
            MenuCmd::DistanceTest => ExecMode::DiagnosticLoop,
            MenuCmd::LightTest => ExecMode::ReflectanceLoop,
            MenuCmd::MotorTest => {
                self.console.write_line("Starting motors...");
                self.core_mut()?.periphs.motors.set_output_enabled(true);
                ExecMode::ManualOverride
            }
            MenuCmd::PidControl => {
                if let Err(e) = self.start_control() {
                    error!("{:?} -> {:?}: {}", self.mode, ExecMode::Halted, e);
                    self.mode = ExecMode::Halted;
                    return Err(e);
                }
                ExecMode::InterruptControl
            }
        };

        info!("{:?} -> {:?}", self.mode, next);
        self.mode = next;

        Ok(())
    }

    /// Give the control core to the timer.
    ///
    /// The motor outputs are enabled by the first tick, so a timer which
    /// fails to start never leaves them enabled.
    fn start_control(&mut self) -> Result<(), SchedError> {
        let mut core = self.core.take().ok_or(SchedError::CoreReleased)?;
        let mut outputs_enabled = false;

        let period = Duration::from_millis(self.params.ctrl_period_ms);
        self.timer.start(
            period,
            Box::new(move || {
                if !outputs_enabled {
                    core.periphs.motors.set_output_enabled(true);
                    outputs_enabled = true;
                }
                core.control_tick();
            }),
        )?;

        Ok(())
    }

    // ---- DIAGNOSTIC LOOP ----

    /// Run one diagnostic tick and print the maneuver it would select.
    pub fn diag_step(&mut self) -> Result<Maneuver, SchedError> {
        self.check_mode(ExecMode::DiagnosticLoop)?;

        let (sample, output) = self.core_mut()?.diag_tick();

        debug!(
            "Right: {}, Front: {}, signal: {:.4}",
            range::fmt_cm(range::code_to_cm(sample.right_range)),
            range::fmt_cm(range::code_to_cm(sample.front_range)),
            output.signal
        );
        self.console.write_line(output.mnvr.diag_label());

        Ok(output.mnvr)
    }

    /// One pass of the diagnostic loop, a step followed by the pacing delay.
    pub fn diag_cycle(&mut self) -> Result<Maneuver, SchedError> {
        let mnvr = self.diag_step()?;
        let period = self.params.diag_period_ms;
        self.core_mut()?.periphs.delay.delay_ms(period);
        Ok(mnvr)
    }

    fn run_diag(&mut self) -> Result<Infallible, SchedError> {
        loop {
            self.diag_cycle()?;
        }
    }

    // ---- REFLECTANCE LOOP ----

    /// Take one reflectance sample and print the count.
    pub fn refl_step(&mut self) -> Result<ReflReading, SchedError> {
        self.check_mode(ExecMode::ReflectanceLoop)?;

        let (reading, surface) = self.core_mut()?.refl_sample();
        trace!("Reflectance {} ({})", reading, surface);
        self.console.write_line(&reading.to_string());

        Ok(reading)
    }

    /// One pass of the reflectance loop, a step followed by the pause.
    pub fn refl_cycle(&mut self) -> Result<ReflReading, SchedError> {
        let reading = self.refl_step()?;
        let period = self.params.refl_test_period_us;
        self.core_mut()?.periphs.delay.delay_us(period);
        Ok(reading)
    }

    fn run_refl(&mut self) -> Result<Infallible, SchedError> {
        loop {
            self.refl_cycle()?;
        }
    }

    // ---- MANUAL OVERRIDE ----

    /// Show the motor commands, read one and execute it.
    ///
    /// Returns the command executed, `None` if the input was not recognised.
    pub fn manual_step(&mut self) -> Result<Option<ManualCmd>, SchedError> {
        self.check_mode(ExecMode::ManualOverride)?;

        self.console.write_line("");
        self.console.write_line(CMD_LIST_HEADER);
        for cmd in ManualCmd::ALL.iter() {
            self.console.write_line(&cmd.to_string());
        }

        let line = self.console.read_line(PROMPT)?;
        self.console.write_line("");

        let cmd = match line.parse::<ManualCmd>() {
            Ok(c) => c,
            Err(e) => {
                debug!("Ignoring motor input: {}", e);
                return Ok(None);
            }
        };

        let core = self.core.as_mut().ok_or(SchedError::CoreReleased)?;
        self.manual.apply(cmd, &mut *core.periphs.motors);

        self.console
            .write_line(&format!("speed is {}", self.manual.speed_pct()));

        Ok(Some(cmd))
    }

    fn run_manual(&mut self) -> Result<Infallible, SchedError> {
        loop {
            self.manual_step()?;
        }
    }

    // ---- INTERRUPT CONTROL ----

    fn run_interrupt(&mut self) -> Result<Infallible, SchedError> {
        info!("Control handed to the timer, foreground idle");
        loop {
            thread::park();
        }
    }

    // ---- HELPERS ----

    fn check_mode(&self, expected: ExecMode) -> Result<(), SchedError> {
        if self.mode == expected {
            Ok(())
        } else {
            Err(SchedError::WrongMode {
                expected,
                actual: self.mode,
            })
        }
    }

    fn core_mut(&mut self) -> Result<&mut ControlCore, SchedError> {
        self.core.as_mut().ok_or(SchedError::CoreReleased)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::nav_ctrl::Params as NavParams;
    use periph_if::{
        eqpt::{ConsoleError, Direction, RangeChannel, TimerError},
        sim::{ManualTimer, MotorRegs, ScriptConsole, SimHandles, SimParams},
    };

    struct Bench {
        sched: ExecSched<ScriptConsole, ManualTimer>,
        console: ScriptConsole,
        timer: ManualTimer,
        sim: SimHandles,
    }

    fn bench(lines: &[&str]) -> Bench {
        bench_with_timer(lines, ManualTimer::default())
    }

    fn bench_with_timer(lines: &[&str], timer: ManualTimer) -> Bench {
        let sim = SimHandles::from_params(&SimParams::default());
        let console = ScriptConsole::new(lines.iter().copied());

        let sched = ExecSched::new(
            Params::default(),
            NavCtrl::with_params(NavParams::default()),
            sim.periphs(),
            console.clone(),
            timer.clone(),
        );

        Bench {
            sched,
            console,
            timer,
            sim,
        }
    }

    fn printed(console: &ScriptConsole, line: &str) -> bool {
        console.output().iter().any(|l| l == line)
    }

    #[test]
    fn test_pd_enters_interrupt_control() {
        let mut b = bench(&["PD", "DS"]);
        assert_eq!(b.sched.mode(), ExecMode::MenuIdle);

        assert_eq!(b.sched.menu_step().unwrap(), ExecMode::InterruptControl);
        assert!(b.sched.core().is_none());
        assert!(b.timer.is_started());
        assert_eq!(b.timer.period(), Some(Duration::from_millis(10)));

        // Outputs come up with the first tick
        assert!(!b.sim.motors.regs().output_enabled);
        assert!(b.timer.fire());
        assert!(b.sim.motors.regs().output_enabled);

        // No way back to the menu
        assert!(matches!(
            b.sched.menu_step(),
            Err(SchedError::WrongMode {
                expected: ExecMode::MenuIdle,
                actual: ExecMode::InterruptControl
            })
        ));
        assert!(b.sched.diag_step().is_err());
        assert_eq!(b.sched.mode(), ExecMode::InterruptControl);
    }

    #[test]
    fn test_unknown_command_stays_idle() {
        let mut b = bench(&["XY", "pd", "PD ", "DS"]);

        for _ in 0..3 {
            assert_eq!(b.sched.menu_step().unwrap(), ExecMode::MenuIdle);
        }
        assert_eq!(b.sched.menu_step().unwrap(), ExecMode::DiagnosticLoop);

        assert!(printed(&b.console, CMD_LIST_HEADER));
        assert!(printed(&b.console, "PD - PID test"));
        assert!(printed(
            &b.console,
            &format!("Version {}", env!("CARGO_PKG_VERSION"))
        ));
        assert!(!b.timer.is_started());
    }

    #[test]
    fn test_closed_console_ends_run() {
        let b = bench(&["XY"]);
        assert!(matches!(
            b.sched.run(),
            Err(SchedError::Console(ConsoleError::Closed))
        ));
    }

    #[test]
    fn test_timer_tick_actuates() {
        let mut b = bench(&["PD"]);
        b.sim.adc.set(RangeChannel::Right, 2600);
        b.sim.adc.set(RangeChannel::Front, 500);

        b.sched.menu_step().unwrap();
        assert_eq!(b.sim.motors.regs().num_writes, 0);

        assert!(b.timer.fire());

        let regs = b.sim.motors.regs();
        assert_eq!(regs.left_dir, Some(Direction::Forward));
        assert_eq!(regs.right_dir, Some(Direction::Forward));
        assert_eq!(regs.left_pct, Some(70));
        assert_eq!(regs.right_pct, Some(80));
        assert_eq!(regs.num_writes, 4);

        // Floor sampled after actuation
        assert_eq!(b.sim.gpio.num_reads(), 1501);
        assert_eq!(b.sim.delay.calls(), vec![8]);
    }

    #[test]
    fn test_no_change_leaves_registers() {
        let mut b = bench(&["PD"]);
        b.sim.adc.set(RangeChannel::Right, 2600);
        b.sim.adc.set(RangeChannel::Front, 500);
        b.sched.menu_step().unwrap();
        b.timer.fire();
        let set_once = b.sim.motors.regs();

        // Front at 1900 matches no band for these signals
        b.sim.adc.set(RangeChannel::Right, 2048);
        b.sim.adc.set(RangeChannel::Front, 1900);
        for _ in 0..5 {
            b.timer.fire();
            assert_eq!(b.sim.motors.regs(), set_once);
        }
    }

    #[test]
    fn test_sharp_right_holds() {
        let mut b = bench(&["PD"]);

        // error -248, derivative -498, signal about -510
        b.sim.adc.set(RangeChannel::Right, 1800);
        b.sim.adc.set(RangeChannel::Front, 1300);
        b.sched.menu_step().unwrap();
        b.timer.fire();

        let regs = b.sim.motors.regs();
        assert_eq!((regs.left_pct, regs.right_pct), (Some(99), Some(17)));
        assert_eq!(b.sim.delay.calls(), vec![38, 8]);
    }

    #[test]
    fn test_diag_never_touches_motors() {
        let mut b = bench(&["DS"]);
        b.sched.menu_step().unwrap();

        // SharpRight under the control bands, nothing under the diagnostic ones
        b.sim.adc.set(RangeChannel::Right, 1800);
        b.sim.adc.set(RangeChannel::Front, 1300);
        assert_eq!(b.sched.diag_step().unwrap(), Maneuver::NoChange);
        assert_eq!(b.console.output().last().unwrap(), "No change");

        b.sim.adc.set(RangeChannel::Right, 2600);
        b.sim.adc.set(RangeChannel::Front, 500);
        assert_eq!(b.sched.diag_step().unwrap(), Maneuver::SlightLeft);
        assert_eq!(b.console.output().last().unwrap(), "Slight Left");

        assert_eq!(b.sim.motors.regs(), MotorRegs::default());
        assert_eq!(b.sched.core().unwrap().nav().num_ticks(), 2);
    }

    #[test]
    fn test_manual_override() {
        let mut b = bench(&["MS", "3", "4", "9", "1"]);

        assert_eq!(b.sched.menu_step().unwrap(), ExecMode::ManualOverride);
        assert!(printed(&b.console, "Starting motors..."));
        assert!(b.sim.motors.regs().output_enabled);

        assert_eq!(b.sched.manual_step().unwrap(), Some(ManualCmd::Forward));
        let regs = b.sim.motors.regs();
        assert_eq!(regs.left_dir, Some(Direction::Forward));
        assert_eq!((regs.left_pct, regs.right_pct), (Some(50), Some(50)));
        assert_eq!(regs.left_pulse, Some(30));
        assert!(printed(&b.console, "speed is 50"));
        assert!(printed(&b.console, "07 - Turn Left"));

        assert_eq!(b.sched.manual_step().unwrap(), Some(ManualCmd::SpeedUp));
        assert_eq!(b.sched.manual().speed_pct(), 75);
        assert!(printed(&b.console, "speed is 75"));

        b.console.clear_output();
        assert_eq!(b.sched.manual_step().unwrap(), None);
        assert!(!b.console.output().iter().any(|l| l.starts_with("speed is")));

        assert_eq!(b.sched.manual_step().unwrap(), Some(ManualCmd::Stop));
        let regs = b.sim.motors.regs();
        assert_eq!((regs.left_pct, regs.right_pct), (Some(0), Some(0)));
        assert_eq!(b.sched.manual().speed_pct(), 50);
    }

    #[test]
    fn test_refl_loop() {
        let mut b = bench(&["LS"]);
        assert_eq!(b.sched.menu_step().unwrap(), ExecMode::ReflectanceLoop);

        assert_eq!(b.sched.refl_step().unwrap(), ReflReading::Count(1500));
        assert_eq!(b.console.output().last().unwrap(), "1500");

        b.sim.gpio.set_discharge_reads(None);
        assert_eq!(b.sched.refl_step().unwrap(), ReflReading::TimedOut);
        assert_eq!(b.console.output().last().unwrap(), "timeout");

        assert_eq!(b.sim.motors.regs(), MotorRegs::default());
    }

    #[test]
    fn test_timer_start_failure() {
        let mut timer = ManualTimer::default();
        timer
            .start(Duration::from_millis(1), Box::new(|| ()))
            .unwrap();

        let mut b = bench_with_timer(&["PD"], timer);
        assert!(matches!(
            b.sched.menu_step(),
            Err(SchedError::Timer(TimerError::AlreadyStarted))
        ));
        assert_eq!(b.sched.mode(), ExecMode::Halted);
        assert!(b.sched.core().is_none());
        assert!(!b.sim.motors.regs().output_enabled);
        assert_eq!(b.sim.motors.regs().num_writes, 0);

        b.console.push_line("DS");
        assert!(matches!(
            b.sched.menu_step(),
            Err(SchedError::WrongMode {
                expected: ExecMode::MenuIdle,
                actual: ExecMode::Halted
            })
        ));
        assert!(b.sched.diag_step().is_err());
    }

    #[test]
    fn test_halted_run_ends() {
        let mut timer = ManualTimer::default();
        timer
            .start(Duration::from_millis(1), Box::new(|| ()))
            .unwrap();

        let b = bench_with_timer(&["PD", "MS"], timer);
        assert!(matches!(b.sched.run(), Err(SchedError::Timer(_))));
    }

    #[test]
    fn test_refl_line() {
        let sim = SimHandles::from_params(&SimParams::default());
        let params = Params::default();
        let mut core = ControlCore::new(
            NavCtrl::with_params(NavParams::default()),
            sim.periphs(),
            ReflSampler::new(params.refl.clone()),
            params.sharp_right_hold_us,
        );

        let report = core.control_tick();
        assert_eq!(report.refl_line(), "1500 white");

        sim.gpio.set_discharge_reads(None);
        assert_eq!(core.control_tick().refl_line(), "timeout unknown");
    }

    #[test]
    fn test_diag_sharp_right_label() {
        let mut b = bench(&["DS"]);
        b.sched.menu_step().unwrap();

        b.sim.adc.set(RangeChannel::Right, 1800);
        b.sim.adc.set(RangeChannel::Front, 1100);
        assert_eq!(b.sched.diag_step().unwrap(), Maneuver::SharpRight);
        assert_eq!(
            b.console.output().last().unwrap(),
            "************************RIGHT************************"
        );
        assert_eq!(b.sim.motors.regs(), MotorRegs::default());
    }

    #[test]
    fn test_diag_cycle_paces() {
        let mut b = bench(&["DS"]);
        b.sched.menu_step().unwrap();

        b.sched.diag_cycle().unwrap();
        assert_eq!(b.sim.delay.calls(), vec![50_000]);
        assert_eq!(b.sim.delay.total_us(), 50_000);

        b.sched.diag_cycle().unwrap();
        assert_eq!(b.sim.delay.total_us(), 100_000);
    }

    #[test]
    fn test_refl_cycle_paces() {
        let mut b = bench(&["LS"]);
        b.sched.menu_step().unwrap();

        assert_eq!(b.sched.refl_cycle().unwrap(), ReflReading::Count(1500));
        assert_eq!(b.sim.delay.calls(), vec![8, 375]);
    }
}
