//! Navigation executable entry point.
//!
//! # Architecture
//!
//! The executable runs the execution scheduler against the simulated board,
//! with the operator console on the terminal and the control timer on a
//! dedicated high priority thread:
//!
//!     - Create the session and logger
//!     - Load parameters
//!     - Initialise NavCtrl
//!     - Build the peripheral set
//!     - Run the scheduler until a collaborator fails

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{error, info};
use structopt::StructOpt;

// Internal
use nav_lib::{exec_sched::ExecSched, nav_ctrl::NavCtrl};
use periph_if::{
    host::{SpinDelay, TermConsole, ThreadTimer},
    sim::{SimHandles, SimParams},
};
use util::{
    logger::{logger_init, LevelFilter},
    module::State,
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(name = "nav_exec", about = "Line following navigation controller")]
struct Opts {
    /// Minimum log level, one of info, debug or trace.
    #[structopt(short, long, default_value = "info")]
    log_level: LevelFilter,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("nav_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(opts.log_level, &session).wrap_err("Failed to initialise logging")?;

    info!("Navigation Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let sched_params: nav_lib::exec_sched::Params =
        util::params::load("exec_sched.toml").wrap_err("Could not load exec_sched params")?;
    let sim_params: SimParams =
        util::params::load("sim.toml").wrap_err("Could not load sim params")?;

    info!("Exec parameters loaded");

    // ---- INITIALISE MODULES ----

    let mut nav_ctrl = NavCtrl::default();
    nav_ctrl
        .init("nav_ctrl.toml", &session)
        .wrap_err("Failed to initialise NavCtrl")?;
    info!("NavCtrl init complete");

    let sim = SimHandles::from_params(&sim_params);
    let mut periphs = sim.periphs();
    periphs.delay = Box::new(SpinDelay);
    info!("Simulated board ready");

    let console = TermConsole::new().wrap_err("Failed to open the terminal console")?;

    // ---- RUN ----

    let sched = ExecSched::new(sched_params, nav_ctrl, periphs, console, ThreadTimer::default());

    match sched.run() {
        Ok(never) => match never {},
        Err(e) => {
            error!("Scheduler stopped: {}", e);
            Err::<(), _>(e).wrap_err("Execution scheduler failed")
        }
    }
}
