//! # Sessions
//!
//! Each run of an executable is a session. A session owns a timestamped
//! directory under the sessions root:
//!
//! ```text
//! <exec>_<YYYYmmdd_HHMMSS>/
//!     <exec>.log
//!     arch/
//! ```
//!
//! The session epoch is set once per process, the first session created
//! fixes it and later sessions share it.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use chrono::{DateTime, Utc};
use conquer_once::{OnceCell, TryInitError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Internal imports
use crate::time;

// ---------------------------------------------------------------------------
// STATICS
// ---------------------------------------------------------------------------

static SESSION_EPOCH: OnceCell<DateTime<Utc>> = OnceCell::uninit();

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Format of the timestamp in session directory names, see the chrono
/// `strftime` documentation.
const DIR_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Name of the archive directory inside a session.
const ARCH_DIR_NAME: &str = "arch";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Locations belonging to the current session.
#[derive(Clone, Debug)]
pub struct Session {
    /// Name of the executable that owns the session
    pub exec_name: String,

    /// Session directory
    pub session_root: PathBuf,

    /// Directory CSV archives are written into
    pub arch_root: PathBuf,

    /// Log file written by the logger
    pub log_file_path: PathBuf,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("The software root environment variable (NAV_SW_ROOT) is not set")]
    SwRootNotSet,

    #[error("Cannot create {0:?}: {1}")]
    CannotCreateDir(PathBuf, std::io::Error),

    #[error("Another thread is setting the session epoch")]
    EpochBusy,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Session {
    /// Start a session inside `$NAV_SW_ROOT/{sessions_dir}`.
    pub fn new(exec_name: &str, sessions_dir: &str) -> Result<Self, SessionError> {
        let root = crate::host::get_sw_root().map_err(|_| SessionError::SwRootNotSet)?;

        Self::new_in(exec_name, root.join(sessions_dir))
    }

    /// Start a session inside an explicit sessions directory.
    pub fn new_in<P: AsRef<Path>>(exec_name: &str, sessions_path: P) -> Result<Self, SessionError> {
        match SESSION_EPOCH.try_init_once(Utc::now) {
            Ok(()) | Err(TryInitError::AlreadyInit) => (),
            Err(TryInitError::WouldBlock) => return Err(SessionError::EpochBusy),
        }

        let session_root = sessions_path.as_ref().join(format!(
            "{}_{}",
            exec_name,
            get_epoch().format(DIR_TIMESTAMP_FORMAT)
        ));
        let arch_root = session_root.join(ARCH_DIR_NAME);

        fs::create_dir_all(&arch_root)
            .map_err(|e| SessionError::CannotCreateDir(arch_root.clone(), e))?;

        Ok(Session {
            exec_name: exec_name.to_string(),
            log_file_path: session_root.join(format!("{}.log", exec_name)),
            session_root,
            arch_root,
        })
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Seconds since the session epoch, `NaN` before any session exists.
pub fn get_elapsed_seconds() -> f64 {
    SESSION_EPOCH
        .get()
        .and_then(|e| time::duration_to_seconds(Utc::now() - *e))
        .unwrap_or(std::f64::NAN)
}

/// The session epoch.
///
/// # Panics
/// - If no session has been created yet.
pub fn get_epoch() -> &'static DateTime<Utc> {
    match SESSION_EPOCH.get() {
        Some(e) => e,
        None => panic!("Cannot get the session epoch before a session is created"),
    }
}
