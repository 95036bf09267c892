//! Thread backed periodic timer

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{info, warn};
use spin_sleep::{SpinSleeper, SpinStrategy};
use std::thread;
use std::time::{Duration, Instant};
use thread_priority::{ThreadBuilderExt, ThreadPriority};

use crate::eqpt::{PeriodicTimer, TickHandler, TimerError};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Name of the thread the handler runs on.
pub const TIMER_THREAD_NAME: &str = "nav_isr";

/// Accuracy given to the spin sleeper, below this the sleeper spins.
///
/// Units: nanoseconds
const SPIN_NATIVE_ACCURACY_NS: u32 = 100_000;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A periodic timer emulated by a maximum priority thread.
///
/// Ticks are released against absolute deadlines so that jitter in one tick
/// does not accumulate into the next.
#[derive(Default)]
pub struct ThreadTimer {
    started: bool,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl PeriodicTimer for ThreadTimer {
    fn start(&mut self, period: Duration, mut handler: TickHandler) -> Result<(), TimerError> {
        if self.started {
            return Err(TimerError::AlreadyStarted);
        }
        if period == Duration::from_secs(0) {
            return Err(TimerError::ZeroPeriod);
        }

        thread::Builder::new()
            .name(TIMER_THREAD_NAME.to_string())
            .spawn_with_priority(ThreadPriority::Max, move |prio_result| {
                if let Err(e) = prio_result {
                    warn!("Timer thread running at default priority: {:?}", e);
                }

                let sleeper = SpinSleeper::new(SPIN_NATIVE_ACCURACY_NS)
                    .with_spin_strategy(SpinStrategy::YieldThread);

                let mut next_deadline = Instant::now() + period;

                loop {
                    let now = Instant::now();
                    if next_deadline > now {
                        sleeper.sleep(next_deadline - now);
                    }

                    handler();

                    next_deadline += period;

                    let now = Instant::now();
                    if now > next_deadline {
                        warn!("Cycle overran by {:.06} s", (now - next_deadline).as_secs_f64());
                        next_deadline = now + period;
                    }
                }
            })
            .map_err(|e| TimerError::StartFailed(e.to_string()))?;

        self.started = true;
        info!("Timer started with a period of {:?}", period);

        Ok(())
    }
}
