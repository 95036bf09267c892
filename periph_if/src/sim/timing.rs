//! Simulated delays and timer

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::lock;
use crate::eqpt::{Delay, PeriodicTimer, TickHandler, TimerError};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A delay which returns immediately but accounts for the time requested.
#[derive(Clone, Default)]
pub struct SimDelay {
    state: Arc<Mutex<DelayState>>,
}

#[derive(Default)]
struct DelayState {
    total_us: u64,
    calls: Vec<u64>,
}

/// A timer which only ticks when told to.
#[derive(Clone, Default)]
pub struct ManualTimer {
    state: Arc<Mutex<Option<(Duration, TickHandler)>>>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimDelay {
    /// Total time requested across all delays.
    ///
    /// Units: microseconds
    pub fn total_us(&self) -> u64 {
        lock(&self.state).total_us
    }

    /// Each delay requested, in order.
    ///
    /// Units: microseconds
    pub fn calls(&self) -> Vec<u64> {
        lock(&self.state).calls.clone()
    }

    fn add(&self, us: u64) {
        let mut s = lock(&self.state);
        s.total_us += us;
        s.calls.push(us);
    }
}

impl Delay for SimDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.add(ms as u64 * 1000);
    }

    fn delay_us(&mut self, us: u32) {
        self.add(us as u64);
    }
}

impl ManualTimer {
    /// Run the registered handler once.
    ///
    /// Returns `false` if the timer has not been started.
    pub fn fire(&self) -> bool {
        match lock(&self.state).as_mut() {
            Some((_, handler)) => {
                handler();
                true
            }
            None => false,
        }
    }

    /// Period the timer was started with.
    pub fn period(&self) -> Option<Duration> {
        lock(&self.state).as_ref().map(|(p, _)| *p)
    }

    pub fn is_started(&self) -> bool {
        lock(&self.state).is_some()
    }
}

impl PeriodicTimer for ManualTimer {
    fn start(&mut self, period: Duration, handler: TickHandler) -> Result<(), TimerError> {
        if period == Duration::from_secs(0) {
            return Err(TimerError::ZeroPeriod);
        }

        let mut s = lock(&self.state);
        if s.is_some() {
            return Err(TimerError::AlreadyStarted);
        }
        *s = Some((period, handler));

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_manual_timer() {
        let mut timer = ManualTimer::default();
        assert!(!timer.fire());

        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();
        timer
            .start(
                Duration::from_millis(20),
                Box::new(move || {
                    c.fetch_add(1, Ordering::Relaxed);
                }),
            )
            .unwrap();

        assert!(timer.fire());
        assert!(timer.fire());
        assert_eq!(count.load(Ordering::Relaxed), 2);
        assert_eq!(timer.period(), Some(Duration::from_millis(20)));

        assert!(matches!(
            timer.start(Duration::from_millis(20), Box::new(|| ())),
            Err(TimerError::AlreadyStarted)
        ));
    }

    #[test]
    fn test_zero_period() {
        let mut timer = ManualTimer::default();
        assert!(matches!(
            timer.start(Duration::from_secs(0), Box::new(|| ())),
            Err(TimerError::ZeroPeriod)
        ));
        assert!(!timer.is_started());
    }
}
