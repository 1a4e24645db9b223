//! Cancellable debounce over host one-shot timers.
//!
//! Zellij timers cannot be revoked once set, so every keystroke arms a new one
//! and the debounce counts how many are still outstanding. Only the tick that
//! drains the count fires, and only if the debounce has not been cancelled in
//! the meantime. Stale ticks are absorbed without effect.

/// Delay between the last keystroke and validation.
pub const DEBOUNCE_SECONDS: f64 = 0.3;

/// Debounce state owned by the application state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Debounce {
    outstanding: usize,
    armed: bool,
}

impl Debounce {
    /// Restarts the delay. Returns the timer to request from the host.
    pub fn schedule(&mut self) -> f64 {
        self.outstanding += 1;
        self.armed = true;
        DEBOUNCE_SECONDS
    }

    /// Drops the pending work. Timers already requested still arrive and are
    /// absorbed by [`Debounce::on_timer`].
    pub fn cancel(&mut self) {
        self.armed = false;
    }

    /// Accounts for one elapsed host timer.
    ///
    /// Returns `true` exactly once per burst of keystrokes: on the tick of the
    /// last scheduled timer, unless cancelled.
    pub fn on_timer(&mut self) -> bool {
        self.outstanding = self.outstanding.saturating_sub(1);
        if self.outstanding == 0 && self.armed {
            self.armed = false;
            return true;
        }
        false
    }

    /// Whether a validation run is still pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_fires_once_on_last_tick() {
        let mut debounce = Debounce::default();
        for _ in 0..3 {
            assert!((debounce.schedule() - DEBOUNCE_SECONDS).abs() < f64::EPSILON);
        }

        assert!(!debounce.on_timer());
        assert!(!debounce.on_timer());
        assert!(debounce.on_timer());
        assert!(!debounce.is_pending());
    }

    #[test]
    fn cancelled_debounce_absorbs_outstanding_ticks() {
        let mut debounce = Debounce::default();
        debounce.schedule();
        debounce.schedule();
        debounce.cancel();

        assert!(!debounce.on_timer());
        assert!(!debounce.on_timer());
        assert!(!debounce.on_timer());
    }

    #[test]
    fn rescheduling_after_cancel_waits_for_all_ticks() {
        let mut debounce = Debounce::default();
        debounce.schedule();
        debounce.cancel();
        debounce.schedule();

        // First tick belongs to the cancelled timer.
        assert!(!debounce.on_timer());
        assert!(debounce.on_timer());
    }
}
