use crate::foundation::{
    core::Millis,
    error::{CarouselError, CarouselResult},
};

pub const DEFAULT_AUTOPLAY_INTERVAL_MS: u64 = 10_000;

/// Fixed-cadence advance timer coupled to page visibility.
///
/// The timer is a deadline, not a thread: [`Autoplay::poll`] reports each due time once. Manual
/// navigation does not touch it, so a click shortly before a deadline is followed by an automatic
/// advance at that deadline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Autoplay {
    interval_ms: u64,
    next_due: Option<Millis>,
    visible: bool,
}

impl Autoplay {
    pub fn new(interval_ms: u64) -> CarouselResult<Self> {
        if interval_ms == 0 {
            return Err(CarouselError::config("autoplay interval must be > 0"));
        }
        Ok(Self {
            interval_ms,
            next_due: None,
            visible: true,
        })
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// (Re)start the timer with the first firing one interval after `now`.
    pub fn start(&mut self, now: Millis) {
        self.next_due = Some(now.after(self.interval_ms));
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.next_due
    }

    /// Hidden stops the timer. Visible starts a fresh one; periods spent hidden are not caught up.
    pub fn set_visible(&mut self, visible: bool, now: Millis) {
        self.visible = visible;
        if visible {
            self.start(now);
        } else {
            self.stop();
        }
    }

    /// Take the earliest due time at or before `now`, rescheduling one interval later.
    ///
    /// Call repeatedly to drain several elapsed periods; each is reported at its own due time.
    /// The timer stops after a due time that cannot be followed by a later one.
    pub fn poll(&mut self, now: Millis) -> Option<Millis> {
        let due = self.next_due.filter(|due| *due <= now)?;
        self.next_due = due.0.checked_add(self.interval_ms).map(Millis);
        if self.next_due.is_none() {
            tracing::debug!(due = due.0, "autoplay clock exhausted, timer stopped");
        }
        tracing::trace!(due = due.0, "autoplay period elapsed");
        Some(due)
    }

    /// Number of due times at or before `now` that [`Autoplay::poll`] would still report.
    pub fn pending(&self, now: Millis) -> u64 {
        match self.next_due {
            Some(due) if due <= now => now.since(due) / self.interval_ms + 1,
            _ => 0,
        }
    }

    /// Drop the next `periods` due times without reporting them.
    pub fn skip(&mut self, periods: u64) {
        self.next_due = self.next_due.and_then(|due| {
            periods
                .checked_mul(self.interval_ms)
                .and_then(|ms| due.0.checked_add(ms))
                .map(Millis)
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/autoplay.rs"]
mod tests;
