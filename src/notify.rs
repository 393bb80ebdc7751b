//! Transient notification banner.
//!
//! At most one banner is visible. Each banner carries its own dismissal
//! deadline; replacing the banner drops the old deadline with it, so a
//! superseded banner can never remove its successor.

use std::time::{Duration, Instant};

use tracing::debug;

/// How long a banner stays up.
pub const NOTIFY_DURATION: Duration = Duration::from_millis(3000);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Danger,
}

/// Pending dismissal of one banner.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DismissTimer {
    deadline: Instant,
}

impl DismissTimer {
    fn start(now: Instant, after: Duration) -> Self {
        Self {
            deadline: now + after,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub severity: Severity,
    pub timer: DismissTimer,
}

#[derive(Clone, Debug)]
pub struct Notifier {
    current: Option<Banner>,
    duration: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(NOTIFY_DURATION)
    }
}

impl Notifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    /// Show `message`, replacing (and cancelling) any visible banner.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        let message = message.into();
        debug!(%message, ?severity, "showing banner");
        self.current = Some(Banner {
            message,
            severity,
            timer: DismissTimer::start(now, self.duration),
        });
    }

    /// Dismiss the banner if its timer is due. Returns true when one was removed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match &self.current {
            Some(b) if b.timer.is_due(now) => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the banner and its pending dismissal.
    pub fn cancel(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Banner> {
        self.current.as_ref()
    }
}
