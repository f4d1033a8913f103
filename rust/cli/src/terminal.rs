//! Terminal implementations of the engine's timer and announcer.

use std::thread;
use std::time::Duration;

use shopbingo_engine::announce::{announcement, Language};
use shopbingo_engine::caller::Call;
use shopbingo_engine::collaborators::{Announcer, Scheduler};

use crate::formatters::format_announcement;

/// Blocking clock for the auto-mode loop. The engine arms and disarms it; the loop
/// calls [`TerminalClock::wait`] before every tick.
#[derive(Debug, Clone, Default)]
pub struct TerminalClock {
    armed: Option<Duration>,
    fast: bool,
}

impl TerminalClock {
    pub fn new(fast: bool) -> Self {
        Self { armed: None, fast }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Sleeps one interval when armed. Returns false when disarmed.
    pub fn wait(&self) -> bool {
        match self.armed {
            Some(interval) => {
                if !self.fast {
                    thread::sleep(interval);
                }
                true
            }
            None => false,
        }
    }
}

impl Scheduler for TerminalClock {
    fn start(&mut self, interval: Duration) {
        tracing::debug!(interval_ms = interval.as_millis() as u64, "clock armed");
        self.armed = Some(interval);
    }

    fn stop(&mut self) {
        if self.armed.take().is_some() {
            tracing::debug!("clock stopped");
        }
    }
}

/// Queues announcement lines for the play loop to print after each tick.
#[derive(Debug, Clone, Default)]
pub struct QueuedAnnouncer {
    language: Language,
    pending: Vec<String>,
}

impl QueuedAnnouncer {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            pending: Vec::new(),
        }
    }

    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }
}

impl Announcer for QueuedAnnouncer {
    fn announce(&mut self, call: Call) {
        self.pending
            .push(format_announcement(&announcement(call, self.language)));
    }
}
