//! Interfaces the round engine drives but does not implement.
//!
//! The engine owns one boxed instance of each and never holds ambient timer, audio or
//! network handles. Callers that need to inspect a collaborator after handing it over can
//! share it through `Rc<RefCell<_>>`, which implements every trait here.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::caller::Call;
use crate::card::CardId;
use crate::errors::ReportError;
use crate::round::{CallUpdate, FailedCheck, RoundResult};

/// Periodic timer that produces ticks for the engine.
///
/// `start` arms the timer at the given interval and `stop` must cancel it before any
/// further tick fires.
pub trait Scheduler {
    fn start(&mut self, interval: Duration);
    fn stop(&mut self);
}

/// Best-effort sink for winning submissions. Implementations should queue or hand off
/// quickly; the engine logs a returned error and moves on.
pub trait ReportingSink {
    fn submit(&mut self, submission: &WinningSubmission) -> Result<(), ReportError>;
}

/// Observer of every new call, e.g. speech or recorded audio.
pub trait Announcer {
    fn announce(&mut self, call: Call);
}

/// Presentation layer hooks.
pub trait RoundObserver {
    fn on_call(&mut self, _update: &CallUpdate) {}
    fn on_resolved(&mut self, _result: &RoundResult) {}
    fn on_manual_miss(&mut self, _miss: &FailedCheck) {}
}

/// Read-only snapshot handed to the reporting sink for each winning card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinningSubmission {
    pub card_id: CardId,
    pub round_id: String,
    pub shop_id: Option<String>,
    pub prize: f64,
}

/// Scheduler for callers that tick the engine themselves. Remembers whether it is armed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManualScheduler {
    armed: Option<Duration>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn armed(&self) -> Option<Duration> {
        self.armed
    }
}

impl Scheduler for ManualScheduler {
    fn start(&mut self, interval: Duration) {
        self.armed = Some(interval);
    }

    fn stop(&mut self) {
        self.armed = None;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullReportSink;

impl ReportingSink for NullReportSink {
    fn submit(&mut self, _submission: &WinningSubmission) -> Result<(), ReportError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAnnouncer;

impl Announcer for SilentAnnouncer {
    fn announce(&mut self, _call: Call) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl RoundObserver for NullObserver {}

impl<T: Scheduler> Scheduler for Rc<RefCell<T>> {
    fn start(&mut self, interval: Duration) {
        self.borrow_mut().start(interval);
    }

    fn stop(&mut self) {
        self.borrow_mut().stop();
    }
}

impl<T: ReportingSink> ReportingSink for Rc<RefCell<T>> {
    fn submit(&mut self, submission: &WinningSubmission) -> Result<(), ReportError> {
        self.borrow_mut().submit(submission)
    }
}

impl<T: Announcer> Announcer for Rc<RefCell<T>> {
    fn announce(&mut self, call: Call) {
        self.borrow_mut().announce(call);
    }
}

impl<T: RoundObserver> RoundObserver for Rc<RefCell<T>> {
    fn on_call(&mut self, update: &CallUpdate) {
        self.borrow_mut().on_call(update);
    }

    fn on_resolved(&mut self, result: &RoundResult) {
        self.borrow_mut().on_resolved(result);
    }

    fn on_manual_miss(&mut self, miss: &FailedCheck) {
        self.borrow_mut().on_manual_miss(miss);
    }
}
