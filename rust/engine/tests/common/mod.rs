#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use shopbingo_engine::card::{BingoCard, CardId};
use shopbingo_engine::collaborators::{ReportingSink, RoundObserver, WinningSubmission};
use shopbingo_engine::errors::ReportError;
use shopbingo_engine::round::{CallUpdate, FailedCheck, RoundResult};

/// B 1-5, I 16-20, N 31-35 with free centre, G 46-50, O 61-65.
pub fn sample_card(card_id: CardId) -> BingoCard {
    BingoCard::new(
        card_id,
        [
            [Some(1), Some(2), Some(3), Some(4), Some(5)],
            [Some(16), Some(17), Some(18), Some(19), Some(20)],
            [Some(31), Some(32), None, Some(34), Some(35)],
            [Some(46), Some(47), Some(48), Some(49), Some(50)],
            [Some(61), Some(62), Some(63), Some(64), Some(65)],
        ],
    )
    .expect("sample card is valid")
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub submissions: Vec<WinningSubmission>,
    pub fail: bool,
}

impl ReportingSink for RecordingSink {
    fn submit(&mut self, submission: &WinningSubmission) -> Result<(), ReportError> {
        self.submissions.push(submission.clone());
        if self.fail {
            Err(ReportError::Unavailable("offline".into()))
        } else {
            Ok(())
        }
    }
}

pub fn shared<T>(value: T) -> Rc<RefCell<T>> {
    Rc::new(RefCell::new(value))
}

#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub updates: Vec<CallUpdate>,
    pub resolved: Vec<RoundResult>,
    pub misses: Vec<FailedCheck>,
}

impl RoundObserver for RecordingObserver {
    fn on_call(&mut self, update: &CallUpdate) {
        self.updates.push(update.clone());
    }

    fn on_resolved(&mut self, result: &RoundResult) {
        self.resolved.push(result.clone());
    }

    fn on_manual_miss(&mut self, miss: &FailedCheck) {
        self.misses.push(miss.clone());
    }
}
