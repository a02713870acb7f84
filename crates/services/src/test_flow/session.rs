use std::fmt;

use psikotes_core::model::{OptionCode, PackageId, Question};
use psikotes_core::sequencer::{Advance, QuestionSequencer, Retreat, SequencerError};
use psikotes_core::timer::SessionTimer;

use super::progress::TestProgress;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One in-progress test attempt: sequencer, timer and the pending selection.
///
/// Lives only as long as the test view. Dropping it abandons the attempt.
pub struct TestSession {
    package_id: PackageId,
    package_name: String,
    sequencer: QuestionSequencer,
    timer: SessionTimer,
    pending: Option<OptionCode>,
}

impl TestSession {
    /// Builds a session and starts its timer.
    ///
    /// # Errors
    ///
    /// Returns `SequencerError::Empty` when `questions` is empty.
    pub fn start(
        package_id: PackageId,
        package_name: impl Into<String>,
        questions: Vec<Question>,
        mut timer: SessionTimer,
    ) -> Result<Self, SequencerError> {
        let sequencer = QuestionSequencer::new(questions)?;
        timer.start();
        Ok(Self {
            package_id,
            package_name: package_name.into(),
            sequencer,
            timer,
            pending: None,
        })
    }

    #[must_use]
    pub fn package_id(&self) -> PackageId {
        self.package_id
    }

    #[must_use]
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        self.sequencer.current()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        self.sequencer.questions()
    }

    #[must_use]
    pub fn pending(&self) -> Option<OptionCode> {
        self.pending
    }

    /// Marks `code` as the selection for the question on screen. Nothing is
    /// recorded until the test-taker advances.
    pub fn select(&mut self, code: Option<OptionCode>) {
        self.pending = code;
    }

    #[must_use]
    pub fn progress(&self) -> TestProgress {
        TestProgress::new(self.sequencer.position(), self.sequencer.len())
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.sequencer.is_completed()
    }

    #[must_use]
    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut SessionTimer {
        &mut self.timer
    }

    /// Submits the pending selection. The pending slot is replaced by whatever
    /// was recorded for the new position.
    pub(crate) fn advance(&mut self) -> Result<Advance, SequencerError> {
        let step = self.sequencer.advance(self.pending)?;
        if let Advance::Moved { preselected, .. } = &step {
            self.pending = *preselected;
        }
        Ok(step)
    }

    pub(crate) fn retreat(&mut self) -> Result<Retreat, SequencerError> {
        let step = self.sequencer.retreat()?;
        if let Retreat::Moved { preselected, .. } = step {
            self.pending = preselected;
        }
        Ok(step)
    }
}

impl fmt::Debug for TestSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestSession")
            .field("package_id", &self.package_id)
            .field("questions_len", &self.sequencer.len())
            .field("position", &self.sequencer.position())
            .field("answered", &self.sequencer.answers().len())
            .field("pending", &self.pending)
            .field("started_at", &self.timer.started_at())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use psikotes_core::model::{AnswerOption, QuestionId};
    use psikotes_core::time::fixed_clock;

    fn questions(n: u64) -> Vec<Question> {
        (1..=n)
            .map(|id| {
                let options = OptionCode::ALL
                    .into_iter()
                    .map(|code| AnswerOption::new(code, code.as_str()))
                    .collect();
                Question::new(QuestionId::new(id), PackageId::new(1), format!("Q{id}"), options, OptionCode::A)
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn start_begins_timer() {
        let session = TestSession::start(
            PackageId::new(1),
            "Paket",
            questions(2),
            SessionTimer::new(fixed_clock()),
        )
        .unwrap();
        assert!(session.timer().started_at().is_some());
        assert_eq!(session.progress().number, 1);
    }

    #[test]
    fn pending_selection_follows_navigation() {
        let mut session = TestSession::start(
            PackageId::new(1),
            "Paket",
            questions(3),
            SessionTimer::new(fixed_clock()),
        )
        .unwrap();

        session.select(Some(OptionCode::B));
        session.advance().unwrap();
        assert_eq!(session.pending(), None);

        session.retreat().unwrap();
        assert_eq!(session.pending(), Some(OptionCode::B));
    }

    #[test]
    fn failed_advance_keeps_pending_and_position() {
        let mut session = TestSession::start(
            PackageId::new(1),
            "Paket",
            questions(2),
            SessionTimer::new(fixed_clock()),
        )
        .unwrap();
        assert_eq!(session.advance().unwrap_err(), SequencerError::NoOptionSelected);
        assert_eq!(session.progress().number, 1);
    }
}
