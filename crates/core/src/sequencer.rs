//! Forward/backward navigation over a fixed question list.

use thiserror::Error;

use crate::model::{AnswerMap, OptionCode, Question};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SequencerError {
    #[error("a test needs at least one question")]
    Empty,

    #[error("Silakan pilih jawaban terlebih dahulu")]
    NoOptionSelected,

    #[error("option {0} is not offered by the current question")]
    OptionNotListed(OptionCode),

    #[error("the test has already been completed")]
    Completed,
}

/// Outcome of a successful `advance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved to `position`; `preselected` is the answer already stored there.
    Moved {
        position: usize,
        preselected: Option<OptionCode>,
    },
    /// The last question was answered. Carries the full answer map.
    Completed(AnswerMap),
}

/// Outcome of `retreat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    AtStart,
    Moved {
        position: usize,
        preselected: Option<OptionCode>,
    },
}

/// Cursor over an ordered, immutable question list plus the answers given so far.
#[derive(Debug, Clone)]
pub struct QuestionSequencer {
    questions: Vec<Question>,
    position: usize,
    answers: AnswerMap,
    completed: bool,
}

impl QuestionSequencer {
    /// # Errors
    ///
    /// Returns `SequencerError::Empty` when `questions` is empty.
    pub fn new(questions: Vec<Question>) -> Result<Self, SequencerError> {
        if questions.is_empty() {
            return Err(SequencerError::Empty);
        }
        Ok(Self {
            questions,
            position: 0,
            answers: AnswerMap::new(),
            completed: false,
        })
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.position + 1 == self.questions.len()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn current(&self) -> &Question {
        &self.questions[self.position]
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    /// Answer stored for the current position, used to prefill the selection.
    #[must_use]
    pub fn current_answer(&self) -> Option<OptionCode> {
        self.answers.get(self.position)
    }

    /// Records `selected` for the current question and moves forward.
    ///
    /// # Errors
    ///
    /// `NoOptionSelected` when `selected` is `None` and `OptionNotListed` when
    /// the current question has no such option; nothing changes in either case.
    /// `Completed` once the last question has been submitted.
    pub fn advance(&mut self, selected: Option<OptionCode>) -> Result<Advance, SequencerError> {
        if self.completed {
            return Err(SequencerError::Completed);
        }
        let code = selected.ok_or(SequencerError::NoOptionSelected)?;
        if self.current().option(code).is_none() {
            return Err(SequencerError::OptionNotListed(code));
        }
        self.answers.record(self.position, code);

        if self.is_last() {
            self.completed = true;
            return Ok(Advance::Completed(self.answers.clone()));
        }

        self.position += 1;
        Ok(Advance::Moved {
            position: self.position,
            preselected: self.current_answer(),
        })
    }

    /// Steps back one question. Answers are kept.
    ///
    /// # Errors
    ///
    /// `Completed` once the last question has been submitted.
    pub fn retreat(&mut self) -> Result<Retreat, SequencerError> {
        if self.completed {
            return Err(SequencerError::Completed);
        }
        if self.position == 0 {
            return Ok(Retreat::AtStart);
        }
        self.position -= 1;
        Ok(Retreat::Moved {
            position: self.position,
            preselected: self.current_answer(),
        })
    }
}
