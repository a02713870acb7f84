use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{PackageId, QuestionId};
use crate::model::option::{AnswerOption, OptionCode};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("option {0} cannot be empty")]
    EmptyOption(OptionCode),

    #[error("a question needs at least two options")]
    TooFewOptions,

    #[error("option {0} is listed more than once")]
    DuplicateOption(OptionCode),

    #[error("correct answer must be selected")]
    MissingCorrect,

    #[error("correct answer {0} is not one of the listed options")]
    CorrectNotListed(OptionCode),
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question belonging to one package.
///
/// Deserialization runs the same checks as [`Question::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredQuestion")]
pub struct Question {
    id: QuestionId,
    package_id: PackageId,
    prompt: String,
    options: Vec<AnswerOption>,
    correct: OptionCode,
}

impl Question {
    /// Builds a question, enforcing that the correct code is one of the options.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt or any option text is blank, an
    /// option code repeats, or `correct` is not listed.
    pub fn new(
        id: QuestionId,
        package_id: PackageId,
        prompt: impl Into<String>,
        options: Vec<AnswerOption>,
        correct: OptionCode,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into().trim().to_string();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions);
        }

        let mut seen = Vec::with_capacity(options.len());
        let mut normalized = Vec::with_capacity(options.len());
        for option in options {
            if seen.contains(&option.code) {
                return Err(QuestionError::DuplicateOption(option.code));
            }
            let text = option.text.trim().to_string();
            if text.is_empty() {
                return Err(QuestionError::EmptyOption(option.code));
            }
            seen.push(option.code);
            normalized.push(AnswerOption::new(option.code, text));
        }

        if !seen.contains(&correct) {
            return Err(QuestionError::CorrectNotListed(correct));
        }

        Ok(Self {
            id,
            package_id,
            prompt,
            options: normalized,
            correct,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn package_id(&self) -> PackageId {
        self.package_id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    #[must_use]
    pub fn correct(&self) -> OptionCode {
        self.correct
    }

    #[must_use]
    pub fn option(&self, code: OptionCode) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.code == code)
    }

    /// True when `answer` is exactly the correct code.
    #[must_use]
    pub fn is_correct(&self, answer: Option<OptionCode>) -> bool {
        answer == Some(self.correct)
    }
}

/// Wire shape of a question before validation.
#[derive(Deserialize)]
struct StoredQuestion {
    id: QuestionId,
    package_id: PackageId,
    prompt: String,
    options: Vec<AnswerOption>,
    correct: OptionCode,
}

impl TryFrom<StoredQuestion> for Question {
    type Error = QuestionError;

    fn try_from(raw: StoredQuestion) -> Result<Self, Self::Error> {
        Question::new(raw.id, raw.package_id, raw.prompt, raw.options, raw.correct)
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Form-shaped question input: one text per option letter plus the chosen key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub prompt: String,
    pub options: [String; 4],
    pub correct: Option<OptionCode>,
}

impl QuestionDraft {
    #[must_use]
    pub fn new(prompt: impl Into<String>, options: [&str; 4], correct: Option<OptionCode>) -> Self {
        Self {
            prompt: prompt.into(),
            options: options.map(str::to_string),
            correct,
        }
    }

    /// Prefills a draft from an existing question for editing.
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        let mut options: [String; 4] = Default::default();
        for option in question.options() {
            options[option.code.index()] = option.text.clone();
        }
        Self {
            prompt: question.prompt().to_string(),
            options,
            correct: Some(question.correct()),
        }
    }

    /// Check that every field of the form is filled in.
    ///
    /// # Errors
    ///
    /// Returns the first `QuestionError` found, in form order.
    pub fn validate(self) -> Result<ValidatedQuestion, QuestionError> {
        let prompt = self.prompt.trim().to_string();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        let mut options = Vec::with_capacity(4);
        for (code, text) in OptionCode::ALL.into_iter().zip(self.options) {
            let text = text.trim().to_string();
            if text.is_empty() {
                return Err(QuestionError::EmptyOption(code));
            }
            options.push(AnswerOption::new(code, text));
        }

        let correct = self.correct.ok_or(QuestionError::MissingCorrect)?;

        Ok(ValidatedQuestion {
            prompt,
            options,
            correct,
        })
    }
}

/// Draft that passed validation but has not been assigned storage ids yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuestion {
    pub prompt: String,
    pub options: Vec<AnswerOption>,
    pub correct: OptionCode,
}

impl ValidatedQuestion {
    #[must_use]
    pub fn assign_id(self, id: QuestionId, package_id: PackageId) -> Question {
        Question {
            id,
            package_id,
            prompt: self.prompt,
            options: self.options,
            correct: self.correct,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
