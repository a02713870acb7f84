use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{AnswerMap, Question};
use crate::scoring::{QuestionReview, ScoreCategory, review_rows, score_answers};
use crate::timer::CompletionDuration;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResultRecordError {
    #[error("result has no questions")]
    NoQuestions,

    #[error("answer recorded for question {position} of {total}")]
    AnswerOutOfRange { position: usize, total: usize },

    #[error("stored {field} does not match the recorded answers")]
    Mismatch { field: &'static str },
}

/// Snapshot of one completed test attempt.
///
/// Built once from the question list, the answers and the frozen duration; the
/// score fields are derived at construction and never recomputed. A decoded
/// record must agree with what its questions and answers produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredResult")]
pub struct ResultRecord {
    package_name: String,
    score: u8,
    correct_answers: u32,
    total_questions: u32,
    completion_time: String,
    duration: CompletionDuration,
    category: ScoreCategory,
    answers: AnswerMap,
    questions: Vec<Question>,
    completed_at: DateTime<Utc>,
}

impl ResultRecord {
    #[must_use]
    pub fn new(
        package_name: impl Into<String>,
        questions: Vec<Question>,
        answers: AnswerMap,
        duration: CompletionDuration,
        completed_at: DateTime<Utc>,
    ) -> Self {
        let card = score_answers(&questions, &answers);
        Self {
            package_name: package_name.into(),
            score: card.score,
            correct_answers: card.correct,
            total_questions: card.total,
            completion_time: duration.to_string(),
            duration,
            category: card.category(),
            answers,
            questions,
            completed_at,
        }
    }

    #[must_use]
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    #[must_use]
    pub fn score(&self) -> u8 {
        self.score
    }

    #[must_use]
    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    /// "`<m> menit <s> detik`".
    #[must_use]
    pub fn completion_time(&self) -> &str {
        &self.completion_time
    }

    #[must_use]
    pub fn duration(&self) -> CompletionDuration {
        self.duration
    }

    #[must_use]
    pub fn category(&self) -> ScoreCategory {
        self.category
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Accuracy percentage; same rounding as the score.
    #[must_use]
    pub fn accuracy(&self) -> u8 {
        crate::scoring::rounded_percentage(self.correct_answers, self.total_questions)
    }

    #[must_use]
    pub fn reviews(&self) -> Vec<QuestionReview> {
        review_rows(&self.questions, &self.answers)
    }
}

/// Wire shape of a result before the derived fields are checked.
#[derive(Deserialize)]
struct StoredResult {
    package_name: String,
    score: u8,
    correct_answers: u32,
    total_questions: u32,
    completion_time: String,
    duration: CompletionDuration,
    category: ScoreCategory,
    answers: AnswerMap,
    questions: Vec<Question>,
    completed_at: DateTime<Utc>,
}

impl TryFrom<StoredResult> for ResultRecord {
    type Error = ResultRecordError;

    fn try_from(raw: StoredResult) -> Result<Self, Self::Error> {
        let total = raw.questions.len();
        if total == 0 {
            return Err(ResultRecordError::NoQuestions);
        }
        if let Some((position, _)) = raw.answers.iter().find(|(position, _)| *position >= total) {
            return Err(ResultRecordError::AnswerOutOfRange { position, total });
        }

        let record = ResultRecord::new(
            raw.package_name,
            raw.questions,
            raw.answers,
            raw.duration,
            raw.completed_at,
        );
        let checks = [
            ("score", record.score == raw.score),
            ("correct_answers", record.correct_answers == raw.correct_answers),
            ("total_questions", record.total_questions == raw.total_questions),
            ("category", record.category == raw.category),
            ("completion_time", record.completion_time == raw.completion_time),
        ];
        match checks.into_iter().find(|(_, ok)| !ok) {
            Some((field, _)) => Err(ResultRecordError::Mismatch { field }),
            None => Ok(record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerOption, OptionCode, PackageId, QuestionId};
    use crate::time::fixed_now;

    fn record() -> ResultRecord {
        let questions: Vec<Question> = [OptionCode::A, OptionCode::B]
            .into_iter()
            .enumerate()
            .map(|(idx, correct)| {
                let options = vec![
                    AnswerOption::new(OptionCode::A, "ya"),
                    AnswerOption::new(OptionCode::B, "tidak"),
                ];
                Question::new(
                    QuestionId::new(idx as u64 + 1),
                    PackageId::new(1),
                    format!("Q{}", idx + 1),
                    options,
                    correct,
                )
                .unwrap()
            })
            .collect();
        let answers: AnswerMap = [(0, OptionCode::A), (1, OptionCode::A)].into_iter().collect();
        ResultRecord::new(
            "Paket A",
            questions,
            answers,
            CompletionDuration::from_secs(61),
            fixed_now(),
        )
    }

    #[test]
    fn derives_score_fields_on_construction() {
        let record = record();
        assert_eq!(record.correct_answers(), 1);
        assert_eq!(record.total_questions(), 2);
        assert_eq!(record.score(), 50);
        assert_eq!(record.accuracy(), 50);
        assert_eq!(record.category(), ScoreCategory::NeedsImprovement);
        assert_eq!(record.completion_time(), "1 menit 1 detik");
    }

    #[test]
    fn survives_json_roundtrip() {
        let record = record();
        let json = serde_json::to_string(&record).unwrap();
        let back: ResultRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn decoding_rejects_scores_that_disagree_with_answers() {
        let value = serde_json::to_value(record()).unwrap();

        let mut inflated = value.clone();
        inflated["score"] = 250.into();
        let err = serde_json::from_value::<ResultRecord>(inflated).unwrap_err();
        assert!(err.to_string().contains("stored score"), "{err}");

        let mut overcounted = value.clone();
        overcounted["correct_answers"] = 9.into();
        overcounted["total_questions"] = 1.into();
        assert!(serde_json::from_value::<ResultRecord>(overcounted).is_err());

        let mut empty = value;
        empty["questions"] = serde_json::json!([]);
        let err = serde_json::from_value::<ResultRecord>(empty).unwrap_err();
        assert!(err.to_string().contains("no questions"), "{err}");
    }
}
