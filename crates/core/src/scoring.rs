//! Scoring of a finished answer map against its question list.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{AnswerMap, OptionCode, Question};

//
// ─── SCORE CARD ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub correct: u32,
    pub total: u32,
    pub score: u8,
}

impl ScoreCard {
    #[must_use]
    pub fn category(&self) -> ScoreCategory {
        ScoreCategory::from_score(self.score)
    }
}

/// `round(correct / total * 100)` with halves rounded up. Zero questions score 0.
#[must_use]
pub fn rounded_percentage(correct: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = u64::from(correct.min(total));
    let total = u64::from(total);
    let pct = (200 * correct + total) / (2 * total);
    u8::try_from(pct).unwrap_or(100)
}

/// Compares every question with the answer recorded at its position.
///
/// A missing answer counts as incorrect.
#[must_use]
pub fn score_answers(questions: &[Question], answers: &AnswerMap) -> ScoreCard {
    let correct = questions
        .iter()
        .enumerate()
        .filter(|(position, question)| question.is_correct(answers.get(*position)))
        .count();

    let correct = u32::try_from(correct).unwrap_or(u32::MAX);
    let total = u32::try_from(questions.len()).unwrap_or(u32::MAX);

    ScoreCard {
        correct,
        total,
        score: rounded_percentage(correct, total),
    }
}

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreCategory {
    Excellent,
    Good,
    NeedsImprovement,
}

impl ScoreCategory {
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => ScoreCategory::Excellent,
            60..=79 => ScoreCategory::Good,
            _ => ScoreCategory::NeedsImprovement,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ScoreCategory::Excellent => "Sangat Baik",
            ScoreCategory::Good => "Baik",
            ScoreCategory::NeedsImprovement => "Perlu Perbaikan",
        }
    }

    /// Narrative shown under "Analisis Hasil".
    #[must_use]
    pub fn analysis(self) -> &'static str {
        match self {
            ScoreCategory::Excellent => {
                "Berdasarkan hasil tes kepribadian Anda, menunjukkan karakteristik yang sangat baik dalam hal kemampuan beradaptasi dan kerjasama tim. Anda memiliki kecenderungan untuk berpikir analitis dan mampu mengambil keputusan dengan baik dalam situasi yang menantang."
            }
            ScoreCategory::Good => {
                "Hasil tes menunjukkan Anda memiliki kemampuan yang baik dalam beberapa aspek kepribadian. Ada beberapa area yang sudah kuat, namun masih ada ruang untuk pengembangan dalam aspek lainnya."
            }
            ScoreCategory::NeedsImprovement => {
                "Hasil tes menunjukkan ada beberapa area kepribadian yang perlu dikembangkan lebih lanjut. Kami menyarankan untuk meningkatkan kemampuan adaptasi dan pengambilan keputusan dalam berbagai situasi."
            }
        }
    }
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── REVIEW ROWS ───────────────────────────────────────────────────────────────
//

/// One row of the answer-detail table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionReview {
    /// 1-based question number.
    pub number: usize,
    pub prompt: String,
    pub user_answer: Option<OptionCode>,
    pub correct_answer: OptionCode,
    pub is_correct: bool,
}

impl QuestionReview {
    /// The user's answer letter, or "-" when the position was never answered.
    #[must_use]
    pub fn user_answer_label(&self) -> &'static str {
        self.user_answer.map_or("-", OptionCode::as_str)
    }

    #[must_use]
    pub fn status_label(&self) -> &'static str {
        if self.is_correct { "Benar" } else { "Salah" }
    }
}

#[must_use]
pub fn review_rows(questions: &[Question], answers: &AnswerMap) -> Vec<QuestionReview> {
    questions
        .iter()
        .enumerate()
        .map(|(position, question)| {
            let user_answer = answers.get(position);
            QuestionReview {
                number: position + 1,
                prompt: question.prompt().to_string(),
                user_answer,
                correct_answer: question.correct(),
                is_correct: question.is_correct(user_answer),
            }
        })
        .collect()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
