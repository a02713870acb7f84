use psikotes_core::model::{OptionCode, Question, QuestionError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionRowVm {
    pub id: u64,
    pub number: usize,
    pub prompt: String,
    /// `(letter, text)` pairs in display order.
    pub options: Vec<(&'static str, String)>,
    pub correct: &'static str,
}

#[must_use]
pub fn map_question_rows(questions: &[Question]) -> Vec<QuestionRowVm> {
    questions
        .iter()
        .enumerate()
        .map(|(index, question)| QuestionRowVm {
            id: question.id().value(),
            number: index + 1,
            prompt: question.prompt().to_string(),
            options: question
                .options()
                .iter()
                .map(|option| (option.code.as_str(), option.text.clone()))
                .collect(),
            correct: question.correct().as_str(),
        })
        .collect()
}

#[must_use]
pub fn question_error_message(err: &QuestionError) -> String {
    match err {
        QuestionError::EmptyPrompt => "Pertanyaan harus diisi".to_string(),
        QuestionError::EmptyOption(code) => format!("Pilihan {code} harus diisi"),
        QuestionError::MissingCorrect => "Jawaban benar harus dipilih".to_string(),
        _ => "Data soal tidak valid".to_string(),
    }
}

/// Parses the correct-answer radio/select value. Blank means "not chosen".
#[must_use]
pub fn parse_correct(value: &str) -> Option<OptionCode> {
    OptionCode::parse_selection(value)
}
