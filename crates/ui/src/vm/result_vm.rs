use psikotes_core::model::ResultRecord;
use psikotes_core::scoring::ScoreCategory;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRowVm {
    pub number: usize,
    pub prompt: String,
    pub user_answer: &'static str,
    pub correct_answer: &'static str,
    pub status: &'static str,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub package_name: String,
    pub score: u8,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub completion_time: String,
    pub accuracy: u8,
    pub category_label: &'static str,
    pub category_class: &'static str,
    pub analysis: &'static str,
    pub rows: Vec<ReviewRowVm>,
}

impl From<&ResultRecord> for ResultVm {
    fn from(record: &ResultRecord) -> Self {
        let category = record.category();
        let rows = record
            .reviews()
            .into_iter()
            .map(|row| ReviewRowVm {
                number: row.number,
                user_answer: row.user_answer_label(),
                correct_answer: row.correct_answer.as_str(),
                status: row.status_label(),
                is_correct: row.is_correct,
                prompt: row.prompt,
            })
            .collect();

        Self {
            package_name: record.package_name().to_string(),
            score: record.score(),
            correct_answers: record.correct_answers(),
            total_questions: record.total_questions(),
            completion_time: record.completion_time().to_string(),
            accuracy: record.accuracy(),
            category_label: category.label(),
            category_class: category_class(category),
            analysis: category.analysis(),
            rows,
        }
    }
}

fn category_class(category: ScoreCategory) -> &'static str {
    match category {
        ScoreCategory::Excellent => "badge badge-excellent",
        ScoreCategory::Good => "badge badge-good",
        ScoreCategory::NeedsImprovement => "badge badge-improve",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use psikotes_core::model::{AnswerMap, AnswerOption, OptionCode, PackageId, Question, QuestionId};
    use psikotes_core::time::fixed_now;
    use psikotes_core::timer::CompletionDuration;

    #[test]
    fn maps_rows_and_category() {
        let questions: Vec<Question> = (1..=2)
            .map(|id| {
                Question::new(
                    QuestionId::new(id),
                    PackageId::new(1),
                    format!("Q{id}"),
                    vec![
                        AnswerOption::new(OptionCode::A, "ya"),
                        AnswerOption::new(OptionCode::B, "tidak"),
                    ],
                    OptionCode::A,
                )
                .unwrap()
            })
            .collect();
        let answers: AnswerMap = [(0, OptionCode::A)].into_iter().collect();
        let record = ResultRecord::new(
            "Paket Uji",
            questions,
            answers,
            CompletionDuration::from_secs(75),
            fixed_now(),
        );

        let vm = ResultVm::from(&record);
        assert_eq!(vm.score, 50);
        assert_eq!(vm.category_label, "Perlu Perbaikan");
        assert_eq!(vm.completion_time, "1 menit 15 detik");
        assert_eq!(vm.rows[0].status, "Benar");
        assert_eq!(vm.rows[1].user_answer, "-");
        assert!(!vm.rows[1].is_correct);
    }
}
