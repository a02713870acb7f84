use psikotes_core::model::{OptionCode, ResultRecord};
use psikotes_core::sequencer::SequencerError;
use services::{FlowStep, TestFlowError, TestFlowService, TestSession};

use crate::views::ViewError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionRowVm {
    pub code: OptionCode,
    pub text: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TestOutcome {
    Continue,
    Completed(Box<ResultRecord>),
}

/// View-side wrapper around a running `TestSession`.
pub struct TestVm {
    session: TestSession,
    warning: Option<String>,
}

impl TestVm {
    #[must_use]
    pub fn new(session: TestSession) -> Self {
        Self {
            session,
            warning: None,
        }
    }

    #[must_use]
    pub fn package_name(&self) -> &str {
        self.session.package_name()
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        self.session.current_question().prompt()
    }

    #[must_use]
    pub fn options(&self) -> Vec<OptionRowVm> {
        let pending = self.session.pending();
        self.session
            .current_question()
            .options()
            .iter()
            .map(|option| OptionRowVm {
                code: option.code,
                text: option.text.clone(),
                selected: pending == Some(option.code),
            })
            .collect()
    }

    /// "Soal n dari N"
    #[must_use]
    pub fn counter_label(&self) -> String {
        let progress = self.session.progress();
        format!("Soal {} dari {}", progress.number, progress.total)
    }

    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        self.session.progress().percent
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.session.progress().is_first
    }

    #[must_use]
    pub fn next_label(&self) -> &'static str {
        if self.session.progress().is_last {
            "Selesai"
        } else {
            "Selanjutnya"
        }
    }

    #[must_use]
    pub fn timer_label(&self) -> String {
        self.session.timer().display()
    }

    #[must_use]
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn select(&mut self, flow: &TestFlowService, code: OptionCode) {
        flow.select(&mut self.session, Some(code));
        self.warning = None;
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if the result cannot be published or the
    /// session already finished. A missing selection sets the warning instead.
    pub fn next(&mut self, flow: &TestFlowService) -> Result<TestOutcome, ViewError> {
        match flow.advance(&mut self.session) {
            Ok(FlowStep::Moved { .. }) => {
                self.warning = None;
                Ok(TestOutcome::Continue)
            }
            Ok(FlowStep::Completed(record)) => {
                self.warning = None;
                Ok(TestOutcome::Completed(Box::new(record)))
            }
            Err(TestFlowError::Sequencer(err @ SequencerError::NoOptionSelected)) => {
                self.warning = Some(err.to_string());
                Ok(TestOutcome::Continue)
            }
            Err(err) => {
                tracing::warn!(error = %err, "advancing test failed");
                Err(ViewError::Unknown)
            }
        }
    }

    pub fn previous(&mut self, flow: &TestFlowService) {
        if flow.retreat(&mut self.session).is_ok() {
            self.warning = None;
        }
    }

    #[cfg(test)]
    pub(crate) fn session_mut(&mut self) -> &mut TestSession {
        &mut self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::Duration;
    use psikotes_core::model::{PackageDraft, QuestionDraft};
    use psikotes_core::time::fixed_now;
    use services::{Clock, ResultPublisher};
    use storage::Storage;

    async fn start(questions: usize) -> (TestFlowService, TestVm) {
        let storage = Storage::in_memory();
        let package_id = storage
            .packages
            .insert_new_package(
                PackageDraft {
                    name: "Paket Uji".into(),
                    description: "desc".into(),
                    ..PackageDraft::default()
                }
                .validate(fixed_now())
                .unwrap(),
            )
            .await
            .unwrap();
        for i in 0..questions {
            storage
                .questions
                .insert_new_question(
                    package_id,
                    QuestionDraft::new(format!("Q{i}"), ["a", "b", "c", "d"], Some(OptionCode::B))
                        .validate()
                        .unwrap(),
                )
                .await
                .unwrap();
        }
        let flow = TestFlowService::new(
            Clock::fixed(fixed_now()),
            Arc::clone(&storage.packages),
            Arc::clone(&storage.questions),
            ResultPublisher::new(Arc::clone(&storage.session)),
        );
        let session = flow.start(package_id).await.unwrap();
        (flow, TestVm::new(session))
    }

    #[tokio::test]
    async fn missing_selection_sets_warning_and_stays() {
        let (flow, mut vm) = start(2).await;
        assert_eq!(vm.next(&flow).unwrap(), TestOutcome::Continue);
        assert_eq!(vm.warning(), Some("Silakan pilih jawaban terlebih dahulu"));
        assert_eq!(vm.counter_label(), "Soal 1 dari 2");

        vm.select(&flow, OptionCode::B);
        assert_eq!(vm.warning(), None);
        assert!(vm.options().iter().any(|row| row.selected && row.code == OptionCode::B));
    }

    #[tokio::test]
    async fn last_question_completes_with_result() {
        let (flow, mut vm) = start(2).await;
        vm.select(&flow, OptionCode::B);
        vm.next(&flow).unwrap();
        assert_eq!(vm.next_label(), "Selesai");
        assert!(!vm.is_first());

        vm.session_mut().timer_mut().clock_mut().advance(Duration::seconds(65));
        assert_eq!(vm.timer_label(), "1:05");

        vm.select(&flow, OptionCode::A);
        let TestOutcome::Completed(record) = vm.next(&flow).unwrap() else {
            panic!("expected completion");
        };
        assert_eq!(record.score(), 50);
    }

    #[tokio::test]
    async fn previous_restores_recorded_answer() {
        let (flow, mut vm) = start(3).await;
        vm.select(&flow, OptionCode::C);
        vm.next(&flow).unwrap();
        vm.previous(&flow);
        assert!(vm.is_first());
        assert!(vm.options().iter().any(|row| row.selected && row.code == OptionCode::C));
        vm.previous(&flow);
        assert_eq!(vm.counter_label(), "Soal 1 dari 3");
    }
}
