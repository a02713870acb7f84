use std::sync::Arc;

use psikotes_core::model::{OptionCode, PackageId, ResultRecord};
use psikotes_core::sequencer::{Advance, Retreat};
use psikotes_core::timer::SessionTimer;
use storage::repository::{PackageRepository, QuestionRepository};

use super::publisher::ResultPublisher;
use super::session::TestSession;
use crate::Clock;
use crate::error::TestFlowError;

/// Outcome of pressing "next" / "finish".
#[derive(Debug, Clone, PartialEq)]
pub enum FlowStep {
    Moved {
        position: usize,
        preselected: Option<OptionCode>,
    },
    /// The last answer was recorded; the record is already published.
    Completed(ResultRecord),
}

/// Orchestrates a test attempt from package pick to published result.
#[derive(Clone)]
pub struct TestFlowService {
    clock: Clock,
    packages: Arc<dyn PackageRepository>,
    questions: Arc<dyn QuestionRepository>,
    publisher: ResultPublisher,
}

impl TestFlowService {
    #[must_use]
    pub fn new(
        clock: Clock,
        packages: Arc<dyn PackageRepository>,
        questions: Arc<dyn QuestionRepository>,
        publisher: ResultPublisher,
    ) -> Self {
        Self {
            clock,
            packages,
            questions,
            publisher,
        }
    }

    /// Start a test for `package_id`. Any previously published result is cleared.
    ///
    /// # Errors
    ///
    /// Returns `TestFlowError::PackageNotFound` for unknown packages,
    /// `TestFlowError::Empty` when the package has no questions, and
    /// `TestFlowError::Storage` / `TestFlowError::Result` for backend failures.
    pub async fn start(&self, package_id: PackageId) -> Result<TestSession, TestFlowError> {
        self.publisher.clear()?;

        let package = self
            .packages
            .get_package(package_id)
            .await?
            .ok_or(TestFlowError::PackageNotFound)?;
        let questions = self.questions.list_questions(package_id).await?;
        if questions.is_empty() {
            return Err(TestFlowError::Empty);
        }

        let total = questions.len();
        let session = TestSession::start(
            package_id,
            package.name(),
            questions,
            SessionTimer::new(self.clock),
        )?;
        tracing::info!(package_id = %package_id, questions = total, "test started");
        Ok(session)
    }

    pub fn select(&self, session: &mut TestSession, code: Option<OptionCode>) {
        session.select(code);
    }

    /// Record the pending selection and move on. On the last question this
    /// scores the attempt, freezes its duration and publishes the record.
    ///
    /// # Errors
    ///
    /// Returns `TestFlowError::Sequencer` when nothing is selected, the selection
    /// is not offered by the current question, or the session already finished.
    /// Returns `TestFlowError::Result` if publishing fails.
    pub fn advance(&self, session: &mut TestSession) -> Result<FlowStep, TestFlowError> {
        match session.advance()? {
            Advance::Moved {
                position,
                preselected,
            } => Ok(FlowStep::Moved {
                position,
                preselected,
            }),
            Advance::Completed(answers) => {
                let completed_at = session.timer().clock().now();
                let duration = session.timer().final_duration_at(completed_at);
                let record = ResultRecord::new(
                    session.package_name(),
                    session.questions().to_vec(),
                    answers,
                    duration,
                    completed_at,
                );
                self.publisher.publish(&record)?;
                tracing::info!(
                    package_id = %session.package_id(),
                    score = record.score(),
                    seconds = duration.seconds(),
                    "test completed"
                );
                Ok(FlowStep::Completed(record))
            }
        }
    }

    /// Step back one question. A no-op on the first one.
    ///
    /// # Errors
    ///
    /// Returns `TestFlowError::Sequencer` once the session has completed.
    pub fn retreat(&self, session: &mut TestSession) -> Result<Retreat, TestFlowError> {
        Ok(session.retreat()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_flow::ResultReader;
    use chrono::Duration;
    use psikotes_core::model::{PackageDraft, QuestionDraft};
    use psikotes_core::sequencer::SequencerError;
    use psikotes_core::time::fixed_now;
    use storage::Storage;

    async fn setup(question_count: usize) -> (Storage, TestFlowService, PackageId) {
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
        for i in 0..question_count {
            storage
                .questions
                .insert_new_question(
                    package_id,
                    QuestionDraft::new(format!("Q{i}"), ["a", "b", "c", "d"], Some(OptionCode::A))
                        .validate()
                        .unwrap(),
                )
                .await
                .unwrap();
        }
        let flow = TestFlowService::new(
            Clock::fixed(fixed_now()),
            storage.packages.clone(),
            storage.questions.clone(),
            ResultPublisher::new(storage.session.clone()),
        );
        (storage, flow, package_id)
    }

    #[tokio::test]
    async fn start_rejects_unknown_and_empty_packages() {
        let (_, flow, package_id) = setup(0).await;
        assert!(matches!(flow.start(package_id).await, Err(TestFlowError::Empty)));
        assert!(matches!(
            flow.start(PackageId::new(42)).await,
            Err(TestFlowError::PackageNotFound)
        ));
    }

    #[tokio::test]
    async fn completion_freezes_duration_and_publishes() {
        let (storage, flow, package_id) = setup(2).await;
        let mut session = flow.start(package_id).await.unwrap();

        flow.select(&mut session, Some(OptionCode::A));
        assert!(matches!(flow.advance(&mut session).unwrap(), FlowStep::Moved { position: 1, .. }));

        session.timer_mut().clock_mut().advance(Duration::seconds(125));
        flow.select(&mut session, Some(OptionCode::B));
        let FlowStep::Completed(record) = flow.advance(&mut session).unwrap() else {
            panic!("expected completion");
        };
        assert_eq!(record.score(), 50);
        assert_eq!(record.completion_time(), "2 menit 5 detik");

        let stored = ResultReader::new(storage.session.clone()).latest().unwrap();
        assert_eq!(stored, record);

        assert!(matches!(
            flow.advance(&mut session),
            Err(TestFlowError::Sequencer(SequencerError::Completed))
        ));
    }

    #[tokio::test]
    async fn completion_stamp_and_duration_share_one_instant() {
        let (_, flow, package_id) = setup(1).await;
        let mut session = flow.start(package_id).await.unwrap();
        let started = session.timer().started_at().unwrap();

        session.timer_mut().clock_mut().advance(Duration::milliseconds(61_500));
        flow.select(&mut session, Some(OptionCode::A));
        let FlowStep::Completed(record) = flow.advance(&mut session).unwrap() else {
            panic!("expected completion");
        };

        let stamped = (record.completed_at() - started).num_seconds();
        assert_eq!(stamped, 61);
        assert_eq!(record.duration().seconds(), 61);
        assert_eq!(record.completion_time(), "1 menit 1 detik");
    }

    #[tokio::test]
    async fn starting_a_test_clears_previous_result() {
        let (storage, flow, package_id) = setup(1).await;
        let mut session = flow.start(package_id).await.unwrap();
        flow.select(&mut session, Some(OptionCode::A));
        flow.advance(&mut session).unwrap();

        let reader = ResultReader::new(storage.session.clone());
        assert!(reader.latest().is_ok());

        let _again = flow.start(package_id).await.unwrap();
        assert!(matches!(
            reader.latest(),
            Err(crate::error::ResultError::MissingSession)
        ));
    }
}
