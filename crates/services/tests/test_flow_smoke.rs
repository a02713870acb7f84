use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use psikotes_core::model::{OptionCode, Package, PackageId, Role, ValidatedPackage};
use psikotes_core::scoring::ScoreCategory;
use psikotes_core::sequencer::SequencerError;
use psikotes_core::time::fixed_now;
use services::test_flow::TestSession;
use services::{
    AppServices, Clock, FlowStep, GateDecision, GateRedirect, LoginForm, ResultError,
    ResultPublisher, TestFlowError, TestFlowService,
};
use storage::InMemorySessionStore;
use storage::demo::DEMO_USER_EMAIL;
use storage::repository::{PackageRepository, StorageError};

const PERSONALITY_KEY: [OptionCode; 5] = [
    OptionCode::C,
    OptionCode::C,
    OptionCode::B,
    OptionCode::B,
    OptionCode::A,
];

async fn demo_app() -> AppServices {
    let dir = std::env::temp_dir();
    AppServices::new_in_memory(Clock::fixed(fixed_now()), dir)
        .await
        .unwrap()
}

async fn personality_package(app: &AppServices) -> PackageId {
    app.packages()
        .search_packages("Kepribadian")
        .await
        .unwrap()
        .first()
        .map(Package::id)
        .unwrap()
}

async fn run_test(app: &AppServices, answers: [OptionCode; 5]) -> TestSession {
    let flow = app.test_flow();
    let mut session = flow.start(personality_package(app).await).await.unwrap();
    for (i, code) in answers.into_iter().enumerate() {
        flow.select(&mut session, Some(code));
        if i == 4 {
            break;
        }
        flow.advance(&mut session).unwrap();
    }
    session
}

#[tokio::test]
async fn all_correct_scores_excellent() {
    let app = demo_app().await;
    let flow = app.test_flow();
    let mut session = run_test(&app, PERSONALITY_KEY).await;
    session.timer_mut().clock_mut().advance(Duration::seconds(150));

    let FlowStep::Completed(record) = flow.advance(&mut session).unwrap() else {
        panic!("expected completion");
    };
    assert_eq!(record.score(), 100);
    assert_eq!(record.correct_answers(), 5);
    assert_eq!(record.category(), ScoreCategory::Excellent);
    assert_eq!(record.completion_time(), "2 menit 30 detik");
    assert_eq!(app.results().latest().unwrap(), record);
}

#[tokio::test]
async fn three_of_five_scores_good() {
    let app = demo_app().await;
    let mut answers = PERSONALITY_KEY;
    answers[0] = OptionCode::A;
    answers[4] = OptionCode::D;
    let mut session = run_test(&app, answers).await;

    let FlowStep::Completed(record) = app.test_flow().advance(&mut session).unwrap() else {
        panic!("expected completion");
    };
    assert_eq!(record.score(), 60);
    assert_eq!(record.category().label(), "Baik");
}

#[tokio::test]
async fn two_of_five_needs_improvement_and_exports() {
    let app = demo_app().await;
    let mut answers = PERSONALITY_KEY;
    answers[0] = OptionCode::A;
    answers[1] = OptionCode::A;
    answers[2] = OptionCode::A;
    let mut session = run_test(&app, answers).await;

    let FlowStep::Completed(record) = app.test_flow().advance(&mut session).unwrap() else {
        panic!("expected completion");
    };
    assert_eq!(record.score(), 40);
    assert_eq!(record.category().label(), "Perlu Perbaikan");

    let dir = tempfile::tempdir().unwrap();
    let path = app.exporter().write(&record, dir.path()).unwrap();
    let text = std::fs::read_to_string(path).unwrap();
    assert!(text.contains("Skor: 40\n"));
    assert!(text.contains("✗ Salah"));
}

#[tokio::test]
async fn finishing_without_a_selection_stays_on_last_question() {
    let app = demo_app().await;
    let flow = app.test_flow();
    let mut session = run_test(&app, PERSONALITY_KEY).await;
    flow.select(&mut session, None);

    let err = flow.advance(&mut session).unwrap_err();
    assert!(matches!(
        err,
        TestFlowError::Sequencer(SequencerError::NoOptionSelected)
    ));
    assert_eq!(session.progress().number, 5);
    assert!(!session.is_completed());
    assert!(matches!(
        app.results().latest(),
        Err(ResultError::MissingSession)
    ));
}

#[tokio::test]
async fn results_without_a_test_and_guest_access_redirect() {
    let app = demo_app().await;
    assert!(matches!(
        app.results().latest(),
        Err(ResultError::MissingSession)
    ));
    assert_eq!(
        app.gate().check(None),
        GateDecision::Redirect(GateRedirect::Login)
    );

    app.auth()
        .login(LoginForm {
            email: DEMO_USER_EMAIL.into(),
            password: "rahasia".into(),
            role: Some(Role::User),
        })
        .await
        .unwrap();
    assert!(matches!(app.gate().check(Some(Role::User)), GateDecision::Granted(_)));
    assert_eq!(
        app.gate().check(Some(Role::Admin)),
        GateDecision::Redirect(GateRedirect::Login)
    );
}

struct OfflinePackages;

#[async_trait]
impl PackageRepository for OfflinePackages {
    async fn insert_new_package(&self, _package: ValidatedPackage) -> Result<PackageId, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn get_package(&self, _id: PackageId) -> Result<Option<Package>, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn list_packages(&self) -> Result<Vec<Package>, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn delete_package(&self, _id: PackageId) -> Result<(), StorageError> {
        Err(StorageError::Connection("offline".into()))
    }
}

#[tokio::test]
async fn storage_failure_surfaces_as_error() {
    let storage = storage::Storage::in_memory();
    let flow = TestFlowService::new(
        Clock::fixed(fixed_now()),
        Arc::new(OfflinePackages),
        storage.questions.clone(),
        ResultPublisher::new(Arc::new(InMemorySessionStore::new())),
    );
    assert!(matches!(
        flow.start(PackageId::new(1)).await,
        Err(TestFlowError::Storage(StorageError::Connection(_)))
    ));
}
