use std::path::PathBuf;
use std::sync::Arc;

use storage::demo::seed_demo_data;
use storage::repository::Storage;

use crate::Clock;
use crate::auth_service::{AuthService, RoleGate};
use crate::error::AppServicesError;
use crate::export::ResultExporter;
use crate::package_service::PackageService;
use crate::question_service::QuestionService;
use crate::test_flow::{ResultPublisher, ResultReader, TestFlowService};

/// Assembles app-facing services over one `Storage`.
#[derive(Clone)]
pub struct AppServices {
    auth: Arc<AuthService>,
    packages: Arc<PackageService>,
    questions: Arc<QuestionService>,
    test_flow: Arc<TestFlowService>,
    results: Arc<ResultReader>,
    exporter: Arc<ResultExporter>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage, seeding demo data on first run.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or seeding fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        export_dir: impl Into<PathBuf>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(storage, clock, export_dir).await
    }

    /// Build services over in-memory storage, seeded with demo data.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Storage` if seeding fails.
    pub async fn new_in_memory(
        clock: Clock,
        export_dir: impl Into<PathBuf>,
    ) -> Result<Self, AppServicesError> {
        Self::from_storage(Storage::in_memory(), clock, export_dir).await
    }

    async fn from_storage(
        storage: Storage,
        clock: Clock,
        export_dir: impl Into<PathBuf>,
    ) -> Result<Self, AppServicesError> {
        let report = seed_demo_data(&storage, clock.now()).await?;
        tracing::debug!(
            users = report.users,
            packages = report.packages,
            questions = report.questions,
            "demo data checked"
        );

        let auth = Arc::new(AuthService::new(
            Arc::clone(&storage.users),
            Arc::clone(&storage.session),
        ));
        let packages = Arc::new(PackageService::new(
            clock,
            Arc::clone(&storage.packages),
            Arc::clone(&storage.questions),
        ));
        let questions = Arc::new(QuestionService::new(Arc::clone(&storage.questions)));
        let test_flow = Arc::new(TestFlowService::new(
            clock,
            Arc::clone(&storage.packages),
            Arc::clone(&storage.questions),
            ResultPublisher::new(Arc::clone(&storage.session)),
        ));
        let results = Arc::new(ResultReader::new(Arc::clone(&storage.session)));
        let exporter = Arc::new(ResultExporter::new(clock, export_dir));

        Ok(Self {
            auth,
            packages,
            questions,
            test_flow,
            results,
            exporter,
        })
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn gate(&self) -> RoleGate {
        self.auth.gate()
    }

    #[must_use]
    pub fn packages(&self) -> Arc<PackageService> {
        Arc::clone(&self.packages)
    }

    #[must_use]
    pub fn questions(&self) -> Arc<QuestionService> {
        Arc::clone(&self.questions)
    }

    #[must_use]
    pub fn test_flow(&self) -> Arc<TestFlowService> {
        Arc::clone(&self.test_flow)
    }

    #[must_use]
    pub fn results(&self) -> Arc<ResultReader> {
        Arc::clone(&self.results)
    }

    #[must_use]
    pub fn exporter(&self) -> Arc<ResultExporter> {
        Arc::clone(&self.exporter)
    }
}
