use std::sync::Arc;

use services::{
    AuthService, PackageService, QuestionService, ResultExporter, ResultReader, RoleGate,
    TestFlowService,
};

/// Services the views need, supplied by the composition root.
pub trait UiApp: Send + Sync {
    fn auth(&self) -> Arc<AuthService>;
    fn packages(&self) -> Arc<PackageService>;
    fn questions(&self) -> Arc<QuestionService>;
    fn test_flow(&self) -> Arc<TestFlowService>;
    fn results(&self) -> Arc<ResultReader>;
    fn exporter(&self) -> Arc<ResultExporter>;
}

#[derive(Clone)]
pub struct AppContext {
    auth: Arc<AuthService>,
    packages: Arc<PackageService>,
    questions: Arc<QuestionService>,
    test_flow: Arc<TestFlowService>,
    results: Arc<ResultReader>,
    exporter: Arc<ResultExporter>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            auth: app.auth(),
            packages: app.packages(),
            questions: app.questions(),
            test_flow: app.test_flow(),
            results: app.results(),
            exporter: app.exporter(),
        }
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

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
