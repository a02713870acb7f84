#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth_service;
pub mod error;
pub mod export;
pub mod package_service;
pub mod question_service;
pub mod test_flow;

pub use psikotes_core::Clock;

pub use app_services::AppServices;
pub use auth_service::{AuthService, GateDecision, GateRedirect, LoginForm, RoleGate, SessionContext};
pub use error::{
    AppServicesError, AuthError, ExportError, PackageServiceError, QuestionServiceError,
    ResultError, TestFlowError,
};
pub use export::ResultExporter;
pub use package_service::{PackageService, PackageStats, PackageSummary};
pub use question_service::QuestionService;
pub use test_flow::{FlowStep, ResultPublisher, ResultReader, TestFlowService, TestProgress, TestSession};
