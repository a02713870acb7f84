//! Shared error types for the services crate.

use thiserror::Error;

use psikotes_core::model::{PackageError, QuestionError, RegistrationError};
use psikotes_core::sequencer::SequencerError;
use storage::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("Semua field harus diisi")]
    MissingFields,
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid password")]
    InvalidPassword,
    #[error("Peran yang dipilih tidak sesuai dengan akun Anda")]
    RoleMismatch,
    #[error("Email sudah terdaftar")]
    EmailTaken,
    #[error(transparent)]
    Registration(#[from] RegistrationError),
    #[error("session payload is corrupt: {0}")]
    Session(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// True for errors caused by what the user typed, as opposed to backend failures.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AuthError::MissingFields
                | AuthError::UserNotFound
                | AuthError::InvalidPassword
                | AuthError::RoleMismatch
                | AuthError::EmailTaken
                | AuthError::Registration(_)
        )
    }
}

/// Errors emitted by `PackageService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PackageServiceError {
    #[error(transparent)]
    Package(#[from] PackageError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuestionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionServiceError {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while publishing or reading a result record.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResultError {
    #[error("no test result in this session")]
    MissingSession,
    #[error("stored result is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the test-taking flow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TestFlowError {
    #[error("package not found")]
    PackageNotFound,
    #[error("package has no questions")]
    Empty,
    #[error(transparent)]
    Sequencer(#[from] SequencerError),
    #[error(transparent)]
    Result(#[from] ResultError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ResultExporter`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
