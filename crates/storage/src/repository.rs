use async_trait::async_trait;
use psikotes_core::model::{
    Identity, Package, PackageId, Question, QuestionId, ValidatedPackage, ValidatedQuestion,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::session_store::{InMemorySessionStore, SessionStore};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

//
// ─── CONTRACTS ─────────────────────────────────────────────────────────────────
//

/// Registered accounts. Only the identity is stored; passwords never are.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a newly registered identity.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the email is already registered.
    async fn insert_user(&self, identity: &Identity) -> Result<(), StorageError>;

    /// Look up an account by its exact email.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StorageError>;
}

#[async_trait]
pub trait PackageRepository: Send + Sync {
    /// Insert a validated package and return its allocated id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the package cannot be stored.
    async fn insert_new_package(&self, package: ValidatedPackage)
    -> Result<PackageId, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_package(&self, id: PackageId) -> Result<Option<Package>, StorageError>;

    /// All packages, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_packages(&self) -> Result<Vec<Package>, StorageError>;

    /// Delete a package together with its questions.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the package does not exist.
    async fn delete_package(&self, id: PackageId) -> Result<(), StorageError>;
}

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Insert a validated question under `package_id` and return its id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the package does not exist.
    async fn insert_new_question(
        &self,
        package_id: PackageId,
        question: ValidatedQuestion,
    ) -> Result<QuestionId, StorageError>;

    /// Replace prompt, options and correct code of an existing question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the question does not exist.
    async fn update_question(&self, question: &Question) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the question does not exist.
    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError>;

    /// Questions of one package ordered by id, which is their test order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_questions(&self, package_id: PackageId) -> Result<Vec<Question>, StorageError>;

    /// Total number of questions across all packages.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn count_questions(&self) -> Result<u64, StorageError>;
}

//
// ─── IN-MEMORY ─────────────────────────────────────────────────────────────────
//

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    users: Arc<Mutex<Vec<Identity>>>,
    packages: Arc<Mutex<BTreeMap<PackageId, Package>>>,
    questions: Arc<Mutex<BTreeMap<QuestionId, Question>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn insert_user(&self, identity: &Identity) -> Result<(), StorageError> {
        let mut guard = self.users.lock().map_err(poisoned)?;
        if guard.iter().any(|u| u.email() == identity.email()) {
            return Err(StorageError::Conflict);
        }
        guard.push(identity.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StorageError> {
        let guard = self.users.lock().map_err(poisoned)?;
        Ok(guard.iter().find(|u| u.email() == email).cloned())
    }
}

#[async_trait]
impl PackageRepository for InMemoryRepository {
    async fn insert_new_package(
        &self,
        package: ValidatedPackage,
    ) -> Result<PackageId, StorageError> {
        let mut guard = self.packages.lock().map_err(poisoned)?;
        let next = guard.keys().next_back().map_or(1, |id| id.value() + 1);
        let id = PackageId::new(next);
        guard.insert(id, package.assign_id(id));
        Ok(id)
    }

    async fn get_package(&self, id: PackageId) -> Result<Option<Package>, StorageError> {
        let guard = self.packages.lock().map_err(poisoned)?;
        Ok(guard.get(&id).cloned())
    }

    async fn list_packages(&self) -> Result<Vec<Package>, StorageError> {
        let guard = self.packages.lock().map_err(poisoned)?;
        Ok(guard.values().cloned().collect())
    }

    async fn delete_package(&self, id: PackageId) -> Result<(), StorageError> {
        let mut packages = self.packages.lock().map_err(poisoned)?;
        packages.remove(&id).ok_or(StorageError::NotFound)?;
        drop(packages);

        let mut questions = self.questions.lock().map_err(poisoned)?;
        questions.retain(|_, q| q.package_id() != id);
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn insert_new_question(
        &self,
        package_id: PackageId,
        question: ValidatedQuestion,
    ) -> Result<QuestionId, StorageError> {
        let exists = self
            .packages
            .lock()
            .map_err(poisoned)?
            .contains_key(&package_id);
        if !exists {
            return Err(StorageError::NotFound);
        }

        let mut guard = self.questions.lock().map_err(poisoned)?;
        let next = guard.keys().next_back().map_or(1, |id| id.value() + 1);
        let id = QuestionId::new(next);
        guard.insert(id, question.assign_id(id, package_id));
        Ok(id)
    }

    async fn update_question(&self, question: &Question) -> Result<(), StorageError> {
        let mut guard = self.questions.lock().map_err(poisoned)?;
        let slot = guard.get_mut(&question.id()).ok_or(StorageError::NotFound)?;
        *slot = question.clone();
        Ok(())
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        let mut guard = self.questions.lock().map_err(poisoned)?;
        guard.remove(&id).map(|_| ()).ok_or(StorageError::NotFound)
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        let guard = self.questions.lock().map_err(poisoned)?;
        Ok(guard.get(&id).cloned())
    }

    async fn list_questions(&self, package_id: PackageId) -> Result<Vec<Question>, StorageError> {
        let guard = self.questions.lock().map_err(poisoned)?;
        Ok(guard
            .values()
            .filter(|q| q.package_id() == package_id)
            .cloned()
            .collect())
    }

    async fn count_questions(&self) -> Result<u64, StorageError> {
        let guard = self.questions.lock().map_err(poisoned)?;
        Ok(guard.len() as u64)
    }
}

//
// ─── AGGREGATE ─────────────────────────────────────────────────────────────────
//

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub users: Arc<dyn UserRepository>,
    pub packages: Arc<dyn PackageRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub session: Arc<dyn SessionStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self {
            users: Arc::new(repo.clone()),
            packages: Arc::new(repo.clone()),
            questions: Arc::new(repo),
            session: Arc::new(InMemorySessionStore::new()),
        }
    }
}
