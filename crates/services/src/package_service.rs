use std::sync::Arc;

use psikotes_core::model::{Package, PackageDraft, PackageId};
use storage::repository::{PackageRepository, QuestionRepository};

use crate::Clock;
use crate::error::PackageServiceError;

/// Counters shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackageStats {
    pub total_packages: usize,
    pub active_packages: usize,
    pub total_questions: u64,
}

/// A package paired with how many questions it currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSummary {
    pub package: Package,
    pub question_count: usize,
}

/// Orchestrates package creation, lookup and deletion.
#[derive(Clone)]
pub struct PackageService {
    clock: Clock,
    packages: Arc<dyn PackageRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl PackageService {
    #[must_use]
    pub fn new(
        clock: Clock,
        packages: Arc<dyn PackageRepository>,
        questions: Arc<dyn QuestionRepository>,
    ) -> Self {
        Self {
            clock,
            packages,
            questions,
        }
    }

    /// Validate and persist a new package.
    ///
    /// # Errors
    ///
    /// Returns `PackageServiceError::Package` for validation failures.
    /// Returns `PackageServiceError::Storage` if persistence fails.
    pub async fn create_package(&self, draft: PackageDraft) -> Result<PackageId, PackageServiceError> {
        let validated = draft.validate(self.clock.now())?;
        let name = validated.name.clone();
        let id = self.packages.insert_new_package(validated).await?;
        tracing::info!(package_id = %id, name = %name, "package created");
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns `PackageServiceError::Storage` if repository access fails.
    pub async fn list_packages(&self) -> Result<Vec<Package>, PackageServiceError> {
        Ok(self.packages.list_packages().await?)
    }

    /// Packages whose name or description contains `term`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `PackageServiceError::Storage` if repository access fails.
    pub async fn search_packages(&self, term: &str) -> Result<Vec<Package>, PackageServiceError> {
        let packages = self.packages.list_packages().await?;
        Ok(packages.into_iter().filter(|p| p.matches(term)).collect())
    }

    /// Packages a test-taker may start.
    ///
    /// # Errors
    ///
    /// Returns `PackageServiceError::Storage` if repository access fails.
    pub async fn list_active(&self) -> Result<Vec<Package>, PackageServiceError> {
        let packages = self.packages.list_packages().await?;
        Ok(packages.into_iter().filter(Package::is_active).collect())
    }

    /// Every package with its question count.
    ///
    /// # Errors
    ///
    /// Returns `PackageServiceError::Storage` if repository access fails.
    pub async fn list_summaries(&self) -> Result<Vec<PackageSummary>, PackageServiceError> {
        let packages = self.list_packages().await?;
        self.summarize(packages).await
    }

    /// Active packages with their question counts, for the test-taker list.
    ///
    /// # Errors
    ///
    /// Returns `PackageServiceError::Storage` if repository access fails.
    pub async fn list_active_summaries(&self) -> Result<Vec<PackageSummary>, PackageServiceError> {
        let packages = self.list_active().await?;
        self.summarize(packages).await
    }

    /// Search hits with their question counts, for the admin table.
    ///
    /// # Errors
    ///
    /// Returns `PackageServiceError::Storage` if repository access fails.
    pub async fn search_summaries(&self, term: &str) -> Result<Vec<PackageSummary>, PackageServiceError> {
        let packages = self.search_packages(term).await?;
        self.summarize(packages).await
    }

    async fn summarize(&self, packages: Vec<Package>) -> Result<Vec<PackageSummary>, PackageServiceError> {
        let mut summaries = Vec::with_capacity(packages.len());
        for package in packages {
            let question_count = self.questions.list_questions(package.id()).await?.len();
            summaries.push(PackageSummary {
                package,
                question_count,
            });
        }
        Ok(summaries)
    }

    /// Fetch a package by ID. Returns `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `PackageServiceError::Storage` if repository access fails.
    pub async fn get_package(&self, id: PackageId) -> Result<Option<Package>, PackageServiceError> {
        Ok(self.packages.get_package(id).await?)
    }

    /// Delete a package and every question in it.
    ///
    /// # Errors
    ///
    /// Returns `PackageServiceError::Storage` (`NotFound` included) on failure.
    pub async fn delete_package(&self, id: PackageId) -> Result<(), PackageServiceError> {
        self.packages.delete_package(id).await?;
        tracing::info!(package_id = %id, "package deleted");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `PackageServiceError::Storage` if repository access fails.
    pub async fn stats(&self) -> Result<PackageStats, PackageServiceError> {
        let packages = self.packages.list_packages().await?;
        let total_questions = self.questions.count_questions().await?;
        Ok(PackageStats {
            total_packages: packages.len(),
            active_packages: packages.iter().filter(|p| p.is_active()).count(),
            total_questions,
        })
    }
}
