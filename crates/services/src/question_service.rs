use std::sync::Arc;

use psikotes_core::model::{PackageId, Question, QuestionDraft, QuestionId};
use storage::StorageError;
use storage::repository::QuestionRepository;

use crate::error::QuestionServiceError;

/// Question CRUD for the manage-questions page.
#[derive(Clone)]
pub struct QuestionService {
    questions: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    /// Questions of a package in test order.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if repository access fails.
    pub async fn list_for_package(
        &self,
        package_id: PackageId,
    ) -> Result<Vec<Question>, QuestionServiceError> {
        Ok(self.questions.list_questions(package_id).await?)
    }

    /// # Errors
    ///
    /// Returns `QuestionServiceError::Question` when the form is incomplete and
    /// `QuestionServiceError::Storage` if the package is missing or storage fails.
    pub async fn add_question(
        &self,
        package_id: PackageId,
        draft: QuestionDraft,
    ) -> Result<QuestionId, QuestionServiceError> {
        let validated = draft.validate()?;
        let id = self
            .questions
            .insert_new_question(package_id, validated)
            .await?;
        tracing::info!(package_id = %package_id, question_id = %id, "question added");
        Ok(id)
    }

    /// Replace the contents of an existing question, keeping its id and package.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Question` when the form is incomplete and
    /// `QuestionServiceError::Storage` (`NotFound` included) otherwise.
    pub async fn update_question(
        &self,
        id: QuestionId,
        draft: QuestionDraft,
    ) -> Result<Question, QuestionServiceError> {
        let validated = draft.validate()?;
        let existing = self
            .questions
            .get_question(id)
            .await?
            .ok_or(StorageError::NotFound)?;

        let updated = validated.assign_id(id, existing.package_id());
        self.questions.update_question(&updated).await?;
        tracing::info!(question_id = %id, "question updated");
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` (`NotFound` included) on failure.
    pub async fn delete_question(&self, id: QuestionId) -> Result<(), QuestionServiceError> {
        self.questions.delete_question(id).await?;
        tracing::info!(question_id = %id, "question deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use psikotes_core::model::{OptionCode, PackageDraft, QuestionError};
    use psikotes_core::time::fixed_now;
    use storage::repository::{InMemoryRepository, PackageRepository};

    async fn setup() -> (QuestionService, PackageId) {
        let repo = InMemoryRepository::new();
        let package_id = repo
            .insert_new_package(
                PackageDraft {
                    name: "Paket".into(),
                    description: "desc".into(),
                    ..PackageDraft::default()
                }
                .validate(fixed_now())
                .unwrap(),
            )
            .await
            .unwrap();
        (QuestionService::new(Arc::new(repo)), package_id)
    }

    #[tokio::test]
    async fn add_requires_complete_form() {
        let (svc, package_id) = setup().await;
        let err = svc
            .add_question(package_id, QuestionDraft::new("Q?", ["a", "", "c", "d"], Some(OptionCode::A)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            QuestionServiceError::Question(QuestionError::EmptyOption(OptionCode::B))
        ));
        assert!(svc.list_for_package(package_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_keeps_id_and_package() {
        let (svc, package_id) = setup().await;
        let id = svc
            .add_question(package_id, QuestionDraft::new("Lama", ["a", "b", "c", "d"], Some(OptionCode::A)))
            .await
            .unwrap();

        let updated = svc
            .update_question(id, QuestionDraft::new("Baru", ["a", "b", "c", "d"], Some(OptionCode::D)))
            .await
            .unwrap();
        assert_eq!(updated.id(), id);
        assert_eq!(updated.package_id(), package_id);

        let listed = svc.list_for_package(package_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].prompt(), "Baru");
        assert_eq!(listed[0].correct(), OptionCode::D);
    }

    #[tokio::test]
    async fn update_and_delete_missing_question_fail() {
        let (svc, _) = setup().await;
        let missing = QuestionId::new(99);
        assert!(matches!(
            svc.update_question(missing, QuestionDraft::new("Q", ["a", "b", "c", "d"], Some(OptionCode::A)))
                .await,
            Err(QuestionServiceError::Storage(StorageError::NotFound))
        ));
        assert!(matches!(
            svc.delete_question(missing).await,
            Err(QuestionServiceError::Storage(StorageError::NotFound))
        ));
    }
}
