use psikotes_core::model::{PackageId, Question, QuestionId, ValidatedQuestion};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{
    conn, id_to_i64, map_question_row, option_columns, question_id_from_i64, ser,
};
use crate::repository::{QuestionRepository, StorageError};

const SELECT_COLUMNS: &str =
    "SELECT id, package_id, prompt, option_a, option_b, option_c, option_d, correct FROM questions";

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn insert_new_question(
        &self,
        package_id: PackageId,
        question: ValidatedQuestion,
    ) -> Result<QuestionId, StorageError> {
        let package = id_to_i64("package_id", package_id.value())?;
        let exists = sqlx::query("SELECT 1 FROM packages WHERE id = ?1")
            .bind(package)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;
        if exists.is_none() {
            return Err(StorageError::NotFound);
        }

        let [a, b, c, d] = option_columns(&question.options);
        let res = sqlx::query(
            r"
            INSERT INTO questions (package_id, prompt, option_a, option_b, option_c, option_d, correct)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(package)
        .bind(question.prompt)
        .bind(a)
        .bind(b)
        .bind(c)
        .bind(d)
        .bind(question.correct.as_str())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        question_id_from_i64(res.last_insert_rowid())
    }

    async fn update_question(&self, question: &Question) -> Result<(), StorageError> {
        let [a, b, c, d] = option_columns(question.options());
        let res = sqlx::query(
            r"
            UPDATE questions
            SET prompt = ?2, option_a = ?3, option_b = ?4, option_c = ?5, option_d = ?6, correct = ?7
            WHERE id = ?1
            ",
        )
        .bind(id_to_i64("question_id", question.id().value())?)
        .bind(question.prompt())
        .bind(a)
        .bind(b)
        .bind(c)
        .bind(d)
        .bind(question.correct().as_str())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM questions WHERE id = ?1")
            .bind(id_to_i64("question_id", id.value())?)
            .execute(&self.pool)
            .await
            .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .bind(id_to_i64("question_id", id.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        row.as_ref().map(map_question_row).transpose()
    }

    async fn list_questions(&self, package_id: PackageId) -> Result<Vec<Question>, StorageError> {
        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} WHERE package_id = ?1 ORDER BY id ASC"
        ))
        .bind(id_to_i64("package_id", package_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_question_row).collect()
    }

    async fn count_questions(&self) -> Result<u64, StorageError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM questions")
            .fetch_one(&self.pool)
            .await
            .map_err(conn)?;
        let total: i64 = row.try_get("total").map_err(ser)?;
        u64::try_from(total).map_err(ser)
    }
}
