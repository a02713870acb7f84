use chrono::Utc;
use psikotes_core::model::Identity;

use super::SqliteRepository;
use super::mapping::{conn, map_user_row};
use crate::repository::{StorageError, UserRepository};

#[async_trait::async_trait]
impl UserRepository for SqliteRepository {
    async fn insert_user(&self, identity: &Identity) -> Result<(), StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO users (id, email, display_name, role, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(email) DO NOTHING
            ",
        )
        .bind(identity.id().as_uuid())
        .bind(identity.email())
        .bind(identity.display_name())
        .bind(identity.role().as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::Conflict);
        }
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, email, display_name, role
            FROM users WHERE email = ?1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_user_row).transpose()
    }
}
