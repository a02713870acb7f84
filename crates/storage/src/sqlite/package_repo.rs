use psikotes_core::model::{Package, PackageId, ValidatedPackage};

use super::SqliteRepository;
use super::mapping::{
    conn, difficulty_to_str, id_to_i64, map_package_row, package_id_from_i64, status_to_str,
};
use crate::repository::{PackageRepository, StorageError};

#[async_trait::async_trait]
impl PackageRepository for SqliteRepository {
    async fn insert_new_package(
        &self,
        package: ValidatedPackage,
    ) -> Result<PackageId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO packages (name, description, duration_minutes, difficulty, status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(package.name)
        .bind(package.description)
        .bind(package.duration_minutes.map(i64::from))
        .bind(package.difficulty.map(difficulty_to_str))
        .bind(status_to_str(package.status))
        .bind(package.created_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        package_id_from_i64(res.last_insert_rowid())
    }

    async fn get_package(&self, id: PackageId) -> Result<Option<Package>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, name, description, duration_minutes, difficulty, status, created_at
            FROM packages WHERE id = ?1
            ",
        )
        .bind(id_to_i64("package_id", id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_package_row).transpose()
    }

    async fn list_packages(&self) -> Result<Vec<Package>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, name, description, duration_minutes, difficulty, status, created_at
            FROM packages
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_package_row).collect()
    }

    async fn delete_package(&self, id: PackageId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM packages WHERE id = ?1")
            .bind(id_to_i64("package_id", id.value())?)
            .execute(&self.pool)
            .await
            .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
