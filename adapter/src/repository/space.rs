use async_trait::async_trait;
use derive_new::new;
use kernel::model::{id::SpaceId, space::Space};
use kernel::repository::space::SpaceRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::space::SpaceRow, ConnectionPool};

#[derive(new)]
pub struct SpaceRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl SpaceRepository for SpaceRepositoryImpl {
    async fn find_by_id(&self, space_id: SpaceId) -> AppResult<Option<Space>> {
        let row: Option<SpaceRow> = sqlx::query_as(
            r#"
                SELECT
                    space_id,
                    space_name,
                    hourly_rate,
                    is_active
                FROM spaces
                WHERE space_id = $1
            "#,
        )
        .bind(space_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Space::from))
    }
}
