use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{id::SpaceId, space::Space};

/// Read-only access to the space catalog. The scheduling core never mutates
/// space data.
#[async_trait]
pub trait SpaceRepository: Send + Sync {
    async fn find_by_id(&self, space_id: SpaceId) -> AppResult<Option<Space>>;
}
