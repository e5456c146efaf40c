use kernel::model::{id::SpaceId, space::Space};
use rust_decimal::Decimal;

#[derive(sqlx::FromRow)]
pub struct SpaceRow {
    pub space_id: SpaceId,
    pub space_name: String,
    pub hourly_rate: Decimal,
    pub is_active: bool,
}

impl From<SpaceRow> for Space {
    fn from(value: SpaceRow) -> Self {
        let SpaceRow {
            space_id,
            space_name,
            hourly_rate,
            is_active,
        } = value;
        Space {
            space_id,
            space_name,
            hourly_rate,
            is_active,
        }
    }
}
