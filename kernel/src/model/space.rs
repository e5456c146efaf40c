use rust_decimal::Decimal;

use crate::model::id::SpaceId;

/// Read-only view of a bookable space. The catalog collaborator owns the
/// full record; the scheduling core only needs the rate and availability.
#[derive(Debug, Clone)]
pub struct Space {
    pub space_id: SpaceId,
    pub space_name: String,
    pub hourly_rate: Decimal,
    pub is_active: bool,
}
