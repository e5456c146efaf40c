use derive_new::new;
use rust_decimal::Decimal;

use crate::model::{
    id::{SpaceId, UserId},
    period::Period,
};

/// Persistence command produced by the scheduling facade once validation,
/// conflict checking and pricing have all passed.
#[derive(Debug, new)]
pub struct CreateReservation {
    pub space_id: SpaceId,
    pub user_id: UserId,
    pub period: Period,
    pub total_price: Decimal,
    pub notes: Option<String>,
}
