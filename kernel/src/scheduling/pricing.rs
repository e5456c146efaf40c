use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use shared::error::{AppError, AppResult};

const SECONDS_PER_HOUR: i64 = 3_600;

/// Total charge for renting at `hourly_rate` over `[start, end)`.
///
/// Fractional hours are charged pro rata; the result is rounded to currency
/// precision (2 decimal places, midpoint away from zero).
pub fn quote(hourly_rate: Decimal, start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<Decimal> {
    let seconds = (end - start).num_seconds();
    if seconds <= 0 {
        return Err(AppError::ValidationError(format!(
            "cannot price an empty interval ({start} >= {end})"
        )));
    }

    let hours = Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR);
    Ok((hourly_rate * hours).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}
