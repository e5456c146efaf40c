use crate::model::{period::Period, reservation::Reservation};

/// Returns the reservations whose periods overlap the proposed one.
///
/// Only active reservations (PENDING or CONFIRMED) block a booking;
/// cancelled and completed ones are dropped from the comparison set even if
/// the caller passes them in. Pure over its inputs, safe to call repeatedly.
pub fn find_conflicts<'a>(period: &Period, existing: &'a [Reservation]) -> Vec<&'a Reservation> {
    existing
        .iter()
        .filter(|r| r.status.is_active() && r.period.overlaps(period))
        .collect()
}

pub fn has_conflict(period: &Period, existing: &[Reservation]) -> bool {
    !find_conflicts(period, existing).is_empty()
}
