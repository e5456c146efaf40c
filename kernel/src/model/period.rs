use chrono::{DateTime, Utc};
use shared::error::{AppError, AppResult};

/// Half-open booking interval `[start, end)`.
///
/// The constructor rejects empty and inverted intervals, so any `Period`
/// reachable by the scheduling core satisfies `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Period {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<Self> {
        if start >= end {
            return Err(AppError::ValidationError(format!(
                "end time ({end}) must be after start time ({start})"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Half-open overlap test: `[s1, e1)` and `[s2, e2)` collide iff
    /// `s1 < e2 && s2 < e1`. Touching endpoints do not collide.
    pub fn overlaps(&self, other: &Period) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, hour, min, 0).unwrap()
    }

    #[test]
    fn rejects_empty_and_inverted_intervals() {
        assert!(Period::new(at(10, 0), at(10, 0)).is_err());
        assert!(Period::new(at(12, 0), at(10, 0)).is_err());
        assert!(Period::new(at(10, 0), at(10, 1)).is_ok());
    }

    #[test]
    fn overlap_is_half_open() {
        let booked = Period::new(at(10, 0), at(12, 0)).unwrap();

        // Straddling the booked end.
        assert!(booked.overlaps(&Period::new(at(11, 0), at(13, 0)).unwrap()));
        // Fully contained.
        assert!(booked.overlaps(&Period::new(at(10, 30), at(11, 30)).unwrap()));
        // Containing the booked period.
        assert!(booked.overlaps(&Period::new(at(9, 0), at(13, 0)).unwrap()));
        // Back to back is not a conflict.
        assert!(!booked.overlaps(&Period::new(at(12, 0), at(13, 0)).unwrap()));
        assert!(!booked.overlaps(&Period::new(at(9, 0), at(10, 0)).unwrap()));
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = Period::new(at(10, 0), at(12, 0)).unwrap();
        let b = Period::new(at(11, 0), at(13, 0)).unwrap();
        assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    fn any_period() -> impl Strategy<Value = Period> {
        // Offsets in seconds within a two-year window, lengths up to a week.
        (0i64..63_072_000, 1i64..604_800).prop_map(|(offset, len)| {
            let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + Duration::seconds(offset);
            Period::new(start, start + Duration::seconds(len)).unwrap()
        })
    }

    proptest! {
        #[test]
        fn overlap_matches_the_half_open_formula_for_random_intervals(
            a in any_period(),
            b in any_period(),
        ) {
            let expected = a.start() < b.end() && b.start() < a.end();
            prop_assert_eq!(a.overlaps(&b), expected);
            prop_assert_eq!(b.overlaps(&a), expected);
        }

        #[test]
        fn a_period_always_overlaps_itself(p in any_period()) {
            prop_assert!(p.overlaps(&p));
        }
    }
}
