//! Date-window sampling anchored to the configured reference date.
//!
//! Every timestamp in a run is expressed as an offset back from one
//! fixed anchor, so the whole corpus moves together when the anchor
//! changes and is byte-identical when it does not.

use crate::rng::StreamRng;
use chrono::{Duration, NaiveDate, NaiveDateTime};

pub const SECONDS_PER_DAY: u64 = 86_400;

#[derive(Debug, Clone, Copy)]
pub struct Timeline {
    /// End of the data window: reference date at 23:59:59.
    end: NaiveDateTime,
}

impl Timeline {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self {
            end: reference_date.and_hms_opt(23, 59, 59).expect("valid time"),
        }
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn days_back(&self, days: u64) -> NaiveDateTime {
        self.end - Duration::seconds((days * SECONDS_PER_DAY) as i64)
    }

    /// Uniform timestamp with second resolution in the window
    /// [`earliest_days_ago`, `latest_days_ago`] back from the anchor.
    pub fn sample_between(
        &self,
        rng: &mut StreamRng,
        earliest_days_ago: u64,
        latest_days_ago: u64,
    ) -> NaiveDateTime {
        assert!(earliest_days_ago >= latest_days_ago);
        let span = (earliest_days_ago - latest_days_ago) * SECONDS_PER_DAY;
        let offset = latest_days_ago * SECONDS_PER_DAY
            + if span == 0 { 0 } else { rng.next_u64_below(span) };
        self.end - Duration::seconds(offset as i64)
    }

    /// Recency-biased timestamp over a horizon: 60% within the last 90
    /// days, 30% within 90-180, the rest spread to the horizon.
    pub fn sample_recency_biased(&self, rng: &mut StreamRng, horizon_days: u64) -> NaiveDateTime {
        let horizon = horizon_days.max(1);
        let bucket = rng.weighted_index(&[0.60, 0.30, 0.10]);
        let (earliest, latest) = match bucket {
            0 => (horizon.min(90), 0),
            1 if horizon > 90 => (horizon.min(180), 90),
            _ if horizon > 180 => (horizon, 180),
            _ => (horizon, 0),
        };
        self.sample_between(rng, earliest, latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, StreamSlot};

    fn timeline() -> Timeline {
        Timeline::new(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap())
    }

    #[test]
    fn samples_stay_inside_the_window() {
        let tl = timeline();
        let mut rng = RngBank::new(1).for_stream(StreamSlot::Transaction);
        for _ in 0..5_000 {
            let ts = tl.sample_between(&mut rng, 90, 0);
            assert!(ts <= tl.end());
            assert!(ts >= tl.days_back(90));
        }
    }

    #[test]
    fn recency_bias_prefers_recent_days() {
        let tl = timeline();
        let mut rng = RngBank::new(2).for_stream(StreamSlot::Transaction);
        let cutoff = tl.days_back(90);
        let recent = (0..10_000)
            .filter(|_| tl.sample_recency_biased(&mut rng, 396) >= cutoff)
            .count();
        assert!(recent > 5_000, "expected recency bias, got {recent}/10000");
    }
}
