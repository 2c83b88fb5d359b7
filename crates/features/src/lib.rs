//! Feature extraction for advice scoring.
//!
//! Provides pure functions over reference rows used by the scoring models:
//! - Great-circle distance between geocoded cities
//! - Ranking of hiring channels inside each sub-market
//! - Age from a birth year

use std::cmp::Ordering;
use std::collections::BTreeMap;

use advisor_model::{ApplicationMode, ModalHistogram};

/// Mean radius of the Earth, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers between two (latitude, longitude) points.
pub fn distance_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lon2) = (to.0.to_radians(), to.1.to_radians());

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;
    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
}

/// Age reached during `current_year` by someone born in `year_of_birth`.
pub fn age_in(year_of_birth: i32, current_year: i32) -> i32 {
    current_year - year_of_birth
}

/// Position (0 = most used) of a channel in one sub-market.
///
/// Percentages are compared with each other only: the list does not need to
/// be sorted nor to sum to 100.
pub fn mode_rank(histogram: &ModalHistogram, mode: ApplicationMode) -> Option<usize> {
    let mut modes: Vec<_> = histogram.modes.iter().collect();
    modes.sort_by(|a, b| {
        b.percentage
            .partial_cmp(&a.percentage)
            .unwrap_or(Ordering::Equal)
    });
    modes.iter().position(|m| m.mode == mode)
}

/// Rank of one channel across all the sub-markets of a job group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeRanking {
    /// One entry per sub-market, `None` when the channel is not listed there
    pub ranks: Vec<Option<usize>>,
}

impl ModeRanking {
    pub fn compute(modes: &BTreeMap<String, ModalHistogram>, mode: ApplicationMode) -> Self {
        Self {
            ranks: modes
                .values()
                .map(|histogram| mode_rank(histogram, mode))
                .collect(),
        }
    }

    /// No sub-market data at all.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// At least one sub-market lists the channel in its top `n`.
    pub fn in_top_of_any(&self, n: usize) -> bool {
        self.ranks.iter().any(|rank| matches!(rank, Some(r) if *r < n))
    }

    /// Every sub-market lists the channel in its top `n`.
    pub fn in_top_of_all(&self, n: usize) -> bool {
        !self.is_empty() && self.ranks.iter().all(|rank| matches!(rank, Some(r) if *r < n))
    }
}
