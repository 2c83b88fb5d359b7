//! "Look for jobs in nearby cities" advice.

use std::cmp::Ordering;

use advisor_features::distance_km;
use advisor_model::{AreaType, HiringCity};
use serde::Serialize;

use super::{AdviceModel, ExtraData};
use crate::context::ScoringContext;
use crate::error::ScoringError;

/// Farthest a city can be to be considered for a daily commute.
pub const MAX_COMMUTE_KM: f64 = 35.0;

/// Closer than this, a hiring city is the home city itself.
const SAME_CITY_KM: f64 = 1.0;

/// Distance at which a city's offers count for half in the ranking.
const RANKING_DISTANCE_KM: f64 = 10.0;

/// A city is a super commute when it has this many times more offers per
/// inhabitant than the home city.
const SUPER_COMMUTE_RATIO: f64 = 2.0;

const MAX_EXTRA_CITIES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommutingCity {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    pub offers: u32,
    pub distance_km: f64,
    /// Offers per inhabitant compared to the home city, when the home city
    /// has any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_offers_per_inhabitant: Option<f64>,
}

impl CommutingCity {
    fn ranking_weight(&self) -> f64 {
        self.offers as f64 / (1.0 + self.distance_km / RANKING_DISTANCE_KM)
    }

    /// Only a city compared to a home market with known offers per
    /// inhabitant can be a super commute.
    fn is_super_commute(&self) -> bool {
        self.relative_offers_per_inhabitant
            .is_some_and(|ratio| ratio >= SUPER_COMMUTE_RATIO)
    }
}

fn offers_per_inhabitant(city: &HiringCity) -> Option<f64> {
    match city.city.population {
        Some(population) if population > 0 => Some(city.offers as f64 / population as f64),
        _ => None,
    }
}

/// What the home city looks like among the hiring cities.
struct HomeMarket {
    offers: u32,
    offers_per_inhabitant: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommuteModel;

impl CommuteModel {
    /// Hiring cities within commuting distance, best first.
    fn commuting_cities(&self, context: &ScoringContext<'_>) -> Result<(HomeMarket, Vec<CommutingCity>), ScoringError> {
        let mut home_market = HomeMarket {
            offers: 0,
            offers_per_inhabitant: None,
        };
        let Some(home) = context.home_city()? else {
            return Ok((home_market, Vec::new()));
        };
        let Some(home_coordinates) = home.coordinates() else {
            tracing::debug!(city_id = %home.city_id, "Home city has no geocode");
            return Ok((home_market, Vec::new()));
        };
        let Some(hiring) = context.hiring_cities()? else {
            return Ok((home_market, Vec::new()));
        };

        let mut candidates = Vec::new();
        for hiring_city in &hiring.hiring_cities {
            let (Some(latitude), Some(longitude)) = (hiring_city.city.latitude, hiring_city.city.longitude) else {
                continue;
            };
            let distance = distance_km(home_coordinates, (latitude, longitude));
            let is_home = hiring_city.city.city_id.as_deref() == Some(home.city_id.as_str())
                || distance < SAME_CITY_KM;
            if is_home {
                home_market = HomeMarket {
                    offers: hiring_city.offers,
                    offers_per_inhabitant: offers_per_inhabitant(hiring_city),
                };
                continue;
            }
            if distance > MAX_COMMUTE_KM {
                continue;
            }
            candidates.push((hiring_city, distance));
        }

        let mut cities: Vec<CommutingCity> = candidates
            .into_iter()
            .map(|(hiring_city, distance)| CommutingCity {
                name: hiring_city.city.name.clone(),
                latitude: hiring_city.city.latitude.unwrap_or_default(),
                longitude: hiring_city.city.longitude.unwrap_or_default(),
                population: hiring_city.city.population,
                offers: hiring_city.offers,
                distance_km: distance,
                relative_offers_per_inhabitant: match (
                    offers_per_inhabitant(hiring_city),
                    home_market.offers_per_inhabitant,
                ) {
                    (Some(city), Some(home)) if home > 0.0 => Some(city / home),
                    _ => None,
                },
            })
            .collect();

        cities.sort_by(|a, b| {
            b.ranking_weight()
                .partial_cmp(&a.ranking_weight())
                .unwrap_or(Ordering::Equal)
        });

        Ok((home_market, cities))
    }
}

impl AdviceModel for CommuteModel {
    fn score(&self, context: &ScoringContext<'_>) -> Result<i32, ScoringError> {
        let (home_market, cities) = self.commuting_cities(context)?;
        if cities.is_empty() {
            return Ok(0);
        }

        let is_mobile = context.project().mobility.area_type >= AreaType::Departement;
        if is_mobile && cities.iter().any(CommutingCity::is_super_commute) {
            return Ok(3);
        }
        if cities.iter().any(|city| city.offers > home_market.offers) {
            return Ok(2);
        }
        Ok(1)
    }

    fn compute_extra_data(&self, context: &ScoringContext<'_>) -> Result<Option<ExtraData>, ScoringError> {
        let (_, mut cities) = self.commuting_cities(context)?;
        if cities.is_empty() {
            return Ok(None);
        }
        cities.truncate(MAX_EXTRA_CITIES);
        Ok(Some(ExtraData::Commute { cities }))
    }
}
