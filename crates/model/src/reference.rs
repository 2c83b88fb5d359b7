//! Schema of the read-only reference collections.
//!
//! Rows are stored as loosely-typed documents; these structs are what the
//! accessors decode them into. Fields the store may omit are `Option`s or
//! default to empty collections, so that "no data" never reads as a zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Ids are strings, but some collections were imported with numeric ones.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(id: StringOrNumber) -> Self {
        match id {
            StringOrNumber::String(id) => id,
            StringOrNumber::Number(id) => id.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(String::from))
}

/// Channel through which candidates get hired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationMode {
    UndefinedApplicationMode,
    SpontaneousApplication,
    PlacementAgency,
    PersonalOrProfessionalContacts,
    #[serde(other)]
    OtherChannels,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModePercentage {
    pub percentage: f64,
    pub mode: ApplicationMode,
}

/// Breakdown of hiring channels for one sub-market (FAP code).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModalHistogram {
    #[serde(default)]
    pub modes: Vec<ModePercentage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(default)]
    pub code_ogr: String,

    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequirement {
    #[serde(default)]
    pub code_ogr: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Share of offers in the group suggesting this specific job
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_suggested: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequirements {
    #[serde(default)]
    pub specific_jobs: Vec<JobRequirement>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkEnvironmentKeywords {
    #[serde(default)]
    pub structures: Vec<String>,

    #[serde(default)]
    pub sectors: Vec<String>,
}

/// Everything we know about a job group. Keyed by ROME id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobGroupInfo {
    #[serde(rename = "_id", deserialize_with = "string_or_number")]
    pub rome_id: String,

    #[serde(default)]
    pub name: String,

    /// Hiring channels, keyed by sub-market code
    #[serde(default)]
    pub application_modes: BTreeMap<String, ModalHistogram>,

    #[serde(default)]
    pub jobs: Vec<Job>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<JobRequirements>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_environment_keywords: Option<WorkEnvironmentKeywords>,
}

/// Labor-market tension indicators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yearly_avg_offers_per_10_candidates: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yearly_avg_offers_denominator: Option<f64>,
}

/// Local diagnosis for a job group in a departement.
/// Keyed by `"<departement>:<rome id>"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalDiagnosis {
    #[serde(rename = "_id", deserialize_with = "string_or_number")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imt: Option<MarketStats>,
}

impl LocalDiagnosis {
    pub fn key(departement_id: &str, rome_id: &str) -> String {
        format!("{}:{}", departement_id, rome_id)
    }
}

/// Geocode of a city. Keyed by INSEE code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityLocation {
    #[serde(rename = "_id", deserialize_with = "string_or_number")]
    pub city_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
}

impl CityLocation {
    /// Coordinates as (latitude, longitude), when both are known.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoCity {
    #[serde(
        default,
        deserialize_with = "optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub city_id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HiringCity {
    #[serde(default)]
    pub offers: u32,

    #[serde(default)]
    pub city: GeoCity,
}

/// Cities hiring the most for a job group. Keyed by ROME id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiringCities {
    #[serde(rename = "_id", deserialize_with = "string_or_number")]
    pub rome_id: String,

    #[serde(default)]
    pub hiring_cities: Vec<HiringCity>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Association {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(default)]
    pub filters: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteeringMission {
    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub association_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Volunteering missions available in a departement. Keyed by departement id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteeringMissions {
    #[serde(rename = "_id", deserialize_with = "string_or_number")]
    pub departement_id: String,

    #[serde(default)]
    pub missions: Vec<VolunteeringMission>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobBoard {
    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Boards everybody already knows about
    #[serde(default)]
    pub is_well_known: bool,

    #[serde(default)]
    pub filters: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificToJobAdvice {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub card_text: String,

    #[serde(default)]
    pub expanded_card_header: String,

    #[serde(default)]
    pub expanded_card_items: Vec<String>,

    #[serde(default)]
    pub filters: Vec<String>,
}
