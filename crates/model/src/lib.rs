//! Core domain model for the advice scoring engine.
//!
//! This crate defines the fundamental types used throughout the system:
//! - `UserProfile`: who the job seeker is
//! - `Project`: the job search they are running
//! - `Training`: an entry of the external training catalog
//! - `reference`: schema structs for the read-only reference collections

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub mod reference;

pub use reference::*;

/// Highest diploma obtained, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DegreeLevel {
    #[default]
    UnknownDegree,
    NoDegree,
    CapBep,
    BacBacpro,
    BtsDutDeug,
    LicenceMaitrise,
    DeaDessMasterPhd,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FamilySituation {
    #[default]
    UnknownFamilySituation,
    Single,
    InCouple,
    FamilyWithKids,
}

/// Things the job seeker reported as blocking their search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frustration {
    NoOffers,
    NoOfferAnswers,
    Resume,
    Interview,
    Training,
    Motivation,
    TimeManagement,
    ExperienceMissing,
    AgeDiscrimination,
    SexDiscrimination,
    Handicap,
    /// Any tag this engine does not know about
    #[serde(other)]
    Other,
}

/// The job seeker's profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub year_of_birth: i32,

    #[serde(default)]
    pub highest_degree: DegreeLevel,

    #[serde(default)]
    pub family_situation: FamilySituation,

    #[serde(default)]
    pub has_handicap: bool,

    #[serde(default)]
    pub frustrations: BTreeSet<Frustration>,

    /// Experimental features enabled for this user
    #[serde(default)]
    pub features_enabled: BTreeSet<String>,
}

/// How far the user is willing to go, ordered from narrowest to widest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AreaType {
    #[default]
    UnknownAreaType,
    City,
    Departement,
    Region,
    Country,
    World,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectKind {
    #[default]
    UnknownProjectKind,
    FindAJob,
    Reorientation,
    FindAFirstJob,
    FindAnotherJob,
}

impl ProjectKind {
    /// Whether the user told us they are open to change their target job.
    pub fn is_open_to_reorientation(self) -> bool {
        matches!(self, Self::Reorientation)
    }
}

/// Weekly volume buckets, used for both applications sent and offers seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NumberOfferEstimate {
    #[default]
    #[serde(rename = "UNKNOWN_NUMBER_ESTIMATE_OPTION")]
    Unknown,
    #[serde(rename = "LESS_THAN_2")]
    LessThan2,
    #[serde(rename = "SOME")]
    SomeAmount,
    #[serde(rename = "DECENT_AMOUNT")]
    DecentAmount,
    #[serde(rename = "A_LOT")]
    ALot,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrainingFulfillment {
    #[default]
    UnknownTrainingFulfillment,
    TrainingFulfillmentNotSure,
    CurrentlyInTraining,
    EnoughDiplomas,
    EnoughExperience,
    NoTraining,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Seniority {
    #[default]
    UnknownSeniority,
    Junior,
    Intermediary,
    Senior,
    Expert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "CDI")]
    Cdi,
    #[serde(rename = "CDD_OVER_3_MONTHS")]
    CddOver3Months,
    #[serde(rename = "CDD_LESS_EQUAL_3_MONTHS")]
    CddLessEqual3Months,
    #[serde(rename = "INTERIM")]
    Interim,
    #[serde(rename = "INTERNSHIP")]
    Internship,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobGroupRef {
    #[serde(default)]
    pub rome_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The specific job the user targets, inside its job group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetJob {
    #[serde(default)]
    pub job_group: JobGroupRef,

    /// OGR code of the specific job
    #[serde(default)]
    pub code_ogr: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeCity {
    /// INSEE code of the city
    #[serde(default)]
    pub city_id: String,

    #[serde(default)]
    pub departement_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mobility {
    #[serde(default)]
    pub city: HomeCity,

    #[serde(default)]
    pub area_type: AreaType,
}

/// An in-progress job-search project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub target_job: TargetJob,

    #[serde(default)]
    pub mobility: Mobility,

    #[serde(default)]
    pub kind: ProjectKind,

    #[serde(default)]
    pub job_search_length_months: i32,

    #[serde(default)]
    pub weekly_applications_estimate: NumberOfferEstimate,

    #[serde(default)]
    pub weekly_offers_estimate: NumberOfferEstimate,

    /// Interviews obtained so far, -1 when the user never applied
    #[serde(default)]
    pub total_interview_count: i32,

    /// 1 for a weak network, 2 for a good one, 3 for a strong one
    #[serde(default)]
    pub network_estimate: i32,

    #[serde(default)]
    pub training_fulfillment_estimate: TrainingFulfillment,

    #[serde(default)]
    pub seniority: Seniority,

    #[serde(default)]
    pub employment_types: Vec<EmploymentType>,
}

impl Project {
    /// Create a project targeting a specific job in a job group.
    pub fn for_job(rome_id: impl Into<String>, code_ogr: impl Into<String>) -> Self {
        Self {
            target_job: TargetJob {
                job_group: JobGroupRef {
                    rome_id: rome_id.into(),
                    name: None,
                },
                code_ogr: code_ogr.into(),
                name: None,
            },
            ..Default::default()
        }
    }

    pub fn with_city(
        mut self,
        city_id: impl Into<String>,
        departement_id: impl Into<String>,
        area_type: AreaType,
    ) -> Self {
        self.mobility = Mobility {
            city: HomeCity {
                city_id: city_id.into(),
                departement_id: departement_id.into(),
                name: None,
            },
            area_type,
        };
        self
    }

    /// Whether the user has ever sent an application.
    pub fn has_applied(&self) -> bool {
        self.total_interview_count >= 0
    }
}

/// A training session returned by the external catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Training {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
