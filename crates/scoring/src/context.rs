//! Per-request view of a user and their project.
//!
//! A `ScoringContext` is built once per scoring pass and dropped afterwards.
//! Reference rows are fetched lazily and cached for the lifetime of the
//! context only, so two contexts never share cached data.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use advisor_backend_catalog::TrainingCatalog;
use advisor_features::age_in;
use advisor_filters::FilterTarget;
use advisor_model::{
    Association, CityLocation, Frustration, HiringCities, JobBoard, JobGroupInfo, LocalDiagnosis,
    Project, SpecificToJobAdvice, Training, UserProfile, VolunteeringMissions,
};
use advisor_store::{Collection, ReferenceStore};
use chrono::{DateTime, Datelike, Utc};
use serde::de::DeserializeOwned;

use crate::error::ScoringError;

/// Lookups already done, keyed by lookup key. Failed lookups are not kept.
struct Memo<T> {
    entries: RefCell<HashMap<String, Option<Rc<T>>>>,
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
        }
    }
}

impl<T> Memo<T> {
    fn get_or_fetch(
        &self,
        key: &str,
        fetch: impl FnOnce() -> Result<Option<T>, ScoringError>,
    ) -> Result<Option<Rc<T>>, ScoringError> {
        let cached = self.entries.borrow().get(key).cloned();
        if let Some(hit) = cached {
            return Ok(hit);
        }

        let value = fetch()?.map(Rc::new);
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.clone());
        Ok(value)
    }
}

#[derive(Default)]
struct Caches {
    job_group_info: Memo<JobGroupInfo>,
    local_diagnosis: Memo<LocalDiagnosis>,
    hiring_cities: Memo<HiringCities>,
    cities: Memo<CityLocation>,
    volunteering_missions: Memo<VolunteeringMissions>,
    associations: Memo<Vec<Association>>,
    job_boards: Memo<Vec<JobBoard>>,
    specific_to_job_advice: Memo<Vec<SpecificToJobAdvice>>,
    trainings: Memo<Vec<Training>>,
}

/// Everything a scoring model may look at.
pub struct ScoringContext<'a> {
    user: &'a UserProfile,
    project: &'a Project,
    store: &'a dyn ReferenceStore,
    catalog: &'a dyn TrainingCatalog,
    now: DateTime<Utc>,
    caches: Caches,
}

impl<'a> ScoringContext<'a> {
    pub fn new(
        user: &'a UserProfile,
        project: &'a Project,
        store: &'a dyn ReferenceStore,
        catalog: &'a dyn TrainingCatalog,
    ) -> Self {
        Self {
            user,
            project,
            store,
            catalog,
            now: Utc::now(),
            caches: Caches::default(),
        }
    }

    /// Pin the current time, for reproducible scores.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn user(&self) -> &UserProfile {
        self.user
    }

    pub fn project(&self) -> &Project {
        self.project
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Age the user reaches this year.
    pub fn user_age(&self) -> i32 {
        age_in(self.user.year_of_birth, self.now.year())
    }

    pub fn has_frustration(&self, frustration: Frustration) -> bool {
        self.user.frustrations.contains(&frustration)
    }

    pub fn is_feature_enabled(&self, feature: &str) -> bool {
        self.user.features_enabled.contains(feature)
    }

    pub fn rome_id(&self) -> &str {
        &self.project.target_job.job_group.rome_id
    }

    pub fn job_code(&self) -> &str {
        &self.project.target_job.code_ogr
    }

    pub fn departement_id(&self) -> &str {
        &self.project.mobility.city.departement_id
    }

    pub fn city_id(&self) -> &str {
        &self.project.mobility.city.city_id
    }

    fn fetch_row<T: DeserializeOwned>(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<Option<T>, ScoringError> {
        if key.is_empty() {
            return Ok(None);
        }
        tracing::debug!(store = self.store.name(), collection = %collection, key, "Fetching reference row");

        let Some(document) = self.store.get(collection, key)? else {
            return Ok(None);
        };
        serde_json::from_value(document)
            .map(Some)
            .map_err(|e| ScoringError::Decode {
                collection,
                message: e.to_string(),
            })
    }

    fn fetch_all<T: DeserializeOwned>(&self, collection: Collection) -> Result<Option<Vec<T>>, ScoringError> {
        tracing::debug!(store = self.store.name(), collection = %collection, "Fetching reference collection");

        self.store
            .find_all(collection)?
            .into_iter()
            .map(|document| {
                serde_json::from_value(document).map_err(|e| ScoringError::Decode {
                    collection,
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<T>, _>>()
            .map(Some)
    }

    /// Info about a job group, `None` when the store has nothing about it.
    pub fn job_group_info_for(&self, rome_id: &str) -> Result<Option<Rc<JobGroupInfo>>, ScoringError> {
        self.caches
            .job_group_info
            .get_or_fetch(rome_id, || self.fetch_row(Collection::JobGroupInfo, rome_id))
    }

    /// Info about the targeted job group.
    pub fn job_group_info(&self) -> Result<Option<Rc<JobGroupInfo>>, ScoringError> {
        self.job_group_info_for(self.rome_id())
    }

    /// Local diagnosis of the targeted job group in the user's departement.
    pub fn local_diagnosis(&self) -> Result<Option<Rc<LocalDiagnosis>>, ScoringError> {
        if self.departement_id().is_empty() || self.rome_id().is_empty() {
            return Ok(None);
        }
        let key = LocalDiagnosis::key(self.departement_id(), self.rome_id());
        self.caches
            .local_diagnosis
            .get_or_fetch(&key, || self.fetch_row(Collection::LocalDiagnosis, &key))
    }

    pub fn hiring_cities(&self) -> Result<Option<Rc<HiringCities>>, ScoringError> {
        let rome_id = self.rome_id();
        self.caches
            .hiring_cities
            .get_or_fetch(rome_id, || self.fetch_row(Collection::HiringCities, rome_id))
    }

    /// Geocode of the user's home city.
    pub fn home_city(&self) -> Result<Option<Rc<CityLocation>>, ScoringError> {
        let city_id = self.city_id();
        self.caches
            .cities
            .get_or_fetch(city_id, || self.fetch_row(Collection::Cities, city_id))
    }

    pub fn volunteering_missions(&self) -> Result<Option<Rc<VolunteeringMissions>>, ScoringError> {
        let departement_id = self.departement_id();
        self.caches.volunteering_missions.get_or_fetch(departement_id, || {
            self.fetch_row(Collection::VolunteeringMissions, departement_id)
        })
    }

    pub fn associations(&self) -> Result<Rc<Vec<Association>>, ScoringError> {
        self.caches
            .associations
            .get_or_fetch("", || self.fetch_all(Collection::Associations))
            .map(Option::unwrap_or_default)
    }

    pub fn job_boards(&self) -> Result<Rc<Vec<JobBoard>>, ScoringError> {
        self.caches
            .job_boards
            .get_or_fetch("", || self.fetch_all(Collection::JobBoards))
            .map(Option::unwrap_or_default)
    }

    pub fn specific_to_job_advice(&self) -> Result<Rc<Vec<SpecificToJobAdvice>>, ScoringError> {
        self.caches
            .specific_to_job_advice
            .get_or_fetch("", || self.fetch_all(Collection::SpecificToJobAdvice))
            .map(Option::unwrap_or_default)
    }

    /// Trainings for the targeted job group in the user's departement.
    ///
    /// Catalog failures are returned to the caller.
    pub fn trainings(&self) -> Result<Rc<Vec<Training>>, ScoringError> {
        let key = format!("{}:{}", self.rome_id(), self.departement_id());
        self.caches
            .trainings
            .get_or_fetch(&key, || {
                tracing::debug!(catalog = self.catalog.name(), key = %key, "Fetching trainings");
                Ok(Some(
                    self.catalog
                        .get_trainings(self.rome_id(), self.departement_id())?,
                ))
            })
            .map(Option::unwrap_or_default)
    }
}

impl FilterTarget for ScoringContext<'_> {
    fn departement_id(&self) -> &str {
        ScoringContext::departement_id(self)
    }

    fn rome_id(&self) -> &str {
        ScoringContext::rome_id(self)
    }

    fn job_code(&self) -> &str {
        ScoringContext::job_code(self)
    }

    fn has_feature(&self, feature: &str) -> bool {
        self.is_feature_enabled(feature)
    }
}
