//! Persona builders and reference fixtures shared by the unit tests.

use std::collections::BTreeMap;

use advisor_backend_catalog::{StaticCatalog, TrainingCatalog};
use advisor_model::{
    AreaType, DegreeLevel, EmploymentType, FamilySituation, Frustration, NumberOfferEstimate, Project,
    ProjectKind, Seniority, Training, TrainingFulfillment, UserProfile,
};
use advisor_store::{Collection, MemoryStore, ReferenceStore};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use crate::context::ScoringContext;
use crate::models::{AdviceModel, ExtraData};
use crate::registry::get_model;

/// Date every test context is pinned to.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2016, 9, 27, 12, 0, 0).unwrap()
}

/// A user and their project. Each call to a builder returns a fresh value.
#[derive(Debug, Clone)]
pub struct Persona {
    pub user: UserProfile,
    pub project: Project,
}

impl Default for Persona {
    /// An office worker in Lyon, a few months into their search.
    fn default() -> Self {
        let user = UserProfile {
            year_of_birth: 1985,
            highest_degree: DegreeLevel::BacBacpro,
            family_situation: FamilySituation::InCouple,
            ..Default::default()
        };
        let project = Project {
            kind: ProjectKind::FindAJob,
            job_search_length_months: 4,
            weekly_applications_estimate: NumberOfferEstimate::SomeAmount,
            weekly_offers_estimate: NumberOfferEstimate::SomeAmount,
            total_interview_count: 2,
            network_estimate: 1,
            training_fulfillment_estimate: TrainingFulfillment::TrainingFulfillmentNotSure,
            seniority: Seniority::Intermediary,
            employment_types: vec![EmploymentType::Cdi],
            ..Project::for_job("M1607", "15000").with_city("69123", "69", AreaType::Departement)
        };
        Self { user, project }
    }
}

impl Persona {
    pub fn born_in(mut self, year_of_birth: i32) -> Self {
        self.user.year_of_birth = year_of_birth;
        self
    }

    pub fn targeting(mut self, rome_id: &str, code_ogr: &str) -> Self {
        let Project { target_job, .. } = Project::for_job(rome_id, code_ogr);
        self.project.target_job = target_job;
        self
    }

    pub fn living_in(mut self, city_id: &str, departement_id: &str) -> Self {
        self.project.mobility.city.city_id = city_id.to_string();
        self.project.mobility.city.departement_id = departement_id.to_string();
        self
    }

    pub fn searching_for(mut self, months: i32) -> Self {
        self.project.job_search_length_months = months;
        self
    }

    pub fn with_kind(mut self, kind: ProjectKind) -> Self {
        self.project.kind = kind;
        self
    }

    pub fn with_frustration(mut self, frustration: Frustration) -> Self {
        self.user.frustrations.insert(frustration);
        self
    }

    pub fn context<'a>(
        &'a self,
        store: &'a dyn ReferenceStore,
        catalog: &'a dyn TrainingCatalog,
    ) -> ScoringContext<'a> {
        ScoringContext::new(&self.user, &self.project, store, catalog).with_now(now())
    }

    pub fn score(&self, advice_id: &str, store: &MemoryStore) -> i32 {
        self.score_with(advice_id, store, &StaticCatalog::empty())
    }

    pub fn score_with(&self, advice_id: &str, store: &dyn ReferenceStore, catalog: &dyn TrainingCatalog) -> i32 {
        let context = self.context(store, catalog);
        get_model(advice_id).unwrap().score(&context).unwrap()
    }

    pub fn extra_data(&self, advice_id: &str, store: &MemoryStore) -> Option<ExtraData> {
        let catalog = StaticCatalog::empty();
        let context = self.context(store, &catalog);
        get_model(advice_id).unwrap().compute_extra_data(&context).unwrap()
    }
}

/// Hiring cities around Lyon, Brindas being next to the test home city.
pub fn lyon_hiring_cities(rome_id: &str) -> Value {
    json!({
        "_id": rome_id,
        "hiringCities": [
            {"offers": 10, "city": {"name": "Brindas", "longitude": 4.6965532, "latitude": 45.7179675, "population": 10000}},
            {"offers": 40, "city": {"name": "Lyon", "longitude": 4.8363116, "latitude": 45.7640454, "population": 400000}},
            {"offers": 40, "city": {"name": "Saint-Priest", "longitude": 4.9123846, "latitude": 45.7013617, "population": 20000}},
            {"offers": 40, "city": {"name": "Vaulx-en-Velin", "longitude": 4.8892431, "latitude": 45.7775502, "population": 10000}},
        ],
    })
}

fn modes(ranked: [(&str, f64); 4]) -> Value {
    let modes: Vec<Value> = ranked
        .iter()
        .map(|(mode, percentage)| json!({"mode": mode, "percentage": percentage}))
        .collect();
    json!({"modes": modes})
}

/// A small snapshot of every reference collection.
pub fn reference_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.insert_many(
        Collection::JobGroupInfo,
        [
            json!({
                "_id": "D1102",
                "name": "Boulangerie - viennoiserie",
                "applicationModes": {"R4Z92": modes([
                    ("PERSONAL_OR_PROFESSIONAL_CONTACTS", 36.38),
                    ("SPONTANEOUS_APPLICATION", 29.46),
                    ("PLACEMENT_AGENCY", 18.38),
                    ("UNDEFINED_APPLICATION_MODE", 15.78),
                ])},
                "jobs": [
                    {"codeOgr": "10868", "name": "Boulanger"},
                    {"codeOgr": "12006", "name": "Chef boulanger"},
                ],
                "requirements": {"specificJobs": [
                    {"codeOgr": "10868", "percentSuggested": 60},
                    {"codeOgr": "12006", "percentSuggested": 20},
                ]},
                "workEnvironmentKeywords": {
                    "structures": ["Boulangerie artisanale", "Grande surface"],
                    "sectors": ["Alimentaire"],
                },
            }),
            json!({
                "_id": "M1607",
                "name": "Secrétariat",
                "applicationModes": {"R2Z83": modes([
                    ("UNDEFINED_APPLICATION_MODE", 40.0),
                    ("SPONTANEOUS_APPLICATION", 30.0),
                    ("PLACEMENT_AGENCY", 20.0),
                    ("PERSONAL_OR_PROFESSIONAL_CONTACTS", 10.0),
                ])},
                "jobs": [
                    {"codeOgr": "15000", "name": "Secrétaire"},
                    {"codeOgr": "15001", "name": "Assistant administratif"},
                ],
                "requirements": {"specificJobs": [
                    {"codeOgr": "15001", "percentSuggested": 80},
                    {"codeOgr": "15000", "percentSuggested": 10},
                ]},
                "workEnvironmentKeywords": {"structures": ["Cabinet"], "sectors": ["Services"]},
            }),
        ],
    );
    store.insert_one(Collection::HiringCities, lyon_hiring_cities("D1102"));
    store.insert_many(
        Collection::Cities,
        [
            json!({"_id": "69123", "latitude": 45.7179675, "longitude": 4.6965532}),
            json!({"_id": "75056", "name": "Paris", "latitude": 48.8566, "longitude": 2.3522}),
        ],
    );
    store.insert_many(
        Collection::LocalDiagnosis,
        [
            json!({"_id": "69:D1102", "imt": {"yearlyAvgOffersPer10Candidates": 0.5}}),
            json!({"_id": "75:M1607", "imt": {"yearlyAvgOffersPer10Candidates": 8}}),
        ],
    );
    store.insert_many(
        Collection::Associations,
        [
            json!({"name": "SNC"}),
            json!({"name": "Lyon Emploi", "filters": ["for-departement(69)"]}),
        ],
    );
    store.insert_one(
        Collection::VolunteeringMissions,
        json!({"_id": "69", "missions": [
            {"title": "Accompagnement scolaire", "associationName": "AFEV"},
            {"title": "Distribution alimentaire"},
        ]}),
    );
    store.insert_many(
        Collection::JobBoards,
        [
            json!({"title": "Remix Jobs"}),
            json!({"title": "Pôle emploi", "isWellKnown": true}),
            json!({"title": "Métiers de bouche", "filters": ["for-job-group(D11)"]}),
        ],
    );
    store.insert_one(
        Collection::SpecificToJobAdvice,
        json!({
            "title": "Présentez-vous au chef boulanger dès son arrivée tôt le matin",
            "cardText": "Allez à la boulangerie la veille pour savoir à quelle heure arrive le chef boulanger.",
            "filters": ["for-job-group(D1102)", "not-for-job(12006)"],
        }),
    );
    store
}

/// Trainings for bakers in the Rhône only.
pub fn reference_catalog() -> StaticCatalog {
    StaticCatalog::empty().with_trainings(
        "D1102",
        "69",
        vec![Training {
            name: "CAP Boulanger".to_string(),
            city_name: Some("Lyon".to_string()),
            url: None,
        }],
    )
}

/// Personas for sweeps across every model.
pub fn personas() -> BTreeMap<&'static str, Persona> {
    let mut young_baker = Persona::default()
        .born_in(1994)
        .targeting("D1102", "10868")
        .with_kind(ProjectKind::FindAFirstJob)
        .searching_for(2)
        .with_frustration(Frustration::NoOffers);
    young_baker.user.family_situation = FamilySituation::Single;
    young_baker.project.mobility.area_type = AreaType::Country;
    young_baker.project.weekly_applications_estimate = NumberOfferEstimate::LessThan2;
    young_baker.project.total_interview_count = 0;
    young_baker.project.seniority = Seniority::Junior;
    young_baker.project.employment_types = vec![EmploymentType::CddLessEqual3Months];

    let mut senior_secretary = Persona::default()
        .born_in(1960)
        .targeting("M1607", "15000")
        .living_in("75056", "75")
        .with_kind(ProjectKind::Reorientation)
        .searching_for(14)
        .with_frustration(Frustration::AgeDiscrimination)
        .with_frustration(Frustration::Motivation);
    senior_secretary.user.highest_degree = DegreeLevel::LicenceMaitrise;
    senior_secretary.user.family_situation = FamilySituation::FamilyWithKids;
    senior_secretary.project.mobility.area_type = AreaType::City;
    senior_secretary.project.weekly_applications_estimate = NumberOfferEstimate::DecentAmount;
    senior_secretary.project.weekly_offers_estimate = NumberOfferEstimate::ALot;
    senior_secretary.project.network_estimate = 2;
    senior_secretary.project.training_fulfillment_estimate = TrainingFulfillment::EnoughExperience;
    senior_secretary.project.seniority = Seniority::Expert;

    let mut chief_baker = Persona::default()
        .born_in(1975)
        .targeting("D1102", "12006")
        .searching_for(6)
        .with_frustration(Frustration::Training);
    chief_baker.user.highest_degree = DegreeLevel::CapBep;
    chief_baker.project.weekly_applications_estimate = NumberOfferEstimate::ALot;
    chief_baker.project.weekly_offers_estimate = NumberOfferEstimate::DecentAmount;
    chief_baker.project.total_interview_count = 25;
    chief_baker.project.training_fulfillment_estimate = TrainingFulfillment::EnoughDiplomas;
    chief_baker.project.seniority = Seniority::Senior;
    chief_baker.project.employment_types = vec![EmploymentType::Cdi, EmploymentType::Interim];

    let mut unknown = Persona::default()
        .born_in(1988)
        .targeting("K2204", "")
        .living_in("", "")
        .searching_for(0);
    unknown.user.highest_degree = DegreeLevel::UnknownDegree;
    unknown.user.family_situation = FamilySituation::Single;
    unknown.project.mobility.area_type = AreaType::Region;
    unknown.project.weekly_applications_estimate = NumberOfferEstimate::Unknown;
    unknown.project.weekly_offers_estimate = NumberOfferEstimate::LessThan2;
    unknown.project.total_interview_count = -1;
    unknown.project.network_estimate = 0;
    unknown.project.training_fulfillment_estimate = TrainingFulfillment::UnknownTrainingFulfillment;
    unknown.project.seniority = Seniority::UnknownSeniority;
    unknown.project.employment_types = Vec::new();

    BTreeMap::from([
        ("young-baker", young_baker),
        ("senior-secretary", senior_secretary),
        ("chief-baker", chief_baker),
        ("unknown", unknown),
    ])
}
